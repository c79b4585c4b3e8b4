use homwarp_image::Image;

use crate::boundary::BoundaryExtension;
use crate::bspline::{bspline_weights, filter_poles, MAX_ORDER};
use crate::error::InterpError;

/// Parameters for building a [`SplinePlan`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanParams {
    /// Degree of the B-spline reconstruction kernel, `0..=MAX_ORDER`.
    pub order: usize,
    /// Boundary extension policy.
    pub boundary: BoundaryExtension,
    /// Relative precision of the prefiltering recursions, in `(0, 1]`.
    pub precision: f64,
    /// Prefilter a padded copy of the image instead of the exact domain.
    ///
    /// Mandatory for [`BoundaryExtension::Constant`]; callers are expected
    /// to enforce that before building the plan.
    pub enlarged_domain: bool,
}

impl Default for PlanParams {
    fn default() -> Self {
        Self {
            order: MAX_ORDER,
            boundary: BoundaryExtension::default(),
            precision: 1e-6,
            enlarged_domain: false,
        }
    }
}

/// Prefiltered continuous reconstruction of one image.
///
/// Holds the B-spline coefficient planes computed once at creation; after
/// that the plan is immutable and any number of point queries can be made,
/// concurrently if desired. The coefficient storage is released when the
/// plan is dropped.
///
/// ```
/// use homwarp_image::{Image, ImageSize};
/// use homwarp_interp::{PlanParams, SplinePlan};
///
/// let src = Image::from_size_val(ImageSize { width: 8, height: 8 }, 1, 3.0).unwrap();
/// let plan = SplinePlan::new(&src, &PlanParams::default()).unwrap();
///
/// let mut pixel = [0.0];
/// plan.sample(2.75, 4.5, &mut pixel);
/// assert!((pixel[0] - 3.0).abs() < 1e-4);
/// ```
pub struct SplinePlan {
    coeffs: Vec<f64>,
    width: usize,
    height: usize,
    channels: usize,
    margin: usize,
    order: usize,
    boundary: BoundaryExtension,
}

impl SplinePlan {
    /// Prefilter the source image into B-spline coefficients.
    ///
    /// This is the expensive setup step, performed exactly once per plan.
    ///
    /// # Errors
    ///
    /// Fails before any allocation when the order exceeds [`MAX_ORDER`] or
    /// the precision lies outside `(0, 1]`.
    pub fn new(src: &Image, params: &PlanParams) -> Result<Self, InterpError> {
        if params.order > MAX_ORDER {
            return Err(InterpError::OrderOutOfRange(params.order, MAX_ORDER));
        }
        if !params.precision.is_finite() || params.precision <= 0.0 || params.precision > 1.0 {
            return Err(InterpError::InvalidPrecision(params.precision));
        }

        let poles = filter_poles(params.order);
        let margin = if params.enlarged_domain {
            padding_margin(params.order, params.precision, &poles)
        } else {
            0
        };

        let (w, h, c) = (src.cols(), src.rows(), src.num_channels());
        let (pw, ph) = (w + 2 * margin, h + 2 * margin);
        let mut coeffs = vec![0.0; pw * ph * c];

        for k in 0..c {
            let plane = src.plane(k)?;
            let out = &mut coeffs[k * pw * ph..(k + 1) * pw * ph];
            if margin == 0 {
                out.copy_from_slice(plane);
            } else {
                // extend the source into the padded plane by the boundary rule
                for j in 0..ph {
                    let sj = params.boundary.fold(j as isize - margin as isize, h);
                    let src_row = &plane[sj * w..(sj + 1) * w];
                    let dst_row = &mut out[j * pw..(j + 1) * pw];
                    for (i, v) in dst_row.iter_mut().enumerate() {
                        let si = params.boundary.fold(i as isize - margin as isize, w);
                        *v = src_row[si];
                    }
                }
            }
            prefilter_plane(out, pw, ph, &poles, params.precision, params.boundary);
        }

        Ok(Self {
            coeffs,
            width: pw,
            height: ph,
            channels: c,
            margin,
            order: params.order,
            boundary: params.boundary,
        })
    }

    /// The interpolation order of the plan.
    pub fn order(&self) -> usize {
        self.order
    }

    /// The boundary extension of the plan.
    pub fn boundary(&self) -> BoundaryExtension {
        self.boundary
    }

    /// The number of channel planes.
    pub fn num_channels(&self) -> usize {
        self.channels
    }

    /// Interpolate all channels at the continuous coordinate `(x, y)`.
    ///
    /// `out` must hold at least `num_channels` values. Coordinates outside
    /// the image domain are resolved through the boundary extension;
    /// non-finite coordinates fold onto the nearest image edge first, so
    /// the query is total.
    pub fn sample(&self, x: f64, y: f64, out: &mut [f64]) {
        debug_assert!(out.len() >= self.channels);
        let (wx, wy, ix, iy) = self.taps(x, y);
        let n = self.order;
        for (c, v) in out.iter_mut().enumerate().take(self.channels) {
            *v = self.accumulate(c, &wx[..=n], &wy[..=n], &ix[..=n], &iy[..=n]);
        }
    }

    /// Interpolate a single channel at the continuous coordinate `(x, y)`.
    pub fn sample_channel(&self, x: f64, y: f64, channel: usize) -> f64 {
        debug_assert!(channel < self.channels);
        let (wx, wy, ix, iy) = self.taps(x, y);
        let n = self.order;
        self.accumulate(channel, &wx[..=n], &wy[..=n], &ix[..=n], &iy[..=n])
    }

    #[allow(clippy::type_complexity)]
    fn taps(
        &self,
        x: f64,
        y: f64,
    ) -> (
        [f64; MAX_ORDER + 1],
        [f64; MAX_ORDER + 1],
        [usize; MAX_ORDER + 1],
        [usize; MAX_ORDER + 1],
    ) {
        let n = self.order;
        let mut wx = [0.0; MAX_ORDER + 1];
        let mut wy = [0.0; MAX_ORDER + 1];
        let mut ix = [0usize; MAX_ORDER + 1];
        let mut iy = [0usize; MAX_ORDER + 1];
        let x = clamp_tap_coordinate(x, self.width - 2 * self.margin);
        let y = clamp_tap_coordinate(y, self.height - 2 * self.margin);
        let jx = bspline_weights(n, x + self.margin as f64, &mut wx[..=n]);
        let jy = bspline_weights(n, y + self.margin as f64, &mut wy[..=n]);
        for k in 0..=n {
            ix[k] = self.boundary.fold(jx + k as isize, self.width);
            iy[k] = self.boundary.fold(jy + k as isize, self.height);
        }
        (wx, wy, ix, iy)
    }

    fn accumulate(&self, channel: usize, wx: &[f64], wy: &[f64], ix: &[usize], iy: &[usize]) -> f64 {
        let plane_len = self.width * self.height;
        let plane = &self.coeffs[channel * plane_len..(channel + 1) * plane_len];
        let mut acc = 0.0;
        for (wyv, &row) in wy.iter().zip(iy) {
            let base = row * self.width;
            let mut row_acc = 0.0;
            for (wxv, &col) in wx.iter().zip(ix) {
                row_acc += wxv * plane[base + col];
            }
            acc += wyv * row_acc;
        }
        acc
    }
}

/// Fold a query coordinate that cannot be resolved to a tap index onto the
/// nearest edge of the `n`-sample domain, where the boundary extension
/// takes over. This covers points mapped to infinity by a homography whose
/// vanishing line crosses the output window, and magnitudes so large that
/// the fractional position is meaningless.
fn clamp_tap_coordinate(v: f64, n: usize) -> f64 {
    const LIMIT: f64 = 1e12;
    if v.is_nan() || v <= -LIMIT {
        -1.0
    } else if v >= LIMIT {
        n as f64
    } else {
        v
    }
}

/// Number of recursion steps after which a warm-up term of magnitude
/// `|z|^k` drops below `eps`.
fn truncation_horizon(eps: f64, z: f64) -> usize {
    let h = (eps.ln() / z.abs().ln()).ceil();
    h.max(1.0) as usize
}

/// Padding for the enlarged domain: the widest warm-up horizon plus the
/// kernel support, so in-domain queries never see the padded edge.
fn padding_margin(order: usize, eps: f64, poles: &[f64]) -> usize {
    let horizon = poles
        .iter()
        .map(|&z| truncation_horizon(eps, z))
        .max()
        .unwrap_or(0);
    horizon + order + 1
}

/// In-place separable prefiltering of one channel plane, rows then columns.
fn prefilter_plane(
    plane: &mut [f64],
    width: usize,
    height: usize,
    poles: &[f64],
    eps: f64,
    boundary: BoundaryExtension,
) {
    if poles.is_empty() {
        return;
    }
    let mut scratch = Vec::with_capacity(width.max(height));
    for row in plane.chunks_exact_mut(width) {
        filter_line(row, &mut scratch, poles, eps, boundary);
    }
    let mut column = vec![0.0; height];
    for i in 0..width {
        for (j, v) in column.iter_mut().enumerate() {
            *v = plane[j * width + i];
        }
        filter_line(&mut column, &mut scratch, poles, eps, boundary);
        for (j, v) in column.iter().enumerate() {
            plane[j * width + i] = *v;
        }
    }
}

/// One-dimensional direct B-spline filter: for each pole, a causal pass
/// `c(k) += z c(k-1)` and an anticausal pass `c(k) = z (c(k+1) - c(k))`,
/// both initialized by running the recursion over `horizon` boundary
/// extended samples so the truncation error stays below `eps`.
fn filter_line(
    c: &mut [f64],
    scratch: &mut Vec<f64>,
    poles: &[f64],
    eps: f64,
    boundary: BoundaryExtension,
) {
    let n = c.len();
    let gain: f64 = poles.iter().map(|&z| (1.0 - z) * (1.0 - 1.0 / z)).product();
    for v in c.iter_mut() {
        *v *= gain;
    }
    for &z in poles {
        let horizon = truncation_horizon(eps, z);
        scratch.clear();
        scratch.extend_from_slice(c);

        // causal warm-up over the extended left tail
        let mut acc = scratch[boundary.fold(-(horizon as isize), n)];
        for k in (1..horizon).rev() {
            acc = scratch[boundary.fold(-(k as isize), n)] + z * acc;
        }
        c[0] += z * acc;
        for k in 1..n {
            c[k] += z * c[k - 1];
        }

        // anticausal initialization: c-(N-1) = -z * sum_j z^j c+(N-1+j),
        // continuing the causal recursion over the extended right tail
        let mut cp = c[n - 1];
        let mut sum = cp;
        let mut zj = 1.0;
        for j in 1..=horizon {
            cp = scratch[boundary.fold((n - 1 + j) as isize, n)] + z * cp;
            zj *= z;
            sum += zj * cp;
        }
        c[n - 1] = -z * sum;
        for k in (0..n - 1).rev() {
            c[k] = z * (c[k + 1] - c[k]);
        }
    }
}
