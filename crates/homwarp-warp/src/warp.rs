use homwarp_image::Image;
use homwarp_interp::{BoundaryExtension, PlanParams, SplinePlan, MAX_ORDER};

use crate::error::WarpError;
use crate::geometry::{Geometry, OutputWindow};
use crate::homography::Homography;
use crate::parallel;

/// Interpolation configuration of a warp run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WarpConfig {
    /// Degree of the B-spline reconstruction kernel.
    pub order: usize,
    /// Boundary extension policy.
    pub boundary: BoundaryExtension,
    /// Relative precision of the prefiltering, in `(0, 1]`.
    pub precision: f64,
    /// Build the reconstruction over an enlarged domain instead of the
    /// exact image extent.
    pub enlarged_domain: bool,
}

impl Default for WarpConfig {
    fn default() -> Self {
        Self {
            order: MAX_ORDER,
            boundary: BoundaryExtension::default(),
            precision: 1e-6,
            enlarged_domain: false,
        }
    }
}

impl WarpConfig {
    /// Plan parameters with the constant-boundary constraint applied.
    ///
    /// The constant extension cannot be prefiltered on the exact domain;
    /// such a request is corrected to the enlarged domain with a
    /// diagnostic, and the run proceeds.
    pub fn plan_params(&self) -> PlanParams {
        let mut enlarged_domain = self.enlarged_domain;
        if self.boundary == BoundaryExtension::Constant && !enlarged_domain {
            log::warn!(
                "constant extension is not compatible with the exact domain, \
                 computing on the enlarged domain instead"
            );
            enlarged_domain = true;
        }
        PlanParams {
            order: self.order,
            boundary: self.boundary,
            precision: self.precision,
            enlarged_domain,
        }
    }
}

/// Warp an image by a projective homography onto the source rectangle.
///
/// The output window is the source image's own rectangle; see
/// [`warp_homography_geom`] for an explicit window.
///
/// # Example
///
/// ```
/// use homwarp_image::{Image, ImageSize};
/// use homwarp_warp::{warp_homography, Homography, WarpConfig};
///
/// let src = Image::from_size_val(ImageSize { width: 8, height: 6 }, 1, 1.0).unwrap();
/// let dst = warp_homography(&src, &Homography::identity(), &WarpConfig::default()).unwrap();
///
/// assert_eq!(dst.size(), src.size());
/// ```
pub fn warp_homography(src: &Image, h: &Homography, config: &WarpConfig) -> Result<Image, WarpError> {
    let window = Geometry::Default.resolve(h, src.size())?;
    warp_homography_geom(src, &window, h, config)
}

/// Warp an image by a projective homography into an explicit output window.
///
/// `h` maps source coordinates to output coordinates; every output pixel
/// `(i, j)` is inverse-mapped through `h` and sampled from a continuous
/// B-spline reconstruction of `src`. The interpolation plan is built once,
/// shared read-only by all queries and released when the run ends, on
/// every exit path.
///
/// # Errors
///
/// Fails before producing any output when `h` is singular or the plan
/// cannot be built; no partial result is ever returned.
pub fn warp_homography_geom(
    src: &Image,
    window: &OutputWindow,
    h: &Homography,
    config: &WarpConfig,
) -> Result<Image, WarpError> {
    let h_inv = h.invert()?;
    let plan = SplinePlan::new(src, &config.plan_params())?;

    let (wout, hout) = (window.width, window.height);
    let (map_x, map_y) = inverse_map_grid(&h_inv, window);

    let mut dst = Image::from_size_val([wout, hout].into(), src.num_channels(), 0.0)?;
    parallel::par_iter_plane_rows(&mut dst, |channel, row, row_slice| {
        let xs = &map_x[row * wout..(row + 1) * wout];
        let ys = &map_y[row * wout..(row + 1) * wout];
        for ((v, &x), &y) in row_slice.iter_mut().zip(xs).zip(ys) {
            *v = plan.sample_channel(x, y, channel);
        }
    });

    Ok(dst)
}

/// Inverse-map the output grid to source coordinates.
///
/// `map_x[j * w + i]` and `map_y[j * w + i]` hold the source position of
/// output pixel `(i, j)`.
fn inverse_map_grid(h_inv: &Homography, window: &OutputWindow) -> (Vec<f64>, Vec<f64>) {
    let (wout, hout) = (window.width, window.height);
    let mut map_x = vec![0.0; wout * hout];
    let mut map_y = vec![0.0; wout * hout];
    for j in 0..hout {
        let py = j as f64 + window.y0;
        let row = j * wout;
        for i in 0..wout {
            let (qx, qy) = h_inv.apply((i as f64 + window.x0, py));
            map_x[row + i] = qx;
            map_y[row + i] = qy;
        }
    }
    (map_x, map_y)
}
