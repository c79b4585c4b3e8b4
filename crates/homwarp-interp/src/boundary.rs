use crate::error::InterpError;

/// Boundary extension policy for the continuous reconstruction.
///
/// Defines the image values outside the sampled domain, both for the
/// prefiltering recursions and for index folding during sampling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoundaryExtension {
    /// Replicate the edge sample (plateau extension). Requires computing on
    /// an enlarged domain, the in-domain recursion has no consistent
    /// initialization for this policy.
    Constant,
    /// Periodic tiling with period `n`.
    Periodic,
    /// Half-sample symmetric reflection: `s(-1) = s(0)`, period `2n`.
    #[default]
    HalfSymmetric,
    /// Whole-sample symmetric reflection: `s(-1) = s(1)`, period `2n - 2`.
    WholeSymmetric,
}

impl BoundaryExtension {
    /// Fold an arbitrary integer index into `[0, n)` under the extension.
    pub(crate) fn fold(self, i: isize, n: usize) -> usize {
        let n = n as isize;
        let m = match self {
            Self::Constant => i.clamp(0, n - 1),
            Self::Periodic => i.rem_euclid(n),
            Self::HalfSymmetric => {
                let m = i.rem_euclid(2 * n);
                if m < n {
                    m
                } else {
                    2 * n - 1 - m
                }
            }
            Self::WholeSymmetric => {
                if n == 1 {
                    return 0;
                }
                let m = i.rem_euclid(2 * n - 2);
                if m < n {
                    m
                } else {
                    2 * n - 2 - m
                }
            }
        };
        m as usize
    }
}

impl std::str::FromStr for BoundaryExtension {
    type Err = InterpError;

    /// Any non-empty prefix of the canonical lowercase name is accepted,
    /// so `hsym` selects `HalfSymmetric`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        let is_prefix_of = |name: &str| !lower.is_empty() && name.starts_with(lower.as_str());
        if is_prefix_of("constant") {
            Ok(Self::Constant)
        } else if is_prefix_of("periodic") {
            Ok(Self::Periodic)
        } else if is_prefix_of("hsymmetric") {
            Ok(Self::HalfSymmetric)
        } else if is_prefix_of("wsymmetric") {
            Ok(Self::WholeSymmetric)
        } else {
            Err(InterpError::UnsupportedBoundary(s.to_string()))
        }
    }
}

impl std::fmt::Display for BoundaryExtension {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            Self::Constant => "constant",
            Self::Periodic => "periodic",
            Self::HalfSymmetric => "hsymmetric",
            Self::WholeSymmetric => "wsymmetric",
        };
        write!(f, "{}", name)
    }
}
