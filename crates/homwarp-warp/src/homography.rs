use crate::error::WarpError;

/// Determinants below this magnitude are treated as singular.
const DET_TOLERANCE: f64 = 1e-12;

/// A 3x3 projective transform between two image planes.
///
/// Coefficients are stored row-major; the map is the matrix-vector product
/// `H * [x, y, 1]` followed by the perspective division.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Homography(pub [f64; 9]);

impl Homography {
    /// The identity transform.
    pub fn identity() -> Self {
        Self([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0])
    }

    #[rustfmt::skip]
    fn determinant(&self) -> f64 {
        let m = &self.0;
        m[0] * (m[4] * m[8] - m[5] * m[7]) -
        m[1] * (m[3] * m[8] - m[5] * m[6]) +
        m[2] * (m[3] * m[7] - m[4] * m[6])
    }

    #[rustfmt::skip]
    fn adjugate(&self) -> [f64; 9] {
        let m = &self.0;
        [
            m[4] * m[8] - m[5] * m[7],  // [0, 0]
            m[2] * m[7] - m[1] * m[8],  // [0, 1]
            m[1] * m[5] - m[2] * m[4],  // [0, 2]
            m[5] * m[6] - m[3] * m[8],  // [1, 0]
            m[0] * m[8] - m[2] * m[6],  // [1, 1]
            m[2] * m[3] - m[0] * m[5],  // [1, 2]
            m[3] * m[7] - m[4] * m[6],  // [2, 0]
            m[1] * m[6] - m[0] * m[7],  // [2, 1]
            m[0] * m[4] - m[1] * m[3],  // [2, 2]
        ]
    }

    /// Matrix inverse via the adjugate over the determinant.
    ///
    /// # Errors
    ///
    /// Fails with [`WarpError::SingularTransform`] when the determinant
    /// magnitude falls below the numerical tolerance.
    pub fn invert(&self) -> Result<Self, WarpError> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < DET_TOLERANCE {
            return Err(WarpError::SingularTransform);
        }
        let mut inv = self.adjugate();
        for v in inv.iter_mut() {
            *v /= det;
        }
        Ok(Self(inv))
    }

    /// Apply the projective map to a 2D point, with perspective division.
    ///
    /// If the perspective divisor is exactly zero the point lies at
    /// infinity and the result is non-finite; callers must not rely on it.
    pub fn apply(&self, p: (f64, f64)) -> (f64, f64) {
        let m = &self.0;
        let (x, y) = p;
        let w = m[6] * x + m[7] * y + m[8];
        (
            (m[0] * x + m[1] * y + m[2]) / w,
            (m[3] * x + m[4] * y + m[5]) / w,
        )
    }
}

impl std::str::FromStr for Homography {
    type Err = WarpError;

    /// Parse exactly 9 real numbers in row-major order, separated by any
    /// non-numeric characters, e.g. `"1 0 0; 0 1 0; 0 0 1"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .map(|c| {
                if c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E') {
                    c
                } else {
                    ' '
                }
            })
            .collect();
        let mut coeffs = [0.0; 9];
        let mut count = 0;
        for token in normalized.split_whitespace() {
            let value: f64 = token
                .parse()
                .map_err(|_| WarpError::MalformedHomography(s.to_string()))?;
            if count == 9 {
                return Err(WarpError::MalformedHomography(s.to_string()));
            }
            coeffs[count] = value;
            count += 1;
        }
        if count != 9 {
            return Err(WarpError::MalformedHomography(s.to_string()));
        }
        Ok(Self(coeffs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn invert_identity() -> Result<(), WarpError> {
        let h = Homography::identity();
        assert_eq!(h.invert()?, h);
        Ok(())
    }

    #[test]
    fn invert_translation() -> Result<(), WarpError> {
        let h = Homography([1.0, 0.0, -1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0]);
        let expected = Homography([1.0, 0.0, 1.0, 0.0, 1.0, -1.0, 0.0, 0.0, 1.0]);
        assert_eq!(h.invert()?, expected);
        Ok(())
    }

    #[test]
    fn invert_twice_recovers() -> Result<(), WarpError> {
        let h = Homography([1.2, 0.1, -3.0, -0.2, 0.9, 4.0, 1e-3, -2e-3, 1.0]);
        let hh = h.invert()?.invert()?;
        for (a, b) in h.0.iter().zip(hh.0.iter()) {
            assert_relative_eq!(a, b, max_relative = 1e-9);
        }
        Ok(())
    }

    #[test]
    fn invert_singular_fails() {
        // rank-deficient: two identical rows
        let h = Homography([1.0, 2.0, 3.0, 1.0, 2.0, 3.0, 0.0, 0.0, 1.0]);
        assert_eq!(h.invert(), Err(WarpError::SingularTransform));
    }

    #[test]
    fn apply_round_trip() -> Result<(), WarpError> {
        let h = Homography([0.8, -0.2, 5.0, 0.3, 1.1, -2.0, 1e-4, 2e-4, 1.0]);
        let hinv = h.invert()?;
        for &p in &[(0.0, 0.0), (10.5, -3.25), (100.0, 57.0)] {
            let q = hinv.apply(h.apply(p));
            assert_relative_eq!(q.0, p.0, epsilon = 1e-9);
            assert_relative_eq!(q.1, p.1, epsilon = 1e-9);
        }
        Ok(())
    }

    #[test]
    fn apply_perspective_division() {
        let h = Homography([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 2.0]);
        let (x, y) = h.apply((4.0, 6.0));
        assert_relative_eq!(x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(y, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn parse_with_separators() -> Result<(), WarpError> {
        let h: Homography = "1 0 0; 0 1 0; 0 0 1".parse()?;
        assert_eq!(h, Homography::identity());

        let h: Homography = "1.5, -2e-3, 0, 0, 1, 0, 0, 0, 1".parse()?;
        assert_eq!(h.0[0], 1.5);
        assert_eq!(h.0[1], -2e-3);
        Ok(())
    }

    #[test]
    fn parse_wrong_count_fails() {
        assert!(matches!(
            "1 0 0 0 1 0 0 0".parse::<Homography>(),
            Err(WarpError::MalformedHomography(_))
        ));
        assert!(matches!(
            "1 0 0 0 1 0 0 0 1 5".parse::<Homography>(),
            Err(WarpError::MalformedHomography(_))
        ));
        assert!("a b c".parse::<Homography>().is_err());
    }
}
