use homwarp_image::ImageSize;

use crate::error::WarpError;
use crate::homography::Homography;

/// Output region of a warp, in source-image coordinate space.
///
/// The origin may be negative or fractional; the extent is a positive
/// integer pixel count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutputWindow {
    /// Horizontal origin of the window.
    pub x0: f64,
    /// Vertical origin of the window.
    pub y0: f64,
    /// Width of the window in pixels.
    pub width: usize,
    /// Height of the window in pixels.
    pub height: usize,
}

/// Requested output geometry, one of four mutually exclusive modes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Geometry {
    /// A fixed rectangle, `WxH` or `WxH+X+Y`.
    Explicit {
        /// Width of the rectangle in pixels.
        width: usize,
        /// Height of the rectangle in pixels.
        height: usize,
        /// Horizontal origin.
        x0: f64,
        /// Vertical origin.
        y0: f64,
    },
    /// The axis-aligned bounding box of the transformed source rectangle.
    Auto,
    /// The source rectangle translated so its center maps onto itself.
    Center,
    /// The source rectangle itself.
    #[default]
    Default,
}

impl Geometry {
    /// Resolve the output window for the forward homography `h` applied to
    /// a source image of the given size.
    ///
    /// # Errors
    ///
    /// [`WarpError::SingularTransform`] when a mapped corner or center is
    /// non-finite (perspective divisor zero) or the bounding box collapses
    /// to an empty extent.
    pub fn resolve(&self, h: &Homography, src: ImageSize) -> Result<OutputWindow, WarpError> {
        let (w, h_px) = (src.width as f64, src.height as f64);
        match *self {
            Geometry::Explicit {
                width,
                height,
                x0,
                y0,
            } => Ok(OutputWindow {
                x0,
                y0,
                width,
                height,
            }),
            Geometry::Auto => {
                let corners = [(0.0, 0.0), (w, 0.0), (0.0, h_px), (w, h_px)];
                let mut min = (f64::INFINITY, f64::INFINITY);
                let mut max = (f64::NEG_INFINITY, f64::NEG_INFINITY);
                for &c in &corners {
                    let (x, y) = h.apply(c);
                    if !x.is_finite() || !y.is_finite() {
                        return Err(WarpError::SingularTransform);
                    }
                    min.0 = min.0.min(x);
                    min.1 = min.1.min(y);
                    max.0 = max.0.max(x);
                    max.1 = max.1.max(y);
                }
                // ceiling so the box fully covers the transformed image
                let width = (max.0 - min.0).ceil();
                let height = (max.1 - min.1).ceil();
                if width < 1.0 || height < 1.0 {
                    return Err(WarpError::SingularTransform);
                }
                Ok(OutputWindow {
                    x0: min.0,
                    y0: min.1,
                    width: width as usize,
                    height: height as usize,
                })
            }
            Geometry::Center => {
                let center = (w / 2.0, h_px / 2.0);
                let (cx, cy) = h.apply(center);
                if !cx.is_finite() || !cy.is_finite() {
                    return Err(WarpError::SingularTransform);
                }
                Ok(OutputWindow {
                    x0: cx - w / 2.0,
                    y0: cy - h_px / 2.0,
                    width: src.width,
                    height: src.height,
                })
            }
            Geometry::Default => Ok(OutputWindow {
                x0: 0.0,
                y0: 0.0,
                width: src.width,
                height: src.height,
            }),
        }
    }
}

impl std::str::FromStr for Geometry {
    type Err = WarpError;

    /// Grammar: `auto` | `center` | `<int>x<int>` |
    /// `<int>x<int>(+|-)<real>(+|-)<real>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Geometry::Auto),
            "center" => Ok(Geometry::Center),
            _ => parse_rect(s),
        }
    }
}

/// Position of the first sign character that starts a new numeric field,
/// skipping signs that belong to a preceding exponent.
fn next_sign(s: &str, from: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    (from..s.len()).find(|&i| {
        (bytes[i] == b'+' || bytes[i] == b'-')
            && (i == 0 || !matches!(bytes[i - 1], b'e' | b'E'))
    })
}

fn parse_rect(s: &str) -> Result<Geometry, WarpError> {
    let malformed = || WarpError::MalformedGeometry(s.to_string());

    let (width_str, rest) = s.split_once('x').ok_or_else(malformed)?;
    let width: i64 = width_str.trim().parse().map_err(|_| malformed())?;

    let (height_str, offsets) = match next_sign(rest, 0) {
        Some(pos) => (&rest[..pos], Some(&rest[pos..])),
        None => (rest, None),
    };
    let height: i64 = height_str.trim().parse().map_err(|_| malformed())?;

    let (x0, y0) = match offsets {
        None => (0.0, 0.0),
        Some(offsets) => {
            // two sign-prefixed reals, exactly
            let second = next_sign(offsets, 1).ok_or_else(malformed)?;
            if next_sign(offsets, second + 1).is_some() {
                return Err(malformed());
            }
            let x0: f64 = offsets[..second].parse().map_err(|_| malformed())?;
            let y0: f64 = offsets[second..].parse().map_err(|_| malformed())?;
            (x0, y0)
        }
    };

    if width <= 0 || height <= 0 {
        return Err(malformed());
    }

    Ok(Geometry::Explicit {
        width: width as usize,
        height: height as usize,
        x0,
        y0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: ImageSize = ImageSize {
        width: 100,
        height: 80,
    };

    #[test]
    fn parse_explicit() -> Result<(), WarpError> {
        assert_eq!(
            "100x50".parse::<Geometry>()?,
            Geometry::Explicit {
                width: 100,
                height: 50,
                x0: 0.0,
                y0: 0.0
            }
        );
        assert_eq!(
            "100x50+10-5".parse::<Geometry>()?,
            Geometry::Explicit {
                width: 100,
                height: 50,
                x0: 10.0,
                y0: -5.0
            }
        );
        assert_eq!(
            "20x30-1.5+2.25".parse::<Geometry>()?,
            Geometry::Explicit {
                width: 20,
                height: 30,
                x0: -1.5,
                y0: 2.25
            }
        );
        Ok(())
    }

    #[test]
    fn parse_modes() -> Result<(), WarpError> {
        assert_eq!("auto".parse::<Geometry>()?, Geometry::Auto);
        assert_eq!("center".parse::<Geometry>()?, Geometry::Center);
        Ok(())
    }

    #[test]
    fn parse_malformed() {
        for s in ["0x10", "10", "abc", "10x-5", "100x50+1", "100x50+1+2+3", "x10"] {
            assert!(
                matches!(
                    s.parse::<Geometry>(),
                    Err(WarpError::MalformedGeometry(_))
                ),
                "{:?} should be rejected",
                s
            );
        }
    }

    #[test]
    fn resolve_explicit() -> Result<(), WarpError> {
        let window = "100x50+10-5"
            .parse::<Geometry>()?
            .resolve(&Homography::identity(), SIZE)?;
        assert_eq!(
            window,
            OutputWindow {
                x0: 10.0,
                y0: -5.0,
                width: 100,
                height: 50
            }
        );
        Ok(())
    }

    #[test]
    fn resolve_auto_identity() -> Result<(), WarpError> {
        let window = Geometry::Auto.resolve(&Homography::identity(), SIZE)?;
        assert_eq!(
            window,
            OutputWindow {
                x0: 0.0,
                y0: 0.0,
                width: 100,
                height: 80
            }
        );
        Ok(())
    }

    #[test]
    fn resolve_auto_translation() -> Result<(), WarpError> {
        let h = Homography([1.0, 0.0, 7.5, 0.0, 1.0, -2.0, 0.0, 0.0, 1.0]);
        let window = Geometry::Auto.resolve(&h, SIZE)?;
        assert_eq!(window.x0, 7.5);
        assert_eq!(window.y0, -2.0);
        assert_eq!((window.width, window.height), (100, 80));
        Ok(())
    }

    #[test]
    fn resolve_auto_scale_ceils() -> Result<(), WarpError> {
        // 1.01 scale of a 100x80 image covers 101x80.8, ceiled to 101x81
        let h = Homography([1.01, 0.0, 0.0, 0.0, 1.01, 0.0, 0.0, 0.0, 1.0]);
        let window = Geometry::Auto.resolve(&h, SIZE)?;
        assert_eq!((window.width, window.height), (101, 81));
        Ok(())
    }

    #[test]
    fn resolve_center_identity() -> Result<(), WarpError> {
        let window = Geometry::Center.resolve(&Homography::identity(), SIZE)?;
        assert_eq!(
            window,
            OutputWindow {
                x0: 0.0,
                y0: 0.0,
                width: 100,
                height: 80
            }
        );
        Ok(())
    }

    #[test]
    fn resolve_center_translation() -> Result<(), WarpError> {
        let h = Homography([1.0, 0.0, 3.0, 0.0, 1.0, -4.0, 0.0, 0.0, 1.0]);
        let window = Geometry::Center.resolve(&h, SIZE)?;
        assert_eq!(window.x0, 3.0);
        assert_eq!(window.y0, -4.0);
        assert_eq!((window.width, window.height), (100, 80));
        Ok(())
    }

    #[test]
    fn resolve_default() -> Result<(), WarpError> {
        let window = Geometry::Default.resolve(&Homography::identity(), SIZE)?;
        assert_eq!((window.x0, window.y0), (0.0, 0.0));
        assert_eq!((window.width, window.height), (100, 80));
        Ok(())
    }

    #[test]
    fn resolve_auto_corner_at_infinity() {
        // the line w' = 0 crosses the image, one corner maps to infinity
        let h = Homography([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, -0.01, 0.0, 1.0]);
        assert_eq!(
            Geometry::Auto.resolve(&h, SIZE),
            Err(WarpError::SingularTransform)
        );
    }
}
