use homwarp_image::ImageError;
use homwarp_interp::InterpError;

/// An error type for the warping module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WarpError {
    /// Error when the homography cannot be inverted or maps the image
    /// geometry to infinity.
    #[error("Homography is singular or maps the image to infinity")]
    SingularTransform,

    /// Error when the geometry string does not match the grammar or yields
    /// non-positive dimensions.
    #[error("Malformed geometry specification: {0:?}")]
    MalformedGeometry(String),

    /// Error when the homography string does not hold exactly 9 numbers.
    #[error("Homography must have exactly 9 coefficients: {0:?}")]
    MalformedHomography(String),

    /// Error from the interpolation plan.
    #[error(transparent)]
    Interp(#[from] InterpError),

    /// Error from the image buffer.
    #[error(transparent)]
    Image(#[from] ImageError),
}
