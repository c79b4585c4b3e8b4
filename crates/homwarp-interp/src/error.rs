use homwarp_image::ImageError;

/// An error type for the interpolation module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum InterpError {
    /// Error when the boundary extension name is not recognized.
    #[error("Unsupported boundary extension: {0:?}")]
    UnsupportedBoundary(String),

    /// Error when the requested order exceeds the supported maximum.
    #[error("Interpolation order {0} exceeds the supported maximum {1}")]
    OrderOutOfRange(usize, usize),

    /// Error when the relative precision is outside (0, 1].
    #[error("Relative precision must lie in (0, 1], got {0}")]
    InvalidPrecision(f64),

    /// Error when the plan could not be built from the source image.
    #[error("Failed to build interpolation plan: {0}")]
    ResourceCreation(String),

    /// Error from the image buffer.
    #[error(transparent)]
    Image(#[from] ImageError),
}
