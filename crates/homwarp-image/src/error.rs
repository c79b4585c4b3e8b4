/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the data length does not match the image geometry.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the image geometry is degenerate.
    #[error("Invalid image size ({0}x{1}x{2}), all extents must be positive")]
    InvalidImageSize(usize, usize, usize),

    /// Error when a channel plane index is out of bounds.
    #[error("Channel index {0} out of bounds for image with {1} channels")]
    ChannelIndexOutOfBounds(usize, usize),
}
