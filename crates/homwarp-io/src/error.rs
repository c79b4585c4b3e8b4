/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Error to manipulate the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to decode or encode the image.
    #[error("Failed to decode or encode the image. {0}")]
    ImageFormatError(#[from] image::ImageError),

    /// Error to create the image buffer.
    #[error("Failed to create image. {0}")]
    ImageCreationError(#[from] homwarp_image::ImageError),

    /// Error when the channel count cannot be encoded.
    #[error("Cannot encode an image with {0} channels")]
    UnsupportedChannelCount(usize),
}
