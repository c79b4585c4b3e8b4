#![deny(missing_docs)]
//! Planar image buffer types for the homwarp pipeline.

/// image representation for the warping pipeline.
pub mod image;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
