#![deny(missing_docs)]
//! Image file decoding and encoding for the homwarp pipeline.

/// Error types for the io module.
pub mod error;

/// High-level read and write functions.
pub mod functional;

pub use crate::error::IoError;
pub use crate::functional::{read_image_any_planar, write_image_any_planar};
