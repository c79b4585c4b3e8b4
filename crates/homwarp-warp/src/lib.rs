#![deny(missing_docs)]
//! Projective warping of images driven by B-spline interpolation plans.
//!
//! The pipeline inverts a forward homography, resolves the output window
//! (explicit rectangle, bounding box, center-preserving or the source
//! rectangle), builds an interpolation plan from the source image and
//! inverse-maps every output pixel through it.

/// Error types for the warping module.
pub mod error;

/// Output window resolution from a geometry specification.
pub mod geometry;

/// 3x3 projective transforms.
pub mod homography;

/// Parallel row iteration over planar images.
pub mod parallel;

/// The resampling engine.
pub mod warp;

pub use crate::error::WarpError;
pub use crate::geometry::{Geometry, OutputWindow};
pub use crate::homography::Homography;
pub use crate::warp::{warp_homography, warp_homography_geom, WarpConfig};
