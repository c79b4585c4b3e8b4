#![deny(missing_docs)]
//! B-spline interpolation plans for continuous image reconstruction.
//!
//! The usage pattern is plan-based: prefilter an image once into a
//! [`SplinePlan`], query it at arbitrary fractional coordinates any number
//! of times, and let the plan drop when the run is over.
//!
//! ```
//! use homwarp_image::{Image, ImageSize};
//! use homwarp_interp::{PlanParams, SplinePlan};
//!
//! let src = Image::from_size_val(ImageSize { width: 16, height: 16 }, 3, 0.5).unwrap();
//! let plan = SplinePlan::new(&src, &PlanParams::default()).unwrap();
//!
//! let mut pixel = [0.0; 3];
//! plan.sample(1.3, 2.4, &mut pixel);
//! ```

/// Boundary extension policies.
pub mod boundary;

mod bspline;

/// Error types for the interpolation module.
pub mod error;

/// Interpolation plan construction and sampling.
pub mod plan;

pub use crate::boundary::BoundaryExtension;
pub use crate::bspline::MAX_ORDER;
pub use crate::error::InterpError;
pub use crate::plan::{PlanParams, SplinePlan};
