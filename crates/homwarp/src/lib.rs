//! Homographic transformation of images using B-spline interpolation.
//!
//! This top-level crate re-exports the workspace members: planar image
//! buffers, the interpolation plans and the warping pipeline.

#[doc(inline)]
pub use homwarp_image as image;

#[doc(inline)]
pub use homwarp_interp as interp;

#[doc(inline)]
pub use homwarp_io as io;

#[doc(inline)]
pub use homwarp_warp as warp;
