//! # planar-core
//!
//! Core types for channel-planar image processing.
//!
//! This crate provides the foundational types used by the rest of the
//! workspace:
//!
//! - [`Image`] - Owned `f32` sample buffer in channel-planar layout
//! - [`Error`], [`Result`] - Construction and shape errors
//! - Clamp-to-edge pixel access ([`Image::get`], [`Image::set`])
//!
//! ## Memory Layout
//!
//! Samples are stored plane by plane. The sample for pixel `(x, y)` in
//! channel `c` lives at `x + y * width + c * width * height`:
//!
//! ```text
//! Memory: [R R R R ... R]  ← channel 0, row-major
//!         [G G G G ... G]  ← channel 1
//!         [B B B B ... B]  ← channel 2
//! ```
//!
//! Codecs that hand buffers to this crate must produce exactly this order.
//!
//! ## Crate Structure
//!
//! ```text
//! planar-core (this crate)
//!    ^
//!    |
//!    +-- planar-ops (arithmetic, color, resize, filter, gradient)
//!    +-- planar-bench
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use planar_core::Image;
//!
//! let mut img = Image::new(4, 4, 3).unwrap();
//! img.set(1, 2, 0, 0.5);
//!
//! // Out-of-range reads clamp to the nearest edge sample.
//! assert_eq!(img.get(1, 2, 0), 0.5);
//! assert_eq!(img.get(-3, 2, 0), img.get(0, 2, 0));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod access;
pub mod error;
pub mod image;

// Re-exports for convenience
pub use error::*;
pub use image::*;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use planar_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::image::Image;
}
