//! # planar-ops
//!
//! Image processing operators over channel-planar [`Image`] buffers.
//!
//! # Modules
//!
//! - [`arith`] - Copy, shift/scale, clamp, add/sub, normalization
//! - [`color`] - RGB to grayscale, RGB to HSV and back
//! - [`resize`] - Nearest-neighbor and bilinear resampling
//! - [`filter`] - Kernel constructors and 2D convolution
//! - [`gradient`] - Sobel magnitude/direction and edge visualization
//! - [`parallel`] - Rayon versions of convolve and resize (feature `parallel`)
//!
//! # Contracts
//!
//! Operators that take `&Image` return a freshly allocated image and never
//! touch their inputs. Operators that take `&mut Image` work in place.
//! Shape and channel preconditions are checked up front and reported as
//! [`OpsError`]; nothing is allocated or mutated on failure.
//!
//! # Example
//!
//! ```rust
//! use planar_ops::prelude::*;
//!
//! // Unsharp mask: image + (image - blur(image))
//! let img = Image::filled(32, 32, 3, 0.5).unwrap();
//! let low = convolve(&img, &gaussian_filter(2.0).unwrap(), true).unwrap();
//! let high = sub(&img, &low).unwrap();
//! let mut sharp = add(&img, &high).unwrap();
//! clamp01(&mut sharp);
//! ```
//!
//! # Logging
//!
//! Operators emit `tracing` events at `trace` level on entry and `debug`
//! level for notable decisions. Install a subscriber in the application to
//! see them.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod arith;
pub mod color;
pub mod filter;
pub mod gradient;
pub mod resize;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use error::{OpsError, OpsResult};
pub use filter::ConvolveMode;
pub use gradient::Gradient;
pub use planar_core::Image;
pub use resize::Interpolation;

/// Prelude module for convenient imports.
///
/// ```
/// use planar_ops::prelude::*;
/// ```
pub mod prelude {
    pub use crate::arith::{
        add, clamp01, copy, feature_normalize, l1_normalize, scale, shift, sub,
    };
    pub use crate::color::{hsv_to_rgb, rgb_to_grayscale, rgb_to_hsv};
    pub use crate::error::{OpsError, OpsResult};
    pub use crate::filter::{
        box_filter, convolve, convolve_with, emboss_filter, gaussian_filter, gx_filter,
        gy_filter, highpass_filter, sharpen_filter, ConvolveMode,
    };
    pub use crate::gradient::{colorize_sobel, sobel, Gradient};
    pub use crate::resize::{bilinear_resize, nearest_resize, resize, Interpolation};
    pub use planar_core::Image;
}
