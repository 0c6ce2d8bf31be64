//! Sobel gradients and their color visualization.
//!
//! - [`sobel`] convolves with the Sobel pair (collapsing channels) and
//!   returns per-pixel magnitude `sqrt(gx^2 + gy^2)` and direction
//!   `atan2(gy, gx)` in `(-pi, pi]`.
//! - [`colorize_sobel`] normalizes both to `[0, 1]` and packs them into a
//!   3-channel image: direction in channel 0, magnitude in channels 1 and
//!   2. Run it through [`hsv_to_rgb`](crate::color::hsv_to_rgb) to get a
//!   hue-by-direction, brightness-by-strength edge map.
//!
//! # Example
//!
//! ```rust
//! use planar_core::Image;
//! use planar_ops::gradient::sobel;
//!
//! let flat = Image::filled(8, 8, 3, 0.4).unwrap();
//! let g = sobel(&flat).unwrap();
//! assert!(g.magnitude.data().iter().all(|&m| m == 0.0));
//! ```

use crate::arith::feature_normalize;
use crate::filter::{convolve_with, gx_filter, gy_filter, ConvolveMode};
use crate::OpsResult;
use planar_core::Image;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Gradient magnitude and direction, both single-channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    /// Edge strength, `sqrt(gx^2 + gy^2)`.
    pub magnitude: Image,
    /// Edge orientation in radians, `atan2(gy, gx)`.
    pub direction: Image,
}

/// Computes the Sobel gradient of `image`.
///
/// Channels are summed, so an RGB input gives the gradient of `R + G + B`.
/// Where both derivatives are zero the direction is `atan2(0, 0) == 0`.
pub fn sobel(image: &Image) -> OpsResult<Gradient> {
    trace!(shape = ?image.shape(), "sobel");
    let gx = convolve_with(image, &gx_filter(), ConvolveMode::Collapse)?;
    let gy = convolve_with(image, &gy_filter(), ConvolveMode::Collapse)?;

    let (magnitude, direction): (Vec<f32>, Vec<f32>) = gx
        .data()
        .iter()
        .zip(gy.data())
        .map(|(&x, &y)| ((x * x + y * y).sqrt(), y.atan2(x)))
        .unzip();

    let (w, h) = image.dimensions();
    Ok(Gradient {
        magnitude: Image::from_data(w, h, 1, magnitude)?,
        direction: Image::from_data(w, h, 1, direction)?,
    })
}

/// Builds a 3-channel edge visualization from the Sobel gradient.
///
/// Channel 0 holds the normalized direction, channels 1 and 2 the
/// normalized magnitude.
pub fn colorize_sobel(image: &Image) -> OpsResult<Image> {
    trace!(shape = ?image.shape(), "colorize_sobel");
    let Gradient {
        mut magnitude,
        mut direction,
    } = sobel(image)?;
    feature_normalize(&mut magnitude);
    feature_normalize(&mut direction);

    let (w, h) = image.dimensions();
    Ok(Image::from_planes(
        w,
        h,
        &[direction.data(), magnitude.data(), magnitude.data()],
    )?)
}
