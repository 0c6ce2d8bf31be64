//! Convolution filters and the generic 2D convolution operator.
//!
//! A filter is an ordinary [`Image`]. Its channel count is either 1 (one
//! kernel shared by every image channel) or equal to the image's channel
//! count (one kernel per channel).
//!
//! # Kernels
//!
//! - [`box_filter`] - Normalized average, all weights `1/size^2`
//! - [`gaussian_filter`] - Normalized Gaussian, side `ceil(6 sigma)` made odd
//! - [`highpass_filter`] - 4-neighbor Laplacian
//! - [`sharpen_filter`] - Identity plus Laplacian
//! - [`emboss_filter`] - Diagonal relief
//! - [`gx_filter`], [`gy_filter`] - Sobel derivatives
//!
//! # Borders
//!
//! Taps that fall outside the image read the clamped edge sample. There is
//! no zero padding.
//!
//! # Range
//!
//! [`convolve`] never clamps its output. Box and Gaussian kernels are
//! non-negative and sum to 1, so they keep `[0, 1]` inputs in range; the
//! other kernels do not, and callers follow up with
//! [`clamp01`](crate::arith::clamp01) or
//! [`feature_normalize`](crate::arith::feature_normalize).
//!
//! # Example
//!
//! ```rust
//! use planar_core::Image;
//! use planar_ops::filter::{convolve, gaussian_filter};
//!
//! let src = Image::filled(16, 16, 3, 0.5).unwrap();
//! let kernel = gaussian_filter(1.0).unwrap();
//! let blurred = convolve(&src, &kernel, true).unwrap();
//! assert_eq!(blurred.shape(), (16, 16, 3));
//! ```

use crate::arith::l1_normalize;
use crate::{OpsError, OpsResult};
use planar_core::Image;
use std::ops::Range;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Creates a `size x size` averaging kernel.
///
/// # Errors
///
/// Fails if `size` is zero.
///
/// # Example
///
/// ```rust
/// use planar_ops::filter::box_filter;
///
/// let k = box_filter(3).unwrap();
/// assert_eq!(k.shape(), (3, 3, 1));
/// assert!((k.get(0, 0, 0) - 1.0 / 9.0).abs() < 1e-7);
/// ```
pub fn box_filter(size: u32) -> OpsResult<Image> {
    let weight = 1.0 / (size as f32 * size as f32);
    Ok(Image::filled(size, size, 1, weight)?)
}

/// Creates a normalized 2D Gaussian kernel.
///
/// The side length is the smallest odd integer `>= 6 * sigma`. Each cell
/// holds `exp(-(dx^2 + dy^2) / (2 sigma^2))` for its offset from the centre
/// cell, then the kernel is L1-normalized so the weights sum to 1. The
/// centre weight is always 1, so the sum never vanishes, even for a sigma
/// too small to square in `f32`.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] if `sigma` is not a positive finite
/// number.
pub fn gaussian_filter(sigma: f32) -> OpsResult<Image> {
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(OpsError::InvalidParameter(format!(
            "gaussian sigma must be positive and finite, got {sigma}"
        )));
    }

    let mut size = (6.0 * sigma).ceil() as u32;
    if size % 2 == 0 {
        size += 1;
    }
    debug!(sigma, size, "gaussian kernel");

    let half = (size / 2) as i64;

    // Offsets in units of sigma: the 1/(2 pi sigma^2) prefactor cancels
    // under normalization, and sigma^2 may underflow.
    let mut data = Vec::with_capacity(size as usize * size as usize);
    for y in 0..size as i64 {
        for x in 0..size as i64 {
            let rx = (x - half) as f32 / sigma;
            let ry = (y - half) as f32 / sigma;
            data.push((-0.5 * (rx * rx + ry * ry)).exp());
        }
    }

    let mut kernel = Image::from_data(size, size, 1, data)?;
    l1_normalize(&mut kernel);
    Ok(kernel)
}

/// 3x3 highpass (Laplacian) kernel. Weights sum to 0.
pub fn highpass_filter() -> Image {
    Image::kernel3x3([
        0.0, -1.0, 0.0,
        -1.0, 4.0, -1.0,
        0.0, -1.0, 0.0,
    ])
}

/// 3x3 sharpen kernel. Weights sum to 1.
pub fn sharpen_filter() -> Image {
    Image::kernel3x3([
        0.0, -1.0, 0.0,
        -1.0, 5.0, -1.0,
        0.0, -1.0, 0.0,
    ])
}

/// 3x3 emboss kernel.
pub fn emboss_filter() -> Image {
    Image::kernel3x3([
        -2.0, -1.0, 0.0,
        -1.0, 1.0, 1.0,
        0.0, 1.0, 2.0,
    ])
}

/// 3x3 Sobel kernel for the horizontal derivative.
pub fn gx_filter() -> Image {
    Image::kernel3x3([
        -1.0, 0.0, 1.0,
        -2.0, 0.0, 2.0,
        -1.0, 0.0, 1.0,
    ])
}

/// 3x3 Sobel kernel for the vertical derivative.
pub fn gy_filter() -> Image {
    Image::kernel3x3([
        -1.0, -2.0, -1.0,
        0.0, 0.0, 0.0,
        1.0, 2.0, 1.0,
    ])
}

/// How [`convolve_with`] treats image channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConvolveMode {
    /// One output channel per input channel, each filtered independently.
    #[default]
    Preserve,
    /// A single output channel holding the sum of all channel responses.
    Collapse,
}

impl From<bool> for ConvolveMode {
    /// `true` maps to [`ConvolveMode::Preserve`].
    fn from(preserve: bool) -> Self {
        if preserve {
            Self::Preserve
        } else {
            Self::Collapse
        }
    }
}

/// Validates the filter against the image and allocates the output.
pub(crate) fn prepare(image: &Image, filter: &Image, mode: ConvolveMode) -> OpsResult<Image> {
    if filter.channels() != 1 && filter.channels() != image.channels() {
        return Err(OpsError::FilterChannels {
            filter: filter.channels(),
            image: image.channels(),
        });
    }
    let channels = match mode {
        ConvolveMode::Preserve => image.channels(),
        ConvolveMode::Collapse => 1,
    };
    Ok(Image::new(image.width(), image.height(), channels)?)
}

/// Input channels and image row that feed output row `r`.
#[inline]
pub(crate) fn row_job(r: usize, image: &Image, mode: ConvolveMode) -> (Range<i32>, i32) {
    let height = image.height() as usize;
    let y = (r % height) as i32;
    match mode {
        ConvolveMode::Preserve => {
            let c = (r / height) as i32;
            (c..c + 1, y)
        }
        ConvolveMode::Collapse => (0..image.channels() as i32, y),
    }
}

/// Computes one output row, summing the responses of `channels`.
pub(crate) fn convolve_row(
    src: &Image,
    filter: &Image,
    channels: Range<i32>,
    y: i32,
    row: &mut [f32],
) {
    let (fw, fh) = (filter.width() as i32, filter.height() as i32);
    let (px, py) = (fw / 2, fh / 2);
    let shared = filter.channels() == 1;

    for (x, out) in row.iter_mut().enumerate() {
        let x = x as i32;
        let mut sum = 0.0f32;
        for c in channels.clone() {
            let fc = if shared { 0 } else { c };
            for fy in 0..fh {
                for fx in 0..fw {
                    sum += src.get(x + fx - px, y + fy - py, c) * filter.get(fx, fy, fc);
                }
            }
        }
        *out = sum;
    }
}

/// Convolves `image` with `filter`.
///
/// With `preserve` the output keeps the input's channels, each filtered on
/// its own (against the filter's matching channel, or its only channel).
/// Without it the output has one channel holding the sum over all input
/// channels.
///
/// # Errors
///
/// [`OpsError::FilterChannels`] unless the filter has 1 channel or as many
/// as the image.
///
/// # Example
///
/// ```rust
/// use planar_core::Image;
/// use planar_ops::filter::{box_filter, convolve};
///
/// let src = Image::filled(8, 8, 3, 0.5).unwrap();
/// let result = convolve(&src, &box_filter(3).unwrap(), true).unwrap();
/// assert!(result.data().iter().all(|v| (v - 0.5).abs() < 1e-6));
/// ```
pub fn convolve(image: &Image, filter: &Image, preserve: bool) -> OpsResult<Image> {
    convolve_with(image, filter, preserve.into())
}

/// Convolves `image` with `filter` using an explicit [`ConvolveMode`].
pub fn convolve_with(image: &Image, filter: &Image, mode: ConvolveMode) -> OpsResult<Image> {
    trace!(
        image = ?image.shape(),
        filter = ?filter.shape(),
        ?mode,
        "convolve"
    );
    let mut out = prepare(image, filter, mode)?;
    for (r, row) in out.rows_mut().enumerate() {
        let (channels, y) = row_job(r, image, mode);
        convolve_row(image, filter, channels, y, row);
    }
    Ok(out)
}
