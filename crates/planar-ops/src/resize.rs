//! Image resize by point sampling and bilinear interpolation.
//!
//! Both resamplers use the half-pixel-center mapping, per axis:
//!
//! ```text
//! src = (dst + 0.5) * (src_len / dst_len) - 0.5
//! ```
//!
//! and read the source through the clamped accessor, so source coordinates
//! that fall outside the image (near the borders when upscaling) repeat the
//! edge samples.
//!
//! # Interpolation
//!
//! - [`Interpolation::Nearest`] - Rounds to the closest sample (blocky)
//! - [`Interpolation::Bilinear`] - Blends the four surrounding samples
//!
//! # Example
//!
//! ```rust
//! use planar_core::Image;
//! use planar_ops::resize::{resize, Interpolation};
//!
//! let src = Image::filled(16, 16, 3, 0.5).unwrap();
//! let dst = resize(&src, 32, 24, Interpolation::Bilinear).unwrap();
//! assert_eq!(dst.shape(), (32, 24, 3));
//! ```

use crate::OpsResult;
use planar_core::Image;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Interpolation used when resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Nearest-neighbor (fastest, no interpolation).
    Nearest,
    /// Bilinear interpolation (smooth).
    #[default]
    Bilinear,
}

/// Source-space coordinate of every destination index along one axis.
pub(crate) fn source_coords(src_len: u32, dst_len: u32) -> Vec<f32> {
    let ratio = src_len as f32 / dst_len as f32;
    (0..dst_len)
        .map(|d| (d as f32 + 0.5) * ratio - 0.5)
        .collect()
}

/// Channel and source y coordinate for output row `r` (see `Image::rows_mut`).
#[inline]
pub(crate) fn row_source(r: usize, height: usize, ys: &[f32]) -> (i32, f32) {
    ((r / height) as i32, ys[r % height])
}

/// Fills one output row by nearest-neighbor sampling.
pub(crate) fn nearest_row(src: &Image, c: i32, sy: f32, xs: &[f32], row: &mut [f32]) {
    let y = sy.round() as i32;
    for (out, &sx) in row.iter_mut().zip(xs) {
        *out = src.get(sx.round() as i32, y, c);
    }
}

/// Fills one output row by bilinear interpolation.
pub(crate) fn bilinear_row(src: &Image, c: i32, sy: f32, xs: &[f32], row: &mut [f32]) {
    let y0 = sy.floor();
    let dy = sy - y0;
    let y0 = y0 as i32;
    let y1 = y0.saturating_add(1);

    for (out, &sx) in row.iter_mut().zip(xs) {
        let x0 = sx.floor();
        let dx = sx - x0;
        let x0 = x0 as i32;
        let x1 = x0.saturating_add(1);

        let top = src.get(x0, y0, c) * (1.0 - dx) + src.get(x1, y0, c) * dx;
        let bottom = src.get(x0, y1, c) * (1.0 - dx) + src.get(x1, y1, c) * dx;
        *out = top * (1.0 - dy) + bottom * dy;
    }
}

pub(crate) type RowSampler = fn(&Image, i32, f32, &[f32], &mut [f32]);

fn resample(image: &Image, width: u32, height: u32, sampler: RowSampler) -> OpsResult<Image> {
    let mut out = Image::new(width, height, image.channels())?;
    let xs = source_coords(image.width(), width);
    let ys = source_coords(image.height(), height);

    for (r, row) in out.rows_mut().enumerate() {
        let (c, sy) = row_source(r, height as usize, &ys);
        sampler(image, c, sy, &xs, row);
    }
    Ok(out)
}

/// Resizes by sampling the nearest source pixel.
///
/// Source coordinates are rounded half away from zero.
///
/// # Errors
///
/// Fails if `width` or `height` is zero.
///
/// # Example
///
/// ```rust
/// use planar_core::Image;
/// use planar_ops::resize::nearest_resize;
///
/// let src = Image::from_data(2, 1, 1, vec![0.0, 1.0]).unwrap();
/// let dst = nearest_resize(&src, 4, 1).unwrap();
/// assert_eq!(dst.data(), &[0.0, 0.0, 1.0, 1.0]);
/// ```
pub fn nearest_resize(image: &Image, width: u32, height: u32) -> OpsResult<Image> {
    trace!(src = ?image.shape(), width, height, "nearest_resize");
    resample(image, width, height, nearest_row)
}

/// Resizes with bilinear interpolation over the four neighboring samples.
///
/// # Errors
///
/// Fails if `width` or `height` is zero.
pub fn bilinear_resize(image: &Image, width: u32, height: u32) -> OpsResult<Image> {
    trace!(src = ?image.shape(), width, height, "bilinear_resize");
    resample(image, width, height, bilinear_row)
}

/// Resizes with the given interpolation.
pub fn resize(
    image: &Image,
    width: u32,
    height: u32,
    interpolation: Interpolation,
) -> OpsResult<Image> {
    match interpolation {
        Interpolation::Nearest => nearest_resize(image, width, height),
        Interpolation::Bilinear => bilinear_resize(image, width, height),
    }
}

/// Calculates the aspect-preserving dimensions for a target box.
///
/// # Example
///
/// ```rust
/// use planar_ops::resize::fit_dimensions;
///
/// // Fit 1920x1080 into 640x480 box
/// let (w, h) = fit_dimensions(1920, 1080, 640, 480);
/// assert_eq!((w, h), (640, 360));
/// ```
pub fn fit_dimensions(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    let scale_w = max_w as f32 / src_w as f32;
    let scale_h = max_h as f32 / src_h as f32;
    let scale = scale_w.min(scale_h);

    let new_w = ((src_w as f32 * scale).round() as u32).max(1);
    let new_h = ((src_h as f32 * scale).round() as u32).max(1);

    (new_w, new_h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn ramp(w: u32, h: u32, c: u32) -> Image {
        let n = w * h * c;
        let data = (0..n).map(|v| v as f32 / n as f32).collect();
        Image::from_data(w, h, c, data).unwrap()
    }

    #[test]
    fn test_source_coords_half_pixel() {
        // 2x upscale: centers land on quarter positions
        assert_eq!(source_coords(2, 4), vec![-0.25, 0.25, 0.75, 1.25]);
        // 2x downscale: centers land between source pixels
        assert_eq!(source_coords(4, 2), vec![0.5, 2.5]);
        // identity
        assert_eq!(source_coords(3, 3), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_nearest_identity() {
        let src = ramp(7, 5, 3);
        let dst = nearest_resize(&src, 7, 5).unwrap();
        assert_eq!(dst, src);
    }

    #[test]
    fn test_bilinear_identity() {
        let src = ramp(6, 4, 2);
        let dst = bilinear_resize(&src, 6, 4).unwrap();
        for (a, b) in dst.data().iter().zip(src.data()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_nearest_upscale_rounding() {
        // source x for dst 0..4 = -0.25, 0.25, 0.75, 1.25
        let src = Image::from_data(2, 1, 1, vec![0.0, 1.0]).unwrap();
        let dst = nearest_resize(&src, 4, 1).unwrap();
        assert_eq!(dst.data(), &[0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_nearest_rounds_half_away_from_zero() {
        // 4 -> 2 maps to 0.5 and 2.5, which round to 1 and 3
        let src = Image::from_data(4, 1, 1, vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        let dst = nearest_resize(&src, 2, 1).unwrap();
        assert_eq!(dst.data(), &[1.0, 3.0]);
    }

    #[test]
    fn test_bilinear_upscale() {
        let src = Image::from_data(2, 1, 1, vec![0.0, 1.0]).unwrap();
        let dst = bilinear_resize(&src, 4, 1).unwrap();
        // -0.25 clamps to the left edge, 1.25 blends edge with itself
        let expected = [0.0, 0.25, 0.75, 1.0];
        for (v, e) in dst.data().iter().zip(expected) {
            assert_abs_diff_eq!(*v, e, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_bilinear_downscale_averages() {
        let src = Image::from_data(2, 2, 1, vec![0.0, 1.0, 1.0, 0.0]).unwrap();
        let dst = bilinear_resize(&src, 1, 1).unwrap();
        assert_abs_diff_eq!(dst.get(0, 0, 0), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_resize_constant() {
        let src = Image::filled(5, 5, 3, 0.25).unwrap();
        for interp in [Interpolation::Nearest, Interpolation::Bilinear] {
            let dst = resize(&src, 13, 3, interp).unwrap();
            assert_eq!(dst.shape(), (13, 3, 3));
            for &v in dst.data() {
                assert_abs_diff_eq!(v, 0.25, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_resize_channels_independent() {
        let src = Image::from_planes(1, 1, &[&[0.1], &[0.2], &[0.3]]).unwrap();
        let dst = nearest_resize(&src, 2, 2).unwrap();
        assert!(dst.plane(0).iter().all(|&v| v == 0.1));
        assert!(dst.plane(1).iter().all(|&v| v == 0.2));
        assert!(dst.plane(2).iter().all(|&v| v == 0.3));
    }

    #[test]
    fn test_resize_zero_target() {
        let src = Image::new(4, 4, 1).unwrap();
        assert!(nearest_resize(&src, 0, 4).is_err());
        assert!(bilinear_resize(&src, 4, 0).is_err());
    }

    #[test]
    fn test_default_interpolation() {
        assert_eq!(Interpolation::default(), Interpolation::Bilinear);
    }

    #[test]
    fn test_fit_dimensions() {
        // Wide image into square box
        assert_eq!(fit_dimensions(1920, 1080, 640, 640), (640, 360));

        // Tall image into square box
        assert_eq!(fit_dimensions(1080, 1920, 640, 640), (360, 640));

        // Upscales to fill the box
        assert_eq!(fit_dimensions(320, 240, 640, 480), (640, 480));

        // Never collapses to zero
        assert_eq!(fit_dimensions(10000, 1, 10, 10), (10, 1));
    }
}
