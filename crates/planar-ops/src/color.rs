//! Colorspace conversion: RGB to grayscale, RGB to HSV and back.
//!
//! All conversions expect channel 0/1/2 to hold R/G/B (or H/S/V) planes.
//!
//! # HSV convention
//!
//! Hue, saturation and value are all stored in `[0, 1]`. Hue is a fraction
//! of a full turn, so red is `0.0`, green `1/3`, blue `2/3`. Black has
//! hue and saturation `0`.
//!
//! # Example
//!
//! ```rust
//! use planar_core::Image;
//! use planar_ops::color::{hsv_to_rgb, rgb_to_hsv};
//! use planar_ops::arith::{clamp01, scale};
//!
//! // Boost saturation by 2x.
//! let mut img = Image::from_planes(1, 1, &[&[0.8], &[0.6], &[0.4]]).unwrap();
//! rgb_to_hsv(&mut img).unwrap();
//! scale(&mut img, 1, 2.0).unwrap();
//! clamp01(&mut img);
//! hsv_to_rgb(&mut img).unwrap();
//! assert!(img.get(0, 0, 2) < 0.4);
//! ```

use crate::OpsResult;
use planar_core::{Error, Image};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Luma weight of the red channel.
pub const LUMA_R: f32 = 0.299;
/// Luma weight of the green channel.
pub const LUMA_G: f32 = 0.587;
/// Luma weight of the blue channel.
pub const LUMA_B: f32 = 0.114;
/// Luma weights as `[R, G, B]`.
pub const LUMA: [f32; 3] = [LUMA_R, LUMA_G, LUMA_B];

/// Splits a 3-channel image into its three mutable planes.
fn rgb_planes_mut(image: &mut Image) -> OpsResult<(&mut [f32], &mut [f32], &mut [f32])> {
    image.require_channels(3)?;
    let channels = image.channels();
    let mut planes = image.planes_mut();
    match (planes.next(), planes.next(), planes.next()) {
        (Some(r), Some(g), Some(b)) => Ok((r, g, b)),
        _ => Err(Error::channel_mismatch(3, channels).into()),
    }
}

/// Converts a 3-channel RGB image to a new 1-channel luma image.
///
/// `Y = 0.299 R + 0.587 G + 0.114 B`
///
/// # Errors
///
/// Fails unless the input has exactly 3 channels.
pub fn rgb_to_grayscale(image: &Image) -> OpsResult<Image> {
    trace!(shape = ?image.shape(), "rgb_to_grayscale");
    image.require_channels(3)?;

    let (r, g, b) = (image.plane(0), image.plane(1), image.plane(2));
    let luma: Vec<f32> = r
        .iter()
        .zip(g)
        .zip(b)
        .map(|((&r, &g), &b)| LUMA_R * r + LUMA_G * g + LUMA_B * b)
        .collect();

    Ok(Image::from_data(image.width(), image.height(), 1, luma)?)
}

/// Converts one RGB triple to HSV.
pub fn rgb_to_hsv_pixel([r, g, b]: [f32; 3]) -> [f32; 3] {
    let v = r.max(g).max(b);

    let (s, chroma) = if r == 0.0 && g == 0.0 && b == 0.0 {
        (0.0, 0.0)
    } else {
        let chroma = v - r.min(g).min(b);
        (chroma / v, chroma)
    };

    let h_prime = if chroma == 0.0 {
        0.0
    } else if v == r {
        (g - b) / chroma
    } else if v == g {
        (b - r) / chroma + 2.0
    } else {
        (r - g) / chroma + 4.0
    };

    let h = if h_prime < 0.0 {
        h_prime / 6.0 + 1.0
    } else {
        h_prime / 6.0
    };

    [h, s, v]
}

/// One channel of the closed-form HSV to RGB mapping, `h` in degrees.
#[inline]
fn hsv_component(n: f32, h: f32, s: f32, v: f32) -> f32 {
    let k = (n + h / 60.0) % 6.0;
    let t = k.min(4.0 - k).min(1.0).max(0.0);
    v - v * s * t
}

/// Converts one HSV triple (hue in `[0, 1)`) to RGB.
pub fn hsv_to_rgb_pixel([h, s, v]: [f32; 3]) -> [f32; 3] {
    let h = h * 360.0;
    [
        hsv_component(5.0, h, s, v),
        hsv_component(3.0, h, s, v),
        hsv_component(1.0, h, s, v),
    ]
}

fn map_triples(image: &mut Image, f: fn([f32; 3]) -> [f32; 3]) -> OpsResult<()> {
    let (c0, c1, c2) = rgb_planes_mut(image)?;
    for ((a, b), c) in c0.iter_mut().zip(c1.iter_mut()).zip(c2.iter_mut()) {
        [*a, *b, *c] = f([*a, *b, *c]);
    }
    Ok(())
}

/// Converts an RGB image to HSV in place (channels become H, S, V).
///
/// # Errors
///
/// Fails unless the image has exactly 3 channels; the buffer is untouched.
pub fn rgb_to_hsv(image: &mut Image) -> OpsResult<()> {
    trace!(shape = ?image.shape(), "rgb_to_hsv");
    map_triples(image, rgb_to_hsv_pixel)
}

/// Converts an HSV image back to RGB in place.
///
/// # Errors
///
/// Fails unless the image has exactly 3 channels; the buffer is untouched.
pub fn hsv_to_rgb(image: &mut Image) -> OpsResult<()> {
    trace!(shape = ?image.shape(), "hsv_to_rgb");
    map_triples(image, hsv_to_rgb_pixel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_triple_eq(a: [f32; 3], b: [f32; 3], eps: f32) {
        for i in 0..3 {
            assert_abs_diff_eq!(a[i], b[i], epsilon = eps);
        }
    }

    #[test]
    fn test_grayscale_weights() {
        let img = Image::from_planes(3, 1, &[&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0], &[0.0, 0.0, 1.0]])
            .unwrap();
        let gray = rgb_to_grayscale(&img).unwrap();
        assert_eq!(gray.shape(), (3, 1, 1));
        assert_abs_diff_eq!(gray.get(0, 0, 0), 0.299, epsilon = 1e-6);
        assert_abs_diff_eq!(gray.get(1, 0, 0), 0.587, epsilon = 1e-6);
        assert_abs_diff_eq!(gray.get(2, 0, 0), 0.114, epsilon = 1e-6);
    }

    #[test]
    fn test_grayscale_white() {
        let img = Image::filled(4, 4, 3, 1.0).unwrap();
        let gray = rgb_to_grayscale(&img).unwrap();
        for &v in gray.data() {
            assert_abs_diff_eq!(v, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_grayscale_requires_rgb() {
        assert!(rgb_to_grayscale(&Image::new(2, 2, 1).unwrap()).is_err());
        assert!(rgb_to_grayscale(&Image::new(2, 2, 4).unwrap()).is_err());
    }

    #[test]
    fn test_hsv_primaries() {
        assert_triple_eq(rgb_to_hsv_pixel([1.0, 0.0, 0.0]), [0.0, 1.0, 1.0], 1e-6);
        assert_triple_eq(rgb_to_hsv_pixel([0.0, 1.0, 0.0]), [1.0 / 3.0, 1.0, 1.0], 1e-6);
        assert_triple_eq(rgb_to_hsv_pixel([0.0, 0.0, 1.0]), [2.0 / 3.0, 1.0, 1.0], 1e-6);
        // Magenta: V == R, G < B, hue wraps to 5/6
        assert_triple_eq(rgb_to_hsv_pixel([1.0, 0.0, 1.0]), [5.0 / 6.0, 1.0, 1.0], 1e-6);
    }

    #[test]
    fn test_hsv_black_and_gray() {
        assert_eq!(rgb_to_hsv_pixel([0.0, 0.0, 0.0]), [0.0, 0.0, 0.0]);
        assert_eq!(rgb_to_hsv_pixel([0.5, 0.5, 0.5]), [0.0, 0.0, 0.5]);
        assert_eq!(hsv_to_rgb_pixel([0.0, 0.0, 0.0]), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_hsv_round_trip_grid() {
        let steps = 10;
        for ri in 0..=steps {
            for gi in 0..=steps {
                for bi in 0..=steps {
                    let rgb = [
                        ri as f32 / steps as f32,
                        gi as f32 / steps as f32,
                        bi as f32 / steps as f32,
                    ];
                    let hsv = rgb_to_hsv_pixel(rgb);
                    assert!((0.0..=1.0).contains(&hsv[0]), "hue {} for {:?}", hsv[0], rgb);
                    assert_triple_eq(hsv_to_rgb_pixel(hsv), rgb, 1e-5);
                }
            }
        }
    }

    #[test]
    fn test_hsv_image_in_place() {
        let mut img =
            Image::from_planes(2, 1, &[&[1.0, 0.2], &[0.5, 0.4], &[0.0, 0.6]]).unwrap();
        let original = img.clone();

        rgb_to_hsv(&mut img).unwrap();
        assert_triple_eq(
            [img.get(0, 0, 0), img.get(0, 0, 1), img.get(0, 0, 2)],
            rgb_to_hsv_pixel([1.0, 0.5, 0.0]),
            0.0,
        );

        hsv_to_rgb(&mut img).unwrap();
        for (a, b) in img.data().iter().zip(original.data()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_hsv_requires_rgb() {
        let mut img = Image::filled(2, 2, 1, 0.3).unwrap();
        assert!(rgb_to_hsv(&mut img).is_err());
        assert!(hsv_to_rgb(&mut img).is_err());
        assert!(img.data().iter().all(|&v| v == 0.3));
    }
}
