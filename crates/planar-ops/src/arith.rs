//! Per-sample arithmetic on images.
//!
//! Two contracts, visible in the signatures:
//!
//! - `fn(&Image, ..) -> Image` allocates a new buffer and leaves inputs alone
//!   ([`copy`], [`add`], [`sub`]).
//! - `fn(&mut Image, ..)` rewrites the caller's buffer in place
//!   ([`shift`], [`scale`], [`clamp01`], [`l1_normalize`],
//!   [`feature_normalize`]).
//!
//! # Example
//!
//! ```rust
//! use planar_core::Image;
//! use planar_ops::arith::{add, clamp01, shift};
//!
//! let a = Image::filled(2, 2, 3, 0.4).unwrap();
//! let mut sum = add(&a, &a).unwrap();
//! shift(&mut sum, 0, 0.5).unwrap();
//! clamp01(&mut sum);
//! assert_eq!(sum.get(0, 0, 0), 1.0);
//! assert_eq!(sum.get(0, 0, 1), 0.8);
//! ```

use crate::{OpsError, OpsResult};
use planar_core::Image;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Returns an independent duplicate of `image`.
#[inline]
pub fn copy(image: &Image) -> Image {
    image.clone()
}

fn channel_plane(image: &mut Image, channel: u32) -> OpsResult<&mut [f32]> {
    if channel >= image.channels() {
        return Err(OpsError::ChannelOutOfRange {
            channel,
            channels: image.channels(),
        });
    }
    Ok(image.plane_mut(channel))
}

/// Adds `delta` to every sample of one channel, in place.
///
/// # Errors
///
/// [`OpsError::ChannelOutOfRange`] if `channel >= image.channels()`; the
/// buffer is left untouched.
pub fn shift(image: &mut Image, channel: u32, delta: f32) -> OpsResult<()> {
    trace!(channel, delta, "shift");
    for v in channel_plane(image, channel)? {
        *v += delta;
    }
    Ok(())
}

/// Multiplies every sample of one channel by `factor`, in place.
///
/// # Errors
///
/// [`OpsError::ChannelOutOfRange`] if `channel >= image.channels()`.
pub fn scale(image: &mut Image, channel: u32, factor: f32) -> OpsResult<()> {
    trace!(channel, factor, "scale");
    for v in channel_plane(image, channel)? {
        *v *= factor;
    }
    Ok(())
}

/// Clips every sample into `[0, 1]`, in place.
pub fn clamp01(image: &mut Image) {
    for v in image.data_mut() {
        *v = v.clamp(0.0, 1.0);
    }
}

fn zip_with(a: &Image, b: &Image, f: impl Fn(f32, f32) -> f32) -> OpsResult<Image> {
    a.require_same_shape(b)?;
    let data = a
        .data()
        .iter()
        .zip(b.data())
        .map(|(&x, &y)| f(x, y))
        .collect();
    let (w, h, c) = a.shape();
    Ok(Image::from_data(w, h, c, data)?)
}

/// Elementwise `a + b` into a new image.
///
/// # Errors
///
/// Fails unless width, height and channel count all match.
pub fn add(a: &Image, b: &Image) -> OpsResult<Image> {
    trace!(a = ?a.shape(), b = ?b.shape(), "add");
    zip_with(a, b, |x, y| x + y)
}

/// Elementwise `a - b` into a new image.
///
/// # Errors
///
/// Fails unless width, height and channel count all match.
pub fn sub(a: &Image, b: &Image) -> OpsResult<Image> {
    trace!(a = ?a.shape(), b = ?b.shape(), "sub");
    zip_with(a, b, |x, y| x - y)
}

/// Divides every sample by the sum of all samples, in place.
///
/// The caller must guarantee a non-zero sum. A zero sum divides by zero and
/// leaves non-finite samples.
pub fn l1_normalize(image: &mut Image) {
    let sum: f32 = image.data().iter().sum();
    trace!(sum, "l1_normalize");
    for v in image.data_mut() {
        *v /= sum;
    }
}

/// Linearly rescales all samples from `[min, max]` to `[0, 1]`, in place.
///
/// Min and max are pooled over every channel. A constant image (`max ==
/// min`) becomes all zeros.
///
/// ```rust
/// use planar_core::Image;
/// use planar_ops::arith::feature_normalize;
///
/// let mut img = Image::from_data(2, 2, 1, vec![0.2, 0.8, 0.5, 0.5]).unwrap();
/// feature_normalize(&mut img);
/// assert_eq!(img.get(0, 0, 0), 0.0);
/// assert_eq!(img.get(1, 0, 0), 1.0);
/// assert!((img.get(0, 1, 0) - 0.5).abs() < 1e-6);
/// ```
pub fn feature_normalize(image: &mut Image) {
    let (min, max) = image
        .data()
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = max - min;

    if range == 0.0 {
        debug!(value = min, "feature_normalize on constant image");
        image.data_mut().fill(0.0);
        return;
    }

    for v in image.data_mut() {
        *v = (*v - min) / range;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_copy_independent() {
        let a = Image::filled(3, 3, 2, 0.25).unwrap();
        let mut b = copy(&a);
        b.set(0, 0, 0, 1.0);
        assert_eq!(a.get(0, 0, 0), 0.25);
        assert_eq!(b.get(1, 1, 1), 0.25);
    }

    #[test]
    fn test_shift_one_channel() {
        let mut img = Image::filled(2, 2, 3, 0.5).unwrap();
        shift(&mut img, 1, 0.25).unwrap();
        assert!(img.plane(0).iter().all(|&v| v == 0.5));
        assert!(img.plane(1).iter().all(|&v| v == 0.75));
        assert!(img.plane(2).iter().all(|&v| v == 0.5));
    }

    #[test]
    fn test_scale_one_channel() {
        let mut img = Image::filled(2, 2, 3, 0.5).unwrap();
        scale(&mut img, 2, 0.5).unwrap();
        assert!(img.plane(2).iter().all(|&v| v == 0.25));
        assert!(img.plane(0).iter().all(|&v| v == 0.5));
    }

    #[test]
    fn test_shift_bad_channel() {
        let mut img = Image::filled(2, 2, 1, 0.5).unwrap();
        let err = shift(&mut img, 1, 1.0).unwrap_err();
        assert!(matches!(err, OpsError::ChannelOutOfRange { channel: 1, channels: 1 }));
        assert!(img.data().iter().all(|&v| v == 0.5));
        assert!(scale(&mut img, 3, 2.0).is_err());
    }

    #[test]
    fn test_clamp01() {
        let mut img = Image::from_data(4, 1, 1, vec![-0.5, 0.0, 0.5, 1.5]).unwrap();
        clamp01(&mut img);
        assert_eq!(img.data(), &[0.0, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_add_sub() {
        let a = Image::from_data(2, 1, 1, vec![0.5, 0.25]).unwrap();
        let b = Image::from_data(2, 1, 1, vec![0.25, 0.5]).unwrap();
        assert_eq!(add(&a, &b).unwrap().data(), &[0.75, 0.75]);
        assert_eq!(sub(&a, &b).unwrap().data(), &[0.25, -0.25]);
    }

    #[test]
    fn test_add_shape_mismatch() {
        let a = Image::new(2, 2, 3).unwrap();
        assert!(add(&a, &Image::new(2, 3, 3).unwrap()).is_err());
        assert!(add(&a, &Image::new(3, 2, 3).unwrap()).is_err());
        assert!(sub(&a, &Image::new(2, 2, 1).unwrap()).is_err());
    }

    #[test]
    fn test_l1_normalize() {
        let mut img = Image::from_data(2, 1, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        l1_normalize(&mut img);
        let sum: f32 = img.data().iter().sum();
        assert_abs_diff_eq!(sum, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(img.get(1, 0, 1), 0.4, epsilon = 1e-6);
    }

    #[test]
    fn test_l1_normalize_zero_sum_is_not_finite() {
        let mut img = Image::new(2, 2, 1).unwrap();
        l1_normalize(&mut img);
        assert!(img.data().iter().all(|v| !v.is_finite()));
    }

    #[test]
    fn test_feature_normalize() {
        let mut img = Image::from_data(2, 2, 1, vec![0.2, 0.8, 0.5, 0.5]).unwrap();
        feature_normalize(&mut img);
        let expected = [0.0, 1.0, 0.5, 0.5];
        for (v, e) in img.data().iter().zip(expected) {
            assert_abs_diff_eq!(*v, e, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_feature_normalize_pools_channels() {
        let mut img = Image::from_data(1, 1, 3, vec![-2.0, 0.0, 2.0]).unwrap();
        feature_normalize(&mut img);
        assert_eq!(img.data(), &[0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_feature_normalize_constant() {
        let mut img = Image::filled(3, 3, 2, 0.7).unwrap();
        feature_normalize(&mut img);
        assert!(img.data().iter().all(|&v| v == 0.0));
    }
}
