//! Owned image buffer in channel-planar layout.
//!
//! [`Image`] is the single data type of the workspace. Filters (convolution
//! kernels) are plain images as well.
//!
//! # Memory Layout
//!
//! All samples of one channel are contiguous, channels follow each other:
//!
//! ```text
//! offset(x, y, c) = x + y * width + c * width * height
//! ```
//!
//! The formula is implemented once, in `Image::offset`. Everything else
//! goes through [`Image::get`]/[`Image::set`] (see [`crate::access`]),
//! per-channel [`plane`](Image::plane) slices, or the whole buffer.
//!
//! # Ownership
//!
//! An `Image` owns its `Vec<f32>` exclusively. `clone()` produces a fully
//! independent copy; there is no shared storage between images.
//!
//! # Usage
//!
//! ```rust
//! use planar_core::Image;
//!
//! let img = Image::from_planes(2, 1, &[&[0.1, 0.2], &[0.3, 0.4]]).unwrap();
//! assert_eq!(img.shape(), (2, 1, 2));
//! assert_eq!(img.plane(1), &[0.3, 0.4]);
//! assert_eq!(img.data(), &[0.1, 0.2, 0.3, 0.4]);
//! ```

use crate::{Error, Result};

/// Owned `f32` image buffer with planar channel storage.
///
/// Width, height and channel count are always positive and
/// `data.len() == width * height * channels`.
#[derive(Clone, PartialEq)]
pub struct Image {
    /// Sample buffer, channel after channel
    data: Vec<f32>,
    /// Image width in pixels
    width: u32,
    /// Image height in pixels
    height: u32,
    /// Number of channels
    channels: u32,
}

/// Validates a shape and returns its sample count.
fn sample_count(width: u32, height: u32, channels: u32) -> Result<usize> {
    if width == 0 || height == 0 || channels == 0 {
        return Err(Error::invalid_dimensions(
            width,
            height,
            channels,
            "width, height, and channels must be > 0",
        ));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(channels as usize))
        .ok_or_else(|| {
            Error::invalid_dimensions(width, height, channels, "sample count overflows usize")
        })
}

impl Image {
    /// Creates a new image filled with zeros.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if any dimension is zero or the
    /// sample count overflows.
    ///
    /// # Example
    ///
    /// ```rust
    /// use planar_core::Image;
    ///
    /// let img = Image::new(1920, 1080, 3).unwrap();
    /// assert_eq!(img.width(), 1920);
    /// assert_eq!(img.channels(), 3);
    /// assert!(Image::new(0, 1080, 3).is_err());
    /// ```
    pub fn new(width: u32, height: u32, channels: u32) -> Result<Self> {
        Self::filled(width, height, channels, 0.0)
    }

    /// Creates an image with every sample set to `value`.
    pub fn filled(width: u32, height: u32, channels: u32, value: f32) -> Result<Self> {
        let count = sample_count(width, height, channels)?;
        Ok(Self {
            data: vec![value; count],
            width,
            height,
            channels,
        })
    }

    /// Creates an image from an existing planar sample buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the shape is invalid or
    /// `data.len() != width * height * channels`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use planar_core::Image;
    ///
    /// let img = Image::from_data(2, 2, 1, vec![0.2, 0.8, 0.5, 0.5]).unwrap();
    /// assert_eq!(img.get(1, 0, 0), 0.8);
    /// ```
    pub fn from_data(width: u32, height: u32, channels: u32, data: Vec<f32>) -> Result<Self> {
        let expected = sample_count(width, height, channels)?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                channels,
                format!("expected {} samples, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Creates an image from one slice per channel.
    ///
    /// Every plane must hold exactly `width * height` samples.
    pub fn from_planes(width: u32, height: u32, planes: &[&[f32]]) -> Result<Self> {
        let channels = u32::try_from(planes.len()).map_err(|_| {
            Error::invalid_dimensions(width, height, u32::MAX, "too many planes")
        })?;
        let count = sample_count(width, height, channels)?;
        let plane_len = count / planes.len();

        let mut data = Vec::with_capacity(count);
        for (c, plane) in planes.iter().enumerate() {
            if plane.len() != plane_len {
                return Err(Error::invalid_dimensions(
                    width,
                    height,
                    channels,
                    format!("plane {} has {} samples, expected {}", c, plane.len(), plane_len),
                ));
            }
            data.extend_from_slice(plane);
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Creates a single-channel 3x3 image from row-major weights.
    ///
    /// Used for the fixed convolution kernels.
    ///
    /// ```rust
    /// use planar_core::Image;
    ///
    /// let k = Image::kernel3x3([0.0, -1.0, 0.0, -1.0, 4.0, -1.0, 0.0, -1.0, 0.0]);
    /// assert_eq!(k.shape(), (3, 3, 1));
    /// assert_eq!(k.get(1, 1, 0), 4.0);
    /// ```
    pub fn kernel3x3(weights: [f32; 9]) -> Self {
        Self {
            data: weights.to_vec(),
            width: 3,
            height: 3,
            channels: 1,
        }
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the number of channels.
    #[inline]
    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// Returns the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns (width, height, channels).
    #[inline]
    pub fn shape(&self) -> (u32, u32, u32) {
        (self.width, self.height, self.channels)
    }

    /// Returns the number of pixels in one plane.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns the total number of samples across all channels.
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if both images have the same width, height and channels.
    #[inline]
    pub fn same_shape(&self, other: &Image) -> bool {
        self.shape() == other.shape()
    }

    /// Fails with [`Error::DimensionMismatch`] unless shapes match.
    pub fn require_same_shape(&self, other: &Image) -> Result<()> {
        if self.same_shape(other) {
            Ok(())
        } else {
            Err(Error::dimension_mismatch(self.shape(), other.shape()))
        }
    }

    /// Fails with [`Error::ChannelMismatch`] unless the image has `expected`
    /// channels.
    pub fn require_channels(&self, expected: u32) -> Result<()> {
        if self.channels == expected {
            Ok(())
        } else {
            Err(Error::channel_mismatch(expected, self.channels))
        }
    }

    /// Returns the raw planar sample buffer.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Returns the raw planar sample buffer for in-place edits.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consumes the image and returns its sample buffer.
    #[inline]
    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// Returns the buffer offset of an in-bounds sample.
    #[inline]
    pub(crate) fn offset(&self, x: usize, y: usize, c: usize) -> usize {
        x + y * self.width as usize + c * self.pixel_count()
    }

    /// Returns all samples of channel `c`, row-major.
    ///
    /// # Panics
    ///
    /// Panics if `c >= channels`.
    #[inline]
    pub fn plane(&self, c: u32) -> &[f32] {
        assert!(c < self.channels, "channel {c} out of range");
        let start = self.offset(0, 0, c as usize);
        &self.data[start..start + self.pixel_count()]
    }

    /// Returns all samples of channel `c` for in-place edits.
    ///
    /// # Panics
    ///
    /// Panics if `c >= channels`.
    #[inline]
    pub fn plane_mut(&mut self, c: u32) -> &mut [f32] {
        assert!(c < self.channels, "channel {c} out of range");
        let start = self.offset(0, 0, c as usize);
        let len = self.pixel_count();
        &mut self.data[start..start + len]
    }

    /// Iterates over channel planes in order.
    pub fn planes(&self) -> std::slice::ChunksExact<'_, f32> {
        self.data.chunks_exact(self.pixel_count())
    }

    /// Iterates mutably over channel planes in order.
    pub fn planes_mut(&mut self) -> std::slice::ChunksExactMut<'_, f32> {
        let len = self.pixel_count();
        self.data.chunks_exact_mut(len)
    }

    /// Iterates mutably over every row of every plane, in buffer order.
    ///
    /// Row `r` belongs to channel `r / height` and image row `r % height`.
    pub fn rows_mut(&mut self) -> std::slice::ChunksExactMut<'_, f32> {
        let len = self.width as usize;
        self.data.chunks_exact_mut(len)
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &self.channels)
            .finish()
    }
}
