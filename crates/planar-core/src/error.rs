//! Error types for planar-core operations.
//!
//! The [`Error`] enum covers the failure modes of buffer construction and
//! shape checks. Operators in `planar-ops` wrap it in their own error type.
//!
//! # Usage
//!
//! ```rust
//! use planar_core::{Error, Result};
//!
//! fn check(width: u32, height: u32, channels: u32) -> Result<()> {
//!     if width == 0 || height == 0 || channels == 0 {
//!         return Err(Error::invalid_dimensions(
//!             width,
//!             height,
//!             channels,
//!             "all dimensions must be > 0",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check(0, 4, 1).is_err());
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or combining image buffers.
///
/// # Categories
///
/// - **Dimension errors**: [`InvalidDimensions`](Error::InvalidDimensions),
///   [`DimensionMismatch`](Error::DimensionMismatch)
/// - **Channel errors**: [`ChannelMismatch`](Error::ChannelMismatch)
#[derive(Debug, Error)]
pub enum Error {
    /// Requested dimensions cannot describe a buffer.
    ///
    /// Returned when width, height or channels is zero, when the sample
    /// count overflows `usize`, or when supplied data has the wrong length.
    #[error("invalid dimensions: {width}x{height}x{channels} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Requested channel count
        channels: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Channel count differs from what the operation requires.
    #[error("channel mismatch: expected {expected}, got {got}")]
    ChannelMismatch {
        /// Expected channel count
        expected: u32,
        /// Actual channel count
        got: u32,
    },

    /// Two buffers that must share a shape do not.
    ///
    /// Shapes are `(width, height, channels)`.
    #[error("dimension mismatch: {}x{}x{} vs {}x{}x{}", .a.0, .a.1, .a.2, .b.0, .b.1, .b.2)]
    DimensionMismatch {
        /// First image shape
        a: (u32, u32, u32),
        /// Second image shape
        b: (u32, u32, u32),
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(
        width: u32,
        height: u32,
        channels: u32,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            channels,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::ChannelMismatch`] error.
    #[inline]
    pub fn channel_mismatch(expected: u32, got: u32) -> Self {
        Self::ChannelMismatch { expected, got }
    }

    /// Creates an [`Error::DimensionMismatch`] error.
    #[inline]
    pub fn dimension_mismatch(a: (u32, u32, u32), b: (u32, u32, u32)) -> Self {
        Self::DimensionMismatch { a, b }
    }

    /// Returns `true` if this is a dimension-related error.
    #[inline]
    pub fn is_dimension_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDimensions { .. } | Self::DimensionMismatch { .. }
        )
    }
}
