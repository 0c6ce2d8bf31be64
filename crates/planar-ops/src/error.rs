//! Error types for image operations.

use thiserror::Error;

/// Error type for image operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Buffer construction or shape check failed.
    #[error(transparent)]
    Core(#[from] planar_core::Error),

    /// Filter channel count is neither 1 nor the image's channel count.
    #[error("filter has {filter} channels, image has {image} (expected 1 or {image})")]
    FilterChannels {
        /// Filter channel count
        filter: u32,
        /// Image channel count
        image: u32,
    },

    /// Channel index is not a channel of the image.
    #[error("channel {channel} out of range for {channels}-channel image")]
    ChannelOutOfRange {
        /// Requested channel
        channel: u32,
        /// Image channel count
        channels: u32,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;
