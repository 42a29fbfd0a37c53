//! Error Types
//!
//! Errors raised by the animation layer.
//!
//! Most channel failure modes are not errors at all: a channel without
//! keyframes simply reports no value, and out-of-range times clamp at the
//! first/last keyframe. What remains are structural mistakes made while
//! wiring channels to a timeline, or invalid timeline properties.

use thiserror::Error;

use crate::timeline::TimelineId;

/// The error type for channel registration and timeline properties.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnimationError {
    // ========================================================================
    // Timeline Properties
    // ========================================================================
    /// A timeline must contain at least one frame.
    #[error("Invalid frame count: {0} (must be greater than zero)")]
    InvalidFrameCount(u32),

    /// A timeline must advance at least one frame per second.
    #[error("Invalid frame rate: {0} (must be greater than zero)")]
    InvalidFrameRate(u32),

    // ========================================================================
    // Channel Registration
    // ========================================================================
    /// The registry could not resolve the handle to a channel.
    #[error("Channel not found: {0}")]
    ChannelNotFound(String),

    /// The channel is already driven by another timeline.
    #[error("Channel '{name}' is already bound to timeline {bound:?}")]
    ChannelAlreadyBound {
        /// Name of the channel
        name: String,
        /// The timeline currently driving it
        bound: TimelineId,
    },
}

/// Alias for `Result<T, AnimationError>`.
pub type Result<T> = std::result::Result<T, AnimationError>;
