#![forbid(unsafe_code)]

//! Error taxonomy for the visual effects.
//!
//! Two classes of failure exist:
//! - **Setup** ([`FxError::Configuration`], [`FxError::ResourceUnavailable`]):
//!   fatal, reported before any frame loop starts.
//! - **Per-frame** ([`FxError::DegradedFrame`]): the frame is skipped, the last
//!   good buffer stays visible, and the scheduler continues on the next tick.

use thiserror::Error;

/// Result alias used across the Lumen crates.
pub type FxResult<T> = Result<T, FxError>;

/// Failure reported by an effect engine or its scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FxError {
    /// A configuration value was rejected (unknown gradient, zero segments, ...).
    #[error("invalid configuration: {field}={value} ({message})")]
    Configuration {
        field: &'static str,
        value: String,
        message: String,
    },
    /// The mounting surface was absent or unusable at initialization time.
    #[error("resource unavailable: {0}")]
    ResourceUnavailable(String),
    /// A single frame could not be computed; the previous frame stays visible.
    #[error("degraded frame: {0}")]
    DegradedFrame(String),
}

impl FxError {
    /// Build a configuration error with field context.
    pub fn config(
        field: &'static str,
        value: impl ToString,
        message: impl Into<String>,
    ) -> Self {
        Self::Configuration {
            field,
            value: value.to_string(),
            message: message.into(),
        }
    }

    /// Whether the error is fatal at setup (as opposed to a skipped frame).
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::DegradedFrame(_))
    }
}
