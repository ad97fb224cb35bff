//! Error types for the display runtime and its configuration.

use thiserror_no_std::Error;

/// Errors surfaced by the [`Compositor`](crate::compositor::Compositor).
///
/// Device errors are logged where they occur; this enum only records which
/// stage failed so the caller can decide on a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UiError {
    /// The display could not be brought up during `begin()`
    #[error("Display initialisation failed")]
    DisplayInit,

    /// Writing the frame buffer to the display failed
    #[error("Display write failed")]
    DisplayWrite,
}

/// Errors produced while decoding or validating a [`UiConfig`](crate::config::UiConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The byte blob is not a valid encoded configuration
    #[error("Configuration blob could not be decoded")]
    Decode,

    /// The configuration could not be encoded
    #[error("Configuration could not be encoded")]
    Encode,

    /// The configuration decoded but is semantically invalid
    #[error("Invalid configuration: {reason}")]
    Invalid {
        /// What was wrong
        reason: &'static str,
    },
}
