//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File not found at the specified path.
    #[error("configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// Failed to parse or extract the configuration.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid configuration value.
    #[error("invalid configuration: {message}")]
    ValidationError { message: String },

    /// A topic appears more than once for the same kind in the
    /// subscription list.
    #[error("duplicate subscription for topic '{topic}' and kind '{kind}'")]
    DuplicateSubscription { topic: String, kind: String },

    /// A configured subscription references a kind or binding the consumer
    /// never registered.
    #[error("subscription for topic '{topic}' and kind '{kind}' has no registered binding")]
    UnboundSubscription { topic: String, kind: String },
}

impl ConfigError {
    /// Creates a validation error with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
