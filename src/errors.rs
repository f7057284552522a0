/*!
 * Error types for the transqa library.
 *
 * This module contains custom error types for different parts of the library,
 * using the thiserror crate for ergonomic error definitions.
 *
 * Note that text analysis itself never fails: degenerate input produces
 * zero-valued features and no findings. Errors only arise from configuration,
 * from the external taxonomy collaborator, and from the batch runner.
 */

use thiserror::Error;

/// Errors raised while building or loading detection configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Configuration data could not be parsed
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// A configuration value is out of its accepted range
    #[error("Invalid configuration value for {field}: {message}")]
    InvalidValue {
        /// Name of the offending field
        field: String,
        /// What is wrong with it
        message: String,
    },

    /// Two patterns in one registry share an identifier
    #[error("Duplicate pattern id: {0}")]
    DuplicatePattern(String),

    /// Configuration file could not be read
    #[error("Configuration file error: {0}")]
    Io(String),
}

impl ConfigError {
    /// Shorthand for an out-of-range value
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Errors returned by a taxonomy classification collaborator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassificationError {
    /// The collaborator could not be reached or refused the request
    #[error("Taxonomy service unavailable: {0}")]
    Unavailable(String),

    /// The collaborator answered with something unusable
    #[error("Invalid taxonomy response: {0}")]
    InvalidResponse(String),
}

/// Errors that can occur while running detections
#[derive(Error, Debug)]
pub enum DetectionError {
    /// Error in the detector configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from the taxonomy collaborator
    #[error("Classification error: {0}")]
    Classification(#[from] ClassificationError),

    /// A detection task panicked or was cancelled
    #[error("Detection task failed: {0}")]
    TaskFailed(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from configuration handling
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Error from detection
    #[error("Detection error: {0}")]
    Detection(#[from] DetectionError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(error: serde_json::Error) -> Self {
        Self::Parse(error.to_string())
    }
}
