//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Configuration error type
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Source file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound {
        /// Path to the file
        path: PathBuf,
    },

    /// Source file read error
    #[error("Failed to read configuration file {path}: {message}")]
    FileReadError {
        /// Path to the file
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// Source file parse error
    #[error("Failed to parse configuration file {path}: {message}")]
    ParseError {
        /// Path to the file
        path: PathBuf,
        /// Error message describing the parse failure
        message: String,
    },

    /// A value has the wrong JSON type
    #[error("Configuration type error at '{key}': expected {expected}, found {actual}")]
    TypeError {
        /// Key (or path) of the offending value
        key: String,
        /// Expected type
        expected: String,
        /// Actual type encountered
        actual: String,
    },

    /// Merged settings could not be turned into their typed form
    #[error("Invalid settings: {message}")]
    InvalidSettings {
        /// Deserializer message
        message: String,
    },
}

impl ConfigError {
    /// Create a file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a file read error
    pub fn file_read_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::FileReadError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a type error
    pub fn type_error(
        key: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::TypeError {
            key: key.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an invalid settings error
    pub fn invalid_settings(message: impl Into<String>) -> Self {
        Self::InvalidSettings {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_settings(err.to_string())
    }
}
