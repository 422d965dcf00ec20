//! Error types and handling for the walk programme crate

use thiserror::Error;

/// Main error type for the walk programme crate
///
/// Sorting and geometry never fail; these variants cover the edges of the
/// crate: configuration, user-supplied names and walk data files.
#[derive(Error, Debug)]
pub enum WalksError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Walk data that could not be decoded
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl WalksError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WalksError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            WalksError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            WalksError::Parse { .. } => {
                "Walk data could not be read. Please check the file is a JSON list of walks."
                    .to_string()
            }
            WalksError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

impl From<serde_json::Error> for WalksError {
    fn from(err: serde_json::Error) -> Self {
        WalksError::parse(err.to_string())
    }
}
