//! Error handling for submutator

use thiserror::Error;

/// Main error type for submutator
#[derive(Error, Debug, Clone)]
pub enum SubmutatorError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        content: Option<String>,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl SubmutatorError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>, path: Option<String>) -> Self {
        Self::Io {
            message: message.into(),
            path,
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>, content: Option<String>) -> Self {
        Self::Parse {
            message: message.into(),
            content,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message } => {
                format!("Configuration problem: {}\nHint: check your flags, .env file or SUBMUTATOR_* variables", message)
            }
            Self::Validation { message } => {
                format!("Validation error: {}\nHint: check the hostname format", message)
            }
            Self::Io { message, path } => {
                let path_info = path.as_ref().map_or(String::new(), |p| format!(" ({})", p));
                format!("File error{}: {}\nHint: check file permissions and paths", path_info, message)
            }
            Self::Parse { message, .. } => {
                format!("Parse error: {}", message)
            }
            Self::Internal { message } => {
                format!("Internal error: {}\nHint: this is a bug, please report it", message)
            }
        }
    }
}

impl From<serde_json::Error> for SubmutatorError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string(), None)
    }
}

impl From<std::io::Error> for SubmutatorError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string(), None)
    }
}

impl From<tokio::task::JoinError> for SubmutatorError {
    fn from(err: tokio::task::JoinError) -> Self {
        crate::internal_error!("Worker task failed: {}", err)
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, SubmutatorError>;

/// Helper macros for common error patterns
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::error::SubmutatorError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::SubmutatorError::config(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! validation_error {
    ($msg:expr) => {
        $crate::error::SubmutatorError::validation($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::SubmutatorError::validation(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! internal_error {
    ($msg:expr) => {
        $crate::error::SubmutatorError::internal($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::SubmutatorError::internal(format!($fmt, $($arg)*))
    };
}
