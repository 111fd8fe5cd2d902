//! Error types for the walkthrough
//!
//! Engine transitions never fail; these errors cover loading files,
//! writing reports and driving the terminal session.

use thiserror::Error;

/// Result type alias for walkthrough operations
pub type Result<T> = std::result::Result<T, WalkthroughError>;

/// Main error type for all walkthrough operations
#[derive(Debug, Error)]
pub enum WalkthroughError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Invalid JSON format
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// Configuration or page graph could not be turned into a usable form
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Input stream closed or the operator quit mid-prompt
    #[error("Operation interrupted")]
    Interrupted,

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error with context
    #[error("{context}: {message}")]
    Wrapped { context: String, message: String },
}

impl WalkthroughError {
    /// Get the error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            WalkthroughError::FileNotFound(_) => "FILE_NOT_FOUND",
            WalkthroughError::InvalidJson(_) => "INVALID_JSON",
            WalkthroughError::ConfigError(_) => "CONFIG_ERROR",
            WalkthroughError::Interrupted => "INTERRUPTED",
            WalkthroughError::Io(_) => "IO_ERROR",
            WalkthroughError::Wrapped { .. } => "WRAPPED_ERROR",
        }
    }

    /// Wrap an error with additional context
    pub fn wrap<E: std::fmt::Display>(error: E, context: impl Into<String>) -> Self {
        WalkthroughError::Wrapped {
            context: context.into(),
            message: error.to_string(),
        }
    }
}

/// Convert an error to an appropriate exit code
pub fn to_exit_code(error: &WalkthroughError) -> i32 {
    match error {
        WalkthroughError::Interrupted => 130, // Standard Unix exit code for SIGINT
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(WalkthroughError::FileNotFound("test".into()).code(), "FILE_NOT_FOUND");
        assert_eq!(WalkthroughError::InvalidJson("test".into()).code(), "INVALID_JSON");
        assert_eq!(WalkthroughError::ConfigError("test".into()).code(), "CONFIG_ERROR");
        assert_eq!(WalkthroughError::Interrupted.code(), "INTERRUPTED");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(to_exit_code(&WalkthroughError::Interrupted), 130);
        assert_eq!(to_exit_code(&WalkthroughError::ConfigError("test".into())), 1);
    }

    #[test]
    fn test_wrap_error() {
        let wrapped = WalkthroughError::wrap("inner error", "outer context");
        assert_eq!(wrapped.code(), "WRAPPED_ERROR");
        assert!(wrapped.to_string().contains("outer context"));
        assert!(wrapped.to_string().contains("inner error"));
    }
}
