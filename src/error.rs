//! Error types for the TAMS client
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! [`ErrorKind`] folds the variants into the five categories callers
//! usually branch on.

use thiserror::Error;

/// The main error type for the TAMS client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Parse Errors
    // ============================================================================
    #[error("Failed to parse '{input}': {message}")]
    Parse { input: String, message: String },

    // ============================================================================
    // Validation Errors
    // ============================================================================
    #[error("Invalid filter '{field}': {message}")]
    Validation { field: String, message: String },

    // ============================================================================
    // Network Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Response Errors
    // ============================================================================
    #[error("Unexpected response format: {message}")]
    UnexpectedFormat { message: String },

    // ============================================================================
    // Pagination Errors
    // ============================================================================
    #[error("Cannot {operation}: another navigation is already in flight")]
    ConcurrentOperation { operation: &'static str },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

/// Coarse error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed timerange or Link header
    Parse,
    /// Invalid filter set
    Validation,
    /// Transport failure or non-2xx status
    Network,
    /// Response body matched neither known shape
    UnexpectedFormat,
    /// Navigation attempted while another one is in flight
    ConcurrentOperation,
    /// Configuration, I/O and everything else
    Other,
}

impl Error {
    /// Create a parse error
    pub fn parse(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create an unexpected format error
    pub fn unexpected_format(message: impl Into<String>) -> Self {
        Self::UnexpectedFormat {
            message: message.into(),
        }
    }

    /// Create a concurrent operation error
    pub fn concurrent(operation: &'static str) -> Self {
        Self::ConcurrentOperation { operation }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Parse { .. } => ErrorKind::Parse,
            Error::Validation { .. } => ErrorKind::Validation,
            Error::Http(_)
            | Error::HttpStatus { .. }
            | Error::Transport { .. }
            | Error::InvalidUrl(_) => ErrorKind::Network,
            Error::UnexpectedFormat { .. } => ErrorKind::UnexpectedFormat,
            Error::ConcurrentOperation { .. } => ErrorKind::ConcurrentOperation,
            _ => ErrorKind::Other,
        }
    }

    /// Check if this is a network error
    pub fn is_network(&self) -> bool {
        self.kind() == ErrorKind::Network
    }
}

/// Result type alias for the TAMS client
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::parse("0:0_-1:0", "negative seconds");
        assert_eq!(
            err.to_string(),
            "Failed to parse '0:0_-1:0': negative seconds"
        );

        let err = Error::validation("limit", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "Invalid filter 'limit': must be greater than zero"
        );

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");

        let err = Error::concurrent("fetch next page");
        assert_eq!(
            err.to_string(),
            "Cannot fetch next page: another navigation is already in flight"
        );
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(Error::parse("x", "y").kind(), ErrorKind::Parse);
        assert_eq!(Error::validation("x", "y").kind(), ErrorKind::Validation);
        assert_eq!(Error::http_status(500, "").kind(), ErrorKind::Network);
        assert_eq!(Error::transport("refused").kind(), ErrorKind::Network);
        assert_eq!(
            Error::unexpected_format("object").kind(),
            ErrorKind::UnexpectedFormat
        );
        assert_eq!(
            Error::concurrent("refresh").kind(),
            ErrorKind::ConcurrentOperation
        );
        assert_eq!(Error::config("bad").kind(), ErrorKind::Other);

        assert!(Error::http_status(503, "").is_network());
        assert!(!Error::config("bad").is_network());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let contextual = result.context("outer");
        assert!(contextual
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
