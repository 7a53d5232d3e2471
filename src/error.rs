//! Error types for client operations

use thiserror::Error;

/// Structured error types for GitLab client operations
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport failure, propagated from reqwest unchanged
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Joining path segments produced a string that is not a valid URL
    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Configuration is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration field validation failed
    #[error("Invalid {field}: {message}")]
    ConfigValidation { field: String, message: String },

    /// Building the trust-all TLS context failed; the secure transport
    /// remains in effect
    #[error("Failed to set up trust-all TLS context: {0}")]
    TlsSetup(#[source] reqwest::Error),
}

impl ClientError {
    /// Create an invalid URL error
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a configuration field validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation { field: field.into(), message: message.into() }
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
