//! HTTP Client error types.

use declaro_cache::CacheError;
use thiserror::Error;

/// Result type for HTTP client operations.
pub type Result<T> = std::result::Result<T, HttpClientError>;

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// The server answered with a non-success status.
    #[error("Response error: {status} - {reason}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Status name without spaces, e.g. `NotFound`.
        reason: String,
    },

    /// A GET succeeded but carried no payload.
    #[error("Empty response for GET: {type_name} on endpoint '{endpoint}'")]
    NullResponse {
        type_name: &'static str,
        endpoint: String,
    },

    /// The declared unwrap property is missing from the response document.
    #[error("Property '{property}' not found in response from '{endpoint}'")]
    PropertyNotFound { property: String, endpoint: String },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to build request: {0}")]
    RequestBuild(String),

    /// Invalid client configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Endpoint configuration or URI formatting error.
    #[error(transparent)]
    Config(#[from] declaro_core::Error),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// Underlying HTTP client error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl HttpClientError {
    /// Check if this is a timeout error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }

    /// Check if this is a connection error.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_connect())
    }

    /// Check if the endpoint template could not be filled from the arguments.
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::Config(e) if e.is_format_error())
    }

    /// Get the HTTP status code if this is a response error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
