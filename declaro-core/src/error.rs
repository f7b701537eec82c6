// Error types for endpoint configuration and request construction

use crate::HttpVerb;
use thiserror::Error;

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Neither a verb-specific nor a default configuration is registered.
    #[error("{type_name} does not have a {verb} or default endpoint configuration")]
    MissingConfiguration {
        type_name: &'static str,
        verb: HttpVerb,
    },

    /// Supplied positional arguments do not match the declared bindings.
    #[error("Endpoint '{endpoint}' expects {expected} argument(s), got {actual}")]
    FormatMismatch {
        endpoint: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid endpoint template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    #[error("Invalid argument bindings for {type_name}: {reason}")]
    InvalidBindings {
        type_name: &'static str,
        reason: String,
    },

    #[error("{type_name} already has a {verb} endpoint configuration")]
    DuplicateConfiguration {
        type_name: &'static str,
        verb: HttpVerb,
    },

    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Logging initialization failed: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this error was raised while formatting an endpoint.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::FormatMismatch { .. } | Self::InvalidTemplate { .. }
        )
    }
}
