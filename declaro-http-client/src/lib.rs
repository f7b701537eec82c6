//! # Declaro HTTP Client
//!
//! HTTP transport and the typed dispatch service for Declaro endpoint
//! bindings.
//!
//! ## Features
//!
//! - **Dispatch**: [`HttpService`] sends GET, LIST, POST, PUT, PATCH and
//!   DELETE requests described by an
//!   [`EndpointRegistry`](declaro_core::EndpointRegistry)
//! - **Caching**: GET and LIST payloads kept in a
//!   [`CacheStore`](declaro_cache::CacheStore) for the endpoint's duration
//! - **Unwrapping**: decode one top-level property instead of the whole body
//! - **Client factory**: named clients with a configure callback
//! - **Compression**: Automatic gzip/brotli support
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use declaro_http_client::{HttpClient, HttpClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpClient::new(
//!         HttpClientConfig::builder()
//!             .base_url("https://api.example.com/")
//!             .build(),
//!     )?;
//!
//!     let response = client.get("api/weather").send().await?;
//!
//!     println!("Status: {} ({})", response.status(), response.reason());
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod factory;
mod registration;
mod request;
mod response;
mod service;

pub use client::HttpClient;
pub use config::{
    HttpClientConfig, HttpClientConfigBuilder, BASE_URL_ENV, CONNECT_TIMEOUT_ENV, TIMEOUT_ENV,
    USER_AGENT_ENV,
};
pub use error::{HttpClientError, Result};
pub use factory::{ConfigureClient, DefaultHttpClientFactory, HttpClientFactory};
pub use registration::{add_http_service, add_http_service_with};
pub use request::RequestBuilder;
pub use response::Response;
pub use service::{HttpService, Query, CLIENT_NAME};

// Re-export common types
pub use bytes::Bytes;
pub use http::{header, HeaderMap, HeaderValue, Method, StatusCode};
pub use url::Url;

/// Prelude for common imports.
///
/// ```
/// use declaro_http_client::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::HttpClient;
    pub use crate::config::{HttpClientConfig, HttpClientConfigBuilder};
    pub use crate::error::{HttpClientError, Result};
    pub use crate::factory::{DefaultHttpClientFactory, HttpClientFactory};
    pub use crate::registration::{add_http_service, add_http_service_with};
    pub use crate::request::RequestBuilder;
    pub use crate::response::Response;
    pub use crate::service::HttpService;
    pub use http::{header, HeaderMap, HeaderValue, Method, StatusCode};
}
