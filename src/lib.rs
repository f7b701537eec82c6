// Declaro - declarative HTTP client bindings for Rust
//
// Each data type declares, once, how it talks to its endpoints: verb,
// endpoint template, positional arguments, headers, cache duration and
// unwrap property. A single service then dispatches typed requests.

// Re-export core functionality
pub use declaro_core::*;

// Re-export the transport and cache crates
pub use declaro_cache;
pub use declaro_http_client;

pub use declaro_cache::{CacheError, CacheStore, InMemoryCache};
pub use declaro_http_client::{
    add_http_service, add_http_service_with, DefaultHttpClientFactory, HttpClient,
    HttpClientConfig, HttpClientConfigBuilder, HttpClientError, HttpClientFactory, HttpService,
};

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        add_http_service,
        add_http_service_with,
        request_arguments,
        Authorization,
        CacheStore,
        Container,
        DefaultHttpClientFactory,
        EndpointConfig,
        EndpointManifest,
        EndpointRegistry,
        HttpClientConfig,
        HttpClientError,
        HttpService,
        HttpVerb,
        InMemoryCache,
        RequestArguments,
    };
    pub use std::sync::Arc;
}
