//! Named HTTP client creation.

use crate::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, Result};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Creates the [`HttpClient`] a service talks through.
pub trait HttpClientFactory: Send + Sync {
    /// Create a client for the logical name `name`.
    fn create_client(&self, name: &str) -> Result<HttpClient>;
}

/// Adjusts the configuration of every client a factory creates.
pub type ConfigureClient =
    Arc<dyn Fn(HttpClientConfigBuilder) -> HttpClientConfigBuilder + Send + Sync>;

/// Builds clients from a base configuration, optionally adjusted by a
/// configure callback.
///
/// ```
/// use declaro_http_client::{DefaultHttpClientFactory, HttpClientFactory};
/// use std::time::Duration;
///
/// let factory = DefaultHttpClientFactory::new().configure(|config| {
///     config
///         .base_url("http://127.0.0.1:8080/")
///         .timeout(Duration::from_secs(5))
/// });
///
/// let client = factory.create_client("weather").unwrap();
/// assert_eq!(client.config().base_url.as_deref(), Some("http://127.0.0.1:8080/"));
/// ```
#[derive(Clone, Default)]
pub struct DefaultHttpClientFactory {
    config: HttpClientConfig,
    configure: Option<ConfigureClient>,
}

impl DefaultHttpClientFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from `config` instead of the defaults.
    pub fn with_config(config: HttpClientConfig) -> Self {
        Self {
            config,
            configure: None,
        }
    }

    /// Set the configure callback, replacing any previous one.
    pub fn configure<F>(mut self, configure: F) -> Self
    where
        F: Fn(HttpClientConfigBuilder) -> HttpClientConfigBuilder + Send + Sync + 'static,
    {
        self.configure = Some(Arc::new(configure));
        self
    }

    pub fn has_configure(&self) -> bool {
        self.configure.is_some()
    }
}

impl HttpClientFactory for DefaultHttpClientFactory {
    fn create_client(&self, name: &str) -> Result<HttpClient> {
        let builder = HttpClientConfigBuilder::from(self.config.clone());
        let config = match &self.configure {
            Some(configure) => configure(builder).build(),
            None => builder.build(),
        };

        debug!(
            client = name,
            configured = self.configure.is_some(),
            "Creating HTTP client"
        );
        HttpClient::new(config)
    }
}

impl fmt::Debug for DefaultHttpClientFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultHttpClientFactory")
            .field("config", &self.config)
            .field("configure", &self.configure.is_some())
            .finish()
    }
}
