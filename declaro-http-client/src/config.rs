//! HTTP client configuration.

use crate::{HttpClientError, Result};
use std::time::Duration;

/// Environment variable holding the base URL.
pub const BASE_URL_ENV: &str = "DECLARO_BASE_URL";
/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "DECLARO_TIMEOUT_SECS";
/// Environment variable holding the connect timeout in seconds.
pub const CONNECT_TIMEOUT_ENV: &str = "DECLARO_CONNECT_TIMEOUT_SECS";
/// Environment variable holding the user agent.
pub const USER_AGENT_ENV: &str = "DECLARO_USER_AGENT";

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL that relative endpoints resolve against.
    pub base_url: Option<String>,
    /// Default request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// How long idle pooled connections are kept.
    pub pool_idle_timeout: Duration,
    /// Maximum idle connections per host.
    pub pool_max_idle_per_host: usize,
    /// Default headers for all requests.
    pub default_headers: Vec<(String, String)>,
    pub user_agent: String,
    /// Enable gzip compression.
    pub gzip: bool,
    /// Enable brotli compression.
    pub brotli: bool,
    pub follow_redirects: bool,
    /// Maximum redirects to follow.
    pub max_redirects: usize,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 32,
            default_headers: Vec::new(),
            user_agent: format!("declaro-http-client/{}", env!("CARGO_PKG_VERSION")),
            gzip: true,
            brotli: true,
            follow_redirects: true,
            max_redirects: 10,
        }
    }
}

impl HttpClientConfig {
    /// Create a new configuration builder.
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }

    /// Defaults overridden by `DECLARO_BASE_URL`, `DECLARO_TIMEOUT_SECS`,
    /// `DECLARO_CONNECT_TIMEOUT_SECS` and `DECLARO_USER_AGENT`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut builder = Self::builder();

        if let Some(base_url) = lookup(BASE_URL_ENV) {
            url::Url::parse(&base_url)
                .map_err(|e| HttpClientError::InvalidConfig(format!("{}: {}", BASE_URL_ENV, e)))?;
            builder = builder.base_url(base_url);
        }
        if let Some(secs) = lookup(TIMEOUT_ENV) {
            builder = builder.timeout(parse_secs(TIMEOUT_ENV, &secs)?);
        }
        if let Some(secs) = lookup(CONNECT_TIMEOUT_ENV) {
            builder = builder.connect_timeout(parse_secs(CONNECT_TIMEOUT_ENV, &secs)?);
        }
        if let Some(user_agent) = lookup(USER_AGENT_ENV) {
            builder = builder.user_agent(user_agent);
        }

        Ok(builder.build())
    }
}

fn parse_secs(key: &str, value: &str) -> Result<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| HttpClientError::InvalidConfig(format!("{}='{}': {}", key, value, e)))
}

/// Builder for HTTP client configuration.
#[derive(Debug, Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl From<HttpClientConfig> for HttpClientConfigBuilder {
    fn from(config: HttpClientConfig) -> Self {
        Self { config }
    }
}

impl HttpClientConfigBuilder {
    /// Set the base URL for all requests.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the default request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set the connection pool idle timeout.
    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.pool_idle_timeout = timeout;
        self
    }

    /// Set the maximum idle connections per host.
    pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.config.pool_max_idle_per_host = max;
        self
    }

    /// Add a default header for all requests.
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.push((name.into(), value.into()));
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Enable or disable gzip compression.
    pub fn gzip(mut self, enable: bool) -> Self {
        self.config.gzip = enable;
        self
    }

    /// Enable or disable brotli compression.
    pub fn brotli(mut self, enable: bool) -> Self {
        self.config.brotli = enable;
        self
    }

    /// Enable or disable following redirects.
    pub fn follow_redirects(mut self, enable: bool) -> Self {
        self.config.follow_redirects = enable;
        self
    }

    /// Set the maximum number of redirects to follow.
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.config.max_redirects = max;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}
