//! Endpoint configuration records.

use crate::arguments::ArgumentBinding;
use crate::duration::parse_cache_duration;
use crate::verb::HttpVerb;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Name of the header composed from an [`Authorization`].
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Authorization scheme written in front of the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthorizationScheme {
    Basic,
    Bearer,
    ApiKey,
}

impl fmt::Display for AuthorizationScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AuthorizationScheme::Basic => "Basic",
            AuthorizationScheme::Bearer => "Bearer",
            AuthorizationScheme::ApiKey => "ApiKey",
        })
    }
}

/// A static `(scheme, token)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorization {
    pub scheme: AuthorizationScheme,
    pub token: String,
}

impl Authorization {
    pub fn new(scheme: AuthorizationScheme, token: impl Into<String>) -> Self {
        Self {
            scheme,
            token: token.into(),
        }
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Self::new(AuthorizationScheme::Bearer, token)
    }

    pub fn basic(token: impl Into<String>) -> Self {
        Self::new(AuthorizationScheme::Basic, token)
    }

    /// Basic authorization with the token encoded from `username:password`.
    pub fn basic_credentials(username: &str, password: Option<&str>) -> Self {
        use base64::Engine;
        let credentials = format!("{}:{}", username, password.unwrap_or_default());
        Self::basic(base64::engine::general_purpose::STANDARD.encode(credentials))
    }

    pub fn api_key(token: impl Into<String>) -> Self {
        Self::new(AuthorizationScheme::ApiKey, token)
    }

    /// The `Authorization` header value, `"<scheme> <token>"`.
    pub fn header_value(&self) -> String {
        format!("{} {}", self.scheme, self.token)
    }
}

/// How one data type talks to one endpoint for one verb.
///
/// Built with the constructor for the verb and the `with_*` methods:
///
/// ```
/// use declaro_core::{Authorization, EndpointConfig};
/// use std::time::Duration;
///
/// let config = EndpointConfig::get("api/weather?City={0}&Date={1}")
///     .with_argument("city", 0)
///     .with_argument("date", 1)
///     .with_header("Accept", "application/json")
///     .with_authorization(Authorization::bearer("secret"))
///     .with_cache_time("00:00:03.000");
///
/// assert_eq!(config.cache_time, Some(Duration::from_secs(3)));
/// assert_eq!(config.headers["Authorization"], "Bearer secret");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EndpointConfig {
    pub verb: HttpVerb,
    /// Endpoint template with `{index}` placeholders.
    pub endpoint: String,
    pub headers: BTreeMap<String, String>,
    pub authorization: Option<Authorization>,
    /// `None` disables caching.
    pub cache_time: Option<Duration>,
    /// Sorted by index.
    pub bindings: Vec<ArgumentBinding>,
    /// Top-level JSON property to decode instead of the whole body.
    pub unwrap_property: Option<String>,
    pub request_type: Option<&'static str>,
}

impl EndpointConfig {
    pub fn new(verb: HttpVerb, endpoint: impl Into<String>) -> Self {
        Self {
            verb,
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// The verb-agnostic configuration of a type.
    pub fn default_for(endpoint: impl Into<String>) -> Self {
        Self::new(HttpVerb::Any, endpoint)
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(HttpVerb::Get, endpoint)
    }

    pub fn list(endpoint: impl Into<String>) -> Self {
        Self::new(HttpVerb::List, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(HttpVerb::Post, endpoint)
    }

    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(HttpVerb::Put, endpoint)
    }

    pub fn patch(endpoint: impl Into<String>) -> Self {
        Self::new(HttpVerb::Patch, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(HttpVerb::Delete, endpoint)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the authorization and compose its header.
    ///
    /// An `Authorization` header that is already present wins; the descriptor
    /// is then ignored.
    pub fn with_authorization(mut self, authorization: Authorization) -> Self {
        if !self.headers.contains_key(AUTHORIZATION_HEADER) {
            self.headers
                .insert(AUTHORIZATION_HEADER.to_string(), authorization.header_value());
            self.authorization = Some(authorization);
        }
        self
    }

    /// Set the cache duration from its textual form. Unparseable, zero and
    /// negative durations leave caching disabled.
    pub fn with_cache_time(mut self, cache_time: &str) -> Self {
        self.cache_time = parse_cache_duration(cache_time);
        if self.cache_time.is_none() {
            tracing::debug!(
                endpoint = %self.endpoint,
                cache_time,
                "Cache time disables caching"
            );
        }
        self
    }

    pub fn with_cache_duration(mut self, duration: Duration) -> Self {
        self.cache_time = (!duration.is_zero()).then_some(duration);
        self
    }

    pub fn with_argument(mut self, property: &'static str, index: usize) -> Self {
        self.bindings.push(ArgumentBinding::new(property, index));
        self.bindings.sort_by_key(|binding| binding.index);
        self
    }

    pub fn with_bindings(mut self, mut bindings: Vec<ArgumentBinding>) -> Self {
        bindings.sort_by_key(|binding| binding.index);
        self.bindings = bindings;
        self
    }

    pub fn with_unwrap_property(mut self, property: impl Into<String>) -> Self {
        self.unwrap_property = Some(property.into());
        self
    }

    pub fn with_request_type(mut self, request_type: &'static str) -> Self {
        self.request_type = Some(request_type);
        self
    }

    /// Number of positional arguments the endpoint expects.
    pub fn argument_count(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_cached(&self) -> bool {
        self.cache_time.is_some()
    }

    /// Resolve `specific` over a type's `default` configuration.
    ///
    /// Empty or unset fields of `specific` are taken from `default`; headers
    /// are merged with `specific` winning on conflicts.
    pub fn merge(default: &EndpointConfig, specific: &EndpointConfig) -> EndpointConfig {
        let mut headers = default.headers.clone();
        headers.extend(
            specific
                .headers
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );

        EndpointConfig {
            verb: specific.verb,
            endpoint: if specific.endpoint.is_empty() {
                default.endpoint.clone()
            } else {
                specific.endpoint.clone()
            },
            headers,
            authorization: specific
                .authorization
                .clone()
                .or_else(|| default.authorization.clone()),
            cache_time: specific.cache_time.or(default.cache_time),
            bindings: if specific.bindings.is_empty() {
                default.bindings.clone()
            } else {
                specific.bindings.clone()
            },
            unwrap_property: specific
                .unwrap_property
                .clone()
                .or_else(|| default.unwrap_property.clone()),
            request_type: specific.request_type.or(default.request_type),
        }
    }

    /// The default configuration standing in for `verb`.
    pub(crate) fn inherit_for(default: &EndpointConfig, verb: HttpVerb) -> EndpointConfig {
        EndpointConfig {
            verb,
            ..default.clone()
        }
    }
}
