//! Typed request dispatch driven by endpoint configurations.
//!
//! [`HttpService`] resolves the configuration registered for a data type,
//! builds the request URI from it, sends the request and decodes the
//! response. GET and LIST results are kept in the cache store for the
//! endpoint's cache duration, keyed by the resolved URI.
//!
//! ```no_run
//! use declaro_core::{request_arguments, EndpointConfig, EndpointRegistry};
//! use declaro_http_client::{DefaultHttpClientFactory, HttpService};
//! use serde::Deserialize;
//! use std::sync::Arc;
//!
//! #[derive(Deserialize)]
//! struct WeatherResponse {
//!     celsius: i32,
//!     city: String,
//! }
//!
//! struct WeatherRequest {
//!     city: String,
//!     date: String,
//! }
//! request_arguments!(WeatherRequest { 0 => city, 1 => date });
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = EndpointRegistry::builder()
//!     .register_with_request::<WeatherResponse, WeatherRequest>(
//!         EndpointConfig::get("api/weather?City={0}&Date={1}"),
//!     )
//!     .build()?;
//!
//! let factory = DefaultHttpClientFactory::new()
//!     .configure(|config| config.base_url("https://weather.example.com/"));
//! let service = HttpService::new(&factory, None, Arc::new(registry))?;
//!
//! let request = WeatherRequest {
//!     city: "Budapest".into(),
//!     date: "2023-09-22".into(),
//! };
//! let weather: WeatherResponse = service
//!     .get_with_request::<WeatherResponse, _>(&request, &[("District", "13")])
//!     .await?;
//! println!("{} {}", weather.city, weather.celsius);
//! # Ok(())
//! # }
//! ```

use crate::{HttpClient, HttpClientError, HttpClientFactory, Response, Result};
use declaro_cache::{helpers, CacheStore};
use declaro_core::{
    build_uri, extract_arguments, EndpointConfig, EndpointRegistry, HttpVerb, RequestArguments,
};
use http::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::any::type_name;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Name the service requests its client under.
pub const CLIENT_NAME: &str = "declaro";

/// Query parameters appended after the resolved endpoint.
pub type Query<'a> = &'a [(&'a str, &'a str)];

/// Dispatches typed requests according to the registered endpoint
/// configurations.
pub struct HttpService {
    client: HttpClient,
    cache: Option<Arc<dyn CacheStore>>,
    registry: Arc<EndpointRegistry>,
}

impl HttpService {
    /// Create a service whose client comes from `factory`.
    ///
    /// Without a cache store responses are never cached, and a warning is
    /// logged when the registry declares cached endpoints.
    pub fn new(
        factory: &dyn HttpClientFactory,
        cache: Option<Arc<dyn CacheStore>>,
        registry: Arc<EndpointRegistry>,
    ) -> Result<Self> {
        let client = factory.create_client(CLIENT_NAME)?;
        Ok(Self::with_client(client, cache, registry))
    }

    pub fn with_client(
        client: HttpClient,
        cache: Option<Arc<dyn CacheStore>>,
        registry: Arc<EndpointRegistry>,
    ) -> Self {
        if cache_missing(cache.as_ref(), &registry) {
            warn!("No cache store available, cached endpoints will not be cached");
        }
        debug!(
            response_types = registry.len(),
            caching = cache.is_some(),
            "HTTP service created"
        );
        Self {
            client,
            cache,
            registry,
        }
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    pub fn registry(&self) -> &EndpointRegistry {
        &self.registry
    }

    pub fn cache(&self) -> Option<&Arc<dyn CacheStore>> {
        self.cache.as_ref()
    }

    pub fn caching_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// GET `T` from an endpoint without positional arguments.
    ///
    /// Fails with a format error when the endpoint declares bindings and with
    /// [`HttpClientError::NullResponse`] when the body is empty.
    pub async fn get<T>(&self, query: Query<'_>) -> Result<T>
    where
        T: DeserializeOwned + 'static,
    {
        let config = self.registry.resolve::<T>(HttpVerb::Get)?;
        self.get_resolved(&config, None, query).await
    }

    /// GET `T`, filling the endpoint placeholders with `arguments` in order.
    pub async fn get_with_arguments<T, A>(&self, arguments: &[A], query: Query<'_>) -> Result<T>
    where
        T: DeserializeOwned + 'static,
        A: AsRef<str>,
    {
        let config = self.registry.resolve::<T>(HttpVerb::Get)?;
        let arguments: Vec<String> = arguments.iter().map(|a| a.as_ref().to_string()).collect();
        self.get_resolved(&config, Some(arguments.as_slice()), query)
            .await
    }

    /// GET `T`, taking the positional arguments from `request`.
    pub async fn get_with_request<T, R>(&self, request: &R, query: Query<'_>) -> Result<T>
    where
        T: DeserializeOwned + 'static,
        R: RequestArguments,
    {
        let config = self.registry.resolve::<T>(HttpVerb::Get)?;
        let arguments = extract_arguments(request, &config);
        self.get_resolved(&config, arguments.as_deref(), query)
            .await
    }

    async fn get_resolved<T>(
        &self,
        config: &EndpointConfig,
        arguments: Option<&[String]>,
        query: Query<'_>,
    ) -> Result<T>
    where
        T: DeserializeOwned + 'static,
    {
        let uri = build_uri(config, arguments, query)?;
        self.fetch::<T, ()>(config, &uri, None)
            .await?
            .ok_or_else(|| HttpClientError::NullResponse {
                type_name: type_name::<T>(),
                endpoint: uri,
            })
    }

    /// Bulk query for `T`, sent as a POST carrying `request` as JSON.
    ///
    /// Cached like GET on the resolved URI. An empty body yields an empty list.
    pub async fn list<T, R>(&self, request: &R, query: Query<'_>) -> Result<Vec<T>>
    where
        T: DeserializeOwned + 'static,
        R: Serialize + RequestArguments,
    {
        let config = self.registry.resolve::<T>(HttpVerb::List)?;
        let uri = uri_for(&config, request, query)?;
        let items = self.fetch::<Vec<T>, R>(&config, &uri, Some(request)).await?;
        Ok(items.unwrap_or_default())
    }

    /// POST `request` as JSON to the POST endpoint of `T`.
    pub async fn post<T, R>(&self, request: &R, query: Query<'_>) -> Result<Option<T>>
    where
        T: DeserializeOwned + 'static,
        R: Serialize + RequestArguments,
    {
        self.send_with_body(HttpVerb::Post, request, query).await
    }

    /// PUT `request` as JSON to the PUT endpoint of `T`.
    pub async fn put<T, R>(&self, request: &R, query: Query<'_>) -> Result<Option<T>>
    where
        T: DeserializeOwned + 'static,
        R: Serialize + RequestArguments,
    {
        self.send_with_body(HttpVerb::Put, request, query).await
    }

    /// PATCH `request` as JSON to the PATCH endpoint of `T`.
    pub async fn patch<T, R>(&self, request: &R, query: Query<'_>) -> Result<Option<T>>
    where
        T: DeserializeOwned + 'static,
        R: Serialize + RequestArguments,
    {
        self.send_with_body(HttpVerb::Patch, request, query).await
    }

    async fn send_with_body<T, R>(
        &self,
        verb: HttpVerb,
        request: &R,
        query: Query<'_>,
    ) -> Result<Option<T>>
    where
        T: DeserializeOwned + 'static,
        R: Serialize + RequestArguments,
    {
        let config = self.registry.resolve::<T>(verb)?;
        let uri = uri_for(&config, request, query)?;
        self.fetch::<T, R>(&config, &uri, Some(request)).await
    }

    /// DELETE the resource described by `request`, using the DELETE endpoint
    /// registered for `R`. The response body is discarded.
    pub async fn delete<R>(&self, request: &R, query: Query<'_>) -> Result<()>
    where
        R: RequestArguments + 'static,
    {
        let config = self.registry.resolve::<R>(HttpVerb::Delete)?;
        let uri = uri_for(&config, request, query)?;
        self.send::<()>(&config, &uri, None)
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Serve from the cache when allowed, otherwise send and decode.
    async fn fetch<T, B>(
        &self,
        config: &EndpointConfig,
        uri: &str,
        body: Option<&B>,
    ) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let cache = self.cache_for(config);

        if let Some((store, _)) = cache
            && let Some(value) = cache_lookup::<T>(store, uri).await
        {
            return Ok(Some(value));
        }

        let response = self.send(config, uri, body).await?;
        let Some(payload) = decode_payload(&response, config, uri)? else {
            return Ok(None);
        };

        let cached_json = cache.map(|(store, ttl)| (store, ttl, payload.to_string()));
        let value: T =
            serde_json::from_value(payload).map_err(|e| HttpClientError::Json(e.to_string()))?;

        if let Some((store, ttl, json)) = cached_json {
            match store.set_json(uri, json, Some(ttl)).await {
                Ok(()) => debug!(uri, ttl = ?ttl, "Response cached"),
                Err(e) => warn!(uri, error = %e, "Failed to cache response"),
            }
        }

        Ok(Some(value))
    }

    /// The store and duration to cache this configuration's responses with.
    fn cache_for(&self, config: &EndpointConfig) -> Option<(&dyn CacheStore, Duration)> {
        if !config.verb.is_cacheable() {
            return None;
        }
        let ttl = config.cache_time?;
        self.cache.as_deref().map(|store| (store, ttl))
    }

    async fn send<B>(&self, config: &EndpointConfig, uri: &str, body: Option<&B>) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.client.request(method_for(config.verb), uri);
        for (name, value) in &config.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(verb = %config.verb, uri, "Dispatching request");
        let response = request.send().await?;
        debug!(
            verb = %config.verb,
            uri,
            status = response.status().as_u16(),
            "Response received"
        );
        Ok(response)
    }
}

impl fmt::Debug for HttpService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpService")
            .field("client", &self.client)
            .field("caching", &self.cache.is_some())
            .field("registry", &self.registry)
            .finish()
    }
}

/// Whether cached endpoints are registered but nothing can store them.
fn cache_missing(cache: Option<&Arc<dyn CacheStore>>, registry: &EndpointRegistry) -> bool {
    cache.is_none() && registry.has_cached_endpoints()
}

fn method_for(verb: HttpVerb) -> Method {
    match verb {
        HttpVerb::Any | HttpVerb::Get => Method::GET,
        HttpVerb::List | HttpVerb::Post => Method::POST,
        HttpVerb::Put => Method::PUT,
        HttpVerb::Patch => Method::PATCH,
        HttpVerb::Delete => Method::DELETE,
    }
}

fn uri_for<R: RequestArguments>(
    config: &EndpointConfig,
    request: &R,
    query: Query<'_>,
) -> Result<String> {
    let arguments = extract_arguments(request, config);
    Ok(build_uri(config, arguments.as_deref(), query)?)
}

/// A cached value for `uri`. Read failures and entries of another shape count
/// as misses.
async fn cache_lookup<T: DeserializeOwned>(store: &dyn CacheStore, uri: &str) -> Option<T> {
    match helpers::get::<_, T>(store, uri).await {
        Ok(Some(value)) => {
            debug!(uri, "Cache hit");
            Some(value)
        }
        Ok(None) => None,
        Err(e) => {
            warn!(uri, error = %e, "Cache read failed, fetching from endpoint");
            None
        }
    }
}

/// The JSON payload of a response.
///
/// Non-success statuses are errors. An empty body, or a `null` payload,
/// is `None`. With an unwrap property only that top-level property is
/// returned.
fn decode_payload(response: &Response, config: &EndpointConfig, uri: &str) -> Result<Option<Value>> {
    if !response.is_success() {
        return Err(HttpClientError::Status {
            status: response.status().as_u16(),
            reason: response.reason(),
        });
    }
    if response.is_empty() {
        return Ok(None);
    }

    let document: Value = response.json()?;
    let payload = match &config.unwrap_property {
        Some(property) => {
            let unwrapped = match document {
                Value::Object(mut fields) => fields.remove(property),
                _ => None,
            };
            unwrapped.ok_or_else(|| HttpClientError::PropertyNotFound {
                property: property.clone(),
                endpoint: uri.to_string(),
            })?
        }
        None => document,
    };

    Ok((!payload.is_null()).then_some(payload))
}
