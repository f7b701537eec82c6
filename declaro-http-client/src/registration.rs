//! Registering the dispatch service in a [`Container`].

use crate::{DefaultHttpClientFactory, HttpClientConfigBuilder, HttpService, Result};
use declaro_cache::{CacheStore, InMemoryCache};
use declaro_core::{Container, EndpointRegistry};
use std::sync::Arc;
use tracing::info;

/// Register an [`HttpService`] backed by a [`DefaultHttpClientFactory`] with
/// default client settings.
///
/// An [`InMemoryCache`] already registered in the container becomes the
/// service's cache store; without one the service runs uncached.
///
/// The default client has no base URL, so relative endpoints fail with
/// [`HttpClientError::InvalidUrl`](crate::HttpClientError::InvalidUrl) until
/// one is configured through [`add_http_service_with`].
pub fn add_http_service(
    container: &Container,
    registry: Arc<EndpointRegistry>,
) -> Result<Arc<HttpService>> {
    register(container, registry, DefaultHttpClientFactory::new())
}

/// Like [`add_http_service`], with `configure` applied to the client
/// configuration.
///
/// ```
/// use declaro_core::{Container, EndpointRegistry};
/// use declaro_http_client::{add_http_service_with, HttpService};
/// use std::sync::Arc;
///
/// let container = Container::new();
/// let registry = Arc::new(EndpointRegistry::builder().build().unwrap());
///
/// add_http_service_with(&container, registry, |config| {
///     config.base_url("http://127.0.0.1:8080/")
/// })
/// .unwrap();
///
/// let service = container.resolve::<HttpService>().unwrap();
/// assert!(!service.caching_enabled());
/// ```
pub fn add_http_service_with<F>(
    container: &Container,
    registry: Arc<EndpointRegistry>,
    configure: F,
) -> Result<Arc<HttpService>>
where
    F: Fn(HttpClientConfigBuilder) -> HttpClientConfigBuilder + Send + Sync + 'static,
{
    register(
        container,
        registry,
        DefaultHttpClientFactory::new().configure(configure),
    )
}

fn register(
    container: &Container,
    registry: Arc<EndpointRegistry>,
    factory: DefaultHttpClientFactory,
) -> Result<Arc<HttpService>> {
    let cache = container
        .try_resolve::<InMemoryCache>()
        .map(|cache| cache as Arc<dyn CacheStore>);

    let service = Arc::new(HttpService::new(&factory, cache, registry.clone())?);

    container.register_arc(registry);
    container.register(factory);
    container.register_arc(service.clone());

    info!(
        caching = service.caching_enabled(),
        response_types = service.registry().len(),
        "HTTP service registered"
    );
    Ok(service)
}
