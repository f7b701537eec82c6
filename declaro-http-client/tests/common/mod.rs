//! Shared weather API fixtures.

#![allow(dead_code)]

use declaro_cache::{CacheStore, InMemoryCache};
use declaro_core::{request_arguments, Authorization, EndpointConfig, EndpointRegistry};
use declaro_http_client::{DefaultHttpClientFactory, HttpService};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use wiremock::MockServer;

pub const BUDAPEST: &str = "Budapest";
pub const DATE: &str = "2023-09-22";
pub const FORECAST_TOKEN: &str = "forecast-token";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WeatherResponse {
    pub celsius: i32,
    pub city: String,
}

/// Same payload as [`WeatherResponse`], cached for three seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WeatherCached {
    pub celsius: i32,
    pub city: String,
}

/// Cached long enough for a test to watch it expire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WeatherShortLived {
    pub celsius: i32,
    pub city: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WeatherRequest {
    pub city: Option<String>,
    pub date: Option<String>,
}

request_arguments!(WeatherRequest {
    0 => city,
    1 => date,
});

/// Response type that carries its own request arguments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WeatherRequestResponse {
    pub celsius: i32,
    pub city: Option<String>,
    pub date: Option<String>,
}

request_arguments!(WeatherRequestResponse {
    0 => city,
    1 => date,
});

/// Served wrapped in a `cityData` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityData {
    pub city: String,
    pub country: String,
}

/// Served only with a bearer token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub summary: String,
}

impl WeatherRequest {
    pub fn budapest() -> Self {
        Self {
            city: Some(BUDAPEST.to_string()),
            date: Some(DATE.to_string()),
        }
    }
}

pub fn registry() -> EndpointRegistry {
    const WEATHER_BY_CITY: &str = "api/weather?City={0}&Date={1}";

    EndpointRegistry::builder()
        .register::<WeatherResponse>(EndpointConfig::default_for("api/weather"))
        .register_with_request::<WeatherResponse, WeatherRequest>(EndpointConfig::get(
            WEATHER_BY_CITY,
        ))
        .register_with_request::<WeatherResponse, WeatherRequest>(EndpointConfig::patch(
            "api/weather/{0}?Date={1}",
        ))
        .register::<WeatherCached>(EndpointConfig::default_for("api/weather"))
        .register_with_request::<WeatherCached, WeatherRequest>(
            EndpointConfig::get(WEATHER_BY_CITY).with_cache_time("00:00:03.000"),
        )
        .register::<WeatherCached>(
            EndpointConfig::list("api/weather/search").with_cache_time("00:00:03"),
        )
        .register_with_request::<WeatherShortLived, WeatherRequest>(
            EndpointConfig::get(WEATHER_BY_CITY).with_cache_duration(Duration::from_millis(200)),
        )
        .register_bound::<WeatherRequest>(EndpointConfig::delete("api/weather"))
        .register::<WeatherRequestResponse>(EndpointConfig::default_for("api/weather"))
        .register_bound::<WeatherRequestResponse>(EndpointConfig::get(WEATHER_BY_CITY))
        .register::<CityData>(EndpointConfig::get("api/city").with_unwrap_property("cityData"))
        .register::<Forecast>(
            EndpointConfig::get("api/forecast")
                .with_header("X-Client", "declaro-tests")
                .with_authorization(Authorization::bearer(FORECAST_TOKEN)),
        )
        .build()
        .expect("test registry is valid")
}

/// A service talking to `server` with an in-memory cache.
pub fn service(server: &MockServer) -> HttpService {
    let cache: Arc<dyn CacheStore> = Arc::new(InMemoryCache::new());
    service_with_cache(server, Some(cache))
}

pub fn service_with_cache(server: &MockServer, cache: Option<Arc<dyn CacheStore>>) -> HttpService {
    let base_url = server.uri();
    let factory =
        DefaultHttpClientFactory::new().configure(move |config| config.base_url(base_url.clone()));

    HttpService::new(&factory, cache, Arc::new(registry())).expect("service builds")
}

pub fn weather(celsius: i32, city: &str) -> serde_json::Value {
    serde_json::json!({ "Celsius": celsius, "City": city })
}
