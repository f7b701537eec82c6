//! End-to-end workflows through the `declaro` facade.
//!
//! Endpoints come from manifests, the service comes from the container, and
//! a mock server stands in for the weather API.

use declaro::prelude::*;
use serde::{Deserialize, Serialize};
use std::io::Write;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WeatherResponse {
    celsius: i32,
    city: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
struct WeatherRequest {
    city: Option<String>,
    date: Option<String>,
}

request_arguments!(WeatherRequest {
    0 => city,
    1 => date,
});

impl WeatherRequest {
    fn budapest() -> Self {
        Self {
            city: Some("Budapest".into()),
            date: Some("2023-09-22".into()),
        }
    }
}

const WEATHER_MANIFEST: &str = r#"
[[weather]]
endpoint = "api/weather"
headers = { "X-Api-Version" = "2" }
authorization = { scheme = "Bearer", token = "secret" }

[[weather]]
verb = "get"
endpoint = "api/weather?City={0}&Date={1}"
arguments = ["city", "date"]
cache_time = "00:00:03.000"

[[weather-request]]
verb = "delete"
endpoint = "api/weather"
arguments = ["city", "date"]
"#;

fn registry(manifest: &EndpointManifest) -> EndpointRegistry {
    EndpointRegistry::builder()
        .register_manifest::<WeatherResponse>(manifest, "weather")
        .unwrap()
        .register_manifest::<WeatherRequest>(manifest, "weather-request")
        .unwrap()
        .build()
        .unwrap()
}

fn container_service(server: &MockServer, registry: EndpointRegistry) -> Arc<HttpService> {
    let container = Container::new();
    container.register(InMemoryCache::new());

    let base_url = server.uri();
    add_http_service_with(&container, Arc::new(registry), move |config| {
        config.base_url(base_url.clone())
    })
    .unwrap();

    container.resolve::<HttpService>().unwrap()
}

#[tokio::test]
async fn test_manifest_driven_get_is_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .and(query_param("City", "Budapest"))
        .and(query_param("Date", "2023-09-22"))
        .and(header("Authorization", "Bearer secret"))
        .and(header("X-Api-Version", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "Celsius": 24, "City": "Budapest" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let manifest = EndpointManifest::from_toml_str(WEATHER_MANIFEST).unwrap();
    let service = container_service(&server, registry(&manifest));
    assert!(service.caching_enabled());
    assert!(service.registry().has_cached_endpoints());

    for _ in 0..3 {
        let weather: WeatherResponse = service
            .get_with_request(&WeatherRequest::budapest(), &[])
            .await
            .unwrap();
        assert_eq!(weather.celsius, 24);
    }
}

#[tokio::test]
async fn test_manifest_driven_delete() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/weather"))
        .and(query_param("force", "true"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let manifest = EndpointManifest::from_toml_str(WEATHER_MANIFEST).unwrap();
    let service = container_service(&server, registry(&manifest));

    service
        .delete(&WeatherRequest::budapest(), &[("force", "true")])
        .await
        .unwrap();
}

#[tokio::test]
async fn test_post_inherits_default_configuration() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/weather"))
        .and(header("Authorization", "Bearer secret"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "Celsius": 19, "City": "Budapest" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let manifest = EndpointManifest::from_toml_str(WEATHER_MANIFEST).unwrap();
    let service = container_service(&server, registry(&manifest));

    let created: Option<WeatherResponse> = service
        .post(&WeatherRequest::budapest(), &[])
        .await
        .unwrap();
    assert_eq!(created.map(|w| w.celsius), Some(19));
}

#[tokio::test]
async fn test_json_manifest_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/weather/Budapest"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "Celsius": 12, "City": "Budapest" }
            })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"{{
            "weather": [
                {{ "verb": "get", "endpoint": "api/weather/{{0}}", "arguments": ["city"], "unwrap": "data" }}
            ]
        }}"#
    )
    .unwrap();

    let manifest = EndpointManifest::load_file(file.path()).unwrap();
    let registry = EndpointRegistry::builder()
        .register_manifest::<WeatherResponse>(&manifest, "weather")
        .unwrap()
        .build()
        .unwrap();
    let service = container_service(&server, registry);

    let weather: WeatherResponse = service
        .get_with_arguments(&["Budapest"], &[])
        .await
        .unwrap();
    assert_eq!(weather.celsius, 12);
}

#[test]
fn test_missing_manifest_group() {
    let manifest = EndpointManifest::from_toml_str(WEATHER_MANIFEST).unwrap();
    let err = EndpointRegistry::builder()
        .register_manifest::<WeatherResponse>(&manifest, "forecast")
        .unwrap_err();
    assert!(matches!(err, declaro::Error::Manifest(_)));
}

#[tokio::test]
async fn test_unregistered_type_is_configuration_error() {
    let server = MockServer::start().await;
    let manifest = EndpointManifest::from_toml_str(WEATHER_MANIFEST).unwrap();
    let service = container_service(&server, registry(&manifest));

    #[derive(Debug, Deserialize)]
    struct Forecast;

    let err = service.get::<Forecast>(&[]).await.unwrap_err();
    assert!(matches!(
        err,
        HttpClientError::Config(declaro::Error::MissingConfiguration { .. })
    ));
}
