//! GET dispatch against a mock weather API.

mod common;

use common::*;
use declaro_core::Error as ConfigError;
use declaro_http_client::HttpClientError;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_budapest(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .and(query_param("City", BUDAPEST))
        .and(query_param("Date", DATE))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather(24, BUDAPEST)))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_get_with_request_fills_placeholders() {
    let server = MockServer::start().await;
    mount_budapest(&server).await;
    let service = service(&server);

    let weather: WeatherResponse = service
        .get_with_request(&WeatherRequest::budapest(), &[])
        .await
        .unwrap();

    assert_eq!(weather.celsius, 24);
    assert_eq!(weather.city, BUDAPEST);
}

#[tokio::test]
async fn test_get_with_arguments_fills_placeholders() {
    let server = MockServer::start().await;
    mount_budapest(&server).await;
    let service = service(&server);

    let weather: WeatherResponse = service
        .get_with_arguments(&[BUDAPEST, DATE], &[])
        .await
        .unwrap();

    assert_eq!(weather.city, BUDAPEST);
}

#[tokio::test]
async fn test_get_self_bound_response_type() {
    let server = MockServer::start().await;
    mount_budapest(&server).await;
    let service = service(&server);

    let request = WeatherRequestResponse {
        city: Some(BUDAPEST.into()),
        date: Some(DATE.into()),
        ..Default::default()
    };
    let weather: WeatherRequestResponse = service.get_with_request(&request, &[]).await.unwrap();

    assert_eq!(weather.celsius, 24);
    assert_eq!(weather.city.as_deref(), Some(BUDAPEST));
}

#[tokio::test]
async fn test_get_appends_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .and(query_param("City", BUDAPEST))
        .and(query_param("Date", DATE))
        .and(query_param("District", "13"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather(22, BUDAPEST)))
        .expect(1)
        .mount(&server)
        .await;
    let service = service(&server);

    let weather: WeatherResponse = service
        .get_with_request(&WeatherRequest::budapest(), &[("District", "13")])
        .await
        .unwrap();

    assert_eq!(weather.celsius, 22);
}

#[tokio::test]
async fn test_get_missing_argument_is_format_error() {
    let server = MockServer::start().await;
    let service = service(&server);

    let request = WeatherRequest {
        city: Some(BUDAPEST.into()),
        date: None,
    };
    let err = service
        .get_with_request::<WeatherResponse, _>(&request, &[])
        .await
        .unwrap_err();

    assert!(err.is_format_error());
    assert!(matches!(
        err,
        HttpClientError::Config(ConfigError::FormatMismatch {
            expected: 2,
            actual: 1,
            ..
        })
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_without_arguments_on_bound_endpoint_is_format_error() {
    let server = MockServer::start().await;
    let service = service(&server);

    let err = service.get::<WeatherResponse>(&[]).await.unwrap_err();
    assert!(err.is_format_error());

    let err = service
        .get_with_arguments::<WeatherResponse, _>(&[BUDAPEST], &[])
        .await
        .unwrap_err();
    assert!(err.is_format_error());
}

#[tokio::test]
async fn test_get_unregistered_type_fails() {
    #[derive(Debug, serde::Deserialize)]
    struct Unregistered;

    let server = MockServer::start().await;
    let service = service(&server);

    let err = service.get::<Unregistered>(&[]).await.unwrap_err();
    assert!(matches!(
        err,
        HttpClientError::Config(ConfigError::MissingConfiguration { .. })
    ));
}

#[tokio::test]
async fn test_get_empty_body_is_null_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    let service = service(&server);

    let err = service
        .get_with_request::<WeatherResponse, _>(&WeatherRequest::budapest(), &[])
        .await
        .unwrap_err();

    match err {
        HttpClientError::NullResponse { endpoint, .. } => {
            assert_eq!(endpoint, "api/weather?City=Budapest&Date=2023-09-22");
        }
        other => panic!("expected NullResponse, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_json_null_is_null_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;
    let service = service(&server);

    let err = service
        .get_with_request::<WeatherResponse, _>(&WeatherRequest::budapest(), &[])
        .await
        .unwrap_err();

    assert!(matches!(err, HttpClientError::NullResponse { .. }));
}

#[tokio::test]
async fn test_get_malformed_body_is_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"Celsius\":"))
        .mount(&server)
        .await;
    let service = service(&server);

    let err = service
        .get_with_request::<WeatherResponse, _>(&WeatherRequest::budapest(), &[])
        .await
        .unwrap_err();

    assert!(matches!(err, HttpClientError::Json(_)));
}
