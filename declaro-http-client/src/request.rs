//! Request builder.

use crate::{HttpClient, HttpClientError, Response, Result};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;
use std::time::Duration;

/// HTTP request builder.
///
/// Invalid headers and unserializable bodies are reported when the request
/// is sent.
pub struct RequestBuilder<'a> {
    client: &'a HttpClient,
    method: Method,
    url: String,
    headers: HeaderMap,
    query: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    timeout: Option<Duration>,
    error: Option<HttpClientError>,
}

impl<'a> RequestBuilder<'a> {
    pub(crate) fn new(client: &'a HttpClient, method: Method, url: String) -> Self {
        Self {
            client,
            method,
            url,
            headers: HeaderMap::new(),
            query: Vec::new(),
            body: None,
            timeout: None,
            error: None,
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match (
            HeaderName::try_from(name.as_str()),
            HeaderValue::try_from(value.as_str()),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            _ => {
                self.error.get_or_insert(HttpClientError::RequestBuild(format!(
                    "invalid header '{}'",
                    name
                )));
            }
        }
        self
    }

    /// Add multiple headers to the request.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Add a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add multiple query parameters.
    pub fn queries<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in params {
            self.query.push((k.into(), v.into()));
        }
        self
    }

    /// Set the request body as raw bytes.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize + ?Sized>(mut self, json: &T) -> Self {
        match serde_json::to_vec(json) {
            Ok(bytes) => {
                self.headers.insert(
                    http::header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                );
                self.body = Some(bytes);
            }
            Err(e) => {
                self.error
                    .get_or_insert(HttpClientError::Json(e.to_string()));
            }
        }
        self
    }

    /// Set a custom timeout for this request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Resolve the URL against the client's base URL and append query
    /// parameters.
    ///
    /// Relative URLs resolve below the base URL's path, so a base of
    /// `http://host/v1` and `api/weather` give `http://host/v1/api/weather`.
    fn build_url(&self) -> Result<url::Url> {
        let mut url = match &self.client.config().base_url {
            Some(base) => {
                let mut base =
                    url::Url::parse(base).map_err(|e| HttpClientError::InvalidUrl(e.to_string()))?;
                if !base.path().ends_with('/') {
                    let path = format!("{}/", base.path());
                    base.set_path(&path);
                }
                base.join(&self.url)
                    .map_err(|e| HttpClientError::InvalidUrl(e.to_string()))?
            }
            None => url::Url::parse(&self.url)
                .map_err(|e| HttpClientError::InvalidUrl(format!("{} ('{}')", e, self.url)))?,
        };

        if !self.query.is_empty() {
            let mut query_pairs = url.query_pairs_mut();
            for (key, value) in &self.query {
                query_pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// The client's default headers with this request's headers replacing
    /// any of the same name.
    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (name, value) in &self.client.config().default_headers {
            let header_name = HeaderName::try_from(name.as_str()).map_err(|_| {
                HttpClientError::RequestBuild(format!("invalid default header '{}'", name))
            })?;
            let header_value = HeaderValue::try_from(value.as_str()).map_err(|_| {
                HttpClientError::RequestBuild(format!("invalid default header '{}'", name))
            })?;
            headers.append(header_name, header_value);
        }

        for name in self.headers.keys() {
            headers.remove(name);
        }
        for (name, value) in &self.headers {
            headers.append(name.clone(), value.clone());
        }
        Ok(headers)
    }

    /// Send the request.
    pub async fn send(mut self) -> Result<Response> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }
        let url = self.build_url()?;

        let headers = self.build_headers()?;

        let mut request = self
            .client
            .inner()
            .request(self.method.clone(), url)
            .headers(headers);

        if let Some(body) = self.body {
            request = request.body(body);
        }

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        self.client.execute(request.build()?).await
    }
}
