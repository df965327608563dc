//! HTTP request executor for the Addons.io API.
//!
//! Handles URL construction, header injection (API version, bearer token,
//! caller overrides), JSON bodies, timeouts, and status classification.
//! Every resource operation funnels through [`ApiClient::request`].

use std::time::Duration;

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT,
};
use reqwest::{Client, Method, Response};
use serde_json::Value;
use tracing::{debug, info, warn};

use addons_core::config::ClientConfig;
use addons_core::constants;
use addons_core::error::{AddonsError, AddonsResult};

/// Per-call options for [`ApiClient::request`].
#[derive(Debug, Clone, Default)]
pub struct RequestOptions<'a> {
    /// JSON body. POST and PATCH send `{}` when unset.
    pub body: Option<Value>,
    /// Query parameters, form-urlencoded onto the URL.
    pub query: Vec<(String, String)>,
    /// Replaces the configured base URL for this call (callback URLs).
    pub base_url: Option<&'a str>,
}

impl<'a> RequestOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn base_url(mut self, base_url: &'a str) -> Self {
        self.base_url = Some(base_url);
        self
    }
}

/// HTTP client for the Addons.io API.
///
/// Wraps `reqwest::Client` with the fixed API headers, optional bearer
/// authentication and the configured timeout. Immutable once built.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Client,
    /// API root, e.g. "https://api.addons.io/".
    base_url: String,
    /// Fixed headers, then Authorization, then caller overrides.
    headers: HeaderMap,
    /// Request timeout.
    timeout: Duration,
    /// Accepted but not yet used by any request.
    auto_paginate: bool,
}

impl ApiClient {
    /// Create a new ApiClient from a client configuration.
    ///
    /// No network I/O happens here.
    pub fn new(config: &ClientConfig) -> AddonsResult<Self> {
        let timeout = config.effective_timeout();

        let inner = Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| AddonsError::Config(format!("failed to build HTTP client: {e}")))?;

        let headers = build_headers(config)?;
        let base_url = config.effective_base_url().to_string();

        info!(
            "addons api client ready (base_url={base_url}, authenticated={})",
            config.token.is_some()
        );

        Ok(Self {
            inner,
            base_url,
            headers,
            timeout,
            auto_paginate: config.effective_auto_paginate(),
        })
    }

    /// Get the configured API root.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the headers sent with every request.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Pagination is not implemented; this only reports the configured flag.
    pub fn auto_paginate(&self) -> bool {
        self.auto_paginate
    }

    /// Execute one request and parse the JSON response.
    ///
    /// A 2xx response yields the parsed body (`Value::Null` when empty).
    /// Any other status becomes an error carrying the status and body.
    /// Nothing is retried.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions<'_>,
    ) -> AddonsResult<Value> {
        let base_url = options.base_url.unwrap_or(&self.base_url);
        let url = build_url(base_url, path, &options.query);
        debug!("{} {}", method, url);

        let mut builder = self
            .inner
            .request(method.clone(), &url)
            .headers(self.headers.clone())
            .timeout(self.timeout);

        if sends_body(&method) {
            let payload = match options.body {
                Some(Value::Null) | None => "{}".to_string(),
                Some(ref body) => serde_json::to_string(body)?,
            };
            builder = builder.body(payload);
        }

        let response = builder.send().await.map_err(|e| {
            let err = classify_error(e);
            warn!("{} {} failed: {}", method, url, err);
            err
        })?;

        let result = Self::parse_response(response).await;
        if let Err(ref err) = result {
            warn!("{} {} failed: {}", method, url, err);
        }
        result
    }

    // --- Convenience wrappers ---

    /// Execute a GET request.
    pub async fn get(&self, path: &str) -> AddonsResult<Value> {
        self.request(Method::GET, path, RequestOptions::new()).await
    }

    /// Execute a POST request with a JSON body.
    pub async fn post(&self, path: &str, body: Value) -> AddonsResult<Value> {
        self.request(Method::POST, path, RequestOptions::new().body(body))
            .await
    }

    /// Execute a PATCH request with a JSON body.
    pub async fn patch(&self, path: &str, body: Value) -> AddonsResult<Value> {
        self.request(Method::PATCH, path, RequestOptions::new().body(body))
            .await
    }

    /// Execute a DELETE request.
    pub async fn delete(&self, path: &str) -> AddonsResult<Value> {
        self.request(Method::DELETE, path, RequestOptions::new()).await
    }

    /// Check the status and parse the body.
    async fn parse_response(response: Response) -> AddonsResult<Value> {
        let status = response.status();
        let text = response.text().await.map_err(classify_error)?;

        if status.is_success() {
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_str(&text)
                .map_err(|e| AddonsError::Serialization(format!("failed to parse response: {e}")));
        }

        let status_code = status.as_u16();
        let body = error_body(&text);

        if status.is_client_error() {
            Err(AddonsError::ClientRequest {
                status: status_code,
                body,
            })
        } else if status.is_server_error() {
            Err(AddonsError::ServerError {
                status: status_code,
                body,
            })
        } else {
            Err(AddonsError::UnexpectedStatus {
                status: status_code,
                body,
            })
        }
    }
}

/// Join a base URL, a relative path and a query map.
///
/// Exactly one trailing `/` is removed from `base_url` before joining with
/// `/`. A non-empty query is appended with `&` if the URL already contains a
/// `?`, otherwise with `?`.
pub fn build_url<K, V>(base_url: &str, path: &str, query: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    let mut url = format!("{base}/{path}");

    let query_string = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(query.iter())
        .finish();

    if !query_string.is_empty() {
        let separator = if url.contains('?') { '&' } else { '?' };
        url.push(separator);
        url.push_str(&query_string);
    }
    url
}

/// Assemble the request headers in precedence order.
fn build_headers(config: &ClientConfig) -> AddonsResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header_name(constants::API_VERSION_HEADER)?,
        HeaderValue::from_static(constants::API_VERSION),
    );
    headers.insert(ACCEPT, HeaderValue::from_static(constants::JSON_CONTENT_TYPE));
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static(constants::JSON_CONTENT_TYPE),
    );
    headers.insert(USER_AGENT, header_value(&constants::user_agent())?);

    if let Some(token) = &config.token {
        let mut value = header_value(&format!("Bearer {token}"))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    for (name, value) in &config.headers {
        headers.insert(header_name(name)?, header_value(value)?);
    }
    Ok(headers)
}

fn header_name(name: &str) -> AddonsResult<HeaderName> {
    HeaderName::try_from(name)
        .map_err(|e| AddonsError::Config(format!("invalid header name {name:?}: {e}")))
}

fn header_value(value: &str) -> AddonsResult<HeaderValue> {
    HeaderValue::try_from(value)
        .map_err(|e| AddonsError::Config(format!("invalid header value: {e}")))
}

fn sends_body(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PATCH
}

/// Error bodies are kept as JSON when they parse, else as a JSON string.
fn error_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Classify a reqwest error into an AddonsError variant.
fn classify_error(e: reqwest::Error) -> AddonsError {
    if e.is_timeout() {
        AddonsError::Timeout(e.to_string())
    } else if e.is_builder() {
        AddonsError::Config(format!("invalid request: {e}"))
    } else if e.is_connect() {
        AddonsError::Http(format!("connection failed: {e}"))
    } else {
        AddonsError::Http(e.to_string())
    }
}
