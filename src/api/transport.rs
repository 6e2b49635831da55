//! HTTP transport for the UseResponse API.
//!
//! Every call goes to `{domain}/api/4.0{path}` and carries the API key as
//! the `apiKey` parameter: in the query string for GET and DELETE, in the
//! form body for POST and PUT.
//!
//! # Retry Logic
//!
//! The transport automatically retries transient failures:
//! - HTTP 429 (rate limit): Exponential backoff starting at 100ms
//! - HTTP 502/503/504: Retry after 500ms
//! - Timeouts and connection failures: Retry after 100ms
//!
//! POST is not idempotent, so creates are only retried on HTTP 429, where
//! the server rejected the request before processing it. Other client and
//! server errors are never retried.
//!
//! # Security
//!
//! The API key is never logged. URLs are stripped from transport errors
//! because they contain the key, and response bodies are sanitized.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde_json::Value;

use crate::config::Config;
use crate::error::UseresponseError;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Path prefix of the UseResponse REST API.
const API_PATH: &str = "/api/4.0";

/// Name of the authentication parameter.
const API_KEY_PARAM: &str = "apiKey";

/// Maximum number of attempts for transient failures.
const MAX_RETRY_ATTEMPTS: u32 = 3;

/// Initial delay for exponential backoff (milliseconds).
const INITIAL_BACKOFF_MS: u64 = 100;

/// Delay before retrying after a gateway error (milliseconds).
const SERVER_ERROR_DELAY_MS: u64 = 500;

/// Maximum length kept from HTTP error response bodies.
const MAX_ERROR_BODY_LEN: usize = 500;

/// Authenticated HTTP access to the UseResponse API.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone)]
pub struct Transport {
    http: Client,

    timeout: Duration,

    /// API root, e.g. `https://support.example.com/api/4.0`.
    base_url: String,

    /// SECURITY: Never log this value!
    api_key: String,
}

impl Transport {
    /// Creates a transport from configuration with the default 30s timeout.
    ///
    /// # Errors
    ///
    /// Returns `UseresponseError::HttpClient` if the HTTP client fails to initialize.
    pub fn new(config: &Config) -> Result<Self, UseresponseError> {
        Self::with_timeout(config, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a transport whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `UseresponseError::HttpClient` if the HTTP client fails to initialize.
    pub fn with_timeout(config: &Config, timeout: Duration) -> Result<Self, UseresponseError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(UseresponseError::HttpClient)?;

        Ok(Self {
            http,
            timeout,
            base_url: Self::normalize_base_url(&config.domain),
            api_key: config.api_key().to_string(),
        })
    }

    /// Appends the API path to the domain.
    fn normalize_base_url(domain: &str) -> String {
        format!("{}{}", domain.trim_end_matches('/'), API_PATH)
    }

    /// Returns the full URL for an API path such as `/users/1.json`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Makes a GET request with query parameters.
    pub async fn get(&self, path: &str, params: &[(String, String)]) -> Result<Value, UseresponseError> {
        self.request(Method::GET, path, params, true).await
    }

    /// Makes a POST request with a form body.
    ///
    /// Only rate-limit rejections are retried.
    pub async fn post(&self, path: &str, body: &[(String, String)]) -> Result<Value, UseresponseError> {
        self.request(Method::POST, path, body, false).await
    }

    /// Makes a PUT request with a form body.
    pub async fn put(&self, path: &str, body: &[(String, String)]) -> Result<Value, UseresponseError> {
        self.request(Method::PUT, path, body, true).await
    }

    /// Makes a DELETE request.
    pub async fn delete(&self, path: &str) -> Result<Value, UseresponseError> {
        self.request(Method::DELETE, path, &[], true).await
    }

    /// Makes a request with automatic retry for transient failures.
    async fn request(
        &self,
        method: Method,
        path: &str,
        params: &[(String, String)],
        idempotent: bool,
    ) -> Result<Value, UseresponseError> {
        let operation = format!("{} {}", method, path);
        self.with_retry(&operation, idempotent, || {
            self.request_inner(method.clone(), path, params)
        })
        .await
    }

    /// Executes an operation, retrying transient failures.
    ///
    /// A non-idempotent operation is retried only when rate limited.
    async fn with_retry<T, F, Fut>(
        &self,
        operation: &str,
        idempotent: bool,
        f: F,
    ) -> Result<T, UseresponseError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, UseresponseError>>,
    {
        let mut delay = Duration::from_millis(INITIAL_BACKOFF_MS);
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            match f().await {
                Ok(result) => return Ok(result),
                Err(e)
                    if e.is_retryable()
                        && (idempotent || e.is_rate_limit())
                        && attempts < MAX_RETRY_ATTEMPTS =>
                {
                    let actual_delay = if e.is_rate_limit() {
                        e.retry_after().unwrap_or(delay)
                    } else if matches!(e, UseresponseError::ServiceUnavailable { .. }) {
                        Duration::from_millis(SERVER_ERROR_DELAY_MS)
                    } else {
                        e.retry_after().unwrap_or(delay)
                    };

                    tracing::debug!(
                        operation = operation,
                        attempt = attempts,
                        max_attempts = MAX_RETRY_ATTEMPTS,
                        delay_ms = actual_delay.as_millis() as u64,
                        error = %e.sanitized_display(&self.api_key),
                        "Retrying after transient error"
                    );

                    tokio::time::sleep(actual_delay).await;

                    if e.is_rate_limit() {
                        delay *= 2;
                    }
                }
                Err(e) => {
                    if attempts > 1 {
                        tracing::debug!(
                            operation = operation,
                            attempts = attempts,
                            "All retry attempts exhausted"
                        );
                    }
                    return Err(e);
                }
            }
        }
    }

    /// Makes a single request without retry logic.
    async fn request_inner(
        &self,
        method: Method,
        path: &str,
        params: &[(String, String)],
    ) -> Result<Value, UseresponseError> {
        tracing::debug!(method = %method, path = %path, "Making UseResponse API request");

        let mut pairs: Vec<(&str, &str)> = params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        pairs.push((API_KEY_PARAM, self.api_key.as_str()));

        let req = self
            .http
            .request(method.clone(), self.url(path))
            .header("Accept", "application/json");
        let req = match method {
            Method::GET | Method::DELETE => req.query(&pairs),
            _ => req.form(&pairs),
        };

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                return UseresponseError::timeout(self.timeout, format!("{} {}", method, path));
            }
            UseresponseError::Http(e.without_url())
        })?;
        let status = response.status();

        if !status.is_success() {
            return Err(self.handle_http_error(status, path, response).await);
        }

        let body = response
            .text()
            .await
            .map_err(|e| UseresponseError::Http(e.without_url()))?;

        tracing::trace!(body = %body, "UseResponse API response");

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Classifies a non-success response.
    async fn handle_http_error(
        &self,
        status: StatusCode,
        path: &str,
        response: reqwest::Response,
    ) -> UseresponseError {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs);

        let body = response.text().await.unwrap_or_default();
        let body = UseresponseError::sanitize_message(&body, &self.api_key);
        let body = truncate_body(body);

        match status {
            StatusCode::BAD_REQUEST => UseresponseError::InvalidRequest { body },
            StatusCode::UNAUTHORIZED => UseresponseError::Unauthenticated,
            StatusCode::FORBIDDEN => UseresponseError::Unauthorized,
            StatusCode::NOT_FOUND => UseresponseError::NotFound {
                path: path.to_string(),
            },
            StatusCode::CONFLICT => UseresponseError::OperationConflict { body },
            StatusCode::TOO_MANY_REQUESTS => {
                tracing::warn!("Rate limited by UseResponse server");
                UseresponseError::RateLimited { retry_after }
            }
            StatusCode::INTERNAL_SERVER_ERROR => UseresponseError::InternalServer { body },
            StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT => {
                tracing::warn!(status = %status, "UseResponse server temporarily unavailable");
                UseresponseError::ServiceUnavailable { status }
            }
            _ => UseresponseError::HttpStatus { status, body },
        }
    }
}

/// Truncates a body to `MAX_ERROR_BODY_LEN` bytes on a char boundary.
fn truncate_body(body: String) -> String {
    if body.len() <= MAX_ERROR_BODY_LEN {
        return body;
    }
    let mut end = MAX_ERROR_BODY_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}
