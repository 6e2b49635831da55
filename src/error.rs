//! Error types for the UseResponse client.
//!
//! This module defines `UseresponseError`, the unified error type used by
//! both the SSO login URL builder and the HTTP API client.
//!
//! HTTP failures are classified the way the UseResponse API reports them:
//! client errors (400, 401, 403, 404, 409, 429) and server errors (500,
//! 502, 503, 504). Use [`UseresponseError::is_client_error`] and
//! [`UseresponseError::is_server_error`] to branch on the class.
//!
//! # Security
//!
//! Response bodies may echo request parameters, including the `apiKey`.
//! Use `sanitize_message()` before logging anything that came from the wire.

use std::time::Duration;
use thiserror::Error;

/// Unified error type for all UseResponse operations.
#[derive(Error, Debug)]
pub enum UseresponseError {
    /// Configuration error - missing or invalid environment variables.
    #[error("configuration error: {0}")]
    Config(String),

    /// Input validation failed before any request was made.
    #[error("validation error: {0}")]
    Validation(String),

    /// The radix encoder was asked for a base outside `2..=36`.
    #[error("invalid base {base}: bases outside 2..=36 are not handled")]
    InvalidBase {
        /// The rejected base.
        base: u32,
    },

    /// HTTP request failed during transmission.
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// Request timed out.
    #[error("request timed out after {duration:?} - the server may be slow or unreachable")]
    Timeout {
        /// How long we waited before timing out.
        duration: Duration,
        /// The operation that timed out.
        operation: String,
    },

    /// HTTP 400: the API rejected the request parameters.
    #[error("invalid request: {body}")]
    InvalidRequest {
        /// Response body describing the problem.
        body: String,
    },

    /// HTTP 401: the API key is missing or invalid.
    #[error("authentication failed - check USERESPONSE_API_KEY")]
    Unauthenticated,

    /// HTTP 403: the API key is valid but lacks permission.
    #[error("not authorized to perform this operation")]
    Unauthorized,

    /// HTTP 404: the requested resource does not exist.
    #[error("resource not found: {path}")]
    NotFound {
        /// The API path that was requested.
        path: String,
    },

    /// HTTP 409: fulfilling the request would cause a resource conflict,
    /// such as a duplicate entry.
    #[error("operation conflict: {body}")]
    OperationConflict {
        /// Response body describing the conflict.
        body: String,
    },

    /// HTTP 429: rate limited by the server.
    #[error("rate limited by server - please wait before retrying")]
    RateLimited {
        /// Suggested retry delay, if provided by server.
        retry_after: Option<Duration>,
    },

    /// HTTP 500.
    #[error("internal server error: {body}")]
    InternalServer {
        /// Response body, possibly truncated.
        body: String,
    },

    /// HTTP 502/503/504: server temporarily unavailable.
    #[error("service temporarily unavailable ({status})")]
    ServiceUnavailable {
        /// The specific status code.
        status: reqwest::StatusCode,
    },

    /// Any other non-success status code.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// The HTTP status code returned.
        status: reqwest::StatusCode,
        /// The response body, potentially containing error details.
        body: String,
    },

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl UseresponseError {
    /// Creates a configuration error for a missing environment variable.
    pub fn missing_env(var_name: &str) -> Self {
        UseresponseError::Config(format!(
            "missing required environment variable: {}",
            var_name
        ))
    }

    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        UseresponseError::Config(message.into())
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        UseresponseError::Validation(message.into())
    }

    /// Creates a timeout error.
    pub fn timeout(duration: Duration, operation: impl Into<String>) -> Self {
        UseresponseError::Timeout {
            duration,
            operation: operation.into(),
        }
    }

    /// Returns the HTTP status this error was built from, if any.
    #[must_use]
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        use reqwest::StatusCode;

        match self {
            UseresponseError::InvalidRequest { .. } => Some(StatusCode::BAD_REQUEST),
            UseresponseError::Unauthenticated => Some(StatusCode::UNAUTHORIZED),
            UseresponseError::Unauthorized => Some(StatusCode::FORBIDDEN),
            UseresponseError::NotFound { .. } => Some(StatusCode::NOT_FOUND),
            UseresponseError::OperationConflict { .. } => Some(StatusCode::CONFLICT),
            UseresponseError::RateLimited { .. } => Some(StatusCode::TOO_MANY_REQUESTS),
            UseresponseError::InternalServer { .. } => Some(StatusCode::INTERNAL_SERVER_ERROR),
            UseresponseError::ServiceUnavailable { status }
            | UseresponseError::HttpStatus { status, .. } => Some(*status),
            UseresponseError::Http(e) => e.status(),
            _ => None,
        }
    }

    /// Returns true if the server rejected the request with a 4xx status.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| s.is_client_error())
    }

    /// Returns true if the server failed with a 5xx status.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| s.is_server_error())
    }

    /// Returns true if this error is transient and the operation should be retried.
    ///
    /// Retryable errors include:
    /// - Rate limiting (HTTP 429)
    /// - Service unavailable (HTTP 502, 503, 504)
    /// - Timeouts and connection failures
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            UseresponseError::RateLimited { .. } => true,
            UseresponseError::ServiceUnavailable { .. } => true,
            UseresponseError::Timeout { .. } => true,
            UseresponseError::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Returns true if this is a rate limit error, indicating we should back off.
    #[must_use]
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, UseresponseError::RateLimited { .. })
    }

    /// Returns the suggested delay before retry, if any.
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            UseresponseError::RateLimited { retry_after } => *retry_after,
            UseresponseError::ServiceUnavailable { .. } => Some(Duration::from_millis(500)),
            UseresponseError::Timeout { .. } => Some(Duration::from_millis(100)),
            _ => None,
        }
    }

    /// Replaces every occurrence of `secret` in `message` with `[REDACTED]`.
    ///
    /// Applies to API keys as well as SSO secrets.
    #[must_use]
    pub fn sanitize_message(message: &str, secret: &str) -> String {
        if secret.is_empty() {
            return message.to_string();
        }
        message.replace(secret, "[REDACTED]")
    }

    /// Creates a sanitized version of this error's display message.
    #[must_use]
    pub fn sanitized_display(&self, secret: &str) -> String {
        Self::sanitize_message(&self.to_string(), secret)
    }
}
