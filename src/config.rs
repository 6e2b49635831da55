//! Configuration loading for the UseResponse client.
//!
//! Two configurations exist: [`Config`] for the HTTP API (domain + API key)
//! and [`SsoConfig`] for building single-sign-on login URLs (domain + shared
//! secret + source). Both are loaded from environment variables, with
//! validation to ensure required values are present.

use std::env;
use std::fmt;

use crate::error::UseresponseError;

/// Environment variable holding the UseResponse base URL.
pub const DOMAIN_ENV: &str = "USERESPONSE_DOMAIN";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "USERESPONSE_API_KEY";

/// Environment variable holding the SSO shared secret.
pub const SSO_SECRET_ENV: &str = "USERESPONSE_SSO_SECRET";

/// Environment variable holding the SSO source identifier.
pub const SSO_SOURCE_ENV: &str = "USERESPONSE_SSO_SOURCE";

/// Configuration for the UseResponse HTTP API.
///
/// The API key is stored but never logged; `Debug` redacts it.
#[derive(Clone)]
pub struct Config {
    /// Base URL of the UseResponse instance (e.g., `https://support.example.com`).
    pub domain: String,

    api_key: String,
}

impl Config {
    /// Creates a configuration from explicit values, applying the same
    /// validation as [`Config::from_env`].
    pub fn new(domain: impl Into<String>, api_key: impl Into<String>) -> Result<Self, UseresponseError> {
        let domain = validate_domain(domain.into(), DOMAIN_ENV)?;
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(UseresponseError::missing_env(API_KEY_ENV));
        }
        Self::validate_api_key(&api_key)?;

        Ok(Config { domain, api_key })
    }

    /// Loads configuration from environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `USERESPONSE_DOMAIN`: The base URL of the UseResponse instance
    /// - `USERESPONSE_API_KEY`: The API key sent as `apiKey`
    ///
    /// # Errors
    ///
    /// Returns `UseresponseError::Config` if any required variable is missing
    /// or if values fail validation.
    pub fn from_env() -> Result<Self, UseresponseError> {
        let domain = get_required_env(DOMAIN_ENV)?;
        let api_key = get_required_env(API_KEY_ENV)?;
        Self::new(domain, api_key)
    }

    /// Returns the API key.
    ///
    /// Only the transport should read this; never log it.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Validates the API key is not a placeholder value.
    fn validate_api_key(key: &str) -> Result<(), UseresponseError> {
        let key_lower = key.to_lowercase();
        let placeholder_patterns = [
            "your_api_key",
            "your_key",
            "placeholder",
            "xxx",
            "changeme",
        ];

        for pattern in placeholder_patterns {
            if key_lower.contains(pattern) {
                return Err(UseresponseError::invalid_config(format!(
                    "{} appears to be a placeholder value",
                    API_KEY_ENV
                )));
            }
        }

        Ok(())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("domain", &self.domain)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Configuration for building SSO login URLs.
#[derive(Clone)]
pub struct SsoConfig {
    /// Base URL of the UseResponse instance.
    pub domain: String,

    /// Identifier of the system users are signing in from.
    pub source: String,

    secret: String,
}

impl SsoConfig {
    /// Creates an SSO configuration from explicit values.
    pub fn new(
        domain: impl Into<String>,
        secret: impl Into<String>,
        source: impl Into<String>,
    ) -> Result<Self, UseresponseError> {
        let domain = validate_domain(domain.into(), DOMAIN_ENV)?;
        let secret = secret.into();
        if secret.is_empty() {
            return Err(UseresponseError::missing_env(SSO_SECRET_ENV));
        }

        Ok(SsoConfig {
            domain,
            source: source.into(),
            secret,
        })
    }

    /// Loads SSO configuration from environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `USERESPONSE_DOMAIN`
    /// - `USERESPONSE_SSO_SECRET`: shared secret from the UseResponse SSO settings
    /// - `USERESPONSE_SSO_SOURCE`: identifier of the origin system
    pub fn from_env() -> Result<Self, UseresponseError> {
        let domain = get_required_env(DOMAIN_ENV)?;
        let secret = get_required_env(SSO_SECRET_ENV)?;
        let source = get_required_env(SSO_SOURCE_ENV)?;
        Self::new(domain, secret, source)
    }

    /// Returns the shared secret.
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for SsoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SsoConfig")
            .field("domain", &self.domain)
            .field("source", &self.source)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Gets a required environment variable, returning an error if missing or empty.
pub fn get_required_env(name: &str) -> Result<String, UseresponseError> {
    env::var(name)
        .map_err(|_| UseresponseError::missing_env(name))
        .and_then(|value| {
            if value.trim().is_empty() {
                Err(UseresponseError::missing_env(name))
            } else {
                Ok(value)
            }
        })
}

/// Validates and normalizes a base URL.
fn validate_domain(url: String, var_name: &str) -> Result<String, UseresponseError> {
    let url = url.trim().trim_end_matches('/').to_string();

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(UseresponseError::invalid_config(format!(
            "{} must start with http:// or https://",
            var_name
        )));
    }

    url::Url::parse(&url).map_err(|e| {
        UseresponseError::invalid_config(format!("{} is not a valid URL: {}", var_name, e))
    })?;

    Ok(url)
}
