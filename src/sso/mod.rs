//! Single-sign-on login URLs for UseResponse.
//!
//! UseResponse accepts passwordless logins through a signed URL of the form
//!
//! ```text
//! {domain}/sso/{source}/{full_name}/{email}/{user_id}/{hash}/direct-sso?{query}
//! ```
//!
//! where every identity segment is obfuscated with the shared secret and
//! `hash` signs the identity. See
//! <https://help.useresponse.com/knowledge-base/article/single-sign-on>.
//!
//! Building a URL is pure string computation: no network access happens
//! here, and [`UseresponseSso`] can be shared freely between threads.
//!
//! # Example
//!
//! ```
//! use useresponse::sso::UseresponseSso;
//!
//! let sso = UseresponseSso::new(
//!     "https://useresponse.domain",
//!     "s3kre7",
//!     "example.com",
//!     "John Doe",
//!     "johndoe@example.com",
//!     42,
//! )
//! .with_property(172, "lorem ipsum")
//! .with_property(198, "2018-01-01");
//!
//! let url = sso.login_url(Some("https://useresponse.domain/knowledge-base"));
//! assert!(url.starts_with("https://useresponse.domain/sso/"));
//! ```

mod cipher;
mod radix;

use std::fmt;

pub use cipher::{encrypt, generate_hash};
pub use radix::to_base;

use crate::config::SsoConfig;

/// Helper for building UseResponse single-sign-on login URLs.
///
/// Custom user fields (Administration » Fields & Properties » Users) are
/// passed as properties keyed by the field id.
#[derive(Clone)]
pub struct UseresponseSso {
    domain: String,
    secret: String,
    source: String,
    full_name: String,
    email: String,
    user_id: String,
    properties: Vec<(i64, String)>,
}

impl UseresponseSso {
    /// Creates a login URL builder for one user.
    ///
    /// `user_id` may be numeric or textual; it is normalized to its
    /// `Display` form.
    pub fn new(
        domain: impl Into<String>,
        secret: impl Into<String>,
        source: impl Into<String>,
        full_name: impl Into<String>,
        email: impl Into<String>,
        user_id: impl fmt::Display,
    ) -> Self {
        Self {
            domain: domain.into(),
            secret: secret.into(),
            source: source.into(),
            full_name: full_name.into(),
            email: email.into(),
            user_id: user_id.to_string(),
            properties: Vec::new(),
        }
    }

    /// Creates a builder from an [`SsoConfig`] and the user's identity.
    pub fn from_config(
        config: &SsoConfig,
        full_name: impl Into<String>,
        email: impl Into<String>,
        user_id: impl fmt::Display,
    ) -> Self {
        Self::new(
            config.domain.clone(),
            config.secret(),
            config.source.clone(),
            full_name,
            email,
            user_id,
        )
    }

    /// Sets a custom field value.
    ///
    /// Setting the same field twice keeps its original position and
    /// replaces the value.
    pub fn with_property(mut self, field_id: i64, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.properties.iter_mut().find(|(id, _)| *id == field_id) {
            Some(existing) => existing.1 = value,
            None => self.properties.push((field_id, value)),
        }
        self
    }

    /// Sets several custom field values, in iteration order.
    pub fn with_properties<I, V>(self, properties: I) -> Self
    where
        I: IntoIterator<Item = (i64, V)>,
        V: Into<String>,
    {
        properties
            .into_iter()
            .fold(self, |sso, (id, value)| sso.with_property(id, value))
    }

    /// Base URL of the UseResponse instance.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Origin system identifier.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// User's full name.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// User's email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// User id in its normalized string form.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Custom field values in insertion order.
    pub fn properties(&self) -> &[(i64, String)] {
        &self.properties
    }

    /// Obfuscates `input` with this builder's secret.
    pub fn encrypt(&self, input: &str) -> String {
        encrypt(&self.secret, input)
    }

    /// Signature over the identity fields.
    pub fn generate_hash(&self) -> String {
        generate_hash(
            &self.secret,
            &self.full_name,
            &self.user_id,
            &self.email,
            &self.source,
        )
    }

    /// Returns the login URL without its query string.
    pub fn base_login_url(&self) -> String {
        [
            self.domain.clone(),
            "sso".to_string(),
            self.encrypt(&self.source),
            self.encrypt(&self.full_name),
            self.encrypt(&self.email),
            self.encrypt(&self.user_id),
            self.generate_hash(),
            "direct-sso".to_string(),
        ]
        .join("/")
    }

    /// Returns the UseResponse login URL.
    ///
    /// With `redirect_url`, UseResponse sends the user there after a
    /// successful login. The query string is always introduced by `?`, even
    /// when it is empty.
    pub fn login_url(&self, redirect_url: Option<&str>) -> String {
        let mut params: Vec<(String, String)> = Vec::with_capacity(self.properties.len() + 1);
        if let Some(redirect) = redirect_url {
            params.push(("redirect".to_string(), redirect.to_string()));
        }
        params.extend(self.property_params());

        tracing::debug!(
            domain = %self.domain,
            user_id = %self.user_id,
            has_redirect = redirect_url.is_some(),
            properties = self.properties.len(),
            "Building SSO login URL"
        );

        format!("{}?{}", self.base_login_url(), encode_query(&params))
    }

    fn property_params(&self) -> impl Iterator<Item = (String, String)> + '_ {
        self.properties.iter().map(|(id, value)| {
            (format!("properties[property_{}]", id), self.encrypt(value))
        })
    }
}

impl fmt::Debug for UseresponseSso {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UseresponseSso")
            .field("domain", &self.domain)
            .field("secret", &"[REDACTED]")
            .field("source", &self.source)
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("user_id", &self.user_id)
            .field("properties", &self.properties)
            .finish()
    }
}

/// Form-encodes query parameters: alphanumerics and `-_.~` pass through,
/// spaces become `+`, everything else is percent-encoded.
fn encode_query(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", form_encode(key), form_encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn form_encode(s: &str) -> String {
    // A literal '%' is encoded as "%25", so "%20" can only come from a space.
    urlencoding::encode(s).replace("%20", "+")
}
