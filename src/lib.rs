//! # useresponse
//!
//! Client library for the [UseResponse](https://www.useresponse.com)
//! helpdesk, with a helper for single-sign-on login URLs.
//!
//! ## Features
//!
//! - **SSO**: Build signed passwordless login URLs, optionally redirecting
//!   the user after login and setting custom user fields
//! - **API**: Users, tickets, objects and comments endpoints of API 4.0
//! - **Error handling**: Typed errors per HTTP status, automatic retry for
//!   transient failures with exponential backoff
//! - **Security**: API keys and SSO secrets are never logged
//!
//! ## Architecture
//!
//! - [`sso`] - SSO login URL builder
//! - [`api`] - Async HTTP client and resource services
//! - [`models`] - Request parameter enums and query builders
//! - [`config`] - Configuration loading from environment variables
//! - [`error`] - Error type shared by all modules
//!
//! ## Example
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
//! );
//!
//! // Redirect the user's browser here.
//! let login_url = sso.login_url(None);
//! assert!(login_url.contains("/direct-sso?"));
//! ```
//!
//! ## Configuration
//!
//! - `USERESPONSE_DOMAIN`: Base URL of your UseResponse instance
//! - `USERESPONSE_API_KEY`: API key, for [`api`]
//! - `USERESPONSE_SSO_SECRET`, `USERESPONSE_SSO_SOURCE`: for [`sso`]
//!
//! Optional:
//! - `RUST_LOG`: Log level (e.g., `useresponse=debug`)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod sso;
