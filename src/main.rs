//! useresponse - print a UseResponse single-sign-on login URL
//!
//! Reads the SSO settings and the user's identity from the environment (or a
//! `.env` file) and writes the signed login URL to stdout.
//!
//! # Configuration
//!
//! - `USERESPONSE_DOMAIN`: Base URL of your UseResponse instance
//! - `USERESPONSE_SSO_SECRET`: Shared SSO secret
//! - `USERESPONSE_SSO_SOURCE`: Identifier of the origin system
//! - `USERESPONSE_SSO_FULL_NAME`, `USERESPONSE_SSO_EMAIL`,
//!   `USERESPONSE_SSO_USER_ID`: The user to sign in
//!
//! # Usage
//!
//! ```bash
//! # Login URL only
//! ./useresponse
//!
//! # Send the user somewhere after login
//! ./useresponse https://support.example.com/knowledge-base
//! ```

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

use useresponse::config::{self, SsoConfig};
use useresponse::sso::UseresponseSso;

fn main() -> Result<()> {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    // stdout carries only the URL
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("useresponse=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let sso_config = SsoConfig::from_env().context("Failed to load SSO configuration")?;
    tracing::debug!(domain = %sso_config.domain, "SSO configuration loaded");

    let full_name = config::get_required_env("USERESPONSE_SSO_FULL_NAME")
        .context("Failed to read user identity")?;
    let email = config::get_required_env("USERESPONSE_SSO_EMAIL")
        .context("Failed to read user identity")?;
    let user_id = config::get_required_env("USERESPONSE_SSO_USER_ID")
        .context("Failed to read user identity")?;

    let redirect = std::env::args().nth(1);

    let sso = UseresponseSso::from_config(&sso_config, full_name, email, user_id);
    println!("{}", sso.login_url(redirect.as_deref()));

    tracing::info!("Login URL generated");

    Ok(())
}
