//! Environment-driven settings
//!
//! All configuration comes from environment variables; there are no
//! command-line flags.
//!
//! ## Environment Variables
//! - `LATTICE_BASE_URL`: API server base URL
//! - `LATTICE_AUTHORIZE_URL`: OAuth2 authorization endpoint URL
//! - `LATTICE_TOKEN_URL`: OAuth2 token endpoint URL
//! - `LATTICE_CLIENT_ID`: OAuth client identifier
//! - `LATTICE_USERNAME`: resource owner username
//! - `LATTICE_PASSWORD`: resource owner password
//! - `LATTICE_API_VERSION`: API version query value (optional, default "1")

use lattice_client::{ClientConfig, ConfigError, Credentials};
use thiserror::Error;

pub const DEFAULT_API_VERSION: &str = "1";

/// Error type for settings loading
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Everything the process needs, resolved once at startup
#[derive(Debug)]
pub struct Settings {
    pub config: ClientConfig,
    pub credentials: Credentials,
    pub api_version: String,
}

/// Load settings from the process environment
///
/// # Errors
/// Returns [`SettingsError`] naming the first missing variable, or a
/// [`ConfigError`] when a URL fails validation.
pub fn load() -> Result<Settings, SettingsError> {
    from_lookup(|name| std::env::var(name).ok())
}

/// Load settings through an injectable variable lookup
///
/// The indirection keeps the parsing logic testable without touching the
/// process environment.
pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Settings, SettingsError> {
    let base_url = required(&lookup, "LATTICE_BASE_URL")?;
    let authorize_url = required(&lookup, "LATTICE_AUTHORIZE_URL")?;
    let token_url = required(&lookup, "LATTICE_TOKEN_URL")?;
    let client_id = required(&lookup, "LATTICE_CLIENT_ID")?;
    let username = required(&lookup, "LATTICE_USERNAME")?;
    let password = required(&lookup, "LATTICE_PASSWORD")?;

    let config = ClientConfig::new(base_url, authorize_url, token_url)?;
    let credentials = Credentials::new(client_id, username, password);
    let api_version = lookup("LATTICE_API_VERSION")
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

    Ok(Settings { config, credentials, api_version })
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, SettingsError> {
    lookup(name).filter(|value| !value.is_empty()).ok_or(SettingsError::Missing(name))
}
