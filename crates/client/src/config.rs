//! Client configuration and operator credentials
//!
//! Both structs are built once at startup and stay immutable for the
//! process lifetime. Endpoint URLs are validated at construction so that
//! misconfiguration surfaces before any network traffic.

use std::fmt;

use thiserror::Error;
use url::Url;

/// Error type for configuration validation
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} is not a valid URL: {source}")]
    InvalidUrl {
        field: &'static str,
        #[source]
        source: url::ParseError,
    },

    #[error("{field} must not be empty")]
    Empty { field: &'static str },
}

/// Endpoint configuration for the API server and its authorization server
///
/// The authorization server exposes two endpoints: the interactive authorize
/// endpoint and the token endpoint. Only the token endpoint is contacted by
/// this client; the authorize URL is carried so callers can surface it to
/// operators (e.g. in diagnostics) without re-deriving it.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API server base URL (e.g. "https://inventory.example.com/api/v1")
    pub base_url: String,

    /// Authorization endpoint URL of the OAuth2 server
    pub authorize_url: String,

    /// Token endpoint URL of the OAuth2 server
    pub token_url: String,
}

impl ClientConfig {
    /// Validate and normalize endpoint URLs
    ///
    /// A trailing slash on `base_url` is stripped so request paths can be
    /// appended uniformly.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if any URL is empty or unparseable.
    pub fn new(
        base_url: String,
        authorize_url: String,
        token_url: String,
    ) -> Result<Self, ConfigError> {
        let base_url = validate_url("base_url", base_url)?;
        let authorize_url = validate_url("authorize_url", authorize_url)?;
        let token_url = validate_url("token_url", token_url)?;

        Ok(Self { base_url: base_url.trim_end_matches('/').to_string(), authorize_url, token_url })
    }

    /// URL of the list-all-CI-IDs endpoint
    #[must_use]
    pub(crate) fn ci_ids_url(&self) -> String {
        format!("{}/ci-ids", self.base_url)
    }
}

fn validate_url(field: &'static str, value: String) -> Result<String, ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Empty { field });
    }
    Url::parse(&value).map_err(|source| ConfigError::InvalidUrl { field, source })?;
    Ok(value)
}

/// Resource-owner credentials for the password grant
///
/// Not persisted anywhere; lives only as long as the process.
#[derive(Clone)]
pub struct Credentials {
    /// OAuth client identifier
    pub client_id: String,

    /// Resource owner username
    pub username: String,

    pub(crate) password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(client_id: String, username: String, password: String) -> Self {
        Self { client_id, username, password }
    }
}

// The password must never leak through debug logging.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
