//! Token types and wire structures
//!
//! Defines the in-memory token representation and the wire format of the
//! token endpoint's success and error responses.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// OAuth 2.0 access and refresh tokens with expiry bookkeeping
///
/// The access token is opaque to this client: it is attached to requests
/// verbatim and never inspected. A `TokenSet` is never mutated in place,
/// only replaced wholesale when a refresh grant succeeds.
#[derive(Debug, Clone)]
pub struct TokenSet {
    /// Access token presented as `Authorization: Bearer <token>`
    pub access_token: String,

    /// Refresh token, when the authorization server issued one
    pub refresh_token: Option<String>,

    /// Token type (always "Bearer" in practice)
    pub token_type: String,

    /// Access token lifetime in seconds, 0 when the server sent none
    pub expires_in: i64,

    /// Absolute expiration timestamp, computed from `expires_in` at
    /// acquisition time; `None` when the server sent no lifetime
    pub expires_at: Option<DateTime<Utc>>,

    /// Granted scopes (space-separated), when reported
    pub scope: Option<String>,
}

impl TokenSet {
    /// Build a `TokenSet`, computing `expires_at` from `expires_in`
    #[must_use]
    pub fn new(
        access_token: String,
        refresh_token: Option<String>,
        expires_in: i64,
        scope: Option<String>,
    ) -> Self {
        let expires_at = if expires_in > 0 {
            Some(Utc::now() + chrono::Duration::seconds(expires_in))
        } else {
            None
        };

        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
            expires_at,
            scope,
        }
    }

    /// Check whether the access token is expired or expires within the
    /// given threshold
    ///
    /// Tokens without an expiration timestamp are treated as non-expiring.
    #[must_use]
    pub fn is_expired(&self, threshold_seconds: i64) -> bool {
        match self.expires_at {
            Some(expires_at) => Utc::now() + chrono::Duration::seconds(threshold_seconds) >= expires_at,
            None => false,
        }
    }

    /// Seconds until expiry, or `None` when no expiry is set
    #[must_use]
    pub fn seconds_until_expiry(&self) -> Option<i64> {
        self.expires_at.map(|expires_at| (expires_at - Utc::now()).num_seconds())
    }
}

/// Token endpoint success response (RFC 6749 §5.1)
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub scope: Option<String>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl From<TokenResponse> for TokenSet {
    fn from(response: TokenResponse) -> Self {
        let mut set = Self::new(
            response.access_token,
            response.refresh_token,
            response.expires_in,
            response.scope,
        );
        set.token_type = response.token_type;
        set
    }
}

/// Token endpoint error response (RFC 6749 §5.2)
#[derive(Debug, Deserialize)]
pub struct OAuthErrorBody {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl fmt::Display for OAuthErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error_description {
            Some(description) => write!(f, "{}: {}", self.error, description),
            None => write!(f, "{}", self.error),
        }
    }
}
