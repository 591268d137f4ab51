//! Token endpoint client
//!
//! Implements the two grants this system uses against the OAuth2 token
//! endpoint:
//! - resource owner password credentials grant (initial acquisition)
//! - refresh token grant (re-acquisition without the original credentials)
//!
//! Each grant is a single attempt; transport failures are not retried.

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::types::{OAuthErrorBody, TokenResponse, TokenSet};
use crate::config::{ClientConfig, Credentials};

const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Error type for token acquisition and refresh
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token endpoint refused the grant (wrong credentials, revoked
    /// refresh token, unknown client, ...)
    #[error("token endpoint rejected the grant ({status}): {detail}")]
    Rejected { status: StatusCode, detail: String },

    /// The token endpoint could not be reached or the request failed in
    /// transit
    #[error("token endpoint request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The token endpoint answered with a body this client cannot decode
    #[error("malformed token response: {0}")]
    Parse(String),

    /// A refresh was required but no refresh token is available
    #[error("no refresh token available")]
    NoRefreshToken,
}

/// Client for the OAuth2 token endpoint
///
/// Owns the credentials for the process lifetime; they are sent only to the
/// configured token endpoint and never logged.
#[derive(Debug, Clone)]
pub struct AuthClient {
    config: ClientConfig,
    credentials: Credentials,
    http: Client,
}

impl AuthClient {
    #[must_use]
    pub fn new(config: ClientConfig, credentials: Credentials) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { config, credentials, http }
    }

    /// Exchange the resource owner's credentials for a token
    ///
    /// Sends `grant_type=password` with the client identifier, username and
    /// password as a form body. One attempt; the caller decides whether a
    /// failure is fatal.
    ///
    /// # Errors
    /// Returns [`AuthError`] when the endpoint rejects the credentials, is
    /// unreachable, or returns a malformed response.
    pub async fn password_grant(&self) -> Result<TokenSet, AuthError> {
        debug!(token_url = %self.config.token_url, client_id = %self.credentials.client_id,
            "requesting token via password grant");

        let params = [
            ("grant_type", "password"),
            ("client_id", self.credentials.client_id.as_str()),
            ("username", self.credentials.username.as_str()),
            ("password", self.credentials.password.as_str()),
        ];

        let response = self.http.post(&self.config.token_url).form(&params).send().await?;
        let tokens = Self::decode_token_response(response).await?;

        info!(expires_in = tokens.expires_in, has_refresh_token = tokens.refresh_token.is_some(),
            "access token acquired");
        Ok(tokens)
    }

    /// Exchange a refresh token for a new token set
    ///
    /// Sends `grant_type=refresh_token`; the resource owner's password is
    /// not involved.
    ///
    /// # Errors
    /// Returns [`AuthError::NoRefreshToken`] for an empty refresh token,
    /// otherwise the same error conditions as [`Self::password_grant`].
    pub async fn refresh_grant(&self, refresh_token: &str) -> Result<TokenSet, AuthError> {
        if refresh_token.is_empty() {
            return Err(AuthError::NoRefreshToken);
        }

        debug!(token_url = %self.config.token_url, "refreshing access token");

        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", self.credentials.client_id.as_str()),
            ("refresh_token", refresh_token),
        ];

        let response = self.http.post(&self.config.token_url).form(&params).send().await?;
        let tokens = Self::decode_token_response(response).await?;

        info!(expires_in = tokens.expires_in, "access token refreshed");
        Ok(tokens)
    }

    /// Get a reference to the endpoint configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn decode_token_response(response: reqwest::Response) -> Result<TokenSet, AuthError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // RFC 6749 error bodies are JSON, but pass through whatever the
            // server actually sent when they are not.
            let detail = match serde_json::from_str::<OAuthErrorBody>(&body) {
                Ok(parsed) => parsed.to_string(),
                Err(_) if body.trim().is_empty() => {
                    status.canonical_reason().unwrap_or("no response body").to_string()
                }
                Err(_) => body.trim().to_string(),
            };
            warn!(%status, "token endpoint rejected the grant");
            return Err(AuthError::Rejected { status, detail });
        }

        let parsed: TokenResponse =
            serde_json::from_str(&body).map_err(|e| AuthError::Parse(e.to_string()))?;
        if parsed.access_token.is_empty() {
            return Err(AuthError::Parse("empty access_token in token response".to_string()));
        }

        Ok(parsed.into())
    }
}
