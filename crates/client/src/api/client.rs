//! API client for the CI inventory read endpoint
//!
//! One read-only operation against the configured server. The bearer token
//! is re-resolved from the token source at call time, so a refreshed token
//! is always the one attached to the request.

use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use tracing::{debug, info, instrument};

use super::errors::{ApiError, ResponseMeta};
use crate::auth::TokenSource;
use crate::config::ClientConfig;

const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Authenticated client for the CI inventory API
pub struct ApiClient {
    config: ClientConfig,
    token_source: Arc<dyn TokenSource>,
    http: Client,
}

impl ApiClient {
    #[must_use]
    pub fn new(config: ClientConfig, token_source: Arc<dyn TokenSource>) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { config, token_source, http }
    }

    /// List all CI identifiers known to the server
    ///
    /// Issues `GET {base_url}/ci-ids?apiVersion={api_version}` with a bearer
    /// token and decodes the body as an ordered JSON array of strings. The
    /// call is read-only and is not retried.
    ///
    /// # Errors
    /// Returns [`ApiError`] carrying whatever partial response metadata is
    /// available; see the error variants for classification.
    #[instrument(skip(self), fields(api_version = %api_version))]
    pub async fn list_all_ci_ids(&self, api_version: &str) -> Result<Vec<String>, ApiError> {
        let url = self.config.ci_ids_url();
        let token = self.token_source.access_token().await?;

        debug!(url = %url, "GET request");

        let response = self
            .http
            .get(&url)
            .query(&[("apiVersion", api_version)])
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .send()
            .await
            .map_err(|source| ApiError::Network { source, meta: ResponseMeta::unanswered(&url) })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.ok();
            return Err(ApiError::from_status(
                status,
                ResponseMeta { url, status: Some(status), body },
            ));
        }

        let body = response.text().await.map_err(|source| ApiError::Network {
            source,
            meta: ResponseMeta { url: url.clone(), status: Some(status), body: None },
        })?;

        let ids: Vec<String> = serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            message: e.to_string(),
            meta: ResponseMeta { url, status: Some(status), body: Some(body) },
        })?;

        info!(count = ids.len(), "listed CI ids");
        Ok(ids)
    }
}
