//! Token source: always-valid access tokens
//!
//! A token source yields a currently-valid access token on demand. The
//! cached implementation holds the token set acquired at startup and
//! refreshes it through the refresh token grant when it nears expiry; the
//! original password grant is never re-run.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::client::{AuthClient, AuthError};
use super::types::TokenSet;

/// Refresh this many seconds before actual expiry so a token cannot lapse
/// mid-request.
pub const DEFAULT_REFRESH_THRESHOLD_SECS: i64 = 30;

/// Capability to produce a currently-valid access token
///
/// Consumers resolve the token per request, so a long-lived consumer picks
/// up refreshed tokens transparently.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Yield a currently-valid access token, refreshing if necessary
    ///
    /// # Errors
    /// Returns [`AuthError`] if a required refresh fails or is impossible.
    async fn access_token(&self) -> Result<String, AuthError>;
}

/// Token source backed by an in-memory token set and the refresh grant
pub struct CachedTokenSource {
    client: AuthClient,
    current: RwLock<TokenSet>,
    refresh_threshold_seconds: i64,
}

impl CachedTokenSource {
    /// Wrap an already-acquired token set
    #[must_use]
    pub fn new(client: AuthClient, initial: TokenSet) -> Self {
        Self::with_threshold(client, initial, DEFAULT_REFRESH_THRESHOLD_SECS)
    }

    /// Wrap a token set with a custom pre-expiry refresh threshold
    #[must_use]
    pub fn with_threshold(
        client: AuthClient,
        initial: TokenSet,
        refresh_threshold_seconds: i64,
    ) -> Self {
        Self { client, current: RwLock::new(initial), refresh_threshold_seconds }
    }

    /// Snapshot of the currently-held token set
    pub async fn current(&self) -> TokenSet {
        self.current.read().await.clone()
    }

    async fn needs_refresh(&self) -> bool {
        self.current.read().await.is_expired(self.refresh_threshold_seconds)
    }

    async fn refresh(&self) -> Result<(), AuthError> {
        let refresh_token = {
            let current = self.current.read().await;
            current.refresh_token.clone().ok_or(AuthError::NoRefreshToken)?
        };

        debug!("cached token expired or near expiry, refreshing");
        let renewed = self.client.refresh_grant(&refresh_token).await?;
        *self.current.write().await = renewed;
        Ok(())
    }
}

#[async_trait]
impl TokenSource for CachedTokenSource {
    async fn access_token(&self) -> Result<String, AuthError> {
        if self.needs_refresh().await {
            self.refresh().await?;
        }
        Ok(self.current.read().await.access_token.clone())
    }
}
