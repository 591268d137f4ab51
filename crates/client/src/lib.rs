//! Lattice API client library
//!
//! Reusable client for an OAuth2-protected CI inventory API. Two components
//! compose linearly:
//!
//! - **Token acquisition** ([`auth`]): exchanges resource-owner credentials
//!   for a bearer token via the password grant, and keeps it valid through a
//!   refreshing [`TokenSource`](auth::TokenSource).
//! - **API access** ([`api`]): issues authenticated read requests against
//!   the configured server.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use lattice_client::{ApiClient, AuthClient, CachedTokenSource, ClientConfig, Credentials};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::new(
//!     "https://inventory.example.com/api/v1".to_string(),
//!     "https://auth.example.com/realms/main/authorize".to_string(),
//!     "https://auth.example.com/realms/main/token".to_string(),
//! )?;
//! let credentials = Credentials::new(
//!     "lattice-cli".to_string(),
//!     "operator".to_string(),
//!     "password".to_string(),
//! );
//!
//! let auth = AuthClient::new(config.clone(), credentials);
//! let tokens = auth.password_grant().await?;
//!
//! let client = ApiClient::new(config, Arc::new(CachedTokenSource::new(auth, tokens)));
//! let ids = client.list_all_ci_ids("1").await?;
//! println!("{ids:?}");
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;

pub use api::{ApiClient, ApiError, ResponseMeta};
pub use auth::{AuthClient, AuthError, CachedTokenSource, TokenSet, TokenSource};
pub use config::{ClientConfig, ConfigError, Credentials};
