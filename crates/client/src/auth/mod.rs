//! OAuth2 token acquisition
//!
//! Implements the resource owner password credentials grant against a
//! configured token endpoint and exposes the acquired token through a
//! [`TokenSource`] that transparently refreshes near expiry.
//!
//! # Module Organization
//!
//! - [`types`]: token set and wire structures
//! - [`client`]: token endpoint client (password + refresh grants)
//! - [`token_source`]: always-valid token resolution

pub mod client;
pub mod token_source;
pub mod types;

pub use client::{AuthClient, AuthError};
pub use token_source::{CachedTokenSource, TokenSource, DEFAULT_REFRESH_THRESHOLD_SECS};
pub use types::{OAuthErrorBody, TokenResponse, TokenSet};
