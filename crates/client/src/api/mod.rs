//! Authenticated API access
//!
//! The API caller half of the client: one read-only operation against the
//! configured server, with per-call token resolution through a
//! [`TokenSource`](crate::auth::TokenSource).

pub mod client;
pub mod errors;

pub use client::ApiClient;
pub use errors::{ApiError, ResponseMeta};
