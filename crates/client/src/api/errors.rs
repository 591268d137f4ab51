//! API call errors with response metadata
//!
//! Every failure of an API call carries whatever partial HTTP response
//! metadata is available, so callers can report the raw exchange alongside
//! the classified error.

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

use crate::auth::AuthError;

/// Partial HTTP response metadata captured on failure
///
/// `status` and `body` are absent when the failure happened before any
/// response arrived (connection refused, DNS failure, timeout).
#[derive(Debug, Clone)]
pub struct ResponseMeta {
    /// Requested URL
    pub url: String,

    /// HTTP status, when a response arrived
    pub status: Option<StatusCode>,

    /// Response body text, when one arrived and was readable
    pub body: Option<String>,
}

impl ResponseMeta {
    /// Metadata for a request that produced no response
    #[must_use]
    pub fn unanswered(url: impl Into<String>) -> Self {
        Self { url: url.into(), status: None, body: None }
    }
}

impl fmt::Display for ResponseMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GET {}", self.url)?;
        match self.status {
            Some(status) => write!(f, " -> {status}")?,
            None => write!(f, " -> no response")?,
        }
        if let Some(body) = &self.body {
            if !body.is_empty() {
                write!(f, "; body: {body}")?;
            }
        }
        Ok(())
    }
}

/// Error type for API calls
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server rejected the bearer token (401/403)
    #[error("authentication rejected by server: {meta}")]
    Auth { meta: ResponseMeta },

    /// Any other 4xx response
    #[error("client error: {meta}")]
    Client { meta: ResponseMeta },

    /// A 5xx response
    #[error("server error: {meta}")]
    Server { meta: ResponseMeta },

    /// No response arrived (unreachable host, timeout, connection reset)
    #[error("network error: {source}")]
    Network {
        #[source]
        source: reqwest::Error,
        meta: ResponseMeta,
    },

    /// The response arrived but its body was not the expected shape
    #[error("failed to decode response body: {message}")]
    Decode { message: String, meta: ResponseMeta },

    /// The token source could not produce a valid token at call time
    #[error("token source failed: {0}")]
    TokenSource(#[from] AuthError),
}

impl ApiError {
    /// Classify a non-success HTTP status
    #[must_use]
    pub(crate) fn from_status(status: StatusCode, meta: ResponseMeta) -> Self {
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            Self::Auth { meta }
        } else if status.is_server_error() {
            Self::Server { meta }
        } else {
            Self::Client { meta }
        }
    }

    /// Response metadata, when the failure produced any
    #[must_use]
    pub fn meta(&self) -> Option<&ResponseMeta> {
        match self {
            Self::Auth { meta }
            | Self::Client { meta }
            | Self::Server { meta }
            | Self::Network { meta, .. }
            | Self::Decode { meta, .. } => Some(meta),
            Self::TokenSource(_) => None,
        }
    }
}
