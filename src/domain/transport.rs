//! Transport port - abstraction over the single-round-trip JSON API

use async_trait::async_trait;
use thiserror::Error;

/// Port for the remote game-orchestration service.
///
/// One POST per call against a fixed origin: no retries, no backoff, no
/// client-side timeout. Implementations live in the infrastructure layer
/// ([`HttpTransport`] for the live service, [`ScriptedTransport`] for tests).
///
/// [`HttpTransport`]: crate::infrastructure::transport::HttpTransport
/// [`ScriptedTransport`]: crate::infrastructure::transport::ScriptedTransport
#[async_trait]
pub trait GameTransport: Send + Sync {
    /// Send `body` to `path` on the remote origin and return the parsed
    /// JSON response body.
    async fn post_json(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, TransportError>;
}

/// Transport failures.
///
/// Dispatchers do not distinguish the variants; everything out of the
/// transport folds into the session's single error value.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Failure status; carries the server's `message` field when present,
    /// otherwise the synthesized `HTTP {status}` text
    #[error("{0}")]
    Http(String),

    /// The request never completed (connection refused, DNS, reset)
    #[error("network error: {0}")]
    Network(String),

    /// The response body was not valid JSON
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl TransportError {
    pub fn http(message: impl Into<String>) -> Self {
        Self::Http(message.into())
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }
}
