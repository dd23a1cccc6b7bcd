//! Public error type of the client API.
//!
//! The taxonomy is deliberately flat: a failure either never left the client
//! (validation) or came out of the one network round trip (remote). Either
//! way the dispatcher stores the message as the session's single error value
//! and the last-known-good snapshot is left untouched.

use crate::domain::transport::TransportError;
use thiserror::Error;

/// Error returned by the session dispatchers
#[derive(Debug, Error)]
pub enum ClientError {
    /// Local precondition failed before any network call was made
    #[error("{0}")]
    Validation(String),

    /// Transport failure or server-reported business error
    #[error("{0}")]
    Remote(String),
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote(message.into())
    }
}

impl From<TransportError> for ClientError {
    fn from(error: TransportError) -> Self {
        Self::Remote(error.to_string())
    }
}
