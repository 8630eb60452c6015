//! Error types module
//!
//! Every failure an operation can surface is unified under the
//! `ClientError` enum: transport failures, non-2xx API responses, and
//! response bodies that do not match the documented envelope. All
//! variants are terminal for the single operation attempted; nothing is
//! retried or recovered locally.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Connection, timeout, or body-read failure before a usable response
    /// existed.
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: anyhow::Error,
    },

    /// Non-2xx response from the API or the storage host. Carries the
    /// response body for diagnostics.
    #[error("API request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    /// 2xx response whose JSON body is missing an expected key (e.g.
    /// `data.id`) or is not valid JSON at all.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// Wrap a transport-layer failure with a short operation message.
    pub fn network(message: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        ClientError::Network {
            message: message.into(),
            source: source.into(),
        }
    }

    /// HTTP status of the failed request, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
