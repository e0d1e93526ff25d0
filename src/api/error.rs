// src/api/error.rs
use thiserror::Error;

/// Failure of a backend call.
///
/// `Server` covers errors the backend reported itself (non-2xx status or
/// `success: false`); these are shown to the user verbatim. The other
/// variants are transport-level and get a generic message instead.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("server rejected the request ({status}): {}", .message.as_deref().unwrap_or("no details"))]
    Server { status: u16, message: Option<String> },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_server(&self) -> bool {
        matches!(self, ApiError::Server { .. })
    }

    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Server-supplied text, or `fallback` when the server gave none.
    pub fn message_or(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}
