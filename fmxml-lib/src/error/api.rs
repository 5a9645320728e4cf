//! Transport error types

use std::time::Duration;

/// Errors that can occur while talking HTTP to the server.
///
/// These are never retried by the library; one logical operation is one GET.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx HTTP response (other than 401).
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        message: String,
    },

    /// The server rejected the credentials (HTTP 401).
    #[error("Unauthorized")]
    Unauthorized,

    /// Network error during the request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// The host/port/scheme did not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Maps a status code and body to the matching error, or `None` on 2xx.
    pub fn from_status(status: u16, body: &[u8]) -> Option<Self> {
        match status {
            200..=299 => None,
            401 => Some(Self::Unauthorized),
            _ => Some(Self::http(status, String::from_utf8_lossy(body))),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Unauthorized => Some(401),
            _ => None,
        }
    }
}
