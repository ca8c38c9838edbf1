//! Error types for the Cadence API client.

use cadence_core::CoreError;
use reqwest::Response;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when talking to the Cadence API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// API is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Missing, invalid or expired token (HTTP 401); the host should drop its session
    #[error("Authentication required")]
    Unauthorized,

    /// Authenticated but not allowed (HTTP 403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource does not exist (HTTP 404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success response
    #[error("Server error ({status} {code}): {message}")]
    Server {
        status: u16,
        code: String,
        message: String,
    },

    /// Failed to parse a response body
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid API base URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input rejected before sending, or token not decodable
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Error body produced by the backend's exception handler.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ApiError {
    /// Build an error from a non-success response.
    pub(crate) async fn from_response(response: Response) -> Self {
        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        Self::from_status(status, &text)
    }

    fn from_status(status: u16, text: &str) -> Self {
        let body: Option<ErrorBody> = serde_json::from_str(text).ok();
        let message = body
            .as_ref()
            .and_then(|b| b.message.clone())
            .unwrap_or_else(|| text.trim().to_string());

        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::Server {
                status,
                code: body
                    .and_then(|b| b.error)
                    .unwrap_or_else(|| format!("HTTP_{}", status)),
                message,
            },
        }
    }

    /// Whether the host should treat the session as ended.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

/// Result type for API client operations.
pub type Result<T> = std::result::Result<T, ApiError>;
