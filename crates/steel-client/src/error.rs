//! # API Error Types
//!
//! Classified transport failures.
//!
//! ## Classification
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Failure → Category Mapping                           │
//! │                                                                         │
//! │  No response at all (connect error, timeout) ──► NoConnection          │
//! │  Status ≥ 500 ─────────────────────────────────► ServerError           │
//! │  Status 404 ───────────────────────────────────► NotFound              │
//! │  Status 401 / 403 ─────────────────────────────► Forbidden             │
//! │  Status 400 ───────────────────────────────────► BadRequest (server    │
//! │                                                   message if present)  │
//! │  Anything else ────────────────────────────────► Other                 │
//! │                                                                         │
//! │  Classification happens ONCE, in the transport. Layers above           │
//! │  (CRUD, products, checkout) propagate the category unchanged.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each category carries a fixed user-facing message; the server-supplied
//! message overrides it only for BadRequest and Other.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Classified API failure.
///
/// ## Design Principles
/// - Exactly six categories; no layer above the transport re-classifies
/// - Display messages are for logs; [`ApiError::user_message`] is what a
///   notification surface shows
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received at all (connection refused, DNS failure,
    /// or the fixed request timeout elapsed).
    #[error("no response from server: {0}")]
    NoConnection(String),

    /// The server answered with status ≥ 500.
    #[error("server error: status {0}")]
    ServerError(u16),

    /// The server answered 404 for the given path.
    #[error("not found: {0}")]
    NotFound(String),

    /// The server answered 401 or 403.
    #[error("access denied: status {0}")]
    Forbidden(u16),

    /// The server answered 400. Carries the user-facing message (server
    /// body message when present, fixed text otherwise).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Any other failure. Carries the user-facing message (server body or
    /// transport message when present, fixed text otherwise).
    #[error("request failed: {0}")]
    Other(String),
}

/// The six user-facing failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    NoConnection,
    ServerError,
    NotFound,
    Forbidden,
    BadRequest,
    Other,
}

impl ApiError {
    /// Classifies a non-success HTTP status.
    ///
    /// ## Arguments
    /// * `status` - the response status code
    /// * `path` - request path, kept for NotFound context
    /// * `server_message` - the body's `message` field, if any
    pub fn from_status(status: u16, path: &str, server_message: Option<String>) -> Self {
        let server_message = server_message.filter(|m| !m.trim().is_empty());

        match status {
            s if s >= 500 => ApiError::ServerError(s),
            404 => ApiError::NotFound(path.to_string()),
            401 | 403 => ApiError::Forbidden(status),
            400 => ApiError::BadRequest(
                server_message.unwrap_or_else(|| "Request tidak valid".to_string()),
            ),
            _ => ApiError::Other(
                server_message.unwrap_or_else(|| "Terjadi kesalahan".to_string()),
            ),
        }
    }

    /// Classifies a transport-level failure (no usable response).
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            ApiError::NoConnection(err.to_string())
        } else {
            ApiError::Other(err.to_string())
        }
    }

    /// Returns the failure category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ApiError::NoConnection(_) => ErrorCategory::NoConnection,
            ApiError::ServerError(_) => ErrorCategory::ServerError,
            ApiError::NotFound(_) => ErrorCategory::NotFound,
            ApiError::Forbidden(_) => ErrorCategory::Forbidden,
            ApiError::BadRequest(_) => ErrorCategory::BadRequest,
            ApiError::Other(_) => ErrorCategory::Other,
        }
    }

    /// Returns the user-facing message for this failure.
    ///
    /// Fixed per-category text; the server-supplied message takes over only
    /// for BadRequest/Other (already resolved at construction).
    pub fn user_message(&self) -> String {
        match self {
            ApiError::NoConnection(_) => "Tidak ada koneksi internet".to_string(),
            ApiError::ServerError(_) => "Server Error. Coba lagi nanti.".to_string(),
            ApiError::NotFound(_) => "Data tidak ditemukan".to_string(),
            ApiError::Forbidden(_) => "Anda tidak memiliki akses".to_string(),
            ApiError::BadRequest(message) => message.clone(),
            ApiError::Other(message) => message.clone(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
