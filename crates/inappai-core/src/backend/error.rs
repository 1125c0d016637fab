//! Backend error types and user-facing classification

use thiserror::Error;

/// Errors that can occur talking to the agent backend
#[derive(Error, Debug)]
pub enum BackendError {
    /// Network/HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("backend error ({status}): {message}")]
    Api { status: u16, message: String },

    /// JSON encode/decode error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl BackendError {
    /// Create an API error from a status code and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// User-facing category for banner display
    pub fn kind(&self) -> ErrorKind {
        match self {
            BackendError::Http(e) if e.is_timeout() => ErrorKind::Timeout,
            BackendError::Http(e) if e.is_connect() => ErrorKind::Connection,
            BackendError::Api { status: 401 | 403, .. } => ErrorKind::Auth,
            BackendError::Api { status: 408, .. } => ErrorKind::Timeout,
            BackendError::Api { status: 429, .. } => ErrorKind::RateLimit,
            other => ErrorKind::classify(&other.to_string()),
        }
    }
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Failure categories shown in the widget's error banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Connection,
    Timeout,
    RateLimit,
    Auth,
    Generic,
}

impl ErrorKind {
    /// Infer a category from an error message by substring match
    pub fn classify(message: &str) -> Self {
        let message = message.to_lowercase();
        if message.contains("not responding")
            || message.contains("connection")
            || message.contains("network")
        {
            ErrorKind::Connection
        } else if message.contains("timeout") {
            ErrorKind::Timeout
        } else if message.contains("rate limit") {
            ErrorKind::RateLimit
        } else if message.contains("authentication") || message.contains("unauthorized") {
            ErrorKind::Auth
        } else {
            ErrorKind::Generic
        }
    }

    /// Banner title for this category
    pub fn title(&self) -> &'static str {
        match self {
            ErrorKind::Connection => "Connection Error",
            ErrorKind::Timeout => "Request Timeout",
            ErrorKind::RateLimit => "Rate Limit",
            ErrorKind::Auth => "Authentication Error",
            ErrorKind::Generic => "Error",
        }
    }
}
