//! Error types for agrolink-core — Railway Programming
//!
//! All operations return `Result<T, ClientError>`.
//! No panics, no unwraps in production code paths.
//!
//! Failures reaching a screen fall into four families:
//! transport (no response), HTTP (non-success status), application
//! (success status carrying an error payload) and local validation.

use thiserror::Error;

/// Why no response was received
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// Connection refused, DNS failure, unreachable host
    Connect,
    /// The per-request deadline elapsed
    Timeout,
    /// Anything else reqwest reports before a status line arrives
    Other,
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Connect => "connect",
            Self::Timeout => "timeout",
            Self::Other => "other",
        })
    }
}

/// Unified error type for all client operations
#[derive(Error, Debug)]
pub enum ClientError {
    // ─── Gateway Errors ───

    #[error("Network error ({kind}): {message}")]
    Transport { kind: TransportKind, message: String },

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Request rejected by server: {message}")]
    Application { status: u16, message: String },

    // ─── Local Errors ───

    #[error("Validation failed for `{field}`: {message}")]
    Validation { field: String, message: String },

    #[error("Invalid session state: {0}")]
    InvalidState(String),

    #[error("Session unavailable: {0}")]
    SessionUnavailable(String),

    // ─── Infrastructure Errors ───

    #[error("Credential storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// True when no response was received at all
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// HTTP status of the response, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } | Self::Application { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401, .. })
    }

    /// Text a screen puts in its alert.
    ///
    /// HTTP and application failures both surface the backend message;
    /// transport failures collapse into one connectivity message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport { kind: TransportKind::Timeout, .. } => {
                "The server took too long to respond. Please try again.".to_string()
            }
            Self::Transport { .. } => {
                "Unable to reach the server. Check your internet connection.".to_string()
            }
            Self::Http { message, .. } | Self::Application { message, .. } => message.clone(),
            Self::Validation { message, .. } => message.clone(),
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }
}

/// Generic message for a status code when the body carries none
pub fn status_message(status: u16) -> String {
    match status {
        400 => "Bad request".to_string(),
        401 => "Session expired, please log in again".to_string(),
        403 => "You are not allowed to perform this action".to_string(),
        404 => "Resource not found".to_string(),
        409 => "Conflict with existing data".to_string(),
        413 => "Upload too large".to_string(),
        422 => "Submitted data was rejected".to_string(),
        429 => "Too many requests, slow down".to_string(),
        500..=599 => format!("Server error ({status})"),
        _ => format!("Request failed with status {status}"),
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return ClientError::Http {
                status: status.as_u16(),
                message: status_message(status.as_u16()),
            };
        }
        if err.is_decode() {
            return ClientError::Serialization(err.to_string());
        }
        if err.is_builder() {
            return ClientError::Config(err.to_string());
        }
        let kind = if err.is_timeout() {
            TransportKind::Timeout
        } else if err.is_connect() {
            TransportKind::Connect
        } else {
            TransportKind::Other
        };
        ClientError::Transport {
            kind,
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::Config(format!("URL parse error: {err}"))
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
