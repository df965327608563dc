//! Error types for the Addons.io API client.
//!
//! Every failure an API call can produce is one variant of `AddonsError`.
//! The client performs no local recovery, so these reach the caller as-is.

use thiserror::Error;

/// Convenience type alias for Results using AddonsError.
pub type AddonsResult<T> = Result<T, AddonsError>;

/// Unified error type for configuration, transport and API failures.
#[derive(Error, Debug)]
pub enum AddonsError {
    // -- Configuration errors --
    /// Invalid configuration (bad header, unreadable config file, client build).
    #[error("configuration error: {0}")]
    Config(String),

    // -- Network errors --
    /// HTTP transport failed (DNS, connection refused, body read).
    #[error("http error: {0}")]
    Http(String),

    /// HTTP request timed out.
    #[error("request timeout: {0}")]
    Timeout(String),

    // -- API errors --
    /// The API rejected the request with a 4xx status.
    #[error("client request error (status {status}): {body}")]
    ClientRequest {
        /// HTTP status code.
        status: u16,
        /// Response body, parsed as JSON when possible, else the raw text.
        body: serde_json::Value,
    },

    /// The API returned a 5xx status.
    #[error("server error (status {status}): {body}")]
    ServerError {
        /// HTTP status code.
        status: u16,
        /// Response body, parsed as JSON when possible, else the raw text.
        body: serde_json::Value,
    },

    /// Any other non-success status.
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus {
        status: u16,
        body: serde_json::Value,
    },

    // -- Codec/IO errors --
    /// JSON encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl AddonsError {
    /// HTTP status carried by a response error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            AddonsError::ClientRequest { status, .. }
            | AddonsError::ServerError { status, .. }
            | AddonsError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response body carried by a response error, if any.
    pub fn body(&self) -> Option<&serde_json::Value> {
        match self {
            AddonsError::ClientRequest { body, .. }
            | AddonsError::ServerError { body, .. }
            | AddonsError::UnexpectedStatus { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Whether this is a 4xx rejection from the API.
    pub fn is_client_request(&self) -> bool {
        matches!(self, AddonsError::ClientRequest { .. })
    }

    /// Human-readable message from an API error body.
    ///
    /// Looks for `error` or `message` string fields, then falls back to a
    /// bare string body.
    pub fn api_message(&self) -> Option<&str> {
        let body = self.body()?;
        body.get("error")
            .and_then(|v| v.as_str())
            .or_else(|| body.get("message").and_then(|v| v.as_str()))
            .or_else(|| body.as_str())
    }
}

impl From<serde_json::Error> for AddonsError {
    fn from(e: serde_json::Error) -> Self {
        AddonsError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for AddonsError {
    fn from(e: toml::de::Error) -> Self {
        AddonsError::Config(e.to_string())
    }
}
