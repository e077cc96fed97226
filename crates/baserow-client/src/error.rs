//! Error types for the Baserow client library

use thiserror::Error;

/// Result type alias for Baserow client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when using the Baserow client
#[derive(Debug, Error)]
pub enum Error {
    /// The connection could not be configured (missing token, bad base URL)
    #[error("Invalid client configuration: {0}")]
    Configuration(String),

    /// The request could not be sent or its response could not be read
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body was not the JSON shape we expected
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A caller value could not be converted to or from a row
    #[error("Failed to map row: {0}")]
    Mapping(serde_json::Error),

    /// The server answered with a non-success status
    #[error("Baserow API returned status {status}: {body}")]
    Api {
        status: u16,
        body: serde_json::Value,
    },

    /// A record was asked for a field it does not carry
    #[error("Field '{key}' is not present on the record")]
    FieldAccess { key: String },
}

impl Error {
    /// Create a field access error for `key`
    pub fn field_access(key: impl Into<String>) -> Self {
        Error::FieldAccess { key: key.into() }
    }

    /// True for failures on the wire: send errors and undecodable bodies
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Decode(_))
    }

    /// HTTP status of an API error, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Transport(e.to_string())
    }
}
