//! Error types for the fleet API client.
//!
//! # Design
//! A non-2xx response carries the best message the server gave us, picked
//! from the envelope's `error` then `message` fields. Transport failures and
//! JSON failures keep the underlying cause's text. Nothing is retried.

use thiserror::Error;

/// Fallback message when a failed response has JSON but no usable field.
pub const REQUEST_FAILED: &str = "Request failed";

/// Fallback message when a failed response body is not JSON at all.
pub const NETWORK_ERROR: &str = "Network error";

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("{message}")]
    RequestFailed { status: u16, message: String },

    /// The request never produced a response (connect, DNS, I/O).
    #[error("transport error: {0}")]
    Transport(String),

    /// A 2xx response body could not be decoded into the expected envelope.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The session blob could not be written or removed.
    #[error("session storage failed: {0}")]
    Storage(String),
}

impl ApiError {
    /// Text suitable for showing to a user.
    pub fn message(&self) -> &str {
        match self {
            ApiError::RequestFailed { message, .. } => message,
            ApiError::Transport(msg)
            | ApiError::Deserialization(msg)
            | ApiError::Serialization(msg)
            | ApiError::Storage(msg) => msg,
        }
    }

    /// HTTP status for `RequestFailed`, `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for a 401, i.e. a missing or unknown session token.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// True for a 404 from a lookup by id, number, plate or email.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
