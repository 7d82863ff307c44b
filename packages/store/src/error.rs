//! Errors returned by every [`crate::RemoteStore`] implementation.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The request never produced a response (network down, DNS, CORS).
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("service error ({status}): {message}")]
    Service { status: u16, message: String },

    /// A unique constraint rejected the row.
    #[error("duplicate row in {table}")]
    Conflict { table: String },

    /// The payload could not be read or written as JSON rows.
    #[error("malformed row: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Decode(e.to_string())
    }
}
