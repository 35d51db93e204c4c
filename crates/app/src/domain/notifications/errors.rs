//! Notification dispatch errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The scheduler returned a non-2xx response.
    #[error("unexpected response from notification scheduler: {0}")]
    UnexpectedResponse(String),
}
