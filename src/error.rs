//! Error types for the submission lifecycle.
//!
//! Lifecycle failures (a server rejecting a form, a dropped connection) are
//! captured as data in [`ErrorPayload`](crate::ErrorPayload) and never surface
//! here. This type is for the caller's own mistakes and for the transport seam.

use thiserror::Error;

use crate::domain::errors::ErrorPayload;

/// Result type alias using the async-post error type.
pub type Result<T> = std::result::Result<T, AsyncPostError>;

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum AsyncPostError {
    /// An error payload arrived in a shape that is neither a message nor a
    /// field-to-messages mapping.
    #[error("Unsupported error payload shape: {0}")]
    UnsupportedErrorShape(String),

    /// The server refused the submission and explained why.
    #[error("Submission rejected: {0}")]
    Rejected(ErrorPayload),

    /// The transport failed before a response was received.
    #[error("Transport failed: {0}")]
    Transport(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// General error from anyhow
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<AsyncPostError> for ErrorPayload {
    fn from(error: AsyncPostError) -> Self {
        match error {
            AsyncPostError::Rejected(payload) => payload,
            other => ErrorPayload::Message(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_keeps_server_payload() {
        let payload = ErrorPayload::fields([("email", vec!["invalid"])]);
        let folded: ErrorPayload = AsyncPostError::Rejected(payload.clone()).into();
        assert_eq!(folded, payload);
    }

    #[test]
    fn test_transport_error_becomes_message() {
        let folded: ErrorPayload = AsyncPostError::Transport("connection reset".to_string()).into();
        assert_eq!(
            folded,
            ErrorPayload::Message("Transport failed: connection reset".to_string())
        );
    }

    #[test]
    fn test_anyhow_error_is_transparent() {
        let folded: ErrorPayload = AsyncPostError::from(anyhow::anyhow!("boom")).into();
        assert_eq!(folded.flatten(), vec!["boom".to_string()]);
    }
}
