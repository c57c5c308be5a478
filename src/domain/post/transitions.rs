//! State transitions for a submission snapshot.
//!
//! Every transition is a pure value transform: it consumes the previous
//! [`AsyncPost`] and returns the next one. Sending the request is someone
//! else's job; these functions only record what happened.
//!
//! ```text
//!           init()
//!             │
//!             v
//!           NONE ──posting()──> POSTING ──posted()──> POSTED
//!                                  │  ^                  │
//!                          error() │  │ posting()        │ posting()
//!                                  v  │                  │
//!                                 ERROR <────────────────┘ (any state may
//!                                                           reach any other)
//! ```
//!
//! # Overlay vs. reconstruction
//!
//! `posting()` and `error()` are overlays: every field of the previous
//! snapshot is carried over and only the named fields are replaced.
//! `posted()` rebuilds the snapshot from scratch and drops `error`, so a
//! successful response never sits next to a stale failure.
//!
//! A consequence of the overlay is that `posting()` keeps the previous
//! `response_data` and `error`. A retry from `ERROR` therefore still shows
//! the last error while the new request is in flight.

use super::state::{AsyncPost, PostStatus};
use crate::domain::errors::ErrorPayload;

impl<S, R> AsyncPost<S, R> {
    /// A fresh submission holding `initial` as its payload.
    pub fn init(initial: S) -> Self {
        AsyncPost {
            status: PostStatus::None,
            data: Some(initial),
            response_data: None,
            error: None,
        }
    }

    /// Record that `data` is being sent.
    ///
    /// Overlay: `response_data` and `error` from the previous snapshot are
    /// kept as they are.
    pub fn posting(self, data: S) -> Self {
        AsyncPost {
            status: PostStatus::Posting,
            data: Some(data),
            ..self
        }
    }

    /// Record the server's response.
    ///
    /// Rebuilds the snapshot: `data` is carried over, `error` is dropped.
    pub fn posted(self, response_data: R) -> Self {
        AsyncPost {
            status: PostStatus::Posted,
            data: self.data,
            response_data: Some(response_data),
            error: None,
        }
    }

    /// Record a failure.
    ///
    /// Overlay: `data` and `response_data` are kept as they are.
    pub fn error(self, error: impl Into<ErrorPayload>) -> Self {
        AsyncPost {
            status: PostStatus::Error,
            error: Some(error.into()),
            ..self
        }
    }
}
