//! Lifecycle state for asynchronous form submissions.
//!
//! This crate provides an immutable snapshot, [`AsyncPost`], describing one
//! submission (status, payload sent, response received, error reported),
//! pure transitions between its four statuses, helpers to flatten server
//! validation errors into display strings, and a status-keyed render
//! dispatch. A [`PostStore`] owns a snapshot and can drive a submission
//! through any [`PostTransport`].

pub mod domain;
pub mod error;
pub mod post;
pub mod render;
pub mod store;
pub mod transport;

// Re-export commonly used types
pub use error::{AsyncPostError, Result};
pub use post::*;
pub use render::{RenderHandlers, render_by_status};
pub use store::{PostAction, PostStore, StoreConfig};
pub use transport::{MockCall, MockTransport, PostTransport};
