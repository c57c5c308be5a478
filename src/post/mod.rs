//! Submission aggregate - lifecycle value and transitions.
//!
//! This module re-exports types from `domain::post` and `domain::errors`.
//! See those modules for the actual implementations.

pub use crate::domain::errors::{ErrorPayload, flatten_error_value, flatten_errors};
pub use crate::domain::post::state::*;
