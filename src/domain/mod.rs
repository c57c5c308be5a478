//! Core domain types for tracking submissions.
//!
//! This module contains pure value types with no I/O:
//! - The submission lifecycle snapshot and its transitions
//! - Error payloads and their flattening

pub mod errors;
pub mod post;
