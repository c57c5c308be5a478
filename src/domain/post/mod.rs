//! Submission aggregate - lifecycle value and its transitions.
//!
//! This module contains the core domain logic for a submission:
//! - The lifecycle snapshot and status
//! - Pure transition methods

pub mod state;
pub mod transitions;

pub use state::*;
