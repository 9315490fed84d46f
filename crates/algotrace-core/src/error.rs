//! Recording error types for algotrace-core.
//!
//! Uses `thiserror` for structured, matchable error variants. Every variant
//! is an input validation failure: recorders check their input before the
//! first step is pushed, so an error never comes with a partial step list.

use serde::Serialize;
use thiserror::Error;

/// Errors produced while validating input for a recording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
pub enum RecordError {
    /// The input violates a precondition of the algorithm.
    #[error("invalid input for {algorithm}: {reason}")]
    InvalidInput {
        algorithm: &'static str,
        reason: String,
    },

    /// The input exceeds the configured [`Limits`](crate::Limits).
    #[error("input too large for {algorithm}: {size} exceeds limit {limit}")]
    InputTooLarge {
        algorithm: &'static str,
        size: usize,
        limit: usize,
    },

    /// A traversal was asked to start from a vertex the graph does not have.
    #[error("unknown vertex: '{vertex}'")]
    UnknownVertex { vertex: String },
}

impl RecordError {
    /// Shorthand for [`RecordError::InvalidInput`].
    pub fn invalid(algorithm: &'static str, reason: impl Into<String>) -> Self {
        RecordError::InvalidInput {
            algorithm,
            reason: reason.into(),
        }
    }
}
