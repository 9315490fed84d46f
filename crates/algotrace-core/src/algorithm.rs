//! The [`Algorithm`] trait: the recording contract every algorithm implements.
//!
//! A recording is a pure, synchronous function of its input and parameters:
//! - it never mutates the caller's input (input is taken by shared reference),
//! - it never waits on a clock (pacing belongs to playback),
//! - it is deterministic, so two recordings of the same input compare equal,
//! - it validates before recording, so an error never carries partial output.

use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::step::{Snapshot, StepKind};
use crate::step_list::StepList;

/// Upper bounds on input size, checked before recording starts.
///
/// Every step owns a copy of the structure, so the size of a recording grows
/// with the input size times the step count. The defaults suit interactive
/// visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Maximum element count for arrays, key sequences and strings.
    pub max_len: usize,
    /// Maximum cell count for dynamic programming tables.
    pub max_table_cells: usize,
    /// Maximum vertex count for graphs.
    pub max_vertices: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_len: 256,
            max_table_cells: 10_000,
            max_vertices: 256,
        }
    }
}

impl Limits {
    /// Fails with [`RecordError::InputTooLarge`] when `len > max_len`.
    pub fn check_len(&self, algorithm: &'static str, len: usize) -> Result<(), RecordError> {
        check(algorithm, len, self.max_len)
    }

    /// Fails when a `rows x cols` table would exceed `max_table_cells`.
    pub fn check_table(
        &self,
        algorithm: &'static str,
        rows: usize,
        cols: usize,
    ) -> Result<(), RecordError> {
        let cells = rows.checked_mul(cols).unwrap_or(usize::MAX);
        check(algorithm, cells, self.max_table_cells)
    }

    pub fn check_vertices(
        &self,
        algorithm: &'static str,
        count: usize,
    ) -> Result<(), RecordError> {
        check(algorithm, count, self.max_vertices)
    }
}

fn check(algorithm: &'static str, size: usize, limit: usize) -> Result<(), RecordError> {
    if size > limit {
        return Err(RecordError::InputTooLarge {
            algorithm,
            size,
            limit,
        });
    }
    Ok(())
}

/// A recordable algorithm.
///
/// Implementations run the reference algorithm once over `input` and return
/// the full step list. `record` is the whole public surface of a recorder.
pub trait Algorithm {
    /// The data structure being processed.
    type Input: ?Sized;
    /// Algorithm parameters (pivot strategy, start vertex, capacity, ...).
    type Params;
    /// The closed set of events this algorithm records.
    type Kind: StepKind;
    /// The snapshot type carried by every step.
    type State: Snapshot;

    /// Stable kebab-case name.
    fn name(&self) -> &'static str;

    /// Runs the algorithm to completion and returns its step list.
    fn record(
        &self,
        input: &Self::Input,
        params: &Self::Params,
    ) -> Result<StepList<Self::Kind, Self::State>, RecordError>;
}
