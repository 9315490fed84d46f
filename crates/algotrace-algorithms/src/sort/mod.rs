//! Comparison sorts over `i64` arrays.
//!
//! Granularity: one step per comparison, one per swap or write, plus the
//! structural events each sort has (`Divide`/`Merge` for merge sort,
//! `Pivot`/`Settle` for quicksort, `Settle` at the end of a bubble pass).
//! The terminal state holds the input sorted ascending with every index
//! settled.

pub mod bubble;
pub mod insertion;
pub mod merge;
pub mod quick;

use serde::{Deserialize, Serialize};

use algotrace_core::{Limits, RecordError, StepKind};

pub use bubble::BubbleSort;
pub use insertion::InsertionSort;
pub use merge::MergeSort;
pub use quick::{PivotStrategy, QuickSort};

/// Events recorded by the sorting algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortEvent {
    /// A range is split in two.
    Divide,
    /// Two sorted halves finished merging.
    Merge,
    Compare,
    Swap,
    /// A value is written into a slot (merge write-back, shift, placement).
    Write,
    /// A pivot is chosen.
    Pivot,
    /// An element reached its final position.
    Settle,
    Complete,
}

impl StepKind for SortEvent {
    const COMPLETE: Self = SortEvent::Complete;

    fn label(&self) -> &'static str {
        match self {
            SortEvent::Divide => "divide",
            SortEvent::Merge => "merge",
            SortEvent::Compare => "compare",
            SortEvent::Swap => "swap",
            SortEvent::Write => "write",
            SortEvent::Pivot => "pivot",
            SortEvent::Settle => "settle",
            SortEvent::Complete => "complete",
        }
    }
}

/// Array snapshot carried by sorting steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub values: Vec<i64>,
    /// Inclusive bounds of the range currently being worked on.
    pub active: Option<(usize, usize)>,
    /// `settled[i]` is true once position `i` holds its final value.
    pub settled: Vec<bool>,
}

impl SortState {
    pub(crate) fn new(values: &[i64]) -> Self {
        SortState {
            values: values.to_vec(),
            active: None,
            settled: vec![false; values.len()],
        }
    }

    /// Clears the working range and marks every position settled.
    pub(crate) fn into_sorted(mut self) -> Self {
        self.active = None;
        self.settled.iter_mut().for_each(|s| *s = true);
        self
    }

    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.values.swap(a, b);
    }
}

pub(crate) fn validate(
    algorithm: &'static str,
    limits: &Limits,
    values: &[i64],
) -> Result<(), RecordError> {
    limits.check_len(algorithm, values.len())
}

pub(crate) fn finish_annotation(values: &[i64]) -> String {
    format!("Sorted {} element(s)", values.len())
}
