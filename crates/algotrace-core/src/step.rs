//! The step record: one immutable moment of an algorithm run.
//!
//! A [`Step`] owns everything it describes. Its `state` is a deep copy taken
//! by the [`Recorder`](crate::Recorder) at push time, so later mutation of the
//! structure being processed can never reach back into an earlier step.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Tag identifying the event a step records.
///
/// Every algorithm family defines its own closed enum. Exactly one variant is
/// the terminal one ([`StepKind::COMPLETE`]) and it only ever appears as the
/// last step of a list.
pub trait StepKind: Clone + fmt::Debug + PartialEq + Serialize {
    /// The terminal variant.
    const COMPLETE: Self;

    /// Stable lowercase label, used for narration and the CLI.
    fn label(&self) -> &'static str;

    fn is_complete(&self) -> bool {
        *self == Self::COMPLETE
    }
}

/// Bound for the data-structure copy carried by a step.
pub trait Snapshot: Clone + fmt::Debug + PartialEq + Serialize {}

impl<T> Snapshot for T where T: Clone + fmt::Debug + PartialEq + Serialize {}

/// Cumulative counters at the time a step was recorded.
///
/// Counters only grow: the recorder exposes increments and a depth
/// high-water mark, never a setter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    /// Element or key comparisons.
    pub comparisons: u64,
    /// Element exchanges.
    pub swaps: u64,
    /// Writes into the structure (merge write-backs, shifts, table cells).
    pub writes: u64,
    /// Vertices or nodes visited.
    pub visits: u64,
    /// Edges examined during a traversal.
    pub edges: u64,
    /// Deepest recursion or stack depth reached so far.
    pub max_depth: u32,
}

impl Metrics {
    /// True when no counter in `self` is below the one in `earlier`.
    pub fn dominates(&self, earlier: &Metrics) -> bool {
        self.comparisons >= earlier.comparisons
            && self.swaps >= earlier.swaps
            && self.writes >= earlier.writes
            && self.visits >= earlier.visits
            && self.edges >= earlier.edges
            && self.max_depth >= earlier.max_depth
    }
}

/// Selects which counter [`Recorder::count`](crate::Recorder::count) bumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    Comparison,
    Swap,
    Write,
    Visit,
    Edge,
}

/// Something a renderer should emphasize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Mark {
    /// A position in an array.
    Index { index: usize },
    /// A graph vertex by name.
    Vertex { name: String },
    /// A DP table cell.
    Cell { row: usize, col: usize },
    /// A tree key.
    Key { key: i64 },
}

/// Marks attached to a step. Almost always two or fewer.
pub type Highlight = SmallVec<[Mark; 4]>;

/// Builds a highlight from array positions.
pub fn indices<I: IntoIterator<Item = usize>>(positions: I) -> Highlight {
    positions.into_iter().map(|index| Mark::Index { index }).collect()
}

/// Builds a highlight from a single DP cell.
pub fn cell(row: usize, col: usize) -> Highlight {
    let mut marks = Highlight::new();
    marks.push(Mark::Cell { row, col });
    marks
}

/// Builds a highlight from vertex names.
pub fn vertices<'a, I: IntoIterator<Item = &'a str>>(names: I) -> Highlight {
    names
        .into_iter()
        .map(|name| Mark::Vertex {
            name: name.to_string(),
        })
        .collect()
}

/// Builds a highlight from tree keys.
pub fn keys<I: IntoIterator<Item = i64>>(keys: I) -> Highlight {
    keys.into_iter().map(|key| Mark::Key { key }).collect()
}

/// A single recorded moment of an algorithm's execution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step<K, S> {
    /// What happened.
    pub kind: K,
    /// Owned copy of the data structure at this moment.
    pub state: S,
    /// Human-readable narration.
    pub annotation: String,
    /// Counters accumulated up to and including this step.
    pub metrics: Metrics,
    /// Positions, vertices, cells or keys to emphasize.
    pub highlight: Highlight,
}
