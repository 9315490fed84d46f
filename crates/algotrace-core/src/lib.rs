//! Core data model for recording algorithm executions as replayable steps.
//!
//! An algorithm runs once, to completion, against an input. Every
//! semantically meaningful operation is captured as a [`Step`]: an owned
//! snapshot of the data structure, an event tag, narration, cumulative
//! [`Metrics`] and a [`Highlight`] for the renderer. The result is a sealed
//! [`StepList`], the only handoff between recording and playback.
//!
//! # Modules
//!
//! - [`step`]: Step, StepKind, Metrics, Mark and highlight builders
//! - [`recorder`]: the append-only Recorder
//! - [`step_list`]: the immutable, shareable StepList
//! - [`algorithm`]: the Algorithm trait and input Limits
//! - [`error`]: RecordError

pub mod algorithm;
pub mod error;
pub mod recorder;
pub mod step;
pub mod step_list;

// Re-export commonly used types
pub use algorithm::{Algorithm, Limits};
pub use error::RecordError;
pub use recorder::Recorder;
pub use step::{Counter, Highlight, Mark, Metrics, Snapshot, Step, StepKind};
pub use step_list::{ListDefect, StepList};
