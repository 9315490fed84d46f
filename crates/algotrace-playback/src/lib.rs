//! VCR-style playback over a recorded [`StepList`](algotrace_core::StepList).
//!
//! Playback never re-runs an algorithm: it only moves an index over steps
//! that were computed up front.
//!
//! # Modules
//!
//! - [`controller`]: the synchronous playback state machine
//! - [`player`]: async timer-driven auto-advance on top of the controller
//! - [`config`]: playback speed defaults and bounds
//! - [`render`]: the Renderer interface consumed by front ends

pub mod config;
pub mod controller;
pub mod player;
pub mod render;

pub use config::PlaybackConfig;
pub use controller::{Controller, PlaybackState, Position, TickOutcome};
pub use player::Player;
pub use render::Renderer;
