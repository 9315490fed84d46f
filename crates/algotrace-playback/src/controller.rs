//! Playback state machine.
//!
//! The [`Controller`] moves an index over an immutable [`StepList`]. States:
//! `Idle -> Playing -> (Paused | Finished)`, with manual stepping allowed
//! from every state but `Finished` and `reset` returning to `Idle` from
//! anywhere.
//!
//! The controller has no clock. Auto-advance arrives as [`Controller::tick`]
//! calls carrying the generation the timer was started under. The generation
//! changes whenever a play session starts or the current one is invalidated
//! (pause, reset, load), so a tick from an older timer is reported as
//! [`TickOutcome::Stale`] and never moves the index.
//!
//! The index is always within `0..len`. Navigation past either end clamps.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use algotrace_core::{Snapshot, Step, StepKind, StepList};

use crate::config::PlaybackConfig;

/// Playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// At index 0, not playing (initial state).
    Idle,
    /// Auto-advancing on a timer.
    Playing,
    /// Stopped somewhere before the end.
    Paused,
    /// At the last index.
    Finished,
}

/// Result of a timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Moved one step forward and still playing.
    Advanced,
    /// Moved onto the last step.
    Finished,
    /// Not playing; nothing happened.
    Ignored,
    /// The tick belongs to an older play session.
    Stale,
}

/// Snapshot of where playback is, published to renderers on every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub index: usize,
    pub total: usize,
    pub state: PlaybackState,
}

impl Position {
    /// Fraction of the list shown so far, `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.total <= 1 {
            return 1.0;
        }
        self.index as f64 / (self.total - 1) as f64
    }
}

/// VCR-style controls over one step list.
#[derive(Debug)]
pub struct Controller<K, S> {
    list: StepList<K, S>,
    index: usize,
    state: PlaybackState,
    config: PlaybackConfig,
    generation: u64,
}

impl<K: StepKind, S: Snapshot> Controller<K, S> {
    pub fn new(list: StepList<K, S>) -> Self {
        Self::with_config(list, PlaybackConfig::default())
    }

    pub fn with_config(list: StepList<K, S>, config: PlaybackConfig) -> Self {
        Controller {
            list,
            index: 0,
            state: PlaybackState::Idle,
            config: config.with_speed(config.speed),
            generation: 0,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The step at the current index.
    pub fn current_step(&self) -> &Step<K, S> {
        // index < len is maintained by every transition
        &self.list.as_slice()[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Delay between auto-advanced steps.
    pub fn speed(&self) -> Duration {
        self.config.speed
    }

    /// Token a timer must present to [`tick`](Self::tick).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn list(&self) -> &StepList<K, S> {
        &self.list
    }

    pub fn position(&self) -> Position {
        Position {
            index: self.index,
            total: self.list.len(),
            state: self.state,
        }
    }

    fn last(&self) -> usize {
        self.list.last_index()
    }

    fn transition(&mut self, to: PlaybackState) {
        if self.state != to {
            tracing::trace!(from = ?self.state, to = ?to, index = self.index, "playback transition");
            self.state = to;
        }
    }

    fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    // ------------------------------------------------------------------
    // Controls
    // ------------------------------------------------------------------

    /// `Idle`/`Paused` -> `Playing` and starts a new play session.
    ///
    /// Returns false (and changes nothing) when already playing, finished,
    /// or sitting on the last step.
    pub fn play(&mut self) -> bool {
        match self.state {
            PlaybackState::Idle | PlaybackState::Paused if self.index < self.last() => {
                self.invalidate();
                self.transition(PlaybackState::Playing);
                true
            }
            _ => false,
        }
    }

    /// `Playing` -> `Paused`; no-op otherwise.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.invalidate();
            self.transition(PlaybackState::Paused);
        }
    }

    /// Advances one step for the play session `generation`.
    pub fn tick(&mut self, generation: u64) -> TickOutcome {
        if generation != self.generation {
            tracing::debug!(
                stale = generation,
                current = self.generation,
                "dropping stale tick"
            );
            return TickOutcome::Stale;
        }
        if self.state != PlaybackState::Playing {
            return TickOutcome::Ignored;
        }
        self.index = (self.index + 1).min(self.last());
        if self.index == self.last() {
            self.transition(PlaybackState::Finished);
            TickOutcome::Finished
        } else {
            TickOutcome::Advanced
        }
    }

    /// One step forward, clamped; no-op when finished.
    ///
    /// From `Idle` playback becomes `Paused`; reaching the last step
    /// finishes. `Playing` keeps playing.
    pub fn step_forward(&mut self) {
        if self.state == PlaybackState::Finished {
            return;
        }
        self.index = (self.index + 1).min(self.last());
        if self.index == self.last() {
            if self.state == PlaybackState::Playing {
                self.invalidate();
            }
            self.transition(PlaybackState::Finished);
        } else if self.state == PlaybackState::Idle {
            self.transition(PlaybackState::Paused);
        }
    }

    /// One step back when not at the start. Leaves `Finished` for `Paused`.
    pub fn step_backward(&mut self) {
        if self.index == 0 {
            return;
        }
        self.index -= 1;
        if matches!(self.state, PlaybackState::Finished | PlaybackState::Idle) {
            self.transition(PlaybackState::Paused);
        }
    }

    /// Back to index 0, `Idle`, from any state.
    pub fn reset(&mut self) {
        self.invalidate();
        self.index = 0;
        self.transition(PlaybackState::Idle);
    }

    /// Jumps to `index`, clamped into range.
    pub fn seek(&mut self, index: usize) {
        let target = index.min(self.last());
        if target == self.index {
            return;
        }
        self.index = target;
        if target == self.last() {
            if self.state == PlaybackState::Playing {
                self.invalidate();
            }
            self.transition(PlaybackState::Finished);
        } else if matches!(self.state, PlaybackState::Idle | PlaybackState::Finished) {
            self.transition(PlaybackState::Paused);
        }
    }

    /// Sets the auto-advance delay, clamped into the configured range.
    /// Returns the delay actually applied. A running timer picks it up on
    /// its next tick.
    pub fn set_speed(&mut self, speed: Duration) -> Duration {
        self.config.speed = self.config.clamp(speed);
        tracing::trace!(speed_ms = self.config.speed.as_millis() as u64, "speed changed");
        self.config.speed
    }

    /// Replaces the step list: back to `Idle` at index 0, and every
    /// outstanding tick becomes stale.
    pub fn load(&mut self, list: StepList<K, S>) {
        tracing::debug!(algorithm = list.algorithm(), steps = list.len(), "loading step list");
        self.list = list;
        self.reset();
    }
}
