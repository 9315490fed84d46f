//! Timer-driven playback.
//!
//! [`Player`] owns a [`Controller`] behind one `Arc<Mutex<_>>`, so the timer
//! task and the caller's controls serialize all index updates through a
//! single owner. At most one timer task runs at a time. It sleeps for the
//! controller's *current* speed before each tick; a speed change wakes it
//! and moves the pending tick's deadline, so the new delay counts from the
//! previous tick without restarting playback.
//!
//! Every position change is published on a `watch` channel; renderers
//! subscribe with [`Player::subscribe`] and redraw when it changes.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex, Notify};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use algotrace_core::{Snapshot, Step, StepKind, StepList};

use crate::config::PlaybackConfig;
use crate::controller::{Controller, PlaybackState, Position, TickOutcome};

/// Async front for a [`Controller`].
pub struct Player<K, S> {
    controller: Arc<Mutex<Controller<K, S>>>,
    updates: Arc<watch::Sender<Position>>,
    speed_changed: Arc<Notify>,
    timer: Option<JoinHandle<()>>,
}

impl<K, S> Player<K, S>
where
    K: StepKind + Send + Sync + 'static,
    S: Snapshot + Send + Sync + 'static,
{
    pub fn new(list: StepList<K, S>, config: PlaybackConfig) -> Self {
        let controller = Controller::with_config(list, config);
        let (tx, _rx) = watch::channel(controller.position());
        Player {
            controller: Arc::new(Mutex::new(controller)),
            updates: Arc::new(tx),
            speed_changed: Arc::new(Notify::new()),
            timer: None,
        }
    }

    /// Receiver that sees every published position.
    pub fn subscribe(&self) -> watch::Receiver<Position> {
        self.updates.subscribe()
    }

    pub async fn position(&self) -> Position {
        self.controller.lock().await.position()
    }

    /// Owned copy of the step at the current index.
    pub async fn current_step(&self) -> Step<K, S> {
        self.controller.lock().await.current_step().clone()
    }

    /// Handle to the list being played.
    pub async fn list(&self) -> StepList<K, S> {
        self.controller.lock().await.list().clone()
    }

    pub async fn speed(&self) -> Duration {
        self.controller.lock().await.speed()
    }

    /// Starts auto-advance. Does nothing when the controller refuses to play
    /// (already playing, finished, or on the last step).
    pub async fn play(&mut self) {
        let generation = {
            let mut ctrl = self.controller.lock().await;
            if !ctrl.play() {
                return;
            }
            self.updates.send_replace(ctrl.position());
            ctrl.generation()
        };
        self.stop_timer();

        let controller = Arc::clone(&self.controller);
        let updates = Arc::clone(&self.updates);
        let speed_changed = Arc::clone(&self.speed_changed);
        tracing::info!(generation, "playback started");
        self.timer = Some(tokio::spawn(async move {
            loop {
                let since = Instant::now();
                let mut delay = controller.lock().await.speed();
                loop {
                    tokio::select! {
                        _ = tokio::time::sleep_until(since + delay) => break,
                        _ = speed_changed.notified() => {
                            delay = controller.lock().await.speed();
                        }
                    }
                }

                let mut ctrl = controller.lock().await;
                match ctrl.tick(generation) {
                    TickOutcome::Advanced => {
                        updates.send_replace(ctrl.position());
                    }
                    TickOutcome::Finished => {
                        updates.send_replace(ctrl.position());
                        tracing::info!(generation, index = ctrl.index(), "playback finished");
                        break;
                    }
                    TickOutcome::Ignored | TickOutcome::Stale => {
                        tracing::debug!(generation, "timer retired");
                        break;
                    }
                }
            }
        }));
    }

    pub async fn pause(&mut self) {
        self.stop_timer();
        self.apply(Controller::pause).await;
    }

    pub async fn step_forward(&mut self) {
        self.apply(Controller::step_forward).await;
    }

    pub async fn step_backward(&mut self) {
        self.apply(Controller::step_backward).await;
    }

    pub async fn seek(&mut self, index: usize) {
        self.apply(|ctrl| ctrl.seek(index)).await;
    }

    pub async fn reset(&mut self) {
        self.stop_timer();
        self.apply(Controller::reset).await;
    }

    /// Changes the delay. A running timer applies it to the tick it is
    /// waiting for, measured from the previous tick.
    pub async fn set_speed(&self, speed: Duration) -> Duration {
        let applied = self.controller.lock().await.set_speed(speed);
        self.speed_changed.notify_one();
        applied
    }

    /// Replaces the list and stops playback. A timer that already woke up
    /// finds its generation retired and leaves the new list alone.
    pub async fn load(&mut self, list: StepList<K, S>) {
        self.stop_timer();
        let mut ctrl = self.controller.lock().await;
        ctrl.load(list);
        // published even when the position looks unchanged: the list is new
        self.updates.send_replace(ctrl.position());
    }

    /// Waits until playback reaches the last step, returning the final
    /// position. Returns early if playback stops for any other reason.
    pub async fn wait_finished(&self) -> Position {
        let mut rx = self.subscribe();
        loop {
            let position = *rx.borrow_and_update();
            if position.state != PlaybackState::Playing {
                return position;
            }
            if rx.changed().await.is_err() {
                return position;
            }
        }
    }

    async fn apply<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Controller<K, S>),
    {
        let mut ctrl = self.controller.lock().await;
        let before = ctrl.position();
        f(&mut *ctrl);
        let after = ctrl.position();
        if after != before {
            self.updates.send_replace(after);
        }
        if after.state != PlaybackState::Playing {
            drop(ctrl);
            self.stop_timer();
        }
    }

    fn stop_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl<K, S> Drop for Player<K, S> {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}
