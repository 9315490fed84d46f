//! Append-only step recording.
//!
//! [`Recorder`] is the only way to build a [`StepList`]. It owns the running
//! [`Metrics`], clones the state on every push, and seals the list with the
//! terminal step in [`Recorder::finish`]. Nothing can be removed or rewritten
//! once pushed.

use crate::step::{Counter, Highlight, Metrics, Snapshot, Step, StepKind};
use crate::step_list::StepList;

/// Builder that accumulates steps during a single algorithm run.
#[derive(Debug)]
pub struct Recorder<K, S> {
    algorithm: &'static str,
    steps: Vec<Step<K, S>>,
    metrics: Metrics,
}

impl<K: StepKind, S: Snapshot> Recorder<K, S> {
    /// Creates an empty recorder for the named algorithm.
    pub fn new(algorithm: &'static str) -> Self {
        tracing::debug!(algorithm, "recording started");
        Recorder {
            algorithm,
            steps: Vec::new(),
            metrics: Metrics::default(),
        }
    }

    /// Increments one counter by one.
    pub fn count(&mut self, counter: Counter) {
        self.count_n(counter, 1);
    }

    /// Increments one counter by `n`.
    pub fn count_n(&mut self, counter: Counter, n: u64) {
        let slot = match counter {
            Counter::Comparison => &mut self.metrics.comparisons,
            Counter::Swap => &mut self.metrics.swaps,
            Counter::Write => &mut self.metrics.writes,
            Counter::Visit => &mut self.metrics.visits,
            Counter::Edge => &mut self.metrics.edges,
        };
        *slot = slot.saturating_add(n);
    }

    /// Raises the depth high-water mark to `depth` if it is deeper.
    pub fn observe_depth(&mut self, depth: u32) {
        self.metrics.max_depth = self.metrics.max_depth.max(depth);
    }

    /// Counters as of now.
    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    /// Number of steps pushed so far.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Pushes a step with a deep copy of `state`.
    pub fn step(
        &mut self,
        kind: K,
        state: &S,
        highlight: Highlight,
        annotation: impl Into<String>,
    ) {
        debug_assert!(
            !kind.is_complete(),
            "the terminal step is pushed by Recorder::finish"
        );
        self.steps.push(Step {
            kind,
            state: state.clone(),
            annotation: annotation.into(),
            metrics: self.metrics,
            highlight,
        });
    }

    /// Appends the terminal step and seals the list.
    pub fn finish(mut self, state: S, annotation: impl Into<String>) -> StepList<K, S> {
        self.steps.push(Step {
            kind: K::COMPLETE,
            state,
            annotation: annotation.into(),
            metrics: self.metrics,
            highlight: Highlight::new(),
        });
        tracing::debug!(
            algorithm = self.algorithm,
            steps = self.steps.len(),
            comparisons = self.metrics.comparisons,
            "recording finished"
        );
        StepList::sealed(self.algorithm, self.steps)
    }
}


#[cfg(test)]
mod proptests {
    use proptest::prelude::*;
    use serde::Serialize;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    enum Ev {
        Touch,
        Done,
    }

    impl StepKind for Ev {
        const COMPLETE: Self = Ev::Done;

        fn label(&self) -> &'static str {
            match self {
                Ev::Touch => "touch",
                Ev::Done => "complete",
            }
        }
    }

    #[derive(Debug, Clone)]
    enum Call {
        Count(Counter, u64),
        Depth(u32),
        Step(i64),
    }

    fn counter() -> impl Strategy<Value = Counter> {
        prop_oneof![
            Just(Counter::Comparison),
            Just(Counter::Swap),
            Just(Counter::Write),
            Just(Counter::Visit),
            Just(Counter::Edge),
        ]
    }

    fn call() -> impl Strategy<Value = Call> {
        prop_oneof![
            (counter(), 0u64..1_000).prop_map(|(c, n)| Call::Count(c, n)),
            (0u32..64).prop_map(Call::Depth),
            any::<i64>().prop_map(Call::Step),
        ]
    }

    proptest! {
        #[test]
        fn any_call_sequence_yields_a_valid_list(calls in prop::collection::vec(call(), 0..64)) {
            let mut rec: Recorder<Ev, Vec<i64>> = Recorder::new("test");
            let mut live = Vec::new();
            for call in &calls {
                match *call {
                    Call::Count(counter, n) => rec.count_n(counter, n),
                    Call::Depth(depth) => rec.observe_depth(depth),
                    Call::Step(value) => {
                        live.push(value);
                        rec.step(Ev::Touch, &live, Highlight::new(), "touch");
                    }
                }
            }
            let pushed = calls.iter().filter(|c| matches!(c, Call::Step(_))).count();
            let list = rec.finish(live, "done");

            prop_assert!(list.check_invariants().is_ok());
            prop_assert_eq!(list.len(), pushed + 1);
            for pair in list.as_slice().windows(2) {
                prop_assert!(pair[1].metrics.dominates(&pair[0].metrics));
            }
            // every snapshot holds exactly the values pushed up to that step
            for (i, step) in list.iter().take(pushed).enumerate() {
                prop_assert_eq!(step.state.len(), i + 1);
            }
        }
    }
}
