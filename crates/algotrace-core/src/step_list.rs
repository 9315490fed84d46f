//! The sealed, shareable result of a recording.
//!
//! A [`StepList`] is produced by [`Recorder::finish`](crate::Recorder::finish)
//! and is read-only from then on. The steps live behind an `Arc<[Step]>`, so
//! cloning the list hands out another reference to the same storage and the
//! playback controller and any renderer can hold it without locking.
//!
//! # Fingerprints
//!
//! [`StepList::fingerprint`] hashes the canonical JSON encoding with blake3.
//! All step types serialize without `HashMap`s, so equal lists always produce
//! equal fingerprints.

use std::sync::Arc;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::step::{Snapshot, Step, StepKind};

/// An ordered, immutable, never-empty sequence of steps.
#[derive(Debug)]
pub struct StepList<K, S> {
    algorithm: &'static str,
    steps: Arc<[Step<K, S>]>,
}

// Manual impl: a derive would require `K: Clone, S: Clone` for an Arc bump.
impl<K, S> Clone for StepList<K, S> {
    fn clone(&self) -> Self {
        StepList {
            algorithm: self.algorithm,
            steps: Arc::clone(&self.steps),
        }
    }
}

impl<K: PartialEq, S: PartialEq> PartialEq for StepList<K, S> {
    fn eq(&self, other: &Self) -> bool {
        self.algorithm == other.algorithm && self.steps[..] == other.steps[..]
    }
}

/// A structural defect found by [`StepList::check_invariants`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListDefect {
    #[error("step list is empty")]
    Empty,

    #[error("last step is not the terminal step")]
    NotTerminated,

    #[error("terminal step appears early at index {index}")]
    EarlyComplete { index: usize },

    #[error("metrics decrease right after step {index}")]
    MetricsDecreased { index: usize },
}

impl<K: StepKind, S: Snapshot> StepList<K, S> {
    pub(crate) fn sealed(algorithm: &'static str, steps: Vec<Step<K, S>>) -> Self {
        debug_assert!(!steps.is_empty());
        StepList {
            algorithm,
            steps: steps.into(),
        }
    }

    /// Name of the algorithm that produced the list.
    pub fn algorithm(&self) -> &'static str {
        self.algorithm
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false for a sealed list; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of the last step.
    pub fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn get(&self, index: usize) -> Option<&Step<K, S>> {
        self.steps.get(index)
    }

    pub fn first(&self) -> &Step<K, S> {
        &self.steps[0]
    }

    /// The terminal step.
    pub fn last(&self) -> &Step<K, S> {
        &self.steps[self.last_index()]
    }

    /// State of the fully processed structure.
    pub fn final_state(&self) -> &S {
        &self.last().state
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step<K, S>> {
        self.steps.iter()
    }

    pub fn as_slice(&self) -> &[Step<K, S>] {
        &self.steps
    }

    /// True when both handles point at the same recording.
    pub fn same_list(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.steps, &other.steps)
    }

    /// Kinds of every step in order; convenient for assertions.
    pub fn kinds(&self) -> Vec<K> {
        self.steps.iter().map(|s| s.kind.clone()).collect()
    }

    /// blake3 digest of the canonical JSON encoding, as lowercase hex.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        // Step types hold no HashMap, so the encoding is canonical.
        serde_json::to_writer(&mut hasher, self)
            .expect("step list serialization should never fail");
        hasher.finalize().to_hex().to_string()
    }

    /// Verifies the structural invariants every recording must satisfy.
    pub fn check_invariants(&self) -> Result<(), ListDefect> {
        if self.steps.is_empty() {
            return Err(ListDefect::Empty);
        }
        if !self.last().kind.is_complete() {
            return Err(ListDefect::NotTerminated);
        }
        if let Some(index) = self.steps[..self.last_index()]
            .iter()
            .position(|s| s.kind.is_complete())
        {
            return Err(ListDefect::EarlyComplete { index });
        }
        for (index, pair) in self.steps.windows(2).enumerate() {
            if !pair[1].metrics.dominates(&pair[0].metrics) {
                return Err(ListDefect::MetricsDecreased { index });
            }
        }
        Ok(())
    }
}

impl<'a, K, S> IntoIterator for &'a StepList<K, S> {
    type Item = &'a Step<K, S>;
    type IntoIter = std::slice::Iter<'a, Step<K, S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl<K: Serialize, S: Serialize> Serialize for StepList<K, S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let mut st = serializer.serialize_struct("StepList", 2)?;
        st.serialize_field("algorithm", self.algorithm)?;
        st.serialize_field("steps", &self.steps[..])?;
        st.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::Recorder;
    use crate::step::{indices, Counter, Highlight};

    #[derive(Debug, Clone, PartialEq, Serialize)]
    #[serde(rename_all = "snake_case")]
    enum Ev {
        Bump,
        Complete,
    }

    impl StepKind for Ev {
        const COMPLETE: Self = Ev::Complete;

        fn label(&self) -> &'static str {
            match self {
                Ev::Bump => "bump",
                Ev::Complete => "complete",
            }
        }
    }

    fn counting_list(n: usize) -> StepList<Ev, usize> {
        let mut rec = Recorder::new("count");
        for i in 0..n {
            rec.count(Counter::Write);
            rec.step(Ev::Bump, &i, indices([i]), format!("bump {i}"));
        }
        rec.finish(n, "done")
    }

    #[test]
    fn clone_shares_storage() {
        let list = counting_list(3);
        let other = list.clone();
        assert!(list.same_list(&other));
        assert_eq!(list, other);
    }

    #[test]
    fn equal_recordings_are_distinct_lists() {
        let a = counting_list(3);
        let b = counting_list(3);
        assert_eq!(a, b);
        assert!(!a.same_list(&b));
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn fingerprint_changes_with_content() {
        assert_ne!(counting_list(3).fingerprint(), counting_list(4).fingerprint());
    }

    #[test]
    fn accessors() {
        let list = counting_list(2);
        assert_eq!(list.len(), 3);
        assert_eq!(list.last_index(), 2);
        assert!(!list.is_empty());
        assert_eq!(list.first().state, 0);
        assert_eq!(*list.final_state(), 2);
        assert!(list.get(3).is_none());
        assert_eq!(list.kinds(), vec![Ev::Bump, Ev::Bump, Ev::Complete]);
        assert_eq!(list.iter().count(), 3);
        assert_eq!(list.algorithm(), "count");
    }

    #[test]
    fn recorded_lists_satisfy_invariants() {
        assert_eq!(counting_list(5).check_invariants(), Ok(()));
    }

    #[test]
    fn early_complete_is_reported() {
        let bogus = StepList::sealed(
            "bogus",
            vec![
                Step {
                    kind: Ev::Complete,
                    state: 0usize,
                    annotation: String::new(),
                    metrics: Default::default(),
                    highlight: Highlight::new(),
                },
                Step {
                    kind: Ev::Complete,
                    state: 0usize,
                    annotation: String::new(),
                    metrics: Default::default(),
                    highlight: Highlight::new(),
                },
            ],
        );
        assert_eq!(
            bogus.check_invariants(),
            Err(ListDefect::EarlyComplete { index: 0 })
        );
    }

    #[test]
    fn decreasing_metrics_are_reported() {
        let high = crate::step::Metrics {
            swaps: 2,
            ..Default::default()
        };
        let bogus = StepList::sealed(
            "bogus",
            vec![
                Step {
                    kind: Ev::Bump,
                    state: 0usize,
                    annotation: String::new(),
                    metrics: high,
                    highlight: Highlight::new(),
                },
                Step {
                    kind: Ev::Complete,
                    state: 0usize,
                    annotation: String::new(),
                    metrics: Default::default(),
                    highlight: Highlight::new(),
                },
            ],
        );
        assert_eq!(
            bogus.check_invariants(),
            Err(ListDefect::MetricsDecreased { index: 0 })
        );
    }

    #[test]
    fn serializes_with_algorithm_name() {
        let list = counting_list(1);
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json["algorithm"], "count");
        assert_eq!(json["steps"].as_array().unwrap().len(), 2);
        assert_eq!(json["steps"][1]["kind"], "complete");
        assert_eq!(json["steps"][0]["metrics"]["writes"], 1);
    }

    #[test]
    fn snapshot_single_step_list() {
        let rec: Recorder<Ev, Vec<i64>> = Recorder::new("noop");
        let list = rec.finish(vec![1, 2], "already sorted");
        insta::assert_json_snapshot!(list, @r###"
        {
          "algorithm": "noop",
          "steps": [
            {
              "kind": "complete",
              "state": [
                1,
                2
              ],
              "annotation": "already sorted",
              "metrics": {
                "comparisons": 0,
                "swaps": 0,
                "writes": 0,
                "visits": 0,
                "edges": 0,
                "max_depth": 0
              },
              "highlight": []
            }
          ]
        }
        "###);
    }
}
