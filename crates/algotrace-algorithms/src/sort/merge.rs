//! Top-down merge sort.
//!
//! Every split of a range longer than one element is a `Divide` step, so the
//! first step of any input with two or more elements is a `Divide`. Merges
//! take from the left half on ties, keeping the sort stable.

use algotrace_core::step::indices;
use algotrace_core::{Algorithm, Counter, Limits, RecordError, Recorder, StepList};

use super::{finish_annotation, validate, SortEvent, SortState};

#[derive(Debug, Clone, Default)]
pub struct MergeSort {
    limits: Limits,
}

impl MergeSort {
    pub fn with_limits(limits: Limits) -> Self {
        MergeSort { limits }
    }
}

impl Algorithm for MergeSort {
    type Input = [i64];
    type Params = ();
    type Kind = SortEvent;
    type State = SortState;

    fn name(&self) -> &'static str {
        "merge-sort"
    }

    fn record(
        &self,
        input: &[i64],
        _params: &(),
    ) -> Result<StepList<SortEvent, SortState>, RecordError> {
        validate(self.name(), &self.limits, input)?;

        let mut rec = Recorder::new(self.name());
        let mut state = SortState::new(input);
        sort_range(&mut rec, &mut state, 0, input.len(), 1);

        let annotation = finish_annotation(&state.values);
        Ok(rec.finish(state.into_sorted(), annotation))
    }
}

/// Sorts `values[lo..hi]`.
fn sort_range(
    rec: &mut Recorder<SortEvent, SortState>,
    state: &mut SortState,
    lo: usize,
    hi: usize,
    depth: u32,
) {
    if hi - lo <= 1 {
        return;
    }
    rec.observe_depth(depth);

    let mid = lo + (hi - lo) / 2;
    state.active = Some((lo, hi - 1));
    rec.step(
        SortEvent::Divide,
        state,
        indices(lo..hi),
        format!("Split [{lo}..{hi}) at {mid}"),
    );

    sort_range(rec, state, lo, mid, depth + 1);
    sort_range(rec, state, mid, hi, depth + 1);
    merge(rec, state, lo, mid, hi);
}

fn merge(
    rec: &mut Recorder<SortEvent, SortState>,
    state: &mut SortState,
    lo: usize,
    mid: usize,
    hi: usize,
) {
    state.active = Some((lo, hi - 1));
    let left = state.values[lo..mid].to_vec();
    let right = state.values[mid..hi].to_vec();
    let (mut i, mut j, mut k) = (0, 0, lo);

    while i < left.len() && j < right.len() {
        rec.count(Counter::Comparison);
        rec.step(
            SortEvent::Compare,
            state,
            indices([lo + i, mid + j]),
            format!("Compare {} and {}", left[i], right[j]),
        );
        let taken = if left[i] <= right[j] {
            i += 1;
            left[i - 1]
        } else {
            j += 1;
            right[j - 1]
        };
        write(rec, state, k, taken);
        k += 1;
    }

    for &value in left[i..].iter().chain(&right[j..]) {
        write(rec, state, k, value);
        k += 1;
    }

    rec.step(
        SortEvent::Merge,
        state,
        indices(lo..hi),
        format!("Merged [{lo}..{hi})"),
    );
}

fn write(rec: &mut Recorder<SortEvent, SortState>, state: &mut SortState, at: usize, value: i64) {
    state.values[at] = value;
    rec.count(Counter::Write);
    rec.step(
        SortEvent::Write,
        state,
        indices([at]),
        format!("Write {value} to position {at}"),
    );
}
