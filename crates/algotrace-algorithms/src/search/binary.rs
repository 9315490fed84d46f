//! Binary search over an ascending array.
//!
//! Granularity: one `Probe` per midpoint comparison and one `Narrow` per
//! range update, then `Found` or `NotFound`.

use serde::{Deserialize, Serialize};

use algotrace_core::step::indices;
use algotrace_core::{
    Algorithm, Counter, Highlight, Limits, RecordError, Recorder, StepKind, StepList,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchEvent {
    Probe,
    Narrow,
    Found,
    NotFound,
    Complete,
}

impl StepKind for SearchEvent {
    const COMPLETE: Self = SearchEvent::Complete;

    fn label(&self) -> &'static str {
        match self {
            SearchEvent::Probe => "probe",
            SearchEvent::Narrow => "narrow",
            SearchEvent::Found => "found",
            SearchEvent::NotFound => "not_found",
            SearchEvent::Complete => "complete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchState {
    pub values: Vec<i64>,
    /// Inclusive lower bound of the remaining range.
    pub low: usize,
    /// Exclusive upper bound of the remaining range.
    pub high: usize,
    pub found: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct BinarySearch {
    limits: Limits,
}

impl BinarySearch {
    pub fn with_limits(limits: Limits) -> Self {
        BinarySearch { limits }
    }
}

impl Algorithm for BinarySearch {
    type Input = [i64];
    /// The target value.
    type Params = i64;
    type Kind = SearchEvent;
    type State = SearchState;

    fn name(&self) -> &'static str {
        "binary-search"
    }

    fn record(
        &self,
        input: &[i64],
        target: &i64,
    ) -> Result<StepList<SearchEvent, SearchState>, RecordError> {
        self.limits.check_len(self.name(), input.len())?;
        if let Some(at) = input.windows(2).position(|w| w[0] > w[1]) {
            tracing::debug!(position = at + 1, "rejecting unsorted binary search input");
            return Err(RecordError::invalid(
                self.name(),
                format!("input must be sorted ascending (position {})", at + 1),
            ));
        }

        let target = *target;
        let mut rec = Recorder::new(self.name());
        let mut state = SearchState {
            values: input.to_vec(),
            low: 0,
            high: input.len(),
            found: None,
        };

        while state.low < state.high {
            let mid = state.low + (state.high - state.low) / 2;
            let probe = state.values[mid];
            rec.count(Counter::Comparison);
            rec.step(
                SearchEvent::Probe,
                &state,
                indices([mid]),
                format!("Probe position {mid}: {probe} vs target {target}"),
            );

            if probe == target {
                state.found = Some(mid);
                rec.step(
                    SearchEvent::Found,
                    &state,
                    indices([mid]),
                    format!("Found {target} at position {mid}"),
                );
                break;
            }
            if probe < target {
                state.low = mid + 1;
            } else {
                state.high = mid;
            }
            rec.step(
                SearchEvent::Narrow,
                &state,
                indices(state.low..state.high),
                format!("Narrow to [{}..{})", state.low, state.high),
            );
        }

        if state.found.is_none() {
            rec.step(
                SearchEvent::NotFound,
                &state,
                Highlight::new(),
                format!("{target} is not present"),
            );
        }

        let annotation = match state.found {
            Some(at) => format!("Search finished: {target} at position {at}"),
            None => format!("Search finished: {target} not found"),
        };
        Ok(rec.finish(state, annotation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_present_value() {
        let list = BinarySearch::default()
            .record(&[1, 3, 5, 7, 9, 11], &7)
            .unwrap();
        assert_eq!(list.final_state().found, Some(3));
        assert!(list.kinds().contains(&SearchEvent::Found));
        assert_eq!(list.check_invariants(), Ok(()));
    }

    #[test]
    fn reports_missing_value() {
        let list = BinarySearch::default().record(&[1, 3, 5], &4).unwrap();
        assert_eq!(list.final_state().found, None);
        let kinds = list.kinds();
        assert_eq!(kinds[kinds.len() - 2], SearchEvent::NotFound);
        // log2(3) rounds up to two probes
        assert_eq!(list.last().metrics.comparisons, 2);
    }

    #[test]
    fn empty_input_is_not_found_immediately() {
        let list = BinarySearch::default().record(&[], &1).unwrap();
        assert_eq!(list.kinds(), vec![SearchEvent::NotFound, SearchEvent::Complete]);
    }

    #[test]
    fn unsorted_input_is_rejected() {
        let err = BinarySearch::default().record(&[1, 5, 2], &2).unwrap_err();
        assert!(matches!(err, RecordError::InvalidInput { .. }));
    }
}
