//! Bubble sort with early exit on a swap-free pass.

use algotrace_core::step::indices;
use algotrace_core::{Algorithm, Counter, Limits, RecordError, Recorder, StepList};

use super::{finish_annotation, validate, SortEvent, SortState};

#[derive(Debug, Clone, Default)]
pub struct BubbleSort {
    limits: Limits,
}

impl BubbleSort {
    pub fn with_limits(limits: Limits) -> Self {
        BubbleSort { limits }
    }
}

impl Algorithm for BubbleSort {
    type Input = [i64];
    type Params = ();
    type Kind = SortEvent;
    type State = SortState;

    fn name(&self) -> &'static str {
        "bubble-sort"
    }

    fn record(
        &self,
        input: &[i64],
        _params: &(),
    ) -> Result<StepList<SortEvent, SortState>, RecordError> {
        validate(self.name(), &self.limits, input)?;

        let mut rec = Recorder::new(self.name());
        let mut state = SortState::new(input);
        let n = input.len();

        for pass in 0..n.saturating_sub(1) {
            let end = n - 1 - pass;
            state.active = Some((0, end));
            let mut swapped = false;

            for j in 0..end {
                let (a, b) = (state.values[j], state.values[j + 1]);
                rec.count(Counter::Comparison);
                rec.step(
                    SortEvent::Compare,
                    &state,
                    indices([j, j + 1]),
                    format!("Compare {a} and {b}"),
                );
                if a > b {
                    state.swap(j, j + 1);
                    swapped = true;
                    rec.count(Counter::Swap);
                    rec.step(
                        SortEvent::Swap,
                        &state,
                        indices([j, j + 1]),
                        format!("Swap {a} and {b}"),
                    );
                }
            }

            state.settled[end] = true;
            rec.step(
                SortEvent::Settle,
                &state,
                indices([end]),
                format!("{} bubbled up to position {end}", state.values[end]),
            );

            if !swapped {
                break;
            }
        }

        let annotation = finish_annotation(&state.values);
        Ok(rec.finish(state.into_sorted(), annotation))
    }
}
