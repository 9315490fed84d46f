//! Insertion sort: shift larger elements right, then place the key.

use algotrace_core::step::indices;
use algotrace_core::{Algorithm, Counter, Limits, RecordError, Recorder, StepList};

use super::{finish_annotation, validate, SortEvent, SortState};

#[derive(Debug, Clone, Default)]
pub struct InsertionSort {
    limits: Limits,
}

impl InsertionSort {
    pub fn with_limits(limits: Limits) -> Self {
        InsertionSort { limits }
    }
}

impl Algorithm for InsertionSort {
    type Input = [i64];
    type Params = ();
    type Kind = SortEvent;
    type State = SortState;

    fn name(&self) -> &'static str {
        "insertion-sort"
    }

    fn record(
        &self,
        input: &[i64],
        _params: &(),
    ) -> Result<StepList<SortEvent, SortState>, RecordError> {
        validate(self.name(), &self.limits, input)?;

        let mut rec = Recorder::new(self.name());
        let mut state = SortState::new(input);

        for i in 1..input.len() {
            let key = state.values[i];
            state.active = Some((0, i));
            let mut j = i;

            while j > 0 {
                let left = state.values[j - 1];
                rec.count(Counter::Comparison);
                rec.step(
                    SortEvent::Compare,
                    &state,
                    indices([j - 1, j]),
                    format!("Compare {left} with key {key}"),
                );
                if left <= key {
                    break;
                }
                state.values[j] = left;
                rec.count(Counter::Write);
                rec.step(
                    SortEvent::Write,
                    &state,
                    indices([j]),
                    format!("Shift {left} right to position {j}"),
                );
                j -= 1;
            }

            if j != i {
                state.values[j] = key;
                rec.count(Counter::Write);
                rec.step(
                    SortEvent::Write,
                    &state,
                    indices([j]),
                    format!("Place key {key} at position {j}"),
                );
            }
        }

        let annotation = finish_annotation(&state.values);
        Ok(rec.finish(state.into_sorted(), annotation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_with_duplicates() {
        let list = InsertionSort::default()
            .record(&[4, 2, 4, 1], &())
            .unwrap();
        assert_eq!(list.final_state().values, vec![1, 2, 4, 4]);
        assert_eq!(list.check_invariants(), Ok(()));
    }

    #[test]
    fn already_sorted_only_compares() {
        let list = InsertionSort::default().record(&[1, 2, 3], &()).unwrap();
        assert_eq!(
            list.kinds(),
            vec![SortEvent::Compare, SortEvent::Compare, SortEvent::Complete]
        );
        assert_eq!(list.last().metrics.writes, 0);
    }

    #[test]
    fn shift_then_place() {
        let list = InsertionSort::default().record(&[2, 1], &()).unwrap();
        assert_eq!(
            list.kinds(),
            vec![
                SortEvent::Compare,
                SortEvent::Write,
                SortEvent::Write,
                SortEvent::Complete
            ]
        );
        // after the shift both slots hold 2
        assert_eq!(list.get(1).unwrap().state.values, vec![2, 2]);
        assert_eq!(list.get(2).unwrap().state.values, vec![1, 2]);
    }
}
