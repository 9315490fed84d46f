//! Quicksort with Lomuto partitioning and a selectable pivot strategy.
//!
//! The chosen pivot is swapped to the end of the range before partitioning.
//! Median-of-three records its own comparisons like any other comparison.

use serde::{Deserialize, Serialize};

use algotrace_core::step::indices;
use algotrace_core::{Algorithm, Counter, Limits, RecordError, Recorder, StepList};

use super::{finish_annotation, validate, SortEvent, SortState};

/// How quicksort picks the pivot of a range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PivotStrategy {
    First,
    #[default]
    Last,
    Middle,
    MedianOfThree,
}

impl std::str::FromStr for PivotStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(PivotStrategy::First),
            "last" => Ok(PivotStrategy::Last),
            "middle" => Ok(PivotStrategy::Middle),
            "median-of-three" | "median" => Ok(PivotStrategy::MedianOfThree),
            _ => Err(format!(
                "invalid pivot strategy '{}', expected first/last/middle/median-of-three",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct QuickSort {
    limits: Limits,
}

impl QuickSort {
    pub fn with_limits(limits: Limits) -> Self {
        QuickSort { limits }
    }
}

impl Algorithm for QuickSort {
    type Input = [i64];
    type Params = PivotStrategy;
    type Kind = SortEvent;
    type State = SortState;

    fn name(&self) -> &'static str {
        "quick-sort"
    }

    fn record(
        &self,
        input: &[i64],
        pivot: &PivotStrategy,
    ) -> Result<StepList<SortEvent, SortState>, RecordError> {
        validate(self.name(), &self.limits, input)?;

        let mut rec = Recorder::new(self.name());
        let mut state = SortState::new(input);
        sort_range(&mut rec, &mut state, *pivot, 0, input.len(), 1);

        let annotation = finish_annotation(&state.values);
        Ok(rec.finish(state.into_sorted(), annotation))
    }
}

type Rec = Recorder<SortEvent, SortState>;

/// Sorts `values[lo..hi]`.
fn sort_range(
    rec: &mut Rec,
    state: &mut SortState,
    strategy: PivotStrategy,
    lo: usize,
    hi: usize,
    depth: u32,
) {
    match hi - lo {
        0 => return,
        1 => {
            state.settled[lo] = true;
            rec.step(
                SortEvent::Settle,
                state,
                indices([lo]),
                format!("{} is in place", state.values[lo]),
            );
            return;
        }
        _ => {}
    }
    rec.observe_depth(depth);
    state.active = Some((lo, hi - 1));

    let p = choose_pivot(rec, state, strategy, lo, hi);
    let last = hi - 1;
    rec.step(
        SortEvent::Pivot,
        state,
        indices([p]),
        format!("Pivot {} chosen at position {p}", state.values[p]),
    );
    if p != last {
        swap(rec, state, p, last);
    }

    let pivot = state.values[last];
    let mut store = lo;
    for j in lo..last {
        rec.count(Counter::Comparison);
        rec.step(
            SortEvent::Compare,
            state,
            indices([j, last]),
            format!("Compare {} with pivot {pivot}", state.values[j]),
        );
        if state.values[j] < pivot {
            if j != store {
                swap(rec, state, store, j);
            }
            store += 1;
        }
    }
    if store != last {
        swap(rec, state, store, last);
    }

    state.settled[store] = true;
    rec.step(
        SortEvent::Settle,
        state,
        indices([store]),
        format!("Pivot {pivot} settled at position {store}"),
    );

    sort_range(rec, state, strategy, lo, store, depth + 1);
    sort_range(rec, state, strategy, store + 1, hi, depth + 1);
}

fn swap(rec: &mut Rec, state: &mut SortState, a: usize, b: usize) {
    let (x, y) = (state.values[a], state.values[b]);
    state.swap(a, b);
    rec.count(Counter::Swap);
    rec.step(
        SortEvent::Swap,
        state,
        indices([a, b]),
        format!("Swap {x} and {y}"),
    );
}

fn choose_pivot(
    rec: &mut Rec,
    state: &SortState,
    strategy: PivotStrategy,
    lo: usize,
    hi: usize,
) -> usize {
    let mid = lo + (hi - lo) / 2;
    match strategy {
        PivotStrategy::First => lo,
        PivotStrategy::Last => hi - 1,
        PivotStrategy::Middle => mid,
        PivotStrategy::MedianOfThree => {
            let last = hi - 1;
            let mut less = |a: usize, b: usize| {
                rec.count(Counter::Comparison);
                rec.step(
                    SortEvent::Compare,
                    state,
                    indices([a, b]),
                    format!(
                        "Compare {} and {} for median",
                        state.values[a], state.values[b]
                    ),
                );
                state.values[a] < state.values[b]
            };
            // Orders (lo, mid, last) by value and keeps the middle one.
            let (mut a, mut b, mut c) = (lo, mid, last);
            if less(b, a) {
                std::mem::swap(&mut a, &mut b);
            }
            if less(c, b) {
                std::mem::swap(&mut b, &mut c);
                if less(b, a) {
                    std::mem::swap(&mut a, &mut b);
                }
            }
            b
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRATEGIES: [PivotStrategy; 4] = [
        PivotStrategy::First,
        PivotStrategy::Last,
        PivotStrategy::Middle,
        PivotStrategy::MedianOfThree,
    ];

    #[test]
    fn every_strategy_sorts() {
        let input = [9, -3, 5, 5, 0, 12, 7, -3];
        let mut expected = input.to_vec();
        expected.sort();
        for strategy in STRATEGIES {
            let list = QuickSort::default().record(&input, &strategy).unwrap();
            assert_eq!(list.final_state().values, expected, "{strategy:?}");
            assert_eq!(list.check_invariants(), Ok(()), "{strategy:?}");
        }
    }

    #[test]
    fn first_step_chooses_pivot() {
        let list = QuickSort::default()
            .record(&[3, 1, 2], &PivotStrategy::Last)
            .unwrap();
        assert_eq!(list.first().kind, SortEvent::Pivot);
        assert_eq!(list.first().highlight[0], algotrace_core::Mark::Index { index: 2 });
    }

    #[test]
    fn first_pivot_is_moved_to_the_end() {
        let list = QuickSort::default()
            .record(&[3, 1, 2], &PivotStrategy::First)
            .unwrap();
        assert_eq!(list.get(1).unwrap().kind, SortEvent::Swap);
        assert_eq!(list.get(1).unwrap().state.values, vec![2, 1, 3]);
    }

    #[test]
    fn median_of_three_picks_the_median() {
        let mut rec: Rec = Recorder::new("t");
        let state = SortState::new(&[1, 9, 5]);
        let p = choose_pivot(&mut rec, &state, PivotStrategy::MedianOfThree, 0, 3);
        assert_eq!(state.values[p], 5);

        let state = SortState::new(&[9, 5, 1]);
        let p = choose_pivot(&mut rec, &state, PivotStrategy::MedianOfThree, 0, 3);
        assert_eq!(state.values[p], 5);
    }

    #[test]
    fn every_position_is_settled_by_a_step() {
        let list = QuickSort::default()
            .record(&[4, 1, 3, 2], &PivotStrategy::Middle)
            .unwrap();
        let settles = list.iter().filter(|s| s.kind == SortEvent::Settle).count();
        assert_eq!(settles, 4);
    }

    #[test]
    fn pivot_strategy_parses() {
        assert_eq!("median".parse::<PivotStrategy>(), Ok(PivotStrategy::MedianOfThree));
        assert!("random".parse::<PivotStrategy>().is_err());
    }
}
