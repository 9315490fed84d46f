//! 0/1 knapsack by bottom-up table fill, then traceback.
//!
//! Granularity: one step per cell decision `(i, w)` for `i in 1..=n` and
//! `w in 0..=capacity` (`Include` when taking item `i - 1` improves the cell,
//! `Exclude` otherwise), then one `Select` or `Reject` per item while tracing
//! back from the bottom-right cell.

use serde::{Deserialize, Serialize};

use algotrace_core::step::cell;
use algotrace_core::{Algorithm, Counter, Limits, Mark, RecordError, Recorder, StepKind, StepList};

use super::table::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub weight: i64,
    pub value: i64,
}

impl Item {
    pub fn new(weight: i64, value: i64) -> Self {
        Item { weight, value }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnapsackEvent {
    Include,
    Exclude,
    Select,
    Reject,
    Complete,
}

impl StepKind for KnapsackEvent {
    const COMPLETE: Self = KnapsackEvent::Complete;

    fn label(&self) -> &'static str {
        match self {
            KnapsackEvent::Include => "include",
            KnapsackEvent::Exclude => "exclude",
            KnapsackEvent::Select => "select",
            KnapsackEvent::Reject => "reject",
            KnapsackEvent::Complete => "complete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnapsackState {
    pub items: Vec<Item>,
    pub capacity: usize,
    /// `table[i][w]`: best value using the first `i` items within weight `w`.
    pub table: Table<i64>,
    /// Indices of chosen items, ascending once traceback finishes.
    pub selected: Vec<usize>,
    pub max_value: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct Knapsack {
    limits: Limits,
}

impl Knapsack {
    pub fn with_limits(limits: Limits) -> Self {
        Knapsack { limits }
    }

    fn validate(&self, items: &[Item], capacity: i64) -> Result<usize, RecordError> {
        if capacity < 0 {
            tracing::debug!(capacity, "rejecting negative knapsack capacity");
            return Err(RecordError::invalid(
                self.name(),
                format!("capacity must not be negative (got {capacity})"),
            ));
        }
        if let Some((i, item)) = items
            .iter()
            .enumerate()
            .find(|(_, it)| it.weight < 0 || it.value < 0)
        {
            tracing::debug!(item = i, "rejecting negative knapsack item");
            return Err(RecordError::invalid(
                self.name(),
                format!(
                    "item {i} has negative weight or value ({}, {})",
                    item.weight, item.value
                ),
            ));
        }
        let capacity = usize::try_from(capacity).map_err(|_| RecordError::InputTooLarge {
            algorithm: self.name(),
            size: usize::MAX,
            limit: self.limits.max_table_cells,
        })?;
        self.limits.check_len(self.name(), items.len())?;
        self.limits
            .check_table(self.name(), items.len() + 1, capacity.saturating_add(1))?;
        Ok(capacity)
    }
}

impl Algorithm for Knapsack {
    type Input = [Item];
    /// Knapsack capacity.
    type Params = i64;
    type Kind = KnapsackEvent;
    type State = KnapsackState;

    fn name(&self) -> &'static str {
        "knapsack"
    }

    fn record(
        &self,
        items: &[Item],
        capacity: &i64,
    ) -> Result<StepList<KnapsackEvent, KnapsackState>, RecordError> {
        let cap = self.validate(items, *capacity)?;

        let mut rec = Recorder::new(self.name());
        let n = items.len();
        let mut state = KnapsackState {
            items: items.to_vec(),
            capacity: cap,
            table: Table::new(n + 1, cap + 1, 0),
            selected: Vec::new(),
            max_value: None,
        };

        for i in 1..=n {
            let item = items[i - 1];
            for w in 0..=cap {
                let without = *state.table.get(i - 1, w);
                let with = usize::try_from(item.weight)
                    .ok()
                    .filter(|&iw| iw <= w)
                    .map(|iw| state.table.get(i - 1, w - iw).saturating_add(item.value));

                let label = format!("Item {} (w={}, v={})", i - 1, item.weight, item.value);
                let (kind, best, annotation) = match with {
                    Some(with) => {
                        rec.count(Counter::Comparison);
                        if with > without {
                            (
                                KnapsackEvent::Include,
                                with,
                                format!("{label} at capacity {w}: take it, {with} > {without}"),
                            )
                        } else {
                            (
                                KnapsackEvent::Exclude,
                                without,
                                format!("{label} at capacity {w}: leave it, {with} <= {without}"),
                            )
                        }
                    }
                    None => (
                        KnapsackEvent::Exclude,
                        without,
                        format!("{label} does not fit in capacity {w}"),
                    ),
                };

                state.table.set(i, w, best);
                rec.count(Counter::Write);
                rec.step(kind, &state, cell(i, w), annotation);
            }
        }

        let mut w = cap;
        let mut selected = Vec::new();
        for i in (1..=n).rev() {
            let item = items[i - 1];
            let mut marks = cell(i, w);
            if state.table.get(i, w) != state.table.get(i - 1, w) {
                selected.push(i - 1);
                state.selected = selected.iter().rev().copied().collect();
                w -= item.weight as usize;
                marks.push(Mark::Index { index: i - 1 });
                rec.step(
                    KnapsackEvent::Select,
                    &state,
                    marks,
                    format!("Item {} is part of the optimum; {w} capacity left", i - 1),
                );
            } else {
                rec.step(
                    KnapsackEvent::Reject,
                    &state,
                    marks,
                    format!("Item {} is not needed", i - 1),
                );
            }
        }

        let best = *state.table.get(n, cap);
        state.max_value = Some(best);
        let annotation = format!("Best value {best} using item(s) {:?}", state.selected);
        Ok(rec.finish(state, annotation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_items_both_fit() {
        let items = [Item::new(2, 3), Item::new(3, 4)];
        let list = Knapsack::default().record(&items, &5).unwrap();
        let last = list.final_state();
        assert_eq!(last.max_value, Some(7));
        assert_eq!(last.selected, vec![0, 1]);
        assert_eq!(list.last().kind, KnapsackEvent::Complete);
    }

    #[test]
    fn one_step_per_cell_plus_traceback() {
        let items = [Item::new(2, 3), Item::new(3, 4)];
        let list = Knapsack::default().record(&items, &5).unwrap();
        // 2 items x 6 capacities, 2 traceback steps, completion
        assert_eq!(list.len(), 12 + 2 + 1);
        assert_eq!(list.last().metrics.writes, 12);
    }

    #[test]
    fn prefers_lighter_combination() {
        let items = [Item::new(5, 10), Item::new(4, 7), Item::new(3, 5)];
        let list = Knapsack::default().record(&items, &7).unwrap();
        assert_eq!(list.final_state().max_value, Some(12));
        assert_eq!(list.final_state().selected, vec![1, 2]);
    }

    #[test]
    fn zero_capacity() {
        let list = Knapsack::default().record(&[Item::new(1, 1)], &0).unwrap();
        assert_eq!(list.final_state().max_value, Some(0));
        assert!(list.final_state().selected.is_empty());
    }

    #[test]
    fn negative_capacity_is_rejected() {
        let err = Knapsack::default()
            .record(&[Item::new(1, 1)], &-1)
            .unwrap_err();
        assert!(matches!(err, RecordError::InvalidInput { .. }));
    }

    #[test]
    fn negative_weight_is_rejected() {
        let err = Knapsack::default()
            .record(&[Item::new(-2, 1)], &3)
            .unwrap_err();
        assert!(matches!(err, RecordError::InvalidInput { .. }));
    }

    #[test]
    fn huge_capacity_is_rejected_before_allocating() {
        let err = Knapsack::default()
            .record(&[Item::new(1, 1)], &i64::MAX)
            .unwrap_err();
        assert!(matches!(err, RecordError::InputTooLarge { .. }));
    }

    #[test]
    fn earlier_steps_see_partial_tables() {
        let items = [Item::new(1, 2)];
        let list = Knapsack::default().record(&items, &1).unwrap();
        // first step fills (1, 0); (1, 1) is still zero
        assert_eq!(*list.first().state.table.get(1, 1), 0);
        assert_eq!(*list.final_state().table.get(1, 1), 2);
    }
}
