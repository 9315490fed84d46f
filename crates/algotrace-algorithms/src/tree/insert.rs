//! BST insertion of a key sequence.
//!
//! Granularity: one `Compare` per node on the way down, then `Insert` or
//! `Duplicate` per key.

use algotrace_core::step::keys;
use algotrace_core::{Algorithm, Counter, Limits, RecordError, Recorder, StepList};

use super::{Slot, TreeEvent, TreeState};

#[derive(Debug, Clone, Default)]
pub struct BstInsert {
    limits: Limits,
}

impl BstInsert {
    pub fn with_limits(limits: Limits) -> Self {
        BstInsert { limits }
    }
}

impl Algorithm for BstInsert {
    /// Keys, inserted in order.
    type Input = [i64];
    type Params = ();
    type Kind = TreeEvent;
    type State = TreeState;

    fn name(&self) -> &'static str {
        "bst-insert"
    }

    fn record(
        &self,
        input: &[i64],
        _params: &(),
    ) -> Result<StepList<TreeEvent, TreeState>, RecordError> {
        self.limits.check_len(self.name(), input.len())?;

        let mut rec = Recorder::new(self.name());
        let mut state = TreeState::default();

        for &key in input {
            let slot = state.descend(key, |at, depth| {
                let node_key = state.nodes[at].key;
                rec.count(Counter::Comparison);
                rec.observe_depth(depth);
                rec.step(
                    TreeEvent::Compare,
                    &state,
                    keys([node_key, key]),
                    format!("Compare {key} with {node_key}"),
                );
            });

            let annotation = match slot {
                Slot::Root => format!("Insert {key} as the root"),
                Slot::Left(parent) => {
                    format!("Insert {key} left of {}", state.nodes[parent].key)
                }
                Slot::Right(parent) => {
                    format!("Insert {key} right of {}", state.nodes[parent].key)
                }
                Slot::Occupied(_) => format!("{key} is already in the tree; skip"),
            };
            match state.attach(key, &slot) {
                Some(_) => {
                    rec.count(Counter::Write);
                    rec.step(TreeEvent::Insert, &state, keys([key]), annotation);
                }
                None => rec.step(TreeEvent::Duplicate, &state, keys([key]), annotation),
            }
        }

        let annotation = format!(
            "Tree holds {} key(s), height {}",
            state.nodes.len(),
            state.height()
        );
        Ok(rec.finish(state, annotation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_keys_in_search_order() {
        let list = BstInsert::default().record(&[5, 3, 8, 4], &()).unwrap();
        use TreeEvent::*;
        assert_eq!(
            list.kinds(),
            vec![Insert, Compare, Insert, Compare, Insert, Compare, Compare, Insert, Complete]
        );
        assert_eq!(list.final_state().in_order(), vec![3, 4, 5, 8]);
        assert_eq!(list.last().metrics.comparisons, 4);
        assert_eq!(list.last().metrics.max_depth, 2);
    }

    #[test]
    fn duplicates_are_skipped() {
        let list = BstInsert::default().record(&[2, 2], &()).unwrap();
        assert_eq!(
            list.kinds(),
            vec![TreeEvent::Insert, TreeEvent::Compare, TreeEvent::Duplicate, TreeEvent::Complete]
        );
        assert_eq!(list.final_state().nodes.len(), 1);
    }

    #[test]
    fn earlier_snapshots_keep_their_shape() {
        let list = BstInsert::default().record(&[1, 2, 3], &()).unwrap();
        assert_eq!(list.first().state.nodes.len(), 1);
        assert_eq!(list.final_state().nodes.len(), 3);
    }

    #[test]
    fn empty_key_list() {
        let list = BstInsert::default().record(&[], &()).unwrap();
        assert_eq!(list.kinds(), vec![TreeEvent::Complete]);
        assert_eq!(list.final_state().root, None);
    }
}
