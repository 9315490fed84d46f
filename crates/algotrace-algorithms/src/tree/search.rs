//! BST lookup. The tree is built from the input keys without recording;
//! only the search path is recorded.

use algotrace_core::step::keys;
use algotrace_core::{Algorithm, Counter, Highlight, Limits, RecordError, Recorder, StepList};

use super::{Slot, TreeEvent, TreeState};

#[derive(Debug, Clone, Default)]
pub struct BstSearch {
    limits: Limits,
}

impl BstSearch {
    pub fn with_limits(limits: Limits) -> Self {
        BstSearch { limits }
    }
}

impl Algorithm for BstSearch {
    /// Keys the tree is built from.
    type Input = [i64];
    /// The key to look up.
    type Params = i64;
    type Kind = TreeEvent;
    type State = TreeState;

    fn name(&self) -> &'static str {
        "bst-search"
    }

    fn record(
        &self,
        input: &[i64],
        target: &i64,
    ) -> Result<StepList<TreeEvent, TreeState>, RecordError> {
        self.limits.check_len(self.name(), input.len())?;

        let target = *target;
        let mut rec = Recorder::new(self.name());
        let state = TreeState::build(input);

        let slot = state.descend(target, |at, depth| {
            let node_key = state.nodes[at].key;
            rec.count(Counter::Comparison);
            rec.count(Counter::Visit);
            rec.observe_depth(depth);
            rec.step(
                TreeEvent::Compare,
                &state,
                keys([node_key]),
                format!("Compare {target} with {node_key}"),
            );
        });

        let found = match slot {
            Slot::Occupied(_) => {
                rec.step(
                    TreeEvent::Found,
                    &state,
                    keys([target]),
                    format!("Found {target}"),
                );
                true
            }
            _ => {
                rec.step(
                    TreeEvent::NotFound,
                    &state,
                    Highlight::new(),
                    format!("{target} is not in the tree"),
                );
                false
            }
        };

        let annotation = if found {
            format!("Search for {target} succeeded")
        } else {
            format!("Search for {target} failed")
        };
        Ok(rec.finish(state, annotation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_the_search_path() {
        let list = BstSearch::default().record(&[5, 3, 8, 4], &4).unwrap();
        use TreeEvent::*;
        assert_eq!(list.kinds(), vec![Compare, Compare, Compare, Found, Complete]);
        assert_eq!(list.last().metrics.max_depth, 3);
    }

    #[test]
    fn missing_key() {
        let list = BstSearch::default().record(&[5, 3, 8], &7).unwrap();
        let kinds = list.kinds();
        assert_eq!(kinds[kinds.len() - 2], TreeEvent::NotFound);
    }

    #[test]
    fn empty_tree_is_not_found() {
        let list = BstSearch::default().record(&[], &1).unwrap();
        assert_eq!(list.kinds(), vec![TreeEvent::NotFound, TreeEvent::Complete]);
    }
}
