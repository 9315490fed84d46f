//! Levenshtein edit distance with operation traceback.
//!
//! Granularity: one `Initialize` step for the base row and column, one step
//! per interior cell tagged with the operation that produced its value, then
//! one `Trace` step per operation on the way back from the bottom-right
//! cell. Traceback prefers the diagonal (keep or substitute), then delete,
//! then insert.

use serde::{Deserialize, Serialize};

use algotrace_core::step::cell;
use algotrace_core::{Algorithm, Counter, Highlight, Limits, RecordError, Recorder, StepKind, StepList};

use super::table::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditEvent {
    Initialize,
    Keep,
    Substitute,
    Delete,
    Insert,
    Trace,
    Complete,
}

impl StepKind for EditEvent {
    const COMPLETE: Self = EditEvent::Complete;

    fn label(&self) -> &'static str {
        match self {
            EditEvent::Initialize => "initialize",
            EditEvent::Keep => "keep",
            EditEvent::Substitute => "substitute",
            EditEvent::Delete => "delete",
            EditEvent::Insert => "insert",
            EditEvent::Trace => "trace",
            EditEvent::Complete => "complete",
        }
    }
}

/// One operation turning the source into the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    Keep { ch: char },
    Substitute { from: char, to: char },
    Delete { ch: char },
    Insert { ch: char },
}

impl EditOp {
    /// Edits cost one; keeping a character is free.
    pub fn cost(&self) -> usize {
        match self {
            EditOp::Keep { .. } => 0,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditDistanceState {
    pub source: Vec<char>,
    pub target: Vec<char>,
    /// `table[i][j]`: distance between the first `i` source chars and the
    /// first `j` target chars.
    pub table: Table<usize>,
    /// Operations in forward order; grows from the back during traceback.
    pub operations: Vec<EditOp>,
    pub distance: Option<usize>,
}

/// Source and target strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringPair {
    pub source: String,
    pub target: String,
}

impl StringPair {
    pub fn new(source: &str, target: &str) -> Self {
        StringPair {
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EditDistance {
    limits: Limits,
}

impl EditDistance {
    pub fn with_limits(limits: Limits) -> Self {
        EditDistance { limits }
    }
}

impl Algorithm for EditDistance {
    type Input = StringPair;
    type Params = ();
    type Kind = EditEvent;
    type State = EditDistanceState;

    fn name(&self) -> &'static str {
        "edit-distance"
    }

    fn record(
        &self,
        input: &StringPair,
        _params: &(),
    ) -> Result<StepList<EditEvent, EditDistanceState>, RecordError> {
        let source: Vec<char> = input.source.chars().collect();
        let target: Vec<char> = input.target.chars().collect();
        let (m, n) = (source.len(), target.len());
        self.limits.check_len(self.name(), m.max(n))?;
        self.limits.check_table(self.name(), m + 1, n + 1)?;

        let mut rec = Recorder::new(self.name());
        let mut table = Table::new(m + 1, n + 1, 0usize);
        for i in 0..=m {
            table.set(i, 0, i);
        }
        for j in 0..=n {
            table.set(0, j, j);
        }
        rec.count_n(Counter::Write, (m + n + 1) as u64);
        let mut state = EditDistanceState {
            source,
            target,
            table,
            operations: Vec::new(),
            distance: None,
        };
        rec.step(
            EditEvent::Initialize,
            &state,
            Highlight::new(),
            format!("Base cases: {m} deletion(s) down the first column, {n} insertion(s) along the first row"),
        );

        for i in 1..=m {
            for j in 1..=n {
                let (s, t) = (state.source[i - 1], state.target[j - 1]);
                rec.count(Counter::Comparison);
                let diag = *state.table.get(i - 1, j - 1);
                let (kind, value, annotation) = if s == t {
                    (EditEvent::Keep, diag, format!("'{s}' matches; keep ({diag})"))
                } else {
                    let sub = diag + 1;
                    let del = state.table.get(i - 1, j) + 1;
                    let ins = state.table.get(i, j - 1) + 1;
                    if sub <= del && sub <= ins {
                        (EditEvent::Substitute, sub, format!("Substitute '{s}' -> '{t}' ({sub})"))
                    } else if del <= ins {
                        (EditEvent::Delete, del, format!("Delete '{s}' ({del})"))
                    } else {
                        (EditEvent::Insert, ins, format!("Insert '{t}' ({ins})"))
                    }
                };
                state.table.set(i, j, value);
                rec.count(Counter::Write);
                rec.step(kind, &state, cell(i, j), annotation);
            }
        }

        let (mut i, mut j) = (m, n);
        while i > 0 || j > 0 {
            let here = *state.table.get(i, j);
            let op = if i > 0 && j > 0 {
                let (s, t) = (state.source[i - 1], state.target[j - 1]);
                let diag = *state.table.get(i - 1, j - 1);
                if s == t && here == diag {
                    Some(EditOp::Keep { ch: s })
                } else if here == diag + 1 {
                    Some(EditOp::Substitute { from: s, to: t })
                } else {
                    None
                }
            } else {
                None
            };
            let op = op.unwrap_or_else(|| {
                if i > 0 && (j == 0 || here == state.table.get(i - 1, j) + 1) {
                    EditOp::Delete {
                        ch: state.source[i - 1],
                    }
                } else {
                    EditOp::Insert {
                        ch: state.target[j - 1],
                    }
                }
            });

            let marks = cell(i, j);
            match op {
                EditOp::Keep { .. } | EditOp::Substitute { .. } => {
                    i -= 1;
                    j -= 1;
                }
                EditOp::Delete { .. } => i -= 1,
                EditOp::Insert { .. } => j -= 1,
            }
            state.operations.insert(0, op);
            rec.step(EditEvent::Trace, &state, marks, describe(&op));
        }

        let distance = *state.table.get(m, n);
        state.distance = Some(distance);
        let annotation = format!(
            "Edit distance {distance}: {} operation(s), {} edit(s)",
            state.operations.len(),
            state.operations.iter().map(EditOp::cost).sum::<usize>()
        );
        Ok(rec.finish(state, annotation))
    }
}

fn describe(op: &EditOp) -> String {
    match op {
        EditOp::Keep { ch } => format!("Keep '{ch}'"),
        EditOp::Substitute { from, to } => format!("Substitute '{from}' with '{to}'"),
        EditOp::Delete { ch } => format!("Delete '{ch}'"),
        EditOp::Insert { ch } => format!("Insert '{ch}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str, target: &str) -> StepList<EditEvent, EditDistanceState> {
        EditDistance::default()
            .record(&StringPair::new(source, target), &())
            .unwrap()
    }

    #[test]
    fn empty_source_needs_only_inserts() {
        let list = run("", "ABC");
        let last = list.final_state();
        assert_eq!(last.distance, Some(3));
        assert_eq!(
            last.operations,
            vec![
                EditOp::Insert { ch: 'A' },
                EditOp::Insert { ch: 'B' },
                EditOp::Insert { ch: 'C' }
            ]
        );
    }

    #[test]
    fn kitten_sitting() {
        let list = run("kitten", "sitting");
        let last = list.final_state();
        assert_eq!(last.distance, Some(3));
        let edits: usize = last.operations.iter().map(EditOp::cost).sum();
        assert_eq!(edits, 3);
    }

    #[test]
    fn operations_rebuild_the_target() {
        let list = run("sunday", "saturday");
        let mut rebuilt = String::new();
        for op in &list.final_state().operations {
            match op {
                EditOp::Keep { ch } | EditOp::Insert { ch } => rebuilt.push(*ch),
                EditOp::Substitute { to, .. } => rebuilt.push(*to),
                EditOp::Delete { .. } => {}
            }
        }
        assert_eq!(rebuilt, "saturday");
        assert_eq!(list.final_state().distance, Some(3));
    }

    #[test]
    fn one_step_per_interior_cell() {
        let list = run("ab", "abc");
        let cells = list
            .iter()
            .filter(|s| {
                matches!(
                    s.kind,
                    EditEvent::Keep | EditEvent::Substitute | EditEvent::Delete | EditEvent::Insert
                )
            })
            .count();
        assert_eq!(cells, 6);
        assert_eq!(list.first().kind, EditEvent::Initialize);
    }

    #[test]
    fn identical_strings_keep_everything() {
        let list = run("abc", "abc");
        assert_eq!(list.final_state().distance, Some(0));
        assert!(list
            .final_state()
            .operations
            .iter()
            .all(|op| matches!(op, EditOp::Keep { .. })));
    }

    #[test]
    fn both_empty() {
        let list = run("", "");
        assert_eq!(list.kinds(), vec![EditEvent::Initialize, EditEvent::Complete]);
        assert_eq!(list.final_state().distance, Some(0));
    }

    #[test]
    fn operations_snapshot() {
        let list = run("ab", "b");
        insta::assert_json_snapshot!(list.final_state().operations, @r###"
        [
          {
            "op": "delete",
            "ch": "a"
          },
          {
            "op": "keep",
            "ch": "b"
          }
        ]
        "###);
    }
}
