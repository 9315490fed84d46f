//! Naive sliding-window substring search.
//!
//! Granularity: one `Align` per window position, one `Compare` per character
//! comparison, then `Match` or `Mismatch` for the window. Text and pattern
//! are compared by `char`.

use serde::{Deserialize, Serialize};

use algotrace_core::step::indices;
use algotrace_core::{Algorithm, Counter, Limits, RecordError, Recorder, StepKind, StepList};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternEvent {
    Align,
    Compare,
    Mismatch,
    Match,
    Complete,
}

impl StepKind for PatternEvent {
    const COMPLETE: Self = PatternEvent::Complete;

    fn label(&self) -> &'static str {
        match self {
            PatternEvent::Align => "align",
            PatternEvent::Compare => "compare",
            PatternEvent::Mismatch => "mismatch",
            PatternEvent::Match => "match",
            PatternEvent::Complete => "complete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternState {
    pub text: Vec<char>,
    pub pattern: Vec<char>,
    /// Text offset the pattern is currently aligned at.
    pub offset: usize,
    /// Offsets of every full match found so far.
    pub matches: Vec<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct PatternSearch {
    limits: Limits,
}

impl PatternSearch {
    pub fn with_limits(limits: Limits) -> Self {
        PatternSearch { limits }
    }
}

impl Algorithm for PatternSearch {
    /// The text to search.
    type Input = str;
    /// The pattern to look for; must be non-empty.
    type Params = String;
    type Kind = PatternEvent;
    type State = PatternState;

    fn name(&self) -> &'static str {
        "pattern-search"
    }

    fn record(
        &self,
        text: &str,
        pattern: &String,
    ) -> Result<StepList<PatternEvent, PatternState>, RecordError> {
        if pattern.is_empty() {
            tracing::debug!("rejecting empty search pattern");
            return Err(RecordError::invalid(self.name(), "pattern must not be empty"));
        }
        let text: Vec<char> = text.chars().collect();
        let pattern: Vec<char> = pattern.chars().collect();
        self.limits.check_len(self.name(), text.len())?;
        self.limits.check_len(self.name(), pattern.len())?;

        let mut rec = Recorder::new(self.name());
        let m = pattern.len();
        let windows = (text.len() + 1).saturating_sub(m);
        let mut state = PatternState {
            text,
            pattern,
            offset: 0,
            matches: Vec::new(),
        };

        for offset in 0..windows {
            state.offset = offset;
            rec.step(
                PatternEvent::Align,
                &state,
                indices(offset..offset + m),
                format!("Align pattern at offset {offset}"),
            );

            let mut matched = true;
            for k in 0..m {
                let (t, p) = (state.text[offset + k], state.pattern[k]);
                rec.count(Counter::Comparison);
                rec.step(
                    PatternEvent::Compare,
                    &state,
                    indices([offset + k]),
                    format!("Compare '{t}' with '{p}'"),
                );
                if t != p {
                    matched = false;
                    break;
                }
            }

            if matched {
                state.matches.push(offset);
                rec.step(
                    PatternEvent::Match,
                    &state,
                    indices(offset..offset + m),
                    format!("Match at offset {offset}"),
                );
            } else {
                rec.step(
                    PatternEvent::Mismatch,
                    &state,
                    indices([offset]),
                    format!("No match at offset {offset}"),
                );
            }
        }

        let annotation = format!("Found {} match(es)", state.matches.len());
        Ok(rec.finish(state, annotation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_overlapping_matches() {
        let list = PatternSearch::default()
            .record("aaaa", &"aa".to_string())
            .unwrap();
        assert_eq!(list.final_state().matches, vec![0, 1, 2]);
    }

    #[test]
    fn empty_pattern_is_rejected() {
        let err = PatternSearch::default()
            .record("abc", &String::new())
            .unwrap_err();
        assert_eq!(
            err,
            RecordError::InvalidInput {
                algorithm: "pattern-search",
                reason: "pattern must not be empty".into()
            }
        );
    }

    #[test]
    fn pattern_longer_than_text_has_no_windows() {
        let list = PatternSearch::default()
            .record("ab", &"abc".to_string())
            .unwrap();
        assert_eq!(list.kinds(), vec![PatternEvent::Complete]);
        assert!(list.final_state().matches.is_empty());
    }

    #[test]
    fn mismatch_stops_window_early() {
        let list = PatternSearch::default()
            .record("xb", &"ab".to_string())
            .unwrap();
        assert_eq!(
            list.kinds(),
            vec![
                PatternEvent::Align,
                PatternEvent::Compare,
                PatternEvent::Mismatch,
                PatternEvent::Complete
            ]
        );
    }
}
