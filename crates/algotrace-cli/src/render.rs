//! Plain-text step renderer.

use algotrace_core::{Mark, Metrics, Snapshot, Step, StepKind};
use algotrace_playback::Renderer;

/// One line per step: progress, kind, narration and highlights, optionally
/// followed by the state as compact JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer {
    pub show_state: bool,
}

impl<K: StepKind, S: Snapshot> Renderer<K, S> for TextRenderer {
    type Output = String;

    fn render(&self, step: &Step<K, S>, index: usize, total: usize) -> String {
        let width = total.to_string().len();
        let mut line = format!(
            "[{:>width$}/{total}] {:<10} {}",
            index + 1,
            step.kind.label(),
            step.annotation,
        );
        if !step.highlight.is_empty() {
            let marks: Vec<String> = step.highlight.iter().map(mark).collect();
            line.push_str(&format!("  <{}>", marks.join(" ")));
        }
        if self.show_state {
            let state = serde_json::to_string(&step.state)
                .unwrap_or_else(|e| format!("<unserializable: {e}>"));
            line.push_str(&format!("\n    {state}"));
        }
        line
    }
}

fn mark(m: &Mark) -> String {
    match m {
        Mark::Index { index } => format!("#{index}"),
        Mark::Vertex { name } => name.clone(),
        Mark::Cell { row, col } => format!("({row},{col})"),
        Mark::Key { key } => format!("key {key}"),
    }
}

/// Counter summary for the footer.
pub fn metrics_line(m: &Metrics) -> String {
    format!(
        "comparisons={} swaps={} writes={} visits={} edges={} max_depth={}",
        m.comparisons, m.swaps, m.writes, m.visits, m.edges, m.max_depth
    )
}

#[cfg(test)]
mod tests {
    use algotrace_algorithms::MergeSort;
    use algotrace_core::Algorithm;

    use super::*;

    #[test]
    fn renders_progress_kind_and_marks() {
        let list = MergeSort::default().record(&[2, 1], &()).unwrap();
        let line = TextRenderer::default().render(list.first(), 0, list.len());
        let total = list.len();
        assert!(line.contains(&format!("1/{total}]")), "{line}");
        assert!(line.contains("divide"), "{line}");
        assert!(!line.contains('\n'));
    }

    #[test]
    fn optionally_shows_state() {
        let list = MergeSort::default().record(&[2, 1], &()).unwrap();
        let renderer = TextRenderer { show_state: true };
        let line = renderer.render(list.last(), list.last_index(), list.len());
        assert!(line.contains(r#""values":[1,2]"#), "{line}");
    }

    #[test]
    fn metrics_summary() {
        let m = Metrics {
            comparisons: 3,
            ..Metrics::default()
        };
        assert!(metrics_line(&m).starts_with("comparisons=3 swaps=0"));
    }
}
