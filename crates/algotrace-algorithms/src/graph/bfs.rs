//! Breadth-first traversal.
//!
//! Granularity: `Enqueue` for the start vertex and each newly discovered
//! neighbour, then one `Dequeue` and one `Visit` per vertex. Vertices are
//! marked discovered when enqueued, so none is queued twice. `max_depth`
//! tracks the deepest BFS level reached.

use std::collections::VecDeque;

use algotrace_core::step::vertices;
use algotrace_core::{Algorithm, Counter, Limits, RecordError, Recorder, StepList};

use super::{lower, GraphInput, TraversalEvent, TraversalParams, TraversalState};

#[derive(Debug, Clone, Default)]
pub struct BreadthFirst {
    limits: Limits,
}

impl BreadthFirst {
    pub fn with_limits(limits: Limits) -> Self {
        BreadthFirst { limits }
    }
}

impl Algorithm for BreadthFirst {
    type Input = GraphInput;
    type Params = TraversalParams;
    type Kind = TraversalEvent;
    type State = TraversalState;

    fn name(&self) -> &'static str {
        "bfs"
    }

    fn record(
        &self,
        input: &GraphInput,
        params: &TraversalParams,
    ) -> Result<StepList<TraversalEvent, TraversalState>, RecordError> {
        let g = lower(self.name(), &self.limits, input, params)?;

        let mut rec = Recorder::new(self.name());
        let mut state = TraversalState::default();
        let mut discovered = vec![false; g.graph.node_count()];
        let mut level = vec![0u32; g.graph.node_count()];
        let mut queue = VecDeque::new();

        let start = g.start;
        discovered[start.index()] = true;
        queue.push_back(start);
        state.frontier.push(g.name(start).to_string());
        state.discovered.push(g.name(start).to_string());
        rec.step(
            TraversalEvent::Enqueue,
            &state,
            vertices([g.name(start)]),
            format!("Enqueue start vertex {}", g.name(start)),
        );

        while let Some(v) = queue.pop_front() {
            let name = g.name(v);
            state.frontier.remove(0);
            state.current = Some(name.to_string());
            rec.step(
                TraversalEvent::Dequeue,
                &state,
                vertices([name]),
                format!("Dequeue {name}"),
            );

            rec.count(Counter::Visit);
            state.result.push(name.to_string());
            rec.step(
                TraversalEvent::Visit,
                &state,
                vertices([name]),
                format!("Visit {name}"),
            );

            for &w in &g.neighbours[v.index()] {
                rec.count(Counter::Edge);
                if discovered[w.index()] {
                    continue;
                }
                discovered[w.index()] = true;
                level[w.index()] = level[v.index()] + 1;
                rec.observe_depth(level[w.index()]);
                queue.push_back(w);

                let next = g.name(w);
                state.frontier.push(next.to_string());
                state.discovered.push(next.to_string());
                rec.step(
                    TraversalEvent::Enqueue,
                    &state,
                    vertices([name, next]),
                    format!("Discover {next} from {name}; enqueue"),
                );
            }
        }

        state.current = None;
        let annotation = format!("BFS visited {}", state.result.join(", "));
        Ok(rec.finish(state, annotation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Directedness;

    fn triangle_free() -> GraphInput {
        GraphInput::new()
            .vertex("A", ["B", "C"])
            .vertex("B", ["A"])
            .vertex("C", ["A"])
    }

    #[test]
    fn visits_in_level_order() {
        let list = BreadthFirst::default()
            .record(&triangle_free(), &TraversalParams::new("A", Directedness::Undirected))
            .unwrap();
        assert_eq!(list.final_state().result, vec!["A", "B", "C"]);
        assert_eq!(list.last().metrics.visits, 3);
        assert_eq!(list.last().metrics.max_depth, 1);
    }

    #[test]
    fn step_sequence_for_star() {
        let list = BreadthFirst::default()
            .record(&triangle_free(), &TraversalParams::new("A", Directedness::Directed))
            .unwrap();
        use TraversalEvent::*;
        assert_eq!(
            list.kinds(),
            vec![
                Enqueue, Dequeue, Visit, Enqueue, Enqueue, Dequeue, Visit, Dequeue, Visit,
                Complete
            ]
        );
    }

    #[test]
    fn shared_neighbours_are_enqueued_once() {
        let diamond = GraphInput::new()
            .vertex("A", ["B", "C"])
            .vertex("B", ["D"])
            .vertex("C", ["D"]);
        let list = BreadthFirst::default()
            .record(&diamond, &TraversalParams::new("A", Directedness::Directed))
            .unwrap();
        let enqueues = list
            .iter()
            .filter(|s| s.kind == TraversalEvent::Enqueue)
            .count();
        assert_eq!(enqueues, 4);
        assert_eq!(list.final_state().result, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn unreachable_vertices_are_not_visited() {
        let input = GraphInput::new().vertex("A", ["B"]).vertex("C", ["D"]);
        let list = BreadthFirst::default()
            .record(&input, &TraversalParams::new("A", Directedness::Undirected))
            .unwrap();
        assert_eq!(list.final_state().result, vec!["A", "B"]);
    }

    #[test]
    fn direction_changes_reachability() {
        let input = GraphInput::new().vertex("A", ["B"]);
        let directed = BreadthFirst::default()
            .record(&input, &TraversalParams::new("B", Directedness::Directed))
            .unwrap();
        let undirected = BreadthFirst::default()
            .record(&input, &TraversalParams::new("B", Directedness::Undirected))
            .unwrap();
        assert_eq!(directed.final_state().result, vec!["B"]);
        assert_eq!(undirected.final_state().result, vec!["B", "A"]);
    }
}
