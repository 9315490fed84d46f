//! Depth-first traversal in recursive (preorder) order, driven by an
//! explicit stack so deep graphs cannot overflow the call stack.
//!
//! Granularity: `Push` then `Visit` when a vertex is first reached, `Pop`
//! once all of its neighbours have been examined. `max_depth` is the deepest
//! stack.

use algotrace_core::step::vertices;
use algotrace_core::{Algorithm, Counter, Limits, RecordError, Recorder, StepList};
use petgraph::graph::NodeIndex;

use super::{lower, GraphInput, Lowered, TraversalEvent, TraversalParams, TraversalState};

#[derive(Debug, Clone, Default)]
pub struct DepthFirst {
    limits: Limits,
}

impl DepthFirst {
    pub fn with_limits(limits: Limits) -> Self {
        DepthFirst { limits }
    }
}

impl Algorithm for DepthFirst {
    type Input = GraphInput;
    type Params = TraversalParams;
    type Kind = TraversalEvent;
    type State = TraversalState;

    fn name(&self) -> &'static str {
        "dfs"
    }

    fn record(
        &self,
        input: &GraphInput,
        params: &TraversalParams,
    ) -> Result<StepList<TraversalEvent, TraversalState>, RecordError> {
        let g = lower(self.name(), &self.limits, input, params)?;

        let mut rec = Recorder::new(self.name());
        let mut state = TraversalState::default();
        let mut visited = vec![false; g.graph.node_count()];
        // (vertex, index of the next neighbour to examine)
        let mut stack: Vec<(NodeIndex, usize)> = Vec::new();

        enter(&mut rec, &mut state, &mut stack, &mut visited, &g, g.start, None);

        while let Some(top) = stack.last_mut() {
            let v = top.0;
            let Some(&w) = g.neighbours[v.index()].get(top.1) else {
                stack.pop();
                state.frontier.pop();
                let name = g.name(v);
                state.current = stack.last().map(|(u, _)| g.name(*u).to_string());
                rec.step(
                    TraversalEvent::Pop,
                    &state,
                    vertices([name]),
                    format!("{name} has no unvisited neighbours; backtrack"),
                );
                continue;
            };
            top.1 += 1;

            rec.count(Counter::Edge);
            if !visited[w.index()] {
                enter(&mut rec, &mut state, &mut stack, &mut visited, &g, w, Some(v));
            }
        }

        state.current = None;
        let annotation = format!("DFS visited {}", state.result.join(", "));
        Ok(rec.finish(state, annotation))
    }
}

/// Pushes `w` and visits it.
fn enter(
    rec: &mut Recorder<TraversalEvent, TraversalState>,
    state: &mut TraversalState,
    stack: &mut Vec<(NodeIndex, usize)>,
    visited: &mut [bool],
    g: &Lowered,
    w: NodeIndex,
    from: Option<NodeIndex>,
) {
    let name = g.name(w);
    visited[w.index()] = true;
    stack.push((w, 0));
    rec.observe_depth(stack.len() as u32);

    state.frontier.push(name.to_string());
    state.discovered.push(name.to_string());
    let annotation = match from {
        Some(v) => format!("Push {name} (reached from {})", g.name(v)),
        None => format!("Push start vertex {name}"),
    };
    rec.step(TraversalEvent::Push, state, vertices([name]), annotation);

    rec.count(Counter::Visit);
    state.current = Some(name.to_string());
    state.result.push(name.to_string());
    rec.step(
        TraversalEvent::Visit,
        state,
        vertices([name]),
        format!("Visit {name}"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Directedness;

    #[test]
    fn star_step_sequence() {
        let input = GraphInput::new()
            .vertex("A", ["B", "C"])
            .vertex("B", ["A"])
            .vertex("C", ["A"]);
        let list = DepthFirst::default()
            .record(&input, &TraversalParams::new("A", Directedness::Undirected))
            .unwrap();
        use TraversalEvent::*;
        assert_eq!(
            list.kinds(),
            vec![Push, Visit, Push, Visit, Pop, Push, Visit, Pop, Pop, Complete]
        );
        assert_eq!(list.final_state().result, vec!["A", "B", "C"]);
        assert!(list.final_state().frontier.is_empty());
    }

    #[test]
    fn goes_deep_before_wide() {
        let input = GraphInput::new()
            .vertex("A", ["B", "D"])
            .vertex("B", ["C"])
            .vertex("C", [] as [&str; 0])
            .vertex("D", [] as [&str; 0]);
        let list = DepthFirst::default()
            .record(&input, &TraversalParams::new("A", Directedness::Directed))
            .unwrap();
        assert_eq!(list.final_state().result, vec!["A", "B", "C", "D"]);
        assert_eq!(list.last().metrics.max_depth, 3);
    }

    #[test]
    fn long_chain_depth_follows_stack() {
        let mut input = GraphInput::new();
        for i in 0..200 {
            input = input.vertex(&i.to_string(), [(i + 1).to_string()]);
        }
        let list = DepthFirst::default()
            .record(&input, &TraversalParams::new("0", Directedness::Directed))
            .unwrap();
        assert_eq!(list.final_state().result.len(), 201);
        assert_eq!(list.last().metrics.max_depth, 201);
    }

    #[test]
    fn cycle_terminates() {
        let input = GraphInput::new()
            .vertex("A", ["B"])
            .vertex("B", ["C"])
            .vertex("C", ["A"]);
        let list = DepthFirst::default()
            .record(&input, &TraversalParams::new("B", Directedness::Directed))
            .unwrap();
        assert_eq!(list.final_state().result, vec!["B", "C", "A"]);
        assert_eq!(list.check_invariants(), Ok(()));
    }
}
