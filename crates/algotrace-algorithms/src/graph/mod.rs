//! Graph traversals (BFS, DFS) over named-vertex adjacency input.
//!
//! [`GraphInput`] is an ordered adjacency map. Declaration order matters:
//! neighbours are explored in the order they are listed, so the same input
//! always yields the same traversal. Internally the input is lowered into a
//! petgraph `DiGraph` whose edge indices preserve that order.
//!
//! # Undirected graphs
//!
//! With [`Directedness::Undirected`] every declared edge `u -> v` gets a
//! mirror `v -> u` unless one is already declared. Mirrors are added after
//! all declared edges, so declared neighbours are always explored first.

pub mod bfs;
pub mod dfs;

use indexmap::IndexMap;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

use algotrace_core::{Limits, RecordError, StepKind};

pub use bfs::BreadthFirst;
pub use dfs::DepthFirst;

/// Ordered adjacency input: vertex name to neighbour names.
///
/// Serializes as a plain JSON object, e.g. `{"A": ["B", "C"], "B": ["A"]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphInput {
    pub adjacency: IndexMap<String, Vec<String>>,
}

impl GraphInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a vertex and its neighbour list.
    pub fn vertex<I, N>(mut self, name: &str, neighbours: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.adjacency.insert(
            name.to_string(),
            neighbours.into_iter().map(Into::into).collect(),
        );
        self
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Whether declared edges are one-way or two-way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Directedness {
    Directed,
    #[default]
    Undirected,
}

/// Parameters shared by both traversals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalParams {
    pub start: String,
    #[serde(default)]
    pub directedness: Directedness,
}

impl TraversalParams {
    pub fn new(start: &str, directedness: Directedness) -> Self {
        TraversalParams {
            start: start.to_string(),
            directedness,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalEvent {
    /// A vertex joins the BFS queue.
    Enqueue,
    /// A vertex leaves the BFS queue.
    Dequeue,
    /// A vertex is visited and appended to the result.
    Visit,
    /// A vertex is pushed on the DFS stack.
    Push,
    /// A vertex is popped once all its neighbours are exhausted.
    Pop,
    Complete,
}

impl StepKind for TraversalEvent {
    const COMPLETE: Self = TraversalEvent::Complete;

    fn label(&self) -> &'static str {
        match self {
            TraversalEvent::Enqueue => "enqueue",
            TraversalEvent::Dequeue => "dequeue",
            TraversalEvent::Visit => "visit",
            TraversalEvent::Push => "push",
            TraversalEvent::Pop => "pop",
            TraversalEvent::Complete => "complete",
        }
    }
}

/// Traversal snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalState {
    /// Vertex being processed.
    pub current: Option<String>,
    /// Queue (front first) or stack (bottom first) contents.
    pub frontier: Vec<String>,
    /// Every vertex seen so far, in discovery order.
    pub discovered: Vec<String>,
    /// Visit order.
    pub result: Vec<String>,
}

/// Input lowered into a petgraph graph with ordered neighbour lists.
pub(crate) struct Lowered {
    pub graph: DiGraph<String, ()>,
    pub neighbours: Vec<Vec<NodeIndex>>,
    pub start: NodeIndex,
}

impl Lowered {
    pub fn name(&self, n: NodeIndex) -> &str {
        &self.graph[n]
    }
}

pub(crate) fn lower(
    algorithm: &'static str,
    limits: &Limits,
    input: &GraphInput,
    params: &TraversalParams,
) -> Result<Lowered, RecordError> {
    let mut graph = DiGraph::<String, ()>::new();
    let mut index: IndexMap<&str, NodeIndex> = IndexMap::new();

    let names = input
        .adjacency
        .iter()
        .flat_map(|(v, ns)| std::iter::once(v).chain(ns.iter()));
    for name in names {
        if !index.contains_key(name.as_str()) {
            index.insert(name.as_str(), graph.add_node(name.clone()));
        }
    }
    limits.check_vertices(algorithm, index.len())?;

    let mut declared = Vec::new();
    for (v, ns) in &input.adjacency {
        let from = index[v.as_str()];
        for n in ns {
            let to = index[n.as_str()];
            if graph.find_edge(from, to).is_none() {
                graph.add_edge(from, to, ());
                declared.push((from, to));
            }
        }
    }
    if params.directedness == Directedness::Undirected {
        for (from, to) in declared {
            if graph.find_edge(to, from).is_none() {
                graph.add_edge(to, from, ());
            }
        }
    }

    let start = *index
        .get(params.start.as_str())
        .ok_or_else(|| {
            tracing::debug!(start = %params.start, "start vertex not in graph");
            RecordError::UnknownVertex {
                vertex: params.start.clone(),
            }
        })?;

    let neighbours = graph
        .node_indices()
        .map(|n| {
            let mut out: Vec<_> = graph.edges(n).map(|e| (e.id(), e.target())).collect();
            out.sort_by_key(|(id, _)| *id);
            out.into_iter().map(|(_, target)| target).collect()
        })
        .collect();

    Ok(Lowered {
        graph,
        neighbours,
        start,
    })
}
