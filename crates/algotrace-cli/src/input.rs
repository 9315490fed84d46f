//! Turning command-line flags into recorder inputs.

use std::path::Path;

use clap::Args;

use algotrace_algorithms::dp::{Item, StringPair};
use algotrace_algorithms::graph::{Directedness, GraphInput, TraversalParams};
use algotrace_algorithms::random;
use algotrace_algorithms::sort::PivotStrategy;
use algotrace_algorithms::{Entry, InputShape};
use algotrace_core::{Limits, RecordError};

use crate::error::CliError;

/// Edge probability for `--random` graphs.
const RANDOM_GRAPH_DENSITY: f64 = 0.3;

/// Input flags shared by `record` and `play`. Each algorithm reads the ones
/// it needs.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Comma-separated integers, e.g. `5,3,8,1`.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub values: Option<Vec<i64>>,

    /// Generate N random elements (items, keys, or vertices) instead.
    #[arg(long, value_name = "N")]
    pub random: Option<usize>,

    /// Seed for `--random`.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Quicksort pivot: first, last, middle, median-of-three.
    #[arg(long, default_value = "last")]
    pub pivot: PivotStrategy,

    /// Value to search for (binary search, BST search).
    #[arg(long, allow_hyphen_values = true)]
    pub target: Option<i64>,

    /// Text to search in.
    #[arg(long)]
    pub text: Option<String>,

    /// Pattern to search for.
    #[arg(long)]
    pub pattern: Option<String>,

    /// Adjacency as inline JSON or a path to a JSON file,
    /// e.g. `{"A":["B","C"],"B":["A"]}`.
    #[arg(long)]
    pub graph: Option<String>,

    /// Start vertex (default: the first declared vertex).
    #[arg(long)]
    pub start: Option<String>,

    /// Treat declared edges as one-way.
    #[arg(long)]
    pub directed: bool,

    /// Knapsack items as `weight:value` pairs, e.g. `2:3,3:4`.
    #[arg(long, value_delimiter = ',')]
    pub items: Option<Vec<String>>,

    /// Knapsack capacity.
    #[arg(long, allow_hyphen_values = true)]
    pub capacity: Option<i64>,

    /// Edit distance source string.
    #[arg(long, default_value = "")]
    pub source: String,

    /// Edit distance target string.
    #[arg(long = "target-string", default_value = "")]
    pub target_string: String,
}

impl InputArgs {
    /// Rejects a `--random N` that the recorder's default limits would
    /// refuse, before any input is generated.
    pub fn check_random(&self, entry: &Entry) -> Result<(), CliError> {
        let Some(n) = self.random else {
            return Ok(());
        };
        let limits = Limits::default();
        let limit = match entry.input {
            InputShape::Array | InputShape::SortedArray | InputShape::Keys
                if self.values.is_none() =>
            {
                limits.max_len
            }
            InputShape::Items if self.items.is_none() => limits.max_len,
            InputShape::Graph if self.graph.is_none() => limits.max_vertices,
            _ => return Ok(()),
        };
        if n > limit {
            return Err(RecordError::InputTooLarge {
                algorithm: entry.name,
                size: n,
                limit,
            }
            .into());
        }
        Ok(())
    }

    /// `--values`, or `--random N` seeded by `--seed`.
    pub fn array(&self) -> Result<Vec<i64>, CliError> {
        match (&self.values, self.random) {
            (Some(values), _) => Ok(values.clone()),
            (None, Some(n)) => Ok(random::random_array(self.seed, n)),
            (None, None) => Err(CliError::usage("provide --values or --random N")),
        }
    }

    /// Like [`array`](Self::array), but random arrays come out sorted.
    pub fn sorted_array(&self) -> Result<Vec<i64>, CliError> {
        match (&self.values, self.random) {
            (None, Some(n)) => Ok(random::random_sorted_array(self.seed, n)),
            _ => self.array(),
        }
    }

    pub fn target(&self) -> Result<i64, CliError> {
        self.target.ok_or_else(|| CliError::usage("provide --target"))
    }

    pub fn text_and_pattern(&self) -> Result<(String, String), CliError> {
        let text = self
            .text
            .clone()
            .ok_or_else(|| CliError::usage("provide --text"))?;
        let pattern = self
            .pattern
            .clone()
            .ok_or_else(|| CliError::usage("provide --pattern"))?;
        Ok((text, pattern))
    }

    pub fn graph(&self) -> Result<(GraphInput, TraversalParams), CliError> {
        let graph = match (&self.graph, self.random) {
            (Some(raw), _) => load_graph(raw)?,
            (None, Some(n)) => random::random_graph(self.seed, n, RANDOM_GRAPH_DENSITY),
            (None, None) => return Err(CliError::usage("provide --graph or --random N")),
        };
        let start = match &self.start {
            Some(start) => start.clone(),
            None => graph
                .adjacency
                .keys()
                .next()
                .cloned()
                .ok_or_else(|| CliError::usage("graph is empty; nothing to traverse"))?,
        };
        let directedness = if self.directed {
            Directedness::Directed
        } else {
            Directedness::Undirected
        };
        Ok((graph, TraversalParams::new(&start, directedness)))
    }

    pub fn items(&self) -> Result<Vec<Item>, CliError> {
        match (&self.items, self.random) {
            (Some(pairs), _) => pairs.iter().map(|p| parse_item(p)).collect(),
            (None, Some(n)) => Ok(random::random_items(self.seed, n)),
            (None, None) => Err(CliError::usage("provide --items or --random N")),
        }
    }

    pub fn capacity(&self) -> Result<i64, CliError> {
        self.capacity
            .ok_or_else(|| CliError::usage("provide --capacity"))
    }

    pub fn strings(&self) -> StringPair {
        StringPair::new(&self.source, &self.target_string)
    }
}

/// Inline JSON when the argument looks like an object, a file path otherwise.
fn load_graph(raw: &str) -> Result<GraphInput, CliError> {
    if raw.trim_start().starts_with('{') {
        return GraphInput::from_json(raw)
            .map_err(|e| CliError::usage(format!("invalid --graph JSON: {e}")));
    }
    let path = Path::new(raw);
    let text = std::fs::read_to_string(path).map_err(|e| CliError::InputFile {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    GraphInput::from_json(&text).map_err(|e| CliError::InputFile {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn parse_item(pair: &str) -> Result<Item, CliError> {
    let bad = || CliError::usage(format!("invalid item '{pair}', expected weight:value"));
    let (w, v) = pair.split_once(':').ok_or_else(bad)?;
    let weight = w.trim().parse().map_err(|_| bad())?;
    let value = v.trim().parse().map_err(|_| bad())?;
    Ok(Item::new(weight, value))
}
