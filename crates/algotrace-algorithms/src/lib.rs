//! Step recorders for the algorithms algotrace can visualize.
//!
//! Every recorder implements [`algotrace_core::Algorithm`]: it runs the real
//! algorithm once over a borrowed input and returns an immutable
//! [`algotrace_core::StepList`]. Recorders are plain structs carrying their
//! [`algotrace_core::Limits`]; `Default` uses the default limits.
//!
//! Families:
//! - [`sort`]: bubble, insertion, merge and quick sort.
//! - [`search`]: binary search and naive pattern search.
//! - [`graph`]: breadth-first and depth-first traversal.
//! - [`tree`]: binary search tree insertion and lookup.
//! - [`dp`]: 0/1 knapsack and edit distance.
//!
//! [`random`] generates seeded inputs for all of them.

pub mod dp;
pub mod graph;
pub mod random;
pub mod search;
pub mod sort;
pub mod tree;

pub use dp::{EditDistance, Knapsack};
pub use graph::{BreadthFirst, DepthFirst};
pub use search::{BinarySearch, PatternSearch};
pub use sort::{BubbleSort, InsertionSort, MergeSort, QuickSort};
pub use tree::{BstInsert, BstSearch};

/// Which input shape an algorithm consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputShape {
    Array,
    SortedArray,
    Text,
    Graph,
    Keys,
    Items,
    StringPair,
}

impl InputShape {
    /// Short description for listings.
    pub fn label(&self) -> &'static str {
        match self {
            InputShape::Array => "array",
            InputShape::SortedArray => "sorted array",
            InputShape::Text => "text + pattern",
            InputShape::Graph => "graph",
            InputShape::Keys => "keys",
            InputShape::Items => "items",
            InputShape::StringPair => "string pair",
        }
    }
}

/// One catalogue entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub name: &'static str,
    pub family: &'static str,
    pub input: InputShape,
    pub summary: &'static str,
}

/// Every recorder, by stable name.
pub const CATALOGUE: &[Entry] = &[
    Entry {
        name: "bubble-sort",
        family: "sort",
        input: InputShape::Array,
        summary: "adjacent swaps, early exit on a clean pass",
    },
    Entry {
        name: "insertion-sort",
        family: "sort",
        input: InputShape::Array,
        summary: "shift larger elements right, place the key",
    },
    Entry {
        name: "merge-sort",
        family: "sort",
        input: InputShape::Array,
        summary: "top-down divide and merge",
    },
    Entry {
        name: "quick-sort",
        family: "sort",
        input: InputShape::Array,
        summary: "Lomuto partition with a selectable pivot",
    },
    Entry {
        name: "binary-search",
        family: "search",
        input: InputShape::SortedArray,
        summary: "halve a sorted range around the target",
    },
    Entry {
        name: "pattern-search",
        family: "search",
        input: InputShape::Text,
        summary: "slide the pattern over the text",
    },
    Entry {
        name: "bfs",
        family: "graph",
        input: InputShape::Graph,
        summary: "breadth-first traversal from a start vertex",
    },
    Entry {
        name: "dfs",
        family: "graph",
        input: InputShape::Graph,
        summary: "depth-first traversal from a start vertex",
    },
    Entry {
        name: "bst-insert",
        family: "tree",
        input: InputShape::Keys,
        summary: "insert keys into a binary search tree",
    },
    Entry {
        name: "bst-search",
        family: "tree",
        input: InputShape::Keys,
        summary: "look up a key in a binary search tree",
    },
    Entry {
        name: "knapsack",
        family: "dp",
        input: InputShape::Items,
        summary: "0/1 knapsack table fill and traceback",
    },
    Entry {
        name: "edit-distance",
        family: "dp",
        input: InputShape::StringPair,
        summary: "Levenshtein distance with operation traceback",
    },
];

/// Looks up a catalogue entry by name.
pub fn lookup(name: &str) -> Option<&'static Entry> {
    CATALOGUE.iter().find(|e| e.name == name)
}
