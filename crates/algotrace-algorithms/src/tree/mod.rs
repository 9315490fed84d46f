//! Binary search tree insertion and search.
//!
//! The tree is stored as an arena ([`TreeState::nodes`]) with child indices,
//! so a snapshot is a plain value that clones without pointer chasing.
//! Duplicate keys are ignored on insertion.

pub mod insert;
pub mod search;

use serde::{Deserialize, Serialize};

use algotrace_core::StepKind;

pub use insert::BstInsert;
pub use search::BstSearch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeEvent {
    /// The key is compared against a node on the way down.
    Compare,
    Insert,
    /// An equal key already exists; nothing is inserted.
    Duplicate,
    Found,
    NotFound,
    Complete,
}

impl StepKind for TreeEvent {
    const COMPLETE: Self = TreeEvent::Complete;

    fn label(&self) -> &'static str {
        match self {
            TreeEvent::Compare => "compare",
            TreeEvent::Insert => "insert",
            TreeEvent::Duplicate => "duplicate",
            TreeEvent::Found => "found",
            TreeEvent::NotFound => "not_found",
            TreeEvent::Complete => "complete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub key: i64,
    pub left: Option<usize>,
    pub right: Option<usize>,
}

/// Arena-backed tree snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeState {
    pub nodes: Vec<TreeNode>,
    pub root: Option<usize>,
}

/// Where a key belongs relative to the existing tree.
pub(crate) enum Slot {
    Root,
    Left(usize),
    Right(usize),
    Occupied(usize),
}

impl TreeState {
    /// Keys in ascending (in-order) order.
    pub fn in_order(&self) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = Vec::new();
        let mut cursor = self.root;
        while cursor.is_some() || !stack.is_empty() {
            while let Some(i) = cursor {
                stack.push(i);
                cursor = self.nodes[i].left;
            }
            if let Some(i) = stack.pop() {
                out.push(self.nodes[i].key);
                cursor = self.nodes[i].right;
            }
        }
        out
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut best = 0;
        let mut stack: Vec<(usize, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((i, depth)) = stack.pop() {
            best = best.max(depth);
            let node = self.nodes[i];
            stack.extend(node.left.map(|l| (l, depth + 1)));
            stack.extend(node.right.map(|r| (r, depth + 1)));
        }
        best
    }

    /// Walks from the root towards `key`, calling `visit` for every node on
    /// the path, and returns where the walk stopped.
    pub(crate) fn descend(&self, key: i64, mut visit: impl FnMut(usize, u32)) -> Slot {
        let Some(mut at) = self.root else {
            return Slot::Root;
        };
        let mut depth = 1;
        loop {
            visit(at, depth);
            let node = self.nodes[at];
            let next = match key.cmp(&node.key) {
                std::cmp::Ordering::Equal => return Slot::Occupied(at),
                std::cmp::Ordering::Less => match node.left {
                    Some(l) => l,
                    None => return Slot::Left(at),
                },
                std::cmp::Ordering::Greater => match node.right {
                    Some(r) => r,
                    None => return Slot::Right(at),
                },
            };
            at = next;
            depth += 1;
        }
    }

    /// Links a new node into `slot`; returns its index.
    pub(crate) fn attach(&mut self, key: i64, slot: &Slot) -> Option<usize> {
        let index = self.nodes.len();
        match *slot {
            Slot::Occupied(_) => return None,
            Slot::Root => self.root = Some(index),
            Slot::Left(parent) => self.nodes[parent].left = Some(index),
            Slot::Right(parent) => self.nodes[parent].right = Some(index),
        }
        self.nodes.push(TreeNode {
            key,
            left: None,
            right: None,
        });
        Some(index)
    }

    /// Builds a tree by plain insertion, without recording.
    pub fn build(keys: &[i64]) -> Self {
        let mut tree = TreeState::default();
        for &key in keys {
            let slot = tree.descend(key, |_, _| {});
            tree.attach(key, &slot);
        }
        tree
    }
}
