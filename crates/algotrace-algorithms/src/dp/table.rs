//! Copy-on-write DP table.
//!
//! Each row sits behind its own `Arc`. Cloning a [`Table`] for a step shares
//! every row with the live table; the next write to a shared row clones that
//! row first (`Arc::make_mut`). A snapshot therefore never observes a later
//! write, while a cell-by-cell fill costs one row copy per step instead of a
//! whole table.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table<T> {
    rows: Vec<Arc<Vec<T>>>,
}

impl<T: Clone> Table<T> {
    /// A `rows x cols` table filled with `fill`.
    pub fn new(rows: usize, cols: usize, fill: T) -> Self {
        Table {
            rows: (0..rows).map(|_| Arc::new(vec![fill.clone(); cols])).collect(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn cols(&self) -> usize {
        self.rows.first().map_or(0, |r| r.len())
    }

    pub fn get(&self, row: usize, col: usize) -> &T {
        &self.rows[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) {
        Arc::make_mut(&mut self.rows[row])[col] = value;
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.rows[row]
    }

    /// Plain nested-vector copy.
    pub fn to_vec(&self) -> Vec<Vec<T>> {
        self.rows.iter().map(|r| r.as_ref().clone()).collect()
    }
}
