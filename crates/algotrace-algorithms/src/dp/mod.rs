//! Dynamic programming over two-dimensional tables.

pub mod edit_distance;
pub mod knapsack;
pub mod table;

pub use edit_distance::{EditDistance, EditDistanceState, EditEvent, EditOp, StringPair};
pub use knapsack::{Item, Knapsack, KnapsackEvent, KnapsackState};
pub use table::Table;
