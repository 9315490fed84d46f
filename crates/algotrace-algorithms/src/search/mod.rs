//! Searching: binary search over a sorted array and naive pattern search.

pub mod binary;
pub mod pattern;

pub use binary::{BinarySearch, SearchEvent, SearchState};
pub use pattern::{PatternEvent, PatternSearch, PatternState};
