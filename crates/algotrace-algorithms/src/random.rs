//! Seeded random inputs for demos and property checks.
//!
//! Every generator takes an explicit seed and uses `ChaCha8Rng`, so the same
//! seed produces the same input on every platform. Arrays lean towards
//! duplicates and a few boundary values, which is where sorts and searches
//! most often misbehave.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::dp::Item;
use crate::graph::GraphInput;

/// Values reused with elevated probability.
const BOUNDARIES: [i64; 5] = [0, 1, -1, 99, -99];

/// `len` values in `-99..=99`; roughly 30% are drawn from a small boundary
/// set so duplicates are common.
pub fn random_array(seed: u64, len: usize) -> Vec<i64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| {
            if rng.gen_ratio(3, 10) {
                BOUNDARIES[rng.gen_range(0..BOUNDARIES.len())]
            } else {
                rng.gen_range(-99..=99)
            }
        })
        .collect()
}

/// Like [`random_array`], sorted ascending. Input for binary search.
pub fn random_sorted_array(seed: u64, len: usize) -> Vec<i64> {
    let mut values = random_array(seed, len);
    values.sort_unstable();
    values
}

/// `count` items with weights in `1..=10` and values in `0..=20`.
pub fn random_items(seed: u64, count: usize) -> Vec<Item> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| Item::new(rng.gen_range(1..=10), rng.gen_range(0..=20)))
        .collect()
}

/// A graph on vertices `v0..v{n-1}` where each ordered pair is connected
/// with probability `density` (clamped to `0.0..=1.0`). Self-loops are
/// never generated.
pub fn random_graph(seed: u64, vertices: usize, density: f64) -> GraphInput {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let density = density.clamp(0.0, 1.0);
    let names: Vec<String> = (0..vertices).map(|i| format!("v{i}")).collect();
    let mut graph = GraphInput::new();
    for (i, name) in names.iter().enumerate() {
        let neighbours: Vec<String> = names
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .filter(|_| rng.gen_bool(density))
            .map(|(_, n)| n.clone())
            .collect();
        graph = graph.vertex(name, neighbours);
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_array() {
        assert_eq!(random_array(7, 32), random_array(7, 32));
        assert_ne!(random_array(7, 32), random_array(8, 32));
    }

    #[test]
    fn arrays_stay_in_range() {
        let values = random_array(42, 200);
        assert_eq!(values.len(), 200);
        assert!(values.iter().all(|v| (-99..=99).contains(v)));
    }

    #[test]
    fn sorted_array_is_sorted() {
        let values = random_sorted_array(3, 50);
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn items_have_positive_weights() {
        let items = random_items(1, 20);
        assert!(items.iter().all(|it| it.weight >= 1 && it.value >= 0));
    }

    #[test]
    fn graph_has_no_self_loops() {
        let graph = random_graph(5, 8, 0.5);
        assert_eq!(graph.adjacency.len(), 8);
        for (name, neighbours) in &graph.adjacency {
            assert!(!neighbours.contains(name));
        }
        assert_eq!(graph, random_graph(5, 8, 0.5));
    }

    #[test]
    fn full_density_connects_everything() {
        let graph = random_graph(0, 4, 1.0);
        assert!(graph.adjacency.values().all(|n| n.len() == 3));
    }
}
