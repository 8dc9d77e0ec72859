//! Seeded shuffle orders
//!
//! A shuffle order is a permutation of original part indexes, generated
//! from a caller-supplied seed so replays are deterministic.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Build the playback-order permutation for `len` parts
pub fn shuffle_order(len: usize, seed: u64) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    order.shuffle(&mut rng);
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_is_a_permutation() {
        let order = shuffle_order(10, 42);
        let mut sorted = order.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_same_order() {
        assert_eq!(shuffle_order(20, 7), shuffle_order(20, 7));
    }

    #[test]
    fn empty_and_single_are_trivial() {
        assert!(shuffle_order(0, 1).is_empty());
        assert_eq!(shuffle_order(1, 1), vec![0]);
    }
}
