//! Shared counters for likes, followers and reference ties

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, Ordering};

/// Saturating counter with interior mutability
///
/// Catalog entities are shared behind `Arc`, so their like/follower/tie
/// counters must be incrementable through a shared reference. Decrements
/// saturate at zero rather than wrapping.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Counter(#[serde(skip)] AtomicU32);

impl Counter {
    /// Create a counter starting at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment by one
    pub fn add(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    /// Decrement by one, saturating at zero
    pub fn remove(&self) {
        let _ = self
            .0
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |v| {
                Some(v.saturating_sub(1))
            });
    }

    /// Current count
    pub fn count(&self) -> u32 {
        self.0.load(Ordering::Relaxed)
    }
}

impl Clone for Counter {
    fn clone(&self) -> Self {
        Self(AtomicU32::new(self.count()))
    }
}

impl PartialEq for Counter {
    fn eq(&self, other: &Self) -> bool {
        self.count() == other.count()
    }
}

impl Eq for Counter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let counter = Counter::new();
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn add_and_remove() {
        let counter = Counter::new();
        counter.add();
        counter.add();
        assert_eq!(counter.count(), 2);

        counter.remove();
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn remove_saturates_at_zero() {
        let counter = Counter::new();
        counter.remove();
        counter.remove();
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn works_through_shared_reference() {
        let counter = std::sync::Arc::new(Counter::new());
        let alias = counter.clone();
        alias.add();
        assert_eq!(counter.count(), 1);
    }
}
