//! Generated point sets, kept per (silhouette, particle count).
//!
//! Generation is the expensive part of a shape switch, so every set is built
//! once and shared with the engine as an `Arc<PointSet>`. The cache holds at
//! most one set per silhouette for each live particle count.

use crate::shapes::{self, PointSet};
use crate::sampler::ShapeSampler;
use crate::silhouette::Silhouette;
use std::collections::HashMap;
use std::sync::Arc;

/// Cache of generated point sets.
///
/// # Example
///
/// ```ignore
/// let mut cache = ShapeCache::new().with_seed(42);
/// let heart = cache.get(Silhouette::Heart, 6000);
/// assert_eq!(heart.len(), 6000);
///
/// // Particle count changed in the UI
/// cache.invalidate(6000);
/// ```
#[derive(Debug, Default)]
pub struct ShapeCache {
    sets: HashMap<(Silhouette, usize), Arc<PointSet>>,
    seed: Option<u64>,
}

impl ShapeCache {
    /// Empty cache whose sets are seeded from entropy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make generation reproducible.
    ///
    /// Each key derives its own seed from `seed`, so the set generated for a
    /// key does not depend on which keys were requested before it.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Point set for `(silhouette, count)`, generating it on first use.
    pub fn get(&mut self, silhouette: Silhouette, count: usize) -> Arc<PointSet> {
        let seed = self.seed.map(|s| key_seed(s, silhouette, count));

        self.sets
            .entry((silhouette, count))
            .or_insert_with(|| {
                log::debug!("Generating {} points for {}", count, silhouette);
                let mut sampler = ShapeSampler::new(seed);
                Arc::new(shapes::generate_with(silhouette, count, &mut sampler))
            })
            .clone()
    }

    /// Generate every known silhouette for `count` up front.
    pub fn prefetch(&mut self, count: usize) {
        for silhouette in Silhouette::ALL {
            self.get(silhouette, count);
        }
    }

    /// Drop every set generated for `count`.
    ///
    /// Sets still held by the engine stay alive until it lets go of them.
    pub fn invalidate(&mut self, count: usize) {
        let before = self.sets.len();
        self.sets.retain(|&(_, c), _| c != count);
        let dropped = before - self.sets.len();
        if dropped > 0 {
            log::debug!("Invalidated {} cached point set(s) for count {}", dropped, count);
        }
    }

    pub fn contains(&self, silhouette: Silhouette, count: usize) -> bool {
        self.sets.contains_key(&(silhouette, count))
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn clear(&mut self) {
        self.sets.clear();
    }
}

/// Mix the base seed with the key (splitmix64 finalizer).
fn key_seed(seed: u64, silhouette: Silhouette, count: usize) -> u64 {
    let shape = silhouette.to_index().map_or(0xff, |i| i as u64);
    let mut z = seed
        ^ shape.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (count as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_reuses_set() {
        let mut cache = ShapeCache::new().with_seed(1);
        let a = cache.get(Silhouette::Heart, 100);
        let b = cache.get(Silhouette::Heart, 100);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_order_independent_seeding() {
        let mut forward = ShapeCache::new().with_seed(7);
        let mut backward = ShapeCache::new().with_seed(7);

        forward.get(Silhouette::Heart, 64);
        let f = forward.get(Silhouette::Flower, 64);
        let b = backward.get(Silhouette::Flower, 64);

        assert_eq!(*f, *b);
    }

    #[test]
    fn test_invalidate_only_that_count() {
        let mut cache = ShapeCache::new().with_seed(3);
        cache.prefetch(10);
        cache.get(Silhouette::Heart, 20);
        assert_eq!(cache.len(), Silhouette::ALL.len() + 1);

        cache.invalidate(10);
        assert_eq!(cache.len(), 1);
        assert!(cache.contains(Silhouette::Heart, 20));
        assert!(!cache.contains(Silhouette::Heart, 10));
    }

    #[test]
    fn test_regenerates_after_invalidate() {
        let mut cache = ShapeCache::new();
        let first = cache.get(Silhouette::RingedPlanet, 50);
        cache.invalidate(50);
        let second = cache.get(Silhouette::RingedPlanet, 50);
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 50);
    }

    #[test]
    fn test_distinct_keys_distinct_seeds() {
        assert_ne!(
            key_seed(1, Silhouette::Heart, 100),
            key_seed(1, Silhouette::Flower, 100)
        );
        assert_ne!(
            key_seed(1, Silhouette::Heart, 100),
            key_seed(1, Silhouette::Heart, 101)
        );
    }
}
