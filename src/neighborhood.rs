//! Neighbor generation for discrete domains.
//!
//! In a categorical domain every value is equally distant from every other,
//! so the neighbors of index `p` are all other indices. Small domains are
//! queried often during local search, so the generator is chosen by size:
//!
//! | Size | Strategy | Cache |
//! |------|----------|-------|
//! | `<= 5` | [`MaterializedNeighborhood`] | one all-but-pivot list per pivot |
//! | `<= 25` | [`CachedRangeNeighborhood`] | the ascending range `0..size` |
//! | larger | [`FreshRangeNeighborhood`] | none |
//!
//! Caches are built once, when the generator is created.

use core::fmt::Debug;
use std::sync::Arc;

/// Largest size whose neighbor lists are fully materialized.
pub const CACHE_NEIGHBORS_SIZE: usize = 5;

/// Largest size whose index range is cached.
pub const CACHE_RANGE_SIZE: usize = 25;

/// Generates the neighbors of an index in a domain of fixed size.
///
/// Implementations must never return the pivot, must return
/// `min(n, size - 1)` distinct indices, and must draw all randomness from
/// the supplied generator. A pivot outside `0..size` has every index as a
/// neighbor.
pub trait Neighborhood: Debug + Send + Sync {
    /// Number of indices in the domain.
    fn size(&self) -> usize;

    /// Returns up to `n` shuffled indices other than `pivot`.
    fn neighbors(&self, pivot: usize, n: usize, rng: &mut fastrand::Rng) -> Vec<usize>;
}

/// Picks the strategy for a domain of `size` indices.
#[must_use]
pub fn neighborhood_for(size: usize) -> Arc<dyn Neighborhood> {
    if size <= CACHE_NEIGHBORS_SIZE {
        Arc::new(MaterializedNeighborhood::new(size))
    } else if size <= CACHE_RANGE_SIZE {
        Arc::new(CachedRangeNeighborhood::new(size))
    } else {
        Arc::new(FreshRangeNeighborhood::new(size))
    }
}

/// Holds the all-but-pivot list for every pivot.
#[derive(Clone, Debug)]
pub struct MaterializedNeighborhood {
    lists: Vec<Vec<usize>>,
}

impl MaterializedNeighborhood {
    /// Builds the lists for every pivot in `0..size`.
    #[must_use]
    pub fn new(size: usize) -> Self {
        let lists = (0..size)
            .map(|pivot| (0..size).filter(|&i| i != pivot).collect())
            .collect();
        Self { lists }
    }
}

impl Neighborhood for MaterializedNeighborhood {
    fn size(&self) -> usize {
        self.lists.len()
    }

    fn neighbors(&self, pivot: usize, n: usize, rng: &mut fastrand::Rng) -> Vec<usize> {
        let mut choices = match self.lists.get(pivot) {
            Some(list) => list.clone(),
            None => (0..self.lists.len()).collect(),
        };
        rng.shuffle(&mut choices);
        choices.truncate(n);
        choices
    }
}

/// Keeps the ascending range and slices around the pivot per call.
#[derive(Clone, Debug)]
pub struct CachedRangeNeighborhood {
    range: Vec<usize>,
}

impl CachedRangeNeighborhood {
    /// Caches `0..size`.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            range: (0..size).collect(),
        }
    }
}

impl Neighborhood for CachedRangeNeighborhood {
    fn size(&self) -> usize {
        self.range.len()
    }

    fn neighbors(&self, pivot: usize, n: usize, rng: &mut fastrand::Rng) -> Vec<usize> {
        all_but_pivot(&self.range, pivot, n, rng)
    }
}

/// Builds the range on every call.
#[derive(Clone, Copy, Debug)]
pub struct FreshRangeNeighborhood {
    size: usize,
}

impl FreshRangeNeighborhood {
    /// Creates a generator for `0..size`.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self { size }
    }
}

impl Neighborhood for FreshRangeNeighborhood {
    fn size(&self) -> usize {
        self.size
    }

    fn neighbors(&self, pivot: usize, n: usize, rng: &mut fastrand::Rng) -> Vec<usize> {
        let range: Vec<usize> = (0..self.size).collect();
        all_but_pivot(&range, pivot, n, rng)
    }
}

fn all_but_pivot(range: &[usize], pivot: usize, n: usize, rng: &mut fastrand::Rng) -> Vec<usize> {
    let split = pivot.min(range.len());
    let top = range.get(pivot.saturating_add(1)..).unwrap_or(&[]);
    let mut choices = Vec::with_capacity(range.len());
    choices.extend_from_slice(&range[..split]);
    choices.extend_from_slice(top);
    rng.shuffle(&mut choices);
    choices.truncate(n);
    choices
}
