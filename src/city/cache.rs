//! Symmetric distance cache.
//!
//! Stores one cell per unordered city pair `(min(id1, id2), max(id1, id2))`
//! in a packed lower-triangular array. Cells are atomics holding the bits of
//! an `f64`, so the cache can be shared across threads and filled lazily:
//! two threads racing on the same pair compute the same value and the later
//! store simply overwrites it with identical bits.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use super::types::City;
use crate::error::{Result, TspError};

/// Bit pattern of an empty cell. A NaN that `sqrt` of a finite sum never yields.
const EMPTY: u64 = u64::MAX;

/// Lazily filled pairwise distance matrix.
///
/// A fresh cache from [`DistanceCache::default`] has size 0 and rejects
/// every query with [`TspError::UninitializedCache`]; call
/// [`init`](Self::init) with the city count first.
#[derive(Debug, Default)]
pub struct DistanceCache {
    size: usize,
    cells: Vec<AtomicU64>,
    computations: AtomicUsize,
}

impl DistanceCache {
    /// Creates a cache sized for `n` cities.
    pub fn new(n: usize) -> Self {
        let mut cache = Self::default();
        cache.init(n);
        cache
    }

    /// Resizes the cache for `n` cities, discarding every cached value.
    pub fn init(&mut self, n: usize) {
        let pairs = n * n.saturating_sub(1) / 2;
        self.size = n;
        self.cells = (0..pairs).map(|_| AtomicU64::new(EMPTY)).collect();
        self.computations.store(0, Ordering::Relaxed);
    }

    /// Number of cities the cache is sized for.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of distances computed (cache misses) since the last `init`.
    pub fn computations(&self) -> usize {
        self.computations.load(Ordering::Relaxed)
    }

    /// Returns the cached distance of a pair without computing it.
    pub fn cached(&self, id1: usize, id2: usize) -> Option<f64> {
        if id1 >= self.size || id2 >= self.size {
            return None;
        }
        if id1 == id2 {
            return Some(0.0);
        }
        let bits = self.cells[self.index(id1, id2)].load(Ordering::Relaxed);
        (bits != EMPTY).then(|| f64::from_bits(bits))
    }

    /// Euclidean distance between two cities, computed once per pair.
    pub fn distance(&self, a: &City, b: &City) -> Result<f64> {
        self.check(a.id())?;
        self.check(b.id())?;
        if a.id() == b.id() {
            return Ok(0.0);
        }

        let cell = &self.cells[self.index(a.id(), b.id())];
        let bits = cell.load(Ordering::Relaxed);
        if bits != EMPTY {
            return Ok(f64::from_bits(bits));
        }

        let d = a.euclidean(b);
        cell.store(d.to_bits(), Ordering::Relaxed);
        self.computations.fetch_add(1, Ordering::Relaxed);
        Ok(d)
    }

    fn check(&self, id: usize) -> Result<()> {
        if id < self.size {
            Ok(())
        } else {
            Err(TspError::UninitializedCache {
                id,
                size: self.size,
            })
        }
    }

    /// Packed index of the unordered pair; requires `id1 != id2`.
    fn index(&self, id1: usize, id2: usize) -> usize {
        let (lo, hi) = if id1 < id2 { (id1, id2) } else { (id2, id1) };
        hi * (hi - 1) / 2 + lo
    }
}
