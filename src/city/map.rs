//! Validated city set owning its distance cache.

use super::cache::DistanceCache;
use super::types::{City, CostMode};
use crate::error::{Result, TspError};

/// The cities of one problem instance together with their distance cache.
///
/// Every city's id equals its index, so an id is also a position in
/// [`cities`](Self::cities). Tours and operators address cities by id and
/// resolve distances through this map.
///
/// The map is built once at load time and shared read-only (typically in
/// an `Arc`) with the engine and any renderer. The cache fills lazily
/// through `&self`.
#[derive(Debug)]
pub struct CityMap {
    cities: Vec<City>,
    cache: DistanceCache,
}

impl CityMap {
    /// Builds a map and sizes a fresh cache for it.
    ///
    /// # Errors
    /// [`TspError::InvalidCityId`] if any city's id differs from its index.
    pub fn new(cities: Vec<City>) -> Result<Self> {
        let cache = DistanceCache::new(cities.len());
        Self::with_cache(cities, cache)
    }

    /// Builds a map around an externally prepared cache.
    ///
    /// The cache is taken as-is; if it was not sized for `cities.len()`,
    /// distance queries fail with [`TspError::UninitializedCache`].
    pub fn with_cache(cities: Vec<City>, cache: DistanceCache) -> Result<Self> {
        for (index, city) in cities.iter().enumerate() {
            if city.id() != index {
                return Err(TspError::InvalidCityId {
                    index,
                    id: city.id(),
                });
            }
        }
        Ok(Self { cities, cache })
    }

    /// Builds unnamed cities from coordinates, ids assigned in order.
    pub fn from_coords(coords: &[(i32, i32)]) -> Self {
        let cities = coords
            .iter()
            .enumerate()
            .map(|(id, &(x, y))| City::new(id, x, y))
            .collect::<Vec<_>>();
        Self {
            cache: DistanceCache::new(cities.len()),
            cities,
        }
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn city(&self, id: usize) -> Option<&City> {
        self.cities.get(id)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// The city flagged as start city, if any.
    pub fn start_city(&self) -> Option<&City> {
        self.cities.iter().find(|c| c.is_start())
    }

    pub fn cache(&self) -> &DistanceCache {
        &self.cache
    }

    /// Re-sizes the cache for the current city count, dropping cached values.
    pub fn reset_cache(&mut self) {
        self.cache.init(self.cities.len());
    }

    /// Euclidean distance between two cities by id.
    pub fn distance(&self, id1: usize, id2: usize) -> Result<f64> {
        let a = self.lookup(id1)?;
        let b = self.lookup(id2)?;
        self.cache.distance(a, b)
    }

    /// Travel cost between two cities by id under `mode`.
    pub fn cost(&self, id1: usize, id2: usize, mode: CostMode) -> Result<f64> {
        self.distance(id1, id2).map(|d| mode.apply(d))
    }

    fn lookup(&self, id: usize) -> Result<&City> {
        self.cities.get(id).ok_or(TspError::UninitializedCache {
            id,
            size: self.cache.size(),
        })
    }
}
