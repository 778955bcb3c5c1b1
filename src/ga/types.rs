//! The tour chromosome.
//!
//! A [`Tour`] is one candidate closed loop over every city of a
//! [`CityMap`]. It is immutable: operators work on a copied city order and
//! wrap the result into a new tour.

use crate::city::{City, CityMap, CostMode};
use crate::error::{Result, TspError};

/// An ordered permutation of city ids plus its closed-loop length and cost.
///
/// `total_distance` sums the distance of every consecutive pair and of the
/// closing edge from the last city back to the first. `total_cost` is the
/// same sum under the configured [`CostMode`].
///
/// With the `serde` feature a tour serializes for reports; it is never
/// deserialized, since only [`Tour::new`] validates the order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Tour {
    order: Vec<usize>,
    total_distance: f64,
    total_cost: f64,
}

impl Tour {
    /// Builds a tour from a city order and computes its totals.
    ///
    /// The order is copied; the caller keeps ownership of `order`.
    ///
    /// # Errors
    /// [`TspError::InvalidPermutation`] if `order` is not a permutation of
    /// every city id in `map`; cache errors from distance queries.
    pub fn new(order: &[usize], map: &CityMap, mode: CostMode) -> Result<Self> {
        let mut tour = Self::unevaluated(order, map)?;
        tour.evaluate(map, mode)?;
        Ok(tour)
    }

    /// Builds a tour without computing its totals (both stay `0.0`).
    pub fn unevaluated(order: &[usize], map: &CityMap) -> Result<Self> {
        check_permutation(order, map.len())?;
        Ok(Self {
            order: order.to_vec(),
            total_distance: 0.0,
            total_cost: 0.0,
        })
    }

    /// Computes totals for a tour built with [`unevaluated`](Self::unevaluated).
    pub(crate) fn evaluate(&mut self, map: &CityMap, mode: CostMode) -> Result<()> {
        let (distance, cost) = closed_loop_totals(&self.order, map, mode)?;
        self.total_distance = distance;
        self.total_cost = cost;
        Ok(())
    }

    /// City ids in visiting order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Cities in visiting order, resolved against `map`.
    ///
    /// # Panics
    /// If `map` is not the map the tour was built over (a city id is out of
    /// range).
    pub fn cities<'a>(&'a self, map: &'a CityMap) -> impl Iterator<Item = &'a City> + 'a {
        self.order.iter().map(move |&id| &map.cities()[id])
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }
}

/// Sums distance and cost over all consecutive pairs plus the wrap-around edge.
fn closed_loop_totals(order: &[usize], map: &CityMap, mode: CostMode) -> Result<(f64, f64)> {
    let n = order.len();
    let mut distance = 0.0;
    let mut cost = 0.0;
    for i in 0..n {
        let d = map.distance(order[i], order[(i + 1) % n])?;
        distance += d;
        cost += mode.apply(d);
    }
    Ok((distance, cost))
}

pub(crate) fn check_permutation(order: &[usize], n: usize) -> Result<()> {
    if order.len() != n {
        return Err(TspError::InvalidPermutation(format!(
            "expected {n} cities, got {}",
            order.len()
        )));
    }
    let mut seen = vec![false; n];
    for &id in order {
        if id >= n {
            return Err(TspError::InvalidPermutation(format!(
                "city id {id} out of range 0..{n}"
            )));
        }
        if std::mem::replace(&mut seen[id], true) {
            return Err(TspError::InvalidPermutation(format!(
                "city id {id} visited twice"
            )));
        }
    }
    Ok(())
}
