//! City and cost-mode definitions.

use std::fmt;
use std::hash::{Hash, Hasher};

/// A point of the tour.
///
/// Cities are immutable once built. `id` is the city's index inside its
/// [`CityMap`](super::CityMap) and keys the distance cache; coordinates are
/// unit-agnostic integers.
///
/// Equality compares id, coordinates and name, so two cities with the same
/// id but a different position are different cities. The start flag is not
/// part of a city's identity.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    id: usize,
    x: i32,
    y: i32,
    name: Option<String>,
    start: bool,
}

impl City {
    /// Creates an unnamed city.
    pub fn new(id: usize, x: i32, y: i32) -> Self {
        Self {
            id,
            x,
            y,
            name: None,
            start: false,
        }
    }

    /// Sets the city name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Flags the city as the salesman's start city.
    ///
    /// The flag is carried for rendering and reports; no algorithm reads it.
    pub fn with_start(mut self, start: bool) -> Self {
        self.start = start;
        self
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_start(&self) -> bool {
        self.start
    }

    /// Straight-line distance to another city, bypassing any cache.
    pub fn euclidean(&self, other: &City) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl PartialEq for City {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.x == other.x && self.y == other.y && self.name == other.name
    }
}

impl Eq for City {}

impl Hash for City {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.x.hash(state);
        self.y.hash(state);
        self.name.hash(state);
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}: [{};{}]", name, self.x, self.y),
            None => write!(f, "#{}: [{};{}]", self.id, self.x, self.y),
        }
    }
}

/// How the cost of an edge is derived from its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CostMode {
    /// Cost equals distance.
    #[default]
    Plain,

    /// Cost is the squared distance, penalising long edges (RMS cost).
    Squared,
}

impl CostMode {
    /// Converts an edge length into its cost.
    pub fn apply(self, distance: f64) -> f64 {
        match self {
            CostMode::Plain => distance,
            CostMode::Squared => distance * distance,
        }
    }
}
