//! City and distance model.
//!
//! - [`City`]: an immutable point with integer coordinates
//! - [`DistanceCache`]: lazily filled symmetric distance matrix, safe to
//!   share across threads
//! - [`CityMap`]: the validated city set of one instance, owning its cache
//! - [`CostMode`]: plain or squared (RMS) edge cost

mod cache;
mod map;
mod types;

pub use cache::DistanceCache;
pub use map::CityMap;
pub use types::{City, CostMode};
