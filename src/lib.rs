//! Evolutionary solver for the symmetric Euclidean traveling salesman problem.
//!
//! - **City**: Cities on an integer grid plus a shared, thread-safe cache of
//!   pairwise Euclidean distances.
//! - **GA**: A growing population of tours evolved by transposition
//!   mutation, greedy crossover and 2-opt refinement, with a runner that
//!   stops on stagnation, generation or time limits.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use u_tsp::city::CityMap;
//! use u_tsp::ga::{EngineKind, TspConfig, TspRunner};
//!
//! let map = Arc::new(CityMap::from_coords(&[
//!     (0, 0), (10, 0), (10, 10), (0, 10), (5, 15), (-5, 5),
//! ]));
//! let config = TspConfig::default()
//!     .with_population_size(100)
//!     .with_engine(EngineKind::GreedyCrossoverTwoOpt)
//!     .with_stagnation_limit(20)
//!     .with_seed(42);
//!
//! let result = TspRunner::run(map, &config)?;
//! assert_eq!(result.best.len(), 6);
//! # Ok::<(), u_tsp::TspError>(())
//! ```

pub mod city;
pub mod error;
pub mod ga;
pub mod random;

pub use error::{Result, TspError};
