//! Evolutionary TSP engine.
//!
//! A population of [`Tour`]s grows each generation with offspring bred from
//! an elite pool of the shortest tours. Which operators run is selected by a
//! [`Strategy`]; the four classic combinations are named by [`EngineKind`].
//!
//! # Key Types
//!
//! - [`TspConfig`]: Population, operator and termination parameters
//! - [`Engine`]: Owns the population and advances it one generation at a time
//! - [`TspRunner`]: Drives an engine to a stagnation, generation or time limit
//! - [`TspResult`]: Best tour found plus run statistics
//!
//! # Submodules
//!
//! - [`operators`]: Transposition mutation, greedy crossover and 2-opt
//!
//! # References
//!
//! - Grefenstette et al. (1985), *Genetic Algorithms for the Traveling Salesman Problem*
//! - Croes (1958), *A Method for Solving Traveling-Salesman Problems*

mod config;
mod engine;
pub mod operators;
mod runner;
mod strategy;
mod types;

pub use config::TspConfig;
pub use engine::Engine;
pub use runner::{TspResult, TspRunner};
pub use strategy::{EngineKind, PopulationPolicy, Strategy};
pub use types::Tour;
