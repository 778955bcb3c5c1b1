//! Error taxonomy.
//!
//! Every failure in this crate is a deterministic input or contract
//! violation; nothing here is transient, so callers should abort the run
//! rather than retry.

use thiserror::Error;

/// Errors raised by the city model, tour construction and the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TspError {
    /// A configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A distance query used a city id the cache was not sized for.
    ///
    /// An unsized cache (`size == 0`) rejects every query.
    #[error("distance cache sized for {size} cities was queried for city id {id}")]
    UninitializedCache { id: usize, size: usize },

    /// Too few cities to form a tour.
    #[error("at least 2 cities are required, got {cities}")]
    DegenerateInput { cities: usize },

    /// City ids must match their position in the city set.
    #[error("city at index {index} has id {id}")]
    InvalidCityId { index: usize, id: usize },

    /// A city order is not a permutation of the full city set.
    #[error("invalid tour: {0}")]
    InvalidPermutation(String),

    /// The engine was stepped before a successful `initialize`.
    #[error("engine has not been initialized")]
    NotInitialized,
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TspError>;
