//! Run driver.
//!
//! [`TspRunner`] drives an [`Engine`] until a termination condition holds:
//! the best distance stays unchanged for `stagnation_limit` consecutive
//! generations (its "best-cost age"), a generation or time limit is hit,
//! or an external cancellation flag is raised.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rand::Rng;
use tracing::{debug, info};

use super::config::TspConfig;
use super::engine::Engine;
use super::types::Tour;
use crate::city::CityMap;
use crate::error::{Result, TspError};
use crate::random::create_rng;

/// Result of a TSP run.
#[derive(Debug, Clone)]
pub struct TspResult {
    /// The shortest tour found.
    pub best: Tour,

    /// Total distance of `best`.
    pub best_distance: f64,

    /// Total cost of `best` under the configured cost mode.
    pub best_cost: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Population size when the run stopped.
    pub population_size: usize,

    /// Whether the run stopped because the best distance stagnated.
    pub stagnated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Wall-clock run time in milliseconds.
    pub elapsed_ms: u64,

    /// Best distance before each generation, plus the final one.
    pub distance_history: Vec<f64>,
}

/// Executes complete TSP runs.
///
/// # Usage
///
/// ```
/// use std::sync::Arc;
/// use u_tsp::city::CityMap;
/// use u_tsp::ga::{TspConfig, TspRunner};
///
/// let map = Arc::new(CityMap::from_coords(&[(1, 1), (2, 1), (2, 2), (1, 2)]));
/// let config = TspConfig::default()
///     .with_population_size(50)
///     .with_stagnation_limit(10)
///     .with_seed(42);
///
/// let result = TspRunner::run(map, &config)?;
/// assert_eq!(result.best_distance, 4.0);
/// # Ok::<(), u_tsp::TspError>(())
/// ```
pub struct TspRunner;

impl TspRunner {
    /// Runs the engine configured by `config` over `map`.
    pub fn run(map: Arc<CityMap>, config: &TspConfig) -> Result<TspResult> {
        Self::run_with_cancel(map, config, None)
    }

    /// Runs with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the run stops
    /// before the next generation and returns the best tour so far.
    pub fn run_with_cancel(
        map: Arc<CityMap>,
        config: &TspConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<TspResult> {
        config.validate_run()?;

        let rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        let mut engine = Engine::new(rng);
        engine.initialize(config, map)?;

        Self::drive(&mut engine, config, cancel.as_deref())
    }

    /// Drives an already initialized engine with the termination settings
    /// of `config`.
    pub fn drive<R: Rng>(
        engine: &mut Engine<R>,
        config: &TspConfig,
        cancel: Option<&AtomicBool>,
    ) -> Result<TspResult> {
        config.validate_run()?;

        let start = Instant::now();
        let mut distance_history = Vec::new();
        let mut previous: Option<f64> = None;
        let mut best_cost_age = 0usize;
        let mut stagnated = false;
        let mut cancelled = false;

        info!(
            cities = engine.map().map_or(0, |m| m.len()),
            population = engine.population_size(),
            stagnation_limit = config.stagnation_limit,
            "run started"
        );

        loop {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                cancelled = true;
                break;
            }
            if let Some(limit) = config.time_limit_ms {
                if start.elapsed().as_millis() >= u128::from(limit) {
                    break;
                }
            }

            let best = engine
                .best_chromosome()
                .ok_or(TspError::NotInitialized)?
                .total_distance();
            distance_history.push(best);

            match previous {
                Some(p) if p == best => best_cost_age += 1,
                Some(_) => {
                    debug!(generation = engine.generation(), best, "new best distance");
                    best_cost_age = 0;
                }
                None => best_cost_age = 0,
            }
            previous = Some(best);

            if config.stagnation_limit > 0 && best_cost_age >= config.stagnation_limit {
                stagnated = true;
                break;
            }
            if config.max_generations.is_some_and(|max| engine.generation() >= max) {
                break;
            }

            engine.next_generation()?;
        }

        let best = engine
            .best_chromosome()
            .ok_or(TspError::NotInitialized)?
            .clone();
        if distance_history.last() != Some(&best.total_distance()) {
            distance_history.push(best.total_distance());
        }

        let elapsed_ms = start.elapsed().as_millis() as u64;
        info!(
            generations = engine.generation(),
            best_distance = best.total_distance(),
            stagnated,
            cancelled,
            elapsed_ms,
            "run finished"
        );

        Ok(TspResult {
            best_distance: best.total_distance(),
            best_cost: best.total_cost(),
            best,
            generations: engine.generation(),
            population_size: engine.population_size(),
            stagnated,
            cancelled,
            elapsed_ms,
            distance_history,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::CostMode;
    use crate::ga::{EngineKind, PopulationPolicy};

    fn unit_square() -> Arc<CityMap> {
        Arc::new(CityMap::from_coords(&[(1, 1), (2, 1), (2, 2), (1, 2)]))
    }

    fn grid(side: i32) -> Arc<CityMap> {
        let coords: Vec<(i32, i32)> = (0..side)
            .flat_map(|x| (0..side).map(move |y| (x * 10, y * 10)))
            .collect();
        Arc::new(CityMap::from_coords(&coords))
    }

    fn base_config() -> TspConfig {
        TspConfig::default()
            .with_population_size(40)
            .with_growth_rate(0.1)
            .with_mutation_ratio(0.1)
            .with_seed(42)
            .with_parallel(false)
    }

    #[test]
    fn test_unit_square_stagnates_at_optimum() {
        let config = base_config().with_stagnation_limit(5);
        let result = TspRunner::run(unit_square(), &config).unwrap();

        assert!(result.stagnated);
        assert!(!result.cancelled);
        assert_eq!(result.best_distance, 4.0);
        assert_eq!(result.best_cost, 4.0);
        // Optimal from the start: five unchanged observations after the first.
        assert_eq!(result.generations, 5);
        assert_eq!(result.distance_history, vec![4.0; 6]);
    }

    #[test]
    fn test_generation_limit() {
        let config = base_config()
            .with_engine(EngineKind::Mutator)
            .with_stagnation_limit(0)
            .with_max_generations(30);
        let result = TspRunner::run(grid(4), &config).unwrap();

        assert_eq!(result.generations, 30);
        assert!(!result.stagnated);
        assert_eq!(result.distance_history.len(), 31);
        assert_eq!(result.population_size, 40 + 30);
    }

    #[test]
    fn test_history_is_non_increasing() {
        for kind in EngineKind::ALL {
            let config = base_config()
                .with_engine(kind)
                .with_stagnation_limit(0)
                .with_max_generations(40);
            let result = TspRunner::run(grid(4), &config).unwrap();
            for window in result.distance_history.windows(2) {
                assert!(
                    window[1] <= window[0],
                    "{kind}: best distance grew from {} to {}",
                    window[0],
                    window[1]
                );
            }
            assert_eq!(result.best_distance, *result.distance_history.last().unwrap());
        }
    }

    #[test]
    fn test_grid_improves_on_initial_population() {
        // 16 grid points 10 apart: no tour is shorter than 160.
        let config = base_config().with_stagnation_limit(30);
        let result = TspRunner::run(grid(4), &config).unwrap();
        assert!(result.stagnated);
        assert!(result.best_distance < result.distance_history[0]);
        assert!(result.best_distance >= 160.0 - 1e-9);
    }

    #[test]
    fn test_same_seed_same_result() {
        let config = base_config()
            .with_engine(EngineKind::GreedyCrossover)
            .with_stagnation_limit(0)
            .with_max_generations(25);
        let a = TspRunner::run(grid(3), &config).unwrap();
        let b = TspRunner::run(grid(3), &config).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.distance_history, b.distance_history);
    }

    #[test]
    fn test_cancelled_before_start() {
        let config = base_config().with_stagnation_limit(0).with_max_generations(1000);
        let cancel = Arc::new(AtomicBool::new(true));
        let result = TspRunner::run_with_cancel(grid(3), &config, Some(cancel)).unwrap();

        assert!(result.cancelled);
        assert_eq!(result.generations, 0);
        assert_eq!(result.population_size, 40);
        assert_eq!(result.distance_history.len(), 1);
    }

    #[test]
    fn test_cancellation_from_other_thread() {
        let config = base_config()
            .with_population_policy(PopulationPolicy::Truncate)
            .with_stagnation_limit(0)
            .with_max_generations(usize::MAX);

        let cancel = Arc::new(AtomicBool::new(false));
        let cancel_clone = cancel.clone();
        std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_millis(10));
            cancel_clone.store(true, Ordering::Relaxed);
        });

        let result = TspRunner::run_with_cancel(grid(4), &config, Some(cancel)).unwrap();
        assert!(result.cancelled, "expected cancelled result");
        assert_eq!(result.population_size, 40);
    }

    #[test]
    fn test_time_limit() {
        let config = base_config()
            .with_population_policy(PopulationPolicy::Truncate)
            .with_stagnation_limit(0)
            .with_time_limit_ms(20);
        let result = TspRunner::run(grid(4), &config).unwrap();
        assert!(!result.cancelled);
        assert!(!result.stagnated);
        assert!(result.elapsed_ms >= 20, "stopped after {} ms", result.elapsed_ms);
    }

    #[test]
    fn test_squared_cost_reported() {
        let config = base_config().with_cost_mode(CostMode::Squared).with_stagnation_limit(5);
        let result = TspRunner::run(grid(3), &config).unwrap();
        assert!(result.best_cost > result.best_distance);
    }

    #[test]
    fn test_invalid_configuration() {
        let no_stop = base_config().with_stagnation_limit(0);
        assert!(matches!(
            TspRunner::run(unit_square(), &no_stop),
            Err(TspError::Config(_))
        ));

        let bad_ratio = base_config().with_mutation_ratio(2.0);
        assert!(matches!(
            TspRunner::run(unit_square(), &bad_ratio),
            Err(TspError::Config(_))
        ));
    }

    #[test]
    fn test_degenerate_map() {
        let map = Arc::new(CityMap::from_coords(&[(3, 3)]));
        assert_eq!(
            TspRunner::run(map, &base_config()).unwrap_err(),
            TspError::DegenerateInput { cities: 1 }
        );
    }

    #[test]
    fn test_drive_uninitialized_engine() {
        let mut engine = Engine::from_seed(1);
        let err = TspRunner::drive(&mut engine, &base_config(), None).unwrap_err();
        assert_eq!(err, TspError::NotInitialized);
    }
}
