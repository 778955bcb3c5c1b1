//! Population engine.
//!
//! [`Engine`] owns a population of [`Tour`]s and advances it one
//! generation per [`next_generation`](Engine::next_generation) call:
//!
//! 1. sort ascending by total distance (stable, so ties keep arrival order)
//! 2. take the elite pool `max(2, floor(population_size * growth_rate))`
//! 3. breed offspring from the elite pool according to the [`Strategy`]
//! 4. append them, then apply the [`PopulationPolicy`]
//!
//! Steps never modify existing tours, so the best tour can only improve.

use std::sync::Arc;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use super::config::TspConfig;
use super::operators::{greedy_crossover, transposition_mutation, two_opt};
use super::strategy::{PopulationPolicy, Strategy};
use super::types::Tour;
use crate::city::{CityMap, CostMode};
use crate::error::{Result, TspError};
use crate::random::{create_rng, shuffle};

/// Evolutionary TSP engine.
///
/// The random source is an explicit dependency: seed it for reproducible
/// runs. An engine is driven by a single caller; `next_generation` takes
/// `&mut self` and has no internal locking.
///
/// # Usage
///
/// ```
/// use std::sync::Arc;
/// use u_tsp::city::CityMap;
/// use u_tsp::ga::{Engine, EngineKind, TspConfig};
///
/// let map = Arc::new(CityMap::from_coords(&[(0, 0), (4, 0), (4, 3), (0, 3), (2, 5)]));
/// let config = TspConfig::default()
///     .with_population_size(20)
///     .with_engine(EngineKind::GreedyCrossoverTwoOpt);
///
/// let mut engine = Engine::from_seed(42);
/// engine.initialize(&config, map)?;
/// for _ in 0..10 {
///     engine.next_generation()?;
/// }
/// let best = engine.best_chromosome().expect("initialized");
/// assert!(best.total_distance() > 0.0);
/// # Ok::<(), u_tsp::TspError>(())
/// ```
pub struct Engine<R = ChaCha8Rng> {
    rng: R,
    config: TspConfig,
    map: Option<Arc<CityMap>>,
    population: Vec<Tour>,
    generation: usize,
}

impl Engine<ChaCha8Rng> {
    /// Creates an engine driven by a seeded [`ChaCha8Rng`].
    pub fn from_seed(seed: u64) -> Self {
        Self::new(create_rng(seed))
    }
}

impl<R: Rng> Engine<R> {
    /// Creates an uninitialized engine using `rng` for every random draw.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            config: TspConfig::default(),
            map: None,
            population: Vec::new(),
            generation: 0,
        }
    }

    /// Validates `config` and builds a fresh population over `map`.
    ///
    /// The first tour visits the cities in map order; the remaining
    /// `population_size - 1` tours are independent random permutations.
    /// Any previous run state is replaced, so this also restarts a run.
    ///
    /// # Errors
    /// - [`TspError::Config`] for invalid parameters
    /// - [`TspError::DegenerateInput`] for fewer than 2 cities
    ///
    /// On error the engine keeps its previous state.
    pub fn initialize(&mut self, config: &TspConfig, map: Arc<CityMap>) -> Result<()> {
        config.validate()?;
        if map.len() < 2 {
            return Err(TspError::DegenerateInput { cities: map.len() });
        }

        let input_order: Vec<usize> = (0..map.len()).collect();
        let mut orders = Vec::with_capacity(config.population_size);
        orders.push(input_order.clone());
        for _ in 1..config.population_size {
            let mut order = input_order.clone();
            shuffle(&mut order, &mut self.rng);
            orders.push(order);
        }
        let population = build_tours(&orders, &map, config.cost_mode, config.parallel)?;

        debug!(
            cities = map.len(),
            population = population.len(),
            strategy = ?config.strategy,
            "engine initialized"
        );

        self.config = config.clone();
        self.map = Some(map);
        self.population = population;
        self.generation = 0;
        Ok(())
    }

    /// Current number of tours; grows without bound under
    /// [`PopulationPolicy::Grow`].
    pub fn population_size(&self) -> usize {
        self.population.len()
    }

    /// Number of generations run since the last `initialize`.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The configuration of the current run.
    pub fn config(&self) -> &TspConfig {
        &self.config
    }

    /// The city map of the current run.
    pub fn map(&self) -> Option<&Arc<CityMap>> {
        self.map.as_ref()
    }

    /// Tours in their current order (sorted as of the last sort).
    pub fn population(&self) -> &[Tour] {
        &self.population
    }

    /// Sorts the population and returns the shortest tour.
    ///
    /// `None` before the first successful `initialize`.
    pub fn best_chromosome(&mut self) -> Option<&Tour> {
        self.sort_population();
        self.population.first()
    }

    /// Runs one generation.
    ///
    /// Offspring are produced and validated in full before any is appended;
    /// on error the population is left as it was.
    pub fn next_generation(&mut self) -> Result<()> {
        let map = self.map.clone().ok_or(TspError::NotInitialized)?;

        self.sort_population();
        let elite = self.config.elite_count().min(self.population.len());
        let strategy = self.config.strategy;

        let mut offspring = if strategy.crossover {
            self.breed_crossover(elite, &map, strategy)?
        } else {
            vec![self.breed_clone(elite, strategy)]
        };

        if strategy.two_opt {
            refine_all(&mut offspring, &map, self.config.parallel)?;
        }

        let tours = build_tours(&offspring, &map, self.config.cost_mode, self.config.parallel)?;
        self.population.extend(tours);

        if self.config.population_policy == PopulationPolicy::Truncate {
            self.sort_population();
            self.population.truncate(self.config.population_size);
        }

        self.generation += 1;
        trace!(
            generation = self.generation,
            population = self.population.len(),
            elite,
            offspring = offspring.len(),
            "generation complete"
        );
        Ok(())
    }

    /// One mutated clone of a uniformly chosen elite.
    fn breed_clone(&mut self, elite: usize, strategy: Strategy) -> Vec<usize> {
        let parent = self.rng.random_range(0..elite);
        let mut child = self.population[parent].order().to_vec();
        if strategy.mutation {
            transposition_mutation(&mut child, self.config.mutation_ratio, &mut self.rng);
        }
        child
    }

    /// Six offspring from two distinct elites: both parents mutated, both
    /// crossovers as-is, and mutated copies of both crossovers.
    fn breed_crossover(
        &mut self,
        elite: usize,
        map: &CityMap,
        strategy: Strategy,
    ) -> Result<Vec<Vec<usize>>> {
        let i1 = self.rng.random_range(0..elite);
        let mut i2 = self.rng.random_range(0..elite);
        if i1 == i2 && elite > 1 {
            if i2 > 0 {
                i2 -= 1;
            } else {
                i2 += 1;
            }
        }

        let mode: CostMode = self.config.cost_mode;
        let p1 = self.population[i1].order();
        let p2 = self.population[i2].order();
        let c12 = greedy_crossover(p1, p2, map, mode)?;
        let c21 = greedy_crossover(p2, p1, map, mode)?;

        let mut children = vec![p1.to_vec(), p2.to_vec(), c12.clone(), c21.clone(), c12, c21];
        if strategy.mutation {
            for idx in [0, 1, 4, 5] {
                transposition_mutation(&mut children[idx], self.config.mutation_ratio, &mut self.rng);
            }
        }
        Ok(children)
    }

    fn sort_population(&mut self) {
        self.population
            .sort_by(|a, b| a.total_distance().total_cmp(&b.total_distance()));
    }
}

/// Wraps orders into evaluated tours.
#[cfg(feature = "parallel")]
fn build_tours(orders: &[Vec<usize>], map: &CityMap, mode: CostMode, parallel: bool) -> Result<Vec<Tour>> {
    use rayon::prelude::*;

    if parallel {
        orders.par_iter().map(|o| Tour::new(o, map, mode)).collect()
    } else {
        orders.iter().map(|o| Tour::new(o, map, mode)).collect()
    }
}

/// Wraps orders into evaluated tours.
#[cfg(not(feature = "parallel"))]
fn build_tours(orders: &[Vec<usize>], map: &CityMap, mode: CostMode, _parallel: bool) -> Result<Vec<Tour>> {
    orders.iter().map(|o| Tour::new(o, map, mode)).collect()
}

/// Applies 2-opt to every order.
#[cfg(feature = "parallel")]
fn refine_all(orders: &mut [Vec<usize>], map: &CityMap, parallel: bool) -> Result<()> {
    use rayon::prelude::*;

    if parallel && orders.len() > 1 {
        orders.par_iter_mut().try_for_each(|o| two_opt(o, map).map(|_| ()))
    } else {
        orders.iter_mut().try_for_each(|o| two_opt(o, map).map(|_| ()))
    }
}

/// Applies 2-opt to every order.
#[cfg(not(feature = "parallel"))]
fn refine_all(orders: &mut [Vec<usize>], map: &CityMap, _parallel: bool) -> Result<()> {
    orders.iter_mut().try_for_each(|o| two_opt(o, map).map(|_| ()))
}

// ============================================================================
// Tests
// ============================================================================
