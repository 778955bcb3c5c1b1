//! Engine and runner configuration.
//!
//! [`TspConfig`] holds every parameter of an evolutionary TSP run. The
//! engine reads the population fields; the runner additionally reads the
//! termination fields.

use super::strategy::{EngineKind, PopulationPolicy, Strategy};
use crate::city::CostMode;
use crate::error::{Result, TspError};

/// Configuration for the evolutionary TSP engine.
///
/// # Defaults
///
/// ```
/// use u_tsp::ga::TspConfig;
///
/// let config = TspConfig::default();
/// assert_eq!(config.population_size, 1000);
/// assert_eq!(config.stagnation_limit, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_tsp::city::CostMode;
/// use u_tsp::ga::{EngineKind, TspConfig};
///
/// let config = TspConfig::default()
///     .with_population_size(200)
///     .with_growth_rate(0.01)
///     .with_mutation_ratio(0.3)
///     .with_cost_mode(CostMode::Squared)
///     .with_engine(EngineKind::MutatorTwoOpt)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TspConfig {
    /// Number of tours in the initial population.
    pub population_size: usize,

    /// Fraction of `population_size` forming the elite parent pool.
    ///
    /// The pool holds `max(2, floor(population_size * growth_rate))` tours.
    pub growth_rate: f64,

    /// Per-position swap probability during mutation (0.0–1.0).
    pub mutation_ratio: f64,

    /// Edge cost derived from distance.
    pub cost_mode: CostMode,

    /// Which reproduction capabilities are active.
    pub strategy: Strategy,

    /// Whether the population grows freely or is cut back each generation.
    pub population_policy: PopulationPolicy,

    /// Generations without a change of the best distance before the runner
    /// stops. 0 disables stagnation-based termination.
    pub stagnation_limit: usize,

    /// Hard cap on generations run by the runner. `None` for no cap.
    pub max_generations: Option<usize>,

    /// Optional wall-clock limit for the runner in milliseconds.
    ///
    /// Checked once per generation, so a run may overshoot by one generation.
    pub time_limit_ms: Option<u64>,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,

    /// Evaluate and refine offspring on rayon's thread pool.
    ///
    /// Only effective with the `parallel` feature.
    pub parallel: bool,
}

impl Default for TspConfig {
    fn default() -> Self {
        Self {
            population_size: 1000,
            growth_rate: 0.0075,
            mutation_ratio: 0.5,
            cost_mode: CostMode::Plain,
            strategy: Strategy::default(),
            population_policy: PopulationPolicy::Grow,
            stagnation_limit: 100,
            max_generations: None,
            time_limit_ms: None,
            seed: None,
            parallel: true,
        }
    }
}

impl TspConfig {
    /// Sets the initial population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the growth rate.
    pub fn with_growth_rate(mut self, rate: f64) -> Self {
        self.growth_rate = rate;
        self
    }

    /// Sets the mutation ratio.
    ///
    /// Not clamped: out-of-range values are reported by [`validate`](Self::validate).
    pub fn with_mutation_ratio(mut self, ratio: f64) -> Self {
        self.mutation_ratio = ratio;
        self
    }

    /// Sets the cost mode.
    pub fn with_cost_mode(mut self, mode: CostMode) -> Self {
        self.cost_mode = mode;
        self
    }

    /// Sets the reproduction strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the strategy of one of the classic engines.
    pub fn with_engine(self, kind: EngineKind) -> Self {
        self.with_strategy(kind.strategy())
    }

    /// Sets the population policy.
    pub fn with_population_policy(mut self, policy: PopulationPolicy) -> Self {
        self.population_policy = policy;
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = Some(n);
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Size of the elite parent pool for one generation.
    pub fn elite_count(&self) -> usize {
        ((self.population_size as f64 * self.growth_rate) as usize).max(2)
    }

    /// Validates the population parameters read by the engine.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(TspError::Config("population_size must be at least 1".into()));
        }
        if !self.growth_rate.is_finite() || self.growth_rate <= 0.0 {
            return Err(TspError::Config(format!(
                "growth_rate must be positive, got {}",
                self.growth_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_ratio) {
            return Err(TspError::Config(format!(
                "mutation_ratio must be within [0, 1], got {}",
                self.mutation_ratio
            )));
        }
        Ok(())
    }

    /// Validates the population parameters plus the runner's termination
    /// parameters.
    pub fn validate_run(&self) -> Result<()> {
        self.validate()?;
        if self.time_limit_ms == Some(0) {
            return Err(TspError::Config("time_limit_ms must be positive or None".into()));
        }
        if self.stagnation_limit == 0 && self.max_generations.is_none() && self.time_limit_ms.is_none() {
            return Err(TspError::Config(
                "run needs a stagnation limit, generation limit or time limit".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TspConfig::default();
        assert_eq!(config.population_size, 1000);
        assert!((config.growth_rate - 0.0075).abs() < 1e-15);
        assert!((config.mutation_ratio - 0.5).abs() < 1e-15);
        assert_eq!(config.cost_mode, CostMode::Plain);
        assert_eq!(config.strategy, EngineKind::GreedyCrossoverTwoOpt.strategy());
        assert_eq!(config.population_policy, PopulationPolicy::Grow);
        assert_eq!(config.stagnation_limit, 100);
        assert!(config.max_generations.is_none());
        assert!(config.time_limit_ms.is_none());
        assert!(config.seed.is_none());
        assert!(config.parallel);
        assert!(config.validate().is_ok());
        assert!(config.validate_run().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = TspConfig::default()
            .with_population_size(50)
            .with_growth_rate(0.2)
            .with_mutation_ratio(0.1)
            .with_cost_mode(CostMode::Squared)
            .with_engine(EngineKind::Mutator)
            .with_population_policy(PopulationPolicy::Truncate)
            .with_stagnation_limit(10)
            .with_max_generations(500)
            .with_time_limit_ms(2000)
            .with_seed(7)
            .with_parallel(false);

        assert_eq!(config.population_size, 50);
        assert!((config.growth_rate - 0.2).abs() < 1e-15);
        assert!((config.mutation_ratio - 0.1).abs() < 1e-15);
        assert_eq!(config.cost_mode, CostMode::Squared);
        assert_eq!(config.strategy, EngineKind::Mutator.strategy());
        assert_eq!(config.population_policy, PopulationPolicy::Truncate);
        assert_eq!(config.stagnation_limit, 10);
        assert_eq!(config.max_generations, Some(500));
        assert_eq!(config.time_limit_ms, Some(2000));
        assert_eq!(config.seed, Some(7));
        assert!(!config.parallel);
    }

    #[test]
    fn test_elite_count() {
        // 1000 * 0.0075 = 7.5 → 7
        assert_eq!(TspConfig::default().elite_count(), 7);
        // Never below two parents.
        assert_eq!(TspConfig::default().with_population_size(10).elite_count(), 2);
        assert_eq!(
            TspConfig::default()
                .with_population_size(100)
                .with_growth_rate(0.25)
                .elite_count(),
            25
        );
    }

    #[test]
    fn test_validate_zero_population() {
        let err = TspConfig::default().with_population_size(0).validate();
        assert!(matches!(err, Err(TspError::Config(_))));
    }

    #[test]
    fn test_validate_mutation_ratio_range() {
        for bad in [-0.1, 1.01, f64::NAN] {
            let config = TspConfig::default().with_mutation_ratio(bad);
            assert!(config.validate().is_err(), "ratio {bad} should be rejected");
        }
        for ok in [0.0, 1.0] {
            assert!(TspConfig::default().with_mutation_ratio(ok).validate().is_ok());
        }
    }

    #[test]
    fn test_validate_growth_rate() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = TspConfig::default().with_growth_rate(bad);
            assert!(config.validate().is_err(), "growth {bad} should be rejected");
        }
    }

    #[test]
    fn test_validate_run_termination() {
        let config = TspConfig::default().with_stagnation_limit(0);
        assert!(config.validate().is_ok());
        assert!(config.validate_run().is_err());
        assert!(config.clone().with_max_generations(10).validate_run().is_ok());
        assert!(config.clone().with_time_limit_ms(10).validate_run().is_ok());
    }

    #[test]
    fn test_validate_zero_time_limit() {
        let config = TspConfig::default().with_time_limit_ms(0);
        assert!(config.validate_run().is_err());
    }
}
