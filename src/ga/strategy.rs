//! Reproduction strategy composition.
//!
//! An engine's behaviour is the combination of three orthogonal
//! capabilities rather than a fixed engine type:
//!
//! | capability | effect |
//! |---|---|
//! | `crossover` | six offspring per generation from two elite parents |
//! | `mutation`  | per-index random transposition of cloned orders |
//! | `two_opt`   | every offspring refined by 2-opt before insertion |
//!
//! [`EngineKind`] names the four classic combinations.

use std::fmt;

/// Capability flags selecting how offspring are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Strategy {
    /// Breed with greedy crossover instead of cloning a single parent.
    pub crossover: bool,

    /// Apply transposition mutation to cloned orders.
    ///
    /// When off, "mutated clones" are inserted as plain clones.
    pub mutation: bool,

    /// Refine each offspring with 2-opt local search.
    pub two_opt: bool,
}

impl Default for Strategy {
    fn default() -> Self {
        EngineKind::GreedyCrossoverTwoOpt.strategy()
    }
}

impl Strategy {
    /// Enables or disables greedy crossover.
    pub fn with_crossover(mut self, on: bool) -> Self {
        self.crossover = on;
        self
    }

    /// Enables or disables mutation.
    pub fn with_mutation(mut self, on: bool) -> Self {
        self.mutation = on;
        self
    }

    /// Enables or disables 2-opt refinement.
    pub fn with_two_opt(mut self, on: bool) -> Self {
        self.two_opt = on;
        self
    }

    /// Number of offspring one generation appends.
    pub fn offspring_per_generation(&self) -> usize {
        if self.crossover {
            6
        } else {
            1
        }
    }
}

/// The four classic engine configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineKind {
    /// One mutated clone of a random elite per generation.
    Mutator,
    /// [`Mutator`](Self::Mutator) followed by 2-opt.
    MutatorTwoOpt,
    /// Six offspring from greedy crossover of two elites.
    GreedyCrossover,
    /// [`GreedyCrossover`](Self::GreedyCrossover) with 2-opt on every offspring.
    GreedyCrossoverTwoOpt,
}

impl EngineKind {
    pub const ALL: [EngineKind; 4] = [
        EngineKind::Mutator,
        EngineKind::MutatorTwoOpt,
        EngineKind::GreedyCrossover,
        EngineKind::GreedyCrossoverTwoOpt,
    ];

    pub fn strategy(self) -> Strategy {
        let (crossover, two_opt) = match self {
            EngineKind::Mutator => (false, false),
            EngineKind::MutatorTwoOpt => (false, true),
            EngineKind::GreedyCrossover => (true, false),
            EngineKind::GreedyCrossoverTwoOpt => (true, true),
        };
        Strategy {
            crossover,
            mutation: true,
            two_opt,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EngineKind::Mutator => "mutator",
            EngineKind::MutatorTwoOpt => "mutator-2opt",
            EngineKind::GreedyCrossover => "greedy-crossover",
            EngineKind::GreedyCrossoverTwoOpt => "greedy-crossover-2opt",
        }
    }
}

impl From<EngineKind> for Strategy {
    fn from(kind: EngineKind) -> Self {
        kind.strategy()
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What happens to the population after offspring are appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PopulationPolicy {
    /// Keep every tour; the population grows by the offspring count each
    /// generation.
    #[default]
    Grow,

    /// Sort and cut the population back to `population_size`, keeping the
    /// shortest tours.
    Truncate,
}
