//! # OptimizerOptions
//!
//! The `OptimizerOptions` struct carries the algorithmic knobs for one run:
//! population and parent-pool sizes, the iteration budget, elitism, and the
//! parameters of the selection, crossover, and mutation operators.
//!
//! Options are plain data; validation and probability normalization happen in
//! a separate [`OptimizerOptions::resolve`] step that produces a
//! [`ResolvedOptions`] value and never mutates the caller's input.
//!
//! ## Example
//!
//! ```rust
//! use evobox::evolution::options::OptimizerOptions;
//!
//! let options = OptimizerOptions::builder()
//!     .max_iters(500)
//!     .elite_children_count(1)
//!     .build();
//!
//! assert_eq!(options.population_count, 100);
//! assert_eq!(options.max_iters, 500);
//! ```

use crate::error::{OptimizeError, Result};
use crate::operators::CrossoverKind;

/// Tolerance for probabilities that should be zero but carry rounding noise.
const NEGATIVE_TOLERANCE: f64 = 1e-5;

/// Tournament selection parameters.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TournamentOptions {
    /// Participants per tournament. Larger values increase selection pressure.
    pub size: usize,
    /// Probability that the best remaining participant wins at each step.
    /// Set to 1 for fully deterministic tournaments.
    pub p: f64,
}

impl Default for TournamentOptions {
    fn default() -> Self {
        Self { size: 4, p: 0.9 }
    }
}

/// Crossover parameters.
///
/// The three kind probabilities only express a mix; they are normalized to
/// sum to 1 during [`OptimizerOptions::resolve`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CrossoverOptions {
    /// Probability that one parent-pool slot triggers a crossover event.
    /// Zero disables the crossover phase entirely.
    pub total_probability: f64,
    /// Relative weight of classic single-point crossover.
    pub p_classic: f64,
    /// Relative weight of linear crossover.
    pub p_linear: f64,
    /// Relative weight of heuristic crossover.
    pub p_heuristic: f64,
    /// Upper bound of the heuristic blend factor; values above 1 allow
    /// extrapolation beyond the better parent.
    pub heuristic_range_mult: f64,
}

impl Default for CrossoverOptions {
    fn default() -> Self {
        Self {
            total_probability: 0.3,
            p_classic: 0.4,
            p_linear: 0.3,
            p_heuristic: 0.3,
            heuristic_range_mult: 2.0,
        }
    }
}

/// Mutation parameters.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct MutationOptions {
    /// Per-gene probability of full-range mutation.
    pub p_full: f64,
    /// Per-individual probability of fine-range mutation.
    pub p_fine: f64,
    /// Fine-mutation step range at the last iteration.
    pub fine_mutation_min: f64,
    /// Fine-mutation step range at iteration 0.
    pub fine_mutation_max: f64,
}

impl Default for MutationOptions {
    fn default() -> Self {
        Self {
            p_full: 0.005,
            p_fine: 0.3,
            fine_mutation_min: 1e-5,
            fine_mutation_max: 0.15,
        }
    }
}

/// Configuration for one optimizer run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerOptions {
    /// Number of individuals per generation.
    pub population_count: usize,
    /// Number of individuals drawn into the parent pool each generation.
    pub parents_count: usize,
    /// Number of generations to run.
    pub max_iters: usize,
    /// Number of best individuals copied unmutated into the next generation.
    /// They still participate in tournaments.
    pub elite_children_count: usize,
    /// Tournament selection parameters.
    pub tournament: TournamentOptions,
    /// Crossover parameters.
    pub crossover: CrossoverOptions,
    /// Mutation parameters.
    pub mutation: MutationOptions,
    /// Minimum population size before fitness evaluation goes parallel.
    pub parallel_threshold: usize,
}

impl Default for OptimizerOptions {
    fn default() -> Self {
        Self {
            population_count: 100,
            parents_count: 35,
            max_iters: 1000,
            elite_children_count: 0,
            tournament: TournamentOptions::default(),
            crossover: CrossoverOptions::default(),
            mutation: MutationOptions::default(),
            parallel_threshold: 1000,
        }
    }
}

impl OptimizerOptions {
    /// Returns a builder for creating an `OptimizerOptions` instance.
    pub fn builder() -> OptimizerOptionsBuilder {
        OptimizerOptionsBuilder::default()
    }

    /// Validates the options against a search space of `dim` dimensions and
    /// produces the normalized configuration the engine runs on.
    ///
    /// Normalization covers the crossover kind mix (rescaled to sum to 1,
    /// with the classic share zeroed for one-dimensional domains) and leaves
    /// `self` untouched.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any count or probability is out of
    /// range, if the total crossover probability is negative, or if it is
    /// positive while the kind probabilities sum to zero.
    pub fn resolve(&self, dim: usize) -> Result<ResolvedOptions> {
        if self.population_count < 1 {
            return Err(OptimizeError::Configuration(
                "Population count must be at least 1".to_string(),
            ));
        }

        if self.parents_count < 1 {
            return Err(OptimizeError::Configuration(
                "Parents count must be at least 1".to_string(),
            ));
        }

        if self.elite_children_count > self.population_count {
            return Err(OptimizeError::Configuration(format!(
                "Elite children count ({}) exceeds population count ({})",
                self.elite_children_count, self.population_count
            )));
        }

        if self.tournament.size < 1 || self.tournament.size > self.population_count {
            return Err(OptimizeError::Configuration(format!(
                "Tournament size ({}) outside [1, population count = {}]",
                self.tournament.size, self.population_count
            )));
        }

        if !(0.0..=1.0).contains(&self.tournament.p) {
            return Err(OptimizeError::Configuration(format!(
                "Tournament win probability {} outside [0, 1]",
                self.tournament.p
            )));
        }

        let crossover = self.resolve_crossover(dim)?;
        let mutation = self.resolve_mutation()?;

        Ok(ResolvedOptions {
            population_count: self.population_count,
            parents_count: self.parents_count,
            max_iters: self.max_iters,
            elite_children_count: self.elite_children_count,
            tournament: self.tournament.clone(),
            crossover,
            mutation,
            parallel_threshold: self.parallel_threshold,
        })
    }

    fn resolve_crossover(&self, dim: usize) -> Result<ResolvedCrossover> {
        let cross = &self.crossover;

        if cross.total_probability < -NEGATIVE_TOLERANCE {
            return Err(OptimizeError::Configuration(format!(
                "Negative crossover probability: {}",
                cross.total_probability
            )));
        }

        let total = cross.total_probability.max(0.0);
        if total > 1.0 {
            return Err(OptimizeError::Configuration(format!(
                "Total crossover probability {} outside [0, 1]",
                total
            )));
        }

        for (name, p) in [
            ("classic", cross.p_classic),
            ("linear", cross.p_linear),
            ("heuristic", cross.p_heuristic),
        ] {
            if p < 0.0 {
                return Err(OptimizeError::Configuration(format!(
                    "Negative {} crossover probability: {}",
                    name, p
                )));
            }
        }

        if cross.heuristic_range_mult <= 0.0 {
            return Err(OptimizeError::Configuration(format!(
                "Heuristic range multiplier must be positive, got {}",
                cross.heuristic_range_mult
            )));
        }

        // one gene only: a split point does not exist, so the classic share
        // is silently redistributed to the other two kinds
        let p_classic = if dim < 2 { 0.0 } else { cross.p_classic };

        let (classic_threshold, linear_threshold) = if total > 0.0 {
            let sum = p_classic + cross.p_linear + cross.p_heuristic;
            if sum <= 0.0 {
                return Err(OptimizeError::Configuration(
                    "Zero crossover kind probability sum".to_string(),
                ));
            }
            (p_classic / sum, (p_classic + cross.p_linear) / sum)
        } else {
            // crossover disabled: thresholds are never consulted
            (0.0, 0.0)
        };

        Ok(ResolvedCrossover {
            total_probability: total,
            classic_threshold,
            linear_threshold,
            heuristic_range_mult: cross.heuristic_range_mult,
        })
    }

    fn resolve_mutation(&self) -> Result<MutationOptions> {
        let m = &self.mutation;

        for (name, p) in [("full", m.p_full), ("fine", m.p_fine)] {
            if !(0.0..=1.0).contains(&p) {
                return Err(OptimizeError::Configuration(format!(
                    "{} mutation probability {} outside [0, 1]",
                    name, p
                )));
            }
        }

        if m.fine_mutation_min < 0.0 {
            return Err(OptimizeError::Configuration(format!(
                "Fine mutation range minimum must be non-negative, got {}",
                m.fine_mutation_min
            )));
        }

        if m.fine_mutation_min > m.fine_mutation_max {
            return Err(OptimizeError::Configuration(format!(
                "Fine mutation range minimum ({}) exceeds maximum ({})",
                m.fine_mutation_min, m.fine_mutation_max
            )));
        }

        Ok(m.clone())
    }
}

/// Builder for [`OptimizerOptions`].
///
/// Provides a fluent interface; unset fields fall back to the defaults.
#[derive(Debug, Clone, Default)]
pub struct OptimizerOptionsBuilder {
    population_count: Option<usize>,
    parents_count: Option<usize>,
    max_iters: Option<usize>,
    elite_children_count: Option<usize>,
    tournament: Option<TournamentOptions>,
    crossover: Option<CrossoverOptions>,
    mutation: Option<MutationOptions>,
    parallel_threshold: Option<usize>,
}

impl OptimizerOptionsBuilder {
    /// Sets the population size.
    pub fn population_count(mut self, value: usize) -> Self {
        self.population_count = Some(value);
        self
    }

    /// Sets the parent pool size.
    pub fn parents_count(mut self, value: usize) -> Self {
        self.parents_count = Some(value);
        self
    }

    /// Sets the iteration budget.
    pub fn max_iters(mut self, value: usize) -> Self {
        self.max_iters = Some(value);
        self
    }

    /// Sets the number of elite children.
    pub fn elite_children_count(mut self, value: usize) -> Self {
        self.elite_children_count = Some(value);
        self
    }

    /// Sets the tournament parameters.
    pub fn tournament(mut self, value: TournamentOptions) -> Self {
        self.tournament = Some(value);
        self
    }

    /// Sets the crossover parameters.
    pub fn crossover(mut self, value: CrossoverOptions) -> Self {
        self.crossover = Some(value);
        self
    }

    /// Sets the mutation parameters.
    pub fn mutation(mut self, value: MutationOptions) -> Self {
        self.mutation = Some(value);
        self
    }

    /// Sets the parallel evaluation threshold.
    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    /// Builds the `OptimizerOptions` instance.
    pub fn build(self) -> OptimizerOptions {
        let defaults = OptimizerOptions::default();
        OptimizerOptions {
            population_count: self.population_count.unwrap_or(defaults.population_count),
            parents_count: self.parents_count.unwrap_or(defaults.parents_count),
            max_iters: self.max_iters.unwrap_or(defaults.max_iters),
            elite_children_count: self
                .elite_children_count
                .unwrap_or(defaults.elite_children_count),
            tournament: self.tournament.unwrap_or(defaults.tournament),
            crossover: self.crossover.unwrap_or(defaults.crossover),
            mutation: self.mutation.unwrap_or(defaults.mutation),
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(defaults.parallel_threshold),
        }
    }
}

/// A validated, normalized configuration the engine runs on.
///
/// Produced by [`OptimizerOptions::resolve`]; immutable for the run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOptions {
    /// Number of individuals per generation.
    pub population_count: usize,
    /// Number of individuals in the parent pool.
    pub parents_count: usize,
    /// Number of generations to run.
    pub max_iters: usize,
    /// Number of best individuals copied unmutated.
    pub elite_children_count: usize,
    /// Validated tournament parameters.
    pub tournament: TournamentOptions,
    /// Normalized crossover parameters.
    pub crossover: ResolvedCrossover,
    /// Validated mutation parameters.
    pub mutation: MutationOptions,
    /// Minimum population size before fitness evaluation goes parallel.
    pub parallel_threshold: usize,
}

/// Crossover parameters with the kind mix normalized to cumulative thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCrossover {
    /// Probability that one parent-pool slot triggers a crossover event.
    pub total_probability: f64,
    /// Upper bound of the heuristic blend factor.
    pub heuristic_range_mult: f64,
    classic_threshold: f64,
    linear_threshold: f64,
}

impl ResolvedCrossover {
    /// Maps a probability draw in `[0, 1)` onto a crossover kind according to
    /// the normalized mix.
    pub fn kind_for(&self, p: f64) -> CrossoverKind {
        if p < self.classic_threshold {
            CrossoverKind::Classic
        } else if p < self.linear_threshold {
            CrossoverKind::Linear
        } else {
            CrossoverKind::Heuristic
        }
    }
}
