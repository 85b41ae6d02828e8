//! # Tournament selection
//!
//! Draws the parent pool from the scored population, with repetition, biased
//! toward lower fitness. Each output slot is decided by one tournament: a
//! handful of distinct individuals are sampled, ranked, and walked from best
//! to second-worst, each accepted as the winner with the configured win
//! probability; if none accepts, the worst participant wins by default.

use crate::error::{OptimizeError, Result};
use crate::population::{compare_values, IndexScratch, Scored};
use crate::rng::RandomSource;

/// A selection strategy that samples parents through stochastic tournaments.
///
/// Tournament selection provides a balance between exploration and
/// exploitation:
/// - Larger tournament sizes increase selection pressure.
/// - A win probability of 1 makes every tournament deterministic
///   best-of-subset; smaller values soften the pressure.
/// - A tournament size of 1 degenerates to uniform random selection.
///
/// # Examples
///
/// ```
/// use evobox::population::{IndexScratch, Scored};
/// use evobox::rng::RandomSource;
/// use evobox::selection::TournamentSelection;
///
/// let scores = vec![
///     Scored::new(vec![0.0], 3.0),
///     Scored::new(vec![1.0], 1.0),
///     Scored::new(vec![2.0], 2.0),
/// ];
///
/// let selection = TournamentSelection::new(2, 0.9).unwrap();
/// let mut rng = RandomSource::from_seed(42);
/// let mut scratch = IndexScratch::new();
/// let mut parents = Vec::new();
///
/// selection
///     .select_into(&scores, 5, &mut scratch, &mut rng, &mut parents)
///     .unwrap();
/// assert_eq!(parents.len(), 5);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct TournamentSelection {
    size: usize,
    win_probability: f64,
}

impl TournamentSelection {
    /// Creates a new `TournamentSelection` strategy.
    ///
    /// # Arguments
    ///
    /// * `size` - The number of individuals in each tournament. Must be at
    ///   least 1. A size of 1 is equivalent to uniform random selection.
    /// * `win_probability` - The probability that the best remaining
    ///   participant wins at each step of the walk. Must lie in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is 0 or `win_probability` is outside `[0, 1]`.
    pub fn new(size: usize, win_probability: f64) -> Result<Self> {
        if size < 1 {
            return Err(OptimizeError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&win_probability) {
            return Err(OptimizeError::Configuration(format!(
                "Tournament win probability {} outside [0, 1]",
                win_probability
            )));
        }

        Ok(Self {
            size,
            win_probability,
        })
    }

    /// Fills `out` with `count` individuals sampled from `scores`.
    ///
    /// Winners are selected with repetition; `out` is overwritten and its
    /// per-individual storage reused across generations.
    ///
    /// # Errors
    ///
    /// Returns an error if `scores` is empty or smaller than the tournament
    /// size.
    pub fn select_into(
        &self,
        scores: &[Scored],
        count: usize,
        scratch: &mut IndexScratch,
        rng: &mut RandomSource,
        out: &mut Vec<Scored>,
    ) -> Result<()> {
        if scores.is_empty() {
            return Err(OptimizeError::EmptyPopulation);
        }

        if self.size > scores.len() {
            return Err(OptimizeError::Configuration(format!(
                "Tournament size ({}) exceeds population size ({})",
                self.size,
                scores.len()
            )));
        }

        if out.len() != count {
            let dim = scores[0].genes.len();
            out.resize_with(count, || Scored::placeholder(dim));
        }

        for slot in out.iter_mut() {
            let winner = self.run_tournament(scores, scratch, rng);
            slot.genes.clone_from(&scores[winner].genes);
            slot.value = scores[winner].value;
        }

        Ok(())
    }

    /// Runs a single tournament and returns the index of the winner.
    fn run_tournament(
        &self,
        scores: &[Scored],
        scratch: &mut IndexScratch,
        rng: &mut RandomSource,
    ) -> usize {
        let indices = scratch.permutation(scores.len());

        // draw `size` distinct participants by partial Fisher-Yates
        for i in 0..self.size {
            let swap = i + rng.index(scores.len() - i);
            indices.swap(i, swap);
        }

        indices[..self.size]
            .sort_unstable_by(|&a, &b| compare_values(scores[a].value, scores[b].value));

        for &candidate in &indices[..self.size - 1] {
            if rng.probability() < self.win_probability {
                return candidate;
            }
        }

        // nobody won on the walk: the worst participant wins by default
        indices[self.size - 1]
    }
}
