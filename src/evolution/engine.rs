//! # Optimizer
//!
//! The run orchestrator: evaluate the population, report it to the observer,
//! draw the parent pool, assemble the next generation, repeat for the
//! configured iteration budget, then evaluate once more so the reported best
//! reflects the true final population. The best-ever individual is tracked
//! as a copy across the whole run, not just the last generation.
//!
//! ## Example
//!
//! ```rust
//! use evobox::evolution::{Optimizer, OptimizerOptions};
//! use evobox::space::SearchSpace;
//!
//! let space = SearchSpace::new(vec![-5.0, -5.0], vec![5.0, 5.0]).unwrap();
//! let sphere = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
//!
//! let mut optimizer = Optimizer::with_seed(space, sphere, 42);
//! let options = OptimizerOptions::builder().max_iters(50).build();
//! let result = optimizer.run(&options).unwrap();
//! assert!(result.value < 1.0);
//! ```

use rayon::prelude::*;
use tracing::{debug, info};

use crate::breeding::GenerationAssembler;
use crate::error::{OptimizeError, Result};
use crate::evolution::objective::Objective;
use crate::evolution::observer::Observer;
use crate::evolution::options::OptimizerOptions;
use crate::population::{IndexScratch, Scored};
use crate::rng::RandomSource;
use crate::selection::TournamentSelection;
use crate::space::SearchSpace;

/// The result of a run: the best-ever individual and its objective value.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizeResult {
    /// The best solution vector found across the whole run.
    pub genes: Vec<f64>,
    /// The objective value at `genes`.
    pub value: f64,
}

/// A genetic minimizer for one objective over one box-bounded search space.
///
/// The optimizer owns its random source, so runs are reproducible when
/// constructed through [`Optimizer::with_seed`]. Fitness evaluation goes
/// through `rayon` once the population reaches the configured threshold;
/// selection and assembly stay single-threaded because they share the index
/// permutation and the parent pool.
#[derive(Debug, Clone)]
pub struct Optimizer<F: Objective> {
    space: SearchSpace,
    objective: F,
    rng: RandomSource,
}

impl<F> Optimizer<F>
where
    F: Objective + Sync,
{
    /// Creates a new optimizer seeded from system entropy.
    pub fn new(space: SearchSpace, objective: F) -> Self {
        Self {
            space,
            objective,
            rng: RandomSource::new(),
        }
    }

    /// Creates a new optimizer with a fixed seed for reproducible runs.
    pub fn with_seed(space: SearchSpace, objective: F, seed: u64) -> Self {
        Self {
            space,
            objective,
            rng: RandomSource::from_seed(seed),
        }
    }

    /// Returns the search space this optimizer operates on.
    pub fn space(&self) -> &SearchSpace {
        &self.space
    }

    /// Runs the optimization and returns the best-ever individual.
    ///
    /// # Errors
    ///
    /// Returns an error if the options fail to resolve or if the objective
    /// produces a non-finite score.
    pub fn run(&mut self, options: &OptimizerOptions) -> Result<OptimizeResult> {
        self.run_internal(options, &mut |_: usize, _: &[Scored]| {})
    }

    /// Runs the optimization, reporting every generation to `observer`.
    ///
    /// The observer is invoked once per generation with the full scored
    /// population, including the final evaluation pass, so it fires
    /// `max_iters + 1` times in total.
    pub fn run_with_observer(
        &mut self,
        options: &OptimizerOptions,
        observer: &mut dyn Observer,
    ) -> Result<OptimizeResult> {
        self.run_internal(options, observer)
    }

    fn run_internal(
        &mut self,
        options: &OptimizerOptions,
        observer: &mut dyn Observer,
    ) -> Result<OptimizeResult> {
        let dim = self.space.dim();
        let resolved = options.resolve(dim)?;
        let n = resolved.population_count;

        let selection = TournamentSelection::new(resolved.tournament.size, resolved.tournament.p)?;
        let mut assembler = GenerationAssembler::new(dim);
        let mut scratch = IndexScratch::new();

        // allocate once; every buffer below is reused across generations
        let mut population = vec![vec![0.0; dim]; n];
        for genes in population.iter_mut() {
            self.space.random_point_into(&mut self.rng, genes);
        }
        let mut scores: Vec<Scored> = (0..n).map(|_| Scored::placeholder(dim)).collect();
        let mut parents: Vec<Scored> = Vec::new();
        let mut best = Scored::placeholder(dim);

        for iteration in 0..resolved.max_iters {
            self.evaluate_into(&population, &mut scores, resolved.parallel_threshold)?;
            let mean = track_best(&scores, &mut best);
            debug!(iteration, best = best.value, mean, "generation evaluated");
            observer.on_generation(iteration, &scores);

            selection.select_into(
                &scores,
                resolved.parents_count,
                &mut scratch,
                &mut self.rng,
                &mut parents,
            )?;
            assembler.assemble(
                &scores,
                &parents,
                &mut population,
                &resolved,
                iteration,
                &self.space,
                &mut scratch,
                &mut self.rng,
            )?;
        }

        // one more evaluation so the reported best covers the final assembly
        self.evaluate_into(&population, &mut scores, resolved.parallel_threshold)?;
        let mean = track_best(&scores, &mut best);
        debug!(
            iteration = resolved.max_iters,
            best = best.value,
            mean,
            "final population evaluated"
        );
        observer.on_generation(resolved.max_iters, &scores);

        info!(
            best = best.value,
            iterations = resolved.max_iters,
            "optimization finished"
        );

        Ok(OptimizeResult {
            genes: best.genes,
            value: best.value,
        })
    }

    /// Evaluates every individual into its score slot.
    ///
    /// Individuals are independent, so evaluation is parallel above the
    /// threshold; writes go to disjoint slots and the caller reduces
    /// sequentially afterwards.
    fn evaluate_into(
        &self,
        population: &[Vec<f64>],
        scores: &mut [Scored],
        parallel_threshold: usize,
    ) -> Result<()> {
        if population.len() >= parallel_threshold {
            scores
                .par_iter_mut()
                .zip(population.par_iter())
                .try_for_each(|(slot, genes)| {
                    slot.genes.clone_from(genes);
                    slot.value = self.checked_score(genes)?;
                    Ok(())
                })
        } else {
            for (slot, genes) in scores.iter_mut().zip(population) {
                slot.genes.clone_from(genes);
                slot.value = self.checked_score(genes)?;
            }
            Ok(())
        }
    }

    fn checked_score(&self, genes: &[f64]) -> Result<f64> {
        let value = self.objective.evaluate(genes);
        if !value.is_finite() {
            return Err(OptimizeError::FitnessCalculation(format!(
                "Non-finite fitness score encountered: {}",
                value
            )));
        }
        Ok(value)
    }
}

/// Folds one generation's scores into the best-ever tracker, returning the
/// generation's mean fitness.
fn track_best(scores: &[Scored], best: &mut Scored) -> f64 {
    let mut mean = 0.0;
    for score in scores {
        mean += score.value;
        if score.value < best.value {
            best.value = score.value;
            best.genes.clone_from(&score.genes);
        }
    }
    mean / scores.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere(x: &[f64]) -> f64 {
        x.iter().map(|v| v * v).sum()
    }

    #[test]
    fn test_minimizes_sphere() {
        let space = SearchSpace::new(vec![-5.0, -5.0], vec![5.0, 5.0]).unwrap();
        let mut optimizer = Optimizer::with_seed(space, sphere as fn(&[f64]) -> f64, 42);
        let options = OptimizerOptions::builder().max_iters(100).build();

        let result = optimizer.run(&options).unwrap();
        assert!(result.value < 0.1);
        assert!(result.genes.iter().all(|g| g.abs() < 0.5));
    }

    #[test]
    fn test_same_seed_is_reproducible() {
        let space = SearchSpace::new(vec![-5.0], vec![5.0]).unwrap();
        let options = OptimizerOptions::builder().max_iters(50).build();

        let mut first = Optimizer::with_seed(space.clone(), sphere as fn(&[f64]) -> f64, 7);
        let mut second = Optimizer::with_seed(space, sphere as fn(&[f64]) -> f64, 7);

        let a = first.run(&options).unwrap();
        let b = second.run(&options).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_iterations_still_evaluates_once() {
        let space = SearchSpace::new(vec![-1.0], vec![1.0]).unwrap();
        let mut optimizer = Optimizer::with_seed(space, sphere as fn(&[f64]) -> f64, 3);
        let options = OptimizerOptions::builder().max_iters(0).build();

        let mut generations = Vec::new();
        let mut observer =
            |iteration: usize, population: &[Scored]| generations.push((iteration, population.len()));
        let result = optimizer
            .run_with_observer(&options, &mut observer)
            .unwrap();

        assert_eq!(generations, vec![(0, 100)]);
        assert!(result.value.is_finite());
        assert!(result.genes[0].abs() <= 1.0);
    }

    #[test]
    fn test_non_finite_objective_aborts() {
        let space = SearchSpace::new(vec![-1.0], vec![1.0]).unwrap();
        let mut optimizer = Optimizer::with_seed(space, |_: &[f64]| f64::NAN, 5);
        let options = OptimizerOptions::builder().max_iters(10).build();

        let result = optimizer.run(&options);
        assert!(matches!(result, Err(OptimizeError::FitnessCalculation(_))));
    }

    #[test]
    fn test_invalid_options_abort_before_evaluation() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let space = SearchSpace::new(vec![-1.0], vec![1.0]).unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let objective = move |x: &[f64]| {
            seen.fetch_add(1, Ordering::Relaxed);
            x[0]
        };

        let mut optimizer = Optimizer::with_seed(space, objective, 5);
        let options = OptimizerOptions::builder().population_count(0).build();

        // the objective must never run when configuration is rejected
        assert!(optimizer.run(&options).is_err());
        assert_eq!(calls.load(Ordering::Relaxed), 0);
    }
}
