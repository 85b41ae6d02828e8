//! # GenerationAssembler
//!
//! Composes the next population from the current scored population and the
//! freshly drawn parent pool, in strict priority order: elitism, crossover,
//! fill-by-copy, then the mutation pass over every non-elite child. The
//! output population is overwritten in place; the assembler owns only the
//! direction scratch used by fine-range mutation.

use crate::error::{OptimizeError, Result};
use crate::evolution::options::ResolvedOptions;
use crate::operators::{crossover, mutation, CrossoverKind};
use crate::population::{compare_values, IndexScratch, Scored};
use crate::rng::RandomSource;
use crate::space::SearchSpace;

/// Builds each next generation in place.
#[derive(Debug)]
pub struct GenerationAssembler {
    direction: Vec<f64>,
}

impl GenerationAssembler {
    /// Creates an assembler for a `dim`-dimensional search space.
    pub fn new(dim: usize) -> Self {
        Self {
            direction: vec![0.0; dim],
        }
    }

    /// Overwrites `population` with the next generation.
    ///
    /// Slots are filled in priority order:
    ///
    /// 1. The `elite_children_count` best of `scores`, copied verbatim.
    /// 2. Children from crossover events, one pass over the parent pool,
    ///    stopping early once the population is full.
    /// 3. Copies of uniformly-drawn parent-pool members for any remaining
    ///    slots. Duplicates are expected: selection pressure already put
    ///    better individuals into the pool more often.
    /// 4. Fine- and full-range mutation coin flips for every non-elite child.
    ///
    /// # Errors
    ///
    /// Returns an error if `scores` or `parents` is empty, or if `scores`
    /// and `population` disagree in size.
    #[allow(clippy::too_many_arguments)]
    pub fn assemble(
        &mut self,
        scores: &[Scored],
        parents: &[Scored],
        population: &mut [Vec<f64>],
        options: &ResolvedOptions,
        iteration: usize,
        space: &SearchSpace,
        scratch: &mut IndexScratch,
        rng: &mut RandomSource,
    ) -> Result<()> {
        if scores.is_empty() || parents.is_empty() {
            return Err(OptimizeError::EmptyPopulation);
        }

        if scores.len() != population.len() {
            return Err(OptimizeError::Configuration(format!(
                "Scored population size ({}) doesn't match population size ({})",
                scores.len(),
                population.len()
            )));
        }

        let n = population.len();
        let dim = self.direction.len();
        let mut child_idx = 0;

        // elitism: the k best of the current generation, found by order
        // statistics over the shared index permutation, copied verbatim
        let elite = options.elite_children_count.min(n);
        if elite > 0 {
            let indices = scratch.permutation(scores.len());
            indices.select_nth_unstable_by(elite - 1, |&a, &b| {
                compare_values(scores[a].value, scores[b].value)
            });
            for &winner in &indices[..elite] {
                population[child_idx].copy_from_slice(&scores[winner].genes);
                child_idx += 1;
            }
        }

        // children from this position onwards are subject to mutation
        let mutation_start = child_idx;

        let cross = &options.crossover;
        if cross.total_probability > 0.0 {
            for _ in 0..parents.len() {
                if child_idx >= n {
                    break;
                }

                if rng.probability() > cross.total_probability {
                    continue;
                }

                let idx0 = rng.index(parents.len());
                let mut idx1 = rng.index(parents.len());
                if idx1 == idx0 {
                    // avoid crossing an individual with itself
                    idx1 = (idx1 + 1) % parents.len();
                }
                let parent0 = &parents[idx0];
                let parent1 = &parents[idx1];

                match cross.kind_for(rng.probability()) {
                    CrossoverKind::Classic => {
                        let split = rng.crossover_split(dim);
                        crossover::classic(
                            &parent0.genes,
                            &parent1.genes,
                            split,
                            &mut population[child_idx],
                        );
                        child_idx += 1;
                        if child_idx < n {
                            crossover::classic(
                                &parent1.genes,
                                &parent0.genes,
                                split,
                                &mut population[child_idx],
                            );
                            child_idx += 1;
                        }
                    }
                    CrossoverKind::Linear => {
                        let alpha = rng.probability();
                        crossover::linear(
                            &parent0.genes,
                            &parent1.genes,
                            alpha,
                            &mut population[child_idx],
                        );
                        child_idx += 1;
                    }
                    CrossoverKind::Heuristic => {
                        let alpha = rng.probability() * cross.heuristic_range_mult;
                        crossover::heuristic(parent0, parent1, alpha, &mut population[child_idx]);
                        child_idx += 1;
                    }
                }
            }
        }

        // fill whatever crossover under-produced by copying pool members
        while child_idx < n {
            let parent = rng.index(parents.len());
            population[child_idx].copy_from_slice(&parents[parent].genes);
            child_idx += 1;
        }

        // mutation pass over the non-elite tail
        let m = &options.mutation;
        let range = mutation::annealed_range(
            m.fine_mutation_min,
            m.fine_mutation_max,
            iteration,
            options.max_iters,
        );

        for child in population[mutation_start..].iter_mut() {
            if rng.probability() <= m.p_fine {
                mutation::fine_range(child, range, space, rng, &mut self.direction);
            }
            mutation::full_range(child, m.p_full, space, rng);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::options::{CrossoverOptions, MutationOptions, OptimizerOptions};

    fn resolved(build: impl FnOnce(OptimizerOptions) -> OptimizerOptions) -> ResolvedOptions {
        let options = build(OptimizerOptions::default());
        options.resolve(2).unwrap()
    }

    fn scored(genes: Vec<f64>, value: f64) -> Scored {
        Scored::new(genes, value)
    }

    #[test]
    fn test_elitism_copies_the_k_best_verbatim() {
        let space = SearchSpace::new(vec![-10.0, -10.0], vec![10.0, 10.0]).unwrap();
        let scores = vec![
            scored(vec![1.0, 1.0], 4.0),
            scored(vec![2.0, 2.0], 1.0),
            scored(vec![3.0, 3.0], 3.0),
            scored(vec![4.0, 4.0], 2.0),
            scored(vec![5.0, 5.0], 5.0),
        ];
        let parents = scores.clone();
        let mut population = vec![vec![0.0; 2]; 5];
        let options = resolved(|mut o| {
            o.population_count = 5;
            o.parents_count = 5;
            o.elite_children_count = 2;
            o
        });

        let mut assembler = GenerationAssembler::new(2);
        let mut scratch = IndexScratch::new();
        let mut rng = RandomSource::from_seed(31);

        assembler
            .assemble(
                &scores,
                &parents,
                &mut population,
                &options,
                0,
                &space,
                &mut scratch,
                &mut rng,
            )
            .unwrap();

        // the two best (values 1.0 and 2.0) occupy the elite slots, in
        // either order, untouched by mutation
        let mut elite: Vec<_> = population[..2].to_vec();
        elite.sort_by(|a, b| a[0].partial_cmp(&b[0]).unwrap());
        assert_eq!(elite, vec![vec![2.0, 2.0], vec![4.0, 4.0]]);
    }

    #[test]
    fn test_disabled_crossover_fills_by_copy() {
        let space = SearchSpace::new(vec![-10.0, -10.0], vec![10.0, 10.0]).unwrap();
        let scores = vec![
            scored(vec![1.0, -1.0], 1.0),
            scored(vec![2.0, -2.0], 2.0),
            scored(vec![3.0, -3.0], 3.0),
        ];
        let parents = scores.clone();
        let mut population = vec![vec![0.0; 2]; 3];
        let options = resolved(|mut o| {
            o.population_count = 3;
            o.parents_count = 3;
            o.tournament.size = 2;
            o.crossover.total_probability = 0.0;
            o.mutation = MutationOptions {
                p_full: 0.0,
                p_fine: 0.0,
                ..MutationOptions::default()
            };
            o
        });

        let mut assembler = GenerationAssembler::new(2);
        let mut scratch = IndexScratch::new();
        let mut rng = RandomSource::from_seed(32);

        assembler
            .assemble(
                &scores,
                &parents,
                &mut population,
                &options,
                0,
                &space,
                &mut scratch,
                &mut rng,
            )
            .unwrap();

        for child in &population {
            assert!(parents.iter().any(|p| &p.genes == child));
        }
    }

    #[test]
    fn test_all_children_in_bounds_without_heuristic_crossover() {
        // classic and linear crossover preserve feasibility; both mutations
        // end inside the box, so the whole next generation must too
        let space = SearchSpace::new(vec![-1.0, -1.0], vec![1.0, 1.0]).unwrap();
        let scores: Vec<Scored> = (0..10)
            .map(|i| {
                let v = -1.0 + 0.2 * i as f64;
                scored(vec![v, -v], (i as f64 - 5.0).abs())
            })
            .collect();
        let parents = scores.clone();
        let mut population = vec![vec![0.0; 2]; 10];
        let options = resolved(|mut o| {
            o.population_count = 10;
            o.parents_count = 10;
            o.crossover = CrossoverOptions {
                total_probability: 1.0,
                p_classic: 1.0,
                p_linear: 1.0,
                p_heuristic: 0.0,
                heuristic_range_mult: 2.0,
            };
            o.mutation.p_fine = 1.0;
            o.mutation.p_full = 0.5;
            o
        });

        let mut assembler = GenerationAssembler::new(2);
        let mut scratch = IndexScratch::new();
        let mut rng = RandomSource::from_seed(33);

        for iteration in 0..50 {
            assembler
                .assemble(
                    &scores,
                    &parents,
                    &mut population,
                    &options,
                    iteration,
                    &space,
                    &mut scratch,
                    &mut rng,
                )
                .unwrap();
            for child in &population {
                assert!(space.contains(child), "child {:?} escaped the box", child);
            }
        }
    }

    #[test]
    fn test_rejects_mismatched_population_sizes() {
        let space = SearchSpace::new(vec![0.0], vec![1.0]).unwrap();
        let scores = vec![scored(vec![0.5], 1.0)];
        let parents = scores.clone();
        let mut population = vec![vec![0.0; 1]; 3];
        let options = OptimizerOptions::builder()
            .population_count(1)
            .parents_count(1)
            .tournament(crate::evolution::options::TournamentOptions { size: 1, p: 1.0 })
            .build()
            .resolve(1)
            .unwrap();

        let mut assembler = GenerationAssembler::new(1);
        let mut scratch = IndexScratch::new();
        let mut rng = RandomSource::from_seed(34);

        let result = assembler.assemble(
            &scores,
            &parents,
            &mut population,
            &options,
            0,
            &space,
            &mut scratch,
            &mut rng,
        );
        assert!(matches!(result, Err(OptimizeError::Configuration(_))));
    }

    #[test]
    fn test_rejects_empty_inputs() {
        let space = SearchSpace::new(vec![0.0], vec![1.0]).unwrap();
        let options = OptimizerOptions::builder()
            .population_count(1)
            .parents_count(1)
            .tournament(crate::evolution::options::TournamentOptions { size: 1, p: 1.0 })
            .build()
            .resolve(1)
            .unwrap();

        let mut assembler = GenerationAssembler::new(1);
        let mut scratch = IndexScratch::new();
        let mut rng = RandomSource::from_seed(35);
        let mut population = vec![vec![0.0; 1]; 1];

        let result = assembler.assemble(
            &[],
            &[],
            &mut population,
            &options,
            0,
            &space,
            &mut scratch,
            &mut rng,
        );
        assert!(matches!(result, Err(OptimizeError::EmptyPopulation)));
    }
}
