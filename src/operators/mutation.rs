//! # Mutation operators
//!
//! Two perturbations applied to non-elite children after assembly:
//!
//! - [`full_range`]: per-gene coin flips; a mutated gene is resampled
//!   uniformly across its whole bound range, so the result is always
//!   feasible.
//! - [`fine_range`]: one step of bounded length along a uniformly-random
//!   direction in D-space, followed by a hard clamp into the box. The step
//!   range anneals linearly over the run via [`annealed_range`]: exploratory
//!   early, exploitative late.

use crate::rng::RandomSource;
use crate::space::SearchSpace;

/// Smallest accepted sum of squares when normalizing a sampled direction.
const MIN_SUM_SQUARES: f64 = 1e-5;

/// Resampling attempts before the norm is clamped instead.
const MAX_DIRECTION_ATTEMPTS: usize = 3;

/// Full-range mutation: each gene is independently replaced, with probability
/// `p_full`, by a fresh uniform draw across its full bound range.
pub fn full_range(genes: &mut [f64], p_full: f64, space: &SearchSpace, rng: &mut RandomSource) {
    for (d, gene) in genes.iter_mut().enumerate() {
        if rng.probability() <= p_full {
            *gene = space.denormalize(d, rng.signed_unit());
        }
    }
}

/// Fine-range mutation: a random-direction step of length at most `range`,
/// hard-clamped into the search box afterwards.
///
/// `direction` is caller-owned scratch of the same length as `genes`.
pub fn fine_range(
    genes: &mut [f64],
    range: f64,
    space: &SearchSpace,
    rng: &mut RandomSource,
    direction: &mut [f64],
) {
    debug_assert_eq!(direction.len(), genes.len());

    random_unit_direction(rng, direction);
    let step = rng.signed_unit() * range;
    for (gene, &dir) in genes.iter_mut().zip(direction.iter()) {
        *gene += step * dir;
    }

    space.clamp(genes);
}

/// Samples a uniformly-random unit direction in D-space.
///
/// Muller's method: draw D independent standard-normal coordinates and
/// normalize to unit length (Muller, M. E. "A Note on a Method for Generating
/// Points Uniformly on N-Dimensional Spheres.", 1959). A pathologically small
/// sum of squares is resampled a bounded number of times, then the norm is
/// clamped to keep the division finite.
pub fn random_unit_direction(rng: &mut RandomSource, out: &mut [f64]) {
    let mut sum_sq = 0.0;
    let mut attempts = 0;
    while sum_sq < MIN_SUM_SQUARES && attempts < MAX_DIRECTION_ATTEMPTS {
        attempts += 1;
        sum_sq = 0.0;
        for coord in out.iter_mut() {
            let val = rng.standard_normal();
            sum_sq += val * val;
            *coord = val;
        }
    }

    let norm = sum_sq.max(MIN_SUM_SQUARES).sqrt();
    for coord in out.iter_mut() {
        *coord /= norm;
    }
}

/// The fine-mutation step range at a given iteration.
///
/// Linearly anneals from `max` at iteration 0 down to `min` at the final
/// iteration: `range(iter) = min + (max - min) * (1 - iter / max_iters)`.
pub fn annealed_range(min: f64, max: f64, iteration: usize, max_iters: usize) -> f64 {
    if max_iters == 0 {
        return max;
    }
    min + (max - min) * (1.0 - iteration as f64 / max_iters as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_range_always_feasible() {
        let space = SearchSpace::new(vec![-2.0, 0.0], vec![8.0, 0.5]).unwrap();
        let mut rng = RandomSource::from_seed(21);
        let mut genes = vec![3.0, 0.25];

        // p = 1: every gene resampled, every draw inside the box
        for _ in 0..500 {
            full_range(&mut genes, 1.0, &space, &mut rng);
            assert!(space.contains(&genes));
        }
    }

    #[test]
    fn test_full_range_with_zero_probability_is_identity() {
        let space = SearchSpace::new(vec![-1.0], vec![1.0]).unwrap();
        let mut rng = RandomSource::from_seed(22);
        let mut genes = vec![0.5];

        full_range(&mut genes, 0.0, &space, &mut rng);
        assert_eq!(genes, vec![0.5]);
    }

    #[test]
    fn test_fine_range_clamps_into_bounds() {
        let space = SearchSpace::new(vec![-1.0, -1.0], vec![1.0, 1.0]).unwrap();
        let mut rng = RandomSource::from_seed(23);
        let mut direction = vec![0.0; 2];

        // start from a boundary-violating individual; even a zero-length step
        // must come back clamped
        let mut genes = vec![4.0, -7.0];
        fine_range(&mut genes, 0.0, &space, &mut rng, &mut direction);
        assert_eq!(genes, vec![1.0, -1.0]);

        // and ordinary steps never escape the box
        for _ in 0..500 {
            fine_range(&mut genes, 0.5, &space, &mut rng, &mut direction);
            assert!(space.contains(&genes));
        }
    }

    #[test]
    fn test_random_direction_is_unit_length() {
        let mut rng = RandomSource::from_seed(24);
        for dim in [1, 2, 5, 20] {
            let mut dir = vec![0.0; dim];
            for _ in 0..100 {
                random_unit_direction(&mut rng, &mut dir);
                let norm_sq: f64 = dir.iter().map(|v| v * v).sum();
                assert!((norm_sq - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_annealed_range_endpoints_and_interpolation() {
        let (min, max) = (1e-5, 0.15);

        assert_eq!(annealed_range(min, max, 0, 1000), max);
        assert!((annealed_range(min, max, 1000, 1000) - min).abs() < 1e-15);

        let mid = annealed_range(min, max, 500, 1000);
        assert!((mid - (min + (max - min) * 0.5)).abs() < 1e-15);

        let quarter = annealed_range(min, max, 250, 1000);
        assert!((quarter - (min + (max - min) * 0.75)).abs() < 1e-15);
    }

    #[test]
    fn test_annealed_range_zero_iteration_budget() {
        assert_eq!(annealed_range(0.1, 0.9, 0, 0), 0.9);
    }
}
