//! # SearchSpace
//!
//! The `SearchSpace` struct describes the axis-aligned box the optimizer
//! searches. Besides the raw per-dimension bounds it precomputes, once at
//! construction, the affine map between the normalized range `[-1, 1]` and
//! each dimension's true range: `value = offset[d] + scale[d] * u`.
//!
//! ## Example
//!
//! ```rust
//! use evobox::space::SearchSpace;
//!
//! let space = SearchSpace::new(vec![-2.0, 0.0], vec![8.0, 1.0]).unwrap();
//! assert_eq!(space.dim(), 2);
//! ```

use crate::error::{OptimizeError, Result};
use crate::rng::RandomSource;

/// An axis-aligned box domain with a precomputed normalized mapping.
///
/// Bounds are fixed for the lifetime of the space; `offset` and `scale` are
/// derived at construction and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSpace {
    x_min: Vec<f64>,
    x_max: Vec<f64>,
    offset: Vec<f64>,
    scale: Vec<f64>,
}

impl SearchSpace {
    /// Creates a new `SearchSpace` from per-dimension lower and upper bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if the bound vectors are empty, differ in length,
    /// contain non-finite values, or have `x_min[d] > x_max[d]` anywhere.
    pub fn new(x_min: Vec<f64>, x_max: Vec<f64>) -> Result<Self> {
        if x_min.is_empty() {
            return Err(OptimizeError::Bounds(
                "search space must have at least one dimension".to_string(),
            ));
        }

        if x_min.len() != x_max.len() {
            return Err(OptimizeError::Bounds(format!(
                "lower bounds length ({}) doesn't match upper bounds length ({})",
                x_min.len(),
                x_max.len()
            )));
        }

        for (d, (&lo, &hi)) in x_min.iter().zip(&x_max).enumerate() {
            if !lo.is_finite() || !hi.is_finite() {
                return Err(OptimizeError::Bounds(format!(
                    "non-finite bound in dimension {}: [{}, {}]",
                    d, lo, hi
                )));
            }
            if lo > hi {
                return Err(OptimizeError::Bounds(format!(
                    "lower bound {} exceeds upper bound {} in dimension {}",
                    lo, hi, d
                )));
            }
        }

        let offset = x_min
            .iter()
            .zip(&x_max)
            .map(|(&lo, &hi)| 0.5 * (lo + hi))
            .collect();
        let scale = x_min
            .iter()
            .zip(&x_max)
            .map(|(&lo, &hi)| 0.5 * (hi - lo))
            .collect();

        Ok(Self {
            x_min,
            x_max,
            offset,
            scale,
        })
    }

    /// Returns the number of dimensions.
    pub fn dim(&self) -> usize {
        self.x_min.len()
    }

    /// Returns the per-dimension lower bounds.
    pub fn min(&self) -> &[f64] {
        &self.x_min
    }

    /// Returns the per-dimension upper bounds.
    pub fn max(&self) -> &[f64] {
        &self.x_max
    }

    /// Maps a normalized value `u` in `[-1, 1]` onto dimension `d`'s range.
    pub fn denormalize(&self, d: usize, u: f64) -> f64 {
        self.offset[d] + self.scale[d] * u
    }

    /// Fills `genes` with a uniformly-random point inside the box.
    pub fn random_point_into(&self, rng: &mut RandomSource, genes: &mut [f64]) {
        debug_assert_eq!(genes.len(), self.dim());
        for (d, gene) in genes.iter_mut().enumerate() {
            *gene = self.offset[d] + self.scale[d] * rng.signed_unit();
        }
    }

    /// Clamps every coordinate of `genes` into `[x_min[d], x_max[d]]`.
    pub fn clamp(&self, genes: &mut [f64]) {
        for (d, gene) in genes.iter_mut().enumerate() {
            *gene = gene.clamp(self.x_min[d], self.x_max[d]);
        }
    }

    /// Returns true if every coordinate of `genes` lies within the box.
    pub fn contains(&self, genes: &[f64]) -> bool {
        genes
            .iter()
            .enumerate()
            .all(|(d, &g)| g >= self.x_min[d] && g <= self.x_max[d])
    }
}
