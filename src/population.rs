//! # Scored individuals and shared scratch
//!
//! A population is a plain `Vec<Vec<f64>>` overwritten in place every
//! generation; this module holds what surrounds it: the [`Scored`] pairing of
//! an individual with its cached fitness, the total order used everywhere
//! fitness values are compared, and the [`IndexScratch`] permutation buffer
//! shared by tournament selection and elitism.

use std::cmp::Ordering;

/// An individual paired with its cached fitness value. Lower is better.
#[derive(Debug, Clone, PartialEq)]
pub struct Scored {
    /// The candidate solution vector.
    pub genes: Vec<f64>,
    /// The objective value for `genes`.
    pub value: f64,
}

impl Scored {
    /// Creates a new scored individual.
    pub fn new(genes: Vec<f64>, value: f64) -> Self {
        Self { genes, value }
    }

    /// Creates an unevaluated placeholder of the given dimension.
    pub fn placeholder(dim: usize) -> Self {
        Self {
            genes: vec![0.0; dim],
            value: f64::INFINITY,
        }
    }
}

/// Total order on fitness values, ascending, with NaN sorted last.
///
/// The engine rejects non-finite scores during evaluation, so NaN handling
/// here only matters for callers driving the components directly.
pub fn compare_values(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| {
        if a.is_nan() {
            Ordering::Greater
        } else if b.is_nan() {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    })
}

/// A reusable index permutation over the population.
///
/// One instance is owned by the run orchestrator and lent to both tournament
/// selection (partial shuffles) and elitism (order-statistics partitioning).
/// Its contents are scratch: valid only within a single call, never assumed
/// sorted or stable across calls.
#[derive(Debug, Default)]
pub struct IndexScratch {
    indices: Vec<usize>,
}

impl IndexScratch {
    /// Creates an empty scratch buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a mutable permutation of `0..len`, resizing if needed.
    ///
    /// The returned slice holds every index in `0..len` exactly once, in
    /// unspecified order.
    pub fn permutation(&mut self, len: usize) -> &mut [usize] {
        if self.indices.len() != len {
            self.indices.clear();
            self.indices.extend(0..len);
        }
        &mut self.indices
    }
}
