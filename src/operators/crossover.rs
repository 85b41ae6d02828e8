//! # Crossover operators
//!
//! Three ways of combining two parents into children:
//!
//! - [`classic`]: splice the parents at a split index. Emitting the same
//!   split with the parents swapped yields the complementary sibling, so one
//!   crossover event produces two children.
//! - [`linear`]: a convex combination of the parents. The child lies on the
//!   segment between them and is therefore inside the box whenever both
//!   parents are.
//! - [`heuristic`]: a combination directed from the worse parent toward the
//!   better one. The blend factor may exceed 1, extrapolating past the better
//!   parent, and the result is deliberately left unclamped.

use crate::population::Scored;

/// The kind of crossover applied to one crossover event.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossoverKind {
    /// Single-point splice of the two parents.
    Classic,
    /// Convex combination of the two parents.
    Linear,
    /// Combination directed from the worse parent toward the better one.
    Heuristic,
}

/// Single-point crossover: `child = parent0[..split] ++ parent1[split..]`.
///
/// The complementary sibling is produced by calling this again with the
/// parents swapped. `split` must lie in `[1, dim - 1]`.
pub fn classic(parent0: &[f64], parent1: &[f64], split: usize, child: &mut [f64]) {
    debug_assert!(split >= 1 && split < parent0.len());
    child[..split].copy_from_slice(&parent0[..split]);
    child[split..].copy_from_slice(&parent1[split..]);
}

/// Linear crossover: `child = (1 - alpha) * parent0 + alpha * parent1`.
///
/// With `alpha` in `[0, 1]` the child is a point on the segment between the
/// parents.
pub fn linear(parent0: &[f64], parent1: &[f64], alpha: f64, child: &mut [f64]) {
    for ((c, &p0), &p1) in child.iter_mut().zip(parent0).zip(parent1) {
        *c = (1.0 - alpha) * p0 + alpha * p1;
    }
}

/// Heuristic crossover: a linear blend in the direction worse -> better.
///
/// `child = (1 - alpha) * worse + alpha * better`, where `better` is the
/// parent with the lower fitness value. With `alpha > 1` the child
/// extrapolates beyond the better parent and may leave the search box; this
/// operator does not clamp.
pub fn heuristic(parent0: &Scored, parent1: &Scored, alpha: f64, child: &mut [f64]) {
    let (worse, better) = if parent0.value > parent1.value {
        (parent0, parent1)
    } else {
        (parent1, parent0)
    };
    linear(&worse.genes, &better.genes, alpha, child);
}
