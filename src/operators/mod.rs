//! # Genetic operators
//!
//! The crossover and mutation primitives the generation assembler composes.
//! All operators write into caller-provided buffers so per-generation work
//! allocates nothing.
pub mod crossover;
pub mod mutation;

pub use crossover::CrossoverKind;
