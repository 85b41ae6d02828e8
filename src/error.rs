//! # Error Types
//!
//! Custom error types for the optimizer. Each variant covers a failure
//! scenario that can surface before or during a run: rejected configurations,
//! malformed search domains, and fitness evaluation gone wrong.
//!
//! ## Examples
//!
//! ```rust
//! use evobox::error::{OptimizeError, Result};
//!
//! fn check_probability(p: f64) -> Result<()> {
//!     if !(0.0..=1.0).contains(&p) {
//!         return Err(OptimizeError::Configuration(format!(
//!             "probability {} outside [0, 1]",
//!             p
//!         )));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Represents errors that can occur while configuring or running the optimizer.
#[derive(Error, Debug)]
pub enum OptimizeError {
    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when the search domain bounds are malformed.
    #[error("Bounds error: {0}")]
    Bounds(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: cannot operate on an empty population")]
    EmptyPopulation,

    /// Error that occurs when the objective produces an unusable score.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),
}

/// A specialized Result type for optimizer operations.
///
/// This type is a convenience wrapper around `std::result::Result` with the
/// error type fixed to `OptimizeError`.
pub type Result<T> = std::result::Result<T, OptimizeError>;
