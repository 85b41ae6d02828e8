pub mod engine;
pub mod objective;
pub mod observer;
pub mod options;

pub use engine::{OptimizeResult, Optimizer};
pub use objective::Objective;
pub use observer::Observer;
pub use options::{
    CrossoverOptions, MutationOptions, OptimizerOptions, TournamentOptions,
};
