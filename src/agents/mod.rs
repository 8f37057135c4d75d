//! Agent roles: the central learner and the rollout workers.
//!
//! One logical model, N physical copies. The central learner owns the
//! canonical parameters and the optimizers; workers own inference copies
//! and a sampler. Gradient flow is one-way: trajectories travel from
//! workers to the learner, parameter snapshots travel back.
//!
//! The two roles are separate types rather than a runtime flag, so
//! "worker applies an update" and "learner selects an action" are compile
//! errors instead of runtime surprises.

pub mod accumulator;
pub mod config;
pub mod error;
pub mod learner;
pub mod model;
pub mod worker;

#[cfg(test)]
mod tests;

pub use accumulator::GradAccumulator;
pub use config::{AgentConfig, ConfigError};
pub use error::AgentError;
pub use learner::{CentralLearner, GradientReport};
pub use model::{PolicyModel, TrainablePolicy, TrainableValue, ValueModel};
pub use worker::RolloutWorker;
