//! # Asynchronous Actor-Critic Learning Core
//!
//! Learning core for asynchronous actor-critic training: per-trajectory
//! gradient computation, a decaying entropy-regularization schedule, and a
//! central/worker parameter-synchronization protocol that lets many
//! environment workers contribute gradients to one shared policy (and
//! optionally value) model.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    One round of training                        │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  Thread 1          Thread 2          Thread N                   │
//! │  ┌─────────┐       ┌─────────┐       ┌─────────┐               │
//! │  │Worker 0 │       │Worker 1 │       │Worker N │               │
//! │  │ rollout │       │ rollout │       │ rollout │               │
//! │  └────┬────┘       └────┬────┘       └────┬────┘               │
//! │       │ trajectories    │                 │                    │
//! │       └─────────────────┼─────────────────┘                    │
//! │                         ▼                                      │
//! │               ┌──────────────────┐     ┌──────────────┐        │
//! │               │  CentralLearner  │────▶│  ParamSlot   │        │
//! │               │ accumulate/apply │     │ (broadcast)  │        │
//! │               └──────────────────┘     └──────┬───────┘        │
//! │                                               │ hard update    │
//! │                                               ▼ (next round)   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The round protocol is the orchestration layer's job and lives outside
//! this crate: broadcast, rollout and gradient accumulation in parallel
//! across workers, gradient merge, one update, re-broadcast. Within the
//! crate nothing is internally concurrent; [`core::ParamSlot`] is the only
//! shared surface.
//!
//! ## Roles
//!
//! - [`agents::CentralLearner`] owns the canonical networks, their RMSProp
//!   optimizers and the gradient accumulators. Repeated
//!   `accumulate_gradients` calls sum gradients across trajectories; one
//!   `apply_update` consumes the sum and resets it.
//! - [`agents::RolloutWorker`] owns an inference copy of the policy and a
//!   seeded sampler. It selects actions and receives parameter snapshots,
//!   nothing else.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use a3c_core::{AgentConfig, CentralLearner, ModelVariant, RolloutWorker, Trajectory};
//!
//! let config = AgentConfig::new(state_dim, n_actions).with_variant(ModelVariant::Original);
//! let mut learner = CentralLearner::new(config.clone(), policy, Some(critic), device)?;
//! let mut worker = RolloutWorker::new(config, inference_policy, seed, inference_device)?;
//!
//! worker.hard_update(&learner.policy_params())?;
//! let (action, probs) = worker.select_action(&state)?;
//! // ... collect a trajectory, then on the learner side:
//! learner.accumulate_gradients(&trajectory, epoch)?;
//! learner.apply_update();
//! ```

pub mod agents;
pub mod algorithms;
pub mod core;
pub mod metrics;
pub mod scheduling;

// Re-export commonly used types
pub use agents::{
    AgentConfig, AgentError, CentralLearner, ConfigError, GradAccumulator, GradientReport,
    PolicyModel, RolloutWorker, TrainablePolicy, TrainableValue, ValueModel,
};
pub use algorithms::{
    advantages, compute_entropy, discounted_returns, td_targets, ModelVariant,
};
pub use crate::core::{
    param_slot, param_slot_with, ParamSlot, ParamSnapshot, ParamTensor, SharedParamSlot,
    SyncError, Trajectory, TrajectoryError,
};
pub use metrics::{ConsoleLogger, CsvLogger, MetricsLogger, MultiLogger, RoundSnapshot};
pub use scheduling::{ConstantEntropy, EntropySchedule, LinearEntropyDecay};
