//! Rollout worker: stochastic action selection and parameter hard updates.
//!
//! Workers are the non-central side of the topology: one per environment
//! thread, each holding its own inference copy of the policy network. A
//! worker never owns an optimizer and never applies gradients; between
//! rounds it overwrites its policy parameters with the learner's latest
//! snapshot and spends the rest of the round selecting actions.
//!
//! Instantiate workers on a plain (non-autodiff) backend so forward passes
//! build no computation graph; from a training model, `model.valid()`
//! yields the matching inference module.

use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

use super::config::AgentConfig;
use super::error::AgentError;
use super::model::PolicyModel;
use crate::core::param_sync::{load_into, snapshot_of, ParamSnapshot};

/// Non-central rollout agent: inference and parameter reception only.
pub struct RolloutWorker<B, P>
where
    B: Backend,
    P: PolicyModel<B>,
{
    config: AgentConfig,
    policy: P,
    rng: fastrand::Rng,
    device: B::Device,
}

impl<B, P> RolloutWorker<B, P>
where
    B: Backend,
    P: PolicyModel<B>,
{
    /// Construct a rollout worker with a seeded sampler.
    ///
    /// Sampling is reproducible for a fixed seed, which makes rollouts
    /// replayable in tests. Give each worker its own seed.
    pub fn new(
        config: AgentConfig,
        policy: P,
        seed: u64,
        device: B::Device,
    ) -> Result<Self, AgentError> {
        config.validate()?;

        if policy.state_dim() != config.state_dim {
            return Err(AgentError::NetworkShape {
                what: "policy state_dim",
                expected: config.state_dim,
                actual: policy.state_dim(),
            });
        }
        if policy.n_actions() != config.n_actions {
            return Err(AgentError::NetworkShape {
                what: "policy n_actions",
                expected: config.n_actions,
                actual: policy.n_actions(),
            });
        }

        Ok(Self {
            config,
            policy,
            rng: fastrand::Rng::with_seed(seed),
            device,
        })
    }

    /// Sample one action for a single state observation.
    ///
    /// Runs a forward pass, samples from the resulting categorical
    /// distribution, and returns the action index together with the full
    /// probability vector as plain numbers for downstream consumers.
    pub fn select_action(&mut self, state: &[f32]) -> Result<(u32, Vec<f32>), AgentError> {
        if state.len() != self.config.state_dim {
            return Err(AgentError::StateDimMismatch {
                expected: self.config.state_dim,
                actual: state.len(),
            });
        }

        let input = Tensor::<B, 1>::from_floats(state, &self.device)
            .reshape([1, self.config.state_dim]);
        let probs_data = self.policy.forward(input).into_data();
        let probs = probs_data.to_vec::<f32>().expect("float probabilities");

        let action = sample_categorical(&probs, &mut self.rng);
        Ok((action, probs))
    }

    /// Overwrite the policy parameters with a broadcast snapshot.
    ///
    /// Positional value copy: later changes to the source do not affect
    /// this worker. Count or shape mismatches fail without touching the
    /// current parameters.
    pub fn hard_update(&mut self, snapshot: &ParamSnapshot) -> Result<(), AgentError> {
        self.policy = load_into(&self.policy, snapshot)?;
        Ok(())
    }

    /// Snapshot of the worker's current policy parameters.
    pub fn policy_params(&self) -> ParamSnapshot {
        snapshot_of(&self.policy)
    }

    /// The owned policy network.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// The agent configuration.
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }
}

/// Categorical sampling via cumulative sum.
///
/// Falls through to the last index when floating-point residue keeps the
/// cumulative sum below the drawn value.
fn sample_categorical(probs: &[f32], rng: &mut fastrand::Rng) -> u32 {
    let draw = rng.f32();
    let mut cumulative = 0.0f32;
    let mut selected = probs.len().saturating_sub(1) as u32;

    for (index, &p) in probs.iter().enumerate() {
        cumulative += p;
        if draw < cumulative || index == probs.len() - 1 {
            selected = index as u32;
            break;
        }
    }

    selected
}
