//! Central learner: gradient computation, accumulation and the update step.
//!
//! One learner exists per training run. It owns the canonical policy
//! network, the optional value network, and their RMSProp optimizers.
//! Workers never see this type; they receive parameter snapshots through
//! [`crate::core::ParamSlot`] and send trajectories back through the
//! orchestration layer, which feeds them into
//! [`CentralLearner::accumulate_gradients`] one by one before a single
//! [`CentralLearner::apply_update`] per round.
//!
//! # Update semantics
//!
//! `accumulate_gradients` never changes parameters; `apply_update` is the
//! only parameter-mutating operation. All trajectory validation happens
//! before any tensor work, so a failed call accumulates nothing.
//!
//! Under the one-step TD variant the critic loss covers steps `0..T-1`
//! (the final transition has no next state) while the policy loss keeps
//! all T steps, matching the upstream formulation.

use burn::optim::adaptor::OptimizerAdaptor;
use burn::optim::{GradientsParams, Optimizer, RmsProp, RmsPropConfig};
use burn::tensor::backend::AutodiffBackend;
use burn::tensor::{ElementConversion, Tensor};

use super::accumulator::GradAccumulator;
use super::config::AgentConfig;
use super::error::AgentError;
use super::model::{TrainablePolicy, TrainableValue};
use crate::algorithms::losses::{action_log_probs, entropy_sum, mse_loss, policy_gradient_loss};
use crate::algorithms::returns::{advantages, discounted_returns};
use crate::algorithms::variant::ModelVariant;
use crate::core::param_sync::{snapshot_of, ParamSnapshot};
use crate::core::trajectory::Trajectory;
use crate::scheduling::{EntropySchedule, LinearEntropyDecay};

type RmsPropAdaptor<M, B> = OptimizerAdaptor<RmsProp, M, B>;

/// Per-call scalars from one gradient computation, for the metrics layer.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientReport {
    /// Steps in the trajectory.
    pub steps: usize,
    /// Policy-gradient loss (before the entropy bonus).
    pub policy_loss: f32,
    /// Critic loss, absent for the actor-only variant.
    pub critic_loss: Option<f32>,
    /// Summed per-step entropy of the action distributions.
    pub entropy: f32,
    /// Entropy-bonus weight used at this epoch.
    pub entropy_weight: f32,
}

/// Central learning agent: owns optimizers, accumulates and applies
/// gradients, and exposes parameter snapshots for broadcast.
pub struct CentralLearner<B, P, V>
where
    B: AutodiffBackend,
    P: TrainablePolicy<B>,
    V: TrainableValue<B>,
{
    config: AgentConfig,
    policy: P,
    critic: Option<V>,
    policy_optim: RmsPropAdaptor<P, B>,
    critic_optim: Option<RmsPropAdaptor<V, B>>,
    policy_grads: GradAccumulator<B, P>,
    critic_grads: GradAccumulator<B, V>,
    schedule: Box<dyn EntropySchedule>,
    device: B::Device,
}

impl<B, P, V> CentralLearner<B, P, V>
where
    B: AutodiffBackend,
    P: TrainablePolicy<B>,
    V: TrainableValue<B>,
{
    /// Construct the central learner.
    ///
    /// The variant decides critic ownership: variants with a critic require
    /// `Some(critic)`, the actor-only variant requires `None`. Network
    /// shapes must match the configuration. Gradient accumulators start
    /// empty, so the first round begins from clean buffers.
    pub fn new(
        config: AgentConfig,
        policy: P,
        critic: Option<V>,
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
        match (&critic, config.variant.uses_critic()) {
            (None, true) => return Err(AgentError::MissingCritic),
            (Some(_), false) => return Err(AgentError::UnexpectedCritic),
            (Some(critic), true) if critic.state_dim() != config.state_dim => {
                return Err(AgentError::NetworkShape {
                    what: "critic state_dim",
                    expected: config.state_dim,
                    actual: critic.state_dim(),
                });
            }
            _ => {}
        }

        let rmsprop = RmsPropConfig::new()
            .with_alpha(config.rmsprop_alpha)
            .with_momentum(0.0)
            .with_epsilon(config.rmsprop_epsilon);

        let policy_optim = rmsprop.init();
        let critic_optim = critic.as_ref().map(|_| rmsprop.init());

        Ok(Self {
            config,
            policy,
            critic,
            policy_optim,
            critic_optim,
            policy_grads: GradAccumulator::new(),
            critic_grads: GradAccumulator::new(),
            schedule: Box::new(LinearEntropyDecay::default()),
            device,
        })
    }

    /// Replace the entropy schedule.
    pub fn with_entropy_schedule(mut self, schedule: Box<dyn EntropySchedule>) -> Self {
        self.schedule = schedule;
        self
    }

    /// Compute gradients from one trajectory and add them to the pending
    /// sums. Parameters do not change.
    ///
    /// The epoch comes from the outer training loop and drives the entropy
    /// decay; it is monotonically non-decreasing across a run but need not
    /// be contiguous.
    pub fn accumulate_gradients(
        &mut self,
        trajectory: &Trajectory,
        epoch: usize,
    ) -> Result<GradientReport, AgentError> {
        self.check_trajectory(trajectory)?;

        let steps = trajectory.len();
        let states = Tensor::<B, 1>::from_floats(trajectory.states_flat(), &self.device)
            .reshape([steps, self.config.state_dim]);

        let returns = discounted_returns(trajectory.rewards(), self.config.discount);

        // Baseline values are read out as plain data so the advantage
        // re-enters the graph as a constant.
        let advantage = match &self.critic {
            Some(critic) => {
                let values: Tensor<B, 1> = critic.forward(states.clone()).flatten(0, 1);
                let values = values
                    .detach()
                    .into_data()
                    .to_vec::<f32>()
                    .expect("float value estimates");
                advantages(&returns, &values)
            }
            None => returns.clone(),
        };

        // Actor loss: policy gradient plus the scheduled entropy bonus,
        // backpropagated through the policy network only.
        let probs = self.policy.forward(states.clone());
        let log_probs = action_log_probs(
            probs.clone(),
            trajectory.actions(),
            self.config.prob_floor,
            &self.device,
        );
        let advantage_t = Tensor::<B, 1>::from_floats(advantage.as_slice(), &self.device);

        let pg_loss = policy_gradient_loss(log_probs, advantage_t);
        let entropy = entropy_sum(probs, self.config.prob_floor);
        let entropy_weight = self.schedule.weight(epoch);

        let policy_loss_val = pg_loss.clone().into_scalar().elem::<f32>();
        let entropy_val = entropy.clone().into_scalar().elem::<f32>();

        let actor_loss = pg_loss - entropy.mul_scalar(entropy_weight);
        let actor_grads = GradientsParams::from_grads(actor_loss.backward(), &self.policy);

        // Critic loss per variant, backpropagated through the value
        // network only. Both gradient sets exist before either one
        // accumulates.
        let critic_outcome = match (&self.critic, self.config.variant) {
            (Some(critic), ModelVariant::Original) => {
                let values: Tensor<B, 1> = critic.forward(states).flatten(0, 1);
                let returns_t = Tensor::<B, 1>::from_floats(returns.as_slice(), &self.device);

                let loss = mse_loss(values, returns_t);
                let loss_val = loss.clone().into_scalar().elem::<f32>();
                let grads = GradientsParams::from_grads(loss.backward(), critic);
                Some((grads, loss_val))
            }
            (Some(critic), ModelVariant::CriticTd) => {
                let head = states.clone().slice([0..steps - 1]);
                let tail = states.slice([1..steps]);

                let values: Tensor<B, 1> = critic.forward(head).flatten(0, 1);
                let bootstrap: Tensor<B, 1> = critic.forward(tail).flatten(0, 1).detach();

                let rewards_t = Tensor::<B, 1>::from_floats(
                    &trajectory.rewards()[..steps - 1],
                    &self.device,
                );
                let targets = rewards_t + bootstrap.mul_scalar(self.config.discount);

                let loss = mse_loss(values, targets);
                let loss_val = loss.clone().into_scalar().elem::<f32>();
                let grads = GradientsParams::from_grads(loss.backward(), critic);
                Some((grads, loss_val))
            }
            _ => None,
        };

        self.policy_grads.accumulate(&self.policy, actor_grads);

        let critic_loss = match (critic_outcome, &self.critic) {
            (Some((grads, loss_val)), Some(critic)) => {
                self.critic_grads.accumulate(critic, grads);
                Some(loss_val)
            }
            _ => None,
        };

        Ok(GradientReport {
            steps,
            policy_loss: policy_loss_val,
            critic_loss,
            entropy: entropy_val,
            entropy_weight,
        })
    }

    /// Apply one optimizer step from the accumulated gradients, then reset
    /// them to zero. A no-op when nothing is pending.
    ///
    /// Returns the number of gradient computations merged into this step.
    pub fn apply_update(&mut self) -> usize {
        let merged = self.policy_grads.pending();

        if let Some(grads) = self.policy_grads.take() {
            self.policy = self
                .policy_optim
                .step(self.config.actor_lr, self.policy.clone(), grads);
        }

        if let Some(grads) = self.critic_grads.take() {
            if let Some(optim) = self.critic_optim.as_mut() {
                if let Some(critic) = self.critic.take() {
                    self.critic = Some(optim.step(self.config.critic_lr, critic, grads));
                }
            }
        }

        merged
    }

    /// Discard pending gradients without applying them.
    ///
    /// A caller that aborts a round mid-way must call this before the next
    /// round to avoid cross-round contamination.
    pub fn discard_gradients(&mut self) {
        self.policy_grads.reset();
        self.critic_grads.reset();
    }

    /// Number of gradient computations pending since the last update.
    pub fn pending_gradients(&self) -> usize {
        self.policy_grads.pending()
    }

    /// Snapshot of the canonical policy parameters, for broadcast.
    pub fn policy_params(&self) -> ParamSnapshot {
        snapshot_of(&self.policy)
    }

    /// Snapshot of the critic parameters.
    ///
    /// Fails with [`AgentError::MissingCritic`] on the actor-only variant.
    pub fn critic_params(&self) -> Result<ParamSnapshot, AgentError> {
        self.critic
            .as_ref()
            .map(snapshot_of)
            .ok_or(AgentError::MissingCritic)
    }

    /// The owned policy network.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// The owned value network, if the variant has one.
    pub fn critic(&self) -> Option<&V> {
        self.critic.as_ref()
    }

    /// The agent configuration.
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// The configured model variant.
    pub fn variant(&self) -> ModelVariant {
        self.config.variant
    }

    fn check_trajectory(&self, trajectory: &Trajectory) -> Result<(), AgentError> {
        if trajectory.is_empty() {
            return Err(AgentError::EmptyTrajectory);
        }
        if trajectory.state_dim() != self.config.state_dim {
            return Err(AgentError::StateDimMismatch {
                expected: self.config.state_dim,
                actual: trajectory.state_dim(),
            });
        }
        if let Some(&action) = trajectory
            .actions()
            .iter()
            .find(|&&a| a as usize >= self.config.n_actions)
        {
            return Err(AgentError::ActionOutOfRange {
                action,
                n_actions: self.config.n_actions,
            });
        }
        if self.config.variant == ModelVariant::CriticTd && trajectory.len() < 2 {
            return Err(AgentError::SingleStepTd);
        }
        Ok(())
    }
}
