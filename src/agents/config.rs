//! Agent configuration.
//!
//! Every numeric knob of the learning update is fixed at agent
//! construction: shapes, the model variant, learning rates, the discount
//! factor, the probability floor and the RMSProp moments.
//!
//! # Validation
//!
//! Use `validate()` before constructing agents. Invalid configurations can
//! produce NaN losses or out-of-range indexing during training.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::algorithms::variant::ModelVariant;

/// Validation errors for agent configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// state_dim must be > 0
    ZeroStateDim,
    /// n_actions must be > 0
    ZeroActionCount,
    /// discount must be in (0, 1)
    InvalidDiscount(f32),
    /// learning rates must be finite and > 0
    InvalidLearningRate(&'static str, f64),
    /// prob_floor must be in (0, 1)
    InvalidProbFloor(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroStateDim => write!(f, "state_dim must be > 0"),
            ConfigError::ZeroActionCount => write!(f, "n_actions must be > 0"),
            ConfigError::InvalidDiscount(value) => {
                write!(f, "discount must be in (0, 1), got {}", value)
            }
            ConfigError::InvalidLearningRate(which, value) => {
                write!(f, "{} must be finite and > 0, got {}", which, value)
            }
            ConfigError::InvalidProbFloor(value) => {
                write!(f, "prob_floor must be in (0, 1), got {}", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Configuration shared by the central learner and rollout workers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// State dimensionality fed to every owned network.
    pub state_dim: usize,
    /// Size of the discrete action space.
    pub n_actions: usize,
    /// Advantage/critic-target selection.
    pub variant: ModelVariant,
    /// Policy-network learning rate.
    pub actor_lr: f64,
    /// Value-network learning rate.
    pub critic_lr: f64,
    /// Discount factor for returns.
    pub discount: f32,
    /// Probability floor applied before logarithms.
    pub prob_floor: f32,
    /// RMSProp squared-gradient decay.
    pub rmsprop_alpha: f32,
    /// RMSProp denominator epsilon.
    pub rmsprop_epsilon: f32,
}

impl AgentConfig {
    /// Create a config for the given shapes with default hyperparameters.
    pub fn new(state_dim: usize, n_actions: usize) -> Self {
        Self {
            state_dim,
            n_actions,
            variant: ModelVariant::default(),
            actor_lr: 1e-4,
            critic_lr: 1e-3,
            discount: 0.99,
            prob_floor: 1e-6,
            rmsprop_alpha: 0.9,
            rmsprop_epsilon: 1e-10,
        }
    }

    /// Set the model variant.
    pub fn with_variant(mut self, variant: ModelVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the policy-network learning rate.
    pub fn with_actor_lr(mut self, lr: f64) -> Self {
        self.actor_lr = lr;
        self
    }

    /// Set the value-network learning rate.
    pub fn with_critic_lr(mut self, lr: f64) -> Self {
        self.critic_lr = lr;
        self
    }

    /// Set the discount factor.
    pub fn with_discount(mut self, discount: f32) -> Self {
        self.discount = discount;
        self
    }

    /// Set the probability floor.
    pub fn with_prob_floor(mut self, floor: f32) -> Self {
        self.prob_floor = floor;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.state_dim == 0 {
            return Err(ConfigError::ZeroStateDim);
        }
        if self.n_actions == 0 {
            return Err(ConfigError::ZeroActionCount);
        }
        if !(self.discount > 0.0 && self.discount < 1.0) {
            return Err(ConfigError::InvalidDiscount(self.discount));
        }
        if !(self.actor_lr.is_finite() && self.actor_lr > 0.0) {
            return Err(ConfigError::InvalidLearningRate("actor_lr", self.actor_lr));
        }
        if !(self.critic_lr.is_finite() && self.critic_lr > 0.0) {
            return Err(ConfigError::InvalidLearningRate(
                "critic_lr",
                self.critic_lr,
            ));
        }
        if !(self.prob_floor > 0.0 && self.prob_floor < 1.0) {
            return Err(ConfigError::InvalidProbFloor(self.prob_floor));
        }
        Ok(())
    }
}
