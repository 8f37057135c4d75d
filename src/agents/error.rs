//! Error taxonomy for agent operations.
//!
//! All errors are fatal to the current call and propagate to the
//! orchestration layer, which decides whether to restart a worker or abort
//! training. No retry happens here, and a failed gradient computation
//! accumulates nothing.

use std::fmt;

use super::config::ConfigError;
use crate::core::param_sync::SyncError;

/// Errors surfaced by learner and worker operations.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentError {
    /// Invalid configuration at construction.
    Config(ConfigError),
    /// A network's shape disagrees with the configuration.
    NetworkShape {
        /// What was being checked (e.g. "policy state_dim").
        what: &'static str,
        /// Configured size.
        expected: usize,
        /// Size reported by the network.
        actual: usize,
    },
    /// The variant requires a critic but none was supplied, or critic
    /// parameters were requested from an actor-only agent.
    MissingCritic,
    /// The actor-only variant was given a value network.
    UnexpectedCritic,
    /// Gradient computation received an empty trajectory.
    EmptyTrajectory,
    /// The one-step TD variant received a trajectory with no TD pairs.
    SingleStepTd,
    /// A state observation does not match the configured dimensionality.
    StateDimMismatch {
        /// Configured state dimensionality.
        expected: usize,
        /// Observed length.
        actual: usize,
    },
    /// A trajectory action lies outside the configured action space.
    ActionOutOfRange {
        /// Offending action index.
        action: u32,
        /// Configured action-space size.
        n_actions: usize,
    },
    /// Parameter transfer failed.
    Sync(SyncError),
}

impl fmt::Display for AgentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentError::Config(e) => write!(f, "invalid configuration: {}", e),
            AgentError::NetworkShape {
                what,
                expected,
                actual,
            } => write!(f, "{} is {}, configuration says {}", what, actual, expected),
            AgentError::MissingCritic => {
                write!(f, "variant requires a critic but the agent owns none")
            }
            AgentError::UnexpectedCritic => {
                write!(f, "actor-only variant must not own a value network")
            }
            AgentError::EmptyTrajectory => {
                write!(f, "gradient computation needs at least one step")
            }
            AgentError::SingleStepTd => write!(
                f,
                "one-step TD critic update needs at least two steps"
            ),
            AgentError::StateDimMismatch { expected, actual } => write!(
                f,
                "state has {} components, configuration says {}",
                actual, expected
            ),
            AgentError::ActionOutOfRange { action, n_actions } => write!(
                f,
                "action {} outside action space of size {}",
                action, n_actions
            ),
            AgentError::Sync(e) => write!(f, "parameter transfer failed: {}", e),
        }
    }
}

impl std::error::Error for AgentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AgentError::Config(e) => Some(e),
            AgentError::Sync(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for AgentError {
    fn from(e: ConfigError) -> Self {
        AgentError::Config(e)
    }
}

impl From<SyncError> for AgentError {
    fn from(e: SyncError) -> Self {
        AgentError::Sync(e)
    }
}
