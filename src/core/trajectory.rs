//! Trajectory batches for gradient computation.
//!
//! A trajectory is the ephemeral input of one gradient computation: the
//! ordered states visited during a rollout, the actions taken, the rewards
//! received, and whether the rollout ended in a terminal state. It is
//! consumed once and not retained.
//!
//! States are stored flat (`[steps * state_dim]`) so they convert to a
//! `[steps, state_dim]` tensor without copying per step.

use std::fmt;

/// Errors raised while assembling a trajectory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrajectoryError {
    /// A pushed state does not match the configured state dimensionality.
    StateDimMismatch {
        /// Configured state dimensionality.
        expected: usize,
        /// Length of the offending state slice.
        actual: usize,
        /// Step index at which the mismatch occurred.
        step: usize,
    },
    /// Component sequences disagree in length.
    LengthMismatch {
        /// Number of states.
        states: usize,
        /// Number of actions.
        actions: usize,
        /// Number of rewards.
        rewards: usize,
    },
}

impl fmt::Display for TrajectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrajectoryError::StateDimMismatch {
                expected,
                actual,
                step,
            } => write!(
                f,
                "state at step {} has {} components, expected {}",
                step, actual, expected
            ),
            TrajectoryError::LengthMismatch {
                states,
                actions,
                rewards,
            } => write!(
                f,
                "trajectory sequences disagree in length: {} states, {} actions, {} rewards",
                states, actions, rewards
            ),
        }
    }
}

impl std::error::Error for TrajectoryError {}

/// Ordered rollout batch: states, taken actions, rewards, terminal flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    state_dim: usize,
    states: Vec<f32>,
    actions: Vec<u32>,
    rewards: Vec<f32>,
    terminal: bool,
}

impl Trajectory {
    /// Create an empty trajectory for states of the given dimensionality.
    pub fn new(state_dim: usize) -> Self {
        Self {
            state_dim,
            states: Vec::new(),
            actions: Vec::new(),
            rewards: Vec::new(),
            terminal: false,
        }
    }

    /// Build a trajectory from complete per-step sequences.
    pub fn from_steps(
        state_dim: usize,
        states: &[Vec<f32>],
        actions: Vec<u32>,
        rewards: Vec<f32>,
        terminal: bool,
    ) -> Result<Self, TrajectoryError> {
        if states.len() != actions.len() || actions.len() != rewards.len() {
            return Err(TrajectoryError::LengthMismatch {
                states: states.len(),
                actions: actions.len(),
                rewards: rewards.len(),
            });
        }

        let mut trajectory = Self::new(state_dim);
        for (step, state) in states.iter().enumerate() {
            if state.len() != state_dim {
                return Err(TrajectoryError::StateDimMismatch {
                    expected: state_dim,
                    actual: state.len(),
                    step,
                });
            }
            trajectory.states.extend_from_slice(state);
        }
        trajectory.actions = actions;
        trajectory.rewards = rewards;
        trajectory.terminal = terminal;
        Ok(trajectory)
    }

    /// Append one rollout step.
    pub fn push_step(
        &mut self,
        state: &[f32],
        action: u32,
        reward: f32,
    ) -> Result<(), TrajectoryError> {
        if state.len() != self.state_dim {
            return Err(TrajectoryError::StateDimMismatch {
                expected: self.state_dim,
                actual: state.len(),
                step: self.len(),
            });
        }

        self.states.extend_from_slice(state);
        self.actions.push(action);
        self.rewards.push(reward);
        Ok(())
    }

    /// Mark whether the final step ended the episode.
    pub fn set_terminal(&mut self, terminal: bool) {
        self.terminal = terminal;
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the trajectory holds no steps.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Configured state dimensionality.
    pub fn state_dim(&self) -> usize {
        self.state_dim
    }

    /// Flat state storage, `[steps * state_dim]`.
    pub fn states_flat(&self) -> &[f32] {
        &self.states
    }

    /// Taken action indices, one per step.
    pub fn actions(&self) -> &[u32] {
        &self.actions
    }

    /// Immediate rewards, one per step.
    pub fn rewards(&self) -> &[f32] {
        &self.rewards
    }

    /// Whether the final step ended the episode.
    pub fn terminal(&self) -> bool {
        self.terminal
    }

    /// Sum of immediate rewards.
    pub fn total_reward(&self) -> f32 {
        self.rewards.iter().sum()
    }
}
