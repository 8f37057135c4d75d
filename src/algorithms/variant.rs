//! Model variants for the learning update.
//!
//! Selects the advantage rule and the critic training target at agent
//! construction time:
//!
//! - [`ModelVariant::Original`]: critic baseline, critic regresses the full
//!   discounted return.
//! - [`ModelVariant::CriticTd`]: critic baseline, critic regresses a
//!   one-step TD target.
//! - [`ModelVariant::ActorOnly`]: no critic, the raw discounted return is
//!   used as the advantage.

use serde::{Deserialize, Serialize};

/// Learning-update variant, fixed at agent construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelVariant {
    /// Advantage = return - V(s); critic target is the discounted return.
    Original,
    /// Advantage = return - V(s); critic target is r + gamma * V(s').
    CriticTd,
    /// Advantage = return; no critic network exists.
    ActorOnly,
}

impl ModelVariant {
    /// Whether this variant owns a value network.
    pub const fn uses_critic(self) -> bool {
        !matches!(self, ModelVariant::ActorOnly)
    }

    /// Variant name for logging.
    pub const fn name(self) -> &'static str {
        match self {
            ModelVariant::Original => "original",
            ModelVariant::CriticTd => "critic_td",
            ModelVariant::ActorOnly => "actor_only",
        }
    }

    /// Numeric code used by external configuration (0, 1, 2).
    pub const fn code(self) -> u8 {
        match self {
            ModelVariant::Original => 0,
            ModelVariant::CriticTd => 1,
            ModelVariant::ActorOnly => 2,
        }
    }

    /// Parse the numeric configuration code.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(ModelVariant::Original),
            1 => Some(ModelVariant::CriticTd),
            2 => Some(ModelVariant::ActorOnly),
            _ => None,
        }
    }
}

impl Default for ModelVariant {
    fn default() -> Self {
        ModelVariant::Original
    }
}

impl std::fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
