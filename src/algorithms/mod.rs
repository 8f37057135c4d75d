//! Algorithm components for the learning update.
//!
//! - `returns`: discounted returns, advantages, one-step TD targets
//! - `losses`: policy-gradient, entropy and critic loss kernels
//! - `entropy`: scalar Shannon-entropy diagnostic
//! - `variant`: advantage/critic-target selection per model variant

pub mod entropy;
pub mod losses;
pub mod returns;
pub mod variant;

pub use entropy::compute_entropy;
pub use losses::{action_log_probs, entropy_sum, mse_loss, policy_gradient_loss};
pub use returns::{advantages, discounted_returns, td_targets};
pub use variant::ModelVariant;
