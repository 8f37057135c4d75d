//! Loss kernels for the actor and critic updates.
//!
//! All tensor functions return a single-element 1D tensor suitable for
//! `backward()`. The policy-gradient loss is a sum over steps, not a mean;
//! repeated gradient computations before one optimizer step therefore add
//! up exactly as if the per-step losses had been concatenated.
//!
//! # Numerical Stability
//!
//! Probabilities are floored before every `ln` to keep log-probabilities
//! finite when the policy collapses onto a subset of actions.

use burn::tensor::backend::{AutodiffBackend, Backend};
use burn::tensor::{Int, Tensor};

/// Log-probability of the taken action at each step.
///
/// `probs` is the `[steps, n_actions]` output of the policy network;
/// `actions` holds the action index taken at each step. Probabilities are
/// clamped to `[prob_floor, 1]` before the logarithm.
pub fn action_log_probs<B: Backend>(
    probs: Tensor<B, 2>,
    actions: &[u32],
    prob_floor: f32,
    device: &B::Device,
) -> Tensor<B, 1> {
    let steps = actions.len();

    let action_indices: Vec<i32> = actions.iter().map(|a| *a as i32).collect();
    let actions_tensor: Tensor<B, 1, Int> = Tensor::from_ints(action_indices.as_slice(), device);
    let actions_2d: Tensor<B, 2, Int> = actions_tensor.reshape([steps, 1]);

    let selected = probs.gather(1, actions_2d);
    let selected_1d: Tensor<B, 1> = selected.flatten(0, 1);

    selected_1d.clamp(prob_floor, 1.0).log()
}

/// Policy-gradient loss: Σ_t log π(a_t|s_t) * (-advantage_t).
///
/// Gradient ascent on expected return expressed as loss minimization.
pub fn policy_gradient_loss<B: AutodiffBackend>(
    log_probs: Tensor<B, 1>,
    advantages: Tensor<B, 1>,
) -> Tensor<B, 1> {
    (log_probs * advantages.neg()).sum()
}

/// Summed per-step entropy of the action distributions.
///
/// H_t = -Σ_a π(a|s_t) ln π(a|s_t), returned as Σ_t H_t with gradient flow
/// through `probs`.
pub fn entropy_sum<B: Backend>(probs: Tensor<B, 2>, prob_floor: f32) -> Tensor<B, 1> {
    let log_probs = probs.clone().clamp(prob_floor, 1.0).log();
    let neg_entropy: Tensor<B, 1> = (probs * log_probs).sum_dim(1).flatten(0, 1);
    neg_entropy.neg().sum()
}

/// Mean-squared-error loss between predictions and targets.
pub fn mse_loss<B: AutodiffBackend>(
    predictions: Tensor<B, 1>,
    targets: Tensor<B, 1>,
) -> Tensor<B, 1> {
    (predictions - targets).powf_scalar(2.0).mean()
}
