//! Network interfaces consumed by the agents.
//!
//! The feed-forward architectures themselves live outside this crate; the
//! agents only need a forward pass and a stable parameter traversal, which
//! `Module` already provides.
//!
//! # Design
//!
//! The trait hierarchy mirrors the inference/training split:
//!
//! - [`PolicyModel`] / [`ValueModel`]: inference contracts over any
//!   `B: Backend`, used by rollout workers.
//! - [`TrainablePolicy`] / [`TrainableValue`]: training markers requiring
//!   `B: AutodiffBackend`, used by the central learner for gradient
//!   computation.
//!
//! Workers should hold models on an inner backend (obtained via
//! `model.valid()` from the training copy, or constructed there directly)
//! so rollout forward passes build no computation graph.

use burn::module::{AutodiffModule, Module};
use burn::tensor::backend::{AutodiffBackend, Backend};
use burn::tensor::Tensor;

/// Policy network: maps a state batch to action-probability rows.
///
/// The output of [`forward`](PolicyModel::forward) must be a
/// `[batch, n_actions]` tensor whose rows are probability distributions
/// (non-negative, summing to one), e.g. the output of a final softmax.
pub trait PolicyModel<B: Backend>: Module<B> + Clone + Send + 'static {
    /// Forward pass: `[batch, state_dim]` to `[batch, n_actions]`.
    fn forward(&self, states: Tensor<B, 2>) -> Tensor<B, 2>;

    /// State dimensionality expected by the network.
    fn state_dim(&self) -> usize;

    /// Size of the action space.
    fn n_actions(&self) -> usize;
}

/// Value network: maps a state batch to scalar value estimates.
pub trait ValueModel<B: Backend>: Module<B> + Clone + Send + 'static {
    /// Forward pass: `[batch, state_dim]` to `[batch, 1]`.
    fn forward(&self, states: Tensor<B, 2>) -> Tensor<B, 2>;

    /// State dimensionality expected by the network.
    fn state_dim(&self) -> usize;
}

/// Training marker for policy networks on an autodiff backend.
pub trait TrainablePolicy<B: AutodiffBackend>: PolicyModel<B> + AutodiffModule<B> {}

/// Training marker for value networks on an autodiff backend.
pub trait TrainableValue<B: AutodiffBackend>: ValueModel<B> + AutodiffModule<B> {}
