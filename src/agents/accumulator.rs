//! Explicit gradient accumulation between optimizer steps.
//!
//! Repeated gradient computations sum into this accumulator; one optimizer
//! step later consumes the sum and leaves the accumulator empty. This is
//! the mechanism that lets many workers' trajectories contribute to a
//! single update: the learner accumulates one gradient per trajectory and
//! applies once per round.
//!
//! # Contract
//!
//! - `accumulate` adds a gradient to the pending sum and never touches
//!   parameters.
//! - `take` hands out the summed gradient and resets the pending state, so
//!   two consecutive takes can never apply the same gradient twice.
//! - `reset` discards the pending sum without applying it, which is what an
//!   aborted round must do before the next one starts.

use std::marker::PhantomData;

use burn::module::AutodiffModule;
use burn::optim::{GradientsAccumulator, GradientsParams};
use burn::tensor::backend::AutodiffBackend;

/// Gradient accumulator with an explicit pending count.
pub struct GradAccumulator<B, M>
where
    B: AutodiffBackend,
    M: AutodiffModule<B>,
{
    inner: GradientsAccumulator<M>,
    pending: usize,
    _backend: PhantomData<B>,
}

impl<B, M> GradAccumulator<B, M>
where
    B: AutodiffBackend,
    M: AutodiffModule<B>,
{
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self {
            inner: GradientsAccumulator::new(),
            pending: 0,
            _backend: PhantomData,
        }
    }

    /// Add a gradient to the pending sum.
    pub fn accumulate(&mut self, module: &M, grads: GradientsParams) {
        self.inner.accumulate(module, grads);
        self.pending += 1;
    }

    /// Take the summed gradient, leaving the accumulator empty.
    ///
    /// Returns `None` when nothing has been accumulated since the last
    /// take or reset.
    pub fn take(&mut self) -> Option<GradientsParams> {
        if self.pending == 0 {
            return None;
        }
        self.pending = 0;
        Some(self.inner.grads())
    }

    /// Discard the pending sum without applying it.
    pub fn reset(&mut self) {
        if self.pending > 0 {
            let _ = self.inner.grads();
            self.pending = 0;
        }
    }

    /// Number of gradients accumulated since the last take or reset.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending == 0
    }
}

impl<B, M> Default for GradAccumulator<B, M>
where
    B: AutodiffBackend,
    M: AutodiffModule<B>,
{
    fn default() -> Self {
        Self::new()
    }
}
