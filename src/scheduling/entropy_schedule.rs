//! Entropy-weight schedules for exploration regularization.
//!
//! Provides epoch-dependent coefficients for the entropy bonus:
//! - `LinearEntropyDecay`: linear interpolation from a start weight down to
//!   a floor, then constant
//! - `ConstantEntropy`: fixed weight
//!
//! # Data Integrity
//!
//! Schedules validate inputs in debug builds and handle edge cases
//! gracefully in release builds to prevent NaN/Inf propagation:
//!
//! - **Non-finite inputs**: NaN/Inf weights trigger debug panic, are
//!   replaced with 0.0 in release
//! - **Inverted bounds**: floor above start triggers debug panic, floor is
//!   clamped to start in release
//! - **Zero decay span**: `decay_epochs = 0` returns the floor for every
//!   epoch

/// Entropy-weight schedule trait.
///
/// The weight is a pure function of the training epoch, which the outer
/// training loop supplies on every gradient computation. Epochs are
/// monotonically non-decreasing across a run but need not be contiguous.
pub trait EntropySchedule: Send + Sync {
    /// Entropy-bonus weight for the given epoch.
    fn weight(&self, epoch: usize) -> f32;
}

/// Linear decay from a start weight to a floor over `decay_epochs`, constant
/// at the floor afterwards.
///
/// The default schedule starts at 1.0 and reaches the 0.1 floor at epoch
/// 100_000, encouraging exploration early and exploitation later.
#[derive(Debug, Clone)]
pub struct LinearEntropyDecay {
    start: f32,
    floor: f32,
    decay_epochs: usize,
}

impl LinearEntropyDecay {
    /// Create a new linear decay schedule.
    ///
    /// # Panics (debug only)
    ///
    /// Panics if `start` or `floor` is non-finite or negative, or if the
    /// floor exceeds the start weight.
    pub fn new(start: f32, floor: f32, decay_epochs: usize) -> Self {
        debug_assert!(
            start.is_finite() && start >= 0.0,
            "LinearEntropyDecay: start must be finite and non-negative, got {}",
            start
        );
        debug_assert!(
            floor.is_finite() && floor >= 0.0,
            "LinearEntropyDecay: floor must be finite and non-negative, got {}",
            floor
        );
        debug_assert!(
            floor <= start,
            "LinearEntropyDecay: floor {} exceeds start {}",
            floor,
            start
        );

        // Sanitize in release builds
        let start = if start.is_finite() && start >= 0.0 { start } else { 0.0 };
        let floor = if floor.is_finite() && floor >= 0.0 { floor } else { 0.0 };
        let floor = floor.min(start);

        Self {
            start,
            floor,
            decay_epochs,
        }
    }

    /// Get the start weight.
    pub fn start(&self) -> f32 {
        self.start
    }

    /// Get the floor weight.
    pub fn floor(&self) -> f32 {
        self.floor
    }

    /// Get the number of epochs over which the weight decays.
    pub fn decay_epochs(&self) -> usize {
        self.decay_epochs
    }
}

impl Default for LinearEntropyDecay {
    fn default() -> Self {
        Self::new(1.0, 0.1, 100_000)
    }
}

impl EntropySchedule for LinearEntropyDecay {
    fn weight(&self, epoch: usize) -> f32 {
        if self.decay_epochs == 0 {
            return self.floor;
        }

        let progress = epoch as f32 / self.decay_epochs as f32;
        let weight = self.start - (self.start - self.floor) * progress;

        if weight.is_finite() {
            weight.max(self.floor)
        } else {
            self.floor
        }
    }
}

/// Fixed entropy weight (no scheduling).
#[derive(Debug, Clone)]
pub struct ConstantEntropy {
    weight: f32,
}

impl ConstantEntropy {
    /// Create a constant schedule.
    ///
    /// # Panics (debug only)
    ///
    /// Panics if `weight` is non-finite or negative.
    pub fn new(weight: f32) -> Self {
        debug_assert!(
            weight.is_finite() && weight >= 0.0,
            "ConstantEntropy: weight must be finite and non-negative, got {}",
            weight
        );

        let weight = if weight.is_finite() && weight >= 0.0 {
            weight
        } else {
            0.0
        };

        Self { weight }
    }
}

impl EntropySchedule for ConstantEntropy {
    fn weight(&self, _epoch: usize) -> f32 {
        self.weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_decay_endpoints() {
        let schedule = LinearEntropyDecay::default();

        assert!((schedule.weight(0) - 1.0).abs() < 1e-6);
        assert!((schedule.weight(100_000) - 0.1).abs() < 1e-6);
        assert!((schedule.weight(10_000_000) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_linear_decay_midpoint() {
        let schedule = LinearEntropyDecay::default();

        // Halfway through the decay span: 1.0 - 0.9 * 0.5 = 0.55
        assert!((schedule.weight(50_000) - 0.55).abs() < 1e-5);
    }

    #[test]
    fn test_linear_decay_monotone_non_increasing() {
        let schedule = LinearEntropyDecay::default();

        let mut previous = f32::INFINITY;
        for epoch in (0..2_000_000).step_by(12_345) {
            let weight = schedule.weight(epoch);
            assert!(
                weight <= previous + 1e-7,
                "weight increased at epoch {}: {} > {}",
                epoch,
                weight,
                previous
            );
            previous = weight;
        }
    }

    #[test]
    fn test_linear_decay_floors_exactly() {
        let schedule = LinearEntropyDecay::default();
        assert_eq!(schedule.weight(usize::MAX / 2), 0.1);
    }

    #[test]
    fn test_zero_decay_span_returns_floor() {
        let schedule = LinearEntropyDecay::new(1.0, 0.25, 0);
        assert_eq!(schedule.weight(0), 0.25);
        assert_eq!(schedule.weight(1000), 0.25);
    }

    #[test]
    fn test_constant_schedule() {
        let schedule = ConstantEntropy::new(0.5);
        assert_eq!(schedule.weight(0), 0.5);
        assert_eq!(schedule.weight(1_000_000), 0.5);
    }
}
