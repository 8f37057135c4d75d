//! Discounted returns and advantages for trajectory batches.
//!
//! ## Formula
//!
//! R[T-1] = r[T-1]
//! R[t]   = r[t] + γ R[t+1]        for t < T-1
//!
//! The recursion seeds the last step with its raw reward and bootstraps
//! nothing beyond the batch. For a trajectory truncated mid-episode this is
//! an approximation of the true return, not the return itself: the value of
//! the state past the last step is treated as zero. Callers that care can
//! inspect the trajectory's terminal flag.

/// Compute discounted returns for a single trajectory by backward
/// accumulation.
///
/// Returns an empty vector for an empty reward slice.
pub fn discounted_returns(rewards: &[f32], discount: f32) -> Vec<f32> {
    let n = rewards.len();
    let mut returns = vec![0.0f32; n];
    if n == 0 {
        return returns;
    }

    returns[n - 1] = rewards[n - 1];
    for t in (0..n - 1).rev() {
        returns[t] = rewards[t] + discount * returns[t + 1];
    }

    returns
}

/// Advantage of each step against a baseline value estimate.
///
/// advantage[t] = returns[t] - baseline[t]
pub fn advantages(returns: &[f32], baseline: &[f32]) -> Vec<f32> {
    debug_assert_eq!(
        returns.len(),
        baseline.len(),
        "returns and baseline must have equal length"
    );

    returns
        .iter()
        .zip(baseline.iter())
        .map(|(r, v)| r - v)
        .collect()
}

/// One-step TD targets: target[t] = r[t] + γ * bootstrap[t].
///
/// `bootstrap` holds the next-state value estimates aligned with `rewards`;
/// the caller is responsible for slicing off the final transition when no
/// next state exists.
pub fn td_targets(rewards: &[f32], bootstrap: &[f32], discount: f32) -> Vec<f32> {
    debug_assert_eq!(
        rewards.len(),
        bootstrap.len(),
        "rewards and bootstrap values must have equal length"
    );

    rewards
        .iter()
        .zip(bootstrap.iter())
        .map(|(r, v)| r + discount * v)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_returns_recursion_property() {
        let rewards = vec![1.0, 0.0, 0.0, 0.0, 1.0];
        let gamma = 0.99;

        let returns = discounted_returns(&rewards, gamma);

        assert_eq!(returns.len(), 5);
        assert_eq!(returns[4], rewards[4]);
        for t in 0..4 {
            let expected = rewards[t] + gamma * returns[t + 1];
            assert!(
                (returns[t] - expected).abs() < 1e-6,
                "R[{}] = {} but r[{}] + gamma * R[{}] = {}",
                t,
                returns[t],
                t,
                t + 1,
                expected
            );
        }
    }

    #[test]
    fn test_returns_single_step() {
        let returns = discounted_returns(&[0.5], 0.99);
        assert_eq!(returns, vec![0.5]);
    }

    #[test]
    fn test_returns_empty() {
        let returns = discounted_returns(&[], 0.99);
        assert!(returns.is_empty());
    }

    #[test]
    fn test_returns_zero_discount() {
        // With gamma = 0 each return is just the immediate reward.
        let rewards = vec![1.0, 2.0, 3.0];
        let returns = discounted_returns(&rewards, 0.0);
        assert_eq!(returns, rewards);
    }

    #[test]
    fn test_advantages_subtract_baseline() {
        let returns = vec![2.0, 1.0, 0.5];
        let baseline = vec![1.0, 1.0, 1.0];

        let adv = advantages(&returns, &baseline);
        assert_eq!(adv, vec![1.0, 0.0, -0.5]);
    }

    #[test]
    fn test_td_targets() {
        let rewards = vec![1.0, 0.0];
        let bootstrap = vec![0.5, 0.25];
        let targets = td_targets(&rewards, &bootstrap, 0.99);

        assert!((targets[0] - (1.0 + 0.99 * 0.5)).abs() < 1e-6);
        assert!((targets[1] - 0.99 * 0.25).abs() < 1e-6);
    }
}
