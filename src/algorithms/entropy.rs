//! Shannon-entropy diagnostic for probability vectors.

/// Entropy H(x) = -Σ x_i ln(x_i) over a probability vector.
///
/// Components not strictly inside (0, 1) are skipped, which guards against
/// ln(0) and makes degenerate one-hot distributions report zero entropy.
/// Agrees with the in-graph entropy used during loss computation up to
/// floating-point tolerance.
pub fn compute_entropy(probs: &[f32]) -> f32 {
    probs
        .iter()
        .filter(|&&p| p > 0.0 && p < 1.0)
        .map(|&p| -p * p.ln())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_two_actions() {
        // H([0.5, 0.5]) = ln 2
        let h = compute_entropy(&[0.5, 0.5]);
        assert!((h - 0.693147).abs() < 1e-5, "got {}", h);
    }

    #[test]
    fn test_one_hot_is_zero() {
        // Both components sit on the boundary and are skipped.
        assert_eq!(compute_entropy(&[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(compute_entropy(&[]), 0.0);
    }

    #[test]
    fn test_uniform_four_actions() {
        // H(uniform over n) = ln n
        let h = compute_entropy(&[0.25; 4]);
        assert!((h - 4.0f32.ln()).abs() < 1e-5, "got {}", h);
    }
}
