use crg_core::errors::{CrgError, ErrorInfo};

/// Smoothing constant added before taking logarithms.
pub const DEFAULT_EPS: f64 = 1e-10;

/// Shannon entropy in bits of the distribution proportional to `weights`.
///
/// Weights are normalised by their total; zero-probability terms contribute
/// nothing. A vector with zero total weight has entropy 0.
pub fn entropy_bits<I>(weights: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let weights: Vec<f64> = weights.into_iter().collect();
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }
    weights
        .iter()
        .map(|w| w / total)
        .filter(|p| *p > 0.0)
        .map(|p| -p * p.log2())
        .sum()
}

/// Entropy in bits after adding `eps` to every weight.
pub fn smoothed_entropy_bits<I>(weights: I, eps: f64) -> f64
where
    I: IntoIterator<Item = f64>,
{
    entropy_bits(weights.into_iter().map(|w| w + eps))
}

pub(crate) fn validate_eps(eps: f64) -> Result<(), CrgError> {
    if eps.is_finite() && eps >= 0.0 {
        Ok(())
    } else {
        Err(CrgError::Input(
            ErrorInfo::new("invalid-eps", "smoothing constant must be finite and non-negative")
                .with_context("eps", eps.to_string()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_distribution_has_log2_entropy() {
        assert!((entropy_bits([1.0; 8]) - 3.0).abs() < 1e-12);
        assert!((entropy_bits([0.5, 0.5, 0.0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_vector_has_zero_entropy() {
        assert_eq!(entropy_bits([0.0, 0.0]), 0.0);
        assert_eq!(entropy_bits(Vec::new()), 0.0);
    }

    #[test]
    fn smoothing_turns_zero_row_uniform() {
        let h = smoothed_entropy_bits([0.0; 4], DEFAULT_EPS);
        assert!((h - 2.0).abs() < 1e-12);
    }

    #[test]
    fn eps_validation() {
        assert!(validate_eps(0.0).is_ok());
        assert_eq!(validate_eps(-1.0).unwrap_err().info().code, "invalid-eps");
        assert!(validate_eps(f64::NAN).is_err());
    }
}
