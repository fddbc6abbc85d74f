use std::fmt;

use crg_core::errors::{CrgError, ErrorInfo};
use serde::{Deserialize, Serialize};

use crate::params::validate_threshold;

/// Default dead band around zero used by [`classify_flow`].
pub const DEFAULT_THRESHOLD: f64 = 0.01;
/// Shortest beta sequence that can be labelled [`FlowClass::Resurgence`].
pub const RESURGENCE_MIN_LEN: usize = 3;
/// Number of final values excluded from the "earlier scales" search for a negative beta.
pub const RESURGENCE_TRAILING_WINDOW: usize = 1;

/// Qualitative regime of a causal beta sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlowClass {
    /// Causal information weakens at coarser scales.
    ReductionistDecay,
    /// Causal information is flat across scales.
    ScaleInvariant,
    /// Causal information strengthens at coarser scales.
    CausalEmergence,
    /// Negative at intermediate scales, positive again at the coarsest one.
    Resurgence,
}

impl FlowClass {
    /// Stable human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            FlowClass::ReductionistDecay => "Class I: Reductionist Decay",
            FlowClass::ScaleInvariant => "Class II: Scale Invariant",
            FlowClass::CausalEmergence => "Class III: Causal Emergence",
            FlowClass::Resurgence => "Class III: Resurgence",
        }
    }
}

impl fmt::Display for FlowClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifies `beta` with the default threshold.
pub fn classify_flow(beta: &[f64]) -> Result<FlowClass, CrgError> {
    classify_flow_with_threshold(beta, DEFAULT_THRESHOLD)
}

/// Classifies `beta` by its mean, with a resurgence check for positive flows.
pub fn classify_flow_with_threshold(beta: &[f64], threshold: f64) -> Result<FlowClass, CrgError> {
    validate_threshold(threshold)?;
    if beta.is_empty() {
        return Err(CrgError::input(
            "empty-beta",
            "classification needs at least one beta value",
        ));
    }
    if let Some(index) = beta.iter().position(|value| !value.is_finite()) {
        return Err(CrgError::Input(
            ErrorInfo::new("non-finite-beta", "beta sequence contains a non-finite value")
                .with_context("index", index.to_string())
                .with_hint("drop degenerate intervals before classifying"),
        ));
    }

    let mean = beta.iter().sum::<f64>() / beta.len() as f64;
    if mean < -threshold {
        return Ok(FlowClass::ReductionistDecay);
    }
    if mean.abs() <= threshold {
        return Ok(FlowClass::ScaleInvariant);
    }
    if is_resurgent(beta, threshold) {
        return Ok(FlowClass::Resurgence);
    }
    Ok(FlowClass::CausalEmergence)
}

fn is_resurgent(beta: &[f64], threshold: f64) -> bool {
    if beta.len() < RESURGENCE_MIN_LEN {
        return false;
    }
    let earlier = &beta[..beta.len() - RESURGENCE_TRAILING_WINDOW];
    beta[beta.len() - 1] > threshold && earlier.iter().any(|value| *value < 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(
            FlowClass::ReductionistDecay.to_string(),
            "Class I: Reductionist Decay"
        );
        assert_eq!(FlowClass::Resurgence.label(), "Class III: Resurgence");
    }

    #[test]
    fn mean_on_the_boundary_is_invariant() {
        assert_eq!(
            classify_flow(&[0.01, 0.01]).unwrap(),
            FlowClass::ScaleInvariant
        );
        assert_eq!(
            classify_flow(&[-0.01]).unwrap(),
            FlowClass::ScaleInvariant
        );
    }

    #[test]
    fn short_sequences_cannot_resurge() {
        assert_eq!(
            classify_flow(&[-0.5, 2.0]).unwrap(),
            FlowClass::CausalEmergence
        );
    }
}
