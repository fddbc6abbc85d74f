use crg_core::errors::{CrgError, ErrorInfo};
use crg_core::Network;
use serde::{Deserialize, Serialize};

use crate::entropy::{smoothed_entropy_bits, validate_eps, DEFAULT_EPS};
use crate::kernel::build_transition_kernel;

/// Components of an effective information estimate, in bits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct EiBreakdown {
    /// Entropy of the effect distribution under a uniform intervention.
    pub h_effect: f64,
    /// Mean entropy of the individual kernel rows.
    pub h_noise: f64,
    /// `h_effect - h_noise`.
    pub ei: f64,
}

/// Effective information of `graph` in bits with the default smoothing.
pub fn effective_information(graph: &dyn Network) -> Result<f64, CrgError> {
    effective_information_with_eps(graph, DEFAULT_EPS)
}

/// Effective information of `graph` in bits, smoothing every probability by `eps`.
///
/// Graphs with fewer than two nodes have effective information exactly 0.
pub fn effective_information_with_eps(graph: &dyn Network, eps: f64) -> Result<f64, CrgError> {
    Ok(ei_breakdown(graph, eps)?.ei)
}

/// Computes the determinism and degeneracy terms behind effective information.
///
/// The effect distribution is the column mean of the transition kernel, i.e.
/// the next-step distribution when the source node is drawn uniformly. The
/// noise term averages the entropy of every row, isolated rows included.
pub fn ei_breakdown(graph: &dyn Network, eps: f64) -> Result<EiBreakdown, CrgError> {
    validate_eps(eps)?;
    let n = graph.node_count();
    if n < 2 {
        return Ok(EiBreakdown::default());
    }

    let kernel = build_transition_kernel(graph);
    let effect = kernel.column_iter().map(|column| column.sum() / n as f64);
    let h_effect = smoothed_entropy_bits(effect, eps);
    let h_noise = kernel
        .row_iter()
        .map(|row| smoothed_entropy_bits(row.iter().copied(), eps))
        .sum::<f64>()
        / n as f64;

    let ei = h_effect - h_noise;
    if !ei.is_finite() {
        return Err(CrgError::Numerical(
            ErrorInfo::new("non-finite-ei", "effective information is not finite")
                .with_context("h_effect", h_effect.to_string())
                .with_context("h_noise", h_noise.to_string()),
        ));
    }
    Ok(EiBreakdown {
        h_effect,
        h_noise,
        ei,
    })
}
