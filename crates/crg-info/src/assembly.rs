use crg_core::errors::{CrgError, ErrorInfo};
use crg_core::Network;
use nalgebra::SymmetricEigen;

use crate::entropy::{entropy_bits, validate_eps, DEFAULT_EPS};

/// Spectral assembly index of `graph` in bits with the default smoothing.
pub fn network_assembly_index(graph: &dyn Network) -> Result<f64, CrgError> {
    network_assembly_index_with_eps(graph, DEFAULT_EPS)
}

/// Entropy of the normalised eigenvalue magnitudes of `adjacency + eps`.
///
/// `eps` is added to every entry, which keeps the matrix symmetric. Graphs
/// with fewer than two nodes return 0.
pub fn network_assembly_index_with_eps(graph: &dyn Network, eps: f64) -> Result<f64, CrgError> {
    validate_eps(eps)?;
    let n = graph.node_count();
    if n < 2 {
        return Ok(0.0);
    }

    let adjacency = graph.adjacency_matrix().add_scalar(eps);
    let eigen = SymmetricEigen::new(adjacency);
    let magnitudes: Vec<f64> = eigen.eigenvalues.iter().map(|value| value.abs()).collect();
    let total: f64 = magnitudes.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(CrgError::Numerical(
            ErrorInfo::new("degenerate-spectrum", "adjacency spectrum has no mass")
                .with_context("nodes", n.to_string())
                .with_context("eps", eps.to_string())
                .with_hint("use a positive eps for edgeless graphs"),
        ));
    }
    Ok(entropy_bits(magnitudes))
}
