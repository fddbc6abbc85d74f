#![deny(missing_docs)]
#![doc = "Information-theoretic estimators over random-walk transition kernels. All entropies are in bits."]

/// Spectral assembly index estimator.
pub mod assembly;
/// Effective information estimator.
pub mod ei;
/// Smoothed Shannon entropy helpers.
pub mod entropy;
/// Random-walk transition kernel construction.
pub mod kernel;

pub use assembly::{network_assembly_index, network_assembly_index_with_eps};
pub use ei::{effective_information, effective_information_with_eps, ei_breakdown, EiBreakdown};
pub use entropy::DEFAULT_EPS;
pub use kernel::build_transition_kernel;
