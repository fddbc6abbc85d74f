#![deny(missing_docs)]

//! Undirected graph storage, contraction, and deterministic generators
//! implementing the `crg-core` [`Network`](crg_core::Network) contract.

mod generators;
mod graph;
mod hash;
mod quotient;
mod serialization;

pub use generators::{
    barabasi_albert, complete_graph, complete_graph_with_loops, cycle_graph, erdos_renyi,
    path_graph, ring_of_cliques, star_graph,
};
pub use graph::SimpleGraph;
pub use hash::canonical_hash;
pub use quotient::quotient_graph;

/// Re-export serialization helpers for downstream crates.
pub use serialization::{
    graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json, MAX_SERIALIZED_NODES,
};
