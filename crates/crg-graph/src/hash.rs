use crg_core::Network;
use sha2::{Digest, Sha256};

/// Computes the canonical structural hash for the provided graph.
///
/// Two graphs hash equally iff they have the same node count and the same
/// edge set over identical node identifiers.
pub fn canonical_hash(graph: &dyn Network) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"crg-simple-graph");
    hasher.update((graph.node_count() as u64).to_le_bytes());

    let edges = graph.edge_list();
    hasher.update((edges.len() as u64).to_le_bytes());
    for (u, v) in edges {
        hasher.update(u.as_raw().to_le_bytes());
        hasher.update(v.as_raw().to_le_bytes());
    }

    format!("{:x}", hasher.finalize())
}
