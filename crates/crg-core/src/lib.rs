#![deny(missing_docs)]
#![doc = "Core traits and data types for the causal renormalization flow engine."]

use std::iter::ExactSizeIterator;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

pub mod errors;
mod partition;
pub mod provenance;
pub mod rng;

pub use errors::{CrgError, ErrorInfo};
pub use partition::Partition;
pub use provenance::{RunProvenance, SchemaVersion};
pub use rng::{derive_substream_seed, RngHandle};

/// Identifier for a node within a [`Network`].
///
/// Nodes are dense: a network with `n` nodes uses identifiers `0..n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates a new identifier from its raw integer representation.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub fn as_raw(&self) -> u64 {
        self.0
    }

    /// Creates an identifier from a dense row/column index.
    pub fn from_index(index: usize) -> Self {
        Self(index as u64)
    }

    /// Returns the dense row/column index of the identifier.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Structural contract for the undirected, unweighted graphs analysed by CRG.
pub trait Network: Send + Sync {
    /// Number of nodes.
    fn node_count(&self) -> usize;

    /// Number of undirected edges, self-loops included.
    fn edge_count(&self) -> usize;

    /// Returns the sorted neighbours of `node` (the node itself if it carries a loop).
    fn neighbours(&self, node: NodeId) -> Result<Vec<NodeId>, CrgError>;

    /// Returns every edge once as `(u, v)` with `u <= v`, sorted.
    fn edge_list(&self) -> Vec<(NodeId, NodeId)>;

    /// Returns an iterator over all node identifiers.
    fn nodes(&self) -> Box<dyn ExactSizeIterator<Item = NodeId> + '_> {
        Box::new((0..self.node_count()).map(NodeId::from_index))
    }

    /// Dense symmetric 0/1 adjacency matrix; a self-loop sets its diagonal entry to 1.
    fn adjacency_matrix(&self) -> DMatrix<f64> {
        let n = self.node_count();
        let mut adjacency = DMatrix::<f64>::zeros(n, n);
        for (u, v) in self.edge_list() {
            adjacency[(u.index(), v.index())] = 1.0;
            adjacency[(v.index(), u.index())] = 1.0;
        }
        adjacency
    }
}

/// Capability that partitions a network into disjoint communities.
///
/// Implementations are ranked and chained by the coarse-graining engine, so a
/// failing detector must return an error rather than a degenerate partition.
pub trait CommunityDetector: Send + Sync {
    /// Short stable name recorded in flow reports.
    fn name(&self) -> &str;

    /// Partitions the nodes of `graph`.
    fn detect(&self, graph: &dyn Network) -> Result<Partition, CrgError>;
}
