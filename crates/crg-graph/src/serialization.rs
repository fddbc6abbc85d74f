use crg_core::errors::{CrgError, ErrorInfo};
use crg_core::provenance::SchemaVersion;
use crg_core::{Network, NodeId};
use serde::{Deserialize, Serialize};

use crate::graph::SimpleGraph;

const GRAPH_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);
/// Largest node count accepted from a serialized payload.
pub const MAX_SERIALIZED_NODES: u64 = 1 << 24;

/// Serializes the graph to a compact binary representation using `bincode`.
pub fn graph_to_bytes(graph: &SimpleGraph) -> Result<Vec<u8>, CrgError> {
    let serializable = SerializableGraph::from_graph(graph);
    bincode::serialize(&serializable)
        .map_err(|err| CrgError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores a graph from its binary representation.
pub fn graph_from_bytes(bytes: &[u8]) -> Result<SimpleGraph, CrgError> {
    let serializable: SerializableGraph = bincode::deserialize(bytes)
        .map_err(|err| CrgError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    serializable.into_graph()
}

/// Serializes the graph to a JSON string.
pub fn graph_to_json(graph: &SimpleGraph) -> Result<String, CrgError> {
    let serializable = SerializableGraph::from_graph(graph);
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| CrgError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a graph from a JSON string.
pub fn graph_from_json(json: &str) -> Result<SimpleGraph, CrgError> {
    let serializable: SerializableGraph = serde_json::from_str(json)
        .map_err(|err| CrgError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    serializable.into_graph()
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableGraph {
    schema_version: SchemaVersion,
    node_count: u64,
    edges: Vec<(u64, u64)>,
}

impl SerializableGraph {
    fn from_graph(graph: &SimpleGraph) -> Self {
        Self {
            schema_version: GRAPH_SCHEMA,
            node_count: graph.node_count() as u64,
            edges: graph
                .edge_list()
                .into_iter()
                .map(|(u, v)| (u.as_raw(), v.as_raw()))
                .collect(),
        }
    }

    fn into_graph(self) -> Result<SimpleGraph, CrgError> {
        if self.schema_version.major != GRAPH_SCHEMA.major {
            return Err(CrgError::Serde(
                ErrorInfo::new("schema-mismatch", "unsupported graph schema version")
                    .with_context("found", format!("{:?}", self.schema_version))
                    .with_context("expected", format!("{GRAPH_SCHEMA:?}")),
            ));
        }
        let node_count = usize::try_from(self.node_count)
            .ok()
            .filter(|_| self.node_count <= MAX_SERIALIZED_NODES)
            .ok_or_else(|| {
                CrgError::Serde(
                    ErrorInfo::new("invalid-node-count", "serialized node count is out of range")
                        .with_context("node_count", self.node_count.to_string())
                        .with_context("max", MAX_SERIALIZED_NODES.to_string()),
                )
            })?;
        let mut graph = SimpleGraph::with_nodes(node_count);
        for (u, v) in self.edges {
            graph.add_edge(NodeId::from_raw(u), NodeId::from_raw(v))?;
        }
        Ok(graph)
    }
}
