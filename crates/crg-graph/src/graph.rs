use std::collections::BTreeSet;

use crg_core::{
    errors::{CrgError, ErrorInfo},
    Network, NodeId,
};

/// Undirected, unweighted graph over dense node identifiers.
///
/// Parallel edges collapse into one. Self-loops are kept and count once
/// towards the degree of their node, matching the adjacency diagonal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimpleGraph {
    adjacency: Vec<BTreeSet<usize>>,
    edge_count: usize,
}

impl SimpleGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph with `node_count` isolated nodes.
    pub fn with_nodes(node_count: usize) -> Self {
        Self {
            adjacency: vec![BTreeSet::new(); node_count],
            edge_count: 0,
        }
    }

    /// Builds a graph from an edge list over nodes `0..node_count`.
    pub fn from_edges(node_count: usize, edges: &[(usize, usize)]) -> Result<Self, CrgError> {
        let mut graph = Self::with_nodes(node_count);
        for &(u, v) in edges {
            graph.add_edge(NodeId::from_index(u), NodeId::from_index(v))?;
        }
        Ok(graph)
    }

    /// Appends a new isolated node and returns its identifier.
    pub fn add_node(&mut self) -> NodeId {
        self.adjacency.push(BTreeSet::new());
        NodeId::from_index(self.adjacency.len() - 1)
    }

    /// Inserts the undirected edge `{u, v}`.
    ///
    /// Returns `false` when the edge was already present.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId) -> Result<bool, CrgError> {
        self.check(u)?;
        self.check(v)?;
        let inserted = self.adjacency[u.index()].insert(v.index());
        if inserted {
            self.adjacency[v.index()].insert(u.index());
            self.edge_count += 1;
        }
        Ok(inserted)
    }

    /// Whether `{u, v}` is an edge.
    pub fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        self.adjacency
            .get(u.index())
            .is_some_and(|row| row.contains(&v.index()))
    }

    /// Degree of `node`; a self-loop counts once.
    pub fn degree(&self, node: NodeId) -> Result<usize, CrgError> {
        self.check(node)?;
        Ok(self.adjacency[node.index()].len())
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    fn check(&self, node: NodeId) -> Result<(), CrgError> {
        if node.index() < self.adjacency.len() {
            Ok(())
        } else {
            Err(CrgError::Graph(
                ErrorInfo::new("unknown-node", "node does not exist")
                    .with_context("node", node.as_raw().to_string())
                    .with_context("node_count", self.adjacency.len().to_string()),
            ))
        }
    }
}

impl Network for SimpleGraph {
    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn neighbours(&self, node: NodeId) -> Result<Vec<NodeId>, CrgError> {
        self.check(node)?;
        Ok(self.adjacency[node.index()]
            .iter()
            .copied()
            .map(NodeId::from_index)
            .collect())
    }

    fn edge_list(&self) -> Vec<(NodeId, NodeId)> {
        let mut edges = Vec::with_capacity(self.edge_count);
        for (u, row) in self.adjacency.iter().enumerate() {
            for &v in row.range(u..) {
                edges.push((NodeId::from_index(u), NodeId::from_index(v)));
            }
        }
        edges
    }
}
