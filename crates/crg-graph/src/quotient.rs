use crg_core::errors::{CrgError, ErrorInfo};
use crg_core::{Network, NodeId, Partition};

use crate::graph::SimpleGraph;

/// Contracts every community of `partition` into one supernode.
///
/// Supernode `i` stands for `partition.communities()[i]`. Two supernodes are
/// adjacent iff some edge of `graph` joins their members; edges inside a
/// community vanish, so the quotient never carries self-loops.
pub fn quotient_graph(graph: &dyn Network, partition: &Partition) -> Result<SimpleGraph, CrgError> {
    let labels = partition.labels();
    if labels.len() != graph.node_count() {
        return Err(CrgError::Graph(
            ErrorInfo::new(
                "partition-size-mismatch",
                "partition does not cover the graph being contracted",
            )
            .with_context("partition_nodes", labels.len().to_string())
            .with_context("graph_nodes", graph.node_count().to_string()),
        ));
    }

    let mut coarse = SimpleGraph::with_nodes(partition.len());
    for (u, v) in graph.edge_list() {
        let (Some(&cu), Some(&cv)) = (labels.get(u.index()), labels.get(v.index())) else {
            return Err(CrgError::Graph(
                ErrorInfo::new("unknown-node", "edge endpoint lies outside the partition")
                    .with_context("edge", format!("({}, {})", u.as_raw(), v.as_raw()))
                    .with_context("partition_nodes", labels.len().to_string()),
            ));
        };
        if cu != cv {
            coarse.add_edge(NodeId::from_index(cu), NodeId::from_index(cv))?;
        }
    }
    Ok(coarse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_collapses_into_pairs() {
        let path = SimpleGraph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]).unwrap();
        let partition = Partition::from_labels(&[0, 0, 1, 1, 2]);
        let coarse = quotient_graph(&path, &partition).unwrap();
        assert_eq!(coarse.node_count(), 3);
        assert_eq!(
            coarse.edge_list(),
            vec![
                (NodeId::from_index(0), NodeId::from_index(1)),
                (NodeId::from_index(1), NodeId::from_index(2)),
            ]
        );
    }

    #[test]
    fn mismatched_partition_is_rejected() {
        let graph = SimpleGraph::with_nodes(3);
        let err = quotient_graph(&graph, &Partition::singletons(2)).unwrap_err();
        assert_eq!(err.info().code, "partition-size-mismatch");
    }

    // Reports two nodes but lists an edge to node 7.
    struct DanglingEdge;

    impl Network for DanglingEdge {
        fn node_count(&self) -> usize {
            2
        }

        fn edge_count(&self) -> usize {
            1
        }

        fn neighbours(&self, _node: NodeId) -> Result<Vec<NodeId>, CrgError> {
            Ok(Vec::new())
        }

        fn edge_list(&self) -> Vec<(NodeId, NodeId)> {
            vec![(NodeId::from_index(0), NodeId::from_index(7))]
        }
    }

    #[test]
    fn dangling_edge_is_an_error() {
        let err = quotient_graph(&DanglingEdge, &Partition::singletons(2)).unwrap_err();
        assert!(matches!(err, CrgError::Graph(ref info) if info.code == "unknown-node"));
    }
}
