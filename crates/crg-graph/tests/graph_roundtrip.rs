use crg_core::errors::CrgError;
use crg_core::{Network, NodeId};
use crg_graph::{
    canonical_hash, graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json,
    ring_of_cliques, SimpleGraph, MAX_SERIALIZED_NODES,
};

#[test]
fn json_and_bytes_preserve_structure() {
    let mut graph = ring_of_cliques(3, 4).unwrap();
    let extra = graph.add_node();
    graph.add_edge(extra, extra).unwrap();

    let hash_before = canonical_hash(&graph);
    let restored = graph_from_json(&graph_to_json(&graph).unwrap()).unwrap();
    assert_eq!(canonical_hash(&restored), hash_before);
    assert_eq!(restored, graph);

    let restored = graph_from_bytes(&graph_to_bytes(&graph).unwrap()).unwrap();
    assert_eq!(restored.node_count(), 13);
    assert_eq!(restored.edge_count(), graph.edge_count());
    assert!(restored.has_edge(extra, extra));
}

#[test]
fn hash_distinguishes_isolated_nodes() {
    let a = SimpleGraph::from_edges(3, &[(0, 1)]).unwrap();
    let b = SimpleGraph::from_edges(4, &[(0, 1)]).unwrap();
    assert_ne!(canonical_hash(&a), canonical_hash(&b));
}

#[test]
fn json_with_dangling_edge_is_rejected() {
    let json = r#"{
        "schema_version": {"major": 1, "minor": 0, "patch": 0},
        "node_count": 2,
        "edges": [[0, 5]]
    }"#;
    match graph_from_json(json).unwrap_err() {
        CrgError::Graph(info) => {
            assert_eq!(info.code, "unknown-node");
            assert_eq!(info.context.get("node"), Some(&"5".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn json_with_future_schema_is_rejected() {
    let json = r#"{
        "schema_version": {"major": 9, "minor": 0, "patch": 0},
        "node_count": 1,
        "edges": []
    }"#;
    let err = graph_from_json(json).unwrap_err();
    assert!(matches!(err, CrgError::Serde(ref info) if info.code == "schema-mismatch"));
}

#[test]
fn neighbours_are_sorted() {
    let graph = SimpleGraph::from_edges(4, &[(0, 3), (0, 1), (0, 2)]).unwrap();
    let neighbours = graph.neighbours(NodeId::from_index(0)).unwrap();
    assert_eq!(
        neighbours,
        vec![
            NodeId::from_index(1),
            NodeId::from_index(2),
            NodeId::from_index(3)
        ]
    );
}

#[test]
fn oversized_node_count_is_rejected() {
    let json = r#"{
        "schema_version": {"major": 1, "minor": 0, "patch": 0},
        "node_count": 18446744073709551615,
        "edges": []
    }"#;
    match graph_from_json(json).unwrap_err() {
        CrgError::Serde(info) => {
            assert_eq!(info.code, "invalid-node-count");
            assert_eq!(
                info.context.get("node_count").map(String::as_str),
                Some("18446744073709551615")
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn oversized_node_count_in_bytes_is_rejected() {
    let mut bytes = graph_to_bytes(&SimpleGraph::with_nodes(2)).unwrap();
    // bincode layout: three u32 schema fields, then the u64 node count
    bytes[12..20].copy_from_slice(&(MAX_SERIALIZED_NODES + 1).to_le_bytes());
    let err = graph_from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, CrgError::Serde(ref info) if info.code == "invalid-node-count"));
}
