use crg_core::errors::{CrgError, ErrorInfo};
use crg_core::rng::RngHandle;
use crg_core::{Network, NodeId};
use rand::Rng;

use crate::graph::SimpleGraph;

/// Path (chain) graph `0 - 1 - ... - (n-1)`.
pub fn path_graph(n_nodes: usize) -> SimpleGraph {
    let edges: Vec<(usize, usize)> = (1..n_nodes).map(|v| (v - 1, v)).collect();
    from_trusted_edges(n_nodes, &edges)
}

/// Cycle graph; fewer than three nodes degrade to a path.
pub fn cycle_graph(n_nodes: usize) -> SimpleGraph {
    let mut graph = path_graph(n_nodes);
    if n_nodes >= 3 {
        link(&mut graph, n_nodes - 1, 0);
    }
    graph
}

/// Star graph with node `0` as hub and `n_leaves` leaves.
pub fn star_graph(n_leaves: usize) -> SimpleGraph {
    let edges: Vec<(usize, usize)> = (1..=n_leaves).map(|leaf| (0, leaf)).collect();
    from_trusted_edges(n_leaves + 1, &edges)
}

/// Complete simple graph on `n_nodes` nodes.
pub fn complete_graph(n_nodes: usize) -> SimpleGraph {
    let mut edges = Vec::new();
    for u in 0..n_nodes {
        for v in (u + 1)..n_nodes {
            edges.push((u, v));
        }
    }
    from_trusted_edges(n_nodes, &edges)
}

/// Complete graph with an additional self-loop on every node.
pub fn complete_graph_with_loops(n_nodes: usize) -> SimpleGraph {
    let mut graph = complete_graph(n_nodes);
    for node in 0..n_nodes {
        link(&mut graph, node, node);
    }
    graph
}

/// Ring of `n_cliques` complete graphs of `clique_size` nodes.
///
/// Clique `i` occupies nodes `i * clique_size ..`; consecutive cliques are
/// joined by one edge from the last node of one to the first node of the next.
pub fn ring_of_cliques(n_cliques: usize, clique_size: usize) -> Result<SimpleGraph, CrgError> {
    if n_cliques < 2 || clique_size < 2 {
        return Err(CrgError::Graph(
            ErrorInfo::new(
                "ring-of-cliques-too-small",
                "ring of cliques requires at least two cliques of two nodes",
            )
            .with_context("n_cliques", n_cliques.to_string())
            .with_context("clique_size", clique_size.to_string()),
        ));
    }
    let mut graph = SimpleGraph::with_nodes(n_cliques * clique_size);
    for clique in 0..n_cliques {
        let base = clique * clique_size;
        for u in 0..clique_size {
            for v in (u + 1)..clique_size {
                link(&mut graph, base + u, base + v);
            }
        }
        let next = ((clique + 1) % n_cliques) * clique_size;
        link(&mut graph, base + clique_size - 1, next);
    }
    Ok(graph)
}

/// Barabási–Albert preferential attachment graph.
///
/// Starts from a star on `m + 1` nodes; every further node attaches to `m`
/// distinct existing nodes drawn proportionally to degree.
pub fn barabasi_albert(
    n_nodes: usize,
    m: usize,
    rng: &mut RngHandle,
) -> Result<SimpleGraph, CrgError> {
    if m == 0 || m >= n_nodes {
        return Err(CrgError::Graph(
            ErrorInfo::new(
                "invalid-attachment",
                "preferential attachment requires 1 <= m < n_nodes",
            )
            .with_context("m", m.to_string())
            .with_context("n_nodes", n_nodes.to_string()),
        ));
    }
    let mut graph = star_graph(m);
    graph = extend_to(graph, n_nodes);

    let mut repeated: Vec<usize> = Vec::new();
    for leaf in 1..=m {
        repeated.extend([0, leaf]);
    }
    for source in (m + 1)..n_nodes {
        let mut targets: Vec<usize> = Vec::with_capacity(m);
        while targets.len() < m {
            let candidate = repeated[rng.gen_range(0..repeated.len())];
            if !targets.contains(&candidate) {
                targets.push(candidate);
            }
        }
        for &target in &targets {
            link(&mut graph, source, target);
            repeated.extend([source, target]);
        }
    }
    Ok(graph)
}

/// Erdős–Rényi `G(n, p)` graph.
pub fn erdos_renyi(
    n_nodes: usize,
    probability: f64,
    rng: &mut RngHandle,
) -> Result<SimpleGraph, CrgError> {
    if !(0.0..=1.0).contains(&probability) {
        return Err(CrgError::Graph(
            ErrorInfo::new("invalid-probability", "edge probability must lie in [0, 1]")
                .with_context("probability", probability.to_string()),
        ));
    }
    let mut graph = SimpleGraph::with_nodes(n_nodes);
    for u in 0..n_nodes {
        for v in (u + 1)..n_nodes {
            if rng.gen_bool(probability) {
                link(&mut graph, u, v);
            }
        }
    }
    Ok(graph)
}

fn extend_to(mut graph: SimpleGraph, n_nodes: usize) -> SimpleGraph {
    while graph.node_count() < n_nodes {
        graph.add_node();
    }
    graph
}

fn from_trusted_edges(n_nodes: usize, edges: &[(usize, usize)]) -> SimpleGraph {
    let mut graph = SimpleGraph::with_nodes(n_nodes);
    for &(u, v) in edges {
        link(&mut graph, u, v);
    }
    graph
}

// endpoints are produced by the generators themselves and always exist
fn link(graph: &mut SimpleGraph, u: usize, v: usize) {
    let _ = graph.add_edge(NodeId::from_index(u), NodeId::from_index(v));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_families_have_expected_sizes() {
        assert_eq!(path_graph(5).edge_count(), 4);
        assert_eq!(cycle_graph(6).edge_count(), 6);
        assert_eq!(star_graph(4).node_count(), 5);
        assert_eq!(complete_graph(6).edge_count(), 15);
        assert_eq!(complete_graph_with_loops(4).edge_count(), 10);
    }

    #[test]
    fn ring_of_cliques_links_neighbouring_cliques() {
        let graph = ring_of_cliques(4, 3).unwrap();
        assert_eq!(graph.node_count(), 12);
        assert_eq!(graph.edge_count(), 4 * 3 + 4);
        assert!(graph.has_edge(NodeId::from_index(2), NodeId::from_index(3)));
        assert!(graph.has_edge(NodeId::from_index(11), NodeId::from_index(0)));
    }

    #[test]
    fn barabasi_albert_is_reproducible() {
        let a = barabasi_albert(50, 3, &mut RngHandle::from_seed(42)).unwrap();
        let b = barabasi_albert(50, 3, &mut RngHandle::from_seed(42)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.edge_count(), 3 + 3 * (50 - 4));
        for node in a.nodes() {
            assert!(a.degree(node).unwrap() >= 1);
        }
    }

    #[test]
    fn invalid_generator_arguments_are_rejected() {
        let mut rng = RngHandle::from_seed(1);
        assert!(barabasi_albert(3, 3, &mut rng).is_err());
        assert!(erdos_renyi(3, 1.5, &mut rng).is_err());
        assert!(ring_of_cliques(1, 5).is_err());
    }
}
