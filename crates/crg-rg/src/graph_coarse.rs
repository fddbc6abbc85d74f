use crg_core::errors::{CrgError, ErrorInfo};
use crg_core::Network;
use crg_graph::{quotient_graph, SimpleGraph};

use crate::chain::{FallbackChain, PartitionStrategy};

/// Result of coarsening a graph towards a target node count.
#[derive(Debug, Clone)]
pub struct CoarseStep {
    /// The coarse grained graph.
    pub graph: SimpleGraph,
    /// Route that produced [`CoarseStep::graph`].
    pub strategy: PartitionStrategy,
}

/// Coarse grains `graph` with the default Louvain/greedy chain.
pub fn coarse_grain(graph: &SimpleGraph, target_nodes: usize) -> Result<SimpleGraph, CrgError> {
    Ok(coarse_grain_with(graph, target_nodes, &FallbackChain::default())?.graph)
}

/// Contracts the communities found by `chain` into supernodes.
///
/// `target_nodes` is a ceiling: a graph already at or below it is returned as
/// an unchanged copy. Otherwise the node count of the result is whatever the
/// detected partition yields, which may land above or below the target.
pub fn coarse_grain_with(
    graph: &SimpleGraph,
    target_nodes: usize,
    chain: &FallbackChain,
) -> Result<CoarseStep, CrgError> {
    if target_nodes == 0 {
        return Err(CrgError::Input(
            ErrorInfo::new("invalid-target", "target node count must be positive")
                .with_context("nodes", graph.node_count().to_string()),
        ));
    }
    if graph.node_count() <= target_nodes {
        return Ok(CoarseStep {
            graph: graph.clone(),
            strategy: PartitionStrategy::Identity,
        });
    }

    let (partition, strategy) = chain.partition(graph)?;
    let coarse = quotient_graph(graph, &partition)?;
    Ok(CoarseStep {
        graph: coarse,
        strategy,
    })
}
