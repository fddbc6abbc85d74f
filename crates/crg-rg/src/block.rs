use crg_core::errors::{CrgError, ErrorInfo};
use crg_core::{CommunityDetector, Network, Partition};

/// Groups consecutive node identifiers into fixed-size blocks.
///
/// Node `i` lands in block `i / block_size`, which mirrors the classic
/// "collapse every k neighbouring sites" real-space renormalization step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockPartitioner {
    block_size: usize,
}

impl BlockPartitioner {
    /// Creates a partitioner producing blocks of `block_size` nodes.
    pub fn new(block_size: usize) -> Self {
        Self { block_size }
    }

    /// Configured block size.
    pub fn block_size(&self) -> usize {
        self.block_size
    }
}

impl CommunityDetector for BlockPartitioner {
    fn name(&self) -> &str {
        "block"
    }

    fn detect(&self, graph: &dyn Network) -> Result<Partition, CrgError> {
        partition_blocks(graph, self.block_size)
    }
}

/// Partitions the nodes of `graph` into consecutive blocks of `block_size`.
pub fn partition_blocks(graph: &dyn Network, block_size: usize) -> Result<Partition, CrgError> {
    if block_size == 0 {
        return Err(CrgError::Input(
            ErrorInfo::new("invalid-block-size", "block size must be at least one")
                .with_context("nodes", graph.node_count().to_string()),
        ));
    }
    let labels: Vec<usize> = (0..graph.node_count()).map(|idx| idx / block_size).collect();
    Ok(Partition::from_labels(&labels))
}
