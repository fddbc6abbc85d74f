use crg_core::errors::{CrgError, ErrorInfo};
use crg_core::{CommunityDetector, Network, Partition};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::greedy::GreedyModularity;
use crate::louvain::Louvain;

/// Which route produced the graph of a coarse-graining step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PartitionStrategy {
    /// The graph was already at or below the target and was copied unchanged.
    Identity,
    /// The primary detector partitioned the graph.
    Primary,
    /// The primary detector failed and the fallback partitioned the graph.
    Fallback,
}

/// Two ranked community detectors: the fallback runs only when the primary fails.
///
/// The default chain is seeded Louvain followed by greedy modularity. The
/// fallback need not honour the primary's seed, so reports record which of
/// the two produced every step.
pub struct FallbackChain {
    primary: Box<dyn CommunityDetector>,
    fallback: Box<dyn CommunityDetector>,
}

impl FallbackChain {
    /// Creates a chain from two arbitrary detectors.
    pub fn new(primary: Box<dyn CommunityDetector>, fallback: Box<dyn CommunityDetector>) -> Self {
        Self { primary, fallback }
    }

    /// Louvain seeded with `seed`, falling back to greedy modularity.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(
            Box::new(Louvain::seeded(seed)),
            Box::new(GreedyModularity::default()),
        )
    }

    /// Name of the primary detector.
    pub fn primary_name(&self) -> &str {
        self.primary.name()
    }

    /// Name of the fallback detector.
    pub fn fallback_name(&self) -> &str {
        self.fallback.name()
    }

    /// Partitions `graph`, reporting which detector succeeded.
    pub fn partition(
        &self,
        graph: &dyn Network,
    ) -> Result<(Partition, PartitionStrategy), CrgError> {
        let primary_err = match self.primary.detect(graph) {
            Ok(partition) => return Ok((partition, PartitionStrategy::Primary)),
            Err(err) => err,
        };
        warn!(
            primary = self.primary.name(),
            fallback = self.fallback.name(),
            error = %primary_err,
            "primary community detection failed; using fallback"
        );
        match self.fallback.detect(graph) {
            Ok(partition) => Ok((partition, PartitionStrategy::Fallback)),
            Err(fallback_err) => Err(CrgError::Community(
                ErrorInfo::new(
                    "detectors-exhausted",
                    "primary and fallback community detection both failed",
                )
                .with_context("primary", self.primary.name())
                .with_context("primary_error", primary_err.to_string())
                .with_context("fallback", self.fallback.name())
                .with_context("fallback_error", fallback_err.to_string()),
            )),
        }
    }
}

impl Default for FallbackChain {
    fn default() -> Self {
        Self::from_seed(42)
    }
}

impl std::fmt::Debug for FallbackChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackChain")
            .field("primary", &self.primary.name())
            .field("fallback", &self.fallback.name())
            .finish()
    }
}

impl CommunityDetector for FallbackChain {
    fn name(&self) -> &str {
        "fallback-chain"
    }

    fn detect(&self, graph: &dyn Network) -> Result<Partition, CrgError> {
        self.partition(graph).map(|(partition, _)| partition)
    }
}
