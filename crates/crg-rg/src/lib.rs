#![deny(missing_docs)]
#![doc = "Community-based coarse graining, causal beta flows, and flow classification."]

/// Deterministic block partitioning.
pub mod block;
/// Primary/fallback community detector chains.
pub mod chain;
/// Qualitative classification of beta sequences.
pub mod classify;
/// Renormalization flow driver and reports.
pub mod flow;
/// Community contraction towards a target node count.
pub mod graph_coarse;
/// Greedy (Clauset–Newman–Moore) modularity agglomeration.
pub mod greedy;
/// Canonical hashing helpers for flow artefacts.
pub mod hash;
/// Seeded multi-level Louvain.
pub mod louvain;
/// Flow and detector option structures.
pub mod params;
/// Serde helpers for JSON artefacts.
#[path = "serde.rs"]
pub mod serde_io;
mod weighted;

pub use block::{partition_blocks, BlockPartitioner};
pub use chain::{FallbackChain, PartitionStrategy};
pub use classify::{classify_flow, classify_flow_with_threshold, FlowClass, DEFAULT_THRESHOLD};
pub use flow::{
    causal_beta_flow, pairwise_beta, run_flow, run_flow_with, BetaFlow, FlowRecord, FlowReport,
    PairwiseBeta, FLOW_REPORT_SCHEMA,
};
pub use graph_coarse::{coarse_grain, coarse_grain_with, CoarseStep};
pub use greedy::{greedy_modularity_partition, GreedyModularity};
pub use louvain::{louvain_partition, Louvain};
pub use params::{FlowOpts, LouvainOpts};
