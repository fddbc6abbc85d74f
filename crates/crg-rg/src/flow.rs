use crg_core::errors::{CrgError, ErrorInfo};
use crg_core::provenance::{RunProvenance, SchemaVersion};
use crg_core::Network;
use crg_graph::{canonical_hash, SimpleGraph};
use crg_info::effective_information_with_eps;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::chain::{FallbackChain, PartitionStrategy};
use crate::classify::{classify_flow_with_threshold, FlowClass};
use crate::graph_coarse::coarse_grain_with;
use crate::hash::{hash_opts, hash_report};
use crate::params::FlowOpts;

/// Schema of serialized [`FlowReport`]s.
pub const FLOW_REPORT_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// One scale step of a renormalization flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowRecord {
    /// Step index.
    pub index: usize,
    /// Scale factor applied during the step.
    pub scale_factor: f64,
    /// Node count requested from the coarse-graining engine.
    pub target_nodes: usize,
    /// Node count of the graph after the step.
    pub node_count: usize,
    /// Effective information of the graph after the step, in bits.
    pub ei: f64,
    /// `log10(node_count)`.
    pub log_scale: f64,
    /// Route that produced the step's graph.
    pub strategy: PartitionStrategy,
}

/// Beta sequence aligned with the effective information it starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetaFlow {
    /// `beta[i] = (ei[i+1] - ei[i]) / (log_scale[i+1] - log_scale[i])`; NaN on degenerate intervals.
    #[serde(with = "nan_as_null")]
    pub beta: Vec<f64>,
    /// Effective information of the first `k - 1` steps.
    pub ei: Vec<f64>,
    /// Indices of intervals whose two steps share a node count.
    pub degenerate_intervals: Vec<usize>,
}

/// Complete account of a renormalization flow run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowReport {
    /// Inputs the run was derived from.
    pub provenance: RunProvenance,
    /// Per-step records in scale order.
    pub records: Vec<FlowRecord>,
    /// Discrete beta function; NaN on degenerate intervals.
    #[serde(with = "nan_as_null")]
    pub beta: Vec<f64>,
    /// Effective information truncated to align with `beta`.
    pub ei: Vec<f64>,
    /// Intervals where consecutive steps produced the same node count.
    pub degenerate_intervals: Vec<usize>,
    /// Regime of the beta sequence; absent when it is empty or has degenerate intervals.
    pub classification: Option<FlowClass>,
    /// Deterministic content addressed hash of the report.
    pub run_hash: String,
}

impl FlowReport {
    /// Node count of every step.
    pub fn node_counts(&self) -> Vec<usize> {
        self.records.iter().map(|record| record.node_count).collect()
    }

    /// `(log10(node_count) per step, beta)` for external chart renderers.
    pub fn chart_series(&self) -> (Vec<f64>, Vec<f64>) {
        let scales = self.records.iter().map(|record| record.log_scale).collect();
        (scales, self.beta.clone())
    }

    /// Beta sequence and aligned effective information.
    pub fn beta_flow(&self) -> BetaFlow {
        BetaFlow {
            beta: self.beta.clone(),
            ei: self.ei.clone(),
            degenerate_intervals: self.degenerate_intervals.clone(),
        }
    }
}

/// Two-scale beta between a fine graph and a coarse graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairwiseBeta {
    /// `(ei_coarse - ei_fine) / ln(lambda_ratio)`.
    pub beta: f64,
    /// Effective information of the fine graph, in bits.
    pub ei_fine: f64,
    /// Effective information of the coarse graph, in bits.
    pub ei_coarse: f64,
}

/// Runs the flow over `scale_factors` with default options and returns beta with aligned EI.
pub fn causal_beta_flow(graph: &SimpleGraph, scale_factors: &[f64]) -> Result<BetaFlow, CrgError> {
    let opts = FlowOpts::with_scale_factors(scale_factors);
    Ok(run_flow(graph, &opts)?.beta_flow())
}

/// Runs the flow with Louvain seeded from `opts.seed` and the greedy fallback.
pub fn run_flow(graph: &SimpleGraph, opts: &FlowOpts) -> Result<FlowReport, CrgError> {
    run_flow_with(graph, opts, &FallbackChain::from_seed(opts.seed))
}

/// Runs the flow with a caller supplied detector chain.
///
/// Every step coarse grains the previous step's graph towards
/// `max(min_nodes, floor(node_count / factor))` nodes and measures its
/// effective information. Consecutive steps with equal node counts leave a NaN
/// beta whose index is listed in `degenerate_intervals`.
pub fn run_flow_with(
    graph: &SimpleGraph,
    opts: &FlowOpts,
    chain: &FallbackChain,
) -> Result<FlowReport, CrgError> {
    opts.validate()?;
    if graph.is_empty() {
        return Err(CrgError::input(
            "empty-graph",
            "renormalization flow requires at least one node",
        ));
    }

    let provenance = RunProvenance {
        schema_version: FLOW_REPORT_SCHEMA,
        input_hash: hash_opts(opts)?,
        graph_hash: canonical_hash(graph),
        seed: opts.seed,
        tool_versions: [(
            env!("CARGO_PKG_NAME").to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        )]
        .into_iter()
        .collect(),
    };

    let mut current = graph.clone();
    let mut records = Vec::with_capacity(opts.scale_factors.len());
    for (index, &factor) in opts.scale_factors.iter().enumerate() {
        let target_nodes = step_target(current.node_count(), factor, opts.min_nodes);
        let step = coarse_grain_with(&current, target_nodes, chain)?;
        current = step.graph;
        let node_count = current.node_count();
        let ei = effective_information_with_eps(&current, opts.eps)?;
        debug!(
            index,
            factor,
            target_nodes,
            node_count,
            ei,
            strategy = ?step.strategy,
            "flow step"
        );
        records.push(FlowRecord {
            index,
            scale_factor: factor,
            target_nodes,
            node_count,
            ei,
            log_scale: (node_count as f64).log10(),
            strategy: step.strategy,
        });
    }

    let (beta, degenerate_intervals) = discrete_beta(&records);
    for &interval in &degenerate_intervals {
        warn!(
            interval,
            node_count = records[interval].node_count,
            "zero-length log-scale interval; beta set to NaN"
        );
    }
    let ei: Vec<f64> = records
        .iter()
        .take(records.len() - 1)
        .map(|record| record.ei)
        .collect();
    let classification = if beta.is_empty() || !degenerate_intervals.is_empty() {
        None
    } else {
        Some(classify_flow_with_threshold(&beta, opts.threshold)?)
    };

    let mut report = FlowReport {
        provenance,
        records,
        beta,
        ei,
        degenerate_intervals,
        classification,
        run_hash: String::new(),
    };
    report.run_hash = hash_report(&report)?;
    info!(
        steps = report.records.len(),
        degenerate = report.degenerate_intervals.len(),
        classification = report.classification.map(|class| class.label()),
        "renormalization flow complete"
    );
    Ok(report)
}

/// Beta between two graphs whose length scales differ by `lambda_ratio`.
pub fn pairwise_beta(
    fine: &SimpleGraph,
    coarse: &SimpleGraph,
    lambda_ratio: f64,
) -> Result<PairwiseBeta, CrgError> {
    if !lambda_ratio.is_finite() || lambda_ratio <= 0.0 || lambda_ratio == 1.0 {
        return Err(CrgError::Input(
            ErrorInfo::new(
                "invalid-lambda-ratio",
                "scale ratio must be finite, positive and different from one",
            )
            .with_context("lambda_ratio", lambda_ratio.to_string()),
        ));
    }
    let ei_fine = crg_info::effective_information(fine)?;
    let ei_coarse = crg_info::effective_information(coarse)?;
    Ok(PairwiseBeta {
        beta: (ei_coarse - ei_fine) / lambda_ratio.ln(),
        ei_fine,
        ei_coarse,
    })
}

fn step_target(node_count: usize, factor: f64, min_nodes: usize) -> usize {
    // float-to-int casts saturate, so huge quotients clamp to usize::MAX
    let scaled = (node_count as f64 / factor).floor() as usize;
    scaled.max(min_nodes)
}

fn discrete_beta(records: &[FlowRecord]) -> (Vec<f64>, Vec<usize>) {
    let mut beta = Vec::with_capacity(records.len().saturating_sub(1));
    let mut degenerate = Vec::new();
    for (interval, pair) in records.windows(2).enumerate() {
        let d_scale = pair[1].log_scale - pair[0].log_scale;
        if d_scale == 0.0 {
            beta.push(f64::NAN);
            degenerate.push(interval);
        } else {
            beta.push((pair[1].ei - pair[0].ei) / d_scale);
        }
    }
    (beta, degenerate)
}

mod nan_as_null {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
        let values: Vec<Option<f64>> = values
            .iter()
            .map(|value| (!value.is_nan()).then_some(*value))
            .collect();
        values.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        let values: Vec<Option<f64>> = Vec::deserialize(deserializer)?;
        Ok(values
            .into_iter()
            .map(|value| value.unwrap_or(f64::NAN))
            .collect())
    }
}
