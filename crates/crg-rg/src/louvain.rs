use std::collections::BTreeMap;

use crg_core::errors::{CrgError, ErrorInfo};
use crg_core::rng::RngHandle;
use crg_core::{CommunityDetector, Network, Partition};
use rand::seq::SliceRandom;
use tracing::debug;

use crate::params::LouvainOpts;
use crate::weighted::{relabel, WeightedGraph};

// bound on local-moving sweeps per level; every counted move strictly raises modularity
const MAX_SWEEPS: usize = 1_000;

/// Seeded multi-level Louvain modularity optimiser.
#[derive(Debug, Clone, Default)]
pub struct Louvain {
    opts: LouvainOpts,
}

impl Louvain {
    /// Creates a detector with the provided options.
    pub fn new(opts: LouvainOpts) -> Self {
        Self { opts }
    }

    /// Creates a detector with default options and the given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(LouvainOpts::seeded(seed))
    }

    /// Options used by this detector.
    pub fn opts(&self) -> &LouvainOpts {
        &self.opts
    }
}

impl CommunityDetector for Louvain {
    fn name(&self) -> &str {
        "louvain"
    }

    fn detect(&self, graph: &dyn Network) -> Result<Partition, CrgError> {
        louvain_partition(graph, &self.opts)
    }
}

/// Runs Louvain on `graph`.
///
/// Each level visits nodes in an order shuffled by the level's RNG substream,
/// moves every node to the neighbouring community with the largest positive
/// modularity gain until no node moves, and then aggregates communities into
/// weighted supernodes. Stops when a level moves nothing or gains at most
/// `opts.threshold` modularity. Fails on graphs without edges, where
/// modularity is undefined.
pub fn louvain_partition(graph: &dyn Network, opts: &LouvainOpts) -> Result<Partition, CrgError> {
    opts.validate()?;
    let n = graph.node_count();
    let mut level = WeightedGraph::from_network(graph);
    let m = level.total_weight();
    if m <= 0.0 {
        return Err(CrgError::Community(
            ErrorInfo::new("no-edges", "modularity is undefined on a graph without edges")
                .with_context("nodes", n.to_string()),
        ));
    }

    let mut membership: Vec<usize> = (0..n).collect();
    let mut modularity = level.modularity(&membership, m, opts.resolution);
    for depth in 0..opts.max_levels {
        let mut rng = RngHandle::substream(opts.seed, depth as u64);
        let (labels, count, moved) = one_level(&level, m, opts.resolution, &mut rng);
        if !moved {
            break;
        }
        for label in membership.iter_mut() {
            *label = labels[*label];
        }
        let next = level.modularity(&labels, m, opts.resolution);
        debug!(
            depth,
            communities = count,
            modularity = next,
            "louvain level complete"
        );
        if next - modularity <= opts.threshold {
            break;
        }
        modularity = next;
        level = level.aggregate(&labels, count);
    }

    Ok(Partition::from_labels(&membership))
}

fn one_level(
    graph: &WeightedGraph,
    m: f64,
    resolution: f64,
    rng: &mut RngHandle,
) -> (Vec<usize>, usize, bool) {
    let n = graph.len();
    let degrees = graph.degrees();
    let mut node2com: Vec<usize> = (0..n).collect();
    let mut totals = degrees.clone();
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);

    let mut moved = false;
    for _ in 0..MAX_SWEEPS {
        let mut moves = 0usize;
        for &node in &order {
            let current = node2com[node];
            let degree = degrees[node];
            let mut weights2com: BTreeMap<usize, f64> = BTreeMap::new();
            for &(other, w) in graph.neighbours(node) {
                *weights2com.entry(node2com[other]).or_default() += w;
            }

            totals[current] -= degree;
            let scale = resolution * degree / (2.0 * m * m);
            let remove_cost =
                -weights2com.get(&current).copied().unwrap_or(0.0) / m + scale * totals[current];
            let mut best = current;
            let mut best_gain = 0.0;
            for (&community, &weight) in &weights2com {
                let gain = remove_cost + weight / m - scale * totals[community];
                if gain > best_gain {
                    best_gain = gain;
                    best = community;
                }
            }
            totals[best] += degree;

            if best != current {
                node2com[node] = best;
                moves += 1;
            }
        }
        if moves == 0 {
            break;
        }
        moved = true;
    }

    let (labels, count) = relabel(&node2com);
    (labels, count, moved)
}
