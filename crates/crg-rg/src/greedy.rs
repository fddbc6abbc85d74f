use std::collections::BTreeMap;

use crg_core::errors::CrgError;
use crg_core::{CommunityDetector, Network, Partition};

use crate::weighted::WeightedGraph;

/// Clauset–Newman–Moore greedy modularity agglomeration.
///
/// Deterministic: ties are broken towards the lowest community indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreedyModularity {
    resolution: f64,
}

impl Default for GreedyModularity {
    fn default() -> Self {
        Self { resolution: 1.0 }
    }
}

impl GreedyModularity {
    /// Creates a detector with a custom modularity resolution.
    pub fn with_resolution(resolution: f64) -> Self {
        Self { resolution }
    }
}

impl CommunityDetector for GreedyModularity {
    fn name(&self) -> &str {
        "greedy-modularity"
    }

    fn detect(&self, graph: &dyn Network) -> Result<Partition, CrgError> {
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(CrgError::input(
                "invalid-resolution",
                "resolution must be finite and positive",
            ));
        }
        Ok(greedy_modularity_partition(graph, self.resolution))
    }
}

/// Starts from singletons and repeatedly merges the adjacent pair of
/// communities with the largest modularity gain while that gain is positive.
/// Graphs without edges stay as singletons.
pub fn greedy_modularity_partition(graph: &dyn Network, resolution: f64) -> Partition {
    let n = graph.node_count();
    let weighted = WeightedGraph::from_network(graph);
    let m = weighted.total_weight();
    if m <= 0.0 {
        return Partition::singletons(n);
    }

    let two_m = 2.0 * m;
    let mut a: Vec<f64> = weighted.degrees().into_iter().map(|k| k / two_m).collect();
    let mut e: Vec<BTreeMap<usize, f64>> = (0..n)
        .map(|node| {
            let mut row = BTreeMap::new();
            for &(other, w) in weighted.neighbours(node) {
                *row.entry(other).or_default() += w / two_m;
            }
            row
        })
        .collect();
    let mut members: Vec<Vec<usize>> = (0..n).map(|node| vec![node]).collect();
    let mut alive = vec![true; n];

    loop {
        let mut best: Option<(usize, usize, f64)> = None;
        for i in 0..n {
            if !alive[i] {
                continue;
            }
            for (&j, &e_ij) in e[i].range(i + 1..) {
                let gain = 2.0 * (e_ij - resolution * a[i] * a[j]);
                if best.map_or(true, |(_, _, top)| gain > top) {
                    best = Some((i, j, gain));
                }
            }
        }
        let Some((i, j, gain)) = best else {
            break;
        };
        if gain <= 0.0 {
            break;
        }

        // merge j into i
        let row_j = std::mem::take(&mut e[j]);
        for (k, e_jk) in row_j {
            if k == i {
                continue;
            }
            *e[i].entry(k).or_default() += e_jk;
            let row_k = &mut e[k];
            row_k.remove(&j);
            *row_k.entry(i).or_default() += e_jk;
        }
        e[i].remove(&j);
        a[i] += a[j];
        a[j] = 0.0;
        alive[j] = false;
        let moved = std::mem::take(&mut members[j]);
        members[i].extend(moved);
    }

    let mut labels = vec![0usize; n];
    for (label, group) in members.iter().enumerate() {
        for &node in group {
            labels[node] = label;
        }
    }
    Partition::from_labels(&labels)
}
