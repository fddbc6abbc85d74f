use std::collections::BTreeMap;

use crg_core::Network;

/// Weighted undirected graph used internally by the modularity optimisers.
///
/// Off-diagonal weights are stored symmetrically; self-loop weight is kept
/// apart and counts twice towards the degree of its node.
#[derive(Debug, Clone)]
pub(crate) struct WeightedGraph {
    adjacency: Vec<Vec<(usize, f64)>>,
    loops: Vec<f64>,
}

impl WeightedGraph {
    pub(crate) fn from_network(graph: &dyn Network) -> Self {
        let n = graph.node_count();
        let mut adjacency = vec![Vec::new(); n];
        let mut loops = vec![0.0; n];
        for (u, v) in graph.edge_list() {
            let (u, v) = (u.index(), v.index());
            if u == v {
                loops[u] += 1.0;
            } else {
                adjacency[u].push((v, 1.0));
                adjacency[v].push((u, 1.0));
            }
        }
        Self { adjacency, loops }
    }

    pub(crate) fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub(crate) fn neighbours(&self, node: usize) -> &[(usize, f64)] {
        &self.adjacency[node]
    }

    /// Total edge weight `m`, loops counted once.
    pub(crate) fn total_weight(&self) -> f64 {
        let off_diagonal: f64 = self
            .adjacency
            .iter()
            .flat_map(|row| row.iter().map(|(_, w)| *w))
            .sum();
        self.loops.iter().sum::<f64>() + off_diagonal / 2.0
    }

    pub(crate) fn degrees(&self) -> Vec<f64> {
        self.adjacency
            .iter()
            .zip(&self.loops)
            .map(|(row, looped)| row.iter().map(|(_, w)| *w).sum::<f64>() + 2.0 * looped)
            .collect()
    }

    /// Newman modularity of the partition given by `labels` (one per node).
    pub(crate) fn modularity(&self, labels: &[usize], m: f64, resolution: f64) -> f64 {
        if m <= 0.0 {
            return 0.0;
        }
        let mut internal: BTreeMap<usize, f64> = BTreeMap::new();
        let mut totals: BTreeMap<usize, f64> = BTreeMap::new();
        let degrees = self.degrees();
        for node in 0..self.len() {
            let label = labels[node];
            let inside: f64 = self.adjacency[node]
                .iter()
                .filter(|(other, _)| labels[*other] == label)
                .map(|(_, w)| *w)
                .sum();
            *internal.entry(label).or_default() += self.loops[node] + inside / 2.0;
            *totals.entry(label).or_default() += degrees[node];
        }
        totals
            .iter()
            .map(|(label, total)| {
                let l_c = internal.get(label).copied().unwrap_or(0.0);
                l_c / m - resolution * (total / (2.0 * m)).powi(2)
            })
            .sum()
    }

    /// Collapses every community (contiguous labels `0..count`) into one node.
    pub(crate) fn aggregate(&self, labels: &[usize], count: usize) -> Self {
        let mut loops = vec![0.0; count];
        let mut weights: Vec<BTreeMap<usize, f64>> = vec![BTreeMap::new(); count];
        for node in 0..self.len() {
            let cu = labels[node];
            loops[cu] += self.loops[node];
            for &(other, w) in &self.adjacency[node] {
                if other < node {
                    continue;
                }
                let cv = labels[other];
                if cu == cv {
                    loops[cu] += w;
                } else {
                    *weights[cu].entry(cv).or_default() += w;
                    *weights[cv].entry(cu).or_default() += w;
                }
            }
        }
        let adjacency = weights
            .into_iter()
            .map(|row| row.into_iter().collect())
            .collect();
        Self { adjacency, loops }
    }
}

/// Renumbers labels contiguously in order of first appearance.
pub(crate) fn relabel(labels: &[usize]) -> (Vec<usize>, usize) {
    let mut mapping: BTreeMap<usize, usize> = BTreeMap::new();
    let relabelled = labels
        .iter()
        .map(|label| {
            let next = mapping.len();
            *mapping.entry(*label).or_insert(next)
        })
        .collect();
    (relabelled, mapping.len())
}
