use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{CrgError, ErrorInfo};
use crate::NodeId;

/// Disjoint cover of a graph's nodes by communities.
///
/// Stored canonically: members are sorted and communities are ordered by their
/// smallest member, so the community index doubles as the supernode label
/// after contraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PartitionRepr")]
pub struct Partition {
    communities: Vec<Vec<NodeId>>,
}

// Deserialized partitions are validated over the nodes they mention.
#[derive(Deserialize)]
struct PartitionRepr {
    communities: Vec<Vec<NodeId>>,
}

impl TryFrom<PartitionRepr> for Partition {
    type Error = CrgError;

    fn try_from(repr: PartitionRepr) -> Result<Self, Self::Error> {
        let node_count = repr.communities.iter().map(Vec::len).sum();
        Partition::from_communities(node_count, repr.communities)
    }
}

impl Partition {
    /// Builds a validated partition over nodes `0..node_count`.
    ///
    /// Every node must appear in exactly one non-empty community.
    pub fn from_communities(
        node_count: usize,
        communities: Vec<Vec<NodeId>>,
    ) -> Result<Self, CrgError> {
        let mut seen = vec![false; node_count];
        let mut canonical = Vec::with_capacity(communities.len());
        for mut community in communities {
            if community.is_empty() {
                return Err(CrgError::Graph(ErrorInfo::new(
                    "empty-community",
                    "partition contains an empty community",
                )));
            }
            for node in &community {
                let idx = node.index();
                if idx >= node_count {
                    return Err(CrgError::Graph(
                        ErrorInfo::new("unknown-node", "partition references a missing node")
                            .with_context("node", node.as_raw().to_string())
                            .with_context("node_count", node_count.to_string()),
                    ));
                }
                if seen[idx] {
                    return Err(CrgError::Graph(
                        ErrorInfo::new("overlapping-communities", "node assigned twice")
                            .with_context("node", node.as_raw().to_string()),
                    ));
                }
                seen[idx] = true;
            }
            community.sort_unstable();
            canonical.push(community);
        }
        if let Some(missing) = seen.iter().position(|covered| !covered) {
            return Err(CrgError::Graph(
                ErrorInfo::new("uncovered-node", "partition does not cover every node")
                    .with_context("node", missing.to_string()),
            ));
        }
        canonical.sort_by_key(|community| community[0]);
        Ok(Self {
            communities: canonical,
        })
    }

    /// Builds a partition from one community label per node.
    ///
    /// Labels are arbitrary; they are only compared for equality.
    pub fn from_labels(labels: &[usize]) -> Self {
        let mut grouped: BTreeMap<usize, Vec<NodeId>> = BTreeMap::new();
        for (idx, label) in labels.iter().enumerate() {
            grouped
                .entry(*label)
                .or_default()
                .push(NodeId::from_index(idx));
        }
        let mut communities: Vec<Vec<NodeId>> = grouped.into_values().collect();
        communities.sort_by_key(|community| community[0]);
        Self { communities }
    }

    /// Partition placing every node in its own community.
    pub fn singletons(node_count: usize) -> Self {
        Self {
            communities: (0..node_count)
                .map(|idx| vec![NodeId::from_index(idx)])
                .collect(),
        }
    }

    /// Returns the canonically ordered communities.
    pub fn communities(&self) -> &[Vec<NodeId>] {
        &self.communities
    }

    /// Number of communities.
    pub fn len(&self) -> usize {
        self.communities.len()
    }

    /// Whether the partition has no communities (only for empty graphs).
    pub fn is_empty(&self) -> bool {
        self.communities.is_empty()
    }

    /// Community index of every node, indexed by node.
    pub fn labels(&self) -> Vec<usize> {
        let node_count = self.communities.iter().map(Vec::len).sum();
        let mut labels = vec![0; node_count];
        for (label, community) in self.communities.iter().enumerate() {
            for node in community {
                labels[node.index()] = label;
            }
        }
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u64]) -> Vec<NodeId> {
        raw.iter().copied().map(NodeId::from_raw).collect()
    }

    #[test]
    fn communities_are_canonicalised() {
        let partition =
            Partition::from_communities(5, vec![ids(&[4, 2]), ids(&[3, 0]), ids(&[1])]).unwrap();
        assert_eq!(
            partition.communities(),
            &[ids(&[0, 3]), ids(&[1]), ids(&[2, 4])]
        );
        assert_eq!(partition.labels(), vec![0, 1, 2, 0, 2]);
    }

    #[test]
    fn overlapping_and_missing_nodes_are_rejected() {
        let err = Partition::from_communities(3, vec![ids(&[0, 1]), ids(&[1, 2])]).unwrap_err();
        assert_eq!(err.info().code, "overlapping-communities");
        let err = Partition::from_communities(3, vec![ids(&[0, 1])]).unwrap_err();
        assert_eq!(err.info().code, "uncovered-node");
        let err = Partition::from_communities(2, vec![ids(&[0, 1, 5])]).unwrap_err();
        assert_eq!(err.info().code, "unknown-node");
    }

    #[test]
    fn labels_group_equal_values() {
        let partition = Partition::from_labels(&[7, 3, 7, 3, 9]);
        assert_eq!(partition.len(), 3);
        assert_eq!(partition.labels(), vec![0, 1, 0, 1, 2]);
    }
}
