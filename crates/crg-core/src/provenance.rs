//! Provenance and schema descriptors shared across CRG artifacts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Semantic version describing the schema of serialized payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Major version incremented for breaking changes.
    pub major: u32,
    /// Minor version incremented for additive changes.
    pub minor: u32,
    /// Patch version incremented for bug fixes and documentation updates.
    pub patch: u32,
}

impl SchemaVersion {
    /// Creates a new schema version descriptor.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

/// Provenance information attached to every flow report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RunProvenance {
    /// Schema of the report carrying this provenance.
    pub schema_version: SchemaVersion,
    /// Canonical hash of the flow options used to produce the data.
    pub input_hash: String,
    /// Canonical hash of the fine-grained input graph.
    pub graph_hash: String,
    /// Master deterministic seed used by the primary community detector.
    pub seed: u64,
    /// Version map for all tools involved in the run.
    pub tool_versions: BTreeMap<String, String>,
}
