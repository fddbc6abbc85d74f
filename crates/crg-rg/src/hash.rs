use crg_core::errors::{CrgError, ErrorInfo};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::flow::FlowReport;
use crate::params::FlowOpts;

fn hash_json<T: Serialize>(value: &T) -> Result<String, CrgError> {
    let json = serde_json::to_vec(value)
        .map_err(|err| CrgError::Serde(ErrorInfo::new("serialize", err.to_string())))?;
    let mut hasher = Sha256::new();
    hasher.update(json);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Computes the canonical hash of flow options.
pub fn hash_opts(opts: &FlowOpts) -> Result<String, CrgError> {
    hash_json(opts)
}

/// Computes the canonical hash of a flow report, ignoring its `run_hash` field.
pub fn hash_report(report: &FlowReport) -> Result<String, CrgError> {
    if report.run_hash.is_empty() {
        return hash_json(report);
    }
    let mut unsealed = report.clone();
    unsealed.run_hash.clear();
    hash_json(&unsealed)
}
