use crg_core::errors::{CrgError, ErrorInfo};

use crate::flow::FlowReport;
use crate::params::FlowOpts;

fn map_err(err: serde_json::Error, code: &str) -> CrgError {
    CrgError::Serde(ErrorInfo::new(code, err.to_string()))
}

/// Serialises a flow report to JSON; NaN beta entries are written as `null`.
pub fn report_to_json(report: &FlowReport) -> Result<String, CrgError> {
    serde_json::to_string_pretty(report).map_err(|err| map_err(err, "flow-report-serialize"))
}

/// Restores a flow report from JSON.
pub fn report_from_json(json: &str) -> Result<FlowReport, CrgError> {
    serde_json::from_str(json).map_err(|err| map_err(err, "flow-report-deserialize"))
}

/// Serialises flow options to JSON.
pub fn opts_to_json(opts: &FlowOpts) -> Result<String, CrgError> {
    serde_json::to_string_pretty(opts).map_err(|err| map_err(err, "flow-opts-serialize"))
}

/// Restores flow options from JSON; missing fields take their defaults.
pub fn opts_from_json(json: &str) -> Result<FlowOpts, CrgError> {
    serde_json::from_str(json).map_err(|err| map_err(err, "flow-opts-deserialize"))
}
