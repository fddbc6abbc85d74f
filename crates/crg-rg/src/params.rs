use crg_core::errors::{CrgError, ErrorInfo};
use serde::{Deserialize, Serialize};

/// Options controlling a renormalization flow run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowOpts {
    /// Ordered scale factors; step `i` targets `node_count / scale_factors[i]` nodes.
    pub scale_factors: Vec<f64>,
    /// Hard floor on the target node count of every step.
    pub min_nodes: usize,
    /// Smoothing constant used by the effective information estimator.
    pub eps: f64,
    /// Seed of the primary (Louvain) community detector.
    pub seed: u64,
    /// Threshold used when classifying the resulting beta sequence.
    pub threshold: f64,
}

impl Default for FlowOpts {
    fn default() -> Self {
        Self {
            scale_factors: vec![1.0, 2.0, 4.0, 8.0, 16.0],
            min_nodes: 5,
            eps: 1e-10,
            seed: 42,
            threshold: 0.01,
        }
    }
}

impl FlowOpts {
    /// Default options with the provided scale sequence.
    pub fn with_scale_factors(scale_factors: impl Into<Vec<f64>>) -> Self {
        Self {
            scale_factors: scale_factors.into(),
            ..Self::default()
        }
    }

    /// Rejects configurations that cannot drive a flow.
    pub fn validate(&self) -> Result<(), CrgError> {
        validate_scale_factors(&self.scale_factors)?;
        if self.min_nodes == 0 {
            return Err(CrgError::input(
                "invalid-min-nodes",
                "minimum node floor must be at least one",
            ));
        }
        if !self.eps.is_finite() || self.eps < 0.0 {
            return Err(CrgError::Input(
                ErrorInfo::new("invalid-eps", "smoothing constant must be finite and non-negative")
                    .with_context("eps", self.eps.to_string()),
            ));
        }
        validate_threshold(self.threshold)
    }
}

/// Options controlling the Louvain community detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LouvainOpts {
    /// Seed controlling the node visiting order of every level.
    pub seed: u64,
    /// Modularity resolution; values above 1 favour smaller communities.
    pub resolution: f64,
    /// Minimum modularity gain required to aggregate another level.
    pub threshold: f64,
    /// Upper bound on the number of aggregation levels.
    pub max_levels: usize,
}

impl Default for LouvainOpts {
    fn default() -> Self {
        Self {
            seed: 42,
            resolution: 1.0,
            threshold: 1e-7,
            max_levels: 32,
        }
    }
}

impl LouvainOpts {
    /// Default options with the provided seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Rejects non-positive resolutions, negative thresholds and zero levels.
    pub fn validate(&self) -> Result<(), CrgError> {
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(CrgError::Input(
                ErrorInfo::new("invalid-resolution", "resolution must be finite and positive")
                    .with_context("resolution", self.resolution.to_string()),
            ));
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(CrgError::Input(
                ErrorInfo::new("invalid-threshold", "threshold must be finite and non-negative")
                    .with_context("threshold", self.threshold.to_string()),
            ));
        }
        if self.max_levels == 0 {
            return Err(CrgError::input(
                "invalid-max-levels",
                "louvain requires at least one level",
            ));
        }
        Ok(())
    }
}

pub(crate) fn validate_scale_factors(scale_factors: &[f64]) -> Result<(), CrgError> {
    if scale_factors.is_empty() {
        return Err(CrgError::Input(
            ErrorInfo::new("empty-scale-factors", "at least one scale factor is required")
                .with_hint("the default sequence is [1, 2, 4, 8, 16]"),
        ));
    }
    for (index, factor) in scale_factors.iter().enumerate() {
        if !factor.is_finite() {
            return Err(CrgError::Input(
                ErrorInfo::new("non-finite-scale-factor", "scale factors must be finite")
                    .with_context("index", index.to_string())
                    .with_context("factor", factor.to_string()),
            ));
        }
        if *factor <= 0.0 {
            return Err(CrgError::Input(
                ErrorInfo::new("non-positive-scale-factor", "scale factors must be positive")
                    .with_context("index", index.to_string())
                    .with_context("factor", factor.to_string()),
            ));
        }
    }
    Ok(())
}

pub(crate) fn validate_threshold(threshold: f64) -> Result<(), CrgError> {
    if threshold.is_finite() && threshold >= 0.0 {
        Ok(())
    } else {
        Err(CrgError::Input(
            ErrorInfo::new("invalid-threshold", "threshold must be finite and non-negative")
                .with_context("threshold", threshold.to_string()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        FlowOpts::default().validate().unwrap();
        LouvainOpts::default().validate().unwrap();
    }

    #[test]
    fn scale_factor_validation_reports_offending_index() {
        let err = FlowOpts::with_scale_factors(vec![1.0, 0.0]).validate().unwrap_err();
        assert_eq!(err.info().code, "non-positive-scale-factor");
        assert_eq!(err.info().context.get("index"), Some(&"1".to_string()));

        let err = FlowOpts::with_scale_factors(vec![f64::INFINITY])
            .validate()
            .unwrap_err();
        assert_eq!(err.info().code, "non-finite-scale-factor");

        let err = FlowOpts::with_scale_factors(Vec::<f64>::new()).validate().unwrap_err();
        assert_eq!(err.info().code, "empty-scale-factors");
    }

    #[test]
    fn other_fields_are_checked() {
        let opts = FlowOpts {
            min_nodes: 0,
            ..FlowOpts::default()
        };
        assert_eq!(opts.validate().unwrap_err().info().code, "invalid-min-nodes");
        let opts = FlowOpts {
            threshold: -0.5,
            ..FlowOpts::default()
        };
        assert_eq!(opts.validate().unwrap_err().info().code, "invalid-threshold");
        let opts = LouvainOpts {
            resolution: 0.0,
            ..LouvainOpts::default()
        };
        assert_eq!(opts.validate().unwrap_err().info().code, "invalid-resolution");
    }
}
