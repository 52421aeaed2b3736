//! Aggregator configuration

use crate::cross_validation::CrossValidator;
use crate::error::Result;
use crate::weights::{VotingMode, WeightPolicy};
use serde::{Deserialize, Serialize};

/// Configuration for a full aggregation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// Voting mode for the `vote` operation
    pub mode: VotingMode,
    /// Fold count for stacking cross-validation
    pub n_folds: usize,
    /// Reproducibility seed for fold shuffling
    pub seed: u64,
    /// Accuracy-to-weight step policy for weighted voting
    pub weight_policy: WeightPolicy,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            mode: VotingMode::Unweighted,
            n_folds: 10,
            seed: CrossValidator::DEFAULT_SEED,
            weight_policy: WeightPolicy::default(),
        }
    }
}

impl AggregatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: VotingMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_folds(mut self, n_folds: usize) -> Self {
        self.n_folds = n_folds;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_weight_policy(mut self, policy: WeightPolicy) -> Self {
        self.weight_policy = policy;
        self
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AggregatorConfig::default();
        assert_eq!(config.mode, VotingMode::Unweighted);
        assert_eq!(config.n_folds, 10);
        assert_eq!(config.seed, 1);
    }

    #[test]
    fn test_builder() {
        let config = AggregatorConfig::new()
            .with_mode(VotingMode::Weighted)
            .with_folds(5)
            .with_seed(42);
        assert_eq!(config.mode, VotingMode::Weighted);
        assert_eq!(config.n_folds, 5);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_config_roundtrips_through_json() {
        let config = AggregatorConfig::new().with_mode(VotingMode::Weighted);
        let json = config.to_json().unwrap();
        let back = AggregatorConfig::from_json(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_malformed_json_is_a_serialization_error() {
        let err = AggregatorConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(
            err,
            crate::error::AggregatorError::SerializationError(_)
        ));
    }
}
