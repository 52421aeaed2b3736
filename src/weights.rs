//! Vote weight assignment from model accuracy

use crate::error::{AggregatorError, Result};
use crate::table::PredictionTable;
use serde::{Deserialize, Serialize};

/// Voting mode selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VotingMode {
    /// Every model votes with weight 1 (plain plurality)
    Unweighted,
    /// Weights derived from each model's standalone accuracy
    Weighted,
}

/// Step function mapping a model's accuracy percentage to an integer vote
/// weight. Thresholds are strict: accuracy 90.0 maps to 8, 90.1 to 9.
///
/// Accuracies at or below 10 fall through every step; the floor weight covers
/// that range. It defaults to 1 so that even a near-useless model keeps a
/// vote rather than silently dropping out of the weight total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightPolicy {
    floor_weight: u32,
}

impl Default for WeightPolicy {
    fn default() -> Self {
        Self { floor_weight: 1 }
    }
}

impl WeightPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the weight assigned to accuracies at or below 10
    pub fn with_floor_weight(mut self, weight: u32) -> Self {
        self.floor_weight = weight;
        self
    }

    /// Weight for a single model's accuracy
    pub fn weight_for(&self, accuracy: f64) -> u32 {
        const STEPS: [(f64, u32); 9] = [
            (90.0, 9),
            (80.0, 8),
            (70.0, 7),
            (60.0, 6),
            (50.0, 5),
            (40.0, 4),
            (30.0, 3),
            (20.0, 2),
            (10.0, 1),
        ];

        for (threshold, weight) in STEPS {
            if accuracy > threshold {
                return weight;
            }
        }

        self.floor_weight
    }
}

/// Per-run vote weights, one per model in table order. Built once per voting
/// run and never stored back into the table, so repeated runs with different
/// modes cannot interfere with each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteWeights(Vec<u32>);

impl VoteWeights {
    /// Weight 1 for every model (plain plurality voting)
    pub fn uniform(n_models: usize) -> Self {
        Self(vec![1; n_models])
    }

    /// Weights from the step policy, one per model in table order
    pub fn from_policy(policy: &WeightPolicy, table: &PredictionTable) -> Self {
        Self(
            table
                .models()
                .iter()
                .map(|m| policy.weight_for(m.accuracy()))
                .collect(),
        )
    }

    /// Resolve weights for a voting mode
    pub fn for_mode(mode: VotingMode, policy: &WeightPolicy, table: &PredictionTable) -> Self {
        match mode {
            VotingMode::Unweighted => Self::uniform(table.n_models()),
            VotingMode::Weighted => Self::from_policy(policy, table),
        }
    }

    /// Explicit weights, validated against the table's model count
    pub fn explicit(weights: Vec<u32>, table: &PredictionTable) -> Result<Self> {
        if weights.len() != table.n_models() {
            return Err(AggregatorError::ValidationError(format!(
                "{} weights provided for {} models",
                weights.len(),
                table.n_models()
            )));
        }
        Ok(Self(weights))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, model_index: usize) -> Option<u32> {
        self.0.get(model_index).copied()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    /// Sum of all weights (the per-instance weight total, since every model
    /// casts exactly one vote per instance)
    pub fn total(&self) -> u64 {
        self.0.iter().map(|&w| w as u64).sum()
    }
}
