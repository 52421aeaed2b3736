//! Prediction table: per-model predictions collected for aggregation

use crate::error::{AggregatorError, Result};
use crate::vocabulary::{ClassId, ClassVocabulary};
use serde::{Deserialize, Serialize};

/// One base model's output: an ordered prediction per instance plus the
/// model's standalone accuracy. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResult {
    name: String,
    predictions: Vec<ClassId>,
    accuracy: f64,
}

impl ModelResult {
    /// Create a model result. Accuracy is a percentage in [0, 100].
    pub fn new(name: impl Into<String>, predictions: Vec<ClassId>, accuracy: f64) -> Result<Self> {
        let name = name.into();

        if !(0.0..=100.0).contains(&accuracy) {
            return Err(AggregatorError::ContractViolation {
                model: name,
                detail: format!("accuracy {} is outside [0, 100]", accuracy),
            });
        }

        Ok(Self {
            name,
            predictions,
            accuracy,
        })
    }

    /// Create a model result from string labels, resolving them against the
    /// vocabulary. Unknown labels are a contract violation.
    pub fn from_labels<S: AsRef<str>>(
        name: impl Into<String>,
        labels: &[S],
        accuracy: f64,
        vocabulary: &ClassVocabulary,
    ) -> Result<Self> {
        let name = name.into();
        let predictions =
            vocabulary
                .ids_of(labels)
                .map_err(|e| AggregatorError::ContractViolation {
                    model: name.clone(),
                    detail: e.to_string(),
                })?;
        Self::new(name, predictions, accuracy)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn predictions(&self) -> &[ClassId] {
        &self.predictions
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }
}

/// Collection of base-model results over a fixed instance count.
///
/// Insertion order is evaluation order and stays stable for the lifetime of
/// the table. Every pushed result is validated against the table's instance
/// count and class vocabulary before it is accepted, so downstream tallying
/// never has to re-check the data contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionTable {
    vocabulary: ClassVocabulary,
    n_instances: usize,
    models: Vec<ModelResult>,
}

impl PredictionTable {
    /// Create an empty table over a vocabulary and instance count
    pub fn new(vocabulary: ClassVocabulary, n_instances: usize) -> Result<Self> {
        if n_instances == 0 {
            return Err(AggregatorError::ConfigError(
                "prediction table needs at least one instance".to_string(),
            ));
        }

        Ok(Self {
            vocabulary,
            n_instances,
            models: Vec::new(),
        })
    }

    /// Add a model's result, enforcing the data contract: exactly one
    /// prediction per instance, every prediction inside the vocabulary.
    pub fn push(&mut self, result: ModelResult) -> Result<()> {
        if result.predictions.len() != self.n_instances {
            return Err(AggregatorError::ContractViolation {
                model: result.name,
                detail: format!(
                    "expected {} predictions, got {}",
                    self.n_instances,
                    result.predictions.len()
                ),
            });
        }

        if let Some(bad) = result
            .predictions
            .iter()
            .find(|id| !self.vocabulary.contains(**id))
        {
            return Err(AggregatorError::ContractViolation {
                model: result.name,
                detail: format!(
                    "prediction index {} is outside the {}-class vocabulary",
                    bad.index(),
                    self.vocabulary.len()
                ),
            });
        }

        self.models.push(result);
        Ok(())
    }

    pub fn vocabulary(&self) -> &ClassVocabulary {
        &self.vocabulary
    }

    /// Instance count (N)
    pub fn n_instances(&self) -> usize {
        self.n_instances
    }

    /// Model count (M)
    pub fn n_models(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Models in insertion (evaluation) order
    pub fn models(&self) -> &[ModelResult] {
        &self.models
    }

    pub fn get(&self, index: usize) -> Option<&ModelResult> {
        self.models.get(index)
    }
}
