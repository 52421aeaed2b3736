//! Stacking adapter: base-model predictions as meta-classifier features

use crate::cross_validation::CrossValidator;
use crate::error::{AggregatorError, Result};
use crate::scoring::model_accuracy;
use crate::table::{ModelResult, PredictionTable};
use crate::vocabulary::ClassId;
use ndarray::{Array1, Array2};
use tracing::{debug, info};

/// Error type external meta-trainers report through
pub type MetaTrainerError = Box<dyn std::error::Error + Send + Sync>;

/// An external classifier trainable via k-fold cross-validation over a
/// categorical feature table.
///
/// The trainer receives the full feature matrix, the target vector, and the
/// fold assignments, and returns one out-of-fold predicted class code per
/// instance, aligned to row index. Which algorithm sits behind this seam is
/// the caller's choice; the adapter never inspects it.
pub trait MetaTrainer {
    fn cross_validate(
        &mut self,
        features: &Array2<f64>,
        targets: &Array1<f64>,
        splits: &[crate::cross_validation::CvSplit],
    ) -> std::result::Result<Array1<f64>, MetaTrainerError>;
}

/// Exposes a prediction table as a feature matrix for an external
/// meta-classifier trainer and reads the trainer's output back into the
/// `ModelResult` shape, so voting and stacking report uniformly.
#[derive(Debug, Clone)]
pub struct StackingAdapter {
    n_folds: usize,
    seed: u64,
}

impl Default for StackingAdapter {
    fn default() -> Self {
        Self {
            n_folds: 10,
            seed: CrossValidator::DEFAULT_SEED,
        }
    }
}

impl StackingAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_folds(mut self, n_folds: usize) -> Self {
        self.n_folds = n_folds;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Build the meta-feature table: one row per instance, one categorical
    /// column per base model (the predicted class code), and the ground-truth
    /// target vector.
    pub fn build_feature_table(
        &self,
        table: &PredictionTable,
        truth: &[ClassId],
    ) -> Result<(Array2<f64>, Array1<f64>)> {
        if table.is_empty() {
            return Err(AggregatorError::ValidationError(
                "no models in the prediction table".to_string(),
            ));
        }
        if truth.len() != table.n_instances() {
            return Err(AggregatorError::ValidationError(format!(
                "{} truth labels for {} instances",
                truth.len(),
                table.n_instances()
            )));
        }
        if let Some(bad) = truth.iter().find(|id| !table.vocabulary().contains(**id)) {
            return Err(AggregatorError::ValidationError(format!(
                "truth label index {} is outside the {}-class vocabulary",
                bad.index(),
                table.vocabulary().len()
            )));
        }

        let n = table.n_instances();
        let m = table.n_models();

        let mut features = Array2::zeros((n, m));
        for (column, model) in table.models().iter().enumerate() {
            for (row, vote) in model.predictions().iter().enumerate() {
                features[[row, column]] = vote.index() as f64;
            }
        }

        let targets = Array1::from_iter(truth.iter().map(|id| id.index() as f64));

        debug!(rows = n, columns = m, "built stacking feature table");
        Ok((features, targets))
    }

    /// Run the external trainer over the feature table and read its
    /// per-instance predictions back as a `ModelResult`.
    ///
    /// Trainer failures surface unchanged; the folds are seeded, so a retry
    /// would reproduce the same failure.
    pub fn run<T: MetaTrainer>(
        &self,
        table: &PredictionTable,
        truth: &[ClassId],
        trainer: &mut T,
        name: impl Into<String>,
    ) -> Result<ModelResult> {
        let name = name.into();
        let (features, targets) = self.build_feature_table(table, truth)?;

        let splits = CrossValidator::new(self.n_folds)
            .with_seed(self.seed)
            .split(table.n_instances())?;

        info!(
            model = %name,
            folds = self.n_folds,
            seed = self.seed,
            "handing feature table to meta-trainer"
        );

        let raw = trainer
            .cross_validate(&features, &targets, &splits)
            .map_err(AggregatorError::MetaTrainingFailure)?;

        self.read_back(table, truth, raw, name)
    }

    /// Convert raw class codes from the trainer into validated `ClassId`
    /// predictions with an accuracy computed the same way as every base model
    fn read_back(
        &self,
        table: &PredictionTable,
        truth: &[ClassId],
        raw: Array1<f64>,
        name: String,
    ) -> Result<ModelResult> {
        if raw.len() != table.n_instances() {
            return Err(AggregatorError::ContractViolation {
                model: name,
                detail: format!(
                    "meta-trainer returned {} predictions for {} instances",
                    raw.len(),
                    table.n_instances()
                ),
            });
        }

        let vocabulary = table.vocabulary();
        let mut predictions = Vec::with_capacity(raw.len());

        for (instance, &code) in raw.iter().enumerate() {
            let index = code.round();
            let id = if index >= 0.0 {
                vocabulary.id_at(index as usize)
            } else {
                None
            };

            match id {
                Some(id) => predictions.push(id),
                None => {
                    return Err(AggregatorError::ContractViolation {
                        model: name,
                        detail: format!(
                            "meta-trainer predicted class code {} at instance {}, outside the {}-class vocabulary",
                            code,
                            instance,
                            vocabulary.len()
                        ),
                    });
                }
            }
        }

        let accuracy = model_accuracy(&predictions, truth)?;
        info!(model = %name, accuracy, "meta-classifier predictions read back");

        ModelResult::new(name, predictions, accuracy)
    }
}
