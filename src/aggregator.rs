//! High-level facade tying voting, scoring, and stacking together

use crate::config::AggregatorConfig;
use crate::error::Result;
use crate::scoring::EnsembleScore;
use crate::stacking::{MetaTrainer, StackingAdapter};
use crate::table::{ModelResult, PredictionTable};
use crate::vocabulary::ClassId;
use crate::voting::{EnsembleDecision, VotingEngine};
use crate::weights::{VoteWeights, VotingMode};
use tracing::info;

/// Outcome of one voting run: the per-instance decisions plus the score
/// against ground truth
#[derive(Debug, Clone, PartialEq)]
pub struct VoteReport {
    pub mode: VotingMode,
    pub decisions: Vec<EnsembleDecision>,
    pub score: EnsembleScore,
}

/// Runs the configured aggregation operations over a prediction table.
///
/// Holds no per-run state; every operation takes the table and ground truth
/// and produces a fresh report, so the same aggregator can serve any number
/// of runs in any order.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    config: AggregatorConfig,
}

impl Aggregator {
    pub fn new(config: AggregatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Vote in the configured mode
    pub fn vote(&self, table: &PredictionTable, truth: &[ClassId]) -> Result<VoteReport> {
        self.vote_in_mode(self.config.mode, table, truth)
    }

    /// Plain plurality: every model votes with weight 1
    pub fn majority_vote(&self, table: &PredictionTable, truth: &[ClassId]) -> Result<VoteReport> {
        self.vote_in_mode(VotingMode::Unweighted, table, truth)
    }

    /// Accuracy-weighted plurality
    pub fn weighted_vote(&self, table: &PredictionTable, truth: &[ClassId]) -> Result<VoteReport> {
        self.vote_in_mode(VotingMode::Weighted, table, truth)
    }

    fn vote_in_mode(
        &self,
        mode: VotingMode,
        table: &PredictionTable,
        truth: &[ClassId],
    ) -> Result<VoteReport> {
        let weights = VoteWeights::for_mode(mode, &self.config.weight_policy, table);
        let decisions = VotingEngine::tally(table, &weights)?;
        let score = EnsembleScore::compute(&decisions, truth)?;

        info!(
            ?mode,
            accuracy = score.accuracy_percent,
            ties = score.tie_count,
            "voting run complete"
        );

        Ok(VoteReport {
            mode,
            decisions,
            score,
        })
    }

    /// Stack: hand the base predictions to an external meta-trainer and read
    /// its per-instance predictions back as one more `ModelResult`
    pub fn stack<T: MetaTrainer>(
        &self,
        table: &PredictionTable,
        truth: &[ClassId],
        trainer: &mut T,
        name: impl Into<String>,
    ) -> Result<ModelResult> {
        StackingAdapter::new()
            .with_folds(self.config.n_folds)
            .with_seed(self.config.seed)
            .run(table, truth, trainer, name)
    }
}
