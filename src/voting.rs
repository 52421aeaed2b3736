//! Weighted plurality voting over a prediction table

use crate::error::{AggregatorError, Result};
use crate::table::PredictionTable;
use crate::vocabulary::{ClassId, ClassVocabulary};
use crate::weights::VoteWeights;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Consensus decision for one instance: the winning class, or `None` when
/// two or more classes tied for the maximum likelihood, plus the winning
/// likelihood percentage (for a tie, the tied maximum).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnsembleDecision {
    pub label: Option<ClassId>,
    pub likelihood: f64,
}

impl EnsembleDecision {
    /// Whether the instance ended in an unresolved tie
    pub fn is_tie(&self) -> bool {
        self.label.is_none()
    }

    /// Display name of the decision, `"NONE"` for a tie
    pub fn display_label<'a>(&self, vocabulary: &'a ClassVocabulary) -> &'a str {
        self.label
            .and_then(|id| vocabulary.name_of(id))
            .unwrap_or(ClassVocabulary::NONE_LABEL)
    }
}

/// Tallies weighted votes per instance and resolves one decision each.
///
/// Both voting modes run through the same routine; only the weight vector
/// differs. Instances are independent, each gets its own tally buffer, so the
/// per-instance work runs in parallel.
pub struct VotingEngine;

impl VotingEngine {
    /// Produce one decision per instance, in instance order.
    ///
    /// The weight vector must have one entry per model. A table with no
    /// models, or an all-zero weight vector, cannot produce likelihoods and
    /// is rejected.
    pub fn tally(table: &PredictionTable, weights: &VoteWeights) -> Result<Vec<EnsembleDecision>> {
        if table.is_empty() {
            return Err(AggregatorError::ValidationError(
                "no models in the prediction table".to_string(),
            ));
        }

        if weights.len() != table.n_models() {
            return Err(AggregatorError::ValidationError(format!(
                "{} weights for {} models",
                weights.len(),
                table.n_models()
            )));
        }

        debug!(
            instances = table.n_instances(),
            models = table.n_models(),
            weight_total = weights.total(),
            "tallying ensemble votes"
        );

        (0..table.n_instances())
            .into_par_iter()
            .map(|instance| Self::tally_instance(table, weights, instance))
            .collect()
    }

    fn tally_instance(
        table: &PredictionTable,
        weights: &VoteWeights,
        instance: usize,
    ) -> Result<EnsembleDecision> {
        let n_classes = table.vocabulary().len();

        // Fresh accumulator per instance; nothing survives past this call
        let mut counters = vec![0u64; n_classes];
        let mut weight_total = 0u64;

        for (model_index, model) in table.models().iter().enumerate() {
            // Both lookups are in range: the table validated prediction
            // lengths on push and the weight length was checked above
            let weight = weights.get(model_index).unwrap_or(0) as u64;
            let vote = model.predictions()[instance];

            counters[vote.index()] += weight;
            weight_total += weight;
        }

        if weight_total == 0 {
            return Err(AggregatorError::DegenerateWeightTotal { instance });
        }

        // Scan classes in vocabulary order; first strictly-greater count
        // wins. Comparing raw counts is exact, and likelihood is monotone in
        // the count since the denominator is shared.
        let mut max_count = 0u64;
        let mut winner: Option<ClassId> = None;

        for (class, &count) in table.vocabulary().ids().zip(counters.iter()) {
            if count > max_count {
                max_count = count;
                winner = Some(class);
            }
        }

        let likelihood = 100.0 * max_count as f64 / weight_total as f64;

        // Tie override: more than one class at the maximum resolves to NONE
        let at_max = counters.iter().filter(|&&c| c == max_count).count();
        if at_max > 1 {
            winner = None;
        }

        Ok(EnsembleDecision {
            label: winner,
            likelihood,
        })
    }
}
