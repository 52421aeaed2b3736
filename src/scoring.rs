//! Accuracy scoring for ensemble decisions and base models

use crate::error::{AggregatorError, Result};
use crate::vocabulary::ClassId;
use crate::voting::EnsembleDecision;
use serde::{Deserialize, Serialize};

/// Accuracy report for one voting run.
///
/// Tied instances (`NONE` decisions) are never correct but stay in the
/// denominator: accuracy is always `100 * correct / total`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnsembleScore {
    pub accuracy_percent: f64,
    pub tie_count: usize,
    pub correct: usize,
    pub total: usize,
}

impl EnsembleScore {
    /// Score a decision sequence against ground truth, aligned by index
    pub fn compute(decisions: &[EnsembleDecision], truth: &[ClassId]) -> Result<Self> {
        if decisions.len() != truth.len() {
            return Err(AggregatorError::ValidationError(format!(
                "{} decisions scored against {} truth labels",
                decisions.len(),
                truth.len()
            )));
        }
        if decisions.is_empty() {
            return Err(AggregatorError::ValidationError(
                "cannot score an empty decision sequence".to_string(),
            ));
        }

        let mut correct = 0;
        let mut tie_count = 0;

        for (decision, actual) in decisions.iter().zip(truth) {
            match decision.label {
                None => tie_count += 1,
                Some(label) if label == *actual => correct += 1,
                Some(_) => {}
            }
        }

        Ok(Self {
            accuracy_percent: 100.0 * correct as f64 / decisions.len() as f64,
            tie_count,
            correct,
            total: decisions.len(),
        })
    }
}

/// Accuracy of a plain prediction sequence against ground truth, as a
/// percentage. Base models and the stacking read-back both use this, so
/// every accuracy figure in the crate comes from the same formula.
pub fn model_accuracy(predictions: &[ClassId], truth: &[ClassId]) -> Result<f64> {
    if predictions.len() != truth.len() {
        return Err(AggregatorError::ValidationError(format!(
            "{} predictions scored against {} truth labels",
            predictions.len(),
            truth.len()
        )));
    }
    if predictions.is_empty() {
        return Err(AggregatorError::ValidationError(
            "cannot score an empty prediction sequence".to_string(),
        ));
    }

    let correct = predictions
        .iter()
        .zip(truth)
        .filter(|(p, t)| p == t)
        .count();

    Ok(100.0 * correct as f64 / predictions.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::ClassVocabulary;

    fn ids(vocab: &ClassVocabulary, labels: &[&str]) -> Vec<ClassId> {
        vocab.ids_of(labels).unwrap()
    }

    fn decision(label: Option<ClassId>) -> EnsembleDecision {
        EnsembleDecision {
            label,
            likelihood: 100.0,
        }
    }

    #[test]
    fn test_perfect_score() {
        let vocab = ClassVocabulary::new(["A", "B"]).unwrap();
        let truth = ids(&vocab, &["A", "B", "B", "A"]);
        let decisions: Vec<_> = truth.iter().map(|&t| decision(Some(t))).collect();

        let score = EnsembleScore::compute(&decisions, &truth).unwrap();
        assert_eq!(score.correct, 4);
        assert_eq!(score.tie_count, 0);
        assert!((score.accuracy_percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_ties_stay_in_denominator() {
        let vocab = ClassVocabulary::new(["A", "B"]).unwrap();
        let truth = ids(&vocab, &["A", "A", "A", "A"]);
        let a = vocab.id_of("A").unwrap();

        // 2 correct, 1 tie, 1 wrong
        let b = vocab.id_of("B").unwrap();
        let decisions = vec![
            decision(Some(a)),
            decision(Some(a)),
            decision(None),
            decision(Some(b)),
        ];

        let score = EnsembleScore::compute(&decisions, &truth).unwrap();
        assert_eq!(score.correct, 2);
        assert_eq!(score.tie_count, 1);
        assert_eq!(score.total, 4);
        assert!((score.accuracy_percent - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_tie_never_counts_as_correct() {
        let vocab = ClassVocabulary::new(["A"]).unwrap();
        let truth = ids(&vocab, &["A"]);
        let decisions = vec![decision(None)];

        let score = EnsembleScore::compute(&decisions, &truth).unwrap();
        assert_eq!(score.correct, 0);
        assert_eq!(score.tie_count, 1);
        assert!((score.accuracy_percent - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let vocab = ClassVocabulary::new(["A"]).unwrap();
        let truth = ids(&vocab, &["A", "A"]);
        let decisions = vec![decision(None)];
        assert!(EnsembleScore::compute(&decisions, &truth).is_err());
    }

    #[test]
    fn test_model_accuracy() {
        let vocab = ClassVocabulary::new(["A", "B"]).unwrap();
        let truth = ids(&vocab, &["A", "B", "A", "B"]);
        let preds = ids(&vocab, &["A", "B", "B", "B"]);

        let accuracy = model_accuracy(&preds, &truth).unwrap();
        assert!((accuracy - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_model_accuracy_empty_rejected() {
        assert!(model_accuracy(&[], &[]).is_err());
    }
}
