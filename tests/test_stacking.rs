//! Integration test: stacking path with a toy meta-trainer

use ensemble_aggregator::prelude::*;
use ndarray::{Array1, Array2};

/// Out-of-fold majority-class trainer: for each fold, predicts the most
/// common training-fold target for every test-fold instance. Deterministic
/// and genuinely fold-dependent, which is all the adapter contract needs.
struct MajorityClassTrainer;

impl MetaTrainer for MajorityClassTrainer {
    fn cross_validate(
        &mut self,
        _features: &Array2<f64>,
        targets: &Array1<f64>,
        splits: &[CvSplit],
    ) -> std::result::Result<Array1<f64>, MetaTrainerError> {
        let mut predictions = Array1::zeros(targets.len());

        for split in splits {
            let mut counts = std::collections::HashMap::new();
            for &i in &split.train_indices {
                *counts.entry(targets[i] as i64).or_insert(0usize) += 1;
            }
            // Deterministic: highest count, lowest class code on equal counts
            let majority = counts
                .into_iter()
                .max_by_key(|&(class, count)| (count, std::cmp::Reverse(class)))
                .map(|(class, _)| class as f64)
                .unwrap_or(0.0);

            for &i in &split.test_indices {
                predictions[i] = majority;
            }
        }

        Ok(predictions)
    }
}

fn skewed_table(n: usize) -> (PredictionTable, Vec<ClassId>) {
    let vocab = ClassVocabulary::new(["A", "B"]).unwrap();
    let mut table = PredictionTable::new(vocab.clone(), n).unwrap();

    // Two models that disagree on every odd instance
    let m1: Vec<&str> = (0..n).map(|i| if i % 4 == 0 { "B" } else { "A" }).collect();
    let m2: Vec<&str> = (0..n).map(|i| if i % 2 == 0 { "A" } else { "B" }).collect();
    table
        .push(ModelResult::from_labels("m1", &m1, 70.0, &vocab).unwrap())
        .unwrap();
    table
        .push(ModelResult::from_labels("m2", &m2, 55.0, &vocab).unwrap())
        .unwrap();

    // Ground truth is mostly A
    let labels: Vec<&str> = (0..n).map(|i| if i % 5 == 0 { "B" } else { "A" }).collect();
    let truth = vocab.ids_of(&labels).unwrap();
    (table, truth)
}

#[test]
fn test_stacking_produces_uniform_model_result() {
    let (table, truth) = skewed_table(50);
    let aggregator = Aggregator::default();

    let stacked = aggregator
        .stack(&table, &truth, &mut MajorityClassTrainer, "stacked-majority")
        .unwrap();

    assert_eq!(stacked.name(), "stacked-majority");
    assert_eq!(stacked.predictions().len(), 50);

    // Majority class is A everywhere, so accuracy equals the share of A
    assert!((stacked.accuracy() - 80.0).abs() < 1e-9);

    // The read-back result is table-shaped: it can join the ensemble
    let mut extended = table.clone();
    extended.push(stacked).unwrap();
    assert_eq!(extended.n_models(), 3);
}

#[test]
fn test_stacking_is_deterministic_for_a_fixed_seed() {
    let (table, truth) = skewed_table(40);
    let aggregator = Aggregator::new(AggregatorConfig::new().with_folds(5).with_seed(9));

    let first = aggregator
        .stack(&table, &truth, &mut MajorityClassTrainer, "s")
        .unwrap();
    let second = aggregator
        .stack(&table, &truth, &mut MajorityClassTrainer, "s")
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_feature_table_is_one_column_per_model() {
    let (table, truth) = skewed_table(20);
    let adapter = StackingAdapter::new();

    let (features, targets) = adapter.build_feature_table(&table, &truth).unwrap();
    assert_eq!(features.dim(), (20, 2));
    assert_eq!(targets.len(), 20);

    // Every cell is a valid class code
    let k = table.vocabulary().len() as f64;
    assert!(features.iter().all(|&c| c >= 0.0 && c < k));
}

#[test]
fn test_too_few_instances_for_folds_is_an_error() {
    let (table, truth) = skewed_table(4);
    let aggregator = Aggregator::default(); // 10 folds over 4 instances

    let err = aggregator
        .stack(&table, &truth, &mut MajorityClassTrainer, "s")
        .unwrap_err();
    assert!(matches!(err, AggregatorError::ConfigError(_)));
}

struct ExplodingTrainer;

impl MetaTrainer for ExplodingTrainer {
    fn cross_validate(
        &mut self,
        _features: &Array2<f64>,
        _targets: &Array1<f64>,
        _splits: &[CvSplit],
    ) -> std::result::Result<Array1<f64>, MetaTrainerError> {
        Err("kernel cache exhausted".into())
    }
}

#[test]
fn test_trainer_error_surfaces_with_its_message() {
    let (table, truth) = skewed_table(30);
    let aggregator = Aggregator::default();

    let err = aggregator
        .stack(&table, &truth, &mut ExplodingTrainer, "s")
        .unwrap_err();

    match err {
        AggregatorError::MetaTrainingFailure(source) => {
            assert_eq!(source.to_string(), "kernel cache exhausted");
        }
        other => panic!("expected MetaTrainingFailure, got {other:?}"),
    }
}
