//! Ensemble aggregation engine
//!
//! Combines the outputs of independently trained classifiers into one
//! consensus decision per instance, and exposes those outputs as a feature
//! table for an externally trained meta-classifier.
//!
//! # Modules
//!
//! - [`vocabulary`] - Fixed, ordered class vocabulary and `ClassId`
//! - [`table`] - Per-model prediction sequences (`ModelResult`, `PredictionTable`)
//! - [`weights`] - Accuracy-to-weight step policy and voting modes
//! - [`voting`] - Weighted plurality tallying with explicit tie handling
//! - [`scoring`] - Ensemble and base-model accuracy
//! - [`cross_validation`] - Seeded k-fold splitting for stacking
//! - [`stacking`] - Feature-table adapter around an external meta-trainer
//! - [`classifier`] - Plug-in seam for base classifiers
//! - [`config`] / [`aggregator`] - Configuration and the run facade

// Core error handling
pub mod error;

// Data model
pub mod vocabulary;
pub mod table;

// Aggregation core
pub mod weights;
pub mod voting;
pub mod scoring;

// Stacking path
pub mod cross_validation;
pub mod stacking;

// Collaborator seam
pub mod classifier;

// Configuration and facade
pub mod config;
pub mod aggregator;

pub use error::{AggregatorError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::aggregator::{Aggregator, VoteReport};
    pub use crate::classifier::BaseClassifier;
    pub use crate::config::AggregatorConfig;
    pub use crate::cross_validation::{CrossValidator, CvSplit};
    pub use crate::error::{AggregatorError, Result};
    pub use crate::scoring::{model_accuracy, EnsembleScore};
    pub use crate::stacking::{MetaTrainer, MetaTrainerError, StackingAdapter};
    pub use crate::table::{ModelResult, PredictionTable};
    pub use crate::vocabulary::{ClassId, ClassVocabulary};
    pub use crate::voting::{EnsembleDecision, VotingEngine};
    pub use crate::weights::{VoteWeights, VotingMode, WeightPolicy};
}
