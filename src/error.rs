//! Error types for the ensemble aggregation engine

use thiserror::Error;

/// Result type alias for aggregator operations
pub type Result<T> = std::result::Result<T, AggregatorError>;

/// Main error type for the aggregation engine
#[derive(Error, Debug)]
pub enum AggregatorError {
    /// A model's prediction sequence breaks the data contract: wrong length,
    /// or a label outside the known class vocabulary. Fatal before tallying.
    #[error("data contract violation for model `{model}`: {detail}")]
    ContractViolation { model: String, detail: String },

    /// Every model cast a zero-weight vote for an instance, leaving the
    /// likelihood denominator at zero.
    #[error("degenerate weight total at instance {instance}: no nonzero-weight vote was cast")]
    DegenerateWeightTotal { instance: usize },

    /// The external meta-classifier trainer failed. Surfaced unchanged, no
    /// retry: cross-validation with a fixed seed is deterministic.
    #[error("meta-classifier training failed")]
    MetaTrainingFailure(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for AggregatorError {
    fn from(err: serde_json::Error) -> Self {
        AggregatorError::SerializationError(err.to_string())
    }
}
