//! Plug-in seam for base classifiers

use crate::error::Result;
use crate::table::ModelResult;
use crate::vocabulary::{ClassId, ClassVocabulary};

/// A base classifier that feeds the prediction table.
///
/// Implementations own their training and evaluation entirely; rule-based
/// classifiers, learned models, and external toolkits all join the ensemble
/// through this one capability: given the inputs and the label set, produce
/// one predicted label per instance plus a standalone accuracy. The returned
/// `ModelResult` becomes one row of the table without the voting or stacking
/// logic knowing anything else about the implementation.
///
/// `D` is the per-instance input (raw text, a feature row, whatever the
/// implementation consumes).
pub trait BaseClassifier<D> {
    /// Identity used in reports and error messages
    fn name(&self) -> &str;

    /// Classify every instance and report the result, aligned to input order
    fn evaluate(
        &mut self,
        inputs: &[D],
        truth: &[ClassId],
        vocabulary: &ClassVocabulary,
    ) -> Result<ModelResult>;
}
