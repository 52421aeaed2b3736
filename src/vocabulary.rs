//! Class vocabulary: the fixed, ordered set of category names

use crate::error::{AggregatorError, Result};
use serde::{Deserialize, Serialize};

/// Index of a class within the vocabulary's fixed ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassId(usize);

impl ClassId {
    /// Position of the class in vocabulary order
    pub fn index(self) -> usize {
        self.0
    }
}

/// The fixed, ordered set of K distinct class names known in advance.
///
/// Vocabulary order is significant: when several classes reach the same vote
/// count, scanning order decides which one is tentatively selected before tie
/// detection overrides the decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassVocabulary {
    labels: Vec<String>,
}

impl ClassVocabulary {
    /// Display name for the synthetic label representing an unresolved tie
    pub const NONE_LABEL: &'static str = "NONE";

    /// Create a vocabulary from an ordered list of distinct class names
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();

        if labels.is_empty() {
            return Err(AggregatorError::ConfigError(
                "class vocabulary must not be empty".to_string(),
            ));
        }

        for (i, label) in labels.iter().enumerate() {
            if labels[..i].contains(label) {
                return Err(AggregatorError::ConfigError(format!(
                    "duplicate class label `{}` in vocabulary",
                    label
                )));
            }
        }

        Ok(Self { labels })
    }

    /// Number of classes (K)
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Look up a class by name
    pub fn id_of(&self, label: &str) -> Option<ClassId> {
        self.labels.iter().position(|l| l == label).map(ClassId)
    }

    /// Name of a class, if the id is in range
    pub fn name_of(&self, id: ClassId) -> Option<&str> {
        self.labels.get(id.0).map(String::as_str)
    }

    /// Whether the id belongs to this vocabulary
    pub fn contains(&self, id: ClassId) -> bool {
        id.0 < self.labels.len()
    }

    /// Id at a position in vocabulary order, if in range
    pub fn id_at(&self, index: usize) -> Option<ClassId> {
        (index < self.labels.len()).then_some(ClassId(index))
    }

    /// All class ids in vocabulary order
    pub fn ids(&self) -> impl Iterator<Item = ClassId> + '_ {
        (0..self.labels.len()).map(ClassId)
    }

    /// Class names in vocabulary order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Map names to ids, failing on the first unknown name
    pub fn ids_of<S: AsRef<str>>(&self, labels: &[S]) -> Result<Vec<ClassId>> {
        labels
            .iter()
            .map(|l| {
                self.id_of(l.as_ref()).ok_or_else(|| {
                    AggregatorError::ValidationError(format!(
                        "label `{}` is not in the class vocabulary",
                        l.as_ref()
                    ))
                })
            })
            .collect()
    }
}
