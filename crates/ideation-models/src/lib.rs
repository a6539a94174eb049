//! Inference-only readers for the pretrained post classifiers.
//!
//! The models are fitted offline; this crate only evaluates them on the
//! feature vectors produced by `ideation_common`. A classifier is opaque
//! beyond the [`Classifier`] interface and the vector dimension it expects.

pub mod artifact;
pub mod decision_tree;
pub mod error;
pub mod naive_bayes;
pub mod summary;

use std::fmt;

use ideation_common::FeatureVector;
use serde::{Deserialize, Serialize};

pub use artifact::{load_classifier, ModelArtifact};
pub use error::{ModelError, Result};
pub use summary::LabelSummary;

/// A predicted class name, exactly as stored in the model artifact.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Label(pub String);

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Label(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.trim())
    }
}

/// `predict(FeatureVector) -> Label` for a vector of the agreed dimension.
pub trait Classifier: Send + Sync {
    /// Dimension of the vectors this model was trained on.
    fn n_features(&self) -> usize;

    fn classes(&self) -> &[Label];

    fn predict(&self, features: &FeatureVector) -> Result<Label>;

    /// Reject vectors whose dimension differs from the model's.
    fn check_dimension(&self, features: &FeatureVector) -> Result<()> {
        if features.dim() != self.n_features() {
            return Err(ModelError::Dimension {
                expected: self.n_features(),
                actual: features.dim(),
            });
        }
        Ok(())
    }
}

/// Index of the first maximum, like numpy's argmax.
pub(crate) fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}
