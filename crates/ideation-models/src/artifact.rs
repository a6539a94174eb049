use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::decision_tree::{DecisionTree, DecisionTreeParams};
use crate::error::{ModelError, Result};
use crate::naive_bayes::{MultinomialNb, MultinomialNbParams};
use crate::Classifier;

/// A serialized model, tagged by `"kind"`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    MultinomialNb(MultinomialNbParams),
    DecisionTree(DecisionTreeParams),
}

impl ModelArtifact {
    /// Read JSON, or CBOR when the file name ends in `.cbor`.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let parse_err = |reason: String| ModelError::Parse {
            path: path.to_path_buf(),
            reason,
        };
        let is_cbor = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("cbor"));
        if is_cbor {
            ciborium::de::from_reader(bytes.as_slice()).map_err(|e| parse_err(e.to_string()))
        } else {
            serde_json::from_slice(&bytes).map_err(|e| parse_err(e.to_string()))
        }
    }

    /// Fingerprint of the vocabulary the model was trained against, if recorded.
    pub fn vocabulary_fingerprint(&self) -> Option<&str> {
        match self {
            ModelArtifact::MultinomialNb(p) => p.vocabulary_fingerprint.as_deref(),
            ModelArtifact::DecisionTree(p) => p.vocabulary_fingerprint.as_deref(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ModelArtifact::MultinomialNb(_) => "multinomial_nb",
            ModelArtifact::DecisionTree(_) => "decision_tree",
        }
    }

    pub fn into_classifier(self) -> Result<Box<dyn Classifier>> {
        Ok(match self {
            ModelArtifact::MultinomialNb(p) => Box::new(MultinomialNb::from_params(p)?),
            ModelArtifact::DecisionTree(p) => Box::new(DecisionTree::from_params(p)?),
        })
    }
}

/// Load a classifier and check it against the pipeline it will be fed by.
///
/// A recorded vocabulary fingerprint must equal `fingerprint`; the feature
/// dimension must equal `dimension`.
pub fn load_classifier(
    path: &Path,
    fingerprint: &str,
    dimension: usize,
) -> Result<Box<dyn Classifier>> {
    let artifact = ModelArtifact::load(path)?;
    match artifact.vocabulary_fingerprint() {
        Some(expected) if !expected.eq_ignore_ascii_case(fingerprint) => {
            return Err(ModelError::FingerprintMismatch {
                expected: expected.to_string(),
                actual: fingerprint.to_string(),
            });
        }
        Some(_) => {}
        None => tracing::warn!(
            "{} records no vocabulary fingerprint; cannot confirm it matches the vectorizer",
            path.display()
        ),
    }
    let kind = artifact.kind();
    let classifier = artifact.into_classifier()?;
    if classifier.n_features() != dimension {
        return Err(ModelError::Dimension {
            expected: classifier.n_features(),
            actual: dimension,
        });
    }
    tracing::info!(
        "Loaded {} model from {} ({} classes, {} features)",
        kind,
        path.display(),
        classifier.classes().len(),
        classifier.n_features()
    );
    Ok(classifier)
}
