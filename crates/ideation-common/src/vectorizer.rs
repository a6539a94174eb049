//! Pre-fitted TF-IDF encoding.
//!
//! The vocabulary and idf weights come from an offline fit (a scikit-learn
//! `TfidfVectorizer` export) and must be the exact artifact the downstream
//! classifier was trained with. Nothing is fitted here.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::hashing;

/// scikit-learn's default token pattern: runs of two or more word characters.
pub const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// On-disk form of a fitted vectorizer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct VocabularyArtifact {
    /// Term to column index; columns must be exactly `0..vocabulary.len()`.
    pub vocabulary: BTreeMap<String, usize>,
    /// Per-column idf weights. `None` disables idf scaling.
    #[serde(default)]
    pub idf: Option<Vec<f64>>,
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default)]
    pub binary: bool,
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,
    /// Expected fingerprint; verified on load when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

fn default_lowercase() -> bool {
    true
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_token_pattern() -> String {
    DEFAULT_TOKEN_PATTERN.to_string()
}

impl VocabularyArtifact {
    /// Artifact with scikit-learn defaults for everything but the fitted data.
    pub fn new(vocabulary: BTreeMap<String, usize>, idf: Option<Vec<f64>>) -> Self {
        Self {
            vocabulary,
            idf,
            norm: default_norm(),
            sublinear_tf: false,
            binary: false,
            lowercase: default_lowercase(),
            ngram_range: default_ngram_range(),
            token_pattern: default_token_pattern(),
            fingerprint: None,
        }
    }

    /// Read JSON, or CBOR when the file name ends in `.cbor`.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| PipelineError::config("vocabulary", path, e))?;
        let is_cbor = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("cbor"));
        if is_cbor {
            ciborium::de::from_reader(bytes.as_slice())
                .map_err(|e| PipelineError::config("vocabulary", path, e))
        } else {
            serde_json::from_slice(&bytes).map_err(|e| PipelineError::config("vocabulary", path, e))
        }
    }
}

/// Sparse vector with a fixed dimension; indices strictly ascending.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FeatureVector {
    dim: usize,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build from `(index, value)` pairs. Zero values are dropped, indices
    /// are sorted and must be unique and below `dim`.
    pub fn from_pairs(dim: usize, pairs: impl IntoIterator<Item = (usize, f64)>) -> Option<Self> {
        let mut entries: Vec<(usize, f64)> = pairs.into_iter().filter(|(_, v)| *v != 0.0).collect();
        entries.sort_by_key(|(i, _)| *i);
        if entries.windows(2).any(|w| w[0].0 == w[1].0) {
            return None;
        }
        if entries.last().is_some_and(|(i, _)| *i >= dim) {
            return None;
        }
        let (indices, values) = entries.into_iter().unzip();
        Some(Self {
            dim,
            indices,
            values,
        })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored non-zero entries.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn is_zero(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    pub fn get(&self, index: usize) -> f64 {
        match self.indices.binary_search(&index) {
            Ok(pos) => self.values[pos],
            Err(_) => 0.0,
        }
    }

    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.dim];
        for (i, v) in self.iter() {
            dense[i] = v;
        }
        dense
    }
}

/// A validated, ready-to-use fitted vectorizer.
#[derive(Clone, Debug)]
pub struct TfidfEncoder {
    columns: HashMap<String, usize>,
    idf: Option<Vec<f64>>,
    norm: Option<Norm>,
    sublinear_tf: bool,
    binary: bool,
    lowercase: bool,
    ngram_range: (usize, usize),
    pattern: Regex,
    fingerprint: String,
}

impl TfidfEncoder {
    pub fn load(path: &Path) -> Result<Self> {
        let encoder = Self::from_artifact(VocabularyArtifact::load(path)?)?;
        tracing::info!(
            "Loaded vocabulary of {} terms from {} (fingerprint {})",
            encoder.dimension(),
            path.display(),
            encoder.fingerprint()
        );
        Ok(encoder)
    }

    pub fn from_artifact(artifact: VocabularyArtifact) -> Result<Self> {
        let dim = artifact.vocabulary.len();

        let mut by_column: Vec<Option<&str>> = vec![None; dim];
        for (term, &column) in &artifact.vocabulary {
            let slot = by_column.get_mut(column).ok_or_else(|| {
                PipelineError::Artifact(format!(
                    "term {term:?} maps to column {column}, vocabulary has {dim} columns"
                ))
            })?;
            if let Some(other) = slot {
                return Err(PipelineError::Artifact(format!(
                    "terms {other:?} and {term:?} share column {column}"
                )));
            }
            *slot = Some(term.as_str());
        }
        let terms: Vec<&str> = by_column.into_iter().flatten().collect();

        if let Some(idf) = &artifact.idf {
            if idf.len() != dim {
                return Err(PipelineError::Artifact(format!(
                    "{} idf weights for {dim} terms",
                    idf.len()
                )));
            }
            if idf.iter().any(|w| !w.is_finite()) {
                return Err(PipelineError::Artifact("non-finite idf weight".to_string()));
            }
        }

        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(PipelineError::Artifact(format!(
                "invalid ngram_range ({min_n}, {max_n})"
            )));
        }

        let pattern = Regex::new(&artifact.token_pattern)
            .map_err(|e| PipelineError::Artifact(format!("token_pattern: {e}")))?;

        let fingerprint = hashing::vocabulary_fingerprint(
            &terms,
            artifact.idf.as_deref(),
            &options_signature(&artifact),
        );
        if let Some(expected) = &artifact.fingerprint {
            if !expected.eq_ignore_ascii_case(&fingerprint) {
                return Err(PipelineError::FingerprintMismatch {
                    expected: expected.clone(),
                    actual: fingerprint,
                });
            }
        }

        Ok(Self {
            columns: artifact.vocabulary.into_iter().collect(),
            idf: artifact.idf,
            norm: artifact.norm,
            sublinear_tf: artifact.sublinear_tf,
            binary: artifact.binary,
            lowercase: artifact.lowercase,
            ngram_range: artifact.ngram_range,
            pattern,
            fingerprint,
        })
    }

    /// Vector dimension, the number of fitted terms.
    pub fn dimension(&self) -> usize {
        self.columns.len()
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn column(&self, term: &str) -> Option<usize> {
        self.columns.get(term).copied()
    }

    /// Join tokens with single spaces and encode the resulting document.
    pub fn encode<S: AsRef<str>>(&self, tokens: &[S]) -> FeatureVector {
        let document = tokens
            .iter()
            .map(|t| t.as_ref())
            .collect::<Vec<&str>>()
            .join(" ");
        self.encode_document(&document)
    }

    /// Encode one document. Terms outside the vocabulary contribute nothing.
    pub fn encode_document(&self, document: &str) -> FeatureVector {
        let dim = self.dimension();
        let mut counts: BTreeMap<usize, u32> = BTreeMap::new();
        for term in self.terms(document) {
            if let Some(&column) = self.columns.get(&term) {
                *counts.entry(column).or_insert(0) += 1;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(column, count)| {
                let tf = if self.binary {
                    1.0
                } else if self.sublinear_tf {
                    1.0 + f64::from(count).ln()
                } else {
                    f64::from(count)
                };
                let idf = self.idf.as_ref().map_or(1.0, |w| w[column]);
                (column, tf * idf)
            })
            .collect();

        let scale = match self.norm {
            Some(Norm::L2) => entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt(),
            Some(Norm::L1) => entries.iter().map(|(_, v)| v.abs()).sum::<f64>(),
            None => 1.0,
        };
        if scale > 0.0 {
            for (_, v) in entries.iter_mut() {
                *v /= scale;
            }
        }

        FeatureVector::from_pairs(dim, entries).unwrap_or_else(|| FeatureVector::zeros(dim))
    }

    /// Tokens per the fitted pattern, expanded to the fitted n-gram range.
    fn terms(&self, document: &str) -> Vec<String> {
        let text = if self.lowercase {
            document.to_lowercase()
        } else {
            document.to_string()
        };
        let group = usize::from(self.pattern.captures_len() > 1);
        let tokens: Vec<&str> = self
            .pattern
            .captures_iter(&text)
            .filter_map(|c| c.get(group))
            .map(|m| m.as_str())
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n.min(tokens.len()) {
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }
}

fn options_signature(artifact: &VocabularyArtifact) -> String {
    format!(
        "norm={:?};sublinear_tf={};binary={};lowercase={};ngram_range={}-{};token_pattern={}",
        artifact.norm,
        artifact.sublinear_tf,
        artifact.binary,
        artifact.lowercase,
        artifact.ngram_range.0,
        artifact.ngram_range.1,
        artifact.token_pattern
    )
}
