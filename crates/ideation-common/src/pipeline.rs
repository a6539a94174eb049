use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::filter::filter_stopwords;
use crate::lemmatization::NounLemmatizer;
use crate::normalization::{NormalizedText, TextNormalizer};
use crate::slang::SlangTable;
use crate::stopwords::StopwordSet;
use crate::tokenization::{EnglishLinguistics, Linguistics};
use crate::vectorizer::{FeatureVector, TfidfEncoder};

/// Where the pipeline's startup resources live.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Newline-delimited stopword list; the embedded English list if unset.
    #[serde(default)]
    pub stopwords: Option<PathBuf>,
    /// Fitted vocabulary artifact (JSON or CBOR).
    pub vocabulary: PathBuf,
    /// WordNet `index.noun`.
    pub lexicon: PathBuf,
    /// WordNet `noun.exc`.
    #[serde(default)]
    pub exceptions: Option<PathBuf>,
    /// Extra slang entries merged over the built-in table.
    #[serde(default)]
    pub slang: BTreeMap<String, String>,
}

/// Every intermediate stage of one analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct Analysis {
    pub normalized: NormalizedText,
    pub tokens: Vec<String>,
    pub filtered: Vec<String>,
    pub document: String,
    pub vector: FeatureVector,
}

/// Raw post to feature vector.
///
/// Holds only immutable, shared resources: clone it cheaply or share it by
/// reference across threads; calls never coordinate with each other.
#[derive(Clone)]
pub struct Pipeline {
    normalizer: Arc<TextNormalizer>,
    linguistics: Arc<dyn Linguistics>,
    stopwords: Arc<StopwordSet>,
    encoder: Arc<TfidfEncoder>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("stopwords", &self.stopwords.len())
            .field("slang", &self.normalizer.slang().len())
            .field("dimension", &self.encoder.dimension())
            .field("fingerprint", &self.encoder.fingerprint())
            .finish()
    }
}

impl Pipeline {
    pub fn new(
        normalizer: TextNormalizer,
        linguistics: Arc<dyn Linguistics>,
        stopwords: StopwordSet,
        encoder: TfidfEncoder,
    ) -> Self {
        Self {
            normalizer: Arc::new(normalizer),
            linguistics,
            stopwords: Arc::new(stopwords),
            encoder: Arc::new(encoder),
        }
    }

    /// Default slang table and embedded stopwords.
    pub fn with_defaults(lemmatizer: NounLemmatizer, encoder: TfidfEncoder) -> Self {
        Self::new(
            TextNormalizer::default(),
            Arc::new(EnglishLinguistics::new(lemmatizer)),
            StopwordSet::english(),
            encoder,
        )
    }

    /// Load every resource named in `config`. Any failure is fatal.
    pub fn load(config: &PipelineConfig) -> Result<Self> {
        let stopwords = match &config.stopwords {
            Some(path) => StopwordSet::load(path)?,
            None => StopwordSet::english(),
        };
        let encoder = TfidfEncoder::load(&config.vocabulary)?;
        let lemmatizer = NounLemmatizer::load(&config.lexicon, config.exceptions.as_deref())?;
        let slang = SlangTable::default().with_entries(config.slang.clone());

        let pipeline = Self::new(
            TextNormalizer::new(slang),
            Arc::new(EnglishLinguistics::new(lemmatizer)),
            stopwords,
            encoder,
        );
        tracing::info!("Pipeline ready: {:?}", pipeline);
        Ok(pipeline)
    }

    pub fn dimension(&self) -> usize {
        self.encoder.dimension()
    }

    pub fn fingerprint(&self) -> &str {
        self.encoder.fingerprint()
    }

    pub fn normalize(&self, raw: &str) -> NormalizedText {
        self.normalizer.normalize(raw)
    }

    pub fn tokenize_lemmatize(&self, text: &NormalizedText) -> Vec<String> {
        self.linguistics.tokenize_lemmatize(text)
    }

    pub fn filter(&self, tokens: &[String]) -> Vec<String> {
        filter_stopwords(tokens, &self.stopwords)
    }

    pub fn encode(&self, tokens: &[String]) -> FeatureVector {
        self.encoder.encode(tokens)
    }

    /// `encode(filter(tokenize_lemmatize(normalize(raw))))`.
    pub fn analyze(&self, raw: &str) -> Result<FeatureVector> {
        Ok(self.trace(raw)?.vector)
    }

    /// Like [`Pipeline::analyze`] but keeps every stage.
    pub fn trace(&self, raw: &str) -> Result<Analysis> {
        let normalized = self.normalize(raw);
        let tokens = self.tokenize_lemmatize(&normalized);
        let filtered = self.filter(&tokens);
        let document = filtered.join(" ");
        let vector = self.encoder.encode_document(&document);
        tracing::debug!(
            "analyzed {} chars -> {} tokens -> {} kept -> {} features",
            raw.len(),
            tokens.len(),
            filtered.len(),
            vector.nnz()
        );
        Ok(Analysis {
            normalized,
            tokens,
            filtered,
            document,
            vector,
        })
    }
}
