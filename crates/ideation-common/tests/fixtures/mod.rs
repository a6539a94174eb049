use std::collections::{BTreeMap, HashMap};

use ideation_common::lemmatization::NounLemmatizer;
use ideation_common::vectorizer::{TfidfEncoder, VocabularyArtifact};
use ideation_common::Pipeline;

/// Terms and idf weights of a small fitted vocabulary, in column order.
pub const TERMS: &[(&str, f64)] = &[
    ("alone", 2.5),
    ("cat", 1.7),
    ("die", 3.1),
    ("friend", 1.9),
    ("happy", 1.4),
    ("know", 1.2),
    ("life", 2.2),
    ("slightlysmilingface", 2.8),
    ("tired", 2.0),
    ("want", 1.3),
];

/// Slice of WordNet's noun index the fixture posts need.
pub const LEXICON: &[&str] = &[
    "alone", "bad", "cat", "die", "do", "friend", "ha", "happy", "i", "know", "left", "life",
    "post", "sad", "tired", "wa", "want",
];

#[allow(dead_code)]
pub fn lemmatizer() -> NounLemmatizer {
    let mut exceptions = HashMap::new();
    exceptions.insert("lives".to_string(), vec!["life".to_string()]);
    NounLemmatizer::with_lexicon(LEXICON.iter().copied(), exceptions)
}

#[allow(dead_code)]
pub fn artifact() -> VocabularyArtifact {
    let vocabulary: BTreeMap<String, usize> = TERMS
        .iter()
        .enumerate()
        .map(|(i, (t, _))| (t.to_string(), i))
        .collect();
    let idf = TERMS.iter().map(|(_, w)| *w).collect();
    VocabularyArtifact::new(vocabulary, Some(idf))
}

#[allow(dead_code)]
pub fn encoder() -> TfidfEncoder {
    TfidfEncoder::from_artifact(artifact()).expect("fixture vocabulary is valid")
}

#[allow(dead_code)]
pub fn pipeline() -> Pipeline {
    Pipeline::with_defaults(lemmatizer(), encoder())
}

#[allow(dead_code)]
pub fn idf(term: &str) -> f64 {
    TERMS
        .iter()
        .find(|(t, _)| *t == term)
        .map(|(_, w)| *w)
        .expect("term in fixture vocabulary")
}

#[allow(dead_code)]
pub fn column(term: &str) -> usize {
    TERMS
        .iter()
        .position(|(t, _)| *t == term)
        .expect("term in fixture vocabulary")
}
