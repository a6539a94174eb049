//! Text normalization and feature encoding for the suicidal-ideation dashboard.
//!
//! Turns raw social-media posts into the exact sparse TF-IDF vectors the
//! pretrained classifiers expect: case folding, emoji-to-name conversion,
//! mention/hashtag/URL stripping, slang expansion, Treebank tokenization,
//! noun lemmatization, stopword filtering and a pre-fitted vocabulary.
//! All loaded resources are immutable, so a [`pipeline::Pipeline`] can be
//! shared freely across threads.

pub mod emoji;
pub mod error;
pub mod filter;
pub mod hashing;
pub mod lemmatization;
pub mod normalization;
pub mod pipeline;
pub mod slang;
pub mod stopwords;
pub mod tokenization;
pub mod vectorizer;

pub use error::{PipelineError, Result};
pub use normalization::NormalizedText;
pub use pipeline::{Pipeline, PipelineConfig};
pub use vectorizer::FeatureVector;
