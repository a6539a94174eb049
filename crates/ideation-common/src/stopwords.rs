use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::error::{PipelineError, Result};

/// NLTK's English stopword list, one word per line.
const ENGLISH: &str = include_str!("../resources/stopwords_english.txt");

/// Immutable set of lowercase words discarded before encoding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// The embedded English list.
    pub fn english() -> Self {
        Self::from_words(ENGLISH.lines())
    }

    /// Build from any word list; entries are trimmed and lowercased, blanks dropped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Read a newline-delimited word list.
    pub fn from_reader<R: Read>(reader: R) -> std::io::Result<Self> {
        let mut words = Vec::new();
        for line in BufReader::new(reader).lines() {
            words.push(line?);
        }
        Ok(Self::from_words(words))
    }

    /// Load a newline-delimited word list from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| PipelineError::config("stopwords", path, e))?;
        let set = Self::from_reader(file).map_err(|e| PipelineError::config("stopwords", path, e))?;
        tracing::info!("Loaded {} stopwords from {}", set.len(), path.display());
        Ok(set)
    }

    /// Case-insensitive membership.
    pub fn contains(&self, word: &str) -> bool {
        if self.words.contains(word) {
            return true;
        }
        let lower = word.to_lowercase();
        lower != word && self.words.contains(&lower)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}
