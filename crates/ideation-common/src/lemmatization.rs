//! Noun-form lemmatization with WordNet morphology.
//!
//! No part-of-speech tagging is done: every token is reduced as a noun, so
//! verb forms like "running" stay as they are. The vocabulary the
//! classifiers were trained on was produced the same way.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use crate::error::{PipelineError, Result};

/// WordNet's noun detachment rules, in WordNet's order.
const NOUN_SUFFIXES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

/// WordNet noun lemmatizer.
///
/// Behaves like NLTK's `WordNetLemmatizer` with the default noun part of
/// speech: "was" becomes "wa" and "has" becomes "ha", while "always" is left
/// alone because no noun form of it exists.
#[derive(Clone, Debug)]
pub struct NounLemmatizer {
    /// Known noun lemmas (`index.noun`).
    lexicon: HashSet<String>,
    exceptions: HashMap<String, Vec<String>>,
}

impl NounLemmatizer {
    /// Dictionary-backed lemmatizer.
    pub fn with_lexicon<I, S>(lexicon: I, exceptions: HashMap<String, Vec<String>>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lexicon: lexicon.into_iter().map(Into::into).collect(),
            exceptions,
        }
    }

    /// Load a WordNet `index.noun` file and, optionally, `noun.exc`.
    pub fn load(index: &Path, exceptions: Option<&Path>) -> Result<Self> {
        let text =
            fs::read_to_string(index).map_err(|e| PipelineError::config("lexicon", index, e))?;
        let lexicon = parse_index(&text);
        if lexicon.is_empty() {
            return Err(PipelineError::config("lexicon", index, "no noun lemmas found"));
        }
        let exceptions = match exceptions {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .map_err(|e| PipelineError::config("exception list", path, e))?;
                parse_exceptions(&text)
            }
            None => HashMap::new(),
        };
        tracing::info!(
            "Loaded {} noun lemmas and {} exceptions from {}",
            lexicon.len(),
            exceptions.len(),
            index.display()
        );
        Ok(Self {
            lexicon,
            exceptions,
        })
    }

    /// Number of known noun lemmas.
    pub fn len(&self) -> usize {
        self.lexicon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexicon.is_empty()
    }

    /// Reduce `word` to its noun base form, or return it unchanged.
    ///
    /// Shortest candidate that the lexicon knows; first one wins ties.
    pub fn lemmatize(&self, word: &str) -> String {
        let candidates = self.morphy(word);
        let mut best: Option<&String> = None;
        for c in &candidates {
            if best.map_or(true, |b| c.len() < b.len()) {
                best = Some(c);
            }
        }
        best.cloned().unwrap_or_else(|| word.to_string())
    }

    fn morphy(&self, form: &str) -> Vec<String> {
        let known = |forms: Vec<String>| -> Vec<String> {
            let mut seen = HashSet::new();
            forms
                .into_iter()
                .filter(|f| self.lexicon.contains(f) && seen.insert(f.clone()))
                .collect()
        };

        if let Some(bases) = self.exceptions.get(form) {
            let mut forms = vec![form.to_string()];
            forms.extend(bases.iter().cloned());
            return known(forms);
        }

        let mut forms = detach_suffixes(&[form.to_string()]);
        let mut first = vec![form.to_string()];
        first.extend(forms.iter().cloned());
        let results = known(first);
        if !results.is_empty() {
            return results;
        }

        // Every rule shortens or keeps length, and "s" always shortens, so
        // the candidate set drains.
        while !forms.is_empty() {
            forms = detach_suffixes(&forms);
            let results = known(forms.clone());
            if !results.is_empty() {
                return results;
            }
        }
        Vec::new()
    }
}

fn detach_suffixes(forms: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    for form in forms {
        for (old, new) in NOUN_SUFFIXES {
            if let Some(stem) = form.strip_suffix(old) {
                out.push(format!("{stem}{new}"));
            }
        }
    }
    out
}

/// First column of every non-header line of a WordNet index file.
pub fn parse_index(text: &str) -> HashSet<String> {
    text.lines()
        .filter(|line| !line.starts_with(' ') && !line.is_empty())
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

/// `inflected base [base...]` lines of a WordNet `.exc` file.
pub fn parse_exceptions(text: &str) -> HashMap<String, Vec<String>> {
    let mut map = HashMap::new();
    for line in text.lines() {
        let mut fields = line.split_whitespace();
        let Some(inflected) = fields.next() else {
            continue;
        };
        let bases: Vec<String> = fields.map(str::to_string).collect();
        if !bases.is_empty() {
            map.insert(inflected.to_string(), bases);
        }
    }
    map
}
