use std::collections::BTreeMap;

/// Informal abbreviations the classifier's training data was normalized with.
pub const DEFAULT_SLANG: &[(&str, &str)] = &[
    ("u", "you"),
    ("omg", "oh my god"),
    ("bff", "best friend forever"),
    ("gonna", "going to"),
    ("wanna", "want to"),
    ("idk", "i don't know"),
    ("brb", "be right back"),
];

/// Immutable mapping from a lowercase slang token to its expansion phrase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlangTable {
    entries: BTreeMap<String, String>,
}

impl Default for SlangTable {
    fn default() -> Self {
        Self {
            entries: DEFAULT_SLANG
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl SlangTable {
    /// A table with no entries; every token passes through.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Merge extra entries over the current ones. Keys are lowercased so
    /// they can match the already case-folded tokens.
    pub fn with_entries<I, K, V>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (k, v) in extra {
            let key = k.as_ref().trim().to_lowercase();
            if !key.is_empty() {
                self.entries.insert(key, v.into());
            }
        }
        self
    }

    /// Exact-match lookup of a single token.
    pub fn expand(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    /// Replace every whitespace-separated token that has an expansion.
    /// The result is single-spaced.
    pub fn expand_text(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|word| self.expand(word).unwrap_or(word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
