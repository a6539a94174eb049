use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::emoji;
use crate::slang::SlangTable;

static MENTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"@[A-Za-z0-9_]+").expect("mention pattern"));
static HASHTAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"#\w+").expect("hashtag pattern"));
static RETWEET: Lazy<Regex> = Lazy::new(|| Regex::new(r"rt\s+").expect("retweet pattern"));
static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").expect("url pattern"));
static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9' ]").expect("whitelist pattern"));

/// Text that went through [`TextNormalizer::normalize`]: lowercase, only
/// `[a-z0-9' ]`, single-spaced and trimmed, slang expanded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cleans raw posts into the representation the classifier was trained on.
///
/// The steps run in a fixed order; each pattern assumes the shape left by
/// the one before it.
#[derive(Clone, Debug, Default)]
pub struct TextNormalizer {
    slang: SlangTable,
}

impl TextNormalizer {
    pub fn new(slang: SlangTable) -> Self {
        Self { slang }
    }

    pub fn slang(&self) -> &SlangTable {
        &self.slang
    }

    /// Normalize a raw post. Never fails; empty input yields empty text.
    pub fn normalize(&self, raw: &str) -> NormalizedText {
        let text = strip_noise(raw);
        NormalizedText(self.slang.expand_text(&text))
    }
}

/// Steps 1-8: everything except slang expansion.
pub fn strip_noise(raw: &str) -> String {
    let text = raw.to_lowercase();
    let text = emoji::demojize(&text);
    let text = MENTION.replace_all(&text, "");
    let text = HASHTAG.replace_all(&text, "");
    // Unanchored: also eats "rt " at the end of words like "start ".
    let text = RETWEET.replace_all(&text, "");
    let text = URL.replace_all(&text, "");
    let text = DISALLOWED.replace_all(&text, "");
    collapse_whitespace(&text)
}

/// Collapse runs of whitespace to a single U+0020 and trim.
pub fn collapse_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !prev_space {
                result.push(' ');
                prev_space = true;
            }
        } else {
            result.push(c);
            prev_space = false;
        }
    }
    result.trim().to_string()
}
