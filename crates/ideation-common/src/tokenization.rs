use once_cell::sync::Lazy;
use regex::Regex;

use crate::lemmatization::NounLemmatizer;
use crate::normalization::NormalizedText;

/// Tokenization and lemmatization capability used by the pipeline.
///
/// The pipeline only depends on this interface, so the linguistic backend
/// can be swapped without touching normalization or encoding.
pub trait Linguistics: Send + Sync {
    /// Split text into word tokens.
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Reduce a single token to its base form.
    fn lemmatize(&self, token: &str) -> String;

    /// Tokenize then lemmatize every token, preserving order.
    fn tokenize_lemmatize(&self, text: &NormalizedText) -> Vec<String> {
        self.tokenize(text.as_str())
            .iter()
            .map(|t| self.lemmatize(t))
            .collect()
    }
}

/// Treebank tokenizer paired with noun-only lemmatization.
#[derive(Clone, Debug)]
pub struct EnglishLinguistics {
    lemmatizer: NounLemmatizer,
}

impl EnglishLinguistics {
    pub fn new(lemmatizer: NounLemmatizer) -> Self {
        Self { lemmatizer }
    }

    pub fn lemmatizer(&self) -> &NounLemmatizer {
        &self.lemmatizer
    }
}

impl Linguistics for EnglishLinguistics {
    fn tokenize(&self, text: &str) -> Vec<String> {
        treebank_tokenize(text)
    }

    fn lemmatize(&self, token: &str) -> String {
        self.lemmatizer.lemmatize(token)
    }
}

type Rule = (Regex, &'static str);

fn rules(patterns: &[(&str, &'static str)]) -> Vec<Rule> {
    patterns
        .iter()
        .map(|&(pattern, replacement)| {
            (Regex::new(pattern).expect("tokenizer pattern"), replacement)
        })
        .collect()
}

/// Opening quotes, and an apostrophe glued to a lone letter (`o'k`).
static STARTING_QUOTES: Lazy<Vec<Rule>> = Lazy::new(|| {
    rules(&[
        (r#"^""#, "``"),
        (r"(``)", " ${1} "),
        (r#"([ (\[{<])("|'')"#, "${1} `` "),
        (r"(')([\w&&[^mtsdnMTSDN]])\b", "${1} ${2}"),
    ])
});

/// An apostrophe closing a word, before a space.
static QUOTE_BEFORE_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^'])' ").expect("tokenizer pattern"));

/// Closing quotes and clitics. Runs on space-padded text.
static ENDING_QUOTES: Lazy<Vec<Rule>> = Lazy::new(|| {
    rules(&[
        (r"''", " '' "),
        (r#"""#, " '' "),
        (r"([^' ])('[sS]|'[mM]|'[dD]|') ", "${1} ${2} "),
        (r"([^' ])('ll|'LL|'re|'RE|'ve|'VE|n't|N'T) ", "${1} ${2} "),
    ])
});

/// Fused words split into two tokens (`cannot` -> `can not`).
static CONTRACTIONS: Lazy<Vec<Rule>> = Lazy::new(|| {
    rules(&[
        (r"(?i)\b(can)(not)\b", " ${1} ${2} "),
        (r"(?i)\b(d)('ye)\b", " ${1} ${2} "),
        (r"(?i)\b(gim)(me)\b", " ${1} ${2} "),
        (r"(?i)\b(gon)(na)\b", " ${1} ${2} "),
        (r"(?i)\b(got)(ta)\b", " ${1} ${2} "),
        (r"(?i)\b(lem)(me)\b", " ${1} ${2} "),
        (r"(?i)\b(more)('n)\b", " ${1} ${2} "),
        (r"(?i)\b(wan)(na)(\s)", " ${1} ${2} ${3}"),
        (r"(?i) ('t)(is)\b", " ${1} ${2} "),
        (r"(?i) ('t)(was)\b", " ${1} ${2} "),
    ])
});

fn apply(rules: &[Rule], text: String) -> String {
    rules.iter().fold(text, |text, (pattern, replacement)| {
        pattern.replace_all(&text, *replacement).into_owned()
    })
}

/// Treebank-style word tokenization of normalized text.
///
/// Separates English clitics (`n't`, `'ll`, `'re`, `'ve`, `'s`, `'m`,
/// `'d`), apostrophes that open or close a word, an apostrophe in front of
/// a lone letter anywhere in a word, and fused forms such as `cannot`,
/// `gonna` or `'tis`. Each rule is a single left-to-right pass, so a
/// clitic is only split when whitespace follows it. Punctuation other than
/// quotes is left attached.
pub fn treebank_tokenize(text: &str) -> Vec<String> {
    let text = apply(&STARTING_QUOTES, text.to_string());
    let text = QUOTE_BEFORE_SPACE.replace_all(&text, "${1} ' ");
    let text = apply(&ENDING_QUOTES, format!(" {text} "));
    let text = apply(&CONTRACTIONS, text);
    text.split_whitespace().map(str::to_string).collect()
}
