mod fixtures;

use ideation_common::normalization::TextNormalizer;
use ideation_common::tokenization::*;

#[test]
fn tokenize_splits_words() {
    assert_eq!(treebank_tokenize("hello world"), vec!["hello", "world"]);
}

#[test]
fn tokenize_empty_string() {
    assert!(treebank_tokenize("").is_empty());
    assert!(treebank_tokenize("   ").is_empty());
}

#[test]
fn tokenize_splits_negation() {
    assert_eq!(treebank_tokenize("i don't know"), vec!["i", "do", "n't", "know"]);
    assert_eq!(treebank_tokenize("can't won't"), vec!["ca", "n't", "wo", "n't"]);
}

#[test]
fn tokenize_splits_clitics() {
    assert_eq!(
        treebank_tokenize("i'm sure it's what we'll do"),
        vec!["i", "'m", "sure", "it", "'s", "what", "we", "'ll", "do"]
    );
    assert_eq!(treebank_tokenize("they're you've he'd"), vec!["they", "'re", "you", "'ve", "he", "'d"]);
}

#[test]
fn tokenize_splits_trailing_apostrophe() {
    assert_eq!(treebank_tokenize("the dogs' bowl"), vec!["the", "dogs", "'", "bowl"]);
}

#[test]
fn tokenize_keeps_bare_clitics() {
    assert_eq!(treebank_tokenize("'s n't '"), vec!["'s", "n't", "'"]);
}

#[test]
fn tokenize_splits_leading_quote_before_single_letter() {
    assert_eq!(treebank_tokenize("'a"), vec!["'", "a"]);
    assert_eq!(treebank_tokenize("'hello"), vec!["'hello"]);
}

#[test]
fn tokenize_splits_quote_before_single_letter_inside_word() {
    assert_eq!(treebank_tokenize("o'k"), vec!["o", "'", "k"]);
    assert_eq!(treebank_tokenize("x'y'z"), vec!["x", "'", "y", "'", "z"]);
    // Clitic letters stay attached.
    assert_eq!(treebank_tokenize("he's"), vec!["he", "'s"]);
}

#[test]
fn tokenize_clitic_needs_trailing_space() {
    assert_eq!(treebank_tokenize("it's'"), vec!["it's", "'"]);
    assert_eq!(treebank_tokenize("don't'"), vec!["do", "n't", "'"]);
}

#[test]
fn tokenize_double_apostrophes() {
    assert_eq!(treebank_tokenize("it''s"), vec!["it", "''", "s"]);
    assert_eq!(treebank_tokenize("she said ''hi"), vec!["she", "said", "``", "hi"]);
}

#[test]
fn tokenize_splits_fixed_contractions() {
    assert_eq!(treebank_tokenize("i cannot"), vec!["i", "can", "not"]);
    assert_eq!(treebank_tokenize("gonna wanna gotta"), vec!["gon", "na", "wan", "na", "got", "ta"]);
    assert_eq!(treebank_tokenize("'tis lemme"), vec!["'t", "is", "lem", "me"]);
}

#[test]
fn tokenize_splits_contractions_after_a_quote() {
    assert_eq!(treebank_tokenize("'cannot"), vec!["'", "can", "not"]);
    assert_eq!(treebank_tokenize("'gonna go"), vec!["'", "gon", "na", "go"]);
    // Needs a word boundary on both sides.
    assert_eq!(treebank_tokenize("cannoted"), vec!["cannoted"]);
}

#[test]
fn english_linguistics_lemmatizes_tokens() {
    let linguistics = EnglishLinguistics::new(fixtures::lemmatizer());
    let text = TextNormalizer::default().normalize("My friends don't care about cats");
    assert_eq!(
        linguistics.tokenize_lemmatize(&text),
        vec!["my", "friend", "do", "n't", "care", "about", "cat"]
    );
}

#[test]
fn english_linguistics_keeps_verb_forms() {
    let linguistics = EnglishLinguistics::new(fixtures::lemmatizer());
    assert_eq!(linguistics.lemmatize("running"), "running");
    assert_eq!(linguistics.lemmatize("was"), "wa");
}

#[test]
fn english_linguistics_empty_sequence() {
    let linguistics = EnglishLinguistics::new(fixtures::lemmatizer());
    let text = TextNormalizer::default().normalize("");
    assert!(linguistics.tokenize_lemmatize(&text).is_empty());
}

struct Whitespace;

impl Linguistics for Whitespace {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split(' ').filter(|s| !s.is_empty()).map(String::from).collect()
    }

    fn lemmatize(&self, token: &str) -> String {
        token.to_uppercase()
    }
}

#[test]
fn custom_linguistics_plugs_in() {
    let text = TextNormalizer::default().normalize("don't stop");
    assert_eq!(Whitespace.tokenize_lemmatize(&text), vec!["DON'T", "STOP"]);
}
