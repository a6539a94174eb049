use ideation_common::emoji::{demojize, emoji_name};
use ideation_common::normalization::*;
use ideation_common::slang::SlangTable;

fn normalize(raw: &str) -> String {
    TextNormalizer::default().normalize(raw).into_string()
}

#[test]
fn normalize_lowercases() {
    assert_eq!(normalize("Hello WORLD"), "hello world");
}

#[test]
fn normalize_empty_input() {
    assert_eq!(normalize(""), "");
    assert!(TextNormalizer::default().normalize("").is_empty());
}

#[test]
fn normalize_strips_mentions_hashtags_urls_and_retweets() {
    let result = normalize("check this out @john #cool http://x.co/y RT hello");
    assert_eq!(result, "check this out hello");
    assert!(!result.contains("@john"));
    assert!(!result.contains("#cool"));
    assert!(!result.contains("x.co"));
    assert!(!result.starts_with("rt "));
}

#[test]
fn normalize_strips_https_urls() {
    assert_eq!(normalize("read https://example.com/a?b=c now"), "read now");
}

#[test]
fn normalize_mention_keeps_trailing_punctuation_out() {
    assert_eq!(normalize("@user_1, thanks!"), "thanks");
}

#[test]
fn normalize_hashtag_with_unicode_word_chars() {
    assert_eq!(normalize("so #überfällig today"), "so today");
}

#[test]
fn normalize_retweet_marker_anywhere() {
    assert_eq!(normalize("RT @bot: rt   sad news"), "sad news");
}

#[test]
fn normalize_retweet_marker_inside_word() {
    // "rt " is stripped even at the end of a word.
    assert_eq!(normalize("my heart hurts"), "my heahurts");
}

#[test]
fn normalize_removes_punctuation_keeps_apostrophes() {
    assert_eq!(normalize("I can't... do this!!!"), "i can't do this");
}

#[test]
fn normalize_removes_non_ascii_letters() {
    assert_eq!(normalize("café time"), "caf time");
}

#[test]
fn normalize_keeps_base_letter_of_decomposed_accent() {
    // Only the combining mark falls outside the whitelist.
    assert_eq!(normalize("cafe\u{301} time"), "cafe time");
}

#[test]
fn normalize_removes_tabs_and_newlines_without_spacing() {
    // Control whitespace is outside the whitelist, so it vanishes before
    // whitespace collapsing.
    assert_eq!(normalize("hello\nworld\tagain"), "helloworldagain");
}

#[test]
fn normalize_collapses_spaces() {
    assert_eq!(normalize("  so    many   spaces  "), "so many spaces");
}

#[test]
fn normalize_converts_emoji_to_name() {
    assert_eq!(normalize("ok \u{1F642}"), "ok slightlysmilingface");
}

#[test]
fn normalize_emoji_glued_to_word() {
    assert_eq!(normalize("ok\u{1F642}"), "okslightlysmilingface");
}

#[test]
fn normalize_expands_slang() {
    let result = normalize("idk what to do");
    assert_eq!(result, "i don't know what to do");
    assert!(result.contains("i don't know"));
}

#[test]
fn normalize_expands_slang_after_lowercasing() {
    assert_eq!(normalize("OMG u r gonna"), "oh my god you r going to");
}

#[test]
fn normalize_unknown_slang_passes_through() {
    assert_eq!(normalize("lol smh"), "lol smh");
}

#[test]
fn normalize_slang_requires_exact_token() {
    assert_eq!(normalize("idkk uu"), "idkk uu");
}

#[test]
fn normalize_with_extra_slang() {
    let slang = SlangTable::default().with_entries([("SMH", "shaking my head")]);
    let normalizer = TextNormalizer::new(slang);
    assert_eq!(normalizer.normalize("smh idk").as_str(), "shaking my head i don't know");
}

#[test]
fn normalize_idempotent_on_clean_text() {
    let normalizer = TextNormalizer::default();
    let once = normalizer.normalize("Feeling so tired of everything, idk anymore");
    let twice = normalizer.normalize(once.as_str());
    assert_eq!(once, twice);
}

#[test]
fn strip_noise_leaves_slang() {
    assert_eq!(strip_noise("IDK!!"), "idk");
}

#[test]
fn collapse_whitespace_trims() {
    assert_eq!(collapse_whitespace("  a \t b  "), "a b");
}

#[test]
fn demojize_wraps_name_in_colons() {
    assert_eq!(demojize("hi \u{1F642}"), "hi :slightly_smiling_face:");
}

#[test]
fn demojize_handles_variation_selector() {
    assert_eq!(demojize("\u{2764}\u{FE0F}"), ":red_heart:");
}

#[test]
fn demojize_names_flags_by_region() {
    assert_eq!(demojize("go \u{1F1FA}\u{1F1F8}"), "go :united_states:");
    assert_eq!(normalize("go \u{1F1FA}\u{1F1F8}"), "go unitedstates");
}

#[test]
fn demojize_keeps_combining_marks() {
    assert_eq!(demojize("e\u{301}"), "e\u{301}");
}

#[test]
fn demojize_leaves_ascii_alone() {
    assert_eq!(demojize("# * 1 plain"), "# * 1 plain");
}

#[test]
fn emoji_name_for_non_emoji() {
    assert_eq!(emoji_name("a"), None);
    assert_eq!(emoji_name("é"), None);
}
