use unicode_segmentation::UnicodeSegmentation;

const VARIATION_SELECTOR_16: char = '\u{FE0F}';

/// Replace every emoji with `:its_cldr_name:`.
///
/// Text is walked by grapheme cluster, so ZWJ sequences, flags and
/// skin-tone variants are looked up as a whole. Everything else passes
/// through untouched, combining marks included. Pure-ASCII clusters are
/// never treated as emoji (`#`, `*` and digits are keycap bases in the
/// emoji table).
pub fn demojize(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for grapheme in text.graphemes(true) {
        match lookup(grapheme) {
            Some(name) => {
                result.push(':');
                result.push_str(&name);
                result.push(':');
            }
            None => result.push_str(grapheme),
        }
    }
    result
}

/// The underscore-joined, lowercase name of a single emoji grapheme.
pub fn emoji_name(grapheme: &str) -> Option<String> {
    lookup(grapheme)
}

fn lookup(grapheme: &str) -> Option<String> {
    if grapheme.is_ascii() {
        return None;
    }
    let emoji = emojis::get(grapheme).or_else(|| {
        let stripped: String = grapheme
            .chars()
            .filter(|&c| c != VARIATION_SELECTOR_16)
            .collect();
        if stripped.is_empty() || stripped.len() == grapheme.len() {
            None
        } else {
            emojis::get(&stripped)
        }
    })?;
    Some(underscore_name(emoji.name()))
}

/// Flags are named after the region alone (`flag: United States` becomes
/// `united_states`).
fn underscore_name(name: &str) -> String {
    let name = name.strip_prefix("flag: ").unwrap_or(name);
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}
