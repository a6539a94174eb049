use crate::stopwords::StopwordSet;

/// Drop every token whose lowercase form is a stopword. Order and casing of
/// the kept tokens are preserved.
pub fn filter_stopwords<S: AsRef<str>>(tokens: &[S], stopwords: &StopwordSet) -> Vec<String> {
    tokens
        .iter()
        .map(|t| t.as_ref())
        .filter(|t| !stopwords.contains(t))
        .map(str::to_string)
        .collect()
}
