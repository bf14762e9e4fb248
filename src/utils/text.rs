/// Marker that starts the trailing attribution block on scraped comment
/// text ("Posted 14 months ago. ( permalink )" and similar).
const ATTRIBUTION_MARKER: &str = "Posted";

/// Normalize a free-text comment before tokenization: drop everything from
/// the first attribution marker on, then lower-case. Text without the marker
/// is kept whole.
pub fn normalize_comment(text: &str) -> String {
    let cut = match text.find(ATTRIBUTION_MARKER) {
        Some(at) => &text[..at],
        None => text,
    };
    cut.to_lowercase()
}

#[inline]
fn is_term_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\''
}

/// Split text into terms on any run of non-word characters. Word characters
/// are alphanumerics, `_` and `'` (keeps contractions like "don't" intact).
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| !is_term_char(c))
        .filter(|part| !part.is_empty())
        .collect()
}

/// Full comment pipeline: normalize, then tokenize into owned terms ready
/// for `TdmBuilder::add_terms`.
pub fn comment_terms(text: &str) -> Vec<String> {
    let normalized = normalize_comment(text);
    tokenize(&normalized).into_iter().map(str::to_owned).collect()
}
