use once_cell::sync::Lazy;
use regex::Regex;

static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9\s-]+").expect("slug pattern is valid"));

/// Turn arbitrary text into a hyphen-joined URL path segment.
///
/// Everything except ASCII letters, digits and whitespace is dropped, then the
/// remaining words are joined with `-`. A hyphen counts as a word break, so
/// slugging a slug returns it unchanged.
pub fn slugify(original: &str) -> String {
    let kept = DISALLOWED.replace_all(original, "");
    kept.split(|c: char| c.is_whitespace() || c == '-')
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
