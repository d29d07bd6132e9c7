// src/util/text.rs
use html_escape::decode_html_entities;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BLOCK_TAG_REGEX: Regex =
        Regex::new(r"</?(p|div|br|li|h[1-6]|tr|pre)[^>]*>").expect("Failed to compile block tag regex");
    static ref ANY_TAG_REGEX: Regex = Regex::new(r"<[^>]+>").expect("Failed to compile tag regex");
}

/// First non-empty line of visible text in rendered HTML; used as the
/// preview window title.
///
/// # Examples
///
/// ```
/// use sticky_md::util::text::first_line_text;
///
/// let html = "<h1>Groceries</h1><ul><li>milk</li></ul>";
/// assert_eq!(first_line_text(html), "Groceries");
/// ```
pub fn first_line_text(html: &str) -> String {
    let with_newlines = BLOCK_TAG_REGEX.replace_all(html, "\n");
    let no_tags = ANY_TAG_REGEX.replace_all(&with_newlines, "");
    let decoded = decode_html_entities(&no_tags);

    decoded
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
        .to_string()
}
