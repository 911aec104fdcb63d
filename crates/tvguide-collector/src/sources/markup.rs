//! Text extraction helpers shared by the HTML-scraping handlers

use regex::Regex;
use std::sync::OnceLock;

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("static regex"))
}

fn whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static regex"))
}

/// Flatten an HTML fragment to its visible text
///
/// Strips tags, decodes the entities the channel sites actually emit, and
/// collapses runs of whitespace. Not a general HTML parser; the fragments
/// here are single table cells and headings.
pub fn inner_text(fragment: &str) -> String {
    let without_tags = tag_regex().replace_all(fragment, " ");
    let decoded = decode_entities(&without_tags);
    whitespace_regex()
        .replace_all(decoded.trim(), " ")
        .into_owned()
}

/// Decode the small set of named/numeric entities seen in schedule markup
pub fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
