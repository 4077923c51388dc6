//! Text helpers shared by the lesson resolvers
//!
//! Lessons mark the taught phrase with `<<...>>` emphasis markers in plain
//! text and with `<strong>` in the HTML rendering.

use std::sync::OnceLock;

use regex::Regex;

fn emphasis_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<<([^>]*)>>").expect("Invalid regex"))
}

fn strong_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<strong>([^<]+)</strong>").expect("Invalid regex"))
}

fn label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?i)(?:Phrase to learn|Suggested colloquial phrase)\s*[:\-]?\s*(?:<<([^>]+)>>|"?([^\s":\-<][^\n"]*)"?)"#,
        )
        .expect("Invalid regex")
    })
}

fn line_break_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<br\s*/?>").expect("Invalid regex"))
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").expect("Invalid regex"))
}

fn sentence_end_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.?!]\s+").expect("Invalid regex"))
}

fn list_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(?:(?:[-*•]|\d+[.)])\s+)+").expect("Invalid regex"))
}

fn multi_space_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s{2,}").expect("Invalid regex"))
}

/// First non-empty `<<...>>` span in plain text
pub fn first_emphasis(text: &str) -> Option<String> {
    emphasis_re()
        .captures_iter(text)
        .map(|caps| caps[1].trim().to_string())
        .find(|inner| !inner.is_empty())
}

/// First non-empty `<strong>` span in HTML
pub fn first_strong(html: &str) -> Option<String> {
    strong_re()
        .captures_iter(html)
        .map(|caps| caps[1].trim().to_string())
        .find(|inner| !inner.is_empty())
}

/// Phrase named by a "Phrase to learn" / "Suggested colloquial phrase" label
pub fn labeled_phrase(text: &str) -> Option<String> {
    let caps = label_re().captures(text)?;
    let raw = caps
        .get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str())
        .unwrap_or_default();
    let value = strip_emphasis(raw).trim().to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Replace every `<<x>>` with `x`
pub fn strip_emphasis(text: &str) -> String {
    emphasis_re().replace_all(text, "$1").to_string()
}

/// Resolve emphasis markers to their inner text, or to `canonical` when the
/// marker is empty, then drop stray `<>` pairs and collapse runs of spaces
pub fn resolve_emphasis(text: &str, canonical: &str) -> String {
    let resolved = emphasis_re().replace_all(text, |caps: &regex::Captures| {
        let inner = caps[1].trim();
        if inner.is_empty() {
            canonical.trim().to_string()
        } else {
            inner.to_string()
        }
    });
    let resolved = resolved.replace("<>", "");
    collapse_whitespace(&resolved).trim().to_string()
}

/// Convert HTML to plain text, keeping line breaks as newlines
pub fn strip_tags(html: &str) -> String {
    let with_breaks = line_break_re().replace_all(html, "\n");
    let plain = tag_re().replace_all(&with_breaks, "");
    html_escape::decode_html_entities(&plain).to_string()
}

/// Split text into sentences after `.`, `?` or `!` followed by whitespace
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for m in sentence_end_re().find_iter(text) {
        // Keep the punctuation, drop the whitespace
        let end = m.start() + 1;
        sentences.push(&text[start..end]);
        start = m.end();
    }
    if start < text.len() {
        sentences.push(&text[start..]);
    }
    sentences
}

/// Remove leading bullet or numbering markers from a line
pub fn strip_list_prefix(line: &str) -> &str {
    match list_prefix_re().find(line) {
        Some(m) => line[m.end()..].trim(),
        None => line.trim(),
    }
}

/// Collapse runs of whitespace into a single space
pub fn collapse_whitespace(text: &str) -> String {
    multi_space_re().replace_all(text, " ").to_string()
}
