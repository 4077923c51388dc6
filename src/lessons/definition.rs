//! Definition resolution
//!
//! Definitions are never synthesized: when every rule misses, the result is
//! an empty string and callers carry it as-is.

use regex::Regex;

use super::cascade::Cascade;
use super::markup::split_sentences;

/// Resolver for a lesson's one-sentence definition
pub struct DefinitionResolver {
    labeled: Cascade,
}

impl DefinitionResolver {
    pub fn new() -> Self {
        // "Definition:" opening a line, up to a blank line, the next
        // "Label:" line, or the end
        let block = Regex::new(
            r"(?ms)^[ \t]*(?i:definition)[ \t]*[:\-][ \t]*(.*?)(?:\n[ \t]*\n|\n[ \t]*(?:[A-Z][a-z]+[ \t]*[:\-]|[A-Z][A-Za-z ]*:)|\z)",
        )
        .expect("Invalid regex");
        // Looser label, optional colon, stopping at markup or line end
        let loose = Regex::new(r"(?m)^[ \t]*(?i:definition)\b[ \t]*[:\-]?[ \t]*([^<\n]+)")
            .expect("Invalid regex");

        let labeled = Cascade::new()
            .rule("definition-block", move |text| {
                block.captures(text).map(|caps| caps[1].to_string())
            })
            .rule("definition-loose", move |text| {
                loose.captures(text).map(|caps| caps[1].to_string())
            });

        Self { labeled }
    }

    /// Resolve the definition.
    ///
    /// Order: labeled definition in `lesson_text`, then `fallback_meaning`,
    /// then the sentence following the first occurrence of `phrase` in the
    /// lesson, then empty.
    pub fn resolve(&self, lesson_text: &str, phrase: &str, fallback_meaning: &str) -> String {
        if let Some(m) = self.labeled.first_match(lesson_text) {
            return m.value;
        }

        let fallback = fallback_meaning.trim();
        if !fallback.is_empty() {
            return fallback.to_string();
        }

        sentence_after_phrase(lesson_text, phrase).unwrap_or_default()
    }
}

impl Default for DefinitionResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// The sentence right after the one where `phrase` first occurs
fn sentence_after_phrase(lesson_text: &str, phrase: &str) -> Option<String> {
    let phrase = phrase.trim();
    if phrase.is_empty() || lesson_text.is_empty() {
        return None;
    }

    let pattern = format!("(?i){}", regex::escape(phrase));
    let found = Regex::new(&pattern).ok()?.find(lesson_text)?;
    let after = &lesson_text[found.start()..];

    let sentences = split_sentences(after);
    let next = sentences.get(1)?;
    let cleaned = next.trim().trim_matches('"').trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}
