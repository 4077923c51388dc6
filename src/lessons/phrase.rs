//! Canonical phrase resolution
//!
//! Finds the single phrase a lesson is about. Plain-text rules run first,
//! then the HTML rendering is consulted, then the caller's fallback.

use super::cascade::{Cascade, RuleMatch};
use super::markup::{first_emphasis, first_strong, labeled_phrase, strip_tags};

/// Resolver for the canonical phrase of a lesson
pub struct PhraseResolver {
    /// Rules over the plain lesson text
    text_rules: Cascade,
    /// Rules over the HTML rendering
    html_rules: Cascade,
}

impl PhraseResolver {
    pub fn new() -> Self {
        let text_rules = Cascade::new()
            .rule("labeled-phrase", labeled_phrase)
            .rule("first-emphasis", first_emphasis);

        let html_rules = Cascade::new()
            .rule("first-strong", first_strong)
            .rule("labeled-phrase-in-html", |html| labeled_phrase(&strip_tags(html)));

        Self {
            text_rules,
            html_rules,
        }
    }

    /// Resolve the canonical phrase, falling back to `fallback_phrase`.
    /// The result is trimmed and may be empty only if the fallback is.
    pub fn resolve(&self, lesson_text: &str, lesson_html: &str, fallback_phrase: &str) -> String {
        self.resolve_from_lesson(lesson_text, lesson_html)
            .unwrap_or_else(|| fallback_phrase.trim().to_string())
    }

    /// Resolve from the lesson alone, without any fallback
    pub fn resolve_from_lesson(&self, lesson_text: &str, lesson_html: &str) -> Option<String> {
        self.resolve_match(lesson_text, lesson_html).map(|m| m.value)
    }

    /// Like [`resolve_from_lesson`](Self::resolve_from_lesson) but reports the rule that fired
    pub fn resolve_match(&self, lesson_text: &str, lesson_html: &str) -> Option<RuleMatch> {
        self.text_rules
            .first_match(lesson_text)
            .or_else(|| self.html_rules.first_match(lesson_html))
    }
}

impl Default for PhraseResolver {
    fn default() -> Self {
        Self::new()
    }
}
