//! Teaching target extraction from corrector output
//!
//! The corrector's answer is split on `---` into the corrected text and a
//! suggestion block. The phrase to teach is pulled from the suggestion block
//! by an ordered list of rules; the corrected text becomes the context.

use regex::Regex;
use serde::Serialize;

use crate::lessons::Cascade;

/// Separator between the corrected text and the suggestion block
pub const SUGGESTION_SEPARATOR: &str = "---";

/// Phrase to teach and the sentence it applies to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeachingTarget {
    pub phrase: String,
    pub context: String,
    /// Name of the rule that found the phrase
    #[serde(skip)]
    pub rule: &'static str,
}

/// Split corrector output into `(corrected_text, suggestion_block)`.
/// Without a separator the whole output is the corrected text.
pub fn split_output(output: &str) -> (&str, &str) {
    let mut parts = output.split(SUGGESTION_SEPARATOR);
    let corrected = parts.next().unwrap_or_default();
    match parts.next() {
        Some(suggestion) => (corrected.trim(), suggestion.trim()),
        None => (output.trim(), ""),
    }
}

/// Rules recognizing the suggested phrase in a suggestion block
pub struct TeachingTargetResolver {
    rules: Cascade,
}

impl TeachingTargetResolver {
    pub fn new() -> Self {
        let label_emphasis = Regex::new(r"(?i)Phrase to learn:\s*<<([^>]+)>>").expect("Invalid regex");
        let label_quoted = Regex::new(r#"(?i)Phrase to learn:\s*"?([^\n"]+)"?"#).expect("Invalid regex");
        let definition_label = Regex::new(r"(?i)Definition:\s*[^\n]+").expect("Invalid regex");
        let emphasis = Regex::new(r"<<([^>]+)>>").expect("Invalid regex");
        let quoted = Regex::new(r#"["']([^"']+)["']"#).expect("Invalid regex");
        let bold = Regex::new(r"\*\*([^\*]+)\*\*").expect("Invalid regex");
        let plain_replaces =
            Regex::new(r"(?i)([A-Za-z'\- ]{2,})\s*\(replaces[:\s]+[^)]+\)").expect("Invalid regex");
        let emphasized_replaces = Regex::new(r"(?i)\*\*?([^\*\(\n]+)\*\*?\s*\(replaces\s*\*([^\*)]+)\*\)")
            .expect("Invalid regex");
        let header =
            Regex::new(r"(?i)Suggested Colloquial Phrase[:\s]*\n?(.+)").expect("Invalid regex");
        let header_markup = Regex::new(r"[\*`_\[\]]").expect("Invalid regex");
        let word_run = Regex::new(r"[A-Za-z' ]{2,}").expect("Invalid regex");
        let trailing_is = Regex::new(r"(?i)\bis:?$").expect("Invalid regex");
        let enumeration = Regex::new(r"^\d+\.?\s*").expect("Invalid regex");

        let strip_is = {
            let trailing_is = trailing_is.clone();
            move |s: &str| trailing_is.replace(s.trim(), "").trim().to_string()
        };
        let strip_is_bold = strip_is.clone();
        let strip_is_plain = strip_is.clone();
        let enumeration_plain = enumeration.clone();

        let rules = Cascade::new()
            .rule("label-emphasis", move |block| {
                label_emphasis.captures(block).map(|c| c[1].to_string())
            })
            .rule("label-quoted", move |block| {
                label_quoted.captures(block).map(|c| c[1].to_string())
            })
            .rule("definition-emphasis", move |block| {
                if !definition_label.is_match(block) {
                    return None;
                }
                emphasis.captures(block).map(|c| c[1].to_string())
            })
            .rule("last-quoted", move |block| {
                let last = quoted.captures_iter(block).last()?;
                let suggested = strip_is(&last[1]);
                Some(enumeration.replace(&suggested, "").to_string())
            })
            .rule("bold", move |block| {
                bold.captures(block).map(|c| strip_is_bold(&c[1]))
            })
            .rule("plain-before-replaces", move |block| {
                let caps = plain_replaces.captures(block)?;
                let suggested = strip_is_plain(&caps[1]);
                Some(enumeration_plain.replace(&suggested, "").to_string())
            })
            .rule("emphasized-replaces", move |block| {
                emphasized_replaces.captures(block).map(|c| c[1].to_string())
            })
            .rule("colloquial-header", move |block| {
                let caps = header.captures(block)?;
                let line = caps[1].lines().next().unwrap_or_default();
                Some(header_markup.replace_all(line.trim(), "").to_string())
            })
            .rule("short-word-run", move |block| {
                let candidate = word_run.find_iter(block).last()?.as_str().trim();
                let words = candidate.split_whitespace().count();
                (2..=4).contains(&words).then(|| candidate.to_string())
            });

        Self { rules }
    }

    /// Find the phrase to teach. `None` when the output is empty or every
    /// rule misses.
    pub fn resolve(&self, corrector_output: &str) -> Option<TeachingTarget> {
        if corrector_output.trim().is_empty() {
            return None;
        }
        let (corrected_text, suggestion_block) = split_output(corrector_output);
        let found = self.rules.first_match(suggestion_block)?;
        Some(TeachingTarget {
            phrase: found.value,
            context: corrected_text.to_string(),
            rule: found.rule,
        })
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.rule_names()
    }
}

impl Default for TeachingTargetResolver {
    fn default() -> Self {
        Self::new()
    }
}
