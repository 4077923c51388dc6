//! Loose phrase detection over the whole corrector output
//!
//! Used when [`TeachingTargetResolver`](super::TeachingTargetResolver) finds
//! nothing in the suggestion block.

use regex::Regex;

use crate::lessons::markup::{first_emphasis, labeled_phrase};
use crate::lessons::Cascade;

/// Fallback phrase and context finder
pub struct LooseTargetFinder {
    phrases: Cascade,
    context_line: Regex,
}

impl LooseTargetFinder {
    pub fn new() -> Self {
        let quoted = Regex::new(r#""([^"]{2,40})""#).expect("Invalid regex");
        let phrases = Cascade::new()
            .rule("emphasis", first_emphasis)
            .rule("label", labeled_phrase)
            .rule("short-quote", move |text| {
                quoted.captures(text).map(|c| c[1].to_string())
            });

        Self {
            phrases,
            context_line: Regex::new(r"(?im)^[ \t]*Corrected context[ \t]*:[ \t]*(.+)$")
                .expect("Invalid regex"),
        }
    }

    /// Any phrase-like span in the output
    pub fn phrase(&self, output: &str) -> Option<String> {
        self.phrases.first_match(output).map(|m| m.value)
    }

    /// The corrected sentence, from a `Corrected context:` line or else the
    /// whole output
    pub fn context(&self, output: &str) -> String {
        self.context_line
            .captures(output)
            .map(|c| c[1].trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| output.trim().to_string())
    }
}

impl Default for LooseTargetFinder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_order() {
        let finder = LooseTargetFinder::new();
        assert_eq!(
            finder.phrase("Say \"chill\" or <<hang out>>").as_deref(),
            Some("hang out")
        );
        assert_eq!(
            finder.phrase("Suggested colloquial phrase: grab a bite").as_deref(),
            Some("grab a bite")
        );
        assert_eq!(finder.phrase("Try \"hit the road\" next time.").as_deref(), Some("hit the road"));
        assert_eq!(finder.phrase("Use \"x\" sometimes."), None);
    }

    #[test]
    fn test_context_line_or_whole_output() {
        let finder = LooseTargetFinder::new();
        let output = "Corrected context: Yesterday I was very tired after work.\nWhat to improve: tense";
        assert_eq!(finder.context(output), "Yesterday I was very tired after work.");
        assert_eq!(finder.context("  Just one sentence.  "), "Just one sentence.");
    }
}
