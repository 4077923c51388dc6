//! Example sentence resolution
//!
//! Unlike the phrase and definition resolvers, example sources accumulate:
//! each stage contributes candidates until two examples are collected. When
//! the lesson runs dry, generic sentences naming the phrase fill the gap.

use regex::Regex;

use super::markup::{resolve_emphasis, split_sentences, strip_list_prefix};

/// Number of examples delivered for every lesson
pub const EXAMPLE_COUNT: usize = 2;

/// Candidates shorter than this (in characters) are discarded
const MIN_EXAMPLE_CHARS: usize = 6;

/// Everything the example stages can draw from
#[derive(Debug, Clone, Copy, Default)]
pub struct ExampleRequest<'a> {
    pub lesson_text: &'a str,
    pub canonical_phrase: &'a str,
    pub legacy_examples: &'a [String],
    pub corrected_context: Option<&'a str>,
}

type Stage = fn(&ExampleResolver, &ExampleRequest<'_>) -> Vec<String>;

/// Resolver producing exactly two examples for a non-empty phrase
pub struct ExampleResolver {
    examples_header: Regex,
    block_end: Regex,
    usage_line: Regex,
    period_sentence: Regex,
    stages: Vec<(&'static str, Stage)>,
}

impl ExampleResolver {
    pub fn new() -> Self {
        Self {
            examples_header: Regex::new(r"(?m)^[ \t]*(?i:example(s)?)\b[ \t]*[:\-]?[ \t]*")
                .expect("Invalid regex"),
            // A blank line, or any line opening with a "Label:"
            block_end: Regex::new(
                r"\n[ \t]*\n|\n[ \t]*(?:(?i:notes|lesson|usage)\b|[A-Z][A-Za-z ]*:)",
            )
            .expect("Invalid regex"),
            usage_line: Regex::new(r"(?m)^[ \t]*(?i:usage)[ \t]*\d*[ \t]*[:\-]?[ \t]*(.+)$")
                .expect("Invalid regex"),
            period_sentence: Regex::new(r"[^\n.]+\.").expect("Invalid regex"),
            stages: vec![
                ("examples-block", Self::from_examples_block),
                ("usage-lines", Self::from_usage_lines),
                ("legacy-examples", Self::from_legacy),
                ("corrected-context", Self::from_corrected_context),
                ("phrase-sentences", Self::from_phrase_sentences),
            ],
        }
    }

    /// Collect up to two examples, synthesizing filler when the sources run out
    pub fn resolve(&self, request: &ExampleRequest<'_>) -> Vec<String> {
        let canonical = request.canonical_phrase.trim();
        let mut examples: Vec<String> = Vec::with_capacity(EXAMPLE_COUNT);

        for (name, stage) in &self.stages {
            if examples.len() >= EXAMPLE_COUNT {
                break;
            }
            for candidate in stage(self, request) {
                let cleaned = resolve_emphasis(&candidate, canonical);
                if cleaned.chars().count() < MIN_EXAMPLE_CHARS || examples.contains(&cleaned) {
                    continue;
                }
                log::debug!("Example from '{}': {:?}", name, cleaned);
                examples.push(cleaned);
                if examples.len() >= EXAMPLE_COUNT {
                    break;
                }
            }
        }

        if !canonical.is_empty() {
            for filler in synthesized_examples(canonical) {
                if examples.len() >= EXAMPLE_COUNT {
                    break;
                }
                if !examples.contains(&filler) {
                    examples.push(filler);
                }
            }
        }

        examples.truncate(EXAMPLE_COUNT);
        examples
    }

    /// Lines inside an "Examples:" block, bullets and numbering removed.
    ///
    /// A plural "Examples" header wins over an earlier singular "Example"
    /// line, which is usually a quote inside the improvement note.
    fn from_examples_block(&self, request: &ExampleRequest<'_>) -> Vec<String> {
        let text = request.lesson_text;
        let headers: Vec<_> = self.examples_header.captures_iter(text).collect();
        let Some(header) = headers
            .iter()
            .find(|caps| caps.get(1).is_some())
            .or_else(|| headers.first())
        else {
            return Vec::new();
        };

        let start = header.get(0).map_or(0, |m| m.end());
        let rest = &text[start..];
        // Skip the newline ending the header line itself
        let search_from = usize::from(rest.starts_with('\n'));
        let end = self
            .block_end
            .find(&rest[search_from..])
            .map_or(rest.len(), |m| m.start() + search_from);

        rest[..end]
            .lines()
            .map(strip_list_prefix)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Lines introduced by a "Usage:" label
    fn from_usage_lines(&self, request: &ExampleRequest<'_>) -> Vec<String> {
        self.usage_line
            .captures_iter(request.lesson_text)
            .map(|caps| caps[1].trim().to_string())
            .collect()
    }

    /// Examples stored on records written by older versions
    fn from_legacy(&self, request: &ExampleRequest<'_>) -> Vec<String> {
        request
            .legacy_examples
            .iter()
            .map(|ex| ex.trim().to_string())
            .collect()
    }

    /// Sentences of the corrected sentence the lesson was built from
    fn from_corrected_context(&self, request: &ExampleRequest<'_>) -> Vec<String> {
        request
            .corrected_context
            .map(|ctx| {
                split_sentences(ctx)
                    .into_iter()
                    .map(|s| s.trim().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Sentences of the lesson mentioning the phrase or carrying a marker
    fn from_phrase_sentences(&self, request: &ExampleRequest<'_>) -> Vec<String> {
        let canonical = request.canonical_phrase.trim();
        if canonical.is_empty() {
            return Vec::new();
        }
        let needle = canonical.to_lowercase();
        self.period_sentence
            .find_iter(request.lesson_text)
            .map(|m| m.as_str().trim())
            .filter(|s| s.contains("<<") || s.to_lowercase().contains(&needle))
            .map(str::to_string)
            .collect()
    }
}

impl Default for ExampleResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Generic sentences naming the phrase, used when a lesson has no examples
fn synthesized_examples(canonical: &str) -> [String; EXAMPLE_COUNT] {
    [
        format!("I used '{}' in a sentence.", canonical),
        format!("Can you say: '{}' naturally?", canonical),
    ]
}
