//! Lesson generation agent
//!
//! Asks the tutor model for a lesson, rebuilds it into the standard layout
//! and records it in the phrase store.

use super::client::TextGenerator;
use crate::lessons::layout::{extract_notes, extract_what_to_improve};
use crate::lessons::{sanitize_lesson_text, to_html, ExampleRequest, LessonParser, StandardLesson};
use crate::memory::{PhraseInput, PhraseStore};

pub const TEACHER_INSTRUCTION: &str = "You are a friendly, encouraging Native English Tutor. \
Given a Phrase and Context, output a concise, plain-text teaching note using these exact labeled sections: \n\
What to improve: (list grammar, structure, slang/phrases issues)\n\
Phrase to learn: (single phrase or idiom; mark it with <<...>> for emphasis)\n\
Definition: (one clear sentence definition of the phrase)\n\
Examples: (provide exactly two corrected example sentences demonstrating the phrase)\n\
Notes: (optional brief usage tips)\n\
Output must be plain text only. Use <<...>> to mark emphasis instead of Markdown. \
Do NOT output the user's original raw sentence or additional unrelated content.";

/// Teaches one phrase and stores the resulting lesson
pub struct TeacherAgent<G> {
    generator: G,
    parser: LessonParser,
}

impl<G: TextGenerator> TeacherAgent<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            parser: LessonParser::new(),
        }
    }

    pub fn parser(&self) -> &LessonParser {
        &self.parser
    }

    /// Generate, standardize and store a lesson.
    ///
    /// Returns `(lesson_text, Some(lesson_html))`, or
    /// `("Error in Teacher Agent: <e>", None)` when generation fails.
    pub fn teach(&self, store: &mut PhraseStore, phrase: &str, context: &str) -> (String, Option<String>) {
        let prompt = format!("Phrase: {} | Context: {}", phrase, context);
        let raw = match self.generator.generate(TEACHER_INSTRUCTION, &prompt) {
            Ok(text) => text,
            Err(e) => {
                log::error!("Teacher generation failed for '{}': {}", phrase, e);
                return (format!("Error in Teacher Agent: {}", e), None);
            }
        };

        let lesson = self.standardize(&raw, phrase);
        let lesson_text = lesson.render();
        let lesson_html = to_html(&lesson_text);

        let status = store.add(PhraseInput {
            phrase: lesson.phrase.clone(),
            meaning: lesson.definition.clone(),
            source_context: None,
            corrected_context: Some(context.to_string()),
            lesson_text: Some(lesson_text.clone()),
            lesson_html: Some(lesson_html.clone()),
        });
        log::info!("{}", status);

        (lesson_text, Some(lesson_html))
    }

    /// Rebuild raw tutor output into the standard layout
    pub fn standardize(&self, raw: &str, requested_phrase: &str) -> StandardLesson {
        let text = sanitize_lesson_text(raw);
        let html = to_html(&text);

        let phrase = self.parser.phrases().resolve(&text, &html, requested_phrase);
        let definition = self.parser.definitions().resolve(&text, &phrase, "");
        let examples = self.parser.examples().resolve(&ExampleRequest {
            lesson_text: &text,
            canonical_phrase: &phrase,
            ..Default::default()
        });

        StandardLesson {
            what_to_improve: extract_what_to_improve(&text).unwrap_or_default(),
            phrase,
            definition,
            examples,
            notes: extract_notes(&text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryBackend;
    use crate::tutor::testing::ScriptedGenerator;

    fn empty_store() -> PhraseStore {
        PhraseStore::with_backend(Box::new(InMemoryBackend::default()))
    }

    #[test]
    fn test_teach_standardizes_and_stores() {
        let raw = "**What to improve:** Use a more natural word.\n\n\
                   Phrase to learn: <<wiped out>>\n\
                   Definition: Extremely tired.\n\
                   Examples:\n\
                   1. I was <<>> after the hike.\n\
                   2. She looks wiped out.\n\
                   Notes: Informal.";
        let generator = ScriptedGenerator::new(vec![Ok(raw.to_string())]);
        let teacher = TeacherAgent::new(&generator);
        let mut store = empty_store();

        let (text, html) = teacher.teach(&mut store, "very tired", "I was very tired.");

        assert_eq!(
            text,
            "What to improve: Use a more natural word.\n\
             Phrase to learn: <<wiped out>>\n\
             Definition: Extremely tired.\n\
             Examples:\n\
             I was wiped out after the hike.\n\
             She looks wiped out.\n\
             Notes: Informal."
        );
        let html = html.unwrap();
        assert!(html.contains("Phrase to learn: <strong>wiped out</strong><br>"));

        assert_eq!(generator.calls()[0].1, "Phrase: very tired | Context: I was very tired.");

        let record = store.find("wiped out").unwrap();
        assert_eq!(record.meaning, "Extremely tired.");
        assert_eq!(record.corrected_context.as_deref(), Some("I was very tired."));
        assert!(record.source_context.is_none());
        assert_eq!(record.lesson_text.as_deref(), Some(text.as_str()));
        assert_eq!(record.lesson_html.as_deref(), Some(html.as_str()));
    }

    #[test]
    fn test_quoted_example_in_note_is_not_an_example() {
        let raw = "What to improve: tense.\n\
                   Example: you wrote 'I go yesterday'.\n\
                   Phrase to learn: <<hit the sack>>\n\
                   Definition: To go to bed.\n\
                   Examples:\n\
                   I hit the sack at ten.\n\
                   Time to hit the sack.";
        let generator = ScriptedGenerator::new(vec![Ok(raw.to_string())]);
        let teacher = TeacherAgent::new(&generator);
        let mut store = empty_store();

        let (text, _) = teacher.teach(&mut store, "go to bed", "I hit the sack.");
        assert_eq!(
            text,
            "What to improve: tense. Example: you wrote 'I go yesterday'.\n\
             Phrase to learn: <<hit the sack>>\n\
             Definition: To go to bed.\n\
             Examples:\n\
             I hit the sack at ten.\n\
             Time to hit the sack."
        );

        let expected = vec!["I hit the sack at ten.".to_string(), "Time to hit the sack.".to_string()];
        let record = store.find("hit the sack").unwrap();
        assert_eq!(record.meaning, "To go to bed.");
        let derived = teacher.parser().derive(record);
        assert_eq!(derived.definition, "To go to bed.");
        assert_eq!(derived.examples, expected);
    }

    #[test]
    fn test_unstructured_lesson_falls_back() {
        let generator = ScriptedGenerator::new(vec![Ok("Just say it casually.".to_string())]);
        let teacher = TeacherAgent::new(&generator);
        let mut store = empty_store();

        let (text, _) = teacher.teach(&mut store, "hit the sack", "I went to bed.");
        assert_eq!(
            text,
            "What to improve: (none)\n\
             Phrase to learn: <<hit the sack>>\n\
             Definition: \n\
             Examples:\n\
             I used 'hit the sack' in a sentence.\n\
             Can you say: 'hit the sack' naturally?"
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_generation_failure() {
        let generator = ScriptedGenerator::new(vec![Err("timeout".to_string())]);
        let teacher = TeacherAgent::new(&generator);
        let mut store = empty_store();

        let (text, html) = teacher.teach(&mut store, "crash", "ctx");
        assert_eq!(text, "Error in Teacher Agent: API error: 500 - timeout");
        assert!(html.is_none());
        assert!(store.is_empty());
    }
}
