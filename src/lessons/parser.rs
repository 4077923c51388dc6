//! Read-side lesson reconstruction
//!
//! A [`DerivedLesson`] is recomputed from whatever a record currently holds.
//! Its phrase may differ from the stored identity key when the lesson text
//! names a better canonical phrase; the two reconcile on the next write.

use serde::{Deserialize, Serialize};

use super::definition::DefinitionResolver;
use super::examples::{ExampleRequest, ExampleResolver};
use super::phrase::PhraseResolver;
use crate::memory::PhraseRecord;

/// Presentation view of a stored phrase record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedLesson {
    pub phrase: String,
    pub definition: String,
    pub examples: Vec<String>,
}

/// Composes the phrase, definition and example resolvers
#[derive(Default)]
pub struct LessonParser {
    phrases: PhraseResolver,
    definitions: DefinitionResolver,
    examples: ExampleResolver,
}

impl LessonParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phrases(&self) -> &PhraseResolver {
        &self.phrases
    }

    pub fn definitions(&self) -> &DefinitionResolver {
        &self.definitions
    }

    pub fn examples(&self) -> &ExampleResolver {
        &self.examples
    }

    /// Derive the display fields of a stored record
    pub fn derive(&self, record: &PhraseRecord) -> DerivedLesson {
        let lesson_text = record.lesson_text.as_deref().unwrap_or_default();
        let lesson_html = record.lesson_html.as_deref().unwrap_or_default();

        let phrase = self.phrases.resolve(lesson_text, lesson_html, &record.phrase);

        let mut definition = self
            .definitions
            .resolve(lesson_text, &record.phrase, &record.meaning);
        if definition.is_empty() {
            if let Some(legacy) = record.definition.as_deref() {
                definition = legacy.trim().to_string();
            }
        }

        let examples = self.examples.resolve(&ExampleRequest {
            lesson_text,
            canonical_phrase: &phrase,
            legacy_examples: &record.examples,
            corrected_context: record.corrected_context.as_deref(),
        });

        DerivedLesson {
            phrase,
            definition,
            examples,
        }
    }

    /// Parse a free-standing lesson text, as produced by the tutor
    pub fn parse_text(&self, lesson_text: &str, fallback_phrase: &str) -> DerivedLesson {
        let record = PhraseRecord {
            phrase: fallback_phrase.to_string(),
            lesson_text: Some(lesson_text.to_string()),
            ..Default::default()
        };
        self.derive(&record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lessons::layout::StandardLesson;

    #[test]
    fn test_derives_standard_lesson() {
        let parser = LessonParser::new();
        let text = "Phrase to learn: <<hang in there>>\nDefinition: persevere\nExamples:\nHang in there, it gets better.\nI told him to hang in there.";
        let lesson = parser.parse_text(text, "");

        assert_eq!(lesson.phrase, "hang in there");
        assert_eq!(lesson.definition, "persevere");
        assert_eq!(
            lesson.examples,
            vec![
                "Hang in there, it gets better.".to_string(),
                "I told him to hang in there.".to_string()
            ]
        );
    }

    #[test]
    fn test_round_trip_through_standard_layout() {
        let parser = LessonParser::new();
        let written = StandardLesson {
            what_to_improve: "Use a more natural example of tiredness.".to_string(),
            phrase: "wiped out".to_string(),
            definition: "Extremely tired or exhausted.".to_string(),
            examples: vec![
                "After the hike I was completely wiped out.".to_string(),
                "She felt wiped out after the night shift.".to_string(),
            ],
            notes: Some("Informal; common in spoken English.".to_string()),
        };
        let lesson = parser.parse_text(&written.render(), "");

        assert_eq!(lesson.phrase, written.phrase);
        assert_eq!(lesson.definition, written.definition);
        assert_eq!(lesson.examples, written.examples);
    }

    #[test]
    fn test_round_trip_with_labels_inside_note() {
        let parser = LessonParser::new();
        let written = StandardLesson {
            what_to_improve: "Pick a clearer definition - avoid 'very'.\nExample: you wrote 'very tired'."
                .to_string(),
            phrase: "wiped out".to_string(),
            definition: "Extremely tired.".to_string(),
            examples: vec![
                "5 minutes into the run I was wiped out.".to_string(),
                "She felt wiped out after the night shift.".to_string(),
            ],
            notes: None,
        };
        let lesson = parser.parse_text(&written.render(), "");

        assert_eq!(lesson.phrase, "wiped out");
        assert_eq!(lesson.definition, "Extremely tired.");
        assert_eq!(lesson.examples, written.examples);
    }

    #[test]
    fn test_display_phrase_may_diverge_from_stored_key() {
        let parser = LessonParser::new();
        let record = PhraseRecord {
            phrase: "very tired".to_string(),
            meaning: "old meaning".to_string(),
            lesson_text: Some("Phrase to learn: <<dog-tired>>\nDefinition: exhausted".to_string()),
            ..Default::default()
        };
        let lesson = parser.derive(&record);
        assert_eq!(lesson.phrase, "dog-tired");
        assert_eq!(lesson.definition, "exhausted");
        assert_eq!(record.phrase, "very tired");
    }

    #[test]
    fn test_record_without_lesson_uses_stored_fields() {
        let parser = LessonParser::new();
        let record = PhraseRecord {
            phrase: "spill the beans".to_string(),
            meaning: "to reveal a secret".to_string(),
            corrected_context: Some("Please don't spill the beans about the party.".to_string()),
            ..Default::default()
        };
        let lesson = parser.derive(&record);
        assert_eq!(lesson.phrase, "spill the beans");
        assert_eq!(lesson.definition, "to reveal a secret");
        assert_eq!(lesson.examples[0], "Please don't spill the beans about the party.");
        assert_eq!(lesson.examples[1], "I used 'spill the beans' in a sentence.");
    }

    #[test]
    fn test_legacy_definition_field() {
        let parser = LessonParser::new();
        let record = PhraseRecord {
            phrase: "break a leg".to_string(),
            definition: Some("good luck".to_string()),
            ..Default::default()
        };
        assert_eq!(parser.derive(&record).definition, "good luck");
    }
}
