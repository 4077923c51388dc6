//! Multiple-choice quiz generation

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::lessons::LessonParser;
use crate::memory::{phrase_key, PhraseRecord, PhraseStore};

/// Default number of choices per question
pub const DEFAULT_CHOICES: usize = 4;

/// Index reported when the correct answer cannot be identified
pub const UNSCORABLE: i32 = -1;

/// A single-answer question about one stored phrase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub phrase: String,
    pub choices: Vec<String>,
    /// Position of the correct meaning in `choices`, or -1 when unscorable
    pub correct_index: i32,
}

impl QuizQuestion {
    pub fn is_scorable(&self) -> bool {
        self.correct_index >= 0
    }

    /// Whether `choice` (zero-based) is the correct one
    pub fn check(&self, choice: usize) -> bool {
        self.is_scorable() && self.correct_index as usize == choice
    }

    pub fn correct_choice(&self) -> Option<&str> {
        usize::try_from(self.correct_index)
            .ok()
            .and_then(|i| self.choices.get(i))
            .map(String::as_str)
    }
}

/// Quiz result, either a question or an error payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuizResult {
    Question(QuizQuestion),
    Error { error: String },
}

/// Builds quiz questions from the phrase store
#[derive(Default)]
pub struct QuizGenerator {
    parser: LessonParser,
}

impl QuizGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick a random record and build a question with up to
    /// `num_choices - 1` distractor meanings
    pub fn generate<R: Rng + ?Sized>(
        &self,
        store: &PhraseStore,
        num_choices: usize,
        rng: &mut R,
    ) -> QuizResult {
        let Some(correct) = store.records().choose(rng) else {
            return QuizResult::Error {
                error: "No phrases available for quiz.".to_string(),
            };
        };

        let correct_phrase = if correct.phrase.trim().is_empty() {
            self.parser.derive(correct).phrase
        } else {
            correct.phrase.clone()
        };
        let correct_meaning = correct.meaning.clone();
        let correct_key = phrase_key(&correct_phrase);

        let mut distractors: Vec<&PhraseRecord> = store
            .records()
            .iter()
            .filter(|r| phrase_key(&r.phrase) != correct_key)
            .collect();
        distractors.shuffle(rng);
        distractors.truncate(num_choices.saturating_sub(1));

        let mut choices: Vec<String> = distractors
            .into_iter()
            .map(|r| self.choice_text(r))
            .collect();
        choices.push(correct_meaning.clone());
        choices.shuffle(rng);

        let correct_index = if correct_meaning.trim().is_empty() {
            UNSCORABLE
        } else {
            choices
                .iter()
                .position(|c| *c == correct_meaning)
                .map_or(UNSCORABLE, |i| i as i32)
        };
        if correct_index == UNSCORABLE {
            log::warn!("Quiz question for '{}' cannot be scored", correct_phrase);
        }

        QuizResult::Question(QuizQuestion {
            question: format!("What is the best meaning of the phrase: '{}'?", correct_phrase),
            phrase: correct_phrase,
            choices,
            correct_index,
        })
    }

    /// Distractor text: the stored meaning, else the derived definition
    fn choice_text(&self, record: &PhraseRecord) -> String {
        if record.meaning.trim().is_empty() {
            self.parser.derive(record).definition
        } else {
            record.meaning.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryBackend;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn store_with(entries: &[(&str, &str)]) -> PhraseStore {
        let records = entries
            .iter()
            .map(|(phrase, meaning)| PhraseRecord {
                phrase: phrase.to_string(),
                meaning: meaning.to_string(),
                ..Default::default()
            })
            .collect();
        PhraseStore::with_backend(Box::new(InMemoryBackend::new(records)))
    }

    fn question(result: QuizResult) -> QuizQuestion {
        match result {
            QuizResult::Question(q) => q,
            QuizResult::Error { error } => panic!("unexpected quiz error: {}", error),
        }
    }

    #[test]
    fn test_empty_store_is_an_error() {
        let store = store_with(&[]);
        let mut rng = StdRng::seed_from_u64(1);
        let result = QuizGenerator::new().generate(&store, DEFAULT_CHOICES, &mut rng);
        assert_eq!(
            result,
            QuizResult::Error {
                error: "No phrases available for quiz.".to_string()
            }
        );
        assert_eq!(
            serde_json::to_string(&result).unwrap(),
            r#"{"error":"No phrases available for quiz."}"#
        );
    }

    #[test]
    fn test_correct_index_points_at_meaning() {
        let store = store_with(&[
            ("crash", "to fall asleep quickly"),
            ("beat", "very tired"),
            ("ace", "to do very well"),
            ("bail", "to leave suddenly"),
            ("chill", "to relax"),
        ]);
        let generator = QuizGenerator::new();

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let q = question(generator.generate(&store, 4, &mut rng));
            assert_eq!(q.choices.len(), 4);

            let expected = store.find(&q.phrase).unwrap().meaning.clone();
            assert_eq!(q.correct_choice(), Some(expected.as_str()));
            assert_eq!(q.choices.iter().filter(|c| **c == expected).count(), 1);
            assert!(q.check(q.correct_index as usize));
            assert_eq!(
                q.question,
                format!("What is the best meaning of the phrase: '{}'?", q.phrase)
            );
        }
    }

    #[test]
    fn test_choices_capped_by_records() {
        let store = store_with(&[("crash", "sleep"), ("beat", "tired")]);
        let mut rng = StdRng::seed_from_u64(3);
        let q = question(QuizGenerator::new().generate(&store, 4, &mut rng));
        assert_eq!(q.choices.len(), 2);
        assert!(q.is_scorable());
    }

    #[test]
    fn test_empty_meaning_is_unscorable() {
        let store = store_with(&[("crash", "")]);
        let mut rng = StdRng::seed_from_u64(9);
        let q = question(QuizGenerator::new().generate(&store, 4, &mut rng));
        assert_eq!(q.correct_index, UNSCORABLE);
        assert!(!q.check(0));
        assert_eq!(q.correct_choice(), None);
    }

    #[test]
    fn test_distractor_falls_back_to_definition() {
        let records = vec![
            PhraseRecord {
                phrase: "crash".to_string(),
                meaning: "sleep".to_string(),
                ..Default::default()
            },
            PhraseRecord {
                phrase: "beat".to_string(),
                definition: Some("tired".to_string()),
                ..Default::default()
            },
        ];
        let store = PhraseStore::with_backend(Box::new(InMemoryBackend::new(records)));
        let generator = QuizGenerator::new();

        let mut seen_crash = false;
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let q = question(generator.generate(&store, 4, &mut rng));
            if q.phrase == "crash" {
                seen_crash = true;
                assert!(q.choices.contains(&"tired".to_string()));
            }
        }
        assert!(seen_crash);
    }
}
