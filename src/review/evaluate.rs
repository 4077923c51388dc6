//! Free-text answer checking by word overlap

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::memory::PhraseStore;

/// Share of meaning words an answer must contain to count as correct
pub const PASS_SCORE: f64 = 0.4;

fn punctuation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s]").expect("Invalid regex"))
}

/// Outcome of checking one answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub correct: bool,
    pub score: f64,
    pub feedback: String,
}

impl Evaluation {
    fn miss(feedback: &str) -> Self {
        Self {
            correct: false,
            score: 0.0,
            feedback: feedback.to_string(),
        }
    }
}

fn clean(text: &str) -> String {
    punctuation_re().replace_all(&text.to_lowercase(), "").to_string()
}

/// Check a learner's free-text explanation of `phrase` against the stored
/// meaning (or legacy definition). Lexical only: no synonyms, no grammar.
pub fn evaluate_answer(store: &PhraseStore, phrase: &str, answer: &str) -> Evaluation {
    let Some(record) = store.find(phrase) else {
        return Evaluation::miss("Phrase not found in memory.");
    };
    let meaning = record.meaning_or_definition();

    let answer_clean = clean(answer);
    let meaning_clean = clean(meaning);
    let answer_words: HashSet<&str> = answer_clean.split_whitespace().collect();
    let meaning_words: HashSet<&str> = meaning_clean.split_whitespace().collect();
    if meaning_words.is_empty() {
        return Evaluation::miss("No stored meaning to compare against.");
    }

    let common = answer_words.intersection(&meaning_words).count();
    let score = common as f64 / meaning_words.len() as f64;
    let correct = score >= PASS_SCORE || answer_clean.contains(meaning_clean.trim());

    let feedback = if correct {
        "Good answer!".to_string()
    } else {
        format!("Not quite. Expected meaning (approx): {}", meaning)
    };
    Evaluation {
        correct,
        score,
        feedback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{InMemoryBackend, PhraseRecord};

    fn store() -> PhraseStore {
        let records = vec![
            PhraseRecord {
                phrase: "Spill the beans".to_string(),
                meaning: "To reveal a secret.".to_string(),
                ..Default::default()
            },
            PhraseRecord {
                phrase: "break a leg".to_string(),
                definition: Some("good luck".to_string()),
                ..Default::default()
            },
            PhraseRecord {
                phrase: "blank".to_string(),
                meaning: "!!!".to_string(),
                ..Default::default()
            },
        ];
        PhraseStore::with_backend(Box::new(InMemoryBackend::new(records)))
    }

    #[test]
    fn test_overlap_scoring() {
        let store = store();
        let eval = evaluate_answer(&store, "spill the beans", "You reveal something");
        // "to reveal a secret" has 4 words, one shared
        assert!(!eval.correct);
        assert!((eval.score - 0.25).abs() < f64::EPSILON);
        assert_eq!(eval.feedback, "Not quite. Expected meaning (approx): To reveal a secret.");

        let eval = evaluate_answer(&store, "SPILL THE BEANS", "to reveal it");
        assert!(eval.correct);
        assert!((eval.score - 0.5).abs() < f64::EPSILON);
        assert_eq!(eval.feedback, "Good answer!");
    }

    #[test]
    fn test_legacy_definition_is_used() {
        let store = store();
        let eval = evaluate_answer(&store, "break a leg", "Good luck!");
        assert!(eval.correct);
        assert!((eval.score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_phrase_and_empty_meaning() {
        let store = store();
        let eval = evaluate_answer(&store, "unknown", "anything");
        assert!(!eval.correct);
        assert_eq!(eval.score, 0.0);
        assert_eq!(eval.feedback, "Phrase not found in memory.");

        let eval = evaluate_answer(&store, "blank", "anything");
        assert_eq!(eval.feedback, "No stored meaning to compare against.");
    }
}
