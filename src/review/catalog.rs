//! Listing and search over the phrase store
//!
//! Two views are offered. `raw` returns records exactly as stored, `derived`
//! re-parses each record's lesson for display. Derived phrases can differ
//! from stored keys until the next write reconciles them.

use crate::lessons::{DerivedLesson, LessonParser};
use crate::memory::{phrase_key, PhraseRecord, PhraseStore};

/// Read-side views of the phrase store
#[derive(Default)]
pub struct PhraseCatalog {
    parser: LessonParser,
}

impl PhraseCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parser(&self) -> &LessonParser {
        &self.parser
    }

    /// Records as persisted
    pub fn raw<'s>(&self, store: &'s PhraseStore) -> &'s [PhraseRecord] {
        store.records()
    }

    /// Every record re-derived for display
    pub fn derived(&self, store: &PhraseStore) -> Vec<DerivedLesson> {
        store.records().iter().map(|r| self.parser.derive(r)).collect()
    }

    /// All phrases, derived view
    pub fn list_phrases(&self, store: &PhraseStore) -> Vec<DerivedLesson> {
        self.derived(store)
    }

    /// Case-insensitive substring search over derived phrase and
    /// definition. An empty query returns everything.
    pub fn search(&self, store: &PhraseStore, query: &str) -> Vec<DerivedLesson> {
        let q = query.trim().to_lowercase();
        let lessons = self.derived(store);
        if q.is_empty() {
            return lessons;
        }
        lessons
            .into_iter()
            .filter(|lesson| {
                let hay = format!("{} {}", lesson.phrase, lesson.definition).to_lowercase();
                hay.contains(&q)
            })
            .collect()
    }

    /// Case-insensitive substring search over stored phrase, meaning and
    /// both contexts
    pub fn search_raw<'s>(&self, store: &'s PhraseStore, query: &str) -> Vec<&'s PhraseRecord> {
        let q = query.trim().to_lowercase();
        store
            .records()
            .iter()
            .filter(|r| {
                if q.is_empty() {
                    return true;
                }
                [
                    Some(r.phrase.as_str()),
                    Some(r.meaning.as_str()),
                    r.source_context.as_deref(),
                    r.corrected_context.as_deref(),
                ]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&q))
            })
            .collect()
    }

    /// Derived view of one phrase. Matches the stored key first, then the
    /// derived phrase.
    pub fn show(&self, store: &PhraseStore, phrase: &str) -> Option<DerivedLesson> {
        if let Some(record) = store.find(phrase) {
            return Some(self.parser.derive(record));
        }
        let key = phrase_key(phrase);
        self.derived(store)
            .into_iter()
            .find(|lesson| phrase_key(&lesson.phrase) == key)
    }
}
