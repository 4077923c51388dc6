//! Phrase store implementation
//!
//! The whole collection is held in memory and the backing file is rewritten
//! in full after every mutation. There is no locking: two processes adding
//! at the same time can lose each other's updates.

use std::fs;
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;

use super::models::*;
use crate::lessons::PhraseResolver;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// File name of the memory bank inside the data directory
pub const MEMORY_FILE_NAME: &str = "memory_bank.json";

/// Persistence seam for the phrase collection
pub trait RecordBackend: Send {
    /// Read the complete collection
    fn load(&self) -> Result<Vec<PhraseRecord>>;

    /// Replace the complete collection
    fn save(&mut self, records: &[PhraseRecord]) -> Result<()>;

    /// Human-readable location, for logs
    fn describe(&self) -> String;
}

/// JSON array file, pretty-printed with four-space indentation
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordBackend for JsonFileBackend {
    fn load(&self) -> Result<Vec<PhraseRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        let records: Vec<PhraseRecord> = serde_json::from_str(&content)?;
        Ok(records)
    }

    fn save(&mut self, records: &[PhraseRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        records.serialize(&mut ser)?;
        fs::write(&self.path, buf)?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Backend keeping the collection in memory only
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    records: Vec<PhraseRecord>,
}

impl InMemoryBackend {
    pub fn new(records: Vec<PhraseRecord>) -> Self {
        Self { records }
    }
}

impl RecordBackend for InMemoryBackend {
    fn load(&self) -> Result<Vec<PhraseRecord>> {
        Ok(self.records.clone())
    }

    fn save(&mut self, records: &[PhraseRecord]) -> Result<()> {
        self.records = records.to_vec();
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}

/// Persistent collection of phrase records, keyed case-insensitively
pub struct PhraseStore {
    backend: Box<dyn RecordBackend>,
    records: Vec<PhraseRecord>,
    phrases: PhraseResolver,
}

impl PhraseStore {
    /// Open a store over a JSON memory file
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_backend(Box::new(JsonFileBackend::new(path)))
    }

    /// Open a store over any backend. A backend that fails to load leaves
    /// the store empty.
    pub fn with_backend(backend: Box<dyn RecordBackend>) -> Self {
        let records = match backend.load() {
            Ok(records) => {
                log::info!(
                    "Memory bank loaded {} phrases from {}",
                    records.len(),
                    backend.describe()
                );
                records
            }
            Err(e) => {
                log::warn!(
                    "Failed to load memory bank from {}: {}. Starting with empty memory.",
                    backend.describe(),
                    e
                );
                Vec::new()
            }
        };

        Self {
            backend,
            records,
            phrases: PhraseResolver::new(),
        }
    }

    // ===== Writes =====

    /// Add a phrase, merging into an existing record with the same
    /// case-insensitive phrase.
    ///
    /// The stored phrase is the canonical phrase named by the lesson when
    /// one is supplied, otherwise `input.phrase`. On merge only non-empty
    /// supplied fields overwrite and `date_added` is refreshed. Write
    /// failures are logged; the status is returned regardless.
    pub fn add(&mut self, input: PhraseInput) -> AddStatus {
        let lesson_text = non_empty(input.lesson_text);
        let lesson_html = non_empty(input.lesson_html);
        let source_context = non_empty(input.source_context);
        let corrected_context = non_empty(input.corrected_context);

        let final_phrase = self.phrases.resolve(
            lesson_text.as_deref().unwrap_or_default(),
            lesson_html.as_deref().unwrap_or_default(),
            &input.phrase,
        );
        if final_phrase.is_empty() {
            return AddStatus::InvalidPhrase;
        }

        let key = phrase_key(&final_phrase);
        let now = timestamp_now();

        let status = if let Some(existing) = self.records.iter_mut().find(|r| r.key() == key) {
            // Merge: only overwrite fields that are provided
            if !input.meaning.trim().is_empty() {
                existing.meaning = input.meaning;
            }
            if source_context.is_some() {
                existing.source_context = source_context;
            }
            if corrected_context.is_some() {
                existing.corrected_context = corrected_context;
            }
            if lesson_text.is_some() {
                existing.lesson_text = lesson_text;
            }
            if lesson_html.is_some() {
                existing.lesson_html = lesson_html;
            }
            existing.date_added = now;
            AddStatus::Updated(final_phrase)
        } else {
            self.records.push(PhraseRecord {
                phrase: final_phrase.clone(),
                meaning: input.meaning,
                date_added: now,
                source_context,
                corrected_context,
                lesson_text,
                lesson_html,
                ..Default::default()
            });
            AddStatus::Added(final_phrase)
        };

        if let Err(e) = self.persist() {
            log::error!("Failed to save memory bank to {}: {}", self.backend.describe(), e);
        }
        status
    }

    /// Rewrite the backing store from memory
    pub fn persist(&mut self) -> Result<()> {
        self.backend.save(&self.records)?;
        log::info!(
            "Memory bank saved {} phrases to {}",
            self.records.len(),
            self.backend.describe()
        );
        Ok(())
    }

    /// Mutable access for in-place repair passes; call [`persist`](Self::persist) afterwards
    pub(crate) fn records_mut(&mut self) -> &mut Vec<PhraseRecord> {
        &mut self.records
    }

    // ===== Reads =====

    /// Stored records exactly as persisted
    pub fn records(&self) -> &[PhraseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Case-insensitive lookup by phrase
    pub fn find(&self, phrase: &str) -> Option<&PhraseRecord> {
        let key = phrase_key(phrase);
        if key.is_empty() {
            return None;
        }
        self.records.iter().find(|r| r.key() == key)
    }

    /// Find the record a teaching call most likely wrote.
    ///
    /// Tries the canonical phrase, then the requested phrase, then an exact
    /// corrected-context match, then the most recently added record.
    pub fn locate(&self, canonical: &str, phrase: &str, context: Option<&str>) -> Option<&PhraseRecord> {
        if let Some(record) = self.find(canonical).or_else(|| self.find(phrase)) {
            return Some(record);
        }

        if let Some(context) = context.map(str::trim).filter(|c| !c.is_empty()) {
            let by_context = self
                .records
                .iter()
                .find(|r| r.corrected_context.as_deref().map(str::trim) == Some(context));
            if by_context.is_some() {
                return by_context;
            }
        }

        self.records.iter().max_by(|a, b| a.date_added.cmp(&b.date_added))
    }

    /// Uniform sample without replacement. When fewer records exist than
    /// requested, the result is a single error entry.
    pub fn sample<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<SampleEntry> {
        if self.records.len() < count {
            return vec![SampleEntry::Error {
                error: format!(
                    "Not enough phrases (needed {}, found {}). Continue teaching the user first.",
                    count,
                    self.records.len()
                ),
            }];
        }

        self.records
            .choose_multiple(rng, count)
            .map(|r| {
                SampleEntry::Phrase(PhraseView {
                    phrase: r.phrase.clone(),
                    meaning: r.meaning.clone(),
                })
            })
            .collect()
    }

    /// Record count summary
    pub fn stats(&self) -> String {
        format!("Memory Bank currently holds {} unique phrases.", self.records.len())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
