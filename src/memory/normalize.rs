//! Batch repair of stored records
//!
//! Reapplies the phrase and definition resolvers to every record's lesson
//! and tidies the context fields. Records written before the lesson layout
//! was standardized are the main target.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::models::{phrase_key, PhraseRecord};
use super::storage::{PhraseStore, Result};
use crate::lessons::{DefinitionResolver, PhraseResolver};

fn enumeration_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.\s*").expect("Invalid regex"))
}

/// Summary of a normalization pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeReport {
    /// Records examined
    pub examined: usize,
    /// Records with at least one field rewritten
    pub changed: usize,
    /// Records whose phrase was replaced, as (old, new)
    pub renamed: Vec<(String, String)>,
    /// Records whose meaning was replaced
    pub redefined: usize,
    /// Source contexts dropped as raw tutor scaffolding
    pub dropped_source_contexts: usize,
    /// Phrases now shared by more than one record
    pub collisions: Vec<String>,
    /// Whether the backing store was rewritten
    pub saved: bool,
}

/// Reruns lesson extraction over stored records
#[derive(Default)]
pub struct BatchNormalizer {
    phrases: PhraseResolver,
    definitions: DefinitionResolver,
}

impl BatchNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize records in place
    pub fn normalize_records(&self, records: &mut [PhraseRecord]) -> NormalizeReport {
        let mut report = NormalizeReport {
            examined: records.len(),
            ..Default::default()
        };

        for record in records.iter_mut() {
            let mut changed = false;
            let lesson_text = record.lesson_text.clone().unwrap_or_default();
            let lesson_html = record.lesson_html.clone().unwrap_or_default();

            if let Some(canonical) = self.phrases.resolve_from_lesson(&lesson_text, &lesson_html) {
                if canonical != record.phrase {
                    report
                        .renamed
                        .push((std::mem::take(&mut record.phrase), canonical.clone()));
                    record.phrase = canonical;
                    changed = true;
                }
            }

            let meaning = self
                .definitions
                .resolve(&lesson_text, &record.phrase, &record.meaning);
            if !meaning.is_empty() && meaning != record.meaning {
                record.meaning = meaning;
                report.redefined += 1;
                changed = true;
            }

            if let Some(source) = record.source_context.take() {
                if looks_like_scaffolding(&source) {
                    report.dropped_source_contexts += 1;
                    changed = true;
                } else {
                    let cleaned = clean_context(&source);
                    changed |= cleaned != source;
                    record.source_context = Some(cleaned);
                }
            }

            if let Some(corrected) = record.corrected_context.as_mut() {
                let cleaned = clean_context(corrected);
                if cleaned != *corrected {
                    *corrected = cleaned;
                    changed = true;
                }
            }

            if changed {
                report.changed += 1;
            }
        }

        report.collisions = find_collisions(records);
        for phrase in &report.collisions {
            log::warn!("Normalized records share the phrase '{}'", phrase);
        }
        report
    }
}

impl PhraseStore {
    /// Normalize every record and persist once if anything changed.
    /// With `dry_run` the store is left untouched.
    pub fn normalize(&mut self, dry_run: bool) -> Result<NormalizeReport> {
        let normalizer = BatchNormalizer::new();

        if dry_run {
            let mut copy = self.records().to_vec();
            return Ok(normalizer.normalize_records(&mut copy));
        }

        let mut report = normalizer.normalize_records(self.records_mut());
        if report.changed > 0 {
            self.persist()?;
            report.saved = true;
            log::info!("Memory normalized: {} of {} records changed", report.changed, report.examined);
        } else {
            log::info!("Memory normalization found no changes");
        }
        Ok(report)
    }
}

/// Raw corrector output saved as context by older versions
fn looks_like_scaffolding(context: &str) -> bool {
    context.contains("**") || context.contains("Corrected")
}

/// Remove bold markers and a leading enumeration
fn clean_context(text: &str) -> String {
    let text = text.replace("**", "");
    enumeration_re().replace(&text, "").trim().to_string()
}

fn find_collisions(records: &[PhraseRecord]) -> Vec<String> {
    let mut counts: HashMap<String, (usize, &str)> = HashMap::new();
    for record in records {
        let entry = counts.entry(phrase_key(&record.phrase)).or_insert((0, record.phrase.as_str()));
        entry.0 += 1;
    }
    let mut collisions: Vec<String> = counts
        .into_values()
        .filter(|(count, _)| *count > 1)
        .map(|(_, phrase)| phrase.to_string())
        .collect();
    collisions.sort();
    collisions
}
