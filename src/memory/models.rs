//! Phrase memory data models

use std::collections::BTreeMap;
use std::fmt;

use chrono::Local;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Timestamp format of `date_added`. Lexicographic order matches
/// chronological order, which record lookup relies on.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time in [`TIMESTAMP_FORMAT`]
pub fn timestamp_now() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Older files sometimes hold `null` where a string is expected
fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A phrase taught to the learner, as persisted in the memory file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhraseRecord {
    /// Canonical phrase, unique case-insensitively within a store
    #[serde(default, deserialize_with = "string_or_null")]
    pub phrase: String,
    /// Definition text
    #[serde(default, deserialize_with = "string_or_null")]
    pub meaning: String,
    /// Creation or last merge time
    #[serde(default, deserialize_with = "string_or_null")]
    pub date_added: String,
    /// Sentence as the learner originally wrote it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_context: Option<String>,
    /// Corrected sentence the lesson was built from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrected_context: Option<String>,
    /// Lesson body in the standard labeled layout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lesson_text: Option<String>,
    /// HTML rendering of `lesson_text`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lesson_html: Option<String>,
    /// Example list written by older versions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
    /// Definition field written by older versions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    /// Fields this version does not know about, kept on rewrite
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl PhraseRecord {
    /// Identity key used for duplicate detection
    pub fn key(&self) -> String {
        phrase_key(&self.phrase)
    }

    /// Meaning, or the legacy definition when the meaning is blank
    pub fn meaning_or_definition(&self) -> &str {
        let meaning = self.meaning.trim();
        if meaning.is_empty() {
            self.definition.as_deref().map(str::trim).unwrap_or_default()
        } else {
            meaning
        }
    }
}

/// Case-insensitive identity key of a phrase
pub fn phrase_key(phrase: &str) -> String {
    phrase.trim().to_lowercase()
}

/// Fields supplied to [`PhraseStore::add`](super::PhraseStore::add)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhraseInput {
    pub phrase: String,
    pub meaning: String,
    #[serde(default)]
    pub source_context: Option<String>,
    #[serde(default)]
    pub corrected_context: Option<String>,
    #[serde(default)]
    pub lesson_text: Option<String>,
    #[serde(default)]
    pub lesson_html: Option<String>,
}

impl PhraseInput {
    pub fn new(phrase: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
            meaning: meaning.into(),
            ..Default::default()
        }
    }
}

/// Result of an add call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddStatus {
    /// A new record was appended under this phrase
    Added(String),
    /// An existing record with this phrase was merged
    Updated(String),
    /// The phrase resolved to nothing, the store is unchanged
    InvalidPhrase,
}

impl AddStatus {
    /// Phrase the record was stored under
    pub fn phrase(&self) -> Option<&str> {
        match self {
            AddStatus::Added(p) | AddStatus::Updated(p) => Some(p),
            AddStatus::InvalidPhrase => None,
        }
    }
}

impl fmt::Display for AddStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddStatus::Added(p) => write!(
                f,
                "Successfully added '{}' to the memory bank for future testing.",
                p
            ),
            AddStatus::Updated(p) => write!(f, "Updated existing entry for '{}' in the memory bank.", p),
            AddStatus::InvalidPhrase => write!(f, "No valid phrase provided to add."),
        }
    }
}

/// Record view handed to quiz consumers, without the context fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseView {
    pub phrase: String,
    pub meaning: String,
}

/// One element of a sample result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SampleEntry {
    Phrase(PhraseView),
    Error { error: String },
}

impl SampleEntry {
    pub fn is_error(&self) -> bool {
        matches!(self, SampleEntry::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_record_deserializes() {
        let json = r#"{
            "phrase": "Break a leg",
            "meaning": null,
            "definition": "good luck",
            "examples": ["Break a leg tonight!"],
            "rating": 5
        }"#;
        let record: PhraseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.meaning, "");
        assert_eq!(record.date_added, "");
        assert_eq!(record.meaning_or_definition(), "good luck");
        assert_eq!(record.examples.len(), 1);
        assert_eq!(record.extra.get("rating"), Some(&Value::from(5)));
        assert_eq!(record.key(), "break a leg");
    }

    #[test]
    fn test_optional_fields_omitted_when_absent() {
        let record = PhraseRecord {
            phrase: "crash".to_string(),
            meaning: "sleep".to_string(),
            date_added: "2026-01-02 03:04:05".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 3);
        assert!(value.get("source_context").is_none());
        assert!(value.get("examples").is_none());
    }

    #[test]
    fn test_timestamp_format() {
        let ts = timestamp_now();
        assert_eq!(ts.len(), 19);
        assert!(chrono::NaiveDateTime::parse_from_str(&ts, TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn test_sample_entry_shapes() {
        let error = SampleEntry::Error {
            error: "not enough".to_string(),
        };
        assert_eq!(serde_json::to_string(&error).unwrap(), r#"{"error":"not enough"}"#);
        assert!(error.is_error());

        let view = SampleEntry::Phrase(PhraseView {
            phrase: "crash".to_string(),
            meaning: "sleep".to_string(),
        });
        assert_eq!(
            serde_json::to_string(&view).unwrap(),
            r#"{"phrase":"crash","meaning":"sleep"}"#
        );
    }

    #[test]
    fn test_add_status_messages() {
        assert_eq!(
            AddStatus::Added("crash".to_string()).to_string(),
            "Successfully added 'crash' to the memory bank for future testing."
        );
        assert_eq!(
            AddStatus::Updated("crash".to_string()).to_string(),
            "Updated existing entry for 'crash' in the memory bank."
        );
        assert_eq!(AddStatus::InvalidPhrase.phrase(), None);
    }
}
