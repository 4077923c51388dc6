//! Phrase memory for phrasenav
//!
//! This module provides:
//! - Phrase records as persisted in the memory bank file
//! - The phrase store (case-insensitive identity, merge-on-duplicate)
//! - Random sampling for review
//! - Batch normalization of legacy records

pub mod models;
pub mod normalize;
pub mod storage;

pub use models::*;
pub use normalize::{BatchNormalizer, NormalizeReport};
pub use storage::{
    InMemoryBackend, JsonFileBackend, PhraseStore, RecordBackend, StoreError, MEMORY_FILE_NAME,
};
