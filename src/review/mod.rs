//! Review features over the phrase memory
//!
//! This module provides:
//! - Raw and derived listing/search
//! - Multiple-choice quiz generation
//! - Lexical checking of free-text answers

pub mod catalog;
pub mod evaluate;
pub mod quiz;

pub use catalog::PhraseCatalog;
pub use evaluate::{evaluate_answer, Evaluation, PASS_SCORE};
pub use quiz::{QuizGenerator, QuizQuestion, QuizResult, DEFAULT_CHOICES, UNSCORABLE};
