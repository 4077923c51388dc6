//! Lesson parsing for phrasenav
//!
//! This module provides:
//! - Ordered rule cascades for extracting values from free-form tutor output
//! - Canonical phrase, definition and example resolution
//! - The standardized lesson layout and its HTML rendering

pub mod cascade;
pub mod definition;
pub mod examples;
pub mod layout;
pub mod markup;
pub mod parser;
pub mod phrase;

pub use cascade::{Cascade, RuleMatch};
pub use definition::DefinitionResolver;
pub use examples::{ExampleRequest, ExampleResolver, EXAMPLE_COUNT};
pub use layout::{sanitize_lesson_text, to_html, StandardLesson};
pub use parser::{DerivedLesson, LessonParser};
pub use phrase::PhraseResolver;
