//! Tutoring agents for phrasenav
//!
//! This module provides:
//! - The text generation seam and its Gemini HTTP client
//! - The corrector and teacher agents
//! - The end-to-end submit flow

pub mod client;
pub mod corrector;
pub mod session;
pub mod teacher;

pub use client::{GeminiClient, GenerationError, TextGenerator};
pub use corrector::CorrectorAgent;
pub use session::{corrector_html, SessionError, SubmitOutcome, TutorSession};
pub use teacher::TeacherAgent;
