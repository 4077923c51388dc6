//! Corrector output parsing
//!
//! This module provides:
//! - Teaching target extraction (phrase plus corrected context)
//! - Loose fallback detection when no suggestion block is recognized

pub mod fallback;
pub mod resolver;

pub use fallback::LooseTargetFinder;
pub use resolver::{split_output, TeachingTarget, TeachingTargetResolver, SUGGESTION_SEPARATOR};
