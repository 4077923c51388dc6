pub mod config;
pub mod corrector;
pub mod lessons;
pub mod memory;
pub mod review;
pub mod tutor;

pub use config::Config;
pub use memory::{PhraseRecord, PhraseStore};
