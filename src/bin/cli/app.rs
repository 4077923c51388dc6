use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use phrasenav_lib::config::Config;
use phrasenav_lib::memory::PhraseStore;
use phrasenav_lib::review::{PhraseCatalog, QuizGenerator};
use phrasenav_lib::tutor::{GeminiClient, TutorSession};

/// Shared application state for CLI commands
pub struct App {
    pub config: Config,
    pub store: PhraseStore,
    pub catalog: PhraseCatalog,
    pub quiz: QuizGenerator,
}

impl App {
    /// Load configuration and open the memory bank
    pub fn new(config_path: Option<&Path>, memory_file: Option<PathBuf>) -> Result<Self> {
        let mut config = Config::load(config_path).context("Failed to load configuration")?;
        if let Some(path) = memory_file {
            config.memory_file = path;
        }

        let store = PhraseStore::open(config.memory_file.clone());

        Ok(Self {
            config,
            store,
            catalog: PhraseCatalog::new(),
            quiz: QuizGenerator::new(),
        })
    }

    /// Text generation client from the configured key
    pub fn generator(&self) -> Result<GeminiClient> {
        GeminiClient::from_config(&self.config).context("Failed to create text generation client")
    }

    /// Tutoring session over the configured text generation service
    pub fn session(&self) -> Result<TutorSession<GeminiClient>> {
        Ok(TutorSession::new(self.generator()?))
    }
}
