//! Runtime configuration
//!
//! Resolution order: built-in defaults, then an optional TOML file, then
//! environment variables.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::memory::MEMORY_FILE_NAME;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-09-2025";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_MEMORY_FILE: &str = "PHRASENAV_MEMORY_FILE";
pub const ENV_MODEL: &str = "PHRASENAV_MODEL";
pub const ENV_API_BASE: &str = "PHRASENAV_API_BASE";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Could not determine a data directory")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Memory bank file
    pub memory_file: PathBuf,
    /// Text generation API key, never written back
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    /// HTTP timeout for text generation calls
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        let memory_file = default_data_dir()
            .map(|dir| dir.join(MEMORY_FILE_NAME))
            .unwrap_or_else(|_| PathBuf::from(MEMORY_FILE_NAME));

        Self {
            memory_file,
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// `<data_local_dir>/phrasenav`
pub fn default_data_dir() -> Result<PathBuf> {
    dirs::data_local_dir()
        .map(|dir| dir.join("phrasenav"))
        .ok_or(ConfigError::DataDirNotFound)
}

/// `<config_dir>/phrasenav/config.toml`, if a config directory exists
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("phrasenav").join("config.toml"))
}

impl Config {
    /// Load configuration. An explicit `path` must exist; the default path
    /// is used only when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        config.apply_env(|key| env::var(key).ok());
        Ok(config)
    }

    /// Parse a TOML file on top of the defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply environment overrides through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = lookup(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(file) = lookup(ENV_MEMORY_FILE) {
            self.memory_file = PathBuf::from(file);
        }
        if let Some(model) = lookup(ENV_MODEL) {
            self.model = model;
        }
        if let Some(base) = lookup(ENV_API_BASE) {
            self.api_base = base;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.timeout_secs, 120);
        assert!(config.api_key.is_none());
        assert!(config.memory_file.ends_with(MEMORY_FILE_NAME));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "memory_file = \"/tmp/bank.json\"\ntimeout_secs = 30\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.memory_file, PathBuf::from("/tmp/bank.json"));
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "timeout_secs = \"soon\"").unwrap();
        assert!(matches!(Config::from_file(&path), Err(ConfigError::Toml(_))));
        assert!(matches!(
            Config::load(Some(temp_dir.path().join("missing.toml").as_path())),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_API_KEY, "secret"),
            (ENV_MODEL, "gemini-test"),
            (ENV_API_BASE, "  "),
        ]);
        let mut config = Config::default();
        config.apply_env(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.model, "gemini-test");
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_api_key_never_serialized() {
        let config = Config {
            api_key: Some("secret".to_string()),
            ..Default::default()
        };
        let text = toml::to_string(&config).unwrap();
        assert!(!text.contains("secret"));
        assert!(text.contains("timeout_secs = 120"));
    }
}
