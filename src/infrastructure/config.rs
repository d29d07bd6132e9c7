// src/infrastructure/config.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::constants::{APP_DIR_NAME, CONFIG_FILE_NAME, SAVE_DEBOUNCE_MS};
use crate::infrastructure::JsonFileBackend;

/// TOML configuration for sticky-md
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub editor: EditorConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct StorageConfig {
    /// Empty means the platform data directory
    #[serde(default)]
    pub note_path: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EditorConfig {
    #[serde(default = "default_save_debounce_ms")]
    pub save_debounce_ms: u64,
}

fn default_save_debounce_ms() -> u64 { SAVE_DEBOUNCE_MS }

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            save_debounce_ms: default_save_debounce_ms(),
        }
    }
}

impl Config {
    /// `<config_dir>/sticky-md/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse TOML config")?;

        Ok(config)
    }

    /// Like `load`, but a missing file yields the defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path).with_context(|| format!("Invalid config at {}", path.display()))
    }

    pub fn note_path(&self) -> PathBuf {
        if self.storage.note_path.is_empty() {
            JsonFileBackend::default_path()
        } else {
            PathBuf::from(&self.storage.note_path)
        }
    }

    pub fn save_debounce(&self) -> Duration {
        Duration::from_millis(self.editor.save_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn given_toml_file_when_loading_then_reads_values() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(
            &config_path,
            r#"
[storage]
note_path = "/tmp/notes/sticky.json"

[editor]
save_debounce_ms = 250
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();

        assert_eq!(config.note_path(), PathBuf::from("/tmp/notes/sticky.json"));
        assert_eq!(config.save_debounce(), Duration::from_millis(250));
    }

    #[test]
    fn given_partial_toml_when_loading_then_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("partial.toml");
        fs::write(&config_path, "[editor]\n").unwrap();

        let config = Config::load(&config_path).unwrap();

        assert_eq!(config.editor.save_debounce_ms, 500);
        assert_eq!(config.note_path(), JsonFileBackend::default_path());
    }

    #[test]
    fn given_missing_file_when_loading_or_defaulting_then_returns_defaults() {
        let config = Config::load_or_default("/nonexistent/path/config.toml").unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn given_broken_toml_when_loading_or_defaulting_then_returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("broken.toml");
        fs::write(&config_path, "[editor\nsave_debounce_ms = ").unwrap();

        assert!(Config::load_or_default(&config_path).is_err());
    }
}
