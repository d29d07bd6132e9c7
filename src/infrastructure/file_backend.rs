// src/infrastructure/file_backend.rs
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use crate::application::NoteBackend;
use crate::constants::{APP_DIR_NAME, NOTE_FILE_NAME};
use crate::domain::{DomainError, NoteData};

/// Stores the note as pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// `<data_dir>/sticky-md/note.json`, or `./sticky-md/note.json` when the
    /// platform has no data directory.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME)
            .join(NOTE_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl NoteBackend for JsonFileBackend {
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<NoteData, DomainError> {
        let json = tokio::fs::read_to_string(&self.path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => DomainError::NoteMissing(self.path.display().to_string()),
            _ => DomainError::LoadFailed(format!("{}: {}", self.path.display(), e)),
        })?;

        let note = serde_json::from_str(&json)
            .map_err(|e| DomainError::LoadFailed(format!("{}: {}", self.path.display(), e)))?;
        debug!("Read note file");
        Ok(note)
    }

    #[instrument(level = "debug", skip(self, data), fields(path = %self.path.display()))]
    async fn save(&self, data: &NoteData) -> Result<(), DomainError> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| DomainError::SaveFailed(format!("{}: {}", dir.display(), e)))?;
        }

        let json = serde_json::to_string_pretty(data)
            .map_err(|e| DomainError::SaveFailed(e.to_string()))?;

        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| DomainError::SaveFailed(format!("{}: {}", self.path.display(), e)))?;
        debug!(bytes = data.content.len(), "Wrote note file");
        Ok(())
    }
}
