// src/application/note_store.rs
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use crate::application::SaveDebouncer;
use crate::constants::SAVE_DEBOUNCE_MS;
use crate::domain::{DomainError, NoteData};

/// Host-side persistence of the note record.
#[async_trait]
pub trait NoteBackend: Send + Sync {
    async fn load(&self) -> Result<NoteData, DomainError>;

    /// Persist the full record; there are no partial updates.
    async fn save(&self, data: &NoteData) -> Result<(), DomainError>;
}

pub struct NoteStore<B: NoteBackend + 'static> {
    backend: Arc<B>,
    saves: SaveDebouncer<B>,
}

impl<B: NoteBackend + 'static> NoteStore<B> {
    pub fn new(backend: B) -> Self {
        Self::with_debounce(backend, Duration::from_millis(SAVE_DEBOUNCE_MS))
    }

    pub fn with_debounce(backend: B, delay: Duration) -> Self {
        let backend = Arc::new(backend);
        let saves = SaveDebouncer::new(Arc::clone(&backend), delay);
        Self { backend, saves }
    }

    /// Load the note, falling back to the welcome note on any backend failure.
    /// The fallback is not written back.
    #[instrument(level = "debug", skip(self))]
    pub async fn load_note(&self) -> NoteData {
        match self.backend.load().await {
            Ok(note) => {
                info!(color = %note.color, pinned = note.pinned, "Loaded note");
                note
            }
            Err(e) => {
                warn!(error = %e, "Falling back to welcome note");
                NoteData::welcome()
            }
        }
    }

    /// Load the note as the base for an edit that will be saved back.
    ///
    /// A note that was never stored starts from the welcome note; any other
    /// failure is returned so the caller does not overwrite a note it could
    /// not read.
    #[instrument(level = "debug", skip(self))]
    pub async fn load_for_edit(&self) -> Result<NoteData, DomainError> {
        match self.backend.load().await {
            Ok(note) => Ok(note),
            Err(DomainError::NoteMissing(location)) => {
                info!(%location, "No stored note, editing the welcome note");
                Ok(NoteData::welcome())
            }
            Err(e) => Err(e),
        }
    }

    /// Fire-and-forget save; bursts within the quiet period collapse into the
    /// last call.
    pub fn save_note(&self, data: NoteData) {
        self.saves.schedule(data);
    }

    /// Write any pending save immediately. Call before shutting down.
    pub async fn flush(&self) {
        self.saves.flush().await;
    }

    pub fn has_pending_save(&self) -> bool {
        self.saves.has_pending()
    }
}
