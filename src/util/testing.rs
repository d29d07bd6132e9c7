// src/util/testing.rs

use anyhow::Result;
use async_trait::async_trait;
use std::env;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::NoteBackend;
use crate::domain::{DomainError, NoteData};

#[derive(Clone)]
enum LoadBehavior {
    Note(NoteData),
    Missing,
    Fail,
}

/// Shared mock backend for testing the note store.
///
/// Clones share their recorded saves, so keep a clone around before handing
/// the backend to a `NoteStore`.
///
/// # Examples
///
/// ```
/// use sticky_md::util::testing::MockNoteBackend;
/// use sticky_md::domain::NoteData;
///
/// let backend = MockNoteBackend::builder()
///     .with_note(NoteData::welcome())
///     .with_save_failure()
///     .build();
/// assert_eq!(backend.save_calls(), 0);
/// ```
#[derive(Clone)]
pub struct MockNoteBackend {
    load: LoadBehavior,
    fail_saves: bool,
    save_delay: Option<Duration>,
    save_calls: Arc<Mutex<usize>>,
    saved: Arc<Mutex<Vec<NoteData>>>,
}

impl MockNoteBackend {
    pub fn builder() -> MockNoteBackendBuilder {
        MockNoteBackendBuilder::new()
    }

    /// Payloads of successful saves, in completion order
    pub fn saved(&self) -> Vec<NoteData> {
        self.saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of save invocations, failed ones included
    pub fn save_calls(&self) -> usize {
        *self.save_calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl NoteBackend for MockNoteBackend {
    async fn load(&self) -> Result<NoteData, DomainError> {
        match &self.load {
            LoadBehavior::Note(note) => Ok(note.clone()),
            LoadBehavior::Missing => Err(DomainError::NoteMissing("mock note".to_string())),
            LoadBehavior::Fail => Err(DomainError::LoadFailed("mock backend unavailable".to_string())),
        }
    }

    async fn save(&self, data: &NoteData) -> Result<(), DomainError> {
        *self.save_calls.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        if let Some(delay) = self.save_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_saves {
            return Err(DomainError::SaveFailed("mock backend rejected save".to_string()));
        }
        self.saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(data.clone());
        Ok(())
    }
}

/// Builder for MockNoteBackend
pub struct MockNoteBackendBuilder {
    load: LoadBehavior,
    fail_saves: bool,
    save_delay: Option<Duration>,
}

impl MockNoteBackendBuilder {
    pub fn new() -> Self {
        Self {
            load: LoadBehavior::Fail,
            fail_saves: false,
            save_delay: None,
        }
    }

    /// Note returned by `load`
    pub fn with_note(mut self, note: NoteData) -> Self {
        self.load = LoadBehavior::Note(note);
        self
    }

    /// Make `load` report that no note was ever stored
    pub fn with_missing_note(mut self) -> Self {
        self.load = LoadBehavior::Missing;
        self
    }

    /// Make `load` fail (unreadable or corrupt note); the default
    pub fn with_load_failure(mut self) -> Self {
        self.load = LoadBehavior::Fail;
        self
    }

    /// Make every `save` fail
    pub fn with_save_failure(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    /// Hold each `save` for `delay` before it completes
    pub fn with_save_delay(mut self, delay: Duration) -> Self {
        self.save_delay = Some(delay);
        self
    }

    pub fn build(self) -> MockNoteBackend {
        MockNoteBackend {
            load: self.load,
            fail_saves: self.fail_saves,
            save_delay: self.save_delay,
            save_calls: Arc::new(Mutex::new(0)),
            saved: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Default for MockNoteBackendBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Create a filter for noisy modules
    let noisy_modules = ["html5ever", "ammonia", "mio"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
