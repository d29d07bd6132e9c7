// src/application/debouncer.rs
//! Trailing-edge debounce for note saves.
//!
//! Every `schedule` call replaces the pending payload and re-arms the timer;
//! only the payload present when the timer fires is written. Fired saves go
//! through a single write lane that remembers the generation it last wrote,
//! so a payload older than one already written is skipped instead of
//! overwriting newer state at the backend.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::Mutex as AsyncMutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, trace};

use crate::application::NoteBackend;
use crate::domain::NoteData;

#[derive(Default)]
struct PendingSave {
    generation: u64,
    payload: Option<NoteData>,
    timer: Option<JoinHandle<()>>,
}

pub struct SaveDebouncer<B: NoteBackend + 'static> {
    backend: Arc<B>,
    delay: Duration,
    pending: Arc<Mutex<PendingSave>>,
    // generation of the last payload handed to the backend
    write_lane: Arc<AsyncMutex<u64>>,
}

impl<B: NoteBackend + 'static> SaveDebouncer<B> {
    pub fn new(backend: Arc<B>, delay: Duration) -> Self {
        Self {
            backend,
            delay,
            pending: Arc::new(Mutex::new(PendingSave::default())),
            write_lane: Arc::new(AsyncMutex::new(0)),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace the pending payload and restart the quiet period.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule(&self, payload: NoteData) {
        let mut pending = lock(&self.pending);
        if let Some(timer) = pending.timer.take() {
            timer.abort();
            trace!(superseded = pending.generation, "Cancelled pending save");
        }
        pending.generation += 1;
        pending.payload = Some(payload);

        let generation = pending.generation;
        let delay = self.delay;
        let backend = Arc::clone(&self.backend);
        let state = Arc::clone(&self.pending);
        let lane = Arc::clone(&self.write_lane);
        pending.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some((generation, payload)) = take_pending(&state, Some(generation)) {
                write(backend.as_ref(), &lane, generation, payload).await;
            }
        }));
        debug!(generation, delay_ms = delay.as_millis() as u64, "Save scheduled");
    }

    /// Cancel the timer and write the pending payload now, if there is one.
    pub async fn flush(&self) {
        if let Some((generation, payload)) = take_pending(&self.pending, None) {
            debug!(generation, "Flushing pending save");
            write(self.backend.as_ref(), &self.write_lane, generation, payload).await;
        }
    }

    pub fn has_pending(&self) -> bool {
        lock(&self.pending).payload.is_some()
    }
}

fn lock(pending: &Mutex<PendingSave>) -> MutexGuard<'_, PendingSave> {
    pending.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Take the payload for a firing timer (`Some(generation)`) or for an explicit
/// flush (`None`). A timer whose generation has been superseded gets nothing.
fn take_pending(
    pending: &Mutex<PendingSave>,
    fired: Option<u64>,
) -> Option<(u64, NoteData)> {
    let mut pending = lock(pending);
    match fired {
        Some(generation) if generation != pending.generation => return None,
        // the firing task is this handle; dropping it detaches
        Some(_) => pending.timer = None,
        None => {
            if let Some(timer) = pending.timer.take() {
                timer.abort();
            }
        }
    }
    let generation = pending.generation;
    pending.payload.take().map(|payload| (generation, payload))
}

async fn write<B: NoteBackend>(
    backend: &B,
    lane: &AsyncMutex<u64>,
    generation: u64,
    payload: NoteData,
) {
    let mut last_written = lane.lock().await;
    if generation <= *last_written {
        debug!(generation, last_written = *last_written, "Skipping stale save");
        return;
    }
    *last_written = generation;

    match backend.save(&payload).await {
        Ok(()) => debug!(generation, "Note saved"),
        Err(e) => error!(error = %e, generation, "Failed to save note"),
    }
}
