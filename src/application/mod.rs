// src/application/mod.rs
pub mod debouncer;
pub mod note_store;

pub use debouncer::SaveDebouncer;
pub use note_store::{NoteBackend, NoteStore};
