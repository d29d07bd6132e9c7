// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("No note stored at {0}")]
    NoteMissing(String),
    #[error("Failed to load note: {0}")]
    LoadFailed(String),
    #[error("Failed to save note: {0}")]
    SaveFailed(String),
    #[error("No task item at checkbox index {index} (note has {count})")]
    TaskIndexOutOfRange { index: usize, count: usize },
}
