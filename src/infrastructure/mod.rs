// src/infrastructure/mod.rs
pub mod config;
pub mod file_backend;
pub mod markdown;
pub mod preview;

pub use config::Config;
pub use file_backend::JsonFileBackend;
pub use preview::BrowserPreview;
