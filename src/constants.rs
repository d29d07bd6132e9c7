// src/constants.rs
//
// Application-wide constants. Each one names where it is used.

/// Quiet period before a scheduled note save is written, in milliseconds.
///
/// Every `save_note` call restarts this period; only the last payload of a
/// burst reaches the backend. Overridable with `[editor] save_debounce_ms`.
///
/// Used in: `application/note_store.rs`, `infrastructure/config.rs`
pub const SAVE_DEBOUNCE_MS: u64 = 500;

/// Directory name under the platform data/config directories.
///
/// Used in: `infrastructure/file_backend.rs`, `infrastructure/config.rs`
pub const APP_DIR_NAME: &str = "sticky-md";

/// File holding the persisted note record.
pub const NOTE_FILE_NAME: &str = "note.json";

/// Configuration file name inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Lowest opacity the preview applies; a fully transparent note could not be
/// found again on screen.
///
/// Used in: `ports/html.rs`
pub const MIN_DISPLAY_OPACITY: f64 = 0.2;

/// Delay in milliseconds after launching the browser before returning.
///
/// The preview lives in a temp dir that is removed when the process exits;
/// the browser needs a moment to open the file first.
///
/// Used in: `infrastructure/preview.rs`
pub const BROWSER_LAUNCH_DELAY_MS: u64 = 500;
