// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use std::path::Path;

use anyhow::{Context, Result};
use application::{NoteBackend, NoteStore};
use infrastructure::markdown::{render_markdown, task_markers, toggle_task};
use infrastructure::{BrowserPreview, Config, JsonFileBackend};
use ports::HtmlPresenter;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use crate::cli::args::{Args, Command};

pub async fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting sticky-md with arguments");

    let config = load_config(args.config.as_deref())?;
    let note_path = args.note_file.clone().unwrap_or_else(|| config.note_path());

    debug!(path = %note_path.display(), "Using note file");
    let store = NoteStore::with_debounce(JsonFileBackend::new(&note_path), config.save_debounce());
    let output = execute(&store, args.command).await;
    // edits must reach the backend before the process exits
    store.flush().await;
    let output = output?;

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Run a note command against a store and return what should be printed.
pub async fn execute<B: NoteBackend + 'static>(store: &NoteStore<B>, command: Command) -> Result<String> {
    match command {
        Command::Render { path } => {
            let source = read_source(path.as_deref()).await?;
            Ok(render_markdown(&source))
        }
        Command::Show { json } => {
            let note = store.load_note().await;
            if json {
                serde_json::to_string_pretty(&note).context("Failed to serialize note")
            } else {
                Ok(note.content)
            }
        }
        Command::View => {
            let note = store.load_note().await;
            let html = HtmlPresenter::new().render(&note);

            let mut preview = BrowserPreview::new();
            let path = preview.write_page(&html)?;
            info!(path = %path.display(), "Opening preview");
            preview.open_in_browser(&path)?;
            Ok(String::new())
        }
        Command::Set {
            content_file,
            color,
            pinned,
            opacity,
            border_radius,
        } => {
            let mut note = store
                .load_for_edit()
                .await
                .context("Refusing to overwrite a note that could not be read")?;
            if let Some(path) = content_file {
                let from_stdin = path.as_os_str() == "-";
                note.content = read_source((!from_stdin).then_some(path.as_path())).await?;
            }
            if let Some(color) = color {
                note.color = color;
            }
            if let Some(pinned) = pinned {
                note.pinned = pinned;
            }
            if let Some(opacity) = opacity {
                note.opacity = opacity;
            }
            if let Some(border_radius) = border_radius {
                note.border_radius = border_radius;
            }
            store.save_note(note);
            Ok(String::new())
        }
        Command::Toggle { index } => {
            let mut note = store
                .load_for_edit()
                .await
                .context("Refusing to overwrite a note that could not be read")?;
            note.content = toggle_task(&note.content, index)?;
            let marker = task_markers(&note.content)
                .into_iter()
                .nth(index)
                .context("Toggled task disappeared")?;
            store.save_note(note);
            Ok(format_task(marker.index, marker.checked, &marker.label))
        }
        Command::Tasks => {
            let note = store.load_note().await;
            Ok(task_markers(&note.content)
                .iter()
                .map(|m| format_task(m.index, m.checked, &m.label))
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }
}

fn format_task(index: usize, checked: bool, label: &str) -> String {
    format!("{index}\t[{}]\t{label}", if checked { "x" } else { " " })
}

/// Explicit path must exist; the default location may be absent.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path).with_context(|| format!("Failed to load config {}", path.display())),
        None => match Config::default_path() {
            Some(path) => Config::load_or_default(path),
            None => Ok(Config::default()),
        },
    }
}

async fn read_source(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut source = String::new();
            tokio::io::stdin()
                .read_to_string(&mut source)
                .await
                .context("Failed to read stdin")?;
            Ok(source)
        }
    }
}
