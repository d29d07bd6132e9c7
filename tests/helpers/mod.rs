use anyhow::{Context, Result};
use std::path::PathBuf;
use sticky_md::domain::NoteData;
use tempfile::TempDir;

/// Temporary directory holding a note file
#[allow(dead_code)]
pub struct TestNoteDir {
    _temp_dir: TempDir,
    pub note_path: PathBuf,
}

#[allow(dead_code)]
impl TestNoteDir {
    /// Empty directory; the note file does not exist yet
    pub fn empty() -> Result<Self> {
        let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
        let note_path = temp_dir.path().join("sticky-md").join("note.json");
        Ok(Self {
            _temp_dir: temp_dir,
            note_path,
        })
    }

    /// Directory with `note` already persisted
    pub fn with_note(note: &NoteData) -> Result<Self> {
        let dir = Self::empty()?;
        std::fs::create_dir_all(dir.note_path.parent().context("note path has a parent")?)?;
        std::fs::write(&dir.note_path, serde_json::to_string_pretty(note)?)
            .context("Failed to write note fixture")?;
        Ok(dir)
    }

    pub fn read_note(&self) -> Result<NoteData> {
        let json = std::fs::read_to_string(&self.note_path).context("Failed to read note file")?;
        serde_json::from_str(&json).context("Failed to parse note file")
    }
}

#[allow(dead_code)]
pub fn shopping_note() -> NoteData {
    NoteData {
        content: "# Shopping\n\n- [ ] milk\n- [x] bread\n  - [ ] rye\n\nplain text".to_string(),
        color: "green".to_string(),
        pinned: false,
        opacity: 0.9,
        border_radius: 8,
    }
}
