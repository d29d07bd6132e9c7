// src/domain/note.rs
use serde::{Deserialize, Serialize};

/// Content shown when no note could be loaded.
pub const WELCOME_CONTENT: &str = "# Welcome to Sticky MD\n\nStart typing your **markdown** here...\n\n- [x] Always on top\n- [x] Draggable\n- [ ] Your notes here";

/// The persisted note record. Every save transmits the whole record.
///
/// `color`, `opacity` and `border_radius` are passed through as-is; nothing
/// here validates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteData {
    pub content: String,
    pub color: String,
    pub pinned: bool,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub border_radius: u32,
}

fn default_opacity() -> f64 {
    1.0
}

impl NoteData {
    /// The built-in record handed out when the backend cannot provide one.
    pub fn welcome() -> Self {
        Self {
            content: WELCOME_CONTENT.to_string(),
            color: "yellow".to_string(),
            pinned: true,
            opacity: 1.0,
            border_radius: 0,
        }
    }
}

impl Default for NoteData {
    fn default() -> Self {
        Self::welcome()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_welcome_note_when_inspecting_then_has_fixed_defaults() {
        let note = NoteData::welcome();

        assert_eq!(note.color, "yellow");
        assert!(note.pinned);
        assert_eq!(note.opacity, 1.0);
        assert_eq!(note.border_radius, 0);
        assert!(note.content.contains("Sticky MD"));
        assert!(note.content.contains("- [x] Always on top"));
        assert!(note.content.contains("- [ ] Your notes here"));
    }

    #[test]
    fn given_json_without_opacity_and_radius_when_deserializing_then_uses_defaults() {
        let json = r#"{"content":"hi","color":"blue","pinned":false}"#;

        let note: NoteData = serde_json::from_str(json).expect("Should deserialize");

        assert_eq!(note.content, "hi");
        assert_eq!(note.color, "blue");
        assert!(!note.pinned);
        assert_eq!(note.opacity, 1.0);
        assert_eq!(note.border_radius, 0);
    }

    #[test]
    fn given_unknown_color_when_deserializing_then_passes_through() {
        let json = r#"{"content":"","color":"chartreuse","pinned":true,"opacity":0.4,"border_radius":12}"#;

        let note: NoteData = serde_json::from_str(json).expect("Should deserialize");

        assert_eq!(note.color, "chartreuse");
        assert_eq!(note.opacity, 0.4);
        assert_eq!(note.border_radius, 12);
    }
}
