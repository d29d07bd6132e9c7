// src/ports/html.rs
use crate::constants::MIN_DISPLAY_OPACITY;
use crate::domain::NoteData;
use crate::infrastructure::markdown::render_markdown;
use crate::util::text::first_line_text;
use html_escape::{encode_double_quoted_attribute, encode_text};
use tracing::instrument;

type Theme = (&'static str, &'static str, &'static str);

/// Used for unknown color labels.
const DEFAULT_THEME: Theme = ("yellow", "#fff9b1", "#e6d85c");

/// Background and accent colors per note color label.
const THEMES: &[Theme] = &[
    DEFAULT_THEME,
    ("pink", "#ffd1dc", "#e89aac"),
    ("blue", "#cfe8ff", "#7fb3e6"),
    ("green", "#d4f5c9", "#8fcf7a"),
    ("purple", "#e6d6ff", "#ab8ae0"),
    ("gray", "#ececec", "#b5b5b5"),
];

/// Renders a note as a standalone preview page.
#[derive(Debug, Default)]
pub struct HtmlPresenter;

impl HtmlPresenter {
    pub fn new() -> Self {
        Self
    }

    /// Unknown labels fall back to the yellow theme.
    fn theme(color: &str) -> (&'static str, &'static str) {
        let (_, background, accent) = THEMES
            .iter()
            .find(|(name, _, _)| name.eq_ignore_ascii_case(color))
            .unwrap_or(&DEFAULT_THEME);
        (background, accent)
    }

    #[instrument(level = "debug", skip(self, note), fields(color = %note.color))]
    pub fn render(&self, note: &NoteData) -> String {
        let body = render_markdown(&note.content);
        let title = match first_line_text(&body) {
            line if line.is_empty() => "Sticky MD".to_string(),
            line => line,
        };
        let (background, accent) = Self::theme(&note.color);
        let opacity = note.opacity.clamp(MIN_DISPLAY_OPACITY, 1.0);

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            line-height: 1.5;
            margin: 2rem auto;
            max-width: 420px;
            background-color: #3a3a3a;
        }}
        .note {{
            background: {background};
            border-top: 6px solid {accent};
            border-radius: {radius}px;
            opacity: {opacity};
            padding: 1rem 1.25rem;
            box-shadow: 0 4px 12px rgba(0,0,0,0.3);
        }}
        .note ul {{
            padding-left: 1.25rem;
        }}
        .task-list-item {{
            list-style: none;
            margin-left: -1.25rem;
        }}
        .md-checkbox {{
            cursor: pointer;
            margin-right: 0.4em;
            user-select: none;
        }}
        .md-checkbox.checked {{
            color: #555;
        }}
        pre {{
            white-space: pre-wrap;
            background-color: rgba(0,0,0,0.06);
            padding: 0.5rem;
            border-radius: 4px;
        }}
        .pin {{
            float: right;
            font-size: 0.8em;
            color: #666;
        }}
    </style>
</head>
<body>
    <div class="note note-{color_class}" data-pinned="{pinned}">
        <div class="pin">{pin}</div>
        {body}
    </div>
</body>
</html>"#,
            title = encode_text(&title),
            background = background,
            accent = accent,
            radius = note.border_radius,
            opacity = opacity,
            color_class = encode_double_quoted_attribute(&note.color),
            pinned = note.pinned,
            pin = if note.pinned { "pinned" } else { "" },
            body = body,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn note_with(color: &str, opacity: f64) -> NoteData {
        NoteData {
            color: color.to_string(),
            opacity,
            ..NoteData::welcome()
        }
    }

    #[test]
    fn given_welcome_note_when_rendering_then_page_has_title_and_checkboxes() {
        let html = HtmlPresenter::new().render(&NoteData::welcome());

        assert!(html.contains("<title>Welcome to Sticky MD</title>"));
        assert!(html.contains(r#"data-checkbox-index="2""#));
        assert!(html.contains("border-radius: 0px"));
        assert!(html.contains("opacity: 1;"));
    }

    #[rstest]
    #[case("yellow", "#fff9b1")]
    #[case("Blue", "#cfe8ff")]
    #[case("no-such-theme", "#fff9b1")]
    fn given_color_label_when_rendering_then_uses_matching_theme(
        #[case] color: &str,
        #[case] background: &str,
    ) {
        let html = HtmlPresenter::new().render(&note_with(color, 1.0));

        assert!(html.contains(&format!("background: {background};")));
    }

    #[test]
    fn given_unknown_color_when_resolving_theme_then_matches_first_theme() {
        let (_, background, accent) = THEMES[0];

        assert_eq!(HtmlPresenter::theme("mauve"), (background, accent));
    }

    #[rstest]
    #[case(0.0, "opacity: 0.2;")]
    #[case(0.65, "opacity: 0.65;")]
    #[case(3.0, "opacity: 1;")]
    fn given_opacity_when_rendering_then_clamps_for_display(
        #[case] opacity: f64,
        #[case] expected: &str,
    ) {
        let html = HtmlPresenter::new().render(&note_with("yellow", opacity));

        assert!(html.contains(expected));
    }

    #[test]
    fn given_hostile_color_label_when_rendering_then_escapes_attribute() {
        let html = HtmlPresenter::new().render(&note_with(r#""><script>x</script>"#, 1.0));

        assert!(!html.contains("<script>x"));
    }

    #[test]
    fn given_empty_content_when_rendering_then_falls_back_to_app_title() {
        let note = NoteData {
            content: String::new(),
            ..NoteData::welcome()
        };

        let html = HtmlPresenter::new().render(&note);

        assert!(html.contains("<title>Sticky MD</title>"));
    }
}
