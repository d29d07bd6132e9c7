mod helpers;

use anyhow::Result;
use helpers::{shopping_note, TestNoteDir};
use sticky_md::application::NoteStore;
use sticky_md::infrastructure::JsonFileBackend;
use sticky_md::ports::HtmlPresenter;

#[tokio::test]
async fn given_persisted_note_when_presenting_then_page_uses_note_theme() -> Result<()> {
    // Arrange
    let dir = TestNoteDir::with_note(&shopping_note())?;
    let store = NoteStore::new(JsonFileBackend::new(&dir.note_path));
    let note = store.load_note().await;

    // Act
    let html = HtmlPresenter::new().render(&note);

    // Assert
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Shopping</title>"));
    assert!(html.contains("border-radius: 8px"));
    assert!(html.contains("opacity: 0.9;"));
    assert!(html.contains(r#"class="note note-green""#));
    assert!(html.contains(r#"data-pinned="false""#));
    Ok(())
}

#[tokio::test]
async fn given_nested_tasks_when_presenting_then_all_checkboxes_rendered() -> Result<()> {
    // Arrange
    let html = HtmlPresenter::new().render(&shopping_note());

    // Assert
    for index in 0..3 {
        assert!(html.contains(&format!(r#"data-checkbox-index="{index}""#)));
    }
    assert!(!html.contains(r#"data-checkbox-index="3""#));
    assert!(html.contains("<p>plain text</p>"));
    Ok(())
}
