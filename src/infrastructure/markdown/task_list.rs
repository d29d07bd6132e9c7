use pulldown_cmark::{Event, Parser};
use std::ops::Range;
use tracing::{debug, instrument};

use super::converter::parser_options;
use crate::domain::DomainError;

/// A task-list marker (`[ ]`, `[x]`) located in markdown source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskMarker {
    /// Same value the renderer puts into `data-checkbox-index`.
    pub index: usize,
    pub checked: bool,
    /// Byte range of the marker as reported by the parser.
    pub span: Range<usize>,
    /// Rest of the marker's line.
    pub label: String,
}

/// Every task marker in render order.
pub fn task_markers(source: &str) -> Vec<TaskMarker> {
    Parser::new_ext(source, parser_options())
        .into_offset_iter()
        .filter_map(|(event, span)| match event {
            Event::TaskListMarker(checked) => Some((checked, span)),
            _ => None,
        })
        .enumerate()
        .map(|(index, (checked, span))| TaskMarker {
            index,
            checked,
            label: label_after(source, &span),
            span,
        })
        .collect()
}

/// Byte offset of the marker's `[`, tolerating a span that starts just past it.
fn marker_open(source: &str, span: &Range<usize>) -> Option<usize> {
    let bytes = source.as_bytes();
    (span.start.saturating_sub(1)..bytes.len().saturating_sub(2))
        .find(|&ix| bytes[ix] == b'[' && bytes[ix + 2] == b']')
}

fn label_after(source: &str, span: &Range<usize>) -> String {
    let rest = marker_open(source, span).map_or("", |open| &source[open + 3..]);
    rest.lines().next().unwrap_or("").trim().to_string()
}

pub fn count_tasks(source: &str) -> usize {
    task_markers(source).len()
}

/// Flip the task with the given checkbox index and return the new source.
#[instrument(level = "debug", skip(source))]
pub fn toggle_task(source: &str, index: usize) -> Result<String, DomainError> {
    let markers = task_markers(source);
    let marker = markers
        .get(index)
        .ok_or(DomainError::TaskIndexOutOfRange {
            index,
            count: markers.len(),
        })?;

    let open = marker_open(source, &marker.span).ok_or(DomainError::TaskIndexOutOfRange {
        index,
        count: markers.len(),
    })?;
    let state = open + 1;
    let replacement = if marker.checked { " " } else { "x" };
    debug!(index, checked = marker.checked, "Toggling task marker");

    let mut toggled = String::with_capacity(source.len());
    toggled.push_str(&source[..state]);
    toggled.push_str(replacement);
    toggled.push_str(&source[state + 1..]);
    Ok(toggled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::note::WELCOME_CONTENT;

    #[test]
    fn given_welcome_content_when_listing_markers_then_finds_three_tasks() {
        let markers = task_markers(WELCOME_CONTENT);

        assert_eq!(markers.len(), 3);
        assert_eq!(
            markers.iter().map(|m| m.checked).collect::<Vec<_>>(),
            vec![true, true, false]
        );
        assert_eq!(markers[1].label, "Draggable");
        let toggled = toggle_task(WELCOME_CONTENT, 2).expect("Toggle should succeed");
        assert!(toggled.ends_with("- [x] Your notes here"));
    }

    #[test]
    fn given_unchecked_task_when_toggling_then_checks_only_that_task() {
        let source = "- [ ] one\n- [ ] two\n- [ ] three";

        let toggled = toggle_task(source, 1).expect("Toggle should succeed");

        assert_eq!(toggled, "- [ ] one\n- [x] two\n- [ ] three");
    }

    #[test]
    fn given_checked_task_when_toggling_then_unchecks_it() {
        let source = "text\n\n- [X] upper\n- [x] lower";

        let toggled = toggle_task(source, 0).expect("Toggle should succeed");

        assert_eq!(toggled, "text\n\n- [ ] upper\n- [x] lower");
    }

    #[test]
    fn given_nested_tasks_when_toggling_then_follows_render_order() {
        let source = "- [ ] parent\n  - [ ] child\n- [ ] sibling";

        let toggled = toggle_task(source, 1).expect("Toggle should succeed");

        assert_eq!(toggled, "- [ ] parent\n  - [x] child\n- [ ] sibling");
    }

    #[test]
    fn given_plain_list_when_counting_then_returns_zero() {
        assert_eq!(count_tasks("- a\n- b\n\n1. c"), 0);
    }

    #[test]
    fn given_index_past_end_when_toggling_then_returns_error() {
        let result = toggle_task("- [ ] only", 3);

        match result.expect_err("Should fail") {
            DomainError::TaskIndexOutOfRange { index, count } => {
                assert_eq!(index, 3);
                assert_eq!(count, 1);
            }
            other => panic!("Expected TaskIndexOutOfRange, got {other:?}"),
        }
    }
}
