use lazy_static::lazy_static;
use pulldown_cmark::{html, CowStr, Event, LinkType, Options, Parser, Tag, TagEnd, TextMergeStream};
use regex::Regex;
use tracing::{instrument, trace};

use super::sanitizer;

lazy_static! {
    // GFM autolink literals: the host must start with a letter or digit;
    // trailing punctuation is trimmed afterwards
    static ref AUTOLINK_REGEX: Regex = Regex::new(r"(?:\bhttps?://|\bwww\.)[\p{L}\p{N}][^\s<>]*")
        .expect("Failed to compile autolink regex");
}

const TASK_ITEM_OPEN: &str = "<li class=\"task-list-item\">";
const CHECKED_GLYPH: &str = "&#x2611;";
const UNCHECKED_GLYPH: &str = "&#x2610;";

/// Parser options shared by rendering and task lookup, so checkbox indices
/// agree between the two.
pub(crate) fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// Render markdown to sanitized HTML.
///
/// Task-list items become `<span class="md-checkbox">` elements numbered
/// from zero in document order; the numbering restarts on every call.
#[instrument(level = "debug", skip(source), fields(len = source.len()))]
pub fn render_markdown(source: &str) -> String {
    let (raw, tasks) = render_unsanitized(source);
    trace!(tasks, "Rendered markdown before sanitizing");
    sanitizer::sanitize(&raw)
}

/// Render markdown to HTML without sanitizing; returns the fragment and the
/// number of checkboxes emitted.
pub(crate) fn render_unsanitized(source: &str) -> (String, usize) {
    let events: Vec<Event> = TextMergeStream::new(Parser::new_ext(source, parser_options())).collect();

    let mut next_checkbox = 0usize;
    let mut link_depth = 0usize;
    let mut in_code_block = false;
    let mut rewritten: Vec<Event> = Vec::with_capacity(events.len());

    for (ix, event) in events.iter().enumerate() {
        match event {
            Event::Start(Tag::Item) if starts_task_item(&events, ix) => {
                rewritten.push(Event::Html(CowStr::Borrowed(TASK_ITEM_OPEN)));
            }
            Event::TaskListMarker(checked) => {
                let index = next_checkbox;
                next_checkbox += 1;
                rewritten.push(Event::InlineHtml(checkbox_span(index, *checked).into()));
            }
            Event::SoftBreak => rewritten.push(Event::HardBreak),
            Event::Start(Tag::Link { .. }) | Event::Start(Tag::Image { .. }) => {
                link_depth += 1;
                rewritten.push(event.clone());
            }
            Event::End(TagEnd::Link) | Event::End(TagEnd::Image) => {
                link_depth = link_depth.saturating_sub(1);
                rewritten.push(event.clone());
            }
            Event::Start(Tag::CodeBlock(_)) => {
                in_code_block = true;
                rewritten.push(event.clone());
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                rewritten.push(event.clone());
            }
            Event::Text(text) if link_depth == 0 && !in_code_block => {
                push_autolinked(&mut rewritten, text);
            }
            _ => rewritten.push(event.clone()),
        }
    }

    let mut html_output = String::new();
    html::push_html(&mut html_output, rewritten.into_iter());
    (html_output, next_checkbox)
}

/// The parser puts the task marker first in the item, or first in the item's
/// paragraph for loose lists.
fn starts_task_item(events: &[Event], item_ix: usize) -> bool {
    match events.get(item_ix + 1) {
        Some(Event::TaskListMarker(_)) => true,
        Some(Event::Start(Tag::Paragraph)) => {
            matches!(events.get(item_ix + 2), Some(Event::TaskListMarker(_)))
        }
        _ => false,
    }
}

fn checkbox_span(index: usize, checked: bool) -> String {
    let (class, glyph) = if checked {
        ("md-checkbox checked", CHECKED_GLYPH)
    } else {
        ("md-checkbox", UNCHECKED_GLYPH)
    };
    format!(
        r#"<span class="{class}" data-checkbox-index="{index}" role="checkbox" aria-checked="{checked}" tabindex="0">{glyph}</span>"#
    )
}

fn push_autolinked<'a>(out: &mut Vec<Event<'a>>, text: &CowStr<'a>) {
    let mut last = 0;
    for found in AUTOLINK_REGEX.find_iter(text) {
        let link = trim_link_end(found.as_str());
        if link.is_empty() {
            continue;
        }
        let start = found.start();
        let end = start + link.len();

        if start > last {
            out.push(Event::Text(text[last..start].to_string().into()));
        }
        let dest = if link.starts_with("www.") {
            format!("http://{link}")
        } else {
            link.to_string()
        };
        out.push(Event::Start(Tag::Link {
            link_type: LinkType::Autolink,
            dest_url: dest.into(),
            title: CowStr::Borrowed(""),
            id: CowStr::Borrowed(""),
        }));
        out.push(Event::Text(link.to_string().into()));
        out.push(Event::End(TagEnd::Link));
        last = end;
    }

    if last == 0 {
        out.push(Event::Text(text.clone()));
    } else if last < text.len() {
        out.push(Event::Text(text[last..].to_string().into()));
    }
}

/// Strip trailing punctuation, keeping a closing paren that balances one
/// inside the link.
fn trim_link_end(candidate: &str) -> &str {
    let mut link = candidate;
    while let Some(last) = link.chars().last() {
        let strip = match last {
            '.' | ',' | ':' | ';' | '!' | '?' | '\'' | '"' | '*' | '_' | '~' => true,
            ')' => link.matches(')').count() > link.matches('(').count(),
            _ => false,
        };
        if !strip {
            break;
        }
        link = &link[..link.len() - last.len_utf8()];
    }
    link
}
