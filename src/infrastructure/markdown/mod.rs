pub mod converter;
pub mod sanitizer;
pub mod task_list;

pub use converter::render_markdown;
pub use task_list::{count_tasks, task_markers, toggle_task, TaskMarker};
