//! Instructions popup: rendered labeling instructions for a task.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;

use crate::instructions::{Category, InstructionDoc};

use super::detail::render_popup_frame;

/// Renders the generated instruction markdown for a task (TSK/QUE tabs, `i`).
pub fn render_instructions(
    frame: &mut Frame,
    area: Rect,
    task_title: &str,
    category: Category,
    scroll: &mut usize,
) {
    let doc = InstructionDoc::new(task_title, category);
    let markdown = doc.render();
    let lines: Vec<Line<'static>> = markdown
        .lines()
        .map(|l| Line::from(l.to_string()))
        .collect();
    let title = format!("Instructions: {task_title}");
    render_popup_frame(frame, area, &title, lines, scroll);
}
