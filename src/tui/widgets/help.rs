//! Help popup.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;

use super::detail::{render_popup_frame, section, text_line};

const KEYS: &[(&str, &str)] = &[
    ("Tab / Shift-Tab", "next / previous tab"),
    ("1-7", "jump to tab"),
    ("Up / Down", "move cursor (flips pages at the edges)"),
    ("PgUp / PgDn", "previous / next page"),
    ("Home / End", "first / last page"),
    ("/", "search the current tab"),
    ("s", "cycle sort column"),
    ("r", "reverse sort direction"),
    ("Space", "select / deselect row"),
    ("a", "select / deselect all visible rows"),
    ("Enter", "open detail popup (ANN, EXP, RUN)"),
    ("i", "show labeling instructions (TSK, QUE)"),
    ("c", "comment on the annotation under the cursor (ANN)"),
    ("e", "export the current tab to CSV"),
    ("?", "toggle this help"),
    ("q", "quit"),
];

/// Renders the help popup.
pub fn render_help(frame: &mut Frame, area: Rect, scroll: &mut usize) {
    let mut lines: Vec<Line<'static>> = vec![section("Keys")];
    for (key, action) in KEYS {
        lines.push(text_line(&format!("{key:<16} {action}")));
    }
    lines.push(Line::from(""));
    lines.push(section("Notes"));
    lines.push(text_line(
        "Search matches the tab's text columns, case-insensitively.",
    ));
    lines.push(text_line(
        "Selections survive searches and page flips; export prefers them.",
    ));
    render_popup_frame(frame, area, "Help", lines, scroll);
}
