//! Quit confirmation popup.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::style::Styles;

use super::detail::centered_rect;

/// Renders the quit confirmation dialog.
pub fn render_quit_confirm(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(36, 16, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Quit ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().fg(Color::White).bg(Color::Black));

    let lines = vec![
        Line::from(""),
        Line::from("  Quit the dashboard?"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Enter/y", Styles::help_key()),
            Span::styled(" quit   ", Styles::help()),
            Span::styled("Esc/n", Styles::help_key()),
            Span::styled(" stay", Styles::help()),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
}
