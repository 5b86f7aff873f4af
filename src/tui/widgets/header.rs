//! Header bar and bottom status/input bar.

use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::state::{AppState, InputMode, Tab};
use crate::tui::style::Styles;

/// Renders the header bar: clock, mode label and tab strip.
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::horizontal([
        Constraint::Length(21), // Time
        Constraint::Length(7),  // Mode
        Constraint::Min(20),    // Tabs
    ])
    .split(area);

    let time_str = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    frame.render_widget(Paragraph::new(time_str).style(Styles::header()), chunks[0]);

    // All data is the built-in demo workspace.
    frame.render_widget(Paragraph::new(" DEMO ").style(Styles::header()), chunks[1]);

    let tabs: Vec<Span> = Tab::all()
        .iter()
        .enumerate()
        .flat_map(|(i, tab)| {
            let style = if *tab == state.current_tab {
                Styles::tab_active()
            } else {
                Styles::tab_inactive()
            };
            let num = format!(" {}:", i + 1);
            let name = format!("{} ", tab.name());
            vec![Span::styled(num, Styles::dim()), Span::styled(name, style)]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(tabs)).style(Styles::header()),
        chunks[2],
    );
}

/// Renders the bottom bar: the active input buffer, a status message, or the
/// key hint line.
pub fn render_bottom_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let line = match state.input_mode {
        InputMode::Search => Line::from(vec![
            Span::styled("search: ", Styles::help_key()),
            Span::styled(format!("{}_", state.search_input), Styles::input()),
            Span::styled("  (Enter apply, Esc cancel)", Styles::help()),
        ]),
        InputMode::Comment => Line::from(vec![
            Span::styled("comment: ", Styles::help_key()),
            Span::styled(format!("{}_", state.comment_input), Styles::input()),
            Span::styled("  (Enter post, Esc cancel)", Styles::help()),
        ]),
        InputMode::Normal => match &state.status_message {
            Some(message) => Line::from(Span::styled(message.clone(), Styles::help_key())),
            None => Line::from(Span::styled(
                "q quit  / search  s sort  r reverse  Space select  a select page  Enter detail  e export  ? help",
                Styles::help(),
            )),
        },
    };
    frame.render_widget(Paragraph::new(line), area);
}
