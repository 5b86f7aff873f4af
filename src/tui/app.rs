//! Main TUI application.

use std::io;
use std::time::Duration;

use chrono::Utc;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{info, warn};

use crate::export;
use crate::model::Workspace;
use crate::view;

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::render::render;
use super::state::{AppState, Tab};

/// Main TUI application.
pub struct App {
    state: AppState,
    should_quit: bool,
}

impl App {
    /// Creates a new App over the given workspace.
    pub fn new(workspace: Workspace, initial_tab: Tab, page_size: usize) -> Self {
        let mut state = AppState::new(workspace, page_size);
        state.switch_tab(initial_tab);
        Self {
            state,
            should_quit: false,
        }
    }

    /// Runs the TUI application.
    pub fn run(mut self, tick_rate: Duration) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let events = EventHandler::new(tick_rate);
        info!("dashboard started");

        // Main loop
        loop {
            terminal.draw(|frame| render(frame, &mut self.state))?;

            match events.next() {
                Ok(Event::Tick) => {}
                Ok(Event::Key(key)) => match handle_key(&mut self.state, key) {
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::Export => self.export_current_tab(),
                    KeyAction::None => {}
                },
                Err(_) => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    /// Exports the current tab's filtered rows (or only the selected ones)
    /// to a timestamped CSV in the working directory.
    fn export_current_tab(&mut self) {
        let ws = &self.state.workspace;
        let (prefix, (headers, rows)) = match self.state.current_tab {
            Tab::Projects => ("projects", view::projects::export_rows(ws, &self.state.prj)),
            Tab::Tasks => ("tasks", view::tasks::export_rows(ws, &self.state.tsk)),
            Tab::Experts => ("experts", view::experts::export_rows(ws, &self.state.exp)),
            Tab::Annotations => (
                "annotations",
                view::annotations::export_rows(ws, &self.state.ann),
            ),
            Tab::Runs => ("runs", view::runs::export_rows(ws, &self.state.run)),
            Tab::Versions => ("versions", view::versions::export_rows(ws, &self.state.ver)),
            Tab::Queue => ("queue", view::queue::export_rows(ws, &self.state.que)),
        };

        let path = export::export_name(prefix, "csv", Utc::now());
        match export::write_csv(&path, &headers, &rows) {
            Ok(()) => {
                self.state.status_message =
                    Some(format!("Exported {} rows to {}", rows.len(), path.display()));
            }
            Err(e) => {
                warn!(error = %e, "export failed");
                self.state.status_message = Some(format!("Export failed: {e}"));
            }
        }
    }
}
