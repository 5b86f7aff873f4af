//! Application state management.

mod app_state;

pub use app_state::*;

use std::hash::Hash;

use ratatui::widgets::TableState as RatatuiTableState;

use crate::instructions::Category;
use crate::table::ViewState;

/// Available tabs in the TUI, one per dashboard page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Projects,
    Tasks,
    Experts,
    Annotations,
    Runs,
    Versions,
    Queue,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[
            Tab::Projects,
            Tab::Tasks,
            Tab::Experts,
            Tab::Annotations,
            Tab::Runs,
            Tab::Versions,
            Tab::Queue,
        ]
    }

    /// Short name shown in the tab strip.
    pub fn name(&self) -> &'static str {
        match self {
            Tab::Projects => "PRJ",
            Tab::Tasks => "TSK",
            Tab::Experts => "EXP",
            Tab::Annotations => "ANN",
            Tab::Runs => "RUN",
            Tab::Versions => "VER",
            Tab::Queue => "QUE",
        }
    }

    pub fn next(&self) -> Tab {
        match self {
            Tab::Projects => Tab::Tasks,
            Tab::Tasks => Tab::Experts,
            Tab::Experts => Tab::Annotations,
            Tab::Annotations => Tab::Runs,
            Tab::Runs => Tab::Versions,
            Tab::Versions => Tab::Queue,
            Tab::Queue => Tab::Projects,
        }
    }

    pub fn prev(&self) -> Tab {
        match self {
            Tab::Projects => Tab::Queue,
            Tab::Tasks => Tab::Projects,
            Tab::Experts => Tab::Tasks,
            Tab::Annotations => Tab::Experts,
            Tab::Runs => Tab::Annotations,
            Tab::Versions => Tab::Runs,
            Tab::Queue => Tab::Versions,
        }
    }

    /// Resolves a tab from its short name, case-insensitively.
    pub fn by_name(name: &str) -> Option<Tab> {
        Tab::all()
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(name))
    }
}

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the search box ('/').
    Search,
    /// Typing a new comment for the annotation under the cursor ('c').
    Comment,
}

/// Active popup state. Only one popup can be open at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PopupState {
    /// No popup is open.
    #[default]
    None,
    /// Help popup with scroll offset.
    Help { scroll: usize },
    /// Quit confirmation dialog.
    QuitConfirm,
    /// Annotation detail popup (ANN tab).
    AnnotationDetail { id: u32, scroll: usize },
    /// Expert detail popup (EXP tab).
    ExpertDetail { id: u32, scroll: usize },
    /// Evaluation run detail popup (RUN tab).
    RunDetail { id: u32, scroll: usize },
    /// Generated labeling instructions for a task (TSK/QUE tabs).
    Instructions {
        task_title: String,
        category: Category,
        scroll: usize,
    },
}

impl PopupState {
    /// Returns true if any popup is open (excluding None).
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Returns true if a detail popup is open (help and quit-confirm
    /// excluded).
    pub fn is_detail_open(&self) -> bool {
        matches!(
            self,
            Self::AnnotationDetail { .. }
                | Self::ExpertDetail { .. }
                | Self::RunDetail { .. }
                | Self::Instructions { .. }
        )
    }
}

/// Per-tab state: the shared [`ViewState`] plus the cursor row within the
/// visible page.
#[derive(Debug, Clone)]
pub struct TabState<Id> {
    pub view: ViewState<Id>,
    /// Cursor row index within the visible page.
    pub cursor: usize,
    /// Ratatui table state for row highlighting.
    pub ratatui_state: RatatuiTableState,
}

impl<Id: Clone + Eq + Hash> Default for TabState<Id> {
    fn default() -> Self {
        Self::new(crate::table::DEFAULT_PAGE_SIZE)
    }
}

impl<Id: Clone + Eq + Hash> TabState<Id> {
    pub fn new(page_size: usize) -> Self {
        Self {
            view: ViewState::with_page_size(page_size),
            cursor: 0,
            ratatui_state: RatatuiTableState::default(),
        }
    }

    /// Moves the cursor up one row, flipping to the previous page at the top
    /// edge.
    pub fn select_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        } else if self.view.page > 1 {
            self.view.page -= 1;
            self.cursor = self.view.page_size - 1;
        }
    }

    /// Moves the cursor down one row, flipping to the next page at the
    /// bottom edge. `visible_len` and `total_pages` come from the current
    /// derived view.
    pub fn select_down(&mut self, visible_len: usize, total_pages: usize) {
        if self.cursor + 1 < visible_len {
            self.cursor += 1;
        } else if self.view.page < total_pages {
            self.view.page += 1;
            self.cursor = 0;
        }
    }

    pub fn page_up(&mut self) {
        if self.view.page > 1 {
            self.view.page -= 1;
        }
        self.cursor = 0;
    }

    pub fn page_down(&mut self, total_pages: usize) {
        if self.view.page < total_pages {
            self.view.page += 1;
            self.cursor = 0;
        }
    }

    pub fn home(&mut self) {
        self.view.page = 1;
        self.cursor = 0;
    }

    pub fn end(&mut self, total_pages: usize) {
        self.view.page = total_pages.max(1);
        self.cursor = usize::MAX;
    }

    /// Clamps the cursor against the visible row count and syncs the ratatui
    /// state for highlighting.
    pub fn resolve(&mut self, visible_len: usize) {
        if visible_len == 0 {
            self.cursor = 0;
            self.ratatui_state.select(None);
        } else {
            if self.cursor >= visible_len {
                self.cursor = visible_len - 1;
            }
            self.ratatui_state.select(Some(self.cursor));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_cycle_is_closed() {
        let mut tab = Tab::Projects;
        for _ in 0..Tab::all().len() {
            tab = tab.next();
        }
        assert_eq!(tab, Tab::Projects);
        assert_eq!(Tab::Projects.prev(), Tab::Queue);
        assert_eq!(Tab::by_name("ann"), Some(Tab::Annotations));
        assert_eq!(Tab::by_name("nope"), None);
    }

    #[test]
    fn cursor_flips_pages_at_edges() {
        let mut tab: TabState<u32> = TabState::new(10);
        tab.cursor = 9;
        tab.select_down(10, 3);
        assert_eq!(tab.view.page, 2);
        assert_eq!(tab.cursor, 0);
        tab.select_up();
        assert_eq!(tab.view.page, 1);
        assert_eq!(tab.cursor, 9);
    }

    #[test]
    fn select_down_stops_on_last_page() {
        let mut tab: TabState<u32> = TabState::new(10);
        tab.view.page = 3;
        tab.cursor = 4;
        tab.select_down(5, 3);
        assert_eq!(tab.view.page, 3);
        assert_eq!(tab.cursor, 4);
    }

    #[test]
    fn end_then_resolve_clamps_cursor() {
        let mut tab: TabState<u32> = TabState::new(10);
        tab.end(3);
        assert_eq!(tab.view.page, 3);
        tab.resolve(5);
        assert_eq!(tab.cursor, 4);
        tab.resolve(0);
        assert_eq!(tab.cursor, 0);
    }
}
