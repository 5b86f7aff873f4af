//! Main application state.

use crate::model::Workspace;

use super::{InputMode, PopupState, Tab, TabState};

/// Main application state: the workspace data plus one [`TabState`] per tab.
#[derive(Debug)]
pub struct AppState {
    /// All dashboard data, static except for comment insertion.
    pub workspace: Workspace,
    /// Current active tab.
    pub current_tab: Tab,
    /// Input mode.
    pub input_mode: InputMode,
    /// Search input buffer, synced with the active tab's search term.
    pub search_input: String,
    /// Search term to restore when search entry is cancelled.
    pub search_backup: String,
    /// Comment input buffer (ANN tab, `c`).
    pub comment_input: String,
    /// Active popup state. Only one popup can be open at a time.
    pub popup: PopupState,
    /// Temporary status message shown in the header (export results,
    /// blocked actions).
    pub status_message: Option<String>,
    pub prj: TabState<String>,
    pub tsk: TabState<String>,
    pub exp: TabState<u32>,
    pub ann: TabState<u32>,
    pub run: TabState<u32>,
    pub ver: TabState<u32>,
    pub que: TabState<String>,
}

impl AppState {
    pub fn new(workspace: Workspace, page_size: usize) -> Self {
        Self {
            workspace,
            current_tab: Tab::Projects,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            search_backup: String::new(),
            comment_input: String::new(),
            popup: PopupState::None,
            status_message: None,
            prj: TabState::new(page_size),
            tsk: TabState::new(page_size),
            exp: TabState::new(page_size),
            ann: TabState::new(page_size),
            run: TabState::new(page_size),
            ver: TabState::new(page_size),
            que: TabState::new(page_size),
        }
    }

    /// Returns true if any detail popup is currently open.
    pub fn any_popup_open(&self) -> bool {
        self.popup.is_detail_open()
    }

    /// Returns the active tab's search term.
    pub fn current_search(&self) -> &str {
        match self.current_tab {
            Tab::Projects => &self.prj.view.search,
            Tab::Tasks => &self.tsk.view.search,
            Tab::Experts => &self.exp.view.search,
            Tab::Annotations => &self.ann.view.search,
            Tab::Runs => &self.run.view.search,
            Tab::Versions => &self.ver.view.search,
            Tab::Queue => &self.que.view.search,
        }
    }

    /// Applies a search term to the active tab (resets it to page 1).
    pub fn apply_search(&mut self, term: &str) {
        match self.current_tab {
            Tab::Projects => self.prj.view.set_search(term),
            Tab::Tasks => self.tsk.view.set_search(term),
            Tab::Experts => self.exp.view.set_search(term),
            Tab::Annotations => self.ann.view.set_search(term),
            Tab::Runs => self.run.view.set_search(term),
            Tab::Versions => self.ver.view.set_search(term),
            Tab::Queue => self.que.view.set_search(term),
        }
    }

    /// Switches to a new tab, syncing the search input buffer from the new
    /// tab's term. Per-tab view state survives the switch.
    pub fn switch_tab(&mut self, new_tab: Tab) {
        if self.current_tab != new_tab {
            self.current_tab = new_tab;
            self.search_input = self.current_search().to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switch_tab_syncs_search_input() {
        let mut state = AppState::new(Workspace::demo(), 10);
        state.apply_search("stroke");
        state.switch_tab(Tab::Experts);
        assert_eq!(state.search_input, "");
        state.switch_tab(Tab::Projects);
        assert_eq!(state.search_input, "stroke");
        // The annotation tab's term was never touched.
        assert_eq!(state.ann.view.search, "");
    }
}
