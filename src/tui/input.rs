//! Input handling and keybindings.

use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::hash::Hash;

use crate::model::Comment;
use crate::table::{self, Record};
use crate::tui::state::{AppState, InputMode, PopupState, Tab, TabState};
use crate::view;

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
    /// Export the current tab's rows to CSV.
    Export,
}

/// Navigation action for unified scroll/selection dispatch.
enum NavAction {
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
}

/// Applies a navigation action to one tab, deriving the view before and
/// after so page flips and cursor clamping see current counts.
fn nav_tab<T: Record>(records: &[T], tab: &mut TabState<T::Id>, action: NavAction) {
    let dv = table::derive_view(records, &tab.view);
    match action {
        NavAction::Up => tab.select_up(),
        NavAction::Down => tab.select_down(dv.rows.len(), dv.total_pages),
        NavAction::PageUp => tab.page_up(),
        NavAction::PageDown => tab.page_down(dv.total_pages),
        NavAction::Home => tab.home(),
        NavAction::End => tab.end(dv.total_pages),
    }
    let dv = table::derive_view(records, &tab.view);
    tab.resolve(dv.rows.len());
}

/// Id of the record under the cursor, if the visible page is non-empty.
fn cursor_id<T: Record>(records: &[T], tab: &TabState<T::Id>) -> Option<T::Id> {
    let dv = table::derive_view(records, &tab.view);
    dv.rows.get(tab.cursor).map(|r| r.id())
}

fn toggle_cursor_row<T: Record>(records: &[T], tab: &mut TabState<T::Id>) {
    if let Some(id) = cursor_id(records, tab) {
        tab.view.toggle_row(id);
    }
}

fn toggle_visible<T: Record>(records: &[T], tab: &mut TabState<T::Id>) {
    let ids: Vec<T::Id> = table::derive_view(records, &tab.view)
        .rows
        .iter()
        .map(|r| r.id())
        .collect();
    tab.view.toggle_all_visible(&ids);
}

/// Advances to the next sortable field (ascending); wraps around.
fn cycle_sort<Id: Clone + Eq + Hash>(tab: &mut TabState<Id>, fields: &'static [&'static str]) {
    let next = match tab.view.sort_field {
        None => fields.first().copied(),
        Some(current) => fields
            .iter()
            .position(|f| *f == current)
            .map(|i| fields[(i + 1) % fields.len()])
            .or_else(|| fields.first().copied()),
    };
    if let Some(field) = next {
        tab.view.sort_field = Some(field);
        tab.view.sort_direction = crate::table::SortDirection::Ascending;
    }
}

/// Toggles the sort direction of the current field (starts sorting by the
/// first field if none is active).
fn reverse_sort<Id: Clone + Eq + Hash>(tab: &mut TabState<Id>, fields: &'static [&'static str]) {
    match tab.view.sort_field {
        Some(field) => tab.view.set_sort(field),
        None => {
            if let Some(field) = fields.first() {
                tab.view.set_sort(field);
            }
        }
    }
}

/// Dispatches a navigation action to the open popup's scroll or the current
/// tab's selection.
fn dispatch_navigation(state: &mut AppState, action: NavAction) {
    match &mut state.popup {
        PopupState::Help { scroll }
        | PopupState::AnnotationDetail { scroll, .. }
        | PopupState::ExpertDetail { scroll, .. }
        | PopupState::RunDetail { scroll, .. }
        | PopupState::Instructions { scroll, .. } => match action {
            NavAction::Up => *scroll = scroll.saturating_sub(1),
            NavAction::Down => *scroll = scroll.saturating_add(1),
            NavAction::PageUp => *scroll = scroll.saturating_sub(10),
            NavAction::PageDown => *scroll = scroll.saturating_add(10),
            NavAction::Home => *scroll = 0,
            NavAction::End => {} // clamped against content at render time
        },
        _ => {
            let ws = &state.workspace;
            match state.current_tab {
                Tab::Projects => nav_tab(&ws.projects, &mut state.prj, action),
                Tab::Tasks => nav_tab(&ws.tasks, &mut state.tsk, action),
                Tab::Experts => nav_tab(&ws.experts, &mut state.exp, action),
                Tab::Annotations => nav_tab(&ws.annotations, &mut state.ann, action),
                Tab::Runs => nav_tab(&ws.runs, &mut state.run, action),
                Tab::Versions => nav_tab(&ws.versions, &mut state.ver, action),
                Tab::Queue => nav_tab(&ws.queue, &mut state.que, action),
            }
        }
    }
}

/// Handles key input and updates state.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }
    if matches!(state.popup, PopupState::QuitConfirm) {
        return handle_quit_confirm(state, key);
    }
    match state.input_mode {
        InputMode::Normal => handle_normal_mode(state, key),
        InputMode::Search => handle_search_mode(state, key),
        InputMode::Comment => handle_comment_mode(state, key),
    }
}

fn handle_quit_confirm(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.popup = PopupState::None;
            KeyAction::Quit
        }
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
            state.popup = PopupState::None;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

/// Opens the detail popup for the row under the cursor, per tab.
fn open_detail(state: &mut AppState) {
    let ws = &state.workspace;
    let popup = match state.current_tab {
        Tab::Annotations => {
            cursor_id(&ws.annotations, &state.ann).map(|id| PopupState::AnnotationDetail {
                id,
                scroll: 0,
            })
        }
        Tab::Experts => {
            cursor_id(&ws.experts, &state.exp).map(|id| PopupState::ExpertDetail { id, scroll: 0 })
        }
        Tab::Runs => {
            cursor_id(&ws.runs, &state.run).map(|id| PopupState::RunDetail { id, scroll: 0 })
        }
        Tab::Tasks | Tab::Queue => return open_instructions(state),
        _ => None,
    };
    if let Some(popup) = popup {
        state.popup = popup;
    }
}

/// Opens the generated instructions popup for the task under the cursor
/// (TSK and QUE tabs).
fn open_instructions(state: &mut AppState) {
    let popup = match state.current_tab {
        Tab::Tasks => {
            let dv = table::derive_view(&state.workspace.tasks, &state.tsk.view);
            dv.rows.get(state.tsk.cursor).map(|t| PopupState::Instructions {
                task_title: t.title.clone(),
                category: t.category,
                scroll: 0,
            })
        }
        Tab::Queue => {
            let dv = table::derive_view(&state.workspace.queue, &state.que.view);
            dv.rows.get(state.que.cursor).map(|q| PopupState::Instructions {
                task_title: q.title.clone(),
                category: q.category,
                scroll: 0,
            })
        }
        _ => None,
    };
    if let Some(popup) = popup {
        state.popup = popup;
    }
}

/// Handles keys in normal mode.
fn handle_normal_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.popup = PopupState::QuitConfirm;
            KeyAction::None
        }

        // Tab navigation (blocked when a detail popup is open)
        KeyCode::Tab
        | KeyCode::BackTab
        | KeyCode::Char('1')
        | KeyCode::Char('2')
        | KeyCode::Char('3')
        | KeyCode::Char('4')
        | KeyCode::Char('5')
        | KeyCode::Char('6')
        | KeyCode::Char('7')
            if state.any_popup_open() =>
        {
            state.status_message = Some("Close popup (Esc) before switching tabs".to_string());
            KeyAction::None
        }
        KeyCode::Tab => {
            state.switch_tab(state.current_tab.next());
            KeyAction::None
        }
        KeyCode::BackTab => {
            state.switch_tab(state.current_tab.prev());
            KeyAction::None
        }
        KeyCode::Char(c @ '1'..='7') => {
            let index = (c as usize) - ('1' as usize);
            if let Some(tab) = Tab::all().get(index) {
                state.switch_tab(*tab);
            }
            KeyAction::None
        }

        // Row navigation (or popup scroll if a popup is open)
        KeyCode::Up | KeyCode::Char('k') => {
            dispatch_navigation(state, NavAction::Up);
            KeyAction::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            dispatch_navigation(state, NavAction::Down);
            KeyAction::None
        }
        KeyCode::PageUp | KeyCode::Char('[') => {
            dispatch_navigation(state, NavAction::PageUp);
            KeyAction::None
        }
        KeyCode::PageDown | KeyCode::Char(']') => {
            dispatch_navigation(state, NavAction::PageDown);
            KeyAction::None
        }
        KeyCode::Home => {
            dispatch_navigation(state, NavAction::Home);
            KeyAction::None
        }
        KeyCode::End => {
            dispatch_navigation(state, NavAction::End);
            KeyAction::None
        }

        // Popups
        KeyCode::Esc => {
            if state.popup.is_open() {
                state.popup = PopupState::None;
            } else {
                state.status_message = None;
            }
            KeyAction::None
        }
        KeyCode::Char('?') => {
            state.popup = match state.popup {
                PopupState::Help { .. } => PopupState::None,
                _ => PopupState::Help { scroll: 0 },
            };
            KeyAction::None
        }
        KeyCode::Enter if !state.popup.is_open() => {
            open_detail(state);
            KeyAction::None
        }
        KeyCode::Char('i') if !state.popup.is_open() => {
            open_instructions(state);
            KeyAction::None
        }

        // Search, sort, selection, comments, export: normal mode only
        KeyCode::Char('/') if !state.popup.is_open() => {
            state.search_backup = state.current_search().to_string();
            state.search_input = state.search_backup.clone();
            state.input_mode = InputMode::Search;
            KeyAction::None
        }
        KeyCode::Char('s') if !state.popup.is_open() => {
            match state.current_tab {
                Tab::Projects => cycle_sort(&mut state.prj, view::projects::SORT_FIELDS),
                Tab::Tasks => cycle_sort(&mut state.tsk, view::tasks::SORT_FIELDS),
                Tab::Experts => cycle_sort(&mut state.exp, view::experts::SORT_FIELDS),
                Tab::Annotations => cycle_sort(&mut state.ann, view::annotations::SORT_FIELDS),
                Tab::Runs => cycle_sort(&mut state.run, view::runs::SORT_FIELDS),
                Tab::Versions => cycle_sort(&mut state.ver, view::versions::SORT_FIELDS),
                Tab::Queue => cycle_sort(&mut state.que, view::queue::SORT_FIELDS),
            }
            KeyAction::None
        }
        KeyCode::Char('r') if !state.popup.is_open() => {
            match state.current_tab {
                Tab::Projects => reverse_sort(&mut state.prj, view::projects::SORT_FIELDS),
                Tab::Tasks => reverse_sort(&mut state.tsk, view::tasks::SORT_FIELDS),
                Tab::Experts => reverse_sort(&mut state.exp, view::experts::SORT_FIELDS),
                Tab::Annotations => reverse_sort(&mut state.ann, view::annotations::SORT_FIELDS),
                Tab::Runs => reverse_sort(&mut state.run, view::runs::SORT_FIELDS),
                Tab::Versions => reverse_sort(&mut state.ver, view::versions::SORT_FIELDS),
                Tab::Queue => reverse_sort(&mut state.que, view::queue::SORT_FIELDS),
            }
            KeyAction::None
        }
        KeyCode::Char(' ') if !state.popup.is_open() => {
            let ws = &state.workspace;
            match state.current_tab {
                Tab::Projects => toggle_cursor_row(&ws.projects, &mut state.prj),
                Tab::Tasks => toggle_cursor_row(&ws.tasks, &mut state.tsk),
                Tab::Experts => toggle_cursor_row(&ws.experts, &mut state.exp),
                Tab::Annotations => toggle_cursor_row(&ws.annotations, &mut state.ann),
                Tab::Runs => toggle_cursor_row(&ws.runs, &mut state.run),
                Tab::Versions => toggle_cursor_row(&ws.versions, &mut state.ver),
                Tab::Queue => toggle_cursor_row(&ws.queue, &mut state.que),
            }
            KeyAction::None
        }
        KeyCode::Char('a') if !state.popup.is_open() => {
            let ws = &state.workspace;
            match state.current_tab {
                Tab::Projects => toggle_visible(&ws.projects, &mut state.prj),
                Tab::Tasks => toggle_visible(&ws.tasks, &mut state.tsk),
                Tab::Experts => toggle_visible(&ws.experts, &mut state.exp),
                Tab::Annotations => toggle_visible(&ws.annotations, &mut state.ann),
                Tab::Runs => toggle_visible(&ws.runs, &mut state.run),
                Tab::Versions => toggle_visible(&ws.versions, &mut state.ver),
                Tab::Queue => toggle_visible(&ws.queue, &mut state.que),
            }
            KeyAction::None
        }
        KeyCode::Char('c') if !state.popup.is_open() && state.current_tab == Tab::Annotations => {
            if cursor_id(&state.workspace.annotations, &state.ann).is_some() {
                state.comment_input.clear();
                state.input_mode = InputMode::Comment;
            } else {
                state.status_message = Some("No annotation under the cursor".to_string());
            }
            KeyAction::None
        }
        KeyCode::Char('e') if !state.popup.is_open() => KeyAction::Export,

        _ => KeyAction::None,
    }
}

/// Handles keys while typing a search term. The term applies live; Esc
/// restores what was there before.
fn handle_search_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter => {
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Esc => {
            let backup = state.search_backup.clone();
            state.apply_search(&backup);
            state.search_input = backup;
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            state.search_input.pop();
            let term = state.search_input.clone();
            state.apply_search(&term);
        }
        KeyCode::Char(c) => {
            state.search_input.push(c);
            let term = state.search_input.clone();
            state.apply_search(&term);
        }
        _ => {}
    }
    KeyAction::None
}

/// Handles keys while typing a comment for the annotation under the cursor.
fn handle_comment_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter => {
            let text = state.comment_input.trim().to_string();
            if !text.is_empty() {
                post_comment(state, text);
            }
            state.comment_input.clear();
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Esc => {
            state.comment_input.clear();
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            state.comment_input.pop();
        }
        KeyCode::Char(c) => {
            state.comment_input.push(c);
        }
        _ => {}
    }
    KeyAction::None
}

/// Appends a comment by the current user to the annotation under the cursor.
fn post_comment(state: &mut AppState, text: String) {
    let Some(id) = cursor_id(&state.workspace.annotations, &state.ann) else {
        state.status_message = Some("No annotation under the cursor".to_string());
        return;
    };
    let next_id = state
        .workspace
        .annotations
        .iter()
        .find(|a| a.id == id)
        .map(|a| a.comments.len() as u32 + 1)
        .unwrap_or(1);
    let comment = Comment {
        id: next_id,
        author: "Current User".to_string(),
        role: "QA Engineer".to_string(),
        text,
        posted_at: Utc::now(),
    };
    if state.workspace.add_comment(id, comment) {
        state.status_message = Some(format!("Comment added to annotation #{id}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Workspace;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state() -> AppState {
        AppState::new(Workspace::demo(), 10)
    }

    #[test]
    fn search_mode_applies_live_and_restores_on_escape() {
        let mut state = state();
        state.switch_tab(Tab::Annotations);
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('/'))), KeyAction::None);
        assert_eq!(state.input_mode, InputMode::Search);
        for c in "stroke".chars() {
            handle_key(&mut state, key(KeyCode::Char(c)));
        }
        assert_eq!(state.ann.view.search, "stroke");
        handle_key(&mut state, key(KeyCode::Esc));
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.ann.view.search, "");
    }

    #[test]
    fn search_commit_keeps_term() {
        let mut state = state();
        state.switch_tab(Tab::Annotations);
        handle_key(&mut state, key(KeyCode::Char('/')));
        handle_key(&mut state, key(KeyCode::Char('m')));
        handle_key(&mut state, key(KeyCode::Enter));
        assert_eq!(state.ann.view.search, "m");
        assert_eq!(state.ann.view.page, 1);
    }

    #[test]
    fn space_toggles_selection_under_cursor() {
        let mut state = state();
        state.switch_tab(Tab::Annotations);
        handle_key(&mut state, key(KeyCode::Char(' ')));
        assert_eq!(state.ann.view.selected.len(), 1);
        handle_key(&mut state, key(KeyCode::Char(' ')));
        assert!(state.ann.view.selected.is_empty());
    }

    #[test]
    fn select_all_visible_then_clear() {
        let mut state = state();
        state.switch_tab(Tab::Experts);
        handle_key(&mut state, key(KeyCode::Char('a')));
        assert_eq!(state.exp.view.selected.len(), 4);
        handle_key(&mut state, key(KeyCode::Char('a')));
        assert!(state.exp.view.selected.is_empty());
    }

    #[test]
    fn sort_cycles_and_reverses() {
        let mut state = state();
        handle_key(&mut state, key(KeyCode::Char('s')));
        assert_eq!(state.prj.view.sort_field, Some("name"));
        handle_key(&mut state, key(KeyCode::Char('r')));
        assert_eq!(
            state.prj.view.sort_direction,
            crate::table::SortDirection::Descending
        );
        handle_key(&mut state, key(KeyCode::Char('s')));
        assert_eq!(state.prj.view.sort_field, Some("progress"));
        assert_eq!(
            state.prj.view.sort_direction,
            crate::table::SortDirection::Ascending
        );
    }

    #[test]
    fn tab_switch_blocked_while_detail_open() {
        let mut state = state();
        state.switch_tab(Tab::Annotations);
        handle_key(&mut state, key(KeyCode::Enter));
        assert!(matches!(state.popup, PopupState::AnnotationDetail { .. }));
        handle_key(&mut state, key(KeyCode::Tab));
        assert_eq!(state.current_tab, Tab::Annotations);
        assert!(state.status_message.is_some());
        handle_key(&mut state, key(KeyCode::Esc));
        assert_eq!(state.popup, PopupState::None);
    }

    #[test]
    fn quit_requires_confirmation() {
        let mut state = state();
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('q'))), KeyAction::None);
        assert_eq!(state.popup, PopupState::QuitConfirm);
        assert_eq!(handle_key(&mut state, key(KeyCode::Esc)), KeyAction::None);
        handle_key(&mut state, key(KeyCode::Char('q')));
        assert_eq!(handle_key(&mut state, key(KeyCode::Enter)), KeyAction::Quit);
    }

    #[test]
    fn comment_flow_appends_to_cursor_annotation() {
        let mut state = state();
        state.switch_tab(Tab::Annotations);
        let id = cursor_id(&state.workspace.annotations, &state.ann).unwrap();
        let before = state
            .workspace
            .annotations
            .iter()
            .find(|a| a.id == id)
            .unwrap()
            .comments
            .len();
        handle_key(&mut state, key(KeyCode::Char('c')));
        assert_eq!(state.input_mode, InputMode::Comment);
        for c in "needs a second look".chars() {
            handle_key(&mut state, key(KeyCode::Char(c)));
        }
        handle_key(&mut state, key(KeyCode::Enter));
        let after = state
            .workspace
            .annotations
            .iter()
            .find(|a| a.id == id)
            .unwrap()
            .comments
            .len();
        assert_eq!(after, before + 1);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn navigation_flips_pages_on_small_page_size() {
        let mut state = AppState::new(Workspace::demo(), 2);
        state.switch_tab(Tab::Annotations);
        // 6 annotations, page size 2: walk to the second page.
        handle_key(&mut state, key(KeyCode::Down));
        handle_key(&mut state, key(KeyCode::Down));
        assert_eq!(state.ann.view.page, 2);
        assert_eq!(state.ann.cursor, 0);
        handle_key(&mut state, key(KeyCode::End));
        assert_eq!(state.ann.view.page, 3);
        handle_key(&mut state, key(KeyCode::Home));
        assert_eq!(state.ann.view.page, 1);
        assert_eq!(state.ann.cursor, 0);
    }

    #[test]
    fn instructions_popup_from_tasks_tab() {
        let mut state = state();
        state.switch_tab(Tab::Tasks);
        handle_key(&mut state, key(KeyCode::Char('i')));
        assert!(matches!(state.popup, PopupState::Instructions { .. }));
    }

    #[test]
    fn export_only_from_normal_mode() {
        let mut state = state();
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('e'))), KeyAction::Export);
        handle_key(&mut state, key(KeyCode::Char('?')));
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('e'))), KeyAction::None);
    }
}
