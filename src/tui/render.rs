//! Main rendering logic for TUI.

use chrono::Utc;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::view::{annotations, experts, projects, queue, runs, tasks, versions};

use super::state::{AppState, PopupState, Tab};
use super::widgets::{
    render_annotation_detail, render_bottom_bar, render_expert_detail, render_header, render_help,
    render_instructions, render_quit_confirm, render_run_detail, render_table,
};

/// Main render function.
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();

    // Main layout: header, content, bottom bar
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .split(area);

    render_header(frame, chunks[0], state);
    render_content(frame, chunks[1], state);
    render_bottom_bar(frame, chunks[2], state);

    // Popups (rendered last to overlay everything). Decide which one first,
    // then call the render functions (avoids borrow conflicts between
    // &mut state.popup and &state.workspace).
    #[derive(Clone, Copy)]
    enum ActivePopup {
        None,
        Help,
        QuitConfirm,
        Annotation,
        Expert,
        Run,
        Instructions,
    }
    let active = match &state.popup {
        PopupState::None => ActivePopup::None,
        PopupState::Help { .. } => ActivePopup::Help,
        PopupState::QuitConfirm => ActivePopup::QuitConfirm,
        PopupState::AnnotationDetail { .. } => ActivePopup::Annotation,
        PopupState::ExpertDetail { .. } => ActivePopup::Expert,
        PopupState::RunDetail { .. } => ActivePopup::Run,
        PopupState::Instructions { .. } => ActivePopup::Instructions,
    };
    match active {
        ActivePopup::None => {}
        ActivePopup::Help => {
            if let PopupState::Help { ref mut scroll } = state.popup {
                render_help(frame, area, scroll);
            }
        }
        ActivePopup::QuitConfirm => render_quit_confirm(frame, area),
        ActivePopup::Annotation => render_annotation_detail(frame, area, state),
        ActivePopup::Expert => render_expert_detail(frame, area, state),
        ActivePopup::Run => render_run_detail(frame, area, state),
        ActivePopup::Instructions => {
            if let PopupState::Instructions {
                ref task_title,
                category,
                ref mut scroll,
            } = state.popup
            {
                let title = task_title.clone();
                render_instructions(frame, area, &title, category, scroll);
            }
        }
    }
}

/// Renders the current tab's table. Each view model is derived fresh from
/// the workspace and the tab's view state.
fn render_content(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let now = Utc::now();
    match state.current_tab {
        Tab::Projects => {
            let vm = projects::build_projects_view(&state.workspace, &state.prj);
            state.prj.resolve(vm.rows.len());
            render_table(frame, area, &vm, &mut state.prj.ratatui_state);
        }
        Tab::Tasks => {
            let vm = tasks::build_tasks_view(&state.workspace, &state.tsk);
            state.tsk.resolve(vm.rows.len());
            render_table(frame, area, &vm, &mut state.tsk.ratatui_state);
        }
        Tab::Experts => {
            let vm = experts::build_experts_view(&state.workspace, &state.exp, now);
            state.exp.resolve(vm.rows.len());
            render_table(frame, area, &vm, &mut state.exp.ratatui_state);
        }
        Tab::Annotations => {
            let vm = annotations::build_annotations_view(&state.workspace, &state.ann);
            state.ann.resolve(vm.rows.len());
            render_table(frame, area, &vm, &mut state.ann.ratatui_state);
        }
        Tab::Runs => {
            let vm = runs::build_runs_view(&state.workspace, &state.run);
            state.run.resolve(vm.rows.len());
            render_table(frame, area, &vm, &mut state.run.ratatui_state);
        }
        Tab::Versions => {
            let vm = versions::build_versions_view(&state.workspace, &state.ver);
            state.ver.resolve(vm.rows.len());
            render_table(frame, area, &vm, &mut state.ver.ratatui_state);
        }
        Tab::Queue => {
            let vm = queue::build_queue_view(&state.workspace, &state.que, now);
            state.que.resolve(vm.rows.len());
            render_table(frame, area, &vm, &mut state.que.ratatui_state);
        }
    }
}
