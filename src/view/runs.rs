//! Evaluation runs (RUN) view model.

use crate::fmt;
use crate::model::{EvalRun, RunStatus, Workspace};
use crate::table;
use crate::tui::state::TabState;
use crate::view::common::{
    RowStyleClass, TableViewModel, ViewCell, ViewRow, ascending, checkbox, filtered_sorted,
    selection_scope, truncate,
};

pub const HEADERS: &[&str] = &[
    "SEL", "ID", "NAME", "DATE", "STATUS", "ACC", "COMPL", "DATA", "NOTES",
];
pub const FIELDS: &[&str] = &[
    "", "", "name", "date", "status", "accuracy", "completeness", "version", "",
];
pub const WIDTHS: &[u16] = &[3, 4, 8, 10, 16, 5, 5, 5, 40];

pub const SORT_FIELDS: &[&str] = &["date", "name", "status", "accuracy", "completeness"];

fn style_for(run: &EvalRun) -> RowStyleClass {
    match run.status {
        RunStatus::Completed { .. } => RowStyleClass::Active,
        RunStatus::InProgress { .. } => RowStyleClass::Warning,
        RunStatus::Failed { .. } => RowStyleClass::Critical,
    }
}

/// Status cell text: progress for running evals, plain label otherwise.
fn status_text(run: &EvalRun) -> String {
    match &run.status {
        RunStatus::InProgress { progress_pct } => {
            format!("In Progress {}", fmt::format_percent(*progress_pct))
        }
        other => other.label().to_string(),
    }
}

fn notes_text(run: &EvalRun) -> String {
    match &run.status {
        RunStatus::Completed { insights, .. } => insights.clone(),
        RunStatus::Failed { error } => format!("error: {error}"),
        RunStatus::InProgress { .. } => String::new(),
    }
}

fn metric(value: Option<f64>) -> String {
    value.map(fmt::format_ratio).unwrap_or_else(|| "-".to_string())
}

fn cells(run: &EvalRun, selected: bool) -> Vec<ViewCell> {
    vec![
        checkbox(selected),
        ViewCell::plain(run.id.to_string()),
        ViewCell::plain(run.name.clone()),
        ViewCell::plain(fmt::format_date(run.date)),
        ViewCell::plain(status_text(run)),
        ViewCell::plain(metric(run.accuracy())),
        ViewCell::plain(metric(run.completeness())),
        ViewCell::plain(run.data_version.clone()),
        ViewCell::plain(truncate(&notes_text(run), 38)),
    ]
}

pub fn build_runs_view(ws: &Workspace, tab: &TabState<u32>) -> TableViewModel<u32> {
    let dv = table::derive_view(&ws.runs, &tab.view);
    let rows = dv
        .rows
        .iter()
        .map(|r| ViewRow {
            id: r.id,
            cells: cells(r, tab.view.selected.contains(&r.id)),
            style: style_for(r),
        })
        .collect();

    TableViewModel {
        title: " Evaluation Runs (RUN) ".to_string(),
        headers: HEADERS.to_vec(),
        fields: FIELDS.to_vec(),
        widths: WIDTHS.to_vec(),
        rows,
        sort_field: tab.view.sort_field,
        sort_ascending: ascending(&tab.view),
        page: dv.page,
        total_pages: dv.total_pages,
        total_count: dv.total_count,
        selected_count: tab.view.selected.len(),
        search: tab.view.search.clone(),
    }
}

pub fn export_rows(ws: &Workspace, tab: &TabState<u32>) -> (Vec<&'static str>, Vec<Vec<String>>) {
    let rows = selection_scope(filtered_sorted(&ws.runs, &tab.view), &tab.view);
    let headers = vec!["id", "name", "date", "status", "accuracy", "completeness", "data_version", "notes"];
    let body = rows
        .into_iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.name.clone(),
                fmt::format_date(r.date),
                status_text(r),
                metric(r.accuracy()),
                metric(r.completeness()),
                r.data_version.clone(),
                notes_text(r),
            ]
        })
        .collect();
    (headers, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_runs_show_error_and_red() {
        let ws = Workspace::demo();
        let tab: TabState<u32> = TabState::new(10);
        let vm = build_runs_view(&ws, &tab);
        let failed = vm.rows.iter().find(|r| r.cells[4].text == "Failed").unwrap();
        assert_eq!(failed.style, RowStyleClass::Critical);
        assert!(failed.cells[8].text.contains("API Timeout"));
    }

    #[test]
    fn incomplete_runs_sort_after_completed_on_accuracy() {
        let ws = Workspace::demo();
        let mut tab: TabState<u32> = TabState::new(10);
        tab.view.set_sort("accuracy");
        let vm = build_runs_view(&ws, &tab);
        // Runs without metrics (in-progress, failed) come last.
        let tail: Vec<String> = vm
            .rows
            .iter()
            .rev()
            .take(2)
            .map(|r| r.cells[5].text.clone())
            .collect();
        assert!(tail.iter().all(|t| t == "-"));
    }
}
