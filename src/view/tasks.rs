//! Review tasks (TSK) view model.

use crate::fmt;
use crate::model::{Task, TaskStatus, Workspace};
use crate::table;
use crate::tui::state::TabState;
use crate::view::common::{
    RowStyleClass, TableViewModel, ViewCell, ViewRow, ascending, checkbox, filtered_sorted,
    selection_scope,
};

pub const HEADERS: &[&str] = &[
    "SEL", "ID", "TITLE", "STATUS", "COVER", "ACC", "EDITED", "CATEGORY", "EXPERTS",
];
pub const FIELDS: &[&str] = &[
    "", "id", "title", "status", "coverage", "accuracy", "last_edit", "category", "assignees",
];
pub const WIDTHS: &[u16] = &[3, 9, 34, 10, 6, 5, 10, 24, 7];

pub const SORT_FIELDS: &[&str] = &[
    "title", "status", "coverage", "accuracy", "last_edit", "assignees",
];

fn style_for(task: &Task) -> RowStyleClass {
    match task.status {
        TaskStatus::Active => RowStyleClass::Normal,
        TaskStatus::Pending => RowStyleClass::Warning,
        TaskStatus::Completed => RowStyleClass::Active,
    }
}

fn cells(task: &Task, selected: bool) -> Vec<ViewCell> {
    vec![
        checkbox(selected),
        ViewCell::plain(task.id.clone()),
        ViewCell::plain(task.title.clone()),
        ViewCell::plain(task.status.label()),
        ViewCell::plain(fmt::format_percent(task.coverage_pct)),
        ViewCell::plain(fmt::format_percent(task.accuracy_pct)),
        ViewCell::plain(fmt::format_date(task.last_edit)),
        ViewCell::plain(task.category.title()),
        ViewCell::plain(task.assignee_ids.len().to_string()),
    ]
}

pub fn build_tasks_view(ws: &Workspace, tab: &TabState<String>) -> TableViewModel<String> {
    let dv = table::derive_view(&ws.tasks, &tab.view);
    let rows = dv
        .rows
        .iter()
        .map(|t| ViewRow {
            id: t.id.clone(),
            cells: cells(t, tab.view.selected.contains(&t.id)),
            style: style_for(t),
        })
        .collect();

    TableViewModel {
        title: " Review Tasks (TSK) ".to_string(),
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

pub fn export_rows(ws: &Workspace, tab: &TabState<String>) -> (Vec<&'static str>, Vec<Vec<String>>) {
    let rows = selection_scope(filtered_sorted(&ws.tasks, &tab.view), &tab.view);
    let headers = vec![
        "id", "title", "status", "coverage_pct", "accuracy_pct", "last_edit", "category",
        "assignees",
    ];
    let body = rows
        .into_iter()
        .map(|t| {
            vec![
                t.id.clone(),
                t.title.clone(),
                t.status.label().to_string(),
                t.coverage_pct.to_string(),
                t.accuracy_pct.to_string(),
                fmt::format_date(t.last_edit),
                t.category.title().to_string(),
                t.assignee_ids.len().to_string(),
            ]
        })
        .collect();
    (headers, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_tasks_render_green() {
        let ws = Workspace::demo();
        let tab: TabState<String> = TabState::new(10);
        let vm = build_tasks_view(&ws, &tab);
        let done = vm
            .rows
            .iter()
            .find(|r| r.cells[3].text == "completed")
            .unwrap();
        assert_eq!(done.style, RowStyleClass::Active);
    }

    #[test]
    fn sort_by_assignee_count_uses_length() {
        let ws = Workspace::demo();
        let mut tab: TabState<String> = TabState::new(10);
        tab.view.set_sort("assignees");
        let vm = build_tasks_view(&ws, &tab);
        let counts: Vec<usize> = vm
            .rows
            .iter()
            .map(|r| r.cells[8].text.parse().unwrap())
            .collect();
        let mut sorted = counts.clone();
        sorted.sort();
        assert_eq!(counts, sorted);
    }
}
