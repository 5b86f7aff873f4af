//! Projects (PRJ) view model.

use crate::fmt;
use crate::model::{Project, ProjectStatus, Workspace};
use crate::table;
use crate::tui::state::TabState;
use crate::view::common::{
    RowStyleClass, TableViewModel, ViewCell, ViewRow, ascending, checkbox, filtered_sorted,
    selection_scope,
};

pub const HEADERS: &[&str] = &["SEL", "ID", "NAME", "DESCRIPTION", "PROGRESS", "STATUS", "DUE"];
pub const FIELDS: &[&str] = &["", "id", "name", "description", "progress", "status", "due_date"];
pub const WIDTHS: &[u16] = &[3, 9, 24, 40, 12, 16, 10];

/// Sortable fields cycled by the `s` key.
pub const SORT_FIELDS: &[&str] = &["name", "progress", "status", "due_date"];

fn style_for(project: &Project) -> RowStyleClass {
    match project.status {
        ProjectStatus::OnTrack => RowStyleClass::Normal,
        ProjectStatus::AtRisk => RowStyleClass::Warning,
        ProjectStatus::BehindSchedule => RowStyleClass::Critical,
    }
}

fn cells(project: &Project, selected: bool) -> Vec<ViewCell> {
    vec![
        checkbox(selected),
        ViewCell::plain(project.id.clone()),
        ViewCell::plain(project.name.clone()),
        ViewCell::plain(crate::view::common::truncate(&project.description, 38)),
        ViewCell::plain(format!(
            "{} ({})",
            fmt::format_fraction(project.tasks_completed, project.total_tasks),
            fmt::format_percent(project.completion_pct())
        )),
        ViewCell::plain(project.status.label()),
        ViewCell::plain(fmt::format_date(project.due_date)),
    ]
}

pub fn build_projects_view(ws: &Workspace, tab: &TabState<String>) -> TableViewModel<String> {
    let dv = table::derive_view(&ws.projects, &tab.view);
    let rows = dv
        .rows
        .iter()
        .map(|p| ViewRow {
            id: p.id.clone(),
            cells: cells(p, tab.view.selected.contains(&p.id)),
            style: style_for(p),
        })
        .collect();

    TableViewModel {
        title: " Projects (PRJ) ".to_string(),
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

/// Header and cell text for CSV export: the filtered rows, scoped to the
/// selection when one exists.
pub fn export_rows(ws: &Workspace, tab: &TabState<String>) -> (Vec<&'static str>, Vec<Vec<String>>) {
    let rows = selection_scope(filtered_sorted(&ws.projects, &tab.view), &tab.view);
    let headers = vec!["id", "name", "description", "completed", "total", "status", "due_date"];
    let body = rows
        .into_iter()
        .map(|p| {
            vec![
                p.id.clone(),
                p.name.clone(),
                p.description.clone(),
                p.tasks_completed.to_string(),
                p.total_tasks.to_string(),
                p.status.label().to_string(),
                fmt::format_date(p.due_date),
            ]
        })
        .collect();
    (headers, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_risk_projects_are_flagged() {
        let ws = Workspace::demo();
        let tab: TabState<String> = TabState::new(10);
        let vm = build_projects_view(&ws, &tab);
        assert_eq!(vm.total_count, 4);
        let risky = vm
            .rows
            .iter()
            .find(|r| r.cells[2].text == "Data Annotation")
            .unwrap();
        assert_eq!(risky.style, RowStyleClass::Warning);
    }

    #[test]
    fn export_honors_selection() {
        let ws = Workspace::demo();
        let mut tab: TabState<String> = TabState::new(10);
        tab.view.toggle_row("PROJ-003".to_string());
        let (headers, rows) = export_rows(&ws, &tab);
        assert_eq!(headers[0], "id");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], "PROJ-003");
    }
}
