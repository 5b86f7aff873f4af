//! Experts (EXP) view model.

use chrono::{DateTime, Utc};

use crate::fmt::{self, Staleness};
use crate::model::{Expert, ExpertStatus, Workspace};
use crate::table;
use crate::tui::state::TabState;
use crate::view::common::{
    RowStyleClass, TableViewModel, ViewCell, ViewRow, ascending, checkbox, filtered_sorted,
    selection_scope,
};

pub const HEADERS: &[&str] = &[
    "SEL", "ID", "NAME", "ROLE", "PROGRESS", "DOC", "STATUS", "LAST EDIT",
];
pub const FIELDS: &[&str] = &[
    "", "", "name", "role", "progress", "version", "status", "latest_edit",
];
pub const WIDTHS: &[u16] = &[3, 4, 20, 14, 8, 5, 12, 12];

pub const SORT_FIELDS: &[&str] = &["name", "progress", "status", "latest_edit"];

fn style_for(expert: &Expert) -> RowStyleClass {
    match expert.status {
        ExpertStatus::Completed => RowStyleClass::Active,
        ExpertStatus::InProgress => RowStyleClass::Normal,
        ExpertStatus::NotStarted => RowStyleClass::Dimmed,
    }
}

/// The last-edit cell is colored by submission recency.
fn last_edit_cell(expert: &Expert, now: DateTime<Utc>) -> ViewCell {
    match expert.latest_edit {
        None => ViewCell::styled("-", RowStyleClass::Dimmed),
        Some(ts) => {
            let style = match fmt::staleness(ts, now) {
                Staleness::Fresh => RowStyleClass::Active,
                Staleness::Aging => RowStyleClass::Warning,
                Staleness::Stale => RowStyleClass::Critical,
            };
            ViewCell::styled(fmt::format_age(ts, now), style)
        }
    }
}

fn cells(expert: &Expert, selected: bool, now: DateTime<Utc>) -> Vec<ViewCell> {
    vec![
        checkbox(selected),
        ViewCell::plain(expert.id.to_string()),
        ViewCell::plain(expert.name.clone()),
        ViewCell::plain(expert.role.clone()),
        ViewCell::plain(fmt::format_percent(expert.progress_pct)),
        ViewCell::plain(expert.doc_version.clone()),
        ViewCell::plain(expert.status.label()),
        last_edit_cell(expert, now),
    ]
}

pub fn build_experts_view(
    ws: &Workspace,
    tab: &TabState<u32>,
    now: DateTime<Utc>,
) -> TableViewModel<u32> {
    let dv = table::derive_view(&ws.experts, &tab.view);
    let rows = dv
        .rows
        .iter()
        .map(|e| ViewRow {
            id: e.id,
            cells: cells(e, tab.view.selected.contains(&e.id), now),
            style: style_for(e),
        })
        .collect();

    TableViewModel {
        title: " Experts (EXP) ".to_string(),
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
    let rows = selection_scope(filtered_sorted(&ws.experts, &tab.view), &tab.view);
    let headers = vec!["id", "name", "role", "progress_pct", "doc_version", "status", "latest_edit"];
    let body = rows
        .into_iter()
        .map(|e| {
            vec![
                e.id.to_string(),
                e.name.clone(),
                e.role.clone(),
                e.progress_pct.to_string(),
                e.doc_version.clone(),
                e.status.label().to_string(),
                e.latest_edit.map(fmt::format_datetime).unwrap_or_default(),
            ]
        })
        .collect();
    (headers, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 10, 12, 0, 0).single().unwrap()
    }

    #[test]
    fn never_submitted_sorts_last() {
        let ws = Workspace::demo();
        let mut tab: TabState<u32> = TabState::new(10);
        tab.view.set_sort("latest_edit");
        let vm = build_experts_view(&ws, &tab, now());
        let last = vm.rows.last().unwrap();
        assert_eq!(last.cells[7].text, "-");
    }

    #[test]
    fn fresh_edit_is_green() {
        let ws = Workspace::demo();
        let tab: TabState<u32> = TabState::new(10);
        let vm = build_experts_view(&ws, &tab, now());
        let jane = vm
            .rows
            .iter()
            .find(|r| r.cells[2].text == "Dr. Jane Smith")
            .unwrap();
        assert_eq!(jane.cells[7].style, Some(RowStyleClass::Active));
    }
}
