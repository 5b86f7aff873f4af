//! Tasker queue (QUE) view model.

use chrono::{DateTime, Utc};

use crate::fmt;
use crate::model::Workspace;
use crate::table;
use crate::tui::state::TabState;
use crate::view::common::{
    TableViewModel, ViewCell, ViewRow, ascending, checkbox, filtered_sorted, selection_scope,
};

pub const HEADERS: &[&str] = &["SEL", "ID", "TITLE", "PROJECT", "CATEGORY", "ASSIGNED"];
pub const FIELDS: &[&str] = &["", "id", "title", "project", "category", "assigned_at"];
pub const WIDTHS: &[u16] = &[3, 4, 34, 22, 24, 10];

pub const SORT_FIELDS: &[&str] = &["assigned_at", "title", "project", "category"];

pub fn build_queue_view(
    ws: &Workspace,
    tab: &TabState<String>,
    now: DateTime<Utc>,
) -> TableViewModel<String> {
    let dv = table::derive_view(&ws.queue, &tab.view);
    let rows = dv
        .rows
        .iter()
        .map(|q| ViewRow {
            id: q.id.clone(),
            cells: vec![
                checkbox(tab.view.selected.contains(&q.id)),
                ViewCell::plain(q.id.clone()),
                ViewCell::plain(q.title.clone()),
                ViewCell::plain(q.project_name.clone()),
                ViewCell::plain(q.category.title()),
                ViewCell::plain(fmt::format_age(q.assigned_at, now)),
            ],
            style: Default::default(),
        })
        .collect();

    TableViewModel {
        title: " Tasker Queue (QUE) ".to_string(),
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
    let rows = selection_scope(filtered_sorted(&ws.queue, &tab.view), &tab.view);
    let headers = vec!["id", "title", "project_id", "project_name", "category", "assigned_at"];
    let body = rows
        .into_iter()
        .map(|q| {
            vec![
                q.id.clone(),
                q.title.clone(),
                q.project_id.clone(),
                q.project_name.clone(),
                q.category.title().to_string(),
                fmt::format_datetime(q.assigned_at),
            ]
        })
        .collect();
    (headers, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn queue_search_matches_project_name() {
        let ws = Workspace::demo();
        let mut tab: TabState<String> = TabState::new(10);
        tab.view.set_search("data annotation");
        let now = Utc.with_ymd_and_hms(2024, 11, 9, 12, 0, 0).single().unwrap();
        let vm = build_queue_view(&ws, &tab, now);
        assert_eq!(vm.total_count, 1);
        assert_eq!(vm.rows[0].cells[1].text, "t2");
    }
}
