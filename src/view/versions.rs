//! Dataset versions (VER) view model.

use crate::fmt;
use crate::model::Workspace;
use crate::table;
use crate::tui::state::TabState;
use crate::view::common::{
    TableViewModel, ViewCell, ViewRow, ascending, checkbox, filtered_sorted, selection_scope,
};

pub const HEADERS: &[&str] = &[
    "SEL", "VER", "CREATED", "AUTHOR", "ACC", "PREC", "HUMAN", "AI",
];
pub const FIELDS: &[&str] = &[
    "", "version", "created_at", "author", "accuracy", "precision", "human_rating", "ai_rating",
];
pub const WIDTHS: &[u16] = &[3, 5, 10, 16, 5, 5, 6, 5];

pub const SORT_FIELDS: &[&str] = &[
    "version", "created_at", "author", "accuracy", "precision", "human_rating", "ai_rating",
];

pub fn build_versions_view(ws: &Workspace, tab: &TabState<u32>) -> TableViewModel<u32> {
    let dv = table::derive_view(&ws.versions, &tab.view);
    let rows = dv
        .rows
        .iter()
        .map(|v| ViewRow {
            id: v.id,
            cells: vec![
                checkbox(tab.view.selected.contains(&v.id)),
                ViewCell::plain(v.version.clone()),
                ViewCell::plain(fmt::format_date(v.created_at)),
                ViewCell::plain(v.author.clone()),
                ViewCell::plain(fmt::format_ratio(v.accuracy)),
                ViewCell::plain(fmt::format_ratio(v.precision)),
                ViewCell::plain(fmt::format_ratio(v.human_rating)),
                ViewCell::plain(fmt::format_ratio(v.ai_rating)),
            ],
            style: Default::default(),
        })
        .collect();

    TableViewModel {
        title: " Dataset Versions (VER) ".to_string(),
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
    let rows = selection_scope(filtered_sorted(&ws.versions, &tab.view), &tab.view);
    let headers = vec![
        "version", "created_at", "author", "accuracy", "precision", "human_rating", "ai_rating",
    ];
    let body = rows
        .into_iter()
        .map(|v| {
            vec![
                v.version.clone(),
                fmt::format_date(v.created_at),
                v.author.clone(),
                fmt::format_ratio(v.accuracy),
                fmt::format_ratio(v.precision),
                fmt::format_ratio(v.human_rating),
                fmt::format_ratio(v.ai_rating),
            ]
        })
        .collect();
    (headers, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_sort_by_accuracy() {
        let ws = Workspace::demo();
        let mut tab: TabState<u32> = TabState::new(10);
        tab.view.set_sort("accuracy");
        tab.view.set_sort("accuracy"); // descending
        let vm = build_versions_view(&ws, &tab);
        assert_eq!(vm.rows[0].cells[1].text, "1.3");
    }
}
