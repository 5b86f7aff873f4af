//! UI-agnostic view model types.
//!
//! These types represent presentation data without any dependency on a
//! specific rendering framework. The TUI maps them to ratatui styles; tests
//! read them directly.

use crate::table::{self, Record, SortDirection, ViewState};

/// Row-level style classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowStyleClass {
    #[default]
    Normal,
    /// Warning level (TUI: yellow). E.g. at-risk projects, pending work.
    Warning,
    /// Critical level (TUI: red). E.g. failed runs, low grades.
    Critical,
    /// Positive (TUI: green). E.g. completed work.
    Active,
    /// Dimmed (TUI: dark gray). E.g. not-started reviewers.
    Dimmed,
    /// Accent (TUI: cyan). E.g. multi-selected rows.
    Accent,
}

/// A single table cell with optional per-cell style override.
#[derive(Debug, Clone, Default)]
pub struct ViewCell {
    pub text: String,
    /// `None` = inherit row style.
    pub style: Option<RowStyleClass>,
}

impl ViewCell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }

    pub fn styled(text: impl Into<String>, style: RowStyleClass) -> Self {
        Self {
            text: text.into(),
            style: Some(style),
        }
    }
}

/// One table row, parameterized by entity ID type.
#[derive(Debug, Clone)]
pub struct ViewRow<Id> {
    pub id: Id,
    pub cells: Vec<ViewCell>,
    pub style: RowStyleClass,
}

/// Complete table ready to be rendered by any frontend.
#[derive(Debug, Clone)]
pub struct TableViewModel<Id> {
    pub title: String,
    pub headers: Vec<&'static str>,
    /// Sort key per column; an empty string marks a non-sortable column.
    pub fields: Vec<&'static str>,
    pub widths: Vec<u16>,
    pub rows: Vec<ViewRow<Id>>,
    pub sort_field: Option<&'static str>,
    pub sort_ascending: bool,
    /// Effective (clamped) page.
    pub page: usize,
    pub total_pages: usize,
    pub total_count: usize,
    pub selected_count: usize,
    pub search: String,
}

impl<Id> TableViewModel<Id> {
    /// Footer line: page, counts, selection, sort and filter summary.
    pub fn footer(&self) -> String {
        let mut parts = vec![
            format!("page {}/{}", self.page, self.total_pages.max(1)),
            format!("{} records", self.total_count),
        ];
        if self.selected_count > 0 {
            parts.push(format!("{} selected", self.selected_count));
        }
        if let Some(field) = self.sort_field {
            let arrow = if self.sort_ascending { "^" } else { "v" };
            parts.push(format!("sort {field}{arrow}"));
        }
        if !self.search.is_empty() {
            parts.push(format!("search \"{}\"", self.search));
        }
        parts.join("  |  ")
    }
}

/// Selection checkbox cell, first column of every tab.
pub fn checkbox(selected: bool) -> ViewCell {
    if selected {
        ViewCell::styled("[x]", RowStyleClass::Accent)
    } else {
        ViewCell::plain("[ ]")
    }
}

/// Truncates text to `max` characters, appending `…` when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{cut}…")
}

/// Filter and sort without pagination; used by the export path.
pub fn filtered_sorted<'a, T: Record>(records: &'a [T], view: &ViewState<T::Id>) -> Vec<&'a T> {
    let mut rows = table::filter(records, &view.search);
    if let Some(field) = view.sort_field {
        table::sort(&mut rows, field, view.sort_direction);
    }
    rows
}

/// Restricts export rows to the selection when one exists.
pub fn selection_scope<'a, T: Record>(rows: Vec<&'a T>, view: &ViewState<T::Id>) -> Vec<&'a T> {
    if view.selected.is_empty() {
        rows
    } else {
        rows.into_iter()
            .filter(|r| view.selected.contains(&r.id()))
            .collect()
    }
}

/// True when the view sorts ascending (the default when unsorted).
pub fn ascending<Id>(view: &ViewState<Id>) -> bool {
    view.sort_direction == SortDirection::Ascending
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer sentence", 8), "a longe…");
    }

    #[test]
    fn footer_mentions_selection_and_search() {
        let vm: TableViewModel<u32> = TableViewModel {
            title: "t".into(),
            headers: vec![],
            fields: vec![],
            widths: vec![],
            rows: vec![],
            sort_field: Some("grade"),
            sort_ascending: false,
            page: 2,
            total_pages: 3,
            total_count: 25,
            selected_count: 4,
            search: "stroke".into(),
        };
        let footer = vm.footer();
        assert!(footer.contains("page 2/3"));
        assert!(footer.contains("25 records"));
        assert!(footer.contains("4 selected"));
        assert!(footer.contains("sort gradev"));
        assert!(footer.contains("search \"stroke\""));
    }
}
