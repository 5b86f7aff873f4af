//! Annotations (ANN) view model.

use crate::fmt;
use crate::model::{Annotation, Workspace};
use crate::table;
use crate::tui::state::TabState;
use crate::view::common::{
    RowStyleClass, TableViewModel, ViewCell, ViewRow, ascending, checkbox, filtered_sorted,
    selection_scope, truncate,
};

pub const HEADERS: &[&str] = &[
    "SEL", "ID", "INPUT", "MODEL RESPONSE", "EVAL RESPONSE", "GRADE", "VOTES", "CMT",
];
pub const FIELDS: &[&str] = &[
    "", "", "input", "model_response", "eval_response", "grade", "feedback", "comments",
];
pub const WIDTHS: &[u16] = &[3, 4, 28, 34, 34, 5, 5, 3];

pub const SORT_FIELDS: &[&str] = &["grade", "input", "feedback", "comments"];

/// Grade coloring: 4+ plain, 3 warning, below critical.
fn style_for(annotation: &Annotation) -> RowStyleClass {
    if annotation.grade >= 4 {
        RowStyleClass::Normal
    } else if annotation.grade == 3 {
        RowStyleClass::Warning
    } else {
        RowStyleClass::Critical
    }
}

fn cells(annotation: &Annotation, selected: bool) -> Vec<ViewCell> {
    let (positive, total) = annotation.vote_tally();
    vec![
        checkbox(selected),
        ViewCell::plain(annotation.id.to_string()),
        ViewCell::plain(truncate(&annotation.input, 26)),
        ViewCell::plain(truncate(&annotation.model_response, 32)),
        ViewCell::plain(truncate(&annotation.eval_response, 32)),
        ViewCell::plain(fmt::format_grade(annotation.grade)),
        ViewCell::plain(format!("{positive}/{total}")),
        ViewCell::plain(annotation.comments.len().to_string()),
    ]
}

pub fn build_annotations_view(ws: &Workspace, tab: &TabState<u32>) -> TableViewModel<u32> {
    let dv = table::derive_view(&ws.annotations, &tab.view);
    let rows = dv
        .rows
        .iter()
        .map(|a| ViewRow {
            id: a.id,
            cells: cells(a, tab.view.selected.contains(&a.id)),
            style: style_for(a),
        })
        .collect();

    TableViewModel {
        title: " Annotations (ANN) ".to_string(),
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
    let rows = selection_scope(filtered_sorted(&ws.annotations, &tab.view), &tab.view);
    let headers = vec![
        "id", "image", "input", "model_response", "eval_response", "grade", "consensus",
        "cumulative_feedback", "positive_votes", "total_votes", "comments",
    ];
    let body = rows
        .into_iter()
        .map(|a| {
            let (positive, total) = a.vote_tally();
            vec![
                a.id.to_string(),
                a.image.clone(),
                a.input.clone(),
                a.model_response.clone(),
                a.eval_response.clone(),
                a.grade.to_string(),
                a.consensus.clone(),
                a.cumulative_feedback.clone(),
                positive.to_string(),
                total.to_string(),
                a.comments.len().to_string(),
            ]
        })
        .collect();
    (headers, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stroke_search_narrows_to_one_row() {
        let ws = Workspace::demo();
        let mut tab: TabState<u32> = TabState::new(10);
        tab.view.set_search("stroke");
        let vm = build_annotations_view(&ws, &tab);
        assert_eq!(vm.total_count, 1);
        assert_eq!(vm.rows.len(), 1);
    }

    #[test]
    fn low_grades_are_critical() {
        let ws = Workspace::demo();
        let tab: TabState<u32> = TabState::new(10);
        let vm = build_annotations_view(&ws, &tab);
        let missed = vm.rows.iter().find(|r| r.cells[5].text == "2/5").unwrap();
        assert_eq!(missed.style, RowStyleClass::Critical);
    }

    #[test]
    fn grade_sort_ascends_then_descends() {
        let ws = Workspace::demo();
        let mut tab: TabState<u32> = TabState::new(10);
        tab.view.set_sort("grade");
        let vm = build_annotations_view(&ws, &tab);
        let grades: Vec<String> = vm.rows.iter().map(|r| r.cells[5].text.clone()).collect();
        let mut sorted = grades.clone();
        sorted.sort();
        assert_eq!(grades, sorted);

        tab.view.set_sort("grade");
        let vm = build_annotations_view(&ws, &tab);
        let grades: Vec<String> = vm.rows.iter().map(|r| r.cells[5].text.clone()).collect();
        let mut sorted = grades.clone();
        sorted.sort();
        sorted.reverse();
        assert_eq!(grades, sorted);
    }
}
