//! Generic tabular view core: search, sort, pagination, multi-select.
//!
//! Every dashboard tab is a projection of one record collection through a
//! [`ViewState`]. The pipeline is a pure derivation — filter, then sort, then
//! paginate — recomputed from scratch on every state change. Nothing here
//! touches the UI; the TUI maps the derived rows to widgets, a future web
//! frontend would map them to markup.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::Hash;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A single field value as seen by the view core.
///
/// Records are duck-typed from the core's perspective: fields are looked up
/// by name and unknown or absent fields yield [`FieldValue::Missing`] instead
/// of an error.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    /// Collection-valued field, ordered by element count.
    Count(usize),
    /// Absent or unknown field. Sorts after every present value and never
    /// matches a search.
    Missing,
}

impl FieldValue {
    /// Total ordering used by [`sort`]: natural within a type, numeric across
    /// integer/float, missing last. Incomparable pairs compare equal so a
    /// stable sort degrades to the original order.
    pub fn order(&self, other: &FieldValue) -> Ordering {
        use FieldValue::*;
        match (self, other) {
            (Missing, Missing) => Ordering::Equal,
            (Missing, _) => Ordering::Greater,
            (_, Missing) => Ordering::Less,
            (Text(a), Text(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Integer(a), Float(b)) => (*a as f64).partial_cmp(b).unwrap_or(Ordering::Equal),
            (Float(a), Integer(b)) => a.partial_cmp(&(*b as f64)).unwrap_or(Ordering::Equal),
            (Count(a), Count(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Trait for records shown in a tabular view.
pub trait Record {
    /// Stable unique identifier within the collection.
    type Id: Clone + Eq + Hash;

    fn id(&self) -> Self::Id;

    /// Value of the named field. Unknown names yield [`FieldValue::Missing`].
    fn field(&self, name: &str) -> FieldValue;

    /// Fields consulted by [`filter`]. Non-text fields never match.
    fn search_fields() -> &'static [&'static str];
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// User-controlled view parameters for one tab.
///
/// Created with defaults when the tab state is constructed, mutated only by
/// explicit user actions, discarded on exit. `page` is 1-based and may point
/// past the filtered count; [`derive_view`] clamps it when deriving without
/// writing the clamped value back.
#[derive(Debug, Clone)]
pub struct ViewState<Id> {
    pub search: String,
    pub sort_field: Option<&'static str>,
    pub sort_direction: SortDirection,
    pub page: usize,
    pub page_size: usize,
    pub selected: HashSet<Id>,
}

impl<Id: Clone + Eq + Hash> Default for ViewState<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id: Clone + Eq + Hash> ViewState<Id> {
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            search: String::new(),
            sort_field: None,
            sort_direction: SortDirection::Ascending,
            page: 1,
            page_size: page_size.max(1),
            selected: HashSet::new(),
        }
    }

    /// Replaces the search term and resets to the first page.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    /// Sorting by the current field again toggles the direction; a new field
    /// starts ascending.
    pub fn set_sort(&mut self, field: &'static str) {
        if self.sort_field == Some(field) {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_field = Some(field);
            self.sort_direction = SortDirection::Ascending;
        }
    }

    /// Symmetric-difference toggle of a single row.
    pub fn toggle_row(&mut self, id: Id) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Selects all visible ids unless every one of them is already selected,
    /// in which case exactly those ids are deselected. Selections made on
    /// other pages survive either way.
    pub fn toggle_all_visible(&mut self, ids: &[Id]) {
        let all_selected = !ids.is_empty() && ids.iter().all(|id| self.selected.contains(id));
        if all_selected {
            for id in ids {
                self.selected.remove(id);
            }
        } else {
            for id in ids {
                self.selected.insert(id.clone());
            }
        }
    }
}

/// Returns the order-preserving subsequence of records whose searchable text
/// fields contain `term` case-insensitively. An empty term matches all.
pub fn filter<'a, T: Record>(records: &'a [T], term: &str) -> Vec<&'a T> {
    if term.is_empty() {
        return records.iter().collect();
    }
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|r| {
            T::search_fields().iter().any(|name| match r.field(name) {
                FieldValue::Text(text) => text.to_lowercase().contains(&needle),
                _ => false,
            })
        })
        .collect()
}

/// Stable sort by the named field. Descending reverses the per-pair
/// comparison rather than the sorted array, so tie groups keep their
/// original relative order in both directions.
pub fn sort<T: Record>(rows: &mut [&T], field: &str, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let cmp = a.field(field).order(&b.field(field));
        match direction {
            SortDirection::Ascending => cmp,
            SortDirection::Descending => cmp.reverse(),
        }
    });
}

/// Returns the slice for the 1-based `page`. Out-of-range pages yield an
/// empty slice.
pub fn paginate<'a, 'r, T>(rows: &'r [&'a T], page: usize, page_size: usize) -> &'r [&'a T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= rows.len() {
        return &[];
    }
    let end = (start + page_size).min(rows.len());
    &rows[start..end]
}

/// Result of running the full derivation pipeline.
#[derive(Debug)]
pub struct DerivedView<'a, T> {
    /// The visible page of records.
    pub rows: Vec<&'a T>,
    /// Filtered record count across all pages.
    pub total_count: usize,
    /// Page count for the current filter and page size (0 when empty).
    pub total_pages: usize,
    /// Effective page after clamping against the filtered count.
    pub page: usize,
}

/// Runs filter → sort → paginate and returns the visible rows plus derived
/// counts. The stored page is clamped here, not written back.
pub fn derive_view<'a, T: Record>(records: &'a [T], state: &ViewState<T::Id>) -> DerivedView<'a, T> {
    let mut rows = filter(records, &state.search);
    if let Some(field) = state.sort_field {
        sort(&mut rows, field, state.sort_direction);
    }
    let total_count = rows.len();
    let total_pages = total_count.div_ceil(state.page_size);
    let page = state.page.clamp(1, total_pages.max(1));
    let visible = paginate(&rows, page, state.page_size).to_vec();
    DerivedView {
        rows: visible,
        total_count,
        total_pages,
        page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Sample {
        id: u32,
        name: String,
        grade: i64,
        note: String,
        tags: Vec<&'static str>,
    }

    impl Sample {
        fn new(id: u32, name: &str, grade: i64, note: &str) -> Self {
            Self {
                id,
                name: name.to_string(),
                grade,
                note: note.to_string(),
                tags: Vec::new(),
            }
        }
    }

    impl Record for Sample {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }

        fn field(&self, name: &str) -> FieldValue {
            match name {
                "name" => FieldValue::Text(self.name.clone()),
                "grade" => FieldValue::Integer(self.grade),
                "note" => FieldValue::Text(self.note.clone()),
                "tags" => FieldValue::Count(self.tags.len()),
                _ => FieldValue::Missing,
            }
        }

        fn search_fields() -> &'static [&'static str] {
            &["name", "note"]
        }
    }

    fn collection(n: u32) -> Vec<Sample> {
        (0..n)
            .map(|i| Sample::new(i, &format!("record {i}"), (i % 5) as i64, "plain"))
            .collect()
    }

    #[test]
    fn empty_term_matches_all_in_order() {
        let records = collection(5);
        let rows = filter(&records, "");
        let ids: Vec<u32> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn filter_is_case_insensitive_subsequence() {
        let records = vec![
            Sample::new(0, "Alpha", 1, "first"),
            Sample::new(1, "beta", 2, "SECOND"),
            Sample::new(2, "Gamma", 3, "third"),
        ];
        let rows = filter(&records, "second");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 1);

        // Order of the full collection is preserved for multi-hit terms.
        let rows = filter(&records, "a");
        let ids: Vec<u32> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn filter_ignores_non_text_fields() {
        let records = collection(3);
        // "grade" holds integers and is not a search field; digits in the
        // term only match the name text.
        assert_eq!(filter(&records, "record 2").len(), 1);
        assert_eq!(filter(&records, "xyzzy").len(), 0);
    }

    #[test]
    fn sort_is_a_stable_permutation() {
        let mut records = collection(25);
        records.reverse();
        let mut rows = filter(&records, "");
        sort(&mut rows, "grade", SortDirection::Ascending);
        assert_eq!(rows.len(), records.len());

        // Idempotent: sorting again changes nothing.
        let once: Vec<u32> = rows.iter().map(|r| r.id).collect();
        sort(&mut rows, "grade", SortDirection::Ascending);
        let twice: Vec<u32> = rows.iter().map(|r| r.id).collect();
        assert_eq!(once, twice);

        // Ties (same grade) keep the input order.
        for pair in rows.windows(2) {
            if pair[0].grade == pair[1].grade {
                let a = records.iter().position(|r| r.id == pair[0].id).unwrap();
                let b = records.iter().position(|r| r.id == pair[1].id).unwrap();
                assert!(a < b, "tie group reordered");
            }
        }
    }

    #[test]
    fn descending_reverses_groups_not_ties() {
        let records = vec![
            Sample::new(0, "a", 1, ""),
            Sample::new(1, "b", 2, ""),
            Sample::new(2, "c", 1, ""),
        ];
        let mut rows = filter(&records, "");
        sort(&mut rows, "grade", SortDirection::Ascending);
        let asc: Vec<u32> = rows.iter().map(|r| r.id).collect();
        assert_eq!(asc, vec![0, 2, 1]);

        sort(&mut rows, "grade", SortDirection::Descending);
        let desc: Vec<u32> = rows.iter().map(|r| r.id).collect();
        // The 1-graded tie group stays 0 before 2.
        assert_eq!(desc, vec![1, 0, 2]);
    }

    #[test]
    fn grade_sort_scenario() {
        let records = vec![
            Sample::new(0, "a", 4, ""),
            Sample::new(1, "b", 5, ""),
            Sample::new(2, "c", 2, ""),
        ];
        let mut rows = filter(&records, "");
        sort(&mut rows, "grade", SortDirection::Ascending);
        let grades: Vec<i64> = rows.iter().map(|r| r.grade).collect();
        assert_eq!(grades, vec![2, 4, 5]);

        sort(&mut rows, "grade", SortDirection::Descending);
        let grades: Vec<i64> = rows.iter().map(|r| r.grade).collect();
        assert_eq!(grades, vec![5, 4, 2]);
    }

    #[test]
    fn unknown_sort_field_is_a_stable_noop() {
        let records = collection(6);
        let mut rows = filter(&records, "");
        sort(&mut rows, "nonexistent", SortDirection::Descending);
        let ids: Vec<u32> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn missing_values_sort_last() {
        assert_eq!(
            FieldValue::Missing.order(&FieldValue::Integer(1)),
            Ordering::Greater
        );
        assert_eq!(
            FieldValue::Integer(1).order(&FieldValue::Missing),
            Ordering::Less
        );
        assert_eq!(
            FieldValue::Integer(2).order(&FieldValue::Float(2.5)),
            Ordering::Less
        );
    }

    #[test]
    fn count_fields_order_by_length() {
        let mut a = Sample::new(0, "a", 0, "");
        a.tags = vec!["x", "y"];
        let mut b = Sample::new(1, "b", 0, "");
        b.tags = vec!["x"];
        let records = vec![a, b];
        let mut rows = filter(&records, "");
        sort(&mut rows, "tags", SortDirection::Ascending);
        let ids: Vec<u32> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 0]);
    }

    #[test]
    fn concatenated_pages_reconstruct_the_collection() {
        let records = collection(25);
        let rows = filter(&records, "");
        let pages = rows.len().div_ceil(7);
        let mut rebuilt = Vec::new();
        for page in 1..=pages {
            rebuilt.extend_from_slice(paginate(&rows, page, 7));
        }
        let ids: Vec<u32> = rebuilt.iter().map(|r| r.id).collect();
        let expected: Vec<u32> = (0..25).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn out_of_range_page_is_empty() {
        let records = collection(5);
        let rows = filter(&records, "");
        assert!(paginate(&rows, 0, 10).is_empty());
        assert!(paginate(&rows, 2, 10).is_empty());
        assert_eq!(paginate(&rows, 1, 10).len(), 5);
    }

    #[test]
    fn pagination_scenario_25_records() {
        let records = collection(25);
        let state: ViewState<u32> = ViewState::new();
        let dv = derive_view(&records, &state);
        assert_eq!(dv.total_count, 25);
        assert_eq!(dv.total_pages, 3);
        assert_eq!(dv.page, 1);
        let ids: Vec<u32> = dv.rows.iter().map(|r| r.id).collect();
        let expected: Vec<u32> = (0..10).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn derive_clamps_page_without_storing() {
        let records = collection(25);
        let mut state: ViewState<u32> = ViewState::new();
        state.page = 99;
        let dv = derive_view(&records, &state);
        assert_eq!(dv.page, 3);
        assert_eq!(dv.rows.len(), 5);
        // The stored page is untouched.
        assert_eq!(state.page, 99);
    }

    #[test]
    fn derive_view_on_empty_collection() {
        let records: Vec<Sample> = Vec::new();
        let state: ViewState<u32> = ViewState::new();
        let dv = derive_view(&records, &state);
        assert!(dv.rows.is_empty());
        assert_eq!(dv.total_count, 0);
        assert_eq!(dv.total_pages, 0);
        assert_eq!(dv.page, 1);
    }

    #[test]
    fn set_search_resets_page() {
        let mut state: ViewState<u32> = ViewState::new();
        state.page = 3;
        state.set_search("term");
        assert_eq!(state.page, 1);
        assert_eq!(state.search, "term");
    }

    #[test]
    fn set_sort_toggles_direction_on_same_field() {
        let mut state: ViewState<u32> = ViewState::new();
        state.set_sort("grade");
        assert_eq!(state.sort_field, Some("grade"));
        assert_eq!(state.sort_direction, SortDirection::Ascending);
        state.set_sort("grade");
        assert_eq!(state.sort_direction, SortDirection::Descending);
        state.set_sort("name");
        assert_eq!(state.sort_field, Some("name"));
        assert_eq!(state.sort_direction, SortDirection::Ascending);
    }

    #[test]
    fn toggle_row_is_an_involution() {
        let mut state: ViewState<u32> = ViewState::new();
        state.toggle_row(7);
        assert!(state.selected.contains(&7));
        state.toggle_row(7);
        assert!(state.selected.is_empty());
    }

    #[test]
    fn toggle_all_visible_twice_restores_selection() {
        let mut state: ViewState<u32> = ViewState::new();
        state.toggle_row(1);
        let before = state.selected.clone();
        let visible = vec![3, 4, 5];
        state.toggle_all_visible(&visible);
        assert!(state.selected.contains(&1));
        assert_eq!(state.selected.len(), 4);
        state.toggle_all_visible(&visible);
        assert_eq!(state.selected, before);
    }

    #[test]
    fn toggle_all_visible_keeps_other_pages() {
        let mut state: ViewState<u32> = ViewState::new();
        // Selection made on another page.
        state.toggle_row(42);
        let visible = vec![1, 2];
        state.toggle_all_visible(&visible);
        state.toggle_all_visible(&visible);
        assert!(state.selected.contains(&42));
        assert_eq!(state.selected.len(), 1);
    }

    #[test]
    fn toggle_all_visible_completes_partial_selection() {
        let mut state: ViewState<u32> = ViewState::new();
        state.toggle_row(1);
        let visible = vec![1, 2, 3];
        state.toggle_all_visible(&visible);
        assert_eq!(state.selected.len(), 3);
    }
}
