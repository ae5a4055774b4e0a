use taotable_lib::model::{DataSet, SortState};
use taotable_lib::render::{NO_DATA_VIEW, render};
use taotable_lib::template::{PlaceholderPolicy, TemplateSet};

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

fn render_view(json: &str, sort: &SortState) -> taotable_lib::View {
    let data = DataSet::from_json(json).unwrap();
    render(&data, sort, &TemplateSet::builtin(), PlaceholderPolicy::Strict).unwrap()
}

// ============================================================================
// Table shape
// ============================================================================

#[test]
fn test_one_header_per_column_and_one_row_per_entry() {
    let view = render_view(
        r#"[{"name":"a","age":1},{"name":"b","age":2},{"name":"c","age":3}]"#,
        &SortState::Unsorted,
    );
    assert_eq!(count(&view.html, "<th "), 2);
    assert_eq!(count(&view.html, "<tr>"), 3 + 1); // head row + data rows
    assert_eq!(count(&view.html, "<td>"), 6);
    assert_eq!(view.headers.len(), 2);
}

#[test]
fn test_columns_follow_first_row_order() {
    let view = render_view(r#"[{"b":1,"a":2}]"#, &SortState::Unsorted);
    let b = view.html.find("data-column=\"b\"").unwrap();
    let a = view.html.find("data-column=\"a\"").unwrap();
    assert!(b < a);
}

#[test]
fn test_missing_keys_render_empty_cells_and_extra_keys_are_ignored() {
    let view = render_view(
        r#"[{"a":1,"b":2},{"a":3,"extra":9},{"b":4}]"#,
        &SortState::Unsorted,
    );
    // Second row misses "b", third misses "a"; "extra" never appears.
    assert_eq!(count(&view.html, "<td></td>"), 2);
    assert!(!view.html.contains('9'));
    assert_eq!(count(&view.html, "<th "), 2);
}

#[test]
fn test_styles_fragment_precedes_table() {
    let view = render_view(r#"[{"a":1}]"#, &SortState::Unsorted);
    let styles = view.html.find("stylesheet").unwrap();
    let table = view.html.find("<table").unwrap();
    assert!(styles < table);
}

// ============================================================================
// Empty data set
// ============================================================================

#[test]
fn test_empty_data_renders_fixed_placeholder() {
    let view = render_view("[]", &SortState::Unsorted);
    assert_eq!(view.html, NO_DATA_VIEW);
    assert!(!view.html.contains("<table"));
    assert!(view.headers.is_empty());
}

// ============================================================================
// Sort indicator
// ============================================================================

#[test]
fn test_unsorted_header_carries_no_indicator() {
    let view = render_view(r#"[{"a":1,"b":2}]"#, &SortState::Unsorted);
    assert!(!view.html.contains("class=\"sort"));
}

#[test]
fn test_active_column_carries_sort_class() {
    let view = render_view(r#"[{"a":1,"b":2}]"#, &SortState::ascending("a"));
    assert!(view.html.contains("class=\"sort\" data-column=\"a\""));
    assert!(view.html.contains("class=\"\" data-column=\"b\""));
}

#[test]
fn test_descending_column_carries_rev_class() {
    let mut sort = SortState::ascending("a");
    sort.toggle("a");
    let view = render_view(r#"[{"a":1}]"#, &sort);
    assert!(view.html.contains("class=\"sort rev\" data-column=\"a\""));
}

// ============================================================================
// Header bindings
// ============================================================================

#[test]
fn test_bindings_locate_header_cells() {
    let view = render_view(r#"[{"name":"x","age":1}]"#, &SortState::Unsorted);
    assert_eq!(view.headers[0].column, "name");
    assert_eq!(view.headers[0].selector, "th[data-column=\"name\"]");
    assert_eq!(view.headers[1].column, "age");
    assert_eq!(view.headers[1].selector, "th[data-column=\"age\"]");
}
