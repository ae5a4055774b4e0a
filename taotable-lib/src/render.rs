//! Pure markup rendering
//!
//! Rendering is a pure function of the current data set, sort state and
//! template set. The component controller calls it after every state
//! change; any host surface can apply the returned markup and wire a
//! click handler per header binding.

use crate::error::TemplateError;
use crate::model::DataSet;
use crate::model::SortDir;
use crate::model::SortState;
use crate::template::PlaceholderPolicy;
use crate::template::TemplateSet;
use crate::template::placehold;

/// Markup shown when the data set is empty.
pub const NO_DATA_VIEW: &str = "<div>data not provided</div><hr/>";

/// A header cell a host must attach a click listener to.
///
/// Listeners must be rebound after every render, since the rendered
/// subtree is replaced wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderBinding {
    /// The column this header cell sorts.
    pub column: String,
    /// CSS selector locating the header cell in the rendered markup.
    pub selector: String,
}

/// The result of one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    /// The component's full markup.
    pub html: String,
    /// One binding per rendered header cell, in column order.
    pub headers: Vec<HeaderBinding>,
}

/// Renders the data set under the given sort state into markup.
///
/// An empty data set renders the fixed [`NO_DATA_VIEW`] with no table
/// element and no header bindings. Otherwise the column list comes from
/// the first row: one header cell per column (the active sort column
/// carries the `sort` class, plus `rev` when descending), one row per
/// data row, one cell per column. Rows missing a column render an empty
/// cell; keys beyond the first row's set are ignored.
pub fn render(
    data: &DataSet,
    sort: &SortState,
    templates: &TemplateSet,
    policy: PlaceholderPolicy,
) -> Result<View, TemplateError> {
    if data.is_empty() {
        return Ok(View {
            html: NO_DATA_VIEW.to_string(),
            headers: Vec::new(),
        });
    }

    let columns: Vec<&str> = data.columns().collect();

    let mut head = String::new();
    let mut headers = Vec::with_capacity(columns.len());
    for &column in &columns {
        let classes = match sort.direction_for(column) {
            Some(SortDir::Ascending) => "sort",
            Some(SortDir::Descending) => "sort rev",
            None => "",
        };
        head.push_str(&placehold(
            &templates.head_cell,
            &[("TEXT", column), ("CLASSES", classes)],
            policy,
        )?);
        headers.push(HeaderBinding {
            column: column.to_string(),
            selector: placehold(
                &templates.handled_selector,
                &[("FIELDSELECTOR", column)],
                policy,
            )?,
        });
    }

    let mut body = String::new();
    for row in data {
        let mut cells = String::new();
        for &column in &columns {
            let text = row.cell_text(column);
            cells.push_str(&placehold(
                &templates.data_cell,
                &[("CELLDATA", text.as_str())],
                policy,
            )?);
        }
        body.push_str(&placehold(
            &templates.data_row,
            &[("ROWDATA", cells.as_str())],
            policy,
        )?);
    }

    let table = placehold(
        &templates.table,
        &[("HEAD", head.as_str()), ("DATA", body.as_str())],
        policy,
    )?;
    let html = placehold(
        &templates.component,
        &[("STYLES", templates.styles.as_str()), ("TABLE", table.as_str())],
        policy,
    )?;

    Ok(View { html, headers })
}
