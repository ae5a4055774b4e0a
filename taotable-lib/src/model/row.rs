//! Rows and data sets

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use super::SortDir;
use super::SortState;
use crate::error::DataError;

/// A single table row: an ordered mapping from column name to cell value.
///
/// Key order is preserved as it appeared in the source JSON; the first
/// row's key order decides the column order of the whole table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Map<String, Value>);

impl Row {
    /// Creates a row from a JSON object.
    pub fn from_object(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Returns the column names in source order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns the raw cell value for a column, if present.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    /// Returns the display text for a cell.
    ///
    /// Strings render unquoted, numbers and booleans via their JSON
    /// form, `null` as the literal `null`. A missing column renders as
    /// an empty cell.
    pub fn cell_text(&self, column: &str) -> String {
        match self.0.get(column) {
            None => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(value) => value.to_string(),
        }
    }

    /// Returns the JSON-serialized form of a cell, used as sort key.
    ///
    /// `None` for a missing column; missing cells compare equal to
    /// everything so they never reorder under sort.
    pub fn sort_key(&self, column: &str) -> Option<String> {
        self.0.get(column).map(Value::to_string)
    }
}

/// The ordered collection of rows currently held by a component.
///
/// Replaced wholesale on every load; the empty set is a valid state and
/// renders the "no data" view.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataSet(Vec<Row>);

impl DataSet {
    /// Creates an empty data set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a data set from a JSON array of flat objects.
    ///
    /// # Example
    ///
    /// ```
    /// use taotable_lib::model::DataSet;
    ///
    /// let data = DataSet::from_json(r#"[{"name":"a","age":3}]"#).unwrap();
    /// assert_eq!(data.len(), 1);
    /// assert_eq!(data.columns().collect::<Vec<_>>(), ["name", "age"]);
    /// ```
    pub fn from_json(text: &str) -> Result<Self, DataError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Builds a data set from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, DataError> {
        let entries = match value {
            Value::Array(entries) => entries,
            Value::Object(_) => return Err(DataError::NotAnArray { found: "an object" }),
            Value::Null => return Err(DataError::NotAnArray { found: "null" }),
            Value::String(_) => return Err(DataError::NotAnArray { found: "a string" }),
            _ => return Err(DataError::NotAnArray { found: "a scalar" }),
        };

        let mut rows = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            match entry {
                Value::Object(fields) => rows.push(Row::from_object(fields)),
                _ => return Err(DataError::RowNotAnObject { index }),
            }
        }
        Ok(Self(rows))
    }

    /// Returns the rows in display order.
    pub fn rows(&self) -> &[Row] {
        &self.0
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the column names, derived from the first row.
    ///
    /// Empty data sets have no columns.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.iter().take(1).flat_map(Row::columns)
    }

    /// Stably reorders the rows in place according to the sort state.
    ///
    /// Ties keep their relative order, and rows missing the sort column
    /// keep their exact positions: "missing compares equal to
    /// everything" is not a total order, so such rows are held out of
    /// the comparison entirely rather than fed to the sort. Re-invoking
    /// with an unchanged state leaves the order unchanged.
    pub fn sort(&mut self, state: &SortState) {
        let SortState::Sorted { by, dir } = state else {
            return;
        };

        let rows = std::mem::take(&mut self.0);
        let total = rows.len();
        let mut keyed = Vec::with_capacity(total);
        let mut pinned = Vec::new();
        for (index, row) in rows.into_iter().enumerate() {
            match row.sort_key(by) {
                Some(key) => keyed.push((key, row)),
                None => pinned.push((index, row)),
            }
        }

        keyed.sort_by(|(a, _), (b, _)| match dir {
            SortDir::Ascending => a.cmp(b),
            SortDir::Descending => a.cmp(b).reverse(),
        });

        let mut keyed = keyed.into_iter();
        let mut pinned = pinned.into_iter().peekable();
        self.0 = Vec::with_capacity(total);
        for index in 0..total {
            let row = match pinned.peek() {
                Some((at, _)) if *at == index => pinned.next().map(|(_, row)| row),
                _ => keyed.next().map(|(_, row)| row),
            };
            if let Some(row) = row {
                self.0.push(row);
            }
        }
    }
}

impl FromIterator<Row> for DataSet {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a DataSet {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
