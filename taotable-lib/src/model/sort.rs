//! Sort state and the header-click toggle machine

use serde::Deserialize;
use serde::Serialize;

/// Direction of an active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDir {
    /// Smallest serialized value first.
    Ascending,
    /// Largest serialized value first.
    Descending,
}

impl SortDir {
    /// Returns the opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// The active sort column and direction of a component.
///
/// Assigning a new data set always resets this to [`SortState::Unsorted`];
/// data and sort state are never updated independently.
///
/// Header clicks drive a three-state machine per column: the first click
/// on a column sorts it ascending, the second flips to descending, the
/// third back to ascending, and so on. Clicking a different column always
/// enters ascending on that column, whatever the prior state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortState {
    /// No sort applied; rows keep their source order.
    #[default]
    Unsorted,
    /// Rows ordered by one column.
    Sorted {
        /// The active sort column.
        by: String,
        /// The active direction.
        dir: SortDir,
    },
}

impl SortState {
    /// Creates an ascending sort on the given column.
    pub fn ascending(column: impl Into<String>) -> Self {
        Self::Sorted {
            by: column.into(),
            dir: SortDir::Ascending,
        }
    }

    /// Applies one header click on `column`.
    pub fn toggle(&mut self, column: &str) {
        *self = match self {
            Self::Sorted { by, dir } if by == column => Self::Sorted {
                by: by.clone(),
                dir: dir.flipped(),
            },
            _ => Self::ascending(column),
        };
    }

    /// Clears the sort back to the unsorted state.
    pub fn reset(&mut self) {
        *self = Self::Unsorted;
    }

    /// Returns the direction if `column` is the active sort column.
    pub fn direction_for(&self, column: &str) -> Option<SortDir> {
        match self {
            Self::Sorted { by, dir } if by == column => Some(*dir),
            _ => None,
        }
    }
}
