//! Append-only row storage

use filmdb_common::{FilmdbError, Result};

/// Position of a row in its [`Table`]. Issued once, never reused.
pub type RowId = usize;

/// A sequence of rows where a row's position is its id.
///
/// Rows can only be appended. Growing the table may move the rows
/// themselves, so callers hold [`RowId`]s, not references, across inserts.
#[derive(Debug, Clone)]
pub struct Table<T> {
    rows: Vec<T>,
}

impl<T> Table<T> {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
        }
    }

    /// Pre-allocate room for `additional` more rows
    pub fn reserve(&mut self, additional: usize) {
        self.rows.reserve(additional);
    }

    /// Append a row, returning its id (the previous length)
    pub fn insert(&mut self, value: T) -> RowId {
        let id = self.rows.len();
        self.rows.push(value);
        id
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: RowId) -> Result<&T> {
        self.rows.get(id).ok_or(FilmdbError::OutOfRange {
            id,
            len: self.rows.len(),
        })
    }

    pub fn get_mut(&mut self, id: RowId) -> Result<&mut T> {
        let len = self.rows.len();
        self.rows
            .get_mut(id)
            .ok_or(FilmdbError::OutOfRange { id, len })
    }

    /// Rows paired with their ids, in id order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (RowId, &T)> + '_ {
        self.rows.iter().enumerate()
    }
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}
