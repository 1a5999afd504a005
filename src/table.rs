//! Labeled two-dimensional tables with a declared row-key type and column-key type.
//!
//! Cells are `Option<f64>`; `None` is an unreported measurement. Every operation
//! returns a fresh table, so a derived view never aliases the table it came from.

use crate::error::TableError;
use crate::stats;
use serde::Serialize;
use std::collections::BTreeMap;

/// Year column key.
pub type Year = i32;

/// One table cell; `None` means missing.
pub type Cell = Option<f64>;

/// Row-major table addressed by labels, never by position.
///
/// Row keys may repeat (e.g. a world-scope country slice keyed by indicator code);
/// column keys are expected to be unique.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledTable<R, C> {
    row_keys: Vec<R>,
    col_keys: Vec<C>,
    cells: Vec<Vec<Cell>>,
}

impl<R, C> LabeledTable<R, C> {
    /// A table with the given columns and no rows.
    pub fn empty(col_keys: Vec<C>) -> Self {
        Self {
            row_keys: Vec::new(),
            col_keys,
            cells: Vec::new(),
        }
    }

    pub fn row_keys(&self) -> &[R] {
        &self.row_keys
    }

    pub fn col_keys(&self) -> &[C] {
        &self.col_keys
    }

    pub fn n_rows(&self) -> usize {
        self.row_keys.len()
    }

    pub fn n_cols(&self) -> usize {
        self.col_keys.len()
    }

    /// True when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.row_keys.is_empty()
    }

    /// Iterate `(row key, cells)` in row order.
    pub fn rows(&self) -> impl Iterator<Item = (&R, &[Cell])> {
        self.row_keys
            .iter()
            .zip(self.cells.iter().map(Vec::as_slice))
    }

    /// Append a row; its length must match the column count.
    pub fn push_row(&mut self, key: R, values: Vec<Cell>) -> Result<(), TableError> {
        if values.len() != self.col_keys.len() {
            return Err(TableError::ShapeMismatch {
                row: self.row_keys.len(),
                expected: self.col_keys.len(),
                found: values.len(),
            });
        }
        self.row_keys.push(key);
        self.cells.push(values);
        Ok(())
    }

    /// Every cell with `None` replaced by `value`.
    pub fn fill_missing(&self, value: f64) -> Self
    where
        R: Clone,
        C: Clone,
    {
        Self {
            row_keys: self.row_keys.clone(),
            col_keys: self.col_keys.clone(),
            cells: self
                .cells
                .iter()
                .map(|row| row.iter().map(|c| Some(c.unwrap_or(value))).collect())
                .collect(),
        }
    }

    /// Per-column mean over all rows, skipping missing cells.
    pub fn column_means(&self) -> Vec<Cell> {
        (0..self.col_keys.len())
            .map(|j| stats::mean(self.cells.iter().map(|row| row[j])))
            .collect()
    }

    /// Swap the axes: rows become columns and columns become rows.
    pub fn transpose(&self) -> LabeledTable<C, R>
    where
        R: Clone,
        C: Clone,
    {
        let cells = (0..self.col_keys.len())
            .map(|j| self.cells.iter().map(|row| row[j]).collect())
            .collect();
        LabeledTable {
            row_keys: self.col_keys.clone(),
            col_keys: self.row_keys.clone(),
            cells,
        }
    }

    /// Keep the rows whose key satisfies `keep`, in their original order.
    pub fn filter_rows(&self, keep: impl Fn(&R) -> bool) -> Self
    where
        R: Clone,
        C: Clone,
    {
        let (row_keys, cells) = self
            .row_keys
            .iter()
            .zip(&self.cells)
            .filter(|(k, _)| keep(k))
            .map(|(k, row)| (k.clone(), row.clone()))
            .unzip();
        Self {
            row_keys,
            col_keys: self.col_keys.clone(),
            cells,
        }
    }

    /// Copy with one more row, `key`, holding [`Self::column_means`].
    pub fn with_mean_row(&self, key: R) -> Self
    where
        R: Clone,
        C: Clone,
    {
        let mut out = self.clone();
        out.cells.push(self.column_means());
        out.row_keys.push(key);
        out
    }
}

impl<R: Clone + PartialEq, C: Clone + PartialEq> LabeledTable<R, C> {
    /// Build a table from `(key, cells)` pairs.
    pub fn from_rows(
        col_keys: Vec<C>,
        rows: impl IntoIterator<Item = (R, Vec<Cell>)>,
    ) -> Result<Self, TableError> {
        let mut table = Self::empty(col_keys);
        for (key, values) in rows {
            table.push_row(key, values)?;
        }
        Ok(table)
    }

    /// Drop every row keyed `key`, then append one with `values`.
    pub fn set_row(&mut self, key: R, values: Vec<Cell>) -> Result<(), TableError> {
        if values.len() != self.col_keys.len() {
            return Err(TableError::ShapeMismatch {
                row: self.row_keys.len(),
                expected: self.col_keys.len(),
                found: values.len(),
            });
        }
        *self = self.filter_rows(|k| *k != key);
        self.push_row(key, values)
    }

    /// Cells of the first row keyed `key`.
    pub fn row(&self, key: &R) -> Option<&[Cell]> {
        let i = self.row_keys.iter().position(|k| k == key)?;
        Some(&self.cells[i])
    }

    /// Copy of one column, top to bottom.
    pub fn column(&self, key: &C) -> Option<Vec<Cell>> {
        let j = self.col_keys.iter().position(|k| k == key)?;
        Some(self.cells.iter().map(|row| row[j]).collect())
    }

    /// Value at (row, column); `None` when missing or either key is absent.
    pub fn get(&self, row: &R, col: &C) -> Cell {
        let j = self.col_keys.iter().position(|k| k == col)?;
        self.row(row).and_then(|cells| cells[j])
    }

    /// Rows for the requested keys, in the requested order.
    ///
    /// Keys with no matching row are skipped; a key matching several rows
    /// contributes all of them.
    pub fn select_rows(&self, keys: &[R]) -> Self {
        let mut out = Self::empty(self.col_keys.clone());
        for key in keys {
            for (k, row) in self.row_keys.iter().zip(&self.cells) {
                if k == key {
                    out.row_keys.push(k.clone());
                    out.cells.push(row.clone());
                }
            }
        }
        out
    }

    /// Columns for the requested keys, in the requested order.
    ///
    /// A key with no matching column yields an all-missing column.
    pub fn select_columns(&self, keys: &[C]) -> Self {
        let idx: Vec<Option<usize>> = keys
            .iter()
            .map(|key| self.col_keys.iter().position(|k| k == key))
            .collect();
        let cells = self
            .cells
            .iter()
            .map(|row| idx.iter().map(|j| j.and_then(|j| row[j])).collect())
            .collect();
        Self {
            row_keys: self.row_keys.clone(),
            col_keys: keys.to_vec(),
            cells,
        }
    }
}

impl<R: Clone + Ord, C: Clone> LabeledTable<R, C> {
    /// Collapse rows sharing a key into their per-column mean, sorted by key.
    pub fn group_mean(&self) -> Self {
        let mut groups: BTreeMap<&R, Vec<&Vec<Cell>>> = BTreeMap::new();
        for (k, row) in self.row_keys.iter().zip(&self.cells) {
            groups.entry(k).or_default().push(row);
        }
        let mut row_keys = Vec::with_capacity(groups.len());
        let mut cells = Vec::with_capacity(groups.len());
        for (key, rows) in groups {
            row_keys.push(key.clone());
            cells.push(
                (0..self.col_keys.len())
                    .map(|j| stats::mean(rows.iter().map(|row| row[j])))
                    .collect(),
            );
        }
        Self {
            row_keys,
            col_keys: self.col_keys.clone(),
            cells,
        }
    }
}
