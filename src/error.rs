//! Error types for source parsing and table reshaping.

use std::path::PathBuf;
use thiserror::Error;

/// The source file could not be turned into a [`crate::source::SourceTable`].
///
/// Every variant is fatal: no partial table is ever returned.
#[derive(Debug, Error)]
pub enum MalformedSourceError {
    #[error("cannot open source file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error while reading source: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("source ended before the column header row")]
    MissingHeader,

    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("column {index} has header `{header}`, expected a year")]
    UnexpectedColumn { index: usize, header: String },

    #[error("year {0} appears in more than one column")]
    DuplicateYear(i32),

    #[error("line {line}: {found} fields but the header declares {expected}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: cannot parse `{value}` for year {year} as a number")]
    BadValue { line: u64, year: i32, value: String },

    #[error("duplicate row for country `{country}` and indicator `{indicator}`")]
    DuplicateRow { country: String, indicator: String },
}

/// Shape violations when building a [`crate::table::LabeledTable`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("row {row} has {found} cells but the table has {expected} columns")]
    ShapeMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
}
