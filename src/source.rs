//! Parser for the World Bank wide-format CSV export.
//!
//! The export starts with four lines of boilerplate (data source, last updated
//! date and blank separators), followed by the header row:
//!
//! ```text
//! "Country Name","Country Code","Indicator Name","Indicator Code","1960",...,"2021",
//! ```
//!
//! The trailing delimiter produces an unnamed artifact column that is dropped.

use crate::error::MalformedSourceError;
use crate::table::{Cell, Year};
use csv::{ReaderBuilder, StringRecord};
use log::{debug, info};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Lines of boilerplate preceding the header row.
pub const PREAMBLE_LINES: usize = 4;

pub const COUNTRY_NAME: &str = "Country Name";
pub const COUNTRY_CODE: &str = "Country Code";
pub const INDICATOR_NAME: &str = "Indicator Name";
pub const INDICATOR_CODE: &str = "Indicator Code";

/// Cell texts read as missing, in addition to the empty cell.
const NA_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null", "..",
];

/// One (country, indicator) row of the export.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRow {
    pub country_name: String,
    pub country_code: String,
    pub indicator_name: String,
    pub indicator_code: String,
    /// One cell per entry of [`SourceTable::years`].
    pub values: Vec<Cell>,
}

/// The parsed export: year columns in ascending order, rows in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceTable {
    years: Vec<Year>,
    rows: Vec<SourceRow>,
}

/// Positions of the identifying columns within a header record.
struct Layout {
    country_name: usize,
    country_code: usize,
    indicator_name: usize,
    indicator_code: usize,
    /// `(record index, year)` sorted by year.
    years: Vec<(usize, Year)>,
}

impl Layout {
    fn from_header(header: &StringRecord) -> Result<Self, MalformedSourceError> {
        let find = |name: &'static str| {
            header
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(MalformedSourceError::MissingColumn(name))
        };
        let country_name = find(COUNTRY_NAME)?;
        let country_code = find(COUNTRY_CODE)?;
        let indicator_name = find(INDICATOR_NAME)?;
        let indicator_code = find(INDICATOR_CODE)?;
        let ident = [country_name, country_code, indicator_name, indicator_code];

        let mut years = Vec::new();
        let mut seen = HashSet::new();
        for (index, raw) in header.iter().enumerate() {
            let h = raw.trim();
            if ident.contains(&index) || h.is_empty() {
                continue;
            }
            let year: Year = h.parse().map_err(|_| MalformedSourceError::UnexpectedColumn {
                index,
                header: h.to_string(),
            })?;
            if !seen.insert(year) {
                return Err(MalformedSourceError::DuplicateYear(year));
            }
            years.push((index, year));
        }
        years.sort_by_key(|&(_, y)| y);

        Ok(Self {
            country_name,
            country_code,
            indicator_name,
            indicator_code,
            years,
        })
    }
}

fn parse_cell(raw: Option<&str>, line: u64, year: Year) -> Result<Cell, MalformedSourceError> {
    let s = raw.unwrap_or("").trim();
    if s.is_empty() || NA_TOKENS.contains(&s) {
        return Ok(None);
    }
    let v = s.parse::<f64>().map_err(|_| MalformedSourceError::BadValue {
        line,
        year,
        value: s.to_string(),
    })?;
    // NaN and infinities are stored as missing so they zero-fill like gaps.
    Ok(v.is_finite().then_some(v))
}

impl SourceTable {
    /// Open and parse an export file. The handle is released on every path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, MalformedSourceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| MalformedSourceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(file)?;
        info!(
            "loaded {} rows x {} years from {}",
            table.rows.len(),
            table.years.len(),
            path.display()
        );
        Ok(table)
    }

    /// Parse an export from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, MalformedSourceError> {
        let mut reader = BufReader::new(reader);
        let mut line = String::new();
        for _ in 0..PREAMBLE_LINES {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                return Err(MalformedSourceError::MissingHeader);
            }
        }

        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let header = rdr.headers()?.clone();
        if header.is_empty() {
            return Err(MalformedSourceError::MissingHeader);
        }
        let layout = Layout::from_header(&header)?;
        debug!(
            "header has {} columns, {} year columns",
            header.len(),
            layout.years.len()
        );

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            // Lines are counted from the top of the file, preamble included.
            let line = record
                .position()
                .map(|p| p.line() + PREAMBLE_LINES as u64)
                .unwrap_or(0);
            if record.len() > header.len() {
                return Err(MalformedSourceError::RaggedRow {
                    line,
                    expected: header.len(),
                    found: record.len(),
                });
            }
            let text = |i: usize| record.get(i).unwrap_or("").trim().to_string();
            let values = layout
                .years
                .iter()
                .map(|&(i, year)| parse_cell(record.get(i), line, year))
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(SourceRow {
                country_name: text(layout.country_name),
                country_code: text(layout.country_code),
                indicator_name: text(layout.indicator_name),
                indicator_code: text(layout.indicator_code),
                values,
            });
        }

        let years = layout.years.into_iter().map(|(_, y)| y).collect();
        Self::from_parts(years, rows)
    }

    /// Assemble a table from already-parsed parts, enforcing row uniqueness.
    ///
    /// Both (country code, indicator code) and (country name, indicator code)
    /// must be unique; indicator slices are keyed by country name.
    pub fn from_parts(years: Vec<Year>, rows: Vec<SourceRow>) -> Result<Self, MalformedSourceError> {
        let mut by_code = HashSet::new();
        let mut by_name = HashSet::new();
        for row in &rows {
            if row.values.len() != years.len() {
                return Err(MalformedSourceError::RaggedRow {
                    line: 0,
                    expected: years.len(),
                    found: row.values.len(),
                });
            }
            let fresh_code = by_code.insert((row.country_code.as_str(), row.indicator_code.as_str()));
            let fresh_name = by_name.insert((row.country_name.as_str(), row.indicator_code.as_str()));
            if !fresh_code || !fresh_name {
                return Err(MalformedSourceError::DuplicateRow {
                    country: row.country_name.clone(),
                    indicator: row.indicator_code.clone(),
                });
            }
        }
        Ok(Self { years, rows })
    }

    /// Year columns, ascending.
    pub fn years(&self) -> &[Year] {
        &self.years
    }

    pub fn rows(&self) -> &[SourceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct indicator codes in first-seen order.
    pub fn indicator_codes(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .map(|r| r.indicator_code.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Distinct country names in first-seen order.
    pub fn country_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .map(|r| r.country_name.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }
}
