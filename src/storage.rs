use crate::corr::CorrelationMatrix;
use crate::table::LabeledTable;
use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt::Display;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Prefix text that a spreadsheet would evaluate as a formula.
fn sanitize(cell: &str) -> Cow<'_, str> {
    match cell.chars().next() {
        Some('=' | '+' | '-' | '@' | '\t' | '\r') => Cow::Owned(format!("'{cell}")),
        _ => Cow::Borrowed(cell),
    }
}

fn fmt_value(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

/// Save a labeled table as CSV: `corner` heads the key column, missing cells are blank.
pub fn save_table_csv<R, C, P>(table: &LabeledTable<R, C>, corner: &str, path: P) -> Result<()>
where
    R: Display,
    C: Display,
    P: AsRef<Path>,
{
    let mut wtr = WriterBuilder::new().from_path(path)?;
    let mut header = vec![sanitize(corner).into_owned()];
    header.extend(table.col_keys().iter().map(|c| sanitize(&c.to_string()).into_owned()));
    wtr.write_record(&header)?;
    for (key, cells) in table.rows() {
        let mut record = vec![sanitize(&key.to_string()).into_owned()];
        record.extend(cells.iter().map(|c| fmt_value(*c)));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save a correlation matrix as CSV with codes on both axes; NaN is written as `NaN`.
pub fn save_matrix_csv<P: AsRef<Path>>(matrix: &CorrelationMatrix, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    let mut header = vec!["indicator".to_string()];
    header.extend(matrix.codes().iter().map(|c| sanitize(c).into_owned()));
    wtr.write_record(&header)?;
    for (code, row) in matrix.codes().iter().zip(matrix.values()) {
        let mut record = vec![sanitize(code).into_owned()];
        record.extend(row.iter().map(|v| v.to_string()));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save any serializable value as pretty JSON.
pub fn save_json<T: Serialize + ?Sized, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(value)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
