use crate::table::{LabeledTable, Year};
use serde::{Deserialize, Serialize};

/// Arithmetic mean of the present values; `None` when nothing is present.
///
/// Missing cells and NaN are skipped, so `[10, 20, missing]` averages to 15.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, count) = values
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count > 0 {
        Some(sum / count as f64)
    } else {
        None
    }
}

/// Summary statistics for one row of an indicator slice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub key: String,
    pub count: usize,
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

/// Compute per-country statistics across the year columns of a slice.
pub fn summarize(slice: &LabeledTable<String, Year>) -> Vec<Summary> {
    let mut out = Vec::with_capacity(slice.n_rows());
    for (key, cells) in slice.rows() {
        let mut vals: Vec<f64> = cells.iter().flatten().copied().filter(|v| !v.is_nan()).collect();
        vals.sort_by(f64::total_cmp);
        let count = vals.len();
        let min = vals.first().cloned();
        let max = vals.last().cloned();
        let mean = mean(vals.iter().copied().map(Some));
        let median = if count == 0 {
            None
        } else if count % 2 == 1 {
            Some(vals[count / 2])
        } else {
            Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
        };
        out.push(Summary {
            key: key.clone(),
            count,
            missing: cells.len() - count,
            min,
            max,
            mean,
            median,
        });
    }
    out
}
