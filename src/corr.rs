//! Pairwise Pearson correlation between indicators.
//!
//! Missing observations are replaced with zero before correlating. This is a
//! lossy fill, not imputation: `[5, missing, 15]` is correlated as `[5, 0, 15]`.
//! A column with zero variance after filling has an undefined coefficient and
//! its whole row and column (diagonal included) are NaN.

use crate::slice::CountrySlice;
use crate::table::{LabeledTable, Year};
use serde::Serialize;

/// Square, symmetric matrix keyed by indicator code on both axes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    codes: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Indicator codes, in axis order.
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// Row-major coefficients aligned with [`Self::codes`].
    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Coefficient for a pair of codes; `None` if either code is not an axis key.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.codes.iter().position(|c| c == a)?;
        let j = self.codes.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }
}

/// Pearson correlation coefficient of two equally long samples.
///
/// NaN with fewer than two observations or when either sample is constant.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return f64::NAN;
    }
    let mx = x[..n].iter().sum::<f64>() / n as f64;
    let my = y[..n].iter().sum::<f64>() / n as f64;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x[..n].iter().zip(&y[..n]) {
        let (dx, dy) = (a - mx, b - my);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}

/// Correlate every pair of columns of a years × indicators table, missing as zero.
pub fn correlation_matrix(observations: &LabeledTable<Year, String>) -> CorrelationMatrix {
    let filled = observations.fill_missing(0.0);
    let columns: Vec<Vec<f64>> = filled
        .col_keys()
        .iter()
        .map(|code| {
            filled
                .column(code)
                .unwrap_or_default()
                .into_iter()
                .map(|c| c.unwrap_or(0.0))
                .collect()
        })
        .collect();

    let n = columns.len();
    let mut values = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        for j in i..n {
            let r = if i == j {
                // 1.0 unless the column is constant
                if pearson(&columns[i], &columns[i]).is_nan() {
                    f64::NAN
                } else {
                    1.0
                }
            } else {
                pearson(&columns[i], &columns[j])
            };
            values[i][j] = r;
            values[j][i] = r;
        }
    }
    CorrelationMatrix {
        codes: filled.col_keys().to_vec(),
        values,
    }
}

/// Correlate the chosen indicators of a country slice across years.
///
/// World-scope slices are first averaged across countries per indicator.
/// Codes absent from the slice become all-zero columns and correlate as NaN.
pub fn indicator_correlations(slice: &CountrySlice, codes: &[String]) -> CorrelationMatrix {
    let observations = slice.aggregated().transpose().select_columns(codes);
    correlation_matrix(&observations)
}
