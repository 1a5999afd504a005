//! Indicator and country slices derived from a [`SourceTable`].
//!
//! Every slice is an independent copy: filling, augmenting or reshaping one
//! never touches the source table or a sibling slice.

use crate::error::MalformedSourceError;
use crate::source::SourceTable;
use crate::table::{LabeledTable, Year};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Sentinel country name selecting every row, and the label of the averaged row.
pub const WORLD: &str = "World";

/// Countries × years for a single indicator.
pub type IndicatorSlice = LabeledTable<String, Year>;

/// Both orientations of one indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSlices {
    /// Country names as rows, years as columns.
    pub by_country: IndicatorSlice,
    /// Years as rows, country names as columns.
    pub by_year: LabeledTable<Year, String>,
}

/// Extract one indicator. An unknown code yields two empty slices, not an error.
pub fn load_indicator(table: &SourceTable, indicator_code: &str) -> IndicatorSlices {
    let mut by_country = LabeledTable::empty(table.years().to_vec());
    for row in table.rows().iter().filter(|r| r.indicator_code == indicator_code) {
        // Width always matches: SourceTable rows carry one cell per year.
        if let Err(e) = by_country.push_row(row.country_name.clone(), row.values.clone()) {
            warn!("skipping row {}: {e}", row.country_name);
        }
    }
    let by_year = if by_country.is_empty() {
        warn!("indicator {indicator_code} not found in source");
        // Zero rows in both orientations, not one empty row per year.
        LabeledTable::empty(Vec::new())
    } else {
        debug!("indicator {indicator_code}: {} countries", by_country.n_rows());
        by_country.transpose()
    };
    IndicatorSlices {
        by_country,
        by_year,
    }
}

/// Which rows a country slice covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CountryScope {
    /// No country filtering: one row per (country, indicator) pair.
    World,
    /// Rows whose country name matches exactly (case-sensitive).
    Country(String),
}

impl CountryScope {
    /// `"World"` maps to [`CountryScope::World`]; anything else is a country name.
    pub fn from_name(name: &str) -> Self {
        if name == WORLD {
            Self::World
        } else {
            Self::Country(name.to_string())
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::World => WORLD,
            Self::Country(name) => name,
        }
    }
}

impl From<&str> for CountryScope {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl fmt::Display for CountryScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Indicators × years for one country, or for every country in world scope.
#[derive(Debug, Clone, PartialEq)]
pub struct CountrySlice {
    scope: CountryScope,
    table: LabeledTable<String, Year>,
    indicator_names: BTreeMap<String, String>,
}

impl CountrySlice {
    pub fn scope(&self) -> &CountryScope {
        &self.scope
    }

    /// Rows keyed by indicator code. In world scope codes repeat once per country.
    pub fn table(&self) -> &LabeledTable<String, Year> {
        &self.table
    }

    pub fn indicator_name(&self, code: &str) -> Option<&str> {
        self.indicator_names.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.table.n_rows()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// One row per indicator: the cross-country mean in world scope, the rows as-is otherwise.
    pub fn aggregated(&self) -> LabeledTable<String, Year> {
        match self.scope {
            CountryScope::World => self.table.group_mean(),
            CountryScope::Country(_) => self.table.clone(),
        }
    }
}

/// Extract the rows for a country scope. An unknown country yields an empty slice.
pub fn load_country(table: &SourceTable, scope: &CountryScope) -> CountrySlice {
    let mut out = LabeledTable::empty(table.years().to_vec());
    let mut indicator_names = BTreeMap::new();
    let selected = table.rows().iter().filter(|r| match scope {
        CountryScope::World => true,
        CountryScope::Country(name) => r.country_name == *name,
    });
    for row in selected {
        if let Err(e) = out.push_row(row.indicator_code.clone(), row.values.clone()) {
            warn!("skipping row {}/{}: {e}", row.country_name, row.indicator_code);
            continue;
        }
        indicator_names
            .entry(row.indicator_code.clone())
            .or_insert_with(|| row.indicator_name.clone());
    }
    if out.is_empty() {
        warn!("no rows for country scope {scope}");
    }
    CountrySlice {
        scope: scope.clone(),
        table: out,
        indicator_names,
    }
}

/// Copy of `slice` with a `"World"` row holding the per-year mean across countries.
///
/// Missing cells are skipped; a year with no values stays missing. A `"World"`
/// row already present in the slice is left out of the mean and replaced.
pub fn with_world_average(slice: &IndicatorSlice) -> IndicatorSlice {
    slice
        .filter_rows(|k| k != WORLD)
        .with_mean_row(WORLD.to_string())
}

/// Rows for `countries` (request order, unknown skipped) over `years`, missing as zero.
pub fn grouped_bar_view(slice: &IndicatorSlice, countries: &[String], years: &[Year]) -> IndicatorSlice {
    slice
        .select_rows(countries)
        .select_columns(years)
        .fill_missing(0.0)
}

/// Rows for `countries` over `years`, missing kept as gaps.
pub fn line_view(slice: &IndicatorSlice, countries: &[String], years: &[Year]) -> IndicatorSlice {
    slice.select_rows(countries).select_columns(years)
}

/// Read `path` and extract one indicator.
pub fn read_indicator<P: AsRef<Path>>(
    path: P,
    indicator_code: &str,
) -> Result<IndicatorSlices, MalformedSourceError> {
    let table = SourceTable::from_path(path)?;
    Ok(load_indicator(&table, indicator_code))
}

/// Read `path` and extract one country scope.
pub fn read_country<P: AsRef<Path>>(
    path: P,
    scope: &CountryScope,
) -> Result<CountrySlice, MalformedSourceError> {
    let table = SourceTable::from_path(path)?;
    Ok(load_country(&table, scope))
}
