//! wdi_climate
//!
//! Load World Bank (WDI) wide-format CSV exports, slice them by indicator or by
//! country, and chart climate indicators. Pairs with the `wdi-climate` CLI.
//!
//! ### Features
//! - Parse the export (four preamble lines, one row per country and indicator,
//!   one column per year) into a [`SourceTable`]
//! - Indicator slices in both orientations, country slices, world averages
//! - Pearson correlation between indicators
//! - Grouped bar, time-series and heatmap charts as SVG/PNG
//!
//! ### Example
//! ```no_run
//! use wdi_climate::{SourceTable, slice};
//!
//! let source = SourceTable::from_path("data/world_bank_data.csv")?;
//! let forest = slice::load_indicator(&source, "AG.LND.FRST.ZS");
//! let with_world = slice::with_world_average(&forest.by_country);
//! println!("{:?}", with_world.get(&"World".to_string(), &2000));
//!
//! let pakistan = slice::load_country(&source, &"Pakistan".into());
//! let codes = vec!["AG.LND.FRST.ZS".to_string(), "SH.DYN.MORT".to_string()];
//! let matrix = wdi_climate::corr::indicator_correlations(&pakistan, &codes);
//! println!("{:?}", matrix.get("AG.LND.FRST.ZS", "SH.DYN.MORT"));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod corr;
pub mod error;
pub mod report;
pub mod slice;
pub mod source;
pub mod stats;
pub mod storage;
pub mod table;
pub mod viz;

pub use config::AnalysisConfig;
pub use error::{MalformedSourceError, TableError};
pub use slice::{CountryScope, CountrySlice, IndicatorSlice, IndicatorSlices};
pub use source::SourceTable;
pub use table::{LabeledTable, Year};
