mod common;

use common::{CO2, FOREST, climate_csv};
use wdi_climate::SourceTable;
use wdi_climate::slice::load_indicator;

fn source() -> SourceTable {
    SourceTable::from_reader(climate_csv().as_bytes()).unwrap()
}

#[test]
fn orientations_are_exact_transposes_for_every_indicator() {
    let table = source();
    for code in table.indicator_codes() {
        let slices = load_indicator(&table, code);
        assert_eq!(slices.by_country.transpose(), slices.by_year, "{code}");
        assert_eq!(slices.by_year.transpose(), slices.by_country, "{code}");
    }
}

#[test]
fn missing_cells_keep_their_place_in_both_orientations() {
    let slices = load_indicator(&source(), FOREST);
    let pak = "Pakistan".to_string();
    assert_eq!(slices.by_country.get(&pak, &2020), None);
    assert_eq!(slices.by_year.get(&2020, &pak), None);
    assert_eq!(slices.by_country.get(&pak, &1980), Some(60.0));
    assert_eq!(slices.by_year.get(&1980, &pak), Some(60.0));
}

#[test]
fn rows_are_countries_in_source_order_and_columns_are_years() {
    let table = source();
    let slices = load_indicator(&table, CO2);
    assert_eq!(
        slices.by_country.row_keys(),
        &["Pakistan", "Brazil", "United States"]
    );
    assert_eq!(slices.by_country.col_keys(), table.years());
    assert_eq!(slices.by_year.row_keys(), table.years());
}

#[test]
fn unknown_indicator_yields_empty_slices() {
    let slices = load_indicator(&source(), "NOT.A.CODE");
    assert_eq!(slices.by_country.n_rows(), 0);
    assert_eq!(slices.by_year.n_rows(), 0);
    assert!(slices.by_country.is_empty());
    assert!(slices.by_year.is_empty());
}

#[test]
fn slices_are_independent_copies() {
    let table = source();
    let before = table.clone();
    let slices = load_indicator(&table, FOREST);
    let filled = slices.by_country.fill_missing(0.0);

    let pak = "Pakistan".to_string();
    assert_eq!(filled.get(&pak, &2020), Some(0.0));
    assert_eq!(slices.by_country.get(&pak, &2020), None);
    assert_eq!(slices.by_year.get(&2020, &pak), None);
    assert_eq!(table, before);
}
