mod common;

use common::{FOREST, MORTALITY, climate_csv, wdi_csv};
use wdi_climate::SourceTable;
use wdi_climate::slice::{CountryScope, load_country};

fn source() -> SourceTable {
    SourceTable::from_reader(climate_csv().as_bytes()).unwrap()
}

#[test]
fn world_scope_keeps_every_row() {
    let table = source();
    let world = load_country(&table, &CountryScope::from_name("World"));
    assert_eq!(world.scope(), &CountryScope::World);
    assert_eq!(world.len(), table.len());
}

#[test]
fn country_scope_keeps_only_exact_matches() {
    let table = source();
    let pak = load_country(&table, &"Pakistan".into());
    let expected: Vec<_> = table
        .rows()
        .iter()
        .filter(|r| r.country_name == "Pakistan")
        .collect();
    assert_eq!(pak.len(), expected.len());
    for row in expected {
        assert_eq!(
            pak.table().row(&row.indicator_code).unwrap(),
            row.values.as_slice()
        );
    }
    assert_eq!(
        pak.indicator_name(FOREST),
        Some("Forest area (% of land area)")
    );
}

#[test]
fn unknown_or_miscased_country_is_empty_not_an_error() {
    let table = source();
    assert!(load_country(&table, &"Atlantis".into()).is_empty());
    assert!(load_country(&table, &"pakistan".into()).is_empty());
}

#[test]
fn world_scope_aggregates_to_cross_country_mean() {
    let text = wdi_csv(
        &[2000, 2001],
        &[
            ("A", "AAA", "Mortality", MORTALITY, vec![Some(10.0), None]),
            ("B", "BBB", "Mortality", MORTALITY, vec![Some(20.0), Some(4.0)]),
            ("A", "AAA", "Forest", FOREST, vec![Some(1.0), Some(3.0)]),
        ],
    );
    let table = SourceTable::from_reader(text.as_bytes()).unwrap();
    let world = load_country(&table, &CountryScope::World);
    assert_eq!(world.table().row_keys(), &[MORTALITY, MORTALITY, FOREST]);

    let agg = world.aggregated();
    assert_eq!(agg.n_rows(), 2);
    assert_eq!(agg.get(&MORTALITY.to_string(), &2000), Some(15.0));
    assert_eq!(agg.get(&MORTALITY.to_string(), &2001), Some(4.0));
    assert_eq!(agg.get(&FOREST.to_string(), &2001), Some(3.0));
}
