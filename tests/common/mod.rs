//! Builders for World Bank wide-format CSV fixtures.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const PREAMBLE: &str = "\"Data Source\",\"World Development Indicators\",\n\n\"Last Updated Date\",\"2022-09-16\",\n\n";

/// (country name, country code, indicator name, indicator code, one cell per year)
pub type Row<'a> = (&'a str, &'a str, &'a str, &'a str, Vec<Option<f64>>);

fn cell(v: Option<f64>) -> String {
    v.map(|x| format!("\"{x}\"")).unwrap_or_else(|| "\"\"".to_string())
}

/// Render an export with the usual preamble and trailing delimiter on every line.
pub fn wdi_csv(years: &[i32], rows: &[Row]) -> String {
    let mut out = String::from(PREAMBLE);
    out.push_str("\"Country Name\",\"Country Code\",\"Indicator Name\",\"Indicator Code\",");
    for y in years {
        out.push_str(&format!("\"{y}\","));
    }
    out.push('\n');
    for (cname, ccode, iname, icode, values) in rows {
        out.push_str(&format!("\"{cname}\",\"{ccode}\",\"{iname}\",\"{icode}\","));
        for v in values {
            out.push_str(&cell(*v));
            out.push(',');
        }
        out.push('\n');
    }
    out
}

pub const URBAN: &str = "SP.URB.TOTL.IN.ZS";
pub const MORTALITY: &str = "SH.DYN.MORT";
pub const CO2: &str = "EN.ATM.CO2E.SF.ZS";
pub const ELECTRICITY: &str = "EG.ELC.PETR.ZS";
pub const FOREST: &str = "AG.LND.FRST.ZS";

pub fn climate_years() -> Vec<i32> {
    (1980..=2020).collect()
}

/// Three countries × five indicators over 1980..=2020 with a few gaps.
pub fn climate_rows() -> Vec<Row<'static>> {
    let years = climate_years();
    let countries = [
        ("Pakistan", "PAK", 1.0),
        ("Brazil", "BRA", 2.0),
        ("United States", "USA", 3.0),
    ];
    let indicators = [
        ("Urban population (% of total population)", URBAN, 30.0, 0.5),
        ("Mortality rate, under-5 (per 1,000 live births)", MORTALITY, 150.0, -2.5),
        ("CO2 emissions from solid fuel consumption (% of total)", CO2, 20.0, 0.3),
        ("Electricity production from oil sources (% of total)", ELECTRICITY, 40.0, -0.8),
        ("Forest area (% of land area)", FOREST, 60.0, -0.2),
    ];
    let mut rows = Vec::new();
    for (cname, ccode, factor) in countries {
        for (iname, icode, base, slope) in indicators {
            let values = years
                .iter()
                .map(|&y| {
                    // Pakistan reports no oil electricity before 1990.
                    if icode == ELECTRICITY && ccode == "PAK" && y < 1990 {
                        return None;
                    }
                    // Nobody has reported 2020 forest area yet.
                    if icode == FOREST && y == 2020 {
                        return None;
                    }
                    Some(base * factor + slope * (y - 1980) as f64 * factor)
                })
                .collect();
            rows.push((cname, ccode, iname, icode, values));
        }
    }
    rows
}

pub fn climate_csv() -> String {
    wdi_csv(&climate_years(), &climate_rows())
}

pub fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}
