//! Analysis configuration: which indicators, countries and years to chart.
//!
//! Loaded from JSON; [`AnalysisConfig::default`] is the stock climate report.

use crate::table::Year;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// An indicator code with the titles used on charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorSpec {
    pub code: String,
    /// Axis title, e.g. "Forest area (% of land area)".
    pub title: String,
    /// Heatmap tick label, e.g. "Forest Area".
    pub short_title: String,
}

impl IndicatorSpec {
    fn new(code: &str, title: &str, short_title: &str) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            short_title: short_title.into(),
        }
    }
}

/// Sampled years for the time-series chart: `start, start + step, ...` below `start + span`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSpan {
    pub start: Year,
    pub span: u32,
    pub step: u32,
}

impl YearSpan {
    pub fn years(&self) -> Vec<Year> {
        if self.step == 0 {
            return Vec::new();
        }
        (0..self.span)
            .step_by(self.step as usize)
            .map(|offset| self.start + offset as Year)
            .collect()
    }
}

/// Output size and tick-label locale shared by every chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSettings {
    pub width: u32,
    pub height: u32,
    /// Locale tag for tick labels (`en`, `de`, `fr`, ...).
    pub locale: String,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: 900,
            height: 700,
            locale: "en".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Every indicator the report may reference.
    pub indicators: Vec<IndicatorSpec>,
    /// One grouped bar chart per code.
    pub bar_indicators: Vec<String>,
    /// Indicator drawn as a time series.
    pub line_indicator: String,
    /// Heatmap axes, in order.
    pub heatmap_indicators: Vec<String>,
    /// Countries shown on bar and line charts. May include `"World"`.
    pub countries: Vec<String>,
    pub bar_years: Vec<Year>,
    pub line_span: YearSpan,
    /// One heatmap per scope; `"World"` averages every country.
    pub heatmap_scopes: Vec<String>,
    pub chart: ChartSettings,
}

const URBAN_POPULATION: &str = "SP.URB.TOTL.IN.ZS";
const MORTALITY_RATE: &str = "SH.DYN.MORT";
const CO2_SOLID_FUEL: &str = "EN.ATM.CO2E.SF.ZS";
const ELECTRICITY_OIL: &str = "EG.ELC.PETR.ZS";
const FOREST_AREA: &str = "AG.LND.FRST.ZS";

impl Default for AnalysisConfig {
    fn default() -> Self {
        let codes = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            indicators: vec![
                IndicatorSpec::new(
                    URBAN_POPULATION,
                    "Urban population (% of total population)",
                    "Urban Population",
                ),
                IndicatorSpec::new(
                    MORTALITY_RATE,
                    "Mortality rate, under-5 (per 1,000 live births)",
                    "Mortality Rate",
                ),
                IndicatorSpec::new(
                    CO2_SOLID_FUEL,
                    "CO2 emissions from solid fuel consumption (% of total)",
                    "CO2 emission",
                ),
                IndicatorSpec::new(
                    ELECTRICITY_OIL,
                    "Electricity production from oil sources (% of total)",
                    "Electricity Production",
                ),
                IndicatorSpec::new(FOREST_AREA, "Forest area (% of land area)", "Forest Area"),
            ],
            bar_indicators: codes(&[URBAN_POPULATION, CO2_SOLID_FUEL, FOREST_AREA, MORTALITY_RATE]),
            line_indicator: ELECTRICITY_OIL.into(),
            heatmap_indicators: codes(&[
                CO2_SOLID_FUEL,
                URBAN_POPULATION,
                MORTALITY_RATE,
                ELECTRICITY_OIL,
                FOREST_AREA,
            ]),
            countries: codes(&[
                "World",
                "Pakistan",
                "United States",
                "India",
                "France",
                "United Kingdom",
                "Cambodia",
                "China",
                "Afghanistan",
                "Brazil",
                "Indonesia",
            ]),
            bar_years: vec![1990, 2000, 2010, 2020],
            line_span: YearSpan {
                start: 1980,
                span: 40,
                step: 5,
            },
            heatmap_scopes: codes(&["World", "Pakistan", "United States", "Brazil"]),
            chart: ChartSettings::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load and validate a JSON configuration file. Omitted fields take defaults.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn indicator(&self, code: &str) -> Option<&IndicatorSpec> {
        self.indicators.iter().find(|i| i.code == code)
    }

    /// Check that every referenced code is declared and the selections are usable.
    pub fn validate(&self) -> Result<()> {
        let referenced = self
            .bar_indicators
            .iter()
            .chain(&self.heatmap_indicators)
            .chain(std::iter::once(&self.line_indicator));
        for code in referenced {
            if self.indicator(code).is_none() {
                bail!("indicator `{code}` is referenced but not declared in `indicators`");
            }
        }
        if self.line_span.step == 0 {
            bail!("line_span.step must be positive");
        }
        if self.countries.is_empty() {
            bail!("`countries` is empty");
        }
        if self.chart.width == 0 || self.chart.height == 0 {
            bail!("chart size must be non-zero");
        }
        Ok(())
    }

    /// Short titles aligned with `heatmap_indicators`.
    pub fn heatmap_labels(&self) -> Vec<String> {
        self.heatmap_indicators
            .iter()
            .map(|code| {
                self.indicator(code)
                    .map(|i| i.short_title.clone())
                    .unwrap_or_else(|| code.clone())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = AnalysisConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.heatmap_labels()[0], "CO2 emission");
    }

    #[test]
    fn line_span_samples_every_fifth_year() {
        let span = AnalysisConfig::default().line_span;
        assert_eq!(
            span.years(),
            vec![1980, 1985, 1990, 1995, 2000, 2005, 2010, 2015]
        );
    }

    #[test]
    fn undeclared_indicator_is_rejected() {
        let cfg = AnalysisConfig {
            line_indicator: "NOPE".into(),
            ..AnalysisConfig::default()
        };
        let err = cfg.validate().unwrap_err().to_string();
        assert!(err.contains("NOPE"), "{err}");
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: AnalysisConfig = serde_json::from_str(r#"{"bar_years":[2000]}"#).unwrap();
        assert_eq!(cfg.bar_years, vec![2000]);
        assert_eq!(cfg.line_indicator, "EG.ELC.PETR.ZS");
    }
}
