//! The climate report: every chart the configuration asks for, in one pass.

use crate::config::AnalysisConfig;
use crate::corr::indicator_correlations;
use crate::slice::{
    CountryScope, grouped_bar_view, line_view, load_country, load_indicator, with_world_average,
};
use crate::source::SourceTable;
use crate::viz::{self, ChartFormat, CorrelationHeatmap, GroupedBarChart, TimeSeriesChart};
use anyhow::{Context, Result};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// File-name-safe form of an indicator code or country name.
pub fn slug(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_matches('_').to_string()
}

/// Render the bar charts, the time-series chart and the heatmaps into `out_dir`.
///
/// Charts whose selection is empty are skipped with a warning. Returns the
/// paths that were written.
pub fn run(
    source: &SourceTable,
    config: &AnalysisConfig,
    out_dir: &Path,
    format: ChartFormat,
) -> Result<Vec<PathBuf>> {
    config.validate()?;
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;
    let ext = format.extension();
    let (width, height) = (config.chart.width, config.chart.height);
    let locale = config.chart.locale.as_str();
    let mut written = Vec::new();

    for code in &config.bar_indicators {
        let title = config.indicator(code).map(|i| i.title.as_str()).unwrap_or(code.as_str());
        let slices = load_indicator(source, code);
        let augmented = with_world_average(&slices.by_country);
        let selected = line_view(&augmented, &config.countries, &config.bar_years);
        if !selected.rows().any(|(_, cells)| cells.iter().any(Option::is_some)) {
            warn!("skipping bar chart for {code}: no values for the selected countries and years");
            continue;
        }
        let view = grouped_bar_view(&augmented, &config.countries, &config.bar_years);
        let path = out_dir.join(format!("bar_{}.{ext}", slug(code)));
        let chart = GroupedBarChart {
            data: &view,
            title,
            x_label: "",
            y_label: title,
            locale,
        };
        viz::render(&chart, &path, width, height)
            .with_context(|| format!("rendering {}", path.display()))?;
        info!("wrote {}", path.display());
        written.push(path);
    }

    let line_code = &config.line_indicator;
    let line_title = config
        .indicator(line_code)
        .map(|i| i.title.as_str())
        .unwrap_or(line_code.as_str());
    let slices = load_indicator(source, line_code);
    let augmented = with_world_average(&slices.by_country);
    let view = line_view(&augmented, &config.countries, &config.line_span.years());
    if view.rows().any(|(_, cells)| cells.iter().any(Option::is_some)) {
        let path = out_dir.join(format!("line_{}.{ext}", slug(line_code)));
        let chart = TimeSeriesChart {
            data: &view,
            title: line_title,
            y_label: line_title,
            locale,
        };
        viz::render(&chart, &path, width, height)
            .with_context(|| format!("rendering {}", path.display()))?;
        info!("wrote {}", path.display());
        written.push(path);
    } else {
        warn!("skipping line chart for {line_code}: no values in the selected span");
    }

    let labels = config.heatmap_labels();
    for scope_name in &config.heatmap_scopes {
        let scope = CountryScope::from_name(scope_name);
        let slice = load_country(source, &scope);
        if slice.is_empty() {
            warn!("skipping heatmap for {scope}: no rows");
            continue;
        }
        let matrix = indicator_correlations(&slice, &config.heatmap_indicators);
        let title = format!("Correlation heatmap: {scope}");
        let path = out_dir.join(format!("heatmap_{}.{ext}", slug(scope_name)));
        let chart = CorrelationHeatmap {
            matrix: &matrix,
            labels: &labels,
            title: &title,
        };
        // Square canvas: the smaller configured side.
        let side = width.min(height);
        viz::render(&chart, &path, side, side)
            .with_context(|| format!("rendering {}", path.display()))?;
        info!("wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::slug;

    #[test]
    fn slug_is_lowercase_and_collapses_separators() {
        assert_eq!(slug("SP.URB.TOTL.IN.ZS"), "sp_urb_totl_in_zs");
        assert_eq!(slug("United States"), "united_states");
        assert_eq!(slug("Côte d'Ivoire"), "c_te_d_ivoire");
    }
}
