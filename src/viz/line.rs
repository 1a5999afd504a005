//! Time-series line chart: one line per country, broken at missing years.

use super::Chart;
use super::util::{compute_left_label_area_px, format_tick, office_color, value_range};
use crate::table::{LabeledTable, Year};
use anyhow::{Result, anyhow, bail};
use log::warn;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;

/// Expects a country × year table restricted to the countries and sampled years
/// to show (see [`crate::slice::line_view`]). Year columns become x ticks.
pub struct TimeSeriesChart<'a> {
    pub data: &'a LabeledTable<String, Year>,
    pub title: &'a str,
    pub y_label: &'a str,
    pub locale: &'a str,
}

/// Split a row into runs of consecutive present values.
fn segments(years: &[Year], cells: &[Option<f64>]) -> Vec<Vec<(f64, f64)>> {
    let mut out = Vec::new();
    let mut cur = Vec::new();
    for (year, cell) in years.iter().zip(cells) {
        match cell {
            Some(v) if v.is_finite() => cur.push((*year as f64, *v)),
            _ => {
                if !cur.is_empty() {
                    out.push(std::mem::take(&mut cur));
                }
            }
        }
    }
    if !cur.is_empty() {
        out.push(cur);
    }
    out
}

impl Chart for TimeSeriesChart<'_> {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        let years = self.data.col_keys();
        if self.data.is_empty() || years.is_empty() {
            bail!("no data to plot");
        }
        let values = self.data.rows().flat_map(|(_, cells)| cells.iter().flatten().copied());
        let (ymin, ymax) =
            value_range(values, false).ok_or_else(|| anyhow!("no numeric values to plot"))?;

        let first = years.iter().min().copied().unwrap_or_default() as f64;
        let last = years.iter().max().copied().unwrap_or_default() as f64;
        let pad = ((last - first) * 0.03).max(0.5);

        let x_fmt = |x: &f64| (x.round() as i32).to_string();
        let y_fmt = |v: &f64| format_tick(*v, self.locale);
        let left = compute_left_label_area_px(ymin, ymax, 10, 12, self.locale);

        let mut chart = ChartBuilder::on(root)
            .margin(16)
            .caption(self.title, (FontFamily::SansSerif, 22))
            .set_label_area_size(LabelAreaPosition::Left, left)
            .set_label_area_size(LabelAreaPosition::Bottom, 48)
            .build_cartesian_2d(first - pad..last + pad, ymin..ymax)
            .map_err(|e| anyhow!("{:?}", e))?;

        chart
            .configure_mesh()
            .x_labels(years.len())
            .y_labels(10)
            .x_label_formatter(&x_fmt)
            .y_label_formatter(&y_fmt)
            .y_desc(self.y_label)
            .label_style((FontFamily::SansSerif, 12))
            .axis_desc_style((FontFamily::SansSerif, 14))
            .draw()
            .map_err(|e| anyhow!("{:?}", e))?;

        for (idx, (country, cells)) in self.data.rows().enumerate() {
            let runs = segments(years, cells);
            if runs.is_empty() {
                warn!("no values for {country} in the selected years");
                continue;
            }
            let color = office_color(idx);
            for run in &runs {
                chart
                    .draw_series(LineSeries::new(run.iter().copied(), color.stroke_width(2)))
                    .map_err(|e| anyhow!("{:?}", e))?;
            }
            chart
                .draw_series(
                    runs.iter()
                        .flatten()
                        .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
                )
                .map_err(|e| anyhow!("{:?}", e))?
                .label(country.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        }

        chart
            .configure_series_labels()
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.85))
            .label_font((FontFamily::SansSerif, 13))
            .draw()
            .map_err(|e| anyhow!("{:?}", e))?;
        Ok(())
    }
}
