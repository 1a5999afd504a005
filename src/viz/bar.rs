//! Grouped bar chart: one group per country, one bar per year.

use super::Chart;
use super::text::truncate_to_width;
use super::util::{compute_left_label_area_px, format_tick, office_color, value_range};
use crate::table::{LabeledTable, Year};
use anyhow::{Result, anyhow, bail};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;

/// Share of each group slot covered by bars.
const GROUP_WIDTH: f64 = 0.8;

/// Expects a country × year table already restricted to the countries and years
/// to show, in display order, with missing values filled (see
/// [`crate::slice::grouped_bar_view`]).
pub struct GroupedBarChart<'a> {
    pub data: &'a LabeledTable<String, Year>,
    pub title: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub locale: &'a str,
}

impl Chart for GroupedBarChart<'_> {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        let countries = self.data.row_keys();
        let years = self.data.col_keys();
        if countries.is_empty() || years.is_empty() {
            bail!("no data to plot");
        }
        let values = self
            .data
            .rows()
            .flat_map(|(_, cells)| cells.iter().map(|c| c.unwrap_or(0.0)));
        let (ymin, ymax) =
            value_range(values, true).ok_or_else(|| anyhow!("no numeric values to plot"))?;

        let n = countries.len();
        let bar_w = GROUP_WIDTH / years.len() as f64;

        let left = compute_left_label_area_px(ymin, ymax, 10, 12, self.locale);
        let (root_w, _) = root.dim_in_pixel();
        let slot_px = root_w.saturating_sub(left + 32) / n as u32;
        let labels: Vec<String> = countries
            .iter()
            .map(|c| truncate_to_width(c, 12, slot_px.max(12)))
            .collect();

        let x_fmt = |x: &f64| {
            let i = x.round();
            if (x - i).abs() < 1e-6 && i >= 0.0 {
                labels.get(i as usize).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        };
        let y_fmt = |v: &f64| format_tick(*v, self.locale);

        let mut chart = ChartBuilder::on(root)
            .margin(16)
            .caption(self.title, (FontFamily::SansSerif, 22))
            .set_label_area_size(LabelAreaPosition::Left, left)
            .set_label_area_size(LabelAreaPosition::Bottom, 56)
            // Group i is centered on x = i.
            .build_cartesian_2d(-0.5f64..n as f64 - 0.5, ymin..ymax)
            .map_err(|e| anyhow!("{:?}", e))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .y_labels(10)
            .x_label_formatter(&x_fmt)
            .y_label_formatter(&y_fmt)
            .x_desc(self.x_label)
            .y_desc(self.y_label)
            .label_style((FontFamily::SansSerif, 12))
            .axis_desc_style((FontFamily::SansSerif, 14))
            .draw()
            .map_err(|e| anyhow!("{:?}", e))?;

        for (j, year) in years.iter().enumerate() {
            let color = office_color(j);
            let column = self.data.column(year).unwrap_or_default();
            let bars = column.iter().enumerate().map(move |(i, v)| {
                let v = v.unwrap_or(0.0);
                let x0 = i as f64 - GROUP_WIDTH / 2.0 + j as f64 * bar_w;
                Rectangle::new([(x0, 0.0f64.min(v)), (x0 + bar_w, 0.0f64.max(v))], color.filled())
            });
            chart
                .draw_series(bars)
                .map_err(|e| anyhow!("{:?}", e))?
                .label(year.to_string())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));
        }

        chart
            .configure_series_labels()
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.85))
            .label_font((FontFamily::SansSerif, 13))
            .draw()
            .map_err(|e| anyhow!("{:?}", e))?;
        Ok(())
    }
}
