//! Correlation heatmap with annotated cells.

use super::Chart;
use super::text::{estimate_text_width_px, truncate_to_width};
use super::util::{blues, is_dark};
use crate::corr::CorrelationMatrix;
use anyhow::{Result, anyhow, bail};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

/// Fill for undefined (NaN) coefficients.
const NAN_FILL: RGBColor = RGBColor(220, 220, 220);

/// `labels` are display titles aligned by position with `matrix.codes()`;
/// positions without a label fall back to the indicator code.
pub struct CorrelationHeatmap<'a> {
    pub matrix: &'a CorrelationMatrix,
    pub labels: &'a [String],
    pub title: &'a str,
}

impl CorrelationHeatmap<'_> {
    fn label(&self, i: usize) -> &str {
        self.labels
            .get(i)
            .or_else(|| self.matrix.codes().get(i))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Value bounds used for the color ramp.
    fn color_bounds(&self) -> (f64, f64) {
        let (lo, hi) = self
            .matrix
            .values()
            .iter()
            .flatten()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(*v), hi.max(*v))
            });
        if lo.is_finite() { (lo, hi) } else { (0.0, 1.0) }
    }
}

impl Chart for CorrelationHeatmap<'_> {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        let n = self.matrix.len();
        if n == 0 {
            bail!("no data to plot");
        }
        let nf = n as f64;
        let (lo, hi) = self.color_bounds();
        let shade = |v: f64| -> RGBColor {
            if !v.is_finite() {
                NAN_FILL
            } else if hi > lo {
                blues((v - lo) / (hi - lo))
            } else {
                blues(0.5)
            }
        };

        let left = (0..n)
            .map(|i| estimate_text_width_px(self.label(i), 12))
            .max()
            .unwrap_or(0)
            .saturating_add(16)
            .clamp(60, 220);
        let (root_w, _) = root.dim_in_pixel();
        let cell_px = (root_w.saturating_sub(left + 32) / n as u32).max(12);
        let x_labels: Vec<String> = (0..n)
            .map(|i| truncate_to_width(self.label(i), 12, cell_px))
            .collect();
        let y_labels: Vec<String> = (0..n).map(|i| self.label(i).to_string()).collect();

        // Cell (i, j) is centered on (j, n-1-i): row 0 at the top, unit ticks on centers.
        let index_of = |v: f64| {
            let i = v.round();
            ((v - i).abs() < 1e-6 && i >= 0.0 && i < nf).then_some(i as usize)
        };
        let x_fmt = |x: &f64| {
            index_of(*x)
                .map(|j| x_labels[j].clone())
                .unwrap_or_default()
        };
        let y_fmt = |y: &f64| {
            index_of(*y)
                .map(|r| y_labels[n - 1 - r].clone())
                .unwrap_or_default()
        };

        let mut chart = ChartBuilder::on(root)
            .margin(16)
            .caption(self.title, (FontFamily::SansSerif, 20))
            .set_label_area_size(LabelAreaPosition::Left, left)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .build_cartesian_2d(-0.5f64..nf - 0.5, -0.5f64..nf - 0.5)
            .map_err(|e| anyhow!("{:?}", e))?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(n)
            .y_labels(n)
            .x_label_formatter(&x_fmt)
            .y_label_formatter(&y_fmt)
            .label_style((FontFamily::SansSerif, 12))
            .draw()
            .map_err(|e| anyhow!("{:?}", e))?;

        let cells: Vec<(usize, usize, f64)> = self
            .matrix
            .values()
            .iter()
            .enumerate()
            .flat_map(|(i, row)| row.iter().enumerate().map(move |(j, v)| (i, j, *v)))
            .collect();

        chart
            .draw_series(cells.iter().map(|&(i, j, v)| {
                let (x, y) = (j as f64, nf - 1.0 - i as f64);
                Rectangle::new([(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)], shade(v).filled())
            }))
            .map_err(|e| anyhow!("{:?}", e))?;

        let font_px = if cell_px >= 48 { 14 } else { 11 };
        chart
            .draw_series(cells.iter().map(|&(i, j, v)| {
                let fill = shade(v);
                let ink: &'static RGBColor = if is_dark(&fill) { &WHITE } else { &BLACK };
                let style = TextStyle::from((FontFamily::SansSerif, font_px).into_font())
                    .pos(Pos::new(HPos::Center, VPos::Center))
                    .color(ink);
                let text = if v.is_finite() {
                    format!("{v:.2}")
                } else {
                    "NaN".to_string()
                };
                Text::new(text, (j as f64, nf - 1.0 - i as f64), style)
            }))
            .map_err(|e| anyhow!("{:?}", e))?;
        Ok(())
    }
}
