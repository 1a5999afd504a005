//! Visualization: render indicator charts to **SVG** or **PNG**.
//!
//! - [`GroupedBarChart`]: countries on the x axis, one bar per selected year
//! - [`TimeSeriesChart`]: one line per country across sampled years
//! - [`CorrelationHeatmap`]: annotated indicator correlation matrix
//!
//! Every chart implements [`Chart`] and is written with [`render`], which picks
//! the backend from the output extension.

pub mod bar;
pub mod heatmap;
pub mod line;
pub mod text;
pub mod util;

pub use bar::GroupedBarChart;
pub use heatmap::CorrelationHeatmap;
pub use line::TimeSeriesChart;

use anyhow::{Result, anyhow};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::Path;
use std::sync::Once;

/// One-time registration for a fallback "sans-serif" font when using the `ab_glyph` text path.
/// Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        // From `src/viz/mod.rs` to project root, then `assets/DejaVuSans.ttf`
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        );
    });
}

/// Something that can draw itself onto a prepared (white) drawing area.
pub trait Chart {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>;
}

/// Output image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartFormat {
    #[default]
    Svg,
    Png,
}

impl ChartFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ChartFormat::Svg => "svg",
            ChartFormat::Png => "png",
        }
    }
}

/// Render `chart` to `out_path`: SVG for a `.svg` extension, PNG otherwise.
pub fn render<C: Chart, P: AsRef<Path>>(
    chart: &C,
    out_path: P,
    width: u32,
    height: u32,
) -> Result<()> {
    ensure_fonts_registered();
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_on(chart, root)
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_on(chart, root)
    }
}

fn draw_on<C: Chart, DB: DrawingBackend>(chart: &C, root: DrawingArea<DB, Shift>) -> Result<()> {
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    chart.draw(&root)?;
    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}
