use std::fs;
use std::path::Path;
use tempfile::tempdir;
use wdi_climate::LabeledTable;
use wdi_climate::corr::correlation_matrix;
use wdi_climate::viz::{self, CorrelationHeatmap, GroupedBarChart, TimeSeriesChart};

fn countries() -> LabeledTable<String, i32> {
    LabeledTable::from_rows(
        vec![1980, 1985, 1990, 1995],
        vec![
            ("Pakistan".to_string(), vec![Some(1.0), Some(2.0), None, Some(4.0)]),
            ("United Kingdom of Great Britain".to_string(), vec![Some(2.0), Some(2.5), Some(3.0), Some(3.5)]),
            ("World".to_string(), vec![Some(1.5), Some(2.25), Some(3.0), Some(3.75)]),
        ],
    )
    .unwrap()
}

fn assert_written(path: &Path) {
    let meta = fs::metadata(path).expect("file created");
    assert!(meta.len() > 0, "{} has content", path.display());
}

#[test]
fn grouped_bars_render_to_svg_and_png() {
    let dir = tempdir().unwrap();
    let data = countries().fill_missing(0.0);
    let chart = GroupedBarChart {
        data: &data,
        title: "Forest area",
        x_label: "",
        y_label: "Forest area (% of land area)",
        locale: "en",
    };
    for name in ["bars.svg", "bars.png"] {
        let p = dir.path().join(name);
        viz::render(&chart, &p, 800, 600).unwrap();
        assert_written(&p);
    }
    let svg = fs::read_to_string(dir.path().join("bars.svg")).unwrap();
    assert!(svg.contains("<svg"));
    // One x tick per country group.
    assert!(svg.contains(">Pakistan<"));
    assert!(svg.contains(">World<"));
}

#[test]
fn time_series_renders_with_gaps() {
    let dir = tempdir().unwrap();
    let data = countries();
    let chart = TimeSeriesChart {
        data: &data,
        title: "Electricity production from oil sources",
        y_label: "% of total",
        locale: "de",
    };
    let p = dir.path().join("line.svg");
    viz::render(&chart, &p, 900, 500).unwrap();
    assert_written(&p);
}

#[test]
fn heatmap_renders_including_nan_cells() {
    let dir = tempdir().unwrap();
    let obs = LabeledTable::from_rows(
        vec!["A".to_string(), "B".to_string(), "K".to_string()],
        vec![
            (2000, vec![Some(1.0), Some(3.0), None]),
            (2001, vec![Some(2.0), Some(1.0), None]),
            (2002, vec![Some(3.0), Some(2.0), None]),
        ],
    )
    .unwrap();
    let matrix = correlation_matrix(&obs);
    let labels = vec!["Alpha".to_string(), "Beta".to_string()];
    let chart = CorrelationHeatmap {
        matrix: &matrix,
        labels: &labels,
        title: "Correlation heatmap: Test",
    };
    let p = dir.path().join("heat.svg");
    viz::render(&chart, &p, 600, 600).unwrap();
    assert_written(&p);
    let svg = fs::read_to_string(&p).unwrap();
    assert!(svg.contains("NaN"));
    // Row and column ticks sit on cell centers, labelled by title or code.
    assert!(svg.contains(">Alpha<"));
    assert!(svg.contains(">Beta<"));
    assert!(svg.contains(">K<"));
}

#[test]
fn empty_data_is_an_error_not_a_panic() {
    let dir = tempdir().unwrap();
    let empty: LabeledTable<String, i32> = LabeledTable::empty(vec![2000]);
    let chart = GroupedBarChart {
        data: &empty,
        title: "",
        x_label: "",
        y_label: "",
        locale: "en",
    };
    let err = viz::render(&chart, dir.path().join("empty.svg"), 400, 300).unwrap_err();
    assert!(err.to_string().contains("no data"));
}
