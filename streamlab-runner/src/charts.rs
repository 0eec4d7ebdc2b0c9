//! Horizontal bar charts rendered to SVG.
//!
//! Each render call returns only after the backing file has been written,
//! so calling it twice in a row produces the two charts strictly in
//! sequence.

use std::path::Path;

use anyhow::{Context, Result};
use plotters::prelude::*;

/// One bar: a release year and its track count.
pub type YearBar = (i64, u32);

pub const X_LABEL: &str = "Number of tracks";
pub const Y_LABEL: &str = "Year";

const CHART_SIZE: (u32, u32) = (1024, 768);

/// Render per-year track counts as a horizontal bar chart.
///
/// One bar per entry in `bars`, drawn bottom-up in the given order; the
/// y-axis carries one tick per entry, labelled with the exact year.
pub fn render_year_counts(path: &Path, title: &str, bars: &[YearBar]) -> Result<()> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let x_max = bars.iter().map(|(_, count)| *count).max().unwrap_or(0) + 1;
    let y_max = bars.len().max(1);

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0u32..x_max, 0usize..y_max)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc(X_LABEL)
        .y_desc(Y_LABEL)
        .y_labels(y_max)
        .y_label_formatter(&|idx: &usize| {
            bars.get(*idx)
                .map(|(year, _)| year.to_string())
                .unwrap_or_default()
        })
        .draw()?;

    chart.draw_series(bars.iter().enumerate().map(|(i, (_, count))| {
        Rectangle::new([(0, i), (*count, i + 1)], BLUE.filled())
    }))?;

    root.present()
        .with_context(|| format!("failed to write chart {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_chart_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("by_year.svg");
        let bars = vec![(2015i64, 3u32), (2019, 8), (2022, 21)];

        render_year_counts(&path, "Tracks by year", &bars).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Tracks by year"));
        assert!(svg.contains("2022"));
    }

    #[test]
    fn renders_empty_series_without_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.svg");
        render_year_counts(&path, "Nothing to plot", &[]).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn sequential_renders_produce_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.svg");
        let second = dir.path().join("second.svg");
        let bars = vec![(2020i64, 5u32)];

        render_year_counts(&first, "First", &bars).unwrap();
        // The first file is fully written before the second render starts.
        assert!(first.exists());
        render_year_counts(&second, "Second", &bars).unwrap();
        assert!(second.exists());
    }
}
