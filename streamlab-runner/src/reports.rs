//! Fixed-width console reports for each pipeline stage.
//!
//! Every report is a typed struct built from the working table, so the
//! printed output is complete and deterministic. Ordering happens here,
//! on the extracted rows, with stable sorts.

use std::path::Path;

use polars::prelude::*;

use streamlab_core::{DataError, RawDataset, ABOVE_AVERAGE, TOP_QUARTILE};

/// Preview size for the overview report (rows and columns).
const PREVIEW: usize = 5;

fn cell_to_string(av: &AnyValue) -> String {
    match av {
        AnyValue::Null => "null".to_string(),
        AnyValue::String(s) => (*s).to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => format!("{other:?}"),
    }
}

fn fit(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let cut: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

/// Print the column list at a named stage.
pub fn print_column_list(stage: &str, df: &DataFrame) {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect();
    println!();
    println!("{stage}: {}", names.join(", "));
}

/// Print the table shape at a named stage.
pub fn print_shape(stage: &str, df: &DataFrame) {
    println!();
    println!("{stage}: {} rows x {} columns", df.height(), df.width());
}

// ─── Dataset overview ───────────────────────────────────────────────

/// Load-time report: provenance plus a small preview of the raw table.
#[derive(Debug)]
pub struct DatasetOverview {
    pub source: String,
    pub encoding: &'static str,
    pub rows: usize,
    pub cols: usize,
    pub dataset_hash: String,
    pub preview_columns: Vec<String>,
    pub preview: Vec<Vec<String>>,
}

impl DatasetOverview {
    pub fn from_dataset(dataset: &RawDataset, source: &Path) -> Result<Self, DataError> {
        let df = &dataset.frame;
        let columns = df.get_columns();
        let shown_cols = columns.len().min(PREVIEW);
        let shown_rows = df.height().min(PREVIEW);

        let preview_columns: Vec<String> = columns[..shown_cols]
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        let mut preview = Vec::with_capacity(shown_rows);
        for row in 0..shown_rows {
            let mut cells = Vec::with_capacity(shown_cols);
            for col in &columns[..shown_cols] {
                cells.push(cell_to_string(&col.as_materialized_series().get(row)?));
            }
            preview.push(cells);
        }

        Ok(Self {
            source: source.display().to_string(),
            encoding: dataset.encoding,
            rows: df.height(),
            cols: df.width(),
            dataset_hash: dataset.dataset_hash.clone(),
            preview_columns,
            preview,
        })
    }

    pub fn print(&self) {
        println!("Dataset overview");
        println!("{}", "-".repeat(72));
        println!("Source:  {} ({})", self.source, self.encoding);
        println!("Shape:   {} rows x {} columns", self.rows, self.cols);
        println!("Hash:    {}", self.dataset_hash);
        println!();
        for name in &self.preview_columns {
            print!("{:<24} ", fit(name, 22));
        }
        println!();
        println!("{}", "-".repeat(self.preview_columns.len() * 25));
        for row in &self.preview {
            for cell in row {
                print!("{:<24} ", fit(cell, 22));
            }
            println!();
        }
    }
}

// ─── Top tracks ─────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct TopTrackRow {
    pub track: String,
    pub artist: String,
    pub year: i64,
    pub streams_millions: f64,
}

/// The most-streamed tracks, descending; ties keep the table's row order.
#[derive(Debug)]
pub struct TopTracks {
    pub rows: Vec<TopTrackRow>,
}

impl TopTracks {
    pub fn compute(df: &DataFrame, limit: usize) -> Result<Self, DataError> {
        let selected = df.select(["track_name", "artist_name", "release_year", "streams_millions"])?;
        let track = selected.column("track_name")?.str()?;
        let artist = selected.column("artist_name")?.str()?;
        let year = selected.column("release_year")?.i64()?;
        let millions = selected.column("streams_millions")?.f64()?;

        let mut rows = Vec::with_capacity(selected.height());
        for i in 0..selected.height() {
            rows.push(TopTrackRow {
                track: track.get(i).unwrap_or_default().to_string(),
                artist: artist.get(i).unwrap_or_default().to_string(),
                year: year.get(i).unwrap_or_default(),
                streams_millions: millions.get(i).unwrap_or_default(),
            });
        }

        // Stable sort: rows with equal stream counts keep their original
        // relative order.
        rows.sort_by(|a, b| {
            b.streams_millions
                .partial_cmp(&a.streams_millions)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        rows.truncate(limit);
        Ok(Self { rows })
    }

    pub fn print(&self) {
        println!();
        println!("Top {} tracks by streams", self.rows.len());
        println!(
            "{:<4} {:<42} {:<28} {:>6} {:>12}",
            "#", "Track", "Artist", "Year", "Streams (M)"
        );
        println!("{}", "-".repeat(96));
        for (i, r) in self.rows.iter().enumerate() {
            println!(
                "{:<4} {:<42} {:<28} {:>6} {:>12.2}",
                i + 1,
                fit(&r.track, 40),
                fit(&r.artist, 26),
                r.year,
                r.streams_millions
            );
        }
    }
}

// ─── Per-year counts ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearCountRow {
    pub year: i64,
    pub tracks: u32,
}

/// Track count per release year, descending; equal counts keep
/// year-ascending order.
#[derive(Debug)]
pub struct YearCounts {
    pub rows: Vec<YearCountRow>,
}

impl YearCounts {
    pub fn compute(df: &DataFrame) -> Result<Self, DataError> {
        let counts = df
            .clone()
            .lazy()
            .group_by([col("release_year")])
            .agg([col("track_name").count().alias("num_of_tracks")])
            .collect()?;
        let mut rows = extract_year_counts(&counts, "num_of_tracks")?;
        rows.sort_by_key(|r| r.year);
        rows.sort_by(|a, b| b.tracks.cmp(&a.tracks));
        Ok(Self { rows })
    }

    pub fn print(&self) {
        println!();
        println!("Tracks per release year");
        println!("{:<6} {:>8}", "Year", "Tracks");
        println!("{}", "-".repeat(15));
        for r in &self.rows {
            println!("{:<6} {:>8}", r.year, r.tracks);
        }
    }
}

fn extract_year_counts(df: &DataFrame, count_col: &str) -> Result<Vec<YearCountRow>, DataError> {
    let year = df.column("release_year")?.i64()?;
    let tracks = df.column(count_col)?.u32()?;
    let mut rows = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        rows.push(YearCountRow {
            year: year.get(i).unwrap_or_default(),
            tracks: tracks.get(i).unwrap_or_default(),
        });
    }
    Ok(rows)
}

// ─── Yearly stream statistics ───────────────────────────────────────

#[derive(Debug, Clone)]
pub struct YearlyStatsRow {
    pub year: i64,
    pub sum: f64,
    pub count: u32,
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

/// Sum/count/min/mean/max of streams-in-millions per release year, for
/// years at or after the configured cutoff. Rows are year-ascending; the
/// printed view re-ranks by count.
#[derive(Debug)]
pub struct YearlyStats {
    pub min_year: i64,
    pub rows: Vec<YearlyStatsRow>,
}

impl YearlyStats {
    pub fn compute(df: &DataFrame, min_year: i64) -> Result<Self, DataError> {
        let stats = df
            .clone()
            .lazy()
            .filter(col("release_year").gt_eq(lit(min_year)))
            .group_by([col("release_year")])
            .agg([
                col("streams_millions").sum().alias("sum"),
                col("streams_millions").count().alias("count"),
                col("streams_millions").min().alias("min"),
                col("streams_millions").mean().alias("mean"),
                col("streams_millions").max().alias("max"),
            ])
            .collect()?;

        let year = stats.column("release_year")?.i64()?;
        let sum = stats.column("sum")?.f64()?;
        let count = stats.column("count")?.u32()?;
        let min = stats.column("min")?.f64()?;
        let mean = stats.column("mean")?.f64()?;
        let max = stats.column("max")?.f64()?;

        let mut rows = Vec::with_capacity(stats.height());
        for i in 0..stats.height() {
            rows.push(YearlyStatsRow {
                year: year.get(i).unwrap_or_default(),
                sum: sum.get(i).unwrap_or_default(),
                count: count.get(i).unwrap_or_default(),
                min: min.get(i).unwrap_or_default(),
                mean: mean.get(i).unwrap_or_default(),
                max: max.get(i).unwrap_or_default(),
            });
        }
        rows.sort_by_key(|r| r.year);
        Ok(Self { min_year, rows })
    }

    /// Count-descending view of the rows; equal counts keep
    /// year-ascending order.
    pub fn top_by_count(&self, limit: usize) -> Vec<&YearlyStatsRow> {
        let mut ranked: Vec<&YearlyStatsRow> = self.rows.iter().collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(limit);
        ranked
    }

    pub fn print_top(&self, limit: usize) {
        println!();
        println!(
            "Stream statistics in millions per release year ({}+), top {} by track count",
            self.min_year, limit
        );
        println!(
            "{:<6} {:>12} {:>7} {:>10} {:>10} {:>10}",
            "Year", "Sum", "Count", "Min", "Mean", "Max"
        );
        println!("{}", "-".repeat(60));
        for r in self.top_by_count(limit) {
            println!(
                "{:<6} {:>12.2} {:>7} {:>10.2} {:>10.2} {:>10.2}",
                r.year, r.sum, r.count, r.min, r.mean, r.max
            );
        }
    }
}

// ─── Top playlist quartile by year ──────────────────────────────────

#[derive(Debug, Clone)]
pub struct QuartileShareRow {
    pub year: i64,
    pub num_of_tracks: u32,
    pub prop_of_tracks: f64,
}

/// Year distribution inside the top playlist quartile, with each year's
/// share of the bucket total as a percentage.
#[derive(Debug)]
pub struct QuartileShare {
    pub rows: Vec<QuartileShareRow>,
}

impl QuartileShare {
    pub fn compute(df: &DataFrame) -> Result<Self, DataError> {
        let counts = df
            .clone()
            .lazy()
            .filter(
                col("pl_quantile")
                    .cast(DataType::String)
                    .eq(lit(TOP_QUARTILE)),
            )
            .group_by([col("release_year")])
            .agg([col("track_name").count().alias("num_of_tracks")])
            .collect()?;
        let mut rows = extract_year_counts(&counts, "num_of_tracks")?;
        rows.sort_by_key(|r| r.year);
        rows.sort_by(|a, b| b.tracks.cmp(&a.tracks));

        let total: u32 = rows.iter().map(|r| r.tracks).sum();
        let rows = rows
            .into_iter()
            .map(|r| QuartileShareRow {
                year: r.year,
                num_of_tracks: r.tracks,
                prop_of_tracks: if total == 0 {
                    0.0
                } else {
                    f64::from(r.tracks) / f64::from(total) * 100.0
                },
            })
            .collect();
        Ok(Self { rows })
    }

    pub fn print(&self) {
        println!();
        println!("Top playlist quartile ({TOP_QUARTILE}) by release year");
        println!("{:<6} {:>8} {:>10}", "Year", "Tracks", "Share (%)");
        println!("{}", "-".repeat(26));
        for r in &self.rows {
            println!(
                "{:<6} {:>8} {:>10.2}",
                r.year, r.num_of_tracks, r.prop_of_tracks
            );
        }
    }
}

// ─── Chart categories ───────────────────────────────────────────────

/// Value counts of the two chart categories plus the year distribution
/// inside "Above average".
#[derive(Debug)]
pub struct ChartCategorySummary {
    pub threshold: f64,
    pub counts: Vec<(String, u32)>,
    pub above_by_year: Vec<YearCountRow>,
}

impl ChartCategorySummary {
    pub fn compute(df: &DataFrame, threshold: f64) -> Result<Self, DataError> {
        let category_counts = df
            .clone()
            .lazy()
            .group_by([col("ch_category")])
            .agg([col("track_name").count().alias("num_of_tracks")])
            .collect()?;
        let label = category_counts.column("ch_category")?.str()?;
        let count = category_counts.column("num_of_tracks")?.u32()?;
        let mut counts = Vec::with_capacity(category_counts.height());
        for i in 0..category_counts.height() {
            counts.push((
                label.get(i).unwrap_or_default().to_string(),
                count.get(i).unwrap_or_default(),
            ));
        }
        counts.sort_by(|a, b| a.0.cmp(&b.0));
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        let above = df
            .clone()
            .lazy()
            .filter(col("ch_category").eq(lit(ABOVE_AVERAGE)))
            .group_by([col("release_year")])
            .agg([col("track_name").count().alias("num_of_tracks")])
            .collect()?;
        let mut above_by_year = extract_year_counts(&above, "num_of_tracks")?;
        above_by_year.sort_by_key(|r| r.year);
        above_by_year.sort_by(|a, b| b.tracks.cmp(&a.tracks));

        Ok(Self {
            threshold,
            counts,
            above_by_year,
        })
    }

    pub fn print(&self) {
        println!();
        println!(
            "Chart categories (threshold: mean of {:.2} chart appearances)",
            self.threshold
        );
        for (label, count) in &self.counts {
            println!("{label:<16} {count:>6}");
        }
        println!();
        println!("Above-average tracks by release year");
        println!("{:<6} {:>8}", "Year", "Tracks");
        println!("{}", "-".repeat(15));
        for r in &self.above_by_year {
            println!("{:<6} {:>8}", r.year, r.tracks);
        }
    }
}

// ─── Chart data ─────────────────────────────────────────────────────

/// Per-year track counts for one categorical label, restricted to years
/// at or after `min_year`, ordered ascending by count (ties ascending by
/// year). This is the row set the bar charts render.
pub fn year_counts_filtered(
    df: &DataFrame,
    label_col: &str,
    label: &str,
    min_year: i64,
) -> Result<Vec<(i64, u32)>, DataError> {
    let counts = df
        .clone()
        .lazy()
        .filter(
            col(label_col)
                .cast(DataType::String)
                .eq(lit(label.to_string()))
                .and(col("release_year").gt_eq(lit(min_year))),
        )
        .group_by([col("release_year")])
        .agg([col("track_name").count().alias("num_of_tracks")])
        .collect()?;
    let mut rows = extract_year_counts(&counts, "num_of_tracks")?;
    rows.sort_by_key(|r| r.year);
    rows.sort_by_key(|r| r.tracks);
    Ok(rows.into_iter().map(|r| (r.year, r.tracks)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamlab_core::{label_chart_categories, label_playlist_quartiles};

    fn analysis_frame() -> DataFrame {
        df!(
            "track_name" => &["a", "b", "c", "d", "e", "f"],
            "artist_name" => &["A", "B", "C", "D", "E", "F"],
            "release_year" => &[2019i64, 2022, 2022, 2005, 2019, 2022],
            "num_spotify_pl" => &[100i64, 5000, 300, 80, 4000, 900],
            "num_spotify_charts" => &[2i64, 30, 4, 0, 20, 4],
            "streams" => &[5e8f64, 2e9, 5e8, 1e9, 3e9, 1e8],
        )
        .unwrap()
        .lazy()
        .with_column((col("streams") / lit(1_000_000.0)).alias("streams_millions"))
        .collect()
        .unwrap()
    }

    #[test]
    fn top_tracks_sorts_descending_with_stable_ties() {
        let report = TopTracks::compute(&analysis_frame(), 10).unwrap();
        let names: Vec<&str> = report.rows.iter().map(|r| r.track.as_str()).collect();
        // "a" and "c" share 500M streams; "a" comes first in the table
        // and must stay first.
        assert_eq!(names, vec!["e", "b", "d", "a", "c", "f"]);
    }

    #[test]
    fn top_tracks_respects_limit() {
        let report = TopTracks::compute(&analysis_frame(), 2).unwrap();
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].track, "e");
        assert_eq!(report.rows[0].streams_millions, 3000.0);
    }

    #[test]
    fn year_counts_rank_by_count_then_year() {
        let report = YearCounts::compute(&analysis_frame()).unwrap();
        assert_eq!(
            report.rows,
            vec![
                YearCountRow { year: 2022, tracks: 3 },
                YearCountRow { year: 2019, tracks: 2 },
                YearCountRow { year: 2005, tracks: 1 },
            ]
        );
    }

    #[test]
    fn yearly_stats_filter_and_aggregate() {
        let stats = YearlyStats::compute(&analysis_frame(), 2010).unwrap();
        // 2005 is below the cutoff.
        assert_eq!(stats.rows.len(), 2);

        let y2019 = &stats.rows[0];
        assert_eq!(y2019.year, 2019);
        assert_eq!(y2019.count, 2);
        assert_eq!(y2019.sum, 3500.0);
        assert_eq!(y2019.min, 500.0);
        assert_eq!(y2019.mean, 1750.0);
        assert_eq!(y2019.max, 3000.0);

        let y2022 = &stats.rows[1];
        assert_eq!(y2022.year, 2022);
        assert_eq!(y2022.count, 3);
        assert_eq!(y2022.sum, 2600.0);
    }

    #[test]
    fn yearly_stats_top_ranking_is_stable() {
        let stats = YearlyStats::compute(&analysis_frame(), 2000).unwrap();
        let ranked = stats.top_by_count(2);
        assert_eq!(ranked[0].year, 2022);
        assert_eq!(ranked[1].year, 2019);
    }

    #[test]
    fn quartile_share_sums_to_one_hundred() {
        let df = label_playlist_quartiles(analysis_frame()).unwrap();
        let report = QuartileShare::compute(&df).unwrap();
        assert!(!report.rows.is_empty());
        let total: f64 = report.rows.iter().map(|r| r.prop_of_tracks).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn chart_category_counts_partition_the_table() {
        let df = analysis_frame();
        let threshold = streamlab_core::chart_count_mean(&df).unwrap();
        let df = label_chart_categories(df, threshold).unwrap();
        let summary = ChartCategorySummary::compute(&df, threshold).unwrap();

        let total: u32 = summary.counts.iter().map(|(_, c)| *c).sum();
        assert_eq!(total as usize, df.height());
        assert_eq!(summary.counts.len(), 2);

        let above_total: u32 = summary.above_by_year.iter().map(|r| r.tracks).sum();
        let above_count = summary
            .counts
            .iter()
            .find(|(label, _)| label == ABOVE_AVERAGE)
            .map(|(_, c)| *c)
            .unwrap();
        assert_eq!(above_total, above_count);
    }

    #[test]
    fn chart_rows_are_filtered_and_ascending() {
        let df = analysis_frame();
        let threshold = streamlab_core::chart_count_mean(&df).unwrap();
        let df = label_chart_categories(df, threshold).unwrap();
        let rows = year_counts_filtered(&df, "ch_category", ABOVE_AVERAGE, 2010).unwrap();

        // Mean chart count is 10; only "b" (30, 2022) and "e" (20, 2019)
        // are above it, and both years pass the 2010 cutoff.
        assert_eq!(rows, vec![(2019, 1), (2022, 1)]);
        let counts: Vec<u32> = rows.iter().map(|(_, c)| *c).collect();
        let mut sorted = counts.clone();
        sorted.sort_unstable();
        assert_eq!(counts, sorted);
    }
}
