//! End-to-end analysis pipeline.
//!
//! A strict sequential transform chain over one owned table:
//! load → overview → prune → coerce → drop nulls → rename → derive →
//! report → export → derive → report → charts. Every step consumes the
//! prior table value and produces the next; nothing is shared.

use std::path::PathBuf;

use anyhow::{Context, Result};

use streamlab_core::{
    chart_count_mean, coerce_streams, drop_incomplete_rows, label_chart_categories,
    label_playlist_quartiles, load_tracks, prune_trailing_columns, rename_columns,
    with_streams_millions, ABOVE_AVERAGE, TOP_QUARTILE,
};

use crate::charts::render_year_counts;
use crate::config::RunConfig;
use crate::export::export_yearly_stats;
use crate::reports::{
    print_column_list, print_shape, year_counts_filtered, ChartCategorySummary, DatasetOverview,
    QuartileShare, TopTracks, YearCounts, YearlyStats,
};

/// File names of the two rendered charts, in render order.
pub const QUARTILE_CHART_FILE: &str = "top_playlist_quartile_by_year.svg";
pub const ABOVE_AVERAGE_CHART_FILE: &str = "above_average_charts_by_year.svg";

const QUARTILE_CHART_TITLE: &str = "Tracks in the top playlist quartile (Top_75%) by year";
const ABOVE_AVERAGE_CHART_TITLE: &str = "Tracks above the average chart count by year";

/// What a completed run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub run_id: String,
    pub dataset_hash: String,
    pub rows_loaded: usize,
    pub rows_retained: usize,
    pub export_path: PathBuf,
    pub chart_paths: [PathBuf; 2],
}

/// Run the whole analysis: reports to stdout, the yearly summary to
/// `config.export_path`, and two charts under `config.charts_dir`.
pub fn run_analysis(config: &RunConfig) -> Result<RunSummary> {
    let dataset = load_tracks(&config.input)
        .with_context(|| format!("failed to load {}", config.input.display()))?;
    let dataset_hash = dataset.dataset_hash.clone();

    DatasetOverview::from_dataset(&dataset, &config.input)?.print();
    let rows_loaded = dataset.frame.height();

    let df = prune_trailing_columns(dataset.frame)?;
    print_column_list("Columns after pruning", &df);

    let df = drop_incomplete_rows(coerce_streams(df)?)?;
    print_shape("After numeric coercion and null-row drop", &df);
    let rows_retained = df.height();

    let df = rename_columns(df)?;
    print_column_list("Columns after renaming", &df);

    let df = with_streams_millions(df)?;

    TopTracks::compute(&df, config.top_tracks)?.print();
    YearCounts::compute(&df)?.print();

    let stats = YearlyStats::compute(&df, config.stats_min_year)?;
    stats.print_top(config.stats_print_limit);
    export_yearly_stats(&stats, &config.export_path)?;
    println!();
    println!("Yearly summary exported to {}", config.export_path.display());

    let df = label_playlist_quartiles(df)?;
    QuartileShare::compute(&df)?.print();

    let threshold = chart_count_mean(&df)?;
    let df = label_chart_categories(df, threshold)?;
    ChartCategorySummary::compute(&df, threshold)?.print();

    std::fs::create_dir_all(&config.charts_dir)
        .with_context(|| format!("failed to create {}", config.charts_dir.display()))?;
    let quartile_chart = config.charts_dir.join(QUARTILE_CHART_FILE);
    let above_chart = config.charts_dir.join(ABOVE_AVERAGE_CHART_FILE);

    // Rendered strictly in sequence: the second starts only after the
    // first file is on disk.
    let quartile_bars =
        year_counts_filtered(&df, "pl_quantile", TOP_QUARTILE, config.stats_min_year)?;
    render_year_counts(&quartile_chart, QUARTILE_CHART_TITLE, &quartile_bars)?;

    let above_bars =
        year_counts_filtered(&df, "ch_category", ABOVE_AVERAGE, config.stats_min_year)?;
    render_year_counts(&above_chart, ABOVE_AVERAGE_CHART_TITLE, &above_bars)?;

    Ok(RunSummary {
        run_id: config.run_id(),
        dataset_hash,
        rows_loaded,
        rows_retained,
        export_path: config.export_path.clone(),
        chart_paths: [quartile_chart, above_chart],
    })
}
