//! Derived columns: streams in millions, playlist quartile, chart category.

use polars::prelude::*;

use crate::ingest::DataError;

/// Ordered labels for the playlist-count quartile buckets.
pub const QUARTILE_LABELS: [&str; 4] = ["Below_25%", "25%_to_50%", "50%_to_75%", "Top_75%"];

/// Label of the top playlist quartile.
pub const TOP_QUARTILE: &str = "Top_75%";

/// Chart-category labels.
pub const ABOVE_AVERAGE: &str = "Above average";
pub const BELOW_AVERAGE: &str = "Below average";

/// Add `streams_millions = streams / 1_000_000` for every row.
pub fn with_streams_millions(df: DataFrame) -> Result<DataFrame, DataError> {
    Ok(df
        .lazy()
        .with_column((col("streams") / lit(1_000_000.0)).alias("streams_millions"))
        .collect()?)
}

/// Bucket `num_spotify_pl` into 4 equal-frequency quantile buckets.
///
/// Bucket breaks are the 25th/50th/75th percentile values over all
/// surviving rows; membership at a break follows right-closed interval
/// containment, so a value tied exactly at a break lands in the lower
/// bucket. Duplicate breaks are an error.
pub fn label_playlist_quartiles(df: DataFrame) -> Result<DataFrame, DataError> {
    let labels: Vec<PlSmallStr> = QUARTILE_LABELS.iter().map(|l| (*l).into()).collect();
    Ok(df
        .lazy()
        .with_column(
            col("num_spotify_pl")
                .qcut(vec![0.25, 0.5, 0.75], Some(labels), false, false, false)
                .alias("pl_quantile"),
        )
        .collect()?)
}

/// Dataset-wide mean of `num_spotify_charts` over all surviving rows.
pub fn chart_count_mean(df: &DataFrame) -> Result<f64, DataError> {
    df.column("num_spotify_charts")?
        .as_materialized_series()
        .mean()
        .ok_or_else(|| DataError::Empty("num_spotify_charts has no mean".to_string()))
}

/// Classify one chart count against the dataset-wide mean.
///
/// A count exactly equal to the threshold is "Above average".
pub fn chart_category(chart_count: f64, threshold: f64) -> &'static str {
    if chart_count < threshold {
        BELOW_AVERAGE
    } else {
        ABOVE_AVERAGE
    }
}

/// Add `ch_category` by applying [`chart_category`] columnwise.
pub fn label_chart_categories(df: DataFrame, threshold: f64) -> Result<DataFrame, DataError> {
    Ok(df
        .lazy()
        .with_column(
            when(col("num_spotify_charts").lt(lit(threshold)))
                .then(lit(BELOW_AVERAGE))
                .otherwise(lit(ABOVE_AVERAGE))
                .alias("ch_category"),
        )
        .collect()?)
}
