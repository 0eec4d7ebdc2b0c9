//! StreamLab Core — dataset schema, ingestion, cleaning, derived columns.
//!
//! This crate contains the tabular half of the analysis:
//! - Column layout and rename map for the streaming dataset
//! - ISO-8859-1 decode + CSV parse into a polars `DataFrame`
//! - Cleaning transforms (column pruning, stream coercion, null-row drop, renaming)
//! - Derived columns (streams in millions, playlist quartile, chart category)
//! - Content-addressed dataset fingerprinting

pub mod clean;
pub mod derive;
pub mod fingerprint;
pub mod ingest;
pub mod schema;

pub use clean::{coerce_streams, drop_incomplete_rows, prune_trailing_columns, rename_columns};
pub use derive::{
    chart_category, chart_count_mean, label_chart_categories, label_playlist_quartiles,
    with_streams_millions, ABOVE_AVERAGE, BELOW_AVERAGE, QUARTILE_LABELS, TOP_QUARTILE,
};
pub use fingerprint::dataset_hash;
pub use ingest::{load_tracks, DataError, RawDataset};
pub use schema::{SchemaError, TrackSchema};
