//! Cleaning transforms over the raw dataset.
//!
//! Each step takes the prior table by value and returns a new one, so the
//! pipeline is an explicit chain of owned values with no shared state.
//! Order matters: prune → coerce → drop incomplete rows → rename.

use polars::prelude::*;

use crate::ingest::DataError;
use crate::schema::{SchemaError, TrackSchema};

/// Drop every column from `in_apple_playlists` onward.
///
/// The range is positional: whatever sits at or after that column in the
/// loaded layout is discarded, so the retained set is always the leading
/// columns regardless of how many trailing columns the file carries.
pub fn prune_trailing_columns(df: DataFrame) -> Result<DataFrame, DataError> {
    let names = df.get_column_names();
    let cut = names
        .iter()
        .position(|n| n.as_str() == TrackSchema::PRUNE_FROM)
        .ok_or_else(|| {
            DataError::Schema(SchemaError::MissingColumn(TrackSchema::PRUNE_FROM.to_string()))
        })?;
    let keep: Vec<PlSmallStr> = names[..cut].iter().map(|n| (*n).clone()).collect();
    Ok(df.select(keep)?)
}

/// Cast `streams` from text to Float64.
///
/// The cast is non-strict: any value that fails to parse becomes null
/// instead of raising. Null handling is the next step's job.
pub fn coerce_streams(df: DataFrame) -> Result<DataFrame, DataError> {
    Ok(df
        .lazy()
        .with_column(col(TrackSchema::STREAMS).cast(DataType::Float64))
        .collect()?)
}

/// Drop every row that has a null in ANY retained column.
///
/// Deliberately blunt: one malformed field discards the whole row.
pub fn drop_incomplete_rows(df: DataFrame) -> Result<DataFrame, DataError> {
    Ok(df.lazy().drop_nulls(None).collect()?)
}

/// Apply the fixed source-name → analysis-name mapping.
pub fn rename_columns(df: DataFrame) -> Result<DataFrame, DataError> {
    let (existing, new): (Vec<&str>, Vec<&str>) = TrackSchema::RENAMES.iter().copied().unzip();
    Ok(df.lazy().rename(existing, new, true).collect()?)
}
