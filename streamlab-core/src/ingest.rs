//! Source file ingestion: ISO-8859-1 decode and CSV parse.
//!
//! The streaming dataset is not valid UTF-8 (artist and track names carry
//! Latin-1 accented bytes), so the file is read as raw bytes and decoded
//! before parsing. The `streams` column is forced to String at parse time;
//! numeric coercion happens later as its own cleaning step.

use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use encoding_rs::WINDOWS_1252;
use polars::prelude::*;

use crate::fingerprint::dataset_hash;
use crate::schema::{SchemaError, TrackSchema};

/// Encoding label reported for the source file.
pub const SOURCE_ENCODING: &str = "ISO-8859-1";

/// A loaded dataset plus its provenance.
#[derive(Debug)]
pub struct RawDataset {
    /// Parsed table, unchanged apart from the `streams` dtype overwrite.
    pub frame: DataFrame,
    /// BLAKE3 digest of the raw file bytes.
    pub dataset_hash: String,
    /// Text encoding the bytes were decoded with.
    pub encoding: &'static str,
}

/// Errors from the ingestion and cleaning layer.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("CSV parse failed: {0}")]
    ParseFailed(String),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("dataframe operation failed: {0}")]
    Op(String),

    #[error("empty dataset: {0}")]
    Empty(String),
}

impl From<PolarsError> for DataError {
    fn from(e: PolarsError) -> Self {
        DataError::Op(e.to_string())
    }
}

/// Load the source file into a `DataFrame`.
///
/// Reads raw bytes, fingerprints them, decodes as ISO-8859-1 (the WHATWG
/// encoding registry maps that label onto windows-1252), and parses the
/// result as headered CSV. A missing file or unparsable CSV is fatal.
pub fn load_tracks(path: &Path) -> Result<RawDataset, DataError> {
    let bytes = fs::read(path).map_err(|e| DataError::ReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let hash = dataset_hash(&bytes);
    let (text, _, _) = WINDOWS_1252.decode(&bytes);

    let mut overrides = Schema::default();
    overrides.with_column(TrackSchema::STREAMS.into(), DataType::String);

    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(1024))
        .with_schema_overwrite(Some(Arc::new(overrides)))
        .into_reader_with_file_handle(Cursor::new(text.into_owned().into_bytes()))
        .finish()
        .map_err(|e| DataError::ParseFailed(e.to_string()))?;

    TrackSchema::validate(&frame)?;

    Ok(RawDataset {
        frame,
        dataset_hash: hash,
        encoding: SOURCE_ENCODING,
    })
}
