use polars::prelude::*;

/// Expected column layout of the source dataset.
pub struct TrackSchema;

impl TrackSchema {
    /// Stream counts are parsed as text; a separate coercion step decides
    /// which values are numeric.
    pub const STREAMS: &'static str = "streams";

    /// First column of the trailing range that is dropped after load.
    /// Everything at or after this position is outside the analysis.
    pub const PRUNE_FROM: &'static str = "in_apple_playlists";

    /// Fixed mapping from source column names to analysis names.
    pub const RENAMES: [(&'static str, &'static str); 7] = [
        ("artist(s)_name", "artist_name"),
        ("artist_count", "num_of_artists"),
        ("released_year", "release_year"),
        ("released_month", "release_month"),
        ("released_day", "release_day"),
        ("in_spotify_playlists", "num_spotify_pl"),
        ("in_spotify_charts", "num_spotify_charts"),
    ];

    /// Source columns the pipeline touches directly.
    pub fn required() -> Vec<&'static str> {
        let mut cols = vec!["track_name", Self::STREAMS, Self::PRUNE_FROM];
        cols.extend(Self::RENAMES.iter().map(|(src, _)| *src));
        cols
    }

    /// Check that every required column is present in the loaded frame.
    pub fn validate(df: &DataFrame) -> Result<(), SchemaError> {
        let schema = df.schema();
        for name in Self::required() {
            if !schema.contains(name) {
                return Err(SchemaError::MissingColumn(name.to_string()));
            }
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("missing required column: {0}")]
    MissingColumn(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_frame() -> DataFrame {
        df!(
            "track_name" => &["a"],
            "artist(s)_name" => &["b"],
            "artist_count" => &[1i64],
            "released_year" => &[2020i64],
            "released_month" => &[1i64],
            "released_day" => &[1i64],
            "in_spotify_playlists" => &[10i64],
            "in_spotify_charts" => &[2i64],
            "streams" => &["100"],
            "in_apple_playlists" => &[5i64],
        )
        .unwrap()
    }

    #[test]
    fn validate_accepts_complete_frame() {
        assert!(TrackSchema::validate(&full_frame()).is_ok());
    }

    #[test]
    fn validate_rejects_missing_column() {
        let df = full_frame().drop("in_spotify_charts").unwrap();
        let err = TrackSchema::validate(&df).unwrap_err();
        assert!(matches!(err, SchemaError::MissingColumn(name) if name == "in_spotify_charts"));
    }

    #[test]
    fn required_includes_prune_anchor() {
        assert!(TrackSchema::required().contains(&TrackSchema::PRUNE_FROM));
    }
}
