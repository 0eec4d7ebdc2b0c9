//! Yearly summary export.
//!
//! Writes the full per-year statistics table (every year at or after the
//! cutoff, ascending, with a leading row-index column) as CSV. The file
//! is overwritten on every run.

use std::path::Path;

use anyhow::{Context, Result};

use crate::reports::YearlyStats;

/// Export the yearly summary.
///
/// Columns: index, release_year, sum, count, min, mean, max.
pub fn export_yearly_stats(stats: &YearlyStats, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    wtr.write_record(["index", "release_year", "sum", "count", "min", "mean", "max"])?;
    for (i, r) in stats.rows.iter().enumerate() {
        wtr.write_record([
            i.to_string(),
            r.year.to_string(),
            format!("{:.6}", r.sum),
            r.count.to_string(),
            format!("{:.6}", r.min),
            format!("{:.6}", r.mean),
            format!("{:.6}", r.max),
        ])?;
    }

    wtr.flush().context("failed to flush CSV writer")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::YearlyStatsRow;

    fn sample_stats() -> YearlyStats {
        YearlyStats {
            min_year: 2010,
            rows: vec![
                YearlyStatsRow {
                    year: 2019,
                    sum: 3500.0,
                    count: 2,
                    min: 500.0,
                    mean: 1750.0,
                    max: 3000.0,
                },
                YearlyStatsRow {
                    year: 2022,
                    sum: 2600.0,
                    count: 3,
                    min: 100.0,
                    mean: 866.666667,
                    max: 2000.0,
                },
            ],
        }
    }

    #[test]
    fn export_writes_header_and_indexed_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.csv");
        export_yearly_stats(&sample_stats(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "index,release_year,sum,count,min,mean,max");
        assert!(lines[1].starts_with("0,2019,3500.000000,2,"));
        assert!(lines[2].starts_with("1,2022,2600.000000,3,"));
    }

    #[test]
    fn export_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.csv");
        std::fs::write(&path, "stale content\nmore stale rows\nand more\nrows\n").unwrap();

        export_yearly_stats(&sample_stats(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(!text.contains("stale"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn row_count_matches_distinct_years() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.csv");
        let stats = sample_stats();
        export_yearly_stats(&stats, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), stats.rows.len() + 1);
    }
}
