//! StreamLab Runner — configuration, pipeline orchestration, reports,
//! export, and chart rendering.
//!
//! This crate builds on `streamlab-core` to provide:
//! - TOML-loadable run configuration with content-addressed run ids
//! - The end-to-end analysis pipeline
//! - Fixed-width console reports for every stage
//! - Yearly summary CSV export
//! - Horizontal bar charts rendered to SVG

pub mod charts;
pub mod config;
pub mod export;
pub mod pipeline;
pub mod reports;

pub use charts::render_year_counts;
pub use config::{ConfigError, RunConfig, RunId};
pub use export::export_yearly_stats;
pub use pipeline::{run_analysis, RunSummary};
pub use reports::{
    ChartCategorySummary, DatasetOverview, QuartileShare, TopTracks, YearCounts, YearlyStats,
};
