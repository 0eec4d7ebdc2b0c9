//! StreamLab CLI — run the streaming analysis or preview the dataset.
//!
//! Commands:
//! - `run` — execute the full analysis pipeline: console reports, the
//!   yearly summary export, and the two charts
//! - `preview` — load the dataset and print the overview report only

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use streamlab_core::load_tracks;
use streamlab_runner::reports::DatasetOverview;
use streamlab_runner::{run_analysis, RunConfig};

#[derive(Parser)]
#[command(
    name = "streamlab",
    about = "StreamLab CLI — one-pass analysis of streaming metadata"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute the full analysis pipeline.
    Run {
        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Source dataset. Overrides the config value.
        #[arg(long)]
        input: Option<PathBuf>,

        /// Destination for the yearly summary CSV. Overrides the config value.
        #[arg(long)]
        export: Option<PathBuf>,

        /// Directory the charts are written into. Overrides the config value.
        #[arg(long)]
        charts_dir: Option<PathBuf>,
    },
    /// Load the dataset and print the overview report only.
    Preview {
        /// Source dataset.
        #[arg(long, default_value = "spotify-2023.csv")]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            input,
            export,
            charts_dir,
        } => run_cmd(config, input, export, charts_dir),
        Commands::Preview { input } => preview_cmd(&input),
    }
}

fn run_cmd(
    config_path: Option<PathBuf>,
    input: Option<PathBuf>,
    export: Option<PathBuf>,
    charts_dir: Option<PathBuf>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => RunConfig::from_toml_file(&path)?,
        None => RunConfig::default(),
    };
    if let Some(input) = input {
        config.input = input;
    }
    if let Some(export) = export {
        config.export_path = export;
    }
    if let Some(charts_dir) = charts_dir {
        config.charts_dir = charts_dir;
    }

    let summary = run_analysis(&config)?;

    println!();
    println!("Run {} complete", summary.run_id);
    println!(
        "Rows: {} loaded, {} retained",
        summary.rows_loaded, summary.rows_retained
    );
    println!("Dataset hash: {}", summary.dataset_hash);
    println!("Summary: {}", summary.export_path.display());
    println!(
        "Charts: {}, {}",
        summary.chart_paths[0].display(),
        summary.chart_paths[1].display()
    );
    Ok(())
}

fn preview_cmd(input: &Path) -> Result<()> {
    let dataset = load_tracks(input)?;
    DatasetOverview::from_dataset(&dataset, input)?.print();
    Ok(())
}
