//! Snapshot screensaver
//!
//! Loops through every grid snapshot in a directory.
//!
//! Run with: cargo run -p viz --bin screensaver -- output/ --interval 100

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use sim_snapshot::{discover_snapshots, load_sequence};
use viz::cli::init_tracing;
use viz::{animate, ViewerConfig, ViewerError};

/// Snapshot screensaver
#[derive(Parser, Debug)]
#[command(name = "screensaver")]
#[command(about = "Loop through the grid snapshots in a directory")]
struct Args {
    /// Directory containing grid CSV snapshots
    directory: PathBuf,

    /// Delay between frames in milliseconds (overrides the config)
    #[arg(long)]
    interval: Option<u64>,

    /// Viewer configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let paths = match discover_snapshots(&args.directory) {
        Ok(paths) => paths,
        Err(e) => return fail(e.into()),
    };
    if paths.is_empty() {
        eprintln!("No CSV files found in the specified directory");
        return ExitCode::FAILURE;
    }

    match play(&args, &paths) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(e),
    }
}

fn play(args: &Args, paths: &[PathBuf]) -> Result<(), ViewerError> {
    let mut config = ViewerConfig::load(args.config.as_deref())?;
    if let Some(interval) = args.interval {
        config.animation.interval_ms = interval;
    }
    tracing::info!("Found {} snapshots in {:?}", paths.len(), args.directory);

    let sequence = load_sequence(paths)?;
    animate(sequence, config.animation.interval(), &config)
}

fn fail(e: ViewerError) -> ExitCode {
    tracing::error!("{}", e);
    eprintln!("Error: {e}");
    ExitCode::from(e.exit_code())
}
