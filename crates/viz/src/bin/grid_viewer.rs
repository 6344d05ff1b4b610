//! Grid snapshot viewer
//!
//! Shows one grid snapshot, then prints a sentence for every creature.
//!
//! Run with: cargo run -p viz --bin grid_viewer -- path/to/grid.csv

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use sim_snapshot::read_grid;
use viz::cli::{init_tracing, sibling_path};
use viz::{show_static, ViewerConfig, ViewerError};

/// Grid snapshot viewer
#[derive(Parser, Debug)]
#[command(name = "grid_viewer")]
#[command(about = "Show a grid snapshot and describe its creatures")]
struct Args {
    /// Grid CSV file (defaults to grid.csv next to the executable)
    grid: Option<PathBuf>,

    /// Viewer configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print creature descriptions without opening a window
    #[arg(long)]
    describe_only: bool,
}

fn run(args: Args) -> Result<(), ViewerError> {
    let config = ViewerConfig::load(args.config.as_deref())?;
    let path = args.grid.unwrap_or_else(|| sibling_path("grid.csv"));
    let grid = read_grid(&path)?;
    let descriptions = grid.describe_creatures();

    if !args.describe_only {
        show_static(grid, &config)?;
    }
    for line in descriptions {
        println!("{line}");
    }
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
