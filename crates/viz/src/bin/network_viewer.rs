//! Neural network viewer
//!
//! Run with: cargo run -p viz --bin network_viewer -- --seed 7

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use sim_snapshot::read_neural_graph;
use viz::cli::{init_tracing, sibling_path};
use viz::{show_network, ViewerConfig, ViewerError};

/// Neural network viewer
#[derive(Parser, Debug)]
#[command(name = "network_viewer")]
#[command(about = "Draw a creature's neural network")]
struct Args {
    /// Neuron CSV file (defaults to neurons.csv next to the executable)
    #[arg(long)]
    neurons: Option<PathBuf>,

    /// Connection CSV file (defaults to connections.csv next to the executable)
    #[arg(long)]
    connections: Option<PathBuf>,

    /// Viewer configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Layout seed for a reproducible picture (overrides the config)
    #[arg(long)]
    seed: Option<u64>,
}

fn run(args: Args) -> Result<(), ViewerError> {
    let mut config = ViewerConfig::load(args.config.as_deref())?;
    if args.seed.is_some() {
        config.network.seed = args.seed;
    }

    let neurons = args.neurons.unwrap_or_else(|| sibling_path("neurons.csv"));
    let connections = args
        .connections
        .unwrap_or_else(|| sibling_path("connections.csv"));
    let graph = read_neural_graph(&neurons, &connections)?;

    show_network(graph, &config)
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
