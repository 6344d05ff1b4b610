//! Sample data fixtures for testing.
//!
//! Ready-made grids and graphs for other crates' tests. Enable the
//! `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // sim-snapshot = { path = "../sim-snapshot", features = ["test-fixtures"] }
//!
//! use sim_snapshot::fixtures;
//!
//! let grid = fixtures::sample_grid();
//! let graph = fixtures::sample_graph();
//! ```

use crate::cell::Cell;
use crate::grid::Grid;
use crate::loader::{parse_connections, parse_grid, parse_neurons};
use crate::neural::NeuralGraph;
use crate::sequence::SnapshotSequence;

/// Returns the 4x4 sample grid from the fixtures file.
///
/// Contains one cell of every environmental kind, four creatures (one of them
/// against a wall, one eating food in the sun), and one plain empty cell.
pub fn sample_grid() -> Grid {
    let csv = include_str!("../tests/fixtures/grid.csv");
    parse_grid(csv.as_bytes(), "fixtures/grid.csv")
        .unwrap_or_else(|e| panic!("Failed to parse grid fixture: {e}"))
}

/// Returns the sample neural graph from the fixtures files.
///
/// Contains 6 neurons (2 sensory, 2 internal-bucket, 2 output) and 5
/// connections, two of which are parallel edges from `I_0` to `M_n`.
pub fn sample_graph() -> NeuralGraph {
    let neurons = parse_neurons(
        include_str!("../tests/fixtures/neurons.csv").as_bytes(),
        "fixtures/neurons.csv",
    )
    .unwrap_or_else(|e| panic!("Failed to parse neuron fixture: {e}"));
    let connections = parse_connections(
        include_str!("../tests/fixtures/connections.csv").as_bytes(),
        "fixtures/connections.csv",
    )
    .unwrap_or_else(|e| panic!("Failed to parse connection fixture: {e}"));

    NeuralGraph::build(neurons, connections)
        .unwrap_or_else(|e| panic!("Failed to build sample graph: {e}"))
}

/// A three-frame sequence of a single creature walking east along row 0.
pub fn walking_sequence() -> SnapshotSequence {
    let frames = (0..3)
        .map(|step| {
            Grid::from_cells(vec![
                Cell::new(step, 0).with_creature(1),
                Cell::new(3, 0).with_food(),
            ])
        })
        .collect();
    SnapshotSequence::new(frames).unwrap_or_else(|e| panic!("Failed to build sequence: {e}"))
}
