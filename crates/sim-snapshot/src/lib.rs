//! Snapshot models for the grid and neural-network viewers.
//!
//! This crate contains pure data structures with no rendering. It turns the
//! CSV tables exported by the simulation into a [`Grid`] (with colour/label
//! resolution and creature descriptions) or a [`NeuralGraph`], and is a
//! dependency of the visualization crate.

pub mod appearance;
pub mod cell;
pub mod error;
pub mod grid;
pub mod loader;
pub mod neural;
pub mod pixels;
pub mod sequence;

#[cfg(feature = "test-fixtures")]
pub mod fixtures;

pub use appearance::{resolve_appearance, CellAppearance, CellColour, CellLabel, Glyph, Rgb, LEGEND};
pub use cell::{parse_flag, Cell, CellRecord, GRID_COLUMNS};
pub use error::{Endpoint, SnapshotError};
pub use grid::{Grid, GridSummary, MAX_GRID_SIDE};
pub use loader::{
    discover_snapshots, load_sequence, parse_connections, parse_grid, parse_neurons,
    read_grid, read_neural_graph,
};
pub use neural::{
    Connection, Edge, GraphSummary, NeuralGraph, Neuron, NeuronKind, NodeColour,
    CONNECTION_COLUMNS, NEURON_COLUMNS,
};
pub use pixels::PixelBuffer;
pub use sequence::SnapshotSequence;
