//! CSV loading for grid, neuron, and connection tables.
//!
//! Every table is read in one synchronous pass. Headers are checked up front
//! so a missing column is reported by name rather than as a row failure.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::cell::{Cell, CellRecord, GRID_COLUMNS};
use crate::error::SnapshotError;
use crate::grid::{Grid, MAX_GRID_SIDE};
use crate::neural::{Connection, NeuralGraph, Neuron, CONNECTION_COLUMNS, NEURON_COLUMNS};
use crate::sequence::SnapshotSequence;

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn open(path: &Path) -> Result<File, SnapshotError> {
    File::open(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn origin_of(path: &Path) -> String {
    path.display().to_string()
}

/// Maps a low-level CSV failure onto the snapshot error taxonomy.
fn csv_error(err: csv::Error, origin: &str) -> SnapshotError {
    let row = err.position().map(|p| p.record());
    match err.into_kind() {
        csv::ErrorKind::Io(source) => SnapshotError::Io {
            path: PathBuf::from(origin),
            source,
        },
        kind => {
            let message = match row {
                Some(record) => format!("record {record}: {}", describe_kind(&kind)),
                None => describe_kind(&kind),
            };
            SnapshotError::schema(origin, message)
        }
    }
}

fn describe_kind(kind: &csv::ErrorKind) -> String {
    match kind {
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("expected {expected_len} fields, found {len}"),
        csv::ErrorKind::Utf8 { err, .. } => format!("invalid UTF-8: {err}"),
        other => format!("{other:?}"),
    }
}

/// Reads every row of a table into `T`, returning `(data_row, value)` pairs.
fn read_rows<R, T>(reader: R, origin: &str, required: &[&str]) -> Result<Vec<(usize, T)>, SnapshotError>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut reader = csv_reader(reader);
    let headers = reader
        .headers()
        .map_err(|e| csv_error(e, origin))?
        .clone();

    if let Some(missing) = required.iter().find(|col| !headers.iter().any(|h| h == **col)) {
        return Err(SnapshotError::schema(
            origin,
            format!("missing required column `{missing}`"),
        ));
    }

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let row = i + 1;
        let record = record.map_err(|e| csv_error(e, origin))?;
        let value = record
            .deserialize(Some(&headers))
            .map_err(|e| SnapshotError::schema(origin, format!("row {row}: {e}")))?;
        rows.push((row, value));
    }
    Ok(rows)
}

/// Parses a grid table from any reader. `origin` names it in errors.
pub fn parse_grid<R: Read>(reader: R, origin: &str) -> Result<Grid, SnapshotError> {
    let records: Vec<(usize, CellRecord)> = read_rows(reader, origin, &GRID_COLUMNS)?;
    let cells = records
        .into_iter()
        .map(|(row, record)| {
            let cell = record.into_cell(origin, row)?;
            if cell.x >= MAX_GRID_SIDE || cell.y >= MAX_GRID_SIDE {
                return Err(SnapshotError::schema(
                    origin,
                    format!(
                        "row {row}: coordinate ({}, {}) exceeds the maximum grid size of {MAX_GRID_SIDE}",
                        cell.x, cell.y
                    ),
                ));
            }
            Ok(cell)
        })
        .collect::<Result<Vec<Cell>, _>>()?;
    Ok(Grid::from_cells(cells))
}

/// Loads a grid snapshot from a CSV file.
pub fn read_grid(path: &Path) -> Result<Grid, SnapshotError> {
    let grid = parse_grid(open(path)?, &origin_of(path))?;
    let summary = grid.summary();
    tracing::info!(
        "Loaded grid {:?}: {}x{}, {} cells, {} creatures",
        path,
        grid.width(),
        grid.height(),
        summary.cells,
        summary.creatures
    );
    Ok(grid)
}

pub fn parse_neurons<R: Read>(reader: R, origin: &str) -> Result<Vec<Neuron>, SnapshotError> {
    let rows: Vec<(usize, Neuron)> = read_rows(reader, origin, &NEURON_COLUMNS)?;
    Ok(rows.into_iter().map(|(_, neuron)| neuron).collect())
}

pub fn parse_connections<R: Read>(reader: R, origin: &str) -> Result<Vec<Connection>, SnapshotError> {
    let rows: Vec<(usize, Connection)> = read_rows(reader, origin, &CONNECTION_COLUMNS)?;
    Ok(rows.into_iter().map(|(_, connection)| connection).collect())
}

/// Loads both tables and builds the neural graph.
pub fn read_neural_graph(neurons_path: &Path, connections_path: &Path) -> Result<NeuralGraph, SnapshotError> {
    let neurons = parse_neurons(open(neurons_path)?, &origin_of(neurons_path))?;
    let connections = parse_connections(open(connections_path)?, &origin_of(connections_path))?;
    let graph = NeuralGraph::build(neurons, connections)?;

    let summary = graph.summary();
    tracing::info!(
        "Loaded neural graph: {} sensory, {} internal, {} output neurons, {} connections",
        summary.sensory,
        summary.internal,
        summary.output,
        summary.edges
    );
    Ok(graph)
}

/// Lists the `*.csv` files in a directory, sorted by file name.
pub fn discover_snapshots(dir: &Path) -> Result<Vec<PathBuf>, SnapshotError> {
    let io_error = |source| SnapshotError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "csv") {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    tracing::debug!("Found {} snapshot files in {:?}", paths.len(), dir);
    Ok(paths)
}

/// Loads each path as one frame, preserving the given order.
pub fn load_sequence(paths: &[PathBuf]) -> Result<SnapshotSequence, SnapshotError> {
    let frames = paths
        .iter()
        .map(|path| read_grid(path))
        .collect::<Result<Vec<Grid>, _>>()?;
    SnapshotSequence::new(frames)
}
