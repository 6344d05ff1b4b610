//! Integration tests for loading snapshot tables from disk.

use std::fs;
use std::path::{Path, PathBuf};

use sim_snapshot::{
    discover_snapshots, load_sequence, read_grid, read_neural_graph, CellColour, CellLabel,
    Endpoint, Glyph, NeuronKind, Rgb, SnapshotError,
};
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

const HEADER: &str = "X,Y,Occupied,Food,Poison,Wall,Sunlit,Water,CreatureID\n";

/// Test loading the sample grid and resolving every listed cell.
#[test]
fn test_read_sample_grid() {
    let grid = read_grid(&fixture("grid.csv")).unwrap();

    assert_eq!(grid.width(), 4);
    assert_eq!(grid.height(), 4);
    assert_eq!(grid.cells().len(), 10);

    let labels: Vec<Option<String>> = grid.appearances().map(|(_, a)| a.label.text()).collect();
    assert_eq!(labels[0].as_deref(), Some("Wall"));
    assert_eq!(labels[1].as_deref(), Some(Glyph::Apple.as_str()));
    assert_eq!(labels[4].as_deref(), Some("7"));
    // Occupied wall: colour from the wall rule, label from the creature.
    let (_, wall_creature) = grid.appearances().nth(7).unwrap();
    assert_eq!(wall_creature.colour, CellColour::Black);
    assert_eq!(wall_creature.label, CellLabel::Creature(3));
}

/// Test that creature descriptions follow table order.
#[test]
fn test_sample_grid_descriptions() {
    let grid = read_grid(&fixture("grid.csv")).unwrap();

    assert_eq!(
        grid.describe_creatures(),
        vec![
            "Creature 7 at (0, 1) is on empty ground.",
            "Creature 12 at (1, 1) is eating food and in the sun.",
            "Creature 3 at (3, 1) is up against a wall.",
            "Creature 5 at (2, 3) is in the sun.",
        ]
    );
}

/// Test the rendered buffer of the sample grid, including unlisted cells.
#[test]
fn test_sample_grid_image() {
    let image = read_grid(&fixture("grid.csv")).unwrap().to_image();

    assert_eq!((image.width(), image.height()), (4, 4));
    assert_eq!(image.get(0, 2), Some(CellColour::Magenta.rgb()));
    assert_eq!(image.get(0, 3), Some(CellColour::Blue.rgb()));
    assert_eq!(image.get(1, 2), Some(CellColour::Yellow.rgb()));
    assert_eq!(image.get(3, 2), Some(CellColour::Red.rgb()));
    // (0, 3) never appears in the table.
    assert_eq!(image.get(3, 0), Some(Rgb::WHITE));
}

/// Test loading the sample neural graph.
#[test]
fn test_read_sample_graph() {
    let graph = read_neural_graph(&fixture("neurons.csv"), &fixture("connections.csv")).unwrap();

    assert_eq!(graph.node_count(), 6);
    assert_eq!(graph.edge_count(), 5);

    let kinds: Vec<NeuronKind> = graph.nodes().iter().map(|n| n.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            NeuronKind::Sensory,
            NeuronKind::Sensory,
            NeuronKind::Internal,
            NeuronKind::Internal,
            NeuronKind::Output,
            NeuronKind::Output,
        ]
    );

    let i0 = graph.node_index(16).unwrap();
    assert_eq!(graph.out_degree(i0), 2);
    assert_eq!(graph.edges()[0].connection.weight_label(), "0.51");
}

/// Test that a dangling connection aborts graph construction.
#[test]
fn test_dangling_connection_fixture() {
    let err = read_neural_graph(
        &fixture("neurons.csv"),
        &fixture("connections_dangling.csv"),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        SnapshotError::DanglingReference {
            row: 2,
            endpoint: Endpoint::Target,
            neuron_id: 30,
        }
    ));
}

/// Test snapshot discovery sorts by file name and ignores other files.
#[test]
fn test_discover_snapshots_sorted() {
    let dir = tempdir().unwrap();
    for name in ["step_010.csv", "step_002.csv", "notes.txt", "step_001.csv"] {
        fs::write(dir.path().join(name), HEADER).unwrap();
    }
    fs::create_dir(dir.path().join("nested.csv")).unwrap();

    let paths = discover_snapshots(dir.path()).unwrap();
    let names: Vec<String> = paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();

    assert_eq!(names, vec!["step_001.csv", "step_002.csv", "step_010.csv"]);
}

/// Test that an empty directory yields no frames and an empty sequence error.
#[test]
fn test_empty_directory_sequence() {
    let dir = tempdir().unwrap();
    let paths = discover_snapshots(dir.path()).unwrap();
    assert!(paths.is_empty());
    assert!(matches!(
        load_sequence(&paths),
        Err(SnapshotError::EmptySequence)
    ));
}

/// Test loading a sequence preserves the supplied order.
#[test]
fn test_load_sequence_order() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("a.csv");
    let second = dir.path().join("b.csv");
    fs::write(&first, format!("{HEADER}0,0,1,0,0,0,0,0,1\n")).unwrap();
    fs::write(&second, format!("{HEADER}1,0,1,0,0,0,0,0,1\n")).unwrap();

    let sequence = load_sequence(&[second.clone(), first.clone()]).unwrap();
    assert_eq!(sequence.len(), 2);
    assert_eq!(sequence.frames()[0].cells()[0].x, 1);
    assert_eq!(sequence.frames()[1].cells()[0].x, 0);
}

/// Test that an unreadable directory surfaces as an I/O error.
#[test]
fn test_discover_missing_directory() {
    let err = discover_snapshots(Path::new("/definitely/not/a/dir")).unwrap_err();
    assert!(matches!(err, SnapshotError::Io { .. }));
}
