//! Blocking entry points that build a viewer app and run it until the window
//! closes.

use std::time::Duration;

use bevy::prelude::*;
use sim_snapshot::{Grid, NeuralGraph, SnapshotSequence};

use crate::camera::ViewBounds;
use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::grid_view::{GridGeometry, GridScene, GridViewPlugin};
use crate::layout::SpringLayout;
use crate::network_view::{NetworkScene, NetworkViewPlugin};
use crate::plugin::ViewerWindowPlugin;
use crate::screensaver::{Playback, ScreensaverFrames, ScreensaverPlugin};

fn viewer_app(config: &ViewerConfig) -> App {
    let mut app = App::new();
    app.insert_resource(config.clone())
        .add_plugins(ViewerWindowPlugin::new(config.window.clone()));
    app
}

/// Runs the app to completion, mapping an error exit into [`ViewerError`].
pub fn run(mut app: App) -> Result<(), ViewerError> {
    match app.run() {
        AppExit::Success => {
            tracing::info!("Viewer closed");
            Ok(())
        }
        AppExit::Error(code) => Err(ViewerError::AppExit(code.get())),
    }
}

/// Shows one grid with labels, gridlines, and legend until the window closes.
pub fn show_static(grid: Grid, config: &ViewerConfig) -> Result<(), ViewerError> {
    let geometry = GridGeometry::for_grid(&grid, &config.grid);

    let mut app = viewer_app(config);
    app.insert_resource(ViewBounds {
        size: geometry.size(),
    })
    .insert_resource(geometry)
    .insert_resource(GridScene { grid })
    .add_plugins(GridViewPlugin);
    run(app)
}

/// Loops through the sequence, one frame per `interval`, until the window
/// closes.
pub fn animate(
    sequence: SnapshotSequence,
    interval: Duration,
    config: &ViewerConfig,
) -> Result<(), ViewerError> {
    let (width, height) = sequence.bounds();
    let geometry = GridGeometry::new(width, height, config.grid.cell_size);
    tracing::info!(
        "Animating {} frames every {} ms",
        sequence.len(),
        interval.as_millis()
    );

    let mut app = viewer_app(config);
    app.insert_resource(ViewBounds {
        size: geometry.size(),
    })
    .insert_resource(geometry)
    .insert_resource(Playback::new(sequence.len(), interval))
    .insert_resource(ScreensaverFrames { sequence })
    .add_plugins(ScreensaverPlugin);
    run(app)
}

/// Like [`animate`], for a plain list of grids.
///
/// Fails with [`sim_snapshot::SnapshotError::EmptySequence`] before any
/// window is opened when `frames` is empty.
pub fn animate_frames(
    frames: Vec<Grid>,
    interval: Duration,
    config: &ViewerConfig,
) -> Result<(), ViewerError> {
    let sequence = SnapshotSequence::new(frames)?;
    animate(sequence, interval, config)
}

/// Draws the graph at the given positions until the window closes.
///
/// `positions` must hold one entry per node, in node order, in layout units.
pub fn draw_network(
    graph: NeuralGraph,
    positions: Vec<Vec2>,
    config: &ViewerConfig,
) -> Result<(), ViewerError> {
    if positions.len() != graph.node_count() {
        return Err(ViewerError::LayoutMismatch {
            expected: graph.node_count(),
            found: positions.len(),
        });
    }

    let scene = NetworkScene { graph, positions };
    let mut app = viewer_app(config);
    app.insert_resource(ViewBounds {
        size: scene.world_extent(&config.network),
    })
    .insert_resource(scene)
    .add_plugins(NetworkViewPlugin);
    run(app)
}

/// Lays out the graph with the configured spring layout and draws it.
pub fn show_network(graph: NeuralGraph, config: &ViewerConfig) -> Result<(), ViewerError> {
    let layout = SpringLayout::from_config(&config.network);
    tracing::info!(
        "Computing spring layout (k={}, scale={}, iterations={}, seed={:?})",
        layout.k,
        layout.scale,
        layout.iterations,
        layout.seed
    );
    let positions = layout.compute(&graph);
    draw_network(graph, positions, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_snapshot::SnapshotError;

    #[test]
    fn test_animate_empty_frames_fails_before_window() {
        let err = animate_frames(Vec::new(), Duration::from_millis(200), &ViewerConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ViewerError::Snapshot(SnapshotError::EmptySequence)
        ));
    }

    #[test]
    fn test_draw_network_rejects_mismatched_layout() {
        let err = draw_network(
            NeuralGraph::default(),
            vec![Vec2::ZERO],
            &ViewerConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ViewerError::LayoutMismatch {
                expected: 0,
                found: 1
            }
        ));
    }
}
