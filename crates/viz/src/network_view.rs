//! Neural network view: coloured nodes, weighted arrows, and labels.

use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use sim_snapshot::NeuralGraph;

use crate::config::{NetworkViewConfig, ViewerConfig};
use crate::texture::color_from_rgb;

const EDGE_COLOR: Color = Color::srgb(0.25, 0.25, 0.25);
const ARROW_TIP: f32 = 12.0;

/// Plugin that draws the [`NetworkScene`] resource.
pub struct NetworkViewPlugin;

impl Plugin for NetworkViewPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_nodes, spawn_edge_labels))
            .add_systems(Update, draw_edges);
    }
}

/// A graph together with its layout, one position per node in layout units.
#[derive(Resource, Debug, Clone)]
pub struct NetworkScene {
    pub graph: NeuralGraph,
    pub positions: Vec<Vec2>,
}

impl NetworkScene {
    /// World position of node `index`.
    pub fn world_position(&self, index: usize, config: &NetworkViewConfig) -> Vec2 {
        self.positions
            .get(index)
            .copied()
            .unwrap_or(Vec2::ZERO)
            * config.pixels_per_unit
    }

    /// Size of the box holding every node, including the node circles.
    pub fn world_extent(&self, config: &NetworkViewConfig) -> Vec2 {
        let limit = self
            .positions
            .iter()
            .fold(Vec2::ZERO, |acc, p| acc.max(p.abs()));
        (limit * config.pixels_per_unit + Vec2::splat(config.node_radius)) * 2.0
    }
}

/// Visible part of the edge between two node centres, trimmed to the circle
/// boundaries. `None` when the circles touch or overlap.
pub fn edge_segment(from: Vec2, to: Vec2, radius: f32) -> Option<(Vec2, Vec2)> {
    let delta = to - from;
    let length = delta.length();
    if length <= 2.0 * radius {
        return None;
    }
    let dir = delta / length;
    Some((from + dir * radius, to - dir * radius))
}

/// Where the weight label of the `nth` parallel edge from `from` to `to` goes.
///
/// The first sits at the midpoint; later ones step sideways so they stay
/// readable.
pub fn edge_label_anchor(from: Vec2, to: Vec2, nth: usize, spacing: f32) -> Vec2 {
    let midpoint = from.lerp(to, 0.5);
    if nth == 0 {
        return midpoint;
    }
    let normal = (to - from).perp().normalize_or_zero();
    midpoint + normal * spacing * nth as f32
}

/// How many earlier edges share each edge's ordered endpoint pair.
fn parallel_ranks(graph: &NeuralGraph) -> Vec<usize> {
    graph
        .edges()
        .iter()
        .enumerate()
        .map(|(i, edge)| {
            graph.edges()[..i]
                .iter()
                .filter(|e| e.source == edge.source && e.target == edge.target)
                .count()
        })
        .collect()
}

/// Marker for a neuron node.
#[derive(Component)]
pub struct NodeMarker;

fn spawn_nodes(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    scene: Res<NetworkScene>,
    config: Res<ViewerConfig>,
) {
    let network = &config.network;
    let circle = Mesh2dHandle(meshes.add(Circle::new(network.node_radius)));

    for (index, neuron) in scene.graph.nodes().iter().enumerate() {
        let position = scene.world_position(index, network);
        commands
            .spawn((
                MaterialMesh2dBundle {
                    mesh: circle.clone(),
                    material: materials.add(ColorMaterial::from(color_from_rgb(neuron.colour().rgb()))),
                    transform: Transform::from_xyz(position.x, position.y, 1.0),
                    ..default()
                },
                NodeMarker,
            ))
            .with_children(|parent| {
                parent.spawn(Text2dBundle {
                    text: Text::from_section(
                        neuron.label.clone(),
                        TextStyle {
                            font_size: network.label_font_size,
                            color: Color::BLACK,
                            ..default()
                        },
                    )
                    .with_justify(JustifyText::Center),
                    transform: Transform::from_xyz(0.0, 0.0, 1.0),
                    ..default()
                });
            });
        tracing::debug!(
            "Node {} ({}, {}) at {:?} with {} outgoing edges",
            neuron.label,
            neuron.id,
            neuron.kind(),
            position,
            scene.graph.out_degree(index)
        );
    }

    let summary = scene.graph.summary();
    tracing::info!(
        "Spawned {} nodes ({} sensory, {} output, {} internal)",
        scene.graph.node_count(),
        summary.sensory,
        summary.output,
        summary.internal
    );
}

/// Marker for an edge weight label.
#[derive(Component)]
pub struct EdgeLabel;

fn spawn_edge_labels(mut commands: Commands, scene: Res<NetworkScene>, config: Res<ViewerConfig>) {
    let network = &config.network;
    let ranks = parallel_ranks(&scene.graph);

    for (edge, rank) in scene.graph.edges().iter().zip(ranks) {
        let from = scene.world_position(edge.source, network);
        let to = scene.world_position(edge.target, network);
        let anchor = if edge.source == edge.target {
            from + Vec2::new(0.0, network.node_radius * 2.5 + network.edge_label_font_size * rank as f32)
        } else {
            edge_label_anchor(from, to, rank, network.edge_label_font_size)
        };

        commands.spawn((
            Text2dBundle {
                text: Text::from_section(
                    edge.connection.weight_label(),
                    TextStyle {
                        font_size: network.edge_label_font_size,
                        color: Color::srgb(0.6, 0.1, 0.1),
                        ..default()
                    },
                )
                .with_justify(JustifyText::Center),
                transform: Transform::from_xyz(anchor.x, anchor.y, 3.0),
                ..default()
            },
            EdgeLabel,
        ));
    }
    tracing::debug!("Spawned {} edge labels", scene.graph.edge_count());
}

/// System drawing every connection as an arrow (or a loop for self-edges).
fn draw_edges(mut gizmos: Gizmos, scene: Res<NetworkScene>, config: Res<ViewerConfig>) {
    let network = &config.network;
    for edge in scene.graph.edges() {
        let from = scene.world_position(edge.source, network);
        if edge.source == edge.target {
            let radius = network.node_radius * 0.75;
            gizmos.circle_2d(from + Vec2::new(0.0, network.node_radius + radius * 0.5), radius, EDGE_COLOR);
            continue;
        }

        let to = scene.world_position(edge.target, network);
        if let Some((start, end)) = edge_segment(from, to, network.node_radius) {
            gizmos
                .arrow_2d(start, end, EDGE_COLOR)
                .with_tip_length(ARROW_TIP);
        }
    }
}
