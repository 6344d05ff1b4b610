//! Static grid view: cell image, labels, gridlines, and legend.

use bevy::prelude::*;
use sim_snapshot::{CellColour, CellLabel, Grid, LEGEND};

use crate::config::{GridViewConfig, ViewerConfig};
use crate::texture::{color_from_rgb, image_from_pixels};

/// Plugin that draws the [`GridScene`] resource once at startup.
pub struct GridViewPlugin;

impl Plugin for GridViewPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_grid_image, spawn_cell_labels, spawn_legend))
            .add_systems(Update, draw_gridlines);
    }
}

/// The grid being shown by the static view.
#[derive(Resource, Debug, Clone)]
pub struct GridScene {
    pub grid: Grid,
}

/// World-space placement of a `width × height` grid, centred on the origin.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub width: u32,
    pub height: u32,
    pub cell_size: f32,
}

impl GridGeometry {
    pub fn new(width: u32, height: u32, cell_size: f32) -> Self {
        Self {
            width,
            height,
            cell_size,
        }
    }

    pub fn for_grid(grid: &Grid, config: &GridViewConfig) -> Self {
        Self::new(grid.width(), grid.height(), config.cell_size)
    }

    /// Total size in world units.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * self.cell_size
    }

    /// Centre of cell `(x, y)`. Row 0 is the top row.
    pub fn cell_center(&self, x: u32, y: u32) -> Vec2 {
        let half = self.size() / 2.0;
        Vec2::new(
            (x as f32 + 0.5) * self.cell_size - half.x,
            half.y - (y as f32 + 0.5) * self.cell_size,
        )
    }

    /// Line segments along every cell boundary, verticals first.
    pub fn gridline_segments(&self) -> Vec<(Vec2, Vec2)> {
        let half = self.size() / 2.0;
        let verticals = (0..=self.width).map(|i| {
            let x = i as f32 * self.cell_size - half.x;
            (Vec2::new(x, -half.y), Vec2::new(x, half.y))
        });
        let horizontals = (0..=self.height).map(|j| {
            let y = half.y - j as f32 * self.cell_size;
            (Vec2::new(-half.x, y), Vec2::new(half.x, y))
        });
        verticals.chain(horizontals).collect()
    }
}

/// Marker for the sprite carrying the cell texture.
#[derive(Component)]
pub struct GridImage;

/// Marker for a cell label.
#[derive(Component)]
pub struct CellLabelText;

/// A label as it will be drawn: text, world position, and the colour of the
/// cell underneath.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLabel {
    pub text: String,
    pub position: Vec2,
    pub cell_colour: CellColour,
    /// True for pictographic labels that need an emoji-capable font.
    pub is_glyph: bool,
}

/// Labels for every visible cell, one per coordinate (the last listed row
/// wins), in row order. Unlabelled cells are skipped.
pub fn cell_labels(grid: &Grid, geometry: &GridGeometry) -> Vec<PlacedLabel> {
    grid.visible_appearances()
        .filter_map(|(cell, appearance)| {
            let text = appearance.label.text()?;
            Some(PlacedLabel {
                text,
                position: geometry.cell_center(cell.x, cell.y),
                cell_colour: appearance.colour,
                is_glyph: matches!(appearance.label, CellLabel::Glyph(_)),
            })
        })
        .collect()
}

/// Text colour that stays readable on the given cell colour.
pub fn label_color(colour: CellColour) -> Color {
    match colour {
        CellColour::Black | CellColour::Blue => Color::WHITE,
        _ => Color::BLACK,
    }
}

/// Spawns a sprite showing `image` stretched over the grid geometry.
pub fn spawn_image_sprite(
    commands: &mut Commands,
    texture: Handle<Image>,
    geometry: &GridGeometry,
) -> Entity {
    commands
        .spawn((
            SpriteBundle {
                sprite: Sprite {
                    custom_size: Some(geometry.size()),
                    ..default()
                },
                texture,
                transform: Transform::from_xyz(0.0, 0.0, 0.0),
                ..default()
            },
            GridImage,
        ))
        .id()
}

fn spawn_grid_image(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    scene: Res<GridScene>,
    geometry: Res<GridGeometry>,
) {
    let handle = images.add(image_from_pixels(&scene.grid.to_image()));
    spawn_image_sprite(&mut commands, handle, &geometry);
    tracing::info!(
        "Showing {}x{} grid ({} cells)",
        scene.grid.width(),
        scene.grid.height(),
        scene.grid.cells().len()
    );
}

fn spawn_cell_labels(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    scene: Res<GridScene>,
    geometry: Res<GridGeometry>,
    config: Res<ViewerConfig>,
) {
    let labels = cell_labels(&scene.grid, &geometry);
    let font: Handle<Font> = match config.grid.label_font.as_ref() {
        Some(path) => asset_server.load(path.clone()),
        None => {
            if labels.iter().any(|label| label.is_glyph) {
                tracing::warn!(
                    "No grid.label_font configured; the default font cannot draw the food, poison, water and sun glyphs"
                );
            }
            Handle::default()
        }
    };

    for label in &labels {
        commands.spawn((
            Text2dBundle {
                text: Text::from_section(
                    label.text.clone(),
                    TextStyle {
                        font: font.clone(),
                        font_size: config.grid.label_font_size,
                        color: label_color(label.cell_colour),
                    },
                )
                .with_justify(JustifyText::Center),
                transform: Transform::from_xyz(label.position.x, label.position.y, 1.0),
                ..default()
            },
            CellLabelText,
        ));
    }
    tracing::debug!("Spawned {} cell labels", labels.len());
}

fn spawn_legend(mut commands: Commands, config: Res<ViewerConfig>) {
    if !config.grid.show_legend {
        return;
    }

    // Legend container (top-right)
    commands
        .spawn(NodeBundle {
            style: Style {
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                right: Val::Px(10.0),
                padding: UiRect::all(Val::Px(8.0)),
                row_gap: Val::Px(4.0),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            background_color: Color::srgba(1.0, 1.0, 1.0, 0.9).into(),
            ..default()
        })
        .with_children(|parent| {
            for (colour, name) in LEGEND {
                parent
                    .spawn(NodeBundle {
                        style: Style {
                            flex_direction: FlexDirection::Row,
                            align_items: AlignItems::Center,
                            column_gap: Val::Px(6.0),
                            ..default()
                        },
                        ..default()
                    })
                    .with_children(|row| {
                        // Swatch
                        row.spawn(NodeBundle {
                            style: Style {
                                width: Val::Px(14.0),
                                height: Val::Px(14.0),
                                border: UiRect::all(Val::Px(1.0)),
                                ..default()
                            },
                            background_color: color_from_rgb(colour.rgb()).into(),
                            border_color: Color::BLACK.into(),
                            ..default()
                        });
                        row.spawn(TextBundle::from_section(
                            name,
                            TextStyle {
                                font_size: 14.0,
                                color: Color::BLACK,
                                ..default()
                            },
                        ));
                    });
            }
        });
}

/// System drawing the minor gridlines around every cell.
pub fn draw_gridlines(
    mut gizmos: Gizmos,
    geometry: Res<GridGeometry>,
    config: Res<ViewerConfig>,
) {
    let color = config.grid.gridline_color();
    for (start, end) in geometry.gridline_segments() {
        gizmos.line_2d(start, end, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_snapshot::{Cell, Glyph};

    #[test]
    fn test_cell_center_origin_is_top_left() {
        let geometry = GridGeometry::new(4, 2, 10.0);
        assert_eq!(geometry.size(), Vec2::new(40.0, 20.0));
        assert_eq!(geometry.cell_center(0, 0), Vec2::new(-15.0, 5.0));
        assert_eq!(geometry.cell_center(3, 1), Vec2::new(15.0, -5.0));
    }

    #[test]
    fn test_single_cell_centred_on_origin() {
        let geometry = GridGeometry::new(1, 1, 48.0);
        assert_eq!(geometry.cell_center(0, 0), Vec2::ZERO);
    }

    #[test]
    fn test_gridline_segments_cover_boundaries() {
        let geometry = GridGeometry::new(3, 2, 1.0);
        let segments = geometry.gridline_segments();
        assert_eq!(segments.len(), (3 + 1) + (2 + 1));

        // First and last vertical lines sit on the outer edges.
        assert_eq!(segments[0], (Vec2::new(-1.5, -1.0), Vec2::new(-1.5, 1.0)));
        assert_eq!(segments[3], (Vec2::new(1.5, -1.0), Vec2::new(1.5, 1.0)));
        // First horizontal line is the top edge.
        assert_eq!(segments[4], (Vec2::new(-1.5, 1.0), Vec2::new(1.5, 1.0)));
    }

    #[test]
    fn test_cell_labels_one_per_coordinate() {
        // Water then poison at (0, 0): only the poison label is drawn.
        let grid = Grid::from_cells(vec![
            Cell::new(0, 0).with_water(),
            Cell::new(1, 0),
            Cell::new(0, 0).with_poison(),
            Cell::new(1, 1).with_creature(4),
        ]);
        let geometry = GridGeometry::new(2, 2, 10.0);
        let labels = cell_labels(&grid, &geometry);

        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].text, Glyph::Skull.as_str());
        assert_eq!(labels[0].position, geometry.cell_center(0, 0));
        assert_eq!(labels[0].cell_colour, CellColour::Magenta);
        assert!(labels[0].is_glyph);

        assert_eq!(labels[1].text, "4");
        assert_eq!(labels[1].position, geometry.cell_center(1, 1));
        assert!(!labels[1].is_glyph);
    }

    #[test]
    fn test_cell_labels_wall_with_creature() {
        let grid = Grid::from_cells(vec![Cell::new(0, 0).with_wall().with_creature(9)]);
        let labels = cell_labels(&grid, &GridGeometry::new(1, 1, 48.0));
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].text, "9");
        assert_eq!(labels[0].cell_colour, CellColour::Black);
        assert_eq!(label_color(labels[0].cell_colour), Color::WHITE);
    }

    #[test]
    fn test_label_color_contrasts_dark_cells() {
        assert_eq!(label_color(CellColour::Black), Color::WHITE);
        assert_eq!(label_color(CellColour::Yellow), Color::BLACK);
    }
}
