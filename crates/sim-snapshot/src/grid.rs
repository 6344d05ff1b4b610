//! Grid snapshot: the full set of cells at one simulation time step.

use std::collections::HashMap;

use crate::appearance::{resolve_appearance, CellAppearance, Rgb};
use crate::cell::Cell;
use crate::pixels::PixelBuffer;

/// Largest width or height a grid may have, in cells.
///
/// Matches the maximum 2-D texture size the viewers can upload.
pub const MAX_GRID_SIDE: u32 = 8192;

/// Immutable snapshot of the simulation grid.
///
/// Width and height are derived from the largest observed coordinates, so the
/// table may omit cells; omitted cells render as empty ground.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: Vec<Cell>,
    width: u32,
    height: u32,
}

/// Per-flag cell counts for one snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridSummary {
    pub cells: usize,
    pub creatures: usize,
    pub food: usize,
    pub poison: usize,
    pub walls: usize,
    pub sunlit: usize,
    pub water: usize,
}

impl Grid {
    /// Builds a grid from validated cells, kept in table row order.
    pub fn from_cells(cells: Vec<Cell>) -> Self {
        let width = cells.iter().map(|c| c.x.saturating_add(1)).max().unwrap_or(1);
        let height = cells.iter().map(|c| c.y.saturating_add(1)).max().unwrap_or(1);
        Self {
            cells,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Cells in table row order, duplicates included.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Resolved appearance for every listed cell, in row order.
    pub fn appearances(&self) -> impl Iterator<Item = (&Cell, CellAppearance)> + '_ {
        self.cells.iter().map(|cell| (cell, resolve_appearance(cell)))
    }

    /// The cells actually drawn: one per coordinate, taken from the last row
    /// listing it, in row order.
    pub fn visible_cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        let mut last_row = HashMap::with_capacity(self.cells.len());
        for (i, cell) in self.cells.iter().enumerate() {
            last_row.insert((cell.x, cell.y), i);
        }
        self.cells
            .iter()
            .enumerate()
            .filter(move |(i, cell)| last_row.get(&(cell.x, cell.y)) == Some(i))
            .map(|(_, cell)| cell)
    }

    /// Resolved appearance of every visible cell, in row order.
    pub fn visible_appearances(&self) -> impl Iterator<Item = (&Cell, CellAppearance)> + '_ {
        self.visible_cells().map(|cell| (cell, resolve_appearance(cell)))
    }

    /// One sentence per occupied cell, in row order.
    pub fn describe_creatures(&self) -> Vec<String> {
        self.cells.iter().filter_map(Cell::describe).collect()
    }

    /// Renders the grid into a pixel buffer, one pixel per cell.
    ///
    /// Unlisted cells stay white; a repeated coordinate keeps the colour of
    /// its last row.
    pub fn to_image(&self) -> PixelBuffer {
        let mut image = PixelBuffer::filled(self.width, self.height, Rgb::WHITE);
        for (cell, appearance) in self.visible_appearances() {
            image.set(cell.y, cell.x, appearance.colour.rgb());
        }
        image
    }

    /// Counts occupied and flagged cells.
    pub fn summary(&self) -> GridSummary {
        self.cells.iter().fold(
            GridSummary {
                cells: self.cells.len(),
                ..GridSummary::default()
            },
            |mut summary, cell| {
                summary.creatures += usize::from(cell.is_occupied());
                summary.food += usize::from(cell.food);
                summary.poison += usize::from(cell.poison);
                summary.walls += usize::from(cell.wall);
                summary.sunlit += usize::from(cell.sunlit);
                summary.water += usize::from(cell.water);
                summary
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appearance::{CellColour, CellLabel, Glyph};

    fn sample_grid() -> Grid {
        Grid::from_cells(vec![
            Cell::new(0, 0).with_wall(),
            Cell::new(1, 0).with_food(),
            Cell::new(0, 1).with_creature(7),
        ])
    }

    #[test]
    fn test_dimensions_from_maxima() {
        let grid = sample_grid();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 2);
    }

    #[test]
    fn test_empty_grid_is_one_by_one_white() {
        let grid = Grid::from_cells(Vec::new());
        assert_eq!((grid.width(), grid.height()), (1, 1));

        let image = grid.to_image();
        assert_eq!((image.width(), image.height()), (1, 1));
        assert_eq!(image.get(0, 0), Some(Rgb::WHITE));
    }

    #[test]
    fn test_sample_appearances() {
        let grid = sample_grid();
        let resolved: Vec<CellAppearance> = grid.appearances().map(|(_, a)| a).collect();
        assert_eq!(
            resolved,
            vec![
                CellAppearance {
                    colour: CellColour::Black,
                    label: CellLabel::Wall,
                },
                CellAppearance {
                    colour: CellColour::Green,
                    label: CellLabel::Glyph(Glyph::Apple),
                },
                CellAppearance {
                    colour: CellColour::Red,
                    label: CellLabel::Creature(7),
                },
            ]
        );
    }

    #[test]
    fn test_image_maps_y_to_row() {
        let image = sample_grid().to_image();
        assert_eq!(image.get(0, 0), Some(CellColour::Black.rgb()));
        assert_eq!(image.get(0, 1), Some(CellColour::Green.rgb()));
        assert_eq!(image.get(1, 0), Some(CellColour::Red.rgb()));
        assert_eq!(image.get(1, 1), Some(Rgb::WHITE));
    }

    #[test]
    fn test_duplicate_coordinate_last_write_wins() {
        let grid = Grid::from_cells(vec![
            Cell::new(0, 0).with_water(),
            Cell::new(0, 0).with_poison(),
        ]);
        assert_eq!(grid.to_image().get(0, 0), Some(CellColour::Magenta.rgb()));
    }

    #[test]
    fn test_visible_cells_keep_last_row_per_coordinate() {
        let grid = Grid::from_cells(vec![
            Cell::new(0, 0).with_water(),
            Cell::new(1, 0).with_food(),
            Cell::new(0, 0).with_poison(),
        ]);
        let visible: Vec<&Cell> = grid.visible_cells().collect();
        assert_eq!(visible.len(), 2);
        assert!(visible[0].food);
        assert!(visible[1].poison && !visible[1].water);

        let labels: Vec<CellLabel> = grid.visible_appearances().map(|(_, a)| a.label).collect();
        assert_eq!(
            labels,
            vec![CellLabel::Glyph(Glyph::Apple), CellLabel::Glyph(Glyph::Skull)]
        );
    }

    #[test]
    fn test_describe_creatures_in_row_order() {
        let grid = Grid::from_cells(vec![
            Cell::new(3, 0).with_creature(2).with_water(),
            Cell::new(1, 1).with_food(),
            Cell::new(0, 2).with_creature(1),
        ]);
        assert_eq!(
            grid.describe_creatures(),
            vec![
                "Creature 2 at (3, 0) is in water.".to_string(),
                "Creature 1 at (0, 2) is on empty ground.".to_string(),
            ]
        );
    }

    #[test]
    fn test_summary_counts() {
        let summary = sample_grid().summary();
        assert_eq!(summary.cells, 3);
        assert_eq!(summary.creatures, 1);
        assert_eq!(summary.walls, 1);
        assert_eq!(summary.food, 1);
        assert_eq!(summary.water, 0);
    }
}
