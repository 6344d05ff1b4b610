//! Cell appearance resolution.
//!
//! Colour and label are resolved by two independent steps:
//!
//! 1. An ordered rule table picks the colour (and an environmental label).
//!    The first rule whose predicate holds wins.
//! 2. An occupancy override replaces the label with the creature id whenever
//!    the cell is occupied, regardless of which rule chose the colour.
//!
//! So an occupied wall is black but labelled with its creature, while an
//! occupied empty cell is red.

use std::fmt;

use crate::cell::Cell;

/// RGB colour with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Converts to 8-bit RGBA with full opacity.
    pub fn to_rgba8(self) -> [u8; 4] {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b), 255]
    }
}

/// The fixed palette a grid cell can be drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellColour {
    Black,
    Magenta,
    Green,
    Blue,
    Red,
    Yellow,
    White,
}

impl CellColour {
    pub fn rgb(self) -> Rgb {
        match self {
            CellColour::Black => Rgb::new(0.0, 0.0, 0.0),
            CellColour::Magenta => Rgb::new(1.0, 0.0, 1.0),
            CellColour::Green => Rgb::new(0.0, 1.0, 0.0),
            CellColour::Blue => Rgb::new(0.0, 0.0, 1.0),
            CellColour::Red => Rgb::new(1.0, 0.0, 0.0),
            CellColour::Yellow => Rgb::new(1.0, 1.0, 0.0),
            CellColour::White => Rgb::WHITE,
        }
    }
}

/// Pictographic labels for environmental features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    Skull,
    Apple,
    Droplet,
    Sun,
}

impl Glyph {
    pub fn as_str(self) -> &'static str {
        match self {
            Glyph::Skull => "\u{2620}",
            Glyph::Apple => "\u{1F34E}",
            Glyph::Droplet => "\u{1F4A7}",
            Glyph::Sun => "\u{2600}",
        }
    }
}

/// Text drawn on top of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellLabel {
    /// Nothing is drawn.
    None,
    /// The literal text "Wall".
    Wall,
    /// An environmental glyph.
    Glyph(Glyph),
    /// The id of the creature standing on the cell.
    Creature(u32),
}

impl CellLabel {
    /// Text to render, or `None` for unlabelled cells.
    pub fn text(&self) -> Option<String> {
        match self {
            CellLabel::None => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for CellLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellLabel::None => Ok(()),
            CellLabel::Wall => write!(f, "Wall"),
            CellLabel::Glyph(glyph) => write!(f, "{}", glyph.as_str()),
            CellLabel::Creature(id) => write!(f, "{}", id),
        }
    }
}

/// Resolved colour and label for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellAppearance {
    pub colour: CellColour,
    pub label: CellLabel,
}

struct AppearanceRule {
    applies: fn(&Cell) -> bool,
    colour: CellColour,
    label: CellLabel,
}

fn is_wall(cell: &Cell) -> bool {
    cell.wall
}

fn is_poison(cell: &Cell) -> bool {
    cell.poison
}

fn is_food(cell: &Cell) -> bool {
    cell.food
}

fn is_water(cell: &Cell) -> bool {
    cell.water
}

fn is_occupied(cell: &Cell) -> bool {
    cell.is_occupied()
}

fn is_sunlit(cell: &Cell) -> bool {
    cell.sunlit
}

/// Priority-ordered; first match wins.
static RULES: [AppearanceRule; 6] = [
    AppearanceRule {
        applies: is_wall,
        colour: CellColour::Black,
        label: CellLabel::Wall,
    },
    AppearanceRule {
        applies: is_poison,
        colour: CellColour::Magenta,
        label: CellLabel::Glyph(Glyph::Skull),
    },
    AppearanceRule {
        applies: is_food,
        colour: CellColour::Green,
        label: CellLabel::Glyph(Glyph::Apple),
    },
    AppearanceRule {
        applies: is_water,
        colour: CellColour::Blue,
        label: CellLabel::Glyph(Glyph::Droplet),
    },
    AppearanceRule {
        applies: is_occupied,
        colour: CellColour::Red,
        label: CellLabel::None,
    },
    AppearanceRule {
        applies: is_sunlit,
        colour: CellColour::Yellow,
        label: CellLabel::Glyph(Glyph::Sun),
    },
];

/// Resolves the colour and label a cell is drawn with.
pub fn resolve_appearance(cell: &Cell) -> CellAppearance {
    let (colour, label) = RULES
        .iter()
        .find(|rule| (rule.applies)(cell))
        .map(|rule| (rule.colour, rule.label))
        .unwrap_or((CellColour::White, CellLabel::None));

    // Occupancy always owns the label, even when another rule owns the colour.
    let label = match cell.creature_id {
        Some(id) => CellLabel::Creature(id),
        None => label,
    };

    CellAppearance { colour, label }
}

/// Legend entries shown next to the grid, in display order.
pub const LEGEND: [(CellColour, &str); 6] = [
    (CellColour::Red, "Creature"),
    (CellColour::Green, "Food"),
    (CellColour::Magenta, "Poison"),
    (CellColour::Blue, "Water"),
    (CellColour::Yellow, "Sunlit"),
    (CellColour::Black, "Wall"),
];
