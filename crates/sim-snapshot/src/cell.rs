//! Cell Types
//!
//! One grid square's attribute record, plus the raw CSV row it is parsed from.
//!
//! The grid table exported by the simulation has the columns
//! `X,Y,Occupied,Food,Poison,Wall,Sunlit,Water,CreatureID`.

use serde::de::{self, Deserializer};
use serde::Deserialize;

use crate::error::SnapshotError;

/// Columns the grid table must carry.
pub const GRID_COLUMNS: [&str; 9] = [
    "X",
    "Y",
    "Occupied",
    "Food",
    "Poison",
    "Wall",
    "Sunlit",
    "Water",
    "CreatureID",
];

/// A single grid square at one time step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    pub x: u32,
    pub y: u32,
    /// Id of the creature standing here. `Some` iff the cell is occupied.
    pub creature_id: Option<u32>,
    pub food: bool,
    pub poison: bool,
    pub wall: bool,
    pub sunlit: bool,
    pub water: bool,
}

impl Cell {
    /// Creates an empty cell at the given coordinate.
    pub fn new(x: u32, y: u32) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    /// Places a creature on the cell.
    pub fn with_creature(mut self, creature_id: u32) -> Self {
        self.creature_id = Some(creature_id);
        self
    }

    pub fn with_food(mut self) -> Self {
        self.food = true;
        self
    }

    pub fn with_poison(mut self) -> Self {
        self.poison = true;
        self
    }

    pub fn with_wall(mut self) -> Self {
        self.wall = true;
        self
    }

    pub fn with_sunlight(mut self) -> Self {
        self.sunlit = true;
        self
    }

    pub fn with_water(mut self) -> Self {
        self.water = true;
        self
    }

    /// Whether a creature occupies this cell.
    pub fn is_occupied(&self) -> bool {
        self.creature_id.is_some()
    }

    /// Human-readable situation of whatever stands on this cell.
    ///
    /// Joins every true flag with "and", or "on empty ground" when none apply.
    pub fn situation(&self) -> String {
        let parts: Vec<&str> = [
            (self.food, "eating food"),
            (self.poison, "standing on poison"),
            (self.water, "in water"),
            (self.sunlit, "in the sun"),
            (self.wall, "up against a wall"),
        ]
        .iter()
        .filter(|(flag, _)| *flag)
        .map(|(_, phrase)| *phrase)
        .collect();

        if parts.is_empty() {
            "on empty ground".to_string()
        } else {
            parts.join(" and ")
        }
    }

    /// One sentence describing the creature on this cell, if any.
    pub fn describe(&self) -> Option<String> {
        self.creature_id.map(|id| {
            format!(
                "Creature {} at ({}, {}) is {}.",
                id,
                self.x,
                self.y,
                self.situation()
            )
        })
    }
}

/// Raw grid row as it appears in the CSV export.
#[derive(Debug, Clone, Deserialize)]
pub struct CellRecord {
    #[serde(rename = "X")]
    pub x: i64,
    #[serde(rename = "Y")]
    pub y: i64,
    #[serde(rename = "Occupied", deserialize_with = "deserialize_flag")]
    pub occupied: bool,
    #[serde(rename = "Food", deserialize_with = "deserialize_flag")]
    pub food: bool,
    #[serde(rename = "Poison", deserialize_with = "deserialize_flag")]
    pub poison: bool,
    #[serde(rename = "Wall", deserialize_with = "deserialize_flag")]
    pub wall: bool,
    #[serde(rename = "Sunlit", deserialize_with = "deserialize_flag")]
    pub sunlit: bool,
    #[serde(rename = "Water", deserialize_with = "deserialize_flag")]
    pub water: bool,
    #[serde(rename = "CreatureID", default)]
    pub creature_id: Option<i64>,
}

impl CellRecord {
    /// Validates the raw row and converts it into a [`Cell`].
    ///
    /// `row` is the 1-based data row, used only for error messages.
    pub fn into_cell(self, origin: &str, row: usize) -> Result<Cell, SnapshotError> {
        let x = coordinate(self.x, "X", origin, row)?;
        let y = coordinate(self.y, "Y", origin, row)?;

        let creature_id = if self.occupied {
            let raw = self.creature_id.ok_or_else(|| {
                SnapshotError::schema(origin, format!("row {row}: occupied cell has no CreatureID"))
            })?;
            let id = u32::try_from(raw).map_err(|_| {
                SnapshotError::schema(origin, format!("row {row}: invalid CreatureID {raw}"))
            })?;
            Some(id)
        } else {
            None
        };

        Ok(Cell {
            x,
            y,
            creature_id,
            food: self.food,
            poison: self.poison,
            wall: self.wall,
            sunlit: self.sunlit,
            water: self.water,
        })
    }
}

fn coordinate(value: i64, column: &str, origin: &str, row: usize) -> Result<u32, SnapshotError> {
    u32::try_from(value).map_err(|_| {
        SnapshotError::schema(
            origin,
            format!("row {row}: {column} coordinate {value} is out of range"),
        )
    })
}

/// Parses a boolean flag written as `0/1` or `true/false`.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_flag(&raw).ok_or_else(|| {
        de::Error::custom(format!("invalid flag {raw:?}, expected 0/1 or true/false"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(x: i64, y: i64) -> CellRecord {
        CellRecord {
            x,
            y,
            occupied: false,
            food: false,
            poison: false,
            wall: false,
            sunlit: false,
            water: false,
            creature_id: None,
        }
    }

    #[test]
    fn test_parse_flag_variants() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("True"), Some(true));
        assert_eq!(parse_flag(" false "), Some(false));
        assert_eq!(parse_flag("yes"), None);
        assert_eq!(parse_flag(""), None);
    }

    #[test]
    fn test_situation_empty_ground() {
        let cell = Cell::new(0, 0).with_creature(1);
        assert_eq!(cell.situation(), "on empty ground");
    }

    #[test]
    fn test_situation_joins_in_fixed_order() {
        let cell = Cell::new(0, 0)
            .with_creature(1)
            .with_wall()
            .with_sunlight()
            .with_food();
        assert_eq!(
            cell.situation(),
            "eating food and in the sun and up against a wall"
        );
    }

    #[test]
    fn test_describe_sunlit_creature() {
        let cell = Cell::new(2, 3).with_creature(5).with_sunlight();
        assert_eq!(
            cell.describe().as_deref(),
            Some("Creature 5 at (2, 3) is in the sun.")
        );
    }

    #[test]
    fn test_describe_unoccupied_is_none() {
        let cell = Cell::new(1, 1).with_food();
        assert_eq!(cell.describe(), None);
    }

    #[test]
    fn test_record_negative_coordinate_rejected() {
        let err = record(-1, 0).into_cell("grid.csv", 4).unwrap_err();
        assert!(err.is_schema());
        assert!(err.to_string().contains("row 4"));
    }

    #[test]
    fn test_record_occupied_without_id_rejected() {
        let mut raw = record(0, 0);
        raw.occupied = true;
        assert!(raw.into_cell("grid.csv", 1).unwrap_err().is_schema());
    }

    #[test]
    fn test_record_unoccupied_ignores_creature_id() {
        let mut raw = record(3, 4);
        raw.creature_id = Some(0);
        let cell = raw.into_cell("grid.csv", 1).unwrap();
        assert_eq!(cell.creature_id, None);
        assert_eq!((cell.x, cell.y), (3, 4));
    }
}
