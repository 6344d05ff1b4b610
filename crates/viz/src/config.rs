//! Configuration loading for the viewers.
//!
//! All viewer settings can be loaded from a TOML configuration file. Every
//! section and key is optional; anything left out keeps its default.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Complete viewer configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Resource)]
pub struct ViewerConfig {
    /// Window settings
    #[serde(default)]
    pub window: WindowConfig,
    /// Static grid view settings
    #[serde(default)]
    pub grid: GridViewConfig,
    /// Screensaver playback settings
    #[serde(default)]
    pub animation: AnimationConfig,
    /// Neural network view settings
    #[serde(default)]
    pub network: NetworkViewConfig,
}

impl ViewerConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads the given file, or the defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                let config = Self::from_file(path)?;
                tracing::info!("Loaded viewer config from {:?}", path);
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Serializes the configuration as pretty TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Window configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Initial width in logical pixels
    pub width: f32,
    /// Initial height in logical pixels
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Simulation Viewer".to_string(),
            width: 1024.0,
            height: 768.0,
        }
    }
}

/// Static grid view configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridViewConfig {
    /// Side length of one cell in world units
    pub cell_size: f32,
    /// Font size of cell labels
    pub label_font_size: f32,
    /// Gridline colour as RGB in [0, 1]
    pub gridline_color: [f32; 3],
    /// Show the colour legend
    pub show_legend: bool,
    /// Optional font asset for labels (e.g. one with emoji coverage)
    pub label_font: Option<String>,
}

impl Default for GridViewConfig {
    fn default() -> Self {
        Self {
            cell_size: 48.0,
            label_font_size: 14.0,
            gridline_color: [0.5, 0.5, 0.5],
            show_legend: true,
            label_font: None,
        }
    }
}

impl GridViewConfig {
    pub fn gridline_color(&self) -> Color {
        let [r, g, b] = self.gridline_color;
        Color::srgb(r, g, b)
    }
}

/// Screensaver playback configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Delay between frames in milliseconds
    pub interval_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self { interval_ms: 200 }
    }
}

impl AnimationConfig {
    /// Frame interval, never shorter than one millisecond.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }
}

/// Neural network view configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkViewConfig {
    /// Optimal node distance of the spring layout (repulsion strength)
    pub k: f32,
    /// Largest absolute layout coordinate
    pub scale: f32,
    /// Spring layout iterations
    pub iterations: usize,
    /// Fixed layout seed; random when unset
    pub seed: Option<u64>,
    /// World units per layout unit
    pub pixels_per_unit: f32,
    /// Node circle radius in world units
    pub node_radius: f32,
    /// Font size of node labels
    pub label_font_size: f32,
    /// Font size of edge weight labels
    pub edge_label_font_size: f32,
}

impl Default for NetworkViewConfig {
    fn default() -> Self {
        Self {
            k: 2.0,
            scale: 2.0,
            iterations: 50,
            seed: None,
            pixels_per_unit: 150.0,
            node_radius: 24.0,
            label_font_size: 12.0,
            edge_label_font_size: 14.0,
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Error parsing TOML config
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// Error serializing TOML config
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}
