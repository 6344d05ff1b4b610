//! Visualization layer: Bevy-based grid and neural network viewers.

pub mod camera;
pub mod cli;
pub mod config;
pub mod error;
pub mod grid_view;
pub mod layout;
pub mod network_view;
pub mod plugin;
pub mod runner;
pub mod screensaver;
pub mod texture;

pub use config::{ConfigError, ViewerConfig};
pub use error::ViewerError;
pub use layout::SpringLayout;
pub use plugin::ViewerWindowPlugin;
pub use runner::{animate, animate_frames, draw_network, show_network, show_static};
