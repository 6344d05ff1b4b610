//! Window plugin shared by every viewer.

use bevy::prelude::*;

use crate::camera::CameraPlugin;
use crate::config::WindowConfig;

/// Base plugin for a viewer window.
///
/// Sets up the window from the configuration, a white background, and
/// camera controls. Logging goes through the `tracing` subscriber
/// installed by the binary, so Bevy's own log plugin is disabled.
pub struct ViewerWindowPlugin {
    pub window: WindowConfig,
}

impl ViewerWindowPlugin {
    pub fn new(window: WindowConfig) -> Self {
        Self { window }
    }
}

impl Plugin for ViewerWindowPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: self.window.title.clone(),
                        resolution: (self.window.width, self.window.height).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()) // Pixel-perfect cells
                .disable::<bevy::log::LogPlugin>(),
        )
        .insert_resource(ClearColor(Color::WHITE))
        .add_plugins(CameraPlugin);
    }
}
