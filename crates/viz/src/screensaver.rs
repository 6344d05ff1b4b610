//! Looping playback of a snapshot sequence.
//!
//! Every grid is rasterised to a texture once at startup. A repeating timer
//! then swaps the texture on a single sprite, wrapping from the last frame
//! back to the first until the window is closed.

use std::time::Duration;

use bevy::prelude::*;
use sim_snapshot::{Grid, PixelBuffer, Rgb, SnapshotSequence};

use crate::camera::PlayPauseEvent;
use crate::grid_view::{draw_gridlines, spawn_image_sprite, GridGeometry, GridImage};
use crate::texture::image_from_pixels;

/// Plugin for looping playback of the [`ScreensaverFrames`] resource.
pub struct ScreensaverPlugin;

impl Plugin for ScreensaverPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (prepare_frames, spawn_status_text))
            .add_systems(
                Update,
                (toggle_playback, advance_frames, update_status_text).chain(),
            )
            .add_systems(Update, draw_gridlines);
    }
}

/// The sequence being played.
#[derive(Resource, Debug, Clone)]
pub struct ScreensaverFrames {
    pub sequence: SnapshotSequence,
}

/// Texture handles for every frame, in playback order.
#[derive(Resource, Debug, Default)]
pub struct FrameTextures {
    pub handles: Vec<Handle<Image>>,
}

/// Playback position and timing.
#[derive(Resource, Debug)]
pub struct Playback {
    timer: Timer,
    frame: usize,
    frame_count: usize,
    paused: bool,
}

impl Playback {
    /// Starts at frame 0, advancing once per `interval`.
    pub fn new(frame_count: usize, interval: Duration) -> Self {
        Self {
            timer: Timer::new(interval, TimerMode::Repeating),
            frame: 0,
            frame_count: frame_count.max(1),
            paused: false,
        }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Advances the clock. Returns true if the shown frame changed.
    ///
    /// Several elapsed intervals in one tick skip ahead by that many frames.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if self.paused {
            return false;
        }
        self.timer.tick(delta);
        let steps = self.timer.times_finished_this_tick() as usize;
        if steps == 0 {
            return false;
        }
        let next = (self.frame + steps) % self.frame_count;
        let changed = next != self.frame;
        self.frame = next;
        changed
    }

    /// Status line such as `frame 2/5`.
    pub fn status(&self) -> String {
        let status = format!("frame {}/{}", self.frame + 1, self.frame_count);
        if self.paused {
            format!("{status} (paused)")
        } else {
            status
        }
    }
}

/// Rasterises `grid` onto a white `width × height` canvas.
///
/// Frames smaller than the sequence bounds keep their top-left alignment
/// instead of being stretched.
pub fn frame_pixels(grid: &Grid, width: u32, height: u32) -> PixelBuffer {
    let source = grid.to_image();
    let mut canvas = PixelBuffer::filled(width, height, Rgb::WHITE);
    for row in 0..source.height().min(height) {
        for col in 0..source.width().min(width) {
            if let Some(colour) = source.get(row, col) {
                canvas.set(row, col, colour);
            }
        }
    }
    canvas
}

fn prepare_frames(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    frames: Res<ScreensaverFrames>,
    geometry: Res<GridGeometry>,
) {
    let handles: Vec<Handle<Image>> = frames
        .sequence
        .frames()
        .iter()
        .map(|grid| images.add(image_from_pixels(&frame_pixels(grid, geometry.width, geometry.height))))
        .collect();

    if let Some(first) = handles.first() {
        spawn_image_sprite(&mut commands, first.clone(), &geometry);
    }
    tracing::info!(
        "Prepared {} frames at {}x{} cells",
        handles.len(),
        geometry.width,
        geometry.height
    );
    commands.insert_resource(FrameTextures { handles });
}

/// Marker for the frame counter text.
#[derive(Component)]
pub struct StatusText;

fn spawn_status_text(mut commands: Commands, playback: Res<Playback>) {
    commands.spawn((
        TextBundle::from_section(
            playback.status(),
            TextStyle {
                font_size: 16.0,
                color: Color::BLACK,
                ..default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            bottom: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        }),
        StatusText,
    ));
}

fn toggle_playback(mut events: EventReader<PlayPauseEvent>, mut playback: ResMut<Playback>) {
    for _ in events.read() {
        playback.toggle_pause();
        tracing::info!(
            "Playback {} at {}",
            if playback.is_paused() { "paused" } else { "resumed" },
            playback.status()
        );
    }
}

fn advance_frames(
    time: Res<Time>,
    mut playback: ResMut<Playback>,
    textures: Option<Res<FrameTextures>>,
    mut sprites: Query<&mut Handle<Image>, With<GridImage>>,
) {
    let Some(textures) = textures else {
        return;
    };
    if !playback.tick(time.delta()) {
        return;
    }
    let Some(handle) = textures.handles.get(playback.frame()) else {
        return;
    };
    for mut texture in sprites.iter_mut() {
        *texture = handle.clone();
    }
}

fn update_status_text(playback: Res<Playback>, mut texts: Query<&mut Text, With<StatusText>>) {
    if !playback.is_changed() {
        return;
    }
    for mut text in texts.iter_mut() {
        if let Some(section) = text.sections.first_mut() {
            section.value = playback.status();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_snapshot::{Cell, CellColour};

    const MS_200: Duration = Duration::from_millis(200);

    #[test]
    fn test_playback_advances_on_interval() {
        let mut playback = Playback::new(3, MS_200);
        assert!(!playback.tick(Duration::from_millis(150)));
        assert_eq!(playback.frame(), 0);
        assert!(playback.tick(Duration::from_millis(60)));
        assert_eq!(playback.frame(), 1);
    }

    #[test]
    fn test_playback_wraps_to_first_frame() {
        let mut playback = Playback::new(3, MS_200);
        let frames: Vec<usize> = (0..5)
            .map(|_| {
                playback.tick(MS_200);
                playback.frame()
            })
            .collect();
        assert_eq!(frames, vec![1, 2, 0, 1, 2]);
    }

    #[test]
    fn test_single_frame_loops_in_place() {
        let mut playback = Playback::new(1, MS_200);
        for _ in 0..4 {
            assert!(!playback.tick(MS_200));
            assert_eq!(playback.frame(), 0);
        }
    }

    #[test]
    fn test_long_tick_skips_frames() {
        let mut playback = Playback::new(4, MS_200);
        playback.tick(Duration::from_millis(600));
        assert_eq!(playback.frame(), 3);
    }

    #[test]
    fn test_paused_playback_holds_frame() {
        let mut playback = Playback::new(3, MS_200);
        playback.toggle_pause();
        assert!(!playback.tick(Duration::from_secs(5)));
        assert_eq!(playback.frame(), 0);
        assert_eq!(playback.status(), "frame 1/3 (paused)");

        playback.toggle_pause();
        playback.tick(MS_200);
        assert_eq!(playback.status(), "frame 2/3");
    }

    #[test]
    fn test_frame_pixels_pads_smaller_frames() {
        let grid = Grid::from_cells(vec![Cell::new(0, 0).with_water()]);
        let canvas = frame_pixels(&grid, 3, 2);

        assert_eq!((canvas.width(), canvas.height()), (3, 2));
        assert_eq!(canvas.get(0, 0), Some(CellColour::Blue.rgb()));
        assert_eq!(canvas.get(1, 2), Some(Rgb::WHITE));
    }
}
