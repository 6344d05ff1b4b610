//! Camera system: fitted 2-D view, pan/zoom input, and window shortcuts.

use bevy::app::AppExit;
use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;

/// Plugin for camera control and viewer-wide keyboard shortcuts.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraController>()
            .init_resource::<CameraConstraints>()
            .init_resource::<ViewBounds>()
            .add_event::<PlayPauseEvent>()
            .add_systems(Startup, setup_camera)
            .add_systems(
                Update,
                (
                    handle_camera_input,
                    handle_keyboard_input,
                    update_camera_transition,
                    apply_camera_to_transform,
                )
                    .chain(),
            );
    }
}

/// Event emitted when play/pause is toggled.
#[derive(Event)]
pub struct PlayPauseEvent;

/// Size of the drawn content in world units, centred on the origin.
///
/// Each view inserts this before the app starts so the camera can frame it.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct ViewBounds {
    pub size: Vec2,
}

impl Default for ViewBounds {
    fn default() -> Self {
        Self {
            size: Vec2::new(800.0, 600.0),
        }
    }
}

/// Main camera controller resource.
#[derive(Resource, Debug)]
pub struct CameraController {
    /// Current camera position in world coordinates.
    pub position: Vec2,
    /// Current zoom level (1.0 = one world unit per logical pixel).
    pub zoom: f32,
    /// Zoom that frames the whole content; restored by Home.
    pub fitted_zoom: f32,
    /// Active camera transition, if any.
    pub transition: Option<CameraTransition>,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: 1.0,
            fitted_zoom: 1.0,
            transition: None,
        }
    }
}

impl CameraController {
    /// Begin a smooth transition to a new position and zoom.
    pub fn begin_transition(&mut self, to_pos: Vec2, to_zoom: f32, duration: f32) {
        self.transition = Some(CameraTransition {
            from_pos: self.position,
            to_pos,
            from_zoom: self.zoom,
            to_zoom,
            duration,
            elapsed: 0.0,
        });
    }

    /// Smoothly return to the fitted overview.
    pub fn reset_view(&mut self) {
        let zoom = self.fitted_zoom;
        self.begin_transition(Vec2::ZERO, zoom, 0.4);
    }
}

/// Active camera transition state.
#[derive(Clone, Debug)]
pub struct CameraTransition {
    pub from_pos: Vec2,
    pub to_pos: Vec2,
    pub from_zoom: f32,
    pub to_zoom: f32,
    /// Total duration in seconds.
    pub duration: f32,
    /// Time elapsed so far.
    pub elapsed: f32,
}

impl CameraTransition {
    /// Get the progress of this transition (0.0 to 1.0).
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn current_position(&self) -> Vec2 {
        self.from_pos.lerp(self.to_pos, ease_in_out(self.progress()))
    }

    pub fn current_zoom(&self) -> f32 {
        let t = ease_in_out(self.progress());
        self.from_zoom + (self.to_zoom - self.from_zoom) * t
    }
}

/// Smooth ease-in-out function for transitions.
pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Zoom at which `content` fits inside `window` with a margin on each side.
pub fn fit_zoom(content: Vec2, window: Vec2, margin: f32) -> f32 {
    let available = (window - Vec2::splat(2.0 * margin)).max(Vec2::ONE);
    let content = content.max(Vec2::ONE);
    (available / content).min_element()
}

/// Camera constraints for zooming and panning.
#[derive(Resource)]
pub struct CameraConstraints {
    /// Minimum zoom relative to the fitted zoom.
    pub min_zoom_factor: f32,
    /// Maximum zoom relative to the fitted zoom.
    pub max_zoom_factor: f32,
}

impl Default for CameraConstraints {
    fn default() -> Self {
        Self {
            min_zoom_factor: 0.25,
            max_zoom_factor: 8.0,
        }
    }
}

impl CameraConstraints {
    /// Clamp a zoom value to the range allowed around the fitted zoom.
    pub fn clamp_zoom(&self, zoom: f32, fitted: f32) -> f32 {
        zoom.clamp(fitted * self.min_zoom_factor, fitted * self.max_zoom_factor)
    }
}

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// System to spawn the camera and frame the content.
fn setup_camera(
    mut commands: Commands,
    mut controller: ResMut<CameraController>,
    bounds: Res<ViewBounds>,
    windows: Query<&Window>,
) {
    commands.spawn((Camera2dBundle::default(), MainCamera));

    if let Ok(window) = windows.get_single() {
        let zoom = fit_zoom(bounds.size, Vec2::new(window.width(), window.height()), 40.0);
        controller.zoom = zoom;
        controller.fitted_zoom = zoom;
        tracing::debug!("Fitted camera zoom {:.3} for content {:?}", zoom, bounds.size);
    }
}

/// System to handle mouse pan (right/middle drag) and wheel zoom.
fn handle_camera_input(
    mut controller: ResMut<CameraController>,
    constraints: Res<CameraConstraints>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll: EventReader<MouseWheel>,
    windows: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
) {
    let is_panning =
        mouse_button.pressed(MouseButton::Right) || mouse_button.pressed(MouseButton::Middle);

    if is_panning {
        let delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
        if delta != Vec2::ZERO {
            let pan_speed = 1.0 / controller.zoom;
            controller.position -= Vec2::new(delta.x, -delta.y) * pan_speed;
            controller.transition = None;
        }
    } else {
        mouse_motion.clear();
    }

    let cursor_world = windows
        .get_single()
        .ok()
        .and_then(|window| window.cursor_position())
        .and_then(|cursor| {
            let (camera, transform) = camera_query.get_single().ok()?;
            camera.viewport_to_world_2d(transform, cursor)
        });

    for ev in scroll.read() {
        let old_zoom = controller.zoom;
        let new_zoom = constraints.clamp_zoom(old_zoom * (1.0 + ev.y * 0.1), controller.fitted_zoom);

        // Keep the point under the cursor fixed while zooming.
        if let Some(world_pos) = cursor_world {
            let offset = world_pos - controller.position;
            controller.position = world_pos - offset * (old_zoom / new_zoom);
        }
        controller.zoom = new_zoom;
        controller.transition = None;
    }
}

/// System to handle keyboard input: arrows pan, +/- zoom, Home resets,
/// Space toggles playback, Escape closes the viewer.
fn handle_keyboard_input(
    mut controller: ResMut<CameraController>,
    constraints: Res<CameraConstraints>,
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut play_pause_events: EventWriter<PlayPauseEvent>,
    mut exit_events: EventWriter<AppExit>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        tracing::info!("Escape pressed, closing viewer");
        exit_events.send(AppExit::Success);
        return;
    }

    let shift_held = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);
    let base_pan_speed = if shift_held { 800.0 } else { 400.0 };
    let pan_speed = base_pan_speed / controller.zoom * time.delta_seconds();

    let mut pan_delta = Vec2::ZERO;
    if keyboard.pressed(KeyCode::ArrowLeft) {
        pan_delta.x -= pan_speed;
    }
    if keyboard.pressed(KeyCode::ArrowRight) {
        pan_delta.x += pan_speed;
    }
    if keyboard.pressed(KeyCode::ArrowUp) {
        pan_delta.y += pan_speed;
    }
    if keyboard.pressed(KeyCode::ArrowDown) {
        pan_delta.y -= pan_speed;
    }
    if pan_delta != Vec2::ZERO {
        controller.position += pan_delta;
        controller.transition = None;
    }

    if keyboard.just_pressed(KeyCode::Equal) {
        controller.zoom = constraints.clamp_zoom(controller.zoom * 1.25, controller.fitted_zoom);
    }
    if keyboard.just_pressed(KeyCode::Minus) {
        controller.zoom = constraints.clamp_zoom(controller.zoom / 1.25, controller.fitted_zoom);
    }

    if keyboard.just_pressed(KeyCode::Home) {
        controller.reset_view();
    }

    if keyboard.just_pressed(KeyCode::Space) {
        play_pause_events.send(PlayPauseEvent);
    }
}

/// System to advance an active camera transition.
fn update_camera_transition(mut controller: ResMut<CameraController>, time: Res<Time>) {
    let Some(mut transition) = controller.transition.take() else {
        return;
    };
    transition.elapsed += time.delta_seconds();

    if transition.is_complete() {
        controller.position = transition.to_pos;
        controller.zoom = transition.to_zoom;
    } else {
        controller.position = transition.current_position();
        controller.zoom = transition.current_zoom();
        controller.transition = Some(transition);
    }
}

/// System to apply camera controller state to the actual camera transform.
fn apply_camera_to_transform(
    controller: Res<CameraController>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    for mut transform in camera_query.iter_mut() {
        transform.translation.x = controller.position.x;
        transform.translation.y = controller.position.y;
        // Zoom is applied via scale (inverse relationship)
        let scale = 1.0 / controller.zoom;
        transform.scale = Vec3::new(scale, scale, 1.0);
    }
}
