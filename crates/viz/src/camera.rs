//! Camera system: orbit controller, transitions, and user input handling.

use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::panel::PanelRoot;

/// Plugin for camera control and movement.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraController>()
            .init_resource::<CameraConstraints>()
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

/// Initial camera position; the camera always looks at the origin.
pub const START_POSITION: Vec3 = Vec3::new(300.0, 300.0, 300.0);

/// Fraction of the remaining distance to the target covered per 60 Hz frame.
const DAMPING_FACTOR: f32 = 0.05;

/// Radians of orbit per pixel of mouse drag.
const ORBIT_SPEED: f32 = 0.005;

/// An orbit around the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orbit {
    /// Rotation around the vertical axis, in radians.
    pub yaw: f32,
    /// Elevation, in radians; negative looks down.
    pub pitch: f32,
    /// Distance from the origin.
    pub distance: f32,
}

impl Orbit {
    /// The orbit that places the camera at `position`.
    pub fn from_position(position: Vec3) -> Self {
        let distance = position.length();
        if distance <= f32::EPSILON {
            return Self {
                yaw: 0.0,
                pitch: 0.0,
                distance: 0.0,
            };
        }
        Self {
            yaw: position.x.atan2(position.z),
            pitch: -(position.y / distance).asin(),
            distance,
        }
    }

    /// Camera position for this orbit.
    pub fn position(&self) -> Vec3 {
        let rotation = Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0);
        rotation * Vec3::new(0.0, 0.0, self.distance)
    }

    /// Interpolate toward another orbit.
    pub fn lerp(&self, other: &Orbit, t: f32) -> Orbit {
        Orbit {
            yaw: self.yaw + (other.yaw - self.yaw) * t,
            pitch: self.pitch + (other.pitch - self.pitch) * t,
            distance: self.distance + (other.distance - self.distance) * t,
        }
    }
}

impl Default for Orbit {
    fn default() -> Self {
        Self::from_position(START_POSITION)
    }
}

/// Main camera controller resource.
#[derive(Resource, Default)]
pub struct CameraController {
    /// Orbit currently applied to the camera.
    pub current: Orbit,
    /// Orbit the camera is damped toward.
    pub target: Orbit,
    /// Active camera transition, if any.
    pub transition: Option<CameraTransition>,
}

impl CameraController {
    /// Begin a smooth transition to a new orbit.
    pub fn begin_transition(&mut self, to: Orbit, duration: f32) {
        self.transition = Some(CameraTransition {
            from: self.current,
            to,
            duration,
            elapsed: 0.0,
        });
    }

    /// Ease back to the starting view.
    pub fn reset(&mut self) {
        self.begin_transition(Orbit::default(), 0.5);
    }
}

/// Active camera transition state.
#[derive(Clone, Debug)]
pub struct CameraTransition {
    /// Starting orbit.
    pub from: Orbit,
    /// Target orbit.
    pub to: Orbit,
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

    /// Check if this transition is complete.
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Get the current orbit based on progress.
    pub fn current_orbit(&self) -> Orbit {
        self.from.lerp(&self.to, ease_in_out(self.progress()))
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

/// Camera constraints for orbiting and zooming.
#[derive(Resource)]
pub struct CameraConstraints {
    /// Closest distance to the origin.
    pub min_distance: f32,
    /// Farthest distance from the origin.
    pub max_distance: f32,
    /// Largest absolute pitch.
    pub max_pitch: f32,
}

impl Default for CameraConstraints {
    fn default() -> Self {
        Self {
            min_distance: 150.0,
            max_distance: 1500.0,
            max_pitch: FRAC_PI_2 - 0.05,
        }
    }
}

impl CameraConstraints {
    /// Clamp distance and pitch of an orbit.
    pub fn clamp(&self, orbit: Orbit) -> Orbit {
        Orbit {
            yaw: orbit.yaw,
            pitch: orbit.pitch.clamp(-self.max_pitch, self.max_pitch),
            distance: orbit.distance.clamp(self.min_distance, self.max_distance),
        }
    }
}

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// System to set up the camera on startup.
fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3dBundle {
            projection: PerspectiveProjection {
                fov: FRAC_PI_4,
                near: 0.1,
                far: 5000.0,
                ..default()
            }
            .into(),
            transform: Transform::from_translation(START_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
            ..default()
        },
        MainCamera,
    ));
}

/// System to handle mouse orbit and zoom.
fn handle_camera_input(
    mut controller: ResMut<CameraController>,
    constraints: Res<CameraConstraints>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll: EventReader<MouseWheel>,
    panel: Query<&Interaction, Or<(With<PanelRoot>, With<Button>)>>,
) {
    // Leave the mouse to the panel while it or a button is hovered
    if panel.iter().any(|i| *i != Interaction::None) {
        mouse_motion.clear();
        scroll.clear();
        return;
    }

    if mouse_button.pressed(MouseButton::Left) {
        let mut delta = Vec2::ZERO;
        for motion in mouse_motion.read() {
            delta += motion.delta;
        }

        if delta != Vec2::ZERO {
            controller.transition = None;
            let mut target = controller.target;
            target.yaw -= delta.x * ORBIT_SPEED;
            target.pitch -= delta.y * ORBIT_SPEED;
            controller.target = constraints.clamp(target);
        }
    } else {
        mouse_motion.clear();
    }

    for ev in scroll.read() {
        controller.transition = None;
        let mut target = controller.target;
        target.distance *= 1.0 - ev.y * 0.1;
        controller.target = constraints.clamp(target);
    }
}

/// System to handle keyboard input for camera controls.
fn handle_keyboard_input(
    mut controller: ResMut<CameraController>,
    keyboard: Res<ButtonInput<KeyCode>>,
) {
    // Home key - return to the starting view
    if keyboard.just_pressed(KeyCode::Home) {
        controller.reset();
    }
}

/// System to update camera transitions and damping.
fn update_camera_transition(mut controller: ResMut<CameraController>, time: Res<Time>) {
    let delta = time.delta_seconds();

    if let Some(ref mut transition) = controller.transition {
        transition.elapsed += delta;
        let orbit = transition.current_orbit();
        let finished = transition.is_complete().then_some(transition.to);

        match finished {
            Some(to) => {
                controller.current = to;
                controller.target = to;
                controller.transition = None;
            }
            None => {
                controller.current = orbit;
                controller.target = orbit;
            }
        }
    } else {
        // Frame-rate independent damping toward the target
        let t = 1.0 - (1.0 - DAMPING_FACTOR).powf(delta * 60.0);
        let target = controller.target;
        controller.current = controller.current.lerp(&target, t);
    }
}

/// System to apply camera controller state to the actual camera transform.
fn apply_camera_to_transform(
    controller: Res<CameraController>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    for mut transform in camera_query.iter_mut() {
        *transform = Transform::from_translation(controller.current.position())
            .looking_at(Vec3::ZERO, Vec3::Y);
    }
}
