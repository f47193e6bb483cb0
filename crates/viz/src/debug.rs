//! Debug overlay for development information display.
//!
//! Shows FPS, camera orbit, the active selection and load status.
//! Toggle with F3 key.

use bevy::prelude::*;
use selection::Phase;
use std::collections::VecDeque;

use crate::camera::CameraController;
use crate::state_loader::{DatasetLoad, ViewerState};

/// Plugin for the debug overlay.
pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugOverlay>()
            .add_systems(Startup, setup_debug_overlay)
            .add_systems(Update, (toggle_debug_overlay, update_debug_display).chain());
    }
}

/// Resource controlling debug overlay settings.
#[derive(Resource)]
pub struct DebugOverlay {
    /// Whether the debug overlay is visible.
    pub enabled: bool,
    /// Show FPS counter.
    pub show_fps: bool,
    /// Show camera information.
    pub show_camera_info: bool,
}

impl Default for DebugOverlay {
    fn default() -> Self {
        Self {
            enabled: false,
            show_fps: true,
            show_camera_info: true,
        }
    }
}

/// Component marking the debug overlay container.
#[derive(Component)]
pub struct DebugOverlayContainer;

/// Component for the debug text.
#[derive(Component)]
pub struct DebugText;

/// Local resource for FPS history.
#[derive(Default)]
struct FpsHistory {
    history: VecDeque<f32>,
}

impl FpsHistory {
    fn push(&mut self, fps: f32) {
        self.history.push_back(fps);
        if self.history.len() > 60 {
            self.history.pop_front();
        }
    }

    fn average(&self) -> f32 {
        if self.history.is_empty() {
            0.0
        } else {
            self.history.iter().sum::<f32>() / self.history.len() as f32
        }
    }
}

/// Color of the debug text for a given frame rate.
fn fps_color(avg_fps: f32) -> Color {
    if avg_fps < 30.0 {
        Color::srgb(1.0, 0.3, 0.3)
    } else if avg_fps < 55.0 {
        Color::srgb(1.0, 0.8, 0.3)
    } else {
        Color::srgb(0.8, 0.8, 0.8)
    }
}

/// One line describing where the state machine is.
fn phase_line(phase: &Phase) -> String {
    match phase {
        Phase::Loading => "Dataset: loading".to_string(),
        Phase::Ready(selection) => {
            let p = selection.position();
            format!(
                "Level: {} ({}, {}, {})",
                selection.level(),
                p.x,
                p.y,
                p.z
            )
        }
        Phase::Failed(error) => format!("ERROR: {}", error),
    }
}

/// System to set up the debug overlay UI.
fn setup_debug_overlay(mut commands: Commands) {
    // Debug overlay container (top-left)
    commands
        .spawn((
            NodeBundle {
                style: Style {
                    position_type: PositionType::Absolute,
                    top: Val::Px(10.0),
                    left: Val::Px(10.0),
                    padding: UiRect::all(Val::Px(10.0)),
                    flex_direction: FlexDirection::Column,
                    ..default()
                },
                background_color: Color::srgba(0.0, 0.0, 0.0, 0.8).into(),
                visibility: Visibility::Hidden,
                ..default()
            },
            DebugOverlayContainer,
        ))
        .with_children(|parent| {
            parent.spawn(TextBundle::from_section(
                "DEBUG (F3 to toggle)",
                TextStyle {
                    font_size: 14.0,
                    color: Color::srgb(0.9, 0.9, 0.3),
                    ..default()
                },
            ));

            parent.spawn((
                TextBundle::from_section(
                    "",
                    TextStyle {
                        font_size: 12.0,
                        color: Color::srgb(0.8, 0.8, 0.8),
                        ..default()
                    },
                ),
                DebugText,
            ));
        });
}

/// System to toggle debug overlay with F3.
fn toggle_debug_overlay(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_overlay: ResMut<DebugOverlay>,
    mut container: Query<&mut Visibility, With<DebugOverlayContainer>>,
) {
    if keyboard.just_pressed(KeyCode::F3) {
        debug_overlay.enabled = !debug_overlay.enabled;

        for mut visibility in container.iter_mut() {
            *visibility = if debug_overlay.enabled {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
        }

        let status = if debug_overlay.enabled { "ON" } else { "OFF" };
        tracing::info!("Debug overlay: {}", status);
    }
}

/// System to update debug display data.
fn update_debug_display(
    debug_overlay: Res<DebugOverlay>,
    camera: Res<CameraController>,
    state: Res<ViewerState>,
    load: Res<DatasetLoad>,
    time: Res<Time>,
    mut fps_history: Local<FpsHistory>,
    mut debug_text: Query<&mut Text, With<DebugText>>,
) {
    if !debug_overlay.enabled {
        return;
    }

    let dt = time.delta_seconds();
    if dt > 0.0 {
        fps_history.push(1.0 / dt);
    }
    let avg_fps = fps_history.average();

    let mut lines = Vec::new();

    if debug_overlay.show_fps {
        let warning = if avg_fps < 30.0 { "LOW!" } else { "" };
        lines.push(format!("FPS: {:.0} {}", avg_fps, warning));
    }

    if debug_overlay.show_camera_info {
        let orbit = camera.current;
        lines.push(format!(
            "Orbit: yaw {:.2} pitch {:.2}",
            orbit.yaw, orbit.pitch
        ));
        lines.push(format!("Distance: {:.0}", orbit.distance));
    }

    if let Some(path) = &load.path {
        lines.push(format!("Data: {}", path.display()));
    }
    lines.push(phase_line(state.app.phase()));
    if let Some(loaded_at) = state.loaded_at {
        lines.push(format!("Loaded {:.1}s ago", loaded_at.elapsed().as_secs_f32()));
    }

    for mut text in debug_text.iter_mut() {
        if let Some(section) = text.sections.first_mut() {
            section.value = lines.join("\n");
            section.style.color = fps_color(avg_fps);
        }
    }
}
