//! The cube scene: wireframe cube, axes, axis markers and the point.

use bevy::prelude::*;

use crate::camera::MainCamera;
use crate::plugin::ViewerSet;
use crate::state_loader::ViewUpdated;

/// Plugin for the static scene and the point that tracks the selection.
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb(0.96, 0.96, 0.96)))
            .insert_resource(AmbientLight {
                color: Color::WHITE,
                brightness: 1000.0,
            })
            .add_systems(Startup, setup_scene)
            .add_systems(Update, (draw_cube, place_axis_markers))
            .add_systems(Update, apply_point_position.in_set(ViewerSet::Apply));
    }
}

/// Edge length of the wireframe cube.
pub const CUBE_SIZE: f32 = 200.0;

/// Length of each axis line from the origin.
pub const AXIS_LENGTH: f32 = 150.0;

/// Distance of the axis markers from the origin.
pub const MARKER_DISTANCE: f32 = AXIS_LENGTH + 10.0;

/// Radius of the point sphere.
pub const POINT_RADIUS: f32 = 5.0;

const CUBE_COLOR: Color = Color::srgb(0.2, 0.2, 0.2);
const AXIS_COLOR: Color = Color::BLACK;
const POINT_COLOR: Color = Color::srgb(1.0, 0.2, 0.0);

/// Marker component for the point sphere.
#[derive(Component)]
pub struct PointMarker;

/// A text marker pinned to a world position.
#[derive(Component)]
pub struct AxisMarker {
    /// Where the marker sits in the scene.
    pub anchor: Vec3,
}

/// Scene translation for a mapped point.
pub fn point_translation(point: [f32; 3]) -> Vec3 {
    Vec3::from_array(point)
}

/// World anchors for the `X`, `Y`, `Z` markers.
pub fn marker_anchors() -> [(&'static str, Vec3); 3] {
    [
        ("X", Vec3::X * MARKER_DISTANCE),
        ("Y", Vec3::Y * MARKER_DISTANCE),
        ("Z", Vec3::Z * MARKER_DISTANCE),
    ]
}

/// System to spawn the point and the axis markers.
fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Hidden until the first view arrives
    commands.spawn((
        PbrBundle {
            mesh: meshes.add(Sphere::new(POINT_RADIUS).mesh().uv(32, 18)),
            material: materials.add(StandardMaterial {
                base_color: POINT_COLOR,
                unlit: true,
                ..default()
            }),
            visibility: Visibility::Hidden,
            ..default()
        },
        PointMarker,
    ));

    for (text, anchor) in marker_anchors() {
        commands.spawn((
            TextBundle::from_section(
                text,
                TextStyle {
                    font_size: 18.0,
                    color: AXIS_COLOR,
                    ..default()
                },
            )
            .with_style(Style {
                position_type: PositionType::Absolute,
                ..default()
            }),
            AxisMarker { anchor },
        ));
    }
}

/// System to draw the cube edges and axis lines.
fn draw_cube(mut gizmos: Gizmos) {
    gizmos.cuboid(Transform::from_scale(Vec3::splat(CUBE_SIZE)), CUBE_COLOR);

    for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
        gizmos.line(Vec3::ZERO, axis * AXIS_LENGTH, AXIS_COLOR);
    }
}

/// System to keep the axis markers over their world anchors.
fn place_axis_markers(
    camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut markers: Query<(&AxisMarker, &mut Style, &mut Visibility)>,
) {
    let Ok((camera, camera_transform)) = camera.get_single() else {
        return;
    };

    for (marker, mut style, mut visibility) in markers.iter_mut() {
        match camera.world_to_viewport(camera_transform, marker.anchor) {
            Some(screen) => {
                style.left = Val::Px(screen.x);
                style.top = Val::Px(screen.y);
                *visibility = Visibility::Inherited;
            }
            // Behind the camera
            None => *visibility = Visibility::Hidden,
        }
    }
}

/// System to move the point to the latest view.
fn apply_point_position(
    mut updates: EventReader<ViewUpdated>,
    mut point: Query<(&mut Transform, &mut Visibility), With<PointMarker>>,
) {
    let Some(ViewUpdated(view)) = updates.read().last() else {
        return;
    };

    for (mut transform, mut visibility) in point.iter_mut() {
        transform.translation = point_translation(view.point);
        *visibility = Visibility::Inherited;
    }
}
