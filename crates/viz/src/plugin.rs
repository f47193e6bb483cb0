//! Main visualization plugin that ties all systems together.

use bevy::prelude::*;
use selection::ViewerConfig;

use crate::camera::CameraPlugin;
use crate::debug::DebugPlugin;
use crate::panel::PanelPlugin;
use crate::scene::ScenePlugin;
use crate::state_loader::StateLoaderPlugin;

/// Viewer configuration as a Bevy resource.
#[derive(Resource, Clone, Debug, Default)]
pub struct ViewerSettings(pub ViewerConfig);

/// Frame phases: input turns into messages, messages are dispatched, views
/// are applied.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewerSet {
    Input,
    Dispatch,
    Apply,
}

/// Main plugin for the cube viewer.
///
/// This plugin sets up the window, adds all sub-plugins, and orders the
/// input, dispatch and apply phases.
pub struct CubeVizPlugin;

impl Plugin for CubeVizPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<ViewerSettings>() {
            app.init_resource::<ViewerSettings>();
        }
        let window = app.world().resource::<ViewerSettings>().0.window.clone();

        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: window.title,
                resolution: (window.width, window.height).into(),
                ..default()
            }),
            ..default()
        }))
        .configure_sets(
            Update,
            (ViewerSet::Input, ViewerSet::Dispatch, ViewerSet::Apply).chain(),
        )
        .add_plugins((
            StateLoaderPlugin,
            CameraPlugin,
            ScenePlugin,
            PanelPlugin,
            DebugPlugin,
        ));
    }
}
