//! Dataset loading and message dispatch.
//!
//! Reads the dataset once on the IO task pool, then feeds every
//! [`ViewerMessage`] through the selection state machine and publishes the
//! resulting [`ViewUpdated`] events for the scene and panel to draw.

use bevy::prelude::*;
use bevy::tasks::{block_on, futures_lite::future, IoTaskPool, Task};
use level_data::{Dataset, DatasetError};
use selection::{AppMessage, AppState, ViewUpdate};
use std::path::PathBuf;
use std::time::Instant;

use crate::plugin::{ViewerSet, ViewerSettings};

/// Plugin for loading the dataset and driving the selection state.
pub struct StateLoaderPlugin;

impl Plugin for StateLoaderPlugin {
    fn build(&self, app: &mut App) {
        // ViewerSettings should be inserted by main.rs before adding this plugin
        // If not present, initialize with defaults
        if !app.world().contains_resource::<ViewerSettings>() {
            app.init_resource::<ViewerSettings>();
        }
        let config = app.world().resource::<ViewerSettings>().0.clone();

        app.insert_resource(ViewerState::new(AppState::new(
            config.initial_level,
            config.mapping,
        )))
        .init_resource::<DatasetLoad>()
        .add_event::<ViewerMessage>()
        .add_event::<ViewUpdated>()
        .add_systems(Startup, start_dataset_load)
        .add_systems(
            Update,
            (poll_dataset_load, dispatch_messages)
                .chain()
                .in_set(ViewerSet::Dispatch),
        );
    }
}

/// Selection state shared by all viewer systems.
#[derive(Resource)]
pub struct ViewerState {
    /// The state machine.
    pub app: AppState,
    /// When the dataset finished loading.
    pub loaded_at: Option<Instant>,
}

impl ViewerState {
    pub fn new(app: AppState) -> Self {
        Self {
            app,
            loaded_at: None,
        }
    }

    /// Name of the active level, if loaded.
    pub fn current_level(&self) -> Option<&str> {
        self.app.selection().map(|s| s.level())
    }

    /// Level names in display order, empty until loaded.
    pub fn level_names(&self) -> Vec<String> {
        self.app
            .selection()
            .map(|s| s.dataset().level_names().map(String::from).collect())
            .unwrap_or_default()
    }
}

/// Input to the selection state machine.
#[derive(Event, Debug)]
pub struct ViewerMessage(pub AppMessage);

/// Emitted after a message changed what should be drawn.
#[derive(Event, Debug, Clone)]
pub struct ViewUpdated(pub ViewUpdate);

/// The in-flight dataset read, if any.
#[derive(Resource, Default)]
pub struct DatasetLoad {
    /// Path being read.
    pub path: Option<PathBuf>,
    /// Pending read task.
    task: Option<Task<Result<Dataset, DatasetError>>>,
}

impl DatasetLoad {
    /// Whether a read is still pending.
    pub fn is_pending(&self) -> bool {
        self.task.is_some()
    }
}

/// System to start the one-time dataset read.
fn start_dataset_load(settings: Res<ViewerSettings>, mut load: ResMut<DatasetLoad>) {
    let path = settings.0.data_path.clone();
    tracing::info!("Loading dataset from {:?}", path);

    let task_path = path.clone();
    let task = IoTaskPool::get().spawn(async move { Dataset::from_path(&task_path) });

    load.path = Some(path);
    load.task = Some(task);
}

/// System to check whether the dataset read has finished.
fn poll_dataset_load(mut load: ResMut<DatasetLoad>, mut messages: EventWriter<ViewerMessage>) {
    let Some(task) = load.task.as_mut() else {
        return;
    };

    let Some(result) = block_on(future::poll_once(task)) else {
        return;
    };
    load.task = None;

    let message = match result {
        Ok(dataset) => AppMessage::DatasetLoaded(dataset),
        Err(e) => AppMessage::LoadFailed(e),
    };
    messages.send(ViewerMessage(message));
}

/// System to apply queued messages in order.
///
/// Drains the queue: messages own their payload (the loaded dataset), and
/// this is their only consumer.
pub fn dispatch_messages(
    mut state: ResMut<ViewerState>,
    mut messages: ResMut<Events<ViewerMessage>>,
    mut updates: EventWriter<ViewUpdated>,
) {
    for ViewerMessage(message) in messages.drain() {
        let loaded = matches!(message, AppMessage::DatasetLoaded(_));
        let Some(view) = state.app.update(message) else {
            continue;
        };
        if loaded {
            state.loaded_at = Some(Instant::now());
        }
        updates.send(ViewUpdated(view));
    }
}
