//! Integration tests for the visualization layer.

use bevy::prelude::*;
use selection::{AppMessage, Axis, ViewerConfig};
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use viz::state_loader::{StateLoaderPlugin, ViewUpdated, ViewerMessage, ViewerState};
use viz::ViewerSettings;

/// Headless app running only the loader and dispatch.
fn loader_app(config: ViewerConfig) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(ViewerSettings(config))
        .add_plugins(StateLoaderPlugin);
    app
}

/// Update until the dataset read has been dispatched.
fn run_until_loaded(app: &mut App) {
    for _ in 0..200 {
        app.update();
        if !app.world().resource::<ViewerState>().app.is_loading() {
            return;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    panic!("dataset load did not finish");
}

fn latest_view(app: &App) -> Option<selection::ViewUpdate> {
    let events = app.world().resource::<Events<ViewUpdated>>();
    let mut reader = events.get_reader();
    reader.read(events).last().map(|e| e.0.clone())
}

/// The shipped dataset loads and starts on the configured level.
#[test]
fn test_loads_shipped_dataset() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets/data/smlc_data.json");
    let mut app = loader_app(ViewerConfig {
        data_path: path,
        initial_level: "organization".to_string(),
        ..Default::default()
    });

    run_until_loaded(&mut app);

    let state = app.world().resource::<ViewerState>();
    assert_eq!(state.current_level(), Some("organization"));
    assert_eq!(
        state.level_names(),
        vec!["individual", "organization", "team"]
    );

    let view = latest_view(&app).unwrap();
    assert_eq!(view.point, [0.0, 0.0, 0.0]);
    assert_eq!(view.labels.get(Axis::X), "Learning Strategy");
}

/// Messages sent after load move the point.
#[test]
fn test_messages_after_load() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets/data/smlc_data.json");
    let mut app = loader_app(ViewerConfig {
        data_path: path,
        ..Default::default()
    });
    run_until_loaded(&mut app);

    app.world_mut()
        .send_event(ViewerMessage(AppMessage::AxisChanged(Axis::X, 3)));
    app.world_mut()
        .send_event(ViewerMessage(AppMessage::AxisStepped(Axis::Z, 5)));
    app.update();

    let view = latest_view(&app).unwrap();
    assert_eq!(view.level, "individual");
    assert_eq!(view.point, [0.0, 0.0, 100.0]);
    assert_eq!(view.description.value(Axis::X), "Shares direction with a mentor");

    app.world_mut()
        .send_event(ViewerMessage(AppMessage::AxisChanged(Axis::X, 2)));
    app.update();

    let view = latest_view(&app).unwrap();
    assert_eq!(view.point, [-50.0, 0.0, 100.0]);
    assert_eq!(
        view.description.value(Axis::X),
        "Mostly directed, with occasional choices"
    );
}

/// A missing file leaves the viewer failed with no view.
#[test]
fn test_missing_dataset_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = loader_app(ViewerConfig {
        data_path: dir.path().join("missing.json"),
        ..Default::default()
    });

    run_until_loaded(&mut app);

    let state = app.world().resource::<ViewerState>();
    assert!(state.app.failure().unwrap().contains("missing.json"));
    assert!(latest_view(&app).is_none());
}

/// A config file on disk drives the data path and initial level.
#[test]
fn test_config_file_drives_loader() {
    let dir = tempfile::tempdir().unwrap();

    let data_path = dir.path().join("data.json");
    std::fs::write(
        &data_path,
        r#"{"levels": {"solo": {
            "axes": {
                "X": {"label": "A", "values": ["a1", "a2", "a3", "a4", "a5"]},
                "Y": {"label": "B", "values": ["b1", "b2", "b3", "b4", "b5"]},
                "Z": {"label": "C", "values": ["c1", "c2", "c3", "c4", "c5"]}
            },
            "descriptions": {"example": "Solo."}
        }}}"#,
    )
    .unwrap();

    let config_path = dir.path().join("viewer.toml");
    let mut file = std::fs::File::create(&config_path).unwrap();
    writeln!(file, "data_path = {:?}", data_path.display().to_string()).unwrap();
    writeln!(file, "initial_level = \"solo\"").unwrap();
    writeln!(file, "[mapping]\nscale = 10.0").unwrap();
    drop(file);

    let config = ViewerConfig::from_file(&config_path).unwrap();
    let mut app = loader_app(config);
    run_until_loaded(&mut app);

    app.world_mut()
        .send_event(ViewerMessage(AppMessage::AxisChanged(Axis::Y, 5)));
    app.update();

    let view = latest_view(&app).unwrap();
    assert_eq!(view.point, [0.0, 20.0, 0.0]);
    assert_eq!(
        view.description.to_string(),
        "Solo Level: a3, b5, c3.\nExample: Solo."
    );
}
