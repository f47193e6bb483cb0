//! Application state and message dispatch.
//!
//! The UI never mutates a [`Selection`] directly. It sends [`AppMessage`]s to
//! [`AppState::update`], which performs one transition and hands back the
//! [`ViewUpdate`] to draw, if anything changed.
//!
//! ```text
//!             DatasetLoaded               LevelSelected / AxisChanged / AxisStepped
//! Loading ───────────────────▶ Ready ◀──────────────────────────────────────────┐
//!    │                          └───────────────────────────────────────────────┘
//!    │ LoadFailed
//!    ▼
//! Failed
//! ```

use level_data::{Axis, Dataset, DatasetError};
use std::sync::Arc;

use crate::describe::{AxisLabels, Description};
use crate::mapping::CoordinateMapping;
use crate::state::{Position, Selection};

/// Inputs to the state machine.
#[derive(Debug)]
pub enum AppMessage {
    /// The dataset finished loading.
    DatasetLoaded(Dataset),
    /// The dataset could not be loaded.
    LoadFailed(DatasetError),
    /// A level-selection control was activated.
    LevelSelected(String),
    /// A slider was set to an absolute value.
    AxisChanged(Axis, u32),
    /// A slider was moved by a number of steps.
    AxisStepped(Axis, i32),
}

/// Derived values the renderer applies after a transition.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewUpdate {
    /// Active level name.
    pub level: String,
    /// Current slider values.
    pub position: Position,
    /// Number of slider positions per axis, X, Y, Z.
    pub axis_lengths: [u32; 3],
    /// Scene coordinate of the point.
    pub point: [f32; 3],
    /// Axis label texts.
    pub labels: AxisLabels,
    /// Description of the current point.
    pub description: Description,
}

impl ViewUpdate {
    /// Slider range length on one axis.
    pub fn axis_len(&self, axis: Axis) -> u32 {
        self.axis_lengths[axis.index()]
    }
}

/// Lifecycle phase of the application.
#[derive(Debug, Clone)]
pub enum Phase {
    /// Waiting for the dataset.
    Loading,
    /// Dataset loaded, selection active.
    Ready(Selection),
    /// Loading failed; nothing further happens.
    Failed(String),
}

/// Selection state plus the settings it is rendered with.
#[derive(Debug, Clone)]
pub struct AppState {
    phase: Phase,
    initial_level: String,
    mapping: CoordinateMapping,
}

impl AppState {
    /// A new state waiting for its dataset.
    pub fn new(initial_level: impl Into<String>, mapping: CoordinateMapping) -> Self {
        Self {
            phase: Phase::Loading,
            initial_level: initial_level.into(),
            mapping,
        }
    }

    /// Apply one message. Returns the new view when the message changed it.
    pub fn update(&mut self, message: AppMessage) -> Option<ViewUpdate> {
        match message {
            AppMessage::DatasetLoaded(dataset) => {
                if !self.is_loading() {
                    tracing::warn!("Ignoring dataset delivered after initialization");
                    return None;
                }
                let level_count = dataset.len();
                match Selection::new(Arc::new(dataset), &self.initial_level) {
                    Ok(selection) => {
                        tracing::info!(
                            "Dataset loaded with {} levels, starting at '{}'",
                            level_count,
                            selection.level()
                        );
                        self.phase = Phase::Ready(selection);
                        self.view()
                    }
                    Err(e) => {
                        tracing::error!("Cannot start selection: {}", e);
                        self.phase = Phase::Failed(e.to_string());
                        None
                    }
                }
            }
            AppMessage::LoadFailed(error) => {
                if !self.is_loading() {
                    return None;
                }
                tracing::error!("Error loading dataset: {}", error);
                self.phase = Phase::Failed(error.to_string());
                None
            }
            AppMessage::LevelSelected(name) => {
                let Phase::Ready(selection) = &mut self.phase else {
                    return None;
                };
                if let Err(e) = selection.select_level(&name) {
                    tracing::warn!("Ignoring level selection: {}", e);
                    return None;
                }
                self.view()
            }
            AppMessage::AxisChanged(axis, value) => {
                let Phase::Ready(selection) = &mut self.phase else {
                    return None;
                };
                selection.set_axis_value(axis, value);
                self.view()
            }
            AppMessage::AxisStepped(axis, delta) => {
                let Phase::Ready(selection) = &mut self.phase else {
                    return None;
                };
                selection.step_axis(axis, delta);
                self.view()
            }
        }
    }

    /// The current view, if a selection is active.
    pub fn view(&self) -> Option<ViewUpdate> {
        self.selection().map(|s| s.view(&self.mapping))
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn selection(&self) -> Option<&Selection> {
        match &self.phase {
            Phase::Ready(selection) => Some(selection),
            _ => None,
        }
    }

    pub fn mapping(&self) -> &CoordinateMapping {
        &self.mapping
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.phase, Phase::Ready(_))
    }

    /// The failure reason, if loading failed.
    pub fn failure(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use level_data::fixtures::lettered_dataset;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    fn loading() -> AppState {
        AppState::new("individual", CoordinateMapping::default())
    }

    fn ready() -> AppState {
        let mut state = loading();
        state.update(AppMessage::DatasetLoaded(lettered_dataset()));
        state
    }

    fn io_error() -> DatasetError {
        DatasetError::Io {
            path: "data/smlc_data.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        }
    }

    #[test]
    fn test_initial_phase() {
        let state = loading();
        assert!(state.is_loading());
        assert!(state.view().is_none());
        assert!(state.selection().is_none());
    }

    #[test]
    fn test_dataset_loaded_yields_first_view() {
        let mut state = loading();
        let view = state
            .update(AppMessage::DatasetLoaded(lettered_dataset()))
            .expect("first view");

        assert!(state.is_ready());
        assert_eq!(view.position, Position::new(3, 3, 3));
        assert_eq!(view.point, [0.0, 0.0, 0.0]);
        assert_eq!(view.labels.get(Axis::X), "Ix");
    }

    #[test]
    fn test_unknown_initial_level_fails() {
        let mut state = AppState::new("galaxy", CoordinateMapping::default());
        assert!(state
            .update(AppMessage::DatasetLoaded(lettered_dataset()))
            .is_none());
        assert_eq!(state.failure(), Some("unknown level 'galaxy'"));
    }

    #[test]
    fn test_messages_ignored_while_loading() {
        let mut state = loading();
        assert!(state.update(AppMessage::AxisChanged(Axis::X, 1)).is_none());
        assert!(state
            .update(AppMessage::LevelSelected("team".into()))
            .is_none());
        assert!(state.update(AppMessage::AxisStepped(Axis::Y, 1)).is_none());
        assert!(state.is_loading());
    }

    #[test]
    fn test_load_failure_is_terminal() {
        let mut state = loading();
        assert!(state.update(AppMessage::LoadFailed(io_error())).is_none());
        assert!(state.failure().unwrap().contains("data/smlc_data.json"));

        assert!(state
            .update(AppMessage::DatasetLoaded(lettered_dataset()))
            .is_none());
        assert!(state.update(AppMessage::AxisChanged(Axis::X, 2)).is_none());
        assert!(state.failure().is_some());
    }

    /// Counts ERROR events seen while installed.
    struct ErrorCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for ErrorCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::ERROR {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn count_errors(f: impl FnOnce()) -> usize {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(ErrorCounter(count.clone()));
        tracing::subscriber::with_default(subscriber, f);
        count.load(Ordering::SeqCst)
    }

    #[test]
    fn test_load_failure_logged_once() {
        let errors = count_errors(|| {
            let mut state = loading();
            state.update(AppMessage::LoadFailed(io_error()));
            state.update(AppMessage::LoadFailed(io_error()));
            state.update(AppMessage::DatasetLoaded(lettered_dataset()));
            state.update(AppMessage::AxisChanged(Axis::X, 1));
            assert!(state.failure().is_some());
        });
        assert_eq!(errors, 1);
    }

    #[test]
    fn test_successful_load_logs_no_error() {
        let errors = count_errors(|| {
            let mut state = ready();
            state.update(AppMessage::LoadFailed(io_error()));
            state.update(AppMessage::AxisChanged(Axis::X, 99));
        });
        assert_eq!(errors, 0);
    }

    #[test]
    fn test_second_dataset_ignored() {
        let mut state = ready();
        state.update(AppMessage::AxisChanged(Axis::X, 5));

        assert!(state
            .update(AppMessage::DatasetLoaded(lettered_dataset()))
            .is_none());
        assert_eq!(state.selection().unwrap().value(Axis::X), 5);
    }

    #[test]
    fn test_axis_changed() {
        let mut state = ready();
        let view = state.update(AppMessage::AxisChanged(Axis::X, 1)).unwrap();
        assert_eq!(view.point, [-100.0, 0.0, 0.0]);
        assert_eq!(view.description.value(Axis::X), "a");
    }

    #[test]
    fn test_axis_stepped() {
        let mut state = ready();
        let view = state.update(AppMessage::AxisStepped(Axis::Z, -1)).unwrap();
        assert_eq!(view.position, Position::new(3, 3, 2));
        assert_eq!(view.point, [0.0, 0.0, -50.0]);
    }

    #[test]
    fn test_level_selected() {
        let mut state = ready();
        state.update(AppMessage::AxisChanged(Axis::Y, 5));

        let view = state
            .update(AppMessage::LevelSelected("team".into()))
            .unwrap();
        assert_eq!(view.level, "team");
        assert_eq!(view.position, Position::new(3, 3, 2));
        assert_eq!(view.axis_len(Axis::Z), 3);
        assert_eq!(view.labels, AxisLabels::new("Tx", "Ty", "Tz"));
    }

    #[test]
    fn test_unknown_level_selected() {
        let mut state = ready();
        assert!(state
            .update(AppMessage::LevelSelected("galaxy".into()))
            .is_none());
        assert_eq!(state.selection().unwrap().level(), "individual");
    }
}
