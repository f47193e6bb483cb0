//! Selection state for the SMLC cube.
//!
//! Everything between user input and what gets drawn lives here, with no
//! rendering dependency. The renderer sends [`AppMessage`]s and applies the
//! [`ViewUpdate`]s that come back.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐  Dataset   ┌───────────┐  ViewUpdate  ┌─────┐
//! │ level-data │ ─────────▶ │ selection │ ───────────▶ │ viz │
//! └────────────┘            └───────────┘ ◀─────────── └─────┘
//!                                          AppMessage
//! ```
//!
//! # Modules
//!
//! - [`state`]: the [`Selection`] state machine
//! - [`describe`]: description text and axis labels
//! - [`mapping`]: slider value to scene coordinate
//! - [`app`]: lifecycle phases and message dispatch
//! - [`config`]: TOML viewer configuration

pub mod app;
pub mod config;
pub mod describe;
pub mod mapping;
pub mod state;

pub use app::{AppMessage, AppState, Phase, ViewUpdate};
pub use config::{ConfigError, ViewerConfig, WindowConfig, DEFAULT_DATA_PATH, DEFAULT_LEVEL};
pub use describe::{capitalize_first, AxisLabels, Description};
pub use mapping::{CoordinateMapping, DEFAULT_MIDPOINT, DEFAULT_SCALE};
pub use state::{Position, Selection, SelectionError};

pub use level_data::{Axis, Dataset, DatasetError};
