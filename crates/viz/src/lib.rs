//! Visualization layer: Bevy-based renderer for the selection cube.

pub mod camera;
pub mod debug;
pub mod panel;
pub mod plugin;
pub mod scene;
pub mod state_loader;

pub use plugin::{CubeVizPlugin, ViewerSet, ViewerSettings};
