//! Level dataset types and loading for the SMLC cube.
//!
//! This crate contains pure data structures with no selection logic.
//! It is a dependency for all other crates in the workspace.

pub mod axis;
pub mod dataset;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

pub use axis::Axis;
pub use dataset::{AxesSpec, AxisSpec, Dataset, DatasetError, Descriptions, LevelSpec};
