//! Selection state machine.
//!
//! A [`Selection`] holds the active level and one 1-based slider value per
//! axis. It can only be built from a loaded [`Dataset`], so every derived
//! value it exposes refers to data that exists. Transitions:
//!
//! - [`Selection::select_level`] switches level and resets every axis to its
//!   midpoint, even when the level is already active
//! - [`Selection::set_axis_value`] and [`Selection::step_axis`] move one axis,
//!   clamped to the level's range

use level_data::{Axis, Dataset, LevelSpec};
use std::sync::Arc;
use thiserror::Error;

use crate::describe::{AxisLabels, Description};
use crate::mapping::CoordinateMapping;
use crate::ViewUpdate;

/// Errors from selection transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The requested level is not in the dataset.
    #[error("unknown level '{0}'")]
    UnknownLevel(String),
}

/// One 1-based slider value per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl Position {
    pub fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    /// The midpoint of every axis of a level.
    pub fn midpoint_of(level: &LevelSpec) -> Self {
        Self {
            x: level.axis(Axis::X).midpoint(),
            y: level.axis(Axis::Y).midpoint(),
            z: level.axis(Axis::Z).midpoint(),
        }
    }

    /// Value on one axis.
    pub fn get(&self, axis: Axis) -> u32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Overwrite the value on one axis.
    pub fn set(&mut self, axis: Axis, value: u32) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
        }
    }
}

/// The active level and position within a loaded dataset.
#[derive(Debug, Clone)]
pub struct Selection {
    dataset: Arc<Dataset>,
    level: String,
    spec: LevelSpec,
    position: Position,
}

impl Selection {
    /// Start at `initial_level`, centred on every axis.
    pub fn new(dataset: Arc<Dataset>, initial_level: &str) -> Result<Self, SelectionError> {
        let spec = dataset
            .level(initial_level)
            .cloned()
            .ok_or_else(|| SelectionError::UnknownLevel(initial_level.to_string()))?;
        let position = Position::midpoint_of(&spec);

        Ok(Self {
            dataset,
            level: initial_level.to_string(),
            spec,
            position,
        })
    }

    /// Switch to `name` and reset the position to the level's midpoints.
    ///
    /// An unknown level leaves the selection unchanged.
    pub fn select_level(&mut self, name: &str) -> Result<(), SelectionError> {
        let spec = self
            .dataset
            .level(name)
            .cloned()
            .ok_or_else(|| SelectionError::UnknownLevel(name.to_string()))?;

        self.position = Position::midpoint_of(&spec);
        self.spec = spec;
        self.level = name.to_string();

        tracing::info!(
            "Selected level '{}' at ({}, {}, {})",
            self.level,
            self.position.x,
            self.position.y,
            self.position.z
        );
        Ok(())
    }

    /// Set one axis, clamped to `1..=N` for the active level. Returns the
    /// stored value.
    pub fn set_axis_value(&mut self, axis: Axis, value: u32) -> u32 {
        let clamped = self.spec.axis(axis).clamp(value);
        if clamped != value {
            tracing::warn!(
                "Axis {} value {} outside 1..={} for level '{}', clamped to {}",
                axis,
                value,
                self.axis_len(axis),
                self.level,
                clamped
            );
        }
        self.position.set(axis, clamped);
        clamped
    }

    /// Move one axis by `delta` steps, stopping at the ends of the range.
    /// Returns the stored value.
    pub fn step_axis(&mut self, axis: Axis, delta: i32) -> u32 {
        let len = i64::from(self.axis_len(axis).max(1));
        let target = (i64::from(self.position.get(axis)) + i64::from(delta)).clamp(1, len);
        let value = target as u32;
        self.position.set(axis, value);
        value
    }

    /// Description of the current point.
    pub fn describe(&self) -> Description {
        let values = Axis::ALL.map(|axis| {
            let spec = self.spec.axis(axis);
            spec.value_at(spec.clamp(self.position.get(axis)))
                .unwrap_or_default()
                .to_string()
        });

        Description {
            level: self.level.clone(),
            values,
            example: self.spec.example().to_string(),
        }
    }

    /// Axis labels of the active level.
    pub fn axis_labels(&self) -> AxisLabels {
        AxisLabels::new(
            self.spec.axis(Axis::X).label.as_str(),
            self.spec.axis(Axis::Y).label.as_str(),
            self.spec.axis(Axis::Z).label.as_str(),
        )
    }

    /// Everything a renderer needs after a transition.
    pub fn view(&self, mapping: &CoordinateMapping) -> ViewUpdate {
        ViewUpdate {
            level: self.level.clone(),
            position: self.position,
            axis_lengths: Axis::ALL.map(|axis| self.axis_len(axis)),
            point: mapping.point(self.position),
            labels: self.axis_labels(),
            description: self.describe(),
        }
    }

    pub fn level(&self) -> &str {
        &self.level
    }

    pub fn level_spec(&self) -> &LevelSpec {
        &self.spec
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Current value on one axis.
    pub fn value(&self, axis: Axis) -> u32 {
        self.position.get(axis)
    }

    /// Number of positions on one axis of the active level.
    pub fn axis_len(&self, axis: Axis) -> u32 {
        self.spec.axis(axis).len()
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }
}
