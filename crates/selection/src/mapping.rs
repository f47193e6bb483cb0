//! Slider position to scene coordinate mapping.

use serde::{Deserialize, Serialize};

use crate::Position;

/// Slider value that maps to the cube centre.
pub const DEFAULT_MIDPOINT: u32 = 3;

/// Scene units per slider step.
pub const DEFAULT_SCALE: f32 = 50.0;

/// Linear mapping `coordinate(v) = (v - midpoint) * scale`, shared by all axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinateMapping {
    /// Slider value placed at the origin.
    pub midpoint: u32,
    /// Distance between neighbouring slider values.
    pub scale: f32,
}

impl Default for CoordinateMapping {
    fn default() -> Self {
        Self {
            midpoint: DEFAULT_MIDPOINT,
            scale: DEFAULT_SCALE,
        }
    }
}

impl CoordinateMapping {
    /// Map one 1-based slider value to a scene coordinate.
    pub fn coordinate(&self, value: u32) -> f32 {
        (value as f32 - self.midpoint as f32) * self.scale
    }

    /// Map a full position to an `[x, y, z]` scene point.
    pub fn point(&self, position: Position) -> [f32; 3] {
        [
            self.coordinate(position.x),
            self.coordinate(position.y),
            self.coordinate(position.z),
        ]
    }
}
