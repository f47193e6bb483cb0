//! Dataset Types
//!
//! Typed form of the level dataset JSON. Parsing goes through
//! [`Dataset::from_json`], which validates the structure once so that every
//! later lookup can rely on it:
//!
//! - at least one level exists
//! - every level defines axes `X`, `Y` and `Z` and an example description
//! - every axis has at least one value

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::Axis;

/// Errors raised while loading a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset file could not be read.
    #[error("failed to read dataset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The content is not valid JSON or does not have the dataset shape.
    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),
    /// The `levels` map is empty.
    #[error("dataset defines no levels")]
    NoLevels,
    /// An axis has an empty `values` sequence.
    #[error("level '{level}' axis {axis} has no values")]
    EmptyAxis { level: String, axis: Axis },
}

/// All levels, keyed by level name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub levels: BTreeMap<String, LevelSpec>,
}

/// One level: three labelled axes plus its descriptive text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSpec {
    pub axes: AxesSpec,
    pub descriptions: Descriptions,
}

/// The three axes of a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxesSpec {
    #[serde(rename = "X")]
    pub x: AxisSpec,
    #[serde(rename = "Y")]
    pub y: AxisSpec,
    #[serde(rename = "Z")]
    pub z: AxisSpec,
}

/// Label and ordered value descriptions for one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub label: String,
    pub values: Vec<String>,
}

/// Free-text descriptions attached to a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Descriptions {
    pub example: String,
}

impl Dataset {
    /// Reads and validates a dataset file.
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let content = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parses and validates a dataset from a JSON string.
    pub fn from_json(content: &str) -> Result<Self, DatasetError> {
        let dataset: Dataset = serde_json::from_str(content)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Checks the invariants the rest of the workspace relies on.
    pub fn validate(&self) -> Result<(), DatasetError> {
        if self.levels.is_empty() {
            return Err(DatasetError::NoLevels);
        }

        for (name, level) in &self.levels {
            for axis in Axis::ALL {
                if level.axis(axis).values.is_empty() {
                    return Err(DatasetError::EmptyAxis {
                        level: name.clone(),
                        axis,
                    });
                }
            }
        }

        Ok(())
    }

    /// Look up a level by name.
    pub fn level(&self, name: &str) -> Option<&LevelSpec> {
        self.levels.get(name)
    }

    /// Whether `name` is a level of this dataset.
    pub fn contains_level(&self, name: &str) -> bool {
        self.levels.contains_key(name)
    }

    /// Level names in sorted order.
    pub fn level_names(&self) -> impl Iterator<Item = &str> {
        self.levels.keys().map(String::as_str)
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether the dataset has no levels. Always false after validation.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl LevelSpec {
    /// The spec for one axis.
    pub fn axis(&self, axis: Axis) -> &AxisSpec {
        match axis {
            Axis::X => &self.axes.x,
            Axis::Y => &self.axes.y,
            Axis::Z => &self.axes.z,
        }
    }

    /// Example text shown under the description.
    pub fn example(&self) -> &str {
        &self.descriptions.example
    }
}

impl AxisSpec {
    /// Number of slider positions (`N`); valid positions are `1..=N`.
    pub fn len(&self) -> u32 {
        self.values.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Centre position of the range, `(N + 1) / 2`.
    pub fn midpoint(&self) -> u32 {
        (self.len() + 1) / 2
    }

    /// Clamp a 1-based position into `1..=N`.
    pub fn clamp(&self, position: u32) -> u32 {
        position.clamp(1, self.len().max(1))
    }

    /// Description text for a 1-based slider position.
    pub fn value_at(&self, position: u32) -> Option<&str> {
        let index = position.checked_sub(1)? as usize;
        self.values.get(index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis_json(label: &str, values: &[&str]) -> String {
        format!(
            r#"{{"label":"{}","values":{}}}"#,
            label,
            serde_json::to_string(values).unwrap()
        )
    }

    fn level_json(values: &[&str]) -> String {
        format!(
            r#"{{"axes":{{"X":{},"Y":{},"Z":{}}},"descriptions":{{"example":"An example."}}}}"#,
            axis_json("Autonomy", values),
            axis_json("Scope", values),
            axis_json("Pace", values),
        )
    }

    #[test]
    fn test_parse_minimal_dataset() {
        let json = format!(r#"{{"levels":{{"individual":{}}}}}"#, level_json(&["a", "b", "c"]));
        let dataset = Dataset::from_json(&json).unwrap();

        assert_eq!(dataset.len(), 1);
        let level = dataset.level("individual").unwrap();
        assert_eq!(level.axis(Axis::X).label, "Autonomy");
        assert_eq!(level.axis(Axis::Z).len(), 3);
        assert_eq!(level.example(), "An example.");
    }

    #[test]
    fn test_empty_levels_rejected() {
        let err = Dataset::from_json(r#"{"levels":{}}"#).unwrap_err();
        assert!(matches!(err, DatasetError::NoLevels));
    }

    #[test]
    fn test_empty_axis_rejected() {
        let json = format!(r#"{{"levels":{{"team":{}}}}}"#, level_json(&[]));
        let err = Dataset::from_json(&json).unwrap_err();
        match err {
            DatasetError::EmptyAxis { level, axis } => {
                assert_eq!(level, "team");
                assert_eq!(axis, Axis::X);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_missing_axis_is_parse_error() {
        let json = r#"{"levels":{"team":{"axes":{"X":{"label":"a","values":["x"]}},"descriptions":{"example":"e"}}}}"#;
        let err = Dataset::from_json(json).unwrap_err();
        assert!(matches!(err, DatasetError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Dataset::from_path(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
        assert!(err.to_string().contains("does/not/exist.json"));
    }

    #[test]
    fn test_axis_midpoint() {
        let five = AxisSpec {
            label: "five".into(),
            values: vec!["1".into(), "2".into(), "3".into(), "4".into(), "5".into()],
        };
        assert_eq!(five.midpoint(), 3);

        let four = AxisSpec {
            label: "four".into(),
            values: vec!["1".into(), "2".into(), "3".into(), "4".into()],
        };
        assert_eq!(four.midpoint(), 2);

        let one = AxisSpec {
            label: "one".into(),
            values: vec!["1".into()],
        };
        assert_eq!(one.midpoint(), 1);
    }

    #[test]
    fn test_value_at_is_one_based() {
        let spec = AxisSpec {
            label: "l".into(),
            values: vec!["a".into(), "b".into(), "c".into()],
        };
        assert_eq!(spec.value_at(1), Some("a"));
        assert_eq!(spec.value_at(3), Some("c"));
        assert_eq!(spec.value_at(0), None);
        assert_eq!(spec.value_at(4), None);
    }

    #[test]
    fn test_clamp() {
        let spec = AxisSpec {
            label: "l".into(),
            values: vec!["a".into(), "b".into(), "c".into()],
        };
        assert_eq!(spec.clamp(0), 1);
        assert_eq!(spec.clamp(2), 2);
        assert_eq!(spec.clamp(42), 3);
    }

    #[test]
    fn test_level_names_sorted() {
        let json = format!(
            r#"{{"levels":{{"team":{},"individual":{}}}}}"#,
            level_json(&["a"]),
            level_json(&["a"])
        );
        let dataset = Dataset::from_json(&json).unwrap();
        let names: Vec<&str> = dataset.level_names().collect();
        assert_eq!(names, vec!["individual", "team"]);
        assert!(dataset.contains_level("team"));
        assert!(!dataset.contains_level("organization"));
    }
}
