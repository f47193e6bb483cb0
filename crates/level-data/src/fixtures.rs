//! Sample data fixtures for testing.
//!
//! This module provides ready-made datasets for other crates to use.
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // level-data = { path = "../level-data", features = ["test-fixtures"] }
//!
//! use level_data::fixtures;
//!
//! let dataset = fixtures::sample_dataset();
//! ```

use crate::Dataset;

/// Returns the sample dataset from the fixtures file.
///
/// Contains 3 levels (individual, organization, team), each with five
/// positions per axis.
pub fn sample_dataset() -> Dataset {
    let json = include_str!("../tests/fixtures/sample_data.json");
    Dataset::from_json(json).expect("Failed to parse sample_data.json")
}

/// Returns a compact dataset with single-letter values.
///
/// - `individual`: X = a..e, Y = f..j, Z = k..o
/// - `team`: X = p..t, Y = u..y, Z = three values only (1, 2, 3)
pub fn lettered_dataset() -> Dataset {
    let json = r#"{
        "levels": {
            "individual": {
                "axes": {
                    "X": { "label": "Ix", "values": ["a", "b", "c", "d", "e"] },
                    "Y": { "label": "Iy", "values": ["f", "g", "h", "i", "j"] },
                    "Z": { "label": "Iz", "values": ["k", "l", "m", "n", "o"] }
                },
                "descriptions": { "example": "Individual example." }
            },
            "team": {
                "axes": {
                    "X": { "label": "Tx", "values": ["p", "q", "r", "s", "t"] },
                    "Y": { "label": "Ty", "values": ["u", "v", "w", "x", "y"] },
                    "Z": { "label": "Tz", "values": ["1", "2", "3"] }
                },
                "descriptions": { "example": "Team example." }
            }
        }
    }"#;
    Dataset::from_json(json).expect("Lettered dataset should be valid")
}
