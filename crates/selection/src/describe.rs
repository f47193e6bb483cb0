//! Description text and axis labels derived from a selection.

use level_data::Axis;
use std::fmt;

/// The description of the current point.
///
/// Renders as:
///
/// ```text
/// Individual Level: <x text>, <y text>, <z text>.
/// Example: <example>
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Description {
    /// Level name as stored in the dataset.
    pub level: String,
    /// Value text for X, Y and Z, in that order.
    pub values: [String; 3],
    /// The level's example text.
    pub example: String,
}

impl Description {
    /// Heading line, e.g. `Individual Level:`.
    pub fn heading(&self) -> String {
        format!("{} Level:", capitalize_first(&self.level))
    }

    /// The three value texts joined with `, ` and closed by a period.
    pub fn summary(&self) -> String {
        format!("{}.", self.values.join(", "))
    }

    /// Value text for one axis.
    pub fn value(&self, axis: Axis) -> &str {
        &self.values[axis.index()]
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}\nExample: {}",
            self.heading(),
            self.summary(),
            self.example
        )
    }
}

/// Axis label texts for the active level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisLabels {
    labels: [String; 3],
}

impl AxisLabels {
    pub fn new(x: impl Into<String>, y: impl Into<String>, z: impl Into<String>) -> Self {
        Self {
            labels: [x.into(), y.into(), z.into()],
        }
    }

    /// Label for one axis.
    pub fn get(&self, axis: Axis) -> &str {
        &self.labels[axis.index()]
    }

    /// Labels paired with their axes, in X, Y, Z order.
    pub fn iter(&self) -> impl Iterator<Item = (Axis, &str)> {
        Axis::ALL
            .into_iter()
            .zip(self.labels.iter().map(String::as_str))
    }
}

/// Upper-case the first character, leaving the rest untouched.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Description {
        Description {
            level: "individual".into(),
            values: ["c".into(), "h".into(), "m".into()],
            example: "Individual example.".into(),
        }
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("individual"), "Individual");
        assert_eq!(capitalize_first("team lead"), "Team lead");
        assert_eq!(capitalize_first("éco"), "Éco");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn test_description_display() {
        assert_eq!(
            sample().to_string(),
            "Individual Level: c, h, m.\nExample: Individual example."
        );
    }

    #[test]
    fn test_description_parts() {
        let description = sample();
        assert_eq!(description.heading(), "Individual Level:");
        assert_eq!(description.summary(), "c, h, m.");
        assert_eq!(description.value(Axis::Y), "h");
    }

    #[test]
    fn test_axis_labels() {
        let labels = AxisLabels::new("Autonomy", "Metacognition", "Motivation");
        assert_eq!(labels.get(Axis::Z), "Motivation");

        let collected: Vec<_> = labels.iter().collect();
        assert_eq!(
            collected,
            vec![
                (Axis::X, "Autonomy"),
                (Axis::Y, "Metacognition"),
                (Axis::Z, "Motivation")
            ]
        );
    }
}
