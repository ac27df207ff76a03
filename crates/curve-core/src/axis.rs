//! Axis metadata

use serde::{Deserialize, Serialize};

/// Which of the three chart axes a descriptor belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisKind {
    X,
    Line,
    Stack,
}

impl AxisKind {
    /// CSS-friendly short name
    pub fn label(&self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Line => "line",
            Self::Stack => "stack",
        }
    }
}

/// Static description of one axis: its name, units and edit affordance
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisDescriptor {
    pub name: String,
    #[serde(default)]
    pub units: String,
    /// Print the unit before the value (`$12`) instead of after (`12 s`)
    #[serde(default)]
    pub unit_in_front: bool,
    /// Opaque key handed back to the host when the axis title is edited
    pub indicator_key: String,
    #[serde(default)]
    pub editable: bool,
}

impl AxisDescriptor {
    pub fn new(name: impl Into<String>, indicator_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            indicator_key: indicator_key.into(),
            ..Default::default()
        }
    }

    pub fn units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    pub fn unit_in_front(mut self, in_front: bool) -> Self {
        self.unit_in_front = in_front;
        self
    }

    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    /// Axis title, e.g. `Time (s)`
    pub fn title(&self) -> String {
        format!("{} ({})", self.name, self.units)
    }

    /// Attach the unit to an already formatted value
    pub fn with_units(&self, value: &str) -> String {
        if self.unit_in_front {
            format!("{}{}", self.units, value)
        } else if self.units.is_empty() {
            value.to_string()
        } else {
            format!("{} {}", value, self.units)
        }
    }
}

/// The descriptors for all three axes of the chart
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChartAxes {
    pub x: AxisDescriptor,
    pub line: AxisDescriptor,
    pub stack: AxisDescriptor,
}

impl ChartAxes {
    pub fn new(x: AxisDescriptor, line: AxisDescriptor, stack: AxisDescriptor) -> Self {
        Self { x, line, stack }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title() {
        let axis = AxisDescriptor::new("Time", "timeAxis").units("s");
        assert_eq!(axis.title(), "Time (s)");
    }

    #[test]
    fn test_unit_placement() {
        let cost = AxisDescriptor::new("Cost", "cost").units("$").unit_in_front(true);
        assert_eq!(cost.with_units("1.5K"), "$1.5K");

        let time = AxisDescriptor::new("Time", "time").units("s");
        assert_eq!(time.with_units("12"), "12 s");

        let plain = AxisDescriptor::new("Value", "value");
        assert_eq!(plain.with_units("12"), "12");
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(AxisKind::X.label(), "x");
        assert_eq!(AxisKind::Stack.label(), "stack");
    }

    #[test]
    fn test_descriptor_from_json_defaults() {
        let axis: AxisDescriptor =
            serde_json::from_str(r#"{"name":"Value","indicatorKey":"lineYAxis"}"#).unwrap();
        assert_eq!(axis.indicator_key, "lineYAxis");
        assert!(axis.units.is_empty());
        assert!(!axis.unit_in_front);
        assert!(!axis.editable);
    }
}
