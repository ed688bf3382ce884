//! Value mappings and small display sub-objects shared by stat-like panels.

use serde_json::{json, Map, Value};

use crate::color::{Color, BLUE_RGB, BLUE_RGBA, GREY1, RGB, RGBA};
use crate::constants::{MAPPING_TYPE_RANGE_TO_TEXT, MAPPING_TYPE_VALUE_TO_TEXT};

/// Legacy singlestat mapping type entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Mapping {
    pub name: String,
    pub value: i64,
}

impl Mapping {
    pub fn value_to_text() -> Self {
        Self {
            name: "value to text".to_string(),
            value: MAPPING_TYPE_VALUE_TO_TEXT,
        }
    }

    pub fn range_to_text() -> Self {
        Self {
            name: "range to text".to_string(),
            value: MAPPING_TYPE_RANGE_TO_TEXT,
        }
    }

    pub fn to_json_data(&self) -> Value {
        json!({"name": self.name, "value": self.value})
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueMap {
    pub text: String,
    pub value: String,
    pub op: String,
}

impl ValueMap {
    pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
            op: "=".to_string(),
        }
    }

    pub fn to_json_data(&self) -> Value {
        json!({"op": self.op, "text": self.text, "value": self.value})
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeMap {
    pub start: Value,
    pub end: Value,
    pub text: String,
}

impl RangeMap {
    pub fn to_json_data(&self) -> Value {
        json!({"from": self.start, "to": self.end, "text": self.text})
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SparkLine {
    pub fill_color: RGBA,
    pub full: bool,
    pub line_color: RGB,
    pub show: bool,
}

impl Default for SparkLine {
    fn default() -> Self {
        Self {
            fill_color: BLUE_RGBA,
            full: false,
            line_color: BLUE_RGB,
            show: false,
        }
    }
}

impl SparkLine {
    pub fn to_json_data(&self) -> Value {
        json!({
            "fillColor": self.fill_color.to_json_data(),
            "full": self.full,
            "lineColor": self.line_color.to_json_data(),
            "show": self.show,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Gauge {
    pub min_value: i64,
    pub max_value: i64,
    pub show: bool,
    pub threshold_labels: bool,
    pub threshold_markers: bool,
}

impl Default for Gauge {
    fn default() -> Self {
        Self {
            min_value: 0,
            max_value: 100,
            show: false,
            threshold_labels: false,
            threshold_markers: true,
        }
    }
}

impl Gauge {
    pub fn to_json_data(&self) -> Value {
        json!({
            "maxValue": self.max_value,
            "minValue": self.min_value,
            "show": self.show,
            "thresholdLabels": self.threshold_labels,
            "thresholdMarkers": self.threshold_markers,
        })
    }
}

/// Discrete panel color for a mapped text value.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteColorMappingItem {
    pub text: String,
    pub color: Color,
}

impl DiscreteColorMappingItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: GREY1.into(),
        }
    }

    pub fn to_json_data(&self) -> Value {
        json!({"color": self.color.to_json_data(), "text": self.text})
    }
}

// ---------------------------------------------------------------------------
// Field value mappings (Grafana 8+)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatValueMappingItem {
    pub text: String,
    pub map_value: String,
    pub color: String,
    pub index: Option<i64>,
}

impl StatValueMappingItem {
    fn entry(&self) -> (String, Value) {
        (
            self.map_value.clone(),
            json!({"text": self.text, "color": self.color, "index": self.index}),
        )
    }

    pub fn to_json_data(&self) -> Value {
        let (key, value) = self.entry();
        Value::Object(Map::from_iter([(key, value)]))
    }
}

/// A `value` mapping made of several items, later items winning on key clash.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatValueMappings {
    pub mapping_items: Vec<StatValueMappingItem>,
}

impl StatValueMappings {
    pub fn new(mapping_items: Vec<StatValueMappingItem>) -> Self {
        Self { mapping_items }
    }

    pub fn to_json_data(&self) -> Value {
        let options: Map<String, Value> = self.mapping_items.iter().map(|i| i.entry()).collect();
        json!({"type": "value", "options": options})
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatRangeMappings {
    pub text: String,
    pub start_value: i64,
    pub end_value: i64,
    pub color: String,
    pub index: Option<i64>,
}

impl StatRangeMappings {
    pub fn to_json_data(&self) -> Value {
        json!({
            "type": "range",
            "options": {
                "from": self.start_value,
                "to": self.end_value,
                "result": {"text": self.text, "color": self.color, "index": self.index},
            },
        })
    }
}

/// Pre-8 mapping entry; value-to-text when `map_value` is set, else range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatMapping {
    pub text: String,
    pub map_value: String,
    pub start_value: String,
    pub end_value: String,
    pub id: Option<u64>,
}

impl StatMapping {
    pub fn value(text: impl Into<String>, map_value: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            map_value: map_value.into(),
            ..Default::default()
        }
    }

    pub fn range(
        text: impl Into<String>,
        start_value: impl Into<String>,
        end_value: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            start_value: start_value.into(),
            end_value: end_value.into(),
            ..Default::default()
        }
    }

    pub fn to_json_data(&self) -> Value {
        let mapping_type = if self.map_value.is_empty() {
            MAPPING_TYPE_RANGE_TO_TEXT
        } else {
            MAPPING_TYPE_VALUE_TO_TEXT
        };
        json!({
            "operator": "",
            "text": self.text,
            "type": mapping_type,
            "value": self.map_value,
            "from": self.start_value,
            "to": self.end_value,
            "id": self.id,
        })
    }
}

/// Any entry of a panel's `mappings` list.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldMapping {
    Values(StatValueMappings),
    Range(StatRangeMappings),
    Legacy(StatMapping),
    Raw(Value),
}

impl FieldMapping {
    pub fn to_json_data(&self) -> Value {
        match self {
            Self::Values(m) => m.to_json_data(),
            Self::Range(m) => m.to_json_data(),
            Self::Legacy(m) => m.to_json_data(),
            Self::Raw(v) => v.clone(),
        }
    }
}

impl From<StatValueMappings> for FieldMapping {
    fn from(m: StatValueMappings) -> Self {
        Self::Values(m)
    }
}

impl From<StatRangeMappings> for FieldMapping {
    fn from(m: StatRangeMappings) -> Self {
        Self::Range(m)
    }
}

impl From<StatMapping> for FieldMapping {
    fn from(m: StatMapping) -> Self {
        Self::Legacy(m)
    }
}

impl From<Value> for FieldMapping {
    fn from(v: Value) -> Self {
        Self::Raw(v)
    }
}

pub(crate) fn mappings_json(mappings: &[FieldMapping]) -> Vec<Value> {
    mappings.iter().map(FieldMapping::to_json_data).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_mappings_merge_items() {
        let mappings = StatValueMappings::new(vec![
            StatValueMappingItem {
                text: "Up".into(),
                map_value: "1".into(),
                color: "green".into(),
                index: Some(0),
            },
            StatValueMappingItem {
                text: "Down".into(),
                map_value: "0".into(),
                color: "red".into(),
                index: Some(1),
            },
        ]);
        assert_eq!(
            mappings.to_json_data(),
            json!({
                "type": "value",
                "options": {
                    "1": {"text": "Up", "color": "green", "index": 0},
                    "0": {"text": "Down", "color": "red", "index": 1},
                },
            })
        );
    }

    #[test]
    fn range_mappings_shape() {
        let json = StatRangeMappings {
            text: "warm".into(),
            start_value: 10,
            end_value: 20,
            ..Default::default()
        }
        .to_json_data();
        assert_eq!(json["options"]["from"], 10);
        assert_eq!(json["options"]["result"]["index"], Value::Null);
    }

    #[test]
    fn legacy_mapping_type_follows_map_value() {
        assert_eq!(StatMapping::value("Up", "1").to_json_data()["type"], 1);
        assert_eq!(StatMapping::range("Low", "0", "10").to_json_data()["type"], 2);
    }

    #[test]
    fn discrete_color_defaults_to_grey() {
        assert_eq!(
            DiscreteColorMappingItem::new("ok").to_json_data(),
            json!({"color": "rgba(216, 200, 27, 0.27)", "text": "ok"})
        );
    }

    #[test]
    fn sparkline_defaults() {
        let json = SparkLine::default().to_json_data();
        assert_eq!(json["fillColor"], "rgba(31, 118, 189, 0.18)");
        assert_eq!(json["lineColor"], "rgb(31, 120, 193)");
    }
}
