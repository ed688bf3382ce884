//! Threshold steps, graph threshold lines and series overrides.

use serde_json::{json, Value};
use validator::Validate;

use crate::color::{Color, RED};
use crate::constants::EVAL_GT;
use crate::error::ValidationError;
use crate::validators::checked;

/// A colored severity step. The step at index 0 has no lower bound and
/// always renders its value as the string `"null"`.
#[derive(Debug, Clone, PartialEq)]
pub struct Threshold {
    pub color: Color,
    pub index: u32,
    pub value: f64,
    pub line: bool,
    pub op: String,
    pub yaxis: String,
}

impl Threshold {
    pub fn new(color: impl Into<Color>, index: u32, value: f64) -> Self {
        Self {
            color: color.into(),
            index,
            value,
            line: true,
            op: EVAL_GT.to_string(),
            yaxis: "left".to_string(),
        }
    }

    pub fn to_json_data(&self) -> Value {
        let value = if self.index == 0 {
            Value::String("null".to_string())
        } else {
            json!(self.value)
        };
        json!({
            "op": self.op,
            "yaxis": self.yaxis,
            "color": self.color.to_json_data(),
            "line": self.line,
            "index": self.index,
            "value": value,
        })
    }
}

/// A threshold line drawn on a legacy graph.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphThreshold {
    pub value: f64,
    pub color_mode: String,
    pub fill: bool,
    pub line: bool,
    pub op: String,
    pub yaxis: String,
    /// Only rendered when `color_mode` is `"custom"`.
    pub fill_color: Color,
    /// Only rendered when `color_mode` is `"custom"`.
    pub line_color: Color,
}

impl GraphThreshold {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            color_mode: "critical".to_string(),
            fill: true,
            line: true,
            op: EVAL_GT.to_string(),
            yaxis: "left".to_string(),
            fill_color: RED.into(),
            line_color: RED.into(),
        }
    }

    pub fn to_json_data(&self) -> Value {
        let mut data = json!({
            "value": self.value,
            "colorMode": self.color_mode,
            "fill": self.fill,
            "line": self.line,
            "op": self.op,
            "yaxis": self.yaxis,
        });
        if self.color_mode == "custom" {
            data["fillColor"] = self.fill_color.to_json_data();
            data["lineColor"] = self.line_color.to_json_data();
        }
        data
    }
}

/// The value a panel emits under `fieldConfig.defaults.thresholds.steps`.
#[derive(Debug, Clone, PartialEq)]
pub enum Thresholds {
    Steps(Vec<Threshold>),
    Graph(Vec<GraphThreshold>),
    /// Legacy comma-separated form, e.g. `"50,80"`.
    Text(String),
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::Steps(Vec::new())
    }
}

impl Thresholds {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Steps(steps) => steps.is_empty(),
            Self::Graph(lines) => lines.is_empty(),
            Self::Text(text) => text.is_empty(),
        }
    }

    pub fn to_json_data(&self) -> Value {
        match self {
            Self::Steps(steps) => steps.iter().map(Threshold::to_json_data).collect(),
            Self::Graph(lines) => lines.iter().map(GraphThreshold::to_json_data).collect(),
            Self::Text(text) => Value::String(text.clone()),
        }
    }
}

impl From<Vec<Threshold>> for Thresholds {
    fn from(steps: Vec<Threshold>) -> Self {
        Self::Steps(steps)
    }
}

impl From<Vec<GraphThreshold>> for Thresholds {
    fn from(lines: Vec<GraphThreshold>) -> Self {
        Self::Graph(lines)
    }
}

/// Per-series styling on a legacy graph, matched by alias.
///
/// The range-checked fields are only set through [`SeriesOverride::styled`].
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct SeriesOverride {
    pub alias: String,
    pub bars: bool,
    pub lines: bool,
    #[validate(range(min = 1, max = 2))]
    yaxis: u8,
    #[validate(range(min = 0, max = 10))]
    fill: u8,
    #[validate(range(min = -3, max = 3))]
    zindex: i8,
    pub dashes: bool,
    pub dash_length: Option<u32>,
    pub space_length: Option<u32>,
    pub color: Option<Color>,
    pub fill_below_to: Option<String>,
}

impl SeriesOverride {
    pub fn new(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            bars: false,
            lines: true,
            yaxis: 1,
            fill: 1,
            zindex: 0,
            dashes: false,
            dash_length: None,
            space_length: None,
            color: None,
            fill_below_to: None,
        }
    }

    /// An override on Y axis `yaxis` (1 or 2), with `fill` in 0..=10 and
    /// `zindex` in -3..=3.
    pub fn styled(
        alias: impl Into<String>,
        yaxis: u8,
        fill: u8,
        zindex: i8,
    ) -> Result<Self, ValidationError> {
        checked(Self {
            yaxis,
            fill,
            zindex,
            ..Self::new(alias)
        })
    }

    pub fn yaxis(&self) -> u8 {
        self.yaxis
    }

    pub fn fill(&self) -> u8 {
        self.fill
    }

    pub fn zindex(&self) -> i8 {
        self.zindex
    }

    pub fn to_json_data(&self) -> Value {
        json!({
            "alias": self.alias,
            "bars": self.bars,
            "lines": self.lines,
            "yaxis": self.yaxis,
            "fill": self.fill,
            "color": self.color.as_ref().map(Color::to_json_data),
            "fillBelowTo": self.fill_below_to,
            "zindex": self.zindex,
            "dashes": self.dashes,
            "dashLength": self.dash_length,
            "spaceLength": self.space_length,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Rule;

    #[test]
    fn first_step_value_is_null_sentinel() {
        let json = Threshold::new("green", 0, 42.0).to_json_data();
        assert_eq!(json["value"], "null");
        assert_eq!(json["color"], "green");
        assert_eq!(json["op"], "gt");
    }

    #[test]
    fn later_steps_keep_their_value() {
        let json = Threshold::new("red", 1, 80.0).to_json_data();
        assert_eq!(json["value"], 80.0);
        assert_eq!(json["index"], 1);
    }

    #[test]
    fn graph_threshold_custom_colors_only_when_custom() {
        let critical = GraphThreshold::new(10.0).to_json_data();
        assert!(critical.get("fillColor").is_none());
        let custom = GraphThreshold {
            color_mode: "custom".into(),
            ..GraphThreshold::new(10.0)
        }
        .to_json_data();
        assert_eq!(custom["fillColor"], "rgba(245, 54, 54, 0.9)");
        assert_eq!(custom["lineColor"], "rgba(245, 54, 54, 0.9)");
    }

    #[test]
    fn thresholds_render_per_variant() {
        assert_eq!(Thresholds::default().to_json_data(), json!([]));
        assert_eq!(Thresholds::Text("50,80".into()).to_json_data(), json!("50,80"));
        assert!(Thresholds::Text(String::new()).is_empty());
    }

    #[test]
    fn series_override_ranges_checked_at_construction() {
        let right = SeriesOverride::styled("errors", 2, 10, -3).unwrap();
        assert_eq!((right.yaxis(), right.fill(), right.zindex()), (2, 10, -3));

        let err = SeriesOverride::styled("errors", 3, 1, 0).unwrap_err();
        assert_eq!(err.rule, Rule::Range);
        assert_eq!(err.field, "yaxis");
        assert_eq!(SeriesOverride::styled("x", 1, 11, 0).unwrap_err().field, "fill");
        assert_eq!(SeriesOverride::styled("x", 1, 1, -4).unwrap_err().field, "zindex");
    }

    #[test]
    fn series_override_shape() {
        let json = SeriesOverride {
            color: Some(Color::named("#FF0000")),
            ..SeriesOverride::new("5xx")
        }
        .to_json_data();
        assert_eq!(json["alias"], "5xx");
        assert_eq!(json["color"], "#FF0000");
        assert_eq!(json["dashLength"], Value::Null);
    }
}
