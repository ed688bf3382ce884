//! Graph axes, tooltip, legend and threshold grid.

use serde_json::{json, Value};

use crate::color::{RGBA, GREY1, GREY2};
use crate::constants::{CUMULATIVE, SHORT_FORMAT};
use crate::error::{Rule, ValidationError};

/// Graph hover tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub ms_resolution: bool,
    pub shared: bool,
    pub sort: i64,
    pub value_type: String,
}

impl Default for Tooltip {
    fn default() -> Self {
        Self {
            ms_resolution: true,
            shared: true,
            sort: 0,
            value_type: CUMULATIVE.to_string(),
        }
    }
}

impl Tooltip {
    pub fn to_json_data(&self) -> Value {
        json!({
            "msResolution": self.ms_resolution,
            "shared": self.shared,
            "sort": self.sort,
            "value_type": self.value_type,
        })
    }
}

string_enum! {
    pub enum XAxisMode ("mode", default = Time) {
        Time => "time",
        Series => "series",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct XAxis {
    pub mode: XAxisMode,
    pub name: Option<String>,
    /// Series reducers such as `"current"` or `"avg"`.
    pub values: Vec<String>,
    pub show: bool,
}

impl Default for XAxis {
    fn default() -> Self {
        Self {
            mode: XAxisMode::Time,
            name: None,
            values: Vec::new(),
            show: true,
        }
    }
}

impl XAxis {
    pub fn to_json_data(&self) -> Value {
        json!({
            "mode": self.mode.as_str(),
            "name": self.name,
            "values": self.values,
            "show": self.show,
        })
    }
}

/// A single Y axis. Graphs always carry a left and a right one.
#[derive(Debug, Clone, PartialEq)]
pub struct YAxis {
    pub decimals: Option<u32>,
    pub format: Option<String>,
    pub label: Option<String>,
    pub log_base: u32,
    pub max: Option<Value>,
    pub min: Option<Value>,
    pub show: bool,
}

impl Default for YAxis {
    fn default() -> Self {
        Self {
            decimals: None,
            format: None,
            label: None,
            log_base: 1,
            max: None,
            min: None,
            show: true,
        }
    }
}

impl YAxis {
    pub fn with_format(format: impl Into<String>) -> Self {
        Self {
            format: Some(format.into()),
            ..Default::default()
        }
    }

    pub fn to_json_data(&self) -> Value {
        json!({
            "decimals": self.decimals,
            "format": self.format,
            "label": self.label,
            "logBase": self.log_base,
            "max": self.max,
            "min": self.min,
            "show": self.show,
        })
    }
}

/// The left/right Y axis pair, serialized as a two-element list.
#[derive(Debug, Clone, PartialEq)]
pub struct YAxes {
    pub left: YAxis,
    pub right: YAxis,
}

impl Default for YAxes {
    fn default() -> Self {
        Self {
            left: YAxis::with_format(SHORT_FORMAT),
            right: YAxis::with_format(SHORT_FORMAT),
        }
    }
}

impl YAxes {
    pub fn to_json_data(&self) -> Value {
        json!([self.left.to_json_data(), self.right.to_json_data()])
    }
}

/// Both sides share the same axis.
pub fn single_y_axis(axis: YAxis) -> YAxes {
    YAxes {
        left: axis.clone(),
        right: axis,
    }
}

/// Convert the legacy list form of Y axes.
pub fn to_y_axes(axes: &[YAxis]) -> Result<YAxes, ValidationError> {
    let [left, right] = axes else {
        return Err(ValidationError::new(
            "yAxes",
            Rule::Range,
            format!("Must specify exactly two YAxes, got {}", axes.len()),
        ));
    };
    tracing::warn!("Specify Y axes using YAxes or single_y_axis, rather than a list");
    Ok(YAxes {
        left: left.clone(),
        right: right.clone(),
    })
}

/// Legacy graph threshold bands.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub threshold1: Option<Value>,
    pub threshold1_color: RGBA,
    pub threshold2: Option<Value>,
    pub threshold2_color: RGBA,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            threshold1: None,
            threshold1_color: GREY1,
            threshold2: None,
            threshold2_color: GREY2,
        }
    }
}

impl Grid {
    pub fn to_json_data(&self) -> Value {
        json!({
            "threshold1": self.threshold1,
            "threshold1Color": self.threshold1_color.to_json_data(),
            "threshold2": self.threshold2,
            "threshold2Color": self.threshold2_color.to_json_data(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub avg: bool,
    pub current: bool,
    pub max: bool,
    pub min: bool,
    pub show: bool,
    pub total: bool,
    /// Derived from `avg | current | max | min` when unset.
    pub values: Option<bool>,
    pub align_as_table: bool,
    pub hide_empty: bool,
    pub hide_zero: bool,
    pub right_side: bool,
    pub side_width: Option<u32>,
    pub sort: Option<String>,
    pub sort_desc: bool,
}

impl Default for Legend {
    fn default() -> Self {
        Self {
            avg: false,
            current: false,
            max: false,
            min: false,
            show: true,
            total: false,
            values: None,
            align_as_table: false,
            hide_empty: false,
            hide_zero: false,
            right_side: false,
            side_width: None,
            sort: None,
            sort_desc: false,
        }
    }
}

impl Legend {
    pub fn to_json_data(&self) -> Value {
        let values = self
            .values
            .unwrap_or(self.avg || self.current || self.max || self.min);
        json!({
            "avg": self.avg,
            "current": self.current,
            "max": self.max,
            "min": self.min,
            "show": self.show,
            "total": self.total,
            "values": values,
            "alignAsTable": self.align_as_table,
            "hideEmpty": self.hide_empty,
            "hideZero": self.hide_zero,
            "rightSide": self.right_side,
            "sideWidth": self.side_width,
            "sort": self.sort,
            "sortDesc": self.sort_desc,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PERCENT_UNIT_FORMAT;

    #[test]
    fn tooltip_uses_snake_value_type() {
        let json = Tooltip::default().to_json_data();
        assert_eq!(json["value_type"], "cumulative");
        assert_eq!(json["msResolution"], true);
    }

    #[test]
    fn x_axis_mode_is_closed_set() {
        assert_eq!("series".parse::<XAxisMode>(), Ok(XAxisMode::Series));
        assert_eq!("histogram".parse::<XAxisMode>().unwrap_err().rule, Rule::OneOf);
        assert_eq!(XAxis::default().to_json_data()["mode"], "time");
    }

    #[test]
    fn y_axes_serialize_as_pair() {
        let json = YAxes::default().to_json_data();
        assert_eq!(json.as_array().map(Vec::len), Some(2));
        assert_eq!(json[0]["format"], "short");
        assert_eq!(json[1]["logBase"], 1);
    }

    #[test]
    fn single_axis_mirrors_both_sides() {
        let axes = single_y_axis(YAxis::with_format(PERCENT_UNIT_FORMAT));
        assert_eq!(axes.left, axes.right);
    }

    #[test]
    fn legacy_list_needs_two_axes() {
        assert!(to_y_axes(&[YAxis::default(), YAxis::default()]).is_ok());
        assert_eq!(to_y_axes(&[YAxis::default()]).unwrap_err().rule, Rule::Range);
    }

    #[test]
    fn legend_values_derived_from_reducers() {
        assert_eq!(Legend::default().to_json_data()["values"], false);
        let legend = Legend {
            max: true,
            ..Default::default()
        };
        assert_eq!(legend.to_json_data()["values"], true);
        let forced = Legend {
            max: true,
            values: Some(false),
            ..Default::default()
        };
        assert_eq!(forced.to_json_data()["values"], false);
    }

    #[test]
    fn grid_renders_palette_colors() {
        let json = Grid::default().to_json_data();
        assert_eq!(json["threshold1Color"], "rgba(216, 200, 27, 0.27)");
        assert_eq!(json["threshold2"], Value::Null);
    }
}
