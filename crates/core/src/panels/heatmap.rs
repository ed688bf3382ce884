//! Heatmap and the statusmap plugin panel.

use serde_json::{json, Map, Value};

use super::{panel_base, PanelBase, PanelVariant};
use crate::alerting::Alert;
use crate::axes::{Legend, Tooltip, XAxis, YAxis};
use crate::constants::{HEATMAP_TYPE, NULL_AS_ZERO, STATUSMAP_TYPE};
use crate::error::CoreError;
use crate::merge::into_map;

#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapColor {
    pub card_color: String,
    pub color_scale: String,
    pub color_scheme: String,
    pub exponent: f64,
    pub mode: String,
    pub max: Option<Value>,
    pub min: Option<Value>,
}

impl Default for HeatmapColor {
    fn default() -> Self {
        Self {
            card_color: "#b4ff00".to_string(),
            color_scale: "sqrt".to_string(),
            color_scheme: "interpolateOranges".to_string(),
            exponent: 0.5,
            mode: "spectrum".to_string(),
            max: None,
            min: None,
        }
    }
}

impl HeatmapColor {
    pub fn to_json_data(&self) -> Value {
        json!({
            "mode": self.mode,
            "cardColor": self.card_color,
            "colorScale": self.color_scale,
            "exponent": self.exponent,
            "colorScheme": self.color_scheme,
            "max": self.max,
            "min": self.min,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Heatmap {
    pub base: PanelBase,
    pub legend: Map<String, Value>,
    pub tooltip: Tooltip,
    pub cards: Map<String, Value>,
    pub color: HeatmapColor,
    pub data_format: String,
    pub heatmap: Map<String, Value>,
    pub hide_zero_buckets: bool,
    pub highlight_cards: bool,
    pub options: Vec<Value>,
    pub x_axis: XAxis,
    pub x_bucket_number: Option<u32>,
    pub x_bucket_size: Option<Value>,
    pub y_axis: YAxis,
    pub y_bucket_bound: Option<String>,
    pub y_bucket_number: Option<u32>,
    pub y_bucket_size: Option<Value>,
    pub reverse_y_buckets: bool,
}

impl Default for Heatmap {
    fn default() -> Self {
        Self {
            base: PanelBase::default(),
            legend: into_map(json!({"show": false})),
            tooltip: Tooltip::default(),
            cards: into_map(json!({"cardPadding": null, "cardRound": null})),
            color: HeatmapColor::default(),
            data_format: "timeseries".to_string(),
            heatmap: Map::new(),
            hide_zero_buckets: false,
            highlight_cards: true,
            options: Vec::new(),
            x_axis: XAxis::default(),
            x_bucket_number: None,
            x_bucket_size: None,
            y_axis: YAxis::default(),
            y_bucket_bound: None,
            y_bucket_number: None,
            y_bucket_size: None,
            reverse_y_buckets: false,
        }
    }
}

impl PanelVariant for Heatmap {
    panel_base!();

    fn overlay(&self) -> Result<Value, CoreError> {
        Ok(json!({
            "cards": self.cards,
            "color": self.color.to_json_data(),
            "dataFormat": self.data_format,
            "heatmap": self.heatmap,
            "hideZeroBuckets": self.hide_zero_buckets,
            "highlightCards": self.highlight_cards,
            "legend": self.legend,
            "options": self.options,
            "reverseYBuckets": self.reverse_y_buckets,
            "tooltip": self.tooltip.to_json_data(),
            "type": HEATMAP_TYPE,
            "xAxis": self.x_axis.to_json_data(),
            "xBucketNumber": self.x_bucket_number,
            "xBucketSize": self.x_bucket_size,
            "yAxis": self.y_axis.to_json_data(),
            "yBucketBound": self.y_bucket_bound,
            "yBucketNumber": self.y_bucket_number,
            "yBucketSize": self.y_bucket_size,
        }))
    }
}

// ---------------------------------------------------------------------------
// Statusmap
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct StatusmapColor {
    pub card_color: String,
    pub color_scale: String,
    pub color_scheme: String,
    pub exponent: f64,
    pub mode: String,
    pub thresholds: Vec<Value>,
    pub max: Option<Value>,
    pub min: Option<Value>,
}

impl Default for StatusmapColor {
    fn default() -> Self {
        Self {
            card_color: "#b4ff00".to_string(),
            color_scale: "sqrt".to_string(),
            color_scheme: "GnYlRd".to_string(),
            exponent: 0.5,
            mode: "spectrum".to_string(),
            thresholds: Vec::new(),
            max: None,
            min: None,
        }
    }
}

impl StatusmapColor {
    pub fn to_json_data(&self) -> Value {
        json!({
            "mode": self.mode,
            "cardColor": self.card_color,
            "colorScale": self.color_scale,
            "exponent": self.exponent,
            "colorScheme": self.color_scheme,
            "max": self.max,
            "min": self.min,
            "thresholds": self.thresholds,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Statusmap {
    pub base: PanelBase,
    pub alert: Option<Alert>,
    pub color: StatusmapColor,
    pub is_new: bool,
    pub legend: Legend,
    pub null_point_mode: String,
    pub tooltip: Tooltip,
    pub x_axis: XAxis,
    pub y_axis: YAxis,
}

impl Default for Statusmap {
    fn default() -> Self {
        Self {
            base: PanelBase::default(),
            alert: None,
            color: StatusmapColor::default(),
            is_new: true,
            legend: Legend::default(),
            null_point_mode: NULL_AS_ZERO.to_string(),
            tooltip: Tooltip::default(),
            x_axis: XAxis::default(),
            y_axis: YAxis::default(),
        }
    }
}

impl PanelVariant for Statusmap {
    panel_base!();

    fn overlay(&self) -> Result<Value, CoreError> {
        let mut statusmap = json!({
            "color": self.color.to_json_data(),
            "isNew": self.is_new,
            "legend": self.legend.to_json_data(),
            "minSpan": self.base.min_span,
            "nullPointMode": self.null_point_mode,
            "tooltip": self.tooltip.to_json_data(),
            "type": STATUSMAP_TYPE,
            "xaxis": self.x_axis.to_json_data(),
            "yaxis": self.y_axis.to_json_data(),
        });
        if let Some(alert) = &self.alert {
            statusmap["alert"] = alert.to_json_data()?;
        }
        Ok(statusmap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::Panel;

    #[test]
    fn heatmap_defaults() {
        let json = Heatmap::default().to_json_data().unwrap();
        assert_eq!(json["type"], "heatmap");
        assert_eq!(json["legend"], json!({"show": false}));
        assert_eq!(json["cards"], json!({"cardPadding": null, "cardRound": null}));
        assert_eq!(json["color"]["colorScheme"], "interpolateOranges");
        assert_eq!(json["dataFormat"], "timeseries");
        assert_eq!(json["yAxis"]["logBase"], 1);
    }

    #[test]
    fn statusmap_without_alert() {
        let json = Statusmap::default().to_json_data().unwrap();
        assert_eq!(json["type"], "flant-statusmap-panel");
        assert_eq!(json["nullPointMode"], "null as zero");
        assert_eq!(json["color"]["colorScheme"], "GnYlRd");
        assert!(json.get("alert").is_none());
    }
}
