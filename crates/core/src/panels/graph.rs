//! Legacy graph and the Grafana 8 time series panel.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{json, Map, Value};

use super::{panel_base, PanelBase, PanelVariant};
use crate::alerting::Alert;
use crate::axes::{Grid, Legend, Tooltip, XAxis, YAxes};
use crate::color::Color;
use crate::constants::{
    DEFAULT_FILL, DEFAULT_LINE_WIDTH, DEFAULT_POINT_RADIUS, DEFAULT_RENDERER, GRAPH_TYPE,
    NULL_CONNECTED, TIMESERIES_TYPE,
};
use crate::error::CoreError;
use crate::mappings::{mappings_json, FieldMapping};
use crate::targets::{auto_ref_ids, QueryTarget};
use crate::thresholds::{SeriesOverride, Thresholds};

#[derive(Debug, Clone)]
pub struct Graph {
    pub base: PanelBase,
    /// Legacy alert; when set the graph's own thresholds are not rendered.
    pub alert: Option<Alert>,
    pub alert_threshold: bool,
    pub alias_colors: BTreeMap<String, Color>,
    pub align: bool,
    pub align_level: i64,
    pub bars: bool,
    pub data_links: Vec<Value>,
    pub fill: u32,
    pub fill_gradient: u32,
    pub grid: Grid,
    pub is_new: bool,
    pub legend: Legend,
    pub lines: bool,
    pub line_width: u32,
    pub null_point_mode: String,
    pub percentage: bool,
    pub point_radius: u32,
    pub points: bool,
    pub renderer: String,
    pub series_overrides: Vec<SeriesOverride>,
    pub stack: bool,
    pub stepped_line: bool,
    pub tooltip: Tooltip,
    pub unit: String,
    pub x_axis: XAxis,
    pub y_axes: YAxes,
}

impl Default for Graph {
    fn default() -> Self {
        Self {
            base: PanelBase::with_thresholds(Thresholds::Graph(Vec::new())),
            alert: None,
            alert_threshold: true,
            alias_colors: BTreeMap::new(),
            align: false,
            align_level: 0,
            bars: false,
            data_links: Vec::new(),
            fill: DEFAULT_FILL,
            fill_gradient: 0,
            grid: Grid::default(),
            is_new: true,
            legend: Legend::default(),
            lines: true,
            line_width: DEFAULT_LINE_WIDTH,
            null_point_mode: NULL_CONNECTED.to_string(),
            percentage: false,
            point_radius: DEFAULT_POINT_RADIUS,
            points: false,
            renderer: DEFAULT_RENDERER.to_string(),
            series_overrides: Vec::new(),
            stack: false,
            stepped_line: false,
            tooltip: Tooltip::default(),
            unit: String::new(),
            x_axis: XAxis::default(),
            y_axes: YAxes::default(),
        }
    }
}

impl Graph {
    pub fn new(title: impl Into<String>, targets: Vec<Arc<dyn QueryTarget>>) -> Self {
        let mut graph = Self::default();
        graph.base.title = title.into();
        graph.base.targets = targets;
        graph
    }

    /// A copy whose targets without a refId get the first unused letters.
    pub fn auto_ref_ids(&self) -> Result<Self, CoreError> {
        let mut graph = self.clone();
        graph.base.targets = auto_ref_ids(&self.base.targets)?;
        Ok(graph)
    }
}

impl PanelVariant for Graph {
    panel_base!();

    fn overlay(&self) -> Result<Value, CoreError> {
        let alias_colors: Map<String, Value> = self
            .alias_colors
            .iter()
            .map(|(alias, color)| (alias.clone(), color.to_json_data()))
            .collect();
        let series_overrides = self
            .series_overrides
            .iter()
            .map(SeriesOverride::to_json_data)
            .collect::<Vec<_>>();
        let mut graph = json!({
            "aliasColors": alias_colors,
            "bars": self.bars,
            "error": self.base.error,
            "fieldConfig": {
                "defaults": {"unit": self.unit},
            },
            "fill": self.fill,
            "grid": self.grid.to_json_data(),
            "isNew": self.is_new,
            "legend": self.legend.to_json_data(),
            "lines": self.lines,
            "linewidth": self.line_width,
            "minSpan": self.base.min_span,
            "nullPointMode": self.null_point_mode,
            "options": {
                "dataLinks": self.data_links,
                "alertThreshold": self.alert_threshold,
            },
            "percentage": self.percentage,
            "pointradius": self.point_radius,
            "points": self.points,
            "renderer": self.renderer,
            "seriesOverrides": series_overrides,
            "stack": self.stack,
            "steppedLine": self.stepped_line,
            "tooltip": self.tooltip.to_json_data(),
            "thresholds": self.base.thresholds.to_json_data(),
            "type": GRAPH_TYPE,
            "xaxis": self.x_axis.to_json_data(),
            "yaxes": self.y_axes.to_json_data(),
            "yaxis": {"align": self.align, "alignLevel": self.align_level},
        });
        if let Some(alert) = &self.alert {
            if !self.base.thresholds.is_empty() {
                tracing::warn!(
                    title = %self.base.title,
                    "Graph threshold ignored as alerts defined"
                );
            }
            graph["alert"] = alert.to_json_data()?;
            graph["thresholds"] = json!([]);
        }
        Ok(graph)
    }
}

// ---------------------------------------------------------------------------
// TimeSeries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct TimeSeries {
    pub base: PanelBase,
    pub axis_placement: String,
    pub axis_label: String,
    pub bar_alignment: i64,
    pub color_mode: String,
    pub draw_style: String,
    pub fill_opacity: u32,
    pub gradient_mode: String,
    pub legend_display_mode: String,
    pub legend_placement: String,
    pub legend_calcs: Vec<String>,
    pub line_interpolation: String,
    pub line_width: u32,
    pub mappings: Vec<FieldMapping>,
    pub overrides: Vec<Value>,
    pub point_size: u32,
    pub scale_distribution_type: String,
    pub scale_distribution_log: u32,
    pub span_nulls: bool,
    pub show_points: String,
    pub stacking: Map<String, Value>,
    pub tooltip_mode: String,
    pub tooltip_sort: String,
    pub unit: String,
    pub thresholds_style_mode: String,
    pub value_min: Option<i64>,
    pub value_max: Option<i64>,
    pub value_decimals: Option<u32>,
    pub axis_soft_min: Option<i64>,
    pub axis_soft_max: Option<i64>,
}

impl Default for TimeSeries {
    fn default() -> Self {
        Self {
            base: PanelBase::default(),
            axis_placement: "auto".to_string(),
            axis_label: String::new(),
            bar_alignment: 0,
            color_mode: "palette-classic".to_string(),
            draw_style: "line".to_string(),
            fill_opacity: 0,
            gradient_mode: "none".to_string(),
            legend_display_mode: "list".to_string(),
            legend_placement: "bottom".to_string(),
            legend_calcs: Vec::new(),
            line_interpolation: "linear".to_string(),
            line_width: 1,
            mappings: Vec::new(),
            overrides: Vec::new(),
            point_size: 5,
            scale_distribution_type: "linear".to_string(),
            scale_distribution_log: 2,
            span_nulls: false,
            show_points: "auto".to_string(),
            stacking: Map::new(),
            tooltip_mode: "single".to_string(),
            tooltip_sort: "none".to_string(),
            unit: String::new(),
            thresholds_style_mode: "off".to_string(),
            value_min: None,
            value_max: None,
            value_decimals: None,
            axis_soft_min: None,
            axis_soft_max: None,
        }
    }
}

impl TimeSeries {
    pub fn new(title: impl Into<String>, targets: Vec<Arc<dyn QueryTarget>>) -> Self {
        let mut panel = Self::default();
        panel.base.title = title.into();
        panel.base.targets = targets;
        panel
    }
}

impl PanelVariant for TimeSeries {
    panel_base!();

    fn overlay(&self) -> Result<Value, CoreError> {
        Ok(json!({
            "fieldConfig": {
                "defaults": {
                    "color": {"mode": self.color_mode},
                    "custom": {
                        "axisPlacement": self.axis_placement,
                        "axisLabel": self.axis_label,
                        "drawStyle": self.draw_style,
                        "lineInterpolation": self.line_interpolation,
                        "barAlignment": self.bar_alignment,
                        "lineWidth": self.line_width,
                        "fillOpacity": self.fill_opacity,
                        "gradientMode": self.gradient_mode,
                        "spanNulls": self.span_nulls,
                        "showPoints": self.show_points,
                        "pointSize": self.point_size,
                        "stacking": self.stacking,
                        "scaleDistribution": {
                            "type": self.scale_distribution_type,
                            "log": self.scale_distribution_log,
                        },
                        "hideFrom": {"tooltip": false, "viz": false, "legend": false},
                        "thresholdsStyle": {"mode": self.thresholds_style_mode},
                        "axisSoftMin": self.axis_soft_min,
                        "axisSoftMax": self.axis_soft_max,
                    },
                    "mappings": mappings_json(&self.mappings),
                    "min": self.value_min,
                    "max": self.value_max,
                    "decimals": self.value_decimals,
                    "unit": self.unit,
                },
                "overrides": self.overrides,
            },
            "options": {
                "legend": {
                    "displayMode": self.legend_display_mode,
                    "placement": self.legend_placement,
                    "calcs": self.legend_calcs,
                },
                "tooltip": {"mode": self.tooltip_mode, "sort": self.tooltip_sort},
            },
            "type": TIMESERIES_TYPE,
        }))
    }
}
