//! Grafana 8+ chart panels and the plotly plugin.

use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

use super::{panel_base, PanelBase, PanelVariant};
use crate::color::Color;
use crate::constants::{
    AE3E_PLOTLY_TYPE, BAR_CHART_TYPE, HISTOGRAM_TYPE, PIE_CHART_TYPE, PIE_CHART_V2_TYPE,
    STATE_TIMELINE_TYPE,
};
use crate::error::CoreError;
use crate::mappings::{mappings_json, FieldMapping};
use crate::thresholds::Thresholds;

// ---------------------------------------------------------------------------
// Pie charts
// ---------------------------------------------------------------------------

/// Legacy pie chart plugin. Superseded by [`PieChartv2`].
#[derive(Debug, Clone)]
pub struct PieChart {
    pub base: PanelBase,
    pub alias_colors: BTreeMap<String, Color>,
    pub format: String,
    pub legend_type: String,
    pub overrides: Vec<Value>,
    pub pie_type: String,
    pub percentage_decimals: u32,
    pub show_legend: bool,
    pub show_legend_values: bool,
    pub show_legend_percentage: bool,
}

impl Default for PieChart {
    fn default() -> Self {
        Self {
            base: PanelBase::with_thresholds(Thresholds::Text(String::new())),
            alias_colors: BTreeMap::new(),
            format: "none".to_string(),
            legend_type: "Right side".to_string(),
            overrides: Vec::new(),
            pie_type: "pie".to_string(),
            percentage_decimals: 0,
            show_legend: true,
            show_legend_values: true,
            show_legend_percentage: false,
        }
    }
}

impl PanelVariant for PieChart {
    panel_base!();

    fn overlay(&self) -> Result<Value, CoreError> {
        tracing::warn!(
            title = %self.base.title,
            "PieChart panel was deprecated in Grafana 8.0, use PieChartv2 instead"
        );
        let alias_colors: Map<String, Value> = self
            .alias_colors
            .iter()
            .map(|(alias, color)| (alias.clone(), color.to_json_data()))
            .collect();
        Ok(json!({
            "aliasColors": alias_colors,
            "format": self.format,
            "pieType": self.pie_type,
            "height": self.base.height,
            "fieldConfig": {
                "defaults": {"custom": {}},
                "overrides": self.overrides,
            },
            "legend": {
                "show": self.show_legend,
                "values": self.show_legend_values,
                "percentage": self.show_legend_percentage,
                "percentageDecimals": self.percentage_decimals,
            },
            "legendType": self.legend_type,
            "type": PIE_CHART_TYPE,
        }))
    }
}

#[derive(Debug, Clone)]
pub struct PieChartv2 {
    pub base: PanelBase,
    pub custom: Map<String, Value>,
    pub color_mode: String,
    pub legend_display_mode: String,
    pub legend_placement: String,
    pub legend_values: Vec<Value>,
    pub mappings: Vec<FieldMapping>,
    pub overrides: Vec<Value>,
    pub pie_type: String,
    pub reduce_options_calcs: Vec<String>,
    pub reduce_options_fields: String,
    pub reduce_options_values: bool,
    pub tooltip_mode: String,
    pub tooltip_sort: String,
    pub unit: String,
}

impl Default for PieChartv2 {
    fn default() -> Self {
        Self {
            base: PanelBase::default(),
            custom: Map::new(),
            color_mode: "palette-classic".to_string(),
            legend_display_mode: "list".to_string(),
            legend_placement: "bottom".to_string(),
            legend_values: Vec::new(),
            mappings: Vec::new(),
            overrides: Vec::new(),
            pie_type: "pie".to_string(),
            reduce_options_calcs: vec!["lastNotNull".to_string()],
            reduce_options_fields: String::new(),
            reduce_options_values: false,
            tooltip_mode: "single".to_string(),
            tooltip_sort: "none".to_string(),
            unit: String::new(),
        }
    }
}

impl PanelVariant for PieChartv2 {
    panel_base!();

    fn overlay(&self) -> Result<Value, CoreError> {
        Ok(json!({
            "fieldConfig": {
                "defaults": {
                    "color": {"mode": self.color_mode},
                    "custom": self.custom,
                    "mappings": mappings_json(&self.mappings),
                    "unit": self.unit,
                },
                "overrides": self.overrides,
            },
            "options": {
                "reduceOptions": {
                    "values": self.reduce_options_values,
                    "calcs": self.reduce_options_calcs,
                    "fields": self.reduce_options_fields,
                },
                "pieType": self.pie_type,
                "tooltip": {"mode": self.tooltip_mode, "sort": self.tooltip_sort},
                "legend": {
                    "displayMode": self.legend_display_mode,
                    "placement": self.legend_placement,
                    "values": self.legend_values,
                },
            },
            "type": PIE_CHART_V2_TYPE,
        }))
    }
}

// ---------------------------------------------------------------------------
// State timeline and histogram
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct StateTimeline {
    pub base: PanelBase,
    pub align_value: String,
    pub color_mode: String,
    pub fill_opacity: u32,
    pub legend_display_mode: String,
    pub legend_placement: String,
    pub line_width: u32,
    pub mappings: Vec<FieldMapping>,
    pub overrides: Vec<Value>,
    pub merge_values: bool,
    pub row_height: f64,
    pub show_value: String,
    pub tooltip_mode: String,
}

impl Default for StateTimeline {
    fn default() -> Self {
        Self {
            base: PanelBase::default(),
            align_value: "left".to_string(),
            color_mode: "thresholds".to_string(),
            fill_opacity: 70,
            legend_display_mode: "list".to_string(),
            legend_placement: "bottom".to_string(),
            line_width: 0,
            mappings: Vec::new(),
            overrides: Vec::new(),
            merge_values: true,
            row_height: 0.9,
            show_value: "auto".to_string(),
            tooltip_mode: "single".to_string(),
        }
    }
}

impl PanelVariant for StateTimeline {
    panel_base!();

    fn overlay(&self) -> Result<Value, CoreError> {
        Ok(json!({
            "fieldConfig": {
                "defaults": {
                    "custom": {"lineWidth": self.line_width, "fillOpacity": self.fill_opacity},
                    "color": {"mode": self.color_mode},
                    "mappings": mappings_json(&self.mappings),
                },
                "overrides": self.overrides,
            },
            "options": {
                "mergeValues": self.merge_values,
                "showValue": self.show_value,
                "alignValue": self.align_value,
                "rowHeight": self.row_height,
                "legend": {"displayMode": self.legend_display_mode, "placement": self.legend_placement},
                "tooltip": {"mode": self.tooltip_mode},
            },
            "type": STATE_TIMELINE_TYPE,
        }))
    }
}

#[derive(Debug, Clone)]
pub struct Histogram {
    pub base: PanelBase,
    pub bucket_offset: u32,
    /// Emitted only when positive; Grafana picks a size otherwise.
    pub bucket_size: u32,
    pub color_mode: String,
    pub combine: bool,
    pub fill_opacity: u32,
    pub legend_display_mode: String,
    pub legend_placement: String,
    pub line_width: u32,
    pub mappings: Vec<FieldMapping>,
    pub overrides: Vec<Value>,
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            base: PanelBase::default(),
            bucket_offset: 0,
            bucket_size: 0,
            color_mode: "thresholds".to_string(),
            combine: false,
            fill_opacity: 80,
            legend_display_mode: "list".to_string(),
            legend_placement: "bottom".to_string(),
            line_width: 0,
            mappings: Vec::new(),
            overrides: Vec::new(),
        }
    }
}

impl PanelVariant for Histogram {
    panel_base!();

    fn overlay(&self) -> Result<Value, CoreError> {
        let mut histogram = json!({
            "fieldConfig": {
                "defaults": {
                    "custom": {"lineWidth": self.line_width, "fillOpacity": self.fill_opacity},
                    "color": {"mode": self.color_mode},
                    "mappings": mappings_json(&self.mappings),
                },
                "overrides": self.overrides,
            },
            "options": {
                "legend": {"displayMode": self.legend_display_mode, "placement": self.legend_placement},
                "bucketOffset": self.bucket_offset,
                "combine": self.combine,
            },
            "type": HISTOGRAM_TYPE,
        });
        if self.bucket_size > 0 {
            histogram["options"]["bucketSize"] = json!(self.bucket_size);
        }
        Ok(histogram)
    }
}

// ---------------------------------------------------------------------------
// Bar chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct BarChart {
    pub base: PanelBase,
    pub orientation: String,
    pub x_tick_label_rotation: i32,
    pub x_tick_label_spacing: i32,
    pub show_value: String,
    pub stacking: String,
    pub group_width: f64,
    pub bar_width: f64,
    pub bar_radius: f64,
    pub tooltip_mode: String,
    pub tooltip_sort: String,
    pub show_legend: bool,
    pub legend_display_mode: String,
    pub legend_placement: String,
    pub legend_calcs: Vec<String>,
    pub line_width: u32,
    pub fill_opacity: u32,
    pub gradient_mode: String,
    pub axis_placement: String,
    pub axis_label: String,
    pub axis_color_mode: String,
    pub scale_distribution_type: String,
    pub axis_centered_zero: bool,
    pub hide_from_tooltip: bool,
    pub hide_from_viz: bool,
    pub hide_from_legend: bool,
    pub color_mode: String,
    /// Only rendered when `color_mode` is `"fixed"`.
    pub fixed_color: String,
    pub mappings: Vec<FieldMapping>,
    pub thresholds_mode: String,
    pub threshold_steps: Vec<Value>,
    pub overrides: Vec<Value>,
}

impl Default for BarChart {
    fn default() -> Self {
        Self {
            base: PanelBase::default(),
            orientation: "auto".to_string(),
            x_tick_label_rotation: 0,
            x_tick_label_spacing: 0,
            show_value: "auto".to_string(),
            stacking: "none".to_string(),
            group_width: 0.7,
            bar_width: 0.97,
            bar_radius: 0.0,
            tooltip_mode: "single".to_string(),
            tooltip_sort: "none".to_string(),
            show_legend: true,
            legend_display_mode: "list".to_string(),
            legend_placement: "bottom".to_string(),
            legend_calcs: Vec::new(),
            line_width: 1,
            fill_opacity: 80,
            gradient_mode: "none".to_string(),
            axis_placement: "auto".to_string(),
            axis_label: String::new(),
            axis_color_mode: "text".to_string(),
            scale_distribution_type: "linear".to_string(),
            axis_centered_zero: false,
            hide_from_tooltip: false,
            hide_from_viz: false,
            hide_from_legend: false,
            color_mode: "palette-classic".to_string(),
            fixed_color: "blue".to_string(),
            mappings: Vec::new(),
            thresholds_mode: "absolute".to_string(),
            threshold_steps: vec![
                json!({"value": null, "color": "green"}),
                json!({"value": 80, "color": "red"}),
            ],
            overrides: Vec::new(),
        }
    }
}

impl PanelVariant for BarChart {
    panel_base!();

    fn overlay(&self) -> Result<Value, CoreError> {
        let fixed_color = if self.color_mode == "fixed" {
            self.fixed_color.as_str()
        } else {
            "none"
        };
        Ok(json!({
            "options": {
                "orientation": self.orientation,
                "xTickLabelRotation": self.x_tick_label_rotation,
                "xTickLabelSpacing": self.x_tick_label_spacing,
                "showValue": self.show_value,
                "stacking": self.stacking,
                "groupWidth": self.group_width,
                "barWidth": self.bar_width,
                "barRadius": self.bar_radius,
                "tooltip": {"mode": self.tooltip_mode, "sort": self.tooltip_sort},
                "legend": {
                    "showLegend": self.show_legend,
                    "displayMode": self.legend_display_mode,
                    "placement": self.legend_placement,
                    "calcs": self.legend_calcs,
                },
            },
            "fieldConfig": {
                "defaults": {
                    "custom": {
                        "lineWidth": self.line_width,
                        "fillOpacity": self.fill_opacity,
                        "gradientMode": self.gradient_mode,
                        "axisPlacement": self.axis_placement,
                        "axisLabel": self.axis_label,
                        "axisColorMode": self.axis_color_mode,
                        "scaleDistribution": {"type": self.scale_distribution_type},
                        "axisCenteredZero": self.axis_centered_zero,
                        "hideFrom": {
                            "tooltip": self.hide_from_tooltip,
                            "viz": self.hide_from_viz,
                            "legend": self.hide_from_legend,
                        },
                    },
                    "color": {"mode": self.color_mode, "fixedColor": fixed_color},
                    "mappings": mappings_json(&self.mappings),
                    "thresholds": {"mode": self.thresholds_mode, "steps": self.threshold_steps},
                },
                "overrides": self.overrides,
            },
            "type": BAR_CHART_TYPE,
        }))
    }
}

// ---------------------------------------------------------------------------
// Plotly
// ---------------------------------------------------------------------------

const DEFAULT_PLOTLY_SCRIPT: &str = "console.log(data)
            var trace = {
              x: data.series[0].fields[0].values.buffer,
              y: data.series[0].fields[1].values.buffer
            };
            return {data:[trace],layout:{title:'My Chart'}};";

#[derive(Debug, Clone)]
pub struct Ae3ePlotly {
    pub base: PanelBase,
    /// Deep-merged into `options.configuration`.
    pub configuration: Map<String, Value>,
    pub data: Vec<Value>,
    /// Deep-merged into `options.layout`.
    pub layout: Map<String, Value>,
    pub script: String,
    pub click_script: String,
}

impl Default for Ae3ePlotly {
    fn default() -> Self {
        Self {
            base: PanelBase::default(),
            configuration: Map::new(),
            data: Vec::new(),
            layout: Map::new(),
            script: DEFAULT_PLOTLY_SCRIPT.to_string(),
            click_script: String::new(),
        }
    }
}

impl PanelVariant for Ae3ePlotly {
    panel_base!();

    fn overlay(&self) -> Result<Value, CoreError> {
        Ok(json!({
            "fieldConfig": {"defaults": {}, "overrides": []},
            "options": {
                "configuration": self.configuration,
                "data": self.data,
                "layout": self.layout,
                "onclick": self.click_script,
                "script": self.script,
            },
            "type": AE3E_PLOTLY_TYPE,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::into_map;
    use crate::panels::Panel;

    #[test]
    fn pie_chart_legend_block() {
        let pie = PieChart {
            alias_colors: BTreeMap::from([("errors".to_string(), Color::named("red"))]),
            ..Default::default()
        };
        let json = pie.to_json_data().unwrap();
        assert_eq!(json["type"], "grafana-piechart-panel");
        assert_eq!(json["aliasColors"], json!({"errors": "red"}));
        assert_eq!(
            json["legend"],
            json!({"show": true, "values": true, "percentage": false, "percentageDecimals": 0})
        );
        assert_eq!(json["fieldConfig"]["defaults"]["thresholds"]["steps"], "");
    }

    #[test]
    fn pie_chart_v2_options() {
        let json = PieChartv2::default().to_json_data().unwrap();
        assert_eq!(json["type"], "piechart");
        assert_eq!(json["options"]["reduceOptions"]["calcs"], json!(["lastNotNull"]));
        assert_eq!(json["fieldConfig"]["defaults"]["color"]["mode"], "palette-classic");
        assert_eq!(json["options"]["tooltip"], json!({"mode": "single", "sort": "none"}));
    }

    #[test]
    fn state_timeline_defaults() {
        let json = StateTimeline::default().to_json_data().unwrap();
        assert_eq!(json["options"]["rowHeight"], 0.9);
        assert_eq!(json["fieldConfig"]["defaults"]["custom"]["fillOpacity"], 70);
        assert_eq!(json["type"], "state-timeline");
    }

    #[test]
    fn histogram_bucket_size_only_when_positive() {
        let json = Histogram::default().to_json_data().unwrap();
        assert!(json["options"].get("bucketSize").is_none());
        let sized = Histogram {
            bucket_size: 5,
            ..Default::default()
        };
        assert_eq!(sized.to_json_data().unwrap()["options"]["bucketSize"], 5);
    }

    #[test]
    fn bar_chart_fixed_color_only_in_fixed_mode() {
        let json = BarChart::default().to_json_data().unwrap();
        assert_eq!(json["fieldConfig"]["defaults"]["color"]["fixedColor"], "none");
        assert_eq!(json["fieldConfig"]["defaults"]["thresholds"]["steps"][1]["value"], 80);

        let fixed = BarChart {
            color_mode: "fixed".into(),
            ..Default::default()
        };
        let json = fixed.to_json_data().unwrap();
        assert_eq!(json["fieldConfig"]["defaults"]["color"]["fixedColor"], "blue");
    }

    #[test]
    fn plotly_passes_layout_and_configuration_through() {
        let plotly = Ae3ePlotly {
            layout: into_map(json!({"xaxis": {"title": "t"}})),
            configuration: into_map(json!({"displayModeBar": false})),
            ..Default::default()
        };
        let json = plotly.to_json_data().unwrap();
        assert_eq!(json["options"]["layout"], json!({"xaxis": {"title": "t"}}));
        assert_eq!(json["options"]["configuration"], json!({"displayModeBar": false}));
        assert!(json["options"]["script"].as_str().unwrap().starts_with("console.log(data)"));
    }

    #[test]
    fn extra_json_wins_over_overlay() {
        let mut histogram = Histogram {
            bucket_size: 5,
            ..Default::default()
        };
        histogram.base.extra_json = Some(into_map(json!({"options": {"bucketSize": 10}})));
        let json = histogram.to_json_data().unwrap();
        assert_eq!(json["options"]["bucketSize"], 10);
        assert_eq!(json["options"]["combine"], false);
    }
}
