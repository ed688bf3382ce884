//! Third-party plugin panels: discrete, ePict, SVG and worldmap.

use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use super::{panel_base, PanelBase, PanelVariant};
use crate::color::{Color, ColorCode, RGBA};
use crate::constants::{DISCRETE_TYPE, EPICT_TYPE, SVG_TYPE, WORLD_MAP_TYPE};
use crate::error::CoreError;
use crate::mappings::{DiscreteColorMappingItem, RangeMap, ValueMap};

// ---------------------------------------------------------------------------
// Discrete
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Discrete {
    pub base: PanelBase,
    pub background_color: Color,
    pub line_color: Color,
    pub metric_name_color: Color,
    pub time_text_color: Color,
    pub value_text_color: Color,
    pub decimals: u32,
    pub legend_percent_decimals: u32,
    pub row_height: u32,
    pub text_size: u32,
    pub text_size_time: u32,
    pub units: String,
    pub legend_sort_by: String,
    pub highlight_on_mouseover: bool,
    pub show_legend: bool,
    pub show_legend_percent: bool,
    pub show_legend_names: bool,
    pub show_legend_values: bool,
    pub show_time_axis: bool,
    pub use_12_hour_clock: bool,
    pub write_metric_names: bool,
    pub write_last_value: bool,
    pub write_all_values: bool,
    pub show_distinct_count: Option<bool>,
    pub show_legend_counts: Option<bool>,
    pub show_legend_time: Option<bool>,
    pub show_transition_count: Option<bool>,
    pub color_maps: Vec<DiscreteColorMappingItem>,
    pub range_maps: Vec<RangeMap>,
    pub value_maps: Vec<ValueMap>,
}

impl Default for Discrete {
    fn default() -> Self {
        Self {
            base: PanelBase::default(),
            background_color: RGBA::rgba(128, 128, 128, 0.1).into(),
            line_color: RGBA::rgba(0, 0, 0, 0.1).into(),
            metric_name_color: ColorCode::from_static("#000000").into(),
            time_text_color: ColorCode::from_static("#d8d9da").into(),
            value_text_color: ColorCode::from_static("#000000").into(),
            decimals: 0,
            legend_percent_decimals: 0,
            row_height: 50,
            text_size: 24,
            text_size_time: 12,
            units: "none".to_string(),
            legend_sort_by: "-ms".to_string(),
            highlight_on_mouseover: true,
            show_legend: true,
            show_legend_percent: true,
            show_legend_names: true,
            show_legend_values: true,
            show_time_axis: true,
            use_12_hour_clock: false,
            write_metric_names: false,
            write_last_value: true,
            write_all_values: false,
            show_distinct_count: None,
            show_legend_counts: None,
            show_legend_time: None,
            show_transition_count: None,
            color_maps: Vec::new(),
            range_maps: Vec::new(),
            value_maps: Vec::new(),
        }
    }
}

impl PanelVariant for Discrete {
    panel_base!();

    fn overlay(&self) -> Result<Value, CoreError> {
        let color_maps: Vec<Value> = self
            .color_maps
            .iter()
            .map(DiscreteColorMappingItem::to_json_data)
            .collect();
        let range_maps: Vec<Value> = self.range_maps.iter().map(RangeMap::to_json_data).collect();
        let value_maps: Vec<Value> = self.value_maps.iter().map(ValueMap::to_json_data).collect();
        Ok(json!({
            "type": DISCRETE_TYPE,
            "backgroundColor": self.background_color.to_json_data(),
            "lineColor": self.line_color.to_json_data(),
            "metricNameColor": self.metric_name_color.to_json_data(),
            "timeTextColor": self.time_text_color.to_json_data(),
            "valueTextColor": self.value_text_color.to_json_data(),
            "legendPercentDecimals": self.legend_percent_decimals,
            "decimals": self.decimals,
            "rowHeight": self.row_height,
            "textSize": self.text_size,
            "textSizeTime": self.text_size_time,
            "units": self.units,
            "legendSortBy": self.legend_sort_by,
            "highlightOnMouseover": self.highlight_on_mouseover,
            "showLegend": self.show_legend,
            "showLegendPercent": self.show_legend_percent,
            "showLegendNames": self.show_legend_names,
            "showLegendValues": self.show_legend_values,
            "showTimeAxis": self.show_time_axis,
            "use12HourClock": self.use_12_hour_clock,
            "writeMetricNames": self.write_metric_names,
            "writeLastValue": self.write_last_value,
            "writeAllValues": self.write_all_values,
            "showDistinctCount": self.show_distinct_count,
            "showLegendCounts": self.show_legend_counts,
            "showLegendTime": self.show_legend_time,
            "showTransitionCount": self.show_transition_count,
            "colorMaps": color_maps,
            "rangeMaps": range_maps,
            "valueMaps": value_maps,
        }))
    }
}

// ---------------------------------------------------------------------------
// ePict
// ---------------------------------------------------------------------------

string_enum! {
    pub enum OrbLocation ("orbLocation", default = Left) {
        Left => "Left",
        Right => "Right",
        Top => "Top",
        Bottom => "Bottom",
    }
}

/// An info box placed on an ePict background image.
#[derive(Debug, Clone, PartialEq)]
pub struct EPictBox {
    pub angle: i32,
    pub background_color: Color,
    pub blink_high: bool,
    pub blink_low: bool,
    pub color: Color,
    pub color_high: Color,
    pub color_low: Color,
    pub color_medium: Color,
    pub color_symbol: bool,
    /// URL of a custom symbol. Setting it renders `symbol` as `"custom"`.
    pub custom_symbol: String,
    pub decimal: u32,
    pub font_size: u32,
    pub has_background: bool,
    pub has_orb: bool,
    pub has_symbol: bool,
    pub orb_hide_text: bool,
    pub orb_location: OrbLocation,
    pub orb_size: u32,
    pub prefix: String,
    pub prefix_size: u32,
    pub selected: bool,
    pub serie: String,
    pub suffix: String,
    pub suffix_size: u32,
    pub symbol: String,
    pub symbol_def_height: u32,
    pub symbol_def_width: u32,
    pub symbol_height: u32,
    pub symbol_hide_text: bool,
    pub symbol_width: u32,
    pub text: String,
    /// Comma-separated coloring thresholds. Non-empty enables them.
    pub thresholds: String,
    pub url: String,
    pub xpos: i32,
    pub ypos: i32,
}

impl Default for EPictBox {
    fn default() -> Self {
        let black = || Color::Named("#000".to_string());
        Self {
            angle: 0,
            background_color: black(),
            blink_high: false,
            blink_low: false,
            color: black(),
            color_high: black(),
            color_low: black(),
            color_medium: black(),
            color_symbol: false,
            custom_symbol: String::new(),
            decimal: 0,
            font_size: 12,
            has_background: false,
            has_orb: false,
            has_symbol: false,
            orb_hide_text: false,
            orb_location: OrbLocation::Left,
            orb_size: 13,
            prefix: String::new(),
            prefix_size: 10,
            selected: false,
            serie: String::new(),
            suffix: String::new(),
            suffix_size: 10,
            symbol: String::new(),
            symbol_def_height: 32,
            symbol_def_width: 32,
            symbol_height: 32,
            symbol_hide_text: false,
            symbol_width: 32,
            text: "N/A".to_string(),
            thresholds: String::new(),
            url: String::new(),
            xpos: 0,
            ypos: 0,
        }
    }
}

impl EPictBox {
    pub fn to_json_data(&self) -> Value {
        let symbol = if self.custom_symbol.is_empty() { self.symbol.as_str() } else { "custom" };
        json!({
            "angle": self.angle,
            "backgroundColor": self.background_color.to_json_data(),
            "blinkHigh": self.blink_high,
            "blinkLow": self.blink_low,
            "color": self.color.to_json_data(),
            "colorHigh": self.color_high.to_json_data(),
            "colorLow": self.color_low.to_json_data(),
            "colorMedium": self.color_medium.to_json_data(),
            "colorSymbol": self.color_symbol,
            "customSymbol": self.custom_symbol,
            "decimal": self.decimal,
            "fontSize": self.font_size,
            "hasBackground": self.has_background,
            "hasOrb": self.has_orb,
            "hasSymbol": self.has_symbol,
            "isUsingThresholds": !self.thresholds.is_empty(),
            "orbHideText": self.orb_hide_text,
            "orbLocation": self.orb_location.as_str(),
            "orbSize": self.orb_size,
            "prefix": self.prefix,
            "prefixSize": self.prefix_size,
            "selected": self.selected,
            "serie": self.serie,
            "suffix": self.suffix,
            "suffixSize": self.suffix_size,
            "symbol": symbol,
            "symbolDefHeight": self.symbol_def_height,
            "symbolDefWidth": self.symbol_def_width,
            "symbolHeight": self.symbol_height,
            "symbolHideText": self.symbol_hide_text,
            "symbolWidth": self.symbol_width,
            "text": self.text,
            "thresholds": self.thresholds,
            "url": self.url,
            "xpos": self.xpos,
            "ypos": self.ypos,
        })
    }
}

#[derive(Debug, Clone)]
pub struct EPict {
    pub base: PanelBase,
    pub bg_url: String,
    pub auto_scale: bool,
    pub boxes: Vec<EPictBox>,
}

impl Default for EPict {
    fn default() -> Self {
        Self {
            base: PanelBase::default(),
            bg_url: String::new(),
            auto_scale: true,
            boxes: Vec::new(),
        }
    }
}

impl PanelVariant for EPict {
    panel_base!();

    fn overlay(&self) -> Result<Value, CoreError> {
        let boxes: Vec<Value> = self.boxes.iter().map(EPictBox::to_json_data).collect();
        Ok(json!({
            "type": EPICT_TYPE,
            "options": {
                "autoScale": self.auto_scale,
                "bgURL": self.bg_url,
                "boxes": boxes,
            },
        }))
    }
}

// ---------------------------------------------------------------------------
// Svg
// ---------------------------------------------------------------------------

/// SVG panel whose markup and scripts live in files read at serialization.
#[derive(Debug, Clone)]
pub struct Svg {
    pub base: PanelBase,
    pub format: String,
    pub js_code_file_path: Option<PathBuf>,
    pub js_init_code_file_path: Option<PathBuf>,
    pub svg_file_path: Option<PathBuf>,
}

impl Default for Svg {
    fn default() -> Self {
        Self {
            base: PanelBase::default(),
            format: "none".to_string(),
            js_code_file_path: None,
            js_init_code_file_path: None,
            svg_file_path: None,
        }
    }
}

fn read_optional(path: Option<&Path>) -> Result<String, CoreError> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|e| CoreError::io(path, e)),
        None => Ok(String::new()),
    }
}

impl PanelVariant for Svg {
    panel_base!();

    fn overlay(&self) -> Result<Value, CoreError> {
        Ok(json!({
            "format": self.format,
            "js_code": read_optional(self.js_code_file_path.as_deref())?,
            "js_init_code": read_optional(self.js_init_code_file_path.as_deref())?,
            "svg_data": read_optional(self.svg_file_path.as_deref())?,
            "type": SVG_TYPE,
            "useSVGBuilder": false,
        }))
    }
}

// ---------------------------------------------------------------------------
// Worldmap
// ---------------------------------------------------------------------------

string_enum! {
    pub enum WorldmapLocationData ("locationData", default = Countries) {
        Countries => "countries",
        Countries3Letter => "countries_3letter",
        States => "states",
        Probes => "probes",
        Geohash => "geohash",
        JsonEndpoint => "json_endpoint",
        JsonpEndpoint => "jsonp endpoint",
        JsonResult => "json result",
        Table => "table",
    }
}

string_enum! {
    pub enum WorldmapCenter ("mapCenter", default = Origin) {
        Origin => "(0°, 0°)",
        NorthAmerica => "North America",
        Europe => "Europe",
        WestAsia => "West Asia",
        SeAsia => "SE Asia",
        LastGeoHash => "Last GeoHash",
        Custom => "custom",
    }
}

#[derive(Debug, Clone)]
pub struct Worldmap {
    pub base: PanelBase,
    pub circle_max_size: u32,
    pub circle_min_size: u32,
    pub decimals: u32,
    pub geo_point: String,
    pub location_data: WorldmapLocationData,
    pub location_name: String,
    pub hide_empty: bool,
    pub hide_zero: bool,
    pub initial_zoom: u32,
    pub json_url: String,
    pub jsonp_callback: String,
    pub map_center: WorldmapCenter,
    pub map_center_latitude: f64,
    pub map_center_longitude: f64,
    pub metric: String,
    pub mouse_wheel_zoom: bool,
    pub sticky_labels: bool,
    /// Comma-separated circle thresholds.
    pub thresholds: String,
    pub threshold_colors: Vec<Color>,
    pub unit_plural: String,
    pub unit_single: String,
    pub unit_singular: String,
    pub aggregation: String,
}

impl Default for Worldmap {
    fn default() -> Self {
        Self {
            base: PanelBase::default(),
            circle_max_size: 30,
            circle_min_size: 2,
            decimals: 0,
            geo_point: "geohash".to_string(),
            location_data: WorldmapLocationData::Countries,
            location_name: String::new(),
            hide_empty: false,
            hide_zero: false,
            initial_zoom: 1,
            json_url: String::new(),
            jsonp_callback: String::new(),
            map_center: WorldmapCenter::Origin,
            map_center_latitude: 0.0,
            map_center_longitude: 0.0,
            metric: "Value".to_string(),
            mouse_wheel_zoom: false,
            sticky_labels: false,
            thresholds: "0,100,150".to_string(),
            threshold_colors: ["#73BF69", "#73BF69", "#FADE2A", "#C4162A"]
                .into_iter()
                .map(|code| ColorCode::from_static(code).into())
                .collect(),
            unit_plural: String::new(),
            unit_single: String::new(),
            unit_singular: String::new(),
            aggregation: "total".to_string(),
        }
    }
}

impl PanelVariant for Worldmap {
    panel_base!();

    fn overlay(&self) -> Result<Value, CoreError> {
        let colors: Vec<Value> = self.threshold_colors.iter().map(Color::to_json_data).collect();
        Ok(json!({
            "circleMaxSize": self.circle_max_size,
            "circleMinSize": self.circle_min_size,
            "colors": colors,
            "decimals": self.decimals,
            "esGeoPoint": self.geo_point,
            "esMetric": self.metric,
            "locationData": self.location_data.as_str(),
            "esLocationName": self.location_name,
            "hideEmpty": self.hide_empty,
            "hideZero": self.hide_zero,
            "initialZoom": self.initial_zoom,
            "jsonUrl": self.json_url,
            "jsonpCallback": self.jsonp_callback,
            "mapCenter": self.map_center.as_str(),
            "mapCenterLatitude": self.map_center_latitude,
            "mapCenterLongitude": self.map_center_longitude,
            "mouseWheelZoom": self.mouse_wheel_zoom,
            "stickyLabels": self.sticky_labels,
            "thresholds": self.thresholds,
            "unitPlural": self.unit_plural,
            "unitSingle": self.unit_single,
            "unitSingular": self.unit_singular,
            "valueName": self.aggregation,
            "tableQueryOptions": {
                "queryType": "geohash",
                "geohashField": "geohash",
                "latitudeField": "latitude",
                "longitudeField": "longitude",
                "metricField": "metric",
            },
            "type": WORLD_MAP_TYPE,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::Panel;
    use assert_matches::assert_matches;

    #[test]
    fn discrete_default_colors() {
        let json = Discrete::default().to_json_data().unwrap();
        assert_eq!(json["type"], "natel-discrete-panel");
        assert_eq!(json["backgroundColor"], "rgba(128, 128, 128, 0.1)");
        assert_eq!(json["timeTextColor"], "#d8d9da");
        assert_eq!(json["showDistinctCount"], Value::Null);
        assert_eq!(json["rowHeight"], 50);
    }

    #[test]
    fn epict_box_computed_fields() {
        let plain = EPictBox::default().to_json_data();
        assert_eq!(plain["symbol"], "");
        assert_eq!(plain["isUsingThresholds"], false);
        assert_eq!(plain["color"], "#000");

        let custom = EPictBox {
            custom_symbol: "https://example.com/pump.svg".into(),
            symbol: "ignored".into(),
            thresholds: "20,60".into(),
            orb_location: OrbLocation::Top,
            ..Default::default()
        }
        .to_json_data();
        assert_eq!(custom["symbol"], "custom");
        assert_eq!(custom["isUsingThresholds"], true);
        assert_eq!(custom["orbLocation"], "Top");
    }

    #[test]
    fn epict_wraps_boxes_in_options() {
        let panel = EPict {
            bg_url: "https://example.com/plant.png".into(),
            boxes: vec![EPictBox::default()],
            ..Default::default()
        };
        let json = panel.to_json_data().unwrap();
        assert_eq!(json["type"], "larona-epict-panel");
        assert_eq!(json["options"]["autoScale"], true);
        assert_eq!(json["options"]["boxes"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn orb_location_is_closed_set() {
        assert!("Middle".parse::<OrbLocation>().is_err());
    }

    #[test]
    fn svg_without_files_is_empty() {
        let json = Svg::default().to_json_data().unwrap();
        assert_eq!(json["svg_data"], "");
        assert_eq!(json["js_code"], "");
        assert_eq!(json["useSVGBuilder"], false);
    }

    #[test]
    fn svg_missing_file_is_io_error() {
        let svg = Svg {
            svg_file_path: Some(PathBuf::from("/nonexistent/panel.svg")),
            ..Default::default()
        };
        assert_matches!(svg.to_json_data(), Err(CoreError::Io { .. }));
    }

    #[test]
    fn worldmap_defaults() {
        let json = Worldmap::default().to_json_data().unwrap();
        assert_eq!(json["mapCenter"], "(0°, 0°)");
        assert_eq!(json["locationData"], "countries");
        assert_eq!(json["colors"][2], "#FADE2A");
        assert_eq!(json["valueName"], "total");
        assert_eq!(json["tableQueryOptions"]["queryType"], "geohash");
    }

    #[test]
    fn worldmap_rejects_unknown_center() {
        let err = "Antarctica".parse::<WorldmapCenter>().unwrap_err();
        assert_eq!(err.field, "mapCenter");
    }
}
