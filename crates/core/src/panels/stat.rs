//! Stat and the deprecated single stat panel.

use std::sync::Arc;

use serde_json::{json, Value};

use super::{panel_base, PanelBase, PanelVariant};
use crate::color::{RGBA, GREEN, ORANGE, RED};
use crate::constants::{NULL_CONNECTED, SINGLESTAT_TYPE, STAT_TYPE, VTYPE_DEFAULT};
use crate::error::CoreError;
use crate::mappings::{mappings_json, FieldMapping, Gauge, Mapping, RangeMap, SparkLine, ValueMap};
use crate::targets::QueryTarget;
use crate::thresholds::Thresholds;
use crate::units::Percent;

#[derive(Debug, Clone)]
pub struct Stat {
    pub base: PanelBase,
    /// Rendered as `options.justifyMode`.
    pub alignment: String,
    pub color: Option<Value>,
    pub color_mode: String,
    pub decimals: Option<u32>,
    /// Rendered as the field unit.
    pub format: String,
    pub graph_mode: String,
    pub mappings: Vec<FieldMapping>,
    pub no_value: String,
    pub orientation: String,
    pub overrides: Vec<Value>,
    pub reduce_calc: String,
    pub fields: String,
    pub text_mode: String,
}

impl Default for Stat {
    fn default() -> Self {
        Self {
            base: PanelBase::with_thresholds(Thresholds::Text(String::new())),
            alignment: "auto".to_string(),
            color: None,
            color_mode: "value".to_string(),
            decimals: None,
            format: "none".to_string(),
            graph_mode: "area".to_string(),
            mappings: Vec::new(),
            no_value: "none".to_string(),
            orientation: "auto".to_string(),
            overrides: Vec::new(),
            reduce_calc: "mean".to_string(),
            fields: String::new(),
            text_mode: "auto".to_string(),
        }
    }
}

impl Stat {
    pub fn new(title: impl Into<String>, targets: Vec<Arc<dyn QueryTarget>>) -> Self {
        let mut stat = Self::default();
        stat.base.title = title.into();
        stat.base.targets = targets;
        stat
    }
}

impl PanelVariant for Stat {
    panel_base!();

    fn overlay(&self) -> Result<Value, CoreError> {
        Ok(json!({
            "fieldConfig": {
                "defaults": {
                    "color": self.color,
                    "custom": {},
                    "decimals": self.decimals,
                    "mappings": mappings_json(&self.mappings),
                    "unit": self.format,
                    "noValue": self.no_value,
                },
                "overrides": self.overrides,
            },
            "options": {
                "textMode": self.text_mode,
                "colorMode": self.color_mode,
                "graphMode": self.graph_mode,
                "justifyMode": self.alignment,
                "orientation": self.orientation,
                "reduceOptions": {
                    "calcs": [self.reduce_calc],
                    "fields": self.fields,
                    "values": false,
                },
            },
            "type": STAT_TYPE,
        }))
    }
}

// ---------------------------------------------------------------------------
// SingleStat
// ---------------------------------------------------------------------------

/// Deprecated since Grafana 7; prefer [`Stat`].
#[derive(Debug, Clone)]
pub struct SingleStat {
    pub base: PanelBase,
    pub colors: Vec<RGBA>,
    pub color_background: bool,
    pub color_value: bool,
    pub decimals: Option<u32>,
    pub format: String,
    pub gauge: Gauge,
    pub mapping_type: i64,
    pub mapping_types: Vec<Mapping>,
    pub null_text: Option<String>,
    pub null_point_mode: String,
    pub postfix: String,
    pub postfix_font_size: Percent,
    pub prefix: String,
    pub prefix_font_size: Percent,
    pub range_maps: Vec<RangeMap>,
    pub sparkline: SparkLine,
    pub value_font_size: Percent,
    pub value_name: String,
    pub value_maps: Vec<ValueMap>,
}

impl Default for SingleStat {
    fn default() -> Self {
        Self {
            base: PanelBase::with_thresholds(Thresholds::Text(String::new())),
            colors: vec![GREEN, ORANGE, RED],
            color_background: false,
            color_value: false,
            decimals: None,
            format: "none".to_string(),
            gauge: Gauge::default(),
            mapping_type: Mapping::value_to_text().value,
            mapping_types: vec![Mapping::value_to_text(), Mapping::range_to_text()],
            null_text: None,
            null_point_mode: NULL_CONNECTED.to_string(),
            postfix: String::new(),
            postfix_font_size: Percent::new(50),
            prefix: String::new(),
            prefix_font_size: Percent::new(50),
            range_maps: Vec::new(),
            sparkline: SparkLine::default(),
            value_font_size: Percent::new(80),
            value_name: VTYPE_DEFAULT.to_string(),
            value_maps: Vec::new(),
        }
    }
}

impl PanelVariant for SingleStat {
    panel_base!();

    fn overlay(&self) -> Result<Value, CoreError> {
        let colors: Vec<Value> = self.colors.iter().map(RGBA::to_json_data).collect();
        let mapping_types: Vec<Value> =
            self.mapping_types.iter().map(Mapping::to_json_data).collect();
        let range_maps: Vec<Value> = self.range_maps.iter().map(RangeMap::to_json_data).collect();
        let value_maps: Vec<Value> = self.value_maps.iter().map(ValueMap::to_json_data).collect();
        Ok(json!({
            "cacheTimeout": self.base.cache_timeout,
            "colorBackground": self.color_background,
            "colorValue": self.color_value,
            "colors": colors,
            "decimals": self.decimals,
            "format": self.format,
            "gauge": self.gauge.to_json_data(),
            "mappingType": self.mapping_type,
            "mappingTypes": mapping_types,
            "minSpan": self.base.min_span,
            "nullPointMode": self.null_point_mode,
            "nullText": self.null_text,
            "postfix": self.postfix,
            "postfixFontSize": self.postfix_font_size.to_json_data(),
            "prefix": self.prefix,
            "prefixFontSize": self.prefix_font_size.to_json_data(),
            "rangeMaps": range_maps,
            "sparkline": self.sparkline.to_json_data(),
            "thresholds": self.base.thresholds.to_json_data(),
            "type": SINGLESTAT_TYPE,
            "valueFontSize": self.value_font_size.to_json_data(),
            "valueMaps": value_maps,
            "valueName": self.value_name,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mappings::StatMapping;
    use crate::panels::Panel;

    #[test]
    fn stat_options() {
        let stat = Stat {
            mappings: vec![StatMapping::value("Up", "1").into()],
            ..Stat::new("Uptime", Vec::new())
        };
        let json = stat.to_json_data().unwrap();
        assert_eq!(json["type"], "stat");
        assert_eq!(json["options"]["reduceOptions"]["calcs"], json!(["mean"]));
        assert_eq!(json["options"]["justifyMode"], "auto");
        assert_eq!(json["fieldConfig"]["defaults"]["unit"], "none");
        assert_eq!(json["fieldConfig"]["defaults"]["mappings"][0]["type"], 1);
        assert_eq!(json["fieldConfig"]["defaults"]["thresholds"]["steps"], "");
    }

    #[test]
    fn single_stat_defaults() {
        let json = SingleStat::default().to_json_data().unwrap();
        assert_eq!(json["type"], "singlestat");
        assert_eq!(json["colors"][0], "rgba(50, 172, 45, 0.97)");
        assert_eq!(json["valueFontSize"], "80%");
        assert_eq!(json["postfixFontSize"], "50%");
        assert_eq!(json["valueName"], "avg");
        assert_eq!(json["mappingTypes"][1], json!({"name": "range to text", "value": 2}));
        assert_eq!(json["thresholds"], "");
    }
}
