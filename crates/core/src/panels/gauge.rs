//! Bar gauge and gauge panels.

use std::sync::Arc;

use serde_json::{json, Value};

use super::{panel_base, PanelBase, PanelVariant};
use crate::constants::{BARGAUGE_TYPE, GAUGE_CALC_MEAN, GAUGE_TYPE};
use crate::error::CoreError;
use crate::links::DataLink;
use crate::mappings::ValueMap;
use crate::targets::QueryTarget;
use crate::thresholds::{Threshold, Thresholds};

string_enum! {
    pub enum GaugeDisplayMode ("displayMode", default = Lcd) {
        Lcd => "lcd",
        Basic => "basic",
        Gradient => "gradient",
    }
}

string_enum! {
    pub enum Orientation ("orientation", default = Horizontal) {
        Horizontal => "horizontal",
        Vertical => "vertical",
        Auto => "auto",
    }
}

/// Green from zero, red from 80.
fn default_steps() -> Thresholds {
    Thresholds::Steps(vec![
        Threshold::new("green", 0, 0.0),
        Threshold::new("red", 1, 80.0),
    ])
}

fn links_json(links: &[DataLink]) -> Vec<Value> {
    links.iter().map(DataLink::to_json_data).collect()
}

fn value_maps_json(maps: &[ValueMap]) -> Vec<Value> {
    maps.iter().map(ValueMap::to_json_data).collect()
}

#[derive(Debug, Clone)]
pub struct BarGauge {
    pub base: PanelBase,
    pub all_values: bool,
    pub calc: String,
    pub data_links: Vec<DataLink>,
    pub decimals: Option<u32>,
    pub display_mode: GaugeDisplayMode,
    pub format: String,
    pub label: Option<String>,
    pub limit: Option<u32>,
    pub max: i64,
    pub min: i64,
    pub orientation: Orientation,
    pub threshold_labels: bool,
    pub threshold_markers: bool,
    pub value_maps: Vec<ValueMap>,
}

impl Default for BarGauge {
    fn default() -> Self {
        Self {
            base: PanelBase::with_thresholds(default_steps()),
            all_values: false,
            calc: GAUGE_CALC_MEAN.to_string(),
            data_links: Vec::new(),
            decimals: None,
            display_mode: GaugeDisplayMode::Lcd,
            format: "none".to_string(),
            label: None,
            limit: None,
            max: 100,
            min: 0,
            orientation: Orientation::Horizontal,
            threshold_labels: false,
            threshold_markers: true,
            value_maps: Vec::new(),
        }
    }
}

impl BarGauge {
    pub fn new(title: impl Into<String>, targets: Vec<Arc<dyn QueryTarget>>) -> Self {
        let mut gauge = Self::default();
        gauge.base.title = title.into();
        gauge.base.targets = targets;
        gauge
    }
}

impl PanelVariant for BarGauge {
    panel_base!();

    fn overlay(&self) -> Result<Value, CoreError> {
        Ok(json!({
            "options": {
                "displayMode": self.display_mode.as_str(),
                "fieldOptions": {
                    "calcs": [self.calc],
                    "defaults": {
                        "decimals": self.decimals,
                        "max": self.max,
                        "min": self.min,
                        "title": self.label,
                        "unit": self.format,
                        "links": links_json(&self.data_links),
                    },
                    "limit": self.limit,
                    "mappings": value_maps_json(&self.value_maps),
                    "override": {},
                    "thresholds": self.base.thresholds.to_json_data(),
                    "values": self.all_values,
                },
                "orientation": self.orientation.as_str(),
                "showThresholdLabels": self.threshold_labels,
                "showThresholdMarkers": self.threshold_markers,
            },
            "type": BARGAUGE_TYPE,
        }))
    }
}

#[derive(Debug, Clone)]
pub struct GaugePanel {
    pub base: PanelBase,
    pub all_values: bool,
    pub calc: String,
    pub data_links: Vec<DataLink>,
    pub decimals: Option<u32>,
    pub format: String,
    pub label: Option<String>,
    pub limit: Option<u32>,
    pub max: i64,
    pub min: i64,
    pub threshold_labels: bool,
    pub threshold_markers: bool,
    pub value_maps: Vec<ValueMap>,
    pub neutral: Option<Value>,
}

impl Default for GaugePanel {
    fn default() -> Self {
        Self {
            base: PanelBase::with_thresholds(default_steps()),
            all_values: false,
            calc: GAUGE_CALC_MEAN.to_string(),
            data_links: Vec::new(),
            decimals: None,
            format: "none".to_string(),
            label: None,
            limit: None,
            max: 100,
            min: 0,
            threshold_labels: false,
            threshold_markers: true,
            value_maps: Vec::new(),
            neutral: None,
        }
    }
}

impl GaugePanel {
    pub fn new(title: impl Into<String>, targets: Vec<Arc<dyn QueryTarget>>) -> Self {
        let mut gauge = Self::default();
        gauge.base.title = title.into();
        gauge.base.targets = targets;
        gauge
    }
}

impl PanelVariant for GaugePanel {
    panel_base!();

    fn overlay(&self) -> Result<Value, CoreError> {
        Ok(json!({
            "fieldConfig": {
                "defaults": {
                    "calcs": [self.calc],
                    "decimals": self.decimals,
                    "max": self.max,
                    "min": self.min,
                    "title": self.label,
                    "unit": self.format,
                    "links": links_json(&self.data_links),
                    "limit": self.limit,
                    "mappings": value_maps_json(&self.value_maps),
                    "override": {},
                    "values": self.all_values,
                    "custom": {"neutral": self.neutral},
                },
                "showThresholdLabels": self.threshold_labels,
                "showThresholdMarkers": self.threshold_markers,
            },
            "type": GAUGE_TYPE,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::Panel;

    #[test]
    fn bar_gauge_defaults() {
        let json = BarGauge::new("Disk", Vec::new()).to_json_data().unwrap();
        let options = &json["options"];
        assert_eq!(options["displayMode"], "lcd");
        assert_eq!(options["orientation"], "horizontal");
        assert_eq!(options["fieldOptions"]["calcs"], json!(["mean"]));
        assert_eq!(options["fieldOptions"]["thresholds"][0]["value"], "null");
        assert_eq!(options["fieldOptions"]["thresholds"][1]["value"], 80.0);
        assert_eq!(json["type"], "bargauge");
    }

    #[test]
    fn gauge_keeps_envelope_thresholds() {
        let json = GaugePanel::new("Memory", Vec::new()).to_json_data().unwrap();
        let defaults = &json["fieldConfig"]["defaults"];
        assert_eq!(defaults["thresholds"]["mode"], "absolute");
        assert_eq!(defaults["thresholds"]["steps"][1]["color"], "red");
        assert_eq!(defaults["custom"], json!({"neutral": null}));
        assert_eq!(json["fieldConfig"]["showThresholdMarkers"], true);
    }

    #[test]
    fn display_mode_is_closed_set() {
        assert_eq!("gradient".parse::<GaugeDisplayMode>(), Ok(GaugeDisplayMode::Gradient));
        assert!("flot".parse::<GaugeDisplayMode>().is_err());
        assert!("diagonal".parse::<Orientation>().is_err());
    }
}
