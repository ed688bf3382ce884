//! Table panel and legacy column styles.

use std::sync::Arc;

use serde_json::{json, Value};

use super::{panel_base, PanelBase, PanelVariant};
use crate::color::{RGBA, GREEN, ORANGE, RED};
use crate::constants::{MAPPING_TYPE_VALUE_TO_TEXT, SHORT_FORMAT, TABLE_TYPE};
use crate::error::CoreError;
use crate::mappings::{mappings_json, FieldMapping, RangeMap, ValueMap};
use crate::merge::into_map;
use crate::targets::QueryTarget;
use crate::units::Percent;

// ---------------------------------------------------------------------------
// Column styles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DateColumnStyleType {
    pub date_format: String,
}

impl Default for DateColumnStyleType {
    fn default() -> Self {
        Self {
            date_format: "YYYY-MM-DD HH:mm:ss".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberColumnStyleType {
    pub color_mode: Option<String>,
    pub colors: Vec<RGBA>,
    pub thresholds: Vec<Value>,
    pub decimals: u32,
    pub unit: String,
}

impl Default for NumberColumnStyleType {
    fn default() -> Self {
        Self {
            color_mode: None,
            colors: vec![GREEN, ORANGE, RED],
            thresholds: Vec::new(),
            decimals: 2,
            unit: SHORT_FORMAT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringColumnStyleType {
    pub decimals: u32,
    pub color_mode: Option<String>,
    pub colors: Vec<RGBA>,
    pub thresholds: Vec<Value>,
    pub preserve_format: bool,
    pub sanitize: bool,
    pub unit: String,
    pub mapping_type: i64,
    pub value_maps: Vec<ValueMap>,
    pub range_maps: Vec<RangeMap>,
}

impl Default for StringColumnStyleType {
    fn default() -> Self {
        Self {
            decimals: 2,
            color_mode: None,
            colors: vec![GREEN, ORANGE, RED],
            thresholds: Vec::new(),
            preserve_format: false,
            sanitize: false,
            unit: SHORT_FORMAT.to_string(),
            mapping_type: MAPPING_TYPE_VALUE_TO_TEXT,
            value_maps: Vec::new(),
            range_maps: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HiddenColumnStyleType;

/// How a styled column renders its cells.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnStyleType {
    Date(DateColumnStyleType),
    Number(NumberColumnStyleType),
    String(StringColumnStyleType),
    Hidden(HiddenColumnStyleType),
}

impl Default for ColumnStyleType {
    fn default() -> Self {
        Self::Number(NumberColumnStyleType::default())
    }
}

impl ColumnStyleType {
    pub fn to_json_data(&self) -> Value {
        let colors =
            |colors: &[RGBA]| -> Vec<Value> { colors.iter().map(RGBA::to_json_data).collect() };
        match self {
            Self::Date(style) => json!({"dateFormat": style.date_format, "type": "date"}),
            Self::Number(style) => json!({
                "colorMode": style.color_mode,
                "colors": colors(&style.colors),
                "decimals": style.decimals,
                "thresholds": style.thresholds,
                "type": "number",
                "unit": style.unit,
            }),
            Self::String(style) => json!({
                "decimals": style.decimals,
                "colorMode": style.color_mode,
                "colors": colors(&style.colors),
                "thresholds": style.thresholds,
                "unit": style.unit,
                "mappingType": style.mapping_type,
                "valueMaps": style.value_maps.iter().map(ValueMap::to_json_data).collect::<Vec<_>>(),
                "rangeMaps": style.range_maps.iter().map(RangeMap::to_json_data).collect::<Vec<_>>(),
                "preserveFormat": style.preserve_format,
                "sanitize": style.sanitize,
                "type": "string",
            }),
            Self::Hidden(_) => json!({"type": "hidden"}),
        }
    }
}

string_enum! {
    pub enum ColumnAlign ("align", default = Auto) {
        Auto => "auto",
        Left => "left",
        Right => "right",
        Center => "center",
    }
}

/// Column styling matched by header pattern. The style type's keys are
/// flattened into the same object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnStyle {
    pub alias: String,
    pub pattern: String,
    pub align: ColumnAlign,
    pub link: bool,
    pub link_open_in_new_tab: bool,
    pub link_url: String,
    pub link_tooltip: String,
    pub style_type: ColumnStyleType,
}

impl ColumnStyle {
    pub fn to_json_data(&self) -> Value {
        let mut data = into_map(json!({
            "alias": self.alias,
            "pattern": self.pattern,
            "align": self.align.as_str(),
            "link": self.link,
            "linkTargetBlank": self.link_open_in_new_tab,
            "linkUrl": self.link_url,
            "linkTooltip": self.link_tooltip,
        }));
        data.extend(into_map(self.style_type.to_json_data()));
        Value::Object(data)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnSort {
    pub col: Option<u32>,
    pub desc: bool,
}

impl ColumnSort {
    pub fn to_json_data(&self) -> Value {
        json!({"col": self.col, "desc": self.desc})
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub text: String,
    pub value: String,
}

impl Default for Column {
    fn default() -> Self {
        Self {
            text: "Avg".to_string(),
            value: "avg".to_string(),
        }
    }
}

impl Column {
    pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
        }
    }

    pub fn to_json_data(&self) -> Value {
        json!({"text": self.text, "value": self.value})
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSortByField {
    pub display_name: String,
    pub desc: bool,
}

impl TableSortByField {
    pub fn to_json_data(&self) -> Value {
        json!({"displayName": self.display_name, "desc": self.desc})
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// Grafana 8 table. Defaults to half the legacy row width.
#[derive(Debug, Clone)]
pub struct Table {
    pub base: PanelBase,
    pub align: ColumnAlign,
    pub color_mode: String,
    pub columns: Vec<Column>,
    pub display_mode: String,
    pub font_size: Percent,
    pub filterable: bool,
    pub mappings: Vec<FieldMapping>,
    pub overrides: Vec<Value>,
    pub show_header: bool,
    pub unit: String,
    pub sort_by: Vec<TableSortByField>,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            base: PanelBase {
                span: Some(6),
                ..Default::default()
            },
            align: ColumnAlign::Auto,
            color_mode: "thresholds".to_string(),
            columns: Vec::new(),
            display_mode: "auto".to_string(),
            font_size: Percent::default(),
            filterable: false,
            mappings: Vec::new(),
            overrides: Vec::new(),
            show_header: true,
            unit: String::new(),
            sort_by: Vec::new(),
        }
    }
}

impl Table {
    pub fn new(title: impl Into<String>, targets: Vec<Arc<dyn QueryTarget>>) -> Self {
        let mut table = Self::default();
        table.base.title = title.into();
        table.base.targets = targets;
        table
    }
}

impl PanelVariant for Table {
    panel_base!();

    fn overlay(&self) -> Result<Value, CoreError> {
        let columns: Vec<Value> = self.columns.iter().map(Column::to_json_data).collect();
        let sort_by: Vec<Value> = self.sort_by.iter().map(TableSortByField::to_json_data).collect();
        let mappings = mappings_json(&self.mappings);
        Ok(json!({
            "color": {"mode": self.color_mode},
            "columns": columns,
            "fontSize": self.font_size.to_json_data(),
            "fieldConfig": {
                "defaults": {
                    "custom": {
                        "align": self.align.as_str(),
                        "displayMode": self.display_mode,
                        "filterable": self.filterable,
                    },
                    "unit": self.unit,
                    "mappings": mappings,
                },
                "overrides": self.overrides,
            },
            "hideTimeOverride": self.base.hide_time_override,
            "mappings": mappings,
            "minSpan": self.base.min_span,
            "options": {"showHeader": self.show_header, "sortBy": sort_by},
            "type": TABLE_TYPE,
        }))
    }
}
