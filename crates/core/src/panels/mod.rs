//! Panels.
//!
//! Every panel renders in two steps: the common envelope built from
//! [`PanelBase`], then the variant overlay merged on top with
//! [`deep_update`]. The caller's `extra_json` is merged last.
//!
//! Variants implement [`PanelVariant`]; the blanket impl turns each of them
//! into a [`Panel`], the object-safe trait dashboards and rows hold.

use std::fmt;
use std::sync::Arc;

use serde_json::{json, Map, Value};

use crate::error::CoreError;
use crate::links::DataLink;
use crate::merge::{deep_update, into_map};
use crate::targets::{targets_json, QueryTarget};
use crate::thresholds::Thresholds;

pub mod charts;
pub mod gauge;
pub mod graph;
pub mod heatmap;
pub mod plugins;
pub mod row;
pub mod stat;
pub mod table;
pub mod text;

pub use charts::{Ae3ePlotly, BarChart, Histogram, PieChart, PieChartv2, StateTimeline};
pub use gauge::{BarGauge, GaugeDisplayMode, GaugePanel, Orientation};
pub use graph::{Graph, TimeSeries};
pub use heatmap::{Heatmap, HeatmapColor, Statusmap, StatusmapColor};
pub use plugins::{
    Discrete, EPict, EPictBox, OrbLocation, Svg, Worldmap, WorldmapCenter, WorldmapLocationData,
};
pub use row::RowPanel;
pub use stat::{SingleStat, Stat};
pub use table::{
    Column, ColumnAlign, ColumnSort, ColumnStyle, ColumnStyleType, DateColumnStyleType,
    HiddenColumnStyleType, NumberColumnStyleType, StringColumnStyleType, Table,
    TableSortByField,
};
pub use text::{AlertList, DashboardList, Logs, News, Text, TextMode};

// ---------------------------------------------------------------------------
// Panel trait
// ---------------------------------------------------------------------------

/// A renderable dashboard panel.
///
/// Updates are copy-on-write: `with_*` methods return a new panel and leave
/// `self` untouched.
pub trait Panel: fmt::Debug + Send + Sync {
    fn id(&self) -> Option<u64>;

    fn with_id(&self, id: u64) -> Arc<dyn Panel>;

    /// Legacy 12-column width.
    fn span(&self) -> Option<u32>;

    fn with_span(&self, span: u32) -> Arc<dyn Panel>;

    /// Panels nested inside a container panel.
    fn children(&self) -> &[Arc<dyn Panel>] {
        &[]
    }

    /// A copy with `children` replacing the nested panels. Leaf panels
    /// ignore the argument.
    fn with_children(&self, children: Vec<Arc<dyn Panel>>) -> Arc<dyn Panel>;

    fn to_json_data(&self) -> Result<Value, CoreError>;

    fn into_panel(self) -> Arc<dyn Panel>
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }
}

/// A panel variant rendered through the common envelope.
pub trait PanelVariant: Clone + fmt::Debug + Send + Sync + 'static {
    fn base(&self) -> &PanelBase;

    fn base_mut(&mut self) -> &mut PanelBase;

    /// Variant fields merged over the envelope.
    fn overlay(&self) -> Result<Value, CoreError>;

    fn nested_panels(&self) -> &[Arc<dyn Panel>] {
        &[]
    }

    fn with_nested_panels(&self, _panels: Vec<Arc<dyn Panel>>) -> Self {
        self.clone()
    }
}

impl<T: PanelVariant> Panel for T {
    fn id(&self) -> Option<u64> {
        self.base().id
    }

    fn with_id(&self, id: u64) -> Arc<dyn Panel> {
        let mut panel = self.clone();
        panel.base_mut().id = Some(id);
        Arc::new(panel)
    }

    fn span(&self) -> Option<u32> {
        self.base().span
    }

    fn with_span(&self, span: u32) -> Arc<dyn Panel> {
        let mut panel = self.clone();
        panel.base_mut().span = Some(span);
        Arc::new(panel)
    }

    fn children(&self) -> &[Arc<dyn Panel>] {
        self.nested_panels()
    }

    fn with_children(&self, children: Vec<Arc<dyn Panel>>) -> Arc<dyn Panel> {
        Arc::new(self.with_nested_panels(children))
    }

    fn to_json_data(&self) -> Result<Value, CoreError> {
        let base = self.base();
        let merged = deep_update(base.envelope()?, Some(&into_map(self.overlay()?)));
        Ok(Value::Object(deep_update(merged, base.extra_json.as_ref())))
    }
}

/// Serialize a list of panels in order.
pub fn panels_json(panels: &[Arc<dyn Panel>]) -> Result<Vec<Value>, CoreError> {
    panels.iter().map(|p| p.to_json_data()).collect()
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Panel size and position in grid units. `h` counts 30px rows, `w` is 1-24.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridPos {
    pub h: u32,
    pub w: u32,
    pub x: u32,
    pub y: u32,
}

impl GridPos {
    pub fn new(h: u32, w: u32, x: u32, y: u32) -> Self {
        Self { h, w, x, y }
    }

    pub fn to_json_data(&self) -> Value {
        json!({"h": self.h, "w": self.w, "x": self.x, "y": self.y})
    }
}

/// Panel repetition over a template variable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Repeat {
    /// `h` or `v`.
    pub direction: Option<String>,
    pub variable: Option<String>,
    /// Only meaningful for horizontal repetition.
    pub max_per_row: Option<u32>,
}

impl Repeat {
    pub fn to_json_data(&self) -> Value {
        json!({
            "direction": self.direction,
            "variable": self.variable,
            "maxPerRow": self.max_per_row,
        })
    }
}

/// Fields shared by every panel variant.
#[derive(Debug, Clone)]
pub struct PanelBase {
    pub data_source: Value,
    pub targets: Vec<Arc<dyn QueryTarget>>,
    pub title: String,
    pub cache_timeout: Option<String>,
    pub description: Option<String>,
    pub editable: bool,
    pub error: bool,
    pub height: Value,
    pub grid_pos: Option<GridPos>,
    pub hide_time_override: bool,
    pub id: Option<u64>,
    pub interval: Option<String>,
    pub links: Vec<DataLink>,
    pub max_data_points: u32,
    pub min_span: Option<u32>,
    pub repeat: Repeat,
    pub span: Option<u32>,
    pub thresholds: Thresholds,
    pub threshold_type: String,
    pub time_from: Option<String>,
    pub time_shift: Option<String>,
    pub transparent: bool,
    pub transformations: Vec<Value>,
    /// Raw JSON merged over the rendered panel with final precedence.
    pub extra_json: Option<Map<String, Value>>,
}

impl Default for PanelBase {
    fn default() -> Self {
        Self {
            data_source: Value::Null,
            targets: Vec::new(),
            title: String::new(),
            cache_timeout: None,
            description: None,
            editable: true,
            error: false,
            height: Value::Null,
            grid_pos: None,
            hide_time_override: false,
            id: None,
            interval: None,
            links: Vec::new(),
            max_data_points: 100,
            min_span: None,
            repeat: Repeat::default(),
            span: None,
            thresholds: Thresholds::default(),
            threshold_type: "absolute".to_string(),
            time_from: None,
            time_shift: None,
            transparent: false,
            transformations: Vec::new(),
            extra_json: None,
        }
    }
}

impl PanelBase {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_thresholds(thresholds: impl Into<Thresholds>) -> Self {
        Self {
            thresholds: thresholds.into(),
            ..Default::default()
        }
    }

    /// The common envelope every panel variant starts from.
    pub fn envelope(&self) -> Result<Map<String, Value>, CoreError> {
        let links: Vec<Value> = self.links.iter().map(DataLink::to_json_data).collect();
        Ok(into_map(json!({
            "cacheTimeout": self.cache_timeout,
            "datasource": self.data_source,
            "description": self.description,
            "editable": self.editable,
            "error": self.error,
            "fieldConfig": {
                "defaults": {
                    "thresholds": {
                        "mode": self.threshold_type,
                        "steps": self.thresholds.to_json_data(),
                    },
                },
            },
            "height": self.height,
            "gridPos": self.grid_pos.as_ref().map(GridPos::to_json_data),
            "hideTimeOverride": self.hide_time_override,
            "id": self.id,
            "interval": self.interval,
            "links": links,
            "maxDataPoints": self.max_data_points,
            "minSpan": self.min_span,
            "repeat": self.repeat.variable,
            "repeatDirection": self.repeat.direction,
            "maxPerRow": self.repeat.max_per_row,
            "span": self.span,
            "targets": targets_json(&self.targets)?,
            "timeFrom": self.time_from,
            "timeShift": self.time_shift,
            "title": self.title,
            "transparent": self.transparent,
            "transformations": self.transformations,
        })))
    }
}

/// Implement [`PanelVariant`] accessors for a struct with a `base` field.
macro_rules! panel_base {
    () => {
        fn base(&self) -> &$crate::panels::PanelBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut $crate::panels::PanelBase {
            &mut self.base
        }
    };
}

pub(crate) use panel_base;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::targets::Target;

    #[test]
    fn envelope_keys_present_even_when_null() {
        let envelope = PanelBase::titled("cpu").envelope().unwrap();
        for key in [
            "cacheTimeout", "datasource", "description", "editable", "error", "fieldConfig",
            "height", "gridPos", "hideTimeOverride", "id", "interval", "links",
            "maxDataPoints", "minSpan", "repeat", "repeatDirection", "maxPerRow", "span",
            "targets", "timeFrom", "timeShift", "title", "transparent", "transformations",
        ] {
            assert!(envelope.contains_key(key), "{key}");
        }
        assert_eq!(envelope["maxDataPoints"], 100);
        assert_eq!(envelope["fieldConfig"]["defaults"]["thresholds"]["mode"], "absolute");
        assert_eq!(envelope["fieldConfig"]["defaults"]["thresholds"]["steps"], json!([]));
    }

    #[test]
    fn envelope_flattens_repeat() {
        let base = PanelBase {
            repeat: Repeat {
                direction: Some("h".into()),
                variable: Some("instance".into()),
                max_per_row: Some(4),
            },
            grid_pos: Some(GridPos::new(8, 12, 0, 0)),
            ..Default::default()
        };
        let envelope = base.envelope().unwrap();
        assert_eq!(envelope["repeat"], "instance");
        assert_eq!(envelope["repeatDirection"], "h");
        assert_eq!(envelope["maxPerRow"], 4);
        assert_eq!(envelope["gridPos"], json!({"h": 8, "w": 12, "x": 0, "y": 0}));
    }

    #[test]
    fn envelope_serializes_targets() {
        let base = PanelBase {
            targets: vec![Target::new("up").into_target()],
            ..Default::default()
        };
        let envelope = base.envelope().unwrap();
        assert_eq!(envelope["targets"][0]["expr"], "up");
    }
}
