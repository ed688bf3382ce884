//! Dashboard composition: legacy rows, span balancing and panel ids.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::constants::{
    DARK_STYLE, DEFAULT_REFRESH, GRAPH_TOOLTIP_MODE_NOT_SHARED, SCHEMA_VERSION, TOTAL_SPAN, UTC,
};
use crate::error::CoreError;
use crate::links::{Input, Link};
use crate::panels::{panels_json, Panel};
use crate::templating::Templating;
use crate::time::{Time, TimePicker};
use crate::units::Pixels;

pub const DEFAULT_ROW_HEIGHT: Pixels = Pixels::new(250);

/// Give every panel without a span an equal share of the remaining width.
///
/// The share is `ceil((12 - allotted) / unset)`, floored at zero.
pub fn balance_panels(panels: &[Arc<dyn Panel>]) -> Vec<Arc<dyn Panel>> {
    let allotted: u32 = panels.iter().filter_map(|p| p.span()).sum();
    let unset = panels.iter().filter(|p| p.span().is_none()).count() as u32;
    let auto_span = TOTAL_SPAN.saturating_sub(allotted).div_ceil(unset.max(1));
    panels
        .iter()
        .map(|panel| match panel.span() {
            Some(_) => Arc::clone(panel),
            None => panel.with_span(auto_span),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Legacy rows
// ---------------------------------------------------------------------------

/// A legacy row of span-sized panels, for dashboards without grid positions.
#[derive(Debug, Clone)]
pub struct Row {
    pub panels: Vec<Arc<dyn Panel>>,
    pub collapse: bool,
    pub editable: bool,
    pub height: Pixels,
    /// Overrides the title-derived default when set.
    pub show_title: Option<bool>,
    pub title: Option<String>,
    pub repeat: Option<String>,
}

impl Default for Row {
    fn default() -> Self {
        Self {
            panels: Vec::new(),
            collapse: false,
            editable: true,
            height: DEFAULT_ROW_HEIGHT,
            show_title: None,
            title: None,
            repeat: None,
        }
    }
}

impl Row {
    pub fn new(panels: Vec<Arc<dyn Panel>>) -> Self {
        Self {
            panels,
            ..Default::default()
        }
    }

    /// A copy with spans balanced across the row.
    pub fn balanced(&self) -> Self {
        Self {
            panels: balance_panels(&self.panels),
            ..self.clone()
        }
    }

    pub fn to_json_data(&self) -> Result<Value, CoreError> {
        let show_title = self.show_title.unwrap_or(self.title.is_some());
        let title = self.title.as_deref().unwrap_or("New row");
        Ok(json!({
            "collapse": self.collapse,
            "editable": self.editable,
            "height": self.height.to_json_data(),
            "panels": panels_json(&self.panels)?,
            "showTitle": show_title,
            "title": title,
            "repeat": self.repeat,
        }))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotations {
    pub list: Vec<Value>,
}

impl Annotations {
    pub fn to_json_data(&self) -> Value {
        json!({"list": self.list})
    }
}

string_enum! {
    /// What to do with a dashboard that mixes legacy rows and grid panels.
    pub enum LayoutPolicy ("layoutPolicy", default = Warn) {
        Warn => "warn",
        Reject => "reject",
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub title: String,
    pub annotations: Annotations,
    pub description: String,
    pub editable: bool,
    pub gnet_id: Option<u64>,
    pub graph_tooltip: i64,
    pub hide_controls: bool,
    pub id: Option<u64>,
    pub inputs: Vec<Input>,
    pub links: Vec<Link>,
    pub panels: Vec<Arc<dyn Panel>>,
    pub refresh: String,
    pub rows: Vec<Row>,
    pub schema_version: u32,
    pub shared_crosshair: bool,
    pub style: String,
    pub tags: Vec<String>,
    pub templating: Templating,
    pub time: Time,
    pub time_picker: TimePicker,
    pub timezone: String,
    pub version: u64,
    pub uid: Option<String>,
    pub layout_policy: LayoutPolicy,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            title: String::new(),
            annotations: Annotations::default(),
            description: String::new(),
            editable: true,
            gnet_id: None,
            graph_tooltip: GRAPH_TOOLTIP_MODE_NOT_SHARED,
            hide_controls: false,
            id: None,
            inputs: Vec::new(),
            links: Vec::new(),
            panels: Vec::new(),
            refresh: DEFAULT_REFRESH.to_string(),
            rows: Vec::new(),
            schema_version: SCHEMA_VERSION,
            shared_crosshair: false,
            style: DARK_STYLE.to_string(),
            tags: Vec::new(),
            templating: Templating::default(),
            time: Time::default(),
            time_picker: TimePicker::default(),
            timezone: UTC.to_string(),
            version: 0,
            uid: None,
            layout_policy: LayoutPolicy::Warn,
        }
    }
}

fn has_id(panel: &Arc<dyn Panel>) -> bool {
    panel.id().is_some_and(|id| id != 0)
}

fn collect_tree(panel: &Arc<dyn Panel>, out: &mut Vec<Arc<dyn Panel>>) {
    out.push(Arc::clone(panel));
    for child in panel.children() {
        collect_tree(child, out);
    }
}

fn assign_ids(panel: &Arc<dyn Panel>, next_id: &mut dyn FnMut() -> u64) -> Arc<dyn Panel> {
    let panel = if has_id(panel) { Arc::clone(panel) } else { panel.with_id(next_id()) };
    if panel.children().is_empty() {
        return panel;
    }
    let children = panel.children().iter().map(|child| assign_ids(child, next_id)).collect();
    panel.with_children(children)
}

impl Dashboard {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Every panel in traversal order: legacy rows first, then each top-level
    /// panel followed by the panels nested inside it.
    pub fn iter_panels(&self) -> std::vec::IntoIter<Arc<dyn Panel>> {
        let mut all = Vec::new();
        for row in &self.rows {
            for panel in &row.panels {
                collect_tree(panel, &mut all);
            }
        }
        for panel in &self.panels {
            collect_tree(panel, &mut all);
        }
        all.into_iter()
    }

    /// A copy where every panel without an id gets the smallest positive
    /// integer not already taken, in traversal order. Existing ids are kept.
    pub fn auto_panel_ids(&self) -> Self {
        let taken: BTreeSet<u64> = self
            .iter_panels()
            .filter_map(|p| p.id())
            .filter(|&id| id != 0)
            .collect();
        let mut candidates = (1u64..).filter(move |id| !taken.contains(id));
        let mut next_id = move || candidates.next().unwrap_or_default();

        let rows = self
            .rows
            .iter()
            .map(|row| Row {
                panels: row.panels.iter().map(|p| assign_ids(p, &mut next_id)).collect(),
                ..row.clone()
            })
            .collect();
        let panels = self.panels.iter().map(|p| assign_ids(p, &mut next_id)).collect();
        Self {
            rows,
            panels,
            ..self.clone()
        }
    }

    pub fn to_json_data(&self) -> Result<Value, CoreError> {
        if !self.panels.is_empty() && !self.rows.is_empty() {
            match self.layout_policy {
                LayoutPolicy::Warn => tracing::warn!(
                    title = %self.title,
                    rows = self.rows.len(),
                    panels = self.panels.len(),
                    "Dashboard uses both panels and rows, prefer panels"
                ),
                LayoutPolicy::Reject => {
                    return Err(CoreError::Layout(format!(
                        "dashboard '{}' has both rows and panels",
                        self.title
                    )))
                }
            }
        }
        let panels = if self.rows.is_empty() { panels_json(&self.panels)? } else { Vec::new() };
        let rows = self.rows.iter().map(Row::to_json_data).collect::<Result<Vec<_>, _>>()?;
        let inputs: Vec<Value> = self.inputs.iter().map(Input::to_json_data).collect();
        let links: Vec<Value> = self.links.iter().map(Link::to_json_data).collect();
        Ok(json!({
            "__inputs": inputs,
            "annotations": self.annotations.to_json_data(),
            "description": self.description,
            "editable": self.editable,
            "gnetId": self.gnet_id,
            "graphTooltip": self.graph_tooltip,
            "hideControls": self.hide_controls,
            "id": self.id,
            "links": links,
            "panels": panels,
            "refresh": self.refresh,
            "rows": rows,
            "schemaVersion": self.schema_version,
            "sharedCrosshair": self.shared_crosshair,
            "style": self.style,
            "tags": self.tags,
            "templating": self.templating.to_json_data(),
            "title": self.title,
            "time": self.time.to_json_data(),
            "timepicker": self.time_picker.to_json_data(),
            "timezone": self.timezone,
            "version": self.version,
            "uid": self.uid,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::{Graph, PanelBase, RowPanel, Text};
    use assert_matches::assert_matches;

    fn text(span: Option<u32>) -> Arc<dyn Panel> {
        Text {
            base: PanelBase {
                span,
                ..Default::default()
            },
            ..Default::default()
        }
        .into_panel()
    }

    #[test]
    fn balance_shares_remaining_width() {
        let balanced = balance_panels(&[text(Some(4)), text(None), text(None), text(None)]);
        let spans: Vec<_> = balanced.iter().map(|p| p.span()).collect();
        assert_eq!(spans, [Some(4), Some(3), Some(3), Some(3)]);
    }

    #[test]
    fn balance_rounds_up_and_floors_at_zero() {
        let spans: Vec<_> = balance_panels(&vec![text(None); 5]).iter().map(|p| p.span()).collect();
        assert_eq!(spans, [Some(3); 5]);
        let full = balance_panels(&[text(Some(12)), text(None)]);
        assert_eq!(full[1].span(), Some(0));
    }

    #[test]
    fn row_title_defaults() {
        let untitled = Row::default().to_json_data().unwrap();
        assert_eq!(untitled["title"], "New row");
        assert_eq!(untitled["showTitle"], false);
        assert_eq!(untitled["height"], "250px");

        let titled = Row {
            title: Some("CPU".into()),
            ..Default::default()
        };
        assert_eq!(titled.to_json_data().unwrap()["showTitle"], true);

        let hidden = Row {
            title: Some("CPU".into()),
            show_title: Some(false),
            ..Default::default()
        };
        assert_eq!(hidden.to_json_data().unwrap()["showTitle"], false);
    }

    #[test]
    fn auto_ids_fill_gaps_in_traversal_order() {
        let mut preset = Graph::default();
        preset.base.id = Some(2);
        let dashboard = Dashboard {
            panels: vec![text(None), preset.into_panel(), text(None), text(None)],
            ..Dashboard::new("ids")
        };
        let numbered = dashboard.auto_panel_ids();
        let ids: Vec<_> = numbered.iter_panels().map(|p| p.id()).collect();
        assert_eq!(ids, [Some(1), Some(2), Some(3), Some(4)]);
        assert!(dashboard.panels[0].id().is_none());
    }

    #[test]
    fn auto_ids_recurse_into_row_panels() {
        let row = RowPanel::new("nested", vec![text(None), text(None)]);
        let dashboard = Dashboard {
            panels: vec![text(None), row.into_panel()],
            ..Default::default()
        };
        let numbered = dashboard.auto_panel_ids();
        let ids: Vec<_> = numbered.iter_panels().map(|p| p.id()).collect();
        assert_eq!(ids, [Some(1), Some(2), Some(3), Some(4)]);
        let again: Vec<_> = numbered.auto_panel_ids().iter_panels().map(|p| p.id()).collect();
        assert_eq!(again, ids);
    }

    #[test]
    fn rows_blank_out_panels() {
        let dashboard = Dashboard {
            rows: vec![Row::new(vec![text(None)])],
            panels: vec![text(None)],
            ..Dashboard::new("mixed")
        };
        let json = dashboard.to_json_data().unwrap();
        assert_eq!(json["panels"], json!([]));
        assert_eq!(json["rows"].as_array().unwrap().len(), 1);

        let strict = Dashboard {
            layout_policy: LayoutPolicy::Reject,
            ..dashboard
        };
        assert_matches!(strict.to_json_data(), Err(CoreError::Layout(_)));
    }

    #[test]
    fn dashboard_defaults() {
        let json = Dashboard::new("Empty").to_json_data().unwrap();
        assert_eq!(json["refresh"], "10s");
        assert_eq!(json["schemaVersion"], 12);
        assert_eq!(json["style"], "dark");
        assert_eq!(json["timezone"], "utc");
        assert_eq!(json["gnetId"], Value::Null);
        assert_eq!(json["time"], json!({"from": "now-1h", "to": "now"}));
        assert_eq!(json["templating"], json!({"list": []}));
        assert_eq!(json["annotations"], json!({"list": []}));
    }
}
