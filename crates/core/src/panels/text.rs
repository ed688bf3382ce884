//! Text-like panels: text, news feed, logs, dashboard list and alert list.

use std::sync::Arc;

use serde_json::{json, Value};

use super::{panel_base, GridPos, Panel, PanelBase, PanelVariant};
use crate::constants::{
    ALERTLIST_SHOW_CURRENT, ALERTLIST_TYPE, DASHBOARDLIST_TYPE, DEFAULT_LIMIT, LOGS_TYPE,
    NEWS_TYPE, SORT_ASC, TEXT_TYPE,
};
use crate::error::CoreError;
use crate::links::DataLink;
use crate::targets::QueryTarget;

string_enum! {
    pub enum TextMode ("mode", default = Markdown) {
        Markdown => "markdown",
        Html => "html",
        Text => "text",
    }
}

#[derive(Debug, Clone, Default)]
pub struct Text {
    pub base: PanelBase,
    pub content: String,
    pub mode: TextMode,
}

impl Text {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            base: PanelBase::titled(title),
            content: content.into(),
            mode: TextMode::Markdown,
        }
    }
}

impl PanelVariant for Text {
    panel_base!();

    fn overlay(&self) -> Result<Value, CoreError> {
        Ok(json!({
            "type": TEXT_TYPE,
            "error": self.base.error,
            "options": {"content": self.content, "mode": self.mode.as_str()},
        }))
    }
}

#[derive(Debug, Clone)]
pub struct News {
    pub base: PanelBase,
    pub feed_url: String,
    pub show_image: bool,
    pub use_proxy: bool,
}

impl Default for News {
    fn default() -> Self {
        Self {
            base: PanelBase::default(),
            feed_url: String::new(),
            show_image: true,
            use_proxy: false,
        }
    }
}

impl PanelVariant for News {
    panel_base!();

    fn overlay(&self) -> Result<Value, CoreError> {
        Ok(json!({
            "options": {
                "feedUrl": self.feed_url,
                "showImage": self.show_image,
                "useProxy": self.use_proxy,
            },
            "type": NEWS_TYPE,
        }))
    }
}

#[derive(Debug, Clone)]
pub struct Logs {
    pub base: PanelBase,
    pub show_labels: bool,
    pub show_common_labels: bool,
    pub show_time: bool,
    pub wrap_log_messages: bool,
    pub sort_order: String,
    pub dedup_strategy: String,
    pub enable_log_details: bool,
    pub overrides: Vec<Value>,
    pub prettify_log_message: bool,
}

impl Default for Logs {
    fn default() -> Self {
        Self {
            base: PanelBase::default(),
            show_labels: false,
            show_common_labels: false,
            show_time: false,
            wrap_log_messages: false,
            sort_order: "Descending".to_string(),
            dedup_strategy: "none".to_string(),
            enable_log_details: false,
            overrides: Vec::new(),
            prettify_log_message: false,
        }
    }
}

impl Logs {
    pub fn new(title: impl Into<String>, targets: Vec<Arc<dyn QueryTarget>>) -> Self {
        let mut logs = Self::default();
        logs.base.title = title.into();
        logs.base.targets = targets;
        logs
    }
}

impl PanelVariant for Logs {
    panel_base!();

    fn overlay(&self) -> Result<Value, CoreError> {
        Ok(json!({
            "fieldConfig": {
                "defaults": {"custom": {}},
                "overrides": self.overrides,
            },
            "options": {
                "showLabels": self.show_labels,
                "showCommonLabels": self.show_common_labels,
                "showTime": self.show_time,
                "wrapLogMessage": self.wrap_log_messages,
                "sortOrder": self.sort_order,
                "dedupStrategy": self.dedup_strategy,
                "enableLogDetails": self.enable_log_details,
                "prettifyLogMessage": self.prettify_log_message,
            },
            "type": LOGS_TYPE,
        }))
    }
}

#[derive(Debug, Clone)]
pub struct DashboardList {
    pub base: PanelBase,
    pub show_headings: bool,
    pub show_search: bool,
    pub show_recent: bool,
    pub show_starred: bool,
    pub max_items: u32,
    pub search_query: String,
    pub search_tags: Vec<String>,
    pub overrides: Vec<Value>,
}

impl Default for DashboardList {
    fn default() -> Self {
        Self {
            base: PanelBase::default(),
            show_headings: true,
            show_search: false,
            show_recent: false,
            show_starred: true,
            max_items: DEFAULT_LIMIT,
            search_query: String::new(),
            search_tags: Vec::new(),
            overrides: Vec::new(),
        }
    }
}

impl PanelVariant for DashboardList {
    panel_base!();

    fn overlay(&self) -> Result<Value, CoreError> {
        Ok(json!({
            "fieldConfig": {
                "defaults": {"custom": {}},
                "overrides": self.overrides,
            },
            "headings": self.show_headings,
            "search": self.show_search,
            "recent": self.show_recent,
            "starred": self.show_starred,
            "limit": self.max_items,
            "query": self.search_query,
            "tags": self.search_tags,
            "type": DASHBOARDLIST_TYPE,
        }))
    }
}

// ---------------------------------------------------------------------------
// AlertList
// ---------------------------------------------------------------------------

/// Alert list panel. It has its own flat shape and does not use the
/// common envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertList {
    pub dashboard_tags: Vec<String>,
    pub description: String,
    pub grid_pos: Option<GridPos>,
    pub id: Option<u64>,
    pub limit: u32,
    pub links: Vec<DataLink>,
    pub name_filter: String,
    pub only_alerts_on_dashboard: bool,
    pub show: String,
    pub sort_order: i64,
    pub span: u32,
    pub state_filter: Vec<String>,
    pub title: String,
    pub transparent: bool,
    pub alert_name: String,
}

impl Default for AlertList {
    fn default() -> Self {
        Self {
            dashboard_tags: Vec::new(),
            description: String::new(),
            grid_pos: None,
            id: None,
            limit: DEFAULT_LIMIT,
            links: Vec::new(),
            name_filter: String::new(),
            only_alerts_on_dashboard: true,
            show: ALERTLIST_SHOW_CURRENT.to_string(),
            sort_order: SORT_ASC,
            span: 6,
            state_filter: Vec::new(),
            title: String::new(),
            transparent: false,
            alert_name: String::new(),
        }
    }
}

impl Panel for AlertList {
    fn id(&self) -> Option<u64> {
        self.id
    }

    fn with_id(&self, id: u64) -> Arc<dyn Panel> {
        Arc::new(Self {
            id: Some(id),
            ..self.clone()
        })
    }

    fn span(&self) -> Option<u32> {
        Some(self.span)
    }

    fn with_span(&self, span: u32) -> Arc<dyn Panel> {
        Arc::new(Self {
            span,
            ..self.clone()
        })
    }

    fn with_children(&self, _children: Vec<Arc<dyn Panel>>) -> Arc<dyn Panel> {
        Arc::new(self.clone())
    }

    fn to_json_data(&self) -> Result<Value, CoreError> {
        let links: Vec<Value> = self.links.iter().map(DataLink::to_json_data).collect();
        Ok(json!({
            "dashboardTags": self.dashboard_tags,
            "description": self.description,
            "gridPos": self.grid_pos.as_ref().map(GridPos::to_json_data),
            "id": self.id,
            "limit": self.limit,
            "links": links,
            "nameFilter": self.name_filter,
            "onlyAlertsOnDashboard": self.only_alerts_on_dashboard,
            "show": self.show,
            "sortOrder": self.sort_order,
            "span": self.span,
            "stateFilter": self.state_filter,
            "title": self.title,
            "transparent": self.transparent,
            "type": ALERTLIST_TYPE,
            "options": {"alertName": self.alert_name},
        }))
    }
}
