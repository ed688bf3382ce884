//! Collapsible row panel for grid-positioned dashboards.

use std::sync::Arc;

use serde_json::{json, Value};

use super::{panel_base, panels_json, Panel, PanelBase, PanelVariant};
use crate::constants::ROW_TYPE;
use crate::error::CoreError;

/// A row header. When collapsed, the panels it hides are nested inside it.
#[derive(Debug, Clone, Default)]
pub struct RowPanel {
    pub base: PanelBase,
    pub panels: Vec<Arc<dyn Panel>>,
    pub collapsed: bool,
}

impl RowPanel {
    pub fn new(title: impl Into<String>, panels: Vec<Arc<dyn Panel>>) -> Self {
        Self {
            base: PanelBase::titled(title),
            panels,
            collapsed: false,
        }
    }
}

impl PanelVariant for RowPanel {
    panel_base!();

    fn overlay(&self) -> Result<Value, CoreError> {
        Ok(json!({
            "collapsed": self.collapsed,
            "panels": panels_json(&self.panels)?,
            "type": ROW_TYPE,
        }))
    }

    fn nested_panels(&self) -> &[Arc<dyn Panel>] {
        &self.panels
    }

    fn with_nested_panels(&self, panels: Vec<Arc<dyn Panel>>) -> Self {
        Self {
            panels,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::Text;

    #[test]
    fn row_panel_nests_children() {
        let row = RowPanel {
            collapsed: true,
            ..RowPanel::new("Details", vec![Text::new("a", "x").into_panel()])
        };
        let json = row.to_json_data().unwrap();
        assert_eq!(json["type"], "row");
        assert_eq!(json["collapsed"], true);
        assert_eq!(json["panels"][0]["type"], "text");
        assert_eq!(row.children().len(), 1);
    }

    #[test]
    fn with_children_leaves_original() {
        let row = RowPanel::new("r", Vec::new());
        let replaced = row.with_children(vec![Text::default().into_panel()]);
        assert_eq!(replaced.children().len(), 1);
        assert!(row.panels.is_empty());
    }
}
