//! Dashboard links, panel data links and import inputs.

use serde_json::{json, Value};

/// A link attached to a panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataLink {
    pub title: String,
    pub link_url: String,
    pub is_new_tab: bool,
}

impl DataLink {
    pub fn new(title: impl Into<String>, link_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link_url: link_url.into(),
            is_new_tab: false,
        }
    }

    pub fn to_json_data(&self) -> Value {
        json!({
            "title": self.title,
            "url": self.link_url,
            "targetBlank": self.is_new_tab,
        })
    }
}

string_enum! {
    pub enum LinkIcon ("icon", default = ExternalLink) {
        Bolt => "bolt",
        Cloud => "cloud",
        Dashboard => "dashboard",
        Doc => "doc",
        ExternalLink => "external link",
        Info => "info",
        Question => "question",
    }
}

string_enum! {
    pub enum DashboardLinkType ("type", default = Dashboards) {
        Dashboards => "dashboards",
        Link => "link",
    }
}

/// A link to other dashboards (by tag) or to an external resource.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardLink {
    pub as_dropdown: bool,
    pub icon: LinkIcon,
    pub include_vars: bool,
    pub keep_time: bool,
    pub tags: Vec<String>,
    pub target_blank: bool,
    pub title: String,
    pub tooltip: String,
    pub link_type: DashboardLinkType,
    pub uri: String,
}

impl Default for DashboardLink {
    fn default() -> Self {
        Self {
            as_dropdown: false,
            icon: LinkIcon::ExternalLink,
            include_vars: false,
            keep_time: true,
            tags: Vec::new(),
            target_blank: false,
            title: String::new(),
            tooltip: String::new(),
            link_type: DashboardLinkType::Dashboards,
            uri: String::new(),
        }
    }
}

impl DashboardLink {
    pub fn to_json_data(&self) -> Value {
        json!({
            "asDropdown": self.as_dropdown,
            "icon": self.icon.as_str(),
            "includeVars": self.include_vars,
            "keepTime": self.keep_time,
            "tags": self.tags,
            "targetBlank": self.target_blank,
            "title": self.title,
            "tooltip": self.tooltip,
            "type": self.link_type.as_str(),
            "url": self.uri,
        })
    }
}

/// A top-level link to an arbitrary URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalLink {
    pub uri: String,
    pub title: String,
    pub keep_time: bool,
}

impl ExternalLink {
    pub fn new(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            title: title.into(),
            keep_time: false,
        }
    }

    pub fn to_json_data(&self) -> Value {
        json!({
            "keepTime": self.keep_time,
            "title": self.title,
            "type": "link",
            "url": self.uri,
        })
    }
}

/// Any link a dashboard header accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum Link {
    Dashboard(DashboardLink),
    External(ExternalLink),
}

impl Link {
    pub fn to_json_data(&self) -> Value {
        match self {
            Self::Dashboard(link) => link.to_json_data(),
            Self::External(link) => link.to_json_data(),
        }
    }
}

impl From<DashboardLink> for Link {
    fn from(link: DashboardLink) -> Self {
        Self::Dashboard(link)
    }
}

impl From<ExternalLink> for Link {
    fn from(link: ExternalLink) -> Self {
        Self::External(link)
    }
}

// ---------------------------------------------------------------------------
// Import inputs
// ---------------------------------------------------------------------------

/// A datasource the importer must pick, listed under `__inputs`.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSourceInput {
    pub name: String,
    pub label: String,
    pub plugin_id: String,
    pub plugin_name: String,
    pub description: String,
}

impl DataSourceInput {
    pub fn to_json_data(&self) -> Value {
        json!({
            "description": self.description,
            "label": self.label,
            "name": self.name,
            "pluginId": self.plugin_id,
            "pluginName": self.plugin_name,
            "type": "datasource",
        })
    }
}

/// A constant the importer may override, listed under `__inputs`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantInput {
    pub name: String,
    pub label: String,
    pub value: Value,
    pub description: String,
}

impl ConstantInput {
    pub fn to_json_data(&self) -> Value {
        json!({
            "description": self.description,
            "label": self.label,
            "name": self.name,
            "type": "constant",
            "value": self.value,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    DataSource(DataSourceInput),
    Constant(ConstantInput),
}

impl Input {
    pub fn to_json_data(&self) -> Value {
        match self {
            Self::DataSource(input) => input.to_json_data(),
            Self::Constant(input) => input.to_json_data(),
        }
    }
}

impl From<DataSourceInput> for Input {
    fn from(input: DataSourceInput) -> Self {
        Self::DataSource(input)
    }
}

impl From<ConstantInput> for Input {
    fn from(input: ConstantInput) -> Self {
        Self::Constant(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Rule;

    #[test]
    fn dashboard_link_renames_uri() {
        let link = DashboardLink {
            uri: "https://example.com".into(),
            link_type: DashboardLinkType::Link,
            ..Default::default()
        };
        let json = link.to_json_data();
        assert_eq!(json["url"], "https://example.com");
        assert_eq!(json["type"], "link");
        assert_eq!(json["icon"], "external link");
        assert_eq!(json["keepTime"], true);
    }

    #[test]
    fn link_icon_is_closed_set() {
        assert_eq!("bolt".parse::<LinkIcon>(), Ok(LinkIcon::Bolt));
        assert_eq!("rocket".parse::<LinkIcon>().unwrap_err().rule, Rule::OneOf);
    }

    #[test]
    fn external_link_shape() {
        assert_eq!(
            Link::from(ExternalLink::new("https://grafana.com", "Grafana")).to_json_data(),
            json!({"keepTime": false, "title": "Grafana", "type": "link", "url": "https://grafana.com"})
        );
    }

    #[test]
    fn data_link_shape() {
        let link = DataLink {
            is_new_tab: true,
            ..DataLink::new("Logs", "/explore")
        };
        assert_eq!(
            link.to_json_data(),
            json!({"title": "Logs", "url": "/explore", "targetBlank": true})
        );
    }

    #[test]
    fn inputs_carry_type_tag() {
        let ds = Input::from(DataSourceInput {
            name: "DS_PROM".into(),
            label: "Prometheus".into(),
            plugin_id: "prometheus".into(),
            plugin_name: "Prometheus".into(),
            description: String::new(),
        });
        assert_eq!(ds.to_json_data()["type"], "datasource");
        let constant = Input::from(ConstantInput {
            name: "VAR_ENV".into(),
            label: "Environment".into(),
            value: json!("prod"),
            description: String::new(),
        });
        assert_eq!(constant.to_json_data()["value"], "prod");
    }
}
