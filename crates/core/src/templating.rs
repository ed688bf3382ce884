//! Dashboard variables.
//!
//! A [`Template`] derives its `current` selection once, when it is built
//! from a [`TemplateSpec`]. Later reads return that snapshot.

use serde_json::{json, Map, Value};

use crate::constants::{
    DEFAULT_AUTO_COUNT, DEFAULT_MIN_AUTO_INTERVAL, REFRESH_ON_DASHBOARD_LOAD, SHOW,
    SORT_ALPHA_ASC,
};
use crate::error::ValidationError;
use crate::validators::{is_list_of, JsonKind};

/// Construction parameters of a dashboard variable.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateSpec {
    pub name: String,
    /// Query text; for `custom` variables the comma-separated choices.
    pub query: String,
    pub default: Option<String>,
    pub data_source: Option<Value>,
    pub label: Option<String>,
    pub all_value: Option<String>,
    pub include_all: bool,
    pub multi: bool,
    /// Pre-built options; each must be a JSON object.
    pub options: Vec<Value>,
    pub regex: Option<String>,
    pub use_tags: bool,
    pub tags_query: Option<String>,
    pub tag_values_query: Option<String>,
    pub refresh: i64,
    pub template_type: String,
    pub hide: i64,
    pub sort: i64,
    pub auto: bool,
    pub auto_count: u32,
    pub auto_min: String,
}

impl Default for TemplateSpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            query: String::new(),
            default: None,
            data_source: None,
            label: None,
            all_value: None,
            include_all: false,
            multi: false,
            options: Vec::new(),
            regex: None,
            use_tags: false,
            tags_query: None,
            tag_values_query: None,
            refresh: REFRESH_ON_DASHBOARD_LOAD,
            template_type: "query".to_string(),
            hide: SHOW,
            sort: SORT_ALPHA_ASC,
            auto: false,
            auto_count: DEFAULT_AUTO_COUNT,
            auto_min: DEFAULT_MIN_AUTO_INTERVAL.to_string(),
        }
    }
}

impl TemplateSpec {
    pub fn new(name: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            query: query.into(),
            ..Default::default()
        }
    }
}

/// A validated dashboard variable with its derived `current` selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    spec: TemplateSpec,
    current: Value,
}

impl Template {
    pub fn new(mut spec: TemplateSpec) -> Result<Self, ValidationError> {
        is_list_of("options", &spec.options, JsonKind::Object)?;
        let current = if spec.template_type == "custom" {
            if spec.options.is_empty() {
                spec.options = custom_options(&spec.query, spec.default.as_deref());
                // The last option equal to the default wins.
                spec.options
                    .iter()
                    .rev()
                    .find(|o| o["selected"] == Value::Bool(true))
                    .cloned()
            } else {
                spec.options
                    .iter()
                    .find(|o| o.get("selected").is_some_and(truthy))
                    .cloned()
            }
            .unwrap_or_else(|| Value::Object(Map::new()))
        } else {
            json!({
                "selected": spec.default.as_deref().is_some_and(|d| !d.is_empty()),
                "text": spec.default,
                "value": spec.default,
                "tags": [],
            })
        };
        Ok(Self { spec, current })
    }

    pub fn spec(&self) -> &TemplateSpec {
        &self.spec
    }

    /// The selection derived at construction.
    pub fn current(&self) -> &Value {
        &self.current
    }

    /// Options as rendered, including those generated for custom variables.
    pub fn options(&self) -> &[Value] {
        &self.spec.options
    }

    pub fn to_json_data(&self) -> Value {
        let spec = &self.spec;
        json!({
            "allValue": spec.all_value,
            "current": self.current,
            "datasource": spec.data_source,
            "hide": spec.hide,
            "includeAll": spec.include_all,
            "label": spec.label,
            "multi": spec.multi,
            "name": spec.name,
            "options": spec.options,
            "query": spec.query,
            "refresh": spec.refresh,
            "regex": spec.regex,
            "sort": spec.sort,
            "type": spec.template_type,
            "useTags": spec.use_tags,
            "tagsQuery": spec.tags_query,
            "tagValuesQuery": spec.tag_values_query,
            "auto": spec.auto,
            "auto_min": spec.auto_min,
            "auto_count": spec.auto_count,
        })
    }
}

fn custom_options(query: &str, default: Option<&str>) -> Vec<Value> {
    query
        .split(',')
        .map(|value| {
            json!({
                "selected": Some(value) == default,
                "text": value,
                "value": value,
            })
        })
        .collect()
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Templating {
    pub list: Vec<Template>,
}

impl Templating {
    pub fn new(list: Vec<Template>) -> Self {
        Self { list }
    }

    pub fn to_json_data(&self) -> Value {
        let list: Vec<Value> = self.list.iter().map(Template::to_json_data).collect();
        json!({"list": list})
    }
}
