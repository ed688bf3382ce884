//! Zabbix plugin targets, query functions and the triggers panel.
//!
//! A [`ZabbixTarget`] runs in one of three query modes; the keys it emits
//! depend on the mode. Functions are validated when they are built, so a
//! rendered target never carries an interval or aggregation Zabbix rejects.

use std::sync::Arc;

use gdash_core::color::{ColorCode, BLANK, GREEN, RGBA};
use gdash_core::error::ValidationError;
use gdash_core::layout::DEFAULT_ROW_HEIGHT;
use gdash_core::links::DashboardLink;
use gdash_core::panels::Panel;
use gdash_core::units::{Interval, Percent, Pixels};
use gdash_core::{CoreError, QueryTarget};
use serde_json::{json, Value};

pub const ZABBIX_TRIGGERS_TYPE: &str = "alexanderzobnin-zabbix-triggers-panel";

// ---------------------------------------------------------------------------
// Query modes and SLA properties
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueryMode {
    #[default]
    Metrics,
    Services,
    Text,
}

impl QueryMode {
    pub fn code(self) -> u8 {
        match self {
            Self::Metrics => 0,
            Self::Services => 1,
            Self::Text => 2,
        }
    }
}

/// IT service property shown by a services-mode target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlaProperty {
    pub name: &'static str,
    pub property: &'static str,
}

impl SlaProperty {
    pub fn to_json_data(&self) -> Value {
        json!({"name": self.name, "property": self.property})
    }
}

pub const SLA_STATUS: SlaProperty = SlaProperty { name: "Status", property: "status" };
pub const SLA_SLA: SlaProperty = SlaProperty { name: "SLA", property: "sla" };
pub const SLA_OK_TIME: SlaProperty = SlaProperty { name: "OK time", property: "okTime" };
pub const SLA_PROBLEM_TIME: SlaProperty = SlaProperty {
    name: "Problem time",
    property: "problemTime",
};
pub const SLA_DOWN_TIME: SlaProperty = SlaProperty { name: "Down time", property: "downtimeTime" };

// ---------------------------------------------------------------------------
// Functions
// ---------------------------------------------------------------------------

gdash_core::string_enum! {
    /// Aggregation applied inside a time bucket or across series.
    pub enum AggFunction ("function", default = Avg) {
        Avg => "avg",
        Min => "min",
        Max => "max",
        Median => "median",
    }
}

gdash_core::string_enum! {
    pub enum TrendType ("type", default = Avg) {
        Avg => "avg",
        Min => "min",
        Max => "max",
    }
}

gdash_core::string_enum! {
    pub enum TimeShift ("interval", default = Day) {
        Day => "24h",
        Week => "7d",
        Month => "1M",
        DayAhead => "+24h",
        DayBack => "-24h",
    }
}

const DEFAULT_FUNCTION_INTERVAL: &str = "1m";
const DEFAULT_SCALE_FACTOR: f64 = 100.0;
const DEFAULT_TOP_N: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub enum FunctionKind {
    Delta,
    GroupBy { interval: Interval, function: AggFunction },
    Scale { factor: f64 },
    AggregateBy { interval: Interval, function: AggFunction },
    Average { interval: Interval },
    Max { interval: Interval },
    Median { interval: Interval },
    Min { interval: Interval },
    SumSeries,
    Bottom { number: u32, function: AggFunction },
    Top { number: u32, function: AggFunction },
    TrendValue { trend: TrendType },
    TimeShift { shift: TimeShift },
    SetAlias { alias: String },
    SetAliasByRegex { regexp: String },
}

/// A function in a target's processing chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ZabbixFunction {
    pub kind: FunctionKind,
    pub added: bool,
}

impl From<FunctionKind> for ZabbixFunction {
    fn from(kind: FunctionKind) -> Self {
        Self { kind, added: false }
    }
}

impl ZabbixFunction {
    pub fn delta() -> Self {
        FunctionKind::Delta.into()
    }

    pub fn group_by(interval: &str, function: &str) -> Result<Self, ValidationError> {
        Ok(FunctionKind::GroupBy {
            interval: Interval::new(interval)?,
            function: function.parse()?,
        }
        .into())
    }

    pub fn scale(factor: f64) -> Self {
        FunctionKind::Scale { factor }.into()
    }

    pub fn aggregate_by(interval: &str, function: &str) -> Result<Self, ValidationError> {
        Ok(FunctionKind::AggregateBy {
            interval: Interval::new(interval)?,
            function: function.parse()?,
        }
        .into())
    }

    pub fn average(interval: &str) -> Result<Self, ValidationError> {
        Ok(FunctionKind::Average { interval: Interval::new(interval)? }.into())
    }

    pub fn max(interval: &str) -> Result<Self, ValidationError> {
        Ok(FunctionKind::Max { interval: Interval::new(interval)? }.into())
    }

    pub fn median(interval: &str) -> Result<Self, ValidationError> {
        Ok(FunctionKind::Median { interval: Interval::new(interval)? }.into())
    }

    pub fn min(interval: &str) -> Result<Self, ValidationError> {
        Ok(FunctionKind::Min { interval: Interval::new(interval)? }.into())
    }

    pub fn sum_series() -> Self {
        FunctionKind::SumSeries.into()
    }

    pub fn bottom(number: u32, function: &str) -> Result<Self, ValidationError> {
        Ok(FunctionKind::Bottom { number, function: function.parse()? }.into())
    }

    pub fn top(number: u32, function: &str) -> Result<Self, ValidationError> {
        Ok(FunctionKind::Top { number, function: function.parse()? }.into())
    }

    pub fn trend_value(trend: &str) -> Result<Self, ValidationError> {
        Ok(FunctionKind::TrendValue { trend: trend.parse()? }.into())
    }

    pub fn time_shift(shift: &str) -> Result<Self, ValidationError> {
        Ok(FunctionKind::TimeShift { shift: shift.parse()? }.into())
    }

    pub fn set_alias(alias: impl Into<String>) -> Self {
        FunctionKind::SetAlias { alias: alias.into() }.into()
    }

    pub fn set_alias_by_regex(regexp: impl Into<String>) -> Self {
        FunctionKind::SetAliasByRegex { regexp: regexp.into() }.into()
    }

    pub fn to_json_data(&self) -> Value {
        let interval_param = json!({"name": "interval", "type": "string"});
        let function_param =
            json!({"name": "function", "options": AggFunction::ALL, "type": "string"});
        let default_interval = DEFAULT_FUNCTION_INTERVAL;
        let default_function = AggFunction::default().as_str();

        let (category, name, default_params, param_defs, params) = match &self.kind {
            FunctionKind::Delta => ("Transform", "delta", json!([]), json!([]), json!([])),
            FunctionKind::GroupBy { interval, function } => (
                "Transform",
                "groupBy",
                json!([default_interval, default_function]),
                json!([interval_param, function_param]),
                json!([interval.as_str(), function.as_str()]),
            ),
            FunctionKind::Scale { factor } => (
                "Transform",
                "scale",
                json!([number(DEFAULT_SCALE_FACTOR)]),
                json!([{"name": "factor", "options": [100, 0.01, 10, -1], "type": "float"}]),
                json!([number(*factor)]),
            ),
            FunctionKind::AggregateBy { interval, function } => (
                "Aggregate",
                "aggregateBy",
                json!([default_interval, default_function]),
                json!([interval_param, function_param]),
                json!([interval.as_str(), function.as_str()]),
            ),
            FunctionKind::Average { interval }
            | FunctionKind::Max { interval }
            | FunctionKind::Median { interval }
            | FunctionKind::Min { interval } => (
                "Aggregate",
                self.name(),
                json!([default_interval]),
                json!([interval_param]),
                json!([interval.as_str()]),
            ),
            FunctionKind::SumSeries => ("Aggregate", "sumSeries", json!([]), json!([]), json!([])),
            FunctionKind::Bottom { number, function } | FunctionKind::Top { number, function } => (
                "Filter",
                self.name(),
                json!([DEFAULT_TOP_N, default_function]),
                json!([{"name": "number", "type": "string"}, function_param]),
                json!([number, function.as_str()]),
            ),
            FunctionKind::TrendValue { trend } => (
                "Trends",
                "trendValue",
                json!([TrendType::default().as_str()]),
                json!([{"name": "type", "options": TrendType::ALL, "type": "string"}]),
                json!([trend.as_str()]),
            ),
            FunctionKind::TimeShift { shift } => (
                "Time",
                "timeShift",
                json!([TimeShift::default().as_str()]),
                json!([{"name": "interval", "options": TimeShift::ALL, "type": "string"}]),
                json!([shift.as_str()]),
            ),
            FunctionKind::SetAlias { alias } => (
                "Alias",
                "setAlias",
                json!([]),
                json!([{"name": "alias", "type": "string"}]),
                json!([alias]),
            ),
            FunctionKind::SetAliasByRegex { regexp } => (
                "Alias",
                "setAliasByRegex",
                json!([]),
                json!([{"name": "aliasByRegex", "type": "string"}]),
                json!([regexp]),
            ),
        };
        json!({
            "def": {
                "category": category,
                "name": name,
                "defaultParams": default_params,
                "params": param_defs,
            },
            "text": self.text(),
            "params": params,
            "added": self.added,
        })
    }

    fn name(&self) -> &'static str {
        match &self.kind {
            FunctionKind::Delta => "delta",
            FunctionKind::GroupBy { .. } => "groupBy",
            FunctionKind::Scale { .. } => "scale",
            FunctionKind::AggregateBy { .. } => "aggregateBy",
            FunctionKind::Average { .. } => "average",
            FunctionKind::Max { .. } => "max",
            FunctionKind::Median { .. } => "median",
            FunctionKind::Min { .. } => "min",
            FunctionKind::SumSeries => "sumSeries",
            FunctionKind::Bottom { .. } => "bottom",
            FunctionKind::Top { .. } => "top",
            FunctionKind::TrendValue { .. } => "trendValue",
            FunctionKind::TimeShift { .. } => "timeShift",
            FunctionKind::SetAlias { .. } => "setAlias",
            FunctionKind::SetAliasByRegex { .. } => "setAliasByRegex",
        }
    }

    /// The call as Zabbix displays it, e.g. `groupBy(1m, avg)`.
    pub fn text(&self) -> String {
        let args = match &self.kind {
            FunctionKind::Delta | FunctionKind::SumSeries => String::new(),
            FunctionKind::GroupBy { interval, function }
            | FunctionKind::AggregateBy { interval, function } => format!("{interval}, {function}"),
            FunctionKind::Scale { factor } => factor.to_string(),
            FunctionKind::Average { interval }
            | FunctionKind::Max { interval }
            | FunctionKind::Median { interval }
            | FunctionKind::Min { interval } => interval.to_string(),
            FunctionKind::Bottom { number, function } | FunctionKind::Top { number, function } => {
                format!("{number}, {function}")
            }
            FunctionKind::TrendValue { trend } => trend.to_string(),
            FunctionKind::TimeShift { shift } => shift.to_string(),
            FunctionKind::SetAlias { alias } => alias.clone(),
            FunctionKind::SetAliasByRegex { regexp } => regexp.clone(),
        };
        format!("{}({args})", self.name())
    }
}

/// Integral factors render as JSON integers.
fn number(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        json!(value as i64)
    } else {
        json!(value)
    }
}

// ---------------------------------------------------------------------------
// Target
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ZabbixTarget {
    pub application: String,
    pub expr: String,
    pub functions: Vec<ZabbixFunction>,
    pub group: String,
    pub host: String,
    pub interval_factor: u32,
    pub item: String,
    pub it_service: String,
    pub mode: QueryMode,
    pub show_disabled_items: bool,
    pub ref_id: String,
    /// Rendered as `{}` when unset.
    pub sla_property: Option<SlaProperty>,
    pub text_filter: String,
    pub use_capture_groups: bool,
}

impl Default for ZabbixTarget {
    fn default() -> Self {
        Self {
            application: String::new(),
            expr: String::new(),
            functions: Vec::new(),
            group: String::new(),
            host: String::new(),
            interval_factor: 2,
            item: String::new(),
            it_service: String::new(),
            mode: QueryMode::Metrics,
            show_disabled_items: false,
            ref_id: String::new(),
            sla_property: None,
            text_filter: String::new(),
            use_capture_groups: false,
        }
    }
}

impl ZabbixTarget {
    /// Numeric item history, optionally post-processed by `functions`.
    pub fn metric(
        application: impl Into<String>,
        group: impl Into<String>,
        host: impl Into<String>,
        item: impl Into<String>,
        functions: Vec<ZabbixFunction>,
    ) -> Self {
        Self {
            mode: QueryMode::Metrics,
            application: application.into(),
            group: group.into(),
            host: host.into(),
            item: item.into(),
            functions,
            ..Self::default()
        }
    }

    /// An IT service property, [`SLA_STATUS`] unless given.
    pub fn service(service: impl Into<String>, sla: Option<SlaProperty>) -> Self {
        Self {
            mode: QueryMode::Services,
            it_service: service.into(),
            sla_property: Some(sla.unwrap_or(SLA_STATUS)),
            ..Self::default()
        }
    }

    /// Text item values filtered by `text`.
    pub fn text(
        application: impl Into<String>,
        group: impl Into<String>,
        host: impl Into<String>,
        item: impl Into<String>,
        text: impl Into<String>,
        use_capture_groups: bool,
    ) -> Self {
        Self {
            mode: QueryMode::Text,
            application: application.into(),
            group: group.into(),
            host: host.into(),
            item: item.into(),
            text_filter: text.into(),
            use_capture_groups,
            ..Self::default()
        }
    }
}

fn filter(value: &str) -> Value {
    json!({"filter": value})
}

impl QueryTarget for ZabbixTarget {
    ref_id_accessors!();

    fn to_json_data(&self) -> Result<Value, CoreError> {
        let functions: Vec<Value> =
            self.functions.iter().map(ZabbixFunction::to_json_data).collect();
        let mut json = json!({
            "application": filter(&self.application),
            "expr": self.expr,
            "functions": functions,
            "group": filter(&self.group),
            "host": filter(&self.host),
            "intervalFactor": self.interval_factor,
            "item": filter(&self.item),
            "mode": self.mode.code(),
            "options": {"showDisabledItems": self.show_disabled_items},
            "refId": self.ref_id,
        });
        match self.mode {
            QueryMode::Services => {
                json["slaProperty"] = self
                    .sla_property
                    .as_ref()
                    .map_or_else(|| json!({}), SlaProperty::to_json_data);
                json["itservice"] = json!({"name": self.it_service});
            }
            QueryMode::Text => {
                json["textFilter"] = json!(self.text_filter);
                json["useCaptureGroups"] = json!(self.use_capture_groups);
            }
            QueryMode::Metrics => {}
        }
        Ok(json)
    }
}

// ---------------------------------------------------------------------------
// Triggers panel
// ---------------------------------------------------------------------------

/// Display color for one trigger severity.
#[derive(Debug, Clone, PartialEq)]
pub struct ZabbixColor {
    pub color: ColorCode,
    pub priority: u32,
    pub severity: String,
    pub show: bool,
}

impl ZabbixColor {
    pub fn new(
        color: &str,
        priority: u32,
        severity: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            color: ColorCode::new(color)?,
            priority,
            severity: severity.into(),
            show: true,
        })
    }

    pub fn to_json_data(&self) -> Value {
        json!({
            "color": self.color.as_str(),
            "priority": self.priority,
            "severity": self.severity,
            "show": self.show,
        })
    }
}

const SEVERITY_COLORS: [(&str, &str); 6] = [
    ("#B7DBAB", "Not classified"),
    ("#82B5D8", "Information"),
    ("#E5AC0E", "Warning"),
    ("#C15C17", "Average"),
    ("#BF1B00", "High"),
    ("#890F02", "Disaster"),
];

/// Zabbix's stock palette, priority 0 (not classified) to 5 (disaster).
pub fn default_severity_colors() -> Vec<ZabbixColor> {
    SEVERITY_COLORS
        .iter()
        .zip(0..)
        .map(|(&(color, severity), priority)| ZabbixColor {
            color: ColorCode::from_static(color),
            priority,
            severity: severity.to_string(),
            show: true,
        })
        .collect()
}

/// Trigger selection shared by every field of the panel's filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZabbixTrigger {
    pub application: String,
    pub group: String,
    pub host: String,
    pub trigger: String,
}

impl ZabbixTrigger {
    pub fn to_json_data(&self) -> Value {
        json!({
            "application": filter(&self.application),
            "group": filter(&self.group),
            "host": filter(&self.host),
            "trigger": filter(&self.trigger),
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShowEvents {
    #[default]
    Problems,
    Ok,
    All,
}

impl ShowEvents {
    pub fn to_json_data(&self) -> Value {
        match self {
            Self::Problems => json!({"text": "Problems", "value": [1]}),
            Self::Ok => json!({"text": "OK", "value": [0]}),
            Self::All => json!({"text": "All", "value": [0, 1]}),
        }
    }
}

gdash_core::string_enum! {
    pub enum ShowTriggers ("showTriggers", default = All) {
        All => "all triggers",
        Acknowledged => "acknowledged",
        Unacknowledged => "unacknowledged",
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortTriggersBy {
    #[default]
    LastChange,
    Severity,
}

impl SortTriggersBy {
    pub fn to_json_data(&self) -> Value {
        match self {
            Self::LastChange => json!({"text": "last change", "value": "lastchange"}),
            Self::Severity => json!({"text": "severity", "value": "priority"}),
        }
    }
}

/// The Zabbix plugin's trigger list. It has its own flat shape and does not
/// use the common panel envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ZabbixTriggersPanel {
    pub data_source: Value,
    pub title: String,
    pub ack_event_color: RGBA,
    pub age_field: bool,
    pub custom_last_change_format: bool,
    pub description: String,
    pub font_size: Percent,
    pub height: Pixels,
    pub hide_hosts_in_maintenance: bool,
    pub host_field: bool,
    pub host_tech_name_field: bool,
    pub id: Option<u64>,
    pub info_field: bool,
    pub last_change_field: bool,
    pub last_change_format: String,
    pub limit: u32,
    pub links: Vec<DashboardLink>,
    pub mark_ack_events: bool,
    pub min_span: Option<u32>,
    pub ok_event_color: RGBA,
    pub page_size: u32,
    pub repeat: Option<String>,
    pub scroll: bool,
    pub severity_field: bool,
    pub show_events: ShowEvents,
    pub show_triggers: ShowTriggers,
    pub sort_triggers_by: SortTriggersBy,
    pub span: Option<u32>,
    pub status_field: bool,
    pub transparent: bool,
    pub triggers: ZabbixTrigger,
    pub trigger_severity: Vec<ZabbixColor>,
}

impl Default for ZabbixTriggersPanel {
    fn default() -> Self {
        Self {
            data_source: Value::Null,
            title: String::new(),
            ack_event_color: BLANK,
            age_field: true,
            custom_last_change_format: false,
            description: String::new(),
            font_size: Percent::default(),
            height: DEFAULT_ROW_HEIGHT,
            hide_hosts_in_maintenance: false,
            host_field: true,
            host_tech_name_field: false,
            id: None,
            info_field: true,
            last_change_field: true,
            last_change_format: String::new(),
            limit: 10,
            links: Vec::new(),
            mark_ack_events: false,
            min_span: None,
            ok_event_color: GREEN,
            page_size: 10,
            repeat: None,
            scroll: true,
            severity_field: false,
            show_events: ShowEvents::Problems,
            show_triggers: ShowTriggers::All,
            sort_triggers_by: SortTriggersBy::LastChange,
            span: None,
            status_field: false,
            transparent: false,
            triggers: ZabbixTrigger::default(),
            trigger_severity: default_severity_colors(),
        }
    }
}

impl ZabbixTriggersPanel {
    pub fn new(data_source: impl Into<Value>, title: impl Into<String>) -> Self {
        Self {
            data_source: data_source.into(),
            title: title.into(),
            ..Self::default()
        }
    }
}

impl Panel for ZabbixTriggersPanel {
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
        self.span
    }

    fn with_span(&self, span: u32) -> Arc<dyn Panel> {
        Arc::new(Self {
            span: Some(span),
            ..self.clone()
        })
    }

    fn with_children(&self, _children: Vec<Arc<dyn Panel>>) -> Arc<dyn Panel> {
        Arc::new(self.clone())
    }

    fn to_json_data(&self) -> Result<Value, CoreError> {
        let links: Vec<Value> = self.links.iter().map(DashboardLink::to_json_data).collect();
        let severity: Vec<Value> = self
            .trigger_severity
            .iter()
            .map(ZabbixColor::to_json_data)
            .collect();
        Ok(json!({
            "type": ZABBIX_TRIGGERS_TYPE,
            "datasource": self.data_source,
            "title": self.title,
            "ackEventColor": self.ack_event_color.to_json_data(),
            "ageField": self.age_field,
            "customLastChangeFormat": self.custom_last_change_format,
            "description": self.description,
            "fontSize": self.font_size.to_json_data(),
            "height": self.height.to_json_data(),
            "hideHostsInMaintenance": self.hide_hosts_in_maintenance,
            "hostField": self.host_field,
            "hostTechNameField": self.host_tech_name_field,
            "id": self.id,
            "infoField": self.info_field,
            "lastChangeField": self.last_change_field,
            "lastChangeFormat": self.last_change_format,
            "limit": self.limit,
            "links": links,
            "markAckEvents": self.mark_ack_events,
            "minSpan": self.min_span,
            "okEventColor": self.ok_event_color.to_json_data(),
            "pageSize": self.page_size,
            "repeat": self.repeat,
            "scroll": self.scroll,
            "severityField": self.severity_field,
            "showEvents": self.show_events.to_json_data(),
            "showTriggers": self.show_triggers.as_str(),
            "sortTriggersBy": self.sort_triggers_by.to_json_data(),
            "span": self.span,
            "statusField": self.status_field,
            "transparent": self.transparent,
            "triggers": self.triggers.to_json_data(),
            "triggerSeverity": severity,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use gdash_core::error::Rule;

    #[test]
    fn metric_target_omits_mode_specific_keys() {
        let target =
            ZabbixTarget::metric("CPU", "Linux servers", "web-1", "CPU idle time", Vec::new());
        let json = target.to_json_data().unwrap();
        assert_eq!(json["mode"], 0);
        assert_eq!(json["host"], json!({"filter": "web-1"}));
        assert_eq!(json["options"], json!({"showDisabledItems": false}));
        assert_eq!(json["intervalFactor"], 2);
        assert!(json.get("slaProperty").is_none());
        assert!(json.get("textFilter").is_none());
    }

    #[test]
    fn service_target_carries_sla() {
        let json = ZabbixTarget::service("Web shop", None).to_json_data().unwrap();
        assert_eq!(json["mode"], 1);
        assert_eq!(json["slaProperty"], json!({"name": "Status", "property": "status"}));
        assert_eq!(json["itservice"], json!({"name": "Web shop"}));

        let bare = ZabbixTarget {
            mode: QueryMode::Services,
            ..Default::default()
        };
        assert_eq!(bare.to_json_data().unwrap()["slaProperty"], json!({}));
    }

    #[test]
    fn text_target_carries_filter() {
        let json = ZabbixTarget::text("", "Linux servers", "web-1", "Agent version", "^5\\.", true)
            .to_json_data()
            .unwrap();
        assert_eq!(json["mode"], 2);
        assert_eq!(json["textFilter"], "^5\\.");
        assert_eq!(json["useCaptureGroups"], true);
        assert!(json.get("itservice").is_none());
    }

    #[test]
    fn group_by_function() {
        let json = ZabbixFunction::group_by("5m", "max").unwrap().to_json_data();
        assert_eq!(json["text"], "groupBy(5m, max)");
        assert_eq!(json["params"], json!(["5m", "max"]));
        assert_eq!(json["def"]["defaultParams"], json!(["1m", "avg"]));
        assert_eq!(json["def"]["category"], "Transform");
        assert_eq!(json["def"]["params"][1]["options"], json!(["avg", "min", "max", "median"]));
        assert_eq!(json["added"], false);
    }

    #[test]
    fn function_validation() {
        assert_matches!(
            ZabbixFunction::group_by("1m", "sum"),
            Err(ValidationError { rule: Rule::OneOf, ref field, .. }) if field == "function"
        );
        assert_eq!(ZabbixFunction::average("five").unwrap_err().rule, Rule::Interval);
        assert_eq!(ZabbixFunction::top(3, "sum").unwrap_err().rule, Rule::OneOf);
        assert_eq!(ZabbixFunction::time_shift("12h").unwrap_err().field, "interval");
        assert!(ZabbixFunction::time_shift("-24h").is_ok());
        assert!(ZabbixFunction::trend_value("median").is_err());
    }

    #[test]
    fn function_texts() {
        assert_eq!(ZabbixFunction::delta().text(), "delta()");
        assert_eq!(ZabbixFunction::scale(0.01).text(), "scale(0.01)");
        assert_eq!(ZabbixFunction::scale(100.0).to_json_data()["params"], json!([100]));
        assert_eq!(ZabbixFunction::bottom(5, "avg").unwrap().text(), "bottom(5, avg)");
        assert_eq!(ZabbixFunction::median("1h").unwrap().to_json_data()["def"]["name"], "median");
        let by_regex = ZabbixFunction::set_alias_by_regex("(.*)").to_json_data();
        assert_eq!(by_regex["def"]["params"][0]["name"], "aliasByRegex");
    }

    #[test]
    fn color_must_be_hex_code() {
        assert_eq!(ZabbixColor::new("red", 0, "Info").unwrap_err().rule, Rule::ColorCode);
        assert_eq!(ZabbixColor::new("#AABBCC", 2, "Warning").unwrap().to_json_data()["show"], true);
    }

    #[test]
    fn triggers_panel_defaults() {
        let panel = ZabbixTriggersPanel::new("zabbix", "Problems");
        let json = panel.to_json_data().unwrap();
        assert_eq!(json["type"], ZABBIX_TRIGGERS_TYPE);
        assert_eq!(json["ackEventColor"], "rgba(0, 0, 0, 0.0)");
        assert_eq!(json["height"], "250px");
        assert_eq!(json["fontSize"], "100%");
        assert_eq!(json["showEvents"], json!({"text": "Problems", "value": [1]}));
        assert_eq!(json["showTriggers"], "all triggers");
        assert_eq!(json["sortTriggersBy"]["value"], "lastchange");
        assert_eq!(
            json["triggerSeverity"][5],
            json!({"color": "#890F02", "priority": 5, "severity": "Disaster", "show": true})
        );
        assert_eq!(json["triggers"]["trigger"], json!({"filter": ""}));
    }

    #[test]
    fn triggers_panel_takes_ids() {
        let panel = ZabbixTriggersPanel::new("zabbix", "Problems").with_id(7);
        assert_eq!(panel.id(), Some(7));
        assert_eq!(panel.to_json_data().unwrap()["id"], 7);
    }
}
