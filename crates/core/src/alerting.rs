//! Alert conditions, legacy panel alerts and unified alert rules.
//!
//! Rule rendering never touches the caller's conditions: each condition is
//! rendered against the target it is paired with, and the returned JSON is
//! the only output.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::constants::{
    CTYPE_QUERY, EVAL_GT, EVAL_LT, EVAL_NO_VALUE, EVAL_OUTSIDE_RANGE, EVAL_WITHIN_RANGE,
    EXP_REDUCER_FUNC_MEAN, EXP_REDUCER_MODE_STRICT, OP_AND, RTYPE_LAST, STATE_ALERTING,
    STATE_NO_DATA,
};
use crate::error::{CoreError, Rule, ValidationError};
use crate::targets::{QueryTarget, Target};
use crate::units::Interval;

const EXPRESSION_DATASOURCE_UID: &str = "-100";
const CONDITION_REF_ID: &str = "CONDITION";

// ---------------------------------------------------------------------------
// Evaluator and time range
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluator {
    pub eval_type: String,
    pub params: Vec<Value>,
}

impl Evaluator {
    pub fn new(eval_type: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            eval_type: eval_type.into(),
            params,
        }
    }

    pub fn greater_than(value: impl Into<Value>) -> Self {
        Self::new(EVAL_GT, vec![value.into()])
    }

    pub fn lower_than(value: impl Into<Value>) -> Self {
        Self::new(EVAL_LT, vec![value.into()])
    }

    pub fn within_range(from: impl Into<Value>, to: impl Into<Value>) -> Self {
        Self::new(EVAL_WITHIN_RANGE, vec![from.into(), to.into()])
    }

    pub fn outside_range(from: impl Into<Value>, to: impl Into<Value>) -> Self {
        Self::new(EVAL_OUTSIDE_RANGE, vec![from.into(), to.into()])
    }

    pub fn no_value() -> Self {
        Self::new(EVAL_NO_VALUE, Vec::new())
    }

    pub fn to_json_data(&self) -> Value {
        json!({"type": self.eval_type, "params": self.params})
    }
}

/// Window of a legacy condition, e.g. `("5m", "now")`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeRange {
    pub from_time: String,
    pub to_time: String,
}

impl TimeRange {
    pub fn new(from_time: impl Into<String>, to_time: impl Into<String>) -> Self {
        Self {
            from_time: from_time.into(),
            to_time: to_time.into(),
        }
    }

    pub fn to_json_data(&self) -> Value {
        json!([self.from_time, self.to_time])
    }
}

// ---------------------------------------------------------------------------
// Conditions and expressions
// ---------------------------------------------------------------------------

/// A threshold check over one query.
#[derive(Debug, Clone)]
pub struct AlertCondition {
    pub target: Option<Arc<dyn QueryTarget>>,
    pub evaluator: Evaluator,
    pub time_range: Option<TimeRange>,
    pub operator: String,
    pub reducer_type: String,
    /// Unified alerting drops the query model and the time window.
    pub use_new_alerts: bool,
    pub condition_type: String,
}

impl AlertCondition {
    pub fn new(evaluator: Evaluator) -> Self {
        Self {
            target: None,
            evaluator,
            time_range: None,
            operator: OP_AND.to_string(),
            reducer_type: RTYPE_LAST.to_string(),
            use_new_alerts: false,
            condition_type: CTYPE_QUERY.to_string(),
        }
    }

    pub fn to_json_data(&self) -> Result<Value, CoreError> {
        self.render(self.target.as_deref(), self.use_new_alerts)
    }

    /// Render against `target` instead of the condition's own target.
    pub fn render(
        &self,
        target: Option<&dyn QueryTarget>,
        use_new_alerts: bool,
    ) -> Result<Value, CoreError> {
        let params = match (target, &self.time_range) {
            (Some(t), _) if use_new_alerts => json!([t.ref_id()]),
            (Some(t), Some(range)) => json!([t.ref_id(), range.from_time, range.to_time]),
            _ => json!([]),
        };
        let mut query = json!({"params": params});
        if !use_new_alerts {
            query["model"] = match target {
                Some(t) => t.to_json_data()?,
                None => json!({}),
            };
        }
        Ok(json!({
            "evaluator": self.evaluator.to_json_data(),
            "operator": {"type": self.operator},
            "query": query,
            "reducer": {"params": [], "type": self.reducer_type},
            "type": self.condition_type,
        }))
    }
}

string_enum! {
    pub enum ExpressionType ("expressionType", default = Classic) {
        Classic => "classic_conditions",
        Reduce => "reduce",
        Resample => "resample",
        Math => "math",
    }
}

/// A server-side expression evaluated by unified alerting.
#[derive(Debug, Clone)]
pub struct AlertExpression {
    pub ref_id: String,
    pub expression: String,
    pub conditions: Vec<AlertCondition>,
    pub expression_type: ExpressionType,
    pub hide: bool,
    pub interval_ms: u64,
    pub max_data_points: u64,
    pub reduce_function: String,
    pub reduce_mode: String,
    pub reduce_replace_with: Value,
    pub resample_window: Interval,
    pub resample_downsampler: String,
    pub resample_upsampler: String,
}

impl AlertExpression {
    pub fn new(ref_id: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            ref_id: ref_id.into(),
            expression: expression.into(),
            conditions: Vec::new(),
            expression_type: ExpressionType::Classic,
            hide: false,
            interval_ms: 1000,
            max_data_points: 43200,
            reduce_function: EXP_REDUCER_FUNC_MEAN.to_string(),
            reduce_mode: EXP_REDUCER_MODE_STRICT.to_string(),
            reduce_replace_with: json!(0),
            resample_window: Interval::from_static("10s"),
            resample_downsampler: "mean".to_string(),
            resample_upsampler: "fillna".to_string(),
        }
    }

    pub fn to_json_data(&self) -> Result<Value, CoreError> {
        // Conditions without a target query the expression itself.
        let fallback = Target {
            ref_id: self.expression.clone(),
            ..Default::default()
        };
        let conditions = self
            .conditions
            .iter()
            .map(|condition| {
                let target = condition.target.as_deref().unwrap_or(&fallback);
                condition.render(Some(target), true)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(json!({
            "refId": self.ref_id,
            "queryType": "",
            "relativeTimeRange": {"from": 0, "to": 0},
            "datasourceUid": EXPRESSION_DATASOURCE_UID,
            "model": {
                "conditions": conditions,
                "datasource": {"type": "__expr__", "uid": EXPRESSION_DATASOURCE_UID},
                "expression": self.expression,
                "hide": self.hide,
                "intervalMs": self.interval_ms,
                "maxDataPoints": self.max_data_points,
                "refId": self.ref_id,
                "type": self.expression_type.as_str(),
                "reducer": self.reduce_function,
                "settings": {"mode": self.reduce_mode, "replaceWithValue": self.reduce_replace_with},
                "downsampler": self.resample_downsampler,
                "upsampler": self.resample_upsampler,
                "window": self.resample_window.as_str(),
            },
        }))
    }
}

// ---------------------------------------------------------------------------
// Legacy panel alert
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub uid: String,
}

impl Notification {
    pub fn new(uid: impl Into<String>) -> Self {
        Self { uid: uid.into() }
    }

    pub fn to_json_data(&self) -> Value {
        json!({"uid": self.uid})
    }
}

/// Alert attached to a legacy graph panel.
#[derive(Debug, Clone)]
pub struct Alert {
    pub name: String,
    pub message: String,
    pub alert_conditions: Vec<AlertCondition>,
    pub execution_error_state: String,
    pub frequency: Interval,
    pub handler: i64,
    pub no_data_state: String,
    pub notifications: Vec<Notification>,
    pub grace_period: Interval,
    pub alert_rule_tags: BTreeMap<String, String>,
}

impl Alert {
    pub fn new(
        name: impl Into<String>,
        message: impl Into<String>,
        alert_conditions: Vec<AlertCondition>,
    ) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            alert_conditions,
            execution_error_state: STATE_ALERTING.to_string(),
            frequency: Interval::from_static("60s"),
            handler: 1,
            no_data_state: STATE_NO_DATA.to_string(),
            notifications: Vec::new(),
            grace_period: Interval::from_static("5m"),
            alert_rule_tags: BTreeMap::new(),
        }
    }

    pub fn to_json_data(&self) -> Result<Value, CoreError> {
        let conditions = self
            .alert_conditions
            .iter()
            .map(AlertCondition::to_json_data)
            .collect::<Result<Vec<_>, _>>()?;
        let notifications: Vec<Value> =
            self.notifications.iter().map(Notification::to_json_data).collect();
        Ok(json!({
            "conditions": conditions,
            "executionErrorState": self.execution_error_state,
            "frequency": self.frequency.as_str(),
            "handler": self.handler,
            "message": self.message,
            "name": self.name,
            "noDataState": self.no_data_state,
            "notifications": notifications,
            "for": self.grace_period.as_str(),
            "alertRuleTags": self.alert_rule_tags,
        }))
    }
}

// ---------------------------------------------------------------------------
// Unified alert rules
// ---------------------------------------------------------------------------

string_enum! {
    /// State a rule enters on missing data or evaluation errors.
    pub enum AlertRuleState ("alertState", default = Alerting) {
        Ok => "OK",
        NoData => "No Data",
        Alerting => "Alerting",
        Error => "Error",
    }
}

/// A target usable as an alert data entry: its refId is never empty.
#[derive(Debug, Clone)]
pub struct AlertQuery(Arc<dyn QueryTarget>);

impl AlertQuery {
    pub fn new(target: Arc<dyn QueryTarget>) -> Result<Self, ValidationError> {
        if target.ref_id().is_empty() {
            return Err(ValidationError::new(
                "refId",
                Rule::NonEmptyRefId,
                "Alert targets must have a non-empty refId",
            ));
        }
        Ok(Self(target))
    }

    pub fn target(&self) -> &dyn QueryTarget {
        self.0.as_ref()
    }

    fn data_entry(&self, from: i64, to: i64) -> Result<Value, CoreError> {
        Ok(json!({
            "refId": self.0.ref_id(),
            "relativeTimeRange": {"from": from, "to": to},
            "datasourceUid": self.0.datasource(),
            "model": self.0.to_json_data()?,
        }))
    }
}

/// A target paired with the condition evaluated on it.
#[derive(Debug, Clone)]
pub struct AlertTrigger {
    pub query: AlertQuery,
    pub condition: AlertCondition,
}

impl AlertTrigger {
    pub fn new(
        target: Arc<dyn QueryTarget>,
        condition: AlertCondition,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            query: AlertQuery::new(target)?,
            condition,
        })
    }
}

/// Grafana 8 rule: every trigger's condition is combined into one
/// classic-conditions entry with refId `CONDITION`.
#[derive(Debug, Clone)]
pub struct AlertRuleV8 {
    pub title: String,
    pub triggers: Vec<AlertTrigger>,
    pub annotations: BTreeMap<String, String>,
    pub labels: BTreeMap<String, String>,
    pub evaluate_interval: Interval,
    pub evaluate_for: Interval,
    pub no_data_alert_state: AlertRuleState,
    pub error_alert_state: AlertRuleState,
    /// Seconds before now.
    pub time_range_from: i64,
    pub time_range_to: i64,
    pub uid: Option<String>,
    pub rule_group: String,
}

impl AlertRuleV8 {
    pub fn new(title: impl Into<String>, triggers: Vec<AlertTrigger>) -> Self {
        Self {
            title: title.into(),
            triggers,
            annotations: BTreeMap::new(),
            labels: BTreeMap::new(),
            evaluate_interval: Interval::from_static("1m"),
            evaluate_for: Interval::from_static("5m"),
            no_data_alert_state: AlertRuleState::Alerting,
            error_alert_state: AlertRuleState::Alerting,
            time_range_from: 300,
            time_range_to: 0,
            uid: None,
            rule_group: String::new(),
        }
    }

    pub fn to_json_data(&self) -> Result<Value, CoreError> {
        let mut data = Vec::with_capacity(self.triggers.len() + 1);
        let mut conditions = Vec::with_capacity(self.triggers.len());
        for trigger in &self.triggers {
            data.push(trigger.query.data_entry(self.time_range_from, self.time_range_to)?);
            conditions.push(trigger.condition.render(Some(trigger.query.target()), true)?);
        }
        data.push(json!({
            "refId": CONDITION_REF_ID,
            "datasourceUid": EXPRESSION_DATASOURCE_UID,
            "model": {
                "conditions": conditions,
                "refId": CONDITION_REF_ID,
                "type": ExpressionType::Classic.as_str(),
            },
        }));
        Ok(json!({
            "for": self.evaluate_for.as_str(),
            "labels": self.labels,
            "annotations": self.annotations,
            "grafana_alert": {
                "title": self.title,
                "condition": CONDITION_REF_ID,
                "data": data,
                "intervalSeconds": self.evaluate_interval.as_str(),
                "exec_err_state": self.error_alert_state.as_str(),
                "no_data_state": self.no_data_alert_state.as_str(),
                "uid": self.uid,
                "rule_group": self.rule_group,
            },
        }))
    }
}

/// One entry of a Grafana 9 rule's data list.
#[derive(Debug, Clone)]
pub enum AlertRuleV9Trigger {
    Query(AlertQuery),
    Expression(AlertExpression),
}

impl From<AlertQuery> for AlertRuleV9Trigger {
    fn from(query: AlertQuery) -> Self {
        Self::Query(query)
    }
}

impl From<AlertExpression> for AlertRuleV9Trigger {
    fn from(expression: AlertExpression) -> Self {
        Self::Expression(expression)
    }
}

/// Grafana 9+ rule. `condition` names the refId whose result fires the
/// alert; it is not checked against `triggers`.
#[derive(Debug, Clone)]
pub struct AlertRuleV9 {
    pub title: String,
    pub triggers: Vec<AlertRuleV9Trigger>,
    pub annotations: BTreeMap<String, String>,
    pub labels: BTreeMap<String, String>,
    pub evaluate_for: Interval,
    pub no_data_alert_state: AlertRuleState,
    pub error_alert_state: AlertRuleState,
    pub condition: String,
    pub time_range_from: i64,
    pub time_range_to: i64,
    pub uid: Option<String>,
}

impl AlertRuleV9 {
    pub fn new(title: impl Into<String>, triggers: Vec<AlertRuleV9Trigger>) -> Self {
        Self {
            title: title.into(),
            triggers,
            annotations: BTreeMap::new(),
            labels: BTreeMap::new(),
            evaluate_for: Interval::from_static("5m"),
            no_data_alert_state: AlertRuleState::Alerting,
            error_alert_state: AlertRuleState::Alerting,
            condition: "B".to_string(),
            time_range_from: 300,
            time_range_to: 0,
            uid: None,
        }
    }

    pub fn to_json_data(&self) -> Result<Value, CoreError> {
        let data = self
            .triggers
            .iter()
            .map(|trigger| match trigger {
                AlertRuleV9Trigger::Query(query) => {
                    query.data_entry(self.time_range_from, self.time_range_to)
                }
                AlertRuleV9Trigger::Expression(expression) => expression.to_json_data(),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(json!({
            "uid": self.uid,
            "for": self.evaluate_for.as_str(),
            "labels": self.labels,
            "annotations": self.annotations,
            "grafana_alert": {
                "title": self.title,
                "condition": self.condition,
                "data": data,
                "no_data_state": self.no_data_alert_state.as_str(),
                "exec_err_state": self.error_alert_state.as_str(),
            },
        }))
    }
}

#[derive(Debug, Clone)]
pub enum AlertRule {
    V8(AlertRuleV8),
    V9(AlertRuleV9),
}

impl AlertRule {
    /// A copy stamped with the group name. Only v8 rules carry it.
    pub fn in_group(&self, group: &str) -> Self {
        match self {
            Self::V8(rule) => Self::V8(AlertRuleV8 {
                rule_group: group.to_string(),
                ..rule.clone()
            }),
            Self::V9(rule) => Self::V9(rule.clone()),
        }
    }

    pub fn to_json_data(&self) -> Result<Value, CoreError> {
        match self {
            Self::V8(rule) => rule.to_json_data(),
            Self::V9(rule) => rule.to_json_data(),
        }
    }
}

impl From<AlertRuleV8> for AlertRule {
    fn from(rule: AlertRuleV8) -> Self {
        Self::V8(rule)
    }
}

impl From<AlertRuleV9> for AlertRule {
    fn from(rule: AlertRuleV9) -> Self {
        Self::V9(rule)
    }
}

// ---------------------------------------------------------------------------
// Groups and provisioning
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct AlertGroup {
    pub name: String,
    pub rules: Vec<AlertRule>,
    pub folder: String,
    pub evaluate_interval: Interval,
}

impl AlertGroup {
    pub fn new(name: impl Into<String>, rules: Vec<AlertRule>) -> Self {
        Self {
            name: name.into(),
            rules,
            folder: "alert".to_string(),
            evaluate_interval: Interval::from_static("1m"),
        }
    }

    pub fn to_json_data(&self) -> Result<Value, CoreError> {
        let rules = self
            .rules
            .iter()
            .map(|rule| rule.in_group(&self.name).to_json_data())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(json!({
            "name": self.name,
            "interval": self.evaluate_interval.as_str(),
            "rules": rules,
            "folder": self.folder,
        }))
    }
}

/// Root of a file-provisioned alerting config.
#[derive(Debug, Clone)]
pub struct AlertFileBasedProvisioning {
    pub groups: Vec<AlertGroup>,
}

impl AlertFileBasedProvisioning {
    pub fn new(groups: Vec<AlertGroup>) -> Self {
        Self { groups }
    }

    pub fn to_json_data(&self) -> Result<Value, CoreError> {
        let groups = self
            .groups
            .iter()
            .map(AlertGroup::to_json_data)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(json!({"apiVersion": 1, "groups": groups}))
    }
}
