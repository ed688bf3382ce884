//! Unified alerting rules rendered through groups and provisioning files.

use std::sync::Arc;

use assert_matches::assert_matches;
use gdash_core::alerting::{
    AlertCondition, AlertExpression, AlertFileBasedProvisioning, AlertGroup, AlertQuery,
    AlertRule, AlertRuleV8, AlertRuleV9, AlertTrigger, Evaluator, ExpressionType,
};
use gdash_core::targets::{QueryTarget, Target};
use gdash_core::Rule;
use serde_json::json;

fn target(ref_id: &str, expr: &str) -> Arc<dyn QueryTarget> {
    Target {
        ref_id: ref_id.into(),
        datasource: json!("prom-uid"),
        ..Target::new(expr)
    }
    .into_target()
}

fn v8_rule() -> AlertRuleV8 {
    AlertRuleV8::new(
        "High error rate",
        vec![
            AlertTrigger::new(
                target("A", "rate(errors_total[5m])"),
                AlertCondition::new(Evaluator::greater_than(5)),
            )
            .unwrap(),
            AlertTrigger::new(
                target("B", "rate(requests_total[5m])"),
                AlertCondition::new(Evaluator::lower_than(1)),
            )
            .unwrap(),
        ],
    )
}

// ---------------------------------------------------------------------------
// Test: a v8 rule with two triggers renders three data entries
// ---------------------------------------------------------------------------

#[test]
fn v8_rule_combines_conditions() {
    let json = v8_rule().to_json_data().unwrap();
    let data = json["grafana_alert"]["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(data[0]["refId"], "A");
    assert_eq!(data[0]["datasourceUid"], "prom-uid");
    assert_eq!(data[0]["relativeTimeRange"], json!({"from": 300, "to": 0}));
    assert_eq!(data[1]["model"]["expr"], "rate(requests_total[5m])");

    let condition = &data[2];
    assert_eq!(condition["refId"], "CONDITION");
    assert_eq!(condition["datasourceUid"], "-100");
    let conditions = condition["model"]["conditions"].as_array().unwrap();
    assert_eq!(conditions.len(), 2);
    assert_eq!(conditions[0]["query"], json!({"params": ["A"]}));
    assert_eq!(conditions[1]["evaluator"], json!({"type": "lt", "params": [1]}));

    assert_eq!(json["grafana_alert"]["condition"], "CONDITION");
    assert_eq!(json["for"], "5m");
}

// ---------------------------------------------------------------------------
// Test: alert targets need a refId
// ---------------------------------------------------------------------------

#[test]
fn alert_query_requires_ref_id() {
    let err = AlertQuery::new(target("", "up")).unwrap_err();
    assert_eq!(err.rule, Rule::NonEmptyRefId);
    assert_matches!(
        AlertTrigger::new(target("", "up"), AlertCondition::new(Evaluator::no_value())),
        Err(_)
    );
}

// ---------------------------------------------------------------------------
// Test: v9 rules render queries and expressions in order
// ---------------------------------------------------------------------------

#[test]
fn v9_rule_lists_triggers() {
    let reduce = AlertExpression {
        expression_type: ExpressionType::Reduce,
        ..AlertExpression::new("B", "A")
    };
    let rule = AlertRuleV9 {
        uid: Some("errors".into()),
        ..AlertRuleV9::new(
            "Errors",
            vec![AlertQuery::new(target("A", "errors")).unwrap().into(), reduce.into()],
        )
    };
    let json = rule.to_json_data().unwrap();
    assert_eq!(json["uid"], "errors");
    assert_eq!(json["grafana_alert"]["condition"], "B");
    assert_eq!(json["grafana_alert"]["data"][0]["refId"], "A");
    assert_eq!(json["grafana_alert"]["data"][1]["model"]["type"], "reduce");
    assert_eq!(json["grafana_alert"]["data"][1]["model"]["expression"], "A");
}

// ---------------------------------------------------------------------------
// Test: groups stamp their name onto v8 rules only
// ---------------------------------------------------------------------------

#[test]
fn group_stamps_rule_group() {
    let group = AlertGroup::new(
        "http",
        vec![
            AlertRule::from(v8_rule()),
            AlertRule::from(AlertRuleV9::new("Errors", Vec::new())),
        ],
    );
    let json = group.to_json_data().unwrap();
    assert_eq!(json["name"], "http");
    assert_eq!(json["interval"], "1m");
    assert_eq!(json["folder"], "alert");
    assert_eq!(json["rules"][0]["grafana_alert"]["rule_group"], "http");
    assert!(json["rules"][1]["grafana_alert"].get("rule_group").is_none());
}

// ---------------------------------------------------------------------------
// Test: provisioning files wrap groups with apiVersion 1
// ---------------------------------------------------------------------------

#[test]
fn provisioning_root() {
    let provisioning = AlertFileBasedProvisioning::new(vec![AlertGroup::new(
        "http",
        vec![v8_rule().into()],
    )]);
    let json = provisioning.to_json_data().unwrap();
    assert_eq!(json["apiVersion"], 1);
    assert_eq!(json["groups"][0]["rules"][0]["grafana_alert"]["title"], "High error rate");
}
