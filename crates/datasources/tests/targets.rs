//! Datasource targets and panels used through the core dashboard model.

use std::sync::Arc;

use gdash_core::alerting::{AlertCondition, AlertRuleV8, AlertTrigger, Evaluator};
use gdash_core::layout::Dashboard;
use gdash_core::panels::{Graph, Panel, Table};
use gdash_core::targets::QueryTarget;
use gdash_datasources::elasticsearch::{BucketAgg, FieldAgg, TermsGroupBy};
use gdash_datasources::zabbix::ZabbixFunction;
use gdash_datasources::{
    AzureDataExplorerTarget, ElasticsearchTarget, HumioTarget, InfluxDbTarget, MetricAgg,
    OpenTsdbTarget, ZabbixTarget, ZabbixTriggersPanel,
};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: mixed datasource targets share one refId sequence
// ---------------------------------------------------------------------------

#[test]
fn mixed_targets_get_ref_ids() {
    let targets: Vec<Arc<dyn QueryTarget>> = vec![
        InfluxDbTarget::new("SELECT mean(value) FROM cpu").into_target(),
        OpenTsdbTarget {
            ref_id: "A".into(),
            ..OpenTsdbTarget::new("sys.cpu.user")
        }
        .into_target(),
        HumioTarget::new("sandbox", "count()").into_target(),
        AzureDataExplorerTarget::new("telemetry", "Events | count").into_target(),
    ];
    let graph = Graph::new("Mixed", targets).auto_ref_ids().unwrap();
    let json = graph.to_json_data().unwrap();
    let ref_ids: Vec<&str> = json["targets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["refId"].as_str().unwrap())
        .collect();
    assert_eq!(ref_ids, ["B", "A", "C", "D"]);
    assert_eq!(json["targets"][0]["resultFormat"], "time_series");
    assert_eq!(json["targets"][2]["humioRepository"], "sandbox");
}

// ---------------------------------------------------------------------------
// Test: an Elasticsearch table panel renders its aggregations
// ---------------------------------------------------------------------------

#[test]
fn elasticsearch_table() {
    let target = ElasticsearchTarget {
        metric_aggs: vec![MetricAgg::Max(FieldAgg {
            id: 1,
            ..FieldAgg::new("response_time")
        })],
        bucket_aggs: vec![BucketAgg::Terms(TermsGroupBy::new("host")), BucketAgg::default()],
        ..ElasticsearchTarget::new("status:200")
    }
    .auto_bucket_agg_ids();
    let table = Table::new("Slowest hosts", vec![target.into_target()]);
    let json = table.to_json_data().unwrap();
    let target = &json["targets"][0];
    assert_eq!(target["bucketAggs"][0]["id"], "1");
    assert_eq!(target["bucketAggs"][1]["id"], "2");
    assert_eq!(target["metrics"][0]["type"], "max");
    assert_eq!(target["query"], "status:200");
}

// ---------------------------------------------------------------------------
// Test: Elasticsearch queries drive unified alert rules
// ---------------------------------------------------------------------------

#[test]
fn elasticsearch_alert_rule() {
    let target = ElasticsearchTarget {
        ref_id: "A".into(),
        ..ElasticsearchTarget::new("level:error")
    };
    let rule = AlertRuleV8::new(
        "Error logs",
        vec![AlertTrigger::new(
            Arc::new(target.clone()),
            target.alert_condition(Evaluator::greater_than(100)),
        )
        .unwrap()],
    );
    let json = rule.to_json_data().unwrap();
    let data = &json["grafana_alert"]["data"];
    assert_eq!(data[0]["model"]["query"], "level:error");
    assert_eq!(data[1]["model"]["conditions"][0]["query"], json!({"params": ["A"]}));
    assert_eq!(data[1]["model"]["conditions"][0]["evaluator"]["params"], json!([100]));
}

// ---------------------------------------------------------------------------
// Test: Zabbix targets and the triggers panel on one dashboard
// ---------------------------------------------------------------------------

#[test]
fn zabbix_dashboard() {
    let functions = vec![
        ZabbixFunction::group_by("5m", "avg").unwrap(),
        ZabbixFunction::set_alias("load"),
    ];
    let load = ZabbixTarget::metric("CPU", "Linux servers", "web-1", "Processor load", functions);
    let dashboard = Dashboard {
        panels: vec![
            Graph::new("Load", vec![load.into_target()]).into_panel(),
            ZabbixTriggersPanel::new("zabbix", "Problems").into_panel(),
        ],
        ..Dashboard::new("Zabbix")
    }
    .auto_panel_ids();
    let json = dashboard.to_json_data().unwrap();
    let functions = &json["panels"][0]["targets"][0]["functions"];
    assert_eq!(functions[0]["text"], "groupBy(5m, avg)");
    assert_eq!(functions[1]["text"], "setAlias(load)");
    assert_eq!(json["panels"][1]["type"], "alexanderzobnin-zabbix-triggers-panel");
    assert_eq!(json["panels"][1]["id"], 2);
}

// ---------------------------------------------------------------------------
// Test: an unused alert condition keeps its default shape
// ---------------------------------------------------------------------------

#[test]
fn elasticsearch_condition_without_time_range() {
    let condition: AlertCondition =
        ElasticsearchTarget::new("*").alert_condition(Evaluator::lower_than(1));
    let json = condition.to_json_data().unwrap();
    assert_eq!(json["query"]["params"], json!([]));
    assert_eq!(json["query"]["model"]["timeField"], "@timestamp");
    assert_eq!(json["type"], "query");
}
