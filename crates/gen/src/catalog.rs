//! The dashboards and alert files shipped with the generator.

use std::sync::Arc;

use gdash_core::alerting::{
    AlertCondition, AlertExpression, AlertFileBasedProvisioning, AlertGroup, AlertQuery,
    AlertRuleV8, AlertRuleV9, AlertTrigger, Evaluator, ExpressionType,
};
use gdash_core::color::{GREEN, ORANGE, RED};
use gdash_core::constants::{PERCENT_UNIT_FORMAT, SECONDS_FORMAT};
use gdash_core::panels::{GaugePanel, GridPos, Logs, Panel, RowPanel, Stat, Table, TimeSeries};
use gdash_core::presets::{prom_graph, QpsGraphConfig};
use gdash_core::targets::{LokiTarget, QueryTarget, Target};
use gdash_core::templating::{Template, TemplateSpec, Templating};
use gdash_core::thresholds::Threshold;
use gdash_core::{CoreError, Dashboard, LayoutPolicy};
use gdash_datasources::elasticsearch::{BucketAgg, FieldAgg, TermsGroupBy};
use gdash_datasources::zabbix::ZabbixFunction;
use gdash_datasources::{ElasticsearchTarget, MetricAgg, ZabbixTarget, ZabbixTriggersPanel};
use serde_json::{json, Value};

const PROMETHEUS: &str = "prometheus";

/// A renderable document.
#[derive(Debug, Clone)]
pub enum Artifact {
    Dashboard(Dashboard),
    Alerts(AlertFileBasedProvisioning),
}

impl Artifact {
    /// Render to JSON. `policy` replaces the dashboard's own layout policy.
    pub fn render(self, policy: LayoutPolicy) -> Result<Value, CoreError> {
        match self {
            Self::Dashboard(dashboard) => Dashboard {
                layout_policy: policy,
                ..dashboard
            }
            .to_json_data(),
            Self::Alerts(provisioning) => provisioning.to_json_data(),
        }
    }
}

/// A catalog entry, written to `<name>.json`.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub artifact: Artifact,
}

/// Every bundled artifact, in output order.
pub fn catalog() -> Result<Vec<CatalogEntry>, CoreError> {
    Ok(vec![
        CatalogEntry {
            name: "http-overview",
            artifact: Artifact::Dashboard(http_overview()?),
        },
        CatalogEntry {
            name: "infrastructure",
            artifact: Artifact::Dashboard(infrastructure()?),
        },
        CatalogEntry {
            name: "http-alerts",
            artifact: Artifact::Alerts(http_alerts()?),
        },
    ])
}

fn prom(expr: &str) -> Arc<dyn QueryTarget> {
    Target {
        datasource: json!(PROMETHEUS),
        ..Target::new(expr)
    }
    .into_target()
}

fn at(h: u32, w: u32, x: u32, y: u32) -> Option<GridPos> {
    Some(GridPos::new(h, w, x, y))
}

// ---------------------------------------------------------------------------
// HTTP overview
// ---------------------------------------------------------------------------

fn http_overview() -> Result<Dashboard, CoreError> {
    let job = Template::new(TemplateSpec {
        data_source: Some(json!(PROMETHEUS)),
        label: Some("Job".into()),
        include_all: true,
        ..TemplateSpec::new("job", "label_values(http_requests_total, job)")
    })?;

    let mut availability = Stat::new(
        "Availability",
        vec![prom("sum(rate(http_requests_total{job=~\"$job\",code!~\"5..\"}[5m])) / sum(rate(http_requests_total{job=~\"$job\"}[5m]))")],
    );
    availability.format = PERCENT_UNIT_FORMAT.to_string();
    availability.base.grid_pos = at(4, 6, 0, 0);
    availability.base.thresholds = vec![
        Threshold::new(RED, 0, 0.0),
        Threshold::new(ORANGE, 1, 0.99),
        Threshold::new(GREEN, 2, 0.999),
    ]
    .into();

    let mut saturation = GaugePanel::new(
        "Worker saturation",
        vec![prom("avg(http_workers_busy{job=~\"$job\"} / http_workers_total{job=~\"$job\"}) * 100")],
    );
    saturation.format = "percent".to_string();
    saturation.base.grid_pos = at(4, 6, 6, 0);

    let codes = ["1..", "2..", "3..", "4..", "5.."];
    let mut qps = QpsGraphConfig::new(
        PROMETHEUS,
        "Requests per second",
        codes
            .iter()
            .map(|code| format!("sum(rate(http_requests_total{{job=~\"$job\",code=~\"{code}\"}}[1m]))"))
            .collect(),
    )
    .create_graph()?;
    qps.base.grid_pos = at(8, 12, 0, 4);

    let mut latency = prom_graph(
        PROMETHEUS,
        "Latency",
        [("p50", "0.5"), ("p90", "0.9"), ("p99", "0.99")].map(|(legend, q)| {
            (
                legend,
                format!("histogram_quantile({q}, sum by (le) (rate(http_request_duration_seconds_bucket{{job=~\"$job\"}}[5m])))"),
            )
        }),
    )?;
    latency.y_axes.left.format = Some(SECONDS_FORMAT.to_string());
    latency.base.grid_pos = at(8, 12, 12, 4);

    let mut memory = TimeSeries::new(
        "Resident memory",
        vec![prom("sum by (instance) (process_resident_memory_bytes{job=~\"$job\"})")],
    );
    memory.unit = "bytes".to_string();
    memory.base.grid_pos = at(8, 24, 0, 13);

    let mut logs = Logs::new(
        "Errors",
        vec![LokiTarget {
            datasource: "loki".into(),
            expr: "{job=~\"$job\"} |= \"error\"".into(),
            hide: false,
        }
        .into_target()],
    );
    logs.base.grid_pos = at(8, 24, 0, 21);

    let mut details = RowPanel::new("Details", vec![memory.into_panel(), logs.into_panel()]);
    details.base.grid_pos = at(1, 24, 0, 12);

    Ok(Dashboard {
        panels: vec![
            availability.into_panel(),
            saturation.into_panel(),
            qps.into_panel(),
            latency.into_panel(),
            details.into_panel(),
        ],
        templating: Templating::new(vec![job]),
        tags: vec!["http".into(), "generated".into()],
        uid: Some("http-overview".into()),
        ..Dashboard::new("HTTP overview")
    }
    .auto_panel_ids())
}

// ---------------------------------------------------------------------------
// Infrastructure
// ---------------------------------------------------------------------------

fn infrastructure() -> Result<Dashboard, CoreError> {
    let load = ZabbixTarget::metric(
        "CPU",
        "Linux servers",
        "/.*/",
        "Processor load (1 min average per core)",
        vec![ZabbixFunction::group_by("5m", "avg")?, ZabbixFunction::top(5, "max")?],
    );
    let mut load_graph = TimeSeries::new("Processor load", vec![load.into_target()]);
    load_graph.base.data_source = json!("zabbix");
    load_graph.base.grid_pos = at(8, 16, 0, 0);

    let mut problems = ZabbixTriggersPanel::new("zabbix", "Open problems");
    problems.severity_field = true;
    problems.limit = 20;

    let errors = ElasticsearchTarget {
        metric_aggs: vec![
            MetricAgg::Count(FieldAgg::default()),
            MetricAgg::Max(FieldAgg {
                id: 1,
                ..FieldAgg::new("response_time")
            }),
        ],
        bucket_aggs: vec![BucketAgg::Terms(TermsGroupBy {
            size: 10,
            ..TermsGroupBy::new("host.keyword")
        })],
        ..ElasticsearchTarget::new("level:error")
    }
    .auto_bucket_agg_ids();
    let mut hosts = Table::new("Hosts logging errors", vec![errors.into_target()]);
    hosts.base.data_source = json!("elasticsearch");
    hosts.base.grid_pos = at(8, 24, 0, 8);

    Ok(Dashboard {
        panels: vec![load_graph.into_panel(), problems.into_panel(), hosts.into_panel()],
        tags: vec!["infrastructure".into(), "generated".into()],
        uid: Some("infrastructure".into()),
        ..Dashboard::new("Infrastructure")
    }
    .auto_panel_ids())
}

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

fn http_alerts() -> Result<AlertFileBasedProvisioning, CoreError> {
    let errors = Target {
        ref_id: "A".into(),
        ..Target::new("sum(rate(http_requests_total{code=~\"5..\"}[5m]))")
    };
    let latency = Target {
        ref_id: "B".into(),
        ..Target::new("histogram_quantile(0.99, sum by (le) (rate(http_request_duration_seconds_bucket[5m])))")
    };
    let mut error_rule = AlertRuleV8::new(
        "HTTP errors and latency",
        vec![
            AlertTrigger::new(
                errors.into_target(),
                AlertCondition::new(Evaluator::greater_than(1)),
            )?,
            AlertTrigger::new(
                latency.into_target(),
                AlertCondition::new(Evaluator::greater_than(0.5)),
            )?,
        ],
    );
    error_rule.annotations.insert("summary".into(), "Elevated 5xx rate or p99 latency".into());
    error_rule.labels.insert("severity".into(), "page".into());

    let availability = Target {
        ref_id: "A".into(),
        ..Target::new("sum(rate(http_requests_total{code!~\"5..\"}[5m])) / sum(rate(http_requests_total[5m]))")
    };
    let below_slo = AlertExpression {
        expression_type: ExpressionType::Math,
        ..AlertExpression::new("B", "$A < 0.999")
    };
    let mut slo_rule = AlertRuleV9::new(
        "Availability below SLO",
        vec![AlertQuery::new(availability.into_target())?.into(), below_slo.into()],
    );
    slo_rule.uid = Some("http-availability-slo".into());
    slo_rule.labels.insert("severity".into(), "ticket".into());

    Ok(AlertFileBasedProvisioning::new(vec![AlertGroup::new(
        "http",
        vec![error_rule.into(), slo_rule.into()],
    )]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_names_are_unique() {
        let entries = catalog().unwrap();
        let mut names: Vec<_> = entries.iter().map(|e| e.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), entries.len());
    }

    #[test]
    fn every_entry_renders_under_reject() {
        for entry in catalog().unwrap() {
            let name = entry.name;
            let json = entry.artifact.render(LayoutPolicy::Reject);
            assert!(json.is_ok(), "{name} failed: {json:?}");
        }
    }

    #[test]
    fn http_overview_numbers_row_children() {
        let json = Artifact::Dashboard(http_overview().unwrap())
            .render(LayoutPolicy::Warn)
            .unwrap();
        let panels = json["panels"].as_array().unwrap();
        assert_eq!(panels.len(), 5);
        assert_eq!(panels[4]["type"], "row");
        assert_eq!(panels[4]["id"], 5);
        assert_eq!(panels[4]["panels"][1]["id"], 7);
        assert_eq!(json["templating"]["list"][0]["includeAll"], true);
    }
}
