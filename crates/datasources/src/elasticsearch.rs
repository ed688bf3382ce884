//! Elasticsearch metric aggregations, bucket aggregations and targets.
//!
//! Aggregation ids are numeric here and rendered as strings, which is what
//! the Grafana query editor stores. An id of 0 means "not assigned yet";
//! [`ElasticsearchTarget::auto_bucket_agg_ids`] fills those in.

use std::collections::BTreeSet;
use std::sync::Arc;

use gdash_core::alerting::{AlertCondition, Evaluator};
use gdash_core::{CoreError, QueryTarget};
use serde_json::{json, Map, Value};

pub const DATE_HISTOGRAM_DEFAULT_FIELD: &str = "time_iso8601";

/// Field placeholder for aggregations that do not read a field.
const NO_FIELD: &str = "select field";

gdash_core::string_enum! {
    pub enum TermsOrder ("order", default = Desc) {
        Asc => "asc",
        Desc => "desc",
    }
}

// ---------------------------------------------------------------------------
// Metric aggregations
// ---------------------------------------------------------------------------

/// A single-field metric with an optional inline script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldAgg {
    pub field: String,
    pub id: u32,
    pub hide: bool,
    pub inline: String,
}

impl FieldAgg {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..Self::default()
        }
    }

    fn settings(&self) -> Map<String, Value> {
        let mut settings = Map::new();
        if !self.inline.is_empty() {
            settings.insert("script".into(), json!({"inline": self.inline}));
        }
        settings
    }

    fn render(&self, agg_type: &str, field: &str, settings: Map<String, Value>) -> Value {
        json!({
            "id": self.id.to_string(),
            "hide": self.hide,
            "type": agg_type,
            "field": field,
            "inlineScript": self.inline,
            "settings": settings,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DerivativeAgg {
    pub field: String,
    pub hide: bool,
    pub id: u32,
    /// Id of the metric the derivative is taken of.
    pub pipeline_agg: u32,
    pub unit: String,
}

impl Default for DerivativeAgg {
    fn default() -> Self {
        Self {
            field: String::new(),
            hide: false,
            id: 0,
            pipeline_agg: 1,
            unit: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PercentilesAgg {
    pub agg: FieldAgg,
    pub percents: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateAgg {
    pub field: String,
    pub id: u32,
    pub hide: bool,
    pub unit: String,
    pub mode: String,
    pub script: String,
}

/// Combines other metrics, referenced by id, with a painless script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BucketScriptAgg {
    /// Script variable name and the id of the metric it is bound to.
    pub fields: Vec<(String, u32)>,
    pub id: u32,
    pub hide: bool,
    pub script: String,
}

/// One entry of a target's `metrics` list.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricAgg {
    /// Document count. Only `id`, `hide` and `inline` of the inner value apply.
    Count(FieldAgg),
    Max(FieldAgg),
    Min(FieldAgg),
    Sum(FieldAgg),
    Average(FieldAgg),
    Cardinality(FieldAgg),
    Derivative(DerivativeAgg),
    Percentiles(PercentilesAgg),
    Rate(RateAgg),
    BucketScript(BucketScriptAgg),
}

impl Default for MetricAgg {
    fn default() -> Self {
        Self::Count(FieldAgg::default())
    }
}

impl MetricAgg {
    pub fn to_json_data(&self) -> Value {
        match self {
            Self::Count(agg) => agg.render("count", NO_FIELD, agg.settings()),
            Self::Max(agg) => agg.render("max", &agg.field, agg.settings()),
            Self::Min(agg) => agg.render("min", &agg.field, agg.settings()),
            Self::Sum(agg) => agg.render("sum", &agg.field, agg.settings()),
            Self::Cardinality(agg) => agg.render("cardinality", &agg.field, agg.settings()),
            Self::Average(agg) => {
                let mut json = agg.render("avg", &agg.field, agg.settings());
                json["meta"] = json!({});
                json
            }
            Self::Percentiles(PercentilesAgg { agg, percents }) => {
                let mut settings = agg.settings();
                settings.insert("percents".into(), json!(percents));
                agg.render("percentiles", &agg.field, settings)
            }
            Self::Derivative(agg) => {
                let mut settings = Map::new();
                if !agg.unit.is_empty() {
                    settings.insert("unit".into(), json!(agg.unit));
                }
                json!({
                    "id": agg.id.to_string(),
                    "pipelineAgg": agg.pipeline_agg.to_string(),
                    "hide": agg.hide,
                    "type": "derivative",
                    "field": agg.field,
                    "settings": settings,
                })
            }
            Self::Rate(agg) => {
                let mut settings = Map::new();
                let optional = [("unit", &agg.unit), ("mode", &agg.mode), ("script", &agg.script)];
                for (key, value) in optional {
                    if !value.is_empty() {
                        settings.insert(key.into(), json!(value));
                    }
                }
                json!({
                    "id": agg.id.to_string(),
                    "hide": agg.hide,
                    "field": agg.field,
                    "settings": settings,
                    "type": "rate",
                })
            }
            Self::BucketScript(agg) => {
                let variables: Vec<Value> = agg
                    .fields
                    .iter()
                    .map(|(name, id)| json!({"name": name, "pipelineAgg": id.to_string()}))
                    .collect();
                json!({
                    "field": NO_FIELD,
                    "type": "bucket_script",
                    "id": agg.id.to_string(),
                    "hide": agg.hide,
                    "pipelineVariables": variables,
                    "settings": {"script": agg.script},
                })
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Bucket aggregations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DateHistogramGroupBy {
    pub id: u32,
    pub field: String,
    pub interval: String,
    pub min_doc_count: u32,
}

impl Default for DateHistogramGroupBy {
    fn default() -> Self {
        Self {
            id: 0,
            field: DATE_HISTOGRAM_DEFAULT_FIELD.to_string(),
            interval: "auto".to_string(),
            min_doc_count: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub label: String,
    pub query: String,
}

impl Filter {
    pub fn new(label: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            query: query.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FiltersGroupBy {
    pub id: u32,
    pub filters: Vec<Filter>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TermsGroupBy {
    pub field: String,
    pub id: u32,
    pub min_doc_count: u32,
    pub order: TermsOrder,
    pub order_by: String,
    pub size: u32,
}

impl TermsGroupBy {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            id: 0,
            min_doc_count: 1,
            order: TermsOrder::Desc,
            order_by: "_term".to_string(),
            size: 0,
        }
    }
}

/// One entry of a target's `bucketAggs` list.
#[derive(Debug, Clone, PartialEq)]
pub enum BucketAgg {
    DateHistogram(DateHistogramGroupBy),
    Filters(FiltersGroupBy),
    Terms(TermsGroupBy),
}

impl Default for BucketAgg {
    fn default() -> Self {
        Self::DateHistogram(DateHistogramGroupBy::default())
    }
}

impl BucketAgg {
    pub fn id(&self) -> u32 {
        match self {
            Self::DateHistogram(agg) => agg.id,
            Self::Filters(agg) => agg.id,
            Self::Terms(agg) => agg.id,
        }
    }

    pub fn with_id(&self, id: u32) -> Self {
        let mut next = self.clone();
        match &mut next {
            Self::DateHistogram(agg) => agg.id = id,
            Self::Filters(agg) => agg.id = id,
            Self::Terms(agg) => agg.id = id,
        }
        next
    }

    pub fn to_json_data(&self) -> Value {
        match self {
            Self::DateHistogram(agg) => json!({
                "field": agg.field,
                "id": agg.id.to_string(),
                "settings": {
                    "interval": agg.interval,
                    "min_doc_count": agg.min_doc_count,
                    "trimEdges": 0,
                },
                "type": "date_histogram",
            }),
            Self::Filters(agg) => {
                let filters: Vec<Value> = agg
                    .filters
                    .iter()
                    .map(|f| json!({"label": f.label, "query": f.query}))
                    .collect();
                json!({
                    "id": agg.id.to_string(),
                    "settings": {"filters": filters},
                    "type": "filters",
                })
            }
            Self::Terms(agg) => json!({
                "id": agg.id.to_string(),
                "type": "terms",
                "field": agg.field,
                "settings": {
                    "min_doc_count": agg.min_doc_count,
                    "order": agg.order.as_str(),
                    "orderBy": agg.order_by,
                    "size": agg.size,
                },
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Target
// ---------------------------------------------------------------------------

/// A Lucene query with its metric and bucket aggregations. Defaults to a
/// document count over an automatic date histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct ElasticsearchTarget {
    pub alias: Option<String>,
    pub bucket_aggs: Vec<BucketAgg>,
    pub metric_aggs: Vec<MetricAgg>,
    pub query: String,
    pub ref_id: String,
    pub time_field: String,
    pub hide: bool,
}

impl Default for ElasticsearchTarget {
    fn default() -> Self {
        Self {
            alias: None,
            bucket_aggs: vec![BucketAgg::default()],
            metric_aggs: vec![MetricAgg::default()],
            query: String::new(),
            ref_id: String::new(),
            time_field: "@timestamp".to_string(),
            hide: false,
        }
    }
}

impl ElasticsearchTarget {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// A copy where every bucket aggregation without an id gets the
    /// smallest positive id not already in use, in list order.
    pub fn auto_bucket_agg_ids(&self) -> Self {
        let taken: BTreeSet<u32> = self
            .bucket_aggs
            .iter()
            .map(BucketAgg::id)
            .filter(|&id| id != 0)
            .collect();
        let mut free = (1..).filter(|id| !taken.contains(id));
        let bucket_aggs = self
            .bucket_aggs
            .iter()
            .map(|agg| match agg.id() {
                0 => agg.with_id(free.next().unwrap_or_default()),
                _ => agg.clone(),
            })
            .collect();
        Self {
            bucket_aggs,
            ..self.clone()
        }
    }

    /// A classic alert condition evaluated over this query.
    pub fn alert_condition(self, evaluator: Evaluator) -> AlertCondition {
        AlertCondition {
            target: Some(Arc::new(self)),
            ..AlertCondition::new(evaluator)
        }
    }
}

impl QueryTarget for ElasticsearchTarget {
    ref_id_accessors!();

    fn to_json_data(&self) -> Result<Value, CoreError> {
        let bucket_aggs: Vec<Value> =
            self.bucket_aggs.iter().map(BucketAgg::to_json_data).collect();
        let metrics: Vec<Value> = self.metric_aggs.iter().map(MetricAgg::to_json_data).collect();
        Ok(json!({
            "alias": self.alias,
            "bucketAggs": bucket_aggs,
            "metrics": metrics,
            "query": self.query,
            "refId": self.ref_id,
            "timeField": self.time_field,
            "hide": self.hide,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdash_core::alerting::TimeRange;

    #[test]
    fn default_target_counts_over_date_histogram() {
        let json = ElasticsearchTarget::default().to_json_data().unwrap();
        assert_eq!(
            json["metrics"][0],
            json!({
                "id": "0",
                "hide": false,
                "type": "count",
                "field": "select field",
                "inlineScript": "",
                "settings": {},
            })
        );
        assert_eq!(json["bucketAggs"][0]["type"], "date_histogram");
        assert_eq!(json["bucketAggs"][0]["field"], "time_iso8601");
        assert_eq!(json["bucketAggs"][0]["settings"]["trimEdges"], 0);
        assert_eq!(json["timeField"], "@timestamp");
        assert_eq!(json["alias"], Value::Null);
    }

    #[test]
    fn inline_script_lands_in_settings() {
        let agg = MetricAgg::Max(FieldAgg {
            inline: "_value * 2".into(),
            id: 3,
            ..FieldAgg::new("bytes")
        });
        let json = agg.to_json_data();
        assert_eq!(json["settings"], json!({"script": {"inline": "_value * 2"}}));
        assert_eq!(json["id"], "3");
        assert_eq!(json["field"], "bytes");
    }

    #[test]
    fn average_carries_meta_and_percentiles_percents() {
        assert_eq!(MetricAgg::Average(FieldAgg::new("latency")).to_json_data()["meta"], json!({}));
        let json = MetricAgg::Percentiles(PercentilesAgg {
            agg: FieldAgg::new("latency"),
            percents: vec![50.0, 99.0],
        })
        .to_json_data();
        assert_eq!(json["settings"]["percents"], json!([50.0, 99.0]));
        assert_eq!(json["type"], "percentiles");
    }

    #[test]
    fn derivative_and_rate_settings_only_when_set() {
        let derivative = MetricAgg::Derivative(DerivativeAgg {
            unit: "1s".into(),
            ..Default::default()
        })
        .to_json_data();
        assert_eq!(derivative["pipelineAgg"], "1");
        assert_eq!(derivative["settings"], json!({"unit": "1s"}));

        let rate = MetricAgg::Rate(RateAgg {
            mode: "value_count".into(),
            ..Default::default()
        })
        .to_json_data();
        assert_eq!(rate["settings"], json!({"mode": "value_count"}));
    }

    #[test]
    fn bucket_script_variables_keep_order() {
        let json = MetricAgg::BucketScript(BucketScriptAgg {
            fields: vec![("errors".into(), 2), ("total".into(), 1)],
            id: 3,
            script: "params.errors / params.total".into(),
            ..Default::default()
        })
        .to_json_data();
        assert_eq!(
            json["pipelineVariables"],
            json!([{"name": "errors", "pipelineAgg": "2"}, {"name": "total", "pipelineAgg": "1"}])
        );
        assert_eq!(json["settings"]["script"], "params.errors / params.total");
    }

    #[test]
    fn terms_and_filters_group_bys() {
        let terms = BucketAgg::Terms(TermsGroupBy {
            size: 10,
            ..TermsGroupBy::new("host")
        })
        .to_json_data();
        assert_eq!(
            terms["settings"],
            json!({"min_doc_count": 1, "order": "desc", "orderBy": "_term", "size": 10})
        );
        let filters = BucketAgg::Filters(FiltersGroupBy {
            id: 1,
            filters: vec![Filter::new("errors", "status:>=500")],
        })
        .to_json_data();
        assert_eq!(
            filters["settings"]["filters"][0],
            json!({"label": "errors", "query": "status:>=500"})
        );
    }

    #[test]
    fn auto_bucket_agg_ids_fill_gaps() {
        let target = ElasticsearchTarget {
            bucket_aggs: vec![
                BucketAgg::Terms(TermsGroupBy::new("host")),
                BucketAgg::Terms(TermsGroupBy {
                    id: 1,
                    ..TermsGroupBy::new("dc")
                }),
                BucketAgg::default(),
            ],
            ..Default::default()
        };
        let ids: Vec<u32> = target
            .auto_bucket_agg_ids()
            .bucket_aggs
            .iter()
            .map(BucketAgg::id)
            .collect();
        assert_eq!(ids, [2, 1, 3]);
        assert_eq!(target.bucket_aggs[0].id(), 0);
    }

    #[test]
    fn alert_condition_embeds_target() {
        let condition = AlertCondition {
            time_range: Some(TimeRange::new("5m", "now")),
            ..ElasticsearchTarget {
                ref_id: "A".into(),
                ..ElasticsearchTarget::new("status:500")
            }
            .alert_condition(Evaluator::greater_than(10))
        };
        let json = condition.to_json_data().unwrap();
        assert_eq!(json["query"]["params"], json!(["A", "5m", "now"]));
        assert_eq!(json["query"]["model"]["query"], "status:500");
        assert_eq!(json["reducer"], json!({"params": [], "type": "last"}));

        let unified = AlertCondition {
            use_new_alerts: true,
            ..condition
        };
        let json = unified.to_json_data().unwrap();
        assert_eq!(json["query"], json!({"params": ["A"]}));
    }
}
