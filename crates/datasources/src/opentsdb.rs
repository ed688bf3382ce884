//! OpenTSDB metric queries.

use gdash_core::{CoreError, QueryTarget};
use serde_json::{json, Value};

pub const OTSDB_AGG_AVG: &str = "avg";
pub const OTSDB_AGG_COUNT: &str = "count";
pub const OTSDB_AGG_DEV: &str = "dev";
pub const OTSDB_AGG_EP50R3: &str = "ep50r3";
pub const OTSDB_AGG_EP50R7: &str = "ep50r7";
pub const OTSDB_AGG_EP75R3: &str = "ep75r3";
pub const OTSDB_AGG_EP75R7: &str = "ep75r7";
pub const OTSDB_AGG_EP90R3: &str = "ep90r3";
pub const OTSDB_AGG_EP90R7: &str = "ep90r7";
pub const OTSDB_AGG_EP95R3: &str = "ep95r3";
pub const OTSDB_AGG_EP95R7: &str = "ep95r7";
pub const OTSDB_AGG_EP99R3: &str = "ep99r3";
pub const OTSDB_AGG_EP99R7: &str = "ep99r7";
pub const OTSDB_AGG_EP999R3: &str = "ep999r3";
pub const OTSDB_AGG_EP999R7: &str = "ep999r7";
pub const OTSDB_AGG_FIRST: &str = "first";
pub const OTSDB_AGG_LAST: &str = "last";
pub const OTSDB_AGG_MIMMIN: &str = "mimmin";
pub const OTSDB_AGG_MIMMAX: &str = "mimmax";
pub const OTSDB_AGG_MIN: &str = "min";
pub const OTSDB_AGG_MAX: &str = "max";
pub const OTSDB_AGG_NONE: &str = "none";
pub const OTSDB_AGG_P50: &str = "p50";
pub const OTSDB_AGG_P75: &str = "p75";
pub const OTSDB_AGG_P90: &str = "p90";
pub const OTSDB_AGG_P95: &str = "p95";
pub const OTSDB_AGG_P99: &str = "p99";
pub const OTSDB_AGG_P999: &str = "p999";
pub const OTSDB_AGG_SUM: &str = "sum";
pub const OTSDB_AGG_ZIMSUM: &str = "zimsum";

gdash_core::string_enum! {
    /// How empty downsampling buckets are filled.
    pub enum FillPolicy ("downsampleFillPolicy", default = NoFill) {
        NoFill => "none",
        Nan => "nan",
        Null => "null",
        Zero => "zero",
    }
}

gdash_core::string_enum! {
    /// Tag value matching mode.
    pub enum OpenTsdbFilterType ("type", default = LiteralOr) {
        LiteralOr => "literal_or",
        ILiteralOr => "iliteral_or",
        NotLiteralOr => "not_literal_or",
        NotILiteralOr => "not_iliteral_or",
        Wildcard => "wildcard",
        IWildcard => "iwildcard",
        Regexp => "regexp",
    }
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpenTsdbFilter {
    pub value: String,
    pub tag: String,
    pub filter_type: OpenTsdbFilterType,
    pub group_by: bool,
}

impl OpenTsdbFilter {
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn to_json_data(&self) -> Value {
        json!({
            "filter": self.value,
            "tagk": self.tag,
            "type": self.filter_type.as_str(),
            "groupBy": self.group_by,
        })
    }
}

// ---------------------------------------------------------------------------
// Target
// ---------------------------------------------------------------------------

/// An OpenTSDB query. `alias` may use `$tag_<name>` patterns.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenTsdbTarget {
    pub metric: String,
    pub ref_id: String,
    pub aggregator: String,
    pub alias: Option<String>,
    pub is_counter: bool,
    pub counter_max: Option<i64>,
    pub counter_reset_value: Option<i64>,
    pub disable_downsampling: bool,
    pub downsample_aggregator: String,
    pub downsample_fill_policy: FillPolicy,
    pub downsample_interval: Option<String>,
    pub filters: Vec<OpenTsdbFilter>,
    pub should_compute_rate: bool,
    pub current_filter_group_by: bool,
    pub current_filter_key: String,
    pub current_filter_type: OpenTsdbFilterType,
    pub current_filter_value: String,
}

impl Default for OpenTsdbTarget {
    fn default() -> Self {
        Self {
            metric: String::new(),
            ref_id: String::new(),
            aggregator: OTSDB_AGG_SUM.to_string(),
            alias: None,
            is_counter: false,
            counter_max: None,
            counter_reset_value: None,
            disable_downsampling: false,
            downsample_aggregator: OTSDB_AGG_SUM.to_string(),
            downsample_fill_policy: FillPolicy::NoFill,
            downsample_interval: None,
            filters: Vec::new(),
            should_compute_rate: false,
            current_filter_group_by: false,
            current_filter_key: String::new(),
            current_filter_type: OpenTsdbFilterType::LiteralOr,
            current_filter_value: String::new(),
        }
    }
}

impl OpenTsdbTarget {
    pub fn new(metric: impl Into<String>) -> Self {
        Self {
            metric: metric.into(),
            ..Self::default()
        }
    }
}

impl QueryTarget for OpenTsdbTarget {
    ref_id_accessors!();

    fn to_json_data(&self) -> Result<Value, CoreError> {
        let filters: Vec<Value> = self.filters.iter().map(OpenTsdbFilter::to_json_data).collect();
        Ok(json!({
            "aggregator": self.aggregator,
            "alias": self.alias,
            "isCounter": self.is_counter,
            "counterMax": self.counter_max,
            "counterResetValue": self.counter_reset_value,
            "disableDownsampling": self.disable_downsampling,
            "downsampleAggregator": self.downsample_aggregator,
            "downsampleFillPolicy": self.downsample_fill_policy.as_str(),
            "downsampleInterval": self.downsample_interval,
            "filters": filters,
            "metric": self.metric,
            "refId": self.ref_id,
            "shouldComputeRate": self.should_compute_rate,
            "currentFilterGroupBy": self.current_filter_group_by,
            "currentFilterKey": self.current_filter_key,
            "currentFilterType": self.current_filter_type.as_str(),
            "currentFilterValue": self.current_filter_value,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_defaults() {
        let json = OpenTsdbTarget::new("sys.cpu.user").to_json_data().unwrap();
        assert_eq!(json["aggregator"], "sum");
        assert_eq!(json["downsampleFillPolicy"], "none");
        assert_eq!(json["currentFilterType"], "literal_or");
        assert_eq!(json["alias"], Value::Null);
        assert_eq!(json["filters"], json!([]));
    }

    #[test]
    fn filters_render_in_order() {
        let target = OpenTsdbTarget {
            filters: vec![
                OpenTsdbFilter::new("host", "web-*"),
                OpenTsdbFilter {
                    filter_type: OpenTsdbFilterType::Regexp,
                    group_by: true,
                    ..OpenTsdbFilter::new("dc", "eu.*")
                },
            ],
            downsample_fill_policy: FillPolicy::Zero,
            ..OpenTsdbTarget::new("sys.cpu.user")
        };
        let json = target.to_json_data().unwrap();
        assert_eq!(
            json["filters"][1],
            json!({"filter": "eu.*", "tagk": "dc", "type": "regexp", "groupBy": true})
        );
        assert_eq!(json["downsampleFillPolicy"], "zero");
    }

    #[test]
    fn closed_sets_reject_unknown_values() {
        let err = "previous".parse::<FillPolicy>().unwrap_err();
        assert_eq!(err.field, "downsampleFillPolicy");
        let err = "glob".parse::<OpenTsdbFilterType>().unwrap_err();
        assert_eq!(err.field, "type");
        assert_eq!(
            "iwildcard".parse::<OpenTsdbFilterType>().unwrap(),
            OpenTsdbFilterType::IWildcard
        );
    }
}
