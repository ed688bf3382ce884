//! Azure Monitor (metrics, Log Analytics, Resource Graph) and Azure Data
//! Explorer queries.

use gdash_core::{CoreError, QueryTarget};
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Azure Monitor metrics
// ---------------------------------------------------------------------------

/// `aggregation` is one of Total, None, Minimum, Maximum, Average or Count.
#[derive(Debug, Clone, PartialEq)]
pub struct AzureMonitorMetricsTarget {
    pub aggregation: String,
    pub dimension_filters: Vec<String>,
    pub metric_definition: String,
    pub metric_name: String,
    pub metric_namespace: String,
    pub resource_group: String,
    pub resource_name: String,
    pub time_grain: String,
    pub query_type: String,
    pub subscription: String,
    pub ref_id: String,
    pub alias: String,
}

impl Default for AzureMonitorMetricsTarget {
    fn default() -> Self {
        Self {
            aggregation: "Total".to_string(),
            dimension_filters: Vec::new(),
            metric_definition: String::new(),
            metric_name: String::new(),
            metric_namespace: String::new(),
            resource_group: String::new(),
            resource_name: String::new(),
            time_grain: "auto".to_string(),
            query_type: "Azure Monitor".to_string(),
            subscription: String::new(),
            ref_id: String::new(),
            alias: String::new(),
        }
    }
}

impl QueryTarget for AzureMonitorMetricsTarget {
    ref_id_accessors!();

    fn to_json_data(&self) -> Result<Value, CoreError> {
        Ok(json!({
            "azureMonitor": {
                "aggregation": self.aggregation,
                "alias": self.alias,
                "dimensionFilters": self.dimension_filters,
                "metricDefinition": self.metric_definition,
                "metricName": self.metric_name,
                "metricNamespace": self.metric_namespace,
                "resourceGroup": self.resource_group,
                "resourceName": self.resource_name,
                "timeGrain": self.time_grain,
            },
            "queryType": self.query_type,
            "refId": self.ref_id,
            "subscription": self.subscription,
        }))
    }
}

// ---------------------------------------------------------------------------
// Log Analytics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct AzureLogsTarget {
    pub query: String,
    /// Full resource id, e.g. `/subscriptions/<id>/resourceGroups/<rg>/providers/...`.
    pub resource: String,
    pub result_format: String,
    pub query_type: String,
    pub subscription: String,
    pub ref_id: String,
}

impl Default for AzureLogsTarget {
    fn default() -> Self {
        Self {
            query: String::new(),
            resource: String::new(),
            result_format: "table".to_string(),
            query_type: "Azure Log Analytics".to_string(),
            subscription: String::new(),
            ref_id: String::new(),
        }
    }
}

impl QueryTarget for AzureLogsTarget {
    ref_id_accessors!();

    fn to_json_data(&self) -> Result<Value, CoreError> {
        Ok(json!({
            "azureLogAnalytics": {
                "query": self.query,
                "resource": self.resource,
                "resultFormat": self.result_format,
            },
            "queryType": self.query_type,
            "refId": self.ref_id,
            "subscription": self.subscription,
        }))
    }
}

// ---------------------------------------------------------------------------
// Resource Graph
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct AzureResourceGraphTarget {
    pub query: String,
    pub query_type: String,
    pub subscription: String,
    pub ref_id: String,
}

impl Default for AzureResourceGraphTarget {
    fn default() -> Self {
        Self {
            query: String::new(),
            query_type: "Azure Resource Graph".to_string(),
            subscription: String::new(),
            ref_id: String::new(),
        }
    }
}

impl QueryTarget for AzureResourceGraphTarget {
    ref_id_accessors!();

    fn to_json_data(&self) -> Result<Value, CoreError> {
        Ok(json!({
            "azureResourceGraph": {"query": self.query},
            "queryType": self.query_type,
            "refId": self.ref_id,
            "subscription": self.subscription,
        }))
    }
}

// ---------------------------------------------------------------------------
// Azure Data Explorer
// ---------------------------------------------------------------------------

gdash_core::string_enum! {
    pub enum AdxResultFormat ("resultFormat", default = TimeSeries) {
        TimeSeries => "time_series",
        Table => "table",
        AdxTimeSeries => "time_series_adx_series",
    }
}

/// A KQL query against one database.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AzureDataExplorerTarget {
    pub database: String,
    pub query: String,
    pub result_format: AdxResultFormat,
    pub alias: String,
    pub ref_id: String,
}

impl AzureDataExplorerTarget {
    pub fn new(database: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            query: query.into(),
            ..Self::default()
        }
    }
}

impl QueryTarget for AzureDataExplorerTarget {
    ref_id_accessors!();

    fn to_json_data(&self) -> Result<Value, CoreError> {
        Ok(json!({
            "database": self.database,
            "query": self.query,
            "resultFormat": self.result_format.as_str(),
            "alias": self.alias,
            "refId": self.ref_id,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monitor_metrics_nest_under_azure_monitor() {
        let target = AzureMonitorMetricsTarget {
            metric_name: "Percentage CPU".into(),
            resource_group: "web".into(),
            ref_id: "A".into(),
            ..Default::default()
        };
        let json = target.to_json_data().unwrap();
        assert_eq!(json["azureMonitor"]["aggregation"], "Total");
        assert_eq!(json["azureMonitor"]["timeGrain"], "auto");
        assert_eq!(json["azureMonitor"]["metricName"], "Percentage CPU");
        assert_eq!(json["queryType"], "Azure Monitor");
        assert_eq!(json["refId"], "A");
    }

    #[test]
    fn logs_and_resource_graph_query_types() {
        let logs = AzureLogsTarget::default().to_json_data().unwrap();
        assert_eq!(logs["queryType"], "Azure Log Analytics");
        assert_eq!(logs["azureLogAnalytics"]["resultFormat"], "table");

        let graph = AzureResourceGraphTarget {
            query: "Resources | count".into(),
            ..Default::default()
        };
        let json = graph.to_json_data().unwrap();
        assert_eq!(json["azureResourceGraph"], json!({"query": "Resources | count"}));
        assert_eq!(json["queryType"], "Azure Resource Graph");
    }

    #[test]
    fn data_explorer_target() {
        assert_eq!(
            AzureDataExplorerTarget::default().to_json_data().unwrap(),
            json!({"database": "", "query": "", "resultFormat": "time_series", "alias": "", "refId": ""})
        );
        let target = AzureDataExplorerTarget {
            result_format: "table".parse().unwrap(),
            alias: "my_alias".into(),
            ref_id: "target_1".into(),
            ..AzureDataExplorerTarget::new("my_database", "StormEvents | take 10")
        };
        let json = target.to_json_data().unwrap();
        assert_eq!(json["resultFormat"], "table");
        assert_eq!(json["database"], "my_database");
        assert!("csv".parse::<AdxResultFormat>().is_err());
    }
}
