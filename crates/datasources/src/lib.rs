//! Datasource-specific query targets and panels.
//!
//! Every target implements [`gdash_core::QueryTarget`], so it can be placed
//! on any core panel or alert next to the generic Prometheus-style target.

/// `ref_id` / `with_ref_id` for a target struct with a `ref_id` field.
macro_rules! ref_id_accessors {
    () => {
        fn ref_id(&self) -> &str {
            &self.ref_id
        }

        fn with_ref_id(&self, ref_id: &str) -> std::sync::Arc<dyn gdash_core::QueryTarget> {
            std::sync::Arc::new(Self {
                ref_id: ref_id.to_string(),
                ..self.clone()
            })
        }
    };
}

pub mod azure;
pub mod elasticsearch;
pub mod humio;
pub mod influxdb;
pub mod opentsdb;
pub mod zabbix;

pub use azure::{
    AdxResultFormat, AzureDataExplorerTarget, AzureLogsTarget, AzureMonitorMetricsTarget,
    AzureResourceGraphTarget,
};
pub use elasticsearch::{BucketAgg, ElasticsearchTarget, MetricAgg};
pub use humio::HumioTarget;
pub use influxdb::InfluxDbTarget;
pub use opentsdb::{OpenTsdbFilter, OpenTsdbFilterType, OpenTsdbTarget};
pub use zabbix::{ZabbixColor, ZabbixFunction, ZabbixTarget, ZabbixTrigger, ZabbixTriggersPanel};
