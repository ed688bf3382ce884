//! InfluxDB raw queries.

use gdash_core::constants::TIME_SERIES_TARGET_FORMAT;
use gdash_core::{CoreError, QueryTarget};
use serde_json::{json, Value};

/// An InfluxQL query. `datasource` selects the InfluxDB instance when a
/// panel mixes several.
#[derive(Debug, Clone, PartialEq)]
pub struct InfluxDbTarget {
    pub alias: String,
    pub format: String,
    pub datasource: String,
    pub measurement: String,
    pub query: String,
    pub raw_query: bool,
    pub ref_id: String,
}

impl Default for InfluxDbTarget {
    fn default() -> Self {
        Self {
            alias: String::new(),
            format: TIME_SERIES_TARGET_FORMAT.to_string(),
            datasource: String::new(),
            measurement: String::new(),
            query: String::new(),
            raw_query: true,
            ref_id: String::new(),
        }
    }
}

impl InfluxDbTarget {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }
}

impl QueryTarget for InfluxDbTarget {
    ref_id_accessors!();

    fn datasource(&self) -> Value {
        Value::String(self.datasource.clone())
    }

    fn to_json_data(&self) -> Result<Value, CoreError> {
        Ok(json!({
            "query": self.query,
            "resultFormat": self.format,
            "alias": self.alias,
            "datasource": self.datasource,
            "measurement": self.measurement,
            "rawQuery": self.raw_query,
            "refId": self.ref_id,
        }))
    }
}
