//! Humio repository queries.

use gdash_core::{CoreError, QueryTarget};
use serde_json::{json, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HumioTarget {
    pub humio_query: String,
    pub humio_repository: String,
    pub ref_id: String,
}

impl HumioTarget {
    pub fn new(repository: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            humio_query: query.into(),
            humio_repository: repository.into(),
            ref_id: String::new(),
        }
    }
}

impl QueryTarget for HumioTarget {
    ref_id_accessors!();

    fn to_json_data(&self) -> Result<Value, CoreError> {
        Ok(json!({
            "humioQuery": self.humio_query,
            "humioRepository": self.humio_repository,
            "refId": self.ref_id,
        }))
    }
}
