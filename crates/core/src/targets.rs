//! Query targets and refId assignment.
//!
//! Every datasource query implements [`QueryTarget`]. Panels and alert
//! conditions hold targets as `Arc<dyn QueryTarget>` so datasource crates
//! can add their own shapes without registering anywhere.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::constants::{DEFAULT_STEP, TIME_SERIES_TARGET_FORMAT};
use crate::error::{CoreError, Rule, ValidationError};

/// A query bound to a panel or alert condition.
pub trait QueryTarget: fmt::Debug + Send + Sync {
    /// The reference id, empty when unassigned.
    fn ref_id(&self) -> &str;

    /// A copy of this target carrying `ref_id`.
    fn with_ref_id(&self, ref_id: &str) -> Arc<dyn QueryTarget>;

    /// Datasource reference used by unified alerting data entries.
    fn datasource(&self) -> Value {
        Value::Null
    }

    fn to_json_data(&self) -> Result<Value, CoreError>;

    fn into_target(self) -> Arc<dyn QueryTarget>
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }
}

// ---------------------------------------------------------------------------
// refId assignment
// ---------------------------------------------------------------------------

/// `A`..`Z`, then `AA`, `AB`, .. `ZZ`.
pub fn ref_id_candidates() -> impl Iterator<Item = String> {
    let letters = || (b'A'..=b'Z').map(char::from);
    let singles = letters().map(String::from);
    let doubles =
        letters().flat_map(move |first| letters().map(move |second| format!("{first}{second}")));
    singles.chain(doubles)
}

/// Give every target without a refId the first unused candidate, in order.
pub fn auto_ref_ids(
    targets: &[Arc<dyn QueryTarget>],
) -> Result<Vec<Arc<dyn QueryTarget>>, CoreError> {
    let taken: HashSet<String> = targets
        .iter()
        .map(|t| t.ref_id().to_string())
        .filter(|id| !id.is_empty())
        .collect();
    let mut candidates = ref_id_candidates().filter(|id| !taken.contains(id));
    targets
        .iter()
        .map(|target| -> Result<Arc<dyn QueryTarget>, CoreError> {
            if !target.ref_id().is_empty() {
                return Ok(Arc::clone(target));
            }
            let next = candidates.next().ok_or_else(|| {
                ValidationError::new("refId", Rule::Range, "No unused refId left in A..ZZ")
            })?;
            Ok(target.with_ref_id(&next))
        })
        .collect()
}

/// Serialize every target of a list in order.
pub fn targets_json(targets: &[Arc<dyn QueryTarget>]) -> Result<Vec<Value>, CoreError> {
    targets.iter().map(|t| t.to_json_data()).collect()
}

// ---------------------------------------------------------------------------
// Target
// ---------------------------------------------------------------------------

/// A generic metric query.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub expr: String,
    pub format: String,
    pub hide: bool,
    pub legend_format: String,
    pub interval: String,
    pub interval_factor: u32,
    pub metric: String,
    pub ref_id: String,
    pub step: u32,
    pub target: String,
    pub instant: bool,
    pub datasource: Value,
}

impl Default for Target {
    fn default() -> Self {
        Self {
            expr: String::new(),
            format: TIME_SERIES_TARGET_FORMAT.to_string(),
            hide: false,
            legend_format: String::new(),
            interval: String::new(),
            interval_factor: 2,
            metric: String::new(),
            ref_id: String::new(),
            step: DEFAULT_STEP,
            target: String::new(),
            instant: false,
            datasource: Value::Null,
        }
    }
}

impl Target {
    pub fn new(expr: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            ..Default::default()
        }
    }

    fn json(&self) -> Value {
        json!({
            "expr": self.expr,
            "query": self.expr,
            "target": self.target,
            "format": self.format,
            "hide": self.hide,
            "interval": self.interval,
            "intervalFactor": self.interval_factor,
            "legendFormat": self.legend_format,
            "alias": self.legend_format,
            "metric": self.metric,
            "refId": self.ref_id,
            "step": self.step,
            "instant": self.instant,
            "datasource": self.datasource,
        })
    }
}

impl QueryTarget for Target {
    fn ref_id(&self) -> &str {
        &self.ref_id
    }

    fn with_ref_id(&self, ref_id: &str) -> Arc<dyn QueryTarget> {
        Arc::new(Self {
            ref_id: ref_id.to_string(),
            ..self.clone()
        })
    }

    fn datasource(&self) -> Value {
        self.datasource.clone()
    }

    fn to_json_data(&self) -> Result<Value, CoreError> {
        Ok(self.json())
    }
}

// ---------------------------------------------------------------------------
// SqlTarget
// ---------------------------------------------------------------------------

/// A SQL query, inline or loaded from a file with `{name}` placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlTarget {
    pub target: Target,
    pub raw_sql: String,
    pub raw_query: bool,
    /// When set, the query text is read from this file at serialization.
    pub src_file_path: Option<PathBuf>,
    pub sql_params: BTreeMap<String, String>,
}

impl Default for SqlTarget {
    fn default() -> Self {
        Self {
            target: Target::default(),
            raw_sql: String::new(),
            raw_query: true,
            src_file_path: None,
            sql_params: BTreeMap::new(),
        }
    }
}

impl SqlTarget {
    /// The query text that will be emitted as `rawSql`.
    pub fn resolved_sql(&self) -> Result<String, CoreError> {
        let Some(path) = &self.src_file_path else {
            return Ok(self.raw_sql.clone());
        };
        let template = std::fs::read_to_string(path).map_err(|e| CoreError::io(path, e))?;
        if self.sql_params.is_empty() {
            return Ok(template);
        }
        Ok(substitute_params(&template, &self.sql_params)?)
    }
}

/// Replace `{name}` placeholders; `{{` and `}}` are literal braces.
fn substitute_params(
    template: &str,
    params: &BTreeMap<String, String>,
) -> Result<String, ValidationError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut name = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }
                if !closed {
                    return Err(ValidationError::new(
                        "sqlParams",
                        Rule::Format,
                        "Expected '}' before end of query template",
                    ));
                }
                let value = params.get(&name).ok_or_else(|| {
                    ValidationError::new(
                        "sqlParams",
                        Rule::Format,
                        format!("No value supplied for placeholder '{{{name}}}'"),
                    )
                })?;
                out.push_str(value);
            }
            '}' => {
                return Err(ValidationError::new(
                    "sqlParams",
                    Rule::Format,
                    "Single '}' encountered in query template",
                ));
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

impl QueryTarget for SqlTarget {
    fn ref_id(&self) -> &str {
        &self.target.ref_id
    }

    fn with_ref_id(&self, ref_id: &str) -> Arc<dyn QueryTarget> {
        let mut next = self.clone();
        next.target.ref_id = ref_id.to_string();
        Arc::new(next)
    }

    fn datasource(&self) -> Value {
        self.target.datasource.clone()
    }

    fn to_json_data(&self) -> Result<Value, CoreError> {
        let mut json = self.target.json();
        json["rawSql"] = Value::String(self.resolved_sql()?);
        json["rawQuery"] = Value::Bool(self.raw_query);
        Ok(json)
    }
}

// ---------------------------------------------------------------------------
// LokiTarget
// ---------------------------------------------------------------------------

/// A LogQL range query. Loki targets carry no refId.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LokiTarget {
    pub datasource: String,
    pub expr: String,
    pub hide: bool,
}

impl QueryTarget for LokiTarget {
    fn ref_id(&self) -> &str {
        ""
    }

    fn with_ref_id(&self, _ref_id: &str) -> Arc<dyn QueryTarget> {
        Arc::new(self.clone())
    }

    fn datasource(&self) -> Value {
        json!({"type": "loki", "uid": self.datasource})
    }

    fn to_json_data(&self) -> Result<Value, CoreError> {
        Ok(json!({
            "datasource": {"type": "loki", "uid": self.datasource},
            "expr": self.expr,
            "hide": self.hide,
            "queryType": "range",
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn refs(targets: &[Arc<dyn QueryTarget>]) -> Vec<String> {
        targets.iter().map(|t| t.ref_id().to_string()).collect()
    }

    #[test]
    fn candidates_exhaust_singles_first() {
        let all: Vec<String> = ref_id_candidates().collect();
        assert_eq!(all.len(), 26 + 26 * 26);
        assert_eq!(all[0], "A");
        assert_eq!(all[25], "Z");
        assert_eq!(all[26], "AA");
        assert_eq!(all[27], "AB");
        assert_eq!(all.last().map(String::as_str), Some("ZZ"));
    }

    #[test]
    fn twenty_seventh_target_gets_aa() {
        let targets: Vec<Arc<dyn QueryTarget>> =
            (0..27).map(|i| Target::new(format!("up{i}")).into_target()).collect();
        let assigned = auto_ref_ids(&targets).unwrap();
        assert_eq!(assigned[26].ref_id(), "AA");
        assert_eq!(assigned[0].ref_id(), "A");
    }

    #[test]
    fn existing_ref_ids_are_skipped_and_kept() {
        let targets = vec![
            Target::new("a").into_target(),
            Target { ref_id: "A".into(), ..Target::new("b") }.into_target(),
            Target::new("c").into_target(),
        ];
        let assigned = auto_ref_ids(&targets).unwrap();
        assert_eq!(refs(&assigned), vec!["B", "A", "C"]);
        // the input list is untouched
        assert_eq!(refs(&targets), vec!["", "A", ""]);
    }

    #[test]
    fn auto_ref_ids_is_idempotent() {
        let targets = vec![Target::new("a").into_target(), Target::new("b").into_target()];
        let once = auto_ref_ids(&targets).unwrap();
        let twice = auto_ref_ids(&once).unwrap();
        assert_eq!(refs(&once), refs(&twice));
    }

    #[test]
    fn target_duplicates_expr_and_legend() {
        let target = Target {
            legend_format: "{{pod}}".into(),
            ref_id: "A".into(),
            ..Target::new("rate(x[1m])")
        };
        let json = target.to_json_data().unwrap();
        assert_eq!(json["query"], "rate(x[1m])");
        assert_eq!(json["alias"], "{{pod}}");
        assert_eq!(json["intervalFactor"], 2);
        assert_eq!(json["step"], 10);
        assert_eq!(json["format"], "time_series");
        assert_eq!(json["datasource"], Value::Null);
    }

    #[test]
    fn inline_sql_passes_through() {
        let target = SqlTarget {
            raw_sql: "SELECT 1".into(),
            ..Default::default()
        };
        let json = target.to_json_data().unwrap();
        assert_eq!(json["rawSql"], "SELECT 1");
        assert_eq!(json["rawQuery"], true);
    }

    #[test]
    fn placeholders_are_substituted() {
        let params = BTreeMap::from([("table".to_string(), "events".to_string())]);
        assert_eq!(
            substitute_params("SELECT {{x}} FROM {table}", &params).unwrap(),
            "SELECT {x} FROM events"
        );
        assert_matches!(
            substitute_params("SELECT {missing}", &params),
            Err(ValidationError { rule: Rule::Format, .. })
        );
    }

    #[test]
    fn missing_sql_file_is_io_error() {
        let target = SqlTarget {
            src_file_path: Some(PathBuf::from("/definitely/not/here.sql")),
            ..Default::default()
        };
        assert_matches!(target.to_json_data(), Err(CoreError::Io { .. }));
    }

    #[test]
    fn loki_target_shape() {
        let target = LokiTarget {
            datasource: "loki-uid".into(),
            expr: "{job=\"x\"}".into(),
            hide: false,
        };
        assert_eq!(
            target.to_json_data().unwrap(),
            json!({
                "datasource": {"type": "loki", "uid": "loki-uid"},
                "expr": "{job=\"x\"}",
                "hide": false,
                "queryType": "range",
            })
        );
    }
}
