//! House style for HTTP service dashboards: response-code palette, lettered
//! Prometheus graphs and stacked QPS graphs.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{json, Value};
use validator::Validate;

use crate::axes::{Tooltip, YAxes, YAxis};
use crate::color::{Color, ColorCode};
use crate::constants::{
    INDIVIDUAL, NULL_AS_ZERO, OPS_FORMAT, PERCENT_UNIT_FORMAT, SHORT_FORMAT, SORT_DESC,
};
use crate::error::{Rule, ValidationError};
use crate::panels::Graph;
use crate::targets::{QueryTarget, Target};
use crate::validators::checked;

pub const YELLOW: ColorCode = ColorCode::from_static("#EAB839");
pub const GREEN: ColorCode = ColorCode::from_static("#7EB26D");
pub const BLUE: ColorCode = ColorCode::from_static("#6ED0E0");
pub const ORANGE: ColorCode = ColorCode::from_static("#EF843C");
pub const RED: ColorCode = ColorCode::from_static("#E24D42");

const REF_LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Series colors keyed by response class.
pub fn alias_colors() -> BTreeMap<String, Color> {
    [
        ("1xx", YELLOW),
        ("2xx", GREEN),
        ("3xx", BLUE),
        ("4xx", ORANGE),
        ("5xx", RED),
        ("success", GREEN),
        ("error", RED),
    ]
    .into_iter()
    .map(|(alias, code)| (alias.to_string(), Color::Code(code)))
    .collect()
}

/// A graph with one Prometheus target per `(legend, expr)` pair, lettered
/// `A` to `Z` in order.
pub fn prom_graph<L, E>(
    data_source: &str,
    title: &str,
    expressions: impl IntoIterator<Item = (L, E)>,
) -> Result<Graph, ValidationError>
where
    L: Into<String>,
    E: Into<String>,
{
    let expressions: Vec<(L, E)> = expressions.into_iter().collect();
    if expressions.len() > REF_LETTERS.len() {
        return Err(ValidationError::new(
            "expressions",
            Rule::Range,
            format!(
                "Too many expressions: {}, maximum is {}",
                expressions.len(),
                REF_LETTERS.len()
            ),
        ));
    }
    let targets: Vec<Arc<dyn QueryTarget>> = expressions
        .into_iter()
        .zip(REF_LETTERS.chars())
        .map(|((legend, expr), letter)| -> Arc<dyn QueryTarget> {
            Arc::new(Target {
                legend_format: legend.into(),
                ref_id: letter.to_string(),
                ..Target::new(expr)
            })
        })
        .collect();
    let mut graph = Graph::new(title, targets);
    graph.base.data_source = Value::String(data_source.to_string());
    Ok(graph)
}

/// A stacked copy of `graph`: filled areas, no lines, nulls as zero and an
/// individual tooltip sorted descending.
pub fn stacked(graph: &Graph) -> Graph {
    Graph {
        line_width: 0,
        null_point_mode: NULL_AS_ZERO.to_string(),
        stack: true,
        fill: 10,
        tooltip: Tooltip {
            sort: SORT_DESC,
            value_type: INDIVIDUAL.to_string(),
            ..Default::default()
        },
        ..graph.clone()
    }
}

/// A Y axis showing a 0-1 value as a percentage.
pub fn percent_unit_axis(label: Option<&str>) -> YAxis {
    YAxis {
        format: Some(PERCENT_UNIT_FORMAT.to_string()),
        label: label.map(str::to_string),
        log_base: 1,
        max: Some(json!(1)),
        min: Some(json!(0)),
        ..Default::default()
    }
}

/// Queries-per-second graph broken down by response code.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct QpsGraphConfig {
    pub data_source: String,
    pub title: String,
    /// One expression per response class, in `alias_colors` key order.
    #[validate(length(min = 5, max = 7))]
    pub expressions: Vec<String>,
}

impl QpsGraphConfig {
    pub fn new(
        data_source: impl Into<String>,
        title: impl Into<String>,
        expressions: Vec<String>,
    ) -> Self {
        Self {
            data_source: data_source.into(),
            title: title.into(),
            expressions,
        }
    }

    pub fn create_graph(&self) -> Result<Graph, ValidationError> {
        let config = checked(self.clone())?;
        let palette = alias_colors();
        let pairs = palette.keys().cloned().zip(config.expressions);
        let graph = Graph {
            alias_colors: palette.clone(),
            y_axes: YAxes {
                left: YAxis::with_format(OPS_FORMAT),
                right: YAxis::with_format(SHORT_FORMAT),
            },
            ..prom_graph(&config.data_source, &config.title, pairs)?
        };
        Ok(stacked(&graph))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::Panel;

    fn exprs(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("sum(rate(requests_total{{code=\"{i}\"}}[1m]))")).collect()
    }

    #[test]
    fn prom_graph_letters_targets() {
        let graph = prom_graph("prometheus", "Latency", [("p50", "q50"), ("p99", "q99")]).unwrap();
        let json = graph.to_json_data().unwrap();
        assert_eq!(json["targets"][0]["refId"], "A");
        assert_eq!(json["targets"][1]["refId"], "B");
        assert_eq!(json["targets"][1]["legendFormat"], "p99");
        assert_eq!(json["datasource"], "prometheus");
    }

    #[test]
    fn prom_graph_rejects_27_expressions() {
        let many: Vec<(String, String)> = exprs(27).into_iter().map(|e| (e.clone(), e)).collect();
        let err = prom_graph("prometheus", "Too many", many).unwrap_err();
        assert_eq!(err.field, "expressions");
    }

    #[test]
    fn stacked_restyles_copy() {
        let graph = Graph::default();
        let stack = stacked(&graph);
        assert!(stack.stack);
        assert_eq!(stack.fill, 10);
        assert_eq!(stack.line_width, 0);
        assert_eq!(stack.tooltip.value_type, "individual");
        assert!(!graph.stack);
    }

    #[test]
    fn percent_axis_bounds() {
        let json = percent_unit_axis(Some("CPU")).to_json_data();
        assert_eq!(json["format"], "percentunit");
        assert_eq!(json["max"], 1);
        assert_eq!(json["min"], 0);
        assert_eq!(json["label"], "CPU");
    }

    #[test]
    fn qps_graph_pairs_sorted_legends() {
        let graph = QpsGraphConfig::new("prometheus", "QPS", exprs(5)).create_graph().unwrap();
        let json = graph.to_json_data().unwrap();
        assert_eq!(json["targets"][0]["legendFormat"], "1xx");
        assert_eq!(json["targets"][4]["legendFormat"], "5xx");
        assert_eq!(json["aliasColors"]["5xx"], "#E24D42");
        assert_eq!(json["stack"], true);
        assert_eq!(json["yaxes"][0]["format"], "ops");
    }

    #[test]
    fn qps_graph_expression_count_bounds() {
        assert!(QpsGraphConfig::new("p", "QPS", exprs(4)).create_graph().is_err());
        assert!(QpsGraphConfig::new("p", "QPS", exprs(7)).create_graph().is_ok());
        let err = QpsGraphConfig::new("p", "QPS", exprs(8)).create_graph().unwrap_err();
        assert_eq!(err.rule, Rule::Range);
    }
}
