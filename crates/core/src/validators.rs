//! Field validators shared by every entity constructor.
//!
//! Each helper returns the accepted value on success so constructors can
//! validate inline. Failures carry the field name and the violated [`Rule`].

use std::fmt::Debug;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use validator::{Validate, ValidationErrors};

use crate::error::{Rule, ValidationError};

/// Relative duration grammar: optional sign, optional digits, unit letter.
pub const INTERVAL_PATTERN: &str = r"^[+-]?\d*[smhdMY]$";

static INTERVAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(INTERVAL_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Closed sets
// ---------------------------------------------------------------------------

/// Accept `value` only if it equals one of `choices`.
pub fn is_in<T: PartialEq + Debug>(
    field: &str,
    value: T,
    choices: &[T],
) -> Result<T, ValidationError> {
    if choices.contains(&value) {
        return Ok(value);
    }
    Err(ValidationError::new(
        field,
        Rule::OneOf,
        format!("{value:?} should be one of {choices:?}"),
    ))
}

// ---------------------------------------------------------------------------
// String formats
// ---------------------------------------------------------------------------

/// Accept relative durations such as `24h`, `7d`, `1M`, `+24h`, `-24h`.
pub fn is_interval<'a>(field: &str, value: &'a str) -> Result<&'a str, ValidationError> {
    if INTERVAL_RE.is_match(value) {
        return Ok(value);
    }
    Err(ValidationError::new(
        field,
        Rule::Interval,
        format!(
            "Valid interval should be a string matching the expression: {INTERVAL_PATTERN}. \
             Examples: 24h, 7d, 1M, +24h, -24h"
        ),
    ))
}

/// Accept `#` followed by exactly six hexadecimal digits.
pub fn is_color_code<'a>(field: &str, value: &'a str) -> Result<&'a str, ValidationError> {
    let valid = value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()));
    if valid {
        return Ok(value);
    }
    Err(ValidationError::new(
        field,
        Rule::ColorCode,
        "Value should be a valid color code (e.g. #37872D)",
    ))
}

// ---------------------------------------------------------------------------
// Homogeneous lists
// ---------------------------------------------------------------------------

/// The JSON shape of a list element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

/// Accept a list whose elements all have the given JSON kind.
pub fn is_list_of<'a>(
    field: &str,
    values: &'a [Value],
    kind: JsonKind,
) -> Result<&'a [Value], ValidationError> {
    if let Some((index, bad)) = values
        .iter()
        .enumerate()
        .find(|(_, v)| JsonKind::of(v) != kind)
    {
        return Err(ValidationError::new(
            field,
            Rule::ListOf,
            format!(
                "Element {index} should be of kind {}, found {}",
                kind.as_str(),
                JsonKind::of(bad).as_str()
            ),
        ));
    }
    Ok(values)
}

// ---------------------------------------------------------------------------
// Derived models
// ---------------------------------------------------------------------------

/// Run the `validator` derive checks of a model and map the first failing
/// field onto a [`ValidationError`].
pub fn checked<T: Validate>(model: T) -> Result<T, ValidationError> {
    model.validate().map_err(range_error)?;
    Ok(model)
}

/// Collapse derive-validation failures into one error naming the first field.
pub fn range_error(errors: ValidationErrors) -> ValidationError {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|k| k.to_string())
        .collect();
    fields.sort();
    let field = fields.into_iter().next().unwrap_or_default();
    ValidationError::new(field, Rule::Range, errors.to_string())
}
