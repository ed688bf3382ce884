//! Suffixed scalar values and relative durations.
//!
//! These render as strings in dashboard JSON (`"250px"`, `"100%"`, `"5m"`)
//! and parse back from the same form.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::{Rule, ValidationError};
use crate::validators::is_interval;

fn parse_suffixed(field: &str, input: &str, suffix: &str) -> Result<u32, ValidationError> {
    input
        .strip_suffix(suffix)
        .filter(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| {
            ValidationError::new(
                field,
                Rule::Format,
                format!("Invalid value '{input}'. Expected digits followed by '{suffix}'"),
            )
        })
}

// ---------------------------------------------------------------------------
// Pixels
// ---------------------------------------------------------------------------

/// A pixel measure, rendered as `"{n}px"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pixels(u32);

impl Pixels {
    pub const fn new(num: u32) -> Self {
        Self(num)
    }

    pub fn num(&self) -> u32 {
        self.0
    }

    pub fn to_json_data(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl fmt::Display for Pixels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}

impl FromStr for Pixels {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_suffixed("pixels", s, "px").map(Self)
    }
}

impl From<u32> for Pixels {
    fn from(num: u32) -> Self {
        Self(num)
    }
}

impl From<Pixels> for Value {
    fn from(pixels: Pixels) -> Self {
        pixels.to_json_data()
    }
}

// ---------------------------------------------------------------------------
// Percent
// ---------------------------------------------------------------------------

/// A percentage, rendered as `"{n}%"`. Defaults to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Percent(u32);

impl Percent {
    pub const fn new(num: u32) -> Self {
        Self(num)
    }

    pub fn num(&self) -> u32 {
        self.0
    }

    pub fn to_json_data(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl Default for Percent {
    fn default() -> Self {
        Self(100)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl FromStr for Percent {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_suffixed("percent", s, "%").map(Self)
    }
}

impl From<u32> for Percent {
    fn from(num: u32) -> Self {
        Self(num)
    }
}

impl From<Percent> for Value {
    fn from(percent: Percent) -> Self {
        percent.to_json_data()
    }
}

// ---------------------------------------------------------------------------
// Interval
// ---------------------------------------------------------------------------

/// A relative duration such as `5m`, `24h` or `-7d`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Interval(Cow<'static, str>);

impl Interval {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        is_interval("interval", &value)?;
        Ok(Self(Cow::Owned(value)))
    }

    /// Build an interval from a literal, checked at compile time when used
    /// in a `const` context.
    pub const fn from_static(value: &'static str) -> Self {
        let bytes = value.as_bytes();
        assert!(!bytes.is_empty(), "interval must not be empty");
        let mut i = 0;
        if bytes[0] == b'+' || bytes[0] == b'-' {
            i = 1;
        }
        while i + 1 < bytes.len() {
            assert!(bytes[i].is_ascii_digit(), "interval digits expected");
            i += 1;
        }
        assert!(i + 1 == bytes.len(), "interval unit expected");
        assert!(
            matches!(bytes[i], b's' | b'm' | b'h' | b'd' | b'M' | b'Y'),
            "interval unit must be one of smhdMY"
        );
        Self(Cow::Borrowed(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_json_data(&self) -> Value {
        Value::String(self.0.to_string())
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Interval {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<Interval> for Value {
    fn from(interval: Interval) -> Self {
        interval.to_json_data()
    }
}

string_serde!(Pixels);
string_serde!(Percent);
string_serde!(Interval);
