//! Dashboard time range and time picker.

use serde_json::{json, Value};

/// Dashboard time range, serialized as `{from, to}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Time {
    pub start: String,
    pub end: String,
}

impl Time {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn to_json_data(&self) -> Value {
        json!({"from": self.start, "to": self.end})
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new("now-1h", "now")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimePicker {
    /// Auto-refresh choices.
    pub refresh_intervals: Vec<String>,
    /// Time range choices.
    pub time_options: Vec<String>,
    /// Excludes recent, possibly incomplete data.
    pub now_delay: Option<String>,
    pub hidden: bool,
}

impl Default for TimePicker {
    fn default() -> Self {
        let owned =
            |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
        Self {
            refresh_intervals: owned(&[
                "5s", "10s", "30s", "1m", "5m", "15m", "30m", "1h", "2h", "1d",
            ]),
            time_options: owned(&["5m", "15m", "1h", "6h", "12h", "24h", "2d", "7d", "30d"]),
            now_delay: None,
            hidden: false,
        }
    }
}

impl TimePicker {
    pub fn to_json_data(&self) -> Value {
        json!({
            "refresh_intervals": self.refresh_intervals,
            "time_options": self.time_options,
            "nowDelay": self.now_delay,
            "hidden": self.hidden,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_time_is_last_hour() {
        assert_eq!(Time::default().to_json_data(), json!({"from": "now-1h", "to": "now"}));
    }

    #[test]
    fn time_picker_keys() {
        let json = TimePicker::default().to_json_data();
        assert_eq!(json["refresh_intervals"][0], "5s");
        assert_eq!(json["time_options"].as_array().map(Vec::len), Some(9));
        assert_eq!(json["nowDelay"], Value::Null);
        assert_eq!(json["hidden"], false);
    }
}
