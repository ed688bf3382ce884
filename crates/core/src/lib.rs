//! Typed builders for Grafana dashboard JSON.
//!
//! Every entity validates its fields when it is built and renders itself with
//! `to_json_data()` into a `serde_json::Value` that Grafana's provisioning
//! and HTTP API accept as-is.

#[macro_use]
mod macros;

pub mod alerting;
pub mod axes;
pub mod color;
pub mod constants;
pub mod error;
pub mod layout;
pub mod links;
pub mod mappings;
pub mod merge;
pub mod output;
pub mod panels;
pub mod presets;
pub mod targets;
pub mod templating;
pub mod thresholds;
pub mod time;
pub mod units;
pub mod validators;

pub use error::{CoreError, Rule, ValidationError};
pub use layout::{Dashboard, LayoutPolicy, Row};
pub use panels::{Panel, PanelBase};
pub use targets::{QueryTarget, Target};
