//! Entities that read their content from disk at render time.

use std::collections::BTreeMap;
use std::fs;

use assert_matches::assert_matches;
use gdash_core::output::write_json;
use gdash_core::panels::{Panel, PanelBase, Svg};
use gdash_core::targets::{QueryTarget, SqlTarget, Target};
use gdash_core::{CoreError, Rule};
use serde_json::Value;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test: SQL templates are read and parameterised
// ---------------------------------------------------------------------------

#[test]
fn sql_target_reads_template_with_params() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("query.sql");
    fs::write(&path, "SELECT {column} FROM {table} WHERE tags = '{{}}'").unwrap();

    let target = SqlTarget {
        target: Target {
            ref_id: "A".into(),
            ..Target::default()
        },
        src_file_path: Some(path),
        sql_params: BTreeMap::from([
            ("column".to_string(), "value".to_string()),
            ("table".to_string(), "metrics".to_string()),
        ]),
        ..SqlTarget::default()
    };
    let json = target.to_json_data().unwrap();
    assert_eq!(json["rawSql"], "SELECT value FROM metrics WHERE tags = '{}'");
    assert_eq!(json["rawQuery"], true);
    assert_eq!(json["refId"], "A");
}

// ---------------------------------------------------------------------------
// Test: a template without params is used verbatim
// ---------------------------------------------------------------------------

#[test]
fn sql_target_without_params_keeps_braces() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("raw.sql");
    fs::write(&path, "SELECT '{literal}'").unwrap();

    let target = SqlTarget {
        src_file_path: Some(path),
        ..SqlTarget::default()
    };
    assert_eq!(target.resolved_sql().unwrap(), "SELECT '{literal}'");
}

// ---------------------------------------------------------------------------
// Test: an unknown placeholder is a validation error
// ---------------------------------------------------------------------------

#[test]
fn sql_target_missing_param() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("query.sql");
    fs::write(&path, "SELECT {missing}").unwrap();

    let target = SqlTarget {
        src_file_path: Some(path),
        sql_params: BTreeMap::from([("other".to_string(), "x".to_string())]),
        ..SqlTarget::default()
    };
    assert_matches!(
        target.to_json_data(),
        Err(CoreError::Validation(err)) if err.field == "sqlParams"
    );
}

// ---------------------------------------------------------------------------
// Test: a missing SQL file is reported with its path
// ---------------------------------------------------------------------------

#[test]
fn sql_target_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.sql");
    let target = SqlTarget {
        src_file_path: Some(path.clone()),
        ..SqlTarget::default()
    };
    assert_matches!(target.to_json_data(), Err(CoreError::Io { path: p, .. }) if p == path);
}

// ---------------------------------------------------------------------------
// Test: SVG panels embed file contents and write out cleanly
// ---------------------------------------------------------------------------

#[test]
fn svg_panel_embeds_files() {
    let dir = TempDir::new().unwrap();
    let svg_path = dir.path().join("map.svg");
    let js_path = dir.path().join("init.js");
    fs::write(&svg_path, "<svg></svg>").unwrap();
    fs::write(&js_path, "console.log(1)").unwrap();

    let svg = Svg {
        base: PanelBase::titled("Floor plan"),
        svg_file_path: Some(svg_path),
        js_init_code_file_path: Some(js_path),
        ..Svg::default()
    };
    let json = svg.to_json_data().unwrap();
    assert_eq!(json["svg_data"], "<svg></svg>");
    assert_eq!(json["js_init_code"], "console.log(1)");
    assert_eq!(json["js_code"], "");

    let out = dir.path().join("panel.json");
    write_json(&json, fs::File::create(&out).unwrap()).unwrap();
    let parsed: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(parsed, json);
}

// ---------------------------------------------------------------------------
// Test: a missing SVG file fails the render
// ---------------------------------------------------------------------------

#[test]
fn svg_panel_missing_file() {
    let svg = Svg {
        svg_file_path: Some("/nonexistent/gdash/map.svg".into()),
        ..Svg::default()
    };
    assert_matches!(svg.to_json_data(), Err(CoreError::Io { .. }));
}

// ---------------------------------------------------------------------------
// Test: a placeholder left open at end of file is rejected
// ---------------------------------------------------------------------------

#[test]
fn sql_target_unclosed_placeholder() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("query.sql");
    fs::write(&path, "SELECT * FROM {table").unwrap();

    let target = SqlTarget {
        src_file_path: Some(path),
        sql_params: BTreeMap::from([("table".to_string(), "events".to_string())]),
        ..SqlTarget::default()
    };
    assert_matches!(
        target.to_json_data(),
        Err(CoreError::Validation(err)) if err.field == "sqlParams" && err.rule == Rule::Format
    );
}
