//! Generator output written to a scratch directory.

use std::fs;

use gdash_core::LayoutPolicy;
use gdash_gen::config::GenConfig;
use gdash_gen::render::render_all;
use serde_json::Value;
use tempfile::TempDir;

fn config(dir: &TempDir, only: &[&str]) -> GenConfig {
    GenConfig {
        output_dir: dir.path().join("out"),
        layout_policy: LayoutPolicy::Reject,
        only: only.iter().map(|s| s.to_string()).collect(),
    }
}

// ---------------------------------------------------------------------------
// Test: every catalog entry is written as pretty JSON
// ---------------------------------------------------------------------------

#[test]
fn renders_whole_catalog() {
    let dir = TempDir::new().unwrap();
    let written = render_all(&config(&dir, &[])).unwrap();

    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["http-overview.json", "infrastructure.json", "http-alerts.json"]);

    for path in &written {
        let text = fs::read_to_string(path).unwrap();
        assert!(text.ends_with("}\n"), "{} lacks trailing newline", path.display());
        let _: Value = serde_json::from_str(&text).unwrap();
    }
}

// ---------------------------------------------------------------------------
// Test: GDASH_ONLY narrows the output
// ---------------------------------------------------------------------------

#[test]
fn renders_selected_entries_only() {
    let dir = TempDir::new().unwrap();
    let written = render_all(&config(&dir, &["http-alerts"])).unwrap();
    assert_eq!(written.len(), 1);

    let json: Value = serde_json::from_str(&fs::read_to_string(&written[0]).unwrap()).unwrap();
    assert_eq!(json["apiVersion"], 1);
    assert_eq!(json["groups"][0]["name"], "http");
    assert_eq!(json["groups"][0]["rules"][0]["grafana_alert"]["rule_group"], "http");
    assert!(!dir.path().join("out/http-overview.json").exists());
}

// ---------------------------------------------------------------------------
// Test: unknown names fail before anything is written
// ---------------------------------------------------------------------------

#[test]
fn unknown_entry_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = render_all(&config(&dir, &["http-overview", "nope"])).unwrap_err();
    assert!(err.to_string().contains("nope"));
    assert!(!dir.path().join("out").exists());
}

// ---------------------------------------------------------------------------
// Test: rendered dashboards carry numbered panels
// ---------------------------------------------------------------------------

#[test]
fn dashboards_have_panel_ids() {
    let dir = TempDir::new().unwrap();
    let written = render_all(&config(&dir, &["infrastructure"])).unwrap();
    let json: Value = serde_json::from_str(&fs::read_to_string(&written[0]).unwrap()).unwrap();
    let ids: Vec<&Value> = json["panels"].as_array().unwrap().iter().map(|p| &p["id"]).collect();
    assert_eq!(ids, [&Value::from(1), &Value::from(2), &Value::from(3)]);
    assert_eq!(json["uid"], "infrastructure");
    assert_eq!(json["panels"][1]["type"], "alexanderzobnin-zabbix-triggers-panel");
}
