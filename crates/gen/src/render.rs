use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use gdash_core::output::write_json;

use crate::catalog::catalog;
use crate::config::GenConfig;

/// Render every selected catalog entry to `<output_dir>/<name>.json`.
///
/// Returns the written paths in catalog order. The first entity error aborts
/// the run.
pub fn render_all(config: &GenConfig) -> anyhow::Result<Vec<PathBuf>> {
    let entries = catalog().context("Failed to build the catalog")?;

    let unknown: Vec<&str> = config
        .only
        .iter()
        .map(String::as_str)
        .filter(|name| !entries.iter().any(|e| e.name == *name))
        .collect();
    if !unknown.is_empty() {
        bail!("Unknown catalog entries in GDASH_ONLY: {}", unknown.join(", "));
    }

    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("Failed to create {}", config.output_dir.display()))?;

    let mut written = Vec::new();
    for entry in entries.into_iter().filter(|e| config.selects(e.name)) {
        let name = entry.name;
        let json = entry
            .artifact
            .render(config.layout_policy)
            .with_context(|| format!("Failed to render {name}"))?;

        let path = config.output_dir.join(format!("{name}.json"));
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        write_json(&json, &mut writer)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        writer.flush().with_context(|| format!("Failed to flush {}", path.display()))?;

        tracing::info!(artifact = name, path = %path.display(), "Rendered artifact");
        written.push(path);
    }
    Ok(written)
}
