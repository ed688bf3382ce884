use std::path::PathBuf;

use anyhow::Context;
use gdash_core::LayoutPolicy;

/// Generator configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct GenConfig {
    /// Directory the JSON files are written to (default: `generated`).
    pub output_dir: PathBuf,
    /// Applied to every rendered dashboard (default: `warn`).
    pub layout_policy: LayoutPolicy,
    /// Catalog entries to render. Empty renders all of them.
    pub only: Vec<String>,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("generated"),
            layout_policy: LayoutPolicy::Warn,
            only: Vec::new(),
        }
    }
}

impl GenConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default     |
    /// |-----------------------|-------------|
    /// | `GDASH_OUTPUT_DIR`    | `generated` |
    /// | `GDASH_LAYOUT_POLICY` | `warn`      |
    /// | `GDASH_ONLY`          | (all)       |
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GenConfig::from_env`] with `lookup` standing in for the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let output_dir = lookup("GDASH_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("generated"));

        let layout_policy = match lookup("GDASH_LAYOUT_POLICY") {
            Some(raw) => raw
                .trim()
                .parse::<LayoutPolicy>()
                .context("GDASH_LAYOUT_POLICY must be 'warn' or 'reject'")?,
            None => LayoutPolicy::default(),
        };

        let only: Vec<String> = lookup("GDASH_ONLY")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            output_dir,
            layout_policy,
            only,
        })
    }

    /// Whether the catalog entry `name` is selected.
    pub fn selects(&self, name: &str) -> bool {
        self.only.is_empty() || self.only.iter().any(|n| n == name)
    }
}
