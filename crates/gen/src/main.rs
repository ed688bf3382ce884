use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gdash_gen::config::GenConfig;
use gdash_gen::render::render_all;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gdash_gen=info,gdash_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = GenConfig::from_env()?;
    tracing::info!(
        output_dir = %config.output_dir.display(),
        layout_policy = %config.layout_policy,
        "Loaded generator configuration"
    );

    // --- Render ---
    let written = render_all(&config)?;
    tracing::info!(count = written.len(), "Generation complete");
    Ok(())
}
