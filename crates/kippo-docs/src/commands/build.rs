//! Static site build command.

use anyhow::{Context, Result};
use kippo_docs_codeblock::SyntectHighlighter;
use kippo_docs_static::{BuildConfig, StaticBuilder};

use super::ensure_theme;

/// Run the build command.
pub async fn run(config: BuildConfig) -> Result<()> {
    tracing::info!("Building static site...");

    ensure_theme(&SyntectHighlighter::new(), &config.theme)?;

    // Page rendering is CPU-bound and parallel, keep it off the runtime threads
    let result = tokio::task::spawn_blocking(move || StaticBuilder::new(config).build())
        .await
        .context("Build task panicked")??;

    tracing::info!(
        "Built {} pages with {} code blocks in {}ms",
        result.pages,
        result.code_blocks,
        result.duration_ms
    );

    if result.fallbacks > 0 {
        tracing::info!("{} code blocks shown as plain text", result.fallbacks);
    }

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
