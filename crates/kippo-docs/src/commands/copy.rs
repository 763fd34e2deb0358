//! Copy a file to the system clipboard.

use std::path::PathBuf;

use anyhow::{Context, Result};
use kippo_docs_codeblock::{CopyController, CopyState, SystemClipboard};

/// Run the copy command.
///
/// Copies the file contents verbatim, then waits for the acknowledgment
/// window to close.
pub async fn run(file: PathBuf) -> Result<()> {
    let text = tokio::fs::read_to_string(&file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let controller = CopyController::new(SystemClipboard);
    let mut state = controller.subscribe();

    let result = controller.copy(&text).await;
    tracing::info!("{}", controller.state().label());

    state
        .wait_for(|s| *s == CopyState::Idle)
        .await
        .context("Copy state closed")?;
    tracing::info!("{}", controller.state().label());

    result.with_context(|| format!("Failed to copy {}", file.display()))
}
