//! CLI subcommands.

pub mod build;
pub mod copy;
pub mod highlight;
pub mod languages;
pub mod serve;

use anyhow::Result;
use kippo_docs_codeblock::SyntectHighlighter;

/// Fail early on a theme the highlighter does not ship, listing the ones it
/// does.
pub fn ensure_theme(highlighter: &SyntectHighlighter, theme: &str) -> Result<()> {
    if !highlighter.has_theme(theme) {
        let available: Vec<&str> = highlighter.theme_names().collect();
        anyhow::bail!(
            "Unknown theme '{}'. Available themes: {}",
            theme,
            available.join(", ")
        );
    }
    Ok(())
}
