//! Render a single file as a code block.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use kippo_docs_codeblock::{
    CodeBlockProps, CodeBlockView, Language, RenderPath, SyntectHighlighter, SystemClipboard,
};

use super::ensure_theme;

/// Options for the highlight command.
#[derive(Debug, Clone)]
pub struct HighlightOptions {
    /// Language tag; guessed from the extension when absent
    pub language: Option<String>,
    pub theme: String,
    pub line_numbers: bool,
    /// Show the file name instead of the language label
    pub filename: bool,
}

/// Run the highlight command.
pub async fn run(file: PathBuf, options: HighlightOptions) -> Result<()> {
    let source = tokio::fs::read_to_string(&file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let tag = options.language.unwrap_or_else(|| {
        let ext = file.extension().and_then(|e| e.to_str()).unwrap_or("");
        Language::from_extension(ext).tag().to_string()
    });

    let mut props = CodeBlockProps::new(source, tag).with_line_numbers(options.line_numbers);
    if options.filename {
        if let Some(name) = file.file_name().and_then(|n| n.to_str()) {
            props = props.with_filename(name);
        }
    }

    let highlighter = SyntectHighlighter::new();
    ensure_theme(&highlighter, &options.theme)?;

    let view = CodeBlockView::new(
        props,
        Arc::new(highlighter),
        options.theme,
        SystemClipboard,
    );

    if let Some(rendered) = view.settled().await {
        if rendered.highlighted.path == RenderPath::Fallback {
            tracing::info!("No grammar for '{}', showing plain text", view.language());
        }
    }

    println!("{}", view.render()?);

    Ok(())
}
