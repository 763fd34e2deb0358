//! Syntax highlighting backends.

use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, ThemeSet};
use syntect::html::{styled_line_to_highlighted_html, IncludeBackground};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::language::PLAIN_TEXT_GRAMMAR;

/// Theme used when none is configured.
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Language tags whose syntect token differs from the tag.
///
/// The bundled syntaxes have no TypeScript grammar, so it borrows the
/// JavaScript one. PowerShell has no close relative and stays plain text.
const GRAMMAR_ALIASES: &[(&str, &str)] = &[
    ("csharp", "cs"),
    ("shell", "sh"),
    ("typescript", "js"),
];

/// Errors a highlighter can report. All of them are recovered by the
/// plain-text fallback.
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    #[error("Unsupported grammar: {0}")]
    UnsupportedGrammar(String),

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    #[error("Highlight failed: {0}")]
    Render(String),
}

/// Turns code into colorized HTML.
///
/// Implementations wrap each source line in a `<span class="line">` element
/// and separate the line elements with `\n`.
pub trait Highlighter: Send + Sync {
    /// Backend identifier (e.g., "syntect")
    fn name(&self) -> &'static str;

    /// Highlight already normalized code.
    ///
    /// # Arguments
    /// * `code` - Normalized source text
    /// * `grammar` - Grammar identifier resolved from the language tag
    /// * `theme` - Visual theme identifier
    fn highlight(&self, code: &str, grammar: &str, theme: &str) -> Result<String, HighlightError>;
}

/// Highlighter backed by syntect's bundled syntaxes and themes.
pub struct SyntectHighlighter {
    syntaxes: SyntaxSet,
    themes: ThemeSet,
}

impl SyntectHighlighter {
    /// Create a highlighter with the default syntax and theme sets.
    pub fn new() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            themes: ThemeSet::load_defaults(),
        }
    }

    /// Names of the available themes.
    pub fn theme_names(&self) -> impl Iterator<Item = &str> {
        self.themes.themes.keys().map(String::as_str)
    }

    /// Check whether a theme is available.
    pub fn has_theme(&self, theme: &str) -> bool {
        self.themes.themes.contains_key(theme)
    }

    /// Whether a grammar would be colorized rather than falling back.
    pub fn supports(&self, grammar: &str) -> bool {
        self.find_syntax(grammar).is_some()
    }

    fn find_syntax(&self, grammar: &str) -> Option<&SyntaxReference> {
        // Plain text always takes the unhighlighted path.
        if grammar == PLAIN_TEXT_GRAMMAR || grammar.is_empty() {
            return None;
        }

        let token = GRAMMAR_ALIASES
            .iter()
            .find(|(tag, _)| *tag == grammar)
            .map(|(_, token)| *token)
            .unwrap_or(grammar);

        self.syntaxes.find_syntax_by_token(token)
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for SyntectHighlighter {
    fn name(&self) -> &'static str {
        "syntect"
    }

    fn highlight(&self, code: &str, grammar: &str, theme: &str) -> Result<String, HighlightError> {
        let syntax = self
            .find_syntax(grammar)
            .ok_or_else(|| HighlightError::UnsupportedGrammar(grammar.to_string()))?;

        let theme = self
            .themes
            .themes
            .get(theme)
            .ok_or_else(|| HighlightError::UnknownTheme(theme.to_string()))?;

        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut lines = Vec::new();

        for line in LinesWithEndings::from(code) {
            let regions = highlighter
                .highlight_line(line, &self.syntaxes)
                .map_err(|e| HighlightError::Render(e.to_string()))?;

            // The line break belongs between line elements, not inside them
            let regions: Vec<(Style, &str)> = regions
                .into_iter()
                .map(|(style, text)| (style, text.trim_end_matches('\n')))
                .filter(|(_, text)| !text.is_empty())
                .collect();

            let html = styled_line_to_highlighted_html(&regions, IncludeBackground::No)
                .map_err(|e| HighlightError::Render(e.to_string()))?;

            lines.push(format!(r#"<span class="line">{}</span>"#, html));
        }

        if lines.is_empty() {
            lines.push(r#"<span class="line"></span>"#.to_string());
        }

        let background = theme
            .settings
            .background
            .map(|c| format!("background-color:#{:02x}{:02x}{:02x};", c.r, c.g, c.b))
            .unwrap_or_default();

        Ok(format!(
            r#"<pre class="syntect" style="{}"><code>{}</code></pre>"#,
            background,
            lines.join("\n")
        ))
    }
}
