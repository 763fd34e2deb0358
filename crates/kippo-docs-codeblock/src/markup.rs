//! Markup produced for a code block: highlighting pipeline, plain-text
//! fallback and line numbering.

use serde::Serialize;

use crate::highlighter::Highlighter;
use crate::language::Language;

const LINE_BREAK: &str = "</span>\n<span class=\"line\">";
const LINE_JOIN: &str = "</span><span class=\"line\">";

/// Which path produced a piece of markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderPath {
    /// Colorized by the highlighter
    Highlighted,
    /// Escaped plain text after the highlighter failed
    Fallback,
}

/// Displayable markup for one code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighted {
    /// HTML to place inside the code block body
    pub html: String,

    /// How the HTML was produced
    pub path: RenderPath,
}

/// Run the highlight step for normalized code.
///
/// Never fails: any highlighter error degrades to [`fallback_markup`].
pub fn render_markup(
    highlighter: &dyn Highlighter,
    normalized: &str,
    language: &Language,
    theme: &str,
) -> Highlighted {
    match highlighter.highlight(normalized, language.grammar(), theme) {
        Ok(html) => Highlighted {
            html: coalesce_lines(&html),
            path: RenderPath::Highlighted,
        },
        Err(e) => {
            tracing::debug!(
                "{} could not highlight {}, using plain text: {}",
                highlighter.name(),
                language.tag(),
                e
            );
            Highlighted {
                html: fallback_markup(normalized),
                path: RenderPath::Fallback,
            }
        }
    }
}

/// Drop the newlines between adjacent line elements so wrapped lines do not
/// get extra vertical spacing.
pub fn coalesce_lines(html: &str) -> String {
    html.replace(LINE_BREAK, LINE_JOIN)
}

/// Minimal escape for the fallback path. Only `<` and `>` are touched.
pub fn escape_plain(code: &str) -> String {
    code.replace('<', "&lt;").replace('>', "&gt;")
}

/// Plain preformatted markup used when highlighting fails.
pub fn fallback_markup(code: &str) -> String {
    format!("<pre><code>{}</code></pre>", escape_plain(code))
}

/// Line numbers for the gutter.
///
/// Empty unless numbering was requested and the normalized code spans more
/// than one line.
pub fn line_numbers(normalized: &str, requested: bool) -> Vec<usize> {
    let count = normalized.split('\n').count();
    if requested && count > 1 {
        (1..=count).collect()
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use crate::testing::StubHighlighter;
    use pretty_assertions::assert_eq;

    #[test]
    fn escapes_only_angle_brackets() {
        assert_eq!(
            escape_plain(r#"a < b && c > "d" 'e' &amp;"#),
            r#"a &lt; b && c &gt; "d" 'e' &amp;"#
        );
        assert_eq!(escape_plain("List<Update>"), "List&lt;Update&gt;");
        assert_eq!(escape_plain("no markup"), "no markup");
    }

    #[test]
    fn wraps_fallback_in_pre() {
        assert_eq!(
            fallback_markup("<b>\n</b>"),
            "<pre><code>&lt;b&gt;\n&lt;/b&gt;</code></pre>"
        );
    }

    #[test]
    fn coalesces_adjacent_lines() {
        let html = "<code><span class=\"line\">a</span>\n<span class=\"line\"></span>\n<span class=\"line\">b</span></code>";

        assert_eq!(
            coalesce_lines(html),
            "<code><span class=\"line\">a</span><span class=\"line\"></span><span class=\"line\">b</span></code>"
        );
    }

    #[test]
    fn keeps_newlines_outside_line_elements() {
        let html = "<span class=\"line\">a\nb</span>\n<span class=\"other\">";

        assert_eq!(coalesce_lines(html), html);
    }

    #[test]
    fn suppresses_numbers_for_single_line() {
        assert!(line_numbers("one line", true).is_empty());
        assert!(line_numbers("", true).is_empty());
    }

    #[test]
    fn numbers_multi_line_sequentially() {
        assert_eq!(line_numbers("a\n\nb", true), vec![1, 2, 3]);
        assert_eq!(line_numbers("a\nb\nc\nd", true), vec![1, 2, 3, 4]);
    }

    #[test]
    fn respects_numbering_request() {
        assert!(line_numbers("a\nb", false).is_empty());
    }

    #[test]
    fn highlights_supported_language() {
        let result = render_markup(&StubHighlighter, "a\nb", &Language::Json, "theme");

        assert_eq!(result.path, RenderPath::Highlighted);
        assert_eq!(
            result.html,
            "<pre class=\"stub\"><code><span class=\"line\">a</span><span class=\"line\">b</span></code></pre>"
        );
    }

    #[test]
    fn falls_back_for_unsupported_language() {
        let language = Language::from_tag("foo");
        let result = render_markup(&StubHighlighter, "x<y>", &language, "theme");

        assert_eq!(result.path, RenderPath::Fallback);
        assert_eq!(result.html, "<pre><code>x&lt;y&gt;</code></pre>");
        assert_eq!(language.label(), "FOO");
    }

    #[test]
    fn renders_plain_text_through_fallback() {
        let normalized = normalize("line1\n\n\n\nline2\r\n");
        let language = Language::from_tag("plaintext");

        let result = render_markup(&StubHighlighter, &normalized, &language, "theme");

        assert_eq!(normalized, "line1\n\nline2");
        assert_eq!(result.path, RenderPath::Fallback);
        assert_eq!(result.html, "<pre><code>line1\n\nline2</code></pre>");
        assert_eq!(language.label(), "Text");
        assert_eq!(line_numbers(&normalized, true), vec![1, 2, 3]);
    }
}
