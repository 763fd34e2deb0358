//! Asset pipeline for the code block stylesheet and copy runtime.

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the code block CSS file.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// Generate the copy button runtime.
    pub fn generate_js() -> String {
        DEFAULT_JS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

const DEFAULT_CSS: &str = r#"/* Kippo Docs - code blocks */

:root {
  --code-bg: #2b303b;
  --code-header-bg: #232730;
  --code-border: #3b4252;
  --code-fg: #c0c5ce;
  --code-muted: #65737e;
  --code-accent: #a3be8c;
  --code-danger: #bf616a;
}

.code-block {
  background: var(--code-bg);
  border: 1px solid var(--code-border);
  border-radius: 0.5rem;
  margin-bottom: 1rem;
  overflow: hidden;
}

.code-block-header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  padding: 0.5rem 0.75rem;
  background: var(--code-header-bg);
  border-bottom: 1px solid var(--code-border);
  font-size: 0.75rem;
  color: var(--code-muted);
}

.code-block-title {
  display: flex;
  align-items: center;
  gap: 0.5rem;
}

.code-block-dots {
  display: inline-flex;
  gap: 0.25rem;
}

.code-block-dots span {
  width: 0.625rem;
  height: 0.625rem;
  border-radius: 50%;
  background: var(--code-border);
}

.code-block-icon {
  width: 1rem;
  height: 1rem;
  display: inline-block;
}

.code-block-icon.icon-terminal::before {
  content: ">_";
  font-family: var(--font-mono, ui-monospace, monospace);
}

.code-block-icon.icon-code::before {
  content: "</>";
  font-family: var(--font-mono, ui-monospace, monospace);
}

.code-block-body {
  display: flex;
  overflow-x: auto;
  font-family: var(--font-mono, ui-monospace, monospace);
  font-size: 0.875rem;
  line-height: 1.6;
}

.code-block-gutter {
  flex: none;
  padding: 1rem 0.75rem;
  text-align: right;
  color: var(--code-muted);
  user-select: none;
  border-right: 1px solid var(--code-border);
}

.code-block-content {
  flex: 1;
  min-width: 0;
}

.code-block-content pre {
  margin: 0;
  padding: 1rem;
  background: transparent !important;
  color: var(--code-fg);
}

.code-block-content .line {
  display: block;
  min-height: 1.6em;
}

/* Copy button */
.copy-btn {
  padding: 0.25rem 0.75rem;
  font-size: 0.75rem;
  font-weight: 500;
  background: var(--code-border);
  color: var(--code-fg);
  border: none;
  border-radius: 0.375rem;
  cursor: pointer;
  transition: background 0.15s, color 0.15s;
}

.copy-btn:hover {
  background: var(--code-muted);
}

.copy-btn:focus-visible {
  outline: 2px solid var(--code-accent);
  outline-offset: 2px;
}

.copy-btn.copied {
  color: var(--code-accent);
}

.copy-btn.failed {
  color: var(--code-danger);
}
"#;

const DEFAULT_JS: &str = r#"// Kippo Docs - code block runtime
(function() {
  'use strict';

  const RESET_MS = 2000;

  document.querySelectorAll('.code-block .copy-btn').forEach(btn => {
    let timer = null;

    const show = (label, state) => {
      if (timer !== null) clearTimeout(timer);
      btn.textContent = label;
      btn.classList.remove('copied', 'failed');
      btn.classList.add(state);
      timer = setTimeout(() => {
        btn.textContent = 'Copy';
        btn.classList.remove('copied', 'failed');
        timer = null;
      }, RESET_MS);
    };

    btn.addEventListener('click', async () => {
      // Raw source, not the highlighted markup
      const text = btn.dataset.code || '';

      try {
        await navigator.clipboard.writeText(text);
        show('Copied!', 'copied');
      } catch (err) {
        show('Error', 'failed');
      }
    });
  });
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_css() {
        let css = AssetPipeline::generate_css();
        assert!(css.contains(".code-block-gutter"));
        assert!(css.contains(".copy-btn.copied"));
        assert!(css.contains("user-select: none"));
    }

    #[test]
    fn js_keeps_one_timer_per_button() {
        let js = AssetPipeline::generate_js();
        assert!(js.contains("clearTimeout(timer)"));
        assert!(js.contains("RESET_MS = 2000"));
        assert!(js.contains("btn.dataset.code"));
        assert!(js.contains("'Copied!'"));
        assert!(js.contains("'Error'"));
    }

    #[test]
    fn minifies_css() {
        let css = r#"
.code-block {
    background-color: blue;
    padding: 10px;
}
        "#;

        let minified = AssetPipeline::minify_css(css).unwrap();

        assert!(!minified.contains('\n'));
        assert!(minified.contains(".code-block"));
    }

    #[test]
    fn default_css_minifies() {
        let minified = AssetPipeline::minify_css(&AssetPipeline::generate_css()).unwrap();

        assert!(minified.contains(".code-block-gutter"));
    }
}
