//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use pulldown_cmark::{html, Event, Parser, Tag, TagEnd};
use rayon::prelude::*;
use walkdir::WalkDir;

use kippo_docs_codeblock::{
    normalize, render_frame, render_markup, CodeBlockProps, CopyState, Frame, Highlighter,
    Language, RenderPath, SyntectHighlighter, DEFAULT_THEME,
};
use kippo_docs_mdx::{markdown_options, parse_mdx, CodeBlock, Frontmatter, ParsedDoc};

use crate::assets::AssetPipeline;
use crate::templates::{Context, TemplateEngine};

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Source docs directory
    pub docs_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Minify CSS output
    pub minify: bool,

    /// Base URL for the site
    pub base_url: String,

    /// Site title
    pub title: String,

    /// Paths to CSS stylesheets to include
    pub styles: Vec<String>,

    /// Highlight theme name
    pub theme: String,

    /// Site-wide line-number default
    pub line_numbers: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from("docs"),
            output_dir: PathBuf::from("dist"),
            minify: true,
            base_url: "/".to_string(),
            title: "Documentation".to_string(),
            styles: vec![],
            theme: DEFAULT_THEME.to_string(),
            line_numbers: true,
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated
    pub pages: usize,

    /// Number of code blocks rendered
    pub code_blocks: usize,

    /// Code blocks that fell back to plain text
    pub fallbacks: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read docs directory: {0}")]
    ReadError(String),

    #[error("Failed to parse page: {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// A page to be built.
#[derive(Debug)]
struct PageInfo {
    /// Source file path
    source_path: PathBuf,

    /// Output path
    output_path: PathBuf,

    /// Parsed document
    doc: ParsedDoc,
}

/// Per-page code block counts.
#[derive(Debug, Default, Clone, Copy)]
struct BlockStats {
    rendered: usize,
    fallbacks: usize,
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    highlighter: Arc<dyn Highlighter>,
    templates: TemplateEngine,
}

impl StaticBuilder {
    /// Create a builder using the bundled syntect grammars and themes.
    pub fn new(config: BuildConfig) -> Self {
        Self::with_highlighter(config, Arc::new(SyntectHighlighter::new()))
    }

    /// Create a builder with a specific highlighter.
    pub fn with_highlighter(config: BuildConfig, highlighter: Arc<dyn Highlighter>) -> Self {
        Self {
            config,
            highlighter,
            templates: TemplateEngine::new(),
        }
    }

    /// Build the static site.
    ///
    /// Pages are rendered in parallel. Code blocks are highlighted
    /// synchronously on the worker rendering their page.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let pages = self.discover_pages()?;

        let results: Vec<Result<BlockStats, BuildError>> =
            pages.par_iter().map(|page| self.build_page(page)).collect();

        let mut total = BlockStats::default();
        for result in results {
            let stats = result?;
            total.rendered += stats.rendered;
            total.fallbacks += stats.fallbacks;
        }

        self.generate_assets()?;

        let duration = start.elapsed();

        tracing::info!(
            "Rendered {} code blocks ({} plain text) across {} pages",
            total.rendered,
            total.fallbacks,
            pages.len()
        );

        Ok(BuildResult {
            pages: pages.len(),
            code_blocks: total.rendered,
            fallbacks: total.fallbacks,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Discover all pages in the docs directory.
    fn discover_pages(&self) -> Result<Vec<PageInfo>, BuildError> {
        let mut pages = Vec::new();

        if !self.config.docs_dir.exists() {
            return Err(BuildError::ReadError(format!(
                "Docs directory not found: {}",
                self.config.docs_dir.display()
            )));
        }

        for entry in WalkDir::new(&self.config.docs_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if ext != "mdx" && ext != "md" {
                continue;
            }

            let content = fs::read_to_string(path)
                .map_err(|e| BuildError::ReadError(format!("{}: {}", path.display(), e)))?;

            let doc = parse_mdx(&content).map_err(|e| BuildError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

            let relative_path = path
                .strip_prefix(&self.config.docs_dir)
                .unwrap_or(path)
                .to_path_buf();

            let output_path = self.calculate_output_path(&relative_path, &doc.frontmatter);

            pages.push(PageInfo {
                source_path: path.to_path_buf(),
                output_path,
                doc,
            });
        }

        Ok(pages)
    }

    /// Calculate output path for a page.
    fn calculate_output_path(&self, relative: &Path, frontmatter: &Option<Frontmatter>) -> PathBuf {
        if let Some(slug) = frontmatter.as_ref().and_then(|fm| fm.slug.as_deref()) {
            return self
                .config
                .output_dir
                .join(slug.trim_matches('/'))
                .join("index.html");
        }

        let stem = relative
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("index");
        let parent = relative.parent().unwrap_or(Path::new(""));

        if stem == "index" {
            // docs/index.mdx -> dist/index.html
            self.config.output_dir.join(parent).join("index.html")
        } else {
            // docs/quick-start.mdx -> dist/quick-start/index.html
            self.config
                .output_dir
                .join(parent)
                .join(stem)
                .join("index.html")
        }
    }

    /// Build a single page.
    fn build_page(&self, page: &PageInfo) -> Result<BlockStats, BuildError> {
        let page_line_numbers = page
            .doc
            .frontmatter
            .as_ref()
            .and_then(|f| f.line_numbers);

        let (content_html, stats) = self.render_markdown(&page.doc, page_line_numbers)?;

        let frontmatter = page.doc.frontmatter.as_ref();
        let context = Context {
            title: page.doc.title().unwrap_or("Untitled").to_string(),
            site_title: self.config.title.clone(),
            description: frontmatter.and_then(|f| f.description.clone()),
            content: content_html,
            base_url: self.config.base_url.clone(),
            styles: self
                .config
                .styles
                .iter()
                .map(|s| format!("{}assets/{}", self.config.base_url, stylesheet_name(s)))
                .collect(),
        };

        let html = self
            .templates
            .render_page("doc.html", &context)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        if let Some(parent) = page.output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }

        fs::write(&page.output_path, html).map_err(|e| BuildError::WriteError(e.to_string()))?;

        tracing::debug!(
            "Built {} -> {} ({} code blocks)",
            page.source_path.display(),
            page.output_path.display(),
            stats.rendered
        );

        Ok(stats)
    }

    /// Render markdown to HTML, replacing every code block with a code block
    /// frame.
    ///
    /// The content is parsed with the same options as `parse_mdx`, so code
    /// block events line up one to one with the page's extracted blocks.
    fn render_markdown(
        &self,
        doc: &ParsedDoc,
        page_line_numbers: Option<bool>,
    ) -> Result<(String, BlockStats), BuildError> {
        let mut stats = BlockStats::default();
        let mut blocks = doc.code_blocks.iter();
        let mut in_block = false;
        let mut events = Vec::new();

        for event in Parser::new_ext(&doc.content, markdown_options()) {
            match event {
                Event::Start(Tag::CodeBlock(_)) => {
                    in_block = true;
                    if let Some(block) = blocks.next() {
                        let (frame_html, path) = self.render_block(block, page_line_numbers)?;
                        stats.rendered += 1;
                        if path == RenderPath::Fallback {
                            stats.fallbacks += 1;
                        }
                        events.push(Event::Html(frame_html.into()));
                    }
                }
                Event::End(TagEnd::CodeBlock) => in_block = false,
                _ if in_block => {}
                other => events.push(other),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok((html_output, stats))
    }

    /// Render one code block to its frame HTML.
    fn render_block(
        &self,
        block: &CodeBlock,
        page_line_numbers: Option<bool>,
    ) -> Result<(String, RenderPath), BuildError> {
        let show_line_numbers = block
            .info
            .line_numbers
            .or(page_line_numbers)
            .unwrap_or(self.config.line_numbers);

        let mut props = CodeBlockProps::new(block.source.as_str(), block.language())
            .with_line_numbers(show_line_numbers);
        if let Some(filename) = &block.info.filename {
            props = props.with_filename(filename.as_str());
        }

        let language = Language::from_tag(&props.language);
        let highlighted = render_markup(
            self.highlighter.as_ref(),
            &normalize(&props.source),
            &language,
            &self.config.theme,
        );
        let path = highlighted.path;

        let frame = Frame::new(&props, Some((highlighted.html, path)), CopyState::Idle);
        let html = render_frame(&frame).map_err(|e| BuildError::TemplateError(e.to_string()))?;

        Ok((html, path))
    }

    /// Generate static assets.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        let css = AssetPipeline::generate_css();
        let css = if self.config.minify {
            AssetPipeline::minify_css(&css).unwrap_or_else(|e| {
                tracing::warn!("Keeping unminified CSS: {}", e);
                css
            })
        } else {
            css
        };
        fs::write(assets_dir.join("codeblock.css"), css)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        fs::write(assets_dir.join("codeblock.js"), AssetPipeline::generate_js())
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        for style_path in &self.config.styles {
            let source_path = PathBuf::from(style_path);
            if source_path.exists() {
                let content = fs::read_to_string(&source_path).map_err(|e| {
                    BuildError::ReadError(format!("Failed to read stylesheet: {}", e))
                })?;
                fs::write(assets_dir.join(stylesheet_name(style_path)), content)
                    .map_err(|e| BuildError::WriteError(e.to_string()))?;
                tracing::info!("Copied stylesheet from {}", style_path);
            } else {
                tracing::warn!("Stylesheet not found: {}", style_path);
            }
        }

        Ok(())
    }
}

/// File name a configured stylesheet is published under.
fn stylesheet_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or("style.css")
}

#[cfg(test)]
mod tests {
    use super::*;
    use kippo_docs_codeblock::HighlightError;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    /// Highlights everything except the `text` grammar, wrapping it in a
    /// marker element.
    struct MarkerHighlighter;

    impl Highlighter for MarkerHighlighter {
        fn name(&self) -> &'static str {
            "marker"
        }

        fn highlight(&self, code: &str, grammar: &str, _theme: &str) -> Result<String, HighlightError> {
            if grammar == "text" {
                return Err(HighlightError::UnsupportedGrammar(grammar.to_string()));
            }
            Ok(format!(
                "<pre class=\"marker\"><code>{}</code></pre>",
                code.replace('<', "&lt;").replace('>', "&gt;")
            ))
        }
    }

    fn site(pages: &[(&str, &str)]) -> (tempfile::TempDir, BuildConfig) {
        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        fs::create_dir_all(&docs).unwrap();

        for (name, content) in pages {
            let path = docs.join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }

        let config = BuildConfig {
            docs_dir: docs,
            output_dir: temp.path().join("dist"),
            minify: false,
            ..Default::default()
        };
        (temp, config)
    }

    fn build_with_marker(config: BuildConfig) -> BuildResult {
        StaticBuilder::with_highlighter(config, Arc::new(MarkerHighlighter))
            .build()
            .unwrap()
    }

    #[test]
    fn builds_simple_site() {
        let (_temp, config) = site(&[("index.mdx", "---\ntitle: Home\n---\n# Welcome\n")]);
        let out = config.output_dir.clone();

        let result = build_with_marker(config);

        assert_eq!(result.pages, 1);
        assert_eq!(result.code_blocks, 0);
        let html = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(html.contains("<title>Home - Documentation</title>"));
        assert!(html.contains("<h1>Welcome</h1>"));
    }

    #[test]
    fn replaces_code_blocks_with_frames() {
        let page = r#"---
title: Quick Start
---

Run it:

```bash filename="run.sh"
dotnet run
dotnet test
```

Notes follow.
"#;
        let (_temp, config) = site(&[("quick-start.mdx", page)]);
        let out = config.output_dir.clone();

        let result = build_with_marker(config);

        assert_eq!(result.code_blocks, 1);
        assert_eq!(result.fallbacks, 0);

        let html = fs::read_to_string(out.join("quick-start/index.html")).unwrap();
        assert!(html.contains(r#"data-language="bash""#));
        assert!(html.contains(r#"data-render="highlighted""#));
        assert!(html.contains(r#"<span class="code-block-label">run.sh</span>"#));
        assert!(html.contains("icon-terminal"));
        assert!(html.contains(r#"<pre class="marker"><code>dotnet run"#));
        assert!(html.contains("<div>1</div><div>2</div>"));
        assert!(html.contains("<p>Notes follow.</p>"));
        // no stray default code element from the markdown renderer
        assert!(!html.contains("language-bash"));
    }

    #[test]
    fn plain_text_blocks_use_fallback() {
        let page = "---\ntitle: Plain\n---\n\n```plaintext\nhello <world>\n```\n";
        let (_temp, config) = site(&[("plain.md", page)]);
        let out = config.output_dir.clone();

        let result = build_with_marker(config);

        assert_eq!(result.code_blocks, 1);
        assert_eq!(result.fallbacks, 1);

        let html = fs::read_to_string(out.join("plain/index.html")).unwrap();
        assert!(html.contains("<pre><code>hello &lt;world&gt;</code></pre>"));
        assert!(html.contains(r#"data-render="fallback""#));
        // single line: no gutter
        assert!(!html.contains("code-block-gutter"));
    }

    #[test]
    fn line_number_precedence() {
        let page = r#"---
title: Numbers
line_numbers: false
---

```json
{
  "a": 1
}
```

```json line-numbers
{
  "b": 2
}
```
"#;
        let (_temp, config) = site(&[("numbers.mdx", page)]);
        let out = config.output_dir.clone();

        let result = build_with_marker(config);

        assert_eq!(result.code_blocks, 2);
        let html = fs::read_to_string(out.join("numbers/index.html")).unwrap();
        assert_eq!(html.matches("code-block-gutter").count(), 1);
    }

    #[test]
    fn site_default_disables_line_numbers() {
        let page = "---\ntitle: Off\n---\n\n```json\n{\n}\n```\n";
        let (_temp, mut config) = site(&[("off.mdx", page)]);
        config.line_numbers = false;
        let out = config.output_dir.clone();

        build_with_marker(config);

        let html = fs::read_to_string(out.join("off/index.html")).unwrap();
        assert!(!html.contains("code-block-gutter"));
    }

    #[test]
    fn honors_slug_and_nested_index() {
        let (_temp, config) = site(&[
            ("guide/index.md", "---\ntitle: Guide\n---\nGuide home\n"),
            ("guide/setup.md", "---\ntitle: Setup\nslug: start/setup\n---\nSetup\n"),
        ]);
        let out = config.output_dir.clone();

        let result = build_with_marker(config);

        assert_eq!(result.pages, 2);
        assert!(out.join("guide/index.html").exists());
        assert!(out.join("start/setup/index.html").exists());
        assert!(!out.join("guide/setup/index.html").exists());
    }

    #[test]
    fn writes_code_block_assets() {
        let (_temp, config) = site(&[("index.md", "# Home\n")]);
        let out = config.output_dir.clone();

        build_with_marker(config);

        let css = fs::read_to_string(out.join("assets/codeblock.css")).unwrap();
        let js = fs::read_to_string(out.join("assets/codeblock.js")).unwrap();
        assert!(css.contains(".code-block"));
        assert!(js.contains("clearTimeout"));
    }

    #[test]
    fn reports_parse_errors_with_path() {
        let (_temp, config) = site(&[("broken.md", "---\ntitle: Broken\n")]);

        let err = StaticBuilder::with_highlighter(config, Arc::new(MarkerHighlighter))
            .build()
            .unwrap_err();

        match err {
            BuildError::ParseError { path, .. } => assert!(path.ends_with("broken.md")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_docs_dir_is_a_read_error() {
        let temp = tempdir().unwrap();
        let config = BuildConfig {
            docs_dir: temp.path().join("nope"),
            output_dir: temp.path().join("dist"),
            ..Default::default()
        };

        let err = StaticBuilder::new(config).build().unwrap_err();

        assert!(matches!(err, BuildError::ReadError(_)));
    }

    #[test]
    fn highlights_with_syntect() {
        let page = "---\ntitle: Config\n---\n\n```json\n{\"a\": 1}\n```\n";
        let (_temp, config) = site(&[("config.md", page)]);
        let out = config.output_dir.clone();

        let result = StaticBuilder::new(config).build().unwrap();

        assert_eq!(result.fallbacks, 0);
        let html = fs::read_to_string(out.join("config/index.html")).unwrap();
        assert!(html.contains(r#"<pre class="syntect""#));
    }
}
