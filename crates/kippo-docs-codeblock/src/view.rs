//! The code block view: one renderer, one copy controller and the HTML
//! frame around them.

use std::sync::{Arc, LazyLock};

use minijinja::Environment;
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::clipboard::{Clipboard, ClipboardError};
use crate::copy::{CopyController, CopyState};
use crate::highlighter::Highlighter;
use crate::language::Language;
use crate::markup::{line_numbers, RenderPath};
use crate::normalize::normalize;
use crate::renderer::{HighlightRenderer, Rendered};

/// Errors that can occur when rendering a frame.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("Failed to render code block: {0}")]
    Template(#[from] minijinja::Error),
}

/// Inputs of a code block.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlockProps {
    /// Raw source, exactly as the page provides it
    pub source: String,

    /// Language tag
    pub language: String,

    /// Shown in the header instead of the language label
    pub filename: Option<String>,

    /// Request a line-number gutter
    pub show_line_numbers: bool,
}

impl CodeBlockProps {
    /// Props with line numbers on and no filename.
    pub fn new(source: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            language: language.into(),
            filename: None,
            show_line_numbers: true,
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_line_numbers(mut self, show: bool) -> Self {
        self.show_line_numbers = show;
        self
    }
}

/// Everything the frame template needs.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    /// Language tag
    pub language: String,
    /// Header text: filename or language label
    pub label: String,
    /// Icon class name
    pub icon: &'static str,
    /// Copy button state and label
    pub copy_state: CopyState,
    pub copy_label: &'static str,
    /// Gutter numbers (empty when hidden)
    pub line_numbers: Vec<usize>,
    /// Body markup
    pub markup: String,
    /// Path that produced the markup, if any
    pub render_path: Option<RenderPath>,
    /// Raw source for the copy button
    pub source: String,
}

impl Frame {
    /// Assemble a frame from props and the current markup.
    pub fn new(
        props: &CodeBlockProps,
        rendered: Option<(String, RenderPath)>,
        copy_state: CopyState,
    ) -> Self {
        let language = Language::from_tag(&props.language);
        let label = props
            .filename
            .as_deref()
            .filter(|name| !name.is_empty())
            .map_or_else(|| language.label().into_owned(), str::to_string);
        let (markup, render_path) = match rendered {
            Some((markup, path)) => (markup, Some(path)),
            None => (String::new(), None),
        };

        Self {
            language: props.language.clone(),
            label,
            icon: language.icon().class_name(),
            copy_state,
            copy_label: copy_state.label(),
            line_numbers: line_numbers(&normalize(&props.source), props.show_line_numbers),
            markup,
            render_path,
            source: props.source.clone(),
        }
    }
}

static TEMPLATES: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    env.add_template("codeblock.html", FRAME_TEMPLATE)
        .expect("Failed to add code block template");
    env
});

/// Render a frame to HTML.
pub fn render_frame(frame: &Frame) -> Result<String, ViewError> {
    let html = TEMPLATES.get_template("codeblock.html")?.render(frame)?;
    Ok(html)
}

/// A displayed code block.
///
/// Owns its markup and acknowledgment state; nothing is shared with other
/// views. Must be created and used within a tokio runtime.
pub struct CodeBlockView<C> {
    props: CodeBlockProps,
    language: Language,
    renderer: HighlightRenderer,
    copy: CopyController<C>,
}

impl<C: Clipboard> CodeBlockView<C> {
    /// Create a view and start highlighting its source.
    pub fn new(
        props: CodeBlockProps,
        highlighter: Arc<dyn Highlighter>,
        theme: impl Into<String>,
        clipboard: C,
    ) -> Self {
        let language = Language::from_tag(&props.language);
        let renderer = HighlightRenderer::new(highlighter, theme);
        let _ = renderer.request(&props.source, &language);

        Self {
            props,
            language,
            renderer,
            copy: CopyController::new(clipboard),
        }
    }

    pub fn props(&self) -> &CodeBlockProps {
        &self.props
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    /// Replace the source. Highlights again only if it changed.
    pub fn set_source(&mut self, source: impl Into<String>) -> Option<JoinHandle<bool>> {
        let source = source.into();
        if source == self.props.source {
            return None;
        }
        self.props.source = source;
        Some(self.renderer.request(&self.props.source, &self.language))
    }

    /// Replace the language tag. Highlights again only if it changed.
    pub fn set_language(&mut self, tag: impl Into<String>) -> Option<JoinHandle<bool>> {
        let tag = tag.into();
        if tag == self.props.language {
            return None;
        }
        self.language = Language::from_tag(&tag);
        self.props.language = tag;
        Some(self.renderer.request(&self.props.source, &self.language))
    }

    pub fn set_filename(&mut self, filename: Option<String>) {
        self.props.filename = filename;
    }

    pub fn set_line_numbers(&mut self, show: bool) {
        self.props.show_line_numbers = show;
    }

    /// Markup applied so far.
    pub fn highlighted(&self) -> Option<Rendered> {
        self.renderer.current()
    }

    /// Wait for the markup of the latest source and language.
    pub async fn settled(&self) -> Option<Rendered> {
        self.renderer.settled().await
    }

    /// Watch markup changes.
    pub fn subscribe_markup(&self) -> watch::Receiver<Option<Rendered>> {
        self.renderer.subscribe()
    }

    /// Copy the raw, unnormalized source.
    pub async fn copy(&self) -> Result<(), ClipboardError> {
        self.copy.copy(&self.props.source).await
    }

    pub fn copy_state(&self) -> CopyState {
        self.copy.state()
    }

    /// Watch copy button changes.
    pub fn subscribe_copy(&self) -> watch::Receiver<CopyState> {
        self.copy.subscribe()
    }

    /// Frame for the current state.
    pub fn frame(&self) -> Frame {
        let rendered = self
            .renderer
            .current()
            .map(|r| (r.highlighted.html, r.highlighted.path));
        Frame::new(&self.props, rendered, self.copy.state())
    }

    /// Render the current state to HTML.
    pub fn render(&self) -> Result<String, ViewError> {
        render_frame(&self.frame())
    }
}

const FRAME_TEMPLATE: &str = r##"<div class="code-block" data-language="{{ language }}"{% if render_path %} data-render="{{ render_path }}"{% endif %}>
  <div class="code-block-header">
    <div class="code-block-title">
      <span class="code-block-dots" aria-hidden="true"><span></span><span></span><span></span></span>
      <span class="code-block-icon icon-{{ icon }}" aria-hidden="true"></span>
      <span class="code-block-label">{{ label }}</span>
    </div>
    <button type="button" class="copy-btn{% if copy_state != "idle" %} {{ copy_state }}{% endif %}" title="Copy code" data-code="{{ source }}">{{ copy_label }}</button>
  </div>
  <div class="code-block-body">
    {%- if line_numbers %}
    <div class="code-block-gutter" aria-hidden="true">{% for n in line_numbers %}<div>{{ n }}</div>{% endfor %}</div>
    {%- endif %}
    <div class="code-block-content">{{ markup | safe }}</div>
  </div>
</div>"##;
