//! Asynchronous highlight renderer.
//!
//! Each request is tagged with a sequence number. Results are applied in
//! the order requests were issued: a result that resolves after a newer
//! request was made is dropped, so a slow highlight can never overwrite the
//! markup for newer source text.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::highlighter::Highlighter;
use crate::language::Language;
use crate::markup::{fallback_markup, render_markup, Highlighted, RenderPath};
use crate::normalize::normalize;

/// Markup applied by the renderer, with the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Sequence number of the request (starts at 1)
    pub seq: u64,

    /// Resulting markup
    pub highlighted: Highlighted,
}

/// Per-instance highlight renderer.
pub struct HighlightRenderer {
    highlighter: Arc<dyn Highlighter>,
    theme: Arc<str>,
    issued: Arc<AtomicU64>,
    output: Arc<watch::Sender<Option<Rendered>>>,
}

impl HighlightRenderer {
    /// Create a renderer for the given highlighter and theme.
    pub fn new(highlighter: Arc<dyn Highlighter>, theme: impl Into<String>) -> Self {
        let (output, _) = watch::channel(None);
        let theme: String = theme.into();

        Self {
            highlighter,
            theme: Arc::from(theme),
            issued: Arc::new(AtomicU64::new(0)),
            output: Arc::new(output),
        }
    }

    /// Theme passed to every highlight call.
    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// Sequence number of the most recently issued request (0 before any).
    pub fn latest_seq(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    /// Start highlighting `source` in the background.
    ///
    /// Must be called within a tokio runtime. The returned handle resolves to
    /// `true` if this request's result was applied and `false` if a newer
    /// request superseded it. Dropping the handle does not cancel the work.
    pub fn request(&self, source: &str, language: &Language) -> JoinHandle<bool> {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        let highlighter = Arc::clone(&self.highlighter);
        let theme = Arc::clone(&self.theme);
        let issued = Arc::clone(&self.issued);
        let output = Arc::clone(&self.output);
        let normalized = normalize(source);
        let language = language.clone();

        tracing::trace!("Highlight request #{} ({})", seq, language.tag());

        tokio::spawn(async move {
            let input = normalized.clone();
            let highlighted = match tokio::task::spawn_blocking(move || {
                render_markup(highlighter.as_ref(), &input, &language, &theme)
            })
            .await
            {
                Ok(highlighted) => highlighted,
                Err(e) => {
                    tracing::warn!("Highlight task #{} failed: {}", seq, e);
                    Highlighted {
                        html: fallback_markup(&normalized),
                        path: RenderPath::Fallback,
                    }
                }
            };

            output.send_if_modified(|current| {
                let latest = issued.load(Ordering::SeqCst);
                if seq != latest {
                    tracing::debug!("Discarding highlight #{} (latest is #{})", seq, latest);
                    return false;
                }
                *current = Some(Rendered { seq, highlighted });
                true
            })
        })
    }

    /// Markup applied so far, if any.
    pub fn current(&self) -> Option<Rendered> {
        self.output.borrow().clone()
    }

    /// Watch applied markup.
    pub fn subscribe(&self) -> watch::Receiver<Option<Rendered>> {
        self.output.subscribe()
    }

    /// Wait until the most recent request's markup has been applied.
    pub async fn settled(&self) -> Option<Rendered> {
        let latest = self.latest_seq();
        if latest == 0 {
            return None;
        }

        let mut rx = self.subscribe();
        let rendered = rx
            .wait_for(|current| current.as_ref().is_some_and(|r| r.seq >= latest))
            .await
            .ok()?;
        (*rendered).clone()
    }
}
