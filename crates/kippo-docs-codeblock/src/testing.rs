//! Deterministic collaborators for unit tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::clipboard::{Clipboard, ClipboardError};
use crate::highlighter::{HighlightError, Highlighter};
use crate::markup::escape_plain;

const SUPPORTED: &[&str] = &["csharp", "json", "javascript", "bash"];

/// Highlights a handful of grammars. Code starting with "slow" takes 150ms.
pub struct StubHighlighter;

impl Highlighter for StubHighlighter {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn highlight(&self, code: &str, grammar: &str, _theme: &str) -> Result<String, HighlightError> {
        if code.starts_with("slow") {
            std::thread::sleep(Duration::from_millis(150));
        }
        if !SUPPORTED.contains(&grammar) {
            return Err(HighlightError::UnsupportedGrammar(grammar.to_string()));
        }

        let lines: Vec<String> = code
            .split('\n')
            .map(|line| format!(r#"<span class="line">{}</span>"#, escape_plain(line)))
            .collect();

        Ok(format!(
            r#"<pre class="stub"><code>{}</code></pre>"#,
            lines.join("\n")
        ))
    }
}

/// Records every write, or refuses all of them.
#[derive(Debug, Clone, Default)]
pub struct RecordingClipboard {
    written: Arc<Mutex<Vec<String>>>,
    deny: Arc<AtomicBool>,
}

impl RecordingClipboard {
    pub fn denying() -> Self {
        let clipboard = Self::default();
        clipboard.set_deny(true);
        clipboard
    }

    pub fn set_deny(&self, deny: bool) {
        self.deny.store(deny, Ordering::SeqCst);
    }

    pub fn writes(&self) -> Vec<String> {
        self.written.lock().unwrap().clone()
    }
}

impl Clipboard for RecordingClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.deny.load(Ordering::SeqCst) {
            return Err(ClipboardError::Unavailable("access denied".to_string()));
        }
        self.written.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
