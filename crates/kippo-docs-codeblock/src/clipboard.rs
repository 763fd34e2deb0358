//! System clipboard access.

use std::future::Future;

/// Errors that can occur when writing to the clipboard.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to set clipboard text: {0}")]
    Write(String),
}

/// A clipboard that accepts text.
pub trait Clipboard: Send + Sync {
    /// Replace the clipboard contents with `text`, verbatim.
    fn write_text(&self, text: &str) -> impl Future<Output = Result<(), ClipboardError>> + Send;
}

/// The platform clipboard, via `arboard`.
///
/// A fresh handle is opened for every write so nothing is held between
/// copies. Common failures: no display server (headless Linux), permission
/// denied.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let text = text.to_string();

        tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            clipboard
                .set_text(text)
                .map_err(|e| ClipboardError::Write(e.to_string()))
        })
        .await
        .map_err(|e| ClipboardError::Write(e.to_string()))?
    }
}
