//! Clipboard copy with a timed acknowledgment.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::clipboard::{Clipboard, ClipboardError};

/// How long "Copied!" (or "Error") stays up after a copy attempt.
pub const ACK_WINDOW: Duration = Duration::from_millis(2000);

/// State of the copy button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyState {
    /// Ready to copy
    #[default]
    Idle,
    /// The last copy succeeded and the window is still open
    Copied,
    /// The last copy failed and the window is still open
    Failed,
}

impl CopyState {
    /// Button label for this state.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Copy",
            Self::Copied => "Copied!",
            Self::Failed => "Error",
        }
    }

    /// The acknowledgment flag: true only while a successful copy is shown.
    pub fn is_acknowledged(&self) -> bool {
        matches!(self, Self::Copied)
    }
}

/// Copies text and drives the acknowledgment state.
///
/// Only one reset timer is pending at a time. A new copy cancels the
/// pending reset and starts a fresh window, so the latest copy decides when
/// the state returns to [`CopyState::Idle`].
pub struct CopyController<C> {
    clipboard: C,
    state: Arc<watch::Sender<CopyState>>,
    invocations: AtomicU64,
    generation: Arc<AtomicU64>,
    reset: Mutex<Option<JoinHandle<()>>>,
}

impl<C: Clipboard> CopyController<C> {
    /// Create a controller writing to `clipboard`.
    pub fn new(clipboard: C) -> Self {
        let (state, _) = watch::channel(CopyState::Idle);

        Self {
            clipboard,
            state: Arc::new(state),
            invocations: AtomicU64::new(0),
            generation: Arc::new(AtomicU64::new(0)),
            reset: Mutex::new(None),
        }
    }

    /// Copy `text` verbatim.
    ///
    /// Must be called within a tokio runtime. On failure the error is logged,
    /// the state shows [`CopyState::Failed`] for the window and the error is
    /// returned. When copies overlap, only the most recent call updates the
    /// state; an older write that resolves later just returns its result.
    pub async fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        let invocation = self.invocations.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.clipboard.write_text(text).await;

        let latest = self.invocations.load(Ordering::SeqCst);
        if invocation != latest {
            tracing::debug!(
                "Ignoring outcome of copy #{} (latest is #{})",
                invocation,
                latest
            );
            return result;
        }

        match result {
            Ok(()) => {
                tracing::debug!("Copied {} bytes to clipboard", text.len());
                self.show(CopyState::Copied);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Copy to clipboard failed: {}", e);
                self.show(CopyState::Failed);
                Err(e)
            }
        }
    }

    /// Current state.
    pub fn state(&self) -> CopyState {
        *self.state.borrow()
    }

    /// Whether "Copied!" is currently shown.
    pub fn is_acknowledged(&self) -> bool {
        self.state().is_acknowledged()
    }

    /// Watch state changes.
    pub fn subscribe(&self) -> watch::Receiver<CopyState> {
        self.state.subscribe()
    }

    /// Show `state` and schedule the return to idle.
    fn show(&self, state: CopyState) {
        let deadline = Instant::now() + ACK_WINDOW;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let mut reset = self.reset.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pending) = reset.take() {
            pending.abort();
        }

        self.state.send_replace(state);

        let status = Arc::clone(&self.state);
        let current_generation = Arc::clone(&self.generation);

        *reset = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;

            // An aborted timer may already be past its sleep; the generation
            // check keeps it from clearing a newer window.
            status.send_if_modified(|current| {
                if current_generation.load(Ordering::SeqCst) != generation
                    || *current == CopyState::Idle
                {
                    return false;
                }
                *current = CopyState::Idle;
                true
            });
        }));
    }
}

impl<C> Drop for CopyController<C> {
    fn drop(&mut self) {
        let reset = self.reset.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(pending) = reset.take() {
            pending.abort();
        }
    }
}
