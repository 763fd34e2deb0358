//! Code block component for kippo-docs.
//!
//! Turns a raw code string plus a language tag into highlighted markup
//! (asynchronously, with a plain-text fallback), renders an optional
//! line-number gutter and copies the original text to the system clipboard
//! with a timed "Copied!" acknowledgment.

pub mod clipboard;
pub mod copy;
pub mod highlighter;
pub mod language;
pub mod markup;
pub mod normalize;
pub mod renderer;
pub mod view;

#[cfg(test)]
mod testing;

pub use clipboard::{Clipboard, ClipboardError, SystemClipboard};
pub use copy::{CopyController, CopyState, ACK_WINDOW};
pub use highlighter::{HighlightError, Highlighter, SyntectHighlighter, DEFAULT_THEME};
pub use language::{Icon, Language};
pub use markup::{line_numbers, render_markup, Highlighted, RenderPath};
pub use normalize::normalize;
pub use renderer::{HighlightRenderer, Rendered};
pub use view::{render_frame, CodeBlockProps, CodeBlockView, Frame, ViewError};
