//! Static site generator for kippo-docs.
//!
//! Builds a static documentation site from markdown/MDX pages, rendering every
//! code block through the code block component.

pub mod assets;
pub mod builder;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, StaticBuilder};
