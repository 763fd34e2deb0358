//! Markdown/MDX parser with frontmatter and code block extraction.
//!
//! This crate parses documentation pages, extracts YAML frontmatter and
//! collects every code block with the settings from its fence info string.

pub mod codeblock;
pub mod frontmatter;
pub mod parser;

pub use codeblock::{CodeBlock, FenceInfo};
pub use frontmatter::Frontmatter;
pub use parser::{markdown_options, parse_mdx, ParseError, ParsedDoc};
