//! Page parser.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::codeblock::{CodeBlock, FenceInfo};
use crate::frontmatter::{extract_frontmatter, Frontmatter, FrontmatterError};

/// Markdown extensions enabled for every page.
pub fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
}

/// A parsed page.
#[derive(Debug, Clone)]
pub struct ParsedDoc {
    /// Parsed frontmatter (if present)
    pub frontmatter: Option<Frontmatter>,

    /// Markdown content (without frontmatter)
    pub content: String,

    /// Extracted code blocks, in document order
    pub code_blocks: Vec<CodeBlock>,
}

impl ParsedDoc {
    /// Page title from frontmatter, if any.
    pub fn title(&self) -> Option<&str> {
        self.frontmatter.as_ref().map(|f| f.title.as_str())
    }
}

/// Errors that can occur when parsing a page.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Frontmatter error: {0}")]
    Frontmatter(#[from] FrontmatterError),
}

/// Parse a markdown/MDX page.
///
/// Extracts frontmatter and every code block, fenced or indented.
pub fn parse_mdx(source: &str) -> Result<ParsedDoc, ParseError> {
    let (frontmatter, content) = extract_frontmatter(source)?;

    // Lines consumed by the frontmatter block
    let consumed = source.len() - content.len();
    let line_offset = source[..consumed].matches('\n').count();

    let mut code_blocks = Vec::new();
    let mut current: Option<(FenceInfo, usize, String)> = None;

    for (event, range) in Parser::new_ext(content, markdown_options()).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let info = match &kind {
                    CodeBlockKind::Fenced(info) => FenceInfo::parse(info),
                    CodeBlockKind::Indented => FenceInfo::indented(),
                };
                let line = content[..range.start].matches('\n').count() + 1 + line_offset;
                current = Some((info, line, String::new()));
            }

            Event::Text(text) => {
                if let Some((_, _, ref mut buffer)) = current {
                    buffer.push_str(&text);
                }
            }

            Event::End(TagEnd::CodeBlock) => {
                if let Some((info, line, source)) = current.take() {
                    code_blocks.push(CodeBlock::new(info, source, line));
                }
            }

            _ => {}
        }
    }

    Ok(ParsedDoc {
        frontmatter,
        content: content.to_string(),
        code_blocks,
    })
}
