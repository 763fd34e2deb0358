//! Code block extraction and fence info parsing.

/// Language tag used when a fence names none.
pub const DEFAULT_LANGUAGE: &str = "plaintext";

/// Settings parsed from a code fence info string.
///
/// Supports `lang [filename="x" | file=x] [line-numbers | no-line-numbers]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FenceInfo {
    /// Language tag (first word, `plaintext` when absent)
    pub language: String,

    /// Optional filename shown in the header
    pub filename: Option<String>,

    /// Explicit line-number flag; `None` defers to page and site defaults
    pub line_numbers: Option<bool>,
}

impl FenceInfo {
    /// Parse a code fence info string.
    pub fn parse(info: &str) -> Self {
        let language = info
            .split_whitespace()
            .next()
            .filter(|word| !word.contains('='))
            .unwrap_or(DEFAULT_LANGUAGE)
            .to_string();

        let mut line_numbers = None;
        for word in info.split_whitespace() {
            match word {
                "line-numbers" => line_numbers = Some(true),
                "no-line-numbers" => line_numbers = Some(false),
                _ => {}
            }
        }

        Self {
            language,
            filename: extract_filename(info),
            line_numbers,
        }
    }

    /// Info for an indented (unfenced) block.
    pub fn indented() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            ..Default::default()
        }
    }
}

/// A code block found in a page.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    /// Unique identifier for this block (format: block-{line_number})
    pub id: String,

    /// Parsed fence settings
    pub info: FenceInfo,

    /// Source code content, as written
    pub source: String,

    /// Line number where the block starts (1-indexed)
    pub line_number: usize,
}

impl CodeBlock {
    /// Create a new code block.
    pub fn new(info: FenceInfo, source: String, line_number: usize) -> Self {
        Self {
            id: format!("block-{}", line_number),
            info,
            source,
            line_number,
        }
    }

    /// Language tag of the block.
    pub fn language(&self) -> &str {
        &self.info.language
    }
}

/// Extract filename from code fence info string if present.
///
/// Supports formats like:
/// - `csharp filename="Program.cs"`
/// - `csharp file=Program.cs`
pub fn extract_filename(info: &str) -> Option<String> {
    if let Some(start) = info.find("filename=\"") {
        let rest = &info[start + 10..];
        if let Some(end) = rest.find('"') {
            return Some(rest[..end].to_string());
        }
    }

    if let Some(start) = info.find("file=") {
        let rest = &info[start + 5..];
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let filename = rest[..end].trim_matches('"');
        if !filename.is_empty() {
            return Some(filename.to_string());
        }
    }

    None
}
