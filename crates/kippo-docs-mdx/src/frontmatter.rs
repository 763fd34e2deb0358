//! Frontmatter extraction and parsing.

use serde::Deserialize;

/// Parsed frontmatter from a page.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Frontmatter {
    /// Page title (required)
    pub title: String,

    /// Page description for the meta tag
    #[serde(default)]
    pub description: Option<String>,

    /// Custom slug override
    #[serde(default)]
    pub slug: Option<String>,

    /// Line-number default for the page's code blocks
    #[serde(default)]
    pub line_numbers: Option<bool>,
}

/// Line that opens and closes a frontmatter block.
const FENCE: &str = "---";

/// Split a page into its frontmatter and body.
///
/// The block must start the page (leading whitespace is ignored) with a
/// `---` line and end at the next line that is exactly `---`. The body is
/// returned as a suffix of `source` with leading blank lines removed.
pub fn extract_frontmatter(source: &str) -> Result<(Option<Frontmatter>, &str), FrontmatterError> {
    let Some(after_fence) = source.trim_start().strip_prefix(FENCE) else {
        return Ok((None, source));
    };

    let Some((opening_rest, block)) = after_fence.split_once('\n') else {
        return Err(FrontmatterError::Unclosed);
    };
    if !opening_rest.trim().is_empty() {
        // `---foo` is body text, not a fence
        return Ok((None, source));
    }

    let mut yaml_len = 0;
    for line in block.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            let frontmatter = serde_yaml::from_str(&block[..yaml_len])
                .map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?;
            let body = &block[yaml_len + line.len()..];
            return Ok((Some(frontmatter), body.trim_start()));
        }
        yaml_len += line.len();
    }

    Err(FrontmatterError::Unclosed)
}

/// Errors that can occur when parsing frontmatter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Frontmatter block is never closed with a `---` line")]
    Unclosed,

    #[error("Frontmatter is not valid YAML: {0}")]
    InvalidYaml(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_valid_frontmatter() {
        let source = r#"---
title: Quick Start
description: Build your first Kippo bot
line_numbers: false
---

# Quick Start
"#;

        let (fm, content) = extract_frontmatter(source).unwrap();
        let fm = fm.unwrap();

        assert_eq!(fm.title, "Quick Start");
        assert_eq!(
            fm.description,
            Some("Build your first Kippo bot".to_string())
        );
        assert_eq!(fm.line_numbers, Some(false));
        assert_eq!(fm.slug, None);
        assert!(content.starts_with("# Quick Start"));
    }

    #[test]
    fn handles_no_frontmatter() {
        let source = "# Just Markdown\n\nNo frontmatter here.";

        let (fm, content) = extract_frontmatter(source).unwrap();

        assert!(fm.is_none());
        assert_eq!(content, source);
    }

    #[test]
    fn errors_on_unclosed_frontmatter() {
        let source = "---\ntitle: Test\n# No closing";

        let result = extract_frontmatter(source);

        assert!(matches!(result, Err(FrontmatterError::Unclosed)));
    }

    #[test]
    fn errors_on_invalid_yaml() {
        let source = "---\ntitle: [invalid yaml\n---\n";

        let result = extract_frontmatter(source);

        assert!(matches!(result, Err(FrontmatterError::InvalidYaml(_))));
    }

    #[test]
    fn errors_on_missing_title() {
        let source = "---\nslug: intro\n---\n";

        let result = extract_frontmatter(source);

        assert!(matches!(result, Err(FrontmatterError::InvalidYaml(_))));
    }

    #[test]
    fn handles_crlf_fences() {
        let source = "---\r\ntitle: Windows\r\n---\r\n\r\nBody";

        let (fm, content) = extract_frontmatter(source).unwrap();

        assert_eq!(fm.unwrap().title, "Windows");
        assert_eq!(content, "Body");
    }

    #[test]
    fn closing_fence_must_be_whole_line() {
        let source = "---\ntitle: Dashes\n----\nstill yaml: true\n";

        let result = extract_frontmatter(source);

        assert!(matches!(result, Err(FrontmatterError::Unclosed)));
    }

    #[test]
    fn body_is_a_suffix_of_the_source() {
        let source = "---\ntitle: Offsets\n---\n\n# Heading\n";

        let (_, content) = extract_frontmatter(source).unwrap();

        assert!(source.ends_with(content));
        assert_eq!(content, "# Heading\n");
    }
}
