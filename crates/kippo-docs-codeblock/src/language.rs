//! Language tags, display labels and header icons.

use std::borrow::Cow;
use std::fmt;

/// Grammar identifier used for plain text.
pub const PLAIN_TEXT_GRAMMAR: &str = "text";

/// Language of a code block, resolved from its tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Language {
    CSharp,
    JavaScript,
    TypeScript,
    Json,
    Bash,
    Shell,
    PowerShell,
    Xml,
    #[default]
    PlainText,
    /// Any tag without a table entry. Holds the tag as given.
    Other(String),
}

/// Header icon category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    /// Shell-like languages
    Terminal,
    /// Everything else
    Code,
}

impl Icon {
    /// CSS class name used by the frame template.
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Terminal => "terminal",
            Self::Code => "code",
        }
    }
}

impl Language {
    /// Every language with a fixed table entry.
    pub const KNOWN: [Language; 9] = [
        Self::CSharp,
        Self::JavaScript,
        Self::TypeScript,
        Self::Json,
        Self::Bash,
        Self::Shell,
        Self::PowerShell,
        Self::Xml,
        Self::PlainText,
    ];

    /// Resolve a language tag. Matching is exact.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "csharp" => Self::CSharp,
            "javascript" => Self::JavaScript,
            "typescript" => Self::TypeScript,
            "json" => Self::Json,
            "bash" => Self::Bash,
            "shell" => Self::Shell,
            "powershell" => Self::PowerShell,
            "xml" => Self::Xml,
            "plaintext" => Self::PlainText,
            other => Self::Other(other.to_string()),
        }
    }

    /// Guess a language tag from a file extension.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "cs" => Self::CSharp,
            "js" | "mjs" | "cjs" => Self::JavaScript,
            "ts" => Self::TypeScript,
            "json" => Self::Json,
            "sh" | "bash" => Self::Bash,
            "ps1" => Self::PowerShell,
            "xml" | "csproj" => Self::Xml,
            "txt" | "" => Self::PlainText,
            other => Self::Other(other.to_string()),
        }
    }

    /// The tag this language was resolved from.
    pub fn tag(&self) -> &str {
        match self {
            Self::CSharp => "csharp",
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Json => "json",
            Self::Bash => "bash",
            Self::Shell => "shell",
            Self::PowerShell => "powershell",
            Self::Xml => "xml",
            Self::PlainText => "plaintext",
            Self::Other(tag) => tag,
        }
    }

    /// Display label for the code block header.
    ///
    /// Unknown tags are shown uppercased.
    pub fn label(&self) -> Cow<'_, str> {
        match self {
            Self::CSharp => Cow::Borrowed("C#"),
            Self::JavaScript => Cow::Borrowed("JavaScript"),
            Self::TypeScript => Cow::Borrowed("TypeScript"),
            Self::Json => Cow::Borrowed("JSON"),
            Self::Bash => Cow::Borrowed("Bash"),
            Self::Shell => Cow::Borrowed("Shell"),
            Self::PowerShell => Cow::Borrowed("PowerShell"),
            Self::Xml => Cow::Borrowed("XML"),
            Self::PlainText => Cow::Borrowed("Text"),
            Self::Other(tag) => Cow::Owned(tag.to_uppercase()),
        }
    }

    /// Header icon category.
    pub fn icon(&self) -> Icon {
        match self {
            Self::Bash | Self::Shell | Self::PowerShell => Icon::Terminal,
            _ => Icon::Code,
        }
    }

    /// Grammar identifier passed to the highlighter.
    pub fn grammar(&self) -> &str {
        match self {
            Self::PlainText => PLAIN_TEXT_GRAMMAR,
            other => other.tag(),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
