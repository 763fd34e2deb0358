//! Source text normalization.

use std::sync::LazyLock;

use regex::Regex;

/// Carriage returns directly before a line feed. Stray `\r` runs are folded
/// into the line ending so a second pass finds nothing left to convert.
static LINE_ENDING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r+\n").expect("Invalid line ending regex"));

static BLANK_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("Invalid blank run regex"));

/// Normalize code for display.
///
/// Trims surrounding whitespace, converts CRLF line endings to LF and
/// collapses any run of three or more newlines into a single blank line.
/// Applying it twice gives the same result as applying it once.
pub fn normalize(source: &str) -> String {
    let trimmed = source.trim();
    let unified = LINE_ENDING_RE.replace_all(trimmed, "\n");
    BLANK_RUN_RE.replace_all(&unified, "\n\n").into_owned()
}
