//! Language table listing.

use kippo_docs_codeblock::{Language, SyntectHighlighter};

/// One row of the language table.
#[derive(Debug, PartialEq)]
struct Row {
    tag: String,
    label: String,
    icon: &'static str,
    highlighted: bool,
}

fn rows(highlighter: &SyntectHighlighter) -> Vec<Row> {
    Language::KNOWN
        .into_iter()
        .map(|language| Row {
            tag: language.tag().to_string(),
            label: language.label().into_owned(),
            icon: language.icon().class_name(),
            highlighted: highlighter.supports(language.grammar()),
        })
        .collect()
}

/// Print every known language tag with its label, icon and whether it is
/// colorized or always shown as plain text.
pub fn run() {
    let highlighter = SyntectHighlighter::new();

    println!("{:<12} {:<12} {:<10} OUTPUT", "TAG", "LABEL", "ICON");
    for row in rows(&highlighter) {
        let output = if row.highlighted { "highlighted" } else { "plain text" };
        println!("{:<12} {:<12} {:<10} {}", row.tag, row.label, row.icon, output);
    }
    println!("Other tags are shown uppercased with the code icon.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_languages_without_grammar_as_plain_text() {
        let rows = rows(&SyntectHighlighter::new());

        let output = |tag: &str| {
            rows.iter()
                .find(|row| row.tag == tag)
                .map(|row| row.highlighted)
                .unwrap()
        };

        assert_eq!(rows.len(), Language::KNOWN.len());
        assert!(output("csharp"));
        assert!(output("typescript"));
        assert!(!output("powershell"));
        assert!(!output("plaintext"));
    }
}
