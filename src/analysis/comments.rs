//! Leading file documentation.

use super::ParsedFile;

/// Directive strings that mark a comment as a framework pragma rather
/// than documentation.
const DIRECTIVE_MARKERS: &[&str] = &["use client", "use server"];

/// The cleaned text of the comments before the first top-level statement.
///
/// Returns None when the file has no statement, no leading comment, or
/// only pragma comments.
pub fn file_description(parsed: &ParsedFile) -> Option<String> {
    let root = parsed.tree.root_node();
    let mut cursor = root.walk();

    let mut comments = Vec::new();
    let mut has_statement = false;
    for child in root.named_children(&mut cursor) {
        match child.kind() {
            "comment" => comments.push(parsed.node_text(child)),
            "hash_bang_line" => continue,
            _ => {
                has_statement = true;
                break;
            }
        }
    }

    if !has_statement {
        return None;
    }

    let cleaned: Vec<String> = comments
        .into_iter()
        .filter(|raw| !is_directive(raw))
        .map(clean_comment)
        .filter(|text| !text.is_empty())
        .collect();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.join("\n"))
    }
}

/// Whether a raw comment mentions a client/server directive.
pub fn is_directive(raw: &str) -> bool {
    DIRECTIVE_MARKERS.iter().any(|marker| raw.contains(marker))
}

/// Strip comment delimiters and leading markers, drop blank lines.
pub fn clean_comment(raw: &str) -> String {
    let body = raw
        .trim()
        .trim_start_matches("/**")
        .trim_start_matches("/*")
        .trim_end_matches("*/");

    body.lines()
        .map(|line| {
            let line = line.trim();
            let line = line.trim_start_matches("//");
            let line = line.trim_start_matches('*');
            line.trim()
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
