//! Import declarations and their classification.

use streaming_iterator::StreamingIterator;
use tree_sitter::{Query, QueryCursor};

use super::ParsedFile;
use crate::config::Config;

/// Tree-sitter query for the module specifier of `import` declarations.
///
/// Covers default, named, namespace, type-only and side-effect imports.
/// `require()` calls and re-exports are not import declarations and are
/// not captured.
const IMPORT_QUERY: &str = r#"
(import_statement
  source: (string) @import_source
)
"#;

/// Whether a specifier points into the project or at a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// Relative (`./x`, `../x`), root-absolute (`/x`) or alias-rooted.
    Internal,
    /// Anything else, i.e. a package name.
    External,
}

/// Classify a module specifier.
pub fn classify(specifier: &str, config: &Config) -> ImportKind {
    if specifier.starts_with('.')
        || specifier.starts_with('/')
        || config.alias_for(specifier).is_some()
    {
        ImportKind::Internal
    } else {
        ImportKind::External
    }
}

/// Module specifiers of every import declaration, in source order.
/// Duplicates are kept.
pub fn extract_specifiers(parsed: &ParsedFile) -> anyhow::Result<Vec<String>> {
    let query = Query::new(&parsed.language, IMPORT_QUERY)?;
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, parsed.tree.root_node(), &parsed.source[..]);

    let mut specifiers = Vec::new();
    while let Some(m) = matches.next() {
        for capture in m.captures {
            let raw = parsed.node_text(capture.node);
            let specifier = raw.trim_matches(|c| c == '"' || c == '\'');
            if !specifier.is_empty() {
                specifiers.push(specifier.to_string());
            }
        }
    }

    Ok(specifiers)
}

/// Split a file's import specifiers into (internal, external).
pub fn extract_imports(
    parsed: &ParsedFile,
    config: &Config,
) -> anyhow::Result<(Vec<String>, Vec<String>)> {
    let mut internal = Vec::new();
    let mut external = Vec::new();

    for specifier in extract_specifiers(parsed)? {
        match classify(&specifier, config) {
            ImportKind::Internal => internal.push(specifier),
            ImportKind::External => external.push(specifier),
        }
    }

    Ok((internal, external))
}
