//! Core traits for language analysis.

use std::path::Path;

use tree_sitter::Language;

use super::FileInfo;
use crate::config::Config;

/// Holds a parsed tree-sitter tree and associated metadata.
pub struct ParsedFile {
    /// The tree-sitter parse tree.
    pub tree: tree_sitter::Tree,
    /// The grammar the tree was parsed with (needed to compile queries).
    pub language: Language,
    /// The original source code (kept for node text extraction).
    pub source: Vec<u8>,
    /// Root-relative path with `/` separators.
    pub path: String,
}

impl ParsedFile {
    /// Get text for a tree-sitter node.
    pub fn node_text(&self, node: tree_sitter::Node) -> &str {
        node.utf8_text(&self.source).unwrap_or("")
    }
}

/// Language-specific analyzer trait.
///
/// Implementations differ only in the grammar they parse with; extraction
/// is shared because the TypeScript and JavaScript grammars use the same
/// node kinds for everything recorded here.
///
/// # Thread Safety
///
/// tree_sitter::Parser is not Sync, so implementations create a parser
/// per call.
pub trait LanguageAnalyzer: Send + Sync {
    /// Returns the language identifier (e.g., "typescript").
    fn language_id(&self) -> &'static str;

    /// Returns file extensions this analyzer handles (without dot).
    fn file_extensions(&self) -> &'static [&'static str];

    /// The grammar to use for a file with the given extension.
    fn grammar(&self, ext: &str) -> Language;

    /// Parse a source file into a tree-sitter tree.
    ///
    /// Syntax errors do not fail the parse; they show up as ERROR nodes
    /// and extraction works on whatever parsed cleanly.
    fn parse(&self, path: &str, source: &[u8]) -> anyhow::Result<ParsedFile> {
        let ext = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        let language = self.grammar(ext);

        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&language)?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("failed to parse {} source: {}", self.language_id(), path))?;

        if tree.root_node().has_error() {
            tracing::debug!(file = path, "parsed with syntax errors");
        }

        Ok(ParsedFile {
            tree,
            language,
            source: source.to_vec(),
            path: path.to_string(),
        })
    }

    /// Extract the file record from a parsed file.
    fn extract(&self, parsed: &ParsedFile, config: &Config) -> anyhow::Result<FileInfo> {
        super::extract_file_info(parsed, config)
    }

    /// Check if this analyzer handles the given file extension.
    fn handles_extension(&self, ext: &str) -> bool {
        self.file_extensions().contains(&ext)
    }
}
