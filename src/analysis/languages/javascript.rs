//! JavaScript language analyzer using tree-sitter.

use tree_sitter::Language;

use crate::analysis::LanguageAnalyzer;

/// Analyzer for `.js`, `.jsx`, `.mjs` and `.cjs`. The JavaScript grammar
/// accepts JSX, so one grammar covers all four.
pub struct JavaScriptAnalyzer {
    language: Language,
}

impl JavaScriptAnalyzer {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_javascript::LANGUAGE.into(),
        }
    }
}

impl Default for JavaScriptAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAnalyzer for JavaScriptAnalyzer {
    fn language_id(&self) -> &'static str {
        "javascript"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["js", "jsx", "mjs", "cjs"]
    }

    fn grammar(&self, _ext: &str) -> Language {
        self.language.clone()
    }
}
