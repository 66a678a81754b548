//! TypeScript language analyzer using tree-sitter.

use tree_sitter::Language;

use crate::analysis::LanguageAnalyzer;

/// Analyzer for `.ts`, `.mts`, `.cts` (TypeScript grammar) and `.tsx`
/// (TSX grammar).
pub struct TypeScriptAnalyzer {
    typescript: Language,
    tsx: Language,
}

impl TypeScriptAnalyzer {
    pub fn new() -> Self {
        Self {
            typescript: tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            tsx: tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

impl Default for TypeScriptAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAnalyzer for TypeScriptAnalyzer {
    fn language_id(&self) -> &'static str {
        "typescript"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["ts", "tsx", "mts", "cts"]
    }

    fn grammar(&self, ext: &str) -> Language {
        match ext {
            "tsx" => self.tsx.clone(),
            _ => self.typescript.clone(),
        }
    }
}
