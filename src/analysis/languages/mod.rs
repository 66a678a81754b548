//! Language-specific analyzer implementations.

mod javascript;
mod typescript;

pub use javascript::JavaScriptAnalyzer;
pub use typescript::TypeScriptAnalyzer;

use super::LanguageAnalyzer;
use once_cell::sync::OnceCell;

/// Static storage for JavaScript analyzer.
static JAVASCRIPT_ANALYZER: OnceCell<JavaScriptAnalyzer> = OnceCell::new();

/// Static storage for TypeScript analyzer.
static TYPESCRIPT_ANALYZER: OnceCell<TypeScriptAnalyzer> = OnceCell::new();

/// Get an analyzer for the given file extension (without dot).
///
/// Returns None if no analyzer handles the extension.
pub fn get_analyzer(ext: &str) -> Option<&'static dyn LanguageAnalyzer> {
    let javascript = JAVASCRIPT_ANALYZER.get_or_init(JavaScriptAnalyzer::new);
    if javascript.handles_extension(ext) {
        return Some(javascript as &'static dyn LanguageAnalyzer);
    }

    let typescript = TYPESCRIPT_ANALYZER.get_or_init(TypeScriptAnalyzer::new);
    if typescript.handles_extension(ext) {
        return Some(typescript as &'static dyn LanguageAnalyzer);
    }

    None
}
