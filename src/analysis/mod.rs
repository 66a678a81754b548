//! AST-backed analysis of a single source file.
//!
//! Each file is parsed with tree-sitter and reduced to a [`FileInfo`]:
//! its leading description, its imports split into internal and external,
//! and an inventory of its top-level functions with their documentation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────┐     ┌───────────────┐
//! │ Source File     │────▶│ Analyzer     │────▶│ FileInfo      │
//! └─────────────────┘     │ (TS, JS)     │     │ (description, │
//!                         └──────────────┘     │  imports,     │
//!                                              │  functions)   │
//!                                              └───────────────┘
//! ```
//!
//! # Adding a New Language
//!
//! 1. Create a new module in `src/analysis/languages/`
//! 2. Implement `LanguageAnalyzer` trait
//! 3. Register the analyzer in `languages/mod.rs`

mod comments;
mod facts;
mod functions;
mod imports;
mod jsdoc;
mod languages;
mod traits;

use std::fs;
use std::path::Path;

use anyhow::Context;

pub use comments::{clean_comment, file_description};
pub use facts::{FileInfo, FunctionInfo, ParamInfo, ReturnInfo};
pub use functions::extract_functions;
pub use imports::{classify, extract_imports, ImportKind};
pub use jsdoc::{parse_doc_comment, DocComment, DocTag};
pub use languages::{get_analyzer, JavaScriptAnalyzer, TypeScriptAnalyzer};
pub use traits::{LanguageAnalyzer, ParsedFile};

use crate::config::Config;

/// Build the record for an already parsed file.
pub fn extract_file_info(parsed: &ParsedFile, config: &Config) -> anyhow::Result<FileInfo> {
    let name = parsed
        .path
        .rsplit('/')
        .next()
        .unwrap_or(parsed.path.as_str())
        .to_string();

    let mut info = FileInfo::new(name, parsed.path.clone());
    info.file_description = file_description(parsed);

    let (internal, external) = extract_imports(parsed, config)?;
    info.internal_imports = internal;
    info.external_imports = external;
    info.functions = extract_functions(parsed);

    Ok(info)
}

/// Read, parse and extract one file.
///
/// `relative` is the root-relative path (with `/` separators) recorded in
/// the result. Fails when the file cannot be read as UTF-8 or no analyzer
/// handles its extension.
pub fn analyze_file(path: &Path, relative: &str, config: &Config) -> anyhow::Result<FileInfo> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let analyzer = get_analyzer(ext)
        .ok_or_else(|| anyhow::anyhow!("no analyzer for extension '{}': {}", ext, relative))?;

    let parsed = analyzer.parse(relative, source.as_bytes())?;
    analyzer.extract(&parsed, config)
}
