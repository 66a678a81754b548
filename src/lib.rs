//! codedoc - structural documentation for TypeScript/JavaScript projects.
//!
//! codedoc walks a project directory, parses every source file with
//! tree-sitter and records what it finds: the leading file comment, the
//! imports (split into internal and external), and the top-level
//! functions with their JSDoc descriptions, parameters and return values.
//! The result is a YAML document mirroring the directory tree, which can
//! be turned into a node/link graph for visualization.
//!
//! # Architecture
//!
//! - `discovery`: ignore rules and the deterministic tree walk
//! - `analysis`: per-file extraction with language analyzers
//! - `structure`: the hierarchical project document
//! - `graph`: nodes, hierarchy links and resolved dependency links
//! - `pipeline`: the end-to-end run, sync and async
//! - `config`: YAML configuration
//! - `report`: output writers and terminal summaries
//!
//! # Example
//!
//! ```no_run
//! use codedoc::{Analyzer, Config};
//!
//! let analyzer = Analyzer::new("./webapp", Config::default())?;
//! let document = analyzer.analyze()?;
//! let graph = analyzer.graph(&document);
//! println!("{} nodes", graph.nodes.len());
//! # Ok::<(), codedoc::AnalysisError>(())
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod graph;
pub mod pipeline;
pub mod report;
pub mod structure;

pub use analysis::{
    analyze_file, get_analyzer, FileInfo, FunctionInfo, JavaScriptAnalyzer, LanguageAnalyzer,
    ParamInfo, ReturnInfo, TypeScriptAnalyzer,
};
pub use config::Config;
pub use discovery::{find_source_files, IgnoreMatcher};
pub use error::AnalysisError;
pub use graph::{Graph, GraphLink, GraphNode, GraphResolver, LinkKind, LinkTarget};
pub use pipeline::{analyze_async, Analyzer};
pub use structure::{DirectoryNode, ProjectDocument};
