//! Output for codedoc runs.
//!
//! - Document: YAML, written to a file or stdout
//! - Graph: JSON, written to a file or stdout
//! - Summary: colored terminal lines for humans, on stderr when the
//!   primary output goes to stdout

use colored::*;
use serde::Serialize;
use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::graph::{Graph, LinkKind};
use crate::structure::ProjectDocument;

/// Counts describing a finished document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DocumentSummary {
    pub files: usize,
    pub directories: usize,
    pub functions: usize,
    pub internal_imports: usize,
    pub external_imports: usize,
}

impl DocumentSummary {
    pub fn of(document: &ProjectDocument) -> Self {
        let (internal_imports, external_imports) = document.import_counts();
        Self {
            files: document.file_count(),
            directories: document.directory_count(),
            functions: document.function_count(),
            internal_imports,
            external_imports,
        }
    }
}

/// Counts describing a graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GraphSummary {
    pub nodes: usize,
    pub hierarchy_links: usize,
    pub dependency_links: usize,
}

impl GraphSummary {
    pub fn of(graph: &Graph) -> Self {
        let dependency_links = graph
            .links
            .iter()
            .filter(|l| l.kind == LinkKind::Dependency)
            .count();
        Self {
            nodes: graph.nodes.len(),
            hierarchy_links: graph.links.len() - dependency_links,
            dependency_links,
        }
    }
}

/// Write `content` to `path`, or to stdout when `path` is None.
pub fn emit(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            create_parent(path)?;
            fs::write(path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => print!("{}", content),
    }
    Ok(())
}

pub fn write_document(document: &ProjectDocument, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            create_parent(path)?;
            document.write(path)
        }
        None => emit(&document.to_yaml()?, None),
    }
}

pub fn write_graph(graph: &Graph, path: Option<&Path>, pretty: bool) -> anyhow::Result<()> {
    let mut json = graph.to_json(pretty)?;
    json.push('\n');
    emit(&json, path)
}

fn create_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Human-readable lines for a finished analysis.
pub fn render_document_summary(root: &str, output: Option<&Path>, summary: &DocumentSummary) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "  {} v{}",
        "codedoc".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    ));
    lines.push(String::new());
    lines.push(format!("  {}{}", "Analyzed: ".dimmed(), root));
    if let Some(output) = output {
        lines.push(format!("  {}{}", "Document: ".dimmed(), output.display()));
    }
    lines.push(String::new());
    lines.push(format!(
        "  {} files in {} directories, {} functions",
        count(summary.files),
        count(summary.directories),
        count(summary.functions)
    ));
    lines.push(format!(
        "  {} internal imports, {} external imports",
        count(summary.internal_imports),
        count(summary.external_imports)
    ));
    if summary.files == 0 {
        lines.push(format!("  {}", "no source files found".yellow()));
    }
    lines.join("\n")
}

/// Human-readable lines for a finished graph.
pub fn render_graph_summary(output: Option<&Path>, summary: &GraphSummary) -> String {
    let mut lines = Vec::new();
    if let Some(output) = output {
        lines.push(format!("  {}{}", "Graph: ".dimmed(), output.display()));
    }
    lines.push(format!(
        "  {} nodes, {} hierarchy links, {} dependency links",
        count(summary.nodes),
        count(summary.hierarchy_links),
        count(summary.dependency_links)
    ));
    lines.join("\n")
}

fn count(n: usize) -> ColoredString {
    if n == 0 {
        n.to_string().dimmed()
    } else {
        n.to_string().green().bold()
    }
}
