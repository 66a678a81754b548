//! Node/link graph derived from a project document.
//!
//! Every directory and file becomes a node. Parents link to their
//! children (`hierarchy`), and files link to the files their internal
//! imports resolve to (`dependency`).

mod resolver;

pub use resolver::{normalize, GraphResolver};

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::structure::ProjectDocument;

/// One directory or file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    /// Dense index in visitation order. The root is 0.
    pub id: usize,
    pub name: String,
    pub is_directory: bool,
    /// Distance from the root.
    pub depth: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Number of functions in a file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functions: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Hierarchy,
    Dependency,
}

/// Where a link points: a node id, or a path still waiting to be
/// matched against the nodes seen so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkTarget {
    Node(usize),
    Pending(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphLink {
    pub source: usize,
    pub target: LinkTarget,
    #[serde(rename = "type")]
    pub kind: LinkKind,
    /// Set on dependency links only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_resolved: Option<bool>,
}

impl GraphLink {
    pub fn hierarchy(parent: usize, child: usize) -> Self {
        Self {
            source: parent,
            target: LinkTarget::Node(child),
            kind: LinkKind::Hierarchy,
            is_resolved: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl Graph {
    /// Build the graph for a finished document.
    pub fn from_document(document: &ProjectDocument, config: &Config) -> Self {
        GraphResolver::new(config, document.root.path.as_deref().map(std::path::Path::new))
            .resolve(document)
    }

    pub fn dependency_links(&self) -> impl Iterator<Item = &GraphLink> {
        self.links
            .iter()
            .filter(|link| link.kind == LinkKind::Dependency)
    }

    pub fn to_json(&self, pretty: bool) -> anyhow::Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}
