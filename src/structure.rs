//! The hierarchical project document.
//!
//! Files are folded into a directory tree by their root-relative path.
//! After all files are inserted, [`ProjectDocument::prune`] removes every
//! directory that ended up without files or subdirectories.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::analysis::FileInfo;

/// A directory and everything found beneath it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryNode {
    pub name: String,
    /// Absolute root path. Set on the root only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileInfo>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub directories: BTreeMap<String, DirectoryNode>,
}

impl DirectoryNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.directories.is_empty()
    }

    /// Drop empty subdirectories, deepest first.
    fn prune_children(&mut self) {
        for child in self.directories.values_mut() {
            child.prune_children();
        }
        self.directories.retain(|_, child| !child.is_empty());
    }

    /// Visit this directory and all descendants, parents first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a DirectoryNode)) {
        visit(self);
        for child in self.directories.values() {
            child.walk(visit);
        }
    }
}

/// The serialized form of an analysis run: `{ root: DirectoryNode }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDocument {
    pub root: DirectoryNode,
}

impl ProjectDocument {
    /// An empty document for the given absolute root.
    pub fn new(root: &Path) -> Self {
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());

        Self {
            root: DirectoryNode {
                name,
                path: Some(root.display().to_string()),
                ..DirectoryNode::default()
            },
        }
    }

    /// Place a file under its parent directories, creating them on demand.
    ///
    /// `relative` uses `/` separators; its last segment is the file name.
    pub fn insert(&mut self, relative: &str, file: FileInfo) {
        let mut segments: Vec<&str> = relative.split('/').filter(|s| !s.is_empty()).collect();
        segments.pop();

        let mut node = &mut self.root;
        for segment in segments {
            node = node
                .directories
                .entry(segment.to_string())
                .or_insert_with(|| DirectoryNode::new(segment));
        }
        node.files.push(file);
    }

    /// Remove every directory without files or subdirectories.
    /// The root is always kept.
    pub fn prune(&mut self) {
        self.root.prune_children();
    }

    /// Every file in the document, in traversal order.
    pub fn files(&self) -> Vec<&FileInfo> {
        let mut files = Vec::new();
        self.root.walk(&mut |dir| files.extend(dir.files.iter()));
        files
    }

    pub fn file_count(&self) -> usize {
        self.files().len()
    }

    /// Number of directories below the root.
    pub fn directory_count(&self) -> usize {
        let mut count = 0;
        self.root.walk(&mut |_| count += 1);
        count - 1
    }

    pub fn function_count(&self) -> usize {
        self.files().iter().map(|f| f.functions.len()).sum()
    }

    /// (internal, external) import counts across all files.
    pub fn import_counts(&self) -> (usize, usize) {
        self.files().iter().fold((0, 0), |(internal, external), f| {
            (
                internal + f.internal_imports.len(),
                external + f.external_imports.len(),
            )
        })
    }

    pub fn to_yaml(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Read a document previously written by [`ProjectDocument::write`].
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read document {}", path.display()))?;
        let document = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse document {}", path.display()))?;
        Ok(document)
    }

    pub fn write(&self, path: &Path) -> anyhow::Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path, yaml)
            .with_context(|| format!("failed to write document {}", path.display()))?;
        Ok(())
    }
}
