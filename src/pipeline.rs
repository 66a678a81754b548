//! Analysis run that ties discovery, analysis and graph building together.

use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::analyze_file;
use crate::config::Config;
use crate::discovery::{find_source_files, relative_path, IgnoreMatcher};
use crate::error::AnalysisError;
use crate::graph::Graph;
use crate::structure::ProjectDocument;

/// Runs the pipeline for one project root.
pub struct Analyzer {
    root: PathBuf,
    config: Config,
}

impl Analyzer {
    /// Create an analyzer for `root`, which must be an existing, readable
    /// directory.
    pub fn new<P: AsRef<Path>>(root: P, config: Config) -> Result<Self, AnalysisError> {
        let root = root.as_ref();
        if !root.exists() {
            return Err(AnalysisError::RootNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(AnalysisError::NotADirectory(root.to_path_buf()));
        }
        fs::read_dir(root).map_err(|e| AnalysisError::io(root, e))?;
        let root = root
            .canonicalize()
            .map_err(|e| AnalysisError::io(root, e))?;

        Ok(Self { root, config })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Source files to analyze, in walk order.
    pub fn discover(&self) -> Result<Vec<PathBuf>, AnalysisError> {
        let matcher = IgnoreMatcher::new(&self.root, &self.config)?;
        let files = find_source_files(&self.root, &matcher, &self.config);
        tracing::debug!(root = %self.root.display(), count = files.len(), "discovered source files");
        Ok(files)
    }

    /// Analyze every discovered file into a pruned document.
    ///
    /// Files that cannot be read or parsed are logged and left out.
    pub fn analyze(&self) -> Result<ProjectDocument, AnalysisError> {
        let files = self.discover()?;
        let mut document = ProjectDocument::new(&self.root);

        for path in &files {
            let Some(relative) = relative_path(&self.root, path) else {
                continue;
            };
            match analyze_file(path, &relative, &self.config) {
                Ok(info) => document.insert(&relative, info),
                Err(e) => tracing::warn!(file = %relative, error = %e, "skipping file"),
            }
        }

        document.prune();
        tracing::info!(
            files = document.file_count(),
            functions = document.function_count(),
            "analysis complete"
        );
        Ok(document)
    }

    /// Build the graph for a document produced from this root.
    pub fn graph(&self, document: &ProjectDocument) -> Graph {
        Graph::from_document(document, &self.config)
    }
}

/// Run [`Analyzer::analyze`] on a blocking task.
pub async fn analyze_async(root: PathBuf, config: Config) -> Result<ProjectDocument, AnalysisError> {
    tokio::task::spawn_blocking(move || Analyzer::new(root, config)?.analyze())
        .await
        .map_err(|e| AnalysisError::Task(e.to_string()))?
}
