//! Errors that abort an analysis run.
//!
//! Only environment problems surface here. Per-file failures are logged
//! and skipped by the pipeline, and unresolved imports are not errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur before or around an analysis run.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("root directory not found: {0}")]
    RootNotFound(PathBuf),
    #[error("root is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid ignore rules: {0}")]
    Ignore(#[from] ignore::Error),
    #[error("invalid exclude pattern: {0}")]
    Glob(#[from] globset::Error),
    #[error("analysis task failed: {0}")]
    Task(String),
}

impl AnalysisError {
    /// Wrap an I/O error with the path that produced it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnalysisError::Io {
            path: path.into(),
            source,
        }
    }
}
