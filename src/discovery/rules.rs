//! Exclusion rules over root-relative paths.
//!
//! Rules come from three places: a fixed baseline of dependency, build
//! and VCS directories, the project's ignore file (gitignore syntax), and
//! the `excluded_paths` globs from the config.

use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::config::Config;
use crate::error::AnalysisError;

/// Patterns excluded regardless of any ignore file.
pub const ALWAYS_EXCLUDED: &[&str] = &["node_modules", "dist", "out", "build", ".git"];

/// Compiled exclusion predicate.
pub struct IgnoreMatcher {
    rules: Gitignore,
    excluded: GlobSet,
}

impl IgnoreMatcher {
    /// Build the matcher for `root`.
    ///
    /// A missing ignore file is the normal case and only logged at debug.
    /// Unreadable lines inside an existing ignore file are logged and
    /// skipped; the readable rules still apply.
    pub fn new(root: &Path, config: &Config) -> Result<Self, AnalysisError> {
        let mut builder = GitignoreBuilder::new(root);
        for pattern in ALWAYS_EXCLUDED {
            builder.add_line(None, pattern)?;
        }

        if config.respect_ignore_file {
            let ignore_path = root.join(&config.ignore_file);
            if ignore_path.is_file() {
                if let Some(err) = builder.add(&ignore_path) {
                    tracing::warn!(
                        file = %ignore_path.display(),
                        error = %err,
                        "some ignore rules could not be loaded"
                    );
                }
            } else {
                tracing::debug!(file = %ignore_path.display(), "no ignore file");
            }
        }

        let rules = builder.build()?;
        let excluded = compile_globs(&config.excluded_paths)?;

        tracing::debug!(
            rules = rules.num_ignores(),
            globs = config.excluded_paths.len(),
            "ignore matcher ready"
        );

        Ok(Self { rules, excluded })
    }

    /// Whether a root-relative, forward-slash path is excluded.
    ///
    /// A path is excluded when it or any of its parent directories matches.
    /// The root itself (empty path) is never excluded.
    pub fn is_excluded(&self, relative: &str, is_dir: bool) -> bool {
        if relative.is_empty() {
            return false;
        }
        if self
            .rules
            .matched_path_or_any_parents(Path::new(relative), is_dir)
            .is_ignore()
        {
            return true;
        }
        self.excluded.is_match(relative)
    }
}

fn compile_globs(patterns: &[String]) -> Result<GlobSet, AnalysisError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
