//! Depth-first walk collecting candidate source files.

use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use super::IgnoreMatcher;
use crate::config::Config;

/// Collect files under `root` that have an allowed extension and are not
/// excluded.
///
/// Excluded directories are pruned before they are read, so nothing under
/// them is ever enumerated. Entries that cannot be read are logged and
/// skipped together with their subtree. The result is in depth-first,
/// file-name order.
pub fn find_source_files(root: &Path, matcher: &IgnoreMatcher, config: &Config) -> Vec<PathBuf> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            match relative_path(root, entry.path()) {
                Some(rel) => !matcher.is_excluded(&rel, entry.file_type().is_dir()),
                None => false,
            }
        });

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(
                    path = ?err.path(),
                    error = %err,
                    "skipping unreadable entry"
                );
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if config.has_allowed_extension(&name) {
            files.push(entry.into_path());
        }
    }

    tracing::debug!(root = %root.display(), files = files.len(), "walk finished");
    files
}

/// Root-relative path of `path` with `/` separators.
///
/// Returns None if `path` is not under `root`.
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let segments: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    Some(segments.join("/"))
}
