//! Configuration for a codedoc run.
//!
//! Everything has a default, so a project without a config file behaves
//! exactly like one with an empty `codedoc.yaml`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names searched for at the project root.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["codedoc.yaml", ".codedoc.yaml"];

/// Default document file name written by `codedoc analyze`.
pub const DEFAULT_OUTPUT: &str = "code-document.yaml";

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Source extensions to analyze, in import-probing preference order.
    pub extensions: Vec<String>,
    /// Extra glob patterns excluded on top of the ignore file
    /// (e.g. "**/__generated__/**").
    pub excluded_paths: Vec<String>,
    /// Name of the ignore file read from the project root.
    pub ignore_file: String,
    /// Whether to read `ignore_file` at all.
    pub respect_ignore_file: bool,
    /// Import alias prefixes and the directories they stand for.
    pub aliases: Vec<PathAlias>,
    /// Document file name, relative to the project root.
    pub output: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extensions: vec![
                ".ts".to_string(),
                ".tsx".to_string(),
                ".js".to_string(),
                ".jsx".to_string(),
            ],
            excluded_paths: Vec::new(),
            ignore_file: ".gitignore".to_string(),
            respect_ignore_file: true,
            aliases: vec![PathAlias {
                prefix: "@/".to_string(),
                target: "src/".to_string(),
            }],
            output: DEFAULT_OUTPUT.to_string(),
        }
    }
}

/// An import alias such as `@/` standing for `src/`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct PathAlias {
    pub prefix: String,
    #[serde(default)]
    pub target: String,
}

impl PathAlias {
    /// Rewrite `specifier` if it starts with this alias.
    pub fn expand(&self, specifier: &str) -> Option<String> {
        specifier
            .strip_prefix(&self.prefix)
            .map(|rest| format!("{}{}", self.target, rest))
    }
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config for `root`.
    ///
    /// An explicit path must exist. Otherwise the default names are tried
    /// at the root and the built-in defaults are used if none is found.
    pub fn load(root: &Path, explicit: Option<&Path>) -> anyhow::Result<Self> {
        let config = match explicit {
            Some(path) => Self::parse_file(path)
                .map_err(|e| anyhow::anyhow!("reading config {}: {}", path.display(), e))?,
            None => match discover(root) {
                Some(path) => {
                    tracing::debug!(config = %path.display(), "using discovered config");
                    Self::parse_file(&path)
                        .map_err(|e| anyhow::anyhow!("reading config {}: {}", path.display(), e))?
                }
                None => Self::default(),
            },
        };
        validate(&config)?;
        Ok(config)
    }

    /// Whether a file name ends with one of the allowed extensions.
    pub fn has_allowed_extension(&self, name: &str) -> bool {
        self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }

    /// The first alias whose prefix starts `specifier`.
    pub fn alias_for(&self, specifier: &str) -> Option<&PathAlias> {
        self.aliases
            .iter()
            .find(|alias| specifier.starts_with(&alias.prefix))
    }
}

/// Find a config file at the project root.
pub fn discover(root: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}

/// Check a config for values the engine cannot work with.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    if config.extensions.is_empty() {
        anyhow::bail!("extensions must not be empty");
    }
    for ext in &config.extensions {
        if !ext.starts_with('.') || ext.len() < 2 {
            anyhow::bail!("extension {:?} must start with a dot", ext);
        }
    }
    for alias in &config.aliases {
        if alias.prefix.is_empty() {
            anyhow::bail!("alias prefix must not be empty");
        }
    }
    for pattern in &config.excluded_paths {
        globset::Glob::new(pattern)
            .map_err(|e| anyhow::anyhow!("invalid excluded path {:?}: {}", pattern, e))?;
    }
    if config.output.is_empty() {
        anyhow::bail!("output must not be empty");
    }
    Ok(())
}
