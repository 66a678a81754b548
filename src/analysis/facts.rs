//! Per-file records extracted from the syntax tree.
//!
//! Fields are always present in memory. Empty collections and `None`
//! values are dropped only when serialized, so a document never contains
//! `functions: []` or `description: null`.

use serde::{Deserialize, Serialize};

/// Everything recorded about one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    /// Base file name (e.g., "Button.tsx").
    pub name: String,
    /// Root-relative path with `/` separators.
    pub path: String,
    /// Cleaned text of the leading file comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_description: Option<String>,
    /// Module specifiers that refer to packages.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_imports: Vec<String>,
    /// Relative, root-absolute and alias specifiers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub internal_imports: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<FunctionInfo>,
}

impl FileInfo {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            ..Self::default()
        }
    }
}

/// A named function, arrow function or class method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionInfo {
    /// Never empty. Methods are named `Class.method`.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<ParamInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<ReturnInfo>,
}

/// A documented parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamInfo {
    pub name: String,
    /// Raw type annotation from the tag, not validated.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A documented return value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnInfo {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ReturnInfo {
    pub fn is_empty(&self) -> bool {
        self.type_name.is_none() && self.description.is_none()
    }
}
