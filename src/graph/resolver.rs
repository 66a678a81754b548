//! Graph construction and import resolution.
//!
//! Resolution is two folds over the same node sequence:
//!
//! 1. `traverse` visits the tree pre-order, directories before files,
//!    assigning ids and recording each node's path. Imports that match a
//!    path already seen become resolved links; the rest stay pending.
//! 2. `finalize` matches pending links against the full path table once
//!    and drops whatever is still unmatched.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use super::{Graph, GraphLink, GraphNode, LinkKind, LinkTarget};
use crate::analysis::FileInfo;
use crate::config::Config;
use crate::structure::{DirectoryNode, ProjectDocument};

/// Builds a [`Graph`] from a project document.
pub struct GraphResolver<'a> {
    config: &'a Config,
    /// Project root on disk, used to probe extensions of imports that
    /// have not been visited yet.
    root: Option<PathBuf>,
    /// Root-relative path of every visited node except the root.
    known: HashMap<String, usize>,
    nodes: Vec<GraphNode>,
    links: Vec<GraphLink>,
}

impl<'a> GraphResolver<'a> {
    pub fn new(config: &'a Config, root: Option<&Path>) -> Self {
        Self {
            config,
            root: root.map(Path::to_path_buf),
            known: HashMap::new(),
            nodes: Vec::new(),
            links: Vec::new(),
        }
    }

    pub fn resolve(mut self, document: &ProjectDocument) -> Graph {
        self.traverse_directory(&document.root, "", 0, None);
        self.finalize()
    }

    fn add_node(&mut self, node: GraphNode, path: String, parent: Option<usize>) -> usize {
        let id = node.id;
        self.nodes.push(node);
        if !path.is_empty() {
            self.known.insert(path, id);
        }
        if let Some(parent) = parent {
            self.links.push(GraphLink::hierarchy(parent, id));
        }
        id
    }

    fn traverse_directory(
        &mut self,
        dir: &DirectoryNode,
        path: &str,
        depth: usize,
        parent: Option<usize>,
    ) {
        let node = GraphNode {
            id: self.nodes.len(),
            name: dir.name.clone(),
            is_directory: true,
            depth,
            description: None,
            functions: None,
        };
        let id = self.add_node(node, path.to_string(), parent);

        for (name, child) in &dir.directories {
            let child_path = join(path, name);
            self.traverse_directory(child, &child_path, depth + 1, Some(id));
        }

        for file in &dir.files {
            self.traverse_file(file, depth + 1, id);
        }
    }

    fn traverse_file(&mut self, file: &FileInfo, depth: usize, parent: usize) {
        let node = GraphNode {
            id: self.nodes.len(),
            name: file.name.clone(),
            is_directory: false,
            depth,
            description: file.file_description.clone(),
            functions: (!file.functions.is_empty()).then_some(file.functions.len()),
        };
        let id = self.add_node(node, file.path.clone(), Some(parent));

        for specifier in &file.internal_imports {
            let Some(candidate) = self.resolve_specifier(&file.path, specifier) else {
                tracing::debug!(file = %file.path, import = %specifier, "import does not name a path under the root");
                continue;
            };
            let link = match self.known.get(&candidate) {
                Some(&target) => GraphLink {
                    source: id,
                    target: LinkTarget::Node(target),
                    kind: LinkKind::Dependency,
                    is_resolved: Some(true),
                },
                None => GraphLink {
                    source: id,
                    target: LinkTarget::Pending(candidate),
                    kind: LinkKind::Dependency,
                    is_resolved: Some(false),
                },
            };
            self.links.push(link);
        }
    }

    /// Resolve pending links against the complete path table and drop
    /// the ones that still do not match.
    ///
    /// A pending path matches a node with the same path, or, failing that,
    /// with one of the allowed extensions appended.
    fn finalize(self) -> Graph {
        let GraphResolver {
            config,
            known,
            nodes,
            links,
            ..
        } = self;
        let lookup = |path: &str| {
            known.get(path).copied().or_else(|| {
                config
                    .extensions
                    .iter()
                    .find_map(|ext| known.get(&format!("{}{}", path, ext)).copied())
            })
        };

        let links = links
            .into_iter()
            .filter_map(|link| match &link.target {
                LinkTarget::Pending(path) => match lookup(path) {
                    Some(target) => Some(GraphLink {
                        target: LinkTarget::Node(target),
                        is_resolved: Some(true),
                        ..link
                    }),
                    None => {
                        tracing::debug!(source = link.source, target = %path, "dropping unresolved import");
                        None
                    }
                },
                LinkTarget::Node(_) => Some(link),
            })
            .collect();

        Graph { nodes, links }
    }

    /// The root-relative path an internal import most likely refers to.
    ///
    /// Returns None if the specifier climbs above the root or names the
    /// root itself.
    pub fn resolve_specifier(&self, importer: &str, specifier: &str) -> Option<String> {
        let joined = if specifier.starts_with('.') {
            let dir = importer.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("");
            join(dir, specifier)
        } else if let Some(alias) = self.config.alias_for(specifier) {
            alias.expand(specifier).unwrap_or_else(|| specifier.to_string())
        } else {
            specifier.trim_start_matches('/').to_string()
        };

        let candidate = normalize(&joined).filter(|c| !c.is_empty())?;
        if self.config.has_allowed_extension(&candidate) {
            return Some(candidate);
        }

        let probed = self.config.extensions.iter().find_map(|ext| {
            let with_ext = format!("{}{}", candidate, ext);
            self.exists(&with_ext).then_some(with_ext)
        });
        Some(probed.unwrap_or(candidate))
    }

    fn exists(&self, relative: &str) -> bool {
        self.known.contains_key(relative)
            || self
                .root
                .as_ref()
                .map(|root| root.join(relative).is_file())
                .unwrap_or(false)
    }
}

/// Collapse `.` and `..` segments and render with `/` separators.
///
/// Returns None for paths that leave the root.
pub fn normalize(path: &str) -> Option<String> {
    let cleaned = path_clean::clean(Path::new(path));
    let mut segments = Vec::new();
    for component in cleaned.components() {
        match component {
            Component::Normal(segment) => segments.push(segment.to_string_lossy().into_owned()),
            Component::CurDir => {}
            Component::ParentDir => return None,
            Component::RootDir | Component::Prefix(_) => {}
        }
    }
    Some(segments.join("/"))
}

fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::FunctionInfo;
    use std::fs;
    use tempfile::TempDir;

    fn file(path: &str, imports: &[&str]) -> FileInfo {
        let mut info = FileInfo::new(path.rsplit('/').next().unwrap(), path);
        info.internal_imports = imports.iter().map(|s| s.to_string()).collect();
        info
    }

    fn document(files: Vec<FileInfo>) -> ProjectDocument {
        let mut doc = ProjectDocument::new(Path::new("/nonexistent/project"));
        for f in files {
            let path = f.path.clone();
            doc.insert(&path, f);
        }
        doc.prune();
        doc
    }

    fn graph(files: Vec<FileInfo>) -> Graph {
        let config = Config::default();
        let doc = document(files);
        GraphResolver::new(&config, None).resolve(&doc)
    }

    fn node_id(graph: &Graph, name: &str) -> usize {
        graph.nodes.iter().find(|n| n.name == name).unwrap().id
    }

    fn dependencies(graph: &Graph) -> Vec<(usize, LinkTarget)> {
        graph
            .dependency_links()
            .map(|l| (l.source, l.target.clone()))
            .collect()
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("src/./a/../b").as_deref(), Some("src/b"));
        assert_eq!(normalize("./x").as_deref(), Some("x"));
        assert_eq!(normalize("src/ui/../../lib").as_deref(), Some("lib"));
        assert_eq!(normalize("../outside"), None);
    }

    #[test]
    fn test_sibling_import_resolves() {
        let g = graph(vec![file("src/a.ts", &["./b"]), file("src/b.ts", &[])]);

        assert_eq!(g.nodes.len(), 4);
        assert_eq!(g.nodes[0].id, 0);
        assert_eq!(g.nodes[0].name, "project");
        assert_eq!(g.nodes[0].depth, 0);
        assert!(g.nodes[1].is_directory);
        assert_eq!(g.nodes[1].name, "src");

        let hierarchy: Vec<_> = g
            .links
            .iter()
            .filter(|l| l.kind == LinkKind::Hierarchy)
            .collect();
        assert_eq!(hierarchy.len(), 3);
        assert!(hierarchy.iter().all(|l| l.is_resolved.is_none()));

        let a = node_id(&g, "a.ts");
        let b = node_id(&g, "b.ts");
        assert_eq!(dependencies(&g), vec![(a, LinkTarget::Node(b))]);
        assert_eq!(g.dependency_links().next().unwrap().is_resolved, Some(true));
    }

    #[test]
    fn test_missing_import_dropped() {
        let g = graph(vec![file("src/a.ts", &["./missing"])]);
        assert_eq!(g.dependency_links().count(), 0);
    }

    #[test]
    fn test_forward_reference_resolved_in_final_sweep() {
        // "lib" is visited after "app", so the import is pending during the
        // traversal.
        let g = graph(vec![
            file("src/app/main.ts", &["../lib/util.ts"]),
            file("src/lib/util.ts", &[]),
        ]);
        let main = node_id(&g, "main.ts");
        let util = node_id(&g, "util.ts");
        assert!(main < util);
        assert_eq!(dependencies(&g), vec![(main, LinkTarget::Node(util))]);
    }

    #[test]
    fn test_forward_reference_without_extension() {
        let g = graph(vec![
            file("src/app/main.ts", &["../lib/util"]),
            file("src/lib/util.ts", &[]),
        ]);
        let main = node_id(&g, "main.ts");
        let util = node_id(&g, "util.ts");
        assert_eq!(dependencies(&g), vec![(main, LinkTarget::Node(util))]);
    }

    #[test]
    fn test_forward_reference_probed_on_disk() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src/lib")).unwrap();
        fs::write(dir.path().join("src/lib/util.ts"), "").unwrap();

        let config = Config::default();
        let mut doc = ProjectDocument::new(dir.path());
        doc.insert("src/app/main.ts", file("src/app/main.ts", &["../lib/util"]));
        doc.insert("src/lib/util.ts", file("src/lib/util.ts", &[]));

        let g = GraphResolver::new(&config, Some(dir.path())).resolve(&doc);
        let main = node_id(&g, "main.ts");
        let util = node_id(&g, "util.ts");
        assert_eq!(dependencies(&g), vec![(main, LinkTarget::Node(util))]);
    }

    #[test]
    fn test_alias_and_root_absolute_imports() {
        let g = graph(vec![
            file("src/config.ts", &[]),
            file("src/home.tsx", &["@/config", "/src/config"]),
        ]);
        let config = node_id(&g, "config.ts");
        let home = node_id(&g, "home.tsx");
        assert_eq!(
            dependencies(&g),
            vec![(home, LinkTarget::Node(config)), (home, LinkTarget::Node(config))]
        );
    }

    #[test]
    fn test_extension_preference_order() {
        let g = graph(vec![
            file("src/button.js", &[]),
            file("src/button.tsx", &[]),
            file("src/a.ts", &["./button"]),
        ]);
        let a = node_id(&g, "a.ts");
        let tsx = node_id(&g, "button.tsx");
        assert_eq!(dependencies(&g), vec![(a, LinkTarget::Node(tsx))]);
    }

    #[test]
    fn test_directories_before_files() {
        let g = graph(vec![file("index.ts", &[]), file("src/a.ts", &[])]);
        let names: Vec<&str> = g.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["project", "src", "a.ts", "index.ts"]);
        assert_eq!(g.nodes[2].depth, 2);
        assert_eq!(g.nodes[3].depth, 1);
    }

    #[test]
    fn test_file_node_details() {
        let mut info = file("a.ts", &[]);
        info.file_description = Some("Entry.".into());
        info.functions = vec![FunctionInfo {
            name: "main".into(),
            ..FunctionInfo::default()
        }];
        let g = graph(vec![info, file("b.ts", &[])]);

        assert_eq!(g.nodes[1].description.as_deref(), Some("Entry."));
        assert_eq!(g.nodes[1].functions, Some(1));
        assert_eq!(g.nodes[2].functions, None);
        assert!(!g.nodes[1].is_directory);
    }

    #[test]
    fn test_import_above_root_dropped() {
        let g = graph(vec![file("a.ts", &["../../elsewhere"])]);
        assert_eq!(g.dependency_links().count(), 0);
    }

    #[test]
    fn test_import_of_root_dropped() {
        let g = graph(vec![file("src/a.ts", &[".."]), file("b.ts", &["."])]);
        assert_eq!(g.dependency_links().count(), 0);
    }

    #[test]
    fn test_deterministic() {
        let files = || {
            vec![
                file("src/a.ts", &["./b", "../lib/c"]),
                file("src/b.ts", &["./a"]),
                file("lib/c.ts", &["../src/b"]),
            ]
        };
        assert_eq!(graph(files()), graph(files()));
    }

    #[test]
    fn test_ids_are_dense() {
        let g = graph(vec![file("x/y/z.ts", &[]), file("x/w.ts", &[])]);
        for (index, node) in g.nodes.iter().enumerate() {
            assert_eq!(node.id, index);
        }
    }
}
