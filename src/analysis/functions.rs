//! Function inventory.
//!
//! Three source shapes are recognized and funnel through one routine:
//!
//! ```text
//! function load() {}              -> Declaration        "load"
//! const save = () => {}           -> Bound              "save"
//! class Cache { clear() {} }      -> Method             "Cache.clear"
//! ```
//!
//! Only top-level statements (optionally behind `export`) are inspected.
//! Anything that ends up without a name is anonymous and dropped.
//! Declarations come first, then bound functions, then methods; each group
//! keeps source order.

use tree_sitter::Node;

use super::jsdoc::{apply_doc, parse_doc_comment};
use super::{FunctionInfo, ParsedFile};

/// A function-like construct found at the top level.
#[derive(Debug, Clone, Copy)]
pub enum FunctionShape<'t> {
    /// `function name() {}`, possibly a generator.
    Declaration { node: Node<'t> },
    /// An arrow function or function expression bound to a variable.
    Bound {
        binding: Node<'t>,
        value: Node<'t>,
    },
    /// A method of a class. `class` is None for anonymous classes.
    Method {
        class: Option<Node<'t>>,
        node: Node<'t>,
    },
}

/// A shape plus the statement its documentation comment is attached to.
#[derive(Debug, Clone, Copy)]
pub struct FunctionCandidate<'t> {
    pub shape: FunctionShape<'t>,
    /// The node whose preceding sibling carries the doc comment: the
    /// `export` statement, the declaration statement, or the method.
    pub anchor: Node<'t>,
}

impl<'t> FunctionShape<'t> {
    /// The name this function is indexed under, or None if anonymous.
    pub fn name(&self, parsed: &ParsedFile) -> Option<String> {
        let name = match *self {
            FunctionShape::Declaration { node } => field_text(parsed, node, "name"),
            FunctionShape::Bound { binding, value } => field_text(parsed, value, "name")
                .or_else(|| {
                    (binding.kind() == "identifier").then(|| parsed.node_text(binding).to_string())
                }),
            FunctionShape::Method { class, node } => {
                field_text(parsed, node, "name").map(|method| {
                    match class.and_then(|c| field_text(parsed, c, "name")) {
                        Some(class_name) => format!("{}.{}", class_name, method),
                        None => method,
                    }
                })
            }
        };
        name.filter(|n| !n.is_empty())
    }

    /// Position of this shape's group in the inventory.
    pub fn rank(&self) -> u8 {
        match self {
            FunctionShape::Declaration { .. } => 0,
            FunctionShape::Bound { .. } => 1,
            FunctionShape::Method { .. } => 2,
        }
    }
}

/// All named functions of a file, grouped by shape.
pub fn extract_functions(parsed: &ParsedFile) -> Vec<FunctionInfo> {
    let mut candidates = collect_candidates(parsed);
    candidates.sort_by_key(|candidate| candidate.shape.rank());
    candidates
        .into_iter()
        .filter_map(|candidate| function_info(parsed, &candidate))
        .collect()
}

/// Turn one candidate into a record; None if it has no name.
fn function_info(parsed: &ParsedFile, candidate: &FunctionCandidate) -> Option<FunctionInfo> {
    let name = candidate.shape.name(parsed)?;
    let mut info = FunctionInfo {
        name,
        ..FunctionInfo::default()
    };

    if let Some(doc) = doc_comment(parsed, candidate.anchor).and_then(parse_doc_comment) {
        apply_doc(&mut info, &doc);
    }

    Some(info)
}

/// Find function-like constructs among the top-level statements, in
/// source order.
pub fn collect_candidates(parsed: &ParsedFile) -> Vec<FunctionCandidate<'_>> {
    let root = parsed.tree.root_node();
    let mut cursor = root.walk();
    let mut candidates = Vec::new();

    for statement in root.named_children(&mut cursor) {
        let inner = if statement.kind() == "export_statement" {
            match statement
                .child_by_field_name("declaration")
                .or_else(|| statement.child_by_field_name("value"))
            {
                Some(inner) => inner,
                None => continue,
            }
        } else {
            statement
        };

        collect_from_statement(parsed, inner, statement, &mut candidates);
    }

    candidates
}

fn collect_from_statement<'t>(
    parsed: &ParsedFile,
    node: Node<'t>,
    anchor: Node<'t>,
    out: &mut Vec<FunctionCandidate<'t>>,
) {
    match node.kind() {
        "function_declaration" | "generator_function_declaration" => {
            out.push(FunctionCandidate {
                shape: FunctionShape::Declaration { node },
                anchor,
            });
        }
        // `export default function name() {}` can surface as an expression.
        "function_expression" | "function" | "generator_function" => {
            out.push(FunctionCandidate {
                shape: FunctionShape::Declaration { node },
                anchor,
            });
        }
        "lexical_declaration" | "variable_declaration" => {
            let mut cursor = node.walk();
            for declarator in node.named_children(&mut cursor) {
                if declarator.kind() != "variable_declarator" {
                    continue;
                }
                let (Some(binding), Some(value)) = (
                    declarator.child_by_field_name("name"),
                    declarator.child_by_field_name("value"),
                ) else {
                    continue;
                };
                if is_function_value(value) {
                    out.push(FunctionCandidate {
                        shape: FunctionShape::Bound { binding, value },
                        anchor,
                    });
                }
            }
        }
        "class_declaration" | "abstract_class_declaration" | "class" => {
            let Some(body) = node.child_by_field_name("body") else {
                return;
            };
            let class = node.child_by_field_name("name").map(|_| node);
            let mut cursor = body.walk();
            for member in body.named_children(&mut cursor) {
                if member.kind() == "method_definition" && is_plain_method(parsed, member) {
                    out.push(FunctionCandidate {
                        shape: FunctionShape::Method {
                            class,
                            node: member,
                        },
                        anchor: member,
                    });
                }
            }
        }
        _ => {}
    }
}

fn is_function_value(value: Node) -> bool {
    matches!(
        value.kind(),
        "arrow_function" | "function_expression" | "function" | "generator_function"
    )
}

/// Methods only: constructors and get/set accessors are excluded.
fn is_plain_method(parsed: &ParsedFile, method: Node) -> bool {
    let mut cursor = method.walk();
    let is_accessor = method
        .children(&mut cursor)
        .any(|child| !child.is_named() && matches!(child.kind(), "get" | "set"));
    if is_accessor {
        return false;
    }
    field_text(parsed, method, "name")
        .map(|name| name != "constructor")
        .unwrap_or(false)
}

/// The nearest `/** */` comment directly above `anchor`.
///
/// Only an uninterrupted run of comments is searched; any other node in
/// between ends the search.
fn doc_comment<'p>(parsed: &'p ParsedFile, anchor: Node) -> Option<&'p str> {
    let mut sibling = anchor.prev_sibling();
    while let Some(node) = sibling {
        if node.kind() != "comment" {
            return None;
        }
        let text = parsed.node_text(node);
        if text.starts_with("/**") {
            return Some(text);
        }
        sibling = node.prev_sibling();
    }
    None
}

fn field_text(parsed: &ParsedFile, node: Node, field: &str) -> Option<String> {
    node.child_by_field_name(field)
        .map(|n| parsed.node_text(n).to_string())
}
