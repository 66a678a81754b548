//! Structured documentation comments (`/** ... */`).
//!
//! Parsing is best-effort. A tag that does not match the expected shape
//! produces a smaller record or none at all, never an error.

use regex::Regex;

use super::{FunctionInfo, ParamInfo, ReturnInfo};

lazy_static::lazy_static! {
    /// `@param {type} name - description`, also `[name]`, `[name=default]`
    /// and dotted names.
    static ref PARAM_RE: Regex = Regex::new(
        r"@param\s+(?:\{([^}]+)\})?\s*\[?([\w$.]+)(?:=[^\]]*)?\]?(?:\s*-\s*(.+))?"
    ).unwrap();
    /// `@return {type} description` and `@returns {type} description`.
    static ref RETURN_RE: Regex = Regex::new(r"@returns?\s+(?:\{([^}]+)\})?\s*(.*)").unwrap();
    static ref TAG_START_RE: Regex = Regex::new(r"^@([A-Za-z]+)\s*(.*)$").unwrap();
    static ref LEADING_TYPE_RE: Regex = Regex::new(r"^\{[^}]*\}\s*").unwrap();
    static ref LEADING_NAME_RE: Regex = Regex::new(r"^\[?[\w$.]+(?:=[^\]]*)?\]?\s*").unwrap();
}

/// A parsed documentation comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocComment {
    /// Free text before the first tag.
    pub description: Option<String>,
    pub tags: Vec<DocTag>,
}

/// One `@tag` with the text that follows it, continuation lines included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocTag {
    pub name: String,
    pub body: String,
}

impl DocTag {
    /// The tag as written, e.g. `@param {string} id - The id`.
    pub fn text(&self) -> String {
        if self.body.is_empty() {
            format!("@{}", self.name)
        } else {
            format!("@{} {}", self.name, self.body)
        }
    }
}

/// Parse a `/** ... */` comment. Returns None for any other comment.
pub fn parse_doc_comment(raw: &str) -> Option<DocComment> {
    let raw = raw.trim();
    if !raw.starts_with("/**") || raw.starts_with("/**/") {
        return None;
    }
    let body = raw.trim_start_matches("/**").trim_end_matches("*/");

    let mut description_lines: Vec<&str> = Vec::new();
    let mut tags: Vec<DocTag> = Vec::new();

    for line in body.lines() {
        let line = line.trim();
        let line = line.strip_prefix('*').unwrap_or(line).trim();

        if let Some(caps) = TAG_START_RE.captures(line) {
            tags.push(DocTag {
                name: caps[1].to_string(),
                body: caps[2].trim().to_string(),
            });
            continue;
        }

        match tags.last_mut() {
            Some(tag) => {
                if !line.is_empty() {
                    if !tag.body.is_empty() {
                        tag.body.push('\n');
                    }
                    tag.body.push_str(line);
                }
            }
            None => description_lines.push(line),
        }
    }

    let description = description_lines.join("\n").trim().to_string();
    Some(DocComment {
        description: non_empty(description),
        tags,
    })
}

/// Build the parameter record for a `@param` tag.
///
/// The name is required; without it the tag is skipped.
pub fn parse_param(tag: &DocTag) -> Option<ParamInfo> {
    let text = tag.text();
    let caps = PARAM_RE.captures(&text)?;

    let type_name = caps.get(1).map(|m| m.as_str().trim().to_string());
    let name = caps.get(2)?.as_str().to_string();
    let description = caps
        .get(3)
        .and_then(|m| non_empty(m.as_str().trim().to_string()))
        .or_else(|| param_comment(&tag.body));

    Some(ParamInfo {
        name,
        type_name,
        description,
    })
}

/// Build the return record for a `@return`/`@returns` tag.
///
/// A tag with neither a type nor any text yields None.
pub fn parse_return(tag: &DocTag) -> Option<ReturnInfo> {
    let text = tag.text();
    let comment = return_comment(&tag.body);

    let info = match RETURN_RE.captures(&text) {
        Some(caps) => ReturnInfo {
            type_name: caps.get(1).map(|m| m.as_str().trim().to_string()),
            description: caps
                .get(2)
                .and_then(|m| non_empty(m.as_str().trim().to_string()))
                .or(comment),
        },
        None => ReturnInfo {
            type_name: None,
            description: comment,
        },
    };

    if info.is_empty() {
        None
    } else {
        Some(info)
    }
}

/// Fill a function record from its documentation comment.
pub fn apply_doc(function: &mut FunctionInfo, doc: &DocComment) {
    function.description = doc.description.clone();

    for tag in &doc.tags {
        match tag.name.as_str() {
            "param" => {
                if let Some(param) = parse_param(tag) {
                    function.params.push(param);
                }
            }
            "return" | "returns" => {
                if let Some(returns) = parse_return(tag) {
                    function.returns = Some(returns);
                }
            }
            _ => {}
        }
    }
}

/// Text after the type and name of a `@param` tag, without a leading dash.
fn param_comment(body: &str) -> Option<String> {
    let rest = LEADING_TYPE_RE.replace(body, "");
    let rest = LEADING_NAME_RE.replace(&rest, "");
    strip_dash(&rest)
}

/// Text after the type of a `@returns` tag, without a leading dash.
fn return_comment(body: &str) -> Option<String> {
    let rest = LEADING_TYPE_RE.replace(body, "");
    strip_dash(&rest)
}

fn strip_dash(text: &str) -> Option<String> {
    let text = text.trim();
    let text = text.strip_prefix('-').unwrap_or(text).trim();
    non_empty(text.to_string())
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(name: &str, body: &str) -> DocTag {
        DocTag {
            name: name.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_parse_doc_comment() {
        let doc = parse_doc_comment(
            "/**\n * Sum two numbers.\n * Handles NaN.\n *\n * @param {number} a - First\n * @param b second\n *   operand\n * @returns the sum\n */",
        )
        .unwrap();

        assert_eq!(doc.description.as_deref(), Some("Sum two numbers.\nHandles NaN."));
        assert_eq!(doc.tags.len(), 3);
        assert_eq!(doc.tags[0], tag("param", "{number} a - First"));
        assert_eq!(doc.tags[1], tag("param", "b second\noperand"));
        assert_eq!(doc.tags[2], tag("returns", "the sum"));
    }

    #[test]
    fn test_single_line_doc_comment() {
        let doc = parse_doc_comment("/** @deprecated use v2 */").unwrap();
        assert!(doc.description.is_none());
        assert_eq!(doc.tags, vec![tag("deprecated", "use v2")]);
    }

    #[test]
    fn test_non_doc_comments_rejected() {
        assert!(parse_doc_comment("/* plain */").is_none());
        assert!(parse_doc_comment("// line").is_none());
        assert!(parse_doc_comment("/**/").is_none());
    }

    #[test]
    fn test_param_full() {
        let param = parse_param(&tag("param", "{string} name - The user name")).unwrap();
        assert_eq!(param.name, "name");
        assert_eq!(param.type_name.as_deref(), Some("string"));
        assert_eq!(param.description.as_deref(), Some("The user name"));
    }

    #[test]
    fn test_param_without_type() {
        let param = parse_param(&tag("param", "count - How many")).unwrap();
        assert_eq!(param.name, "count");
        assert!(param.type_name.is_none());
        assert_eq!(param.description.as_deref(), Some("How many"));
    }

    #[test]
    fn test_param_falls_back_to_comment() {
        let param = parse_param(&tag("param", "{Options} opts the options bag")).unwrap();
        assert_eq!(param.name, "opts");
        assert_eq!(param.description.as_deref(), Some("the options bag"));
    }

    #[test]
    fn test_param_optional_and_dotted() {
        let param = parse_param(&tag("param", "{number} [retries=3] - Retry count")).unwrap();
        assert_eq!(param.name, "retries");
        assert_eq!(param.description.as_deref(), Some("Retry count"));

        let param = parse_param(&tag("param", "{string} options.url - Target")).unwrap();
        assert_eq!(param.name, "options.url");
    }

    #[test]
    fn test_param_name_only() {
        let param = parse_param(&tag("param", "id")).unwrap();
        assert_eq!(param.name, "id");
        assert!(param.type_name.is_none());
        assert!(param.description.is_none());
    }

    #[test]
    fn test_param_without_name_is_skipped() {
        assert!(parse_param(&tag("param", "")).is_none());
        assert!(parse_param(&tag("param", "{string}")).is_none());
    }

    #[test]
    fn test_return_variants() {
        let returns = parse_return(&tag("returns", "{boolean} true when valid")).unwrap();
        assert_eq!(returns.type_name.as_deref(), Some("boolean"));
        assert_eq!(returns.description.as_deref(), Some("true when valid"));

        let returns = parse_return(&tag("return", "{string}")).unwrap();
        assert_eq!(returns.type_name.as_deref(), Some("string"));
        assert!(returns.description.is_none());

        let returns = parse_return(&tag("returns", "nothing useful")).unwrap();
        assert!(returns.type_name.is_none());
        assert_eq!(returns.description.as_deref(), Some("nothing useful"));
    }

    #[test]
    fn test_empty_return_tag_yields_nothing() {
        assert!(parse_return(&tag("returns", "")).is_none());
    }

    #[test]
    fn test_apply_doc() {
        let doc = parse_doc_comment(
            "/**\n * Greets.\n * @param {string} who - Name\n * @throws never\n * @return {string} greeting\n * @returns {string} final greeting\n */",
        )
        .unwrap();
        let mut function = FunctionInfo {
            name: "greet".to_string(),
            ..FunctionInfo::default()
        };
        apply_doc(&mut function, &doc);

        assert_eq!(function.description.as_deref(), Some("Greets."));
        assert_eq!(function.params.len(), 1);
        assert_eq!(
            function.returns.unwrap().description.as_deref(),
            Some("final greeting")
        );
    }
}
