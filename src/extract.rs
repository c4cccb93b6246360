//! Extraction engine: inverts a compiled expression back into structure.
//!
//! The engine does not keep the compiler's AST around. It re-parses the
//! compiled expression with `regex-syntax`, discovers the named capture
//! groups and their nesting, and then re-matches each level's own
//! sub-expression against the text it captured. Because group names are
//! globally unique on the wire but stripped of their numeric suffix here,
//! values captured at different nesting depths rebuild cleanly into a tree
//! keyed by logical field names. This also means `apply` works on any
//! compatible expression with named groups, not only ones this compiler
//! produced.

use indexmap::IndexMap;
use log::debug;
use regex::Regex;
use regex_syntax::ast::{self, Ast, GroupKind};

use crate::value::{Field, ResultTree};

/// Failures propagated from the regex-AST parser or the host engine.
#[derive(Debug, Clone)]
pub enum ExtractError {
    /// The expression did not parse as a regular expression.
    Pattern(ast::Error),

    /// The host engine rejected a sub-expression.
    Host(regex::Error),
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractError::Pattern(e) => write!(f, "{}", e),
            ExtractError::Host(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExtractError::Pattern(e) => Some(e),
            ExtractError::Host(e) => Some(e),
        }
    }
}

impl From<ast::Error> for ExtractError {
    fn from(e: ast::Error) -> Self {
        ExtractError::Pattern(e)
    }
}

impl From<regex::Error> for ExtractError {
    fn from(e: regex::Error) -> Self {
        ExtractError::Host(e)
    }
}

/// One named group recovered from a compiled expression: the source text of
/// its body, and the named groups nested strictly inside it.
#[derive(Debug, Clone)]
struct GroupNode {
    pattern: String,
    children: IndexMap<String, GroupNode>,
}

/// Apply a compiled expression to a text, rebuilding the hierarchical
/// result.
///
/// Fields that match nowhere yield empty sequences; they are not errors.
///
/// # Examples
///
/// ```
/// use weft_lang::value::Field;
///
/// let scope = weft_lang::compile(r"word = '\w+'").unwrap();
/// let result = weft_lang::apply(&scope["word"], "hi there").unwrap();
/// assert_eq!(
///     result["word"],
///     vec![Field::Text("hi".into()), Field::Text("there".into())]
/// );
/// ```
pub fn apply(pattern: &str, text: &str) -> Result<ResultTree, ExtractError> {
    let tree = ast::parse::Parser::new().parse(pattern)?;
    let mut groups = IndexMap::new();
    collect_groups(&tree, pattern, &mut groups);
    debug!("discovered {} top-level field(s)", groups.len());
    apply_tree(&groups, text)
}

/// Walk the regex AST collecting named capture groups. Alternation, concat,
/// repetition, and non-capturing groups are traversed but contribute no key
/// of their own; a named group is keyed by its name up to the first `_` and
/// its body text is recovered by span-slicing the source expression.
fn collect_groups(node: &Ast, pattern: &str, out: &mut IndexMap<String, GroupNode>) {
    match node {
        Ast::Concat(concat) => {
            for child in &concat.asts {
                collect_groups(child, pattern, out);
            }
        }
        Ast::Alternation(alternation) => {
            for child in &alternation.asts {
                collect_groups(child, pattern, out);
            }
        }
        Ast::Repetition(repetition) => collect_groups(&repetition.ast, pattern, out),
        Ast::Group(group) => match &group.kind {
            GroupKind::CaptureName { name, .. } => {
                let span = group.ast.span();
                let body = pattern[span.start.offset..span.end.offset].to_string();
                let mut children = IndexMap::new();
                collect_groups(&group.ast, pattern, &mut children);
                out.insert(
                    strip_suffix(&name.name),
                    GroupNode {
                        pattern: body,
                        children,
                    },
                );
            }
            _ => collect_groups(&group.ast, pattern, out),
        },
        _ => {}
    }
}

fn strip_suffix(name: &str) -> String {
    name.split('_').next().unwrap_or(name).to_string()
}

fn apply_tree(groups: &IndexMap<String, GroupNode>, text: &str) -> Result<ResultTree, ExtractError> {
    let mut result = ResultTree::new();
    for (name, entry) in groups {
        let regex = Regex::new(&entry.pattern)?;
        let found: Vec<&str> = regex.find_iter(text).map(|m| m.as_str()).collect();
        let fields = if entry.children.is_empty() {
            found
                .iter()
                .map(|matched| Field::Text(matched.trim().to_string()))
                .collect()
        } else {
            found
                .iter()
                .map(|matched| get_entry(&entry.children, matched, &entry.pattern))
                .collect::<Result<Vec<_>, _>>()?
        };
        result.insert(name.clone(), fields);
    }
    Ok(result)
}

/// Re-run the parent's own pattern over one of its matches, collecting per
/// iteration every participating named group whose stripped name equals a
/// child field. A child captured several times within one parent match (a
/// repeating alternation, or the same logical name on several branches)
/// yields a list.
fn get_entry(
    children: &IndexMap<String, GroupNode>,
    text: &str,
    parent_pattern: &str,
) -> Result<Field, ExtractError> {
    let regex = Regex::new(parent_pattern)?;
    let mut record = IndexMap::new();
    for (name, node) in children {
        let mut captured: Vec<&str> = Vec::new();
        for caps in regex.captures_iter(text) {
            for group in regex.capture_names().flatten() {
                if group.split('_').next() == Some(name.as_str()) {
                    if let Some(found) = caps.name(group) {
                        captured.push(found.as_str());
                    }
                }
            }
        }
        let field = if node.children.is_empty() {
            match captured.as_slice() {
                [] => Field::Missing,
                [single] => Field::Text((*single).to_string()),
                many => Field::List(
                    many.iter()
                        .map(|matched| Field::Text((*matched).to_string()))
                        .collect(),
                ),
            }
        } else {
            match captured.as_slice() {
                [] => Field::Missing,
                [single] => get_entry(&node.children, single, &node.pattern)?,
                many => Field::List(
                    many.iter()
                        .map(|matched| get_entry(&node.children, matched, &node.pattern))
                        .collect::<Result<Vec<_>, _>>()?,
                ),
            }
        };
        record.insert(name.clone(), field);
    }
    Ok(Field::Record(record))
}
