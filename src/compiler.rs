//! Compiler: renders parsed assignments into regular-expression fragments.
//!
//! Every visible variable and every label becomes a named capture group.
//! Group names get a per-compilation numeric suffix (`name_0`, `name_1`,
//! ...) minted from a counter threaded through the rendering, which keeps
//! the flat capture namespace collision-free however deeply definitions
//! reference each other. The extraction side strips the suffix again to
//! recover the logical field name.

use indexmap::IndexMap;
use log::debug;
use regex::Regex;

use crate::ast::{Assignment, Expr, Variable};
use crate::lexer::ParseError;
use crate::parser;

/// Compiled fragments by variable name, in definition order.
pub type Scope = IndexMap<String, String>;

/// Errors raised while compiling a pattern source.
#[derive(Debug, Clone)]
pub enum CompileError {
    /// The source failed to parse (only from the source-accepting entry
    /// points).
    Parse(ParseError),

    /// The same name was bound twice, regardless of visibility.
    AlreadyDefined(String),

    /// A reference to a name no assignment binds.
    NotDefined(String),

    /// The expression rendered to nothing.
    NoValue(String),

    /// A definition references itself, directly or through other names.
    Recursive(String),

    /// The host engine rejected a raw fragment; carries its message.
    BadPattern(String),
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::Parse(e) => write!(f, "{}", e),
            CompileError::AlreadyDefined(name) => {
                write!(f, "Variable '{}' is already defined", name)
            }
            CompileError::NotDefined(name) => write!(f, "Variable '{}' is not defined", name),
            CompileError::NoValue(name) => write!(f, "Variable '{}' has no value", name),
            CompileError::Recursive(name) => {
                write!(f, "Variable '{}' is recursively defined", name)
            }
            CompileError::BadPattern(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompileError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for CompileError {
    fn from(e: ParseError) -> Self {
        CompileError::Parse(e)
    }
}

/// Parse and compile a source, one fragment per defined name.
///
/// # Examples
///
/// ```
/// let scope = weft_lang::compile("word = 'hi'").unwrap();
/// assert_eq!(scope["word"], "(?<word_0>hi)");
/// ```
pub fn compile(source: &str) -> Result<Scope, CompileError> {
    let tree = parser::parse(source)?;
    compile_tree(&tree)
}

/// Compile an already parsed assignment list.
pub fn compile_tree(tree: &[Assignment]) -> Result<Scope, CompileError> {
    let mut scope = Scope::new();
    let mut counter = 0usize;
    for assignment in tree {
        for variable in &assignment.variables {
            if scope.contains_key(&variable.name) {
                return Err(CompileError::AlreadyDefined(variable.name.clone()));
            }
            let mut stack = Vec::new();
            let rendered = render_all(&assignment.value, tree, &mut counter, &mut stack)?;
            if rendered.is_empty() {
                return Err(CompileError::NoValue(variable.name.clone()));
            }
            // The bound variable's own group is minted after its body, so
            // inner references always carry lower suffixes.
            let wrapped = if variable.visible {
                let suffix = counter;
                counter += 1;
                format!("(?<{}_{}>{})", variable.name, suffix, rendered)
            } else {
                format!("(?:{})", rendered)
            };
            debug!("compiled variable '{}'", variable.name);
            scope.insert(variable.name.clone(), wrapped);
        }
    }
    Ok(scope)
}

/// Parse and compile a source into one combined alternation over every
/// defined name, each alternative wrapped in word boundaries.
pub fn compile_all(source: &str) -> Result<String, CompileError> {
    let tree = parser::parse(source)?;
    compile_all_tree(&tree)
}

/// Combined-alternation form of [`compile_tree`].
pub fn compile_all_tree(tree: &[Assignment]) -> Result<String, CompileError> {
    let scope = compile_tree(tree)?;
    let alternatives: Vec<String> = scope
        .values()
        .map(|fragment| format!("\\b{}\\b", fragment))
        .collect();
    Ok(format!("(?:{})", alternatives.join("|")))
}

fn lookup<'t>(tree: &'t [Assignment], name: &str) -> Option<(&'t Assignment, &'t Variable)> {
    tree.iter().find_map(|assignment| {
        assignment
            .variables
            .iter()
            .find(|v| v.name == name)
            .map(|v| (assignment, v))
    })
}

fn render_all(
    exprs: &[Expr],
    tree: &[Assignment],
    counter: &mut usize,
    stack: &mut Vec<String>,
) -> Result<String, CompileError> {
    let mut out = String::new();
    for expr in exprs {
        out.push_str(&render(expr, tree, counter, stack)?);
    }
    Ok(out)
}

fn render(
    expr: &Expr,
    tree: &[Assignment],
    counter: &mut usize,
    stack: &mut Vec<String>,
) -> Result<String, CompileError> {
    match expr {
        Expr::Literal(text) => Ok(escape_literal(text)),
        Expr::Pattern(text) => {
            // Raw fragments must stand alone as a valid host expression.
            Regex::new(text).map_err(|e| CompileError::BadPattern(e.to_string()))?;
            Ok(text.clone())
        }
        Expr::Ref(name) => {
            let Some((assignment, variable)) = lookup(tree, name) else {
                return Err(CompileError::NotDefined(name.clone()));
            };
            if stack.iter().any(|seen| seen == name) {
                return Err(CompileError::Recursive(name.clone()));
            }
            stack.push(name.clone());
            // A referenced variable's group is minted before its body, the
            // opposite of the top-level wrap.
            let rendered = if variable.visible {
                let suffix = *counter;
                *counter += 1;
                let inner = render_all(&assignment.value, tree, counter, stack)?;
                format!("(?<{}_{}>{})", name, suffix, inner)
            } else {
                format!("(?:{})", render_all(&assignment.value, tree, counter, stack)?)
            };
            stack.pop();
            Ok(rendered)
        }
        Expr::Group(children) => render_all(children, tree, counter, stack),
        Expr::Sequence(children) => {
            let parts = render_each(children, tree, counter, stack)?;
            Ok(format!("(?:{})", parts.join("\\s*\\b")))
        }
        Expr::Alternation(children) => {
            let parts = render_each(children, tree, counter, stack)?;
            Ok(format!("(?:{})", parts.join("|")))
        }
        Expr::Repetition(children) => {
            let parts = render_each(children, tree, counter, stack)?;
            Ok(format!("(?:(?:{})\\s*\\b)+", parts.join("|")))
        }
        Expr::Optional(body) => Ok(format!(
            "(?:{}){{0,1}}",
            render_all(body, tree, counter, stack)?
        )),
        Expr::Label { name, body } => {
            let suffix = *counter;
            *counter += 1;
            Ok(format!(
                "(?<{}_{}>{})",
                name,
                suffix,
                render_all(body, tree, counter, stack)?
            ))
        }
        Expr::Comment => Ok(String::new()),
        Expr::Question => Ok("(?:){0,1}".to_string()),
    }
}

fn render_each(
    children: &[Expr],
    tree: &[Assignment],
    counter: &mut usize,
    stack: &mut Vec<String>,
) -> Result<Vec<String>, CompileError> {
    children
        .iter()
        .map(|child| render(child, tree, counter, stack))
        .collect()
}

/// Escape the characters that are metacharacters in the host dialect.
fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(
            ch,
            '\\' | '^' | '$' | '.' | '*' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|'
        ) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

#[test]
fn test_escape_literal() {
    assert_eq!(escape_literal("a+b"), "a\\+b");
    assert_eq!(escape_literal("plain"), "plain");
    assert_eq!(escape_literal("({[.]})"), "\\(\\{\\[\\.\\]\\}\\)");
}
