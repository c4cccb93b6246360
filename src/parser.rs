//! Parser for the weft pattern language.
//!
//! Source is line-oriented: each non-empty line binds one or more variable
//! names to an expression. Expressions are scanned into a flat list of
//! items, then folded into an [`Expr`] tree by a fixed sequence of grouping
//! passes (optional, label, `;`, `,`, `.`), each a single left-to-right
//! scan that builds a new list. The pass order is load-bearing: it decides
//! how mixed operator chains associate, so it must not be replaced by a
//! generic precedence climber.

use crate::ast::{Assignment, Expr, Span, Variable};
use crate::lexer::Scanner;

pub use crate::lexer::ParseError;

/// Parse a complete source into its assignments.
pub fn parse(source: &str) -> Result<Vec<Assignment>, ParseError> {
    let chars: Vec<char> = source.chars().collect();
    let mut scanner = Scanner::new(&chars);
    let mut assignments = Vec::new();
    while !scanner.eof() {
        let variables = parse_variables(&mut scanner)?;
        let items = parse_expression(&mut scanner)?;
        assignments.push(Assignment {
            variables,
            value: group(items)?,
        });
    }
    Ok(assignments)
}

/// One scanned element of an expression, before grouping.
#[derive(Debug, Clone)]
struct Item {
    kind: ItemKind,
    span: Span,
}

#[derive(Debug, Clone)]
enum ItemKind {
    Comment,
    Literal(String),
    Pattern(String),
    Ref(String),
    Paren(Vec<Item>),
    Dot,
    Comma,
    Semicolon,
    Question,
    Label(String),
}

fn valid_variable_name(name: &str) -> bool {
    let name = name.strip_prefix('!').unwrap_or(name);
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => chars.all(|c| c.is_ascii_alphanumeric()),
        _ => false,
    }
}

/// Read the comma-separated name list up to `=`, a comment, or end of input.
fn parse_variables(scanner: &mut Scanner) -> Result<Vec<Variable>, ParseError> {
    let mut variables = Vec::new();
    loop {
        let raw = scanner.read_while(|ch| !matches!(ch, ',' | '=' | '#'));
        let name = raw.trim();
        if !name.is_empty() {
            if !valid_variable_name(name) {
                return Err(scanner.error(format!("Invalid variable '{name}'")));
            }
            variables.push(Variable {
                name: name.strip_prefix('!').unwrap_or(name).to_string(),
                visible: !name.starts_with('!'),
            });
        }
        if scanner.peek() == Some('#') || scanner.eof() {
            break;
        }
        if scanner.peek() == Some('=') {
            scanner.next();
            break;
        }
        scanner.next();
    }
    Ok(variables)
}

/// Scan expression items up to the end of the line (or of the window).
fn parse_expression(scanner: &mut Scanner) -> Result<Vec<Item>, ParseError> {
    let mut items = Vec::new();
    loop {
        scanner.read_while(|ch| ch == ' ' || ch == '\t');
        let Some(ch) = scanner.peek() else { break };
        match ch {
            '#' => items.push(read_comment(scanner)),
            '"' => items.push(read_string(scanner)?),
            '\'' => items.push(read_pattern(scanner)?),
            '(' => {
                let line = scanner.line();
                let start = scanner.col();
                let mut window = read_parenthesis(scanner)?;
                let inner = parse_expression(&mut window)?;
                items.push(Item {
                    kind: ItemKind::Paren(inner),
                    span: Span::new(line, start, scanner.col().saturating_sub(1)),
                });
            }
            '.' => items.push(read_single(scanner, ItemKind::Dot)),
            ',' => items.push(read_single(scanner, ItemKind::Comma)),
            '?' => items.push(read_single(scanner, ItemKind::Question)),
            ';' => items.push(read_single(scanner, ItemKind::Semicolon)),
            ':' => items.push(read_label(scanner)?),
            c if c.is_ascii_alphabetic() => items.push(read_reference(scanner)),
            '\n' => {
                scanner.next();
                break;
            }
            _ => return Err(scanner.error(format!("Unexpected character '{ch}'"))),
        }
    }
    Ok(items)
}

fn read_single(scanner: &mut Scanner, kind: ItemKind) -> Item {
    let span = Span::new(scanner.line(), scanner.col(), scanner.col());
    scanner.next();
    Item { kind, span }
}

fn read_comment(scanner: &mut Scanner) -> Item {
    let line = scanner.line();
    let start = scanner.col();
    scanner.next();
    scanner.read_while(|ch| ch != '\n');
    Item {
        kind: ItemKind::Comment,
        span: Span::new(line, start, scanner.col() - 1),
    }
}

fn read_string(scanner: &mut Scanner) -> Result<Item, ParseError> {
    let line = scanner.line();
    let start = scanner.col();
    let value = scanner.read_escaped('"', true)?;
    Ok(Item {
        kind: ItemKind::Literal(value),
        span: Span::new(line, start, scanner.col() - 1),
    })
}

fn read_pattern(scanner: &mut Scanner) -> Result<Item, ParseError> {
    let line = scanner.line();
    let start = scanner.col();
    let value = scanner.read_escaped('\'', true)?;
    Ok(Item {
        kind: ItemKind::Pattern(value),
        span: Span::new(line, start, scanner.col() - 1),
    })
}

fn read_label(scanner: &mut Scanner) -> Result<Item, ParseError> {
    let line = scanner.line();
    let start = scanner.col();
    scanner.next();
    let name = scanner.read_while(|ch| ch.is_ascii_alphanumeric());
    if name.is_empty() {
        return Err(scanner.error("Unnamed label"));
    }
    Ok(Item {
        kind: ItemKind::Label(name),
        span: Span::new(line, start, scanner.col() - 1),
    })
}

fn read_reference(scanner: &mut Scanner) -> Item {
    let line = scanner.line();
    let start = scanner.col();
    let name = scanner.read_while(|ch| ch.is_ascii_alphanumeric());
    Item {
        kind: ItemKind::Ref(name),
        span: Span::new(line, start, scanner.col() - 1),
    }
}

/// Consume `( ... )` with nesting and return a scanner window bounded at the
/// matching close. The outer scanner is left just past the `)`.
fn read_parenthesis<'a>(scanner: &mut Scanner<'a>) -> Result<Scanner<'a>, ParseError> {
    let mut depth = 1usize;
    scanner.next();
    let content = scanner.window(usize::MAX);
    while !scanner.eof() {
        match scanner.next() {
            Some('(') => depth += 1,
            Some(')') => {
                depth -= 1;
                if depth == 0 {
                    return Ok(content.window(scanner.position() - 1));
                }
            }
            _ => {}
        }
    }
    Err(scanner.error("Missing closing parenthesis"))
}

// ---------------------------------------------------------------------------
// Grouping passes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Infix {
    Alternation,
    Repetition,
    Sequence,
}

impl Infix {
    /// The surface name used in operand errors.
    fn token_name(self) -> &'static str {
        match self {
            Infix::Alternation => "semicolon",
            Infix::Repetition => "comma",
            Infix::Sequence => "dot",
        }
    }
}

/// A partially grouped element. Bodies stay as piece lists so the grouping
/// passes can recurse into them afterwards.
#[derive(Debug, Clone)]
enum Piece {
    Item(Item),
    Optional(Vec<Piece>),
    Label { name: String, body: Vec<Piece> },
    Operator { op: Infix, children: Vec<Piece> },
}

fn group(items: Vec<Item>) -> Result<Vec<Expr>, ParseError> {
    group_pieces(items.into_iter().map(Piece::Item).collect())
}

fn group_pieces(pieces: Vec<Piece>) -> Result<Vec<Expr>, ParseError> {
    let pieces = bind_optionals(pieces);
    let pieces = bind_labels(pieces);
    let pieces = bind_operator(pieces, Infix::Alternation)?;
    let pieces = bind_operator(pieces, Infix::Repetition)?;
    let pieces = bind_operator(pieces, Infix::Sequence)?;
    pieces.into_iter().map(finish).collect()
}

/// `?` takes the element to its right. The item immediately following the
/// bound element is carried over untouched, so `? a ? b` leaves the second
/// `?` stray rather than binding `b`.
fn bind_optionals(pieces: Vec<Piece>) -> Vec<Piece> {
    let mut rest = pieces;
    rest.reverse();
    let mut out = Vec::new();
    while let Some(piece) = rest.pop() {
        let question = matches!(
            &piece,
            Piece::Item(Item {
                kind: ItemKind::Question,
                ..
            })
        );
        if question {
            match rest.pop() {
                Some(body) => {
                    out.push(Piece::Optional(vec![body]));
                    if let Some(follow) = rest.pop() {
                        out.push(follow);
                    }
                }
                // A trailing `?` stays in place and compiles to an empty
                // optional group.
                None => out.push(piece),
            }
            continue;
        }
        out.push(piece);
    }
    out
}

/// `:name` takes the element to its left. After a merge the next two items
/// are carried over untouched (one more than the optional pass, since the
/// merge replaces the element *before* the label), so a second label in
/// that window stays unbound. A label with nothing before it stays in
/// place; both leftovers are rejected in [`finish`].
fn bind_labels(pieces: Vec<Piece>) -> Vec<Piece> {
    let mut rest = pieces;
    rest.reverse();
    let mut out: Vec<Piece> = Vec::new();
    while let Some(piece) = rest.pop() {
        match piece {
            Piece::Item(Item {
                kind: ItemKind::Label(name),
                span,
            }) => match out.pop() {
                Some(prev) => {
                    out.push(Piece::Label {
                        name,
                        body: vec![prev],
                    });
                    for _ in 0..2 {
                        if let Some(follow) = rest.pop() {
                            out.push(follow);
                        }
                    }
                }
                None => out.push(Piece::Item(Item {
                    kind: ItemKind::Label(name),
                    span,
                })),
            },
            other => out.push(other),
        }
    }
    out
}

fn raw_operator(piece: &Piece, op: Infix) -> Option<Span> {
    let Piece::Item(item) = piece else { return None };
    let matched = matches!(
        (&item.kind, op),
        (ItemKind::Semicolon, Infix::Alternation)
            | (ItemKind::Comma, Infix::Repetition)
            | (ItemKind::Dot, Infix::Sequence)
    );
    matched.then_some(item.span)
}

/// One pass over the list for one infix operator: an operator token merges
/// its two neighbours; when the node just emitted is the same operator, the
/// right operand is appended to it instead, so `a.b.c` becomes a single
/// three-child sequence.
fn bind_operator(pieces: Vec<Piece>, op: Infix) -> Result<Vec<Piece>, ParseError> {
    let mut rest = pieces;
    rest.reverse();
    let mut out: Vec<Piece> = Vec::new();
    while let Some(piece) = rest.pop() {
        let Some(span) = raw_operator(&piece, op) else {
            out.push(piece);
            continue;
        };
        let missing = |side: &str| {
            ParseError::new(
                format!("Missing {side} of expression '{}'", op.token_name()),
                span.line,
                span.start,
            )
        };
        let chained = matches!(out.last(), Some(Piece::Operator { op: last, .. }) if *last == op);
        if chained {
            let Some(rhs) = rest.pop() else {
                return Err(missing("right-hand side"));
            };
            if let Some(Piece::Operator { children, .. }) = out.last_mut() {
                children.push(rhs);
            }
        } else {
            let Some(lhs) = out.pop() else {
                return Err(missing("left-hand side"));
            };
            let Some(rhs) = rest.pop() else {
                return Err(missing("right-hand side"));
            };
            out.push(Piece::Operator {
                op,
                children: vec![lhs, rhs],
            });
        }
    }
    Ok(out)
}

fn finish(piece: Piece) -> Result<Expr, ParseError> {
    match piece {
        Piece::Item(item) => match item.kind {
            ItemKind::Comment => Ok(Expr::Comment),
            ItemKind::Literal(text) => Ok(Expr::Literal(text)),
            ItemKind::Pattern(text) => Ok(Expr::Pattern(text)),
            ItemKind::Ref(name) => Ok(Expr::Ref(name)),
            ItemKind::Paren(inner) => Ok(Expr::Group(group(inner)?)),
            ItemKind::Question => Ok(Expr::Question),
            ItemKind::Label(name) => Err(ParseError::new(
                format!("Missing left-hand side of label ':{name}'"),
                item.span.line,
                item.span.start,
            )),
            ItemKind::Dot | ItemKind::Comma | ItemKind::Semicolon => {
                unreachable!("infix operators are grouped before conversion")
            }
        },
        Piece::Optional(body) => Ok(Expr::Optional(group_pieces(body)?)),
        Piece::Label { name, body } => Ok(Expr::Label {
            name,
            body: group_pieces(body)?,
        }),
        Piece::Operator { op, children } => {
            let children = group_pieces(children)?;
            Ok(match op {
                Infix::Alternation => Expr::Alternation(children),
                Infix::Repetition => Expr::Repetition(children),
                Infix::Sequence => Expr::Sequence(children),
            })
        }
    }
}
