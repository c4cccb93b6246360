//! Token spans as JSON, for driving external highlighting.

use serde_json::{Value, json};

use crate::ast::TokenKind;
use crate::highlighter;

fn kind_name(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Comment => "comment",
        TokenKind::String => "string",
        TokenKind::Regex => "regex",
        TokenKind::Variable => "variable",
        TokenKind::Equals => "equals",
        TokenKind::Parenthesis => "parenthesis",
        TokenKind::Dot => "dot",
        TokenKind::Comma => "comma",
        TokenKind::Questionmark => "questionmark",
        TokenKind::Label => "label",
        TokenKind::Semicolon => "semicolon",
    }
}

/// Tokenize a source and render the spans as a JSON array.
pub fn highlight_json(source: &str) -> Value {
    let spans: Vec<Value> = highlighter::highlight(source)
        .into_iter()
        .map(|token| {
            let mut span = json!({
                "kind": kind_name(token.kind),
                "line": token.span.line,
                "start": token.span.start,
                "end": token.span.end,
            });
            if let Some(visible) = token.visible {
                span["visible"] = Value::Bool(visible);
            }
            span
        })
        .collect();
    Value::Array(spans)
}
