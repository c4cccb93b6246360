//! Best-effort tokenizer for editor-style highlighting.
//!
//! Independent of the parser: it produces a flat list of cosmetic token
//! spans and never fails, whatever the input. Unterminated literals extend
//! to the end of their line; unknown characters are skipped.

use crate::ast::{Span, Token, TokenKind};
use crate::lexer::Scanner;

pub fn highlight(source: &str) -> Vec<Token> {
    let chars: Vec<char> = source.chars().collect();
    let mut scanner = Scanner::new(&chars);
    let mut tokens = Vec::new();
    loop {
        scanner.read_while(|ch| ch.is_whitespace());
        let Some(ch) = scanner.peek() else { break };
        let line = scanner.line();
        let start = scanner.col();
        match ch {
            '#' => {
                scanner.read_while(|c| c != '\n');
                tokens.push(Token::new(
                    TokenKind::Comment,
                    Span::new(line, start, scanner.col() - 1),
                ));
            }
            '"' => {
                let _ = scanner.read_escaped('"', false);
                tokens.push(Token::new(
                    TokenKind::String,
                    Span::new(line, start, scanner.col() - 1),
                ));
            }
            '\'' => {
                let _ = scanner.read_escaped('\'', false);
                tokens.push(Token::new(
                    TokenKind::Regex,
                    Span::new(line, start, scanner.col() - 1),
                ));
            }
            '=' => tokens.push(single(&mut scanner, TokenKind::Equals)),
            '(' | ')' => tokens.push(single(&mut scanner, TokenKind::Parenthesis)),
            '.' => tokens.push(single(&mut scanner, TokenKind::Dot)),
            ',' => tokens.push(single(&mut scanner, TokenKind::Comma)),
            '?' => tokens.push(single(&mut scanner, TokenKind::Questionmark)),
            ';' => tokens.push(single(&mut scanner, TokenKind::Semicolon)),
            ':' => {
                scanner.next();
                scanner.read_while(|c| c.is_ascii_alphanumeric());
                tokens.push(Token::new(
                    TokenKind::Label,
                    Span::new(line, start, scanner.col() - 1),
                ));
            }
            c if c.is_ascii_alphabetic() || c == '!' => {
                let visible = c != '!';
                scanner.read_while(|c| c.is_ascii_alphanumeric() || c == '!');
                tokens.push(Token::variable(
                    Span::new(line, start, scanner.col() - 1),
                    visible,
                ));
            }
            _ => {
                scanner.next();
            }
        }
    }
    tokens
}

fn single(scanner: &mut Scanner, kind: TokenKind) -> Token {
    let span = Span::new(scanner.line(), scanner.col(), scanner.col());
    scanner.next();
    Token::new(kind, span)
}

#[test]
fn test_never_fails_on_malformed_input() {
    let tokens = highlight("broken = \"unterminated\nnext @ % line");
    assert!(tokens.iter().any(|t| t.kind == TokenKind::String));
    assert!(tokens.iter().any(|t| t.kind == TokenKind::Variable));
}
