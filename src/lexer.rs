//! Character scanner for the weft pattern language.
//!
//! The scanner is a cursor over the source characters with line/column
//! tracking. The parser and the highlighter both drive it directly; there is
//! no separate token stream. Parenthesized sub-expressions are handled by
//! handing out a bounded [`Scanner::window`] over the same input.

/// A positioned error raised during scanning or parsing.
///
/// Lines and columns are 1-based; the column points at the character the
/// scanner was looking at when the error was raised.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        ParseError {
            message: message.into(),
            line,
            column,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (line {}, column {})",
            self.message, self.line, self.column
        )
    }
}

impl std::error::Error for ParseError {}

pub struct Scanner<'a> {
    input: &'a [char],
    pos: usize,
    line: usize,
    col: usize,
    max: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a [char]) -> Self {
        Scanner {
            input,
            pos: 0,
            line: 1,
            col: 1,
            max: input.len(),
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn peek(&self) -> Option<char> {
        if self.pos >= self.max {
            None
        } else {
            self.input.get(self.pos).copied()
        }
    }

    pub fn eof(&self) -> bool {
        self.peek().is_none()
    }

    /// Consume one character. Newlines reset the column and advance the line.
    pub fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    /// Build a positioned error at the current cursor location.
    pub fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(message, self.line, self.col)
    }

    /// Consume a maximal run of characters satisfying `pred`.
    pub fn read_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut out = String::new();
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            out.push(ch);
            self.next();
        }
        out
    }

    /// Read a delimited literal: consumes the opening delimiter, then reads
    /// until an unescaped `end`. `\<end>` becomes the literal delimiter; any
    /// other `\x` is kept as `\x`.
    ///
    /// In strict mode a raw newline or end of input before the closing
    /// delimiter is an error; non-strict mode (highlighting) stops silently.
    pub fn read_escaped(&mut self, end: char, strict: bool) -> Result<String, ParseError> {
        let mut out = String::new();
        self.next();
        loop {
            if self.eof() || self.peek() == Some('\n') {
                if strict {
                    return Err(self.error(format!("Missing closing {end}")));
                }
                break;
            }
            match self.next() {
                Some('\\') => match self.next() {
                    Some(ch) if ch == end => out.push(ch),
                    Some(ch) => {
                        out.push('\\');
                        out.push(ch);
                    }
                    None => out.push('\\'),
                },
                Some(ch) if ch == end => break,
                Some(ch) => out.push(ch),
                None => break,
            }
        }
        Ok(out)
    }

    /// A sub-scanner over the same input, bounded at the absolute position
    /// `max`. Line and column carry over so errors inside the window still
    /// point at the original source.
    pub fn window(&self, max: usize) -> Scanner<'a> {
        Scanner {
            input: self.input,
            pos: self.pos,
            line: self.line,
            col: self.col,
            max: self.max.min(max),
        }
    }

    /// Absolute cursor position, for bounding windows.
    pub fn position(&self) -> usize {
        self.pos
    }
}

#[test]
fn test_line_column_tracking() {
    let chars: Vec<char> = "ab\ncd".chars().collect();
    let mut scanner = Scanner::new(&chars);
    assert_eq!(scanner.next(), Some('a'));
    assert_eq!((scanner.line(), scanner.col()), (1, 2));
    scanner.next();
    scanner.next();
    assert_eq!((scanner.line(), scanner.col()), (2, 1));
    assert_eq!(scanner.next(), Some('c'));
    assert_eq!((scanner.line(), scanner.col()), (2, 2));
}

#[test]
fn test_window_bounds() {
    let chars: Vec<char> = "abcdef".chars().collect();
    let mut scanner = Scanner::new(&chars);
    scanner.next();
    let mut window = scanner.window(3);
    assert_eq!(window.next(), Some('b'));
    assert_eq!(window.next(), Some('c'));
    assert!(window.eof());
    assert_eq!(scanner.next(), Some('b'));
}
