//! # weft-lang
//!
//! A small pattern definition language. Named, composable sub-patterns
//! (string literals, raw regular-expression fragments, references to other
//! names) are combined with sequencing (`.`), alternation (`;`), repeated
//! alternation (`,`), optional (`?`), and labelling (`:name`) operators,
//! then compiled into a single regular expression with uniquely named
//! capture groups. The extraction engine inverts a compiled expression
//! against a body of text, rebuilding a hierarchical result of named
//! fields.
//!
//! ```
//! use weft_lang::{compile_all, apply};
//!
//! let source = r#"
//! value = '[0-9]+'
//! key   = '[a-z]+'
//! "#;
//! let pattern = compile_all(source).unwrap();
//! let result = apply(&pattern, "x=5 y=17").unwrap();
//! assert_eq!(result["value"].len(), 2);
//! ```

pub mod ast;
pub mod compiler;
pub mod extract;
pub mod highlighter;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod value;

#[cfg(feature = "cli")]
pub mod cli;

pub use ast::{Assignment, Expr, Span, Token, TokenKind, Variable};
pub use compiler::{CompileError, Scope, compile, compile_all};
pub use extract::{ExtractError, apply};
pub use highlighter::highlight;
pub use lexer::{ParseError, Scanner};
pub use output::{to_json, to_json_pretty};
pub use parser::parse;
pub use value::{Field, ResultTree};
