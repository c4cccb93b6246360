//! # Weft Pattern Language - Abstract Syntax Tree
//!
//! Types shared by the parser, compiler, and highlighter.
//!
//! - **[tokens]** - positioned lexical tokens (highlighter output)
//! - **[expressions]** - expression nodes produced by the grouping passes
//! - **[assignments]** - variables and the per-line assignments binding them
//!
//! ## Surface syntax
//!
//! ```text
//! # one assignment per line
//! word       = '\w+'
//! !sep       = '\s*'
//! greeting   = "hello" . word :who
//! either     = "yes" ; "no"
//! list       = word , ","
//! maybe      = ? word
//! ```
//!
//! `.` sequences elements, `;` alternates them, `,` builds a repeating
//! alternation, `?` makes the element to its right optional, and `:name`
//! wraps the element to its left in a named capture. A leading `!` keeps a
//! definition out of the compiled output's named captures.

pub mod assignments;
pub mod expressions;
pub mod tokens;

pub use assignments::{Assignment, Variable};
pub use expressions::Expr;
pub use tokens::{Span, Token, TokenKind};
