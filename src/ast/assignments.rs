use crate::ast::Expr;

/// A name bound on the left-hand side of an assignment.
///
/// A leading `!` in the source marks the variable invisible: it compiles to
/// a non-capturing group and contributes no named capture of its own, but
/// stays referencable from other expressions. The stored name has the `!`
/// stripped.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub visible: bool,
}

/// One source line: one or more names bound to a single expression.
///
/// Several names aliasing one expression are each compiled independently
/// and each re-checked for uniqueness. An empty expression list parses
/// fine; compiling it fails with "has no value".
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub variables: Vec<Variable>,
    pub value: Vec<Expr>,
}
