/// A node of a parsed pattern expression.
///
/// An expression is a flat list of nodes; adjacency means concatenation.
/// The infix operators collect two or more siblings into one node, so
/// `a.b.c` is a single [`Expr::Sequence`] with three children, never a
/// nested pair.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `"text"` — matched verbatim; regex metacharacters are escaped at
    /// compile time.
    Literal(String),

    /// `'fragment'` — spliced into the compiled expression unescaped, after
    /// validation against the host engine.
    Pattern(String),

    /// A reference to another defined variable, resolved at compile time.
    /// Forward references are allowed.
    Ref(String),

    /// `( ... )` — grouping only; contributes no wrapper of its own to the
    /// compiled expression.
    Group(Vec<Expr>),

    /// `a . b . c` — children matched in order, separated by optional
    /// whitespace and a word boundary.
    Sequence(Vec<Expr>),

    /// `a ; b` — any one of the children.
    Alternation(Vec<Expr>),

    /// `a , b` — any of the children, one or more times, as a repeating
    /// unit.
    Repetition(Vec<Expr>),

    /// `? a` — the element to the right of the `?`, matched zero or one
    /// times.
    Optional(Vec<Expr>),

    /// `a :name` — a named capture around the element to the left of the
    /// label.
    Label { name: String, body: Vec<Expr> },

    /// A trailing comment carried through the expression list; compiles to
    /// nothing.
    Comment,

    /// A `?` with no element to bind; compiles to an empty optional group.
    Question,
}
