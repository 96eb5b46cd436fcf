/// One node of a parsed script.
///
/// A script is syntactically exactly one top-level expression; arguments are themselves
/// expressions, which is what makes `select(contains("x"))` compose.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    /// A function application: `select(contains("x"))`.
    Call { name: String, args: Vec<Expr> },
    /// A double-quoted literal. The parser does no escape processing, so the string is
    /// exactly the characters between the quotes.
    StringLit(String),
    /// A node-kind selector such as `.h` or `.code`. Holds the identifier after the dot.
    Selector(String),
}
