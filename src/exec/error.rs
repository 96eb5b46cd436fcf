use std::fmt::{Display, Formatter};

/// A script that parsed but couldn't be run.
///
/// Name resolution happens here rather than in the parser, so a script like
/// `invalid_function()` parses cleanly and then fails with
/// [`EvalError::UndefinedFunction`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalError {
    /// The script called a function this crate doesn't define.
    UndefinedFunction(String),
    /// The script used a selector this crate doesn't define.
    UndefinedSelector(String),
    /// A known function was called with the wrong number of arguments.
    Arity {
        name: String,
        expected: usize,
        actual: usize,
    },
    /// A known function was called with an argument of the wrong shape, e.g. `select(.h)`.
    BadArgument { name: String, message: String },
    /// The pattern given to `matches` isn't a valid regex.
    Regex { pattern: String, message: String },
    /// The script's top-level expression was a bare string literal.
    TopLevelString,
}

impl Display for EvalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalError::UndefinedFunction(name) => write!(f, "unknown function `{name}`"),
            EvalError::UndefinedSelector(name) => write!(f, "unknown selector `.{name}`"),
            EvalError::Arity {
                name,
                expected,
                actual,
            } => write!(f, "`{name}` expects {expected} argument(s), got {actual}"),
            EvalError::BadArgument { name, message } => {
                write!(f, "invalid argument to `{name}`: {message}")
            }
            EvalError::Regex { pattern, message } => {
                write!(f, "invalid regex {pattern:?}: {message}")
            }
            EvalError::TopLevelString => f.write_str("a string literal is not a runnable query"),
        }
    }
}

impl std::error::Error for EvalError {}
