//! The engine facade: one reusable object that takes (script, input, format name) and
//! returns matched strings or a single error.

use crate::doc::{Document, Format, UnsupportedFormat};
use crate::exec::{self, EvalError};
use crate::query::{self, ParseError};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Anything that can go wrong between receiving a script and returning its results.
///
/// A call either fully succeeds with values and no error, or fails with exactly one of
/// these; there is no partial output.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// The format name wasn't recognized.
    UnsupportedFormat(UnsupportedFormat),
    /// The script didn't parse.
    Parse(ParseError),
    /// The script parsed but referenced an unknown name or misused a built-in.
    Eval(EvalError),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnsupportedFormat(err) => Display::fmt(err, f),
            Error::Parse(err) => Display::fmt(err, f),
            Error::Eval(err) => Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Error {}

impl From<UnsupportedFormat> for Error {
    fn from(value: UnsupportedFormat) -> Self {
        Error::UnsupportedFormat(value)
    }
}

impl From<ParseError> for Error {
    fn from(value: ParseError) -> Self {
        Error::Parse(value)
    }
}

impl From<EvalError> for Error {
    fn from(value: EvalError) -> Self {
        Error::Eval(value)
    }
}

/// A reusable script-evaluation engine.
///
/// The engine holds no per-call state: it is immutable, cheap to create, and safe to use
/// for any number of sequential evaluations. (It is also `Send + Sync`, so sharing one
/// across threads is fine, though each call still runs on the calling thread.)
///
/// # Examples
///
/// ```
/// let engine = docq::Engine::new();
/// let values = engine
///     .eval(r#"select(contains("line"))"#, "line one\nand two", "text")
///     .unwrap();
/// assert_eq!(values, vec!["line one".to_string()]);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Engine {
    _private: (),
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates a script against input text.
    ///
    /// Failures are checked in a fixed order: format recognition, then document build
    /// (which cannot fail), then script parse, then script evaluation. The first failure
    /// wins and nothing after it runs.
    pub fn eval(&self, script: &str, input: &str, format: &str) -> Result<Vec<String>, Error> {
        let format = Format::from_str(format)?;
        let doc = Document::build(input, format);
        let ast = query::parse(script)?;
        exec::evaluate(&ast, &doc).map_err(Error::from)
    }
}
