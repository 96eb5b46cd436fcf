use crate::query::parser::Rule;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// A script that didn't parse.
///
/// Wraps the underlying pest error; [`Display`] renders pest's human-readable message,
/// which points at the offending spot in the script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub(crate) pest_error: Rc<pest::error::Error<Rule>>,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.pest_error, f)
    }
}

impl std::error::Error for ParseError {}

impl From<pest::error::Error<Rule>> for ParseError {
    fn from(value: pest::error::Error<Rule>) -> Self {
        Self {
            pest_error: Rc::new(value),
        }
    }
}
