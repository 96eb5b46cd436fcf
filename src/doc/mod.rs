//! The document model: parsed, format-specific representations of input text.
//!
//! A [`Document`] is either a plain-text line list or a Markdown block tree. Building one
//! never fails; only recognizing the format name can.

mod tree;

pub use tree::*;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// An input format name. Matching is case-insensitive: `"TEXT"`, `"Text"`, and `"text"` all
/// select [`Format::Text`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Text,
    Markdown,
}

/// A format name this crate doesn't recognize.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnsupportedFormat {
    pub(crate) name: String,
}

impl Display for UnsupportedFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unsupported input format: {}", self.name)
    }
}

impl std::error::Error for UnsupportedFormat {}

impl FromStr for Format {
    type Err = UnsupportedFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Format::Text),
            "markdown" => Ok(Format::Markdown),
            _ => Err(UnsupportedFormat { name: s.to_string() }),
        }
    }
}

/// The parsed form of one input.
#[derive(Clone, Debug, PartialEq)]
pub enum Document {
    Text(TextDoc),
    Markdown(MdDoc),
}

impl Document {
    /// Builds a document from input text.
    ///
    /// This never fails: empty input yields an empty document, and Markdown that the parser
    /// can't make sense of degrades to a single paragraph block.
    pub fn build(input: &str, format: Format) -> Self {
        match format {
            Format::Text => Document::Text(TextDoc::read(input)),
            Format::Markdown => Document::Markdown(MdDoc::read(input)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names_are_case_insensitive() {
        for name in ["text", "Text", "TEXT", "tExT"] {
            assert_eq!(Format::from_str(name), Ok(Format::Text));
        }
        for name in ["markdown", "Markdown", "MARKDOWN", "MarkDown"] {
            assert_eq!(Format::from_str(name), Ok(Format::Markdown));
        }
    }

    #[test]
    fn unknown_format_names_the_offender() {
        let err = Format::from_str("json").unwrap_err();
        assert_eq!(err.to_string(), "Unsupported input format: json");
    }

    #[test]
    fn build_selects_the_right_variant() {
        assert!(matches!(Document::build("hi", Format::Text), Document::Text(_)));
        assert!(matches!(Document::build("hi", Format::Markdown), Document::Markdown(_)));
    }
}
