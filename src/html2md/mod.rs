//! Converts HTML into Markdown text.
//!
//! Parsing is permissive: malformed or unclosed tags degrade to a best-effort DOM (the
//! browser-style recovery html5ever does) rather than failing the conversion. The output
//! is fully built before it is returned; there is never partial output alongside an error.

mod dom;
mod front_matter;
mod options;
mod writer;

pub use options::{ConversionOptions, ConversionOptionsBuilder};

use scraper::Html;
use std::fmt::{Display, Formatter};

/// An error produced while converting HTML to Markdown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConvertError {
    /// Head metadata that couldn't be serialized as YAML front matter.
    FrontMatter(String),
}

impl Display for ConvertError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertError::FrontMatter(message) => {
                write!(f, "front matter serialization failed: {message}")
            }
        }
    }
}

impl std::error::Error for ConvertError {}

/// Converts HTML text into Markdown under the given options.
///
/// Empty (or whitespace-only) input converts to an empty string. The document `<title>`,
/// when present, renders as the leading output block: a plain paragraph by default, or a
/// level-1 heading with [`ConversionOptions::use_title_as_h1`].
///
/// # Examples
///
/// ```
/// use docq::{convert_html_to_markdown, ConversionOptions};
///
/// let md = convert_html_to_markdown("<p>Hello, World!</p>", ConversionOptions::default()).unwrap();
/// assert_eq!(md, "Hello, World!");
/// ```
pub fn convert_html_to_markdown(
    html: &str,
    options: ConversionOptions,
) -> Result<String, ConvertError> {
    if html.trim().is_empty() {
        return Ok(String::new());
    }
    let parsed = Html::parse_document(html);
    let doc = dom::map_document(&parsed);

    let mut front = String::new();
    if options.generate_front_matter {
        if let Some(map) = front_matter::collect(doc.head.as_ref()) {
            front = front_matter::render(&map)?;
        }
    }

    let mut blocks: Vec<String> = Vec::new();
    if let Some(title) = doc.title() {
        blocks.push(if options.use_title_as_h1 {
            format!("# {title}")
        } else {
            title
        });
    }
    blocks.extend(writer::blocks(&doc.roots, &options));

    Ok(format!("{front}{}", blocks.join("\n\n")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_converts_to_empty_output() {
        assert_eq!(convert_html_to_markdown("", ConversionOptions::default()).unwrap(), "");
        assert_eq!(
            convert_html_to_markdown("   \n ", ConversionOptions::default()).unwrap(),
            ""
        );
    }

    #[test]
    fn simple_paragraph() {
        assert_eq!(
            convert_html_to_markdown("<p>Hello, World!</p>", ConversionOptions::default()).unwrap(),
            "Hello, World!"
        );
    }

    #[test]
    fn title_renders_even_without_the_h1_option() {
        let html = "<html><head><title>My Title</title></head><body><p>Body</p></body></html>";
        assert_eq!(
            convert_html_to_markdown(html, ConversionOptions::default()).unwrap(),
            "My Title\n\nBody"
        );
    }

    #[test]
    fn title_as_h1() {
        let html = "<html><head><title>My Document</title></head><body><p>Body text</p></body></html>";
        let options = ConversionOptions {
            use_title_as_h1: true,
            ..ConversionOptions::default()
        };
        assert_eq!(
            convert_html_to_markdown(html, options).unwrap(),
            "# My Document\n\nBody text"
        );
    }

    #[test]
    fn front_matter_and_title_compose() {
        let html = "<html><head><title>Test Page</title></head><body><p>Content</p></body></html>";
        let options = ConversionOptions {
            generate_front_matter: true,
            use_title_as_h1: true,
            ..ConversionOptions::default()
        };
        assert_eq!(
            convert_html_to_markdown(html, options).unwrap(),
            "---\ntitle: Test Page\n---\n\n# Test Page\n\nContent"
        );
    }

    #[test]
    fn front_matter_omitted_when_head_is_bare() {
        let html = "<html><head></head><body><p>Body</p></body></html>";
        let options = ConversionOptions {
            generate_front_matter: true,
            ..ConversionOptions::default()
        };
        assert_eq!(convert_html_to_markdown(html, options).unwrap(), "Body");
    }
}
