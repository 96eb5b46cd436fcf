//! docq evaluates a small filter-and-select language against Markdown or plain-text
//! documents, and converts HTML into Markdown.
//!
//! The two flows are independent:
//!
//! - **Query**: input text + a format name build a [`Document`]; a script like
//!   `select(contains("line"))` or `.h` parses into an AST and runs against the document,
//!   yielding matched node texts in document order.
//! - **Convert**: [`convert_html_to_markdown`] maps an HTML DOM onto Markdown text under
//!   a few structural options.
//!
//! ## Examples
//!
//! ```
//! let engine = docq::Engine::new();
//!
//! let lines = engine
//!     .eval(r#"select(contains("line"))"#, "# line1\n## line2\nother", "text")
//!     .unwrap();
//! assert_eq!(lines, vec!["# line1".to_string(), "## line2".to_string()]);
//!
//! let headings = engine
//!     .eval(".h", "# Header\n\nSome text\n\n## Subheader", "markdown")
//!     .unwrap();
//! assert_eq!(headings, vec!["# Header".to_string(), "## Subheader".to_string()]);
//! ```
//!
//! For embedding from C, the [`capi`] module exposes the same functionality as a
//! foreign-callable surface with explicit ownership hand-off.

mod doc;
mod engine;
mod exec;
mod html2md;
mod query;

pub mod capi;
pub mod run;

pub use doc::{Block, BlockKind, Document, Format, MdDoc, TextDoc, UnsupportedFormat};
pub use engine::{Engine, Error};
pub use exec::{evaluate, EvalError};
pub use html2md::{
    convert_html_to_markdown, ConversionOptions, ConversionOptionsBuilder, ConvertError,
};
pub use query::{parse, Expr, ParseError};
