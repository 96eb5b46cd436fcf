use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};

/// The CLI option surface.
///
/// The query is positional; input files are optional and default to stdin, with `"-"`
/// meaning stdin explicitly.
#[derive(Clone, Debug, PartialEq, Eq, Parser)]
#[command(version, about, long_about = None)]
pub struct RunOptions {
    /// The input format. Matched case-insensitively; recognized values are "text" and
    /// "markdown".
    #[arg(long, short, default_value = "markdown")]
    pub format: String,

    /// Specifies the output format. Defaults to plain lines.
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Quiet: do not print anything to stdout. The exit code will still be 0 if any
    /// values match, and non-0 if none do.
    #[arg(long, short)]
    pub quiet: bool,

    /// The query string, e.g. '.h' or 'select(contains("x"))'.
    #[arg(value_name = "query")]
    pub query: String,

    /// An optional list of input files, by path. If not provided, standard input will be
    /// used. A path of "-" represents standard input.
    #[arg(value_name = "files")]
    pub files: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One matched value per line.
    Text,
    /// A JSON object with a "values" array.
    Json,
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}
