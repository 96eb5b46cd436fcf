use crate::engine::{self, Engine};
use crate::run::cli::{OutputFormat, RunOptions};
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::io::Write;
use std::{env, io};

#[derive(Debug)]
pub enum Error {
    Engine(engine::Error),
    FileReadError(Input, io::Error),
}

#[derive(Debug)]
pub enum Input {
    Stdin,
    File(String),
}

impl Error {
    pub fn from_io_error(error: io::Error, file: Input) -> Self {
        Error::FileReadError(file, error)
    }
}

impl Display for Input {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::Stdin => f.write_str("stdin"),
            Input::File(file) => write!(f, "file {file:?}"),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Engine(err) => writeln!(f, "{err}"),
            Error::FileReadError(file, err) => {
                if env::var("DOCQ_PORTABLE_ERRORS").unwrap_or_default().is_empty() {
                    writeln!(f, "{err} while reading {file}")
                } else {
                    writeln!(f, "{} while reading {file}", err.kind())
                }
            }
        }
    }
}

pub trait OsFacade {
    fn read_stdin(&self) -> io::Result<String>;
    fn read_file(&self, path: &str) -> io::Result<String>;
    fn stdout(&mut self) -> impl Write;
    fn write_error(&mut self, err: Error);

    fn read_all(&self, paths: &[String]) -> Result<String, Error> {
        if paths.is_empty() {
            return self.read_stdin().map_err(|err| Error::from_io_error(err, Input::Stdin));
        }
        let mut contents = String::new();
        let mut have_read_stdin = false;
        for path in paths {
            if path == "-" {
                if !have_read_stdin {
                    contents.push_str(
                        &self
                            .read_stdin()
                            .map_err(|err| Error::from_io_error(err, Input::Stdin))?,
                    );
                    have_read_stdin = true;
                }
            } else {
                let path_contents = self
                    .read_file(path)
                    .map_err(|err| Error::from_io_error(err, Input::File(path.to_string())))?;
                contents.push_str(&path_contents);
            }
            contents.push('\n');
        }
        Ok(contents)
    }
}

#[derive(Serialize)]
struct JsonOutput<'values> {
    values: &'values [String],
}

/// Runs one evaluation end to end: read input, evaluate the query, print the values.
/// Returns whether anything matched.
pub fn run(options: &RunOptions, os: &mut impl OsFacade) -> bool {
    match run_or_error(options, os) {
        Ok(found_any) => found_any,
        Err(err) => {
            os.write_error(err);
            false
        }
    }
}

fn run_or_error(options: &RunOptions, os: &mut impl OsFacade) -> Result<bool, Error> {
    let contents = os.read_all(&options.files)?;
    let engine = Engine::new();
    let values = engine
        .eval(&options.query, &contents, &options.format)
        .map_err(Error::Engine)?;

    let found_any = !values.is_empty();

    if !options.quiet {
        let mut stdout = os.stdout();
        match options.output {
            OutputFormat::Text => {
                for value in &values {
                    let _ = writeln!(stdout, "{value}");
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer(&mut stdout, &JsonOutput { values: &values }).unwrap();
                let _ = writeln!(stdout);
            }
        }
    }

    Ok(found_any)
}
