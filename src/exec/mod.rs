//! Interpretation: resolving a parsed script against the built-in registry and running it
//! over a document's candidate set.
//!
//! Evaluation is read-only and deterministic: candidates are handled in plain `Vec`s, in
//! document order, with no hash-iteration anywhere.

mod error;
mod ops;

pub use error::EvalError;

use crate::doc::{Document, MdDoc, TextDoc};
use crate::exec::ops::Op;
use crate::query::Expr;

/// Evaluates a parsed script against a document, producing matched node texts in document
/// order. Zero matches is an empty `Ok`, not an error.
pub fn evaluate(expr: &Expr, doc: &Document) -> Result<Vec<String>, EvalError> {
    let op = ops::resolve(expr)?;
    match doc {
        Document::Text(text) => run_lines(&op, text),
        Document::Markdown(md) => run_blocks(&op, md),
    }
}

fn run_lines(op: &Op, doc: &TextDoc) -> Result<Vec<String>, EvalError> {
    match op {
        // selectors address Markdown block kinds; a plain-text document has none
        Op::Keep(_) => Ok(Vec::new()),
        Op::Filter(pred) => {
            let mut out = Vec::new();
            for line in &doc.lines {
                if pred.matches(line)? {
                    out.push(line.clone());
                }
            }
            Ok(out)
        }
        Op::Map(transform) => Ok(doc.lines.iter().map(|line| transform.apply(line)).collect()),
    }
}

fn run_blocks(op: &Op, doc: &MdDoc) -> Result<Vec<String>, EvalError> {
    let blocks = doc.walk();
    match op {
        Op::Keep(kind) => Ok(blocks
            .into_iter()
            .filter(|block| kind.matches(block))
            .map(|block| block.raw_text.clone())
            .collect()),
        Op::Filter(pred) => {
            let mut out = Vec::new();
            for block in blocks {
                if pred.matches(&block.raw_text)? {
                    out.push(block.raw_text.clone());
                }
            }
            Ok(out)
        }
        Op::Map(transform) => Ok(blocks
            .into_iter()
            .map(|block| transform.apply(&block.raw_text))
            .collect()),
    }
}
