use crate::doc::{Block, BlockKind};
use crate::exec::error::EvalError;
use crate::query::Expr;
use fancy_regex::Regex;

/// A fully resolved script, ready to run over a candidate set. Resolution front-loads all
/// name, arity, and regex errors so the run itself can stay simple.
#[derive(Debug)]
pub(crate) enum Op {
    /// Keep candidates of one block kind (`.h`, `.code`, ...).
    Keep(SelectorKind),
    /// Keep candidates whose text satisfies a predicate.
    Filter(Pred),
    /// Replace each candidate's text.
    Map(Transform),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SelectorKind {
    Heading(Option<u8>),
    Paragraph,
    CodeBlock,
    List,
    ListItem,
    BlockQuote,
    Table,
    Html,
    ThematicBreak,
}

impl SelectorKind {
    pub fn matches(&self, block: &Block) -> bool {
        match self {
            SelectorKind::Heading(None) => block.kind == BlockKind::Heading,
            SelectorKind::Heading(Some(level)) => {
                block.kind == BlockKind::Heading && block.level == Some(*level)
            }
            SelectorKind::Paragraph => block.kind == BlockKind::Paragraph,
            SelectorKind::CodeBlock => block.kind == BlockKind::CodeBlock,
            SelectorKind::List => block.kind == BlockKind::List,
            SelectorKind::ListItem => block.kind == BlockKind::ListItem,
            SelectorKind::BlockQuote => block.kind == BlockKind::BlockQuote,
            SelectorKind::Table => block.kind == BlockKind::Table,
            SelectorKind::Html => block.kind == BlockKind::Html,
            SelectorKind::ThematicBreak => block.kind == BlockKind::ThematicBreak,
        }
    }
}

#[derive(Debug)]
pub(crate) enum Pred {
    Contains(String),
    StartsWith(String),
    EndsWith(String),
    Matches(Regex),
}

impl Pred {
    pub fn matches(&self, haystack: &str) -> Result<bool, EvalError> {
        match self {
            Pred::Contains(needle) => Ok(haystack.contains(needle)),
            Pred::StartsWith(prefix) => Ok(haystack.starts_with(prefix)),
            Pred::EndsWith(suffix) => Ok(haystack.ends_with(suffix)),
            Pred::Matches(re) => re.is_match(haystack).map_err(|e| EvalError::Regex {
                pattern: re.as_str().to_string(),
                message: e.to_string(),
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Transform {
    Upcase,
    Downcase,
    Trim,
}

impl Transform {
    pub fn apply(&self, text: &str) -> String {
        match self {
            Transform::Upcase => text.to_uppercase(),
            Transform::Downcase => text.to_lowercase(),
            Transform::Trim => text.trim().to_string(),
        }
    }
}

pub(crate) fn resolve(expr: &Expr) -> Result<Op, EvalError> {
    match expr {
        Expr::Selector(name) => Ok(Op::Keep(selector_kind(name)?)),
        Expr::Call { name, args } => match name.as_str() {
            "select" => {
                check_arity(name, 1, args)?;
                Ok(Op::Filter(resolve_pred(name, &args[0])?))
            }
            "contains" | "starts_with" | "ends_with" | "matches" => {
                // a bare predicate filters exactly like `select` of it
                Ok(Op::Filter(resolve_pred_call(name, args)?))
            }
            "upcase" => {
                check_arity(name, 0, args)?;
                Ok(Op::Map(Transform::Upcase))
            }
            "downcase" => {
                check_arity(name, 0, args)?;
                Ok(Op::Map(Transform::Downcase))
            }
            "trim" => {
                check_arity(name, 0, args)?;
                Ok(Op::Map(Transform::Trim))
            }
            _ => Err(EvalError::UndefinedFunction(name.clone())),
        },
        Expr::StringLit(_) => Err(EvalError::TopLevelString),
    }
}

fn resolve_pred(outer: &str, arg: &Expr) -> Result<Pred, EvalError> {
    match arg {
        Expr::Call { name, args } => match name.as_str() {
            "contains" | "starts_with" | "ends_with" | "matches" => resolve_pred_call(name, args),
            "select" | "upcase" | "downcase" | "trim" => Err(EvalError::BadArgument {
                name: outer.to_string(),
                message: format!("`{name}` is not a predicate"),
            }),
            _ => Err(EvalError::UndefinedFunction(name.clone())),
        },
        Expr::Selector(name) => {
            // validate the selector name first so `.zzz` still reports as undefined
            selector_kind(name)?;
            Err(EvalError::BadArgument {
                name: outer.to_string(),
                message: format!("expected a predicate, got the selector `.{name}`"),
            })
        }
        Expr::StringLit(_) => Err(EvalError::BadArgument {
            name: outer.to_string(),
            message: "expected a predicate, got a string literal".to_string(),
        }),
    }
}

fn resolve_pred_call(name: &str, args: &[Expr]) -> Result<Pred, EvalError> {
    check_arity(name, 1, args)?;
    let Expr::StringLit(text) = &args[0] else {
        return Err(EvalError::BadArgument {
            name: name.to_string(),
            message: "expected a string literal".to_string(),
        });
    };
    match name {
        "contains" => Ok(Pred::Contains(text.clone())),
        "starts_with" => Ok(Pred::StartsWith(text.clone())),
        "ends_with" => Ok(Pred::EndsWith(text.clone())),
        "matches" => match Regex::new(text) {
            Ok(re) => Ok(Pred::Matches(re)),
            Err(e) => Err(EvalError::Regex {
                pattern: text.clone(),
                message: e.to_string(),
            }),
        },
        other => unreachable!("resolve_pred_call invoked for non-predicate `{other}`"),
    }
}

fn check_arity(name: &str, expected: usize, args: &[Expr]) -> Result<(), EvalError> {
    if args.len() != expected {
        return Err(EvalError::Arity {
            name: name.to_string(),
            expected,
            actual: args.len(),
        });
    }
    Ok(())
}

fn selector_kind(name: &str) -> Result<SelectorKind, EvalError> {
    match name {
        "h" => Ok(SelectorKind::Heading(None)),
        "h1" => Ok(SelectorKind::Heading(Some(1))),
        "h2" => Ok(SelectorKind::Heading(Some(2))),
        "h3" => Ok(SelectorKind::Heading(Some(3))),
        "h4" => Ok(SelectorKind::Heading(Some(4))),
        "h5" => Ok(SelectorKind::Heading(Some(5))),
        "h6" => Ok(SelectorKind::Heading(Some(6))),
        "p" | "paragraph" => Ok(SelectorKind::Paragraph),
        "code" => Ok(SelectorKind::CodeBlock),
        "list" => Ok(SelectorKind::List),
        "li" | "list_item" => Ok(SelectorKind::ListItem),
        "quote" | "blockquote" => Ok(SelectorKind::BlockQuote),
        "table" => Ok(SelectorKind::Table),
        "html" => Ok(SelectorKind::Html),
        "hr" | "horizontal_rule" => Ok(SelectorKind::ThematicBreak),
        _ => Err(EvalError::UndefinedSelector(name.to_string())),
    }
}
