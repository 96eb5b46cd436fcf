use crate::query::ast::Expr;
use crate::query::error::ParseError;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "query/grammar.pest"]
struct QueryPairs;

pub(crate) type Pair<'a> = pest::iterators::Pair<'a, Rule>;

/// Parses a script into its single top-level expression.
///
/// Unknown identifiers parse successfully; resolving them against the built-in registry
/// happens at evaluation time. Malformed syntax (unbalanced parens, an unterminated
/// string, an empty script) is an error here.
pub fn parse(script: &str) -> Result<Expr, ParseError> {
    let mut pairs = QueryPairs::parse(Rule::top, script).map_err(format_err)?;
    let top = pairs.next().expect("internal error: top rule always produces one pair");
    let expr = top
        .into_inner()
        .next()
        .expect("internal error: top rule always contains an expr");
    Ok(build_expr(expr))
}

fn build_expr(pair: Pair) -> Expr {
    match pair.as_rule() {
        Rule::expr => {
            let inner = pair
                .into_inner()
                .next()
                .expect("internal error: expr always has one alternative");
            build_expr(inner)
        }
        Rule::call => {
            let mut inner = pair.into_inner();
            let name = inner
                .next()
                .expect("internal error: call always starts with an ident")
                .as_str()
                .to_string();
            let args = match inner.next() {
                Some(args_pair) => args_pair.into_inner().map(build_expr).collect(),
                None => Vec::new(),
            };
            Expr::Call { name, args }
        }
        Rule::selector => {
            let ident = pair
                .into_inner()
                .next()
                .expect("internal error: selector always contains an ident");
            Expr::Selector(ident.as_str().to_string())
        }
        Rule::string => {
            let body = pair
                .into_inner()
                .next()
                .expect("internal error: string always contains a body");
            Expr::StringLit(body.as_str().to_string())
        }
        other => unreachable!("expression grammar produced unexpected rule {other:?}"),
    }
}

fn format_err(err: pest::error::Error<Rule>) -> ParseError {
    let renamed = err.renamed_rules(|rule| {
        match rule {
            Rule::EOI => "end of input",
            Rule::WHITESPACE => "whitespace",
            Rule::top => "query",
            Rule::expr => "expression",
            Rule::call => "function call",
            Rule::args => "argument list",
            Rule::selector => "selector",
            Rule::ident => "identifier",
            Rule::string | Rule::string_body => "string literal",
        }
        .to_string()
    });
    ParseError {
        pest_error: std::rc::Rc::new(renamed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, args: Vec<Expr>) -> Expr {
        Expr::Call {
            name: name.to_string(),
            args,
        }
    }

    #[test]
    fn bare_selector() {
        assert_eq!(parse(".h"), Ok(Expr::Selector("h".to_string())));
        assert_eq!(parse(".h2"), Ok(Expr::Selector("h2".to_string())));
    }

    #[test]
    fn zero_arg_call() {
        assert_eq!(parse("upcase()"), Ok(call("upcase", vec![])));
    }

    #[test]
    fn nested_call_with_string() {
        assert_eq!(
            parse(r#"select(contains("line"))"#),
            Ok(call(
                "select",
                vec![call("contains", vec![Expr::StringLit("line".to_string())])]
            ))
        );
    }

    #[test]
    fn multiple_args() {
        assert_eq!(
            parse(r#"between("a", "b")"#),
            Ok(call(
                "between",
                vec![
                    Expr::StringLit("a".to_string()),
                    Expr::StringLit("b".to_string())
                ]
            ))
        );
    }

    #[test]
    fn whitespace_is_insignificant() {
        assert_eq!(
            parse(" select( contains( \"x\" ) ) "),
            parse(r#"select(contains("x"))"#),
        );
    }

    #[test]
    fn unknown_identifiers_parse() {
        // resolution is the interpreter's job
        assert_eq!(parse("invalid_function()"), Ok(call("invalid_function", vec![])));
        assert_eq!(parse(".zzz"), Ok(Expr::Selector("zzz".to_string())));
    }

    #[test]
    fn string_bodies_take_no_escapes() {
        assert_eq!(
            parse(r#"contains("a\nb")"#),
            Ok(call("contains", vec![Expr::StringLit(r"a\nb".to_string())]))
        );
    }

    #[test]
    fn empty_script_is_a_syntax_error() {
        assert!(parse("").is_err());
        assert!(parse("   ").is_err());
    }

    #[test]
    fn unbalanced_parens_are_a_syntax_error() {
        assert!(parse("select(contains(\"x\")").is_err());
        assert!(parse("select)").is_err());
    }

    #[test]
    fn unterminated_string_is_a_syntax_error() {
        assert!(parse(r#"contains("line)"#).is_err());
    }

    #[test]
    fn two_top_level_expressions_are_a_syntax_error() {
        assert!(parse(".h .p").is_err());
    }

    #[test]
    fn error_message_is_nonempty() {
        let err = parse("select(").unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
