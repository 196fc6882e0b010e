//  EXPRS.rs
//    by Lut99
//
//  Created:
//    14 Oct 2026, 13:05:26
//  Last edited:
//    17 Oct 2026, 10:12:48
//  Auto updated?
//    Yes
//
//  Description:
//!   Defines parsers for the lefthand side of a rule, i.e., boolean
//!   [`Expr`](ast::Expr)essions over predicates.
//!
//!   The grammar is, from loosest to tightest binding:
//!   ```plain
//!   expr    ::= unary ( "and" unary )*
//!   unary   ::= "not" unary | primary
//!   primary ::= "(" expr ")" | predicate | term ( "==" | "!=" ) term
//!   ```
//

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::char as pchar;
use nom::combinator::map;
use nom::multi::many0;
use nom::sequence::{delimited, pair, preceded, tuple};
use nom::IResult;

use super::atoms::{predicate, term};
use super::tokens::{ident, keyword, ws};
use crate::ast;


/***** HELPERS *****/
/// Parses a comparison operator.
fn compare_op(input: &str) -> IResult<&str, ast::CompareOp> {
    alt((map(tag("=="), |_| ast::CompareOp::Eq), map(tag("!="), |_| ast::CompareOp::Ne)))(input)
}

/// Parses a comparison between two terms.
fn comparison(input: &str) -> IResult<&str, ast::Comparison> {
    map(tuple((term, ws(compare_op), term)), |(lhs, op, rhs)| ast::Comparison { lhs, op, rhs })(input)
}

/// Parses a parenthesized expression, a predicate or a comparison.
fn primary(input: &str) -> IResult<&str, ast::Expr> {
    alt((
        map(delimited(pchar('('), ws(expr), pchar(')')), |e| ast::Expr::Group(Box::new(e))),
        map(predicate, ast::Expr::Atom),
        map(comparison, ast::Expr::Compare),
    ))(input)
}

/// Parses a (possibly negated) primary.
fn unary(input: &str) -> IResult<&str, ast::Expr> {
    alt((map(preceded(keyword("not"), ws(unary)), |e| ast::Expr::Not(Box::new(e))), primary))(input)
}





/***** LIBRARY *****/
/// Parses a full lefthand side expression.
///
/// Conjunctions of a single operand are not wrapped in an [`Expr::And`](ast::Expr::And).
///
/// # Example
/// ```rust
/// use forward_rules::ast::Expr;
/// use forward_rules::parser::exprs::expr;
///
/// let (rest, e) = expr("op1(X) and not op2(Y) and X!=Y").unwrap();
/// assert_eq!(rest, "");
/// assert!(matches!(e, Expr::And(ref es) if es.len() == 3));
/// assert_eq!(e.to_string(), "op1(X) and not op2(Y) and X!=Y");
/// ```
pub fn expr(input: &str) -> IResult<&str, ast::Expr> {
    map(pair(unary, many0(preceded(ws(keyword("and")), unary))), |(first, rest)| {
        if rest.is_empty() {
            first
        } else {
            let mut exprs: Vec<ast::Expr> = Vec::with_capacity(1 + rest.len());
            exprs.push(first);
            exprs.extend(rest);
            ast::Expr::And(exprs)
        }
    })(input)
}

/// Scans an expression for an operator that the language deliberately does not support.
///
/// Only `or` exists as such. It is recognized as a bare word outside of quotes and outside of
/// predicates, i.e., neither a predicate name nor one of its arguments.
///
/// # Arguments
/// - `input`: The text to scan.
///
/// # Returns
/// The name of the first unsupported operator found, or [`None`] if there is none.
pub fn find_unsupported_operator(input: &str) -> Option<&'static str> {
    let mut rest: &str = input;
    while let Some(c) = rest.chars().next() {
        if c == '\'' {
            // Skip quoted constants entirely
            rest = match rest[1..].find('\'') {
                Some(pos) => &rest[pos + 2..],
                None => return None,
            };
        } else if let Ok((after, _)) = predicate(rest) {
            rest = after;
        } else if let Ok((after, word)) = ident(rest) {
            if word == "or" && !after.trim_start().starts_with('(') {
                return Some("or");
            }
            rest = after;
        } else {
            rest = &rest[c.len_utf8()..];
        }
    }
    None
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use nom::combinator::all_consuming;

    use super::*;

    #[test]
    fn test_expr_nesting() {
        let (_, e) = all_consuming(expr)("not (op1(X) and not op2('a')) and op3(X)").unwrap();
        assert_eq!(e.to_string(), "not (op1(X) and not op2('a')) and op3(X)");
        match e {
            ast::Expr::And(es) => {
                assert!(matches!(es[0], ast::Expr::Not(_)));
                assert!(matches!(es[1], ast::Expr::Atom(_)));
            },
            other => panic!("Expected a conjunction, got {other:?}"),
        }
    }

    #[test]
    fn test_expr_comparisons() {
        let (_, e) = all_consuming(expr)("op1(X,Y) and X == 'a' and Y!=X").unwrap();
        assert_eq!(e.to_string(), "op1(X,Y) and X=='a' and Y!=X");
    }

    #[test]
    fn test_expr_keyword_prefix() {
        // `nothing` and `andy` are predicate names, not keywords
        let (_, e) = all_consuming(expr)("nothing(X) and andy(X)").unwrap();
        assert_eq!(e.atoms().len(), 2);
    }

    #[test]
    fn test_find_unsupported_operator() {
        assert_eq!(find_unsupported_operator("op1(X) or op2(Y)"), Some("or"));
        assert_eq!(find_unsupported_operator("op1('or') and op2(Y)"), None);
        assert_eq!(find_unsupported_operator("or(X) and op2(Y)"), None);
        assert_eq!(find_unsupported_operator("op1(X) and orange(Y)"), None);

        // Arguments named `or` are just variables
        assert_eq!(find_unsupported_operator("op1(or) and op2(X, or )"), None);
        assert_eq!(find_unsupported_operator("op1(X,or) or op2(Y)"), Some("or"));
        assert_eq!(find_unsupported_operator("(op1(X) or op2(Y))"), Some("or"));
        assert!(crate::parser::parse_left("op1(or) and not op2(or)").is_ok());
    }
}
