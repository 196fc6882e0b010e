//  ATOMS.rs
//    by Lut99
//
//  Created:
//    14 Oct 2026, 11:41:52
//  Last edited:
//    16 Oct 2026, 09:49:10
//  Auto updated?
//    Yes
//
//  Description:
//!   Defines parsers for [`Term`](ast::Term)s and
//!   [`Predicate`](ast::Predicate)s.
//

use nom::branch::alt;
use nom::character::complete::{char as pchar, multispace0};
use nom::combinator::map;
use nom::multi::separated_list0;
use nom::sequence::{delimited, pair, preceded};
use nom::IResult;

use super::tokens::{ident, quoted, ws};
use crate::ast;


/***** LIBRARY *****/
/// Parses a single argument of a predicate.
///
/// Quoted arguments become [`Term::Constant`](ast::Term::Constant)s, bare identifiers become
/// [`Term::Variable`](ast::Term::Variable)s.
///
/// # Example
/// ```rust
/// use forward_rules::ast::Term;
/// use forward_rules::parser::atoms::term;
///
/// assert_eq!(term("'foo')"), Ok((")", Term::Constant("foo".into()))));
/// assert_eq!(term("X)"), Ok((")", Term::Variable("X".into()))));
/// assert!(term("foo')").is_ok_and(|(rest, _)| rest == "')"));
/// ```
pub fn term(input: &str) -> IResult<&str, ast::Term> {
    alt((map(quoted, |value: &str| ast::Term::Constant(value.into())), map(ident, |name: &str| ast::Term::Variable(name.into()))))(input)
}

/// Parses a predicate, i.e., a name followed by a parenthesized, comma-separated list of terms.
///
/// Whitespace is allowed around the arguments but not between the name and the opening
/// parenthesis. Anything after the closing parenthesis is left alone.
///
/// # Example
/// ```rust
/// use forward_rules::ast::{Predicate, Term};
/// use forward_rules::parser::atoms::predicate;
///
/// assert_eq!(predicate("op()"), Ok(("", Predicate::new("op", []))));
/// assert_eq!(
///     predicate("op('op1', X) and"),
///     Ok((" and", Predicate::new("op", [Term::Constant("op1".into()), Term::Variable("X".into())])))
/// );
/// assert!(predicate("op").is_err());
/// ```
pub fn predicate(input: &str) -> IResult<&str, ast::Predicate> {
    map(
        pair(ident, delimited(pchar('('), separated_list0(pchar(','), ws(term)), preceded(multispace0, pchar(')')))),
        |(name, values)| ast::Predicate { name: name.into(), values },
    )(input)
}





/***** TESTS *****/
