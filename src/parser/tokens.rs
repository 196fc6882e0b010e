//  TOKENS.rs
//    by Lut99
//
//  Created:
//    14 Oct 2026, 11:20:04
//  Last edited:
//    16 Oct 2026, 09:47:31
//  Auto updated?
//    Yes
//
//  Description:
//!   Defines parsers for the smallest bits of the rule language:
//!   identifiers, keywords and quoted constants.
//

use nom::bytes::complete::{tag, take_while, take_while1};
use nom::character::complete::{char as pchar, multispace0, satisfy};
use nom::combinator::{not, peek, recognize};
use nom::sequence::{delimited, pair, terminated};
use nom::IResult;


/***** HELPERS *****/
/// Returns whether the given character may start an identifier.
#[inline]
pub(crate) fn is_ident_start(c: char) -> bool { c.is_ascii_alphabetic() || c == '_' }

/// Returns whether the given character may continue an identifier.
#[inline]
pub(crate) fn is_ident_continue(c: char) -> bool { c.is_ascii_alphanumeric() || c == '_' }





/***** LIBRARY *****/
/// Wraps a parser such that it eats any whitespace before and after it.
///
/// # Arguments
/// - `inner`: The parser to wrap.
///
/// # Returns
/// A parser that behaves like `inner` but skips surrounding whitespace.
pub fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

/// Parses an identifier, i.e., a predicate name, variable name or keyword.
///
/// # Example
/// ```rust
/// use forward_rules::parser::tokens::ident;
///
/// assert_eq!(ident("op1(X)"), Ok(("(X)", "op1")));
/// assert_eq!(ident("Foo_bar"), Ok(("", "Foo_bar")));
/// assert!(ident("'foo'").is_err());
/// ```
pub fn ident(input: &str) -> IResult<&str, &str> { recognize(pair(take_while1(is_ident_start), take_while(is_ident_continue)))(input) }

/// Parses a given keyword, but only if it is not a prefix of a longer identifier.
///
/// # Arguments
/// - `word`: The keyword to parse (e.g., `and`).
///
/// # Returns
/// A parser for that keyword.
///
/// # Example
/// ```rust
/// use forward_rules::parser::tokens::keyword;
///
/// assert_eq!(keyword("not")("not op1(X)"), Ok((" op1(X)", "not")));
/// assert_eq!(keyword("not")("not(op1(X))"), Ok(("(op1(X))", "not")));
/// assert!(keyword("not")("nothing(X)").is_err());
/// ```
pub fn keyword<'a>(word: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    terminated(tag(word), not(peek(satisfy(is_ident_continue))))
}

/// Parses a single-quoted constant, returning its contents without quotes.
///
/// # Example
/// ```rust
/// use forward_rules::parser::tokens::quoted;
///
/// assert_eq!(quoted("'val1',X"), Ok((",X", "val1")));
/// assert_eq!(quoted("''"), Ok(("", "")));
/// assert!(quoted("'val1").is_err());
/// ```
pub fn quoted(input: &str) -> IResult<&str, &str> { delimited(pchar('\''), take_while(|c: char| c != '\''), pchar('\''))(input) }





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_boundaries() {
        assert_eq!(keyword("and")("and op1(X)"), Ok((" op1(X)", "and")));
        assert_eq!(keyword("and")("and"), Ok(("", "and")));
        assert!(keyword("and")("andy(X)").is_err());
        assert!(keyword("and")("and_1(X)").is_err());
        assert!(keyword("not")("no op1(X)").is_err());
    }

    #[test]
    fn test_ws() {
        assert_eq!(ws(ident)("  op1 \n("), Ok(("(", "op1")));
        assert_eq!(ws(quoted)("'a' ,"), Ok((",", "a")));
    }
}
