//  MOD.rs
//    by Lut99
//
//  Created:
//    14 Oct 2026, 11:12:40
//  Last edited:
//    18 Oct 2026, 11:30:02
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements a parser for rules, facts and their parts using [`nom`].
//!
//!   The submodules define the actual combinators. This module wraps them
//!   in entry points that parse a complete string and return a
//!   descriptive [`Error`] if that failed.
//

// Declare appropriate submodules
pub mod actions;
pub mod atoms;
pub mod exprs;
pub mod rules;
pub mod tokens;

// Imports
use std::error;
use std::fmt::{Display, Formatter, Result as FResult};

use nom::combinator::all_consuming;
use nom::IResult;
pub use rules::parse_rule;
use tokens::ws;

use crate::ast::{Action, ActionKind, ContainsVariablesError, Fact, LeftExpression, Predicate, RightExpression};


/***** ERRORS *****/
/// Defines the syntax errors that may occur when parsing.
#[derive(Debug)]
pub enum Error {
    /// A rule was missing one of its separators.
    MissingSeparator { input: String, separator: &'static str },
    /// A rule had a separator more than once.
    DuplicateSeparator { input: String, separator: &'static str },
    /// A rule had an empty name.
    IllegalRuleName { input: String, name: String },
    /// The lefthand side of a rule used an operator that isn't supported.
    UnsupportedOperator { input: String, operator: &'static str },
    /// Failed to parse a predicate.
    IllegalPredicate { input: String, rest: String },
    /// Failed to parse a lefthand side expression.
    IllegalExpression { input: String, rest: String },
    /// Failed to parse a righthand side list of actions.
    IllegalActions { input: String, rest: String },
    /// An action had a kind we don't know.
    UnknownActionKind { input: String, kind: String },
    /// A fact contained variables.
    NotAFact { input: String, err: ContainsVariablesError },
}
impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        use Error::*;
        match self {
            MissingSeparator { input, separator } => write!(f, "Incorrect syntax for rule '{input}' (missing '{separator}')"),
            DuplicateSeparator { input, separator } => write!(f, "Incorrect syntax for rule '{input}' ('{separator}' occurs more than once)"),
            IllegalRuleName { input, name } => write!(f, "Incorrect syntax for rule '{input}' ('{name}' is not a valid rule name)"),
            UnsupportedOperator { input, operator } => write!(f, "Incorrect syntax for expression '{input}' (unsupported operator '{operator}')"),
            IllegalPredicate { input, rest } => write!(f, "Incorrect syntax for predicate '{input}' (failed at '{rest}')"),
            IllegalExpression { input, rest } => write!(f, "Incorrect syntax for expression '{input}' (failed at '{rest}')"),
            IllegalActions { input, rest } => write!(f, "Incorrect syntax for actions '{input}' (failed at '{rest}')"),
            UnknownActionKind { input, kind } => write!(
                f,
                "Incorrect syntax for action '{input}' (unknown kind '{kind}'; expected '{}', '{}' or '{}')",
                ActionKind::Add,
                ActionKind::Remove,
                ActionKind::Function
            ),
            NotAFact { input, .. } => write!(f, "Cannot parse '{input}' as a fact"),
        }
    }
}
impl error::Error for Error {
    #[inline]
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::NotAFact { err, .. } => Some(err),
            _ => None,
        }
    }
}





/***** HELPERS *****/
/// Runs the given parser on all of the `input` (modulo surrounding whitespace).
///
/// # Arguments
/// - `input`: The text to parse.
/// - `parser`: The parser to run.
/// - `err`: Constructor for the error to return if it fails, given the input and the remainder
///   at which the parser failed.
///
/// # Returns
/// The parsed output.
///
/// # Errors
/// This function errors with whatever `err` makes of a failure.
fn complete<'a, O>(
    input: &'a str,
    parser: impl FnMut(&'a str) -> IResult<&'a str, O>,
    err: impl FnOnce(String, String) -> Error,
) -> Result<O, Error> {
    match all_consuming(ws(parser))(input) {
        Ok((_, res)) => Ok(res),
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => Err(err(input.into(), e.input.into())),
        Err(nom::Err::Incomplete(_)) => Err(err(input.into(), String::new())),
    }
}





/***** LIBRARY *****/
/// Parses a single predicate.
///
/// # Arguments
/// - `input`: The text to parse, e.g., `op('foo',X)`.
///
/// # Returns
/// The parsed [`Predicate`].
///
/// # Errors
/// This function errors if the input is not exactly one predicate.
#[inline]
pub fn parse_predicate(input: &str) -> Result<Predicate, Error> {
    complete(input, atoms::predicate, |input, rest| Error::IllegalPredicate { input, rest })
}

/// Parses a single fact.
///
/// # Arguments
/// - `input`: The text to parse, e.g., `op('foo')`.
///
/// # Returns
/// The parsed [`Fact`].
///
/// # Errors
/// This function errors if the input is not exactly one predicate, or if that predicate has
/// variables in it.
///
/// # Example
/// ```rust
/// use forward_rules::parser::{Error, parse_fact};
///
/// assert_eq!(parse_fact("fact('val1')").unwrap().to_string(), "fact('val1')");
/// assert!(matches!(parse_fact("fact(X)"), Err(Error::NotAFact { .. })));
/// ```
pub fn parse_fact(input: &str) -> Result<Fact, Error> {
    let pred: Predicate = parse_predicate(input)?;
    Fact::try_from(pred).map_err(|err| Error::NotAFact { input: input.into(), err })
}

/// Parses the lefthand side of a rule.
///
/// The resulting [`LeftExpression`] remembers the (trimmed) input as its source text.
///
/// # Arguments
/// - `input`: The text to parse, e.g., `op1(X) and not op2(X)`.
///
/// # Returns
/// The parsed [`LeftExpression`].
///
/// # Errors
/// This function errors if the input used `or`, or is not a valid expression otherwise.
pub fn parse_left(input: &str) -> Result<LeftExpression, Error> {
    let input: &str = input.trim();
    if let Some(operator) = exprs::find_unsupported_operator(input) {
        return Err(Error::UnsupportedOperator { input: input.into(), operator });
    }
    let expr = complete(input, exprs::expr, |input, rest| Error::IllegalExpression { input, rest })?;
    Ok(LeftExpression::new(input, expr))
}

/// Parses a single action.
///
/// # Arguments
/// - `input`: The text to parse, e.g., `add:op1('a')`.
///
/// # Returns
/// The parsed [`Action`].
///
/// # Errors
/// This function errors if the input is not a single action or its kind is unknown.
pub fn parse_action(input: &str) -> Result<Action, Error> {
    let (kind, predicate) = complete(input, actions::raw_action, |input, rest| Error::IllegalActions { input, rest })?;
    match ActionKind::from_keyword(kind) {
        Some(kind) => Ok(Action { kind, predicate }),
        None => Err(Error::UnknownActionKind { input: input.trim().into(), kind: kind.into() }),
    }
}

/// Parses the righthand side of a rule.
///
/// The resulting [`RightExpression`] remembers the (trimmed) input as its source text.
///
/// # Arguments
/// - `input`: The text to parse, e.g., `add:op1(X), function:log_call(X)`.
///
/// # Returns
/// The parsed [`RightExpression`].
///
/// # Errors
/// This function errors if the input is not a comma-separated list of actions or if any of them
/// has an unknown kind.
pub fn parse_right(input: &str) -> Result<RightExpression, Error> {
    let input: &str = input.trim();
    let raw = complete(input, actions::raw_actions, |input, rest| Error::IllegalActions { input, rest })?;
    let mut actions: Vec<Action> = Vec::with_capacity(raw.len());
    for (kind, predicate) in raw {
        match ActionKind::from_keyword(kind) {
            Some(kind) => actions.push(Action { kind, predicate }),
            None => return Err(Error::UnknownActionKind { input: format!("{kind}:{predicate}"), kind: kind.into() }),
        }
    }
    Ok(RightExpression::new(input, actions))
}





/***** TESTS *****/
