//  ACTIONS.rs
//    by Lut99
//
//  Created:
//    14 Oct 2026, 14:22:09
//  Last edited:
//    16 Oct 2026, 10:03:55
//  Auto updated?
//    Yes
//
//  Description:
//!   Defines parsers for the righthand side of a rule, i.e., a
//!   comma-separated list of [`Action`](ast::Action)s.
//

use nom::character::complete::char as pchar;
use nom::multi::separated_list1;
use nom::sequence::separated_pair;
use nom::IResult;

use super::atoms::predicate;
use super::tokens::{ident, ws};


/***** LIBRARY *****/
/// Parses a single action, without interpreting its kind.
///
/// # Returns
/// A tuple of the kind's keyword as written and the action's predicate.
///
/// # Example
/// ```rust
/// use forward_rules::parser::actions::raw_action;
///
/// let (rest, (kind, pred)) = raw_action("add:op1(X,'a'), remove:op2(X)").unwrap();
/// assert_eq!(rest, ", remove:op2(X)");
/// assert_eq!(kind, "add");
/// assert_eq!(pred.to_string(), "op1(X,'a')");
/// ```
pub fn raw_action(input: &str) -> IResult<&str, (&str, crate::ast::Predicate)> { separated_pair(ident, ws(pchar(':')), predicate)(input) }

/// Parses a comma-separated list of at least one action.
///
/// Commas inside a predicate's argument list belong to that predicate.
pub fn raw_actions(input: &str) -> IResult<&str, Vec<(&str, crate::ast::Predicate)>> { separated_list1(ws(pchar(',')), ws(raw_action))(input) }





/***** TESTS *****/
