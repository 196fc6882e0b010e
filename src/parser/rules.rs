//  RULES.rs
//    by Lut99
//
//  Created:
//    14 Oct 2026, 15:01:17
//  Last edited:
//    17 Oct 2026, 16:44:08
//  Auto updated?
//    Yes
//
//  Description:
//!   Parses complete rules of the form `<name>: <left> => <right>`.
//

use super::{parse_left, parse_right, Error};
use crate::ast::{LeftExpression, RightExpression, Rule};


/***** CONSTANTS *****/
/// Separates the name of a rule from its body.
pub const NAME_SEPARATOR: &str = ":";
/// Separates the lefthand side of a rule from its righthand side.
pub const ARROW: &str = "=>";





/***** LIBRARY *****/
/// Parses a rule as written by the user.
///
/// The name is everything up to the first `:` before the `=>`, and may be any non-empty text.
/// A `:` that only occurs after the `=>` belongs to an action. The rest must contain exactly one
/// `=>`.
///
/// Note that this only checks the syntax. Use [`Rule::compile()`] to also check if it makes
/// sense.
///
/// # Arguments
/// - `input`: The text to parse.
///
/// # Returns
/// A parsed [`Rule`] that remembers `input` (trimmed) as its source.
///
/// # Errors
/// This function errors if any of the separators were missing, or if either side failed to
/// parse.
///
/// # Example
/// ```rust
/// use forward_rules::parser::{Error, parse_rule};
///
/// let rule = parse_rule("rule: op1(X) and op2(Y) => add:op3(X)").unwrap();
/// assert_eq!(rule.name, "rule");
/// assert_eq!(rule.to_string(), "rule: op1(X) and op2(Y) => add:op3(X)");
///
/// assert!(matches!(parse_rule("rule op1(X) => op3(X)"), Err(Error::MissingSeparator { separator: ":", .. })));
/// assert!(matches!(parse_rule("rule: op1(X) add:op3(X)"), Err(Error::MissingSeparator { separator: "=>", .. })));
/// ```
pub fn parse_rule(input: &str) -> Result<Rule, Error> {
    let source: &str = input.trim();
    let arrow: Option<usize> = source.find(ARROW);
    let (name, body): (&str, &str) = match source.find(NAME_SEPARATOR) {
        Some(pos) if arrow.map_or(true, |arrow| pos < arrow) => (&source[..pos], &source[pos + NAME_SEPARATOR.len()..]),
        _ => return Err(Error::MissingSeparator { input: source.into(), separator: NAME_SEPARATOR }),
    };
    let name: &str = name.trim();
    if name.is_empty() {
        return Err(Error::IllegalRuleName { input: source.into(), name: name.into() });
    }

    // The arrow must be there exactly once
    let mut parts = body.split(ARROW);
    let (Some(left), Some(right)) = (parts.next(), parts.next()) else {
        return Err(Error::MissingSeparator { input: source.into(), separator: ARROW });
    };
    if parts.next().is_some() {
        return Err(Error::DuplicateSeparator { input: source.into(), separator: ARROW });
    }

    let left: LeftExpression = parse_left(left)?;
    let right: RightExpression = parse_right(right)?;
    Ok(Rule { source: source.into(), name: name.into(), left, right })
}





/***** TESTS *****/
