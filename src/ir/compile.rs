//  COMPILE.rs
//    by Lut99
//
//  Created:
//    15 Oct 2026, 10:02:33
//  Last edited:
//    17 Oct 2026, 14:10:51
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements a compiler from [parsed rules](crate::ast::Rule) to
//!   [`RuleTemplate`]s.
//!
//!   This is where rules are checked for making sense, beyond being
//!   syntactically correct.
//

use std::error;
use std::fmt::{Display, Formatter, Result as FResult};

use indexmap::{IndexMap, IndexSet};

use super::{RuleTemplate, Template};
use crate::ast::{self, ActionKind};
use crate::interpreter::Functions;
use crate::log::trace;
use crate::parser;


/***** ERRORS *****/
/// Defines errors possibly occurring during [compilation](ast::Rule::compile()).
#[derive(Debug)]
pub enum Error {
    /// Failed to parse the rule in the first place.
    Parse { err: parser::Error },
    /// The same predicate name was used with different arities.
    ArityMismatch { rule: String, name: String, expected: usize, got: usize },
    /// Variables occurred in the righthand side that don't occur in any lefthand side atom.
    UnboundVariables { rule: String, vars: Vec<String> },
    /// A `function:`-action referred to a function that isn't registered.
    UnknownFunction { rule: String, name: String },
}
impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> FResult {
        match self {
            Self::Parse { .. } => write!(f, "Failed to parse rule"),
            Self::ArityMismatch { rule, name, expected, got } => {
                write!(f, "Predicate '{name}' is used with {expected} argument(s) and with {got} argument(s) in rule '{rule}'")
            },
            Self::UnboundVariables { rule, vars } => write!(
                f,
                "Variable{} {} {} not bound by any lefthand side predicate in rule '{rule}'",
                if vars.len() > 1 { "s" } else { "" },
                FancyList(vars),
                if vars.len() > 1 { "are" } else { "is" }
            ),
            Self::UnknownFunction { rule, name } => write!(f, "Function '{name}' is not registered (used in rule '{rule}')"),
        }
    }
}
impl error::Error for Error {
    #[inline]
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Parse { err } => Some(err),
            _ => None,
        }
    }
}
impl From<parser::Error> for Error {
    #[inline]
    fn from(value: parser::Error) -> Self { Self::Parse { err: value } }
}





/***** HELPERS *****/
/// A neat formatter for vectors.
struct FancyList<'a, T>(&'a [T]);
impl<'a, T: Display> Display for FancyList<'a, T> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        if self.0.is_empty() {
            return write!(f, "<empty>");
        }
        for (i, elem) in self.0.iter().enumerate() {
            if i > 0 && i < self.0.len() - 1 {
                write!(f, ", ")?;
            } else if i > 0 {
                write!(f, " and ")?;
            }
            write!(f, "{elem}")?;
        }
        Ok(())
    }
}





/***** LIBRARY *****/
impl ast::Rule {
    /// Returns an iterator over the variables in the righthand side that don't occur in any
    /// lefthand side atom.
    ///
    /// Variables occurring only in comparisons don't count as bound.
    ///
    /// # Returns
    /// Some [`Iterator`] over variable names, each yielded once.
    #[inline]
    pub fn unbound_vars<'s>(&'s self) -> impl 's + Iterator<Item = &'s str> {
        let bound: IndexSet<&str> = self.left.vars();
        self.right.vars().into_iter().filter(move |v| !bound.contains(v))
    }

    /// Compiles this rule to a [`RuleTemplate`] the interpreter can work with.
    ///
    /// This checks that:
    /// 1. Every predicate name is used with the same arity everywhere in the rule;
    /// 2. Every variable in the righthand side also occurs in a lefthand side atom; and
    /// 3. Every `function:`-action refers to a registered function.
    ///
    /// # Arguments
    /// - `functions`: The [`Functions`] that `function:`-actions may call.
    ///
    /// # Returns
    /// A new [`RuleTemplate`] that has not fired yet. It is not marked for evaluation until a fact
    /// it refers to is added or removed.
    ///
    /// # Errors
    /// This function errors if any of the checks above failed.
    pub fn compile(&self, functions: &Functions) -> Result<RuleTemplate, Error> {
        trace!("Compiling rule '{self}'");

        // Check the arities
        let mut arities: IndexMap<&str, usize> = IndexMap::new();
        for pred in self.predicates() {
            let expected: usize = *arities.entry(pred.name.as_str()).or_insert(pred.arity());
            if expected != pred.arity() {
                return Err(Error::ArityMismatch { rule: self.source.clone(), name: pred.name.clone(), expected, got: pred.arity() });
            }
        }

        // Check the righthand side variables
        let unbound: Vec<String> = self.unbound_vars().map(String::from).collect();
        if !unbound.is_empty() {
            return Err(Error::UnboundVariables { rule: self.source.clone(), vars: unbound });
        }

        // Check the functions
        for action in self.right.actions.iter().filter(|a| a.kind == ActionKind::Function) {
            if !functions.contains(&action.predicate.name) {
                return Err(Error::UnknownFunction { rule: self.source.clone(), name: action.predicate.name.clone() });
            }
        }

        Ok(RuleTemplate {
            name:  self.name.clone(),
            left:  self.left.clone(),
            right: self.right.clone(),
            state: Template { source: self.source.clone(), satisfied: IndexMap::new(), dirty: false },
        })
    }
}

impl RuleTemplate {
    /// Parses and compiles a rule in one go.
    ///
    /// # Arguments
    /// - `source`: The text of the rule, e.g., `rule1: op1(X) => add:op2(X)`.
    /// - `functions`: The [`Functions`] that `function:`-actions may call.
    ///
    /// # Returns
    /// A new [`RuleTemplate`].
    ///
    /// # Errors
    /// This function errors if the rule failed to [parse](parser::parse_rule()) or to
    /// [compile](ast::Rule::compile()).
    ///
    /// # Example
    /// ```rust
    /// use forward_rules::interpreter::Functions;
    /// use forward_rules::ir::RuleTemplate;
    /// use forward_rules::ir::compile::Error;
    ///
    /// let functions = Functions::new().with("log_call", |_, _| {});
    /// let rule = RuleTemplate::parse("rule: op1(X) => add:op2(X), function:log_call(X)", &functions).unwrap();
    /// assert_eq!(rule.source(), "rule: op1(X) => add:op2(X), function:log_call(X)");
    ///
    /// assert!(matches!(RuleTemplate::parse("rule: op1(X) => add:op2(Y)", &functions), Err(Error::UnboundVariables { .. })));
    /// assert!(matches!(RuleTemplate::parse("rule: op1(X) => function:unknown(X)", &functions), Err(Error::UnknownFunction { .. })));
    /// ```
    #[inline]
    pub fn parse(source: &str, functions: &Functions) -> Result<Self, Error> { parser::parse_rule(source)?.compile(functions) }
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use super::*;


    #[test]
    fn test_compile_valid() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let rule = RuleTemplate::parse("rule: op1(X) and op2(Y) => add:op3(X)", &Functions::new()).unwrap();
        assert_eq!(rule.to_string(), "rule: op1(X) and op2(Y) => add:op3(X)");
        assert!(!rule.state.dirty);
        assert_eq!(rule.satisfied().len(), 0);

        // Comparisons and negations don't change anything about arities
        assert!(RuleTemplate::parse("rule: op1(X,Y) and not op1('a',X) and X!=Y => remove:op1(X,Y)", &Functions::new()).is_ok());
    }

    #[test]
    fn test_compile_arity_mismatch() {
        let res = RuleTemplate::parse("rule: op1(X) and op1(X,Y) => add:op3(X)", &Functions::new());
        assert!(matches!(res, Err(Error::ArityMismatch { expected: 1, got: 2, .. })));
        let res = RuleTemplate::parse("rule: op1(X) => add:op1(X,X)", &Functions::new());
        assert!(matches!(res, Err(Error::ArityMismatch { expected: 1, got: 2, .. })));
    }

    #[test]
    fn test_compile_unbound_variables() {
        match RuleTemplate::parse("rule: op1(X) and op2(Y) => add:op3(Z), add:op4(W,X)", &Functions::new()) {
            Err(err @ Error::UnboundVariables { .. }) => {
                assert_eq!(err.to_string(), "Variables Z and W are not bound by any lefthand side predicate in rule 'rule: op1(X) and op2(Y) => add:op3(Z), add:op4(W,X)'");
            },
            other => panic!("Expected unbound variables error, got {other:?}"),
        }

        // Comparisons don't bind
        assert!(RuleTemplate::parse("rule: op1(X) and X==Y => add:op3(Y)", &Functions::new()).is_err());
    }

    #[test]
    fn test_compile_functions() {
        let functions = Functions::new().with("my_function", |_, _| {});
        assert!(RuleTemplate::parse("rule: op1(X) => function:my_function(X)", &functions).is_ok());
        assert!(matches!(
            RuleTemplate::parse("rule: op1(X) => function:unknown(X)", &functions),
            Err(Error::UnknownFunction { name, .. }) if name == "unknown"
        ));
    }

    #[test]
    fn test_compile_parse_error() {
        assert!(matches!(RuleTemplate::parse("rule: op1(X) or op2(X) => add:op3(X)", &Functions::new()), Err(Error::Parse { .. })));
    }
}
