//  MOD.rs
//    by Lut99
//
//  Created:
//    15 Oct 2026, 09:14:50
//  Last edited:
//    18 Oct 2026, 15:21:36
//  Auto updated?
//    Yes
//
//  Description:
//!   Defines the representation of rules the interpreter reasons with.
//!
//!   A rule goes through three states:
//!   1. As a [`RuleTemplate`], it is exactly what the user wrote (and has been
//!      [compiled](compile) to make sure it is sensible). It lives as long
//!      as the knowledge base does and remembers which instances of it have
//!      already fired.
//!   2. As a [`BoundRule`], (some of) its variables have been replaced by
//!      values found in the knowledge base. Unresolved variables are legal,
//!      e.g., in `not op1(X)` when there are no `op1`-facts at all.
//!   3. As a [`SatisfiedRule`], its lefthand side held and all of its actions
//!      are ground, so it can fire.
//!
//!   Transitions are done by [`RuleTemplate::bind()`] and
//!   [`BoundRule::into_satisfied()`], which check the extra invariants of the
//!   next state.
//

// Declare submodules
pub mod compile;

// Imports
use std::error;
use std::fmt::{Display, Formatter, Result as FResult};

use indexmap::IndexMap;

pub use crate::ast::{ContainsVariablesError, Fact};
use crate::ast::{Action, ActionKind, LeftExpression, Predicate, RightExpression, Term};


/***** ERRORS *****/
/// Represents that a rule's actions still contain variables when it's about to be satisfied.
#[derive(Debug)]
pub struct UngroundedError {
    /// The (bound) rule that failed to become satisfied.
    pub rule:   String,
    /// The action that had variables left in it.
    pub action: Action,
}
impl Display for UngroundedError {
    #[inline]
    fn fmt(&self, f: &mut Formatter) -> FResult {
        write!(f, "Rule '{}' holds but its action '{}' still contains variables", self.rule, self.action)
    }
}
impl error::Error for UngroundedError {}





/***** AUXILLARY *****/
/// An [`Action`] that has no variables in it anymore.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct GroundAction {
    /// What to do.
    pub kind: ActionKind,
    /// What to do it with. For [`ActionKind::Function`], this is the function's name and its
    /// arguments.
    pub fact: Fact,
}
impl Display for GroundAction {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult { write!(f, "{}:{}", self.kind, self.fact) }
}



/// The state of a rule that is freshly compiled.
#[derive(Clone, Debug)]
pub struct Template {
    /// The text the rule was parsed from.
    pub source:    String,
    /// The instances of this rule that have fired already, by their canonical text.
    pub satisfied: IndexMap<String, SatisfiedRule>,
    /// Whether any facts relevant to the lefthand side changed since the last evaluation.
    pub dirty:     bool,
}

/// The state of a rule that has (some of) its variables assigned.
#[derive(Clone, Debug)]
pub struct Bound {
    /// The values assigned to the variables, in order of first occurrence.
    pub assign: IndexMap<String, String>,
}

/// The state of a rule that holds and can fire.
#[derive(Clone, Debug)]
pub struct Satisfied {
    /// The ground versions of the rule's actions, in textual order.
    pub actions: Vec<GroundAction>,
}





/***** LIBRARY *****/
/// A rule that is a [`Template`], i.e., as written by the user.
pub type RuleTemplate = Rule<Template>;
/// A rule that is [`Bound`], i.e., with variables (partially) assigned.
pub type BoundRule = Rule<Bound>;
/// A rule that is [`Satisfied`], i.e., ready to fire.
pub type SatisfiedRule = Rule<Satisfied>;

/// A rule in one of its three states.
///
/// The shared parts (name and both sides) are the same for every state. The state-specific parts
/// live in `state`.
///
/// Serializes to its canonical text, `<name>: <left> => <right>`, which is also used to identify
/// instances that have already fired.
#[derive(Clone, Debug)]
pub struct Rule<S> {
    /// The name of the rule.
    pub name:  String,
    /// The (possibly bound) lefthand side.
    pub left:  LeftExpression,
    /// The (possibly bound) righthand side.
    pub right: RightExpression,
    /// The state-specific information.
    pub state: S,
}
impl<S> Rule<S> {
    /// Returns the canonical text of this rule, which identifies it among its siblings.
    #[inline]
    pub fn key(&self) -> String { self.to_string() }
}
impl<S> Display for Rule<S> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult { write!(f, "{}: {} => {}", self.name, self.left, self.right) }
}

// Templates
impl Rule<Template> {
    /// Returns the text this rule was parsed from.
    #[inline]
    pub fn source(&self) -> &str { &self.state.source }

    /// Returns whether the lefthand side of this rule refers to predicates with the given name.
    #[inline]
    pub fn references(&self, name: &str) -> bool { self.left.atoms.iter().any(|a| a.name == name) }

    /// Returns whether an instance with the given canonical text has fired already.
    #[inline]
    pub fn is_satisfied(&self, key: &str) -> bool { self.state.satisfied.contains_key(key) }

    /// Returns an iterator over the instances of this rule that have fired already.
    #[inline]
    pub fn satisfied(&self) -> impl '_ + ExactSizeIterator<Item = &SatisfiedRule> { self.state.satisfied.values() }

    /// Remembers that the given instance of this rule has fired.
    #[inline]
    pub fn record(&mut self, rule: SatisfiedRule) { self.state.satisfied.insert(rule.key(), rule); }

    /// Forgets any fired instances of this rule whose lefthand side mentions the given fact.
    ///
    /// # Arguments
    /// - `fact`: The [`Fact`] that was added or removed.
    ///
    /// # Returns
    /// The number of instances forgotten.
    pub fn invalidate(&mut self, fact: &Fact) -> usize {
        let before: usize = self.state.satisfied.len();
        self.state.satisfied.retain(|_, rule| !rule.depends_on(fact));
        before - self.state.satisfied.len()
    }

    /// Binds this rule's variables by matching some of its lefthand side atoms to facts.
    ///
    /// Each given atom is replaced by its fact in the lefthand side, and the variables it
    /// contains are assigned the fact's values. This assignment is then applied to the
    /// comparisons and the righthand side. Atoms that aren't given are left untouched.
    ///
    /// # Arguments
    /// - `matches`: Pairs of lefthand side atoms and the facts they are matched to. Each fact is
    ///   assumed to [match](Predicate::matches()) its atom.
    ///
    /// # Returns
    /// A new [`BoundRule`], or [`None`] if some variable would be assigned two different values.
    pub fn bind<'a>(&self, matches: impl IntoIterator<Item = (&'a Predicate, &'a Fact)>) -> Option<BoundRule> {
        let mut assign: IndexMap<String, String> = IndexMap::new();
        let mut chosen: IndexMap<&Predicate, &Fact> = IndexMap::new();
        for (atom, fact) in matches {
            for (term, value) in atom.values.iter().zip(&fact.values) {
                if let Term::Variable(name) = term {
                    match assign.get(name) {
                        Some(prev) if prev != value => return None,
                        Some(_) => {},
                        None => {
                            assign.insert(name.clone(), value.clone());
                        },
                    }
                }
            }
            chosen.insert(atom, fact);
        }

        let expr = self.left.expr.substitute(
            &mut |atom: &Predicate| match chosen.get(atom) {
                Some(fact) => fact.to_predicate(),
                None => atom.clone(),
            },
            &assign,
        );
        let right = self.right.actions.iter().map(|a| Action { kind: a.kind, predicate: a.predicate.concretize(&assign) });
        Some(Rule {
            name:  self.name.clone(),
            left:  LeftExpression::from_expr(expr),
            right: RightExpression::from_actions(right),
            state: Bound { assign },
        })
    }
}

// Bound rules
impl Rule<Bound> {
    /// Turns this rule into a satisfied one.
    ///
    /// Note that this does not check whether the lefthand side actually holds; that's up to the
    /// [evaluator](crate::interpreter::evaluator).
    ///
    /// # Returns
    /// A [`SatisfiedRule`] with the same name and sides.
    ///
    /// # Errors
    /// This function errors if any of the actions still contains a variable.
    pub fn into_satisfied(self) -> Result<SatisfiedRule, UngroundedError> {
        let mut actions: Vec<GroundAction> = Vec::with_capacity(self.right.actions.len());
        for action in &self.right.actions {
            match action.predicate.to_fact() {
                Some(fact) => actions.push(GroundAction { kind: action.kind, fact }),
                None => return Err(UngroundedError { rule: self.to_string(), action: action.clone() }),
            }
        }
        Ok(Rule { name: self.name, left: self.left, right: self.right, state: Satisfied { actions } })
    }
}

// Satisfied rules
impl Rule<Satisfied> {
    /// Returns whether the given fact occurs (as a bound atom) in the lefthand side of this rule.
    ///
    /// If so, adding or removing that fact may change whether this rule holds.
    #[inline]
    pub fn depends_on(&self, fact: &Fact) -> bool { self.left.atoms.iter().any(|a| a == fact) }

    /// Returns the ground actions of this rule, in the order they were written.
    #[inline]
    pub fn actions(&self) -> &[GroundAction] { &self.state.actions }
}





/***** TESTS *****/
