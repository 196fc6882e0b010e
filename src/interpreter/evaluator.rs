//  EVALUATOR.rs
//    by Lut99
//
//  Created:
//    16 Oct 2026, 09:58:12
//  Last edited:
//    18 Oct 2026, 17:12:40
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements the binder/evaluator, which finds out which instances of a
//!   rule hold in a [`KnowledgeBase`].
//!
//!   Evaluation follows the closed-world assumption: an atom holds iff a
//!   fact describing it is known, and `not` succeeds iff its operand
//!   doesn't hold (negation-as-failure).
//

use indexmap::IndexSet;
use itertools::{Either, Itertools as _};

use super::KnowledgeBase;
use crate::ast::{CompareOp, Comparison, Expr, Predicate};
use crate::ir::{Fact, RuleTemplate, SatisfiedRule, UngroundedError};
use crate::log::trace;


/***** INTERPRETER EXTENSIONS *****/
/// Interpreter extensions for [`Expr`]s.
impl Expr {
    /// Evaluates this expression.
    ///
    /// # Arguments
    /// - `holds`: Some function that decides whether an atom holds.
    ///
    /// # Returns
    /// Whether the expression is true.
    pub fn eval(&self, holds: &mut impl FnMut(&Predicate) -> bool) -> bool {
        match self {
            Self::Atom(pred) => holds(pred),
            Self::Not(expr) => !expr.eval(holds),
            Self::Group(expr) => expr.eval(holds),
            Self::And(exprs) => exprs.iter().all(|e| e.eval(&mut *holds)),
            Self::Compare(comp) => comp.eval(),
        }
    }
}

/// Interpreter extensions for [`Comparison`]s.
impl Comparison {
    /// Evaluates this comparison.
    ///
    /// Constants are compared by value. A variable is only equal to itself.
    ///
    /// # Returns
    /// Whether the comparison is true.
    #[inline]
    pub fn eval(&self) -> bool {
        match self.op {
            CompareOp::Eq => self.lhs == self.rhs,
            CompareOp::Ne => self.lhs != self.rhs,
        }
    }
}

/// Interpreter extensions for the [`KnowledgeBase`].
impl KnowledgeBase {
    /// Checks whether a known fact is described by the given predicate.
    ///
    /// Positions with a variable match any value, so a predicate without any constants holds
    /// iff any fact with the same name and arity is known.
    ///
    /// # Arguments
    /// - `pred`: The [`Predicate`] to check.
    ///
    /// # Returns
    /// True if there is such a fact, false otherwise.
    #[inline]
    pub fn holds(&self, pred: &Predicate) -> bool { self.facts_named(&pred.name).any(|f| pred.matches(f)) }
}





/***** HELPERS *****/
/// Finds the instances of a rule that hold but haven't fired yet.
///
/// # Arguments
/// - `kb`: The [`KnowledgeBase`] to find facts in.
/// - `template`: The [`RuleTemplate`] to instantiate.
///
/// # Returns
/// The [`SatisfiedRule`]s found, in the order they were enumerated.
///
/// # Errors
/// This function errors if an instance holds while its actions are not ground.
fn find_satisfied(kb: &KnowledgeBase, template: &RuleTemplate) -> Result<Vec<SatisfiedRule>, UngroundedError> {
    // Find the candidate facts for every atom, dropping atoms that have none
    let candidates: Vec<(&Predicate, Vec<&Fact>)> = template
        .left
        .atoms
        .iter()
        .map(|atom| (atom, kb.facts_named(&atom.name).filter(|f| atom.matches(f)).collect::<Vec<&Fact>>()))
        .filter(|(_, facts)| !facts.is_empty())
        .collect();
    trace!(
        "Rule '{}' has candidates for {} out of {} atom(s)",
        template.name,
        candidates.len(),
        template.left.atoms.len()
    );

    // Every combination of candidates is a binding to try; without any, there's exactly one (empty) binding
    let combos = if candidates.is_empty() {
        Either::Left(std::iter::once(Vec::new()))
    } else {
        Either::Right(candidates.iter().map(|(_, facts)| facts.iter().copied()).multi_cartesian_product())
    };

    let mut found: IndexSet<String> = IndexSet::new();
    let mut res: Vec<SatisfiedRule> = Vec::new();
    for combo in combos {
        let Some(bound) = template.bind(candidates.iter().map(|(atom, _)| *atom).zip(combo)) else {
            trace!("--> Skipping inconsistent binding for rule '{}'", template.name);
            continue;
        };
        let key: String = bound.key();
        if template.is_satisfied(&key) || found.contains(&key) {
            trace!("--> Skipping '{key}' (already fired)");
            continue;
        }
        if !bound.left.expr.eval(&mut |atom| kb.holds(atom)) {
            trace!("--> '{key}' does not hold");
            continue;
        }

        trace!("--> '{key}' HOLDS");
        res.push(bound.into_satisfied()?);
        found.insert(key);
    }
    Ok(res)
}





/***** LIBRARY *****/
/// Finds the instances of a rule that newly hold.
///
/// If the rule isn't marked for evaluation, nothing is done. Otherwise, every atom in the
/// lefthand side is matched against the known facts, and every (consistent) combination of
/// matches is tried as a binding for the rule. Atoms without any matching fact are left unbound,
/// so that they are simply false (or true under negation).
///
/// Note that the number of combinations is exponential in the number of atoms that match more
/// than one fact.
///
/// Afterwards, the rule is no longer marked for evaluation. The instances found are _not_
/// recorded as fired; that's up to the caller once their actions have been performed.
///
/// # Arguments
/// - `kb`: The [`KnowledgeBase`] to evaluate in.
/// - `index`: The index of the rule in the `kb`'s [templates](KnowledgeBase::templates()). Out
///   of bounds indices yield nothing.
///
/// # Returns
/// The [`SatisfiedRule`]s that hold and have not fired before.
///
/// # Errors
/// This function errors if an instance holds while its actions still contain variables, i.e.,
/// because they are only bound by atoms without any matching facts.
pub fn evaluate(kb: &mut KnowledgeBase, index: usize) -> Result<Vec<SatisfiedRule>, UngroundedError> {
    let Some(template) = kb.templates().get(index) else {
        return Ok(Vec::new());
    };
    if !template.state.dirty {
        trace!("Not evaluating rule '{}' (nothing changed)", template.name);
        return Ok(Vec::new());
    }

    let res = find_satisfied(kb, template);
    kb.templates_mut()[index].state.dirty = false;
    res
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{make_fact, make_kb};


    #[test]
    fn test_expr_eval() {
        let kb = make_kb([], ["op1('a')", "op2('a','b')"], "goal()");
        let left = crate::parser::parse_left("op1('a') and not op3(X) and (op2(X,'b') and X!=Y)").unwrap();
        assert!(left.expr.eval(&mut |atom| kb.holds(atom)));
        let left = crate::parser::parse_left("op1('a') and not op2(X,Y)").unwrap();
        assert!(!left.expr.eval(&mut |atom| kb.holds(atom)));
        let left = crate::parser::parse_left("X==X and 'a'!='b' and not 'a'=='b' and not X=='X'").unwrap();
        assert!(left.expr.eval(&mut |_| unreachable!()));
    }

    #[test]
    fn test_evaluate_join() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let mut kb = make_kb(["rule: op1(X) and op2(X,Y) => add:op3(X)"], ["op1('v11')", "op1('v12')", "op2('v11','v21')"], "op3('v11')");
        let satisfied = evaluate(&mut kb, 0).unwrap();
        assert_eq!(satisfied.len(), 1);
        assert_eq!(satisfied[0].to_string(), "rule: op1('v11') and op2('v11','v21') => add:op3('v11')");
        assert_eq!(satisfied[0].actions()[0].fact, make_fact("op3", ["v11"]));
        assert!(!kb.templates()[0].state.dirty);

        // Not dirty anymore, so nothing is found
        assert!(evaluate(&mut kb, 0).unwrap().is_empty());
        assert!(evaluate(&mut kb, 42).unwrap().is_empty());
    }

    #[test]
    fn test_evaluate_negation_ungrounded() {
        let mut kb = make_kb(["r: op1(X) and not op2(Y) => add:op2(Y)"], ["op1('a')"], "op2('a')");
        assert!(evaluate(&mut kb, 0).is_err());
        assert!(!kb.templates()[0].state.dirty);

        let mut kb = make_kb(["r: op1(X) and not op2(Y) => add:op2(Y)"], ["op1('a')", "op2('b')"], "op2('a')");
        assert!(evaluate(&mut kb, 0).unwrap().is_empty());
    }

    #[test]
    fn test_evaluate_negation_without_facts() {
        let mut kb = make_kb(["rule4: not op4('val52') => add:op3('val52')"], ["op4('val51')"], "op3('val52')");
        let satisfied = evaluate(&mut kb, 0).unwrap();
        assert_eq!(satisfied.len(), 1);
        assert_eq!(satisfied[0].to_string(), "rule4: not op4('val52') => add:op3('val52')");
    }

    #[test]
    fn test_evaluate_skips_fired() {
        let mut kb = make_kb(["rule: op1(X) => add:op2(X)"], ["op1('a')", "op1('b')"], "op2('a')");
        let mut satisfied = evaluate(&mut kb, 0).unwrap();
        assert_eq!(satisfied.len(), 2);
        kb.templates_mut()[0].record(satisfied.remove(0));

        kb.templates_mut()[0].state.dirty = true;
        let satisfied = evaluate(&mut kb, 0).unwrap();
        assert_eq!(satisfied.len(), 1);
        assert_eq!(satisfied[0].actions()[0].fact, make_fact("op2", ["b"]));
    }

    #[test]
    fn test_evaluate_duplicate_atoms() {
        // Both occurrences of `op1(X)` bind to the same fact, so only two instances exist
        let mut kb = make_kb(["rule: op1(X) and not (op2(X) and op1(X)) => add:op3(X)"], ["op1('a')", "op1('b')"], "op3('a')");
        assert_eq!(evaluate(&mut kb, 0).unwrap().len(), 2);
    }
}
