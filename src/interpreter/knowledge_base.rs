//  KNOWLEDGE BASE.rs
//    by Lut99
//
//  Created:
//    15 Oct 2026, 13:30:18
//  Last edited:
//    18 Oct 2026, 16:05:44
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements the [`KnowledgeBase`], which stores the facts and the rules
//!   reasoning about them.
//!
//!   Every change to the facts goes through here, because it is also where
//!   rules are told that they may have to be evaluated again.
//

use std::fmt::{Display, Formatter, Result as FResult};

use indexmap::{IndexMap, IndexSet};

use crate::ir::{Fact, RuleTemplate};
use crate::log::{debug, trace};


/***** LIBRARY *****/
/// Defines what is currently known, and the rules to derive more with.
///
/// Facts are kept in insertion order, both in total and per predicate name. That order is the
/// order in which the evaluator considers them.
#[derive(Clone, Debug)]
pub struct KnowledgeBase {
    /// All known facts.
    facts:     IndexSet<Fact>,
    /// The known facts, grouped by their name. Names without facts are absent.
    by_name:   IndexMap<String, IndexSet<Fact>>,
    /// The rules, in the order they were given.
    templates: Vec<RuleTemplate>,
    /// The fact that we're trying to derive.
    goal:      Fact,
}

// Constructors
impl KnowledgeBase {
    /// Constructor for the KnowledgeBase.
    ///
    /// # Arguments
    /// - `templates`: The [`RuleTemplate`]s to reason with. Their order is the order in which
    ///   they are evaluated.
    /// - `goal`: The [`Fact`] to check for once reasoning is done.
    ///
    /// # Returns
    /// A new KnowledgeBase without any facts.
    #[inline]
    pub fn new(templates: impl IntoIterator<Item = RuleTemplate>, goal: Fact) -> Self {
        Self { facts: IndexSet::new(), by_name: IndexMap::new(), templates: templates.into_iter().collect(), goal }
    }
}

// Facts
impl KnowledgeBase {
    /// Learns new facts.
    ///
    /// For every fact that wasn't known yet, this forgets the fired rules that mention it in
    /// their lefthand side and marks every rule referring to its name for re-evaluation. Facts
    /// already known are ignored.
    ///
    /// # Arguments
    /// - `facts`: The [`Fact`]s to add.
    ///
    /// # Returns
    /// The number of facts that were actually new.
    pub fn add_facts(&mut self, facts: impl IntoIterator<Item = Fact>) -> usize {
        let mut added: usize = 0;
        for fact in facts {
            if self.facts.contains(&fact) {
                trace!("Fact '{fact}' already known");
                continue;
            }
            debug!("Adding fact '{fact}'");
            self.by_name.entry(fact.name.clone()).or_default().insert(fact.clone());
            self.touch(&fact);
            self.facts.insert(fact);
            added += 1;
        }
        added
    }

    /// Forgets facts.
    ///
    /// This is the counterpart of [`KnowledgeBase::add_facts()`]. For every fact that was known,
    /// it forgets the fired rules that mention it and marks the relevant rules for
    /// re-evaluation. Unknown facts are ignored.
    ///
    /// # Arguments
    /// - `facts`: The [`Fact`]s to remove.
    ///
    /// # Returns
    /// The number of facts that were actually removed.
    pub fn remove_facts<'f>(&mut self, facts: impl IntoIterator<Item = &'f Fact>) -> usize {
        let mut removed: usize = 0;
        for fact in facts {
            if !self.facts.shift_remove(fact) {
                trace!("Fact '{fact}' not known");
                continue;
            }
            debug!("Removing fact '{fact}'");
            if let Some(named) = self.by_name.get_mut(&fact.name) {
                named.shift_remove(fact);
                if named.is_empty() {
                    self.by_name.shift_remove(&fact.name);
                }
            }
            self.touch(fact);
            removed += 1;
        }
        removed
    }

    /// Replaces all facts with the given ones.
    ///
    /// Note that the old facts are simply dropped, i.e., without forgetting any fired rules.
    /// The new ones are [added](KnowledgeBase::add_facts()) as usual.
    ///
    /// # Arguments
    /// - `facts`: The [`Fact`]s to set.
    ///
    /// # Returns
    /// The number of (unique) facts now known.
    #[inline]
    pub fn set_facts(&mut self, facts: impl IntoIterator<Item = Fact>) -> usize {
        self.facts.clear();
        self.by_name.clear();
        self.add_facts(facts)
    }

    /// Tells all rules that the given fact was added or removed.
    fn touch(&mut self, fact: &Fact) {
        for template in &mut self.templates {
            let n: usize = template.invalidate(fact);
            if n > 0 {
                trace!("Fact '{fact}' invalidated {n} fired instance(s) of rule '{}'", template.name);
            }
            if template.references(&fact.name) {
                template.state.dirty = true;
            }
        }
    }



    /// Checks whether the given fact is known.
    #[inline]
    pub fn contains(&self, fact: &Fact) -> bool { self.facts.contains(fact) }

    /// Returns all known facts, in the order they were learned.
    #[inline]
    pub fn facts(&self) -> impl '_ + ExactSizeIterator<Item = &Fact> { self.facts.iter() }

    /// Returns all known facts with the given name, in the order they were learned.
    #[inline]
    pub fn facts_named<'s>(&'s self, name: &str) -> impl 's + Iterator<Item = &'s Fact> { self.by_name.get(name).into_iter().flatten() }

    /// Returns the number of known facts.
    #[inline]
    pub fn len(&self) -> usize { self.facts.len() }

    /// Returns whether no facts are known.
    #[inline]
    pub fn is_empty(&self) -> bool { self.facts.is_empty() }
}

// Rules & goal
impl KnowledgeBase {
    /// Returns the rules, in evaluation order.
    #[inline]
    pub fn templates(&self) -> &[RuleTemplate] { &self.templates }

    /// Returns the rules, in evaluation order.
    #[inline]
    pub(crate) fn templates_mut(&mut self) -> &mut [RuleTemplate] { &mut self.templates }

    /// Returns the fact we're trying to derive.
    #[inline]
    pub fn goal(&self) -> &Fact { &self.goal }

    /// Returns whether the goal is currently known.
    #[inline]
    pub fn goal_reached(&self) -> bool { self.facts.contains(&self.goal) }
}

// Formatting
impl Display for KnowledgeBase {
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        writeln!(f, "Knowledge base {{")?;
        write!(f, "    facts:")?;
        if !self.facts.is_empty() {
            writeln!(f)?;
            for fact in &self.facts {
                writeln!(f, "      + {fact}")?;
            }
        } else {
            writeln!(f, " <none>")?;
        }
        write!(f, "    rules:")?;
        if !self.templates.is_empty() {
            writeln!(f)?;
            for template in &self.templates {
                writeln!(f, "      {} {template} ({} fired)", if template.state.dirty { '*' } else { '-' }, template.satisfied().len())?;
            }
        } else {
            writeln!(f, " <none>")?;
        }
        writeln!(f, "    goal: {}", self.goal)?;
        writeln!(f, "}}")
    }
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::evaluate;
    use crate::tests::{make_fact, make_kb, make_template};


    #[test]
    fn test_add_remove_facts() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let mut kb = KnowledgeBase::new([], make_fact("goal", []));
        assert_eq!(kb.add_facts([make_fact("op1", ["a"]), make_fact("op1", ["b"]), make_fact("op2", ["a"])]), 3);
        assert_eq!(kb.add_facts([make_fact("op1", ["a"])]), 0);
        assert_eq!(kb.len(), 3);
        assert_eq!(kb.facts_named("op1").count(), 2);

        assert_eq!(kb.remove_facts(&[make_fact("op1", ["a"]), make_fact("op3", ["a"])]), 1);
        assert_eq!(kb.facts_named("op1").collect::<Vec<_>>(), vec![&make_fact("op1", ["b"])]);
        assert_eq!(kb.remove_facts(&[make_fact("op1", ["b"])]), 1);
        assert_eq!(kb.facts_named("op1").count(), 0);
        assert!(!kb.by_name.contains_key("op1"));
        assert_eq!(kb.len(), 1);

        assert_eq!(kb.set_facts([make_fact("op4", ["c"]), make_fact("op4", ["c"])]), 1);
        assert!(kb.contains(&make_fact("op4", ["c"])));
        assert!(!kb.contains(&make_fact("op2", ["a"])));
    }

    #[test]
    fn test_dirty_marking() {
        let mut kb = KnowledgeBase::new(
            [make_template("rule1: op1(X) => add:op2(X)"), make_template("rule2: not op3('a') => add:op4('a')")],
            make_fact("op2", ["a"]),
        );
        assert!(!kb.templates()[0].state.dirty);
        assert!(!kb.templates()[1].state.dirty);

        kb.add_facts([make_fact("op3", ["b"])]);
        assert!(!kb.templates()[0].state.dirty);
        assert!(kb.templates()[1].state.dirty);

        // Known facts don't mark anything
        kb.templates_mut()[1].state.dirty = false;
        kb.add_facts([make_fact("op3", ["b"])]);
        assert!(!kb.templates()[1].state.dirty);

        // Neither do unknown ones that are removed
        kb.remove_facts(&[make_fact("op1", ["a"])]);
        assert!(!kb.templates()[0].state.dirty);
        kb.add_facts([make_fact("op1", ["a"])]);
        assert!(kb.templates()[0].state.dirty);
    }

    #[test]
    fn test_invalidation() {
        let mut kb = KnowledgeBase::new([make_template("rule: not op1('a') => add:op2('a')")], make_fact("op2", ["a"]));
        let satisfied = kb.templates()[0].bind([]).unwrap().into_satisfied().unwrap();
        kb.templates_mut()[0].record(satisfied);

        kb.add_facts([make_fact("op1", ["b"])]);
        assert_eq!(kb.templates()[0].satisfied().len(), 1);
        kb.add_facts([make_fact("op1", ["a"])]);
        assert_eq!(kb.templates()[0].satisfied().len(), 0);
    }

    #[test]
    fn test_invalidated_rule_no_longer_holds() {
        let mut kb = make_kb(["rule: op1(X) and not op2('a') => add:op3(X)"], ["op1('b')"], "op3('b')");
        let mut satisfied = evaluate(&mut kb, 0).unwrap();
        assert_eq!(satisfied.len(), 1);
        kb.templates_mut()[0].record(satisfied.remove(0));
        assert!(!kb.templates()[0].state.dirty);

        // The negated atom becomes true, so the fired instance is forgotten...
        kb.add_facts([make_fact("op2", ["a"])]);
        assert_eq!(kb.templates()[0].satisfied().len(), 0);
        assert!(kb.templates()[0].state.dirty);

        // ...and it doesn't hold anymore either
        assert!(evaluate(&mut kb, 0).unwrap().is_empty());
        assert_eq!(kb.templates()[0].satisfied().len(), 0);
    }

    #[test]
    fn test_goal_and_display() {
        let mut kb = KnowledgeBase::new([make_template("rule: op1(X) => add:op2(X)")], make_fact("op2", ["a"]));
        assert!(!kb.goal_reached());
        kb.add_facts([make_fact("op2", ["a"])]);
        assert!(kb.goal_reached());
        assert_eq!(
            kb.to_string(),
            "Knowledge base {\n    facts:\n      + op2('a')\n    rules:\n      - rule: op1(X) => add:op2(X) (0 fired)\n    goal: op2('a')\n}\n"
        );

        // Rules that have to be evaluated again are starred
        kb.add_facts([make_fact("op1", ["a"])]);
        assert!(kb.to_string().contains("      * rule: op1(X) => add:op2(X) (0 fired)\n"));
    }
}
