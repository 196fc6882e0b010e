//  MOD.rs
//    by Lut99
//
//  Created:
//    15 Oct 2026, 11:40:09
//  Last edited:
//    18 Oct 2026, 17:30:55
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements an interpreter that derives new facts from a
//!   [`KnowledgeBase`] by forward chaining its rules until nothing changes
//!   anymore.
//!
//!   Rules are scanned in the order they were given. As soon as a rule
//!   changes the facts, the scan restarts from the first rule. This order
//!   is observable through the functions that rules call.
//

// Nested modules
pub mod evaluator;
mod functions;
mod knowledge_base;

// Imports
use std::error;
use std::fmt::{Display, Formatter, Result as FResult};

pub use evaluator::evaluate;
pub use functions::{Callback, Functions};
pub use knowledge_base::KnowledgeBase;

use crate::ast::ActionKind;
use crate::ir::UngroundedError;
use crate::log::debug;


/***** ERRORS *****/
/// Defines errors that abort the interpreter.
#[derive(Debug)]
pub enum Error {
    /// A rule held but could not fire because its actions weren't ground.
    Ungrounded { err: UngroundedError },
    /// A rule fired a function that isn't registered.
    UnknownFunction { rule: String, name: String },
}
impl Display for Error {
    #[inline]
    fn fmt(&self, f: &mut Formatter) -> FResult {
        match self {
            Self::Ungrounded { .. } => write!(f, "Failed to fire a rule"),
            Self::UnknownFunction { rule, name } => write!(f, "Rule '{rule}' called function '{name}', which is not registered"),
        }
    }
}
impl error::Error for Error {
    #[inline]
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Ungrounded { err } => Some(err),
            Self::UnknownFunction { .. } => None,
        }
    }
}
impl From<UngroundedError> for Error {
    #[inline]
    fn from(value: UngroundedError) -> Self { Self::Ungrounded { err: value } }
}





/***** LIBRARY FUNCTIONS *****/
/// Derives facts in a [`KnowledgeBase`] until a fixpoint is reached.
///
/// Every pass evaluates the rules in order and fires the instances that newly hold, performing
/// their actions in the order they were written. If any of them added or removed a fact, the
/// pass is cut short after that rule and a new one starts from the first rule. Calling a
/// function never counts as a change. A pass without changes is the last one.
///
/// Only rules with a fact they refer to added or removed since their last evaluation are
/// evaluated at all. In particular, a rule whose predicates never occur in the knowledge base
/// never fires, even if it would hold.
///
/// Note that rules that keep adding new facts, or that undo each other's work, make this
/// function loop forever.
///
/// # Arguments
/// - `kb`: The [`KnowledgeBase`] to derive in.
/// - `functions`: The [`Functions`] that `function:`-actions call.
///
/// # Returns
/// Whether the `kb`'s [goal](KnowledgeBase::goal()) is known after reaching the fixpoint.
///
/// # Errors
/// This function errors if a rule held that could not fire. The `kb` is left as it was at that
/// point.
pub fn forward_chain(kb: &mut KnowledgeBase, functions: &Functions) -> Result<bool, Error> {
    debug!(
        "Running forward chaining\n\nRules:\n{}\n{}{}\n",
        (0..80).map(|_| '-').collect::<String>(),
        kb.templates().iter().map(|r| format!("   {r}\n")).collect::<String>(),
        (0..80).map(|_| '-').collect::<String>()
    );

    #[cfg(feature = "log")]
    let mut i: usize = 0;
    loop {
        #[cfg(feature = "log")]
        {
            i += 1;
        }
        debug!("Starting pass {i}");

        let mut changed: bool = false;
        for t in 0..kb.templates().len() {
            for rule in evaluate(kb, t)? {
                debug!("Firing '{rule}'");
                for action in rule.actions() {
                    match action.kind {
                        ActionKind::Add => changed |= kb.add_facts([action.fact.clone()]) > 0,
                        ActionKind::Remove => changed |= kb.remove_facts([&action.fact]) > 0,
                        ActionKind::Function => {
                            if !functions.call(&action.fact.name, &rule.name, &action.fact.values) {
                                return Err(Error::UnknownFunction { rule: rule.name.clone(), name: action.fact.name.clone() });
                            }
                        },
                    }
                }
                kb.templates_mut()[t].record(rule);
            }
            if changed {
                debug!("Rule '{}' changed the knowledge base; restarting", kb.templates()[t].name);
                break;
            }
        }
        if !changed {
            break;
        }
    }

    debug!("Done forward chaining (took {i} passes)\n\n{kb}\n");
    Ok(kb.goal_reached())
}



/// Interpreter extensions for the [`KnowledgeBase`].
impl KnowledgeBase {
    /// Derives facts until a fixpoint is reached.
    ///
    /// See [`forward_chain()`] for more information.
    ///
    /// # Arguments
    /// - `functions`: The [`Functions`] that `function:`-actions call.
    ///
    /// # Returns
    /// Whether the [goal](KnowledgeBase::goal()) is known afterwards.
    ///
    /// # Errors
    /// This function errors if a rule held that could not fire.
    #[inline]
    pub fn run(&mut self, functions: &Functions) -> Result<bool, Error> { forward_chain(self, functions) }
}





/***** TESTS *****/
