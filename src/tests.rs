//  TESTS.rs
//    by Lut99
//
//  Created:
//    14 Oct 2026, 10:20:51
//  Last edited:
//    18 Oct 2026, 16:12:03
//  Auto updated?
//    Yes
//
//  Description:
//!   Contains some common test functions.
//

#![allow(unused)]

use crate::interpreter::{Functions, KnowledgeBase};
use crate::ir::{Fact, RuleTemplate};
use crate::parser::parse_fact;


/***** LIBRARY *****/
/// Sets up a logger if wanted.
#[cfg(feature = "log")]
pub fn setup_logger() {
    use humanlog::{DebugMode, HumanLogger};

    // Check if the envs tell us to
    if let Ok(logger) = std::env::var("LOGGER") {
        if logger == "1" || logger == "true" {
            // Create the logger
            if let Err(err) = HumanLogger::terminal(DebugMode::Full).init() {
                eprintln!("WARNING: Failed to setup logger: {err} (no logging for this session)");
            }
        }
    }
}



/// Makes a [`Fact`] conveniently.
pub fn make_fact(name: &'static str, values: impl IntoIterator<Item = &'static str>) -> Fact { Fact::new(name, values) }

/// Makes a [`RuleTemplate`] conveniently, without any functions available.
#[track_caller]
pub fn make_template(source: &'static str) -> RuleTemplate {
    match RuleTemplate::parse(source, &Functions::new()) {
        Ok(rule) => rule,
        Err(err) => panic!("Failed to compile test rule '{source}': {err}"),
    }
}

/// Makes a [`KnowledgeBase`] conveniently, without any functions available.
#[track_caller]
pub fn make_kb(
    rules: impl IntoIterator<Item = &'static str>,
    facts: impl IntoIterator<Item = &'static str>,
    goal: &'static str,
) -> KnowledgeBase {
    make_kb_with(rules, facts, goal, &Functions::new())
}

/// Makes a [`KnowledgeBase`] conveniently with the given functions available.
#[track_caller]
pub fn make_kb_with(
    rules: impl IntoIterator<Item = &'static str>,
    facts: impl IntoIterator<Item = &'static str>,
    goal: &'static str,
    functions: &Functions,
) -> KnowledgeBase {
    let templates: Vec<RuleTemplate> = rules
        .into_iter()
        .map(|source| match RuleTemplate::parse(source, functions) {
            Ok(rule) => rule,
            Err(err) => panic!("Failed to compile test rule '{source}': {err}"),
        })
        .collect();
    let parse = |source: &'static str| match parse_fact(source) {
        Ok(fact) => fact,
        Err(err) => panic!("Failed to parse test fact '{source}': {err}"),
    };
    let mut kb = KnowledgeBase::new(templates, parse(goal));
    kb.add_facts(facts.into_iter().map(parse));
    kb
}
