//  LIB.rs
//    by Lut99
//
//  Created:
//    13 Oct 2026, 16:43:01
//  Last edited:
//    18 Oct 2026, 17:50:13
//  Auto updated?
//    Yes
//
//  Description:
//!   A small forward-chaining rule engine with negation-as-failure.
//!
//!   Rules are written as `name: <condition> => <actions>`, e.g.,
//!   ```plain
//!   rule1: parent(A,B) and not man(A) => add:mother(A,B)
//!   ```
//!   and are applied to a [`KnowledgeBase`](interpreter::KnowledgeBase) of
//!   ground facts until nothing changes anymore.
//!
//!   # Example
//!   ```rust
//!   use forward_rules::interpreter::{Functions, KnowledgeBase};
//!   use forward_rules::ir::RuleTemplate;
//!   use forward_rules::parser::parse_fact;
//!
//!   let functions = Functions::new();
//!   let rule = RuleTemplate::parse("rule1: op1(X) => add:op2(X)", &functions).unwrap();
//!   let mut kb = KnowledgeBase::new([rule], parse_fact("op2('a')").unwrap());
//!   kb.add_facts([parse_fact("op1('a')").unwrap()]);
//!   assert!(kb.run(&functions).unwrap());
//!   ```
//

// Declare modules
pub mod ast;
pub mod config;
pub mod interpreter;
pub mod ir;
mod log;
pub mod parser;
#[cfg(test)]
mod tests;
