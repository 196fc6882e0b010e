//  FUNCTIONS.rs
//    by Lut99
//
//  Created:
//    15 Oct 2026, 11:47:02
//  Last edited:
//    17 Oct 2026, 09:31:26
//  Auto updated?
//    Yes
//
//  Description:
//!   Defines the registry of functions that `function:`-actions may call.
//

use std::collections::HashMap;
use std::fmt::{Debug, Formatter, Result as FResult};


/***** AUXILLARY *****/
/// The shape of a function that can be called by a rule.
///
/// It is given the name of the rule that fired it and the (constant) arguments of the action.
pub type Callback = dyn Fn(&str, &[String]);





/***** LIBRARY *****/
/// Maps names to functions that rules may call through `function:`-actions.
///
/// Rules are checked against this registry when they are compiled, so it must be complete
/// before any rules are loaded.
#[derive(Default)]
pub struct Functions {
    /// The functions, by name.
    funcs: HashMap<String, Box<Callback>>,
}
impl Functions {
    /// Constructor for the Functions that initializes it without any functions.
    ///
    /// # Returns
    /// A new, empty registry.
    #[inline]
    pub fn new() -> Self { Self { funcs: HashMap::new() } }

    /// Registers a new function.
    ///
    /// Any function already registered under the same name is replaced.
    ///
    /// # Arguments
    /// - `name`: The name by which rules refer to the function.
    /// - `func`: The function to call. It is given the name of the rule that fired it and the
    ///   arguments of the action.
    #[inline]
    pub fn register(&mut self, name: impl Into<String>, func: impl 'static + Fn(&str, &[String])) { self.funcs.insert(name.into(), Box::new(func)); }

    /// Registers a new function in a builder-like fashion.
    ///
    /// See [`Functions::register()`] for more information.
    #[inline]
    pub fn with(mut self, name: impl Into<String>, func: impl 'static + Fn(&str, &[String])) -> Self {
        self.register(name, func);
        self
    }

    /// Returns whether a function with the given name is registered.
    #[inline]
    pub fn contains(&self, name: &str) -> bool { self.funcs.contains_key(name) }

    /// Calls a registered function.
    ///
    /// # Arguments
    /// - `name`: The name of the function to call.
    /// - `rule`: The name of the rule calling it.
    /// - `args`: The arguments to pass.
    ///
    /// # Returns
    /// Whether a function with the given name existed (and was thus called).
    #[inline]
    pub fn call(&self, name: &str, rule: &str, args: &[String]) -> bool {
        match self.funcs.get(name) {
            Some(func) => {
                func(rule, args);
                true
            },
            None => false,
        }
    }

    /// Returns the names of all registered functions, in no particular order.
    #[inline]
    pub fn names(&self) -> impl '_ + Iterator<Item = &str> { self.funcs.keys().map(String::as_str) }
}
impl Debug for Functions {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("Functions").field("funcs", &names).finish()
    }
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;


    #[test]
    fn test_functions_call() {
        let calls: Rc<RefCell<Vec<(String, Vec<String>)>>> = Rc::new(RefCell::new(Vec::new()));
        let functions = {
            let calls = calls.clone();
            Functions::new().with("record", move |rule, args| calls.borrow_mut().push((rule.into(), args.to_vec())))
        };

        assert!(functions.contains("record"));
        assert!(!functions.contains("other"));
        assert!(functions.call("record", "rule1", &["a".into(), "b".into()]));
        assert!(!functions.call("other", "rule1", &[]));
        assert_eq!(*calls.borrow(), vec![("rule1".to_string(), vec!["a".to_string(), "b".to_string()])]);
        assert_eq!(format!("{functions:?}"), "Functions { funcs: [\"record\"] }");
    }
}
