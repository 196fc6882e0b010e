//  MOD.rs
//    by Lut99
//
//  Created:
//    14 Oct 2026, 10:11:37
//  Last edited:
//    18 Oct 2026, 14:02:19
//  Auto updated?
//    Yes
//
//  Description:
//!   Defines the syntax tree of rules, facts and their expressions, as they
//!   are written by the user.
//!
//!   Every node implements [`Display`] by serializing itself back to its
//!   canonical textual form. For nodes that remember their source text (e.g.,
//!   [`LeftExpression`]), that source is what gets written instead.
//

use std::error;
use std::fmt::{Display, Formatter, Result as FResult};

use enum_debug::EnumDebug;
use indexmap::{IndexMap, IndexSet};


/***** ERRORS *****/
/// Represents that a predicate contains a variable where only constants are allowed.
#[derive(Debug)]
pub struct ContainsVariablesError {
    /// The predicate that contained the variables.
    pub predicate: Predicate,
}
impl Display for ContainsVariablesError {
    #[inline]
    fn fmt(&self, f: &mut Formatter) -> FResult {
        write!(f, "Predicate '{}' contains variables and cannot be used as a fact", self.predicate)
    }
}
impl error::Error for ContainsVariablesError {}





/***** HELPERS *****/
/// Writes a list of things separated by some separator.
pub(crate) struct Joined<'a, T>(pub &'a [T], pub &'static str);
impl<'a, T: Display> Display for Joined<'a, T> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        for (i, elem) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(self.1)?;
            }
            elem.fmt(f)?;
        }
        Ok(())
    }
}





/***** LIBRARY *****/
/// A single argument to a [`Predicate`].
///
/// # Syntax
/// ```plain
/// 'foo'
/// X
/// ```
#[derive(Clone, Debug, EnumDebug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Term {
    /// A quoted, literal value. Stored without its quotes.
    Constant(String),
    /// A named placeholder that may be bound to a constant.
    Variable(String),
}
impl Term {
    /// Returns whether this term is a [`Term::Constant`].
    #[inline]
    pub fn is_constant(&self) -> bool { matches!(self, Self::Constant(_)) }

    /// Returns whether this term is a [`Term::Variable`].
    #[inline]
    pub fn is_variable(&self) -> bool { matches!(self, Self::Variable(_)) }

    /// Returns the value of this term if it's a constant.
    #[inline]
    pub fn as_constant(&self) -> Option<&str> {
        match self {
            Self::Constant(value) => Some(value),
            Self::Variable(_) => None,
        }
    }

    /// Returns the name of this term if it's a variable.
    #[inline]
    pub fn as_variable(&self) -> Option<&str> {
        match self {
            Self::Constant(_) => None,
            Self::Variable(name) => Some(name),
        }
    }

    /// Substitutes this term by its assigned constant, if it's a variable with an assignment.
    ///
    /// # Arguments
    /// - `assign`: A map of variable names to the constants they are bound to.
    ///
    /// # Returns
    /// A new Term that is a [`Term::Constant`] if this term was a constant or a variable bound in
    /// `assign`, or the same [`Term::Variable`] otherwise.
    #[inline]
    pub fn concretize<V: AsRef<str>>(&self, assign: &IndexMap<String, V>) -> Self {
        match self {
            Self::Variable(name) => match assign.get(name) {
                Some(value) => Self::Constant(value.as_ref().into()),
                None => self.clone(),
            },
            Self::Constant(_) => self.clone(),
        }
    }
}
impl Display for Term {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        match self {
            Self::Constant(value) => write!(f, "'{value}'"),
            Self::Variable(name) => write!(f, "{name}"),
        }
    }
}



/// A named predicate over an ordered list of [`Term`]s.
///
/// Two predicates are equal iff their names are equal and their arguments are equal
/// term-for-term.
///
/// # Syntax
/// ```plain
/// foo()
/// foo('bar', X)
/// ```
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Predicate {
    /// The name of the predicate.
    pub name:   String,
    /// The arguments to the predicate.
    pub values: Vec<Term>,
}
impl Predicate {
    /// Constructor for the Predicate.
    ///
    /// # Arguments
    /// - `name`: The name of the predicate.
    /// - `values`: The [`Term`]s that are its arguments.
    ///
    /// # Returns
    /// A new Predicate.
    #[inline]
    pub fn new(name: impl Into<String>, values: impl IntoIterator<Item = Term>) -> Self {
        Self { name: name.into(), values: values.into_iter().collect() }
    }

    /// Returns the number of arguments of this predicate.
    #[inline]
    pub fn arity(&self) -> usize { self.values.len() }

    /// Returns whether this predicate has no variables in it.
    #[inline]
    pub fn is_grounded(&self) -> bool { self.values.iter().all(Term::is_constant) }

    /// Returns an iterator over the names of the variables in this predicate.
    ///
    /// Note that a variable occurring multiple times is also yielded multiple times.
    #[inline]
    pub fn vars<'s>(&'s self) -> impl 's + Iterator<Item = &'s str> { self.values.iter().filter_map(Term::as_variable) }

    /// Substitutes any assigned variables in this predicate by their constants.
    ///
    /// Variables that have no assignment are left in place.
    ///
    /// # Arguments
    /// - `assign`: A map of variable names to the constants they are bound to.
    ///
    /// # Returns
    /// A new Predicate with the assignment applied.
    #[inline]
    pub fn concretize<V: AsRef<str>>(&self, assign: &IndexMap<String, V>) -> Self {
        Self { name: self.name.clone(), values: self.values.iter().map(|t| t.concretize(assign)).collect() }
    }

    /// Checks whether this predicate can describe the given fact.
    ///
    /// This is the case if the names and arities are equal, and all constant arguments of this
    /// predicate are equal to the fact's values at the same position. Variables match anything.
    ///
    /// # Arguments
    /// - `fact`: The [`Fact`] to match.
    ///
    /// # Returns
    /// True if it does, false otherwise.
    pub fn matches(&self, fact: &Fact) -> bool {
        if self.name != fact.name || self.values.len() != fact.values.len() {
            return false;
        }
        self.values.iter().zip(&fact.values).all(|(term, value)| match term {
            Term::Constant(c) => c == value,
            Term::Variable(_) => true,
        })
    }

    /// Tries to create an equivalent [`Fact`] out of this predicate.
    ///
    /// # Returns
    /// The equivalent fact, or [`None`] if this predicate contained variables.
    #[inline]
    pub fn to_fact(&self) -> Option<Fact> {
        let values: Vec<String> = self.values.iter().map(|t| t.as_constant().map(String::from)).collect::<Option<_>>()?;
        Some(Fact { name: self.name.clone(), values })
    }
}
impl Display for Predicate {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult { write!(f, "{}({})", self.name, Joined(&self.values, ",")) }
}
impl PartialEq<Fact> for Predicate {
    #[inline]
    fn eq(&self, other: &Fact) -> bool {
        self.name == other.name
            && self.values.len() == other.values.len()
            && self.values.iter().zip(&other.values).all(|(t, v)| t.as_constant() == Some(v.as_str()))
    }
}
impl From<Fact> for Predicate {
    #[inline]
    fn from(value: Fact) -> Self { value.into_predicate() }
}



/// A [`Predicate`] without any variables in it.
///
/// This is the only thing that can be stored in a
/// [`KnowledgeBase`](crate::interpreter::KnowledgeBase).
///
/// # Syntax
/// ```plain
/// foo()
/// foo('bar', 'baz')
/// ```
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Fact {
    /// The name of the fact.
    pub name:   String,
    /// The (constant) values of the fact, without their quotes.
    pub values: Vec<String>,
}
impl Fact {
    /// Constructor for the Fact.
    ///
    /// # Arguments
    /// - `name`: The name of the fact.
    /// - `values`: The constant values of the fact, without quotes.
    ///
    /// # Returns
    /// A new Fact.
    #[inline]
    pub fn new<V: Into<String>>(name: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Self { name: name.into(), values: values.into_iter().map(Into::into).collect() }
    }

    /// Returns the number of values of this fact.
    #[inline]
    pub fn arity(&self) -> usize { self.values.len() }

    /// Creates an equivalent [`Predicate`] out of this Fact.
    #[inline]
    pub fn to_predicate(&self) -> Predicate { self.clone().into_predicate() }

    /// Turns this Fact into an equivalent [`Predicate`].
    #[inline]
    pub fn into_predicate(self) -> Predicate { Predicate { name: self.name, values: self.values.into_iter().map(Term::Constant).collect() } }
}
impl Display for Fact {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        write!(f, "{}(", self.name)?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "'{value}'")?;
        }
        write!(f, ")")
    }
}
impl TryFrom<Predicate> for Fact {
    type Error = ContainsVariablesError;

    #[inline]
    fn try_from(value: Predicate) -> Result<Self, Self::Error> {
        match value.to_fact() {
            Some(fact) => Ok(fact),
            None => Err(ContainsVariablesError { predicate: value }),
        }
    }
}



/// The operator of a [`Comparison`].
#[derive(Clone, Copy, Debug, EnumDebug, Eq, Hash, PartialEq)]
pub enum CompareOp {
    /// `==`
    Eq,
    /// `!=`
    Ne,
}
impl Display for CompareOp {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        match self {
            Self::Eq => write!(f, "=="),
            Self::Ne => write!(f, "!="),
        }
    }
}

/// Compares the values of two terms.
///
/// # Syntax
/// ```plain
/// X!=Y
/// X=='foo'
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Comparison {
    /// The lefthand side.
    pub lhs: Term,
    /// The operator.
    pub op:  CompareOp,
    /// The righthand side.
    pub rhs: Term,
}
impl Display for Comparison {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult { write!(f, "{}{}{}", self.lhs, self.op, self.rhs) }
}

/// A boolean expression over predicates, as found on the lefthand side of a rule.
///
/// # Syntax
/// ```plain
/// foo(X)
/// foo(X) and not (bar(X) and baz(Y)) and X!=Y
/// ```
#[derive(Clone, Debug, EnumDebug, Eq, Hash, PartialEq)]
pub enum Expr {
    /// A predicate that holds if it describes any fact in the knowledge base.
    Atom(Predicate),
    /// Negation-as-failure of the nested expression.
    Not(Box<Expr>),
    /// Conjunction of two or more expressions.
    And(Vec<Expr>),
    /// A parenthesized expression.
    Group(Box<Expr>),
    /// A comparison between two terms.
    Compare(Comparison),
}
impl Expr {
    /// Returns all the atoms in this expression, in order of occurrence.
    ///
    /// Atoms occurring multiple times are returned multiple times.
    pub fn atoms(&self) -> Vec<&Predicate> {
        let mut atoms: Vec<&Predicate> = Vec::new();
        self.collect_atoms(&mut atoms);
        atoms
    }

    fn collect_atoms<'s>(&'s self, atoms: &mut Vec<&'s Predicate>) {
        match self {
            Self::Atom(pred) => atoms.push(pred),
            Self::Not(expr) | Self::Group(expr) => expr.collect_atoms(atoms),
            Self::And(exprs) => {
                for expr in exprs {
                    expr.collect_atoms(atoms);
                }
            },
            Self::Compare(_) => {},
        }
    }

    /// Returns a copy of this expression with an assignment applied.
    ///
    /// # Arguments
    /// - `atom`: Some closure that maps every atom to its replacement.
    /// - `assign`: A map of variable names to constants, used to
    ///   [concretize](Term::concretize()) the operands of comparisons.
    ///
    /// # Returns
    /// A new Expr with the same structure.
    pub fn substitute<V: AsRef<str>>(&self, atom: &mut impl FnMut(&Predicate) -> Predicate, assign: &IndexMap<String, V>) -> Self {
        match self {
            Self::Atom(pred) => Self::Atom(atom(pred)),
            Self::Not(expr) => Self::Not(Box::new(expr.substitute(atom, assign))),
            Self::Group(expr) => Self::Group(Box::new(expr.substitute(atom, assign))),
            Self::And(exprs) => Self::And(exprs.iter().map(|e| e.substitute(&mut *atom, assign)).collect()),
            Self::Compare(comp) => Self::Compare(Comparison { lhs: comp.lhs.concretize(assign), op: comp.op, rhs: comp.rhs.concretize(assign) }),
        }
    }
}
impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        match self {
            Self::Atom(pred) => pred.fmt(f),
            Self::Not(expr) => write!(f, "not {expr}"),
            Self::And(exprs) => Joined(exprs, " and ").fmt(f),
            Self::Group(expr) => write!(f, "({expr})"),
            Self::Compare(comp) => comp.fmt(f),
        }
    }
}

/// The lefthand side of a rule.
///
/// Next to the parsed [`Expr`], it remembers its source text and the unique atoms in it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LeftExpression {
    /// The text this expression was parsed from.
    pub source: String,
    /// The parsed expression.
    pub expr:   Expr,
    /// The structurally unique atoms in `expr`, in order of first occurrence.
    pub atoms:  Vec<Predicate>,
}
impl LeftExpression {
    /// Constructor for the LeftExpression.
    ///
    /// # Arguments
    /// - `source`: The text the expression was written as.
    /// - `expr`: The parsed [`Expr`].
    ///
    /// # Returns
    /// A new LeftExpression that has collected the unique atoms in `expr`.
    pub fn new(source: impl Into<String>, expr: Expr) -> Self {
        let atoms: IndexSet<Predicate> = expr.atoms().into_iter().cloned().collect();
        Self { source: source.into(), expr, atoms: atoms.into_iter().collect() }
    }

    /// Creates a LeftExpression that uses the canonical serialization of `expr` as its source.
    #[inline]
    pub fn from_expr(expr: Expr) -> Self { Self::new(expr.to_string(), expr) }

    /// Returns the unique names of the variables occurring in the atoms of this expression.
    #[inline]
    pub fn vars(&self) -> IndexSet<&str> { self.atoms.iter().flat_map(Predicate::vars).collect() }
}
impl Display for LeftExpression {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult { f.write_str(&self.source) }
}



/// Defines what an [`Action`] does when it fires.
#[derive(Clone, Copy, Debug, EnumDebug, Eq, Hash, PartialEq)]
pub enum ActionKind {
    /// Adds its predicate as a fact.
    Add,
    /// Removes its predicate as a fact.
    Remove,
    /// Calls the registered function named after the predicate.
    Function,
}
impl ActionKind {
    /// Returns the keyword of this kind as written in a rule.
    #[inline]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Function => "function",
        }
    }

    /// Returns the ActionKind that has the given keyword, if any.
    #[inline]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "add" => Some(Self::Add),
            "remove" => Some(Self::Remove),
            "function" => Some(Self::Function),
            _ => None,
        }
    }
}
impl Display for ActionKind {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult { f.write_str(self.keyword()) }
}

/// A single consequence of a rule.
///
/// # Syntax
/// ```plain
/// add:foo(X)
/// remove:bar('baz')
/// function:log_call(X)
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Action {
    /// What to do.
    pub kind:      ActionKind,
    /// What to do it with.
    pub predicate: Predicate,
}
impl Display for Action {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult { write!(f, "{}:{}", self.kind, self.predicate) }
}

/// The righthand side of a rule.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RightExpression {
    /// The text this expression was parsed from.
    pub source:  String,
    /// The unique actions in this expression, in textual order.
    pub actions: Vec<Action>,
}
impl RightExpression {
    /// Constructor for the RightExpression.
    ///
    /// Duplicate actions are only kept once.
    ///
    /// # Arguments
    /// - `source`: The text the expression was written as.
    /// - `actions`: The [`Action`]s in it.
    ///
    /// # Returns
    /// A new RightExpression.
    pub fn new(source: impl Into<String>, actions: impl IntoIterator<Item = Action>) -> Self {
        let actions: IndexSet<Action> = actions.into_iter().collect();
        Self { source: source.into(), actions: actions.into_iter().collect() }
    }

    /// Creates a RightExpression that uses the canonical serialization of `actions` as its source.
    pub fn from_actions(actions: impl IntoIterator<Item = Action>) -> Self {
        let actions: IndexSet<Action> = actions.into_iter().collect();
        let actions: Vec<Action> = actions.into_iter().collect();
        Self { source: Joined(&actions, ", ").to_string(), actions }
    }

    /// Returns the unique names of the variables occurring in the actions' predicates.
    #[inline]
    pub fn vars(&self) -> IndexSet<&str> { self.actions.iter().flat_map(|a| a.predicate.vars()).collect() }
}
impl Display for RightExpression {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult { f.write_str(&self.source) }
}



/// A rule as written by the user, before any validation.
///
/// # Syntax
/// ```plain
/// rule1: foo(X) and not bar(X) => add:baz(X)
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rule {
    /// The full text this rule was parsed from.
    pub source: String,
    /// The name of the rule.
    pub name:   String,
    /// The condition of the rule.
    pub left:   LeftExpression,
    /// The consequences of the rule.
    pub right:  RightExpression,
}
impl Rule {
    /// Returns an iterator over all the predicates in the rule, lefthand side first.
    #[inline]
    pub fn predicates<'s>(&'s self) -> impl 's + Iterator<Item = &'s Predicate> {
        self.left.expr.atoms().into_iter().chain(self.right.actions.iter().map(|a| &a.predicate))
    }
}
impl Display for Rule {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult { f.write_str(&self.source) }
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::make_fact;


    #[test]
    fn test_predicate_matches() {
        let pred = Predicate::new("op1", [Term::Variable("X".into()), Term::Constant("b".into())]);
        assert!(pred.matches(&make_fact("op1", ["a", "b"])));
        assert!(pred.matches(&make_fact("op1", ["c", "b"])));
        assert!(!pred.matches(&make_fact("op1", ["c", "d"])));
        assert!(!pred.matches(&make_fact("op2", ["a", "b"])));
        assert!(!pred.matches(&make_fact("op1", ["a"])));
    }

    #[test]
    fn test_predicate_concretize() {
        let pred = Predicate::new("op2", [Term::Variable("X".into()), Term::Variable("Y".into())]);
        let assign: IndexMap<String, String> = IndexMap::from([("X".into(), "a".into())]);
        let res = pred.concretize(&assign);
        assert_eq!(res.to_string(), "op2('a',Y)");
        assert!(!res.is_grounded());
        assert_eq!(res.vars().collect::<Vec<_>>(), vec!["Y"]);
    }

    #[test]
    fn test_fact_predicate_conversion() {
        let fact = make_fact("op1", ["a", "b"]);
        assert_eq!(fact.to_string(), "op1('a','b')");
        assert_eq!(fact.to_predicate(), fact);
        assert_eq!(Fact::try_from(fact.to_predicate()).ok(), Some(fact));

        let pred = Predicate::new("op1", [Term::Variable("X".into())]);
        assert!(Fact::try_from(pred).is_err());
    }

    #[test]
    fn test_expr_atoms_and_display() {
        let a = Predicate::new("op1", [Term::Variable("X".into())]);
        let b = Predicate::new("op2", [Term::Variable("Y".into())]);
        let expr = Expr::And(vec![
            Expr::Atom(a.clone()),
            Expr::Not(Box::new(Expr::Group(Box::new(Expr::And(vec![Expr::Atom(b.clone()), Expr::Atom(a.clone())]))))),
            Expr::Compare(Comparison { lhs: Term::Variable("X".into()), op: CompareOp::Ne, rhs: Term::Variable("Y".into()) }),
        ]);
        assert_eq!(expr.to_string(), "op1(X) and not (op2(Y) and op1(X)) and X!=Y");
        assert_eq!(expr.atoms(), vec![&a, &b, &a]);

        let left = LeftExpression::from_expr(expr);
        assert_eq!(left.atoms, vec![a, b]);
        assert_eq!(left.vars().into_iter().collect::<Vec<_>>(), vec!["X", "Y"]);
    }

    #[test]
    fn test_right_expression_dedup() {
        let act = Action { kind: ActionKind::Add, predicate: Predicate::new("op1", [Term::Constant("a".into())]) };
        let right = RightExpression::from_actions([act.clone(), act.clone()]);
        assert_eq!(right.actions, vec![act]);
        assert_eq!(right.to_string(), "add:op1('a')");
    }
}
