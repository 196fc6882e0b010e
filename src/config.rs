//  CONFIG.rs
//    by Lut99
//
//  Created:
//    16 Oct 2026, 14:18:27
//  Last edited:
//    18 Oct 2026, 17:45:10
//  Auto updated?
//    Yes
//
//  Description:
//!   Loads the sectioned files that describe a [`KnowledgeBase`].
//!
//!   Such a file looks like:
//!   ```ini
//!   # Comments are lines starting with a hash
//!   [rules]
//!   rule1: op1(X) => add:op2(X)
//!
//!   [facts]
//!   op1('val1')
//!
//!   [goal]
//!   op2('val1')
//!   ```
//!   All three sections must be given. The rules and facts sections hold
//!   one rule or fact per line, and the goal section holds exactly one
//!   fact (the last one wins).
//

use std::error;
use std::fmt::{Display, Formatter, Result as FResult};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::interpreter::{Functions, KnowledgeBase};
use crate::ir::{compile, Fact, RuleTemplate};
use crate::log::{debug, warn};
use crate::parser::{self, parse_fact};


/***** ERRORS *****/
/// Defines errors that occur when loading a [`Config`] or a [`KnowledgeBase`] from one.
#[derive(Debug)]
pub enum Error {
    /// Failed to read the file.
    FileRead { path: PathBuf, err: std::io::Error },
    /// A section header named a section we don't know.
    UnknownSection { line: usize, name: String },
    /// A section was never opened.
    MissingSection { name: &'static str },
    /// A section was opened but had nothing in it.
    EmptySection { name: &'static str },
    /// One of the rules failed to compile.
    Rule { line: String, err: compile::Error },
    /// One of the facts failed to parse.
    Fact { line: String, err: parser::Error },
    /// The goal failed to parse.
    Goal { line: String, err: parser::Error },
}
impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        use Error::*;
        match self {
            FileRead { path, .. } => write!(f, "Failed to read config file '{}'", path.display()),
            UnknownSection { line, name } => write!(f, "Incorrect config file format: unknown section '[{name}]' on line {line}"),
            MissingSection { name } => write!(f, "Incorrect config file format: missing section '[{name}]'"),
            EmptySection { name } => write!(f, "Incorrect config file format: section '[{name}]' is empty"),
            Rule { line, .. } => write!(f, "Failed to load rule '{line}'"),
            Fact { line, .. } => write!(f, "Failed to load fact '{line}'"),
            Goal { line, .. } => write!(f, "Failed to load goal '{line}'"),
        }
    }
}
impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        use Error::*;
        match self {
            FileRead { err, .. } => Some(err),
            Rule { err, .. } => Some(err),
            Fact { err, .. } | Goal { err, .. } => Some(err),
            UnknownSection { .. } | MissingSection { .. } | EmptySection { .. } => None,
        }
    }
}





/***** CONSTANTS *****/
/// The name of the section with rules.
pub const SECTION_RULES: &str = "rules";
/// The name of the section with facts.
pub const SECTION_FACTS: &str = "facts";
/// The name of the section with the goal.
pub const SECTION_GOAL: &str = "goal";





/***** LIBRARY *****/
/// The contents of a config file, not yet parsed any further than lines.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// The rules, in order.
    pub rules: Vec<String>,
    /// The initial facts, in order.
    pub facts: Vec<String>,
    /// The goal.
    pub goal:  String,
}
impl Config {
    /// Loads a Config from a file.
    ///
    /// # Arguments
    /// - `path`: The path of the file to load.
    ///
    /// # Returns
    /// A new Config.
    ///
    /// # Errors
    /// This function errors if the file could not be read or is not a valid config.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path: &Path = path.as_ref();
        debug!("Loading config file '{}'", path.display());
        match std::fs::read_to_string(path) {
            Ok(raw) => raw.parse(),
            Err(err) => Err(Error::FileRead { path: path.into(), err }),
        }
    }
}
impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rules: Option<Vec<String>> = None;
        let mut facts: Option<Vec<String>> = None;
        let mut goal: Option<Option<String>> = None;

        let mut section: Option<&'static str> = None;
        for (i, line) in s.lines().enumerate() {
            let line: &str = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Open new sections
            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                section = Some(match name {
                    SECTION_RULES => {
                        rules = Some(Vec::new());
                        SECTION_RULES
                    },
                    SECTION_FACTS => {
                        facts = Some(Vec::new());
                        SECTION_FACTS
                    },
                    SECTION_GOAL => {
                        goal = Some(None);
                        SECTION_GOAL
                    },
                    other => return Err(Error::UnknownSection { line: i + 1, name: other.into() }),
                });
                continue;
            }

            // Otherwise, add to the current one
            match section {
                Some(SECTION_RULES) => rules.get_or_insert_with(Vec::new).push(line.into()),
                Some(SECTION_FACTS) => facts.get_or_insert_with(Vec::new).push(line.into()),
                Some(_) => goal = Some(Some(line.into())),
                None => warn!("Ignoring line {} ('{line}') because it's not in any section", i + 1),
            }
        }

        // Check everything's there
        let rules: Vec<String> = rules.ok_or(Error::MissingSection { name: SECTION_RULES })?;
        let facts: Vec<String> = facts.ok_or(Error::MissingSection { name: SECTION_FACTS })?;
        let goal: Option<String> = goal.ok_or(Error::MissingSection { name: SECTION_GOAL })?;
        if rules.is_empty() {
            return Err(Error::EmptySection { name: SECTION_RULES });
        }
        if facts.is_empty() {
            return Err(Error::EmptySection { name: SECTION_FACTS });
        }
        match goal {
            Some(goal) => Ok(Self { rules, facts, goal }),
            None => Err(Error::EmptySection { name: SECTION_GOAL }),
        }
    }
}



/// Config extensions for the [`KnowledgeBase`].
impl KnowledgeBase {
    /// Builds a KnowledgeBase from a [`Config`].
    ///
    /// The rules are compiled and the facts are added in the order they were written.
    ///
    /// # Arguments
    /// - `config`: The [`Config`] to build from.
    /// - `functions`: The [`Functions`] that the rules may call.
    ///
    /// # Returns
    /// A new KnowledgeBase.
    ///
    /// # Errors
    /// This function errors if any of the rules, facts or the goal are invalid.
    ///
    /// # Example
    /// ```rust
    /// use forward_rules::config::Config;
    /// use forward_rules::interpreter::{Functions, KnowledgeBase};
    ///
    /// let config: Config = "[rules]\nrule1: op1(X) => add:op2(X)\n[facts]\nop1('a')\n[goal]\nop2('a')\n".parse().unwrap();
    /// let mut kb = KnowledgeBase::from_config(&config, &Functions::new()).unwrap();
    /// assert!(kb.run(&Functions::new()).unwrap());
    /// ```
    pub fn from_config(config: &Config, functions: &Functions) -> Result<Self, Error> {
        let templates: Vec<RuleTemplate> = config
            .rules
            .iter()
            .map(|line| RuleTemplate::parse(line, functions).map_err(|err| Error::Rule { line: line.clone(), err }))
            .collect::<Result<_, _>>()?;
        let facts: Vec<Fact> =
            config.facts.iter().map(|line| parse_fact(line).map_err(|err| Error::Fact { line: line.clone(), err })).collect::<Result<_, _>>()?;
        let goal: Fact = parse_fact(&config.goal).map_err(|err| Error::Goal { line: config.goal.clone(), err })?;

        let mut kb = Self::new(templates, goal);
        kb.add_facts(facts);
        Ok(kb)
    }
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use super::*;


    const FAMILY: &str = r#"
# The family example
[rules]
rule1: op1(X) => add:op2(X)
rule2: op3(X) => add:op1(X)
rule3: op4(X) => add:op1(X)
rule4: not op4('val52') => add:op3('val52')

[facts]
op3('val3')
op4('val51')

[goal]
op2('val52')
"#;


    #[test]
    fn test_config_parse() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let config: Config = FAMILY.parse().unwrap();
        assert_eq!(config.rules.len(), 4);
        assert_eq!(config.rules[3], "rule4: not op4('val52') => add:op3('val52')");
        assert_eq!(config.facts, vec!["op3('val3')".to_string(), "op4('val51')".to_string()]);
        assert_eq!(config.goal, "op2('val52')");

        let mut kb = KnowledgeBase::from_config(&config, &Functions::new()).unwrap();
        assert_eq!(kb.templates().len(), 4);
        assert_eq!(kb.len(), 2);
        assert!(kb.run(&Functions::new()).unwrap());
    }

    #[test]
    fn test_config_sections() {
        assert!(matches!("[rules]\nr: a() => add:b()\n[facts]\na()\n".parse::<Config>(), Err(Error::MissingSection { name: "goal" })));
        assert!(matches!("[rules]\n[facts]\na()\n[goal]\nb()\n".parse::<Config>(), Err(Error::EmptySection { name: "rules" })));
        assert!(matches!("[rules]\nr: a() => add:b()\n[facts]\n[goal]\nb()\n".parse::<Config>(), Err(Error::EmptySection { name: "facts" })));
        assert!(matches!("[rules]\nr: a() => add:b()\n[facts]\na()\n[goal]\n".parse::<Config>(), Err(Error::EmptySection { name: "goal" })));
        assert!(matches!(
            "[rules]\nr: a() => add:b()\n[facts]\na()\n[goal]\nb()\n[extra]\n".parse::<Config>(),
            Err(Error::UnknownSection { line: 7, .. })
        ));

        // Lines outside of sections are ignored, and the last goal wins
        let config: Config = "stray\n[goal]\na()\nb()\n[rules]\nr: a() => add:b()\n[facts]\na()\n".parse().unwrap();
        assert_eq!(config.goal, "b()");
    }

    #[test]
    fn test_config_invalid_contents() {
        let config = Config { rules: vec!["r: a() or b() => add:c()".into()], facts: vec!["a()".into()], goal: "c()".into() };
        assert!(matches!(KnowledgeBase::from_config(&config, &Functions::new()), Err(Error::Rule { .. })));
        let config = Config { rules: vec!["r: a() => add:c()".into()], facts: vec!["a(X)".into()], goal: "c()".into() };
        assert!(matches!(KnowledgeBase::from_config(&config, &Functions::new()), Err(Error::Fact { .. })));
        let config = Config { rules: vec!["r: a() => add:c()".into()], facts: vec!["a()".into()], goal: "c(".into() };
        assert!(matches!(KnowledgeBase::from_config(&config, &Functions::new()), Err(Error::Goal { .. })));
    }

    #[test]
    fn test_config_from_path() {
        assert!(matches!(Config::from_path("/this/path/does/not/exist.ini"), Err(Error::FileRead { .. })));
    }
}
