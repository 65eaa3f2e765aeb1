//! Concrete rules and the compiled grammar
//!
//! A [`Rule`] is one concrete rewrite `lhs -> rhs` with a weight. A
//! [`Grammar`] holds the full rule set and a start symbol, and derives the
//! terminal/nonterminal alphabets plus the nonterminal application order
//! used by chart resolution: every nonterminal precedes the nonterminals
//! whose rules depend on it.

use super::compiler::compile_rule_with;
use super::error::{ConfigurationError, GrammarError};
use super::expression::DEFAULT_REPETITION_CAP;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// One concrete grammar rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Nonterminal name this rule produces
    pub lhs: String,
    /// Ordered symbol sequence the rule accepts
    pub rhs: Vec<String>,
    /// Rule weight; greedy selection prefers higher weights
    pub weight: u32,
}

impl Rule {
    /// Create a rule with the default weight (the rhs length).
    pub fn new(lhs: impl Into<String>, rhs: Vec<String>) -> Self {
        let weight = rhs.len() as u32;
        Self {
            lhs: lhs.into(),
            rhs,
            weight,
        }
    }

    /// Create a rule with an explicit weight.
    pub fn with_weight(lhs: impl Into<String>, rhs: Vec<String>, weight: u32) -> Self {
        Self {
            lhs: lhs.into(),
            rhs,
            weight,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} : {}", self.lhs, self.rhs.join(" "), self.weight)
    }
}

/// An immutable set of concrete rules plus a designated start symbol.
#[derive(Debug, Clone)]
pub struct Grammar {
    rules: Vec<Rule>,
    start_symbol: String,
    terminals: BTreeSet<String>,
    nonterminals: BTreeSet<String>,
    application_order: Vec<String>,
}

impl Grammar {
    /// Build a grammar from already-concrete rules.
    ///
    /// Fails with [`ConfigurationError::CyclicDependency`] if the
    /// nonterminal reference graph admits no application order.
    pub fn new(
        start_symbol: impl Into<String>,
        rules: Vec<Rule>,
    ) -> Result<Self, ConfigurationError> {
        let nonterminals: BTreeSet<String> =
            rules.iter().map(|rule| rule.lhs.clone()).collect();

        let mut terminals = BTreeSet::new();
        for rule in &rules {
            for symbol in &rule.rhs {
                if !nonterminals.contains(symbol) {
                    terminals.insert(symbol.clone());
                }
            }
        }

        let application_order = compute_application_order(&rules, &nonterminals)?;

        Ok(Self {
            rules,
            start_symbol: start_symbol.into(),
            terminals,
            nonterminals,
            application_order,
        })
    }

    /// Compile a multi-line notation source into a grammar.
    ///
    /// Blank lines and lines starting with `#` are skipped. Compile errors
    /// carry the 1-based line number.
    pub fn from_notation(start_symbol: impl Into<String>, source: &str) -> Result<Self, GrammarError> {
        Self::from_notation_with(start_symbol, source, DEFAULT_REPETITION_CAP)
    }

    /// Compile a notation source with an explicit repetition cap.
    pub fn from_notation_with(
        start_symbol: impl Into<String>,
        source: &str,
        cap: usize,
    ) -> Result<Self, GrammarError> {
        let mut rules = Vec::new();
        for (index, line) in source.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let compiled = compile_rule_with(trimmed, cap).map_err(|error| {
                GrammarError::Compile {
                    line: index + 1,
                    error,
                }
            })?;
            rules.extend(compiled);
        }
        Self::new(start_symbol, rules).map_err(GrammarError::from)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn start_symbol(&self) -> &str {
        &self.start_symbol
    }

    pub fn terminals(&self) -> &BTreeSet<String> {
        &self.terminals
    }

    pub fn nonterminals(&self) -> &BTreeSet<String> {
        &self.nonterminals
    }

    /// Nonterminals in dependency-respecting application order.
    pub fn application_order(&self) -> &[String] {
        &self.application_order
    }

    pub fn is_nonterminal(&self, symbol: &str) -> bool {
        self.nonterminals.contains(symbol)
    }

    /// All rules producing the given nonterminal, in compile order.
    pub fn rules_for<'g>(&'g self, lhs: &'g str) -> impl Iterator<Item = &'g Rule> {
        self.rules.iter().filter(move |rule| rule.lhs == lhs)
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grammar:")?;
        writeln!(f, "  start symbol: {}", self.start_symbol)?;
        writeln!(
            f,
            "  terminals: {}",
            self.terminals.iter().cloned().collect::<Vec<_>>().join(" ")
        )?;
        writeln!(
            f,
            "  nonterminals: {}",
            self.nonterminals.iter().cloned().collect::<Vec<_>>().join(" ")
        )?;
        writeln!(f, "Rules:")?;
        for rule in &self.rules {
            writeln!(f, "  {}", rule)?;
        }
        Ok(())
    }
}

/// Kahn-style emission over the nonterminal reference graph.
///
/// A nonterminal depends on the *other* nonterminals appearing in any of its
/// rules' right-hand sides; self-references are not dependencies. Emission
/// is lexicographic among the currently emittable symbols, so the order is
/// deterministic. A stall with symbols remaining is a cycle.
fn compute_application_order(
    rules: &[Rule],
    nonterminals: &BTreeSet<String>,
) -> Result<Vec<String>, ConfigurationError> {
    let mut dependencies: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for nonterminal in nonterminals {
        dependencies.insert(nonterminal, BTreeSet::new());
    }
    for rule in rules {
        for symbol in &rule.rhs {
            if *symbol != rule.lhs && nonterminals.contains(symbol) {
                dependencies
                    .entry(rule.lhs.as_str())
                    .or_default()
                    .insert(symbol);
            }
        }
    }

    let mut order: Vec<String> = Vec::with_capacity(nonterminals.len());
    let mut emitted: BTreeSet<&str> = BTreeSet::new();

    while order.len() < nonterminals.len() {
        let next = dependencies.iter().find(|(symbol, deps)| {
            !emitted.contains(*symbol) && deps.iter().all(|dep| emitted.contains(dep))
        });
        match next {
            Some((&symbol, _)) => {
                emitted.insert(symbol);
                order.push(symbol.to_string());
            }
            None => {
                let symbols = nonterminals
                    .iter()
                    .filter(|symbol| !emitted.contains(symbol.as_str()))
                    .cloned()
                    .collect();
                return Err(ConfigurationError::CyclicDependency { symbols });
            }
        }
    }

    Ok(order)
}
