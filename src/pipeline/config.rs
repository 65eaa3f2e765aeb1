//! Run configuration: one YAML document describing a whole grammar
//!
//! ```text
//! start_symbol: S
//! repetition_cap: 10
//! rules:
//!   - "NP -> NOUN NOUN?"
//!   - "S -> NP VERB NP : 5"
//! ```

use crate::grammar::{Grammar, GrammarError, DEFAULT_REPETITION_CAP};
use serde::{Deserialize, Serialize};

/// A named grammar setup loadable from YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// The grammar's start symbol
    pub start_symbol: String,
    /// Rule notation lines, compiled in order
    pub rules: Vec<String>,
    /// Bound for `*`/`+` repetition; explicit `{m,n}` ranges clamp to it
    #[serde(default = "default_repetition_cap")]
    pub repetition_cap: usize,
}

fn default_repetition_cap() -> usize {
    DEFAULT_REPETITION_CAP
}

impl RunConfig {
    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(source)
    }

    /// Compile the configured notation into a grammar.
    pub fn compile(&self) -> Result<Grammar, GrammarError> {
        Grammar::from_notation_with(
            &self.start_symbol,
            &self.rules.join("\n"),
            self.repetition_cap,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_with_default_cap() {
        let config = RunConfig::from_yaml(
            "start_symbol: S\nrules:\n  - \"S -> NOUN VERB NOUN : 5\"\n",
        )
        .unwrap();
        assert_eq!(config.repetition_cap, DEFAULT_REPETITION_CAP);
        let grammar = config.compile().unwrap();
        assert_eq!(grammar.start_symbol(), "S");
        assert_eq!(grammar.rules().len(), 1);
    }

    #[test]
    fn test_yaml_with_explicit_cap() {
        let config = RunConfig::from_yaml(
            "start_symbol: S\nrepetition_cap: 3\nrules:\n  - \"S -> NOUN+\"\n",
        )
        .unwrap();
        let grammar = config.compile().unwrap();
        assert_eq!(grammar.rules().len(), 3);
    }

    #[test]
    fn test_missing_rules_is_an_error() {
        assert!(RunConfig::from_yaml("start_symbol: S\n").is_err());
    }

    #[test]
    fn test_compile_error_carries_rule_line() {
        let config = RunConfig::from_yaml(
            "start_symbol: S\nrules:\n  - \"S -> NOUN\"\n  - \"NP - NOUN\"\n",
        )
        .unwrap();
        let err = config.compile().unwrap_err();
        assert!(matches!(err, GrammarError::Compile { line: 2, .. }));
    }
}
