//! Processor: the compile/build/resolve/select pipeline in one call

use super::config::RunConfig;
use crate::document::Document;
use crate::formats;
use crate::grammar::{Grammar, GrammarError};
use crate::graph::{builder, BuildError};
use crate::resolver::{chart, selector, ParseTree, ResolveError};
use std::fmt;

/// Errors during processor execution
#[derive(Debug, Clone)]
pub enum ExecutionError {
    Grammar(GrammarError),
    Build(BuildError),
    Resolve(ResolveError),
    UnknownFormat(String),
    Serialization(String),
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionError::Grammar(e) => write!(f, "grammar error: {}", e),
            ExecutionError::Build(e) => write!(f, "graph build error: {}", e),
            ExecutionError::Resolve(e) => write!(f, "{}", e),
            ExecutionError::UnknownFormat(name) => write!(f, "unknown output format '{}'", name),
            ExecutionError::Serialization(msg) => write!(f, "serialization failed: {}", msg),
        }
    }
}

impl std::error::Error for ExecutionError {}

impl From<GrammarError> for ExecutionError {
    fn from(e: GrammarError) -> Self {
        ExecutionError::Grammar(e)
    }
}

impl From<BuildError> for ExecutionError {
    fn from(e: BuildError) -> Self {
        ExecutionError::Build(e)
    }
}

impl From<ResolveError> for ExecutionError {
    fn from(e: ResolveError) -> Self {
        ExecutionError::Resolve(e)
    }
}

/// Runs documents through one compiled grammar.
///
/// The processor owns no per-document state: every [`parse`](Self::parse)
/// call builds, resolves and selects against fresh structures, so a failed
/// document never affects the next one.
#[derive(Debug)]
pub struct Processor {
    grammar: Grammar,
}

impl Processor {
    pub fn new(grammar: Grammar) -> Self {
        Self { grammar }
    }

    /// Compile a run configuration into a ready processor.
    pub fn from_config(config: &RunConfig) -> Result<Self, ExecutionError> {
        Ok(Self::new(config.compile()?))
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Parse one document into its selected tree.
    pub fn parse(&self, document: &Document) -> Result<ParseTree, ExecutionError> {
        let mut graph = builder::build(document)?;
        let candidates = chart::resolve(&self.grammar, &mut graph);
        let tree = selector::select(&graph, &candidates, &self.grammar)?;
        Ok(tree)
    }

    /// Parse and render in the named output format (`json` or `treeviz`).
    pub fn parse_and_serialize(
        &self,
        document: &Document,
        format: &str,
    ) -> Result<String, ExecutionError> {
        let tree = self.parse(document)?;
        match format {
            "json" => serde_json::to_string_pretty(&tree)
                .map_err(|e| ExecutionError::Serialization(e.to_string())),
            "treeviz" => Ok(formats::treeviz::to_treeviz_str(&tree)),
            other => Err(ExecutionError::UnknownFormat(other.to_string())),
        }
    }
}
