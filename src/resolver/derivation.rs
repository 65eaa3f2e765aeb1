//! Candidate derivations recorded during chart resolution

use crate::grammar::Rule;
use crate::graph::NodeId;
use std::collections::HashMap;

/// One way a synthesized nonterminal node can be produced: a rule plus the
/// child path (in span order) that matched its right-hand side.
#[derive(Debug, Clone)]
pub struct Derivation {
    pub rule: Rule,
    pub children: Vec<NodeId>,
}

/// Every synthesized node mapped to its recorded derivations, in discovery
/// order. A node accumulates one entry per matching `(rule, path)` pair.
pub type CandidateMap = HashMap<NodeId, Vec<Derivation>>;
