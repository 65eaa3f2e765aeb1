//! Chart-style rule resolution over the interval graph
//!
//! Nonterminals are processed in the grammar's application order, one level
//! per nonterminal. Within a level, every rule searches the graph exactly as
//! it stood when the level began; all accepted matches are then applied as
//! one additive batch. Consequences: rules never observe nodes synthesized
//! in their own level (a self-referential rule like `A -> A b` finds no
//! match), and the graph only ever grows.

use super::derivation::{CandidateMap, Derivation};
use crate::grammar::{Grammar, Rule};
use crate::graph::{IntervalGraph, NodeId, NodeKind, Span};
use std::collections::VecDeque;

/// Apply every grammar rule bottom-up, growing `graph` with the nonterminal
/// nodes it discovers. Returns the candidate derivations per synthesized
/// node.
pub fn resolve(grammar: &Grammar, graph: &mut IntervalGraph) -> CandidateMap {
    let mut candidates = CandidateMap::new();

    for nonterminal in grammar.application_order() {
        // search first, insert after: the level reads one frozen snapshot
        let mut matches: Vec<LevelMatch> = Vec::new();
        for rule in grammar.rules_for(nonterminal) {
            for path in find_paths(graph, rule) {
                let first = path[0];
                let last = path[path.len() - 1];
                matches.push(LevelMatch {
                    rule: rule.clone(),
                    predecessors: graph.predecessors(first).to_vec(),
                    successors: graph.successors(last).to_vec(),
                    path,
                });
            }
        }

        let nodes_before = graph.node_count();
        for m in matches {
            apply_match(graph, &mut candidates, nonterminal, m);
        }
        log::debug!(
            "level {}: +{} nodes, {} candidates total",
            nonterminal,
            graph.node_count() - nodes_before,
            candidates.len()
        );
    }

    candidates
}

struct LevelMatch {
    rule: Rule,
    path: Vec<NodeId>,
    predecessors: Vec<NodeId>,
    successors: Vec<NodeId>,
}

/// Synthesize (or reuse) the nonterminal node for one accepted path and
/// splice it alongside the path: predecessors of the path's first node lead
/// into it, and it leads out to the successors of the path's last node. The
/// path itself stays untouched.
fn apply_match(
    graph: &mut IntervalGraph,
    candidates: &mut CandidateMap,
    nonterminal: &str,
    m: LevelMatch,
) {
    let first_span = graph.node(m.path[0]).span;
    let last_span = graph.node(m.path[m.path.len() - 1]).span;
    let span = Span::new(first_span.start, last_span.end);

    let id = graph.get_or_create(NodeKind::Nonterminal, span, nonterminal, m.rule.weight);
    for predecessor in m.predecessors {
        graph.add_edge(predecessor, id);
    }
    for successor in m.successors {
        graph.add_edge(id, successor);
    }

    candidates.entry(id).or_default().push(Derivation {
        rule: m.rule,
        children: m.path,
    });
}

/// Every node path whose label sequence equals the rule's rhs exactly.
///
/// Bounded breadth-first expansion: the frontier holds partial paths; each
/// step extends a path by one graph edge, pruning on label mismatch, and
/// accepts paths that reach the full rhs length. Sentinels never match a
/// label, and an empty rhs matches nothing.
fn find_paths(graph: &IntervalGraph, rule: &Rule) -> Vec<Vec<NodeId>> {
    let rhs = &rule.rhs;
    if rhs.is_empty() {
        return Vec::new();
    }

    let mut accepted = Vec::new();
    let mut frontier: VecDeque<Vec<NodeId>> = graph
        .nodes_with_label(&rhs[0])
        .into_iter()
        .map(|id| vec![id])
        .collect();

    while let Some(path) = frontier.pop_front() {
        if path.len() == rhs.len() {
            accepted.push(path);
            continue;
        }
        let tail = path[path.len() - 1];
        let wanted = &rhs[path.len()];
        for &next in graph.successors(tail) {
            let node = graph.node(next);
            if node.kind.is_sentinel() || node.label != *wanted {
                continue;
            }
            let mut extended = path.clone();
            extended.push(next);
            frontier.push_back(extended);
        }
    }

    accepted
}
