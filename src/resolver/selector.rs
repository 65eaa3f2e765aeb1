//! Greedy parse tree selection
//!
//! Picks the maximum-weight start-symbol node as root, then expands
//! breadth-first: each node takes its highest-weighted derivation (first
//! recorded wins ties) and its children become tree nodes. Candidate-less
//! nodes (elementary, blank) are leaves. A node never enters the tree
//! twice, so the result is a proper tree even when derivations share
//! structure in the underlying graph.

use super::derivation::CandidateMap;
use super::error::ResolveError;
use crate::grammar::Grammar;
use crate::graph::{IntervalGraph, NodeId};
use serde::Serialize;
use std::collections::{HashSet, VecDeque};
use std::fmt;

/// One node of the selected parse tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub start: usize,
    pub end: usize,
    pub label: String,
    /// Indices into [`ParseTree::nodes`], in ascending start order
    pub children: Vec<usize>,
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{},{})", self.label, self.start, self.end)
    }
}

/// The selected parse tree, arena-backed: node 0 is the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseTree {
    pub nodes: Vec<TreeNode>,
}

impl ParseTree {
    pub fn root(&self) -> &TreeNode {
        &self.nodes[0]
    }

    pub fn node(&self, index: usize) -> &TreeNode {
        &self.nodes[index]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Child nodes of the node at `index`, in ascending start order.
    pub fn children_of(&self, index: usize) -> impl Iterator<Item = &TreeNode> {
        self.nodes[index]
            .children
            .iter()
            .map(move |&child| &self.nodes[child])
    }

    /// Leaves in document order: the linear reading the tree covers.
    pub fn leaves(&self) -> Vec<&TreeNode> {
        let mut leaves = Vec::new();
        let mut stack = vec![0usize];
        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];
            if node.children.is_empty() {
                leaves.push(node);
            } else {
                // reversed so the stack pops children in ascending order
                for &child in node.children.iter().rev() {
                    stack.push(child);
                }
            }
        }
        leaves
    }
}

/// Select one parse tree from the candidate map.
pub fn select(
    graph: &IntervalGraph,
    candidates: &CandidateMap,
    grammar: &Grammar,
) -> Result<ParseTree, ResolveError> {
    let root_id = choose_root(graph, candidates, grammar)?;

    let mut tree = ParseTree { nodes: Vec::new() };
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut queue: VecDeque<(NodeId, usize)> = VecDeque::new();

    visited.insert(root_id);
    tree.nodes.push(tree_node(graph, root_id));
    queue.push_back((root_id, 0));

    while let Some((node_id, tree_index)) = queue.pop_front() {
        let derivations = match candidates.get(&node_id) {
            Some(derivations) if !derivations.is_empty() => derivations,
            _ => continue, // elementary or blank: a leaf
        };

        // highest rule weight; the first recorded derivation wins ties
        let mut best = &derivations[0];
        for derivation in &derivations[1..] {
            if derivation.rule.weight > best.rule.weight {
                best = derivation;
            }
        }

        for &child_id in &best.children {
            if !visited.insert(child_id) {
                continue; // re-visiting is disallowed
            }
            let child_index = tree.nodes.len();
            tree.nodes.push(tree_node(graph, child_id));
            tree.nodes[tree_index].children.push(child_index);
            queue.push_back((child_id, child_index));
        }
        sort_children(&mut tree, tree_index);
    }

    Ok(tree)
}

/// The maximum-weight node labeled with the start symbol; ties go to the
/// smallest node id.
fn choose_root(
    graph: &IntervalGraph,
    candidates: &CandidateMap,
    grammar: &Grammar,
) -> Result<NodeId, ResolveError> {
    let mut roots: Vec<NodeId> = candidates
        .keys()
        .copied()
        .filter(|&id| graph.node(id).label == grammar.start_symbol())
        .collect();
    roots.sort_unstable();

    roots
        .into_iter()
        .max_by_key(|&id| (graph.node(id).weight, std::cmp::Reverse(id)))
        .ok_or_else(|| ResolveError::ParseFailed {
            start_symbol: grammar.start_symbol().to_string(),
        })
}

fn tree_node(graph: &IntervalGraph, id: NodeId) -> TreeNode {
    let node = graph.node(id);
    TreeNode {
        start: node.span.start,
        end: node.span.end,
        label: node.label.clone(),
        children: Vec::new(),
    }
}

fn sort_children(tree: &mut ParseTree, index: usize) {
    let mut children = std::mem::take(&mut tree.nodes[index].children);
    children.sort_by_key(|&child| (tree.nodes[child].start, tree.nodes[child].end));
    tree.nodes[index].children = children;
}
