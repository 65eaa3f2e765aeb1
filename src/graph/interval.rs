//! The interval graph
//!
//! A DAG over span nodes; an edge `A -> B` means B's span may immediately
//! follow A's in a valid reading, with no intermediate node required. Nodes
//! live in an id-indexed arena with sorted adjacency lists, plus a
//! `(span, label)` index used to deduplicate synthesized nodes. The graph
//! only grows during resolution; edges are removed only by the build-time
//! reduction passes.

use super::node::{NodeData, NodeId, NodeKey, NodeKind, Span};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct IntervalGraph {
    nodes: Vec<NodeData>,
    succ: Vec<Vec<NodeId>>,
    pred: Vec<Vec<NodeId>>,
    index: HashMap<NodeKey, NodeId>,
    start: NodeId,
    end: NodeId,
}

impl IntervalGraph {
    /// Create a graph holding only the START and END sentinels.
    pub fn new() -> Self {
        let mut graph = Self {
            nodes: Vec::new(),
            succ: Vec::new(),
            pred: Vec::new(),
            index: HashMap::new(),
            start: NodeId(0),
            end: NodeId(0),
        };
        graph.start = graph.push_node(NodeKind::Start, Span::new(0, 0), "START", 1);
        graph.end = graph.push_node(NodeKind::End, Span::new(usize::MAX, usize::MAX), "END", 1);
        graph
    }

    fn push_node(&mut self, kind: NodeKind, span: Span, label: &str, weight: u32) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            id,
            kind,
            span,
            label: label.to_string(),
            weight,
        });
        self.succ.push(Vec::new());
        self.pred.push(Vec::new());
        if !kind.is_sentinel() {
            self.index.insert(
                NodeKey {
                    span,
                    label: label.to_string(),
                },
                id,
            );
        }
        id
    }

    /// Insert a node, or return the existing node with the same
    /// `(span, label)` identity. The first creation's kind and weight win.
    pub fn get_or_create(
        &mut self,
        kind: NodeKind,
        span: Span,
        label: &str,
        weight: u32,
    ) -> NodeId {
        let key = NodeKey {
            span,
            label: label.to_string(),
        };
        if let Some(&id) = self.index.get(&key) {
            return id;
        }
        self.push_node(kind, span, label, weight)
    }

    pub fn lookup(&self, span: Span, label: &str) -> Option<NodeId> {
        self.index
            .get(&NodeKey {
                span,
                label: label.to_string(),
            })
            .copied()
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn end(&self) -> NodeId {
        self.end
    }

    pub fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeData> {
        self.nodes.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.succ.iter().map(|out| out.len()).sum()
    }

    /// Add an edge, keeping adjacency lists sorted and duplicate-free.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) {
        if let Err(position) = self.succ[from.index()].binary_search(&to) {
            self.succ[from.index()].insert(position, to);
        }
        if let Err(position) = self.pred[to.index()].binary_search(&from) {
            self.pred[to.index()].insert(position, from);
        }
    }

    pub fn remove_edge(&mut self, from: NodeId, to: NodeId) {
        if let Ok(position) = self.succ[from.index()].binary_search(&to) {
            self.succ[from.index()].remove(position);
        }
        if let Ok(position) = self.pred[to.index()].binary_search(&from) {
            self.pred[to.index()].remove(position);
        }
    }

    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.succ[from.index()].binary_search(&to).is_ok()
    }

    pub fn successors(&self, id: NodeId) -> &[NodeId] {
        &self.succ[id.index()]
    }

    pub fn predecessors(&self, id: NodeId) -> &[NodeId] {
        &self.pred[id.index()]
    }

    /// All edges in `(from, to)` order, ascending by source then target.
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        let mut edges = Vec::with_capacity(self.edge_count());
        for (from, out) in self.succ.iter().enumerate() {
            for &to in out {
                edges.push((NodeId(from as u32), to));
            }
        }
        edges
    }

    /// Non-sentinel nodes carrying the given label, in id order.
    pub fn nodes_with_label(&self, label: &str) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|node| !node.kind.is_sentinel() && node.label == label)
            .map(|node| node.id)
            .collect()
    }

    /// Per-node flag: reachable from `from` in one or more steps.
    pub fn reachable_from(&self, from: NodeId) -> Vec<bool> {
        self.flood(from, |graph, id| graph.successors(id))
    }

    /// Per-node flag: can reach `to` in one or more steps.
    pub fn can_reach(&self, to: NodeId) -> Vec<bool> {
        self.flood(to, |graph, id| graph.predecessors(id))
    }

    fn flood<'g>(
        &'g self,
        origin: NodeId,
        neighbors: impl Fn(&'g Self, NodeId) -> &'g [NodeId],
    ) -> Vec<bool> {
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![origin];
        while let Some(id) = stack.pop() {
            for &next in neighbors(self, id) {
                if !seen[next.index()] {
                    seen[next.index()] = true;
                    stack.push(next);
                }
            }
        }
        seen
    }
}

impl Default for IntervalGraph {
    fn default() -> Self {
        Self::new()
    }
}
