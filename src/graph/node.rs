//! Span and node types for the interval graph
//!
//! A node is a span plus a label plus a weight. Identity for map keys and
//! graph adjacency is the `(span, label)` pair; node ids come from a
//! deterministic monotonic counter in creation order, so identical runs
//! produce identical graphs. Sorting uses a separate kind-aware total order:
//! the START sentinel before every real node, the END sentinel after, real
//! nodes by `(start, end, label)`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved label for synthesized gap-filler nodes.
pub const BLANK_LABEL: &str = "_";

/// A half-open interval `[start, end)` of document offsets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{})", self.start, self.end)
    }
}

/// What kind of node this is; representation is shared across kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Sentinel before all real nodes
    Start,
    /// One input annotation from a layer
    Elementary,
    /// Synthesized filler for an uncovered gap
    Blank,
    /// Synthesized by rule application
    Nonterminal,
    /// Sentinel after all real nodes
    End,
}

impl NodeKind {
    pub fn is_sentinel(&self) -> bool {
        matches!(self, NodeKind::Start | NodeKind::End)
    }
}

/// Index of a node within its graph; assigned in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Strict node identity: the `(span, label)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeKey {
    pub span: Span,
    pub label: String,
}

/// One node of the interval graph.
#[derive(Debug, Clone)]
pub struct NodeData {
    pub id: NodeId,
    pub kind: NodeKind,
    pub span: Span,
    pub label: String,
    pub weight: u32,
}

impl NodeData {
    pub fn key(&self) -> NodeKey {
        NodeKey {
            span: self.span,
            label: self.label.clone(),
        }
    }

    /// Kind-aware total order for sorting and least/greatest selection.
    pub fn sort_key(&self) -> (u8, Span, &str) {
        let rank = match self.kind {
            NodeKind::Start => 0,
            NodeKind::End => 2,
            _ => 1,
        };
        (rank, self.span, self.label.as_str())
    }
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NodeKind::Start => write!(f, "START"),
            NodeKind::End => write!(f, "END"),
            _ => write!(f, "{}@{}", self.label, self.span),
        }
    }
}
