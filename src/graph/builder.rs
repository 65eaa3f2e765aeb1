//! Builds the base interval graph from a document's annotation layers
//!
//! The build runs in fixed stages: materialize one elementary node per
//! `(layer, span)` pair, wire each node to its nearest candidate
//! successors, bound the graph with the START/END sentinels, transitively
//! reduce, splice blank filler nodes into uncovered gaps, and reduce once
//! more (blanks can create new redundant paths). The output graph is
//! acyclic, transitively reduced and gap-complete.

use super::error::BuildError;
use super::interval::IntervalGraph;
use super::node::{NodeId, NodeKind, Span, BLANK_LABEL};
use super::reduction::transitive_reduction;
use crate::document::Document;

/// Build the base graph for one document.
pub fn build(document: &Document) -> Result<IntervalGraph, BuildError> {
    if document.is_empty() {
        return Err(BuildError::EmptyDocument);
    }
    for (layer, spans) in document.layers() {
        if spans.is_empty() {
            return Err(BuildError::EmptyLayer {
                layer: layer.clone(),
            });
        }
    }

    let mut graph = IntervalGraph::new();

    // layers iterate lexicographically and spans in given order, so node
    // ids are stable across runs
    let mut elementary: Vec<NodeId> = Vec::new();
    for (layer, spans) in document.layers() {
        for &(start, end) in spans {
            elementary.push(graph.get_or_create(
                NodeKind::Elementary,
                Span::new(start, end),
                layer,
                1,
            ));
        }
    }
    elementary.sort_unstable();
    elementary.dedup();

    connect_nearest_successors(&mut graph, &elementary);
    connect_sentinels(&mut graph, &elementary);
    transitive_reduction(&mut graph);
    insert_blanks(&mut graph);
    transitive_reduction(&mut graph);

    log::debug!(
        "base graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// A node B is a candidate successor of A iff B begins at or after A's end.
/// Per predecessor, only candidates starting at the minimum candidate start
/// are kept (ties all retained); farther nodes become reachable through
/// them, not directly.
fn connect_nearest_successors(graph: &mut IntervalGraph, elementary: &[NodeId]) {
    for &a in elementary {
        let a_end = graph.node(a).span.end;
        let min_start = elementary
            .iter()
            .map(|&b| graph.node(b).span.start)
            .filter(|&start| start >= a_end)
            .min();
        if let Some(min_start) = min_start {
            let nearest: Vec<NodeId> = elementary
                .iter()
                .copied()
                .filter(|&b| b != a && graph.node(b).span.start == min_start)
                .collect();
            for b in nearest {
                graph.add_edge(a, b);
            }
        }
    }
}

/// Bound the graph: START reaches every node, every node reaches END.
/// One edge goes to the least node (and from the greatest); any node still
/// unreachable against that snapshot gets a direct sentinel edge, and the
/// reduction pass afterwards strips the redundant ones.
fn connect_sentinels(graph: &mut IntervalGraph, elementary: &[NodeId]) {
    let start = graph.start();
    let end = graph.end();

    let least = elementary
        .iter()
        .copied()
        .min_by(|&a, &b| graph.node(a).sort_key().cmp(&graph.node(b).sort_key()));
    if let Some(least) = least {
        graph.add_edge(start, least);
    }
    let reachable = graph.reachable_from(start);
    for &node in elementary {
        if !reachable[node.index()] {
            graph.add_edge(start, node);
        }
    }

    let greatest = elementary
        .iter()
        .copied()
        .max_by(|&a, &b| graph.node(a).sort_key().cmp(&graph.node(b).sort_key()));
    if let Some(greatest) = greatest {
        graph.add_edge(greatest, end);
    }
    let coreachable = graph.can_reach(end);
    for &node in elementary {
        if !coreachable[node.index()] {
            graph.add_edge(node, end);
        }
    }
}

/// Splice a blank node into every remaining edge that jumps over more than
/// one uncovered offset. A gap of exactly one offset (typically a separator
/// character) stays implicit. Blanks never chain: a blank's span covers its
/// whole gap, so the spliced edges have no residual gap.
fn insert_blanks(graph: &mut IntervalGraph) {
    for (a, b) in graph.edges() {
        let from = graph.node(a);
        let to = graph.node(b);
        if from.kind == NodeKind::Start || from.kind == NodeKind::Blank {
            continue;
        }
        if to.kind == NodeKind::End {
            continue;
        }
        if to.span.start - from.span.end > 1 {
            let gap = Span::new(from.span.end, to.span.start);
            let blank = graph.get_or_create(NodeKind::Blank, gap, BLANK_LABEL, 1);
            graph.remove_edge(a, b);
            graph.add_edge(a, blank);
            graph.add_edge(blank, b);
        }
    }
}
