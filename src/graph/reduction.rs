//! Transitive reduction of the interval graph
//!
//! Removes every edge implied by a longer path, preserving reachability.
//! Works on flat boolean matrices: an edge `A -> B` is kept iff it is
//! adjacent and B is not reachable from A through the
//! adjacency-composed-with-closure product, where the closure is
//! reachability in one or more steps. On a DAG this is the unique
//! transitive reduction, and applying it twice changes nothing.

use super::interval::IntervalGraph;
use super::node::NodeId;

/// Flat row-major boolean matrix over node ids.
struct BoolMatrix {
    n: usize,
    cells: Vec<bool>,
}

impl BoolMatrix {
    fn new(n: usize) -> Self {
        Self {
            n,
            cells: vec![false; n * n],
        }
    }

    fn get(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.n + col]
    }

    fn set(&mut self, row: usize, col: usize) {
        self.cells[row * self.n + col] = true;
    }
}

fn adjacency_matrix(graph: &IntervalGraph) -> BoolMatrix {
    let mut adjacency = BoolMatrix::new(graph.node_count());
    for (from, to) in graph.edges() {
        adjacency.set(from.index(), to.index());
    }
    adjacency
}

/// Reachability in one or more steps, by Warshall's algorithm.
fn closure_matrix(adjacency: &BoolMatrix) -> BoolMatrix {
    let n = adjacency.n;
    let mut closure = BoolMatrix {
        n,
        cells: adjacency.cells.clone(),
    };
    for k in 0..n {
        for i in 0..n {
            if closure.get(i, k) {
                for j in 0..n {
                    if closure.get(k, j) {
                        closure.set(i, j);
                    }
                }
            }
        }
    }
    closure
}

/// The full reachability closure of the graph, exposed for invariant checks.
pub fn reachability_closure(graph: &IntervalGraph) -> Vec<bool> {
    closure_matrix(&adjacency_matrix(graph)).cells
}

/// Remove every edge `A -> B` for which some successor of A already
/// reaches B.
pub fn transitive_reduction(graph: &mut IntervalGraph) {
    let adjacency = adjacency_matrix(graph);
    let closure = closure_matrix(&adjacency);
    let n = adjacency.n;

    let mut redundant: Vec<(NodeId, NodeId)> = Vec::new();
    for (from, to) in graph.edges() {
        let implied = (0..n)
            .any(|k| adjacency.get(from.index(), k) && closure.get(k, to.index()));
        if implied {
            redundant.push((from, to));
        }
    }

    for (from, to) in redundant {
        graph.remove_edge(from, to);
    }
}
