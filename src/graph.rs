//! Interval graph construction over span annotations
//!
//! - **node**: spans, node records, identity and ordering
//! - **interval**: the id-arena DAG with sorted adjacency
//! - **reduction**: matrix-based transitive reduction
//! - **builder**: document layers into the base graph (successor wiring,
//!   sentinels, blank gap fillers)

pub mod builder;
pub mod error;
pub mod interval;
pub mod node;
pub mod reduction;

pub use builder::build;
pub use error::BuildError;
pub use interval::IntervalGraph;
pub use node::{NodeData, NodeId, NodeKey, NodeKind, Span, BLANK_LABEL};
pub use reduction::{reachability_closure, transitive_reduction};
