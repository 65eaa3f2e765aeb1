//! Output formats for selected parse trees
//!
//! JSON output comes straight from the tree's serde derive; treeviz is the
//! human-oriented indented outline.

pub mod treeviz;

pub use treeviz::to_treeviz_str;
