//! # strata
//!
//! Merges multiple independently-produced, possibly overlapping span
//! annotation layers over one document into a single hierarchical parse
//! tree, guided by a weighted grammar whose terminals are annotation-layer
//! labels.
//!
//! ## Pipeline
//!
//! 1. **grammar**: compile regex-like rule notation
//!    (`S -> NOUN VERB NOUN : 5`) into concrete rules
//! 2. **graph**: turn per-layer span lists into a transitively reduced
//!    adjacency DAG with gap-filler blanks
//! 3. **resolver**: apply rules bottom-up over the graph and greedily
//!    select one parse tree
//!
//! The [`pipeline::Processor`] runs all three stages in one call:
//!
//! ```text
//! let config = RunConfig::from_yaml(grammar_yaml)?;
//! let processor = Processor::from_config(&config)?;
//! let tree = processor.parse(&Document::from_json(document_json)?)?;
//! ```

pub mod document;
pub mod formats;
pub mod grammar;
pub mod graph;
pub mod pipeline;
pub mod resolver;

pub use document::Document;
pub use grammar::{Grammar, Rule};
pub use pipeline::{Processor, RunConfig};
pub use resolver::ParseTree;
