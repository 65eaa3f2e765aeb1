//! Processing pipeline: run configuration and the processor
//!
//! The pipeline ties the pieces together: a [`RunConfig`] compiles into a
//! [`Grammar`](crate::grammar::Grammar), and a [`Processor`] runs documents
//! through graph build, chart resolution and tree selection, optionally
//! serializing the result.

pub mod config;
pub mod processor;

pub use config::RunConfig;
pub use processor::{ExecutionError, Processor};
