//! Error types for interval graph construction

use std::fmt;

/// The document cannot yield a usable graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A referenced layer carries no spans
    EmptyLayer { layer: String },
    /// The document has no layers at all
    EmptyDocument,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::EmptyLayer { layer } => {
                write!(f, "layer '{}' has no spans", layer)
            }
            BuildError::EmptyDocument => write!(f, "document has no annotation layers"),
        }
    }
}

impl std::error::Error for BuildError {}
