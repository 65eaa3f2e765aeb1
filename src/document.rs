//! Document input: per-layer span lists
//!
//! A document is a mapping from annotation layer name to an ordered list of
//! `(start, end)` offset pairs, exactly the JSON shape the annotation
//! source produces:
//!
//! ```text
//! {"NOUN": [[0, 5], [9, 14]], "VERB": [[5, 9]]}
//! ```
//!
//! Layers are stored in a `BTreeMap`, so iteration (and everything derived
//! from it) is deterministic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Span annotation layers over one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document(BTreeMap<String, Vec<(usize, usize)>>);

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document from its JSON representation.
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    /// Add or replace a layer.
    pub fn insert_layer(&mut self, name: impl Into<String>, spans: Vec<(usize, usize)>) {
        self.0.insert(name.into(), spans);
    }

    /// Builder-style variant of [`insert_layer`](Self::insert_layer).
    pub fn with_layer(mut self, name: impl Into<String>, spans: Vec<(usize, usize)>) -> Self {
        self.insert_layer(name, spans);
        self
    }

    /// Layers in lexicographic name order.
    pub fn layers(&self) -> impl Iterator<Item = (&String, &Vec<(usize, usize)>)> {
        self.0.iter()
    }

    pub fn layer(&self, name: &str) -> Option<&[(usize, usize)]> {
        self.0.get(name).map(|spans| spans.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let source = r#"{"NOUN": [[0, 5], [9, 14]], "VERB": [[5, 9]]}"#;
        let document = Document::from_json(source).unwrap();
        assert_eq!(document.layer("NOUN"), Some(&[(0, 5), (9, 14)][..]));
        assert_eq!(document.layer("VERB"), Some(&[(5, 9)][..]));

        let serialized = serde_json::to_string(&document).unwrap();
        assert_eq!(Document::from_json(&serialized).unwrap(), document);
    }

    #[test]
    fn test_layers_iterate_in_name_order() {
        let document = Document::new()
            .with_layer("zeta", vec![(0, 1)])
            .with_layer("alpha", vec![(2, 3)]);
        let names: Vec<&str> = document.layers().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Document::from_json("{\"NOUN\": [[0]]}").is_err());
    }
}
