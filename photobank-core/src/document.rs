use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Value;

/// Plain text extracted from a knowledge source, before splitting.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub id: String,
    pub content: String,
    pub metadata: HashMap<String, Value>,
}

impl Document {
    pub fn source(&self) -> Option<&str> {
        self.metadata.get("source").and_then(Value::as_str)
    }
}

/// A bounded slice of a [`Document`] used as a retrieval unit.
///
/// `sequence_index` is the position of the chunk in its source document.
/// Retrieval never depends on it except to break score ties.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DocumentChunk {
    pub content: String,
    pub sequence_index: usize,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, Value>,
}

impl DocumentChunk {
    pub fn new(content: impl Into<String>, sequence_index: usize) -> Self {
        Self {
            content: content.into(),
            sequence_index,
            metadata: HashMap::new(),
        }
    }
}
