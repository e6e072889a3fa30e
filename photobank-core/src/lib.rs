//! Shared types and capability traits for the photo-bank support assistant.
//!
//! The retrieval, LLM and orchestration crates all speak in terms of the
//! types defined here, so an embedding provider or a chat backend can be
//! swapped without touching the callers.

mod document;
mod embedding;
mod error;
mod llm;

pub use document::{Document, DocumentChunk};
pub use embedding::{Distance, Embedding};
pub use error::EmbeddingError;
pub use llm::{Message, Role};
pub use serde_json::Value;
