mod docx;
mod error;
mod hash_embedder;
mod index;
mod knowledge;
mod loader;
mod splitter;

pub use error::{LoadError, SplitterConfigError};
pub use hash_embedder::HashEmbedder;
pub use index::{SearchResult, SimilarityIndex};
pub use knowledge::KnowledgeBase;
pub use loader::load_document;
pub use splitter::{TextSplitter, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
