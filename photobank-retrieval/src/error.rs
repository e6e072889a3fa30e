use std::path::PathBuf;

use photobank_core::EmbeddingError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SplitterConfigError {
    #[error("chunk_size must be greater than zero")]
    ChunkSizeMustBeGreaterThanZero,
    #[error("chunk_overlap ({overlap}) must be smaller than chunk_size ({chunk_size})")]
    OverlapTooLarge { chunk_size: usize, overlap: usize },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
    #[error("unsupported extension '{extension}' for {}", .path.display())]
    UnsupportedExtension { path: PathBuf, extension: String },
    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),
}
