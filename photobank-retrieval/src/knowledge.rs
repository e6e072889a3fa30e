use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use photobank_core::{Distance, Document, Embedding, EmbeddingError, Value};
use tokio::sync::RwLock;

use crate::{load_document, HashEmbedder, LoadError, SearchResult, SimilarityIndex, TextSplitter};

const PREVIEW_CHARS: usize = 200;

/// Holder of the process-wide similarity index.
///
/// A load builds the replacement index completely before swapping it in, so
/// a failed load leaves the previous index untouched and readers never see a
/// half-built one.
pub struct KnowledgeBase {
    current: RwLock<Arc<SimilarityIndex>>,
    embedder: Arc<dyn Embedding>,
    splitter: TextSplitter,
    distance: Distance,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::new(
            Arc::new(HashEmbedder::default()),
            TextSplitter::default(),
            Distance::default(),
        )
    }
}

impl KnowledgeBase {
    pub fn new(embedder: Arc<dyn Embedding>, splitter: TextSplitter, distance: Distance) -> Self {
        Self {
            current: RwLock::new(Arc::new(SimilarityIndex::empty(embedder.clone(), distance))),
            embedder,
            splitter,
            distance,
        }
    }

    pub fn splitter(&self) -> TextSplitter {
        self.splitter
    }

    /// Loads `path`, replacing whatever was loaded before. Returns the number
    /// of chunks now indexed.
    pub async fn load(&self, path: impl AsRef<Path>) -> Result<usize, LoadError> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "loading knowledge base");
        let document = load_document(path).await?;
        self.replace_with(document).await
    }

    /// Indexes raw text under the given source name.
    pub async fn load_text(&self, source: &str, text: &str) -> Result<usize, LoadError> {
        let mut metadata = HashMap::new();
        metadata.insert("source".to_string(), Value::String(source.to_string()));
        self.replace_with(Document {
            id: source.to_string(),
            content: text.to_string(),
            metadata,
        })
        .await
    }

    async fn replace_with(&self, document: Document) -> Result<usize, LoadError> {
        tracing::debug!(
            source = document.source().unwrap_or(&document.id),
            preview = %preview(&document.content),
            "extracted knowledge text"
        );

        let chunks = self.splitter.split_document(&document);
        let index = SimilarityIndex::build(chunks, self.embedder.clone(), self.distance).await?;
        let count = index.len();

        *self.current.write().await = Arc::new(index);
        tracing::info!(source = %document.id, chunks = count, "knowledge base loaded");
        Ok(count)
    }

    pub async fn snapshot(&self) -> Arc<SimilarityIndex> {
        self.current.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.snapshot().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.snapshot().await.is_empty()
    }

    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<SearchResult>, EmbeddingError> {
        let index = self.snapshot().await;
        let results = index.query(query, k).await?;

        tracing::debug!(hits = results.len(), "similarity search finished");
        for (rank, hit) in results.iter().enumerate() {
            tracing::debug!(
                rank = rank + 1,
                distance = hit.distance,
                preview = %preview(&hit.chunk.content),
                "retrieved chunk"
            );
        }
        Ok(results)
    }
}

fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}
