use std::fmt;
use std::sync::Arc;

use photobank_core::{Distance, DocumentChunk, Embedding, EmbeddingError};

#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    pub chunk: DocumentChunk,
    pub distance: f32,
}

/// Immutable list of chunks with their vectors, built in one go from a
/// single document. Replacing the knowledge base means building a new index.
pub struct SimilarityIndex {
    chunks: Vec<DocumentChunk>,
    vectors: Vec<Vec<f32>>,
    embedder: Arc<dyn Embedding>,
    distance: Distance,
}

impl fmt::Debug for SimilarityIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimilarityIndex")
            .field("chunks", &self.chunks.len())
            .field("dimension", &self.embedder.dimension())
            .field("distance", &self.distance)
            .finish()
    }
}

impl SimilarityIndex {
    pub fn empty(embedder: Arc<dyn Embedding>, distance: Distance) -> Self {
        Self {
            chunks: Vec::new(),
            vectors: Vec::new(),
            embedder,
            distance,
        }
    }

    pub async fn build(
        chunks: Vec<DocumentChunk>,
        embedder: Arc<dyn Embedding>,
        distance: Distance,
    ) -> Result<Self, EmbeddingError> {
        if chunks.is_empty() {
            return Ok(Self::empty(embedder, distance));
        }

        let texts: Vec<String> = chunks.iter().map(|chunk| chunk.content.clone()).collect();
        let vectors = embedder.embed_batch(&texts).await?;
        if vectors.len() != chunks.len() {
            return Err(EmbeddingError::InvalidResponse(format!(
                "expected {} embeddings, got {}",
                chunks.len(),
                vectors.len()
            )));
        }
        let expected = embedder.dimension();
        if let Some(vector) = vectors.iter().find(|vector| vector.len() != expected) {
            return Err(EmbeddingError::DimensionMismatch {
                expected,
                got: vector.len(),
            });
        }

        Ok(Self {
            chunks,
            vectors,
            embedder,
            distance,
        })
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn chunks(&self) -> &[DocumentChunk] {
        &self.chunks
    }

    pub fn distance(&self) -> Distance {
        self.distance
    }

    /// Returns up to `k` chunks, closest first. Equal distances keep the
    /// original chunk order.
    pub async fn query(&self, text: &str, k: usize) -> Result<Vec<SearchResult>, EmbeddingError> {
        if k == 0 || self.is_empty() {
            return Ok(Vec::new());
        }

        let query = self.embedder.embed(text).await?;
        let expected = self.embedder.dimension();
        if query.len() != expected {
            return Err(EmbeddingError::DimensionMismatch {
                expected,
                got: query.len(),
            });
        }

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(idx, vector)| {
                let distance = self.distance.between(&query, vector);
                (idx, if distance.is_nan() { f32::INFINITY } else { distance })
            })
            .collect();

        scored.sort_by(|a, b| a.1.total_cmp(&b.1));
        scored.truncate(k.min(self.chunks.len()));

        Ok(scored
            .into_iter()
            .map(|(idx, distance)| SearchResult {
                chunk: self.chunks[idx].clone(),
                distance,
            })
            .collect())
    }
}
