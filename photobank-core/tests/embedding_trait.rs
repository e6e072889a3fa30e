use std::sync::Arc;

use async_trait::async_trait;

use photobank_core::{Distance, Embedding, EmbeddingError};

struct TestEmbedding;

#[async_trait]
impl Embedding for TestEmbedding {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(vec![0.0])
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(vec![vec![0.0]; texts.len()])
    }

    fn dimension(&self) -> usize {
        1
    }
}

fn assert_object_safe(_embedding: Arc<dyn Embedding>) {}

#[test]
fn embedding_trait_is_object_safe() {
    let embedding = Arc::new(TestEmbedding);
    assert_object_safe(embedding);
}

#[tokio::test]
async fn batch_returns_one_vector_per_text() {
    let vectors = TestEmbedding
        .embed_batch(&["a".to_string(), "b".to_string()])
        .await
        .unwrap();
    assert_eq!(vectors.len(), 2);
}

#[test]
fn cosine_distance_prefers_aligned_vectors() {
    let query = [1.0, 0.0, 0.0];
    let aligned = Distance::Cosine.between(&query, &[2.0, 0.0, 0.0]);
    let orthogonal = Distance::Cosine.between(&query, &[0.0, 1.0, 0.0]);

    assert!(aligned.abs() < 1e-6);
    assert!((orthogonal - 1.0).abs() < 1e-6);
    assert!(aligned < orthogonal);
}

#[test]
fn cosine_distance_treats_zero_vectors_as_unrelated() {
    let distance = Distance::Cosine.between(&[0.0, 0.0], &[1.0, 0.0]);
    assert!((distance - 1.0).abs() < 1e-6);
}

#[test]
fn euclidean_and_dot_product_rank_closer_vectors_lower() {
    let query = [1.0, 1.0];
    let near = [1.0, 0.9];
    let far = [-1.0, 0.0];

    assert!(Distance::Euclidean.between(&query, &near) < Distance::Euclidean.between(&query, &far));
    assert!(
        Distance::DotProduct.between(&query, &near) < Distance::DotProduct.between(&query, &far)
    );
}
