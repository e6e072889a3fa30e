use photobank_core::EmbeddingError;
use photobank_llm::{AuthError, ConfigError, UpstreamError};
use photobank_retrieval::LoadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("no knowledge base path configured")]
    NoKnowledgePath,
    #[error("invalid GigaChat configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("authorization failed: {0}")]
    Auth(#[from] AuthError),
    #[error("upstream failure: {0}")]
    Upstream(#[from] UpstreamError),
    #[error("context retrieval failed: {0}")]
    Retrieval(#[from] EmbeddingError),
    #[error("knowledge base load failed: {0}")]
    Load(#[from] LoadError),
}

impl AssistantError {
    /// True for errors caused by the caller's input rather than by the
    /// service or its upstreams.
    pub fn is_client_error(&self) -> bool {
        matches!(self, AssistantError::EmptyMessage)
    }
}
