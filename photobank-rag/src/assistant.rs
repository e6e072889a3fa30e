use std::fmt;
use std::path::{Path, PathBuf};

use photobank_core::Message;
use photobank_llm::{AuthError, GigaChatClient, GigaChatConfig, TokenManager, UpstreamError};
use photobank_retrieval::KnowledgeBase;
use secrecy::SecretString;

use crate::{compose_messages, join_context, AssistantError};

pub const DEFAULT_TOP_K: usize = 3;

/// The chat orchestrator: token, context, prompt, completion.
pub struct SupportAssistant {
    tokens: TokenManager,
    chat: GigaChatClient,
    knowledge: KnowledgeBase,
    knowledge_path: Option<PathBuf>,
    top_k: usize,
}

impl fmt::Debug for SupportAssistant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupportAssistant")
            .field("tokens", &self.tokens)
            .field("chat", &self.chat)
            .field("knowledge_path", &self.knowledge_path)
            .field("top_k", &self.top_k)
            .finish()
    }
}

impl SupportAssistant {
    pub fn builder() -> SupportAssistantBuilder {
        SupportAssistantBuilder::default()
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn knowledge_path(&self) -> Option<&Path> {
        self.knowledge_path.as_deref()
    }

    /// Answers one question. Every call is independent and uses whatever
    /// knowledge base is loaded at the time.
    #[tracing::instrument(name = "answer", skip_all)]
    pub async fn answer(&self, message: &str) -> Result<String, AssistantError> {
        if message.trim().is_empty() {
            return Err(AssistantError::EmptyMessage);
        }

        let token = self.tokens.get_token().await?;
        tracing::debug!("obtained access token");

        let messages = self.build_messages(message).await?;

        match self.chat.complete(&token, messages).await {
            Ok(answer) => Ok(answer),
            Err(err) => {
                if let UpstreamError::Status { status: 401, .. } = err {
                    // The provider revoked the token early; do not reuse it.
                    self.tokens.invalidate().await;
                }
                Err(err.into())
            }
        }
    }

    /// Retrieves the top chunks for `message` and builds the prompt.
    pub async fn build_messages(&self, message: &str) -> Result<Vec<Message>, AssistantError> {
        let hits = self.knowledge.search(message, self.top_k).await?;
        tracing::debug!(hits = hits.len(), "retrieved context");
        Ok(compose_messages(&join_context(&hits), message))
    }

    /// Loads `path` into the knowledge base. On failure the previous index
    /// stays in place.
    pub async fn load_knowledge_base(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<usize, AssistantError> {
        let path = path.as_ref();
        self.knowledge.load(path).await.map_err(|err| {
            tracing::error!(path = %path.display(), error = %err, "failed to load knowledge base");
            AssistantError::from(err)
        })
    }

    /// Reloads the configured knowledge base path.
    pub async fn reload(&self) -> Result<usize, AssistantError> {
        let path = self
            .knowledge_path
            .as_deref()
            .ok_or(AssistantError::NoKnowledgePath)?;
        self.load_knowledge_base(path).await
    }
}

#[derive(Default)]
pub struct SupportAssistantBuilder {
    credential: Option<SecretString>,
    config: GigaChatConfig,
    knowledge: Option<KnowledgeBase>,
    knowledge_path: Option<PathBuf>,
    top_k: Option<usize>,
}

impl fmt::Debug for SupportAssistantBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let credential = if self.credential.is_some() {
            "<redacted>"
        } else {
            "<none>"
        };

        f.debug_struct("SupportAssistantBuilder")
            .field("credential", &credential)
            .field("config", &self.config)
            .field("knowledge_path", &self.knowledge_path)
            .field("top_k", &self.top_k)
            .finish()
    }
}

impl SupportAssistantBuilder {
    pub fn credential(mut self, value: SecretString) -> Self {
        self.credential = Some(value);
        self
    }

    pub fn config(mut self, value: GigaChatConfig) -> Self {
        self.config = value;
        self
    }

    pub fn knowledge_base(mut self, value: KnowledgeBase) -> Self {
        self.knowledge = Some(value);
        self
    }

    pub fn knowledge_path(mut self, value: impl Into<PathBuf>) -> Self {
        self.knowledge_path = Some(value.into());
        self
    }

    pub fn top_k(mut self, value: usize) -> Self {
        self.top_k = Some(value);
        self
    }

    /// Builds the assistant without touching the network or the knowledge
    /// file; call [`SupportAssistant::reload`] to load the configured path.
    pub fn build(self) -> Result<SupportAssistant, AssistantError> {
        let credential = self.credential.ok_or(AuthError::MissingCredential)?;
        let http = self.config.http_client()?;
        let tokens = TokenManager::new(http.clone(), &self.config, credential)?;
        let chat = GigaChatClient::new(http, &self.config);

        Ok(SupportAssistant {
            tokens,
            chat,
            knowledge: self.knowledge.unwrap_or_default(),
            knowledge_path: self.knowledge_path,
            top_k: self.top_k.unwrap_or(DEFAULT_TOP_K),
        })
    }
}
