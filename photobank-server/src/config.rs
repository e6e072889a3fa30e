use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use photobank_llm::{
    AuthError, GigaChatConfig, DEFAULT_API_URL, DEFAULT_AUTH_URL, DEFAULT_MODEL, DEFAULT_SCOPE,
    DEFAULT_TEMPERATURE,
};
use photobank_rag::{AssistantError, SupportAssistant};
use secrecy::SecretString;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GIGACHAT_API_KEY is not set")]
    MissingCredential,
    #[error(transparent)]
    Assistant(#[from] AssistantError),
}

/// Server settings. Every flag falls back to an environment variable, and
/// `main` loads `.env` before parsing.
#[derive(Clone, Parser)]
#[command(name = "photobank-server", version, about = "Photo-bank support chat API")]
pub struct Settings {
    /// Basic credential for the GigaChat token endpoint.
    #[arg(long, env = "GIGACHAT_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Knowledge document loaded at startup and on reload (.docx, .txt or .md).
    #[arg(long = "knowledge-base", env = "KNOWLEDGE_BASE_PATH", default_value = "help.docx")]
    pub knowledge_base: PathBuf,

    #[arg(long, env = "GIGACHAT_AUTH_URL", default_value = DEFAULT_AUTH_URL)]
    pub auth_url: String,

    #[arg(long, env = "GIGACHAT_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    #[arg(long, env = "GIGACHAT_SCOPE", default_value = DEFAULT_SCOPE)]
    pub scope: String,

    #[arg(long, env = "GIGACHAT_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, env = "GIGACHAT_TEMPERATURE", default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f32,

    /// Per-request timeout for GigaChat calls.
    #[arg(long, env = "GIGACHAT_TIMEOUT_SECS", default_value_t = 60)]
    pub timeout_secs: u64,

    /// Skip TLS certificate validation for GigaChat calls.
    #[arg(
        long,
        env = "GIGACHAT_INSECURE_TLS",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub insecure_tls: bool,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_some() {
            "<redacted>"
        } else {
            "<none>"
        };

        f.debug_struct("Settings")
            .field("api_key", &api_key)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("knowledge_base", &self.knowledge_base)
            .field("auth_url", &self.auth_url)
            .field("api_url", &self.api_url)
            .field("scope", &self.scope)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .field("insecure_tls", &self.insecure_tls)
            .finish()
    }
}

impl Settings {
    pub fn credential(&self) -> Result<SecretString, ConfigError> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(SecretString::new(key.to_string())),
            _ => Err(ConfigError::MissingCredential),
        }
    }

    pub fn gigachat_config(&self) -> GigaChatConfig {
        GigaChatConfig {
            auth_url: self.auth_url.clone(),
            api_url: self.api_url.clone(),
            scope: self.scope.clone(),
            model: self.model.clone(),
            temperature: self.temperature,
            timeout: Duration::from_secs(self.timeout_secs),
            accept_invalid_certs: self.insecure_tls,
            ..GigaChatConfig::default()
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Builds the assistant from settings. Does not load the knowledge base.
pub fn build_assistant(settings: &Settings) -> Result<SupportAssistant, ConfigError> {
    let credential = settings.credential()?;

    SupportAssistant::builder()
        .credential(credential)
        .config(settings.gigachat_config())
        .knowledge_path(&settings.knowledge_base)
        .build()
        .map_err(|err| match err {
            AssistantError::Auth(AuthError::MissingCredential) => ConfigError::MissingCredential,
            other => ConfigError::Assistant(other),
        })
}
