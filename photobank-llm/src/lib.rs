//! GigaChat client pieces used by the assistant.
//!
//! - [`TokenManager`] exchanges the static Basic credential for a bearer
//!   token and caches it until it expires.
//! - [`GigaChatClient`] posts chat completions with that token.
//!
//! Both share one `reqwest::Client` built by [`GigaChatConfig::http_client`],
//! which applies the request timeout and the TLS verification policy.

mod auth;
mod chat;
mod config;
mod error;
mod types;

pub use auth::{AccessToken, TokenManager};
pub use chat::GigaChatClient;
pub use config::{
    GigaChatConfig, DEFAULT_API_URL, DEFAULT_AUTH_URL, DEFAULT_MODEL, DEFAULT_SCOPE,
    DEFAULT_TEMPERATURE,
};
pub use error::{AuthError, ConfigError, UpstreamError};
pub use photobank_core::{Message, Role};
pub use types::{
    ChatCompletionRequest, ChatCompletionResponse, Choice, ResponseMessage, TokenEnvelope,
};
