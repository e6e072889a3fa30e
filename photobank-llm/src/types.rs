use photobank_core::Message;
use serde::{Deserialize, Serialize};

/// Body returned by the OAuth endpoint. `expires_at` is read as a lifetime in
/// seconds.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct TokenEnvelope {
    pub access_token: String,
    #[serde(default)]
    pub expires_at: u64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Choice {
    pub message: ResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ResponseMessage {
    #[serde(default)]
    pub role: Option<String>,
    pub content: String,
}

/// Error payloads seen from the provider: OAuth-style `error_description`
/// or the API's `{ "status", "message" }`.
#[derive(Deserialize, Debug, Default)]
struct ErrorBody {
    error_description: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

pub(crate) fn error_message(body: &str) -> String {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    parsed
        .error_description
        .or(parsed.message)
        .or(parsed.error)
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "no response body".to_string()
            } else {
                trimmed.chars().take(500).collect()
            }
        })
}
