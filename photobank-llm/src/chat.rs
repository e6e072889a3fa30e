use std::fmt;

use photobank_core::Message;
use reqwest::header::ACCEPT;
use reqwest::Client;

use crate::types::{error_message, ChatCompletionRequest, ChatCompletionResponse};
use crate::{AccessToken, GigaChatConfig, UpstreamError};

#[derive(Clone)]
pub struct GigaChatClient {
    http: Client,
    api_url: String,
    model: String,
    temperature: f32,
}

impl fmt::Debug for GigaChatClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GigaChatClient")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl GigaChatClient {
    pub fn new(http: Client, config: &GigaChatConfig) -> Self {
        Self {
            http,
            api_url: config.api_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn request_for(&self, messages: Vec<Message>) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            temperature: self.temperature,
        }
    }

    /// Sends one chat completion and returns the text of the first choice.
    #[tracing::instrument(
        name = "gigachat_completion",
        skip_all,
        fields(model = %self.model, messages = messages.len())
    )]
    pub async fn complete(
        &self,
        token: &AccessToken,
        messages: Vec<Message>,
    ) -> Result<String, UpstreamError> {
        let url = format!("{}/chat/completions", self.api_url.trim_end_matches('/'));
        let request = self.request_for(messages);

        let response = self
            .http
            .post(url)
            .bearer_auth(token.value())
            .header(ACCEPT, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|err| UpstreamError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| UpstreamError::Transport(err.to_string()))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "chat completion rejected");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let completion: ChatCompletionResponse =
            serde_json::from_str(&body).map_err(|err| UpstreamError::Malformed(err.to_string()))?;
        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or(UpstreamError::EmptyChoices)?;

        tracing::info!(
            chars = choice.message.content.chars().count(),
            finish_reason = ?choice.finish_reason,
            "received chat completion"
        );
        Ok(choice.message.content)
    }
}
