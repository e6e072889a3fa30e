//! Console client for the support chat endpoint.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CHAT_URL: &str = "http://localhost:3000/api/chat";
pub const GREETING: &str = "Добро пожаловать в чат с ассистентом техподдержки фотобанка!";
pub const EXIT_HINT: &str = "Для выхода введите \"выход\"";
pub const PROMPT: &str = "\nВаш вопрос (или \"выход\" для завершения): ";
pub const FAREWELL: &str = "До свидания!";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server returned {status}: {error}")]
    Api {
        status: u16,
        error: String,
        details: Option<String>,
    },
    #[error("unexpected response: {0}")]
    Malformed(String),
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
    #[serde(default)]
    details: Option<String>,
}

/// `выход` or `exit`, in any case and with surrounding whitespace.
pub fn is_exit_command(line: &str) -> bool {
    let line = line.trim().to_lowercase();
    line == "выход" || line == "exit"
}

/// Formats a failure the way the console prints it.
pub fn describe_error(err: &ClientError) -> String {
    match err {
        ClientError::Api {
            error,
            details: Some(details),
            ..
        } => format!("{error} ({details})"),
        ClientError::Api { error, .. } => error.clone(),
        other => other.to_string(),
    }
}

#[derive(Clone, Debug)]
pub struct ChatClient {
    http: Client,
    url: String,
}

impl ChatClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ClientError::Transport(err.to_string()))?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn ask(&self, question: &str) -> Result<String, ClientError> {
        let response = self
            .http
            .post(&self.url)
            .json(&ChatRequest { message: question })
            .send()
            .await
            .map_err(|err| ClientError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ClientError::Transport(err.to_string()))?;
        tracing::debug!(status = status.as_u16(), "chat endpoint responded");

        if !status.is_success() {
            return Err(match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(parsed) => ClientError::Api {
                    status: status.as_u16(),
                    error: parsed.error,
                    details: parsed.details,
                },
                Err(_) => ClientError::Api {
                    status: status.as_u16(),
                    error: body,
                    details: None,
                },
            });
        }

        serde_json::from_str::<ChatResponse>(&body)
            .map(|parsed| parsed.response)
            .map_err(|err| ClientError::Malformed(err.to_string()))
    }
}
