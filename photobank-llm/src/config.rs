use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::ConfigError;

pub const DEFAULT_AUTH_URL: &str = "https://ngw.devices.sberbank.ru:9443/api/v2/oauth";
pub const DEFAULT_API_URL: &str = "https://gigachat.devices.sberbank.ru/api/v1";
pub const DEFAULT_SCOPE: &str = "GIGACHAT_API_PERS";
pub const DEFAULT_MODEL: &str = "GigaChat:latest";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Clone, Debug, PartialEq)]
pub struct GigaChatConfig {
    pub auth_url: String,
    pub api_url: String,
    pub scope: String,
    pub model: String,
    pub temperature: f32,
    /// Applied to every upstream request.
    pub timeout: Duration,
    /// Upper bound on how long a token is cached, whatever the provider says.
    pub max_token_ttl: Duration,
    /// Turns off certificate validation. Off unless explicitly requested.
    pub accept_invalid_certs: bool,
}

impl Default for GigaChatConfig {
    fn default() -> Self {
        Self {
            auth_url: DEFAULT_AUTH_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: Duration::from_secs(60),
            max_token_ttl: Duration::from_secs(30 * 60),
            accept_invalid_certs: false,
        }
    }
}

impl GigaChatConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("auth_url", &self.auth_url), ("api_url", &self.api_url)] {
            Url::parse(value).map_err(|err| ConfigError::InvalidUrl {
                field,
                reason: err.to_string(),
            })?;
        }
        if self.scope.trim().is_empty() {
            return Err(ConfigError::EmptyField("scope"));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyField("model"));
        }
        if !self.temperature.is_finite() || self.temperature < 0.0 {
            return Err(ConfigError::InvalidTemperature(self.temperature));
        }
        Ok(())
    }

    pub fn http_client(&self) -> Result<Client, ConfigError> {
        self.validate()?;
        if self.accept_invalid_certs {
            tracing::warn!(
                auth_url = %self.auth_url,
                api_url = %self.api_url,
                "TLS certificate validation is disabled for GigaChat requests"
            );
        }

        Client::builder()
            .timeout(self.timeout)
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .build()
            .map_err(|err| ConfigError::HttpClient(err.to_string()))
    }
}
