use std::fmt;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::types::{error_message, TokenEnvelope};
use crate::{AuthError, GigaChatConfig};

/// Short-lived bearer token. Valid while `now < expires_at`.
#[derive(Clone)]
pub struct AccessToken {
    value: SecretString,
    expires_at: Instant,
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl AccessToken {
    pub fn new(value: impl Into<String>, expires_at: Instant) -> Self {
        Self {
            value: SecretString::new(value.into()),
            expires_at,
        }
    }

    pub fn value(&self) -> &str {
        self.value.expose_secret()
    }

    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    pub fn is_valid_at(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Exchanges the static credential for bearer tokens and caches the result.
///
/// The cache check and the refresh run under one lock, so concurrent callers
/// that find the token expired wait for a single exchange instead of each
/// starting their own.
pub struct TokenManager {
    http: Client,
    auth_url: String,
    scope: String,
    max_ttl: Duration,
    credential: SecretString,
    cached: Mutex<Option<AccessToken>>,
}

impl fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenManager")
            .field("auth_url", &self.auth_url)
            .field("scope", &self.scope)
            .field("credential", &"<redacted>")
            .finish()
    }
}

impl TokenManager {
    pub fn new(
        http: Client,
        config: &GigaChatConfig,
        credential: SecretString,
    ) -> Result<Self, AuthError> {
        if credential.expose_secret().trim().is_empty() {
            return Err(AuthError::MissingCredential);
        }
        basic_header(&credential)?;

        Ok(Self {
            http,
            auth_url: config.auth_url.clone(),
            scope: config.scope.clone(),
            max_ttl: config.max_token_ttl,
            credential,
            cached: Mutex::new(None),
        })
    }

    /// Returns the cached token while it is valid, otherwise fetches a new one.
    pub async fn get_token(&self) -> Result<AccessToken, AuthError> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.is_valid_at(Instant::now()) {
                return Ok(token.clone());
            }
            tracing::debug!("cached GigaChat token expired");
        }

        let token = self.exchange().await?;
        *cached = Some(token.clone());
        Ok(token)
    }

    /// Drops the cached token so the next call performs an exchange.
    pub async fn invalidate(&self) {
        self.cached.lock().await.take();
    }

    #[tracing::instrument(name = "gigachat_token_exchange", skip_all, fields(scope = %self.scope))]
    async fn exchange(&self) -> Result<AccessToken, AuthError> {
        let request_id = Uuid::new_v4().to_string();
        let response = self
            .http
            .post(&self.auth_url)
            .header(AUTHORIZATION, basic_header(&self.credential)?)
            .header(ACCEPT, "application/json")
            .header("RqUID", &request_id)
            .form(&[
                ("scope", self.scope.as_str()),
                ("grant_type", "client_credentials"),
            ])
            .send()
            .await
            .map_err(|err| AuthError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| AuthError::Transport(err.to_string()))?;

        if !status.is_success() {
            tracing::warn!(
                status = status.as_u16(),
                rq_uid = %request_id,
                "token exchange rejected"
            );
            return Err(AuthError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let envelope: TokenEnvelope =
            serde_json::from_str(&body).map_err(|err| AuthError::Malformed(err.to_string()))?;
        if envelope.access_token.is_empty() {
            return Err(AuthError::Malformed("access_token is empty".to_string()));
        }

        let ttl = Duration::from_secs(envelope.expires_at).min(self.max_ttl);
        let now = Instant::now();
        let expires_at = now.checked_add(ttl).unwrap_or(now);
        tracing::info!(ttl_secs = ttl.as_secs(), "obtained GigaChat access token");

        Ok(AccessToken::new(envelope.access_token, expires_at))
    }
}

fn basic_header(credential: &SecretString) -> Result<HeaderValue, AuthError> {
    let mut value = HeaderValue::from_str(&format!("Basic {}", credential.expose_secret().trim()))
        .map_err(|_| AuthError::InvalidCredential)?;
    value.set_sensitive(true);
    Ok(value)
}
