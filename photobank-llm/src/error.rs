use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    InvalidUrl { field: &'static str, reason: String },
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
    #[error("temperature must be a non-negative number, got {0}")]
    InvalidTemperature(f32),
    #[error("failed to build http client: {0}")]
    HttpClient(String),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("GigaChat credential is missing")]
    MissingCredential,
    #[error("GigaChat credential cannot be sent as an Authorization header")]
    InvalidCredential,
    #[error("token request failed: {0}")]
    Transport(String),
    #[error("token endpoint returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed token response: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("chat completion request failed: {0}")]
    Transport(String),
    #[error("chat completion endpoint returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed chat completion response: {0}")]
    Malformed(String),
    #[error("chat completion response contained no choices")]
    EmptyChoices,
}
