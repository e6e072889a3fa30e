//! HTTP front end for the photo-bank support assistant.
//!
//! The binary parses [`Settings`], builds one [`SupportAssistant`] and serves
//! [`router`]. Integration tests drive the same router without a socket.
//!
//! [`SupportAssistant`]: photobank_rag::SupportAssistant

pub mod config;
pub mod error;
pub mod logging;
pub mod router;

pub use config::{build_assistant, ConfigError, Settings};
pub use error::ApiError;
pub use router::{router, ChatRequest, ChatResponse, MAX_BODY_BYTES};
