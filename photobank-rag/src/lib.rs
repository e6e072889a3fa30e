//! Retrieval-augmented answering for the photo-bank support chat.
//!
//! [`SupportAssistant`] owns everything that lives for the whole process:
//! the cached GigaChat token, the chat client and the loaded knowledge base.
//! Transports construct one at startup and share it by reference.

mod assistant;
mod error;
mod prompt;

pub use assistant::{SupportAssistant, SupportAssistantBuilder, DEFAULT_TOP_K};
pub use error::AssistantError;
pub use prompt::{compose_messages, join_context, PERSONA};
