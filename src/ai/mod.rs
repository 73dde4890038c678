//! Chat-completion integration
//!
//! Provides the interface to a hosted language model used by the free-form
//! generation and creative-writing routes.

pub mod mock;
pub mod openai;

pub use mock::MockChatClient;
pub use openai::OpenAiChatClient;

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ChatService: Send + Sync {
    /// Send `prompt` as the sole user message and return the first
    /// completion's text, trimmed.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
