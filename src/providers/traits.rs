//! Provider traits and message types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One message in a chat-style completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role ("system" or "user")
    pub role: String,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Turns a query into a list of result URLs
///
/// The pipeline treats the returned order as insignificant; citation order
/// is decided by fetch completion, not result rank.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Search and return up to `num_results` URLs
    async fn search(&self, query: &str, num_results: usize) -> anyhow::Result<Vec<String>>;
}

/// Turns chat messages into plain answer text
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Generate an answer for the given messages
    async fn complete(&self, messages: &[ChatMessage]) -> anyhow::Result<String>;
}
