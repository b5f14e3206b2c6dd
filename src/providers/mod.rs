//! Search and completion provider module
//!
//! Defines the provider traits the pipeline consumes and the shipped
//! implementations: Google web search and an OpenAI-compatible chat API.

mod google;
mod openai;
mod traits;

pub use google::GoogleSearch;
pub use openai::OpenAiCompletion;
pub use traits::{ChatMessage, CompletionProvider, SearchProvider};
