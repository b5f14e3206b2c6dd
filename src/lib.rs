//! Perplexia-RS: a minimal cited-answer web search assistant written in Rust
//!
//! Given a natural-language query, Perplexia searches the web, concurrently
//! fetches and extracts text from the result pages, asks a completion provider
//! for an answer grounded in that context, renumbers the citations in the
//! answer, and renders a markdown document (query, sources, answer).

pub mod citation;
pub mod collect;
pub mod config;
pub mod context;
pub mod fetch;
pub mod network;
pub mod output;
pub mod pipeline;
pub mod providers;
pub mod sources;

pub use config::Settings;
pub use output::OutputDocument;
pub use pipeline::Pipeline;
pub use sources::{SourceMapping, SourceRecord};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of search results to fetch
pub const DEFAULT_NUM_RESULTS: usize = 20;

/// Default per-page fetch timeout in seconds
pub const DEFAULT_PAGE_TIMEOUT: f64 = 15.0;

/// Default wall-clock budget for the whole collection phase in seconds
pub const DEFAULT_GLOBAL_TIMEOUT: f64 = 39.0;

/// Default number of characters of page text exposed per source
pub const DEFAULT_MAX_CONTENT_CHARS: usize = 2000;
