//! HTTP networking module
//!
//! Provides the shared HTTP client used for fetching web pages.

mod client;
mod user_agent;

pub use client::{HttpClient, PageResponse};
pub use user_agent::generate_user_agent;
