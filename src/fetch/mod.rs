//! Page fetching and text extraction
//!
//! Fetches a single URL and extracts the text of its paragraph elements,
//! under a wall-clock deadline that covers both the network request and the
//! HTML parse.

use crate::network::HttpClient;
use crate::sources::SourceRecord;
use anyhow::{ensure, Result};
use scraper::{Html, Selector};
use std::time::Duration;
use tokio::time::{timeout_at, Instant};
use tracing::debug;

/// Fetches pages and extracts their readable text
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: HttpClient,
}

impl PageFetcher {
    /// Create a fetcher over a shared HTTP client
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Fetch a page and extract its paragraph text
    ///
    /// Never fails: any network error, non-2xx status, or deadline overrun
    /// yields a record with `text: None`. The timeout is a wall-clock bound
    /// on the fetch *and* the parse, independent of the HTTP client's own
    /// request timeout.
    pub async fn fetch(&self, url: &str, per_call_timeout: Duration) -> SourceRecord {
        let deadline = Instant::now() + per_call_timeout;

        match timeout_at(deadline, self.fetch_text(url, deadline)).await {
            Ok(Ok(text)) => SourceRecord::ok(url, text),
            Ok(Err(e)) => {
                debug!("fetch failed for {}: {}", url, e);
                SourceRecord::failed(url)
            }
            Err(_) => {
                debug!("fetch timed out for {}", url);
                SourceRecord::failed(url)
            }
        }
    }

    async fn fetch_text(&self, url: &str, deadline: Instant) -> Result<String> {
        let response = self.client.get(url).await?;
        ensure!(
            response.is_success(),
            "HTTP status {} from {}",
            response.status,
            response.url
        );

        // Parsing large documents is CPU-bound; keep it off the async
        // worker threads and inside the same deadline as the request.
        ensure!(Instant::now() < deadline, "deadline reached before parse");
        let html = response.text;
        let text = tokio::task::spawn_blocking(move || extract_paragraph_text(&html)).await?;
        Ok(text)
    }
}

/// Extract the text of every `<p>` element, joined with single spaces
pub fn extract_paragraph_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let paragraph_selector = Selector::parse("p").unwrap();

    document
        .select(&paragraph_selector)
        .map(|p| p.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
