//! Google web search provider

use super::traits::SearchProvider;
use crate::network::HttpClient;
use anyhow::{ensure, Result};
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::debug;
use url::Url;

/// Search provider scraping Google's result page
pub struct GoogleSearch {
    client: HttpClient,
    base_url: String,
}

impl GoogleSearch {
    /// Create a provider over a shared HTTP client
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            base_url: "https://www.google.com/search".to_string(),
        }
    }

    /// Override the search endpoint (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn parse_result_urls(html: &str, num_results: usize) -> Vec<String> {
        let document = Html::parse_document(html);

        // Result blocks carry an h3 title; the enclosing anchor holds the
        // destination URL.
        let result_selector = Selector::parse("div.g").unwrap();
        let link_selector = Selector::parse("a").unwrap();
        let title_selector = Selector::parse("h3").unwrap();

        let mut seen = HashSet::new();
        let mut urls = Vec::new();

        for element in document.select(&result_selector) {
            if element.select(&title_selector).next().is_none() {
                continue;
            }

            let href = element
                .select(&link_selector)
                .next()
                .and_then(|a| a.value().attr("href"))
                .unwrap_or_default();

            // Only absolute http(s) destinations; relative and fragment
            // hrefs are navigation within the results page.
            match Url::parse(href) {
                Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {}
                _ => continue,
            }

            if seen.insert(href.to_string()) {
                urls.push(href.to_string());
                if urls.len() >= num_results {
                    break;
                }
            }
        }

        urls
    }
}

#[async_trait]
impl SearchProvider for GoogleSearch {
    fn name(&self) -> &str {
        "google"
    }

    async fn search(&self, query: &str, num_results: usize) -> Result<Vec<String>> {
        let params = [
            ("q", query.to_string()),
            ("num", num_results.to_string()),
            ("hl", "en".to_string()),
        ];

        let response = self.client.get_with_params(&self.base_url, &params).await?;
        ensure!(
            response.is_success(),
            "search request failed with HTTP status {}",
            response.status
        );

        let urls = Self::parse_result_urls(&response.text, num_results);
        debug!("google returned {} result urls", urls.len());
        Ok(urls)
    }
}
