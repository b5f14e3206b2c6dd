//! Pipeline orchestration
//!
//! Wires the stages together: search, concurrent collection, context
//! construction, completion, citation reconciliation, document assembly.

use crate::citation;
use crate::collect::Collector;
use crate::config::Settings;
use crate::context::{build_context, build_messages};
use crate::fetch::PageFetcher;
use crate::network::HttpClient;
use crate::output::OutputDocument;
use crate::providers::{CompletionProvider, GoogleSearch, OpenAiCompletion, SearchProvider};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// The query-to-document pipeline
pub struct Pipeline {
    search: Arc<dyn SearchProvider>,
    completion: Arc<dyn CompletionProvider>,
    collector: Collector,
    settings: Settings,
}

impl Pipeline {
    /// Create a pipeline with the shipped providers (Google + OpenAI)
    pub fn new(settings: Settings) -> Result<Self> {
        let client = HttpClient::with_settings(&settings.outgoing)?;
        let api_key = settings
            .completion
            .api_key
            .clone()
            .context("no API key configured; set PERPLEXIA_OPENAI_API_KEY or OPENAI_API_KEY")?;

        let search = Arc::new(GoogleSearch::new(client));
        let completion = Arc::new(OpenAiCompletion::new(
            settings.completion.base_url.clone(),
            settings.completion.model.clone(),
            api_key,
        )?);

        Self::with_providers(settings, search, completion)
    }

    /// Create a pipeline with custom providers
    pub fn with_providers(
        settings: Settings,
        search: Arc<dyn SearchProvider>,
        completion: Arc<dyn CompletionProvider>,
    ) -> Result<Self> {
        let client = HttpClient::with_settings(&settings.outgoing)?;
        let collector = Collector::new(PageFetcher::new(client))
            .with_per_call_timeout(Duration::from_secs_f64(settings.search.page_timeout))
            .with_global_timeout(Duration::from_secs_f64(settings.search.global_timeout))
            .with_max_workers(settings.search.worker_count());

        Ok(Self {
            search,
            completion,
            collector,
            settings,
        })
    }

    /// Answer a query and assemble the output document
    ///
    /// Fetch failures and the global collection deadline are absorbed: a run
    /// with zero usable sources still completes, the answer just lacks
    /// citations. A citation in the answer that matches no collected source
    /// is a hard error.
    pub async fn run(&self, query: &str) -> Result<OutputDocument> {
        info!("searching via {} for: {}", self.search.name(), query);
        let urls = self
            .search
            .search(query, self.settings.search.num_results)
            .await?;
        info!("search returned {} urls", urls.len());

        let mapping = self.collector.collect(&urls).await;
        if mapping.is_empty() {
            warn!("no pages could be collected, answering without context");
        }

        let (context_block, entries) = build_context(&mapping, self.settings.search.max_content_chars);
        let messages = build_messages(query, &context_block);

        info!("requesting answer from {}", self.completion.name());
        let answer = self.completion.complete(&messages).await?;

        let reconciled = citation::reconcile(&answer, &entries)?;
        info!("answer cites {} of {} sources", reconciled.citation_map.len(), entries.len());

        Ok(OutputDocument::new(
            query,
            reconciled.source_links,
            reconciled.answer,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ChatMessage;
    use async_trait::async_trait;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct FixedSearch(Vec<String>);

    #[async_trait]
    impl SearchProvider for FixedSearch {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn search(&self, _query: &str, _num_results: usize) -> Result<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    struct FixedCompletion(String);

    #[async_trait]
    impl CompletionProvider for FixedCompletion {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn complete(&self, _messages: &[ChatMessage]) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    async fn mount_page(server: &MockServer, route: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_string(format!(
                "<html><body><p>{}</p></body></html>",
                body
            )))
            .mount(server)
            .await;
    }

    fn fast_settings() -> Settings {
        let mut settings = Settings::default();
        settings.search.page_timeout = 2.0;
        settings.search.global_timeout = 5.0;
        settings
    }

    #[tokio::test]
    async fn test_end_to_end_with_single_source() {
        let server = MockServer::start().await;
        mount_page(&server, "/a", "all about rust").await;

        let pipeline = Pipeline::with_providers(
            fast_settings(),
            Arc::new(FixedSearch(vec![format!("{}/a", server.uri())])),
            Arc::new(FixedCompletion("Rust is a language [1].".to_string())),
        )
        .unwrap();

        let doc = pipeline.run("what is rust").await.unwrap();
        assert_eq!(doc.answer(), "Rust is a language [1].");
        assert_eq!(doc.source_links(), format!("1. {}/a", server.uri()));
        assert!(doc.render().starts_with("# what is rust\n\n## Sources\n"));
    }

    #[tokio::test]
    async fn test_zero_sources_still_completes() {
        let pipeline = Pipeline::with_providers(
            fast_settings(),
            Arc::new(FixedSearch(Vec::new())),
            Arc::new(FixedCompletion("I could not find sources.".to_string())),
        )
        .unwrap();

        let doc = pipeline.run("anything").await.unwrap();
        assert_eq!(doc.answer(), "I could not find sources.");
        assert!(doc.source_links().is_empty());
    }

    #[tokio::test]
    async fn test_out_of_range_citation_fails() {
        let server = MockServer::start().await;
        mount_page(&server, "/a", "page text").await;

        let pipeline = Pipeline::with_providers(
            fast_settings(),
            Arc::new(FixedSearch(vec![format!("{}/a", server.uri())])),
            Arc::new(FixedCompletion("Made up claim [7].".to_string())),
        )
        .unwrap();

        assert!(pipeline.run("anything").await.is_err());
    }

    #[tokio::test]
    async fn test_renumbering_flows_into_document() {
        let server = MockServer::start().await;
        mount_page(&server, "/a", "alpha").await;
        mount_page(&server, "/b", "bravo").await;
        mount_page(&server, "/c", "charlie").await;

        let urls = vec![
            format!("{}/a", server.uri()),
            format!("{}/b", server.uri()),
            format!("{}/c", server.uri()),
        ];
        let pipeline = Pipeline::with_providers(
            fast_settings(),
            Arc::new(FixedSearch(urls)),
            Arc::new(FixedCompletion("X[3] and Y[(1)]".to_string())),
        )
        .unwrap();

        let doc = pipeline.run("letters").await.unwrap();
        // Three sources collected, two cited, renumbered densely
        assert_eq!(doc.answer(), "X[2] and Y[1]");
        let lines: Vec<&str> = doc.source_links().lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("1. "));
        assert!(lines[1].starts_with("2. "));
    }
}
