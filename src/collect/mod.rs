//! Concurrent page collection
//!
//! Fans the page fetcher out over a set of URLs on a bounded worker pool and
//! folds completed results into a [`SourceMapping`] under a global wall-clock
//! deadline. A single fold loop owns the mapping; workers hand their records
//! over a channel, so there is no shared mutable map.

use crate::fetch::PageFetcher;
use crate::sources::SourceMapping;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Semaphore};
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Collects extracted page text from many URLs concurrently
#[derive(Debug, Clone)]
pub struct Collector {
    fetcher: Arc<PageFetcher>,
    per_call_timeout: Duration,
    global_timeout: Duration,
    max_workers: usize,
}

impl Collector {
    /// Create a collector with default timeouts and one worker per CPU
    pub fn new(fetcher: PageFetcher) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            per_call_timeout: Duration::from_secs_f64(crate::DEFAULT_PAGE_TIMEOUT),
            global_timeout: Duration::from_secs_f64(crate::DEFAULT_GLOBAL_TIMEOUT),
            max_workers: num_cpus::get().max(1),
        }
    }

    /// Set the per-page fetch timeout
    pub fn with_per_call_timeout(mut self, timeout: Duration) -> Self {
        self.per_call_timeout = timeout;
        self
    }

    /// Set the wall-clock budget for a whole `collect` call
    pub fn with_global_timeout(mut self, timeout: Duration) -> Self {
        self.global_timeout = timeout;
        self
    }

    /// Set the maximum number of concurrent fetch workers (minimum 1)
    pub fn with_max_workers(mut self, workers: usize) -> Self {
        self.max_workers = workers.max(1);
        self
    }

    /// Fetch all URLs and fold the successes into a mapping
    ///
    /// Entries appear in completion order, not input order. Failed fetches
    /// are dropped silently; once the global deadline passes, outstanding
    /// fetches are abandoned and whatever succeeded so far is returned.
    /// An empty mapping is a valid outcome, not an error.
    pub async fn collect(&self, urls: &[String]) -> SourceMapping {
        let deadline = Instant::now() + self.global_timeout;
        let semaphore = Arc::new(Semaphore::new(self.max_workers));
        let (tx, mut rx) = mpsc::unbounded_channel();

        info!(
            "collecting {} urls with {} workers, {:?} per page, {:?} total",
            urls.len(),
            self.max_workers,
            self.per_call_timeout,
            self.global_timeout
        );

        let mut handles = Vec::with_capacity(urls.len());
        for url in urls {
            let semaphore = Arc::clone(&semaphore);
            let fetcher = Arc::clone(&self.fetcher);
            let tx = tx.clone();
            let url = url.clone();
            let per_call_timeout = self.per_call_timeout;

            handles.push(tokio::spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return,
                };
                let record = fetcher.fetch(&url, per_call_timeout).await;
                // The fold loop may be gone already; its absence just means
                // the deadline passed and this result is discarded.
                let _ = tx.send(record);
            }));
        }
        drop(tx);

        let mut mapping = SourceMapping::new();
        let mut attempted = 0usize;

        loop {
            tokio::select! {
                received = rx.recv() => match received {
                    Some(record) => {
                        attempted += 1;
                        match record.text {
                            Some(text) if !text.is_empty() => {
                                debug!("collected {} ({} chars)", record.url, text.len());
                                mapping.insert(record.url, text);
                            }
                            _ => debug!("dropped {}", record.url),
                        }
                    }
                    None => break,
                },
                _ = tokio::time::sleep_until(deadline) => {
                    warn!(
                        "global deadline reached, abandoning {} outstanding fetches",
                        urls.len() - attempted
                    );
                    for handle in &handles {
                        handle.abort();
                    }
                    break;
                }
            }
        }

        info!("collected {} of {} pages", mapping.len(), urls.len());
        mapping
    }
}
