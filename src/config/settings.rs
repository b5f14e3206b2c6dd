//! Settings structures for Perplexia-RS configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub search: SearchSettings,
    pub completion: CompletionSettings,
    pub outgoing: OutgoingSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables (PERPLEXIA_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("PERPLEXIA_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Ok(val) = std::env::var("PERPLEXIA_NUM_RESULTS") {
            if let Ok(num) = val.parse() {
                self.search.num_results = num;
            }
        }
        if let Ok(val) = std::env::var("PERPLEXIA_PAGE_TIMEOUT") {
            if let Ok(secs) = val.parse() {
                self.search.page_timeout = secs;
            }
        }
        if let Ok(val) = std::env::var("PERPLEXIA_GLOBAL_TIMEOUT") {
            if let Ok(secs) = val.parse() {
                self.search.global_timeout = secs;
            }
        }
        if let Ok(val) = std::env::var("PERPLEXIA_MODEL") {
            self.completion.model = val;
        }
        if let Ok(val) = std::env::var("PERPLEXIA_OPENAI_BASE_URL") {
            self.completion.base_url = val;
        }
        if let Ok(val) =
            std::env::var("PERPLEXIA_OPENAI_API_KEY").or_else(|_| std::env::var("OPENAI_API_KEY"))
        {
            self.completion.api_key = Some(val);
        }
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug mode
    pub debug: bool,
    /// Instance name used in logs
    pub instance_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "Perplexia".to_string(),
        }
    }
}

/// Search and collection behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Number of search result URLs to fetch
    pub num_results: usize,
    /// Per-page fetch-and-extract timeout in seconds
    pub page_timeout: f64,
    /// Wall-clock budget for the whole collection phase in seconds
    pub global_timeout: f64,
    /// Characters of page text exposed per source in the context
    pub max_content_chars: usize,
    /// Concurrent fetch workers; defaults to the number of CPUs
    pub max_workers: Option<usize>,
}

impl SearchSettings {
    /// Effective worker count, never zero
    pub fn worker_count(&self) -> usize {
        self.max_workers
            .unwrap_or_else(num_cpus::get)
            .max(1)
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            num_results: crate::DEFAULT_NUM_RESULTS,
            page_timeout: crate::DEFAULT_PAGE_TIMEOUT,
            global_timeout: crate::DEFAULT_GLOBAL_TIMEOUT,
            max_content_chars: crate::DEFAULT_MAX_CONTENT_CHARS,
            max_workers: None,
        }
    }
}

/// Completion provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionSettings {
    /// Model identifier passed to the provider
    pub model: String,
    /// Base URL of an OpenAI-compatible API
    pub base_url: String,
    /// API key; usually supplied via PERPLEXIA_OPENAI_API_KEY or OPENAI_API_KEY
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
        }
    }
}

/// Outgoing HTTP request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Default request timeout in seconds
    pub request_timeout: f64,
    /// Maximum idle connections per host
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy configuration
    pub proxies: ProxySettings,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: crate::DEFAULT_PAGE_TIMEOUT,
            pool_maxsize: 10,
            verify_ssl: true,
            proxies: ProxySettings::default(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    /// Proxy for all traffic
    pub all: Option<String>,
    /// HTTP-only proxy
    pub http: Option<String>,
    /// HTTPS-only proxy
    pub https: Option<String>,
}
