//! Output document assembly
//!
//! Pure formatting of the final markdown artifact: query heading, sources
//! section, answer section. Writing the file is the caller's concern.

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters that cannot appear in a file name
static UNSAFE_FILE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\\/:*?"<>|\x00-\x1f]"#).unwrap());

/// The final rendered answer document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDocument {
    query: String,
    source_links: String,
    answer: String,
}

impl OutputDocument {
    /// Assemble a document from its three parts
    pub fn new(
        query: impl Into<String>,
        source_links: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            query: query.into(),
            source_links: source_links.into(),
            answer: answer.into(),
        }
    }

    /// The original query
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The numbered source-link block
    pub fn source_links(&self) -> &str {
        &self.source_links
    }

    /// The renumbered answer body
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Render the full markdown document
    pub fn render(&self) -> String {
        format!(
            "# {}\n\n## Sources\n{}\n\n## Answer\n{}",
            self.query, self.source_links, self.answer
        )
    }

    /// File name derived from the query, safe for the filesystem
    pub fn file_name(&self) -> String {
        let name = UNSAFE_FILE_CHARS.replace_all(self.query.trim(), "_");
        if name.is_empty() {
            "answer.md".to_string()
        } else {
            format!("{}.md", name)
        }
    }
}
