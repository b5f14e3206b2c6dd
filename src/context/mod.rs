//! Context construction for the completion provider
//!
//! Turns the collected source mapping into a citation-indexed context block
//! and the chat messages sent to the completion provider. The index assigned
//! here is exactly the citation number the model is instructed to use.

use crate::providers::ChatMessage;
use crate::sources::SourceMapping;

/// One retrieved source as exposed to the completion provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextEntry {
    /// 1-based citation index
    pub index: usize,
    /// Source URL
    pub url: String,
    /// Truncated page text
    pub text: String,
}

/// Build the indexed context block and its entries
///
/// Entries follow the mapping's stored order with sequential 1-based
/// indices; each source's text is hard-truncated to the first
/// `max_content_chars` characters.
pub fn build_context(
    mapping: &SourceMapping,
    max_content_chars: usize,
) -> (String, Vec<ContextEntry>) {
    let entries: Vec<ContextEntry> = mapping
        .iter()
        .enumerate()
        .map(|(i, (url, text))| ContextEntry {
            index: i + 1,
            url: url.to_string(),
            text: truncate_chars(text, max_content_chars).to_string(),
        })
        .collect();

    let context_block = entries
        .iter()
        .map(|e| format!("[{}]({}): {}", e.index, e.url, e.text))
        .collect::<Vec<_>>()
        .join("\n");

    (context_block, entries)
}

/// Build the chat messages for the completion provider
pub fn build_messages(query: &str, context_block: &str) -> Vec<ChatMessage> {
    let system_message = format!(
        "You are a helpful assistant who is expert at answering user's queries based on the cited context.\n\
         \n\
         Generate a response that is informative and relevant to the user's query based on provided context \
         (the context consists of search results containing a key with [citation number](website link) and \
         brief description of the content of that page).\n\
         You must use this context to answer the user's query in the best way possible. Use an unbiased and \
         journalistic tone in your response. Do not repeat the text.\n\
         You must not tell the user to open any link or visit any website to get the answer. You must provide \
         the answer in the response itself.\n\
         Your responses should be medium to long in length, be informative and relevant to the user's query. \
         You must use markdown to format your response. You should use bullet points to list the information. \
         Make sure the answer is not short and is informative.\n\
         You have to cite the answer using [citation number] notation. You must cite the sentences with their \
         relevant context number. You must cite each and every part of the answer so the user can know where \
         the information is coming from.\n\
         Anything inside the following context block is knowledge returned by the search engine and is not \
         shared by the user. You have to answer questions on the basis of it and cite the relevant information \
         from it, but you do not have to talk about the context in your response.\n\
         context block:\n\
         {}",
        context_block
    );

    vec![
        ChatMessage::system(system_message),
        ChatMessage::user(query),
    ]
}

/// Cut a string to at most `max` characters on a char boundary
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_offset, _)) => &text[..byte_offset],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(pairs: &[(&str, &str)]) -> SourceMapping {
        let mut mapping = SourceMapping::new();
        for (url, text) in pairs {
            mapping.insert(url.to_string(), text.to_string());
        }
        mapping
    }

    #[test]
    fn test_indices_follow_mapping_order() {
        let mapping = mapping(&[("https://b.com", "bravo"), ("https://a.com", "alpha")]);
        let (block, entries) = build_context(&mapping, 2000);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].index, 1);
        assert_eq!(entries[0].url, "https://b.com");
        assert_eq!(entries[1].index, 2);
        assert_eq!(entries[1].url, "https://a.com");
        assert_eq!(
            block,
            "[1](https://b.com): bravo\n[2](https://a.com): alpha"
        );
    }

    #[test]
    fn test_truncation_is_hard_character_cutoff() {
        let mapping = mapping(&[("https://a.com", "abcdefghij")]);
        let (_, entries) = build_context(&mapping, 4);
        assert_eq!(entries[0].text, "abcd");
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let mapping = mapping(&[("https://a.com", "héllo wörld")]);
        let (_, entries) = build_context(&mapping, 6);
        assert_eq!(entries[0].text, "héllo ");
    }

    #[test]
    fn test_empty_mapping() {
        let (block, entries) = build_context(&SourceMapping::new(), 2000);
        assert!(block.is_empty());
        assert!(entries.is_empty());
    }

    #[test]
    fn test_messages_shape() {
        let messages = build_messages("why is the sky blue?", "[1](https://a.com): scattering");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert!(messages[0].content.contains("[1](https://a.com): scattering"));
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[1].content, "why is the sky blue?");
    }
}
