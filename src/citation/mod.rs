//! Citation renumbering and source-link generation
//!
//! The completion provider cites sources with inline markers referencing the
//! context indices it was given. Only a subset of sources usually gets cited,
//! so the markers are renumbered densely (1..k, ascending original order) and
//! a matching source-link block is produced.
//!
//! Marker grammar: `[n]`, with `[(n)]` accepted as an equivalent spelling and
//! normalized away on rewrite. New marker styles belong here, not in the
//! renumbering logic.

use crate::context::ContextEntry;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Matches `[3]` and `[(3)]`, capturing the number
static CITATION_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\(?(\d+)\)?\]").unwrap());

/// Mapping from original citation number to its dense replacement
pub type CitationMap = BTreeMap<usize, usize>;

/// Citation reconciliation failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CitationError {
    /// The answer cites an index with no corresponding source
    #[error("citation [{number}] does not match any of the {sources} collected sources")]
    OutOfRange {
        /// The offending citation number
        number: usize,
        /// How many sources were available
        sources: usize,
    },
}

/// Result of reconciling an answer against its context entries
#[derive(Debug, Clone)]
pub struct Reconciled {
    /// Answer text with densely renumbered markers
    pub answer: String,
    /// Original number to new number
    pub citation_map: CitationMap,
    /// One `"{new}. {url}"` line per cited source
    pub source_links: String,
}

/// Renumber the citations in `answer` and build the source-link block
///
/// Distinct cited numbers are sorted ascending and mapped to 1..k; every
/// marker is rewritten to its `[new]` form. A citation outside
/// `1..=entries.len()` is a hard error, since it cannot be resolved to a
/// URL. An answer without markers reconciles to itself with an empty map
/// and an empty link block.
pub fn reconcile(answer: &str, entries: &[ContextEntry]) -> Result<Reconciled, CitationError> {
    let cited: BTreeSet<usize> = CITATION_MARKER
        .captures_iter(answer)
        // Digit runs too long for usize cannot name a real source
        .map(|caps| caps[1].parse::<usize>().unwrap_or(usize::MAX))
        .collect();

    for &number in &cited {
        if number == 0 || number > entries.len() {
            return Err(CitationError::OutOfRange {
                number,
                sources: entries.len(),
            });
        }
    }

    let citation_map: CitationMap = cited
        .iter()
        .enumerate()
        .map(|(i, &old)| (old, i + 1))
        .collect();

    let renumbered = CITATION_MARKER
        .replace_all(answer, |caps: &Captures| {
            let new = caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|old| citation_map.get(&old));
            match new {
                Some(new) => format!("[{}]", new),
                // Unreachable after validation; keep the marker untouched
                None => caps[0].to_string(),
            }
        })
        .into_owned();

    let source_links = citation_map
        .iter()
        .map(|(&old, &new)| format!("{}. {}", new, entries[old - 1].url))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(Reconciled {
        answer: renumbered,
        citation_map,
        source_links,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(urls: &[&str]) -> Vec<ContextEntry> {
        urls.iter()
            .enumerate()
            .map(|(i, url)| ContextEntry {
                index: i + 1,
                url: url.to_string(),
                text: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_renumbering_scenario() {
        let entries = entries(&["a.com", "b.com", "c.com"]);
        let reconciled = reconcile("X[3] and Y[(1)]", &entries).unwrap();

        assert_eq!(reconciled.answer, "X[2] and Y[1]");
        assert_eq!(reconciled.source_links, "1. a.com\n2. c.com");
        assert_eq!(
            reconciled.citation_map,
            CitationMap::from([(1, 1), (3, 2)])
        );
    }

    #[test]
    fn test_repeated_markers_collapse_to_one_mapping() {
        let entries = entries(&["a.com", "b.com"]);
        let reconciled = reconcile("see [2], again [2] and [(2)]", &entries).unwrap();

        assert_eq!(reconciled.answer, "see [1], again [1] and [1]");
        assert_eq!(reconciled.source_links, "1. b.com");
    }

    #[test]
    fn test_idempotent_on_dense_text() {
        let entries = entries(&["a.com", "b.com", "c.com"]);
        let first = reconcile("A[1] B[2] C[3]", &entries).unwrap();
        let second = reconcile(&first.answer, &entries).unwrap();

        assert_eq!(second.answer, first.answer);
        assert_eq!(
            second.citation_map,
            CitationMap::from([(1, 1), (2, 2), (3, 3)])
        );
    }

    #[test]
    fn test_cited_subset_round_trip() {
        let entries = entries(&["a.com", "b.com", "c.com", "d.com", "e.com"]);
        let reconciled = reconcile("[5] then [2]", &entries).unwrap();

        // Only cited entries survive, renumbered ascending by original number
        assert_eq!(reconciled.answer, "[3] then [1]");
        assert_eq!(reconciled.source_links, "1. b.com\n2. e.com");
    }

    #[test]
    fn test_no_markers_is_valid() {
        let entries = entries(&["a.com"]);
        let reconciled = reconcile("no citations here", &entries).unwrap();

        assert_eq!(reconciled.answer, "no citations here");
        assert!(reconciled.citation_map.is_empty());
        assert!(reconciled.source_links.is_empty());
    }

    #[test]
    fn test_zero_is_out_of_range() {
        let entries = entries(&["a.com"]);
        let err = reconcile("bad [0]", &entries).unwrap_err();
        assert_eq!(err, CitationError::OutOfRange { number: 0, sources: 1 });
    }

    #[test]
    fn test_beyond_len_is_out_of_range() {
        let entries = entries(&["a.com", "b.com"]);
        let err = reconcile("bad [3]", &entries).unwrap_err();
        assert_eq!(err, CitationError::OutOfRange { number: 3, sources: 2 });
    }

    #[test]
    fn test_non_marker_brackets_ignored() {
        let entries = entries(&["a.com"]);
        let reconciled = reconcile("[note] [1a] [] [1]", &entries).unwrap();
        assert_eq!(reconciled.answer, "[note] [1a] [] [1]");
        assert_eq!(reconciled.source_links, "1. a.com");
    }
}
