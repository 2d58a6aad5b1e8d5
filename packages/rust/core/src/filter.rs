//! Keyword paragraph filter.
//!
//! Keeps, for every entry, the paragraphs that contain at least one keyword
//! (case-insensitive substring). Entries left with nothing are omitted.

use tracing::{debug, instrument};

use toponymy_segment::entry_paragraphs;
use toponymy_shared::{Entry, EntryMap, FilteredResult, KeywordSet};

/// Paragraphs of `entry` that match `keywords`, in source order.
pub fn matching_paragraphs<'a>(entry: &'a Entry, keywords: &KeywordSet) -> Vec<&'a str> {
    entry_paragraphs(entry)
        .into_iter()
        .filter(|p| keywords.matches(p))
        .collect()
}

/// Filter every entry, preserving entry order.
#[instrument(skip_all, fields(entries = entries.len(), keywords = keywords.len()))]
pub fn filter_entries(entries: &EntryMap, keywords: &KeywordSet) -> FilteredResult {
    let mut result = FilteredResult::new();
    if keywords.is_empty() {
        return result;
    }

    for entry in entries.iter() {
        let paragraphs: Vec<String> = matching_paragraphs(entry, keywords)
            .into_iter()
            .map(String::from)
            .collect();
        result.push(entry.heading.clone(), paragraphs);
    }

    debug!(
        matched = result.len(),
        paragraphs = result.paragraph_count(),
        "keyword filter complete"
    );
    result
}
