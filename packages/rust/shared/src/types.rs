//! Core domain types for toponymy: entries, keyword sets, filtered results.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

/// A dictionary entry: its heading token and the body it was assembled from.
///
/// `body` starts with the heading line verbatim, followed by the stripped
/// body lines, joined with `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Heading token, e.g. `BRAD2`.
    pub heading: String,
    /// Heading line plus body lines.
    pub body: String,
}

impl Entry {
    pub fn new(heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            body: body.into(),
        }
    }

    /// The heading line (first line of the body).
    pub fn heading_line(&self) -> &str {
        self.body.split('\n').next().unwrap_or_default()
    }

    /// Body text without the heading token.
    ///
    /// Text following the token on the heading line is kept. When nothing
    /// but whitespace follows it, the heading line and the blank lines
    /// directly after it are dropped. Empty when the entry is only its heading.
    pub fn text(&self) -> &str {
        let after_token = self.heading_line().strip_prefix(self.heading.as_str());
        if after_token.is_some_and(|rest| !rest.trim().is_empty()) {
            return self.body[self.heading.len()..].trim_start();
        }
        match self.body.split_once('\n') {
            Some((_, rest)) => rest.trim_start_matches('\n'),
            None => "",
        }
    }
}

// ---------------------------------------------------------------------------
// EntryMap
// ---------------------------------------------------------------------------

/// Ordered heading → entry mapping produced by the segmenter.
///
/// Inserting a heading that already exists replaces the earlier entry, and
/// the heading moves to the position of this latest assignment.
#[derive(Debug, Clone, Default)]
pub struct EntryMap {
    slots: Vec<Option<Entry>>,
    index: HashMap<String, usize>,
}

impl EntryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the one it replaced (if any).
    pub fn insert(&mut self, entry: Entry) -> Option<Entry> {
        let slot = self.slots.len();
        let replaced = self
            .index
            .insert(entry.heading.clone(), slot)
            .and_then(|old| self.slots[old].take());
        self.slots.push(Some(entry));
        replaced
    }

    pub fn get(&self, heading: &str) -> Option<&Entry> {
        self.index
            .get(heading)
            .and_then(|&slot| self.slots[slot].as_ref())
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Entries in last-assignment order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.slots.iter().flatten()
    }

    /// Headings in last-assignment order.
    pub fn headings(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|e| e.heading.as_str())
    }
}

// ---------------------------------------------------------------------------
// KeywordSet
// ---------------------------------------------------------------------------

/// Keywords to search for, with their lower-cased forms precomputed.
///
/// Blank keywords are dropped: an empty needle would match every paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: Vec<String>,
    lowered: Vec<String>,
}

impl KeywordSet {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(Into::into)
            .filter(|k| !k.trim().is_empty())
            .collect();
        let lowered = keywords.iter().map(|k| k.to_lowercase()).collect();
        Self { keywords, lowered }
    }

    /// Keywords as supplied, in order.
    pub fn as_slice(&self) -> &[String] {
        &self.keywords
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Case-insensitive substring test against every keyword.
    pub fn matches(&self, text: &str) -> bool {
        if self.lowered.is_empty() {
            return false;
        }
        let haystack = text.to_lowercase();
        self.lowered.iter().any(|k| haystack.contains(k.as_str()))
    }
}

// ---------------------------------------------------------------------------
// FilteredResult
// ---------------------------------------------------------------------------

/// One heading in a [`FilteredResult`] with its retained paragraphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredEntry {
    pub heading: String,
    pub paragraphs: Vec<String>,
}

/// Ordered heading → keyword-matching paragraphs.
///
/// A heading with no matching paragraph is absent, never present with an
/// empty list. Serializes as a JSON object in result order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredResult {
    entries: Vec<FilteredEntry>,
}

impl FilteredResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a heading with its paragraphs. Returns `false` (and stores
    /// nothing) when `paragraphs` is empty.
    pub fn push(&mut self, heading: impl Into<String>, paragraphs: Vec<String>) -> bool {
        if paragraphs.is_empty() {
            return false;
        }
        self.entries.push(FilteredEntry {
            heading: heading.into(),
            paragraphs,
        });
        true
    }

    pub fn get(&self, heading: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.heading == heading)
            .map(|e| e.paragraphs.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilteredEntry> {
        self.entries.iter()
    }

    pub fn headings(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.heading.as_str())
    }

    /// Total retained paragraphs across all headings.
    pub fn paragraph_count(&self) -> usize {
        self.entries.iter().map(|e| e.paragraphs.len()).sum()
    }
}

impl Serialize for FilteredResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.heading, &entry.paragraphs)?;
        }
        map.end()
    }
}
