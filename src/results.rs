use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One post within a topic
///
/// Field order is the order written to the output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Numeric textual identifier, unique within a topic
    pub entry_id: String,

    /// Display name of the poster
    pub author: String,

    /// Profile URL of the poster
    pub author_url: String,

    /// Site-formatted timestamp, kept verbatim
    pub date: String,

    /// URL of this entry
    pub permalink: String,

    /// Post body flattened to plain text
    pub content: String,
}

/// Counters reported after each page is merged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageProgress {
    /// 1-based page number within the run
    pub page: u32,
    pub url: String,
    /// Entries extracted from the page
    pub raw_count: usize,
    /// Entries not seen on an earlier page
    pub new_count: usize,
    /// Accumulated entries after this page
    pub total: usize,
}

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The last page had no next-page link
    Exhausted,
    /// The configured page ceiling was reached
    PageCeiling,
}

/// Everything a successful run produced
#[derive(Debug, Clone)]
pub struct HarvestOutcome {
    pub entries: Vec<Entry>,
    pub pages: Vec<PageProgress>,
    pub stop: StopReason,
}

/// Ordered, de-duplicated collection of entries
///
/// The first entry seen for an id wins; later duplicates are discarded.
#[derive(Debug, Default)]
pub struct EntryAccumulator {
    entries: Vec<Entry>,
    seen: HashSet<String>,
}

impl EntryAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends entries with unseen ids and returns how many were appended
    pub fn merge(&mut self, entries: impl IntoIterator<Item = Entry>) -> usize {
        let mut new_count = 0;
        for entry in entries {
            if self.seen.insert(entry.entry_id.clone()) {
                self.entries.push(entry);
                new_count += 1;
            } else {
                ::log::trace!("Skipping duplicate entry {}", entry.entry_id);
            }
        }
        new_count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }
}
