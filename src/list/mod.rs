//! Ordered history of saved texts, most recent first
//!
//! Entries have no stable id; every operation addresses them by position.

mod entry;

pub use entry::TextEntry;

use serde::{Deserialize, Serialize};

/// The in-memory list mirrored to storage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextList {
    entries: Vec<TextEntry>,
}

impl TextList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert as the most recent entry
    pub fn push_front(&mut self, entry: TextEntry) {
        self.entries.insert(0, entry);
    }

    /// Flip the favorite flag at `index`, returning the new value
    pub fn toggle_favorite(&mut self, index: usize) -> Option<bool> {
        self.entries.get_mut(index).map(TextEntry::toggle_favorite)
    }

    /// Replace the content at `index`, keeping its favorite flag
    pub fn edit(&mut self, index: usize, content: impl Into<String>) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                entry.content = content.into();
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, index: usize) -> Option<TextEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, index: usize) -> Option<&TextEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TextEntry> {
        self.entries.iter()
    }
}

impl From<Vec<TextEntry>> for TextList {
    fn from(entries: Vec<TextEntry>) -> Self {
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a TextList {
    type Item = &'a TextEntry;
    type IntoIter = std::slice::Iter<'a, TextEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
