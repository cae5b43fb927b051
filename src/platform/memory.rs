//! In-memory platform backends for native use and tests

use rustc_hash::FxHashMap;

use super::{HistoryBackend, KeyValueStore};
use crate::error::{Error, Result};

/// `localStorage` stand-in
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: FxHashMap<String, String>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose writes fail, like a browser with storage disabled
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    /// Seed a raw value, bypassing serialization
    pub fn with_item(mut self, key: &str, value: &str) -> Self {
        self.items.insert(key.to_string(), value.to_string());
        self
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        if self.read_only {
            return Err(Error::Storage(format!("write to '{}' rejected", key)));
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        if self.read_only {
            return Err(Error::Storage(format!("remove of '{}' rejected", key)));
        }
        self.items.remove(key);
        Ok(())
    }
}

/// Session history stand-in with back navigation
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    origin: String,
    entries: Vec<String>,
    index: usize,
}

impl MemoryHistory {
    pub fn new(origin: &str, initial_url: &str) -> Self {
        Self {
            origin: origin.to_string(),
            entries: vec![initial_url.to_string()],
            index: 0,
        }
    }

    /// Step back one entry; false when already at the first
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Number of entries up to and including the current one
    pub fn depth(&self) -> usize {
        self.index + 1
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("http://localhost", "/")
    }
}

impl HistoryBackend for MemoryHistory {
    fn origin(&self) -> String {
        self.origin.clone()
    }

    fn current_url(&self) -> String {
        self.entries[self.index].clone()
    }

    fn push(&mut self, url: &str) -> Result<()> {
        self.entries.truncate(self.index + 1);
        self.entries.push(url.to_string());
        self.index += 1;
        Ok(())
    }

    fn replace(&mut self, url: &str) -> Result<()> {
        self.entries[self.index] = url.to_string();
        Ok(())
    }
}
