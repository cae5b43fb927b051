//! JSON persistence of the text list

use log::warn;

use crate::error::Result;
use crate::list::TextList;
use crate::platform::KeyValueStore;

/// Saves and loads a [`TextList`] under a single storage key
pub struct ListStore<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> ListStore<S> {
    pub fn new(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Serialize and write the whole list; last write wins
    pub fn save(&mut self, list: &TextList) -> Result<()> {
        let raw = serde_json::to_string(list)?;
        self.backend.set_item(&self.key, &raw)
    }

    /// Read the list back, degrading to empty on any failure
    pub fn load(&self) -> TextList {
        match self.try_load() {
            Ok(list) => list,
            Err(e) => {
                warn!("Corrupted storage under '{}': {}", self.key, e);
                TextList::new()
            }
        }
    }

    fn try_load(&self) -> Result<TextList> {
        let Some(raw) = self.backend.get_item(&self.key)? else {
            return Ok(TextList::new());
        };
        // A stored `null` reads as empty too
        let list: Option<TextList> = serde_json::from_str(&raw)?;
        Ok(list.unwrap_or_default())
    }

    /// Drop the stored list entirely
    pub fn clear(&mut self) -> Result<()> {
        self.backend.remove_item(&self.key)
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }
}
